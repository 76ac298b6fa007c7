use serde::{Deserialize, Serialize};

use super::{Class, MonthlyPayment, Payment, Subject};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub joined_date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub total_subjects: u32,
    #[serde(default)]
    pub paid_subjects: u32,
    #[serde(default)]
    pub unpaid_subjects: u32,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub classes: Option<Vec<Class>>,
    #[serde(default)]
    pub payments: Option<Vec<Payment>>,
    #[serde(default, rename = "monthlyPayments")]
    pub monthly_payments: Option<Vec<MonthlyPayment>>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentFormData {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub grade: String,
    pub joined_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentSummary {
    #[serde(default)]
    pub total_paid: f64,
    #[serde(default)]
    pub pending_payments_count: u32,
    #[serde(default)]
    pub pending_amount: f64,
}

/// Response of `GET /students/:id/payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentPaymentHistory {
    pub student: Student,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub summary: PaymentSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub teacher_name: String,
}

/// Response of `GET /students/:id/classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentClassHistory {
    pub student: Student,
    #[serde(default)]
    pub classes: Vec<ClassSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_student_with_monthly_payments() {
        let json = r#"{
            "id": "42",
            "first_name": "Lina",
            "last_name": "Haddad",
            "phone": "0790000000",
            "grade": "10",
            "joined_date": "2024-09-01",
            "payment_status": "partial",
            "total_subjects": 2,
            "paid_subjects": 1,
            "unpaid_subjects": 1,
            "subjects": [{"id": "m1", "name_en": "Math", "name_ar": "رياضيات", "fee_amount": 50}],
            "monthlyPayments": [{"id": "p1", "subject_id": "m1", "subject_name": "Math", "amount": 50, "payment_month": 9, "payment_year": 2024, "payment_date": "2024-09-03"}]
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.full_name(), "Lina Haddad");
        assert_eq!(student.subjects[0].name_en, "Math");
        assert_eq!(student.monthly_payments.as_ref().map(Vec::len), Some(1));
        assert!(student.classes.is_none());
    }
}
