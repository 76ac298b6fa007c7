use serde::{Deserialize, Serialize};

/// A student's payment for one subject in one month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_month: u32,
    #[serde(default)]
    pub payment_year: i32,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Payment {
    /// Billing period as `YYYY-MM`
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.payment_year, self.payment_month)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentFormData {
    pub student_id: String,
    pub subject_id: String,
    pub amount: f64,
    pub payment_method: String,
    pub payment_month: u32,
    pub payment_year: i32,
    pub payment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPaymentRequest {
    pub payments: Vec<PaymentFormData>,
}

/// Condensed payment row embedded in a student record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyPayment {
    pub id: String,
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_month: u32,
    #[serde(default)]
    pub payment_year: i32,
    #[serde(default)]
    pub payment_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_period() {
        let payment = Payment {
            id: "p1".to_string(),
            payment_month: 3,
            payment_year: 2024,
            ..Default::default()
        };
        assert_eq!(payment.period(), "2024-03");
    }

    #[test]
    fn test_form_data_omits_empty_notes() {
        let form = PaymentFormData {
            student_id: "s1".to_string(),
            subject_id: "m1".to_string(),
            amount: 150.0,
            payment_method: "cash".to_string(),
            payment_month: 9,
            payment_year: 2024,
            payment_date: "2024-09-01".to_string(),
            notes: None,
        };
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("notes").is_none());
        assert_eq!(json["amount"], 150.0);
    }
}
