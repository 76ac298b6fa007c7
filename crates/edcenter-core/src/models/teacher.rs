use serde::{Deserialize, Serialize};

use super::{Class, Subject};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub joined_date: String,
    #[serde(default)]
    pub status: TeacherStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub classes_count: u32,
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub current_month_earnings: f64,
    #[serde(default)]
    pub classes: Option<Vec<Class>>,
    #[serde(default)]
    pub payments: Option<Vec<TeacherPayment>>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherFormData {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub joined_date: String,
    pub monthly_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherPayment {
    pub id: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_month: u32,
    #[serde(default)]
    pub payment_year: i32,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherStats {
    #[serde(default)]
    pub total_classes: u32,
    #[serde(default)]
    pub active_classes: u32,
    #[serde(default)]
    pub total_students: u32,
}

/// Response of `GET /teachers/:id/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherStatistics {
    pub teacher: Teacher,
    #[serde(default)]
    pub statistics: TeacherStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_teacher_status() {
        let teacher: Teacher =
            serde_json::from_str(r#"{"id":"t1","first_name":"Omar","last_name":"Saleh","status":"inactive"}"#)
                .unwrap();
        assert_eq!(teacher.status, TeacherStatus::Inactive);
        assert_eq!(teacher.full_name(), "Omar Saleh");

        let teacher: Teacher = serde_json::from_str(r#"{"id":"t2"}"#).unwrap();
        assert_eq!(teacher.status, TeacherStatus::Active);
    }
}
