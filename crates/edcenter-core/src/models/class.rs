use serde::{Deserialize, Serialize};

use super::Student;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub grade_levels: Vec<String>,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub max_students: u32,
    #[serde(default)]
    pub monthly_fee: f64,
    #[serde(default)]
    pub schedule_days: Vec<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub status: ClassStatus,
    #[serde(default)]
    pub schedules: Vec<ClassSchedule>,
    #[serde(default)]
    pub students: Option<Vec<Student>>,
    #[serde(default)]
    pub available_students: Option<Vec<AvailableStudent>>,
}

/// A student that may be enrolled into a class, with the reason if not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableStudent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub can_join: bool,
    #[serde(default)]
    pub restriction_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassFormData {
    pub name: String,
    pub teacher_id: String,
    pub subject_id: String,
    #[serde(default)]
    pub grade_levels: Vec<String>,
    #[serde(default)]
    pub schedules: Vec<ClassSchedule>,
}

/// Body of the enroll/unenroll calls on `/classes/:id/students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub student_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassStats {
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub available_slots: i64,
    #[serde(default)]
    pub attendance_rate: f64,
    #[serde(default)]
    pub capacity_percentage: f64,
}

/// Response of `GET /classes/:id/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassStatistics {
    pub class: Class,
    #[serde(default)]
    pub statistics: ClassStats,
}
