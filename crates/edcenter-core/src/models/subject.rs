use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fee_amount: f64,
    #[serde(default)]
    pub student_count: Option<u32>,
    #[serde(default)]
    pub teacher_count: Option<u32>,
    #[serde(default)]
    pub class_count: Option<u32>,
    #[serde(default)]
    pub monthly_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectFormData {
    pub name_en: String,
    pub name_ar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fee_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
