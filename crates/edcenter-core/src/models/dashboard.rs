use serde::{Deserialize, Serialize};

use super::Payment;

/// Aggregates shown on the overview screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub total_teachers: u32,
    #[serde(default)]
    pub total_classes: u32,
    #[serde(default)]
    pub total_subjects: u32,
    #[serde(default)]
    pub monthly_revenue: f64,
    #[serde(default)]
    pub current_month_revenue: f64,
    #[serde(default)]
    pub last_6_months_revenue: Vec<MonthlyRevenue>,
    #[serde(default)]
    pub year_to_date: YearToDateStats,
    #[serde(default)]
    pub recent_payments: Vec<Payment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearToDateStats {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub average_monthly: f64,
    #[serde(default)]
    pub growth_percentage: f64,
}
