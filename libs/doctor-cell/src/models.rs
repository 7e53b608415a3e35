use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub city: String,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub rating: Option<f32>,
    pub fee: Option<i64>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i32>,
    pub fee: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub slots: Vec<AvailabilitySlot>,
}
