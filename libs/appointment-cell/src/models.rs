use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_time: DateTime<Utc>,
    pub duration_minutes: i32,
    /// Backend-owned state machine ("scheduled", "completed", "cancelled").
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub scheduled_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}
