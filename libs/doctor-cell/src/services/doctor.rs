use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::{
    AvailabilitySlot, DoctorProfile, UpdateAvailabilityRequest, UpdateDoctorRequest,
};

/// Thin pass-through to the backend's doctor endpoints. Validation beyond
/// field shape lives on the backend side.
pub struct DoctorService {
    backend: BackendClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<DoctorProfile> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        self.backend.request(Method::GET, &path, None, None).await
    }

    pub async fn update_doctor(
        &self,
        doctor_id: i64,
        request: UpdateDoctorRequest,
        auth_token: &str,
    ) -> Result<DoctorProfile> {
        debug!("Updating doctor profile: {}", doctor_id);

        // Only provided fields go into the patch.
        let mut update_data = serde_json::Map::new();
        if let Some(name) = request.name {
            update_data.insert("name".to_string(), json!(name));
        }
        if let Some(specialization) = request.specialization {
            update_data.insert("specialization".to_string(), json!(specialization));
        }
        if let Some(city) = request.city {
            update_data.insert("city".to_string(), json!(city));
        }
        if let Some(bio) = request.bio {
            update_data.insert("bio".to_string(), json!(bio));
        }
        if let Some(experience_years) = request.experience_years {
            update_data.insert("experience_years".to_string(), json!(experience_years));
        }
        if let Some(fee) = request.fee {
            update_data.insert("fee".to_string(), json!(fee));
        }

        if update_data.is_empty() {
            return Err(anyhow!("No fields to update"));
        }

        let path = format!("/doctors/{}", doctor_id);
        self.backend
            .request(Method::PUT, &path, Some(auth_token), Some(Value::Object(update_data)))
            .await
    }

    pub async fn get_availability(&self, doctor_id: i64) -> Result<Vec<AvailabilitySlot>> {
        debug!("Fetching availability for doctor: {}", doctor_id);

        let path = format!("/doctors/{}/availability", doctor_id);
        self.backend.request(Method::GET, &path, None, None).await
    }

    pub async fn update_availability(
        &self,
        doctor_id: i64,
        request: UpdateAvailabilityRequest,
        auth_token: &str,
    ) -> Result<Vec<AvailabilitySlot>> {
        debug!(
            "Replacing availability for doctor {} with {} slot(s)",
            doctor_id,
            request.slots.len()
        );

        for slot in &request.slots {
            if !(0..=6).contains(&slot.day_of_week) {
                return Err(anyhow!("Invalid day_of_week: {}", slot.day_of_week));
            }
            if slot.end_time <= slot.start_time {
                return Err(anyhow!("Slot end time must be after start time"));
            }
        }

        let path = format!("/doctors/{}/availability", doctor_id);
        self.backend
            .request(Method::PUT, &path, Some(auth_token), Some(json!(request)))
            .await
    }
}
