use anyhow::{anyhow, Result};
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::{Appointment, CreateAppointmentRequest};

/// Pass-through to the backend's appointment endpoints. Conflict detection
/// and the status state machine live on the backend.
pub struct AppointmentService {
    backend: BackendClient,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn book(
        &self,
        request: CreateAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment> {
        debug!(
            "Booking appointment: patient {} with doctor {}",
            request.patient_id, request.doctor_id
        );

        if request.scheduled_time <= Utc::now() {
            return Err(anyhow!("Appointment time must be in the future"));
        }
        if request.duration_minutes <= 0 {
            return Err(anyhow!("Appointment duration must be positive"));
        }

        self.backend
            .request(Method::POST, "/appointments", Some(auth_token), Some(json!(request)))
            .await
    }

    pub async fn list_for_patient(
        &self,
        patient_id: i64,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        let patient_id = patient_id.to_string();
        self.backend
            .request_with_query(
                Method::GET,
                "/appointments",
                &[("patient_id", patient_id.as_str())],
                Some(auth_token),
                None,
            )
            .await
    }

    pub async fn list_for_doctor(
        &self,
        doctor_id: i64,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        let doctor_id = doctor_id.to_string();
        self.backend
            .request_with_query(
                Method::GET,
                "/appointments",
                &[("doctor_id", doctor_id.as_str())],
                Some(auth_token),
                None,
            )
            .await
    }

    pub async fn cancel(&self, appointment_id: i64, auth_token: &str) -> Result<Appointment> {
        debug!("Cancelling appointment: {}", appointment_id);

        let path = format!("/appointments/{}", appointment_id);
        self.backend
            .request(Method::DELETE, &path, Some(auth_token), None)
            .await
    }
}
