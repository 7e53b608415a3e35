use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::{Role, User};
use shared_models::error::AppError;

use crate::models::CreateAppointmentRequest;
use crate::services::AppointmentService;

#[derive(Debug, Deserialize)]
pub struct AppointmentListQuery {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
}

fn numeric_user_id(user: &User) -> Result<i64, AppError> {
    user.id
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest("Invalid user id in token".to_string()))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let caller_id = numeric_user_id(&user)?;

    // Patients book for themselves; front-desk roles book on behalf of
    // patients. Doctors and clinics do not create bookings here.
    match user.role {
        Role::Patient => {
            if request.patient_id != caller_id {
                return Err(AppError::Auth(
                    "Patients can only book appointments for themselves".to_string(),
                ));
            }
        }
        Role::Receptionist | Role::Admin => {}
        Role::Doctor | Role::Clinic => {
            return Err(AppError::Auth(
                "This role cannot create appointments".to_string(),
            ));
        }
    }

    let service = AppointmentService::new(&state);

    let appointment = service
        .book(request, token)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let caller_id = numeric_user_id(&user)?;
    let service = AppointmentService::new(&state);

    let appointments = match user.role {
        Role::Patient => service.list_for_patient(caller_id, token).await,
        Role::Doctor => service.list_for_doctor(caller_id, token).await,
        Role::Receptionist | Role::Clinic | Role::Admin => {
            // Front-desk and admin views pick the subject explicitly.
            if let Some(patient_id) = query.patient_id {
                service.list_for_patient(patient_id, token).await
            } else if let Some(doctor_id) = query.doctor_id {
                service.list_for_doctor(doctor_id, token).await
            } else {
                return Err(AppError::BadRequest(
                    "patient_id or doctor_id query parameter is required".to_string(),
                ));
            }
        }
    }
    .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<i64>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let service = AppointmentService::new(&state);

    // Ownership is enforced by the backend against the bearer token.
    let appointment = service
        .cancel(appointment_id, token)
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!(appointment)))
}
