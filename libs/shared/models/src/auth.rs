use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub aud: Option<String>,
    pub iat: Option<u64>,
}

/// Every account belongs to exactly one of these roles. The enum is closed on
/// purpose: adding a role forces every match over it to be revisited,
/// including the landing-route table below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
    Receptionist,
    Clinic,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "patient" => Some(Role::Patient),
            "doctor" => Some(Role::Doctor),
            "receptionist" => Some(Role::Receptionist),
            "clinic" => Some(Role::Clinic),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Front-end route a user of this role lands on after sign-in.
    pub fn landing_route(self) -> &'static str {
        match self {
            Role::Patient => "/patient/dashboard",
            Role::Doctor => "/doctor/dashboard",
            Role::Receptionist => "/receptionist/dashboard",
            Role::Clinic => "/clinic/dashboard",
            Role::Admin => "/admin/dashboard",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Receptionist => "receptionist",
            Role::Clinic => "clinic",
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: String,
    pub email: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_known_role() {
        for (raw, role) in [
            ("patient", Role::Patient),
            ("doctor", Role::Doctor),
            ("receptionist", Role::Receptionist),
            ("clinic", Role::Clinic),
            ("admin", Role::Admin),
        ] {
            assert_eq!(Role::parse(raw), Some(role));
            assert_eq!(role.as_str(), raw);
        }
    }

    #[test]
    fn parse_rejects_unknown_role() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("Patient"), None);
    }

    #[test]
    fn every_role_has_its_own_landing_route() {
        let routes = [
            (Role::Patient, "/patient/dashboard"),
            (Role::Doctor, "/doctor/dashboard"),
            (Role::Receptionist, "/receptionist/dashboard"),
            (Role::Clinic, "/clinic/dashboard"),
            (Role::Admin, "/admin/dashboard"),
        ];
        for (role, expected) in routes {
            assert_eq!(role.landing_route(), expected);
        }
    }
}
