use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One doctor as returned by the backend search endpoint. The merge only
/// ever looks at `id`; every other field is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: i64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// False when neither query nor city was given and no backend call was
    /// made. Lets the front end tell "no search yet" apart from "no hits".
    pub searched: bool,
    /// True when a newer search started while this one was in flight; the
    /// caller should drop this response.
    pub superseded: bool,
    pub terms: Vec<String>,
    pub doctors: Vec<DoctorSummary>,
    pub total: usize,
}

impl SearchResponse {
    pub fn not_searched() -> Self {
        Self {
            searched: false,
            superseded: false,
            terms: Vec::new(),
            doctors: Vec::new(),
            total: 0,
        }
    }

    pub fn superseded(terms: Vec<String>) -> Self {
        Self {
            searched: true,
            superseded: true,
            terms,
            doctors: Vec::new(),
            total: 0,
        }
    }

    pub fn results(terms: Vec<String>, doctors: Vec<DoctorSummary>) -> Self {
        let total = doctors.len();
        Self {
            searched: true,
            superseded: false,
            terms,
            doctors,
            total,
        }
    }
}
