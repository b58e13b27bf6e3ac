//! Wire types for `POST /find-doctors`.
//!
//! Field names follow the service's JSON exactly. Doctor order in
//! [`SearchResponse::doctors`] is the service's ranking and must be kept.

use serde::{Deserialize, Serialize};

/// One search attempt, built only after the caller's position is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Free-text symptoms, trimmed.
    #[serde(rename = "symptoms")]
    pub symptoms_text: String,
    /// City, trimmed and lowercased.
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

/// A doctor entry as ranked by the service. Read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DoctorResult {
    pub name: String,
    pub hospital: String,
    pub phone: String,
    pub distance_km: f64,
    pub lat: f64,
    pub lng: f64,
}

/// Successful (2xx) response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// Specialization the service inferred from the symptoms.
    pub specialization: String,
    pub doctors: Vec<DoctorResult>,
}

/// Failure (non-2xx) response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_serializes_with_service_field_names() {
        let q = SearchQuery {
            symptoms_text: "fever, cough".into(),
            city: "pune".into(),
            lat: 18.52,
            lng: 73.85,
        };
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(
            v,
            json!({ "symptoms": "fever, cough", "city": "pune", "lat": 18.52, "lng": 73.85 })
        );
    }

    #[test]
    fn response_keeps_server_order() {
        let body = json!({
            "specialization": "Pulmonologist",
            "doctors": [
                { "name": "B", "hospital": "H2", "phone": "2", "distance_km": 9.5, "lat": 1.0, "lng": 2.0 },
                { "name": "A", "hospital": "H1", "phone": "1", "distance_km": 1.2, "lat": 3.0, "lng": 4.0 }
            ]
        });
        let resp: SearchResponse = serde_json::from_value(body).unwrap();
        let names: Vec<&str> = resp.doctors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
