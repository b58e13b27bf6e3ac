//! Maps a terminal search state to the items of the results region.

use finder_client::{DoctorResult, SearchResponse};

use crate::errors::NO_DOCTORS_MESSAGE;
use crate::state::SearchState;

/// A single doctor as presented to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorCard {
    /// 1-based position in the service's ranking.
    pub rank: usize,
    pub name: String,
    pub hospital: String,
    pub phone: String,
    pub distance_km: f64,
    pub lat: f64,
    pub lng: f64,
}

impl DoctorCard {
    fn from_result(rank: usize, d: &DoctorResult) -> Self {
        Self {
            rank,
            name: d.name.clone(),
            hospital: d.hospital.clone(),
            phone: d.phone.clone(),
            distance_km: d.distance_km,
            lat: d.lat,
            lng: d.lng,
        }
    }

    /// Distance with two decimals, e.g. `"3.40 km"`.
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem {
    /// Badge with the inferred specialization.
    Specialization(String),
    DoctorCard(DoctorCard),
    Info(String),
    Error(String),
}

/// Items for `state`. Each call describes the whole results region.
///
/// `Success` and `EmptyResult` need the response payload; without it they
/// render nothing. Non-terminal states always render nothing.
pub fn render(state: &SearchState, response: Option<&SearchResponse>) -> Vec<ResultItem> {
    match (state, response) {
        (SearchState::Success, Some(resp)) => {
            let mut items = Vec::with_capacity(resp.doctors.len() + 1);
            items.push(ResultItem::Specialization(resp.specialization.clone()));
            items.extend(
                resp.doctors
                    .iter()
                    .enumerate()
                    .map(|(i, d)| ResultItem::DoctorCard(DoctorCard::from_result(i + 1, d))),
            );
            items
        }
        (SearchState::EmptyResult, Some(resp)) => vec![
            ResultItem::Specialization(resp.specialization.clone()),
            ResultItem::Info(NO_DOCTORS_MESSAGE.to_string()),
        ],
        (SearchState::Error(message), _) => vec![ResultItem::Error(message.clone())],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(name: &str, distance_km: f64) -> DoctorResult {
        DoctorResult {
            name: name.into(),
            hospital: "City Care".into(),
            phone: "+91 20 5555".into(),
            distance_km,
            lat: 18.5,
            lng: 73.8,
        }
    }

    #[test]
    fn success_keeps_server_order() {
        let resp = SearchResponse {
            specialization: "Pulmonologist".into(),
            doctors: vec![doctor("B", 9.0), doctor("A", 1.0)],
        };
        let items = render(&SearchState::Success, Some(&resp));
        assert_eq!(items[0], ResultItem::Specialization("Pulmonologist".into()));
        let names: Vec<_> = items[1..]
            .iter()
            .map(|i| match i {
                ResultItem::DoctorCard(c) => (c.rank, c.name.as_str()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, [(1, "B"), (2, "A")]);
    }

    #[test]
    fn empty_result_shows_badge_and_notice() {
        let resp = SearchResponse {
            specialization: "Cardiologist".into(),
            doctors: vec![],
        };
        assert_eq!(
            render(&SearchState::EmptyResult, Some(&resp)),
            vec![
                ResultItem::Specialization("Cardiologist".into()),
                ResultItem::Info(NO_DOCTORS_MESSAGE.into()),
            ]
        );
    }

    #[test]
    fn error_and_transient_states() {
        assert_eq!(
            render(&SearchState::Error("City not supported".into()), None),
            vec![ResultItem::Error("City not supported".into())]
        );
        assert!(render(&SearchState::Searching, None).is_empty());
        assert!(render(&SearchState::Idle, None).is_empty());
    }

    #[test]
    fn distance_has_two_decimals() {
        let card = DoctorCard::from_result(1, &doctor("A", 3.4));
        assert_eq!(card.distance_label(), "3.40 km");
    }
}
