//! Static catalog of trip request fields.
//!
//! The catalog declares which fields block readiness (required) and which
//! merely trigger one best-effort follow-up (optional), along with the
//! question asked when each is missing. Classification is a pure lookup
//! over a [`TripRequest`]; declared order is the order questions are asked
//! in, regardless of what the user mentioned first.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::request::{present, TripRequest};

/// Identifies one catalogued trip field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    OriginAirportCode,
    DestinationAirportCode,
    DestinationCityName,
    StartDate,
    EndDate,
    NumGuests,
    Budget,
    AccommodationPreferences,
    FlightPreferences,
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OriginAirportCode => "origin_airport_code",
            Self::DestinationAirportCode => "destination_airport_code",
            Self::DestinationCityName => "destination_city_name",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::NumGuests => "num_guests",
            Self::Budget => "budget",
            Self::AccommodationPreferences => "accommodation_preferences",
            Self::FlightPreferences => "flight_preferences",
        };
        f.write_str(name)
    }
}

/// Whether a field's absence blocks readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Required,
    Optional,
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct FieldRequirement {
    pub key: FieldKey,
    pub kind: FieldKind,
    /// Question (required) or short label (optional) used when the field
    /// is missing.
    pub prompt: &'static str,
}

/// Outcome of classifying a request against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingFields {
    /// Missing required fields, in declared catalog order.
    pub required: Vec<FieldKey>,
    /// Missing optional fields worth one follow-up question, in declared
    /// order. Empty when optional collection counts as satisfied.
    pub optional: Vec<FieldKey>,
}

/// Below this many missing optional fields, optional collection is treated
/// as satisfied rather than pestering the user for trivial extras.
const OPTIONAL_ASK_MIN: usize = 3;

/// Ordered field catalog.
pub struct FieldCatalog {
    entries: IndexMap<FieldKey, FieldRequirement>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldCatalog {
    /// The standard trip-planning catalog.
    pub fn standard() -> Self {
        let entries = [
            FieldRequirement {
                key: FieldKey::OriginAirportCode,
                kind: FieldKind::Required,
                prompt: "Could you please provide the airport code or city you'll be traveling from?",
            },
            FieldRequirement {
                key: FieldKey::DestinationAirportCode,
                kind: FieldKind::Required,
                prompt: "Which airport are you flying to? If you're not sure of the code, just let me know the city.",
            },
            FieldRequirement {
                key: FieldKey::DestinationCityName,
                kind: FieldKind::Required,
                prompt: "What city are you planning to visit?",
            },
            FieldRequirement {
                key: FieldKey::StartDate,
                kind: FieldKind::Required,
                prompt: "When are you planning to depart? (e.g., YYYY-MM-DD)",
            },
            FieldRequirement {
                key: FieldKey::EndDate,
                kind: FieldKind::Required,
                prompt: "And when will you be returning? (e.g., YYYY-MM-DD)",
            },
            FieldRequirement {
                key: FieldKey::NumGuests,
                kind: FieldKind::Required,
                prompt: "How many people in total will be traveling?",
            },
            FieldRequirement {
                key: FieldKey::Budget,
                kind: FieldKind::Optional,
                prompt: "your budget",
            },
            FieldRequirement {
                key: FieldKey::FlightPreferences,
                kind: FieldKind::Optional,
                prompt: "flight preferences (e.g., cabin class, direct flights)",
            },
            FieldRequirement {
                key: FieldKey::AccommodationPreferences,
                kind: FieldKind::Optional,
                prompt: "accommodation preferences (e.g., type, amenities)",
            },
        ];

        Self {
            entries: entries.into_iter().map(|e| (e.key, e)).collect(),
        }
    }

    /// Look up one entry.
    pub fn get(&self, key: FieldKey) -> Option<&FieldRequirement> {
        self.entries.get(&key)
    }

    /// The prompt for one field.
    pub fn prompt(&self, key: FieldKey) -> &'static str {
        self.entries
            .get(&key)
            .map(|e| e.prompt)
            .unwrap_or("Could you tell me more about your trip?")
    }

    /// Classify a request into missing required and optional fields.
    ///
    /// A field is missing when its attribute is absent, empty, or (for
    /// nested preference objects) has every sub-field empty. Side effect
    /// free.
    pub fn classify(&self, request: &TripRequest) -> MissingFields {
        let mut missing = MissingFields::default();

        for entry in self.entries.values() {
            if field_present(entry.key, request) {
                continue;
            }
            match entry.kind {
                FieldKind::Required => missing.required.push(entry.key),
                FieldKind::Optional => missing.optional.push(entry.key),
            }
        }

        // Too few optional gaps to be worth a follow-up question.
        if missing.optional.len() < OPTIONAL_ASK_MIN {
            missing.optional.clear();
        }

        missing
    }
}

/// Presence test for one catalogued field.
fn field_present(key: FieldKey, request: &TripRequest) -> bool {
    match key {
        FieldKey::OriginAirportCode => present(&request.origin_airport_code),
        FieldKey::DestinationAirportCode => present(&request.destination_airport_code),
        FieldKey::DestinationCityName => present(&request.destination_city_name),
        FieldKey::StartDate => request.start_date.is_some(),
        FieldKey::EndDate => request.end_date.is_some(),
        FieldKey::NumGuests => request.num_guests.is_some(),
        FieldKey::Budget => request.budget.is_some(),
        FieldKey::AccommodationPreferences => !request.accommodation.is_empty(),
        FieldKey::FlightPreferences => !request.flight.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete_required() -> TripRequest {
        TripRequest {
            origin_airport_code: Some("AMS".to_string()),
            destination_airport_code: Some("CDG".to_string()),
            destination_city_name: Some("Paris".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 5, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 15),
            num_guests: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_request_misses_all_required_in_declared_order() {
        let catalog = FieldCatalog::standard();
        let missing = catalog.classify(&TripRequest::default());

        assert_eq!(
            missing.required,
            vec![
                FieldKey::OriginAirportCode,
                FieldKey::DestinationAirportCode,
                FieldKey::DestinationCityName,
                FieldKey::StartDate,
                FieldKey::EndDate,
                FieldKey::NumGuests,
            ]
        );
        // All three optional fields are missing, so the follow-up fires.
        assert_eq!(missing.optional.len(), 3);
    }

    #[test]
    fn test_blank_string_counts_as_missing() {
        let catalog = FieldCatalog::standard();
        let mut request = complete_required();
        request.destination_city_name = Some("   ".to_string());

        let missing = catalog.classify(&request);
        assert_eq!(missing.required, vec![FieldKey::DestinationCityName]);
    }

    #[test]
    fn test_complete_required_yields_no_required_gaps() {
        let catalog = FieldCatalog::standard();
        let missing = catalog.classify(&complete_required());
        assert!(missing.required.is_empty());
    }

    #[test]
    fn test_few_optional_gaps_count_as_satisfied() {
        let catalog = FieldCatalog::standard();
        let mut request = complete_required();
        request.budget = Some(2000);

        // Only two optional fields still missing: under the ask threshold.
        let missing = catalog.classify(&request);
        assert!(missing.optional.is_empty());
    }

    #[test]
    fn test_nested_preferences_missing_only_when_all_subfields_empty() {
        let catalog = FieldCatalog::standard();
        let mut request = complete_required();
        request.flight.direct_only = Some(true);

        let missing = catalog.classify(&request);
        assert!(missing.optional.is_empty());
        assert!(field_present(FieldKey::FlightPreferences, &request));
        assert!(!field_present(FieldKey::AccommodationPreferences, &request));
    }

    #[test]
    fn test_declared_order_ignores_arrival_order() {
        let catalog = FieldCatalog::standard();
        // User gave dates and guests first; airports and city still missing.
        let request = TripRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 5, 10),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 15),
            num_guests: Some(2),
            ..Default::default()
        };

        let missing = catalog.classify(&request);
        assert_eq!(
            missing.required,
            vec![
                FieldKey::OriginAirportCode,
                FieldKey::DestinationAirportCode,
                FieldKey::DestinationCityName,
            ]
        );
    }
}
