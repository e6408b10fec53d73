//! Search collaborator traits, one per category.
//!
//! Searchers wrap whatever mechanism actually finds options (scrapers,
//! APIs). They receive criteria derived from a complete, validated trip
//! request and return raw option lists. An empty list means "no options
//! exist" and is success, not an error.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::FieldKey;
use crate::error::{SearchError, ValidationError};
use crate::types::candidate::Candidate;
use crate::types::lodging::LodgingOption;
use crate::types::request::{CabinClass, TripRequest};

/// Criteria for one flight search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightCriteria {
    /// IATA code of the departure airport.
    pub origin_airport_code: String,
    /// IATA code of the arrival airport.
    pub destination_airport_code: String,
    /// Number of travelers.
    pub num_guests: u32,
    /// Cabin class, defaulted to economy when the user stated none.
    pub cabin_class: CabinClass,
    /// Only consider direct flights.
    pub direct_only: bool,
}

impl FlightCriteria {
    /// Derive criteria from a trip request.
    ///
    /// The request is validated first, so a request with `end_date` before
    /// `start_date` or missing required fields can never reach a searcher.
    pub fn from_request(request: &TripRequest) -> Result<Self, ValidationError> {
        request.validate()?;
        Ok(Self {
            origin_airport_code: required(&request.origin_airport_code, FieldKey::OriginAirportCode)?,
            destination_airport_code: required(
                &request.destination_airport_code,
                FieldKey::DestinationAirportCode,
            )?,
            num_guests: request.num_guests.ok_or(ValidationError::MissingField {
                field: FieldKey::NumGuests,
            })?,
            cabin_class: request.flight.cabin_class.unwrap_or_default(),
            direct_only: request.flight.direct_only.unwrap_or(false),
        })
    }
}

/// Criteria for one lodging search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingCriteria {
    /// Destination city to search in.
    pub city: String,
    /// Check-in date.
    pub check_in: NaiveDate,
    /// Check-out date.
    pub check_out: NaiveDate,
    /// Number of guests.
    pub num_guests: u32,
    /// Accommodation types to consider; empty means any.
    pub types: Vec<String>,
    /// Upper bound on the nightly rate, if the user stated one.
    pub max_price_per_night: Option<u64>,
    /// Desired amenities.
    pub amenities: Vec<String>,
}

impl LodgingCriteria {
    /// Derive criteria from a trip request, validating it first.
    pub fn from_request(request: &TripRequest) -> Result<Self, ValidationError> {
        request.validate()?;
        Ok(Self {
            city: required(&request.destination_city_name, FieldKey::DestinationCityName)?,
            check_in: request.start_date.ok_or(ValidationError::MissingField {
                field: FieldKey::StartDate,
            })?,
            check_out: request.end_date.ok_or(ValidationError::MissingField {
                field: FieldKey::EndDate,
            })?,
            num_guests: request.num_guests.ok_or(ValidationError::MissingField {
                field: FieldKey::NumGuests,
            })?,
            types: request.accommodation.types.clone(),
            max_price_per_night: request.accommodation.max_price_per_night,
            amenities: request.accommodation.amenities.clone(),
        })
    }
}

fn required(value: &Option<String>, field: FieldKey) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField { field }),
    }
}

/// Flight search collaborator.
///
/// One call covers one leg: the orchestrator searches the departure date
/// for the outbound leg and the return date for the inbound leg.
#[async_trait]
pub trait FlightSearcher: Send + Sync {
    /// Search flights for one date, returning raw candidates for ranking.
    async fn search(
        &self,
        criteria: &FlightCriteria,
        date: NaiveDate,
    ) -> Result<Vec<Candidate>, SearchError>;
}

/// Lodging search collaborator.
#[async_trait]
pub trait LodgingSearcher: Send + Sync {
    /// Search accommodation for the full stay.
    async fn search(&self, criteria: &LodgingCriteria) -> Result<Vec<LodgingOption>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> TripRequest {
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
    fn test_flight_criteria_defaults_preferences_not_fields() {
        let criteria = FlightCriteria::from_request(&complete_request()).unwrap();
        assert_eq!(criteria.cabin_class, CabinClass::Economy);
        assert!(!criteria.direct_only);
        assert_eq!(criteria.num_guests, 2);
    }

    #[test]
    fn test_flight_criteria_rejects_missing_origin() {
        let mut request = complete_request();
        request.origin_airport_code = None;

        assert_eq!(
            FlightCriteria::from_request(&request),
            Err(ValidationError::MissingField {
                field: FieldKey::OriginAirportCode
            })
        );
    }

    #[test]
    fn test_criteria_derivation_rejects_reversed_dates() {
        let mut request = complete_request();
        request.start_date = NaiveDate::from_ymd_opt(2025, 5, 10);
        request.end_date = NaiveDate::from_ymd_opt(2025, 5, 5);

        assert!(matches!(
            FlightCriteria::from_request(&request),
            Err(ValidationError::DateOrder { .. })
        ));
        assert!(matches!(
            LodgingCriteria::from_request(&request),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_lodging_criteria_carries_preferences() {
        let mut request = complete_request();
        request.accommodation.types = vec!["hostel".to_string()];
        request.accommodation.max_price_per_night = Some(80);

        let criteria = LodgingCriteria::from_request(&request).unwrap();
        assert_eq!(criteria.types, vec!["hostel"]);
        assert_eq!(criteria.max_price_per_night, Some(80));
        assert_eq!(criteria.city, "Paris");
    }
}
