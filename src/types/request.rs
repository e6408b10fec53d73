//! The trip request record accumulated across conversation turns.
//!
//! Every field starts absent and becomes present only when the user has
//! explicitly stated it; the core never invents values, and in particular
//! never defaults `num_guests` to 1. "Missing field" is therefore a
//! type-checkable `Option`/emptiness condition, not a string-keyed lookup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, ValidationError};

/// Cabin class for flight preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Default for CabinClass {
    fn default() -> Self {
        Self::Economy
    }
}

/// Soft flight preferences. All fields optional; an all-empty value counts
/// as an absent preference for catalog classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightPreferences {
    /// Preferred cabin class.
    pub cabin_class: Option<CabinClass>,
    /// Only consider direct (nonstop) flights.
    pub direct_only: Option<bool>,
}

impl FlightPreferences {
    /// True when the user stated no flight preference at all.
    pub fn is_empty(&self) -> bool {
        self.cabin_class.is_none() && self.direct_only.is_none()
    }
}

/// Soft accommodation preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccommodationPreferences {
    /// Accommodation types to consider (e.g., "hotel", "hostel").
    #[serde(default)]
    pub types: Vec<String>,
    /// Maximum price per night, in the trip's budget currency.
    pub max_price_per_night: Option<u64>,
    /// Desired amenities (e.g., "wifi", "pool").
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl AccommodationPreferences {
    /// True when every sub-field is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.max_price_per_night.is_none() && self.amenities.is_empty()
    }
}

/// The structured travel requirements accumulated from the conversation.
///
/// Mutated only by replacing it wholesale with a fresh extraction; the
/// dialogue layer treats each instance as immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// IATA code of the departure airport.
    pub origin_airport_code: Option<String>,
    /// IATA code of the arrival airport.
    pub destination_airport_code: Option<String>,
    /// Name of the departure city.
    pub origin_city_name: Option<String>,
    /// Name of the destination city (drives lodging search).
    pub destination_city_name: Option<String>,
    /// Total number of travelers. Never defaulted.
    pub num_guests: Option<u32>,
    /// Departure date.
    pub start_date: Option<NaiveDate>,
    /// Return date. Must not precede `start_date`.
    pub end_date: Option<NaiveDate>,
    /// Overall trip budget, if stated.
    pub budget: Option<u64>,
    /// Accommodation preferences, if stated.
    #[serde(default)]
    pub accommodation: AccommodationPreferences,
    /// Flight preferences, if stated.
    #[serde(default)]
    pub flight: FlightPreferences,
}

impl TripRequest {
    /// Parse a request from structured JSON, the shape extraction providers
    /// return. Missing keys stay absent rather than erroring.
    pub fn from_json(json: &str) -> Result<Self, ExtractionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check internal consistency. Must pass before any search is submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::DateOrder { start, end });
            }
        }
        if let Some(count) = self.num_guests {
            if count == 0 {
                return Err(ValidationError::InvalidGuestCount { count });
            }
        }
        Ok(())
    }
}

/// Presence test for a possibly-empty string field.
pub(crate) fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
