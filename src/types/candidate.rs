//! Flight search candidates and their semantic fingerprints.
//!
//! A candidate is one parsed flight option. Two textually different raw
//! results that describe the same flight must collapse to one candidate,
//! so identity is a SHA-256 digest of the semantic field tuple, never of
//! the raw source text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A price with its ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Whole-unit amount (no cents; scraped sources round).
    pub amount: u64,
    /// ISO 4217 code, or "UNK" when the source currency was unrecognized.
    pub currency: String,
}

impl Price {
    /// Create a new price.
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// One layover on a multi-stop flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLocation {
    pub city: String,
    pub airport: String,
    /// Layover length as reported by the source (e.g., "1 hr 45 min").
    pub duration: String,
}

/// Departure or arrival endpoint of a flight leg.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    /// Calendar date, when the source stated one.
    pub date: Option<NaiveDate>,
    /// Local clock time as reported (e.g., "10:30AM").
    pub time: Option<String>,
    /// Airport name with IATA code (e.g., "Charles de Gaulle (CDG)").
    pub location: Option<String>,
}

/// One flight option parsed from a raw search result.
///
/// Created during parsing, immutable thereafter; discarded after ranking
/// unless selected into the best-of set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub price: Option<Price>,
    /// Total travel time in minutes, when the source stated a duration.
    pub duration_minutes: Option<u32>,
    /// Number of stops; `Some(0)` for nonstop, `None` when unknown.
    pub stop_count: Option<u32>,
    #[serde(default)]
    pub stop_locations: Vec<StopLocation>,
    /// Operating carriers, as reported.
    #[serde(default)]
    pub carriers: Vec<String>,
}

impl Candidate {
    /// Deterministic identity over the semantic field tuple.
    ///
    /// Carriers are sorted before hashing so reporting order does not split
    /// identical flights. Raw source text and layover detail are excluded:
    /// a flight is the same flight regardless of how the source phrased it.
    pub fn fingerprint(&self) -> String {
        let mut carriers = self.carriers.clone();
        carriers.sort();

        let mut hasher = Sha256::new();
        let fields = [
            self.departure.date.map(|d| d.to_string()).unwrap_or_default(),
            self.departure.time.clone().unwrap_or_default(),
            self.departure.location.clone().unwrap_or_default(),
            self.arrival.date.map(|d| d.to_string()).unwrap_or_default(),
            self.arrival.time.clone().unwrap_or_default(),
            self.arrival.location.clone().unwrap_or_default(),
            self.stop_count.map(|n| n.to_string()).unwrap_or_default(),
            self.duration_minutes.map(|n| n.to_string()).unwrap_or_default(),
            carriers.join(","),
            self.price
                .as_ref()
                .map(|p| p.amount.to_string())
                .unwrap_or_default(),
        ];
        for field in &fields {
            hasher.update(field.as_bytes());
            // Field separator so ("ab", "c") and ("a", "bc") differ.
            hasher.update([0x1f]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Minimum viable field set: a candidate without a departure time and an
    /// arrival date is too incomplete to rank or present.
    pub fn is_viable(&self) -> bool {
        self.departure.time.is_some() && self.arrival.date.is_some()
    }
}
