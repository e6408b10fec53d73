//! Lodging search results.
//!
//! Lodging options arrive already shaped by the search collaborator; unlike
//! flights they pass through to the summarizer without ranking.

use serde::{Deserialize, Serialize};

use crate::types::candidate::Price;

/// One accommodation option returned by the lodging search collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LodgingOption {
    /// Property name.
    pub name: String,
    /// Nightly rate, when the source stated one.
    pub price_per_night: Option<Price>,
    /// Guest rating on the source's scale (typically 0.0-5.0).
    pub rating: Option<f32>,
    /// Neighborhood or address fragment.
    pub location: Option<String>,
    /// Property type (e.g., "hotel", "hostel", "apartment").
    pub property_type: Option<String>,
    /// Amenities the listing advertises.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Link to the listing, when available.
    pub url: Option<String>,
}

impl LodgingOption {
    /// Create a named option with everything else unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the nightly rate.
    pub fn with_price_per_night(mut self, price: Price) -> Self {
        self.price_per_night = Some(price);
        self
    }

    /// Set the guest rating.
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the property type.
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    /// Add amenities.
    pub fn with_amenities(mut self, amenities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.amenities.extend(amenities.into_iter().map(|a| a.into()));
        self
    }
}
