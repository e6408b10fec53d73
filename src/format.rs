//! Markdown rendering of search results for the summarizer.
//!
//! The summarizer collaborator consumes plain markdown, so ranked results
//! are rendered here before being handed over. Unknown values render as
//! "unknown" rather than being dropped, so the summarizer can see what is
//! missing.

use chrono::NaiveDate;

use crate::ranking::RankedSet;
use crate::types::lodging::LodgingOption;
use crate::types::request::TripRequest;

/// Render a date for display ("May 10, 2025").
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Render total minutes as "3 hr 35 min" / "5 hr" / "45 min".
pub fn display_duration(minutes: u32) -> String {
    let (hr, min) = (minutes / 60, minutes % 60);
    match (hr, min) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}

fn or_unknown(value: Option<String>) -> String {
    value.unwrap_or_else(|| "unknown".to_string())
}

/// Render one ranked flight leg as a markdown list.
pub fn flights_to_markdown(ranked: &RankedSet) -> String {
    if ranked.is_empty() {
        return "No flight options were found.\n".to_string();
    }

    let mut content = String::new();
    for (index, flight) in ranked.iter().enumerate() {
        content.push_str(&format!("Flight {}:\n", index + 1));
        content.push_str(&format!(
            "* **Departure:** {} {} from {}\n",
            or_unknown(flight.departure.date.map(display_date)),
            or_unknown(flight.departure.time.clone()),
            or_unknown(flight.departure.location.clone()),
        ));
        content.push_str(&format!(
            "* **Arrival:** {} {} at {}\n",
            or_unknown(flight.arrival.date.map(display_date)),
            or_unknown(flight.arrival.time.clone()),
            or_unknown(flight.arrival.location.clone()),
        ));
        content.push_str(&format!(
            "* **Duration:** {}\n",
            or_unknown(flight.duration_minutes.map(display_duration)),
        ));
        content.push_str(&format!(
            "* **Stops:** {}\n",
            or_unknown(flight.stop_count.map(|n| n.to_string())),
        ));
        content.push_str(&format!("* **Airlines:** {}\n", flight.carriers.join(", ")));
        content.push_str(&format!(
            "* **Price:** {}\n",
            or_unknown(
                flight
                    .price
                    .as_ref()
                    .map(|p| format!("{} {}", p.amount, p.currency))
            ),
        ));
        if !flight.stop_locations.is_empty() {
            content.push_str("* **Layovers:**\n");
            for stop in &flight.stop_locations {
                content.push_str(&format!(
                    "  * {} ({}) for {}\n",
                    stop.city, stop.airport, stop.duration
                ));
            }
        }
        content.push('\n');
    }
    content
}

/// Render both legs of a round trip.
pub fn round_trip_to_markdown(
    outbound: &RankedSet,
    inbound: &RankedSet,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> String {
    let mut content = String::new();
    content.push_str(&format!(
        "### Outbound Flights ({}):\n\n",
        or_unknown(start_date.map(display_date))
    ));
    content.push_str(&flights_to_markdown(outbound));
    content.push_str(&format!(
        "\n### Return Flights ({}):\n\n",
        or_unknown(end_date.map(display_date))
    ));
    content.push_str(&flights_to_markdown(inbound));
    content
}

/// Render lodging options as a markdown list.
pub fn lodging_to_markdown(options: &[LodgingOption]) -> String {
    if options.is_empty() {
        return "No accommodation options were found.\n".to_string();
    }

    let mut content = String::new();
    for (index, option) in options.iter().enumerate() {
        content.push_str(&format!("Option {}: {}\n", index + 1, option.name));
        content.push_str(&format!(
            "* **Price per night:** {}\n",
            or_unknown(
                option
                    .price_per_night
                    .as_ref()
                    .map(|p| format!("{} {}", p.amount, p.currency))
            ),
        ));
        content.push_str(&format!(
            "* **Rating:** {}\n",
            or_unknown(option.rating.map(|r| format!("{:.1}", r))),
        ));
        content.push_str(&format!(
            "* **Location:** {}\n",
            or_unknown(option.location.clone()),
        ));
        content.push_str(&format!(
            "* **Type:** {}\n",
            or_unknown(option.property_type.clone()),
        ));
        if !option.amenities.is_empty() {
            content.push_str(&format!(
                "* **Amenities:** {}\n",
                option.amenities.join(", ")
            ));
        }
        content.push('\n');
    }
    content
}

/// Flatten the stated preferences into one prompt-friendly line, skipping
/// everything the user left unstated.
pub fn format_preferences(request: &TripRequest) -> String {
    let mut parts = Vec::new();

    if let Some(budget) = request.budget {
        parts.push(format!("budget: {}", budget));
    }
    if let Some(class) = request.flight.cabin_class {
        let label = match class {
            crate::types::request::CabinClass::Economy => "economy",
            crate::types::request::CabinClass::PremiumEconomy => "premium economy",
            crate::types::request::CabinClass::Business => "business",
            crate::types::request::CabinClass::First => "first",
        };
        parts.push(format!("cabin class: {}", label));
    }
    if let Some(direct) = request.flight.direct_only {
        parts.push(format!("direct flights only: {}", if direct { "yes" } else { "no" }));
    }
    if !request.accommodation.types.is_empty() {
        parts.push(format!(
            "accommodation type: {}",
            request.accommodation.types.join(", ")
        ));
    }
    if let Some(max) = request.accommodation.max_price_per_night {
        parts.push(format!("max price per night: {}", max));
    }
    if !request.accommodation.amenities.is_empty() {
        parts.push(format!(
            "amenities: {}",
            request.accommodation.amenities.join(", ")
        ));
    }

    parts.join(", ")
}
