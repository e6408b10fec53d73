//! Parsing of raw flight description strings into candidates.
//!
//! Search collaborators hand back free-text flight descriptions of the form
//! Google Flights exposes in accessibility labels, e.g.:
//!
//! ```text
//! From 120 euros. 1 stop flight with KLM. Leaves Schiphol Airport at
//! 10:30 AM on Saturday, May 10 and arrives at Charles de Gaulle Airport
//! at 2:05 PM on Saturday, May 10. Total duration 3 hr 35 min.
//! Layover (1 of 1) is a 1 hr 10 min layover at Brussels Airport in Brussels.
//! ```
//!
//! The parser is tolerant: any field it cannot find stays absent, and the
//! ranking engine discards candidates below the minimum viable field set.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::types::candidate::{Candidate, FlightEndpoint, Price, StopLocation};

/// Parses flight description strings for one search leg.
///
/// Dates in source strings carry no year, so they are resolved against the
/// year of the searched date.
pub struct FlightParser {
    origin_code: String,
    destination_code: String,
    year: i32,
    price_re: Regex,
    stops_re: Regex,
    duration_re: Regex,
    departure_re: Regex,
    arrival_re: Regex,
    airlines_re: Regex,
    airlines_fallback_re: Regex,
    airlines_suffix_re: Regex,
    airlines_split_re: Regex,
    layover_re: Regex,
    hours_re: Regex,
    minutes_re: Regex,
}

impl FlightParser {
    /// Create a parser for one leg.
    pub fn new(
        origin_code: impl Into<String>,
        destination_code: impl Into<String>,
        search_date: NaiveDate,
    ) -> Self {
        use chrono::Datelike;
        Self {
            origin_code: origin_code.into(),
            destination_code: destination_code.into(),
            year: search_date.year(),
            price_re: Regex::new(r"From (\d{1,3}(?:,\d{3})*|\d+) (\w+)").unwrap(),
            stops_re: Regex::new(r"(\d+) stops? flight").unwrap(),
            duration_re: Regex::new(r"Total duration (.*?)\.").unwrap(),
            departure_re: Regex::new(
                r"Leaves (.*?) Airport at (\d{1,2}:\d{2}\s?[AP]M) on (.*?) and",
            )
            .unwrap(),
            arrival_re: Regex::new(
                r"arrives at (.*?) Airport(?: at (\d{1,2}:\d{2}\s?[AP]M))? on (.*?)\.",
            )
            .unwrap(),
            airlines_re: Regex::new(r"(?i)flight with (.*?)(?: operated by .*?)?(?: arriving|\s*\.|$)")
                .unwrap(),
            airlines_fallback_re: Regex::new(r"(?i)^(.*?) flight(?: from|\.|$)").unwrap(),
            airlines_suffix_re: Regex::new(r"(?i)\s+is\s+a\s+\w+$").unwrap(),
            airlines_split_re: Regex::new(r"\s+and\s+|, ").unwrap(),
            layover_re: Regex::new(r"Layover \(\d+ of \d+\) is a (.*?) layover at (.*?) in (.*?)\.")
                .unwrap(),
            hours_re: Regex::new(r"(\d+)\s*hr").unwrap(),
            minutes_re: Regex::new(r"(\d+)\s*min").unwrap(),
        }
    }

    /// Parse a batch of raw description strings, keeping candidates with at
    /// least the minimum viable field set. Deduplication is the ranking
    /// engine's job.
    pub fn parse_all(&self, lines: &[String]) -> Vec<Candidate> {
        let parsed: Vec<Candidate> = lines
            .iter()
            .map(|line| self.parse_line(line))
            .filter(|c| c.is_viable())
            .collect();
        debug!(
            raw = lines.len(),
            viable = parsed.len(),
            "parsed flight descriptions"
        );
        parsed
    }

    /// Parse one description string. Fields that cannot be found stay absent.
    pub fn parse_line(&self, line: &str) -> Candidate {
        // Sources use narrow no-break spaces before AM/PM.
        let line = line.replace('\u{202f}', " ");
        let mut candidate = Candidate::default();

        if let Some(caps) = self.price_re.captures(&line) {
            let amount: u64 = caps[1].replace(',', "").parse().unwrap_or(0);
            candidate.price = Some(Price::new(amount, currency_code(&caps[2])));
        }
        // "Total price is unavailable" stays None.

        if let Some(caps) = self.stops_re.captures(&line) {
            candidate.stop_count = caps[1].parse().ok();
        } else if line.contains("Nonstop flight") {
            candidate.stop_count = Some(0);
        }

        if let Some(caps) = self.duration_re.captures(&line) {
            candidate.duration_minutes = self.parse_duration_minutes(&caps[1]);
        }

        if let Some(caps) = self.departure_re.captures(&line) {
            candidate.departure = FlightEndpoint {
                location: Some(format!("{} ({})", caps[1].trim(), self.origin_code)),
                time: Some(caps[2].replace(' ', "")),
                date: self.parse_date(caps[3].trim()),
            };
        }

        if let Some(caps) = self.arrival_re.captures(&line) {
            candidate.arrival = FlightEndpoint {
                location: Some(format!("{} ({})", caps[1].trim(), self.destination_code)),
                time: caps.get(2).map(|t| t.as_str().replace(' ', "")),
                date: self.parse_date(caps[3].trim()),
            };
        }

        candidate.carriers = self.parse_carriers(&line);

        candidate.stop_locations = self
            .layover_re
            .captures_iter(&line)
            .map(|caps| StopLocation {
                duration: caps[1].trim().to_string(),
                airport: caps[2].trim().to_string(),
                city: caps[3].trim().to_string(),
            })
            .collect();

        candidate
    }

    /// Convert "10 hr 30 min", "5 hr", or "45 min" to total minutes.
    fn parse_duration_minutes(&self, duration: &str) -> Option<u32> {
        let hours: u32 = self
            .hours_re
            .captures(duration)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);
        let minutes: u32 = self
            .minutes_re
            .captures(duration)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(0);

        if hours > 0 || minutes > 0 {
            Some(hours * 60 + minutes)
        } else {
            None
        }
    }

    /// Parse dates like "Saturday, May 10" or "May 10" against the search
    /// year.
    fn parse_date(&self, date: &str) -> Option<NaiveDate> {
        let date_part = match date.split_once(", ") {
            // Strip the weekday prefix.
            Some((_, rest)) => rest,
            None => date,
        };
        NaiveDate::parse_from_str(&format!("{}, {}", date_part, self.year), "%B %d, %Y").ok()
    }

    fn parse_carriers(&self, line: &str) -> Vec<String> {
        let matched = self
            .airlines_re
            .captures(line)
            .or_else(|| self.airlines_fallback_re.captures(line))
            .map(|caps| caps[1].trim().trim_end_matches('.').to_string());

        let Some(raw) = matched else {
            return vec![];
        };
        // Drop trailing phrases like "is a Nonstop" the pattern can catch.
        let cleaned = self.airlines_suffix_re.replace(&raw, "");
        self.airlines_split_re
            .split(&cleaned)
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(|a| a.to_string())
            .collect()
    }
}

/// Map a source currency word to an ISO code. Plural forms ("euros") are
/// normalized first.
fn currency_code(word: &str) -> String {
    let singular = word.to_lowercase();
    let singular = singular.strip_suffix('s').unwrap_or(&singular);
    match singular {
        "euro" => "EUR",
        "dollar" => "USD",
        "pound" => "GBP",
        _ => "UNK",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FlightParser {
        FlightParser::new("AMS", "CDG", NaiveDate::from_ymd_opt(2025, 5, 10).unwrap())
    }

    const FULL_LINE: &str = "From 120 euros. 1 stop flight with KLM. \
        Leaves Schiphol Airport at 10:30\u{202f}AM on Saturday, May 10 and \
        arrives at Charles de Gaulle Airport at 2:05\u{202f}PM on Saturday, May 10. \
        Total duration 3 hr 35 min. \
        Layover (1 of 1) is a 1 hr 10 min layover at Brussels Airport in Brussels.";

    #[test]
    fn test_parses_full_description() {
        let candidate = parser().parse_line(FULL_LINE);

        assert_eq!(candidate.price, Some(Price::new(120, "EUR")));
        assert_eq!(candidate.stop_count, Some(1));
        assert_eq!(candidate.duration_minutes, Some(215));
        assert_eq!(candidate.carriers, vec!["KLM"]);

        assert_eq!(candidate.departure.time.as_deref(), Some("10:30AM"));
        assert_eq!(
            candidate.departure.location.as_deref(),
            Some("Schiphol (AMS)")
        );
        assert_eq!(
            candidate.departure.date,
            NaiveDate::from_ymd_opt(2025, 5, 10)
        );

        assert_eq!(candidate.arrival.time.as_deref(), Some("2:05PM"));
        assert_eq!(
            candidate.arrival.location.as_deref(),
            Some("Charles de Gaulle (CDG)")
        );

        assert_eq!(candidate.stop_locations.len(), 1);
        assert_eq!(candidate.stop_locations[0].city, "Brussels");
        assert_eq!(candidate.stop_locations[0].airport, "Brussels Airport");
        assert_eq!(candidate.stop_locations[0].duration, "1 hr 10 min");

        assert!(candidate.is_viable());
    }

    #[test]
    fn test_nonstop_and_thousands_separator() {
        let line = "From 1,250 dollars. Nonstop flight with Delta. \
            Leaves Kennedy Airport at 9:00 AM on Monday, June 2 and \
            arrives at Heathrow Airport at 9:10 PM on Monday, June 2. \
            Total duration 7 hr 10 min.";
        let candidate = parser().parse_line(line);

        assert_eq!(candidate.price, Some(Price::new(1250, "USD")));
        assert_eq!(candidate.stop_count, Some(0));
        assert_eq!(candidate.carriers, vec!["Delta"]);
    }

    #[test]
    fn test_unavailable_price_stays_absent() {
        let line = "Total price is unavailable. Nonstop flight with KLM. \
            Leaves Schiphol Airport at 10:30 AM on Saturday, May 10 and \
            arrives at Charles de Gaulle Airport at 12:05 PM on Saturday, May 10. \
            Total duration 1 hr 35 min.";
        let candidate = parser().parse_line(line);

        assert!(candidate.price.is_none());
        assert!(candidate.is_viable());
    }

    #[test]
    fn test_multiple_carriers_split() {
        let line = "From 300 euros. 2 stops flight with KLM, Air France and Delta. \
            Leaves Schiphol Airport at 6:15 AM on Friday, May 9 and \
            arrives at Narita Airport at 11:40 PM on Saturday, May 10. \
            Total duration 20 hr 25 min.";
        let candidate = parser().parse_line(line);

        assert_eq!(candidate.stop_count, Some(2));
        assert_eq!(candidate.carriers, vec!["KLM", "Air France", "Delta"]);
    }

    #[test]
    fn test_duration_variants() {
        let p = parser();
        assert_eq!(p.parse_duration_minutes("10 hr 30 min"), Some(630));
        assert_eq!(p.parse_duration_minutes("5 hr"), Some(300));
        assert_eq!(p.parse_duration_minutes("45 min"), Some(45));
        assert_eq!(p.parse_duration_minutes("soon"), None);
    }

    #[test]
    fn test_date_without_weekday_prefix() {
        let p = parser();
        assert_eq!(p.parse_date("May 1"), NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(
            p.parse_date("Thursday, May 1"),
            NaiveDate::from_ymd_opt(2025, 5, 1)
        );
        assert_eq!(p.parse_date("sometime"), None);
    }

    #[test]
    fn test_currency_words() {
        assert_eq!(currency_code("euros"), "EUR");
        assert_eq!(currency_code("dollar"), "USD");
        assert_eq!(currency_code("pounds"), "GBP");
        assert_eq!(currency_code("zorkmids"), "UNK");
    }

    #[test]
    fn test_garbage_line_is_not_viable() {
        let candidate = parser().parse_line("Sponsored result. Book now!");
        assert!(!candidate.is_viable());
        assert!(parser().parse_all(&["noise".to_string()]).is_empty());
    }
}
