//! Candidate ranking and deduplication.
//!
//! Takes noisy, possibly duplicate flight candidates for one leg and
//! deterministically narrows them to a bounded best-of set. The two-tier
//! policy guarantees the cheapest options are never excluded while still
//! surfacing good price/duration compromises that a pure price sort would
//! bury.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::types::candidate::Candidate;

/// Tuning knobs for the ranking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Hard cap on the best-of set. Default: 5.
    pub max_results: usize,

    /// How many of the cheapest candidates are taken unconditionally.
    /// Default: 3.
    pub cheapest_tier: usize,

    /// How many additional candidates are taken by combined
    /// price+duration rank. Default: 2.
    pub combined_tier: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            cheapest_tier: 3,
            combined_tier: 2,
        }
    }
}

impl RankingConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result cap.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set the unconditional cheapest tier size.
    pub fn with_cheapest_tier(mut self, size: usize) -> Self {
        self.cheapest_tier = size;
        self
    }

    /// Set the combined-rank tier size.
    pub fn with_combined_tier(mut self, size: usize) -> Self {
        self.combined_tier = size;
        self
    }
}

/// Immutable, bounded best-of set for one search leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedSet {
    candidates: Vec<Candidate>,
}

impl RankedSet {
    /// The empty set. No options is a valid outcome, not an error.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterate the selected candidates in presentation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// The selected candidates in presentation order.
    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Consume the set.
    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

/// Price sort key; missing price sorts last.
fn price_key(candidate: &Candidate) -> u64 {
    candidate
        .price
        .as_ref()
        .map(|p| p.amount)
        .unwrap_or(u64::MAX)
}

/// Duration sort key; missing duration sorts last.
fn duration_key(candidate: &Candidate) -> u32 {
    candidate.duration_minutes.unwrap_or(u32::MAX)
}

/// Rank raw candidates for one leg into a bounded best-of set.
///
/// Steps:
/// 1. Discard candidates below the minimum viable field set, then
///    deduplicate by semantic fingerprint, keeping the first occurrence.
/// 2. With `max_results` or fewer survivors, return them sorted ascending
///    by price. Otherwise take the `cheapest_tier` cheapest unconditionally,
///    then fill with the best `combined_tier` of the remainder by combined
///    rank (price position + duration position, both 0-based ascending).
///
/// All sorts are stable, so candidates tied on a key keep input order.
pub fn rank(candidates: Vec<Candidate>, config: &RankingConfig) -> RankedSet {
    let mut seen = HashSet::new();
    let deduped: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.is_viable())
        .filter(|c| seen.insert(c.fingerprint()))
        .collect();

    debug!(unique = deduped.len(), "ranking deduplicated candidates");

    if deduped.len() <= config.max_results {
        let mut all = deduped;
        all.sort_by_key(price_key);
        return RankedSet { candidates: all };
    }

    let mut by_price = deduped.clone();
    by_price.sort_by_key(price_key);
    let mut by_duration = deduped.clone();
    by_duration.sort_by_key(duration_key);

    let price_pos: HashMap<String, usize> = by_price
        .iter()
        .enumerate()
        .map(|(i, c)| (c.fingerprint(), i))
        .collect();
    let duration_pos: HashMap<String, usize> = by_duration
        .iter()
        .enumerate()
        .map(|(i, c)| (c.fingerprint(), i))
        .collect();

    let top_cheapest: Vec<Candidate> = by_price[..config.cheapest_tier.min(by_price.len())].to_vec();
    let cheapest_ids: HashSet<String> = top_cheapest.iter().map(|c| c.fingerprint()).collect();

    // Remainder scored by combined rank, input order breaking ties.
    let mut remainder: Vec<(usize, Candidate)> = deduped
        .into_iter()
        .filter(|c| !cheapest_ids.contains(&c.fingerprint()))
        .map(|c| {
            let id = c.fingerprint();
            let combined = price_pos[&id] + duration_pos[&id];
            (combined, c)
        })
        .collect();
    remainder.sort_by_key(|(combined, _)| *combined);

    let mut selected = top_cheapest;
    selected.extend(
        remainder
            .into_iter()
            .take(config.combined_tier)
            .map(|(_, c)| c),
    );
    selected.truncate(config.max_results);

    RankedSet {
        candidates: selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::candidate::{FlightEndpoint, Price};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Candidate with the given price/duration, made unique by `tag`.
    fn candidate(tag: u32, price: Option<u64>, duration: Option<u32>) -> Candidate {
        Candidate {
            departure: FlightEndpoint {
                date: NaiveDate::from_ymd_opt(2025, 5, 10),
                time: Some(format!("{}:00AM", tag)),
                location: Some("Schiphol (AMS)".to_string()),
            },
            arrival: FlightEndpoint {
                date: NaiveDate::from_ymd_opt(2025, 5, 10),
                time: Some("1:00PM".to_string()),
                location: Some("Charles de Gaulle (CDG)".to_string()),
            },
            price: price.map(|amount| Price::new(amount, "EUR")),
            duration_minutes: duration,
            stop_count: Some(0),
            stop_locations: vec![],
            carriers: vec!["KLM".to_string()],
        }
    }

    fn prices(set: &RankedSet) -> Vec<Option<u64>> {
        set.iter()
            .map(|c| c.price.as_ref().map(|p| p.amount))
            .collect()
    }

    #[test]
    fn test_empty_input_is_empty_set_not_error() {
        let ranked = rank(vec![], &RankingConfig::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_small_sets_return_all_sorted_by_price() {
        let input = vec![
            candidate(1, Some(300), Some(120)),
            candidate(2, Some(100), Some(200)),
            candidate(3, Some(200), Some(90)),
        ];

        let ranked = rank(input, &RankingConfig::default());
        assert_eq!(prices(&ranked), vec![Some(100), Some(200), Some(300)]);
    }

    #[test]
    fn test_missing_price_sorts_last() {
        let input = vec![
            candidate(1, None, Some(100)),
            candidate(2, Some(150), Some(200)),
        ];

        let ranked = rank(input, &RankingConfig::default());
        assert_eq!(prices(&ranked), vec![Some(150), None]);
    }

    #[test]
    fn test_duplicates_collapse_keeping_first() {
        let a = candidate(1, Some(100), Some(90));
        let same_flight_again = a.clone();
        let b = candidate(2, Some(120), Some(90));

        let ranked = rank(vec![a, same_flight_again, b], &RankingConfig::default());
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_unviable_candidates_are_discarded() {
        let mut no_departure_time = candidate(1, Some(80), Some(90));
        no_departure_time.departure.time = None;
        let mut no_arrival_date = candidate(2, Some(90), Some(90));
        no_arrival_date.arrival.date = None;
        let viable = candidate(3, Some(100), Some(90));

        let ranked = rank(
            vec![no_departure_time, no_arrival_date, viable],
            &RankingConfig::default(),
        );
        assert_eq!(prices(&ranked), vec![Some(100)]);
    }

    #[test]
    fn test_two_tier_selection_scenario() {
        // Six distinct candidates: the three cheapest (80, 90, 100) must be
        // taken unconditionally; 120/150/200 all tie on combined rank
        // (3+2, 4+1, 5+0), so input order decides the final two slots.
        let input = vec![
            candidate(1, Some(100), Some(300)),
            candidate(2, Some(120), Some(200)),
            candidate(3, Some(80), Some(500)),
            candidate(4, Some(90), Some(400)),
            candidate(5, Some(200), Some(100)),
            candidate(6, Some(150), Some(150)),
        ];

        let ranked = rank(input, &RankingConfig::default());
        assert_eq!(ranked.len(), 5);
        assert_eq!(
            prices(&ranked),
            vec![Some(80), Some(90), Some(100), Some(120), Some(200)]
        );
    }

    #[test]
    fn test_cheapest_three_survive_even_with_worst_durations() {
        let input = vec![
            candidate(1, Some(10), Some(5000)),
            candidate(2, Some(11), Some(4900)),
            candidate(3, Some(12), Some(4800)),
            candidate(4, Some(500), Some(100)),
            candidate(5, Some(600), Some(110)),
            candidate(6, Some(700), Some(120)),
            candidate(7, Some(800), Some(130)),
        ];

        let ranked = rank(input, &RankingConfig::default());
        let selected = prices(&ranked);
        for cheap in [Some(10), Some(11), Some(12)] {
            assert!(selected.contains(&cheap), "missing {:?}", cheap);
        }
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let input: Vec<Candidate> = (0..9)
            .map(|i| candidate(i, Some(100 + i as u64 * 7), Some(600 - i * 30)))
            .collect();

        let config = RankingConfig::default();
        let once = rank(input, &config);
        let twice = rank(once.clone().into_vec(), &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_all_prices_missing_degrades_to_stable_order() {
        // Cheapest tier becomes an arbitrary stable subset (input order);
        // combined rank degrades to duration positions.
        let input: Vec<Candidate> = (0..7).map(|i| candidate(i, None, Some(700 - i * 50))).collect();

        let ranked = rank(input, &RankingConfig::default());
        assert_eq!(ranked.len(), 5);
        let durations: Vec<Option<u32>> = ranked.iter().map(|c| c.duration_minutes).collect();
        // Cheapest tier keeps input order; the remainder all tie on combined
        // rank (price position cancels duration position), so input order
        // decides there too.
        assert_eq!(
            durations,
            vec![Some(700), Some(650), Some(600), Some(550), Some(500)]
        );
    }

    proptest! {
        #[test]
        fn prop_output_never_exceeds_cap(fares in proptest::collection::vec((0u64..500, 30u32..1200), 0..20)) {
            let input: Vec<Candidate> = fares
                .iter()
                .enumerate()
                .map(|(i, (p, d))| candidate(i as u32, Some(*p), Some(*d)))
                .collect();

            let ranked = rank(input, &RankingConfig::default());
            prop_assert!(ranked.len() <= 5);
        }

        #[test]
        fn prop_cheapest_tier_always_selected(fares in proptest::collection::vec((0u64..500, 30u32..1200), 6..20)) {
            let input: Vec<Candidate> = fares
                .iter()
                .enumerate()
                .map(|(i, (p, d))| candidate(i as u32, Some(*p), Some(*d)))
                .collect();

            let mut deduped_prices: Vec<u64> = {
                let mut seen = std::collections::HashSet::new();
                input
                    .iter()
                    .filter(|c| seen.insert(c.fingerprint()))
                    .map(|c| c.price.as_ref().unwrap().amount)
                    .collect()
            };
            deduped_prices.sort();

            let ranked = rank(input, &RankingConfig::default());
            let selected: Vec<u64> = ranked
                .iter()
                .map(|c| c.price.as_ref().unwrap().amount)
                .collect();

            // Multiset check: the 3 cheapest prices all appear in the output.
            let mut remaining = selected.clone();
            for price in deduped_prices.iter().take(3.min(deduped_prices.len())) {
                let pos = remaining.iter().position(|p| p == price);
                prop_assert!(pos.is_some(), "cheapest price {} not selected", price);
                remaining.remove(pos.unwrap());
            }
        }
    }
}
