//! Itinerary Distribution Service
//!
//! Buckets a destination's saved places into per-day groups for one of the
//! three route types and attaches rough per-day time estimates.
//!
//! ## Route types
//! - `current` (balanced): every place is kept, `ceil(n / days)` per day
//! - `speed`: at most 4 places per day, extra places are dropped
//! - `leisure`: `floor(n / days)` per day (at least 1), the tail is dropped
//!
//! Places are ordered by priority (high first) before bucketing, so anything
//! dropped is the lowest priority. Time estimates are fixed multipliers per
//! place, not travel-time calculations.

use chrono::{NaiveTime, Timelike};
use log::debug;

use crate::models::itinerary::{OptimizedPlace, RouteType};
use crate::models::place::SavedPlace;

const MAX_PLACES_PER_DAY_SPEED: usize = 4;
/// 23:59, the latest start time a place can be given
const LAST_START_MINUTE: u32 = 23 * 60 + 59;

/// Per-place hour multipliers and the waking-hours budget for a route type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProfile {
    pub visit_hours: f32,
    pub walking_hours: f32,
    pub transport_hours: f32,
    pub day_budget_hours: f32,
}

impl RouteProfile {
    pub fn for_route(route_type: RouteType) -> Self {
        match route_type {
            RouteType::Current => Self {
                visit_hours: 2.5,
                walking_hours: 0.5,
                transport_hours: 0.5,
                day_budget_hours: 10.0,
            },
            RouteType::Speed => Self {
                visit_hours: 1.5,
                walking_hours: 0.25,
                transport_hours: 0.5,
                day_budget_hours: 12.0,
            },
            RouteType::Leisure => Self {
                visit_hours: 3.0,
                walking_hours: 0.75,
                transport_hours: 0.25,
                day_budget_hours: 9.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayEstimates {
    pub total_time: f32,
    pub walking_time: f32,
    pub transport_time: f32,
    pub free_time: f32,
}

#[derive(Debug, Clone)]
pub struct DistributionConfig {
    pub max_places_per_day_speed: usize,
    pub day_start_time: NaiveTime,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            max_places_per_day_speed: MAX_PLACES_PER_DAY_SPEED,
            day_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

#[derive(Default)]
pub struct ItineraryDistributor {
    config: DistributionConfig,
}

impl ItineraryDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DistributionConfig) -> Self {
        Self { config }
    }

    /// Split places into day buckets. Only days with at least one place get a
    /// bucket, so the result may be shorter than `days`.
    pub fn distribute(
        &self,
        places: &[SavedPlace],
        days: u32,
        route_type: RouteType,
    ) -> Vec<Vec<SavedPlace>> {
        if places.is_empty() || days == 0 {
            return Vec::new();
        }

        let days = days as usize;
        let mut sorted = places.to_vec();
        // Stable, so equal priorities keep their saved order
        sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

        let per_day = match route_type {
            RouteType::Current => sorted.len().div_ceil(days),
            RouteType::Speed => {
                sorted.truncate(self.config.max_places_per_day_speed * days);
                sorted.len().div_ceil(days)
            }
            RouteType::Leisure => {
                let per_day = (sorted.len() / days).max(1);
                sorted.truncate(per_day * days);
                per_day
            }
        };

        debug!(
            "Distributing {} places over {} days ({}): {} per day",
            sorted.len(),
            days,
            route_type,
            per_day
        );

        sorted
            .chunks(per_day.max(1))
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn day_estimates(&self, route_type: RouteType, place_count: usize) -> DayEstimates {
        let profile = RouteProfile::for_route(route_type);
        let n = place_count as f32;

        let total_time = n * profile.visit_hours;
        let walking_time = n * profile.walking_hours;
        let transport_time = n * profile.transport_hours;
        let free_time =
            (profile.day_budget_hours - total_time - walking_time - transport_time).max(0.0);

        DayEstimates {
            total_time,
            walking_time,
            transport_time,
            free_time,
        }
    }

    /// Give each place in a day its order and a suggested start time. Start
    /// times never pass 23:59, so an overfull day bunches up at the end
    /// instead of wrapping into the next morning.
    pub fn schedule_day(&self, places: Vec<SavedPlace>, route_type: RouteType) -> Vec<OptimizedPlace> {
        let profile = RouteProfile::for_route(route_type);
        let between_places = profile.walking_hours + profile.transport_hours;
        let mut start_minute = self.config.day_start_time.num_seconds_from_midnight() / 60;

        places
            .into_iter()
            .enumerate()
            .map(|(i, place)| {
                let visit_hours = place.estimated_visit_hours();
                let scheduled = OptimizedPlace {
                    suggested_start: format!("{:02}:{:02}", start_minute / 60, start_minute % 60),
                    order: i + 1,
                    visit_hours,
                    place,
                };

                let minutes = ((visit_hours + between_places) * 60.0).round() as u32;
                start_minute = start_minute.saturating_add(minutes).min(LAST_START_MINUTE);
                scheduled
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::Priority;
    use std::collections::HashSet;

    fn places(count: usize) -> Vec<SavedPlace> {
        (0..count)
            .map(|i| SavedPlace::new(format!("p{}", i), format!("Place {}", i)))
            .collect()
    }

    fn sizes(buckets: &[Vec<SavedPlace>]) -> Vec<usize> {
        buckets.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_current_five_places_two_days() {
        let distributor = ItineraryDistributor::new();
        let buckets = distributor.distribute(&places(5), 2, RouteType::Current);
        assert_eq!(sizes(&buckets), vec![3, 2]);
    }

    #[test]
    fn test_current_keeps_every_place_exactly_once() {
        let distributor = ItineraryDistributor::new();
        for count in 1..=30 {
            for days in 1..=10 {
                let input = places(count);
                let buckets = distributor.distribute(&input, days, RouteType::Current);

                assert!(buckets.iter().all(|b| !b.is_empty()));
                assert!(buckets.len() <= days as usize);

                let ids: Vec<&str> = buckets.iter().flatten().map(|p| p.id.as_str()).collect();
                let unique: HashSet<&str> = ids.iter().copied().collect();
                assert_eq!(ids.len(), count);
                assert_eq!(unique.len(), count);
            }
        }
    }

    #[test]
    fn test_speed_caps_at_four_per_day() {
        let distributor = ItineraryDistributor::new();
        for count in 1..=40 {
            for days in 1..=5u32 {
                let buckets = distributor.distribute(&places(count), days, RouteType::Speed);
                let total: usize = buckets.iter().map(Vec::len).sum();
                assert!(total <= 4 * days as usize);
                assert!(buckets.iter().all(|b| b.len() <= 4));
            }
        }

        let buckets = distributor.distribute(&places(11), 2, RouteType::Speed);
        assert_eq!(sizes(&buckets), vec![4, 4]);
    }

    #[test]
    fn test_leisure_never_busier_than_current() {
        let distributor = ItineraryDistributor::new();
        for count in 1..=30 {
            for days in 1..=8 {
                let input = places(count);
                let current = distributor.distribute(&input, days, RouteType::Current);
                let leisure = distributor.distribute(&input, days, RouteType::Leisure);

                let current_max = current.iter().map(Vec::len).max().unwrap_or(0);
                let leisure_max = leisure.iter().map(Vec::len).max().unwrap_or(0);
                assert!(leisure_max <= current_max, "{} places over {} days", count, days);
            }
        }

        let buckets = distributor.distribute(&places(5), 2, RouteType::Leisure);
        assert_eq!(sizes(&buckets), vec![2, 2]);
    }

    #[test]
    fn test_high_priority_places_come_first() {
        let mut input = places(3);
        input[2].priority = Priority::High;
        input[0].priority = Priority::Low;

        let buckets = ItineraryDistributor::new().distribute(&input, 3, RouteType::Leisure);
        let order: Vec<&str> = buckets.iter().flatten().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["p2", "p1", "p0"]);
    }

    #[test]
    fn test_empty_inputs_produce_no_buckets() {
        let distributor = ItineraryDistributor::new();
        assert!(distributor.distribute(&[], 3, RouteType::Current).is_empty());
        assert!(distributor.distribute(&places(3), 0, RouteType::Current).is_empty());
    }

    #[test]
    fn test_day_estimates() {
        let distributor = ItineraryDistributor::new();
        let estimates = distributor.day_estimates(RouteType::Current, 3);
        assert_eq!(estimates.total_time, 7.5);
        assert_eq!(estimates.walking_time, 1.5);
        assert_eq!(estimates.transport_time, 1.5);
        assert_eq!(estimates.free_time, 0.0);

        let light = distributor.day_estimates(RouteType::Leisure, 1);
        assert_eq!(light.free_time, 5.0);
    }

    #[test]
    fn test_schedule_day_assigns_start_times() {
        let mut input = places(2);
        input[0].estimated_time = Some("2 hours".to_string());

        let scheduled = ItineraryDistributor::new().schedule_day(input, RouteType::Current);
        assert_eq!(scheduled[0].order, 1);
        assert_eq!(scheduled[0].suggested_start, "09:00");
        // 2h visit + 1h walking/transport
        assert_eq!(scheduled[1].suggested_start, "12:00");
        assert_eq!(scheduled[1].order, 2);
    }

    #[test]
    fn test_busy_day_start_times_never_wrap() {
        let buckets = ItineraryDistributor::new().distribute(&places(8), 1, RouteType::Current);
        assert_eq!(buckets.len(), 1);

        let scheduled = ItineraryDistributor::new().schedule_day(buckets[0].clone(), RouteType::Current);
        let starts: Vec<&str> = scheduled.iter().map(|p| p.suggested_start.as_str()).collect();
        assert_eq!(
            starts,
            vec!["09:00", "12:00", "15:00", "18:00", "21:00", "23:59", "23:59", "23:59"]
        );
    }

    #[test]
    fn test_huge_visit_time_does_not_panic() {
        let mut input = places(3);
        input[0].estimated_time = Some("3000000000000 hours".to_string());

        let scheduled = ItineraryDistributor::new().schedule_day(input, RouteType::Speed);
        assert_eq!(scheduled[0].visit_hours, 24.0);
        assert_eq!(scheduled[1].suggested_start, "23:59");
        assert_eq!(scheduled[2].suggested_start, "23:59");
    }
}
