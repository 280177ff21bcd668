//! Smart Route Service
//!
//! Turns a trip into day-by-day itineraries:
//! 1. split the trip dates across its destinations
//! 2. bucket each destination's saved places into its allocated days
//! 3. top up the remaining allocated days with catalog suggestions
//!
//! Destinations without saved places produce no days at all, not even
//! suggested ones. Day numbers count from the first day of the trip, so a
//! skipped destination leaves a gap in the numbering.

use log::{debug, info};
use std::collections::HashSet;

use crate::error::PlannerError;
use crate::models::itinerary::{DayItinerary, DestinationDateRange, RouteOptions, RouteType};
use crate::models::place::SavedPlace;
use crate::models::trip::Trip;
use crate::services::date_allocation_service::{format_day, DateAllocationService};
use crate::services::itinerary_distribution_service::ItineraryDistributor;
use crate::services::place_suggestion_service::PlaceSuggestionService;

pub struct SmartRouteService {
    distributor: ItineraryDistributor,
    suggestions: PlaceSuggestionService,
    strict_dates: bool,
}

impl SmartRouteService {
    pub fn new(
        distributor: ItineraryDistributor,
        suggestions: PlaceSuggestionService,
        strict_dates: bool,
    ) -> Self {
        Self {
            distributor,
            suggestions,
            strict_dates,
        }
    }

    /// Date ranges per destination. Lenient mode never fails.
    pub fn allocate_dates(&self, trip: &Trip) -> Result<Vec<DestinationDateRange>, PlannerError> {
        let destinations = trip.destination_names();
        if self.strict_dates {
            DateAllocationService::try_allocate(&trip.dates, &destinations)
        } else {
            Ok(DateAllocationService::allocate(&trip.dates, &destinations))
        }
    }

    pub fn generate(&self, trip: &Trip, route_type: RouteType) -> Result<Vec<DayItinerary>, PlannerError> {
        let ranges = self.allocate_dates(trip)?;
        Ok(self.build_days(trip, &ranges, route_type))
    }

    /// All three route variants over a single date allocation
    pub fn generate_all(&self, trip: &Trip) -> Result<RouteOptions, PlannerError> {
        let ranges = self.allocate_dates(trip)?;

        let options = RouteOptions {
            current: self.build_days(trip, &ranges, RouteType::Current),
            speed: self.build_days(trip, &ranges, RouteType::Speed),
            leisure: self.build_days(trip, &ranges, RouteType::Leisure),
            date_ranges: ranges,
        };

        info!(
            "Generated routes for trip '{}': {} current, {} speed, {} leisure days",
            trip.name,
            options.current.len(),
            options.speed.len(),
            options.leisure.len()
        );

        Ok(options)
    }

    pub fn build_days(
        &self,
        trip: &Trip,
        ranges: &[DestinationDateRange],
        route_type: RouteType,
    ) -> Vec<DayItinerary> {
        let single_destination = ranges.len() == 1;
        let mut itinerary = Vec::new();
        let mut day_offset = 0u32;

        for range in ranges {
            let places = trip
                .saved_places
                .places_for(&range.destination, single_destination);

            if places.is_empty() || range.days == 0 {
                debug!(
                    "Skipping '{}' ({} places, {} days)",
                    range.destination,
                    places.len(),
                    range.days
                );
                day_offset += range.days;
                continue;
            }

            let buckets = self.distributor.distribute(&places, range.days, route_type);
            let mut used_ids: HashSet<String> = places.iter().map(|p| p.id.clone()).collect();

            for offset in 0..range.days {
                let (day_places, suggested) = match buckets.get(offset as usize) {
                    Some(bucket) => (bucket.clone(), false),
                    None => {
                        let filler = self.suggestions.suggest(
                            &range.destination,
                            &used_ids,
                            route_type.suggestion_count(),
                        );
                        if filler.is_empty() {
                            continue;
                        }
                        used_ids.extend(filler.iter().map(|p| p.id.clone()));
                        (filler, true)
                    }
                };

                itinerary.push(self.build_day(
                    range,
                    day_offset + offset + 1,
                    offset,
                    day_places,
                    route_type,
                    suggested,
                ));
            }

            day_offset += range.days;
        }

        itinerary
    }

    fn build_day(
        &self,
        range: &DestinationDateRange,
        day: u32,
        offset: u32,
        places: Vec<SavedPlace>,
        route_type: RouteType,
        suggested: bool,
    ) -> DayItinerary {
        let estimates = self.distributor.day_estimates(route_type, places.len());

        DayItinerary {
            day,
            date: format_day(DateAllocationService::day_date(range, offset)),
            destination: range.destination.clone(),
            places: self.distributor.schedule_day(places, route_type),
            total_time: estimates.total_time,
            walking_time: estimates.walking_time,
            transport_time: estimates.transport_time,
            free_time: estimates.free_time,
            allocated_days: range.days,
            is_suggested: suggested,
            is_tentative: suggested,
        }
    }
}
