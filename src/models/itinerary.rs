use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::place::SavedPlace;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// Balanced pace
    #[default]
    #[serde(alias = "balanced")]
    Current,
    Speed,
    Leisure,
}

impl RouteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Current => "current",
            RouteType::Speed => "speed",
            RouteType::Leisure => "leisure",
        }
    }

    /// How many suggestions fill a day the distributor left empty
    pub fn suggestion_count(&self) -> usize {
        match self {
            RouteType::Leisure => 1,
            RouteType::Current | RouteType::Speed => 2,
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DestinationDateRange {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub label: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OptimizedPlace {
    #[serde(flatten)]
    pub place: SavedPlace,
    /// 1-based position within the day
    pub order: usize,
    /// "HH:MM"
    pub suggested_start: String,
    pub visit_hours: f32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DayItinerary {
    pub day: u32,
    pub date: String,
    pub destination: String,
    pub places: Vec<OptimizedPlace>,
    pub total_time: f32,
    pub walking_time: f32,
    pub transport_time: f32,
    pub free_time: f32,
    pub allocated_days: u32,
    pub is_suggested: bool,
    pub is_tentative: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RouteOptions {
    pub date_ranges: Vec<DestinationDateRange>,
    pub current: Vec<DayItinerary>,
    pub speed: Vec<DayItinerary>,
    pub leisure: Vec<DayItinerary>,
}

impl RouteOptions {
    pub fn get(&self, route_type: RouteType) -> &[DayItinerary] {
        match route_type {
            RouteType::Current => &self.current,
            RouteType::Speed => &self.speed,
            RouteType::Leisure => &self.leisure,
        }
    }
}
