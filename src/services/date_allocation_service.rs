//! Destination Date Allocation
//!
//! Splits a trip's overall date range across its destinations. Every
//! destination receives `total / count` days and the remainder goes to the
//! earliest destinations, so the allocated days always add up to the trip
//! length. Ranges are contiguous and never overlap.
//!
//! Trip dates come in as display strings like `"Jun 1 - Jun 10, 2024"`.
//! Both dates take the year written after the end date.

use chrono::{Duration, Local, NaiveDate};
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::PlannerError;
use crate::models::itinerary::DestinationDateRange;

fn date_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*([a-z]+)\.?\s+(\d{1,2})\s*[-–]\s*(?:([a-z]+)\.?\s+)?(\d{1,2}),?\s+(\d{4})\s*$",
        )
        .expect("date range pattern is valid")
    })
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// "Jun 5"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Jun 1 - Jun 4", or a single day when both ends match
pub fn format_range_label(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_day(start)
    } else {
        format!("{} - {}", format_day(start), format_day(end))
    }
}

pub struct DateAllocationService;

impl DateAllocationService {
    /// Parse a trip date range into inclusive start and end dates
    pub fn parse_date_range(dates: &str) -> Result<(NaiveDate, NaiveDate), PlannerError> {
        let invalid = || PlannerError::InvalidDateRange(dates.to_string());

        let captures = date_range_pattern().captures(dates).ok_or_else(invalid)?;

        let start_month = month_number(&captures[1]).ok_or_else(invalid)?;
        let start_day: u32 = captures[2].parse().map_err(|_| invalid())?;
        let end_month = match captures.get(3) {
            Some(month) => month_number(month.as_str()).ok_or_else(invalid)?,
            None => start_month,
        };
        let end_day: u32 = captures[4].parse().map_err(|_| invalid())?;
        let year: i32 = captures[5].parse().map_err(|_| invalid())?;

        // "Dec 28 - Jan 3, 2025" starts in the previous year
        let start_year = if start_month > end_month { year - 1 } else { year };

        let start = NaiveDate::from_ymd_opt(start_year, start_month, start_day).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(year, end_month, end_day).ok_or_else(invalid)?;

        if end < start {
            return Err(invalid());
        }

        Ok((start, end))
    }

    /// Split `dates` across `destinations`, failing on a malformed range
    pub fn try_allocate(
        dates: &str,
        destinations: &[String],
    ) -> Result<Vec<DestinationDateRange>, PlannerError> {
        let (start, end) = Self::parse_date_range(dates)?;
        Ok(Self::split(start, end, destinations))
    }

    /// Split `dates` across `destinations`. A malformed range degrades to one
    /// day per destination starting today.
    pub fn allocate(dates: &str, destinations: &[String]) -> Vec<DestinationDateRange> {
        Self::allocate_with_today(dates, destinations, Local::now().date_naive())
    }

    pub fn allocate_with_today(
        dates: &str,
        destinations: &[String],
        today: NaiveDate,
    ) -> Vec<DestinationDateRange> {
        match Self::try_allocate(dates, destinations) {
            Ok(ranges) => ranges,
            Err(e) => {
                warn!("{}. Falling back to one day per destination from {}", e, today);
                Self::fallback(destinations, today)
            }
        }
    }

    fn split(start: NaiveDate, end: NaiveDate, destinations: &[String]) -> Vec<DestinationDateRange> {
        if destinations.is_empty() {
            return Vec::new();
        }

        let total_days = ((end - start).num_days() + 1) as u32;
        let count = destinations.len() as u32;
        let base = total_days / count;
        let extra = total_days % count;

        debug!(
            "Allocating {} days across {} destinations (base {}, extra {})",
            total_days, count, base, extra
        );

        let mut cursor = start;
        destinations
            .iter()
            .enumerate()
            .map(|(i, destination)| {
                let days = if (i as u32) < extra { base + 1 } else { base };
                let range_start = cursor;
                let range_end = if days == 0 {
                    cursor
                } else {
                    cursor + Duration::days(days as i64 - 1)
                };
                cursor += Duration::days(days as i64);

                if days == 0 {
                    warn!("Destination '{}' received no days", destination);
                }

                DestinationDateRange {
                    destination: destination.clone(),
                    start_date: range_start,
                    end_date: range_end,
                    days,
                    label: format_range_label(range_start, range_end),
                }
            })
            .collect()
    }

    fn fallback(destinations: &[String], today: NaiveDate) -> Vec<DestinationDateRange> {
        destinations
            .iter()
            .map(|destination| DestinationDateRange {
                destination: destination.clone(),
                start_date: today,
                end_date: today,
                days: 1,
                label: format_day(today),
            })
            .collect()
    }

    /// Trip length in days for a well-formed range
    pub fn total_days(dates: &str) -> Option<u32> {
        Self::parse_date_range(dates)
            .ok()
            .map(|(start, end)| ((end - start).num_days() + 1) as u32)
    }

    /// Calendar date of the `offset`-th day (0-based) inside a range
    pub fn day_date(range: &DestinationDateRange, offset: u32) -> NaiveDate {
        range.start_date + Duration::days(offset as i64)
    }
}
