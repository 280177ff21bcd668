use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_VISIT_HOURS: f32 = 2.0;
const MAX_VISIT_HOURS: f32 = 24.0;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SavedPlace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Free text such as "2-3 hours" or "45 minutes"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default)]
    pub is_suggested: bool,
    #[serde(default)]
    pub is_tentative: bool,
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:-|–|to)?\s*(\d+(?:\.\d+)?)?\s*(hours?|hrs?|h|minutes?|mins?|m)?")
            .expect("duration pattern is valid")
    })
}

impl SavedPlace {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            rating: None,
            estimated_time: None,
            priority: Priority::default(),
            destination_name: None,
            lat: None,
            lng: None,
            is_suggested: false,
            is_tentative: false,
        }
    }

    /// Parse `estimated_time` into hours. Ranges resolve to their midpoint
    /// and anything longer than a day is capped at 24 hours.
    pub fn estimated_visit_hours(&self) -> f32 {
        let Some(text) = self.estimated_time.as_deref() else {
            return DEFAULT_VISIT_HOURS;
        };

        let Some(captures) = duration_pattern().captures(text) else {
            return DEFAULT_VISIT_HOURS;
        };

        let low: f32 = match captures.get(1).and_then(|m| m.as_str().parse().ok()) {
            Some(value) => value,
            None => return DEFAULT_VISIT_HOURS,
        };
        let high: f32 = captures
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(low);
        let midpoint = (low + high) / 2.0;

        let is_minutes = captures
            .get(3)
            .map(|unit| unit.as_str().to_lowercase().starts_with('m'))
            .unwrap_or(false);

        let hours = if is_minutes { midpoint / 60.0 } else { midpoint };
        if hours > 0.0 {
            hours.min(MAX_VISIT_HOURS)
        } else {
            DEFAULT_VISIT_HOURS
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}
