use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

impl Venue {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Cache key: the venue id, else name plus coordinates rounded to ~10 meters
    pub fn cache_key(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!(
                "{}@{:.4},{:.4}",
                self.name.trim().to_lowercase(),
                self.lat,
                self.lng
            ),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Small,
    Medium,
    Large,
    Complex,
}

impl VenueType {
    pub fn from_radius(radius_m: f64) -> Self {
        if radius_m <= 30.0 {
            VenueType::Small
        } else if radius_m <= 100.0 {
            VenueType::Medium
        } else if radius_m <= 250.0 {
            VenueType::Large
        } else {
            VenueType::Complex
        }
    }
}

/// Which heuristic produced the arrival radius
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RadiusSource {
    Category,
    Name,
    Types,
    Default,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VenueSize {
    pub category: String,
    pub arrival_radius_m: f64,
    pub venue_type: VenueType,
    pub confidence: f32,
    pub source: RadiusSource,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClusterSuggestion {
    pub id: String,
    pub venues: Vec<Venue>,
    pub center: GeoPoint,
    pub radius_m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f32>,
    pub label: String,
}
