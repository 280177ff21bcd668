use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::place::SavedPlace;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripCoordinate {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Saved places either as one flat list or already grouped by destination name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SavedPlaces {
    Flat(Vec<SavedPlace>),
    Grouped(HashMap<String, Vec<SavedPlace>>),
}

impl Default for SavedPlaces {
    fn default() -> Self {
        SavedPlaces::Flat(Vec::new())
    }
}

impl SavedPlaces {
    /// Places belonging to `destination`. Unassigned places in a flat list
    /// belong to the destination only when the trip has a single one.
    pub fn places_for(&self, destination: &str, single_destination: bool) -> Vec<SavedPlace> {
        let wanted = destination.trim().to_lowercase();

        match self {
            SavedPlaces::Grouped(groups) => groups
                .iter()
                .find(|(name, _)| name.trim().to_lowercase() == wanted)
                .map(|(_, places)| places.clone())
                .unwrap_or_default(),
            SavedPlaces::Flat(places) => places
                .iter()
                .filter(|place| match &place.destination_name {
                    Some(name) => name.trim().to_lowercase() == wanted,
                    None => single_destination,
                })
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SavedPlaces::Flat(places) => places.len(),
            SavedPlaces::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Trip {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub destination: String,
    /// Range in the form "Jun 1 - Jun 10, 2024"
    pub dates: String,
    #[serde(default)]
    pub coordinates: Vec<TripCoordinate>,
    #[serde(default)]
    pub saved_places: SavedPlaces,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trip {
    /// Ordered destination names. A trip without coordinates has one
    /// destination named after `destination`.
    pub fn destination_names(&self) -> Vec<String> {
        if self.coordinates.is_empty() {
            vec![self.destination.clone()]
        } else {
            self.coordinates.iter().map(|c| c.name.clone()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, destination: Option<&str>) -> SavedPlace {
        let mut place = SavedPlace::new(id, id);
        place.destination_name = destination.map(str::to_string);
        place
    }

    #[test]
    fn test_flat_places_filtered_by_destination() {
        let places = SavedPlaces::Flat(vec![
            place("a", Some("Paris")),
            place("b", Some("rome")),
            place("c", None),
        ]);

        let paris = places.places_for("paris", false);
        assert_eq!(paris.len(), 1);
        assert_eq!(paris[0].id, "a");

        let only = places.places_for("Rome", true);
        assert_eq!(only.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_grouped_places_deserialize_and_lookup() {
        let json = serde_json::json!({
            "Paris": [{ "id": "a", "name": "Louvre" }],
            "Rome": []
        });
        let places: SavedPlaces = serde_json::from_value(json).unwrap();

        assert!(matches!(places, SavedPlaces::Grouped(_)));
        assert_eq!(places.places_for("PARIS", false).len(), 1);
        assert!(places.places_for("Lisbon", false).is_empty());
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_destination_names_fall_back_to_trip_destination() {
        let trip = Trip {
            id: None,
            user_id: None,
            name: "Weekend".to_string(),
            destination: "Lisbon".to_string(),
            dates: "Jun 1 - Jun 2, 2024".to_string(),
            coordinates: Vec::new(),
            saved_places: SavedPlaces::default(),
            created_at: None,
            updated_at: None,
        };

        assert_eq!(trip.destination_names(), vec!["Lisbon".to_string()]);
    }
}
