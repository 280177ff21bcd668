//! Place Suggestion Service
//!
//! Supplies canned places for days the distributor could not fill. The
//! catalog is an immutable map from destination key to places, read once at
//! startup. Suggested places are tentative and never persisted.

use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::fs;

use crate::error::PlannerError;
use crate::models::place::SavedPlace;

const BUILTIN_CATALOG: &str = include_str!("../../config/suggestion_catalog.json");

#[derive(Debug, Clone, Default)]
pub struct SuggestionCatalog {
    entries: HashMap<String, Vec<SavedPlace>>,
}

impl SuggestionCatalog {
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        let raw: HashMap<String, Vec<SavedPlace>> =
            serde_json::from_str(json).map_err(|e| PlannerError::Catalog {
                name: "suggestion catalog".to_string(),
                reason: e.to_string(),
            })?;

        let entries = raw
            .into_iter()
            .map(|(key, places)| (key.trim().to_lowercase(), places))
            .collect();

        Ok(Self { entries })
    }

    pub fn builtin() -> Result<Self, PlannerError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_path(path: &str) -> Result<Self, PlannerError> {
        let json = fs::read_to_string(path).map_err(|e| PlannerError::Catalog {
            name: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` when given, otherwise the bundled catalog. A broken
    /// file falls back to the bundled catalog, and a broken bundle to an empty one.
    pub fn load(path: Option<&str>) -> Self {
        if let Some(path) = path {
            match Self::from_path(path) {
                Ok(catalog) => {
                    info!("Loaded suggestion catalog from {} ({} destinations)", path, catalog.len());
                    return catalog;
                }
                Err(e) => warn!("{}. Using bundled suggestion catalog", e),
            }
        }

        Self::builtin().unwrap_or_else(|e| {
            warn!("{}. Place suggestions are disabled", e);
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact key first, then the part before the first comma ("Paris, France")
    fn lookup(&self, destination: &str) -> Option<&Vec<SavedPlace>> {
        let key = destination.trim().to_lowercase();
        self.entries.get(&key).or_else(|| {
            let city = key.split(',').next().unwrap_or("").trim();
            self.entries.get(city)
        })
    }
}

pub struct PlaceSuggestionService {
    catalog: SuggestionCatalog,
}

impl PlaceSuggestionService {
    pub fn new(catalog: SuggestionCatalog) -> Self {
        Self { catalog }
    }

    /// Up to `count` catalog places for `destination` whose ids are not in `used_ids`
    pub fn suggest(
        &self,
        destination: &str,
        used_ids: &HashSet<String>,
        count: usize,
    ) -> Vec<SavedPlace> {
        let Some(candidates) = self.catalog.lookup(destination) else {
            return Vec::new();
        };

        candidates
            .iter()
            .filter(|place| !used_ids.contains(&place.id))
            .take(count)
            .map(|place| {
                let mut suggested = place.clone();
                suggested.destination_name = Some(destination.to_string());
                suggested.is_suggested = true;
                suggested.is_tentative = true;
                suggested
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PlaceSuggestionService {
        PlaceSuggestionService::new(SuggestionCatalog::builtin().unwrap())
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = SuggestionCatalog::builtin().unwrap();
        assert!(catalog.len() >= 5);
    }

    #[test]
    fn test_suggestions_are_flagged_and_skip_used_ids() {
        let mut used = HashSet::new();
        used.insert("suggested-paris-louvre".to_string());

        let suggestions = service().suggest("Paris", &used, 2);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|p| p.is_suggested && p.is_tentative));
        assert!(suggestions.iter().all(|p| p.id != "suggested-paris-louvre"));
        assert_eq!(suggestions[0].destination_name.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_lookup_uses_city_before_comma() {
        let suggestions = service().suggest("Rome, Italy", &HashSet::new(), 1);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, "suggested-rome-colosseum");
    }

    #[test]
    fn test_unknown_destination_has_no_suggestions() {
        assert!(service().suggest("Atlantis", &HashSet::new(), 2).is_empty());
    }

    #[test]
    fn test_bad_catalog_path_falls_back_to_builtin() {
        let catalog = SuggestionCatalog::load(Some("/nonexistent/catalog.json"));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_catalog_from_json_lowercases_keys() {
        let catalog = SuggestionCatalog::from_json(
            r#"{ "Lisbon": [{ "id": "belem", "name": "Belém Tower" }] }"#,
        )
        .unwrap();
        let service = PlaceSuggestionService::new(catalog);
        assert_eq!(service.suggest("lisbon", &HashSet::new(), 3).len(), 1);
        assert!(SuggestionCatalog::from_json("not json").is_err());
    }
}
