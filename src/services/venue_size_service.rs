//! Venue Size Service
//!
//! Estimates how close a traveler must be before they have "arrived" at a
//! venue. A coffee shop needs a tight radius, an airport a wide one.
//!
//! ## Lookup order
//! 1. exact category match
//! 2. keyword in the venue name (chain stores and big-box names widen the radius)
//! 3. the largest match among the venue's `types`
//! 4. a 50 m default
//!
//! The radius is always clamped to [15, 500] meters. Results are kept in a
//! bounded cache owned by the caller, so separate sessions and tests do not
//! share state.

use log::{debug, info, warn};
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::PlannerError;
use crate::models::venue::{RadiusSource, Venue, VenueSize, VenueType};

const BUILTIN_TABLES: &str = include_str!("../../config/venue_size_tables.json");

pub const MIN_ARRIVAL_RADIUS_M: f64 = 15.0;
pub const MAX_ARRIVAL_RADIUS_M: f64 = 500.0;
const DEFAULT_ARRIVAL_RADIUS_M: f64 = 50.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueSizeTables {
    #[serde(default)]
    pub categories: HashMap<String, f64>,
    #[serde(default)]
    pub name_keywords: HashMap<String, f64>,
    /// Whole-word matchers built from `name_keywords`
    #[serde(skip)]
    keyword_patterns: Vec<(Regex, f64)>,
}

fn normalize_category(category: &str) -> String {
    category
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

impl VenueSizeTables {
    pub fn from_json(json: &str) -> Result<Self, PlannerError> {
        let raw: VenueSizeTables = serde_json::from_str(json).map_err(|e| PlannerError::Catalog {
            name: "venue size tables".to_string(),
            reason: e.to_string(),
        })?;

        let name_keywords: HashMap<String, f64> = raw
            .name_keywords
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let keyword_patterns = name_keywords
            .iter()
            .map(|(keyword, radius)| {
                Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))
                    .map(|pattern| (pattern, *radius))
                    .map_err(|e| PlannerError::Catalog {
                        name: format!("venue name keyword '{}'", keyword),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            categories: raw
                .categories
                .into_iter()
                .map(|(k, v)| (normalize_category(&k), v))
                .collect(),
            name_keywords,
            keyword_patterns,
        })
    }

    pub fn builtin() -> Result<Self, PlannerError> {
        Self::from_json(BUILTIN_TABLES)
    }

    pub fn load(path: Option<&str>) -> Self {
        if let Some(path) = path {
            match fs::read_to_string(path) {
                Ok(json) => match Self::from_json(&json) {
                    Ok(tables) => {
                        info!("Loaded venue size tables from {}", path);
                        return tables;
                    }
                    Err(e) => warn!("{}. Using bundled venue size tables", e),
                },
                Err(e) => warn!("Failed to read {}: {}. Using bundled venue size tables", path, e),
            }
        }

        Self::builtin().unwrap_or_else(|e| {
            warn!("{}. Every venue gets the default radius", e);
            Self::default()
        })
    }

    fn category_radius(&self, category: &str) -> Option<f64> {
        self.categories.get(&normalize_category(category)).copied()
    }

    /// Largest radius among keywords appearing as whole words in the name
    fn name_radius(&self, name: &str) -> Option<f64> {
        let name = name.to_lowercase();
        self.keyword_patterns
            .iter()
            .filter(|(pattern, _)| pattern.is_match(&name))
            .map(|(_, radius)| *radius)
            .reduce(f64::max)
    }
}

struct CacheEntries {
    sizes: HashMap<String, VenueSize>,
    insertion_order: VecDeque<String>,
}

/// Bounded venue size cache. The oldest entry is evicted once full.
pub struct VenueSizeCache {
    capacity: usize,
    entries: Mutex<CacheEntries>,
}

impl VenueSizeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(CacheEntries {
                sizes: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheEntries> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<VenueSize> {
        self.lock().sizes.get(key).cloned()
    }

    pub fn insert(&self, key: String, size: VenueSize) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.lock();
        if entries.sizes.insert(key.clone(), size).is_none() {
            entries.insertion_order.push_back(key);
        }

        while entries.sizes.len() > self.capacity {
            match entries.insertion_order.pop_front() {
                Some(oldest) => {
                    entries.sizes.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Drop every entry, returning how many were removed
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.sizes.len();
        entries.sizes.clear();
        entries.insertion_order.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct VenueSizeService {
    tables: VenueSizeTables,
    cache: Arc<VenueSizeCache>,
}

impl VenueSizeService {
    pub fn new(tables: VenueSizeTables, cache: Arc<VenueSizeCache>) -> Self {
        Self { tables, cache }
    }

    pub fn cache(&self) -> &VenueSizeCache {
        &self.cache
    }

    /// Cached arrival radius for a venue
    pub fn get_venue_size(&self, venue: &Venue) -> VenueSize {
        let key = venue.cache_key();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Using cached venue size for '{}'", key);
            return cached;
        }

        let size = self.estimate(venue);
        self.cache.insert(key, size.clone());
        size
    }

    /// Arrival radius without touching the cache
    pub fn estimate(&self, venue: &Venue) -> VenueSize {
        let category_match = venue
            .category
            .as_deref()
            .and_then(|category| self.tables.category_radius(category).map(|r| (category.to_string(), r)));

        let (category, radius, source) = if let Some((category, radius)) = category_match {
            (category, radius, RadiusSource::Category)
        } else if let Some(radius) = self.tables.name_radius(&venue.name) {
            (self.fallback_label(venue), radius, RadiusSource::Name)
        } else if let Some((category, radius)) = self.types_match(venue) {
            (category, radius, RadiusSource::Types)
        } else {
            (self.fallback_label(venue), DEFAULT_ARRIVAL_RADIUS_M, RadiusSource::Default)
        };

        let arrival_radius_m = radius.clamp(MIN_ARRIVAL_RADIUS_M, MAX_ARRIVAL_RADIUS_M);

        VenueSize {
            category,
            arrival_radius_m,
            venue_type: VenueType::from_radius(arrival_radius_m),
            confidence: Self::confidence(source, venue.review_count),
            source,
        }
    }

    fn types_match(&self, venue: &Venue) -> Option<(String, f64)> {
        venue
            .types
            .iter()
            .filter_map(|t| self.tables.category_radius(t).map(|r| (t.clone(), r)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn fallback_label(&self, venue: &Venue) -> String {
        venue
            .category
            .clone()
            .or_else(|| venue.types.first().cloned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Source strength plus a small popularity bump. Not a calibrated probability.
    fn confidence(source: RadiusSource, review_count: Option<u32>) -> f32 {
        let base: f32 = match source {
            RadiusSource::Category => 0.9,
            RadiusSource::Name => 0.75,
            RadiusSource::Types => 0.6,
            RadiusSource::Default => 0.3,
        };

        let popularity: f32 = match review_count.unwrap_or(0) {
            n if n >= 1000 => 0.1,
            n if n >= 100 => 0.05,
            _ => 0.0,
        };

        (base + popularity).min(1.0)
    }
}
