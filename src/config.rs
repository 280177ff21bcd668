use log::info;
use serde::{Deserialize, Serialize};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const CLUSTER_RADIUS_METERS: f64 = 200.0;
const MIN_CLUSTER_SIZE: usize = 2;
const VENUE_CACHE_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub host: String,
    pub port: u16,
    /// When unset, trips are kept in process memory
    pub mongodb_uri: Option<String>,
    /// Reject malformed trip date ranges instead of falling back to one day per destination
    pub strict_dates: bool,
    pub cluster_radius_m: f64,
    pub min_cluster_size: usize,
    pub venue_cache_capacity: usize,
    pub suggestions_path: Option<String>,
    pub venue_tables_path: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongodb_uri: None,
            strict_dates: false,
            cluster_radius_m: CLUSTER_RADIUS_METERS,
            min_cluster_size: MIN_CLUSTER_SIZE,
            venue_cache_capacity: VENUE_CACHE_CAPACITY,
            suggestions_path: None,
            venue_tables_path: None,
        }
    }
}

impl PlannerConfig {
    /// Create config from environment variables or use defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            mongodb_uri: std::env::var("MONGODB_URI")
                .ok()
                .filter(|uri| !uri.trim().is_empty()),
            strict_dates: std::env::var("PLANNER_STRICT_DATES")
                .ok()
                .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.strict_dates),
            cluster_radius_m: std::env::var("PLANNER_CLUSTER_RADIUS_M")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|radius: &f64| *radius > 0.0)
                .unwrap_or(defaults.cluster_radius_m),
            min_cluster_size: std::env::var("PLANNER_MIN_CLUSTER_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|size: &usize| *size >= 1)
                .unwrap_or(defaults.min_cluster_size),
            venue_cache_capacity: std::env::var("PLANNER_VENUE_CACHE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.venue_cache_capacity),
            suggestions_path: std::env::var("PLANNER_SUGGESTIONS_PATH").ok(),
            venue_tables_path: std::env::var("PLANNER_VENUE_TABLES_PATH").ok(),
        };

        info!(
            "Planner config: strict_dates={}, cluster_radius_m={}, min_cluster_size={}, venue_cache_capacity={}",
            config.strict_dates,
            config.cluster_radius_m,
            config.min_cluster_size,
            config.venue_cache_capacity
        );

        config
    }
}
