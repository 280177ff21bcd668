use log::error;
use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::db::{mongo::create_mongo_client, trip_repository::TripRepository};
use crate::services::{
    itinerary_distribution_service::ItineraryDistributor,
    place_suggestion_service::{PlaceSuggestionService, SuggestionCatalog},
    smart_route_service::SmartRouteService,
    venue_clustering_service::ClusteringConfig,
    venue_size_service::{VenueSizeCache, VenueSizeService, VenueSizeTables},
};

pub struct AppState {
    pub config: PlannerConfig,
    pub trips: TripRepository,
    pub smart_route: SmartRouteService,
    pub venue_sizes: VenueSizeService,
}

impl AppState {
    /// Build state from config. Falls back to the in-memory store when
    /// MongoDB is not configured or unreachable.
    pub async fn new(config: PlannerConfig) -> Arc<Self> {
        let trips = match &config.mongodb_uri {
            Some(uri) => match create_mongo_client(uri).await {
                Ok(client) => TripRepository::mongo(client),
                Err(e) => {
                    error!("MongoDB unavailable: {}. Trips will not persist", e);
                    TripRepository::in_memory()
                }
            },
            None => TripRepository::in_memory(),
        };

        Self::with_repository(config, trips)
    }

    pub fn with_repository(config: PlannerConfig, trips: TripRepository) -> Arc<Self> {
        let catalog = SuggestionCatalog::load(config.suggestions_path.as_deref());
        let smart_route = SmartRouteService::new(
            ItineraryDistributor::new(),
            PlaceSuggestionService::new(catalog),
            config.strict_dates,
        );

        let tables = VenueSizeTables::load(config.venue_tables_path.as_deref());
        let venue_sizes = VenueSizeService::new(
            tables,
            Arc::new(VenueSizeCache::new(config.venue_cache_capacity)),
        );

        Arc::new(Self {
            config,
            trips,
            smart_route,
            venue_sizes,
        })
    }

    pub fn clustering_config(&self) -> ClusteringConfig {
        ClusteringConfig {
            max_radius_m: self.config.cluster_radius_m,
            min_cluster_size: self.config.min_cluster_size,
        }
    }
}
