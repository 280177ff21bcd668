use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::PlannerError;
use crate::models::venue::Venue;
use crate::services::venue_clustering_service::VenueClusteringService;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ClusterRequest {
    pub venues: Vec<Venue>,
    pub max_radius_m: Option<f64>,
    pub min_cluster_size: Option<usize>,
}

/*
    POST /api/venues/size
*/
pub async fn size(
    state: web::Data<Arc<AppState>>,
    input: web::Json<Venue>,
) -> Result<HttpResponse, PlannerError> {
    let venue = input.into_inner();
    if !(-90.0..=90.0).contains(&venue.lat) || !(-180.0..=180.0).contains(&venue.lng) {
        return Err(PlannerError::InvalidRequest(format!(
            "coordinates out of range: ({}, {})",
            venue.lat, venue.lng
        )));
    }

    Ok(HttpResponse::Ok().json(state.venue_sizes.get_venue_size(&venue)))
}

/*
    DELETE /api/venues/size-cache
*/
pub async fn clear_size_cache(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let cleared = state.venue_sizes.cache().clear();
    info!("Cleared {} cached venue sizes", cleared);
    HttpResponse::Ok().json(json!({ "cleared": cleared }))
}

/*
    POST /api/venues/clusters
*/
pub async fn clusters(
    state: web::Data<Arc<AppState>>,
    input: web::Json<ClusterRequest>,
) -> Result<HttpResponse, PlannerError> {
    let request = input.into_inner();
    let mut config = state.clustering_config();

    if let Some(radius) = request.max_radius_m {
        if radius.is_nan() || radius <= 0.0 {
            return Err(PlannerError::InvalidRequest(
                "max_radius_m must be positive".to_string(),
            ));
        }
        config.max_radius_m = radius;
    }
    if let Some(min_size) = request.min_cluster_size {
        if min_size == 0 {
            return Err(PlannerError::InvalidRequest(
                "min_cluster_size must be at least 1".to_string(),
            ));
        }
        config.min_cluster_size = min_size;
    }

    let clusters = VenueClusteringService::new(config).find_clusters(&request.venues);
    Ok(HttpResponse::Ok().json(clusters))
}
