use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::PlannerError;
use crate::models::itinerary::{DestinationDateRange, RouteType};
use crate::models::trip::Trip;
use crate::services::date_allocation_service::DateAllocationService;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub trip: Trip,
    pub route_type: Option<RouteType>,
}

#[derive(Deserialize)]
pub struct AllocateRequest {
    pub dates: String,
    pub destinations: Vec<String>,
}

#[derive(Serialize)]
pub struct AllocateResponse {
    pub total_days: u32,
    pub ranges: Vec<DestinationDateRange>,
}

/*
    POST /api/itineraries/generate
*/
pub async fn generate(
    state: web::Data<Arc<AppState>>,
    input: web::Json<GenerateRequest>,
) -> Result<HttpResponse, PlannerError> {
    let request = input.into_inner();

    match request.route_type {
        Some(route_type) => {
            let days = state.smart_route.generate(&request.trip, route_type)?;
            Ok(HttpResponse::Ok().json(days))
        }
        None => {
            let options = state.smart_route.generate_all(&request.trip)?;
            Ok(HttpResponse::Ok().json(options))
        }
    }
}

/*
    POST /api/itineraries/allocate-dates
    Always strict: a malformed range is a 400 here.
*/
pub async fn allocate_dates(input: web::Json<AllocateRequest>) -> Result<HttpResponse, PlannerError> {
    let request = input.into_inner();
    if request.destinations.is_empty() {
        return Err(PlannerError::InvalidRequest(
            "at least one destination is required".to_string(),
        ));
    }

    let ranges = DateAllocationService::try_allocate(&request.dates, &request.destinations)?;
    let total_days = ranges.iter().map(|r| r.days).sum();

    Ok(HttpResponse::Ok().json(AllocateResponse { total_days, ranges }))
}
