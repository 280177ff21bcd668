use actix_web::{web, HttpResponse};
use log::info;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::PlannerError;
use crate::models::itinerary::RouteType;
use crate::models::trip::Trip;
use crate::services::date_allocation_service::DateAllocationService;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    user_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ItineraryParams {
    route_type: Option<RouteType>,
}

fn validate(trip: &Trip, state: &AppState) -> Result<(), PlannerError> {
    if trip.name.trim().is_empty() {
        return Err(PlannerError::InvalidRequest("trip name is required".to_string()));
    }
    if state.config.strict_dates {
        DateAllocationService::parse_date_range(&trip.dates)?;
    }
    Ok(())
}

/*
    POST /api/trips
*/
pub async fn create(
    state: web::Data<Arc<AppState>>,
    input: web::Json<Trip>,
) -> Result<HttpResponse, PlannerError> {
    let trip = input.into_inner();
    validate(&trip, &state)?;

    let created = state.trips.create(trip).await?;
    info!("Created trip {:?} with {} saved places", created.id, created.saved_places.len());
    Ok(HttpResponse::Created().json(created))
}

/*
    GET /api/trips
*/
pub async fn list(
    state: web::Data<Arc<AppState>>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, PlannerError> {
    let trips = state.trips.list(params.user_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(trips))
}

/*
    GET /api/trips/{id}
*/
pub async fn get_by_id(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlannerError> {
    let trip = state.trips.require(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/*
    PUT /api/trips/{id}
*/
pub async fn update(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    input: web::Json<Trip>,
) -> Result<HttpResponse, PlannerError> {
    let id = path.into_inner();
    let trip = input.into_inner();
    validate(&trip, &state)?;

    match state.trips.update(&id, trip).await? {
        Some(updated) => Ok(HttpResponse::Ok().json(updated)),
        None => Err(PlannerError::TripNotFound(id)),
    }
}

/*
    DELETE /api/trips/{id}
*/
pub async fn delete(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, PlannerError> {
    let id = path.into_inner();
    if state.trips.delete(&id).await? {
        info!("Deleted trip {}", id);
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(PlannerError::TripNotFound(id))
    }
}

/*
    GET /api/trips/{id}/itinerary?route_type=
*/
pub async fn itinerary(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    params: web::Query<ItineraryParams>,
) -> Result<HttpResponse, PlannerError> {
    let trip = state.trips.require(&path.into_inner()).await?;

    match params.route_type {
        Some(route_type) => {
            let days = state.smart_route.generate(&trip, route_type)?;
            Ok(HttpResponse::Ok().json(days))
        }
        None => {
            let options = state.smart_route.generate_all(&trip)?;
            Ok(HttpResponse::Ok().json(options))
        }
    }
}
