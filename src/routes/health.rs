use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

/*
    /health
*/
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let trip_store = check_trip_store(&state).await;
    if trip_store.status != "ok" {
        health.status = "degraded".to_string();
    }
    health.services.insert("trip_store".to_string(), trip_store);

    health.services.insert(
        "venue_size_cache".to_string(),
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("{} cached venues", state.venue_sizes.cache().len())),
        },
    );

    HttpResponse::Ok().json(health)
}

async fn check_trip_store(state: &AppState) -> ServiceStatus {
    match state.trips.ping().await {
        Ok(details) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(details),
        },
        Err(e) => {
            log::error!("Trip store health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Trip store check failed: {}", e)),
            }
        }
    }
}
