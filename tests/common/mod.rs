use actix_web::{web, App};
use serde_json::{json, Value};
use std::sync::Arc;

use trip_planner_api::config::PlannerConfig;
use trip_planner_api::db::trip_repository::TripRepository;
use trip_planner_api::routes;
use trip_planner_api::state::AppState;

pub struct TestApp {
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_config(config: PlannerConfig) -> Self {
        let state = AppState::with_repository(config, TripRepository::in_memory());
        Self { state }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::config)
    }
}

/// Two-destination trip over Jun 1 - Jun 10 with four Paris places and
/// one Rome place.
pub fn sample_trip() -> Value {
    json!({
        "user_id": "user-1",
        "name": "Summer in Europe",
        "destination": "Paris, Rome",
        "dates": "Jun 1 - Jun 10, 2024",
        "coordinates": [
            { "name": "Paris", "lat": 48.8566, "lng": 2.3522 },
            { "name": "Rome", "lat": 41.9028, "lng": 12.4964 }
        ],
        "saved_places": [
            { "id": "p1", "name": "Sainte-Chapelle", "priority": "high", "destination_name": "Paris" },
            { "id": "p2", "name": "Pantheon Paris", "priority": "low", "destination_name": "Paris" },
            { "id": "p3", "name": "Luxembourg Gardens", "destination_name": "Paris", "estimated_time": "1-2 hours" },
            { "id": "p4", "name": "Musee Rodin", "priority": "high", "destination_name": "Paris" },
            { "id": "r1", "name": "Trevi Fountain", "destination_name": "Rome", "estimated_time": "30 minutes" }
        ]
    })
}

pub fn venue(name: &str, lat: f64, lng: f64) -> Value {
    json!({ "name": name, "lat": lat, "lng": lng })
}
