use actix_web::web;

pub mod health;
pub mod itinerary;
pub mod trips;
pub mod venues;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/trips")
                        .route("", web::post().to(trips::create))
                        .route("", web::get().to(trips::list))
                        .route("/{id}", web::get().to(trips::get_by_id))
                        .route("/{id}", web::put().to(trips::update))
                        .route("/{id}", web::delete().to(trips::delete))
                        .route("/{id}/itinerary", web::get().to(trips::itinerary)),
                )
                .service(
                    web::scope("/itineraries")
                        .route("/generate", web::post().to(itinerary::generate))
                        .route("/allocate-dates", web::post().to(itinerary::allocate_dates)),
                )
                .service(
                    web::scope("/venues")
                        .route("/size", web::post().to(venues::size))
                        .route("/size-cache", web::delete().to(venues::clear_size_cache))
                        .route("/clusters", web::post().to(venues::clusters)),
                ),
        );
}
