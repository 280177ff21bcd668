pub mod date_allocation_service;
pub mod geo;
pub mod itinerary_distribution_service;
pub mod place_suggestion_service;
pub mod smart_route_service;
pub mod venue_clustering_service;
pub mod venue_size_service;
