pub mod itinerary;
pub mod place;
pub mod trip;
pub mod venue;
