pub mod mongo;
pub mod trip_repository;
