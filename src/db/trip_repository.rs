use chrono::Utc;
use futures::TryStreamExt;
use log::info;
use bson::doc;
use mongodb::{Client, Collection};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::models::trip::Trip;

/// Ids are always minted here, a client-supplied `_id` is discarded
fn stamp_new(mut trip: Trip) -> Trip {
    let now = Utc::now();
    trip.id = Some(Uuid::new_v4().to_string());
    trip.created_at = Some(now);
    trip.updated_at = Some(now);
    trip
}

fn stamp_update(id: &str, existing: &Trip, mut trip: Trip) -> Trip {
    trip.id = Some(id.to_string());
    trip.created_at = existing.created_at;
    trip.updated_at = Some(Utc::now());
    trip
}

pub struct MongoTripStore {
    client: Arc<Client>,
}

impl MongoTripStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<Trip> {
        self.client.database("Planner").collection("Trips")
    }

    async fn create(&self, trip: Trip) -> Result<Trip, PlannerError> {
        let trip = stamp_new(trip);
        self.collection().insert_one(&trip).await?;
        Ok(trip)
    }

    async fn get(&self, id: &str) -> Result<Option<Trip>, PlannerError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn list(&self, user_id: Option<&str>) -> Result<Vec<Trip>, PlannerError> {
        let filter = match user_id {
            Some(user_id) => doc! { "user_id": user_id },
            None => doc! {},
        };

        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(100)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: &str, trip: Trip) -> Result<Option<Trip>, PlannerError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let trip = stamp_update(id, &existing, trip);
        self.collection()
            .replace_one(doc! { "_id": id }, &trip)
            .await?;
        Ok(Some(trip))
    }

    async fn delete(&self, id: &str) -> Result<bool, PlannerError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), PlannerError> {
        self.client
            .database("Planner")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<String, Trip>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn create(&self, trip: Trip) -> Result<Trip, PlannerError> {
        let trip = stamp_new(trip);
        let id = trip.id.clone().unwrap_or_default();
        self.trips.write().await.insert(id, trip.clone());
        Ok(trip)
    }

    async fn get(&self, id: &str) -> Result<Option<Trip>, PlannerError> {
        Ok(self.trips.read().await.get(id).cloned())
    }

    async fn list(&self, user_id: Option<&str>) -> Result<Vec<Trip>, PlannerError> {
        let mut trips: Vec<Trip> = self
            .trips
            .read()
            .await
            .values()
            .filter(|trip| user_id.map_or(true, |u| trip.user_id.as_deref() == Some(u)))
            .cloned()
            .collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn update(&self, id: &str, trip: Trip) -> Result<Option<Trip>, PlannerError> {
        let mut trips = self.trips.write().await;
        let Some(existing) = trips.get(id) else {
            return Ok(None);
        };

        let trip = stamp_update(id, existing, trip);
        trips.insert(id.to_string(), trip.clone());
        Ok(Some(trip))
    }

    async fn delete(&self, id: &str) -> Result<bool, PlannerError> {
        Ok(self.trips.write().await.remove(id).is_some())
    }

    async fn count(&self) -> usize {
        self.trips.read().await.len()
    }
}

/// Source of truth for trips and their saved places
pub enum TripRepository {
    Mongo(MongoTripStore),
    InMemory(InMemoryTripStore),
}

impl TripRepository {
    pub fn mongo(client: Arc<Client>) -> Self {
        info!("Using MongoDB trip store");
        TripRepository::Mongo(MongoTripStore::new(client))
    }

    pub fn in_memory() -> Self {
        info!("Using in-memory trip store");
        TripRepository::InMemory(InMemoryTripStore::new())
    }

    pub async fn create(&self, trip: Trip) -> Result<Trip, PlannerError> {
        match self {
            TripRepository::Mongo(store) => store.create(trip).await,
            TripRepository::InMemory(store) => store.create(trip).await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Trip>, PlannerError> {
        match self {
            TripRepository::Mongo(store) => store.get(id).await,
            TripRepository::InMemory(store) => store.get(id).await,
        }
    }

    /// Same as `get`, but a missing trip is an error
    pub async fn require(&self, id: &str) -> Result<Trip, PlannerError> {
        self.get(id)
            .await?
            .ok_or_else(|| PlannerError::TripNotFound(id.to_string()))
    }

    pub async fn list(&self, user_id: Option<&str>) -> Result<Vec<Trip>, PlannerError> {
        match self {
            TripRepository::Mongo(store) => store.list(user_id).await,
            TripRepository::InMemory(store) => store.list(user_id).await,
        }
    }

    pub async fn update(&self, id: &str, trip: Trip) -> Result<Option<Trip>, PlannerError> {
        match self {
            TripRepository::Mongo(store) => store.update(id, trip).await,
            TripRepository::InMemory(store) => store.update(id, trip).await,
        }
    }

    pub async fn delete(&self, id: &str) -> Result<bool, PlannerError> {
        match self {
            TripRepository::Mongo(store) => store.delete(id).await,
            TripRepository::InMemory(store) => store.delete(id).await,
        }
    }

    /// Cheap reachability check for health probes
    pub async fn ping(&self) -> Result<String, PlannerError> {
        match self {
            TripRepository::Mongo(store) => {
                store.ping().await?;
                Ok("MongoDB trip store reachable".to_string())
            }
            TripRepository::InMemory(store) => {
                Ok(format!("in-memory trip store holding {} trips", store.count().await))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::SavedPlaces;

    fn trip(name: &str, user_id: Option<&str>) -> Trip {
        Trip {
            id: None,
            user_id: user_id.map(str::to_string),
            name: name.to_string(),
            destination: "Paris".to_string(),
            dates: "Jun 1 - Jun 3, 2024".to_string(),
            coordinates: Vec::new(),
            saved_places: SavedPlaces::default(),
            created_at: None,
            updated_at: None,
        }
    }

    #[actix_rt::test]
    async fn test_in_memory_crud() {
        let repository = TripRepository::in_memory();

        let created = repository.create(trip("Paris", Some("u1"))).await.unwrap();
        let id = created.id.clone().unwrap();
        assert!(created.created_at.is_some());

        assert_eq!(repository.get(&id).await.unwrap().unwrap().name, "Paris");

        let updated = repository
            .update(&id, trip("Paris again", Some("u1")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Paris again");
        assert_eq!(updated.created_at, created.created_at);

        repository.create(trip("Other", Some("u2"))).await.unwrap();
        assert_eq!(repository.list(Some("u1")).await.unwrap().len(), 1);
        assert_eq!(repository.list(None).await.unwrap().len(), 2);

        assert!(repository.delete(&id).await.unwrap());
        assert!(!repository.delete(&id).await.unwrap());
        assert!(matches!(
            repository.require(&id).await,
            Err(PlannerError::TripNotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_create_ignores_client_id() {
        let repository = TripRepository::in_memory();

        let mut first = trip("First", None);
        first.id = Some("fixed".to_string());
        let mut second = trip("Second", None);
        second.id = Some("fixed".to_string());

        let first = repository.create(first).await.unwrap();
        let second = repository.create(second).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(first.id.as_deref(), Some("fixed"));
        assert!(repository.get("fixed").await.unwrap().is_none());
        assert_eq!(repository.require(first.id.as_deref().unwrap()).await.unwrap().name, "First");
        assert_eq!(repository.list(None).await.unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn test_update_missing_trip() {
        let repository = TripRepository::in_memory();
        assert!(repository.update("nope", trip("x", None)).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_ping_reports_in_memory_size() {
        let repository = TripRepository::in_memory();
        repository.create(trip("Paris", None)).await.unwrap();

        let details = repository.ping().await.unwrap();
        assert_eq!(details, "in-memory trip store holding 1 trips");
    }
}
