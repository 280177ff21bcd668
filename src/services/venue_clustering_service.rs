//! Venue Clustering Service
//!
//! Groups venues that are within walking distance of each other so they can
//! be visited together. Greedy single pass: each unprocessed venue seeds a
//! group, and later venues join when they are within `max_radius_m` of every
//! member already in it. Results depend on input order when groups overlap.
//!
//! Pairwise distances make this O(n²) in the number of venues.

use log::debug;

use crate::models::venue::{ClusterSuggestion, GeoPoint, Venue};
use crate::services::geo::{centroid, haversine_meters};

const DEFAULT_MAX_RADIUS_METERS: f64 = 200.0;
const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

#[derive(Debug, Clone)]
pub struct ClusteringConfig {
    pub max_radius_m: f64,
    pub min_cluster_size: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            max_radius_m: DEFAULT_MAX_RADIUS_METERS,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

#[derive(Default)]
pub struct VenueClusteringService {
    config: ClusteringConfig,
}

impl VenueClusteringService {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    pub fn find_clusters(&self, venues: &[Venue]) -> Vec<ClusterSuggestion> {
        let mut processed = vec![false; venues.len()];
        let mut clusters = Vec::new();

        for seed in 0..venues.len() {
            if processed[seed] {
                continue;
            }

            let mut members = vec![seed];
            for candidate in (seed + 1)..venues.len() {
                if processed[candidate] {
                    continue;
                }

                let candidate_coords = venues[candidate].coordinates();
                let within_reach = members.iter().all(|&member| {
                    haversine_meters(venues[member].coordinates(), candidate_coords)
                        <= self.config.max_radius_m
                });

                if within_reach {
                    members.push(candidate);
                }
            }

            if members.len() >= self.config.min_cluster_size {
                for &member in &members {
                    processed[member] = true;
                }
                clusters.push(self.build_cluster(clusters.len() + 1, venues, &members));
            } else {
                processed[seed] = true;
            }
        }

        debug!(
            "Clustered {} venues into {} groups (radius {}m)",
            venues.len(),
            clusters.len(),
            self.config.max_radius_m
        );

        clusters
    }

    fn build_cluster(&self, number: usize, venues: &[Venue], members: &[usize]) -> ClusterSuggestion {
        let points: Vec<(f64, f64)> = members.iter().map(|&i| venues[i].coordinates()).collect();
        let (lat, lng) = centroid(&points).unwrap_or(points[0]);

        let radius_m = points
            .iter()
            .map(|&p| haversine_meters((lat, lng), p))
            .fold(0.0, f64::max);

        let ratings: Vec<f32> = members.iter().filter_map(|&i| venues[i].rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f32>() / ratings.len() as f32)
        };

        ClusterSuggestion {
            id: format!("cluster-{}", number),
            venues: members.iter().map(|&i| venues[i].clone()).collect(),
            center: GeoPoint { lat, lng },
            radius_m,
            average_rating,
            label: format!("{} places near {}", members.len(), venues[members[0]].name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(name: &str, lat: f64, lng: f64) -> Venue {
        Venue {
            id: Some(name.to_string()),
            name: name.to_string(),
            category: None,
            types: Vec::new(),
            lat,
            lng,
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn test_nearby_venues_are_grouped() {
        // ~0.0005 degrees latitude is ~55 m
        let venues = vec![
            venue("a", 48.8600, 2.3400),
            venue("b", 48.8605, 2.3400),
            venue("far", 48.9000, 2.4000),
            venue("c", 48.8600, 2.3405),
        ];

        let clusters = VenueClusteringService::default().find_clusters(&venues);

        assert_eq!(clusters.len(), 1);
        let names: Vec<&str> = clusters[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(clusters[0].id, "cluster-1");
        assert_eq!(clusters[0].label, "3 places near a");
        assert!(clusters[0].radius_m < 200.0);
    }

    #[test]
    fn test_members_are_mutually_within_radius() {
        // b is 150 m from a, c is 150 m from a on the other side: b and c are 300 m apart
        let venues = vec![
            venue("a", 0.0, 0.0),
            venue("b", 0.00135, 0.0),
            venue("c", -0.00135, 0.0),
        ];

        let clusters = VenueClusteringService::default().find_clusters(&venues);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].venues.len(), 2);
        for cluster in &clusters {
            for x in &cluster.venues {
                for y in &cluster.venues {
                    assert!(haversine_meters(x.coordinates(), y.coordinates()) <= 200.0);
                }
            }
        }
    }

    #[test]
    fn test_min_cluster_size_and_ratings() {
        let mut venues = vec![venue("a", 10.0, 10.0), venue("b", 10.0001, 10.0)];
        venues[0].rating = Some(4.0);
        venues[1].rating = Some(5.0);

        let service = VenueClusteringService::new(ClusteringConfig {
            max_radius_m: 200.0,
            min_cluster_size: 3,
        });
        assert!(service.find_clusters(&venues).is_empty());

        let clusters = VenueClusteringService::default().find_clusters(&venues);
        assert_eq!(clusters[0].average_rating, Some(4.5));
    }

    #[test]
    fn test_empty_input() {
        assert!(VenueClusteringService::default().find_clusters(&[]).is_empty());
    }
}
