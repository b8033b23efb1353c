//! Rating module: three-layer architecture (domain, repository, service).
//!
//! Ratings are keyed by (tour, customer); the pair is unique.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::TourRatingService;
