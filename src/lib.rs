//! Counsel Match - matching service for a counseling referral platform
//!
//! This library provides the engine that ranks approved counseling
//! institutions for a person seeking help. It filters the candidate pool for
//! eligibility, scores each institution on five dimensions (services,
//! language, location, age group, wait time) and labels the top matches.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, distance::haversine_distance};
pub use models::{
    RequesterProfile, Institution, ScoredMatch, MatchQuality, ScoringParams, ScoringWeights,
    FindMatchesRequest, FindMatchesResponse,
};
