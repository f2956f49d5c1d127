// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::{haversine_distance, distance_between, is_valid_coordinate};
pub use filters::{is_eligible, filter_eligible};
pub use matcher::{Matcher, MatchResult, DEFAULT_MAX_RESULTS};
pub use scoring::{
    score_institution, counseling_score, language_score, location_score, age_group_score,
    wait_time_score,
};
