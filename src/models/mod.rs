// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeGroup, ApprovalStatus, DimensionScores, Institution, InstitutionSummary, Location,
    MatchQuality, PreferredMode, RequesterProfile, ScoredMatch, ScoringParams, ScoringWeights,
    Severity, WaitTime,
};
pub use requests::FindMatchesRequest;
pub use responses::{FindMatchesResponse, HealthResponse, ErrorResponse};
