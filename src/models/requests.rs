use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Institution, RequesterProfile};

/// Request to find matches
///
/// The caller has already fetched the requester and the candidate pool;
/// the pool may still contain institutions that are not approved.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub requester: RequesterProfile,
    #[serde(default)]
    pub pool: Vec<Institution>,
}
