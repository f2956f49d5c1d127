use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Matcher;
use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::routes::error::ApiError;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_pool_size: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requester": {
///     "servicesNeeded": ["anxiety"],
///     "languages": ["English"],
///     "location": { "coordinates": [-1.29, 36.82] },
///     "severity": "moderate",
///     "ageGroup": "adults",
///     "preferredModes": ["online"]
///   },
///   "pool": [{ "id": "string", "approvalStatus": "approved", ... }]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return Err(ApiError::Validation(errors));
    }

    if req.pool.len() > state.max_pool_size {
        tracing::info!(
            "Rejecting pool of {} institutions (limit {})",
            req.pool.len(),
            state.max_pool_size
        );
        return Err(ApiError::PoolTooLarge {
            size: req.pool.len(),
            limit: state.max_pool_size,
        });
    }

    let requester_id = req.requester.id.as_deref().unwrap_or("anonymous");
    tracing::info!(
        "Finding matches for requester: {}, pool size: {}",
        requester_id,
        req.pool.len()
    );

    let result = state.matcher.find_matches(&req.requester, &req.pool);

    let message = result
        .is_empty()
        .then(|| "No eligible institutions found".to_string());

    let response = FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
        eligible_candidates: result.eligible_candidates,
        message,
    };

    tracing::info!(
        "Returning {} matches for requester {} ({} eligible of {} candidates)",
        response.matches.len(),
        requester_id,
        response.eligible_candidates,
        response.total_candidates
    );

    Ok(HttpResponse::Ok().json(response))
}
