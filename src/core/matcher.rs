use crate::core::{filters::filter_eligible, scoring::score_institution};
use crate::models::{
    Institution, InstitutionSummary, MatchQuality, RequesterProfile, ScoredMatch, ScoringParams,
};

/// Number of matches returned per request unless configured otherwise
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (registration, consent, approval, virtual mode)
/// 2. Per-dimension scoring
/// 3. Stable ranking by total score
/// 4. Truncation and quality labeling
///
/// The matcher holds only immutable parameters, so one instance can be shared
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct Matcher {
    params: ScoringParams,
    max_results: usize,
}

impl Matcher {
    pub fn new(params: ScoringParams, max_results: usize) -> Self {
        Self { params, max_results }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringParams::default(), DEFAULT_MAX_RESULTS)
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Find the best institutions for a requester
    ///
    /// # Arguments
    /// * `requester` - The profile of the person seeking counseling
    /// * `pool` - Candidate institutions as fetched by the caller; may contain
    ///   institutions that are not approved
    ///
    /// # Returns
    /// MatchResult with at most `max_results` matches, best first. Institutions
    /// with equal totals keep their pool order.
    pub fn find_matches(&self, requester: &RequesterProfile, pool: &[Institution]) -> MatchResult {
        let total_candidates = pool.len();

        let eligible = filter_eligible(pool, requester);
        let eligible_candidates = eligible.len();

        if eligible.is_empty() {
            tracing::debug!(
                "No eligible institutions among {} candidates",
                total_candidates
            );
            return MatchResult {
                matches: Vec::new(),
                total_candidates,
                eligible_candidates,
            };
        }

        let mut scored: Vec<(&Institution, _)> = eligible
            .into_iter()
            .map(|institution| {
                let scores = score_institution(requester, institution, &self.params);
                tracing::trace!(
                    institution_id = %institution.id,
                    target_age_groups = ?institution.target_age_groups,
                    total = scores.total,
                    "Scored institution"
                );
                (institution, scores)
            })
            .collect();

        // sort_by is stable, so ties keep pool order
        scored.sort_by(|(_, a), (_, b)| b.total.total_cmp(&a.total));
        scored.truncate(self.max_results);

        let matches: Vec<ScoredMatch> = scored
            .into_iter()
            .map(|(institution, scores)| ScoredMatch {
                institution: InstitutionSummary::from(institution),
                scores,
                match_quality: MatchQuality::from_score(scores.total),
            })
            .collect();

        tracing::debug!(
            "Matched {} of {} eligible institutions ({} candidates)",
            matches.len(),
            eligible_candidates,
            total_candidates
        );

        MatchResult {
            matches,
            total_candidates,
            eligible_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
