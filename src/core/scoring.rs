use crate::core::distance::distance_between;
use crate::models::{
    AgeGroup, DimensionScores, Institution, Location, RequesterProfile, ScoringParams, Severity,
};

/// Score an institution for a requester across all five dimensions
///
/// Scoring formula (default weights):
/// total = (
///     counseling  [0, 40] +   # Share of needed services offered, severity-adjusted
///     language    [0, 20] +   # Share of requester languages supported
///     location    [0, 20] +   # Fixed for online, distance decay otherwise
///     age_group   {0, 10} +   # Requester's band is targeted
///     wait_time   [0, 10]     # Shorter waits score higher, scaled by severity
/// )
pub fn score_institution(
    requester: &RequesterProfile,
    institution: &Institution,
    params: &ScoringParams,
) -> DimensionScores {
    let weights = &params.weights;

    let counseling = counseling_score(
        &requester.services_needed,
        &institution.services_offered,
        requester.severity,
        weights.counseling,
    );

    let language = language_score(
        &requester.languages,
        &institution.languages_supported,
        weights.language,
    );

    let location = location_score(
        &requester.location,
        &institution.location,
        requester.prefers_online(),
        params,
    );

    let age_group = age_group_score(
        requester.age_group,
        &institution.target_age_groups,
        weights.age_group,
    );

    let wait_time = wait_time_score(institution.wait_ordinal(), requester.severity, weights.wait_time);

    DimensionScores {
        counseling,
        language,
        location,
        age_group,
        wait_time,
        total: counseling + language + location + age_group + wait_time,
    }
}

/// Share of needed services the institution offers, scaled to `max_score`
///
/// Severe cases are boosted by 20% and mild ones reduced by 10% before the
/// result is clamped back into range.
#[inline]
pub fn counseling_score(
    needed: &[String],
    offered: &[String],
    severity: Option<Severity>,
    max_score: f64,
) -> f64 {
    let base = overlap_ratio(needed, offered) * max_score;

    let adjusted = match severity {
        Some(Severity::Severe) => base * 1.2,
        Some(Severity::Mild) => base * 0.9,
        Some(Severity::Moderate) | Some(Severity::Unknown) | None => base,
    };

    sanitise(adjusted, max_score)
}

/// Share of the requester's languages the institution supports
#[inline]
pub fn language_score(spoken: &[String], supported: &[String], max_score: f64) -> f64 {
    sanitise(overlap_ratio(spoken, supported) * max_score, max_score)
}

/// Location score (0 to the location weight)
///
/// Online requesters get a fixed share of the weight regardless of distance.
/// Otherwise the score decays linearly and reaches zero at `max_distance_km`.
#[inline]
pub fn location_score(
    requester: &Location,
    institution: &Location,
    prefers_online: bool,
    params: &ScoringParams,
) -> f64 {
    let max_score = params.weights.location;

    if prefers_online {
        return sanitise(max_score * params.online_location_factor, max_score);
    }

    if params.max_distance_km <= 0.0 {
        return 0.0;
    }

    let distance_km = distance_between(requester, institution);
    sanitise(max_score * (1.0 - distance_km / params.max_distance_km), max_score)
}

/// Full points when the requester's age band is served, nothing otherwise
#[inline]
pub fn age_group_score(age_group: Option<AgeGroup>, targets: &[AgeGroup], max_score: f64) -> f64 {
    match age_group {
        Some(AgeGroup::Unknown) => 0.0,
        Some(group) if targets.contains(&group) => max_score,
        _ => 0.0,
    }
}

/// Wait-time score from the wait ordinal (1 = same week, 3 = three weeks or more)
///
/// With the default weight of 10 the base is 10, 7 or 4. Severe requesters
/// are penalized hardest for any wait.
#[inline]
pub fn wait_time_score(wait_ordinal: u8, severity: Option<Severity>, max_score: f64) -> f64 {
    let ordinal = f64::from(wait_ordinal.clamp(1, 3));
    let base = max_score * (1.0 - (ordinal - 1.0) * 0.3);

    let multiplier = match severity {
        Some(Severity::Mild) | Some(Severity::Unknown) | None => 1.0,
        Some(Severity::Moderate) => 0.8,
        Some(Severity::Severe) => 0.4,
    };

    sanitise(base * multiplier, max_score)
}

/// Fraction of `wanted` present in `available`; empty `wanted` yields 0
#[inline]
fn overlap_ratio(wanted: &[String], available: &[String]) -> f64 {
    if wanted.is_empty() {
        return 0.0;
    }

    let matches = wanted.iter().filter(|item| available.contains(item)).count();
    matches as f64 / wanted.len() as f64
}

/// Clamp into `[0, max]`, mapping non-finite values to 0
#[inline]
fn sanitise(score: f64, max: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, max.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferredMode;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_counseling_full_overlap() {
        let score = counseling_score(
            &tags(&["anxiety"]),
            &tags(&["anxiety", "depression"]),
            Some(Severity::Moderate),
            40.0,
        );
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_counseling_partial_overlap_by_severity() {
        let needed = tags(&["anxiety", "grief"]);
        let offered = tags(&["anxiety"]);

        assert_eq!(counseling_score(&needed, &offered, Some(Severity::Moderate), 40.0), 20.0);
        assert!((counseling_score(&needed, &offered, Some(Severity::Severe), 40.0) - 24.0).abs() < 1e-9);
        assert!((counseling_score(&needed, &offered, Some(Severity::Mild), 40.0) - 18.0).abs() < 1e-9);
        assert_eq!(counseling_score(&needed, &offered, None, 40.0), 20.0);
    }

    #[test]
    fn test_counseling_severe_is_capped() {
        let score = counseling_score(&tags(&["trauma"]), &tags(&["trauma"]), Some(Severity::Severe), 40.0);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_counseling_empty_needs() {
        let score = counseling_score(&[], &tags(&["anxiety"]), Some(Severity::Severe), 40.0);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_language_score() {
        assert_eq!(language_score(&tags(&["English", "Swahili"]), &tags(&["English"]), 20.0), 10.0);
        assert_eq!(language_score(&[], &tags(&["English"]), 20.0), 0.0);
        assert_eq!(language_score(&tags(&["French"]), &[], 20.0), 0.0);
    }

    #[test]
    fn test_location_online_is_fixed() {
        let params = ScoringParams::default();
        let far_a = Location::new(0.0, 0.0);
        let far_b = Location::new(45.0, 90.0);

        assert!((location_score(&far_a, &far_b, true, &params) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_location_distance_decay() {
        let params = ScoringParams::default();
        let origin = Location::new(0.0, 0.0);

        assert_eq!(location_score(&origin, &origin, false, &params), 20.0);

        // ~50 km east on the equator
        let half = Location::new(0.0, 0.45);
        let score = location_score(&origin, &half, false, &params);
        assert!((score - 10.0).abs() < 0.1, "got {}", score);

        // Beyond the horizon never goes negative
        let beyond = Location::new(0.0, 0.9);
        assert_eq!(location_score(&origin, &beyond, false, &params), 0.0);
    }

    #[test]
    fn test_location_nan_coordinates() {
        let params = ScoringParams::default();
        let broken = Location::new(f64::NAN, 0.0);
        assert_eq!(location_score(&Location::default(), &broken, false, &params), 0.0);
    }

    #[test]
    fn test_age_group_binary() {
        let targets = vec![AgeGroup::Adults, AgeGroup::Seniors];
        assert_eq!(age_group_score(Some(AgeGroup::Adults), &targets, 10.0), 10.0);
        assert_eq!(age_group_score(Some(AgeGroup::Children), &targets, 10.0), 0.0);
        assert_eq!(age_group_score(None, &targets, 10.0), 0.0);
    }

    #[test]
    fn test_unknown_values_are_neutral() {
        let needed = tags(&["anxiety", "grief"]);
        let offered = tags(&["anxiety"]);
        assert_eq!(counseling_score(&needed, &offered, Some(Severity::Unknown), 40.0), 20.0);
        assert_eq!(wait_time_score(1, Some(Severity::Unknown), 10.0), 10.0);

        // An unrecognized band must not match an institution that also lists one
        let targets = vec![AgeGroup::Unknown, AgeGroup::Adults];
        assert_eq!(age_group_score(Some(AgeGroup::Unknown), &targets, 10.0), 0.0);
    }

    #[test]
    fn test_wait_time_table() {
        let cases = [
            (1, Some(Severity::Mild), 10.0),
            (2, Some(Severity::Mild), 7.0),
            (3, Some(Severity::Mild), 4.0),
            (1, Some(Severity::Moderate), 8.0),
            (2, Some(Severity::Moderate), 5.6),
            (3, Some(Severity::Moderate), 3.2),
            (1, Some(Severity::Severe), 4.0),
            (2, Some(Severity::Severe), 2.8),
            (3, Some(Severity::Severe), 1.6),
            (2, None, 7.0),
        ];

        for (ordinal, severity, expected) in cases {
            let score = wait_time_score(ordinal, severity, 10.0);
            assert!(
                (score - expected).abs() < 1e-9,
                "ordinal {} {:?}: expected {}, got {}",
                ordinal,
                severity,
                expected,
                score
            );
        }
    }

    #[test]
    fn test_score_institution_totals() {
        let requester = RequesterProfile {
            services_needed: tags(&["anxiety"]),
            languages: tags(&["English"]),
            severity: Some(Severity::Moderate),
            age_group: Some(AgeGroup::Adults),
            preferred_modes: vec![PreferredMode::Online],
            ..Default::default()
        };
        let institution = Institution {
            id: "1".to_string(),
            services_offered: tags(&["anxiety", "depression"]),
            languages_supported: tags(&["English"]),
            target_age_groups: vec![AgeGroup::Adults],
            wait_time: Some(crate::models::WaitTime::SameWeek),
            offers_virtual: true,
            ..Default::default()
        };

        let scores = score_institution(&requester, &institution, &ScoringParams::default());

        assert_eq!(scores.counseling, 40.0);
        assert_eq!(scores.language, 20.0);
        assert!((scores.location - 16.0).abs() < 1e-9);
        assert_eq!(scores.age_group, 10.0);
        assert!((scores.wait_time - 8.0).abs() < 1e-9);
        assert!((scores.total - 94.0).abs() < 1e-9);
    }
}
