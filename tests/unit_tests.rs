// Unit tests for Counsel Match

use counsel_match::core::{
    distance::haversine_distance,
    filters::is_eligible,
    scoring::{age_group_score, counseling_score, language_score, location_score, wait_time_score},
};
use counsel_match::models::{
    AgeGroup, ApprovalStatus, Institution, Location, MatchQuality, PreferredMode,
    RequesterProfile, ScoringParams, Severity,
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(-1.2921, 36.8219, -1.2921, 36.8219);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_nairobi_to_mombasa() {
    // Nairobi to Mombasa is roughly 440 km as the crow flies
    let distance = haversine_distance(-1.2921, 36.8219, -4.0435, 39.6682);
    assert!(distance > 420.0 && distance < 460.0, "got {}", distance);
}

#[test]
fn test_eligibility_requires_approval() {
    let institution = Institution {
        id: "test".to_string(),
        legally_registered: true,
        consent_to_display: true,
        approval_status: ApprovalStatus::Rejected,
        offers_virtual: true,
        ..Default::default()
    };
    let requester = RequesterProfile::default();

    assert!(!is_eligible(&institution, &requester));
}

#[test]
fn test_in_person_does_not_require_virtual() {
    let institution = Institution {
        id: "test".to_string(),
        legally_registered: true,
        consent_to_display: true,
        approval_status: ApprovalStatus::Approved,
        offers_virtual: false,
        ..Default::default()
    };
    let requester = RequesterProfile {
        preferred_modes: vec![PreferredMode::InPerson],
        ..Default::default()
    };

    assert!(is_eligible(&institution, &requester));
}

#[test]
fn test_counseling_score_never_exceeds_weight() {
    let needed = strings(&["anxiety", "depression", "grief"]);
    for offered in [strings(&[]), strings(&["anxiety"]), needed.clone()] {
        for severity in [None, Some(Severity::Mild), Some(Severity::Moderate), Some(Severity::Severe)] {
            let score = counseling_score(&needed, &offered, severity, 40.0);
            assert!((0.0..=40.0).contains(&score), "score {} out of range", score);
        }
    }
}

#[test]
fn test_language_score_partial() {
    let score = language_score(
        &strings(&["English", "Swahili", "French", "Arabic"]),
        &strings(&["Swahili"]),
        20.0,
    );
    assert_eq!(score, 5.0);
}

#[test]
fn test_location_score_ignores_no_preference() {
    let params = ScoringParams::default();
    let origin = Location::new(0.0, 0.0);
    let far = Location::new(10.0, 10.0);

    // no-preference follows the distance branch, not the online branch
    let requester = RequesterProfile {
        preferred_modes: vec![PreferredMode::NoPreference],
        ..Default::default()
    };
    let score = location_score(&origin, &far, requester.prefers_online(), &params);
    assert_eq!(score, 0.0);
}

#[test]
fn test_age_group_score_without_requester_band() {
    assert_eq!(age_group_score(None, &[AgeGroup::Children], 10.0), 0.0);
    assert_eq!(age_group_score(Some(AgeGroup::Children), &[AgeGroup::Children], 10.0), 10.0);
}

#[test]
fn test_wait_time_severity_penalty() {
    let mild = wait_time_score(3, Some(Severity::Mild), 10.0);
    let severe = wait_time_score(3, Some(Severity::Severe), 10.0);

    assert!(mild > severe, "Severe cases should be penalized more for long waits");
}

#[test]
fn test_quality_labels() {
    assert_eq!(MatchQuality::from_score(94.0).to_string(), "Strong Match");
    assert_eq!(MatchQuality::from_score(65.0).to_string(), "Good Match");
    assert_eq!(MatchQuality::from_score(45.0).to_string(), "Moderate Match");
    assert_eq!(MatchQuality::from_score(12.5).to_string(), "Weak Match");
}
