use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// How severe the requester reports their situation to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    /// Any other value; scored like a missing severity
    #[serde(other)]
    Unknown,
}

/// Standardized age bands: children (3-12), adolescents (13-17),
/// youngAdults (18-35), adults (36-60), seniors (61+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeGroup {
    Children,
    Adolescents,
    YoungAdults,
    Adults,
    Seniors,
    /// Never matches an institution's target bands
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredMode {
    InPerson,
    Online,
    NoPreference,
    #[serde(other)]
    Unknown,
}

/// Time until an institution can take a new client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitTime {
    #[serde(rename = "sameWeek")]
    SameWeek,
    #[serde(rename = "1-2weeks")]
    OneToTwoWeeks,
    #[serde(rename = "3+weeks")]
    ThreePlusWeeks,
    #[serde(other)]
    Unknown,
}

impl WaitTime {
    /// Ordinal used by the wait-time scorer; unrecognized values count as the longest wait
    pub fn ordinal(self) -> u8 {
        match self {
            WaitTime::SameWeek => 1,
            WaitTime::OneToTwoWeeks => 2,
            WaitTime::ThreePlusWeeks | WaitTime::Unknown => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Point on the globe plus the free-text address shown to users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// `[latitude, longitude]` in degrees
    #[serde(default)]
    pub coordinates: [f64; 2],
    #[serde(default)]
    pub address: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: [latitude, longitude],
            address: None,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[1]
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

fn validate_location(location: &Location) -> Result<(), ValidationError> {
    if crate::core::distance::is_valid_coordinate(location.latitude(), location.longitude()) {
        Ok(())
    } else {
        Err(ValidationError::new("coordinates_out_of_range"))
    }
}

/// Profile of the person looking for counseling
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RequesterProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(max = 50))]
    #[serde(rename = "servicesNeeded", alias = "counselingServices", default)]
    pub services_needed: Vec<String>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub languages: Vec<String>,
    #[validate(custom(function = "validate_location"))]
    #[serde(default)]
    pub location: Location,
    #[serde(alias = "severityLevel", default)]
    pub severity: Option<Severity>,
    #[serde(rename = "ageGroup", default)]
    pub age_group: Option<AgeGroup>,
    #[validate(length(max = 50))]
    #[serde(rename = "preferredModes", alias = "preferredMode", default)]
    pub preferred_modes: Vec<PreferredMode>,
}

impl RequesterProfile {
    pub fn prefers_online(&self) -> bool {
        self.preferred_modes.contains(&PreferredMode::Online)
    }
}

/// Counseling institution as fetched from the data store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "institutionName", default)]
    pub name: String,
    #[serde(rename = "institutionType", default)]
    pub institution_type: Option<String>,
    #[serde(rename = "servicesOffered", alias = "counselingServices", alias = "services", default)]
    pub services_offered: Vec<String>,
    #[serde(rename = "languagesSupported", alias = "languages", default)]
    pub languages_supported: Vec<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(rename = "targetAgeGroups", default)]
    pub target_age_groups: Vec<AgeGroup>,
    #[serde(rename = "waitTime", default)]
    pub wait_time: Option<WaitTime>,
    #[serde(
        rename = "offersVirtual",
        alias = "virtualCounseling",
        default,
        deserialize_with = "deserialize_virtual_flag"
    )]
    pub offers_virtual: bool,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "numberOfCounselors", default)]
    pub number_of_counselors: Option<u32>,
    #[serde(rename = "legallyRegistered", alias = "isLegallyRegistered", default)]
    pub legally_registered: bool,
    #[serde(rename = "consentToDisplay", default)]
    pub consent_to_display: bool,
    #[serde(rename = "approvalStatus", default)]
    pub approval_status: ApprovalStatus,
}

/// Accepts either a boolean or the stored `"yes"`/`"no"` form
fn deserialize_virtual_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => {
            let text = text.trim();
            text.eq_ignore_ascii_case("yes") || text.eq_ignore_ascii_case("true")
        }
    })
}

impl Institution {
    /// Ordinal of the advertised wait; a missing value counts as the longest wait
    pub fn wait_ordinal(&self) -> u8 {
        self.wait_time.map_or(3, WaitTime::ordinal)
    }
}

/// Identity and display fields returned alongside a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutionSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "institutionType")]
    pub institution_type: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "numberOfCounselors")]
    pub number_of_counselors: Option<u32>,
    #[serde(rename = "servicesOffered")]
    pub services_offered: Vec<String>,
    #[serde(rename = "languagesSupported")]
    pub languages_supported: Vec<String>,
    #[serde(rename = "targetAgeGroups")]
    pub target_age_groups: Vec<AgeGroup>,
    #[serde(rename = "offersVirtual")]
    pub offers_virtual: bool,
    #[serde(rename = "waitTime")]
    pub wait_time: Option<WaitTime>,
}

impl From<&Institution> for InstitutionSummary {
    fn from(institution: &Institution) -> Self {
        Self {
            id: institution.id.clone(),
            name: institution.name.clone(),
            institution_type: institution.institution_type.clone(),
            address: institution.location.address.clone(),
            phone_number: institution.phone_number.clone(),
            website: institution.website.clone(),
            number_of_counselors: institution.number_of_counselors,
            services_offered: institution.services_offered.clone(),
            languages_supported: institution.languages_supported.clone(),
            target_age_groups: institution.target_age_groups.clone(),
            offers_virtual: institution.offers_virtual,
            wait_time: institution.wait_time,
        }
    }
}

/// Per-dimension breakdown of a match score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub counseling: f64,
    pub language: f64,
    pub location: f64,
    #[serde(rename = "ageGroup")]
    pub age_group: f64,
    #[serde(rename = "waitTime")]
    pub wait_time: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Moderate Match")]
    Moderate,
    #[serde(rename = "Weak Match")]
    Weak,
}

impl MatchQuality {
    /// Label a total score. Each band includes its lower bound.
    pub fn from_score(total: f64) -> Self {
        if total >= 80.0 {
            MatchQuality::Strong
        } else if total >= 60.0 {
            MatchQuality::Good
        } else if total >= 40.0 {
            MatchQuality::Moderate
        } else {
            MatchQuality::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchQuality::Strong => "Strong Match",
            MatchQuality::Good => "Good Match",
            MatchQuality::Moderate => "Moderate Match",
            MatchQuality::Weak => "Weak Match",
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scored match result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub institution: InstitutionSummary,
    pub scores: DimensionScores,
    #[serde(rename = "matchQuality")]
    pub match_quality: MatchQuality,
}

/// Maximum points each dimension contributes to the total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub counseling: f64,
    pub language: f64,
    pub location: f64,
    pub age_group: f64,
    pub wait_time: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.counseling + self.language + self.location + self.age_group + self.wait_time
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            counseling: 40.0,
            language: 20.0,
            location: 20.0,
            age_group: 10.0,
            wait_time: 10.0,
        }
    }
}

/// Everything the per-institution scorer needs besides the two records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    pub weights: ScoringWeights,
    /// Distance at which the in-person location score reaches zero
    pub max_distance_km: f64,
    /// Fraction of the location weight granted when the requester wants online sessions
    pub online_location_factor: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            max_distance_km: 100.0,
            online_location_factor: 0.8,
        }
    }
}
