//! The profile draft and its nested sub-records.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Who the profile is being created for, from the creator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Myself,
    Son,
    Daughter,
    Brother,
    Sister,
    Relative,
    Friend,
}

impl Relation {
    /// Gender implied by the relation: Daughter and Sister are female,
    /// everything else is male.
    pub fn derived_gender(&self) -> Gender {
        match self {
            Self::Daughter | Self::Sister => Gender::Female,
            _ => Gender::Male,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "Never Married")]
    NeverMarried,
    Married,
    Divorced,
    Widowed,
    Separated,
}

impl MaritalStatus {
    /// Divorced and widowed profiles are asked about children.
    pub fn asks_about_children(&self) -> bool {
        matches!(self, Self::Divorced | Self::Widowed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    Intermediate,
    Diploma,
    Bachelors,
    Masters,
    Doctorate,
    Other,
}

/// Opaque reference to a locally picked image (a URI from the media picker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub level: EducationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub occupation: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<String>,
}

/// Father or mother sub-record. Filled across three steps
/// (details, additional info, picture).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDetails {
    pub alive_status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_of_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_of_residence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<ImageHandle>,
}

impl ParentDetails {
    pub fn deceased() -> Self {
        Self {
            alive_status: false,
            marital_status: None,
            city_of_residence: None,
            area_of_residence: None,
            profession: None,
            education: None,
            profile_pic: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parent {
    Father,
    Mother,
}

impl Parent {
    pub fn other(&self) -> Parent {
        match self {
            Self::Father => Self::Mother,
            Self::Mother => Self::Father,
        }
    }
}

impl std::fmt::Display for Parent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Father => write!(f, "father"),
            Self::Mother => write!(f, "mother"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingCount {
    pub sisters: u32,
    pub brothers: u32,
}

impl SiblingCount {
    pub fn total(&self) -> u32 {
        self.sisters.saturating_add(self.brothers)
    }
}

/// One completed iteration of the sibling loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sibling {
    pub age: u32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub city_of_residence: String,
    pub profession: String,
    pub education: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<ImageHandle>,
}

/// A sibling between SiblingDetails1 and SiblingPicUpload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSibling {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub city_of_residence: Option<String>,
    pub profession: Option<String>,
    pub education: Option<String>,
}

impl PendingSibling {
    /// Turn the partial record into a sibling entry, if both detail steps
    /// have been completed.
    pub fn complete(self, profile_pic: Option<ImageHandle>) -> Option<Sibling> {
        Some(Sibling {
            age: self.age?,
            gender: self.gender?,
            marital_status: self.marital_status?,
            city_of_residence: self.city_of_residence?,
            profession: self.profession?,
            education: self.education?,
            profile_pic,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetails {
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Inclusive numeric range (ages in years, heights in inches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreferences {
    pub age_range: ValueRange,
    pub height_range: ValueRange,
    pub education_pref: String,
    pub location_pref: String,
}

/// Derived position inside the sibling loop. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingCounter {
    pub sisters_total: u32,
    pub brothers_total: u32,
    /// 1-based index of the sibling currently being described.
    pub current_index: u32,
}

impl SiblingCounter {
    pub fn total(&self) -> u32 {
        self.sisters_total + self.brothers_total
    }
}

/// The profile being assembled by the wizard.
///
/// Every attribute is optional until the step that owns it has been
/// completed. Serialized with camelCase keys; this is the payload handed to
/// the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub islamic_sect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_head: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_head_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_national: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dual_national_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_holder: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career: Option<Career>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<ImageHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_alive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_details: Option<ParentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_details: Option<ParentDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sibling_count: Option<SiblingCount>,
    #[serde(default)]
    pub siblings: Vec<Sibling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_details: Option<FamilyDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_preferences: Option<MatchPreferences>,
    #[serde(skip)]
    pub pending_sibling: Option<PendingSibling>,
}

/// Religion comparison is case-insensitive; the client sends display text.
pub fn is_islam(religion: &str) -> bool {
    religion.trim().eq_ignore_ascii_case("islam")
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_female(&self) -> bool {
        self.gender == Some(Gender::Female)
    }

    pub fn is_male(&self) -> bool {
        self.gender == Some(Gender::Male)
    }

    /// Alive answer from ParentStatusCheck.
    pub fn parent_alive(&self, parent: Parent) -> bool {
        match parent {
            Parent::Father => self.father_alive,
            Parent::Mother => self.mother_alive,
        }
        .unwrap_or(false)
    }

    pub fn parent_details(&self, parent: Parent) -> Option<&ParentDetails> {
        match parent {
            Parent::Father => self.father_details.as_ref(),
            Parent::Mother => self.mother_details.as_ref(),
        }
    }

    pub fn parent_details_mut(&mut self, parent: Parent) -> &mut Option<ParentDetails> {
        match parent {
            Parent::Father => &mut self.father_details,
            Parent::Mother => &mut self.mother_details,
        }
    }

    /// A parent is covered once their details step has been completed.
    pub fn parent_covered(&self, parent: Parent) -> bool {
        self.parent_details(parent).is_some()
    }

    /// Position in the sibling loop, once the sibling count is known.
    pub fn sibling_counter(&self) -> Option<SiblingCounter> {
        let count = self.sibling_count?;
        let done = self.siblings.len() as u32;
        Some(SiblingCounter {
            sisters_total: count.sisters,
            brothers_total: count.brothers,
            current_index: (done + 1).min(count.total().max(1)),
        })
    }

    /// Siblings still to be described.
    pub fn siblings_remaining(&self) -> u32 {
        self.sibling_count
            .map(|c| c.total().saturating_sub(self.siblings.len() as u32))
            .unwrap_or(0)
    }

    /// Top-level keys present in the serialized payload.
    pub fn field_names(&self) -> BTreeSet<String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().map(|(k, _)| k).collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Short human label for log lines.
    pub fn label(&self) -> String {
        let name = self.name.as_deref().unwrap_or("(unnamed)");
        match self.gender {
            Some(g) => format!("{name} ({g})"),
            None => name.to_string(),
        }
    }
}
