//! Raw form input submitted for each step.
//!
//! Everything is optional here: the form may be submitted half-filled, and
//! it is the validation table's job to refuse it. Numbers are wide signed
//! integers so that a negative or oversized entry is reported per field
//! instead of failing to decode.

use serde::{Deserialize, Serialize};

use super::draft::{EducationLevel, Gender, ImageHandle, MaritalStatus, Relation, ValueRange};
use super::step::StepId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationInput {
    pub relation: Option<Relation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameInput {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetailsInput {
    pub day: Option<i64>,
    pub month: Option<i64>,
    pub year: Option<i64>,
    /// Falls back to the gender derived from the relation when omitted.
    pub gender: Option<Gender>,
    pub height: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaritalReligionInput {
    pub marital_status: Option<MaritalStatus>,
    pub has_children: Option<bool>,
    pub number_of_children: Option<i64>,
    pub religion: Option<String>,
    pub islamic_sect: Option<String>,
    pub cover_head: Option<bool>,
    pub cover_head_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthnicityInput {
    pub ethnicity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub city: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalityInput {
    pub nationality: Option<String>,
    pub is_dual_national: Option<bool>,
    pub dual_nationality_country: Option<String>,
    #[serde(rename = "isPRHolder")]
    pub is_pr_holder: Option<bool>,
    pub pr_country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
    pub education_level: Option<EducationLevel>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerInput {
    pub occupation: Option<String>,
    pub company: Option<String>,
    pub income: Option<String>,
}

/// Any picture step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureInput {
    pub image: Option<ImageHandle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentStatusInput {
    pub father_alive: Option<bool>,
    pub mother_alive: Option<bool>,
}

/// FatherDetails / MotherDetails. Ignored apart from the acknowledgement
/// when the parent is not alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDetailsInput {
    pub marital_status: Option<MaritalStatus>,
    pub city_of_residence: Option<String>,
    pub area_of_residence: Option<String>,
}

/// FatherAdditionalInfo / MotherAdditionalInfo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentAdditionalInput {
    pub profession: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingCountInput {
    pub sisters: Option<i64>,
    pub brothers: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingBasicsInput {
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingBackgroundInput {
    pub city_of_residence: Option<String>,
    pub profession: Option<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetailsInput {
    pub family_environment: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreferencesInput {
    pub age_range: Option<ValueRange>,
    pub height_range: Option<ValueRange>,
    pub education_pref: Option<String>,
    pub location_pref: Option<String>,
}

/// Form submission for one step, tagged by the step it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    ChooseRelation(RelationInput),
    EnterName(NameInput),
    BasicDetails(BasicDetailsInput),
    MaritalStatusAndReligion(MaritalReligionInput),
    Ethnicity(EthnicityInput),
    Location(LocationInput),
    Nationality(NationalityInput),
    Education(EducationInput),
    Career(CareerInput),
    ProfilePic(PictureInput),
    ParentStatusCheck(ParentStatusInput),
    FatherDetails(ParentDetailsInput),
    FatherAdditionalInfo(ParentAdditionalInput),
    FatherProfilePicUpload(PictureInput),
    MotherDetails(ParentDetailsInput),
    MotherAdditionalInfo(ParentAdditionalInput),
    MotherProfilePicUpload(PictureInput),
    Congrats2,
    SiblingCount(SiblingCountInput),
    SiblingDetails1(SiblingBasicsInput),
    SiblingDetails2(SiblingBackgroundInput),
    SiblingPicUpload(PictureInput),
    Congrats3,
    FamilyDetails(FamilyDetailsInput),
    MatchPreferences(MatchPreferencesInput),
}

impl StepInput {
    /// The step this input was filled in on.
    pub fn step(&self) -> StepId {
        match self {
            Self::ChooseRelation(_) => StepId::ChooseRelation,
            Self::EnterName(_) => StepId::EnterName,
            Self::BasicDetails(_) => StepId::BasicDetails,
            Self::MaritalStatusAndReligion(_) => StepId::MaritalStatusAndReligion,
            Self::Ethnicity(_) => StepId::Ethnicity,
            Self::Location(_) => StepId::Location,
            Self::Nationality(_) => StepId::Nationality,
            Self::Education(_) => StepId::Education,
            Self::Career(_) => StepId::Career,
            Self::ProfilePic(_) => StepId::ProfilePic,
            Self::ParentStatusCheck(_) => StepId::ParentStatusCheck,
            Self::FatherDetails(_) => StepId::FatherDetails,
            Self::FatherAdditionalInfo(_) => StepId::FatherAdditionalInfo,
            Self::FatherProfilePicUpload(_) => StepId::FatherProfilePicUpload,
            Self::MotherDetails(_) => StepId::MotherDetails,
            Self::MotherAdditionalInfo(_) => StepId::MotherAdditionalInfo,
            Self::MotherProfilePicUpload(_) => StepId::MotherProfilePicUpload,
            Self::Congrats2 => StepId::Congrats2,
            Self::SiblingCount(_) => StepId::SiblingCount,
            Self::SiblingDetails1(_) => StepId::SiblingDetails1,
            Self::SiblingDetails2(_) => StepId::SiblingDetails2,
            Self::SiblingPicUpload(_) => StepId::SiblingPicUpload,
            Self::Congrats3 => StepId::Congrats3,
            Self::FamilyDetails(_) => StepId::FamilyDetails,
            Self::MatchPreferences(_) => StepId::MatchPreferences,
        }
    }
}
