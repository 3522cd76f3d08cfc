//! Step identifiers for the profile wizard.

use serde::{Deserialize, Serialize};

/// One screen of the profile wizard.
///
/// The walk is acyclic apart from the sibling loop
/// (SiblingDetails1 → SiblingDetails2 → SiblingPicUpload → SiblingDetails1…).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    ChooseRelation,
    EnterName,
    BasicDetails,
    MaritalStatusAndReligion,
    Ethnicity,
    Location,
    Nationality,
    Education,
    Career,
    ProfilePic,
    ParentStatusCheck,
    FatherDetails,
    FatherAdditionalInfo,
    FatherProfilePicUpload,
    MotherDetails,
    MotherAdditionalInfo,
    MotherProfilePicUpload,
    Congrats2,
    SiblingCount,
    SiblingDetails1,
    SiblingDetails2,
    SiblingPicUpload,
    Congrats3,
    FamilyDetails,
    MatchPreferences,
    FinalCongrats,
}

impl StepId {
    /// Every step, in table order.
    pub const ALL: [StepId; 26] = [
        Self::ChooseRelation,
        Self::EnterName,
        Self::BasicDetails,
        Self::MaritalStatusAndReligion,
        Self::Ethnicity,
        Self::Location,
        Self::Nationality,
        Self::Education,
        Self::Career,
        Self::ProfilePic,
        Self::ParentStatusCheck,
        Self::FatherDetails,
        Self::FatherAdditionalInfo,
        Self::FatherProfilePicUpload,
        Self::MotherDetails,
        Self::MotherAdditionalInfo,
        Self::MotherProfilePicUpload,
        Self::Congrats2,
        Self::SiblingCount,
        Self::SiblingDetails1,
        Self::SiblingDetails2,
        Self::SiblingPicUpload,
        Self::Congrats3,
        Self::FamilyDetails,
        Self::MatchPreferences,
        Self::FinalCongrats,
    ];

    /// The entry point of the wizard.
    pub fn first() -> Self {
        Self::ChooseRelation
    }

    /// Whether completing the wizard happens on this step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalCongrats)
    }

    /// Whether this step belongs to the repeated sibling sub-loop.
    pub fn is_sibling_loop(&self) -> bool {
        matches!(
            self,
            Self::SiblingDetails1 | Self::SiblingDetails2 | Self::SiblingPicUpload
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChooseRelation => "choose_relation",
            Self::EnterName => "enter_name",
            Self::BasicDetails => "basic_details",
            Self::MaritalStatusAndReligion => "marital_status_and_religion",
            Self::Ethnicity => "ethnicity",
            Self::Location => "location",
            Self::Nationality => "nationality",
            Self::Education => "education",
            Self::Career => "career",
            Self::ProfilePic => "profile_pic",
            Self::ParentStatusCheck => "parent_status_check",
            Self::FatherDetails => "father_details",
            Self::FatherAdditionalInfo => "father_additional_info",
            Self::FatherProfilePicUpload => "father_profile_pic_upload",
            Self::MotherDetails => "mother_details",
            Self::MotherAdditionalInfo => "mother_additional_info",
            Self::MotherProfilePicUpload => "mother_profile_pic_upload",
            Self::Congrats2 => "congrats2",
            Self::SiblingCount => "sibling_count",
            Self::SiblingDetails1 => "sibling_details1",
            Self::SiblingDetails2 => "sibling_details2",
            Self::SiblingPicUpload => "sibling_pic_upload",
            Self::Congrats3 => "congrats3",
            Self::FamilyDetails => "family_details",
            Self::MatchPreferences => "match_preferences",
            Self::FinalCongrats => "final_congrats",
        }
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::first()
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
