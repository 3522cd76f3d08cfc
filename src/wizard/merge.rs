//! Forward accumulation of validated step data into the draft.
//!
//! A patch only ever writes the keys owned by its step. Nothing already on
//! the draft is removed; the sibling loop is the one place where a list
//! grows instead of scalars being written.

use super::draft::{
    Career, Education, FamilyDetails, Gender, ImageHandle, Location, MaritalStatus,
    MatchPreferences, Parent, ParentDetails, PendingSibling, ProfileDraft, Relation, SiblingCount,
};
use chrono::NaiveDate;

/// Validated output of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPatch {
    Relation {
        relation: Relation,
        gender: Gender,
    },
    Name(String),
    BasicDetails {
        date_of_birth: NaiveDate,
        gender: Gender,
        height: String,
    },
    MaritalReligion {
        marital_status: MaritalStatus,
        has_children: Option<bool>,
        number_of_children: Option<u32>,
        religion: String,
        islamic_sect: Option<String>,
        cover_head: Option<bool>,
        cover_head_type: Option<String>,
    },
    Ethnicity(String),
    Location(Location),
    Nationality {
        nationality: String,
        dual_national: bool,
        dual_national_country: Option<String>,
        pr_holder: bool,
        pr_country: Option<String>,
    },
    Education(Education),
    Career(Career),
    ProfilePicture(Option<ImageHandle>),
    ParentStatus {
        father_alive: bool,
        mother_alive: bool,
    },
    ParentDetails {
        parent: Parent,
        details: ParentDetails,
    },
    ParentAdditional {
        parent: Parent,
        profession: String,
        education: String,
    },
    ParentPicture {
        parent: Parent,
        image: Option<ImageHandle>,
    },
    SiblingCount(SiblingCount),
    SiblingBasics {
        age: u32,
        gender: Gender,
        marital_status: MaritalStatus,
    },
    SiblingBackground {
        city_of_residence: String,
        profession: String,
        education: String,
    },
    /// Closes one loop iteration; the pending sibling is appended.
    SiblingPicture(Option<ImageHandle>),
    FamilyDetails(FamilyDetails),
    MatchPreferences(MatchPreferences),
    /// Interstitial screens carry no data.
    Continue,
}

impl StepPatch {
    /// Merge into the draft: `{...draft, ...ownedFields}`.
    pub fn apply(self, mut draft: ProfileDraft) -> ProfileDraft {
        match self {
            Self::Relation { relation, gender } => {
                draft.relation = Some(relation);
                draft.gender = Some(gender);
            }
            Self::Name(name) => draft.name = Some(name),
            Self::BasicDetails {
                date_of_birth,
                gender,
                height,
            } => {
                draft.date_of_birth = Some(date_of_birth);
                draft.gender = Some(gender);
                draft.height = Some(height);
            }
            Self::MaritalReligion {
                marital_status,
                has_children,
                number_of_children,
                religion,
                islamic_sect,
                cover_head,
                cover_head_type,
            } => {
                draft.marital_status = Some(marital_status);
                draft.religion = Some(religion);
                set_if_some(&mut draft.has_children, has_children);
                set_if_some(&mut draft.number_of_children, number_of_children);
                set_if_some(&mut draft.islamic_sect, islamic_sect);
                set_if_some(&mut draft.cover_head, cover_head);
                set_if_some(&mut draft.cover_head_type, cover_head_type);
            }
            Self::Ethnicity(ethnicity) => draft.ethnicity = Some(ethnicity),
            Self::Location(location) => draft.location = Some(location),
            Self::Nationality {
                nationality,
                dual_national,
                dual_national_country,
                pr_holder,
                pr_country,
            } => {
                draft.nationality = Some(nationality);
                draft.dual_national = Some(dual_national);
                draft.pr_holder = Some(pr_holder);
                set_if_some(&mut draft.dual_national_country, dual_national_country);
                set_if_some(&mut draft.pr_country, pr_country);
            }
            Self::Education(education) => draft.education = Some(education),
            Self::Career(career) => draft.career = Some(career),
            Self::ProfilePicture(image) => set_if_some(&mut draft.profile_picture, image),
            Self::ParentStatus {
                father_alive,
                mother_alive,
            } => {
                draft.father_alive = Some(father_alive);
                draft.mother_alive = Some(mother_alive);
            }
            Self::ParentDetails { parent, details } => {
                *draft.parent_details_mut(parent) = Some(details);
            }
            Self::ParentAdditional {
                parent,
                profession,
                education,
            } => {
                let record = draft
                    .parent_details_mut(parent)
                    .get_or_insert_with(|| ParentDetails {
                        alive_status: true,
                        ..ParentDetails::deceased()
                    });
                record.profession = Some(profession);
                record.education = Some(education);
            }
            Self::ParentPicture { parent, image } => {
                if let Some(record) = draft.parent_details_mut(parent).as_mut() {
                    set_if_some(&mut record.profile_pic, image);
                }
            }
            Self::SiblingCount(count) => draft.sibling_count = Some(count),
            Self::SiblingBasics {
                age,
                gender,
                marital_status,
            } => {
                draft.pending_sibling = Some(PendingSibling {
                    age: Some(age),
                    gender: Some(gender),
                    marital_status: Some(marital_status),
                    ..Default::default()
                });
            }
            Self::SiblingBackground {
                city_of_residence,
                profession,
                education,
            } => {
                let pending = draft.pending_sibling.get_or_insert_with(PendingSibling::default);
                pending.city_of_residence = Some(city_of_residence);
                pending.profession = Some(profession);
                pending.education = Some(education);
            }
            Self::SiblingPicture(image) => {
                if let Some(sibling) = draft
                    .pending_sibling
                    .take()
                    .and_then(|pending| pending.complete(image))
                {
                    draft.siblings.push(sibling);
                }
            }
            Self::FamilyDetails(details) => draft.family_details = Some(details),
            Self::MatchPreferences(prefs) => draft.match_preferences = Some(prefs),
            Self::Continue => {}
        }
        draft
    }
}

fn set_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
