//! Per-step validation: "required non-empty" plus the conditional rules.
//!
//! Validation reads the draft (for gender, alive answers, the pending
//! sibling) but never writes it. A passing input becomes a [`StepPatch`].

use chrono::{NaiveDate, Utc};

use crate::error::ValidationError;

use super::draft::{
    Career, Education, FamilyDetails, Gender, Location, MatchPreferences, Parent, ParentDetails,
    ProfileDraft, SiblingCount, ValueRange, is_islam,
};
use super::input::{
    BasicDetailsInput, MaritalReligionInput, MatchPreferencesInput, NationalityInput,
    ParentAdditionalInput, ParentDetailsInput, SiblingCountInput, StepInput,
};
use super::merge::StepPatch;
use super::step::StepId;

/// Tunables for validation.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Upper bound on sisters + brothers.
    pub max_siblings: u32,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self { max_siblings: 20 }
    }
}

/// Check one step's input against the draft so far.
pub fn validate(
    input: &StepInput,
    draft: &ProfileDraft,
    rules: &ValidationRules,
) -> Result<StepPatch, ValidationError> {
    let step = input.step();
    match input {
        StepInput::ChooseRelation(i) => {
            let relation = required(step, "relation", "who this profile is for", i.relation)?;
            Ok(StepPatch::Relation {
                relation,
                gender: relation.derived_gender(),
            })
        }
        StepInput::EnterName(i) => Ok(StepPatch::Name(text(step, "name", "a name", &i.name)?)),
        StepInput::BasicDetails(i) => basic_details(step, i, draft),
        StepInput::MaritalStatusAndReligion(i) => marital_religion(step, i, draft),
        StepInput::Ethnicity(i) => Ok(StepPatch::Ethnicity(text(
            step,
            "ethnicity",
            "an ethnicity",
            &i.ethnicity,
        )?)),
        StepInput::Location(i) => Ok(StepPatch::Location(Location {
            city: text(step, "city", "a city", &i.city)?,
            area: text(step, "area", "an area", &i.area)?,
        })),
        StepInput::Nationality(i) => nationality(step, i),
        StepInput::Education(i) => Ok(StepPatch::Education(Education {
            level: required(step, "educationLevel", "an education level", i.education_level)?,
            institution: optional_text(&i.institution),
            field_of_study: optional_text(&i.field_of_study),
        })),
        StepInput::Career(i) => Ok(StepPatch::Career(Career {
            occupation: text(step, "occupation", "an occupation", &i.occupation)?,
            company: text(step, "company", "a company", &i.company)?,
            income: optional_text(&i.income),
        })),
        StepInput::ProfilePic(i) => {
            let image = i.image.clone().filter(|img| !img.uri().trim().is_empty());
            if image.is_none() && draft.is_male() {
                return Err(ValidationError::new(
                    step,
                    "image",
                    "Please upload a profile picture.",
                ));
            }
            Ok(StepPatch::ProfilePicture(image))
        }
        StepInput::ParentStatusCheck(i) => Ok(StepPatch::ParentStatus {
            father_alive: required(step, "fatherAlive", "whether the father is alive", i.father_alive)?,
            mother_alive: required(step, "motherAlive", "whether the mother is alive", i.mother_alive)?,
        }),
        StepInput::FatherDetails(i) => parent_details(step, Parent::Father, i, draft),
        StepInput::MotherDetails(i) => parent_details(step, Parent::Mother, i, draft),
        StepInput::FatherAdditionalInfo(i) => parent_additional(step, Parent::Father, i),
        StepInput::MotherAdditionalInfo(i) => parent_additional(step, Parent::Mother, i),
        StepInput::FatherProfilePicUpload(i) => Ok(StepPatch::ParentPicture {
            parent: Parent::Father,
            image: i.image.clone(),
        }),
        StepInput::MotherProfilePicUpload(i) => Ok(StepPatch::ParentPicture {
            parent: Parent::Mother,
            image: i.image.clone(),
        }),
        StepInput::Congrats2 | StepInput::Congrats3 => Ok(StepPatch::Continue),
        StepInput::SiblingCount(i) => sibling_count(step, i, rules),
        StepInput::SiblingDetails1(i) => Ok(StepPatch::SiblingBasics {
            age: count(step, "age", "sibling's age", i.age)?,
            gender: required(step, "gender", "the sibling's gender", i.gender)?,
            marital_status: required(
                step,
                "maritalStatus",
                "the sibling's marital status",
                i.marital_status,
            )?,
        }),
        StepInput::SiblingDetails2(i) => Ok(StepPatch::SiblingBackground {
            city_of_residence: text(step, "cityOfResidence", "a city of residence", &i.city_of_residence)?,
            profession: text(step, "profession", "a profession", &i.profession)?,
            education: text(step, "education", "an education", &i.education)?,
        }),
        StepInput::SiblingPicUpload(i) => {
            let complete = draft
                .pending_sibling
                .clone()
                .and_then(|p| p.complete(None))
                .is_some();
            if !complete {
                return Err(ValidationError::new(
                    step,
                    "sibling",
                    "Please complete this sibling's details first.",
                ));
            }
            Ok(StepPatch::SiblingPicture(i.image.clone()))
        }
        StepInput::FamilyDetails(i) => Ok(StepPatch::FamilyDetails(FamilyDetails {
            environment: text(
                step,
                "familyEnvironment",
                "your family environment",
                &i.family_environment,
            )?,
            additional_info: optional_text(&i.additional_info),
        })),
        StepInput::MatchPreferences(i) => match_preferences(step, i),
    }
}

fn basic_details(
    step: StepId,
    i: &BasicDetailsInput,
    draft: &ProfileDraft,
) -> Result<StepPatch, ValidationError> {
    let day = count(step, "day", "day of birth", i.day)?;
    let month = count(step, "month", "month of birth", i.month)?;
    let year = required(step, "year", "a year of birth", i.year)?;
    let year = i32::try_from(year)
        .map_err(|_| ValidationError::new(step, "year", "Please enter a valid year of birth."))?;
    let date_of_birth = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|d| *d <= Utc::now().date_naive())
        .ok_or_else(|| {
            ValidationError::new(step, "dateOfBirth", "Please enter a valid date of birth.")
        })?;
    let gender: Gender = required(step, "gender", "a gender", i.gender.or(draft.gender))?;
    let height = text(step, "height", "a height", &i.height)?;
    Ok(StepPatch::BasicDetails {
        date_of_birth,
        gender,
        height,
    })
}

fn marital_religion(
    step: StepId,
    i: &MaritalReligionInput,
    draft: &ProfileDraft,
) -> Result<StepPatch, ValidationError> {
    let marital_status = required(step, "maritalStatus", "a marital status", i.marital_status)?;

    let (has_children, number_of_children) = if marital_status.asks_about_children() {
        let has = required(step, "hasChildren", "whether there are children", i.has_children)?;
        let number = if has {
            let n = count(step, "numberOfChildren", "number of children", i.number_of_children)?;
            if n == 0 {
                return Err(ValidationError::new(
                    step,
                    "numberOfChildren",
                    "Please enter a valid number of children.",
                ));
            }
            Some(n)
        } else {
            None
        };
        (Some(has), number)
    } else {
        (None, None)
    };

    let religion = text(step, "religion", "a religion", &i.religion)?;
    let muslim = is_islam(&religion);

    let islamic_sect = if muslim {
        Some(text(step, "islamicSect", "a sect", &i.islamic_sect)?)
    } else {
        None
    };

    let (cover_head, cover_head_type) = if muslim && draft.is_female() {
        let covers = required(step, "coverHead", "whether she covers her head", i.cover_head)?;
        let kind = if covers {
            Some(text(step, "coverHeadType", "how she covers her head", &i.cover_head_type)?)
        } else {
            None
        };
        (Some(covers), kind)
    } else {
        (None, None)
    };

    Ok(StepPatch::MaritalReligion {
        marital_status,
        has_children,
        number_of_children,
        religion,
        islamic_sect,
        cover_head,
        cover_head_type,
    })
}

fn nationality(step: StepId, i: &NationalityInput) -> Result<StepPatch, ValidationError> {
    let nationality = text(step, "nationality", "a nationality", &i.nationality)?;
    let dual_national = i.is_dual_national.unwrap_or(false);
    let dual_national_country = if dual_national {
        Some(text(
            step,
            "dualNationalityCountry",
            "the second nationality",
            &i.dual_nationality_country,
        )?)
    } else {
        None
    };
    let pr_holder = i.is_pr_holder.unwrap_or(false);
    let pr_country = if pr_holder {
        Some(text(step, "prCountry", "the country of residency", &i.pr_country)?)
    } else {
        None
    };
    Ok(StepPatch::Nationality {
        nationality,
        dual_national,
        dual_national_country,
        pr_holder,
        pr_country,
    })
}

fn parent_details(
    step: StepId,
    parent: Parent,
    i: &ParentDetailsInput,
    draft: &ProfileDraft,
) -> Result<StepPatch, ValidationError> {
    if !draft.parent_alive(parent) {
        return Ok(StepPatch::ParentDetails {
            parent,
            details: ParentDetails::deceased(),
        });
    }
    Ok(StepPatch::ParentDetails {
        parent,
        details: ParentDetails {
            alive_status: true,
            marital_status: Some(required(
                step,
                "maritalStatus",
                &format!("the {parent}'s marital status"),
                i.marital_status,
            )?),
            city_of_residence: Some(text(
                step,
                "cityOfResidence",
                &format!("the {parent}'s city of residence"),
                &i.city_of_residence,
            )?),
            area_of_residence: optional_text(&i.area_of_residence),
            ..ParentDetails::deceased()
        },
    })
}

fn parent_additional(
    step: StepId,
    parent: Parent,
    i: &ParentAdditionalInput,
) -> Result<StepPatch, ValidationError> {
    Ok(StepPatch::ParentAdditional {
        parent,
        profession: text(step, "profession", &format!("the {parent}'s profession"), &i.profession)?,
        education: text(step, "education", &format!("the {parent}'s education"), &i.education)?,
    })
}

fn sibling_count(
    step: StepId,
    i: &SiblingCountInput,
    rules: &ValidationRules,
) -> Result<StepPatch, ValidationError> {
    let sisters = count(step, "sisters", "number of sisters", i.sisters)?;
    let brothers = count(step, "brothers", "number of brothers", i.brothers)?;
    let within_bound = sisters
        .checked_add(brothers)
        .is_some_and(|total| total <= rules.max_siblings);
    if !within_bound {
        return Err(ValidationError::new(
            step,
            "siblings",
            format!("Please enter at most {} siblings in total.", rules.max_siblings),
        ));
    }
    Ok(StepPatch::SiblingCount(SiblingCount { sisters, brothers }))
}

fn match_preferences(
    step: StepId,
    i: &MatchPreferencesInput,
) -> Result<StepPatch, ValidationError> {
    Ok(StepPatch::MatchPreferences(MatchPreferences {
        age_range: range(step, "ageRange", "an age range", i.age_range)?,
        height_range: range(step, "heightRange", "a height range", i.height_range)?,
        education_pref: text(step, "educationPref", "an education preference", &i.education_pref)?,
        location_pref: text(step, "locationPref", "a location preference", &i.location_pref)?,
    }))
}

fn required<T>(step: StepId, field: &str, label: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::required(step, field, label))
}

fn text(
    step: StepId,
    field: &str,
    label: &str,
    value: &Option<String>,
) -> Result<String, ValidationError> {
    optional_text(value).ok_or_else(|| ValidationError::required(step, field, label))
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn count(step: StepId, field: &str, noun: &str, value: Option<i64>) -> Result<u32, ValidationError> {
    let n = required(step, field, &format!("the {noun}"), value)?;
    u32::try_from(n)
        .map_err(|_| ValidationError::new(step, field, format!("Please enter a valid {noun}.")))
}

fn range(
    step: StepId,
    field: &str,
    label: &str,
    value: Option<ValueRange>,
) -> Result<ValueRange, ValidationError> {
    let r = required(step, field, label, value)?;
    if r.min > r.max {
        return Err(ValidationError::new(
            step,
            field,
            format!("Please enter {label} with the minimum below the maximum."),
        ));
    }
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use crate::wizard::draft::{EducationLevel, MaritalStatus, Relation};
    use crate::wizard::input::*;

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    fn err_field(input: StepInput, draft: &ProfileDraft) -> String {
        validate(&input, draft, &rules()).unwrap_err().field
    }

    fn female_draft() -> ProfileDraft {
        ProfileDraft {
            relation: Some(Relation::Daughter),
            gender: Some(Gender::Female),
            ..Default::default()
        }
    }

    #[test]
    fn blank_name_is_refused() {
        let input = StepInput::EnterName(NameInput {
            name: Some("   ".into()),
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "name");
    }

    #[test]
    fn name_is_trimmed() {
        let input = StepInput::EnterName(NameInput {
            name: Some("  Ali ".into()),
        });
        let patch = validate(&input, &ProfileDraft::new(), &rules()).unwrap();
        assert_eq!(patch, StepPatch::Name("Ali".into()));
    }

    #[test]
    fn invalid_calendar_date_is_refused() {
        let input = StepInput::BasicDetails(BasicDetailsInput {
            day: Some(31),
            month: Some(2),
            year: Some(1999),
            gender: Some(Gender::Male),
            height: Some("70".into()),
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "dateOfBirth");
    }

    #[test]
    fn negative_or_oversized_date_parts_are_refused_per_field() {
        let base = BasicDetailsInput {
            day: Some(1),
            month: Some(1),
            year: Some(2000),
            gender: Some(Gender::Male),
            height: Some("70".into()),
        };
        let negative_day = BasicDetailsInput {
            day: Some(-1),
            ..base.clone()
        };
        let err = validate(&StepInput::BasicDetails(negative_day), &ProfileDraft::new(), &rules())
            .unwrap_err();
        assert_eq!(err.field, "day");
        assert_eq!(err.message, "Please enter a valid day of birth.");

        let negative_month = BasicDetailsInput {
            month: Some(-3),
            ..base.clone()
        };
        assert_eq!(err_field(StepInput::BasicDetails(negative_month), &ProfileDraft::new()), "month");

        let huge_year = BasicDetailsInput {
            year: Some(i64::MAX),
            ..base
        };
        assert_eq!(err_field(StepInput::BasicDetails(huge_year), &ProfileDraft::new()), "year");
    }

    #[test]
    fn negative_sibling_age_is_refused() {
        let input = StepInput::SiblingDetails1(SiblingBasicsInput {
            age: Some(-4),
            gender: Some(Gender::Male),
            marital_status: Some(MaritalStatus::NeverMarried),
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "age");
    }

    #[test]
    fn future_date_is_refused() {
        let next_year = Utc::now().date_naive().year() + 1;
        let input = StepInput::BasicDetails(BasicDetailsInput {
            day: Some(1),
            month: Some(1),
            year: Some(next_year.into()),
            gender: Some(Gender::Male),
            height: Some("70".into()),
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "dateOfBirth");
    }

    #[test]
    fn basic_details_falls_back_to_derived_gender() {
        let input = StepInput::BasicDetails(BasicDetailsInput {
            day: Some(1),
            month: Some(1),
            year: Some(2000),
            gender: None,
            height: Some("64".into()),
        });
        let patch = validate(&input, &female_draft(), &rules()).unwrap();
        let StepPatch::BasicDetails { gender, .. } = patch else {
            panic!("expected basic details");
        };
        assert_eq!(gender, Gender::Female);

        let no_gender = StepInput::BasicDetails(BasicDetailsInput {
            day: Some(1),
            month: Some(1),
            year: Some(2000),
            gender: None,
            height: Some("64".into()),
        });
        assert_eq!(err_field(no_gender, &ProfileDraft::new()), "gender");
    }

    #[test]
    fn divorced_requires_children_answer() {
        let mut input = MaritalReligionInput {
            marital_status: Some(MaritalStatus::Divorced),
            religion: Some("Christianity".into()),
            ..Default::default()
        };
        assert_eq!(
            err_field(StepInput::MaritalStatusAndReligion(input.clone()), &ProfileDraft::new()),
            "hasChildren"
        );

        input.has_children = Some(true);
        assert_eq!(
            err_field(StepInput::MaritalStatusAndReligion(input.clone()), &ProfileDraft::new()),
            "numberOfChildren"
        );

        input.number_of_children = Some(2);
        assert!(validate(&StepInput::MaritalStatusAndReligion(input), &ProfileDraft::new(), &rules()).is_ok());
    }

    #[test]
    fn never_married_christian_needs_no_sect_or_cover() {
        let input = StepInput::MaritalStatusAndReligion(MaritalReligionInput {
            marital_status: Some(MaritalStatus::NeverMarried),
            religion: Some("Christianity".into()),
            ..Default::default()
        });
        let patch = validate(&input, &ProfileDraft::new(), &rules()).unwrap();
        let StepPatch::MaritalReligion {
            islamic_sect,
            cover_head,
            has_children,
            ..
        } = patch
        else {
            panic!("expected marital/religion patch");
        };
        assert!(islamic_sect.is_none());
        assert!(cover_head.is_none());
        assert!(has_children.is_none());
    }

    #[test]
    fn muslim_female_requires_cover_head() {
        let mut input = MaritalReligionInput {
            marital_status: Some(MaritalStatus::NeverMarried),
            religion: Some("Islam".into()),
            ..Default::default()
        };
        assert_eq!(
            err_field(StepInput::MaritalStatusAndReligion(input.clone()), &female_draft()),
            "islamicSect"
        );
        input.islamic_sect = Some("Sunni".into());
        assert_eq!(
            err_field(StepInput::MaritalStatusAndReligion(input.clone()), &female_draft()),
            "coverHead"
        );
        input.cover_head = Some(true);
        assert_eq!(
            err_field(StepInput::MaritalStatusAndReligion(input.clone()), &female_draft()),
            "coverHeadType"
        );
        input.cover_head_type = Some("Hijab".into());
        assert!(validate(&StepInput::MaritalStatusAndReligion(input), &female_draft(), &rules()).is_ok());
    }

    #[test]
    fn muslim_male_skips_cover_head() {
        let male = ProfileDraft {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        let input = StepInput::MaritalStatusAndReligion(MaritalReligionInput {
            marital_status: Some(MaritalStatus::NeverMarried),
            religion: Some("islam".into()),
            islamic_sect: Some("Shia".into()),
            ..Default::default()
        });
        assert!(validate(&input, &male, &rules()).is_ok());
    }

    #[test]
    fn nationality_conditionals() {
        let dual_missing = StepInput::Nationality(NationalityInput {
            nationality: Some("Pakistani".into()),
            is_dual_national: Some(true),
            ..Default::default()
        });
        assert_eq!(err_field(dual_missing, &ProfileDraft::new()), "dualNationalityCountry");

        let pr_missing = StepInput::Nationality(NationalityInput {
            nationality: Some("Pakistani".into()),
            is_pr_holder: Some(true),
            ..Default::default()
        });
        assert_eq!(err_field(pr_missing, &ProfileDraft::new()), "prCountry");

        let plain = StepInput::Nationality(NationalityInput {
            nationality: Some("Pakistani".into()),
            ..Default::default()
        });
        assert!(validate(&plain, &ProfileDraft::new(), &rules()).is_ok());
    }

    #[test]
    fn career_income_is_optional_company_is_not() {
        let no_company = StepInput::Career(CareerInput {
            occupation: Some("Engineer".into()),
            ..Default::default()
        });
        assert_eq!(err_field(no_company, &ProfileDraft::new()), "company");

        let no_income = StepInput::Career(CareerInput {
            occupation: Some("Engineer".into()),
            company: Some("Acme".into()),
            income: None,
        });
        assert!(validate(&no_income, &ProfileDraft::new(), &rules()).is_ok());
    }

    #[test]
    fn education_level_required() {
        let missing = StepInput::Education(EducationInput::default());
        assert_eq!(err_field(missing, &ProfileDraft::new()), "educationLevel");
        let ok = StepInput::Education(EducationInput {
            education_level: Some(EducationLevel::Masters),
            ..Default::default()
        });
        assert!(validate(&ok, &ProfileDraft::new(), &rules()).is_ok());
    }

    #[test]
    fn profile_picture_required_only_for_men() {
        let empty = StepInput::ProfilePic(PictureInput::default());
        let male = ProfileDraft {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        assert_eq!(err_field(empty.clone(), &male), "image");
        assert_eq!(
            validate(&empty, &female_draft(), &rules()).unwrap(),
            StepPatch::ProfilePicture(None)
        );
    }

    #[test]
    fn deceased_parent_needs_acknowledgement_only() {
        let draft = ProfileDraft {
            father_alive: Some(false),
            mother_alive: Some(true),
            ..Default::default()
        };
        let patch = validate(
            &StepInput::FatherDetails(ParentDetailsInput::default()),
            &draft,
            &rules(),
        )
        .unwrap();
        assert_eq!(
            patch,
            StepPatch::ParentDetails {
                parent: Parent::Father,
                details: ParentDetails::deceased(),
            }
        );

        let missing = StepInput::MotherDetails(ParentDetailsInput {
            marital_status: Some(MaritalStatus::Married),
            ..Default::default()
        });
        assert_eq!(err_field(missing, &draft), "cityOfResidence");
    }

    #[test]
    fn sibling_counts_must_be_non_negative_and_bounded() {
        let negative = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(-1),
            brothers: Some(0),
        });
        let err = validate(&negative, &ProfileDraft::new(), &rules()).unwrap_err();
        assert_eq!(err.field, "sisters");
        assert_eq!(err.message, "Please enter a valid number of sisters.");

        let missing = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(1),
            brothers: None,
        });
        assert_eq!(err_field(missing, &ProfileDraft::new()), "brothers");

        let too_many = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(15),
            brothers: Some(6),
        });
        assert_eq!(err_field(too_many, &ProfileDraft::new()), "siblings");

        let overflowing = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(u32::MAX as i64),
            brothers: Some(1),
        });
        let err = validate(&overflowing, &ProfileDraft::new(), &rules()).unwrap_err();
        assert_eq!(err.field, "siblings");

        let beyond_u32 = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(i64::MAX),
            brothers: Some(0),
        });
        assert_eq!(err_field(beyond_u32, &ProfileDraft::new()), "sisters");

        let zero = StepInput::SiblingCount(SiblingCountInput {
            sisters: Some(0),
            brothers: Some(0),
        });
        assert!(validate(&zero, &ProfileDraft::new(), &rules()).is_ok());
    }

    #[test]
    fn sibling_pic_requires_completed_details() {
        let input = StepInput::SiblingPicUpload(PictureInput::default());
        assert_eq!(err_field(input, &ProfileDraft::new()), "sibling");
    }

    #[test]
    fn inverted_range_is_malformed() {
        let input = StepInput::MatchPreferences(MatchPreferencesInput {
            age_range: Some(ValueRange { min: 30, max: 22 }),
            height_range: Some(ValueRange { min: 60, max: 70 }),
            education_pref: Some("Any".into()),
            location_pref: Some("Lahore".into()),
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "ageRange");
    }

    #[test]
    fn match_preferences_all_required() {
        let input = StepInput::MatchPreferences(MatchPreferencesInput {
            age_range: Some(ValueRange { min: 22, max: 30 }),
            height_range: Some(ValueRange { min: 60, max: 70 }),
            education_pref: Some("Any".into()),
            location_pref: None,
        });
        assert_eq!(err_field(input, &ProfileDraft::new()), "locationPref");
    }
}
