//! The step graph: one table entry per step, and the transition function.
//!
//! `transition(draft, step, input)` is pure. It validates the input, merges
//! it into a copy of the draft, and picks the next step from the merged
//! draft. The caller's draft is never touched.

use crate::error::{Error, WizardError};

use super::draft::{Parent, ProfileDraft};
use super::input::StepInput;
use super::step::StepId;
use super::validation::{ValidationRules, validate};

/// How the next step is chosen.
#[derive(Clone, Copy)]
pub enum Next {
    Always(StepId),
    Branch(fn(&ProfileDraft) -> StepId),
    /// Terminal step: no successor.
    End,
}

/// One node of the wizard graph.
#[derive(Clone, Copy)]
pub struct StepDefinition {
    pub id: StepId,
    /// Fields that are always required. Conditional requirements live in
    /// the validation rules.
    pub required_fields: &'static [&'static str],
    pub next: Next,
    pub is_terminal: bool,
}

impl StepDefinition {
    /// Successor of this step given the (already merged) draft.
    pub fn next_step(&self, draft: &ProfileDraft) -> Option<StepId> {
        match self.next {
            Next::Always(step) => Some(step),
            Next::Branch(f) => Some(f(draft)),
            Next::End => None,
        }
    }
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("id", &self.id)
            .field("required_fields", &self.required_fields)
            .field("is_terminal", &self.is_terminal)
            .finish()
    }
}

const fn step(id: StepId, required_fields: &'static [&'static str], next: Next) -> StepDefinition {
    StepDefinition {
        id,
        required_fields,
        next,
        is_terminal: false,
    }
}

/// The whole graph, in the same order as [`StepId::ALL`].
pub static STEPS: [StepDefinition; 26] = [
    step(StepId::ChooseRelation, &["relation"], Next::Always(StepId::EnterName)),
    step(StepId::EnterName, &["name"], Next::Always(StepId::BasicDetails)),
    step(
        StepId::BasicDetails,
        &["day", "month", "year", "gender", "height"],
        Next::Always(StepId::MaritalStatusAndReligion),
    ),
    step(
        StepId::MaritalStatusAndReligion,
        &["maritalStatus", "religion"],
        Next::Always(StepId::Ethnicity),
    ),
    step(StepId::Ethnicity, &["ethnicity"], Next::Always(StepId::Location)),
    step(StepId::Location, &["city", "area"], Next::Always(StepId::Nationality)),
    step(StepId::Nationality, &["nationality"], Next::Always(StepId::Education)),
    step(StepId::Education, &["educationLevel"], Next::Always(StepId::Career)),
    step(StepId::Career, &["occupation", "company"], Next::Always(StepId::ProfilePic)),
    step(StepId::ProfilePic, &[], Next::Always(StepId::ParentStatusCheck)),
    step(
        StepId::ParentStatusCheck,
        &["fatherAlive", "motherAlive"],
        Next::Branch(after_parent_status),
    ),
    step(StepId::FatherDetails, &[], Next::Branch(after_father_details)),
    step(
        StepId::FatherAdditionalInfo,
        &["profession", "education"],
        Next::Always(StepId::FatherProfilePicUpload),
    ),
    step(StepId::FatherProfilePicUpload, &[], Next::Branch(after_father_flow)),
    step(StepId::MotherDetails, &[], Next::Branch(after_mother_details)),
    step(
        StepId::MotherAdditionalInfo,
        &["profession", "education"],
        Next::Always(StepId::MotherProfilePicUpload),
    ),
    step(StepId::MotherProfilePicUpload, &[], Next::Branch(after_mother_flow)),
    step(StepId::Congrats2, &[], Next::Always(StepId::SiblingCount)),
    step(StepId::SiblingCount, &["sisters", "brothers"], Next::Branch(after_sibling_count)),
    step(
        StepId::SiblingDetails1,
        &["age", "gender", "maritalStatus"],
        Next::Always(StepId::SiblingDetails2),
    ),
    step(
        StepId::SiblingDetails2,
        &["cityOfResidence", "profession", "education"],
        Next::Always(StepId::SiblingPicUpload),
    ),
    step(StepId::SiblingPicUpload, &[], Next::Branch(after_sibling_iteration)),
    step(StepId::Congrats3, &[], Next::Always(StepId::FamilyDetails)),
    step(StepId::FamilyDetails, &["familyEnvironment"], Next::Always(StepId::MatchPreferences)),
    step(
        StepId::MatchPreferences,
        &["ageRange", "heightRange", "educationPref", "locationPref"],
        Next::Always(StepId::FinalCongrats),
    ),
    StepDefinition {
        id: StepId::FinalCongrats,
        required_fields: &[],
        next: Next::End,
        is_terminal: true,
    },
];

/// Look up a step's definition.
pub fn definition(id: StepId) -> &'static StepDefinition {
    // STEPS mirrors StepId::ALL; checked by `table_matches_step_order`.
    &STEPS[id as usize]
}

fn after_parent_status(draft: &ProfileDraft) -> StepId {
    let father = draft.parent_alive(Parent::Father);
    let mother = draft.parent_alive(Parent::Mother);
    match (father, mother) {
        (false, false) => StepId::Congrats2,
        (_, true) => StepId::MotherDetails,
        (true, false) => StepId::FatherDetails,
    }
}

fn after_father_details(draft: &ProfileDraft) -> StepId {
    after_details(draft, Parent::Father)
}

fn after_mother_details(draft: &ProfileDraft) -> StepId {
    after_details(draft, Parent::Mother)
}

fn after_father_flow(draft: &ProfileDraft) -> StepId {
    after_parent_flow(draft, Parent::Father)
}

fn after_mother_flow(draft: &ProfileDraft) -> StepId {
    after_parent_flow(draft, Parent::Mother)
}

fn after_details(draft: &ProfileDraft, parent: Parent) -> StepId {
    if draft.parent_alive(parent) {
        match parent {
            Parent::Father => StepId::FatherAdditionalInfo,
            Parent::Mother => StepId::MotherAdditionalInfo,
        }
    } else {
        after_parent_flow(draft, parent)
    }
}

/// Once one parent's sub-flow is done, cover the other parent or move on.
fn after_parent_flow(draft: &ProfileDraft, done: Parent) -> StepId {
    let other = done.other();
    if draft.parent_covered(other) {
        return StepId::Congrats2;
    }
    match other {
        Parent::Father => StepId::FatherDetails,
        Parent::Mother => StepId::MotherDetails,
    }
}

fn after_sibling_count(draft: &ProfileDraft) -> StepId {
    if draft.siblings_remaining() == 0 {
        StepId::Congrats3
    } else {
        StepId::SiblingDetails1
    }
}

fn after_sibling_iteration(draft: &ProfileDraft) -> StepId {
    after_sibling_count(draft)
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub draft: ProfileDraft,
    pub next: StepId,
}

/// Apply `input` at `current`: validate, merge, and choose the next step.
pub fn transition(
    draft: &ProfileDraft,
    current: StepId,
    input: &StepInput,
    rules: &ValidationRules,
) -> Result<Transition, Error> {
    let def = definition(current);
    if def.is_terminal {
        return Err(WizardError::TerminalStep(current).into());
    }
    if input.step() != current {
        return Err(WizardError::StepMismatch {
            expected: current,
            got: input.step(),
        }
        .into());
    }

    let patch = validate(input, draft, rules)?;
    let merged = patch.apply(draft.clone());
    let next = def
        .next_step(&merged)
        .ok_or(WizardError::TerminalStep(current))?;
    Ok(Transition {
        draft: merged,
        next,
    })
}
