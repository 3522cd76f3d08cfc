//! Wizard session state: the current step, the draft, and the way back.

use serde::Serialize;

use crate::error::{Error, WizardError};

use super::draft::ProfileDraft;
use super::graph::{self, transition};
use super::input::StepInput;
use super::step::StepId;
use super::validation::ValidationRules;

/// A step as it was when the user arrived on it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Visit {
    step: StepId,
    draft: ProfileDraft,
}

/// In-memory state of one run through the wizard.
///
/// Nothing here is persisted: abandoning the wizard discards the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    step: StepId,
    draft: ProfileDraft,
    history: Vec<Visit>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty() && !self.is_complete()
    }

    /// Submit the current step's form. On success the wizard moves to the
    /// next step and the new step id is returned; on failure nothing changes.
    pub fn submit(&mut self, input: &StepInput, rules: &ValidationRules) -> Result<StepId, Error> {
        let t = transition(&self.draft, self.step, input, rules)?;
        let previous = std::mem::replace(&mut self.draft, t.draft);
        self.history.push(Visit {
            step: self.step,
            draft: previous,
        });
        self.step = t.next;
        Ok(self.step)
    }

    /// Return to the previous step, with the draft as it was when that
    /// step was first shown.
    pub fn back(&mut self) -> Result<StepId, Error> {
        if self.is_complete() {
            return Err(WizardError::TerminalStep(self.step).into());
        }
        let visit = self.history.pop().ok_or(WizardError::NoPreviousStep)?;
        self.step = visit.step;
        self.draft = visit.draft;
        Ok(self.step)
    }

    /// Abandon the run and start over at the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for clients.
    pub fn status(&self) -> WizardStatus {
        WizardStatus {
            step: self.step,
            required_fields: graph::definition(self.step).required_fields.to_vec(),
            can_go_back: self.can_go_back(),
            is_complete: self.is_complete(),
            sibling_counter: self
                .step
                .is_sibling_loop()
                .then(|| self.draft.sibling_counter())
                .flatten(),
            draft: self.draft.clone(),
        }
    }
}

/// What the client needs to render the current step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStatus {
    pub step: StepId,
    pub required_fields: Vec<&'static str>,
    pub can_go_back: bool,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sibling_counter: Option<super::draft::SiblingCounter>,
    pub draft: ProfileDraft,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::draft::Relation;
    use crate::wizard::input::{NameInput, RelationInput};

    fn rules() -> ValidationRules {
        ValidationRules::default()
    }

    fn relation(r: Relation) -> StepInput {
        StepInput::ChooseRelation(RelationInput { relation: Some(r) })
    }

    fn name(n: &str) -> StepInput {
        StepInput::EnterName(NameInput {
            name: Some(n.into()),
        })
    }

    #[test]
    fn starts_at_choose_relation_with_empty_draft() {
        let state = WizardState::new();
        assert_eq!(state.step(), StepId::ChooseRelation);
        assert_eq!(state.draft(), &ProfileDraft::new());
        assert!(!state.can_go_back());
    }

    #[test]
    fn submit_advances_and_records_history() {
        let mut state = WizardState::new();
        assert_eq!(state.submit(&relation(Relation::Son), &rules()).unwrap(), StepId::EnterName);
        assert!(state.can_go_back());
        assert_eq!(state.submit(&name("Ali"), &rules()).unwrap(), StepId::BasicDetails);
        assert_eq!(state.draft().name.as_deref(), Some("Ali"));
    }

    #[test]
    fn failed_submit_changes_nothing() {
        let mut state = WizardState::new();
        state.submit(&relation(Relation::Son), &rules()).unwrap();
        let before = state.clone();
        assert!(state.submit(&name(""), &rules()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn back_restores_draft_as_step_was_entered() {
        let mut state = WizardState::new();
        state.submit(&relation(Relation::Daughter), &rules()).unwrap();
        state.submit(&name("Sara"), &rules()).unwrap();

        assert_eq!(state.back().unwrap(), StepId::EnterName);
        assert!(state.draft().name.is_none());
        assert_eq!(state.draft().relation, Some(Relation::Daughter));

        assert_eq!(state.back().unwrap(), StepId::ChooseRelation);
        assert_eq!(state.draft(), &ProfileDraft::new());
        assert!(matches!(
            state.back().unwrap_err(),
            Error::Wizard(WizardError::NoPreviousStep)
        ));
    }

    #[test]
    fn reset_discards_everything() {
        let mut state = WizardState::new();
        state.submit(&relation(Relation::Son), &rules()).unwrap();
        state.reset();
        assert_eq!(state, WizardState::new());
    }

    #[test]
    fn status_reports_required_fields() {
        let mut state = WizardState::new();
        state.submit(&relation(Relation::Son), &rules()).unwrap();
        let status = state.status();
        assert_eq!(status.step, StepId::EnterName);
        assert_eq!(status.required_fields, vec!["name"]);
        assert!(status.can_go_back);
        assert!(status.sibling_counter.is_none());
    }
}
