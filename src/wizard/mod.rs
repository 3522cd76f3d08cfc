//! Onboarding wizard: a fixed graph of form steps that assembles a
//! matchmaking profile.
//!
//! Each step's input is validated, merged into an append-only
//! `ProfileDraft`, and the step table picks the next step from the merged
//! draft. Reaching the final step hands the draft to a `ProfileStore`.

pub mod draft;
pub mod graph;
pub mod input;
pub mod manager;
pub mod merge;
pub mod reference;
pub mod routes;
pub mod state;
pub mod step;
pub mod validation;

pub use draft::{Gender, ImageHandle, MaritalStatus, ProfileDraft, Relation};
pub use graph::{StepDefinition, Transition, transition};
pub use input::StepInput;
pub use manager::{SubmitOutcome, WizardDeps, WizardManager};
pub use routes::{WizardRouteState, wizard_routes};
pub use state::{WizardState, WizardStatus};
pub use step::StepId;
pub use validation::ValidationRules;
