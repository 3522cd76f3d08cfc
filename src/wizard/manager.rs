//! WizardManager: owns the single active wizard and talks to the
//! collaborators (session lookup, image picker, profile store).

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::auth::AuthService;
use crate::error::{Error, ServiceError};
use crate::media::MediaPicker;
use crate::service::with_timeout;
use crate::store::{ProfileStore, SaveMode, SavedProfile};

use super::draft::ImageHandle;
use super::input::StepInput;
use super::state::{WizardState, WizardStatus};
use super::step::StepId;
use super::validation::ValidationRules;

/// External collaborators the manager needs.
#[derive(Clone)]
pub struct WizardDeps {
    pub store: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthService>,
    /// Absent on headless deployments; picture steps then take a handle
    /// supplied directly in the form.
    pub media: Option<Arc<dyn MediaPicker>>,
}

/// What a successful submit led to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The wizard moved on; here is the new step.
    Advanced { status: WizardStatus },
    /// The last step was passed and the profile was saved. The wizard has
    /// been reset for the next run.
    Saved { profile: SavedProfile },
}

/// Coordinates the wizard: transitions, the terminal save, and resets.
pub struct WizardManager {
    deps: WizardDeps,
    rules: ValidationRules,
    timeout: Duration,
    state: Arc<RwLock<WizardState>>,
}

impl WizardManager {
    pub fn new(deps: WizardDeps, rules: ValidationRules, timeout: Duration) -> Self {
        Self {
            deps,
            rules,
            timeout,
            state: Arc::new(RwLock::new(WizardState::new())),
        }
    }

    pub async fn current_step(&self) -> StepId {
        self.state.read().await.step()
    }

    pub async fn status(&self) -> WizardStatus {
        self.state.read().await.status()
    }

    /// Submit the current step's form.
    ///
    /// Reaching the final step saves the profile. Whether the save succeeds
    /// or not, the wizard starts over afterwards; a failed save is returned
    /// as the error.
    pub async fn submit(&self, input: StepInput) -> Result<SubmitOutcome, Error> {
        let mut state = self.state.write().await;
        let from = state.step();
        let next = state.submit(&input, &self.rules).inspect_err(|e| {
            tracing::debug!(step = %from, error = %e, "Step input refused");
        })?;
        tracing::info!(from = %from, to = %next, "Wizard advanced");

        if !state.is_complete() {
            return Ok(SubmitOutcome::Advanced {
                status: state.status(),
            });
        }

        let mode = self.save_mode().await;
        let saved = with_timeout(
            "Saving your profile",
            self.timeout,
            self.deps.store.save_profile(state.draft(), mode),
        )
        .await;
        let label = state.draft().label();
        state.reset();

        match saved {
            Ok(profile) => {
                tracing::info!(id = %profile.id, mode = %mode, profile = %label, "Profile saved");
                Ok(SubmitOutcome::Saved { profile })
            }
            Err(e) => {
                tracing::warn!(mode = %mode, error = %e, "Profile save failed; wizard reset");
                Err(e.into())
            }
        }
    }

    /// Go back one step, undoing what was entered since.
    pub async fn back(&self) -> Result<WizardStatus, Error> {
        let mut state = self.state.write().await;
        let step = state.back()?;
        tracing::info!(step = %step, "Wizard went back");
        Ok(state.status())
    }

    /// Abandon the current run.
    pub async fn reset(&self) -> WizardStatus {
        let mut state = self.state.write().await;
        state.reset();
        tracing::info!("Wizard reset");
        state.status()
    }

    /// Ask the media picker for an image. `Ok(None)` when the user canceled.
    pub async fn pick_image(&self) -> Result<Option<ImageHandle>, Error> {
        let Some(media) = &self.deps.media else {
            return Err(ServiceError::Media {
                message: "Picking images is not available here.".into(),
            }
            .into());
        };
        let picked = with_timeout("Picking an image", self.timeout, media.pick_image()).await?;
        Ok(picked.into_handle())
    }

    /// Admin when an active session exists. A failed lookup counts as no
    /// session.
    async fn save_mode(&self) -> SaveMode {
        let session = with_timeout(
            "Checking your session",
            self.timeout,
            self.deps.auth.get_session(),
        )
        .await;
        match session {
            Ok(session) => SaveMode::for_session(
                session.is_some_and(|s| s.is_active_at(chrono::Utc::now())),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed; saving as demo");
                SaveMode::Demo
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AnonymousAuth, AuthUser, Session};
    use crate::media::PickedImage;
    use crate::wizard::draft::{
        EducationLevel, Gender, MaritalStatus, ProfileDraft, Relation, ValueRange,
    };
    use crate::wizard::input::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use secrecy::SecretString;
    use tokio::sync::Mutex;

    /// Keeps every saved draft; fails on demand.
    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<(ProfileDraft, SaveMode)>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl ProfileStore for MemoryStore {
        async fn save_profile(
            &self,
            draft: &ProfileDraft,
            mode: SaveMode,
        ) -> Result<SavedProfile, ServiceError> {
            if let Some(message) = &self.fail_with {
                return Err(ServiceError::ProfileStore {
                    message: message.clone(),
                });
            }
            let mut saved = self.saved.lock().await;
            saved.push((draft.clone(), mode));
            Ok(SavedProfile {
                id: format!("p{}", saved.len()),
                mode,
                saved_at: Utc::now(),
            })
        }
    }

    /// Always signed in.
    struct SignedIn;

    #[async_trait]
    impl AuthService for SignedIn {
        async fn send_otp(&self, _phone: &str) -> Result<(), ServiceError> {
            Ok(())
        }

        async fn verify_otp(&self, phone: &str, _code: &str) -> Result<AuthUser, ServiceError> {
            Ok(AuthUser {
                id: "admin".into(),
                phone: phone.into(),
            })
        }

        async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
            Ok(Some(Session {
                user: AuthUser {
                    id: "admin".into(),
                    phone: "+923001234567".into(),
                },
                access_token: SecretString::from("token".to_string()),
                expires_at: None,
            }))
        }
    }

    struct FixedPicker(PickedImage);

    #[async_trait]
    impl MediaPicker for FixedPicker {
        async fn pick_image(&self) -> Result<PickedImage, ServiceError> {
            Ok(self.0.clone())
        }
    }

    fn manager(store: Arc<MemoryStore>, auth: Arc<dyn AuthService>) -> WizardManager {
        let deps = WizardDeps {
            store,
            auth,
            media: None,
        };
        WizardManager::new(deps, ValidationRules::default(), Duration::from_secs(1))
    }

    fn text(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    /// Son, both parents deceased, no siblings.
    fn short_run() -> Vec<StepInput> {
        vec![
            StepInput::ChooseRelation(RelationInput {
                relation: Some(Relation::Son),
            }),
            StepInput::EnterName(NameInput { name: text("Ali") }),
            StepInput::BasicDetails(BasicDetailsInput {
                day: Some(1),
                month: Some(1),
                year: Some(2000),
                gender: Some(Gender::Male),
                height: text("70"),
            }),
            StepInput::MaritalStatusAndReligion(MaritalReligionInput {
                marital_status: Some(MaritalStatus::NeverMarried),
                religion: text("Christianity"),
                ..Default::default()
            }),
            StepInput::Ethnicity(EthnicityInput {
                ethnicity: text("Punjabi"),
            }),
            StepInput::Location(LocationInput {
                city: text("Lahore"),
                area: text("DHA"),
            }),
            StepInput::Nationality(NationalityInput {
                nationality: text("Pakistani"),
                ..Default::default()
            }),
            StepInput::Education(EducationInput {
                education_level: Some(EducationLevel::Bachelors),
                ..Default::default()
            }),
            StepInput::Career(CareerInput {
                occupation: text("Engineer"),
                company: text("Acme"),
                income: None,
            }),
            StepInput::ProfilePic(PictureInput {
                image: Some(ImageHandle::new("file:///ali.jpg")),
            }),
            StepInput::ParentStatusCheck(ParentStatusInput {
                father_alive: Some(false),
                mother_alive: Some(false),
            }),
            StepInput::Congrats2,
            StepInput::SiblingCount(SiblingCountInput {
                sisters: Some(0),
                brothers: Some(0),
            }),
            StepInput::Congrats3,
            StepInput::FamilyDetails(FamilyDetailsInput {
                family_environment: text("Moderate"),
                additional_info: None,
            }),
            StepInput::MatchPreferences(MatchPreferencesInput {
                age_range: Some(ValueRange { min: 22, max: 28 }),
                height_range: Some(ValueRange { min: 60, max: 68 }),
                education_pref: text("Bachelors"),
                location_pref: text("Lahore"),
            }),
        ]
    }

    async fn drive(manager: &WizardManager, inputs: Vec<StepInput>) -> Result<SubmitOutcome, Error> {
        let mut last = None;
        for input in inputs {
            last = Some(manager.submit(input).await?);
        }
        Ok(last.expect("at least one input"))
    }

    #[tokio::test]
    async fn christian_never_married_goes_straight_to_ethnicity() {
        let m = manager(Arc::new(MemoryStore::default()), Arc::new(AnonymousAuth));
        let inputs: Vec<_> = short_run().into_iter().take(4).collect();
        let SubmitOutcome::Advanced { status } = drive(&m, inputs).await.unwrap() else {
            panic!("expected to advance");
        };
        assert_eq!(status.step, StepId::Ethnicity);
        assert_eq!(status.draft.religion.as_deref(), Some("Christianity"));
        assert!(status.draft.islamic_sect.is_none());
        assert!(status.draft.cover_head.is_none());
        assert_eq!(status.draft.gender, Some(Gender::Male));
    }

    #[tokio::test]
    async fn anonymous_run_saves_in_demo_mode_and_resets() {
        let store = Arc::new(MemoryStore::default());
        let m = manager(Arc::clone(&store), Arc::new(AnonymousAuth));

        let SubmitOutcome::Saved { profile } = drive(&m, short_run()).await.unwrap() else {
            panic!("expected a save");
        };
        assert_eq!(profile.mode, SaveMode::Demo);

        let saved = store.saved.lock().await;
        assert_eq!(saved.len(), 1);
        let (draft, mode) = &saved[0];
        assert_eq!(*mode, SaveMode::Demo);
        assert_eq!(draft.name.as_deref(), Some("Ali"));
        assert!(draft.siblings.is_empty());
        assert!(draft.father_details.is_none());
        drop(saved);

        assert_eq!(m.current_step().await, StepId::ChooseRelation);
        assert_eq!(m.status().await.draft, ProfileDraft::new());
    }

    #[tokio::test]
    async fn signed_in_run_saves_in_admin_mode() {
        let store = Arc::new(MemoryStore::default());
        let m = manager(Arc::clone(&store), Arc::new(SignedIn));
        let SubmitOutcome::Saved { profile } = drive(&m, short_run()).await.unwrap() else {
            panic!("expected a save");
        };
        assert_eq!(profile.mode, SaveMode::Admin);
        assert_eq!(store.saved.lock().await[0].1, SaveMode::Admin);
    }

    #[tokio::test]
    async fn failed_save_surfaces_provider_message_and_resets() {
        let store = Arc::new(MemoryStore {
            fail_with: Some("duplicate key value".into()),
            ..Default::default()
        });
        let m = manager(store, Arc::new(AnonymousAuth));
        let err = drive(&m, short_run()).await.unwrap_err();
        assert_eq!(err.user_message(), "duplicate key value");
        assert_eq!(m.current_step().await, StepId::ChooseRelation);
    }

    #[tokio::test]
    async fn saving_twice_creates_two_records() {
        let store = Arc::new(MemoryStore::default());
        let m = manager(Arc::clone(&store), Arc::new(AnonymousAuth));
        drive(&m, short_run()).await.unwrap();
        drive(&m, short_run()).await.unwrap();
        assert_eq!(store.saved.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn refused_input_keeps_position() {
        let m = manager(Arc::new(MemoryStore::default()), Arc::new(AnonymousAuth));
        m.submit(short_run().remove(0)).await.unwrap();
        let err = m
            .submit(StepInput::EnterName(NameInput { name: text("  ") }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.field == "name"));
        assert_eq!(m.current_step().await, StepId::EnterName);
    }

    #[tokio::test]
    async fn back_and_reset() {
        let m = manager(Arc::new(MemoryStore::default()), Arc::new(AnonymousAuth));
        let inputs: Vec<_> = short_run().into_iter().take(2).collect();
        drive(&m, inputs).await.unwrap();

        let status = m.back().await.unwrap();
        assert_eq!(status.step, StepId::EnterName);
        assert!(status.draft.name.is_none());

        let status = m.reset().await;
        assert_eq!(status.step, StepId::ChooseRelation);
        assert!(m.back().await.is_err());
    }

    #[tokio::test]
    async fn pick_image_without_picker_is_a_service_error() {
        let m = manager(Arc::new(MemoryStore::default()), Arc::new(AnonymousAuth));
        assert!(matches!(
            m.pick_image().await.unwrap_err(),
            Error::Service(ServiceError::Media { .. })
        ));
    }

    #[tokio::test]
    async fn pick_image_returns_handle_or_none() {
        let deps = |picked: PickedImage| WizardDeps {
            store: Arc::new(MemoryStore::default()),
            auth: Arc::new(AnonymousAuth),
            media: Some(Arc::new(FixedPicker(picked))),
        };
        let rules = ValidationRules::default;

        let m = WizardManager::new(
            deps(PickedImage {
                canceled: false,
                uri: Some("file:///a.jpg".into()),
            }),
            rules(),
            Duration::from_secs(1),
        );
        assert_eq!(m.pick_image().await.unwrap(), Some(ImageHandle::new("file:///a.jpg")));

        let m = WizardManager::new(
            deps(PickedImage {
                canceled: true,
                uri: None,
            }),
            rules(),
            Duration::from_secs(1),
        );
        assert_eq!(m.pick_image().await.unwrap(), None);
    }
}
