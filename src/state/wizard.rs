//! Wizard state controller
//!
//! Owns the form and the current step, gates navigation on per-step
//! validation and drives the submission lifecycle. Persistence and delivery
//! are reached only through the [`ProgressStore`] and [`Submitter`] seams.

use super::quote::{Budget, Deadline, HasDomain, QuoteForm, ServiceType, TextField, ValidationError};
use super::step::Step;
use crate::persistence::{PersistenceError, ProgressStore, WizardProgress};
use crate::submission::{Delivery, SubmissionError, Submitter};
use thiserror::Error;

/// Where the wizard is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Editing,
    /// A submission was handed to the collaborator and has not resolved yet
    Submitting,
    /// Terminal state until [`Wizard::reset`]
    Submitted(Delivery),
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Moved(Step),
    /// The current step is invalid; nothing changed
    Blocked(Vec<ValidationError>),
    /// Already on the first or last step
    AtBoundary,
    /// Navigation is frozen while submitting or after submission
    Locked,
}

/// Why a submission was refused before reaching the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("submission is only possible from the final step, current step is {}", .0.number())]
    NotOnFinalStep(Step),
    #[error("final step is incomplete")]
    Invalid(Vec<ValidationError>),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the request was already submitted")]
    AlreadySubmitted,
}

#[allow(dead_code)] // Returned by Wizard::submit only
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
    #[error(transparent)]
    Failed(#[from] SubmissionError),
}

/// Result of restoring saved progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored(Step),
    NothingSaved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    form: QuoteForm,
    step: Step,
    phase: Phase,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &QuoteForm {
        &self.form
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::Submitted(_))
    }

    /// Whether setters and navigation are accepted
    pub fn is_editable(&self) -> bool {
        self.phase == Phase::Editing
    }

    pub fn is_step_valid(&self, step: Step) -> bool {
        self.form.validate_step(step).is_empty()
    }

    pub fn validation_errors(&self, step: Step) -> Vec<ValidationError> {
        self.form.validate_step(step)
    }

    /// Move to the next step if the current one is valid
    pub fn advance(&mut self) -> Navigation {
        if !self.is_editable() {
            return Navigation::Locked;
        }
        let Some(next) = self.step.next() else {
            return Navigation::AtBoundary;
        };
        let errors = self.form.validate_step(self.step);
        if !errors.is_empty() {
            tracing::debug!(step = self.step.number(), errors = errors.len(), "advance blocked");
            return Navigation::Blocked(errors);
        }
        tracing::info!(from = self.step.number(), to = next.number(), "step advanced");
        self.step = next;
        Navigation::Moved(next)
    }

    /// Move to the previous step; never validated
    pub fn retreat(&mut self) -> Navigation {
        if !self.is_editable() {
            return Navigation::Locked;
        }
        let Some(prev) = self.step.prev() else {
            return Navigation::AtBoundary;
        };
        tracing::info!(from = self.step.number(), to = prev.number(), "step retreated");
        self.step = prev;
        Navigation::Moved(prev)
    }

    /// Apply `edit` to a text field; returns false when edits are frozen
    pub fn edit_text(&mut self, field: TextField, edit: impl FnOnce(&mut String)) -> bool {
        self.mutate(|form| edit(form.text_mut(field)))
    }

    pub fn toggle_service(&mut self, service: ServiceType) -> bool {
        self.mutate(|form| {
            form.services.toggle(service);
        })
    }

    pub fn set_has_domain(&mut self, value: HasDomain) -> bool {
        self.mutate(|form| form.has_domain = value)
    }

    pub fn set_budget(&mut self, value: Budget) -> bool {
        self.mutate(|form| form.budget = value)
    }

    pub fn set_deadline(&mut self, value: Deadline) -> bool {
        self.mutate(|form| form.deadline = value)
    }

    pub fn set_gdpr_consent(&mut self, value: bool) -> bool {
        self.mutate(|form| form.gdpr_consent = value)
    }

    fn mutate(&mut self, apply: impl FnOnce(&mut QuoteForm)) -> bool {
        if !self.is_editable() {
            return false;
        }
        apply(&mut self.form);
        true
    }

    /// Guard a submission and mark it in flight
    ///
    /// Returns the form to hand to the collaborator. Every call that succeeds
    /// must be paired with [`Wizard::finish_submission`].
    pub fn begin_submission(&mut self) -> Result<QuoteForm, SubmitRejected> {
        match self.phase {
            Phase::Submitting => return Err(SubmitRejected::InFlight),
            Phase::Submitted(_) => return Err(SubmitRejected::AlreadySubmitted),
            Phase::Editing => {}
        }
        if !self.step.is_last() {
            return Err(SubmitRejected::NotOnFinalStep(self.step));
        }
        let errors = self.form.validate_step(self.step);
        if !errors.is_empty() {
            return Err(SubmitRejected::Invalid(errors));
        }
        tracing::info!("submission started");
        self.phase = Phase::Submitting;
        Ok(self.form.clone())
    }

    /// Apply the collaborator's outcome
    ///
    /// On success the saved snapshot is cleared and the form starts over; on
    /// failure the wizard returns to editing on the final step, data intact.
    pub fn finish_submission(
        &mut self,
        result: Result<Delivery, SubmissionError>,
        store: &dyn ProgressStore,
    ) -> Result<Delivery, SubmissionError> {
        if !self.is_submitting() {
            tracing::warn!("submission result arrived with no submission in flight");
            return result;
        }
        match result {
            Ok(delivery) => {
                if let Err(e) = store.clear() {
                    tracing::warn!(error = %e, "could not clear saved progress after submission");
                }
                self.form = QuoteForm::default();
                self.step = Step::Contact;
                self.phase = Phase::Submitted(delivery);
                tracing::info!(?delivery, "submission completed");
                Ok(delivery)
            }
            Err(e) => {
                self.phase = Phase::Editing;
                tracing::error!(error = %e, "submission failed");
                Err(e)
            }
        }
    }

    /// Validate, deliver through `submitter` and apply the outcome
    ///
    /// App runs the same begin/finish pair around a spawned task instead.
    #[allow(dead_code)]
    pub async fn submit(
        &mut self,
        submitter: &dyn Submitter,
        store: &dyn ProgressStore,
    ) -> Result<Delivery, SubmitError> {
        let form = self.begin_submission()?;
        let result = submitter.submit(&form).await;
        Ok(self.finish_submission(result, store)?)
    }

    /// Start over with an empty form
    pub fn reset(&mut self) {
        tracing::info!("wizard reset");
        *self = Self::default();
    }

    pub fn snapshot(&self) -> WizardProgress {
        WizardProgress::new(self.form.clone(), self.step)
    }

    pub fn save_progress(&self, store: &dyn ProgressStore) -> Result<(), PersistenceError> {
        store.save(&self.snapshot())?;
        tracing::info!(step = self.step.number(), "progress saved");
        Ok(())
    }

    /// Replace form and step with the saved snapshot, if any
    ///
    /// Errors leave the wizard untouched.
    pub fn load_progress(
        &mut self,
        store: &dyn ProgressStore,
    ) -> Result<LoadOutcome, PersistenceError> {
        if self.is_submitting() {
            return Err(PersistenceError::SubmissionInFlight);
        }
        let Some(progress) = store.load()? else {
            tracing::info!("no saved progress to load");
            return Ok(LoadOutcome::NothingSaved);
        };
        self.form = progress.form;
        self.step = progress.last_step;
        self.phase = Phase::Editing;
        tracing::info!(step = self.step.number(), "progress loaded");
        Ok(LoadOutcome::Restored(self.step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MockProgressStore;
    use crate::submission::MockSubmitter;

    fn contact_filled() -> Wizard {
        let mut wizard = Wizard::new();
        wizard.edit_text(TextField::Name, |s| s.push_str("Ana"));
        wizard.edit_text(TextField::Email, |s| s.push_str("ana@x.com"));
        wizard.edit_text(TextField::Phone, |s| s.push_str("11999999999"));
        wizard
    }

    /// A wizard on the final step with every step valid
    fn ready_to_submit() -> Wizard {
        let mut wizard = contact_filled();
        wizard.toggle_service(ServiceType::Website);
        wizard.edit_text(TextField::Objective, |s| s.push_str("Captar clientes"));
        wizard.edit_text(TextField::Features, |s| s.push_str("Formulário"));
        wizard.set_gdpr_consent(true);
        for _ in 0..4 {
            assert!(matches!(wizard.advance(), Navigation::Moved(_)));
        }
        assert_eq!(wizard.step(), Step::Confirmation);
        wizard
    }

    fn clearing_store() -> MockProgressStore {
        let mut store = MockProgressStore::new();
        store.expect_clear().times(1).returning(|| Ok(()));
        store
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_advance_from_valid_contact_step() {
            let mut wizard = contact_filled();
            assert_eq!(wizard.advance(), Navigation::Moved(Step::Services));
            assert_eq!(wizard.step(), Step::Services);
        }

        #[test]
        fn test_advance_without_service_is_blocked() {
            let mut wizard = contact_filled();
            wizard.advance();
            let before = wizard.clone();

            assert_eq!(
                wizard.advance(),
                Navigation::Blocked(vec![ValidationError::NoServiceSelected])
            );
            assert_eq!(wizard, before);
        }

        #[test]
        fn test_advance_succeeds_iff_step_valid() {
            let mut wizard = ready_to_submit();
            for step in [Step::Contact, Step::Services, Step::Project, Step::Commercial] {
                while wizard.step() > step {
                    wizard.retreat();
                }
                assert!(wizard.is_step_valid(step));
                assert!(matches!(wizard.advance(), Navigation::Moved(_)));
            }

            let mut empty = Wizard::new();
            let before = empty.clone();
            assert!(!empty.is_step_valid(Step::Contact));
            assert!(matches!(empty.advance(), Navigation::Blocked(_)));
            assert_eq!(empty, before);
        }

        #[test]
        fn test_invalid_email_blocks_contact_step() {
            let mut wizard = contact_filled();
            wizard.edit_text(TextField::Email, |s| *s = "ana@".to_string());
            assert_eq!(
                wizard.advance(),
                Navigation::Blocked(vec![ValidationError::InvalidEmail])
            );
        }

        #[test]
        fn test_advance_at_last_step_is_boundary() {
            let mut wizard = ready_to_submit();
            assert_eq!(wizard.advance(), Navigation::AtBoundary);
            assert_eq!(wizard.step(), Step::Confirmation);
        }

        #[test]
        fn test_retreat_at_first_step_is_boundary() {
            let mut wizard = Wizard::new();
            assert_eq!(wizard.retreat(), Navigation::AtBoundary);
            assert_eq!(wizard.step(), Step::Contact);
        }

        #[test]
        fn test_retreat_then_advance_returns_to_same_step() {
            let mut wizard = ready_to_submit();
            while wizard.step() > Step::Services {
                let before = wizard.clone();
                let step = wizard.step();
                wizard.retreat();
                assert_eq!(wizard.advance(), Navigation::Moved(step));
                assert_eq!(wizard, before);
                wizard.retreat();
            }
        }

        #[test]
        fn test_retreat_skips_validation() {
            let mut wizard = contact_filled();
            wizard.advance();
            assert!(!wizard.is_step_valid(Step::Services));
            assert_eq!(wizard.retreat(), Navigation::Moved(Step::Contact));
        }

        #[test]
        fn test_setters_never_advance() {
            let mut wizard = Wizard::new();
            wizard.edit_text(TextField::Name, |s| s.push_str("Ana"));
            wizard.edit_text(TextField::Email, |s| s.push_str("ana@x.com"));
            wizard.edit_text(TextField::Phone, |s| s.push_str("1"));
            assert_eq!(wizard.step(), Step::Contact);
        }
    }

    mod services {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_other_requires_elaboration() {
            let mut wizard = contact_filled();
            wizard.advance();

            wizard.toggle_service(ServiceType::Other);
            assert!(!wizard.is_step_valid(Step::Services));

            wizard.edit_text(TextField::ServiceTypeOther, |s| s.push_str("Chatbot"));
            assert!(wizard.is_step_valid(Step::Services));
        }

        #[test]
        fn test_deselecting_other_ignores_leftover_text() {
            let mut wizard = contact_filled();
            wizard.toggle_service(ServiceType::Other);
            wizard.toggle_service(ServiceType::Mobile);
            wizard.toggle_service(ServiceType::Other);
            assert!(wizard.is_step_valid(Step::Services));

            wizard.edit_text(TextField::ServiceTypeOther, |s| s.push_str("sobra"));
            assert!(wizard.is_step_valid(Step::Services));
        }

        #[test]
        fn test_whitespace_elaboration_is_empty() {
            let mut wizard = contact_filled();
            wizard.toggle_service(ServiceType::Other);
            wizard.edit_text(TextField::ServiceTypeOther, |s| s.push_str("   "));
            assert_eq!(
                wizard.validation_errors(Step::Services),
                vec![ValidationError::Required(TextField::ServiceTypeOther)]
            );
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;
        use crate::persistence::{FileProgressStore, SnapshotPolicy};

        #[tokio::test]
        async fn test_successful_submission_resets_wizard() {
            let mut wizard = ready_to_submit();
            let mut submitter = MockSubmitter::new();
            submitter
                .expect_submit()
                .withf(|form: &QuoteForm| form.name == "Ana" && form.gdpr_consent)
                .times(1)
                .returning(|_| Ok(Delivery::Relay));
            let store = clearing_store();

            let delivery = wizard.submit(&submitter, &store).await.unwrap();

            assert_eq!(delivery, Delivery::Relay);
            assert_eq!(wizard.form(), &QuoteForm::default());
            assert_eq!(wizard.step(), Step::Contact);
            assert_eq!(wizard.phase(), Phase::Submitted(Delivery::Relay));
        }

        #[tokio::test]
        async fn test_successful_submission_removes_saved_snapshot() {
            let dir = tempfile::TempDir::new().unwrap();
            let store = FileProgressStore::new(
                dir.path().join("quoteFormData.json"),
                SnapshotPolicy::Reject,
            );
            let mut wizard = ready_to_submit();
            wizard.save_progress(&store).unwrap();
            assert!(store.load().unwrap().is_some());

            let mut submitter = MockSubmitter::new();
            submitter
                .expect_submit()
                .times(1)
                .returning(|_| Ok(Delivery::Relay));

            wizard.submit(&submitter, &store).await.unwrap();

            assert!(store.load().unwrap().is_none());
            assert!(!dir.path().join("quoteFormData.json").exists());
        }

        #[test]
        fn test_fallback_delivery_is_reported() {
            let mut wizard = ready_to_submit();
            let mut submitter = MockSubmitter::new();
            submitter
                .expect_submit()
                .times(1)
                .returning(|_| Ok(Delivery::MailClientFallback));
            let store = clearing_store();

            let delivery = tokio_test::block_on(wizard.submit(&submitter, &store)).unwrap();
            assert_eq!(delivery, Delivery::MailClientFallback);
            assert!(wizard.is_submitted());
        }

        #[tokio::test]
        async fn test_failed_submission_keeps_data() {
            let mut wizard = ready_to_submit();
            let before = wizard.clone();
            let mut submitter = MockSubmitter::new();
            submitter
                .expect_submit()
                .times(1)
                .returning(|_| Err(SubmissionError::RelayStatus(502)));
            let mut store = MockProgressStore::new();
            store.expect_clear().times(0);

            let result = wizard.submit(&submitter, &store).await;

            assert!(matches!(
                result,
                Err(SubmitError::Failed(SubmissionError::RelayStatus(502)))
            ));
            assert_eq!(wizard, before);
            assert_eq!(wizard.step(), Step::Confirmation);
        }

        #[tokio::test]
        async fn test_missing_consent_skips_collaborator() {
            let mut wizard = ready_to_submit();
            wizard.set_gdpr_consent(false);
            let mut submitter = MockSubmitter::new();
            submitter.expect_submit().times(0);
            let store = MockProgressStore::new();

            let result = wizard.submit(&submitter, &store).await;

            assert!(matches!(
                result,
                Err(SubmitError::Rejected(SubmitRejected::Invalid(ref errors)))
                    if errors == &vec![ValidationError::ConsentRequired]
            ));
            assert!(wizard.is_editable());
        }

        #[tokio::test]
        async fn test_submit_before_final_step_is_rejected() {
            let mut wizard = contact_filled();
            let mut submitter = MockSubmitter::new();
            submitter.expect_submit().times(0);

            let result = wizard.submit(&submitter, &MockProgressStore::new()).await;
            assert!(matches!(
                result,
                Err(SubmitError::Rejected(SubmitRejected::NotOnFinalStep(
                    Step::Contact
                )))
            ));
        }

        #[test]
        fn test_second_submission_while_in_flight_is_rejected() {
            let mut wizard = ready_to_submit();
            wizard.begin_submission().unwrap();
            assert_eq!(wizard.begin_submission(), Err(SubmitRejected::InFlight));
        }

        #[test]
        fn test_setters_ignored_while_in_flight() {
            let mut wizard = ready_to_submit();
            wizard.begin_submission().unwrap();

            assert!(!wizard.edit_text(TextField::Name, |s| s.push_str("!")));
            assert!(!wizard.set_gdpr_consent(false));
            assert!(!wizard.toggle_service(ServiceType::Saas));
            assert_eq!(wizard.form().name, "Ana");
            assert!(wizard.form().gdpr_consent);
            assert_eq!(wizard.retreat(), Navigation::Locked);
        }

        #[test]
        fn test_submitted_state_until_reset() {
            let mut wizard = ready_to_submit();
            wizard.begin_submission().unwrap();
            wizard
                .finish_submission(Ok(Delivery::Relay), &clearing_store())
                .unwrap();

            assert!(!wizard.set_budget(Budget::Over10k));
            assert_eq!(
                wizard.begin_submission(),
                Err(SubmitRejected::AlreadySubmitted)
            );

            wizard.reset();
            assert!(!wizard.is_submitted());
            assert!(wizard.set_budget(Budget::Over10k));
        }

        #[test]
        fn test_clear_failure_does_not_fail_submission() {
            let mut wizard = ready_to_submit();
            let mut store = MockProgressStore::new();
            store.expect_clear().times(1).returning(|| {
                Err(PersistenceError::Io(std::io::Error::other("read-only")))
            });

            wizard.begin_submission().unwrap();
            let delivery = wizard.finish_submission(Ok(Delivery::Relay), &store);
            assert_eq!(delivery.unwrap(), Delivery::Relay);
            assert_eq!(wizard.form(), &QuoteForm::default());
        }

        #[test]
        fn test_stray_result_is_ignored() {
            let mut wizard = contact_filled();
            let before = wizard.clone();
            let mut store = MockProgressStore::new();
            store.expect_clear().times(0);

            let result = wizard.finish_submission(Ok(Delivery::Relay), &store);
            assert!(result.is_ok());
            assert_eq!(wizard, before);
        }
    }

    mod persistence {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_save_writes_form_and_step() {
            let mut wizard = contact_filled();
            wizard.advance();
            let expected = wizard.snapshot();
            let mut store = MockProgressStore::new();
            store
                .expect_save()
                .withf(move |progress: &WizardProgress| *progress == expected)
                .times(1)
                .returning(|_| Ok(()));

            wizard.save_progress(&store).unwrap();
        }

        #[test]
        fn test_load_restores_form_and_step() {
            let mut saved = ready_to_submit();
            saved.retreat();
            let progress = saved.snapshot();
            let mut store = MockProgressStore::new();
            let stored = progress.clone();
            store
                .expect_load()
                .times(1)
                .returning(move || Ok(Some(stored.clone())));

            let mut wizard = Wizard::new();
            assert_eq!(
                wizard.load_progress(&store).unwrap(),
                LoadOutcome::Restored(Step::Commercial)
            );
            assert_eq!(wizard.form(), &progress.form);
            assert_eq!(wizard.step(), Step::Commercial);
        }

        #[test]
        fn test_load_with_nothing_saved() {
            let mut wizard = contact_filled();
            let before = wizard.clone();
            let mut store = MockProgressStore::new();
            store.expect_load().times(1).returning(|| Ok(None));

            assert_eq!(
                wizard.load_progress(&store).unwrap(),
                LoadOutcome::NothingSaved
            );
            assert_eq!(wizard, before);
        }

        #[test]
        fn test_load_error_keeps_form() {
            let mut wizard = contact_filled();
            let before = wizard.clone();
            let mut store = MockProgressStore::new();
            store
                .expect_load()
                .times(1)
                .returning(|| Err(PersistenceError::NotAnObject));

            assert!(wizard.load_progress(&store).is_err());
            assert_eq!(wizard, before);
        }

        #[test]
        fn test_load_refused_while_in_flight() {
            let mut wizard = ready_to_submit();
            wizard.begin_submission().unwrap();
            let mut store = MockProgressStore::new();
            store.expect_load().times(0);

            assert!(matches!(
                wizard.load_progress(&store),
                Err(PersistenceError::SubmissionInFlight)
            ));
        }

        #[test]
        fn test_save_error_is_returned() {
            let wizard = contact_filled();
            let mut store = MockProgressStore::new();
            store
                .expect_save()
                .returning(|_| Err(PersistenceError::Io(std::io::Error::other("disk full"))));

            assert!(matches!(
                wizard.save_progress(&store),
                Err(PersistenceError::Io(_))
            ));
        }
    }
}
