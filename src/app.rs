//! Application state and core logic

use crate::config::WizardConfig;
use crate::persistence::{FileProgressStore, PersistenceError, ProgressStore};
use crate::state::{
    step_fields, FieldId, LoadOutcome, NavButton, Navigation, Notice, StepFocus, SubmitRejected,
    TextField, Wizard,
};
use crate::submission::{Delivery, RelaySubmitter, SubmissionError, Submitter};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Window for the second Ctrl+C press
const QUIT_CONFIRM_WINDOW: Duration = Duration::from_secs(1);

type SubmissionResult = Result<Delivery, SubmissionError>;

/// Main application struct
pub struct App {
    /// Form data, current step and submission lifecycle
    pub wizard: Wizard,
    /// Keyboard focus within the current step
    pub focus: StepFocus,
    /// Status-bar notice
    pub notice: Option<Notice>,
    /// Inline errors are shown once an advance or submit was blocked on this step
    pub show_validation: bool,
    /// Messages for the modal error dialog, oldest first
    errors: VecDeque<String>,
    store: Box<dyn ProgressStore>,
    submitter: Arc<dyn Submitter>,
    /// Receives the outcome of the spawned submission task
    pending_submission: Option<oneshot::Receiver<SubmissionResult>>,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create the app with the file store and relay submitter from `config`
    pub fn new(config: &WizardConfig) -> Result<Self> {
        let path = config
            .snapshot_path()
            .context("no data directory available for saved progress")?;
        let store = FileProgressStore::new(path, config.snapshot_policy());
        let submitter =
            RelaySubmitter::from_config(config).context("failed to set up form relay client")?;
        Ok(Self::with_services(Box::new(store), Arc::new(submitter)))
    }

    pub fn with_services(store: Box<dyn ProgressStore>, submitter: Arc<dyn Submitter>) -> Self {
        Self {
            wizard: Wizard::new(),
            focus: StepFocus::new(),
            notice: None,
            show_validation: false,
            errors: VecDeque::new(),
            store,
            submitter,
            pending_submission: None,
            quit: false,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Fields shown on the current step
    pub fn current_fields(&self) -> Vec<FieldId> {
        step_fields(self.wizard.step(), self.wizard.form())
    }

    /// Field with keyboard focus, `None` while the button row is active
    pub fn focused_field(&self) -> Option<FieldId> {
        self.current_fields()
            .get(self.focus.active_field_index)
            .copied()
    }

    /// Periodic work between key events
    pub fn tick(&mut self) {
        self.poll_submission();
        self.expire_notice();
    }

    /// Drop the notice once it has been visible long enough
    pub fn expire_notice(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.handle_ctrl_c();
            return;
        }

        // Handle error dialog dismissal first (modal)
        if self.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_error();
            }
            return;
        }

        if self.wizard.is_submitted() {
            self.handle_submitted_key(key);
            return;
        }

        if ctrl {
            match key.code {
                KeyCode::Char('s') => self.save_progress(),
                KeyCode::Char('o') => self.load_progress(),
                KeyCode::Char('n') => self.go_next(),
                KeyCode::Char('b') => self.go_back(),
                _ => {}
            }
            return;
        }

        let fields = self.current_fields();
        let field_count = fields.len();

        match key.code {
            KeyCode::Tab => {
                self.focus.next_field(field_count);
                return;
            }
            KeyCode::BackTab => {
                self.focus.prev_field(field_count);
                return;
            }
            _ => {}
        }

        match fields.get(self.focus.active_field_index).copied() {
            None => self.handle_buttons_key(key, field_count),
            Some(FieldId::Text(field)) => self.handle_text_key(key, field, field_count),
            Some(FieldId::Services) => self.handle_services_key(key, field_count),
            Some(choice @ (FieldId::HasDomain | FieldId::Budget | FieldId::Deadline)) => {
                self.handle_choice_key(key, choice, field_count)
            }
            Some(FieldId::GdprConsent) => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    let consent = self.wizard.form().gdpr_consent;
                    self.wizard.set_gdpr_consent(!consent);
                }
                KeyCode::Up => self.focus.prev_field(field_count),
                KeyCode::Down => self.focus.next_field(field_count),
                _ => {}
            },
        }
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        let confirmed = self
            .last_ctrl_c
            .is_some_and(|last| now.duration_since(last) <= QUIT_CONFIRM_WINDOW);
        if confirmed {
            self.quit = true;
        } else {
            self.last_ctrl_c = Some(now);
            self.notice = Some(Notice::warning("Pressione Ctrl+C novamente para sair"));
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => {
                self.wizard.reset();
                self.on_step_changed();
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_buttons_key(&mut self, key: KeyEvent, field_count: usize) {
        let step = self.wizard.step();
        match key.code {
            KeyCode::Left => self.focus.prev_button(step),
            KeyCode::Right => self.focus.next_button(step),
            KeyCode::Up => self.focus.prev_field(field_count),
            KeyCode::Down => self.focus.next_field(field_count),
            KeyCode::Enter => match self.focus.button_for(step) {
                NavButton::Save => self.save_progress(),
                NavButton::Load => self.load_progress(),
                NavButton::Back => self.go_back(),
                NavButton::Next => self.go_next(),
            },
            _ => {}
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent, field: TextField, field_count: usize) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.wizard.edit_text(field, |text| text.push(c));
            }
            KeyCode::Backspace => {
                self.wizard.edit_text(field, |text| {
                    text.pop();
                });
            }
            KeyCode::Enter if field.is_multiline() => {
                self.wizard.edit_text(field, |text| text.push('\n'));
            }
            KeyCode::Enter | KeyCode::Down => self.focus.next_field(field_count),
            KeyCode::Up => self.focus.prev_field(field_count),
            _ => {}
        }
    }

    fn handle_services_key(&mut self, key: KeyEvent, field_count: usize) {
        match key.code {
            KeyCode::Up => self.focus.cursor_up(),
            KeyCode::Down => self.focus.cursor_down(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.wizard.toggle_service(self.focus.cursor_service());
                // Toggling `other` adds or removes its elaboration field
                self.focus.clamp(self.current_fields().len());
            }
            KeyCode::Right => self.focus.next_field(field_count),
            _ => {}
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent, choice: FieldId, field_count: usize) {
        let forward = match key.code {
            KeyCode::Right | KeyCode::Char(' ') => true,
            KeyCode::Left => false,
            KeyCode::Up => return self.focus.prev_field(field_count),
            KeyCode::Down | KeyCode::Enter => return self.focus.next_field(field_count),
            _ => return,
        };
        let form = self.wizard.form();
        match choice {
            FieldId::HasDomain => {
                let value = if forward { form.has_domain.next() } else { form.has_domain.prev() };
                self.wizard.set_has_domain(value);
            }
            FieldId::Budget => {
                let value = if forward { form.budget.next() } else { form.budget.prev() };
                self.wizard.set_budget(value);
            }
            FieldId::Deadline => {
                let value = if forward { form.deadline.next() } else { form.deadline.prev() };
                self.wizard.set_deadline(value);
            }
            _ => {}
        }
    }

    fn on_step_changed(&mut self) {
        self.focus = StepFocus::new();
        self.show_validation = false;
    }

    /// Advance, or submit from the last step
    pub fn go_next(&mut self) {
        if self.wizard.step().is_last() {
            self.start_submission();
            return;
        }
        match self.wizard.advance() {
            Navigation::Moved(_) => self.on_step_changed(),
            Navigation::Blocked(_) => {
                self.show_validation = true;
                self.notice = Some(Notice::warning(
                    "Por favor, preencha todos os campos obrigatórios.",
                ));
            }
            Navigation::AtBoundary | Navigation::Locked => {}
        }
    }

    pub fn go_back(&mut self) {
        if let Navigation::Moved(_) = self.wizard.retreat() {
            self.on_step_changed();
        }
    }

    pub fn save_progress(&mut self) {
        let notice = match self.wizard.save_progress(self.store.as_ref()) {
            Ok(()) => Notice::success("Progresso salvo! Você pode continuar mais tarde."),
            Err(e) => {
                tracing::warn!(error = %e, "saving progress failed");
                Notice::error("Não foi possível salvar o progresso.")
            }
        };
        self.notice = Some(notice);
    }

    pub fn load_progress(&mut self) {
        let notice = match self.wizard.load_progress(self.store.as_ref()) {
            Ok(LoadOutcome::Restored(_)) => {
                self.on_step_changed();
                Notice::success("Progresso carregado com sucesso!")
            }
            Ok(LoadOutcome::NothingSaved) => Notice::warning("Nenhum progresso salvo encontrado."),
            Err(PersistenceError::SubmissionInFlight) => {
                Notice::warning("Aguarde o envio da solicitação terminar.")
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading progress failed");
                Notice::error("Não foi possível carregar o progresso salvo.")
            }
        };
        self.notice = Some(notice);
    }

    /// Hand the form to the submitter on a background task
    fn start_submission(&mut self) {
        let form = match self.wizard.begin_submission() {
            Ok(form) => form,
            Err(SubmitRejected::Invalid(_)) => {
                self.show_validation = true;
                self.notice = Some(Notice::warning(
                    "É preciso autorizar o contato para enviar a solicitação.",
                ));
                return;
            }
            Err(rejected) => {
                tracing::debug!(reason = %rejected, "submission not started");
                return;
            }
        };

        let (tx, rx) = oneshot::channel();
        let submitter = Arc::clone(&self.submitter);
        tokio::spawn(async move {
            let result = submitter.submit(&form).await;
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(result);
        });
        self.pending_submission = Some(rx);
    }

    /// Apply the submission outcome once the background task reports back
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending_submission.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(SubmissionError::Interrupted),
        };
        self.pending_submission = None;

        match self.wizard.finish_submission(result, self.store.as_ref()) {
            Ok(Delivery::Relay) => {
                self.on_step_changed();
                self.notice = Some(Notice::success("Solicitação enviada com sucesso!"));
            }
            Ok(Delivery::MailClientFallback) => {
                self.on_step_changed();
                self.notice = Some(Notice::warning(
                    "Abrimos seu cliente de email para concluir o envio.",
                ));
            }
            Err(e) => self.push_error(format!(
                "Não foi possível enviar sua solicitação. Tente novamente mais tarde.\n\n{e}"
            )),
        }
    }
}
