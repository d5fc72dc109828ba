use crate::client::UserApi;
use crate::error::{Error, Result};
use crate::ids::UserId;
use crate::models::{SavedUser, User, UserInput};
use crate::notify::Notifier;
use crate::validation::{Field, FieldErrors};

use super::messages;

/// What a form submits to
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit { id: UserId },
}

/// Result of [`UserForm::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; the form has closed
    Saved(SavedUser),
    /// Rejected client-side; nothing was sent
    Invalid(FieldErrors),
    /// Rejected by the server or the network; the form stays open
    Failed(String),
}

/// Create or edit form for a single user
///
/// `submit` takes `&mut self`, so a second submission cannot start while
/// one is in flight.
#[derive(Debug, Clone)]
pub struct UserForm {
    mode: FormMode,
    input: UserInput,
    errors: FieldErrors,
    feedback: Option<String>,
    open: bool,
}

impl UserForm {
    /// Empty creation form
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            input: UserInput::default(),
            errors: FieldErrors::default(),
            feedback: None,
            open: true,
        }
    }

    /// Edit form pre-filled from `user`
    pub fn edit(user: &User) -> Result<Self> {
        let id = user.id.ok_or(Error::MissingIdentifier)?;
        Ok(Self {
            mode: FormMode::Edit { id },
            input: user.to_input(),
            errors: FieldErrors::default(),
            feedback: None,
            open: true,
        })
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Register user",
            FormMode::Edit { .. } => "Edit user",
        }
    }

    pub fn input(&self) -> &UserInput {
        &self.input
    }

    pub fn value(&self, field: Field) -> &str {
        field.value(&self.input)
    }

    /// Update one field, clearing its previous error
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        field.set(&mut self.input, value);
        if self.errors.contains(field) {
            self.errors = self.input.check().err().unwrap_or_default();
        }
    }

    /// Per-field messages from the last validation
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Last server-side failure shown for this form
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Discard input and close
    pub fn cancel(&mut self) {
        self.reset();
        self.open = false;
    }

    fn reset(&mut self) {
        if self.mode == FormMode::Create {
            self.input = UserInput::default();
        }
        self.errors = FieldErrors::default();
        self.feedback = None;
    }

    /// Validate without submitting
    pub fn validate(&mut self) -> bool {
        self.errors = self.input.check().err().unwrap_or_default();
        self.errors.is_empty()
    }

    /// Validate, send, and report the outcome through `notifier`
    pub async fn submit(&mut self, api: &dyn UserApi, notifier: &dyn Notifier) -> SubmitOutcome {
        let input = self.input.trimmed();
        if let Err(errors) = input.check() {
            tracing::debug!("Form rejected: {}", errors);
            self.errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.errors = FieldErrors::default();

        let result = match &self.mode {
            FormMode::Create => {
                notifier.loading(messages::CREATE_LOADING);
                api.create_user(&input).await
            }
            FormMode::Edit { id } => {
                notifier.loading(messages::UPDATE_LOADING);
                api.update_user(id, &input).await
            }
        };

        match result {
            Ok(saved) => {
                let name = saved
                    .user
                    .as_ref()
                    .map(|u| u.display_name().to_string())
                    .unwrap_or_else(|| input.full_name.clone());
                let message = match self.mode {
                    FormMode::Create => messages::created(&name),
                    FormMode::Edit { .. } => messages::updated(&name),
                };
                tracing::info!("{}", message);
                notifier.success(&message);

                self.reset();
                self.open = false;
                SubmitOutcome::Saved(saved)
            }
            Err(e) => {
                let message = if e.is_conflict() {
                    messages::DUPLICATE
                } else {
                    messages::UNEXPECTED
                };
                tracing::warn!(error = %e, "Saving user failed");
                notifier.error(message);

                self.feedback = Some(message.to_string());
                SubmitOutcome::Failed(message.to_string())
            }
        }
    }
}
