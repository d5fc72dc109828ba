//! Test doubles for the view models

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use crate::client::UserApi;
use crate::error::{Error, Result};
use crate::ids::UserId;
use crate::models::{SavedUser, User, UserInput};
use crate::notify::{Notification, Notifier};
use crate::views::{ConfirmPrompt, Confirmer};

pub fn sample_user(id: i64, name: &str) -> User {
    let local = name.to_lowercase().replace(' ', ".");
    User {
        id: Some(UserId::Legacy(id)),
        full_name: name.to_string(),
        email: format!("{local}@example.com"),
        phone: format!("555000{id}"),
        created_at: None,
    }
}

/// In-memory [`UserApi`] that counts calls
///
/// Creates answer with a message-only body, like the real server; updates
/// answer with the stored record.
#[derive(Default)]
pub struct FakeApi {
    users: Mutex<Vec<User>>,
    list_failure: Mutex<Option<StatusCode>>,
    mutation_failure: Mutex<Option<StatusCode>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    pub fn fail_list_with(&self, status: StatusCode) {
        *self.list_failure.lock().unwrap() = Some(status);
    }

    pub fn fail_mutations_with(&self, status: StatusCode) {
        *self.mutation_failure.lock().unwrap() = Some(status);
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn failure(slot: &Mutex<Option<StatusCode>>) -> Result<()> {
        match *slot.lock().unwrap() {
            Some(status) => Err(Error::Status {
                status,
                message: None,
            }),
            None => Ok(()),
        }
    }

    fn not_found() -> Error {
        Error::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("user not found".to_string()),
        }
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Self::failure(&self.list_failure)?;
        Ok(self.users())
    }

    async fn get_user(&self, id: &UserId) -> Result<User> {
        Self::failure(&self.list_failure)?;
        self.users()
            .into_iter()
            .find(|u| u.id.as_ref() == Some(id))
            .ok_or_else(Self::not_found)
    }

    async fn create_user(&self, input: &UserInput) -> Result<SavedUser> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Self::failure(&self.mutation_failure)?;
        self.users.lock().unwrap().push(User {
            id: Some(UserId::Uuid(Uuid::new_v4())),
            full_name: input.full_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            created_at: None,
        });
        Ok(SavedUser {
            user: None,
            message: Some("User registered".to_string()),
        })
    }

    async fn update_user(&self, id: &UserId, input: &UserInput) -> Result<SavedUser> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::failure(&self.mutation_failure)?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id.as_ref() == Some(id))
            .ok_or_else(Self::not_found)?;
        user.full_name = input.full_name.clone();
        user.email = input.email.clone();
        user.phone = input.phone.clone();
        Ok(SavedUser {
            user: Some(user.clone()),
            message: None,
        })
    }

    async fn delete_user(&self, id: &UserId) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Self::failure(&self.mutation_failure)?;
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        if users.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

/// [`Notifier`] that remembers everything it was shown
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

/// [`Confirmer`] with a fixed answer
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer
    }
}
