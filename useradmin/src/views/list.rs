use std::sync::Arc;

use crate::client::UserApi;
use crate::ids::UserId;
use crate::models::{User, UserRow};
use crate::notify::Notifier;

use super::confirm::Confirmer;
use super::delete::{delete_user, DeleteOutcome};
use super::form::{SubmitOutcome, UserForm};
use super::messages;

/// The user table and the actions attached to it
///
/// Owns the canonical collection. Every successful mutation is followed by
/// a full refetch; nothing is patched in place.
pub struct UserListView {
    api: Arc<dyn UserApi>,
    notifier: Arc<dyn Notifier>,
    users: Vec<User>,
}

impl UserListView {
    /// Create an empty view; call [`reload`](Self::reload) to populate it
    pub fn new(api: Arc<dyn UserApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            users: Vec::new(),
        }
    }

    /// Fetch the collection and replace the current one
    ///
    /// On failure the previous collection stays visible and an error
    /// notification is emitted. Returns whether the fetch succeeded.
    pub async fn reload(&mut self) -> bool {
        match self.api.list_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "User list refreshed");
                self.users = users;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load users");
                self.notifier.error(messages::LOAD_FAILED);
                false
            }
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn rows(&self) -> Vec<UserRow> {
        self.users.iter().map(UserRow::from).collect()
    }

    pub fn empty_message(&self) -> &'static str {
        messages::EMPTY_STATE
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id.as_ref() == Some(id))
    }

    pub fn create_form(&self) -> UserForm {
        UserForm::create()
    }

    /// Edit form for `user`, or `None` after an error notification if the
    /// record has no identifier
    pub fn edit_form(&self, user: &User) -> Option<UserForm> {
        match UserForm::edit(user) {
            Ok(form) => Some(form),
            Err(_) => {
                self.notifier.error(messages::MISSING_ID);
                None
            }
        }
    }

    /// Submit `form` and refetch once if it saved
    pub async fn submit(&mut self, form: &mut UserForm) -> SubmitOutcome {
        let outcome = form
            .submit(self.api.as_ref(), self.notifier.as_ref())
            .await;
        if matches!(outcome, SubmitOutcome::Saved(_)) {
            self.reload().await;
        }
        outcome
    }

    /// Ask `confirmer`, then delete `user` and refetch once
    pub async fn delete(&mut self, user: &User, confirmer: &dyn Confirmer) -> DeleteOutcome {
        let outcome = delete_user(
            self.api.as_ref(),
            self.notifier.as_ref(),
            user,
            Some(confirmer),
        )
        .await;
        if outcome == DeleteOutcome::Deleted {
            self.reload().await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use crate::testing::{sample_user, FakeApi, RecordingNotifier, ScriptedConfirmer};
    use crate::validation::Field;
    use reqwest::StatusCode;

    fn view(api: &Arc<FakeApi>, notifier: &Arc<RecordingNotifier>) -> UserListView {
        UserListView::new(api.clone(), notifier.clone())
    }

    #[tokio::test]
    async fn test_initial_load_failure_shows_empty_state() {
        let api = Arc::new(FakeApi::new(vec![sample_user(1, "Ada")]));
        api.fail_list_with(StatusCode::SERVICE_UNAVAILABLE);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);

        assert!(!view.reload().await);
        assert!(view.is_empty());
        assert_eq!(view.empty_message(), "No records");
        assert_eq!(
            notifier.seen(),
            vec![Notification::Error(messages::LOAD_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn test_reload_failure_keeps_stale_rows() {
        let api = Arc::new(FakeApi::new(vec![sample_user(1, "Ada")]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);

        assert!(view.reload().await);
        api.fail_list_with(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!view.reload().await);
        assert_eq!(view.users().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let api = Arc::new(FakeApi::new(vec![sample_user(1, "Ada"), sample_user(2, "Bob")]));
        let notifier = Arc::new(RecordingNotifier::default());
        let confirmer = ScriptedConfirmer::answering(false);
        let mut view = view(&api, &notifier);
        view.reload().await;
        let before = view.users().to_vec();

        let target = view.users()[0].clone();
        let outcome = view.delete(&target, &confirmer).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(api.delete_calls(), 0);
        assert_eq!(api.list_calls(), 1);
        assert_eq!(view.users(), before.as_slice());
        assert!(notifier.seen().is_empty());

        let prompts = confirmer.prompts();
        let prompt = &prompts[0];
        assert_eq!(prompt.title, "Delete user Ada?");
        assert_eq!(prompt.confirm_label, "Yes, delete");
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches_once() {
        let api = Arc::new(FakeApi::new(vec![sample_user(1, "Ada"), sample_user(2, "Bob")]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);
        view.reload().await;

        let target = view.users()[1].clone();
        let outcome = view
            .delete(&target, &ScriptedConfirmer::answering(true))
            .await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(api.delete_calls(), 1);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(view.users().len(), 1);
        assert_eq!(
            notifier.seen(),
            vec![
                Notification::Loading(messages::DELETE_LOADING.to_string()),
                Notification::Success("User Bob was deleted".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_refetch() {
        let api = Arc::new(FakeApi::new(vec![sample_user(1, "Ada")]));
        api.fail_mutations_with(StatusCode::NOT_FOUND);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);
        view.reload().await;

        let target = view.users()[0].clone();
        let outcome = view
            .delete(&target, &ScriptedConfirmer::answering(true))
            .await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(api.list_calls(), 1);
        assert_eq!(
            notifier.seen().last(),
            Some(&Notification::Error(messages::DELETE_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_records_without_id_cannot_be_modified() {
        let mut orphan = sample_user(1, "Ghost");
        orphan.id = None;
        let api = Arc::new(FakeApi::new(vec![orphan.clone()]));
        let notifier = Arc::new(RecordingNotifier::default());
        let confirmer = ScriptedConfirmer::answering(true);
        let mut view = view(&api, &notifier);

        assert!(view.edit_form(&orphan).is_none());
        assert_eq!(view.delete(&orphan, &confirmer).await, DeleteOutcome::Failed);
        assert!(confirmer.prompts().is_empty());
        assert_eq!(api.delete_calls(), 0);
        assert_eq!(
            notifier.seen(),
            vec![
                Notification::Error(messages::MISSING_ID.to_string()),
                Notification::Error(messages::MISSING_ID.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_successful_create_refetches_once() {
        let api = Arc::new(FakeApi::new(vec![]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);
        view.reload().await;

        let mut form = view.create_form();
        form.set(Field::FullName, "Ada Lovelace");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Phone, "555");
        let outcome = view.submit(&mut form).await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(api.list_calls(), 2);
        assert_eq!(view.rows()[0].full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_successful_update_refetches_once() {
        let api = Arc::new(FakeApi::new(vec![sample_user(7, "Grace")]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);
        view.reload().await;

        let target = view.find(&UserId::Legacy(7)).cloned().unwrap();
        let mut form = view.edit_form(&target).unwrap();
        form.set(Field::Phone, "999");
        view.submit(&mut form).await;

        assert_eq!(api.update_calls(), 1);
        assert_eq!(api.list_calls(), 2);
        assert_eq!(view.users()[0].phone, "999");
    }

    #[tokio::test]
    async fn test_conflict_does_not_refetch() {
        let api = Arc::new(FakeApi::new(vec![]));
        api.fail_mutations_with(StatusCode::CONFLICT);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut view = view(&api, &notifier);
        view.reload().await;

        let mut form = view.create_form();
        form.set(Field::FullName, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Phone, "555");
        view.submit(&mut form).await;

        assert!(form.is_open());
        assert_eq!(api.list_calls(), 1);
    }
}
