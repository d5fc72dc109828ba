use crate::client::UserApi;
use crate::models::User;
use crate::notify::Notifier;

use super::confirm::{ConfirmPrompt, Confirmer};
use super::messages;

/// Result of a delete action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The operator declined; nothing was sent
    Cancelled,
    Deleted,
    Failed,
}

/// Delete `user`, asking `confirmer` first when one is given
///
/// Reports progress through `notifier` and does not touch any list; callers
/// that show one refetch it themselves.
pub async fn delete_user(
    api: &dyn UserApi,
    notifier: &dyn Notifier,
    user: &User,
    confirmer: Option<&dyn Confirmer>,
) -> DeleteOutcome {
    let Some(id) = user.id else {
        notifier.error(messages::MISSING_ID);
        return DeleteOutcome::Failed;
    };

    if let Some(confirmer) = confirmer {
        if !confirmer.confirm(&ConfirmPrompt::delete_user(user)) {
            tracing::debug!(%id, "Delete cancelled");
            return DeleteOutcome::Cancelled;
        }
    }

    notifier.loading(messages::DELETE_LOADING);
    match api.delete_user(&id).await {
        Ok(()) => {
            tracing::info!(%id, "User deleted");
            notifier.success(&messages::deleted(user.display_name()));
            DeleteOutcome::Deleted
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "Deleting user failed");
            notifier.error(messages::DELETE_FAILED);
            DeleteOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use crate::testing::{sample_user, FakeApi, RecordingNotifier, ScriptedConfirmer};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn test_unconfirmed_delete_skips_dialog_and_list() {
        let user = sample_user(3, "Ada");
        let api = FakeApi::new(vec![user.clone()]);
        let notifier = RecordingNotifier::default();

        let outcome = delete_user(&api, &notifier, &user, None).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(api.delete_calls(), 1);
        assert_eq!(api.list_calls(), 0);
        assert!(api.users().is_empty());
        assert_eq!(
            notifier.seen(),
            vec![
                Notification::Loading(messages::DELETE_LOADING.to_string()),
                Notification::Success(messages::deleted("Ada")),
            ]
        );
    }

    #[tokio::test]
    async fn test_declined_dialog_sends_nothing() {
        let user = sample_user(3, "Ada");
        let api = FakeApi::new(vec![user.clone()]);
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(false);

        let outcome = delete_user(&api, &notifier, &user, Some(&confirmer)).await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(api.delete_calls(), 0);
        assert!(notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_reports_failure() {
        let user = sample_user(3, "Ada");
        let api = FakeApi::new(vec![user.clone()]);
        api.fail_mutations_with(StatusCode::INTERNAL_SERVER_ERROR);
        let notifier = RecordingNotifier::default();

        let outcome = delete_user(&api, &notifier, &user, None).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(
            notifier.seen().last(),
            Some(&Notification::Error(messages::DELETE_FAILED.to_string()))
        );
    }
}
