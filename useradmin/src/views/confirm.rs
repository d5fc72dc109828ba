use crate::models::User;

use super::messages;

/// Content of a yes/no confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    /// Dialog shown before deleting `user`
    pub fn delete_user(user: &User) -> Self {
        Self {
            title: messages::delete_title(user.display_name()),
            text: messages::DELETE_WARNING.to_string(),
            confirm_label: "Yes, delete".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

/// Blocks a destructive action until the operator answers
pub trait Confirmer: Send + Sync {
    /// `true` only if the operator confirmed
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}
