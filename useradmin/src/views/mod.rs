//! View models behind the user table and its forms
//!
//! [`UserListView`] owns the user collection and is the only component that
//! fetches it. [`UserForm`] drives creation and editing and hands control
//! back to the list view, which refetches after every successful mutation.
//! Deletion goes through a [`Confirmer`] first.

mod confirm;
mod delete;
mod form;
mod list;

pub use confirm::{ConfirmPrompt, Confirmer};
pub use form::{SubmitOutcome, UserForm};
pub use delete::{delete_user, DeleteOutcome};
pub use list::UserListView;

/// Texts shown to the operator
pub mod messages {
    pub const EMPTY_STATE: &str = "No records";
    pub const LOAD_FAILED: &str = "Could not load users";

    pub const CREATE_LOADING: &str = "Registering user...";
    pub const UPDATE_LOADING: &str = "Updating user...";
    pub const DUPLICATE: &str = "A user with this information is already registered";
    pub const UNEXPECTED: &str = "An unexpected error occurred";

    pub const DELETE_LOADING: &str = "Deleting user...";
    pub const DELETE_FAILED: &str = "An error occurred while deleting the user";
    pub const DELETE_WARNING: &str = "This action cannot be undone";

    pub const MISSING_ID: &str = "This record has no identifier and cannot be modified";

    pub fn created(name: &str) -> String {
        format!("User {name} registered")
    }

    pub fn updated(name: &str) -> String {
        format!("User {name} updated")
    }

    pub fn deleted(name: &str) -> String {
        format!("User {name} was deleted")
    }

    pub fn delete_title(name: &str) -> String {
        format!("Delete user {name}?")
    }
}
