//! # useradmin
//!
//! Administrative client for a REST users service: list, create, update and
//! delete user records.
//!
//! ## Features
//!
//! - **API client**: one HTTP call per operation, no retries, errors passed through
//! - **Forms**: shared validation schema (required, email format, no `<`/`>`)
//! - **List view**: owns the user collection and refetches after every mutation
//! - **Configuration**: TOML files, `USERADMIN_*` environment, `.env` support
//! - **Tracing**: human or JSON logs on stderr
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use useradmin::prelude::*;
//!
//! struct Silent;
//!
//! impl Notifier for Silent {
//!     fn notify(&self, _notification: Notification) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config.log);
//!
//!     let api = ApiClient::from_config(&config.api)?;
//!     let mut view = UserListView::new(Arc::new(api), Arc::new(Silent));
//!     view.reload().await;
//!
//!     for row in view.rows() {
//!         println!("{} {}", row.id, row.full_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod notify;
pub mod observability;
pub mod validation;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{ApiClient, UserApi, USERS_PATH};
    pub use crate::config::{ApiConfig, Config, LogConfig, LogFormat, UiConfig};
    pub use crate::error::{Error, Result};
    pub use crate::ids::UserId;
    pub use crate::models::{CreatedAt, SavedUser, User, UserInput, UserRow};
    pub use crate::notify::{Notification, Notifier};
    pub use crate::observability::init_tracing;
    pub use crate::validation::{check_field, Field, FieldErrors};
    pub use crate::views::{
        delete_user, messages, ConfirmPrompt, Confirmer, DeleteOutcome, SubmitOutcome, UserForm,
        UserListView,
    };
}
