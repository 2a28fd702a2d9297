//! Create/edit form for a single book of the library catalogue.
//!
//! [`BookForm`] loads the book being edited, holds the user's [`Draft`] and
//! submits it, reporting every outcome through a [`Notifier`]. The hosting
//! front-end supplies the [`SessionController`] that carries the
//! credentials and signs the user out when the backend rejects them.

pub mod backend;
pub mod classify;
pub mod draft;
pub mod error;
pub mod form;
pub mod notification;
pub mod session;

pub use api_client::{model::BookId, ApiClient};
pub use backend::BookBackend;
pub use draft::{Draft, Field};
pub use form::{BookForm, FormOptions, SubmitOutcome};
pub use notification::{Inbox, Level, Notification, Notifier};
pub use session::{SessionController, TokenSession};
