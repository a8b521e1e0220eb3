//! Console client for the race registration service.
//!
//! A thin HTTP client plus the two in-memory view states the site's
//! pages carried: the public registration form (validate, submit,
//! reset, transient success notice) and the admin view (password gate,
//! registration list, optimistic per-row delete).

pub mod client;
pub mod display;
pub mod error;
pub mod form;
pub mod session;

pub use client::{RegistrationApiClient, RegistrationRow, RegistrationSubmission};
pub use error::ConsoleError;
pub use form::RegistrationFormState;
pub use session::AdminSession;
