//! Race registration service for the Strides Over Stigma run club.
//!
//! Two thin flows over the registration document store:
//! - the public submission endpoint validates a form, derives the event
//!   fee from a fixed table and appends one document per signup;
//! - the admin endpoints gate a list/delete view behind a configured
//!   password, exchanged server-side for an in-memory session token.

pub mod api;
pub mod config;
pub mod error;
pub mod registrations;
pub mod sessions;

pub use config::Config;
pub use error::ApiError;
pub use registrations::{EventKind, RegistrationForm, ShirtSize};
pub use sessions::AdminSessions;
