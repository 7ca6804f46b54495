//! Business logic services for the web front-end.
//!
//! # Services
//!
//! - `session` - Authentication session lifecycle (login, register, logout,
//!   token hydration)

pub mod session;

pub use session::{SessionError, SessionService};
