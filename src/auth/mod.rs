//! # Authentication Module
//!
//! Session identity types, login/registration payloads, and bearer token
//! inspection used by the session store.

pub mod jwt;
pub mod models;

pub use models::{Credentials, OtpRequest, OtpVerification, RegisterRequest, Session, SessionUser};
