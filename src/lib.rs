//! # Canteen Portal
//!
//! Client core for the campus canteen management portal. Students file
//! complaints, submit feedback and browse canteens; administrators manage
//! canteens, announcements, committee members, complaints, feedback
//! questions and monthly reports. All of it lives behind an external REST
//! backend, which this crate talks to.
//!
//! ## Architecture
//! - `session`: who is logged in, persisted across restarts and observable
//!   through a watch channel
//! - `api`: one async function per backend operation, bearer-token
//!   injection and response normalization
//! - `models`: wire types for canteens, complaints, feedback, announcements,
//!   committee members and reports
//! - `view_state`: stale-response guards, local-patch-then-reconcile lists
//!   and flagged placeholder data
//! - `context`: the object bundling all of the above for a view tree
//!
//! ## Environment Setup
//! ```bash
//! export CANTEEN_API_BASE_URL=https://canteen.example.edu
//! export CANTEEN_SESSION_FILE=~/.canteen-session.json
//! ```
//!
//! ## Usage
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use canteen_portal::{Config, Credentials, PortalContext};
//!
//! let ctx = PortalContext::with_file_storage(Config::from_env()?)?;
//! ctx.initialize().await;
//! ctx.login(&Credentials::new("asha@campus.edu", "secret")).await?;
//! let canteens = ctx.canteens().list_public().await?;
//! # let _ = canteens;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod session;
pub mod telemetry;
pub mod view_state;

pub use auth::{Credentials, RegisterRequest, Session, SessionUser};
pub use config::Config;
pub use context::PortalContext;
pub use error::{ApiError, ApiResult};
pub use session::{SessionSnapshot, SessionStore};
