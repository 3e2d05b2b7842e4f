use tracing::warn;

use crate::error::{ApiError, ApiResult};

/// Data for a view, flagged when it is placeholder content
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Live(T),
    Degraded { data: T, reason: String },
}

impl<T> Loaded<T> {
    /// Keep a successful result live; substitute `fallback` for a failed one.
    ///
    /// Unauthorized errors are returned instead of masked, so callers can
    /// still tear the session down.
    pub fn or_fallback(result: ApiResult<T>, fallback: impl FnOnce() -> T) -> ApiResult<Self> {
        match result {
            Ok(data) => Ok(Loaded::Live(data)),
            Err(e @ ApiError::Unauthorized { .. }) => Err(e),
            Err(e) => {
                warn!("Serving placeholder data after failed fetch: {}", e);
                Ok(Loaded::Degraded {
                    data: fallback(),
                    reason: e.user_message(),
                })
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Loaded::Degraded { .. })
    }

    pub fn data(&self) -> &T {
        match self {
            Loaded::Live(data) | Loaded::Degraded { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Loaded::Live(data) | Loaded::Degraded { data, .. } => data,
        }
    }
}
