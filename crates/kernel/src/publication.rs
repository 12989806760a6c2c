//! Publication gating.
//!
//! The draft/active state machine and the per-caller visibility policy.
//! Three channels read a tenant record: the owner's dashboard, the
//! anonymous public page, and the authorized preview. Only the public
//! channel is gated on status; preview bypasses the gate but never
//! fabricates nonexistent tenants.

use crate::error::{AppError, AppResult};
use crate::models::restaurant::{RestaurantRecord, RestaurantStatus};

/// Caller channel requesting a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadChannel {
    /// Authenticated owner; sees the record regardless of status.
    Dashboard,
    /// Anonymous reader; Active records only.
    Public,
    /// Authorized preview; bypasses the status check.
    Preview,
}

impl std::fmt::Display for ReadChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadChannel::Dashboard => write!(f, "dashboard"),
            ReadChannel::Public => write!(f, "public"),
            ReadChannel::Preview => write!(f, "preview"),
        }
    }
}

/// Apply the visibility policy for one channel to a looked-up record.
///
/// `None` means the slug does not exist: every channel gets
/// `RestaurantNotFound`. A Draft record is `MenuUnavailable` on the public
/// channel and passes through on the others.
pub fn check_visibility(
    record: Option<RestaurantRecord>,
    channel: ReadChannel,
) -> AppResult<RestaurantRecord> {
    let Some(record) = record else {
        return Err(AppError::RestaurantNotFound);
    };

    if channel == ReadChannel::Public && !record.status.is_active() {
        return Err(AppError::MenuUnavailable);
    }

    Ok(record)
}

/// Apply a status transition.
///
/// `activate` (Draft→Active) and `deactivate` (Active→Draft) are the only
/// transitions; requesting the current status is an idempotent no-op and
/// returns `None` so callers can skip the write.
pub fn transition(
    current: RestaurantStatus,
    target: RestaurantStatus,
) -> Option<RestaurantStatus> {
    if current == target { None } else { Some(target) }
}
