//! Authorization window resolution.

use time::{Duration, OffsetDateTime};

use crate::delegation::DurationType;
use crate::error::ValidationError;

impl DurationType {
    /// Length of a fixed window, or `None` for `custom`.
    pub fn fixed_length(self) -> Option<Duration> {
        match self {
            DurationType::Hours24 => Some(Duration::hours(24)),
            DurationType::Days7 => Some(Duration::days(7)),
            DurationType::Custom => None,
        }
    }
}

/// Compute the end of the authorization window.
///
/// An explicit end always wins and must lie after `start`. Without one, fixed
/// durations are added to `start`; `custom` has no default and is rejected.
pub fn resolve_end(
    duration: DurationType,
    start: OffsetDateTime,
    explicit_end: Option<OffsetDateTime>,
) -> Result<OffsetDateTime, ValidationError> {
    let end = match (explicit_end, duration.fixed_length()) {
        (Some(end), _) => end,
        (None, Some(length)) => start
            .checked_add(length)
            .ok_or(ValidationError::WindowOverflow)?,
        (None, None) => return Err(ValidationError::CustomWithoutEnd),
    };
    if end <= start {
        return Err(ValidationError::EndNotAfterStart {
            start_at: start,
            end_at: end,
        });
    }
    Ok(end)
}
