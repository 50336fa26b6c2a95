//! lg-core: Shared types and utilities for the Lucky Games widgets
//!
//! Both spin engines build on this crate: the ease-out curve they share, the
//! frame clock that feeds them timestamps, the common error type, and the
//! image resolution step that turns optional image references into
//! drawable faces.

mod easing;
mod error;
mod faces;
mod time;

pub use easing::*;
pub use error::*;
pub use faces::*;
pub use time::*;

/// Full circle in degrees
pub const FULL_TURN_DEG: f64 = 360.0;

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Check that every id in a container is unique
pub fn ensure_unique_ids<'a, I>(ids: I) -> LgResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(LgError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deg_to_rad() {
        assert_relative_eq!(deg_to_rad(180.0), std::f64::consts::PI);
        assert_relative_eq!(deg_to_rad(1440.0), 8.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_unique_ids() {
        assert!(ensure_unique_ids(["1", "2", "3"]).is_ok());
        assert!(matches!(
            ensure_unique_ids(["1", "2", "1"]),
            Err(LgError::DuplicateId(id)) if id == "1"
        ));
    }
}
