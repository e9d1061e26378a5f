//! Error types for route planning and its collaborators.

/// A coordinate that cannot describe a point on Earth.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PositionError {
    #[error("latitude {0} out of range [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} out of range [-180, 180]")]
    Longitude(f64),

    #[error("altitude {0} m out of range [-500, 9000]")]
    Altitude(f64),

    #[error("expected `lat,lon` or `lat,lon,alt`, got '{0}'")]
    Malformed(String),
}

/// Failures of the sky provider: the catalog and ephemeris collaborator.
///
/// These are malfunctions or missing capabilities, never "the sky has
/// nothing to offer here". An empty sky is an empty list, not an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkyError {
    #[error("no ephemeris available for {0}")]
    EphemerisUnavailable(String),

    #[error("unknown celestial object: {0}")]
    UnknownObject(String),
}

/// Why a route could not be planned.
///
/// The first three variants mean the plan is infeasible from the given
/// inputs; callers can recover by changing them. [`NavigationError::Sky`]
/// means the provider failed and is reported as an internal fault.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    #[error("no visible celestial objects available at position ({latitude:.4}, {longitude:.4})")]
    NoVisibleObjects { latitude: f64, longitude: f64 },

    #[error("could not find a suitable celestial reference")]
    NoSuitableReference,

    #[error("exceeded maximum iterations ({0})")]
    MaxIterationsExceeded(u32),

    #[error("sky provider failed: {0}")]
    Sky(#[from] SkyError),
}

impl NavigationError {
    /// True for the planning outcomes a caller can fix by changing inputs.
    pub fn is_infeasible(&self) -> bool {
        !matches!(self, Self::Sky(_))
    }
}

pub type Result<T> = core::result::Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planning_kinds_are_infeasible() {
        let kinds = [
            NavigationError::NoVisibleObjects {
                latitude: 1.0,
                longitude: 2.0,
            },
            NavigationError::NoSuitableReference,
            NavigationError::MaxIterationsExceeded(100),
        ];
        for kind in kinds {
            assert!(kind.is_infeasible(), "{kind}");
        }
    }

    #[test]
    fn sky_failure_is_not_infeasible() {
        let err: NavigationError = SkyError::EphemerisUnavailable("Mars".into()).into();
        assert!(!err.is_infeasible());
        assert_eq!(
            err.to_string(),
            "sky provider failed: no ephemeris available for Mars"
        );
    }

    #[test]
    fn no_visible_objects_message_names_position() {
        let err = NavigationError::NoVisibleObjects {
            latitude: 52.52,
            longitude: 13.405,
        };
        assert_eq!(
            err.to_string(),
            "no visible celestial objects available at position (52.5200, 13.4050)"
        );
    }
}
