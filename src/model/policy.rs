//! Selection policies: how a route variant scores candidate references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The named selection policy a route is optimized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizeFor {
    /// Closest bearing match.
    #[default]
    Shortest,

    /// Favor high objects that stay up longer, so fewer switches are needed.
    LeastChanges,

    /// Only objects at least 20° up; no craning at the horizon.
    Comfortable,
}

impl OptimizeFor {
    /// Stable identifier a route planned under this policy starts with.
    pub fn route_id(self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::LeastChanges => "least_changes",
            Self::Comfortable => "comfortable",
        }
    }

    /// Human label a route planned under this policy starts with.
    pub fn route_label(self) -> &'static str {
        match self {
            Self::Shortest => "Shortest Path",
            Self::LeastChanges => "Fewest Waypoints",
            Self::Comfortable => "Comfortable Route",
        }
    }

    /// Whether routes planned under this policy keep their label when the
    /// orchestrator re-ranks them.
    pub fn keeps_label(self) -> bool {
        matches!(self, Self::Comfortable)
    }
}

impl fmt::Display for OptimizeFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route_id())
    }
}
