//! Backend availability as observed by the session's single probe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state liveness signal, set at most once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionAvailability {
    /// The probe has not resolved yet.
    #[default]
    Unknown,
    /// The probe reached the backend.
    Available,
    /// The probe failed; submissions go through the delayed path.
    Unavailable,
}

impl SessionAvailability {
    pub fn from_probe(reachable: bool) -> Self {
        if reachable {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether submissions should take the warm-up path.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

impl fmt::Display for SessionAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_is_degraded() {
        assert!(!SessionAvailability::Unknown.is_degraded());
        assert!(!SessionAvailability::Available.is_degraded());
        assert!(SessionAvailability::Unavailable.is_degraded());
        assert_eq!(SessionAvailability::from_probe(false), SessionAvailability::Unavailable);
    }
}
