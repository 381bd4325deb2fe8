use serde::{Deserialize, Serialize};
use std::fmt;

/// Container state definitions.
///
/// A container cycles between `Empty` and `Full` for its whole service life;
/// there is no terminal state. Deletion is a storage concern gated on the
/// container holding no open fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerState {
    /// Container holds no product and can accept a fill.
    Empty,
    /// Container holds an open fill.
    Full,
}

impl ContainerState {
    /// Check if the container can accept a fill.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check if the container holds an open fill.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Full => write!(f, "full"),
        }
    }
}

impl std::str::FromStr for ContainerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(Self::Empty),
            "full" => Ok(Self::Full),
            _ => Err(format!("Invalid container state: {s}")),
        }
    }
}

/// New containers start empty.
impl Default for ContainerState {
    fn default() -> Self {
        Self::Empty
    }
}
