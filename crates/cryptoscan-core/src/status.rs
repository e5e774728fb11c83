//! Backend system lifecycle status.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend lifecycle state as reported by `/api/system/status`.
///
/// `Restarting` is transient: it is entered optimistically by the
/// control state machine and must resolve to `Running` or `Stopped`
/// once the backend reports back. No other values are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Running,
    Stopped,
    Restarting,
}

impl SystemStatus {
    pub fn is_running(self) -> bool {
        self == SystemStatus::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemStatus::Running => "running",
            SystemStatus::Stopped => "stopped",
            SystemStatus::Restarting => "restarting",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(SystemStatus::Running),
            "stopped" => Ok(SystemStatus::Stopped),
            "restarting" => Ok(SystemStatus::Restarting),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}
