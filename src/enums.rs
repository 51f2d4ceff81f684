use std::fmt::{self, Display, Formatter};

use log::warn;
use strum::EnumIter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, EnumIter, Hash)]
pub enum UnitDBusLevel {
    #[default]
    System,
    UserSession,
}

impl UnitDBusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitDBusLevel::System => "system",
            UnitDBusLevel::UserSession => "user",
        }
    }

    pub fn short(&self) -> &str {
        match self {
            UnitDBusLevel::System => "s",
            UnitDBusLevel::UserSession => "u",
        }
    }
}

impl Display for UnitDBusLevel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UnitDBusLevel {
    fn from(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "user" | "session" | "u" => UnitDBusLevel::UserSession,
            "system" | "s" => UnitDBusLevel::System,
            _ => {
                warn!("Unit dbus Level not found {level:?}");
                UnitDBusLevel::default()
            }
        }
    }
}

/// Value of the `ActiveState` property of a unit.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, EnumIter, Hash)]
pub enum ActiveState {
    #[default]
    Unknown,
    Active,
    Activating,
    Reloading,
    Inactive,
    Failed,
    Deactivating,
    Maintenance,
    Refreshing,
}

impl ActiveState {
    pub fn as_str(&self) -> &str {
        match self {
            ActiveState::Unknown => "unknown",
            ActiveState::Active => "active",
            ActiveState::Reloading => "reloading",
            ActiveState::Inactive => "inactive",
            ActiveState::Failed => "failed",
            ActiveState::Activating => "activating",
            ActiveState::Deactivating => "deactivating",
            ActiveState::Maintenance => "maintenance",
            ActiveState::Refreshing => "refreshing",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ActiveState::Active | ActiveState::Reloading | ActiveState::Refreshing
        )
    }

    pub fn is_inactive(&self) -> bool {
        matches!(
            self,
            ActiveState::Inactive | ActiveState::Deactivating | ActiveState::Unknown
        )
    }
}

impl Display for ActiveState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ActiveState {
    fn from(value: &str) -> Self {
        match value {
            "active" => ActiveState::Active,
            "reloading" => ActiveState::Reloading,
            "inactive" => ActiveState::Inactive,
            "failed" => ActiveState::Failed,
            "activating" => ActiveState::Activating,
            "deactivating" => ActiveState::Deactivating,
            "maintenance" => ActiveState::Maintenance,
            "refreshing" => ActiveState::Refreshing,
            _ => {
                warn!("Unknown active state {value:?}");
                ActiveState::Unknown
            }
        }
    }
}
