use std::{env, time::Duration};

use log::{debug, warn};

use crate::{
    consts::{DEFAULT_PROPERTY_TIMEOUT_MS, ENV_BUS_LEVEL, ENV_PROPERTY_TIMEOUT_MS},
    enums::UnitDBusLevel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bus the client connects to.
    pub level: UnitDBusLevel,
    /// Bound on the `ActiveState` read. Every other call waits for its reply.
    pub property_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            level: UnitDBusLevel::System,
            property_timeout: Duration::from_millis(DEFAULT_PROPERTY_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Reads `SYSD_UNITCTL_BUS` and `SYSD_UNITCTL_PROPERTY_TIMEOUT_MS`.
    /// Unset or invalid values keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ClientConfig::default();

        if let Some(level) = lookup(ENV_BUS_LEVEL) {
            config.level = UnitDBusLevel::from(level.as_str());
        }

        if let Some(timeout) = lookup(ENV_PROPERTY_TIMEOUT_MS) {
            match timeout.trim().parse::<u64>() {
                Ok(0) => warn!("{ENV_PROPERTY_TIMEOUT_MS} can't be 0, keep default"),
                Ok(ms) => config.property_timeout = Duration::from_millis(ms),
                Err(e) => warn!("{ENV_PROPERTY_TIMEOUT_MS} {timeout:?} invalid: {e}"),
            }
        }

        debug!("Client config {config:?}");
        config
    }

    pub fn with_level(mut self, level: UnitDBusLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_property_timeout(mut self, timeout: Duration) -> Self {
        self.property_timeout = timeout;
        self
    }
}
