use constcat::concat;

pub const DESTINATION_SYSTEMD: &str = "org.freedesktop.systemd1";

pub const INTERFACE_SYSTEMD_UNIT: &str = concat!(DESTINATION_SYSTEMD, ".Unit");
pub const INTERFACE_PROPERTIES: &str = "org.freedesktop.DBus.Properties";

pub const METHOD_GET: &str = "Get";
pub const METHOD_GET_UNIT: &str = "GetUnit";
pub const METHOD_GET_DEFAULT_TARGET: &str = "GetDefaultTarget";
pub const METHOD_STOP: &str = "Stop";
pub const METHOD_ENABLE_UNIT_FILES: &str = "EnableUnitFiles";
pub const METHOD_DISABLE_UNIT_FILES: &str = "DisableUnitFiles";

pub const PROPERTY_ACTIVE_STATE: &str = "ActiveState";

/// Job mode of the stop call: replace conflicting queued jobs.
pub const STOP_MODE: &str = "replace";

pub const ERROR_NO_SUCH_UNIT: &str = concat!(DESTINATION_SYSTEMD, ".NoSuchUnit");
pub const ERROR_ACCESS_DENIED: &str = "org.freedesktop.DBus.Error.AccessDenied";
pub const ERROR_SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";
pub const ERROR_NAME_HAS_NO_OWNER: &str = "org.freedesktop.DBus.Error.NameHasNoOwner";
pub const ERROR_NO_REPLY: &str = "org.freedesktop.DBus.Error.NoReply";
pub const ERROR_TIMEOUT: &str = "org.freedesktop.DBus.Error.Timeout";

/// Bound applied to the `ActiveState` property read.
pub const DEFAULT_PROPERTY_TIMEOUT_MS: u64 = 1500;

/// `EnableUnitFiles` runtime flag: link under /run instead of /etc.
pub const ENABLE_RUNTIME: bool = true;
/// `EnableUnitFiles` force flag: replace conflicting symlinks.
pub const ENABLE_FORCE: bool = true;
/// `DisableUnitFiles` runtime flag.
pub const DISABLE_RUNTIME: bool = true;

pub const ENV_BUS_LEVEL: &str = "SYSD_UNITCTL_BUS";
pub const ENV_PROPERTY_TIMEOUT_MS: &str = "SYSD_UNITCTL_PROPERTY_TIMEOUT_MS";
