use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use crate::consts::{
    DESTINATION_SYSTEMD, ERROR_ACCESS_DENIED, ERROR_NAME_HAS_NO_OWNER, ERROR_NO_REPLY,
    ERROR_NO_SUCH_UNIT, ERROR_SERVICE_UNKNOWN, ERROR_TIMEOUT,
};

/// Failure reported by a transport, before the client tells which step it belongs to.
#[derive(Debug)]
pub enum BusError {
    AccessDenied(String),
    NoSuchUnit(String),
    ServiceUnknown(String),
    Timeout(Option<Duration>),
    MethodError(String, String),
    IoError(std::io::Error),
    ZBusError(zbus::Error),
    ZBusFdoError(zbus::fdo::Error),
    ZVariantError(zvariant::Error),
}

impl BusError {
    /// Sorts a D-Bus error reply by its error name.
    pub fn from_method_error(error_name: &str, detail: Option<String>) -> Self {
        let detail = detail.unwrap_or_default();
        match error_name {
            ERROR_NO_SUCH_UNIT => BusError::NoSuchUnit(detail),
            ERROR_ACCESS_DENIED => BusError::AccessDenied(detail),
            ERROR_SERVICE_UNKNOWN | ERROR_NAME_HAS_NO_OWNER => BusError::ServiceUnknown(detail),
            ERROR_NO_REPLY | ERROR_TIMEOUT => BusError::Timeout(None),
            _ => BusError::MethodError(error_name.to_owned(), detail),
        }
    }

    pub fn is_no_such_unit(&self) -> bool {
        matches!(self, BusError::NoSuchUnit(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BusError::Timeout(_))
    }
}

impl Display for BusError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BusError::AccessDenied(detail) => write!(f, "access denied: {detail}"),
            BusError::NoSuchUnit(detail) => write!(f, "no such unit: {detail}"),
            BusError::ServiceUnknown(detail) => write!(f, "service unknown: {detail}"),
            BusError::Timeout(Some(timeout)) => {
                write!(f, "no reply within {} ms", timeout.as_millis())
            }
            BusError::Timeout(None) => write!(f, "no reply"),
            BusError::MethodError(name, detail) => write!(f, "{name}: {detail}"),
            BusError::IoError(e) => write!(f, "{e}"),
            BusError::ZBusError(e) => write!(f, "{e}"),
            BusError::ZBusFdoError(e) => write!(f, "{e}"),
            BusError::ZVariantError(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BusError {}

impl From<zbus::Error> for BusError {
    fn from(error: zbus::Error) -> Self {
        match error {
            zbus::Error::MethodError(owned_error_name, detail, _message) => {
                BusError::from_method_error(owned_error_name.as_str(), detail)
            }
            zbus::Error::FDO(fdo_error) => BusError::from(*fdo_error),
            zbus::Error::InputOutput(io_error) => {
                BusError::IoError(std::io::Error::new(io_error.kind(), io_error.to_string()))
            }
            zbus::Error::Variant(zv_error) => BusError::ZVariantError(zv_error),
            _ => BusError::ZBusError(error),
        }
    }
}

impl From<zbus::fdo::Error> for BusError {
    fn from(error: zbus::fdo::Error) -> Self {
        match error {
            zbus::fdo::Error::ZBus(zb_error) => BusError::from(zb_error),
            zbus::fdo::Error::AccessDenied(detail) => BusError::AccessDenied(detail),
            zbus::fdo::Error::ServiceUnknown(detail)
            | zbus::fdo::Error::NameHasNoOwner(detail) => BusError::ServiceUnknown(detail),
            zbus::fdo::Error::NoReply(_) | zbus::fdo::Error::Timeout(_) => BusError::Timeout(None),
            _ => BusError::ZBusFdoError(error),
        }
    }
}

impl From<zvariant::Error> for BusError {
    fn from(value: zvariant::Error) -> Self {
        BusError::ZVariantError(value)
    }
}

impl From<std::io::Error> for BusError {
    fn from(error: std::io::Error) -> Self {
        BusError::IoError(error)
    }
}

/// Error returned by every [`UnitControlClient`](crate::UnitControlClient) operation.
///
/// The variant tells which step of the call failed; `Display` prefixes the
/// underlying bus error with that step.
#[derive(Debug)]
pub enum SystemdErrors {
    /// An empty unit name was passed; nothing was sent on the bus.
    EmptyUnitName,
    /// The bus connection could not be opened.
    Bus(BusError),
    /// The bus is up but systemd could not be located on it.
    ManagerNotFound(BusError),
    /// The manager does not know the unit (unit name, detail).
    NoSuchUnit(String, String),
    /// A proxy on the unit object path could not be built.
    UnitProxy(String, BusError),
    /// A method call on a resolved object failed (method name, cause).
    RemoteCall(String, BusError),
    /// A property read failed or timed out (property name, cause).
    PropertyRead(String, BusError),
    /// A property value did not carry the expected D-Bus type.
    PropertyType {
        property: String,
        expected: String,
        found: String,
    },
}

impl SystemdErrors {
    pub fn is_no_such_unit(&self) -> bool {
        matches!(self, SystemdErrors::NoSuchUnit(_, _))
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, SystemdErrors::Bus(_))
    }

    /// Cause reported by the transport, if the failure came from the bus.
    pub fn bus_error(&self) -> Option<&BusError> {
        match self {
            SystemdErrors::Bus(e)
            | SystemdErrors::ManagerNotFound(e)
            | SystemdErrors::UnitProxy(_, e)
            | SystemdErrors::RemoteCall(_, e)
            | SystemdErrors::PropertyRead(_, e) => Some(e),
            _ => None,
        }
    }
}

impl Display for SystemdErrors {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SystemdErrors::EmptyUnitName => write!(f, "unit name is empty"),
            SystemdErrors::Bus(e) => write!(f, "failed to get bus: {e}"),
            SystemdErrors::ManagerNotFound(e) => {
                write!(f, "failed to find {DESTINATION_SYSTEMD}: {e}")
            }
            SystemdErrors::NoSuchUnit(unit, detail) => {
                write!(f, "failed to find {unit}: {detail}")
            }
            SystemdErrors::UnitProxy(path, e) => {
                write!(f, "failed to register proxy for {path}: {e}")
            }
            SystemdErrors::RemoteCall(method, e) => write!(f, "{method} failed: {e}"),
            SystemdErrors::PropertyRead(property, e) => {
                write!(f, "failed to get {property}: {e}")
            }
            SystemdErrors::PropertyType {
                property,
                expected,
                found,
            } => write!(
                f,
                "failed to get {property}: expected type '{expected}', found '{found}'"
            ),
        }
    }
}

impl std::error::Error for SystemdErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.bus_error().map(|e| e as _)
    }
}
