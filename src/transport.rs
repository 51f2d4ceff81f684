//! Seam between [`UnitControlClient`](crate::UnitControlClient) and the bus.
//!
//! A [`BusConnector`] opens one connection per client call. Everything
//! obtained from that connection (manager, unit proxies) is dropped when the
//! call returns.

use std::time::Duration;

use zvariant::OwnedValue;

use crate::{
    data::{DisEnAbleUnitFiles, EnableUnitFilesReturn, UnitPath},
    errors::BusError,
};

pub trait BusConnector {
    type Bus: SystemdBus;

    fn connect(&self) -> Result<Self::Bus, BusError>;
}

/// An open connection to a bus hosting systemd.
pub trait SystemdBus {
    type Manager: ManagerObject;
    type Unit: UnitObject;

    /// Locates the systemd manager object on this connection.
    fn manager(&self) -> Result<Self::Manager, BusError>;

    /// Binds to the unit object at `path`.
    fn unit(&self, path: &UnitPath) -> Result<Self::Unit, BusError>;

    /// `org.freedesktop.DBus.Properties.Get` on `path`, failing with
    /// [`BusError::Timeout`] if no reply arrives within `timeout`.
    fn get_property(
        &self,
        path: &UnitPath,
        interface: &str,
        property: &str,
        timeout: Duration,
    ) -> Result<OwnedValue, BusError>;
}

pub trait ManagerObject {
    fn get_unit(&self, unit_name: &str) -> Result<UnitPath, BusError>;

    fn get_default_target(&self) -> Result<String, BusError>;

    fn enable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
        force: bool,
    ) -> Result<EnableUnitFilesReturn, BusError>;

    fn disable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
    ) -> Result<Vec<DisEnAbleUnitFiles>, BusError>;
}

pub trait UnitObject {
    /// Queues a stop job, returns the job object path.
    fn stop(&self, unit_name: &str, mode: &str) -> Result<String, BusError>;
}
