//! Dbus abstraction
//! Documentation can be found at https://www.freedesktop.org/wiki/Software/systemd/dbus/
pub mod dbus_proxies;

use std::{thread, time::Duration};

use log::{debug, trace};
use zbus::{blocking::Connection, blocking::fdo, names::BusName, proxy::CacheProperties};
use zvariant::OwnedValue;

use crate::{
    consts::{DESTINATION_SYSTEMD, INTERFACE_PROPERTIES, METHOD_GET},
    data::{DisEnAbleUnitFiles, EnableUnitFilesReturn, UnitPath},
    enums::UnitDBusLevel,
    errors::BusError,
    sysdbus::dbus_proxies::{Systemd1ManagerProxyBlocking, Systemd1UnitProxyBlocking},
    transport::{BusConnector, ManagerObject, SystemdBus, UnitObject},
};

/// Opens a new blocking zbus connection on every [`connect`](BusConnector::connect).
#[derive(Debug, Clone, Copy, Default)]
pub struct ZbusConnector {
    level: UnitDBusLevel,
}

impl ZbusConnector {
    pub fn new(level: UnitDBusLevel) -> Self {
        ZbusConnector { level }
    }

    pub fn level(&self) -> UnitDBusLevel {
        self.level
    }
}

impl BusConnector for ZbusConnector {
    type Bus = ZbusSystemd;

    fn connect(&self) -> Result<ZbusSystemd, BusError> {
        let connection = build_blocking_connection(self.level)?;
        Ok(ZbusSystemd::new(connection))
    }
}

fn build_blocking_connection(level: UnitDBusLevel) -> Result<Connection, BusError> {
    debug!("Getting connection Level {level}");
    let connection_builder = match level {
        UnitDBusLevel::UserSession => zbus::blocking::connection::Builder::session()?,
        UnitDBusLevel::System => zbus::blocking::connection::Builder::system()?,
    };

    let connection = connection_builder
        .auth_mechanism(zbus::AuthMechanism::External)
        .build()?;

    trace!("Connection Sync: {connection:?}");

    Ok(connection)
}

/// systemd reached through one zbus connection.
///
/// The property read drives its own single-threaded tokio runtime, on a
/// scoped thread when the caller already sits inside one.
#[derive(Debug, Clone)]
pub struct ZbusSystemd {
    connection: Connection,
}

impl ZbusSystemd {
    pub fn new(connection: Connection) -> Self {
        ZbusSystemd { connection }
    }
}

impl SystemdBus for ZbusSystemd {
    type Manager = Systemd1ManagerProxyBlocking<'static>;
    type Unit = Systemd1UnitProxyBlocking<'static>;

    fn manager(&self) -> Result<Self::Manager, BusError> {
        let dbus = fdo::DBusProxy::new(&self.connection)?;
        let name = BusName::try_from(DESTINATION_SYSTEMD).map_err(zbus::Error::from)?;

        if !dbus.name_has_owner(name)? {
            return Err(BusError::ServiceUnknown(format!(
                "{DESTINATION_SYSTEMD} has no owner"
            )));
        }

        let manager = Systemd1ManagerProxyBlocking::builder(&self.connection)
            .cache_properties(CacheProperties::No)
            .build()?;

        Ok(manager)
    }

    fn unit(&self, path: &UnitPath) -> Result<Self::Unit, BusError> {
        let unit = Systemd1UnitProxyBlocking::builder(&self.connection)
            .path(path.object_path().clone())?
            .cache_properties(CacheProperties::No)
            .build()?;

        Ok(unit)
    }

    fn get_property(
        &self,
        path: &UnitPath,
        interface: &str,
        property: &str,
        timeout: Duration,
    ) -> Result<OwnedValue, BusError> {
        // A runtime can't be started from a thread already inside one.
        if tokio::runtime::Handle::try_current().is_ok() {
            debug!("Called from a tokio context, reading {property} off thread");
            return thread::scope(|scope| {
                scope
                    .spawn(|| self.get_property_bounded(path, interface, property, timeout))
                    .join()
                    .unwrap_or_else(|_| {
                        Err(BusError::IoError(std::io::Error::other(
                            "property reader thread panicked",
                        )))
                    })
            });
        }

        self.get_property_bounded(path, interface, property, timeout)
    }
}

impl ZbusSystemd {
    fn get_property_bounded(
        &self,
        path: &UnitPath,
        interface: &str,
        property: &str,
        timeout: Duration,
    ) -> Result<OwnedValue, BusError> {
        let connection = self.connection.inner();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        runtime.block_on(async {
            let body = (interface, property);
            let call = connection.call_method(
                Some(DESTINATION_SYSTEMD),
                path.as_str(),
                Some(INTERFACE_PROPERTIES),
                METHOD_GET,
                &body,
            );

            let message = match tokio::time::timeout(timeout, call).await {
                Ok(reply) => reply?,
                Err(_elapsed) => return Err(BusError::Timeout(Some(timeout))),
            };

            let value: OwnedValue = message.body().deserialize()?;
            trace!("{path} {interface}.{property} = {value:?}");
            Ok(value)
        })
    }
}

impl ManagerObject for Systemd1ManagerProxyBlocking<'_> {
    fn get_unit(&self, unit_name: &str) -> Result<UnitPath, BusError> {
        let object_path = Systemd1ManagerProxyBlocking::get_unit(self, unit_name)?;
        Ok(UnitPath::new(object_path))
    }

    fn get_default_target(&self) -> Result<String, BusError> {
        let target = Systemd1ManagerProxyBlocking::get_default_target(self)?;
        Ok(target)
    }

    fn enable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
        force: bool,
    ) -> Result<EnableUnitFilesReturn, BusError> {
        let changes = Systemd1ManagerProxyBlocking::enable_unit_files(self, files, runtime, force)?;
        Ok(changes)
    }

    fn disable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
    ) -> Result<Vec<DisEnAbleUnitFiles>, BusError> {
        let changes = Systemd1ManagerProxyBlocking::disable_unit_files(self, files, runtime)?;
        Ok(changes)
    }
}

impl UnitObject for Systemd1UnitProxyBlocking<'_> {
    fn stop(&self, unit_name: &str, mode: &str) -> Result<String, BusError> {
        debug!("Stop {unit_name} at {} mode {mode}", self.inner().path());
        let job_path = Systemd1UnitProxyBlocking::stop(self, mode)?;
        Ok(job_path.as_str().to_owned())
    }
}
