//! Unit control over the systemd manager.
//!
//! Every operation opens its own connection, resolves what it needs and drops
//! everything before returning: nothing is shared between calls.

#[cfg(test)]
pub(crate) mod mock;

use log::{debug, info, warn};

use crate::{
    config::ClientConfig,
    consts::{
        DISABLE_RUNTIME, ENABLE_FORCE, ENABLE_RUNTIME, INTERFACE_SYSTEMD_UNIT,
        METHOD_DISABLE_UNIT_FILES, METHOD_ENABLE_UNIT_FILES, METHOD_GET_DEFAULT_TARGET,
        METHOD_GET_UNIT, METHOD_STOP, PROPERTY_ACTIVE_STATE, STOP_MODE,
    },
    data::UnitPath,
    enums::ActiveState,
    errors::{BusError, SystemdErrors},
    sysdbus::ZbusConnector,
    transport::{BusConnector, ManagerObject, SystemdBus, UnitObject},
};

pub struct UnitControlClient<C = ZbusConnector> {
    connector: C,
    config: ClientConfig,
}

impl UnitControlClient<ZbusConnector> {
    /// Client on the system bus with default settings.
    pub fn system() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        UnitControlClient {
            connector: ZbusConnector::new(config.level),
            config,
        }
    }
}

impl<C: BusConnector> UnitControlClient<C> {
    pub fn with_connector(connector: C, config: ClientConfig) -> Self {
        UnitControlClient { connector, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Name of the unit systemd boots into, e.g. `graphical.target`.
    pub fn get_default_target(&self) -> Result<String, SystemdErrors> {
        let bus = self.open()?;
        let manager = locate_manager(&bus)?;

        let target = manager
            .get_default_target()
            .map_err(|e| SystemdErrors::RemoteCall(METHOD_GET_DEFAULT_TARGET.to_owned(), e))?;

        debug!("Default target {target}");
        Ok(target)
    }

    /// Queues a stop job in `replace` mode.
    ///
    /// Returns once systemd accepted the job, not once the unit is stopped.
    pub fn stop_unit(&self, unit_name: &str) -> Result<(), SystemdErrors> {
        check_unit_name(unit_name)?;

        let bus = self.open()?;
        let manager = locate_manager(&bus)?;
        let unit = bind_unit(&bus, &manager, unit_name)?;

        let job = unit
            .stop(unit_name, STOP_MODE)
            .map_err(|e| SystemdErrors::RemoteCall(METHOD_STOP.to_owned(), e))?;

        info!("{METHOD_STOP} {unit_name} SUCCESS, response job id {job}");
        Ok(())
    }

    /// Raw `ActiveState` of the unit ("active", "inactive", "failed", ...).
    ///
    /// The property read is bounded by [`ClientConfig::property_timeout`].
    pub fn get_unit_state(&self, unit_name: &str) -> Result<String, SystemdErrors> {
        check_unit_name(unit_name)?;

        let bus = self.open()?;
        let manager = locate_manager(&bus)?;
        let path = resolve_unit_path(&manager, unit_name)?;

        let value = bus
            .get_property(
                &path,
                INTERFACE_SYSTEMD_UNIT,
                PROPERTY_ACTIVE_STATE,
                self.config.property_timeout,
            )
            .map_err(|e| SystemdErrors::PropertyRead(PROPERTY_ACTIVE_STATE.to_owned(), e))?;

        let found = value.value_signature().to_string();
        let state = String::try_from(value).map_err(|_| SystemdErrors::PropertyType {
            property: PROPERTY_ACTIVE_STATE.to_owned(),
            expected: "s".to_owned(),
            found,
        })?;

        debug!("{unit_name} {PROPERTY_ACTIVE_STATE} {state}");
        Ok(state)
    }

    pub fn unit_active_state(&self, unit_name: &str) -> Result<ActiveState, SystemdErrors> {
        let state = self.get_unit_state(unit_name)?;
        Ok(ActiveState::from(state.as_str()))
    }

    /// Enables the unit file at runtime, overwriting conflicting links.
    pub fn enable_unit(&self, unit_name: &str) -> Result<(), SystemdErrors> {
        check_unit_name(unit_name)?;

        let bus = self.open()?;
        let manager = locate_manager(&bus)?;

        let changes = manager
            .enable_unit_files(&[unit_name], ENABLE_RUNTIME, ENABLE_FORCE)
            .map_err(|e| SystemdErrors::RemoteCall(METHOD_ENABLE_UNIT_FILES.to_owned(), e))?;

        debug!("{METHOD_ENABLE_UNIT_FILES} {unit_name} {changes:?}");
        Ok(())
    }

    pub fn disable_unit(&self, unit_name: &str) -> Result<(), SystemdErrors> {
        check_unit_name(unit_name)?;

        let bus = self.open()?;
        let manager = locate_manager(&bus)?;

        let changes = manager
            .disable_unit_files(&[unit_name], DISABLE_RUNTIME)
            .map_err(|e| SystemdErrors::RemoteCall(METHOD_DISABLE_UNIT_FILES.to_owned(), e))?;

        debug!("{METHOD_DISABLE_UNIT_FILES} {unit_name} {changes:?}");
        Ok(())
    }

    /// `false` when the manager answers `NoSuchUnit`, any other failure is an error.
    pub fn unit_exists(&self, unit_name: &str) -> Result<bool, SystemdErrors> {
        check_unit_name(unit_name)?;

        let bus = self.open()?;
        let manager = locate_manager(&bus)?;

        match resolve_unit_path(&manager, unit_name) {
            Ok(_path) => Ok(true),
            Err(SystemdErrors::NoSuchUnit(_, detail)) => {
                debug!("{unit_name} not found: {detail}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn open(&self) -> Result<C::Bus, SystemdErrors> {
        self.connector.connect().map_err(|e| {
            warn!("Bus {} unreachable: {e}", self.config.level);
            SystemdErrors::Bus(e)
        })
    }
}

fn check_unit_name(unit_name: &str) -> Result<(), SystemdErrors> {
    if unit_name.is_empty() {
        return Err(SystemdErrors::EmptyUnitName);
    }
    Ok(())
}

fn locate_manager<B: SystemdBus>(bus: &B) -> Result<B::Manager, SystemdErrors> {
    bus.manager().map_err(SystemdErrors::ManagerNotFound)
}

fn resolve_unit_path<M: ManagerObject>(
    manager: &M,
    unit_name: &str,
) -> Result<UnitPath, SystemdErrors> {
    manager.get_unit(unit_name).map_err(|e| match e {
        BusError::NoSuchUnit(detail) => SystemdErrors::NoSuchUnit(unit_name.to_owned(), detail),
        e => SystemdErrors::RemoteCall(METHOD_GET_UNIT.to_owned(), e),
    })
}

fn bind_unit<B: SystemdBus>(
    bus: &B,
    manager: &B::Manager,
    unit_name: &str,
) -> Result<B::Unit, SystemdErrors> {
    let path = resolve_unit_path(manager, unit_name)?;
    bus.unit(&path)
        .map_err(|e| SystemdErrors::UnitProxy(path.to_string(), e))
}
