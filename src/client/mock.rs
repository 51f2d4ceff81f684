//! In-memory systemd that records every call it receives.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::{
    config::ClientConfig,
    consts::ERROR_ACCESS_DENIED,
    data::{DisEnAbleUnitFiles, EnableUnitFilesReturn, UnitPath},
    errors::BusError,
    transport::{BusConnector, ManagerObject, SystemdBus, UnitObject},
    UnitControlClient,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    LocateManager,
    GetUnit(String),
    GetDefaultTarget,
    EnableUnitFiles(Vec<String>, bool, bool),
    DisableUnitFiles(Vec<String>, bool),
    BindUnit(String),
    Stop(String, String),
    GetProperty {
        path: String,
        interface: String,
        property: String,
        timeout: Duration,
    },
}

#[derive(Debug, Clone)]
pub(crate) enum MockValue {
    Str(String),
    U32(u32),
}

impl MockValue {
    fn to_owned_value(&self) -> OwnedValue {
        let value = match self {
            MockValue::Str(s) => Value::from(s.as_str()),
            MockValue::U32(n) => Value::from(*n),
        };
        OwnedValue::try_from(value).expect("plain value")
    }
}

#[derive(Debug, Clone)]
struct MockUnit {
    path: String,
    active_state: MockValue,
    reply_delay: Duration,
}

#[derive(Debug)]
pub(crate) struct MockSystemd {
    bus_down: bool,
    manager_missing: bool,
    deny_get_unit: bool,
    deny_stop: bool,
    default_target: String,
    units: HashMap<String, MockUnit>,
    connects: AtomicUsize,
    calls: Mutex<Vec<Call>>,
}

impl Default for MockSystemd {
    fn default() -> Self {
        MockSystemd {
            bus_down: false,
            manager_missing: false,
            deny_get_unit: false,
            deny_stop: false,
            default_target: "graphical.target".to_owned(),
            units: HashMap::new(),
            connects: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockSystemd {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_unit(self, name: &str, active_state: &str) -> Self {
        self.with_unit_value(name, MockValue::Str(active_state.to_owned()))
    }

    pub(crate) fn with_unit_value(mut self, name: &str, active_state: MockValue) -> Self {
        let unit = MockUnit {
            path: unit_path_for(name),
            active_state,
            reply_delay: Duration::ZERO,
        };
        self.units.insert(name.to_owned(), unit);
        self
    }

    /// Unit whose property endpoint never answers in time.
    pub(crate) fn with_stuck_unit(mut self, name: &str) -> Self {
        let unit = MockUnit {
            path: unit_path_for(name),
            active_state: MockValue::Str("active".to_owned()),
            reply_delay: Duration::from_secs(30),
        };
        self.units.insert(name.to_owned(), unit);
        self
    }

    pub(crate) fn bus_down(mut self) -> Self {
        self.bus_down = true;
        self
    }

    pub(crate) fn manager_missing(mut self) -> Self {
        self.manager_missing = true;
        self
    }

    pub(crate) fn deny_get_unit(mut self) -> Self {
        self.deny_get_unit = true;
        self
    }

    pub(crate) fn deny_stop(mut self) -> Self {
        self.deny_stop = true;
        self
    }

    pub(crate) fn client(
        self,
        config: ClientConfig,
    ) -> (UnitControlClient<MockConnector>, Arc<MockSystemd>) {
        let state = Arc::new(self);
        let connector = MockConnector {
            state: state.clone(),
        };
        (UnitControlClient::with_connector(connector, config), state)
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub(crate) fn path_of(&self, name: &str) -> String {
        unit_path_for(name)
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

fn unit_path_for(name: &str) -> String {
    let mut path = String::from("/org/freedesktop/systemd1/unit/");
    for c in name.bytes() {
        if c.is_ascii_alphanumeric() {
            path.push(c as char);
        } else {
            path.push_str(&format!("_{c:02x}"));
        }
    }
    path
}

#[derive(Debug, Clone)]
pub(crate) struct MockConnector {
    state: Arc<MockSystemd>,
}

impl BusConnector for MockConnector {
    type Bus = MockBus;

    fn connect(&self) -> Result<MockBus, BusError> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        if self.state.bus_down {
            return Err(BusError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "system bus socket refused connection",
            )));
        }
        Ok(MockBus {
            state: self.state.clone(),
        })
    }
}

pub(crate) struct MockBus {
    state: Arc<MockSystemd>,
}

pub(crate) struct MockManager {
    state: Arc<MockSystemd>,
}

pub(crate) struct MockUnitHandle {
    state: Arc<MockSystemd>,
}

impl SystemdBus for MockBus {
    type Manager = MockManager;
    type Unit = MockUnitHandle;

    fn manager(&self) -> Result<MockManager, BusError> {
        self.state.record(Call::LocateManager);
        if self.state.manager_missing {
            return Err(BusError::ServiceUnknown(
                "The name org.freedesktop.systemd1 was not provided by any .service files".into(),
            ));
        }
        Ok(MockManager {
            state: self.state.clone(),
        })
    }

    fn unit(&self, path: &UnitPath) -> Result<MockUnitHandle, BusError> {
        self.state.record(Call::BindUnit(path.as_str().to_owned()));
        Ok(MockUnitHandle {
            state: self.state.clone(),
        })
    }

    fn get_property(
        &self,
        path: &UnitPath,
        interface: &str,
        property: &str,
        timeout: Duration,
    ) -> Result<OwnedValue, BusError> {
        self.state.record(Call::GetProperty {
            path: path.as_str().to_owned(),
            interface: interface.to_owned(),
            property: property.to_owned(),
            timeout,
        });

        let Some(unit) = self.state.units.values().find(|u| u.path == path.as_str()) else {
            return Err(BusError::MethodError(
                "org.freedesktop.DBus.Error.UnknownObject".into(),
                path.to_string(),
            ));
        };

        if unit.reply_delay > timeout {
            thread::sleep(timeout);
            return Err(BusError::Timeout(Some(timeout)));
        }
        thread::sleep(unit.reply_delay);

        Ok(unit.active_state.to_owned_value())
    }
}

impl ManagerObject for MockManager {
    fn get_unit(&self, unit_name: &str) -> Result<UnitPath, BusError> {
        self.state.record(Call::GetUnit(unit_name.to_owned()));

        if self.state.deny_get_unit {
            return Err(BusError::from_method_error(
                ERROR_ACCESS_DENIED,
                Some("Access denied".into()),
            ));
        }

        match self.state.units.get(unit_name) {
            Some(unit) => {
                let path = ObjectPath::try_from(unit.path.clone()).expect("valid path");
                Ok(UnitPath::new(OwnedObjectPath::from(path)))
            }
            None => Err(BusError::NoSuchUnit(format!(
                "Unit {unit_name} not loaded."
            ))),
        }
    }

    fn get_default_target(&self) -> Result<String, BusError> {
        self.state.record(Call::GetDefaultTarget);
        Ok(self.state.default_target.clone())
    }

    fn enable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
        force: bool,
    ) -> Result<EnableUnitFilesReturn, BusError> {
        self.state.record(Call::EnableUnitFiles(
            files.iter().map(|f| f.to_string()).collect(),
            runtime,
            force,
        ));

        let vec = files
            .iter()
            .map(|f| DisEnAbleUnitFiles {
                change_type: "symlink".to_owned(),
                file_name: format!("/run/systemd/system/multi-user.target.wants/{f}"),
                destination: format!("/usr/lib/systemd/system/{f}"),
            })
            .collect();

        Ok(EnableUnitFilesReturn {
            carries_install_info: true,
            vec,
        })
    }

    fn disable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
    ) -> Result<Vec<DisEnAbleUnitFiles>, BusError> {
        self.state.record(Call::DisableUnitFiles(
            files.iter().map(|f| f.to_string()).collect(),
            runtime,
        ));

        Ok(files
            .iter()
            .map(|f| DisEnAbleUnitFiles {
                change_type: "unlink".to_owned(),
                file_name: format!("/run/systemd/system/multi-user.target.wants/{f}"),
                destination: String::new(),
            })
            .collect())
    }
}

impl UnitObject for MockUnitHandle {
    fn stop(&self, unit_name: &str, mode: &str) -> Result<String, BusError> {
        self.state
            .record(Call::Stop(unit_name.to_owned(), mode.to_owned()));
        if self.state.deny_stop {
            return Err(BusError::from_method_error(
                ERROR_ACCESS_DENIED,
                Some("Interactive authentication required.".into()),
            ));
        }
        Ok("/org/freedesktop/systemd1/job/42".to_owned())
    }
}
