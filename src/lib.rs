//! Synchronous control of systemd units over D-Bus.
//!
//! ```no_run
//! use sysd_unitctl::UnitControlClient;
//!
//! let client = UnitControlClient::system();
//! if client.unit_exists("fwupd.service")? {
//!     println!("{}", client.get_unit_state("fwupd.service")?);
//! }
//! # Ok::<(), sysd_unitctl::SystemdErrors>(())
//! ```

pub mod client;
pub mod config;
pub mod consts;
pub mod data;
pub mod enums;
pub mod errors;
pub mod sysdbus;
pub mod transport;

pub use client::UnitControlClient;
pub use config::ClientConfig;
pub use data::UnitPath;
pub use enums::{ActiveState, UnitDBusLevel};
pub use errors::{BusError, SystemdErrors};
pub use sysdbus::{ZbusConnector, ZbusSystemd};
pub use transport::{BusConnector, ManagerObject, SystemdBus, UnitObject};
