use zbus::proxy;
use zvariant::OwnedObjectPath;

use crate::data::{DisEnAbleUnitFiles, EnableUnitFilesReturn};

#[proxy(
    default_service = "org.freedesktop.systemd1",
    default_path = "/org/freedesktop/systemd1",
    interface = "org.freedesktop.systemd1.Manager"
)]
pub trait Systemd1Manager {
    fn get_unit(&self, name: &str) -> zbus::Result<OwnedObjectPath>;

    fn get_default_target(&self) -> zbus::Result<String>;

    #[zbus(allow_interactive_auth)]
    fn enable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
        force: bool,
    ) -> zbus::Result<EnableUnitFilesReturn>;

    #[zbus(allow_interactive_auth)]
    fn disable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
    ) -> zbus::Result<Vec<DisEnAbleUnitFiles>>;
}

#[proxy(
    interface = "org.freedesktop.systemd1.Unit",
    default_service = "org.freedesktop.systemd1"
)]
pub trait Systemd1Unit {
    ///Returns the queued job object path
    #[zbus(allow_interactive_auth)]
    fn stop(&self, mode: &str) -> zbus::Result<OwnedObjectPath>;
}
