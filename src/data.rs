use std::fmt::{self, Display, Formatter};

use serde::Deserialize;
use zvariant::{OwnedObjectPath, Type};

/// Object path of a loaded unit, as handed back by the manager's `GetUnit`.
///
/// Only valid for the call that resolved it: systemd may hand out another
/// path for the same unit after a daemon restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPath(OwnedObjectPath);

impl UnitPath {
    pub fn new(path: OwnedObjectPath) -> Self {
        UnitPath(path)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn object_path(&self) -> &OwnedObjectPath {
        &self.0
    }
}

impl Display for UnitPath {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One symlink change reported by `EnableUnitFiles` / `DisableUnitFiles`.
#[derive(Debug, Clone, PartialEq, Eq, Type, Deserialize)]
pub struct DisEnAbleUnitFiles {
    pub change_type: String,
    pub file_name: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Type, Deserialize)]
pub struct EnableUnitFilesReturn {
    pub carries_install_info: bool,
    pub vec: Vec<DisEnAbleUnitFiles>,
}
