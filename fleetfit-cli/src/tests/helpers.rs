//! Test helpers for building CLI workspaces on disk.

use camino::{Utf8Path, Utf8PathBuf};
use fleetfit_core::VehicleType;
use fleetfit_core::test_support::{sample_fleet, write_sqlite_catalog};
use std::fs;
use tempfile::TempDir;

/// Temporary directory with a UTF-8 root path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sedan, SUV and van fleet to `catalog.db` and return its path.
    pub(super) fn sample_catalog(&self) -> Utf8PathBuf {
        self.catalog(&sample_fleet())
    }

    pub(super) fn catalog(&self, vehicle_types: &[VehicleType]) -> Utf8PathBuf {
        let path = self.path("catalog.db");
        write_sqlite_catalog(path.as_std_path(), vehicle_types).expect("write catalog");
        path
    }

    pub(super) fn json<T: serde::Serialize>(&self, name: &str, value: &T) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_string_pretty(value).expect("serialise fixture");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write file");
}
