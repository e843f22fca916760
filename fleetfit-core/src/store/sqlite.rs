//! SQLite-backed vehicle catalog.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, types::ValueRef};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{CatalogError, VehicleCatalog, VehicleType};

/// Table definition expected by [`SqliteVehicleCatalog`].
///
/// `price_per_day` holds a decimal string so prices survive storage without
/// binary floating-point rounding. Integer and real values are accepted when
/// reading.
pub const VEHICLE_TYPES_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS vehicle_types (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    passenger_capacity INTEGER NOT NULL,
    luggage_capacity INTEGER NOT NULL,
    price_per_day TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1
)";

const SELECT_VEHICLE_TYPES: &str = "SELECT id, name, passenger_capacity, luggage_capacity, \
     price_per_day, active FROM vehicle_types ORDER BY id";

/// Error raised when reading persisted vehicle types.
#[derive(Debug, Error)]
pub enum SqliteVehicleCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database has no `vehicle_types` table.
    #[error("SQLite database at {path} has no vehicle_types table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: PathBuf,
    },
    /// A row could not be converted into a [`VehicleType`].
    #[error("vehicle type row {id} is invalid: {reason}")]
    InvalidRecord {
        /// Raw row identifier.
        id: i64,
        /// What was wrong with the row.
        reason: String,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<SqliteVehicleCatalogError> for CatalogError {
    fn from(err: SqliteVehicleCatalogError) -> Self {
        Self::Unavailable {
            message: err.to_string(),
        }
    }
}

/// Read-only vehicle catalog stored in a SQLite database.
///
/// Every read opens a fresh read-only connection, so the catalog is
/// `Send + Sync` and always observes committed edits made by other writers.
#[derive(Debug, Clone)]
pub struct SqliteVehicleCatalog {
    path: PathBuf,
}

impl SqliteVehicleCatalog {
    /// Open a catalog backed by the database at `path`.
    ///
    /// Fails when the database cannot be opened read-only or lacks the
    /// `vehicle_types` table.
    pub fn open<P>(path: P) -> Result<Self, SqliteVehicleCatalogError>
    where
        P: AsRef<Path>,
    {
        let catalog = Self {
            path: path.as_ref().to_path_buf(),
        };
        let connection = catalog.connect()?;
        let table: Option<i64> = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'vehicle_types'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if table.is_none() {
            return Err(SqliteVehicleCatalogError::MissingTable {
                path: catalog.path.clone(),
            });
        }
        Ok(catalog)
    }

    /// Location of the backing database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every vehicle type row in ascending identifier order.
    pub fn load_vehicle_types(&self) -> Result<Vec<VehicleType>, SqliteVehicleCatalogError> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(SELECT_VEHICLE_TYPES)?;
        let mut rows = statement.query([])?;
        let mut vehicle_types = Vec::new();
        while let Some(row) = rows.next()? {
            vehicle_types.push(vehicle_type_from_row(row)?);
        }
        log::debug!(
            "loaded {} vehicle types from {}",
            vehicle_types.len(),
            self.path.display()
        );
        Ok(vehicle_types)
    }

    fn connect(&self) -> Result<Connection, SqliteVehicleCatalogError> {
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| SqliteVehicleCatalogError::OpenDatabase {
                path: self.path.clone(),
                source,
            },
        )
    }
}

impl VehicleCatalog for SqliteVehicleCatalog {
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
        self.load_vehicle_types().map_err(|err| {
            log::warn!("vehicle catalog read failed: {err}");
            CatalogError::from(err)
        })
    }
}

fn vehicle_type_from_row(row: &Row<'_>) -> Result<VehicleType, SqliteVehicleCatalogError> {
    let raw_id: i64 = row.get(0)?;
    let invalid = |reason: String| SqliteVehicleCatalogError::InvalidRecord { id: raw_id, reason };

    let id = u64::try_from(raw_id).map_err(|_| invalid("identifier is negative".into()))?;
    let name: String = row.get(1)?;
    let passenger_capacity = capacity(row.get(2)?)
        .ok_or_else(|| invalid("passenger capacity is out of range".into()))?;
    let luggage_capacity = capacity(row.get(3)?)
        .ok_or_else(|| invalid("luggage capacity is out of range".into()))?;
    let price_per_day = price(row.get_ref(4)?).map_err(invalid)?;
    let active: bool = row.get(5)?;

    Ok(VehicleType {
        id,
        name,
        passenger_capacity,
        luggage_capacity,
        price_per_day,
        active,
    })
}

fn capacity(raw: i64) -> Option<u32> {
    u32::try_from(raw).ok()
}

fn price(value: ValueRef<'_>) -> Result<Decimal, String> {
    match value {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|err| err.to_string())?;
            Decimal::from_str(text.trim()).map_err(|err| format!("price {text:?}: {err}"))
        }
        ValueRef::Integer(whole) => Ok(Decimal::from(whole)),
        ValueRef::Real(real) => {
            Decimal::try_from(real).map_err(|err| format!("price {real}: {err}"))
        }
        ValueRef::Null | ValueRef::Blob(_) => Err("price is not a number".into()),
    }
}
