//! In-memory catalogs and fixtures used by unit and behaviour tests.

use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;

use crate::{CatalogError, VehicleCatalog, VehicleType, VehicleTypeId};

/// Mutable in-memory [`VehicleCatalog`].
///
/// Records are returned exactly as stored, including inactive or invalid
/// ones, so tests can exercise snapshot validation.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    vehicle_types: RwLock<Vec<VehicleType>>,
}

impl MemoryCatalog {
    /// Create a catalog holding `vehicle_types`.
    pub fn with_vehicle_types<I>(vehicle_types: I) -> Self
    where
        I: IntoIterator<Item = VehicleType>,
    {
        Self {
            vehicle_types: RwLock::new(vehicle_types.into_iter().collect()),
        }
    }

    /// Flip the active flag of every record with identifier `id`.
    pub fn set_active(&self, id: VehicleTypeId, active: bool) {
        let mut records = self
            .vehicle_types
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for record in records.iter_mut().filter(|record| record.id == id) {
            record.active = active;
        }
    }

    /// Replace the record sharing `vehicle_type.id`, or append it.
    pub fn replace(&self, vehicle_type: VehicleType) {
        let mut records = self
            .vehicle_types
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match records.iter_mut().find(|record| record.id == vehicle_type.id) {
            Some(record) => *record = vehicle_type,
            None => records.push(vehicle_type),
        }
    }
}

impl VehicleCatalog for MemoryCatalog {
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
        Ok(self
            .vehicle_types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

/// Catalog whose reads always fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCatalog;

impl VehicleCatalog for FailingCatalog {
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
        Err(CatalogError::Unavailable {
            message: "catalog offline".into(),
        })
    }
}

fn vehicle(
    id: VehicleTypeId,
    name: &str,
    passenger_capacity: u32,
    luggage_capacity: u32,
    price_per_day: i64,
) -> VehicleType {
    VehicleType {
        id,
        name: name.into(),
        passenger_capacity,
        luggage_capacity,
        price_per_day: Decimal::from(price_per_day),
        active: true,
    }
}

/// Four-seat sedan at 1000 per day, identifier 1.
pub fn sedan() -> VehicleType {
    vehicle(1, "Sedan", 4, 2, 1000)
}

/// Seven-seat SUV at 1500 per day, identifier 2.
pub fn suv() -> VehicleType {
    vehicle(2, "SUV", 7, 4, 1500)
}

/// Twelve-seat van at 2500 per day, identifier 3.
pub fn van() -> VehicleType {
    vehicle(3, "Van", 12, 10, 2500)
}

/// Sedan, SUV and van, all active.
pub fn sample_fleet() -> Vec<VehicleType> {
    vec![sedan(), suv(), van()]
}

/// Persist `vehicle_types` into a fresh SQLite database at `path`.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    vehicle_types: &[VehicleType],
) -> Result<(), rusqlite::Error> {
    use rusqlite::params;

    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute(crate::store::VEHICLE_TYPES_SCHEMA, [])?;
    let transaction = connection.transaction()?;
    {
        let mut insert = transaction.prepare(
            "INSERT INTO vehicle_types \
             (id, name, passenger_capacity, luggage_capacity, price_per_day, active) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for vehicle_type in vehicle_types {
            let id = i64::try_from(vehicle_type.id)
                .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
            insert.execute(params![
                id,
                vehicle_type.name,
                vehicle_type.passenger_capacity,
                vehicle_type.luggage_capacity,
                vehicle_type.price_per_day.to_string(),
                vehicle_type.active,
            ])?;
        }
    }
    transaction.commit()
}
