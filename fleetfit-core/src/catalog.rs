//! Read-only access to the vehicle catalog.
//!
//! The [`VehicleCatalog`] trait is the engine's only view of stored vehicle
//! types. Every optimisation works on a [`CatalogSnapshot`] taken once at the
//! start of the call, so concurrent catalog edits never leak into a running
//! search.

use std::{collections::HashSet, sync::Arc};

use thiserror::Error;

use crate::{VehicleType, VehicleTypeError, VehicleTypeId};

/// Errors raised while reading the catalog or building a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two records share the same identifier.
    #[error("vehicle type {id} appears more than once in the catalog")]
    DuplicateVehicleType {
        /// The repeated identifier.
        id: VehicleTypeId,
    },
    /// An active record violates the vehicle type invariants.
    #[error("vehicle type {id} is invalid: {source}")]
    InvalidVehicleType {
        /// Identifier of the offending record.
        id: VehicleTypeId,
        /// Validation failure.
        #[source]
        source: VehicleTypeError,
    },
    /// The backing store could not be read.
    #[error("vehicle catalog is unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },
}

/// Read-only source of vehicle types.
///
/// Implementations must be `Send + Sync` so a single catalog can serve
/// concurrent optimisation calls.
///
/// # Examples
///
/// ```rust
/// use rust_decimal::Decimal;
/// use fleetfit_core::{CatalogError, VehicleCatalog, VehicleType};
///
/// struct FixedCatalog(Vec<VehicleType>);
///
/// impl VehicleCatalog for FixedCatalog {
///     fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let sedan = VehicleType::new(1, "Sedan", 4, 2, Decimal::new(1000, 0)).unwrap();
/// let van = VehicleType::new(3, "Van", 12, 10, Decimal::new(2500, 0))
///     .unwrap()
///     .with_active(false);
/// let catalog = FixedCatalog(vec![van, sedan]);
///
/// let snapshot = catalog.snapshot().unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
pub trait VehicleCatalog: Send + Sync {
    /// Return every stored vehicle type, active or not.
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError>;

    /// Capture the active vehicle types for one optimisation call.
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        CatalogSnapshot::from_vehicle_types(self.vehicle_types()?)
    }
}

impl<T> VehicleCatalog for &T
where
    T: VehicleCatalog + ?Sized,
{
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
        (**self).vehicle_types()
    }
}

impl<T> VehicleCatalog for Arc<T>
where
    T: VehicleCatalog + ?Sized,
{
    fn vehicle_types(&self) -> Result<Vec<VehicleType>, CatalogError> {
        (**self).vehicle_types()
    }
}

/// Immutable set of active vehicle types ordered by ascending identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    vehicle_types: Vec<VehicleType>,
}

impl CatalogSnapshot {
    /// Build a snapshot from raw catalog records.
    ///
    /// Inactive records are dropped. Identifiers must be unique across all
    /// records and every active record must pass [`VehicleType::validate`].
    pub fn from_vehicle_types<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = VehicleType>,
    {
        let mut seen = HashSet::new();
        let mut vehicle_types = Vec::new();
        for record in records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateVehicleType { id: record.id });
            }
            if !record.active {
                continue;
            }
            record
                .validate()
                .map_err(|source| CatalogError::InvalidVehicleType {
                    id: record.id,
                    source,
                })?;
            vehicle_types.push(record);
        }
        vehicle_types.sort_unstable_by_key(|vehicle_type| vehicle_type.id);
        Ok(Self { vehicle_types })
    }

    /// Active vehicle types in ascending identifier order.
    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    /// Look up an active vehicle type by identifier.
    pub fn get(&self, id: VehicleTypeId) -> Option<&VehicleType> {
        self.vehicle_types
            .binary_search_by_key(&id, |vehicle_type| vehicle_type.id)
            .ok()
            .and_then(|position| self.vehicle_types.get(position))
    }

    /// Number of active vehicle types.
    pub fn len(&self) -> usize {
        self.vehicle_types.len()
    }

    /// Whether the snapshot holds no active inventory.
    pub fn is_empty(&self) -> bool {
        self.vehicle_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryCatalog, sedan, suv, van};
    use rstest::rstest;

    #[rstest]
    fn snapshot_orders_by_id_and_drops_inactive() {
        let catalog = MemoryCatalog::with_vehicle_types([van(), sedan().with_active(false), suv()]);
        let snapshot = catalog.snapshot().expect("snapshot");
        let ids: Vec<_> = snapshot.vehicle_types().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[rstest]
    fn duplicate_ids_are_rejected_even_when_inactive() {
        let records = [sedan(), sedan().with_active(false)];
        let err = CatalogSnapshot::from_vehicle_types(records).expect_err("duplicate id");
        assert_eq!(err, CatalogError::DuplicateVehicleType { id: 1 });
    }

    #[rstest]
    fn invalid_active_record_is_reported() {
        let mut broken = suv();
        broken.passenger_capacity = 0;
        let err = CatalogSnapshot::from_vehicle_types([sedan(), broken]).expect_err("invalid");
        assert_eq!(
            err,
            CatalogError::InvalidVehicleType {
                id: 2,
                source: VehicleTypeError::ZeroCapacity,
            }
        );
    }

    #[rstest]
    fn invalid_inactive_record_is_ignored() {
        let mut retired = suv().with_active(false);
        retired.name = String::new();
        let snapshot = CatalogSnapshot::from_vehicle_types([sedan(), retired]).expect("snapshot");
        assert_eq!(snapshot.len(), 1);
    }

    #[rstest]
    fn get_finds_active_types_only() {
        let snapshot =
            CatalogSnapshot::from_vehicle_types([sedan(), suv(), van().with_active(false)])
                .expect("snapshot");
        assert_eq!(snapshot.get(2).map(|v| v.name.as_str()), Some("SUV"));
        assert!(snapshot.get(3).is_none());
        assert!(snapshot.get(42).is_none());
    }

    #[rstest]
    fn shared_catalogs_delegate_to_the_inner_catalog() {
        let catalog = Arc::new(MemoryCatalog::with_vehicle_types([van()]));
        assert_eq!((&*catalog).snapshot().expect("snapshot").len(), 1);
        catalog.set_active(3, false);
        assert!(Arc::clone(&catalog).snapshot().expect("snapshot").is_empty());
    }

    #[rstest]
    fn empty_catalog_produces_empty_snapshot() {
        let snapshot = MemoryCatalog::default().snapshot().expect("snapshot");
        assert!(snapshot.is_empty());
    }
}
