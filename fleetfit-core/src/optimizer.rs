use thiserror::Error;

use crate::{
    CatalogError, CombinationError, OptimizeRequest, OptimizeRequestValidationError,
    OptimizeResponse,
};

/// Errors returned by [`Optimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// Request parameters were invalid; no search was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] OptimizeRequestValidationError),
    /// The catalog holds no active vehicle types.
    #[error("no active vehicle types are available")]
    NoActiveInventory,
    /// The catalog could not be read.
    #[error("failed to read vehicle catalog: {0}")]
    Catalog(#[from] CatalogError),
    /// A candidate combination could not be built or priced.
    #[error("failed to build vehicle combination: {0}")]
    Combination(#[from] CombinationError),
    /// The search was stopped before completing.
    #[error("search cancelled: {reason}")]
    Cancelled {
        /// Why the search stopped.
        reason: String,
    },
}

/// Choose the best vehicle combinations for a party and trip length.
///
/// Implementations return [`OptimizeError::InvalidRequest`] for invalid
/// parameters rather than panicking, and must be `Send + Sync` so calls can
/// run on several threads at once.
pub trait Optimizer: Send + Sync {
    /// Answer a request with ranked solutions or an error.
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, OptimizeError>;
}
