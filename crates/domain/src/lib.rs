//! Domain layer for the forecast ingest service
//!
//! Contains the forecast model, the observation position and the
//! time-series point written to the sink. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
