//! Value Objects - Immutable, identity-less domain primitives

mod data_point;
mod position;

pub use data_point::DataPoint;
pub use position::Position;
