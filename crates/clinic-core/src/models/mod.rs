//! Domain models for the clinic backend.

mod bill;
mod medicine;
mod patient;

pub use bill::*;
pub use medicine::*;
pub use patient::*;
