//! Application use cases, one type per operation.
//!
//! Each use case borrows the repositories it needs, validates its input and
//! surfaces repository errors unchanged.

mod bill;
mod medicine;
mod patient;

pub use bill::*;
pub use medicine::*;
pub use patient::*;
