//! Clinic Core Library
//!
//! Patient registration, medicine inventory and billing for a small clinic.
//!
//! # Architecture
//!
//! ```text
//!   HTTP handlers (clinic-api)
//!            │
//!            ▼
//!   Use cases ─────────── one type per operation
//!            │
//!            ▼
//!   Repository ports ──── PatientRepository / MedicineRepository / BillRepository
//!            │
//!            ▼
//!   SQLite adapter ────── Database (rusqlite)
//! ```
//!
//! # Soft delete
//!
//! Patients and medicines are never physically removed. A patient is unique by
//! phone number and a medicine by name; registering a deleted one again
//! reactivates the existing row and keeps its identifier.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer implementing the repository ports
//! - [`models`]: Domain types (Patient, Medicine, Bill, etc.)
//! - [`repository`]: Repository traits
//! - [`use_cases`]: Application operations

pub mod db;
pub mod models;
pub mod repository;
pub mod use_cases;

// Re-export commonly used types
pub use db::{Database, DbError};
pub use models::{
    Bill, BillItem, BillItemRequest, Gender, Medicine, MedicineUpdate, NewMedicine, NewPatient,
    Patient, PatientStatus, PatientType, PatientUpdate,
};
pub use repository::{BillRepository, MedicineRepository, PatientRepository};

use thiserror::Error;

/// Errors surfaced by repositories and use cases.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Malformed input
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique key among active records
    #[error("{0}")]
    Conflict(String),

    /// Missing or inactive record
    #[error("{0}")]
    NotFound(String),

    /// Requested quantity exceeds available stock
    #[error("Insufficient stock")]
    InsufficientStock { medicine_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<rusqlite::Error> for ClinicError {
    fn from(e: rusqlite::Error) -> Self {
        ClinicError::Database(DbError::Sqlite(e))
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;
