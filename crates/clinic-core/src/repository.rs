//! Repository ports.
//!
//! Use cases depend on these traits only. [`crate::db::Database`] is the
//! SQLite-backed implementation of all three.

use crate::models::{
    Bill, Medicine, MedicineUpdate, NewBill, NewMedicine, NewPatient, Patient, PatientUpdate,
};
use crate::ClinicResult;

/// Persistence for patients, with soft delete scoped by phone number.
pub trait PatientRepository {
    /// Register a patient.
    ///
    /// # Errors
    ///
    /// `ClinicError::Conflict` if an active patient already holds the phone
    /// number. An inactive holder is reactivated with the new fields instead
    /// of inserting a second row.
    fn create(&self, patient: NewPatient) -> ClinicResult<Patient>;

    /// Get an active patient.
    fn get_by_id(&self, patient_id: &str) -> ClinicResult<Option<Patient>>;

    /// List active patients in storage order.
    fn list_patients(&self, skip: u32, limit: u32) -> ClinicResult<Vec<Patient>>;

    /// Apply a partial update to an active patient. `None` if no active match.
    fn update(&self, patient_id: &str, update: PatientUpdate) -> ClinicResult<Option<Patient>>;

    /// Soft delete, whatever the current status. Returns whether the record exists.
    fn delete(&self, patient_id: &str) -> ClinicResult<bool>;
}

/// Persistence for the medicine inventory, with soft delete scoped by name.
pub trait MedicineRepository {
    /// Add a medicine, reactivating a deleted one with the same name.
    ///
    /// # Errors
    ///
    /// `ClinicError::Conflict` if a non-deleted medicine has the same name.
    fn create(&self, medicine: NewMedicine) -> ClinicResult<Medicine>;

    /// Get a non-deleted medicine.
    fn get_by_id(&self, medicine_id: i64) -> ClinicResult<Option<Medicine>>;

    /// All non-deleted medicines in storage order.
    fn get_all(&self) -> ClinicResult<Vec<Medicine>>;

    /// Write the provided fields of a non-deleted medicine. `None` if missing.
    fn update(&self, medicine_id: i64, update: MedicineUpdate) -> ClinicResult<Option<Medicine>>;

    /// Soft delete: flag the row, zero its stock and record the time.
    ///
    /// # Errors
    ///
    /// `ClinicError::NotFound` if missing or already deleted.
    fn delete(&self, medicine_id: i64) -> ClinicResult<()>;

    /// Subtract dispensed units from a non-deleted medicine.
    ///
    /// Returns false when no row was changed.
    fn decrement_stock(&self, medicine_id: i64, quantity: i64) -> ClinicResult<bool>;
}

/// Persistence for bills and their items.
pub trait BillRepository {
    /// Persist a bill together with its items in one transaction.
    fn create(&self, bill: NewBill) -> ClinicResult<Bill>;

    fn get_by_id(&self, bill_id: i64) -> ClinicResult<Option<Bill>>;

    /// All bills in storage order.
    fn get_all(&self) -> ClinicResult<Vec<Bill>>;
}
