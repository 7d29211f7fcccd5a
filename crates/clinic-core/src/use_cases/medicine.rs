//! Medicine inventory use cases.

use crate::models::{Medicine, MedicineUpdate, NewMedicine};
use crate::repository::MedicineRepository;
use crate::{ClinicError, ClinicResult};

fn medicine_not_found() -> ClinicError {
    ClinicError::NotFound("Medicine not found".into())
}

/// Add a medicine, or reactivate a deleted one with the same name.
pub struct AddMedicine<'a, R: MedicineRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: MedicineRepository + ?Sized> AddMedicine<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, input: NewMedicine) -> ClinicResult<Medicine> {
        input.validate()?;
        let medicine = self.repo.create(input)?;
        tracing::info!(medicine_id = medicine.id, name = %medicine.name, "Added medicine");
        Ok(medicine)
    }
}

pub struct GetMedicine<'a, R: MedicineRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: MedicineRepository + ?Sized> GetMedicine<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, medicine_id: i64) -> ClinicResult<Medicine> {
        self.repo
            .get_by_id(medicine_id)?
            .ok_or_else(medicine_not_found)
    }
}

pub struct GetAllMedicines<'a, R: MedicineRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: MedicineRepository + ?Sized> GetAllMedicines<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> ClinicResult<Vec<Medicine>> {
        self.repo.get_all()
    }
}

/// Partial update; absent fields keep their stored values.
pub struct UpdateMedicine<'a, R: MedicineRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: MedicineRepository + ?Sized> UpdateMedicine<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, medicine_id: i64, update: MedicineUpdate) -> ClinicResult<Medicine> {
        update.validate()?;
        self.repo
            .update(medicine_id, update)?
            .ok_or_else(medicine_not_found)
    }
}

/// Soft delete a medicine and zero its stock.
pub struct DeleteMedicine<'a, R: MedicineRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: MedicineRepository + ?Sized> DeleteMedicine<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, medicine_id: i64) -> ClinicResult<()> {
        self.repo.delete(medicine_id)?;
        tracing::info!(medicine_id, "Deleted medicine");
        Ok(())
    }
}
