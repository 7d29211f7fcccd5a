//! Patient use cases.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, NewPatient, Patient, PatientType, PatientUpdate};
use crate::repository::PatientRepository;
use crate::{ClinicError, ClinicResult};

/// Patient as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDto {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_active: bool,
    pub patient_type: PatientType,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl From<Patient> for PatientDto {
    fn from(patient: Patient) -> Self {
        Self {
            is_active: patient.is_active(),
            patient_id: patient.patient_id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            date_of_birth: patient.date_of_birth,
            age: patient.age,
            gender: patient.gender,
            phone_number: patient.phone_number,
            email: patient.email,
            address: patient.address,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
            patient_type: patient.patient_type,
            guardian_name: patient.guardian_name,
            guardian_phone: patient.guardian_phone,
        }
    }
}

fn patient_not_found() -> ClinicError {
    ClinicError::NotFound("Patient not found".into())
}

/// Register a patient, or reactivate a deleted one with the same phone number.
pub struct AddPatient<'a, R: PatientRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PatientRepository + ?Sized> AddPatient<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, input: NewPatient) -> ClinicResult<PatientDto> {
        input.validate()?;
        let patient = self.repo.create(input)?;
        tracing::info!(patient_id = %patient.patient_id, "Registered patient");
        Ok(patient.into())
    }
}

pub struct GetPatient<'a, R: PatientRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PatientRepository + ?Sized> GetPatient<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, patient_id: &str) -> ClinicResult<PatientDto> {
        self.repo
            .get_by_id(patient_id)?
            .map(Into::into)
            .ok_or_else(patient_not_found)
    }
}

pub struct ListPatients<'a, R: PatientRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PatientRepository + ?Sized> ListPatients<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, skip: u32, limit: u32) -> ClinicResult<Vec<PatientDto>> {
        let patients = self.repo.list_patients(skip, limit)?;
        Ok(patients.into_iter().map(Into::into).collect())
    }
}

pub struct UpdatePatient<'a, R: PatientRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PatientRepository + ?Sized> UpdatePatient<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, patient_id: &str, update: PatientUpdate) -> ClinicResult<PatientDto> {
        update.validate()?;
        self.repo
            .update(patient_id, update)?
            .map(Into::into)
            .ok_or_else(patient_not_found)
    }
}

/// Soft delete a patient.
pub struct DeletePatient<'a, R: PatientRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: PatientRepository + ?Sized> DeletePatient<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, patient_id: &str) -> ClinicResult<()> {
        if !self.repo.delete(patient_id)? {
            return Err(patient_not_found());
        }
        tracing::info!(patient_id, "Deactivated patient");
        Ok(())
    }
}
