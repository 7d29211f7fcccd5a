//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Gender, NewPatient, Patient, PatientStatus, PatientType, PatientUpdate};
use crate::repository::PatientRepository;
use crate::{ClinicError, ClinicResult};

const PATIENT_COLUMNS: &str = "patient_id, first_name, last_name, date_of_birth, age, gender, \
     phone_number, email, address, patient_type, guardian_name, guardian_phone, \
     status, created_at, updated_at";

impl Database {
    /// Insert a new patient row.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, first_name, last_name, date_of_birth, age, gender,
                phone_number, email, address, patient_type, guardian_name, guardian_phone,
                status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                patient.patient_id,
                patient.first_name,
                patient.last_name,
                patient.date_of_birth,
                patient.age,
                patient.gender.as_str(),
                patient.phone_number,
                patient.email,
                patient.address,
                patient.patient_type.as_str(),
                patient.guardian_name,
                patient.guardian_phone,
                status_to_string(&patient.status),
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Overwrite every mutable column of an existing patient row.
    pub fn save_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                date_of_birth = ?4,
                age = ?5,
                gender = ?6,
                phone_number = ?7,
                email = ?8,
                address = ?9,
                patient_type = ?10,
                guardian_name = ?11,
                guardian_phone = ?12,
                status = ?13,
                updated_at = ?14
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.first_name,
                patient.last_name,
                patient.date_of_birth,
                patient.age,
                patient.gender.as_str(),
                patient.phone_number,
                patient.email,
                patient.address,
                patient.patient_type.as_str(),
                patient.guardian_name,
                patient.guardian_phone,
                status_to_string(&patient.status),
                patient.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by ID, whatever its status.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE patient_id = ?", PATIENT_COLUMNS),
                [patient_id],
                patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Get a patient by phone number, whatever its status.
    pub fn find_patient_by_phone(&self, phone_number: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM patients WHERE phone_number = ?", PATIENT_COLUMNS),
                [phone_number],
                patient_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List active patients in insertion order.
    pub fn list_active_patients(&self, skip: u32, limit: u32) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {}
            FROM patients
            WHERE status = 'active'
            ORDER BY rowid
            LIMIT ? OFFSET ?
            "#,
            PATIENT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![limit as i64, skip as i64], patient_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        Ok(patients)
    }
}

impl PatientRepository for Database {
    fn create(&self, input: NewPatient) -> ClinicResult<Patient> {
        match self.find_patient_by_phone(&input.phone_number)? {
            Some(existing) if existing.is_active() => Err(ClinicError::Conflict(format!(
                "Patient with this {} already exists",
                input.phone_number
            ))),
            Some(mut deleted) => {
                deleted.reactivate_with(input);
                self.save_patient(&deleted)?;
                tracing::info!(patient_id = %deleted.patient_id, "Reactivated patient");
                Ok(deleted)
            }
            None => {
                let patient = input.into_patient();
                self.insert_patient(&patient)?;
                Ok(patient)
            }
        }
    }

    fn get_by_id(&self, patient_id: &str) -> ClinicResult<Option<Patient>> {
        Ok(self.get_patient(patient_id)?.filter(Patient::is_active))
    }

    fn list_patients(&self, skip: u32, limit: u32) -> ClinicResult<Vec<Patient>> {
        Ok(self.list_active_patients(skip, limit)?)
    }

    fn update(&self, patient_id: &str, update: PatientUpdate) -> ClinicResult<Option<Patient>> {
        let Some(mut patient) = self.get_by_id(patient_id)? else {
            return Ok(None);
        };

        if let Some(phone) = &update.phone_number {
            if let Some(holder) = self.find_patient_by_phone(phone)? {
                if holder.patient_id != patient.patient_id {
                    return Err(ClinicError::Conflict(format!(
                        "Patient with this {} already exists",
                        phone
                    )));
                }
            }
        }

        update.apply_to(&mut patient);
        self.save_patient(&patient)?;
        Ok(Some(patient))
    }

    fn delete(&self, patient_id: &str) -> ClinicResult<bool> {
        let Some(mut patient) = self.get_patient(patient_id)? else {
            return Ok(false);
        };
        patient.status = patient.status.deactivate();
        patient.touch();
        self.save_patient(&patient)?;
        Ok(true)
    }
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    patient_id: String,
    first_name: String,
    last_name: Option<String>,
    date_of_birth: Option<String>,
    age: u32,
    gender: String,
    phone_number: String,
    email: Option<String>,
    address: Option<String>,
    patient_type: String,
    guardian_name: Option<String>,
    guardian_phone: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

fn patient_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        patient_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        age: row.get(4)?,
        gender: row.get(5)?,
        phone_number: row.get(6)?,
        email: row.get(7)?,
        address: row.get(8)?,
        patient_type: row.get(9)?,
        guardian_name: row.get(10)?,
        guardian_phone: row.get(11)?,
        status: row.get(12)?,
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&row.gender)
            .map_err(|_| DbError::Constraint(format!("Unknown gender: {}", row.gender)))?;
        let patient_type = PatientType::parse(&row.patient_type).map_err(|_| {
            DbError::Constraint(format!("Unknown patient type: {}", row.patient_type))
        })?;

        Ok(Patient {
            patient_id: row.patient_id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            age: row.age,
            gender,
            phone_number: row.phone_number,
            email: row.email,
            address: row.address,
            patient_type,
            guardian_name: row.guardian_name,
            guardian_phone: row.guardian_phone,
            status: string_to_status(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn status_to_string(status: &PatientStatus) -> &'static str {
    match status {
        PatientStatus::Active => "active",
        PatientStatus::Inactive => "inactive",
    }
}

fn string_to_status(s: &str) -> Result<PatientStatus, DbError> {
    match s {
        "active" => Ok(PatientStatus::Active),
        "inactive" => Ok(PatientStatus::Inactive),
        _ => Err(DbError::Constraint(format!("Unknown patient status: {}", s))),
    }
}
