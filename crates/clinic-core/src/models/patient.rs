//! Patient models.

use serde::{Deserialize, Serialize};

use crate::ClinicError;

/// Administrative gender as recorded at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a gender, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, ClinicError> {
        match value.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "" => Err(ClinicError::Validation("Gender is required".into())),
            _ => Err(ClinicError::Validation(format!("Invalid gender: {}", value))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Patient category. Pediatric patients may carry guardian contact details.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatientType {
    #[default]
    Adult,
    Pediatric,
}

impl PatientType {
    pub fn parse(value: &str) -> Result<Self, ClinicError> {
        match value.trim().to_uppercase().as_str() {
            "ADULT" => Ok(PatientType::Adult),
            "PEDIATRIC" => Ok(PatientType::Pediatric),
            _ => Err(ClinicError::Validation(format!(
                "Invalid patient type: {}",
                value
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientType::Adult => "ADULT",
            PatientType::Pediatric => "PEDIATRIC",
        }
    }
}

/// Record lifecycle. Deletion moves a patient to `Inactive`; registering the
/// same phone number again moves it back to `Active`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, PatientStatus::Active)
    }

    /// Soft delete. Deleting an inactive patient is a no-op transition.
    pub fn deactivate(self) -> Self {
        PatientStatus::Inactive
    }

    /// Reactivation on re-registration.
    pub fn reactivate(self) -> Self {
        PatientStatus::Active
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// UUID assigned at first registration, kept across reactivation
    pub patient_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    /// ISO 8601 date (or date-time)
    pub date_of_birth: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub patient_type: PatientType,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub status: PatientStatus,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Registration input. Everything except identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: u32,
    pub gender: Gender,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub patient_type: PatientType,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl NewPatient {
    /// Create registration input with required fields.
    pub fn new(first_name: String, age: u32, gender: Gender, phone_number: String) -> Self {
        Self {
            first_name,
            last_name: None,
            date_of_birth: None,
            age,
            gender,
            phone_number,
            email: None,
            address: None,
            patient_type: PatientType::Adult,
            guardian_name: None,
            guardian_phone: None,
        }
    }

    /// Check required fields and formats.
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.first_name.trim().is_empty() {
            return Err(ClinicError::Validation("First name is required".into()));
        }
        if self.phone_number.trim().is_empty() {
            return Err(ClinicError::Validation("Phone number is required".into()));
        }
        if let Some(dob) = &self.date_of_birth {
            validate_date_of_birth(dob)?;
        }
        Ok(())
    }

    /// Materialize a fresh active patient with a new identifier.
    pub fn into_patient(self) -> Patient {
        let now = chrono::Utc::now().to_rfc3339();
        Patient {
            patient_id: uuid::Uuid::new_v4().to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            age: self.age,
            gender: self.gender,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            patient_type: self.patient_type,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
            status: PatientStatus::Active,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub patient_type: Option<PatientType>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl PatientUpdate {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if matches!(&self.first_name, Some(name) if name.trim().is_empty()) {
            return Err(ClinicError::Validation("First name cannot be empty".into()));
        }
        if matches!(&self.phone_number, Some(phone) if phone.trim().is_empty()) {
            return Err(ClinicError::Validation("Phone number cannot be empty".into()));
        }
        if let Some(dob) = &self.date_of_birth {
            validate_date_of_birth(dob)?;
        }
        Ok(())
    }

    /// Apply the provided fields onto a patient and touch its timestamp.
    pub fn apply_to(self, patient: &mut Patient) {
        if let Some(v) = self.first_name {
            patient.first_name = v;
        }
        if let Some(v) = self.last_name {
            patient.last_name = Some(v);
        }
        if let Some(v) = self.date_of_birth {
            patient.date_of_birth = Some(v);
        }
        if let Some(v) = self.age {
            patient.age = v;
        }
        if let Some(v) = self.gender {
            patient.gender = v;
        }
        if let Some(v) = self.phone_number {
            patient.phone_number = v;
        }
        if let Some(v) = self.email {
            patient.email = Some(v);
        }
        if let Some(v) = self.address {
            patient.address = Some(v);
        }
        if let Some(v) = self.patient_type {
            patient.patient_type = v;
        }
        if let Some(v) = self.guardian_name {
            patient.guardian_name = Some(v);
        }
        if let Some(v) = self.guardian_phone {
            patient.guardian_phone = Some(v);
        }
        patient.touch();
    }
}

impl Patient {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Overwrite demographic fields from a re-registration and reactivate.
    ///
    /// Identifier, phone number and creation time are kept.
    pub fn reactivate_with(&mut self, input: NewPatient) {
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.date_of_birth = input.date_of_birth;
        self.age = input.age;
        self.gender = input.gender;
        self.email = input.email;
        self.address = input.address;
        self.patient_type = input.patient_type;
        self.guardian_name = input.guardian_name;
        self.guardian_phone = input.guardian_phone;
        self.status = self.status.reactivate();
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 date-time.
fn validate_date_of_birth(value: &str) -> Result<(), ClinicError> {
    let date_ok = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    let datetime_ok = chrono::DateTime::parse_from_rfc3339(value).is_ok();
    if date_ok || datetime_ok {
        Ok(())
    } else {
        Err(ClinicError::Validation(format!(
            "Invalid date of birth: {}",
            value
        )))
    }
}
