//! Patient endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use clinic_core::models::{Gender, NewPatient, PatientType, PatientUpdate};
use clinic_core::use_cases::{
    AddPatient, DeletePatient, GetPatient, ListPatients, PatientDto, UpdatePatient,
};

use super::Message;
use crate::error::ApiResult;
use crate::AppState;

pub const DEFAULT_LIMIT: u32 = 10;

/// Registration body. Gender and patient type arrive as free text and are
/// normalized before validation.
#[derive(Debug, Deserialize)]
pub struct PatientCreate {
    pub first_name: String,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: u32,
    pub gender: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub patient_type: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl PatientCreate {
    fn into_new_patient(self) -> ApiResult<NewPatient> {
        let patient_type = match self.patient_type.as_deref() {
            Some(raw) => PatientType::parse(raw)?,
            None => PatientType::default(),
        };
        Ok(NewPatient {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            age: self.age,
            gender: Gender::parse(&self.gender)?,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            patient_type,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PatientUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub patient_type: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
}

impl PatientUpdateRequest {
    fn into_update(self) -> ApiResult<PatientUpdate> {
        Ok(PatientUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            age: self.age,
            gender: self.gender.as_deref().map(Gender::parse).transpose()?,
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            patient_type: self
                .patient_type
                .as_deref()
                .map(PatientType::parse)
                .transpose()?,
            guardian_name: self.guardian_name,
            guardian_phone: self.guardian_phone,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn add_patient(
    State(state): State<AppState>,
    Json(body): Json<PatientCreate>,
) -> ApiResult<Json<PatientDto>> {
    let input = body.into_new_patient()?;
    let db = state.db()?;
    let patient = AddPatient::new(&*db).execute(input)?;
    Ok(Json(patient))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<PatientDto>> {
    let db = state.db()?;
    Ok(Json(GetPatient::new(&*db).execute(&patient_id)?))
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<PatientDto>>> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let db = state.db()?;
    Ok(Json(ListPatients::new(&*db).execute(skip, limit)?))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Json(body): Json<PatientUpdateRequest>,
) -> ApiResult<Json<PatientDto>> {
    let update = body.into_update()?;
    let db = state.db()?;
    Ok(Json(UpdatePatient::new(&*db).execute(&patient_id, update)?))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<Message>> {
    let db = state.db()?;
    DeletePatient::new(&*db).execute(&patient_id)?;
    Ok(Json(Message::new("Patient deleted successfully")))
}
