//! Medicine inventory endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use clinic_core::models::{Medicine, MedicineUpdate, NewMedicine};
use clinic_core::use_cases::{
    AddMedicine, DeleteMedicine, GetAllMedicines, GetMedicine, UpdateMedicine,
};

use super::Message;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MedicineCreate {
    pub name: String,
    pub price_per_unit: f64,
    pub stock: i64,
}

pub async fn add_medicine(
    State(state): State<AppState>,
    Json(body): Json<MedicineCreate>,
) -> ApiResult<Json<Medicine>> {
    let db = state.db()?;
    let medicine = AddMedicine::new(&*db).execute(NewMedicine::new(
        body.name,
        body.price_per_unit,
        body.stock,
    ))?;
    Ok(Json(medicine))
}

pub async fn get_medicine(
    State(state): State<AppState>,
    Path(medicine_id): Path<i64>,
) -> ApiResult<Json<Medicine>> {
    let db = state.db()?;
    Ok(Json(GetMedicine::new(&*db).execute(medicine_id)?))
}

pub async fn list_medicines(State(state): State<AppState>) -> ApiResult<Json<Vec<Medicine>>> {
    let db = state.db()?;
    Ok(Json(GetAllMedicines::new(&*db).execute()?))
}

pub async fn update_medicine(
    State(state): State<AppState>,
    Path(medicine_id): Path<i64>,
    Json(update): Json<MedicineUpdate>,
) -> ApiResult<Json<Medicine>> {
    let db = state.db()?;
    Ok(Json(UpdateMedicine::new(&*db).execute(medicine_id, update)?))
}

pub async fn delete_medicine(
    State(state): State<AppState>,
    Path(medicine_id): Path<i64>,
) -> ApiResult<Json<Message>> {
    let db = state.db()?;
    DeleteMedicine::new(&*db).execute(medicine_id)?;
    Ok(Json(Message::new("Medicine deleted successfully")))
}
