//! Billing endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use clinic_core::models::{Bill, BillItemRequest};
use clinic_core::use_cases::{CreateBill, GetAllBills, GetBill};

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BillCreate {
    pub patient_name: String,
    pub patient_age: u32,
    #[serde(default)]
    pub items: Vec<BillItemRequest>,
}

pub async fn create_bill(
    State(state): State<AppState>,
    Json(body): Json<BillCreate>,
) -> ApiResult<Json<Bill>> {
    let db = state.db()?;
    let bill =
        CreateBill::new(&*db, &*db).execute(body.patient_name, body.patient_age, body.items)?;
    Ok(Json(bill))
}

pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<i64>,
) -> ApiResult<Json<Bill>> {
    let db = state.db()?;
    Ok(Json(GetBill::new(&*db).execute(bill_id)?))
}

pub async fn list_bills(State(state): State<AppState>) -> ApiResult<Json<Vec<Bill>>> {
    let db = state.db()?;
    Ok(Json(GetAllBills::new(&*db).execute()?))
}
