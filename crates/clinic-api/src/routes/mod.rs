//! HTTP route table.
//!
//! Resource routes live under `/v1`; `/` and `/health` sit at the root.

pub mod bills;
pub mod medicines;
pub mod patients;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::AppState;

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn root() -> Json<Message> {
    Json(Message::new("Welcome to the Clinic API"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/patient", post(patients::add_patient))
        .route(
            "/patient/:patient_id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/patients", get(patients::list_patients))
        .route(
            "/medicines",
            post(medicines::add_medicine).get(medicines::list_medicines),
        )
        .route(
            "/medicines/:medicine_id",
            get(medicines::get_medicine)
                .patch(medicines::update_medicine)
                .delete(medicines::delete_medicine),
        )
        .route("/bills", post(bills::create_bill).get(bills::list_bills))
        .route("/bills/:bill_id", get(bills::get_bill))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/v1", v1_routes())
}
