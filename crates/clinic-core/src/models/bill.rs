//! Billing models.

use serde::{Deserialize, Serialize};

use super::medicine::Medicine;
use crate::ClinicError;

/// A dispensed line on a bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillItem {
    pub id: i64,
    pub bill_id: i64,
    pub medicine_id: i64,
    pub quantity: i64,
    /// Unit price charged, fixed at billing time
    pub price_per_unit: f64,
    /// Medicine as currently stored (display only)
    pub medicine: Medicine,
}

/// A persisted bill. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: i64,
    pub patient_name: String,
    pub patient_age: u32,
    pub bill_items: Vec<BillItem>,
    pub total_amount: f64,
}

/// Requested line on a new bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillItemRequest {
    pub medicine_id: i64,
    pub quantity: i64,
    /// Overrides the medicine's current price when present
    pub price_per_unit: Option<f64>,
}

impl BillItemRequest {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.quantity < 1 {
            return Err(ClinicError::Validation(format!(
                "Quantity must be at least 1, got {}",
                self.quantity
            )));
        }
        if let Some(price) = self.price_per_unit {
            if !price.is_finite() || price < 0.0 {
                return Err(ClinicError::Validation(format!(
                    "Price per unit must be a non-negative number, got {}",
                    price
                )));
            }
        }
        Ok(())
    }
}

/// Priced line ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillItem {
    pub medicine_id: i64,
    pub quantity: i64,
    pub price_per_unit: f64,
}

/// Bill ready for persistence, with its total already computed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub patient_name: String,
    pub patient_age: u32,
    pub items: Vec<NewBillItem>,
    pub total_amount: f64,
}

impl NewBill {
    /// Build a bill from priced lines; the total is their sum.
    pub fn new(patient_name: String, patient_age: u32, items: Vec<NewBillItem>) -> Self {
        let total_amount = items
            .iter()
            .map(|item| item.price_per_unit * item.quantity as f64)
            .sum();
        Self {
            patient_name,
            patient_age,
            items,
            total_amount,
        }
    }
}
