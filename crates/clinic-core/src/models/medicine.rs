//! Medicine inventory models.

use serde::{Deserialize, Serialize};

use crate::ClinicError;

/// Soft-delete state of an inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MedicineStatus {
    Available,
    /// Deleted at the given RFC 3339 timestamp
    Deleted { at: String },
}

impl MedicineStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, MedicineStatus::Deleted { .. })
    }

    /// Timestamp of deletion, if deleted.
    pub fn deleted_at(&self) -> Option<&str> {
        match self {
            MedicineStatus::Available => None,
            MedicineStatus::Deleted { at } => Some(at),
        }
    }
}

/// A single medicine in the clinic inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Store-assigned identifier, kept across reactivation
    pub id: i64,
    /// Unique among non-deleted medicines
    pub name: String,
    pub price_per_unit: f64,
    /// Units on hand, never negative
    pub stock: i64,
}

/// A stored medicine together with its soft-delete state.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineRecord {
    pub medicine: Medicine,
    pub status: MedicineStatus,
}

impl MedicineRecord {
    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }
}

/// Input for adding a medicine.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub price_per_unit: f64,
    pub stock: i64,
}

impl NewMedicine {
    pub fn new(name: impl Into<String>, price_per_unit: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price_per_unit,
            stock,
        }
    }

    pub fn validate(&self) -> Result<(), ClinicError> {
        if self.name.trim().is_empty() {
            return Err(ClinicError::Validation("Medicine name is required".into()));
        }
        validate_price(self.price_per_unit)?;
        validate_stock(self.stock)
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub price_per_unit: Option<f64>,
    pub stock: Option<i64>,
}

impl MedicineUpdate {
    pub fn validate(&self) -> Result<(), ClinicError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(ClinicError::Validation("Medicine name cannot be empty".into()));
        }
        if let Some(price) = self.price_per_unit {
            validate_price(price)?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price_per_unit.is_none() && self.stock.is_none()
    }
}

fn validate_price(price: f64) -> Result<(), ClinicError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ClinicError::Validation(format!(
            "Price per unit must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> Result<(), ClinicError> {
    if stock < 0 {
        return Err(ClinicError::Validation(format!(
            "Stock cannot be negative, got {}",
            stock
        )));
    }
    Ok(())
}
