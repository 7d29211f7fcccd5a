//! Billing use cases.

use std::collections::HashMap;

use crate::models::{Bill, BillItemRequest, Medicine, NewBill, NewBillItem};
use crate::repository::{BillRepository, MedicineRepository};
use crate::{ClinicError, ClinicResult};

/// Price the requested lines, persist the bill and dispense the stock.
///
/// Stock is checked against the sum of all lines for the same medicine
/// before anything is written. Stock is decremented only after the bill is
/// committed; a failing decrement is reported but the bill and earlier
/// decrements stay in place.
pub struct CreateBill<'a, B, M>
where
    B: BillRepository + ?Sized,
    M: MedicineRepository + ?Sized,
{
    bills: &'a B,
    medicines: &'a M,
}

impl<'a, B, M> CreateBill<'a, B, M>
where
    B: BillRepository + ?Sized,
    M: MedicineRepository + ?Sized,
{
    pub fn new(bills: &'a B, medicines: &'a M) -> Self {
        Self { bills, medicines }
    }

    pub fn execute(
        &self,
        patient_name: String,
        patient_age: u32,
        items: Vec<BillItemRequest>,
    ) -> ClinicResult<Bill> {
        if patient_name.trim().is_empty() {
            return Err(ClinicError::Validation("Patient name is required".into()));
        }

        let mut stocked: HashMap<i64, Medicine> = HashMap::new();
        let mut demand: HashMap<i64, i64> = HashMap::new();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            item.validate()?;

            let medicine = match stocked.get(&item.medicine_id) {
                Some(medicine) => medicine.clone(),
                None => {
                    let medicine = self
                        .medicines
                        .get_by_id(item.medicine_id)?
                        .ok_or(ClinicError::InsufficientStock {
                            medicine_id: item.medicine_id,
                        })?;
                    stocked.insert(item.medicine_id, medicine.clone());
                    medicine
                }
            };

            let requested = demand.entry(item.medicine_id).or_insert(0);
            *requested = requested.checked_add(item.quantity).ok_or(
                ClinicError::InsufficientStock {
                    medicine_id: item.medicine_id,
                },
            )?;
            if medicine.stock < *requested {
                tracing::debug!(
                    medicine_id = item.medicine_id,
                    stock = medicine.stock,
                    requested = *requested,
                    "Rejected bill line"
                );
                return Err(ClinicError::InsufficientStock {
                    medicine_id: item.medicine_id,
                });
            }

            lines.push(NewBillItem {
                medicine_id: item.medicine_id,
                quantity: item.quantity,
                price_per_unit: item.price_per_unit.unwrap_or(medicine.price_per_unit),
            });
        }

        let created = self
            .bills
            .create(NewBill::new(patient_name, patient_age, lines))?;

        for item in &created.bill_items {
            if !self.medicines.decrement_stock(item.medicine_id, item.quantity)? {
                tracing::error!(
                    bill_id = created.id,
                    medicine_id = item.medicine_id,
                    quantity = item.quantity,
                    "Stock decrement failed after bill was committed"
                );
                return Err(ClinicError::InsufficientStock {
                    medicine_id: item.medicine_id,
                });
            }
        }

        tracing::info!(
            bill_id = created.id,
            items = created.bill_items.len(),
            total = created.total_amount,
            "Created bill"
        );

        // Reload so the medicine snapshots reflect the dispensed stock
        Ok(self.bills.get_by_id(created.id)?.unwrap_or(created))
    }
}

pub struct GetBill<'a, R: BillRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: BillRepository + ?Sized> GetBill<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self, bill_id: i64) -> ClinicResult<Bill> {
        self.repo
            .get_by_id(bill_id)?
            .ok_or_else(|| ClinicError::NotFound("Bill not found".into()))
    }
}

pub struct GetAllBills<'a, R: BillRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: BillRepository + ?Sized> GetAllBills<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn execute(&self) -> ClinicResult<Vec<Bill>> {
        self.repo.get_all()
    }
}
