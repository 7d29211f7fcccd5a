//! Bill database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Bill, BillItem, Medicine, NewBill};
use crate::repository::BillRepository;
use crate::ClinicResult;

impl Database {
    /// Insert a bill and all of its items in a single transaction.
    ///
    /// Returns the new bill ID.
    pub fn insert_bill(&self, bill: &NewBill) -> DbResult<i64> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO bills (patient_name, patient_age, total_amount, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                bill.patient_name,
                bill.patient_age,
                bill.total_amount,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        let bill_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO bill_items (bill_id, medicine_id, quantity, price_per_unit)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;
            for item in &bill.items {
                stmt.execute(params![
                    bill_id,
                    item.medicine_id,
                    item.quantity,
                    item.price_per_unit
                ])?;
            }
        }

        tx.commit()?;
        Ok(bill_id)
    }

    /// Get a bill with its items.
    pub fn get_bill(&self, bill_id: i64) -> DbResult<Option<Bill>> {
        let header = self
            .conn
            .query_row(
                r#"
                SELECT id, patient_name, patient_age, total_amount
                FROM bills
                WHERE id = ?
                "#,
                [bill_id],
                bill_row,
            )
            .optional()?;

        match header {
            Some(row) => Ok(Some(self.with_items(row)?)),
            None => Ok(None),
        }
    }

    /// List all bills with their items, in insertion order.
    pub fn list_bills(&self) -> DbResult<Vec<Bill>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, patient_name, patient_age, total_amount
            FROM bills
            ORDER BY id
            "#,
        )?;
        let headers = stmt
            .query_map([], bill_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut bills = Vec::with_capacity(headers.len());
        for row in headers {
            bills.push(self.with_items(row)?);
        }
        Ok(bills)
    }

    /// Items of a bill, each with a snapshot of its medicine as stored now.
    pub fn list_bill_items(&self, bill_id: i64) -> DbResult<Vec<BillItem>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT bi.id, bi.bill_id, bi.medicine_id, bi.quantity, bi.price_per_unit,
                   m.name, m.price_per_unit, m.stock
            FROM bill_items bi
            JOIN medicines m ON m.id = bi.medicine_id
            WHERE bi.bill_id = ?
            ORDER BY bi.id
            "#,
        )?;

        let rows = stmt.query_map([bill_id], |row| {
            let medicine_id: i64 = row.get(2)?;
            Ok(BillItem {
                id: row.get(0)?,
                bill_id: row.get(1)?,
                medicine_id,
                quantity: row.get(3)?,
                price_per_unit: row.get(4)?,
                medicine: Medicine {
                    id: medicine_id,
                    name: row.get(5)?,
                    price_per_unit: row.get(6)?,
                    stock: row.get(7)?,
                },
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn with_items(&self, row: BillRow) -> DbResult<Bill> {
        Ok(Bill {
            bill_items: self.list_bill_items(row.id)?,
            id: row.id,
            patient_name: row.patient_name,
            patient_age: row.patient_age,
            total_amount: row.total_amount,
        })
    }
}

impl BillRepository for Database {
    fn create(&self, bill: NewBill) -> ClinicResult<Bill> {
        let bill_id = self.insert_bill(&bill)?;
        let items = self.list_bill_items(bill_id)?;
        Ok(Bill {
            id: bill_id,
            patient_name: bill.patient_name,
            patient_age: bill.patient_age,
            bill_items: items,
            total_amount: bill.total_amount,
        })
    }

    fn get_by_id(&self, bill_id: i64) -> ClinicResult<Option<Bill>> {
        Ok(self.get_bill(bill_id)?)
    }

    fn get_all(&self) -> ClinicResult<Vec<Bill>> {
        Ok(self.list_bills()?)
    }
}

/// Intermediate row struct for the bill header.
struct BillRow {
    id: i64,
    patient_name: String,
    patient_age: u32,
    total_amount: f64,
}

fn bill_row(row: &Row<'_>) -> rusqlite::Result<BillRow> {
    Ok(BillRow {
        id: row.get(0)?,
        patient_name: row.get(1)?,
        patient_age: row.get(2)?,
        total_amount: row.get(3)?,
    })
}
