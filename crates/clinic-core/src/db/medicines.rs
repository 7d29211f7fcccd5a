//! Medicine inventory database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Medicine, MedicineRecord, MedicineStatus, MedicineUpdate, NewMedicine};
use crate::repository::MedicineRepository;
use crate::{ClinicError, ClinicResult};

impl Database {
    /// Insert a new medicine and return it with its assigned ID.
    pub fn insert_medicine(&self, medicine: &NewMedicine) -> DbResult<Medicine> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            r#"
            INSERT INTO medicines (name, price_per_unit, stock, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![medicine.name, medicine.price_per_unit, medicine.stock, now],
        )?;
        Ok(Medicine {
            id: self.conn.last_insert_rowid(),
            name: medicine.name.clone(),
            price_per_unit: medicine.price_per_unit,
            stock: medicine.stock,
        })
    }

    /// Get a medicine by ID, deleted or not.
    pub fn get_medicine_record(&self, id: i64) -> DbResult<Option<MedicineRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, price_per_unit, stock, deleted_at
                FROM medicines
                WHERE id = ?
                "#,
                [id],
                medicine_record,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a medicine by exact name, deleted or not.
    pub fn find_medicine_by_name(&self, name: &str) -> DbResult<Option<MedicineRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, price_per_unit, stock, deleted_at
                FROM medicines
                WHERE name = ?
                "#,
                [name],
                medicine_record,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List medicines that are not deleted, in insertion order.
    pub fn list_available_medicines(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, price_per_unit, stock, deleted_at
            FROM medicines
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], medicine_record)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?.medicine);
        }
        Ok(medicines)
    }

    /// Write name, price and stock of an existing medicine.
    pub fn save_medicine(&self, medicine: &Medicine) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicines SET
                name = ?2,
                price_per_unit = ?3,
                stock = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                medicine.id,
                medicine.name,
                medicine.price_per_unit,
                medicine.stock,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Clear the deleted flag and reset price and stock.
    pub fn restore_medicine(&self, id: i64, price_per_unit: f64, stock: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicines SET
                deleted_at = NULL,
                price_per_unit = ?2,
                stock = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
            params![id, price_per_unit, stock, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Flag a medicine as deleted and zero its stock (soft delete).
    ///
    /// Returns false if the medicine is missing or already deleted.
    pub fn mark_medicine_deleted(&self, id: i64) -> DbResult<bool> {
        let now = chrono::Utc::now().to_rfc3339();
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicines SET
                deleted_at = ?2,
                stock = 0,
                updated_at = ?2
            WHERE id = ?1 AND deleted_at IS NULL
            "#,
            params![id, now],
        )?;
        Ok(rows_affected > 0)
    }
}

impl MedicineRepository for Database {
    fn create(&self, input: NewMedicine) -> ClinicResult<Medicine> {
        match self.find_medicine_by_name(&input.name)? {
            Some(existing) if !existing.is_deleted() => Err(ClinicError::Conflict(
                "Medicine with this name already exists".into(),
            )),
            Some(deleted) => {
                let id = deleted.medicine.id;
                self.restore_medicine(id, input.price_per_unit, input.stock)?;
                tracing::info!(medicine_id = id, name = %input.name, "Reactivated medicine");
                Ok(Medicine {
                    id,
                    name: deleted.medicine.name,
                    price_per_unit: input.price_per_unit,
                    stock: input.stock,
                })
            }
            None => Ok(self.insert_medicine(&input)?),
        }
    }

    fn get_by_id(&self, medicine_id: i64) -> ClinicResult<Option<Medicine>> {
        Ok(self
            .get_medicine_record(medicine_id)?
            .filter(|record| !record.is_deleted())
            .map(|record| record.medicine))
    }

    fn get_all(&self) -> ClinicResult<Vec<Medicine>> {
        Ok(self.list_available_medicines()?)
    }

    fn update(&self, medicine_id: i64, update: MedicineUpdate) -> ClinicResult<Option<Medicine>> {
        let Some(mut medicine) = MedicineRepository::get_by_id(self, medicine_id)? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(medicine));
        }

        if let Some(name) = update.name {
            if name != medicine.name {
                if let Some(holder) = self.find_medicine_by_name(&name)? {
                    if holder.medicine.id != medicine_id {
                        return Err(ClinicError::Conflict(
                            "Medicine with this name already exists".into(),
                        ));
                    }
                }
            }
            medicine.name = name;
        }
        if let Some(price) = update.price_per_unit {
            medicine.price_per_unit = price;
        }
        if let Some(stock) = update.stock {
            medicine.stock = stock;
        }

        self.save_medicine(&medicine)?;
        Ok(Some(medicine))
    }

    fn delete(&self, medicine_id: i64) -> ClinicResult<()> {
        if self.mark_medicine_deleted(medicine_id)? {
            Ok(())
        } else {
            Err(ClinicError::NotFound(
                "Medicine not found or already deleted".into(),
            ))
        }
    }

    fn decrement_stock(&self, medicine_id: i64, quantity: i64) -> ClinicResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicines SET
                stock = stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND deleted_at IS NULL AND stock >= ?2
            "#,
            params![medicine_id, quantity, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rows_affected > 0)
    }
}

fn medicine_record(row: &Row<'_>) -> rusqlite::Result<MedicineRecord> {
    let deleted_at: Option<String> = row.get(4)?;
    Ok(MedicineRecord {
        medicine: Medicine {
            id: row.get(0)?,
            name: row.get(1)?,
            price_per_unit: row.get(2)?,
            stock: row.get(3)?,
        },
        status: match deleted_at {
            Some(at) => MedicineStatus::Deleted { at },
            None => MedicineStatus::Available,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let db = setup_db();

        let created = MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100))
            .unwrap();
        assert!(created.id > 0);

        let retrieved = MedicineRepository::get_by_id(&db, created.id).unwrap().unwrap();
        assert_eq!(retrieved, created);
    }

    #[test]
    fn test_duplicate_name_conflicts() {
        let db = setup_db();

        MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        let result = MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 9.0, 1));
        assert!(matches!(result, Err(ClinicError::Conflict(_))));
    }

    #[test]
    fn test_delete_zeroes_stock_and_hides() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        MedicineRepository::delete(&db, created.id).unwrap();

        assert!(MedicineRepository::get_by_id(&db, created.id).unwrap().is_none());
        assert!(db.get_all().unwrap().is_empty());

        let record = db.get_medicine_record(created.id).unwrap().unwrap();
        assert!(record.is_deleted());
        assert!(record.status.deleted_at().is_some());
        assert_eq!(record.medicine.stock, 0);
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        MedicineRepository::delete(&db, created.id).unwrap();

        let result = MedicineRepository::delete(&db, created.id);
        assert!(matches!(result, Err(ClinicError::NotFound(_))));

        let result = MedicineRepository::delete(&db, 999);
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }

    #[test]
    fn test_readd_reactivates_same_row() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        MedicineRepository::delete(&db, created.id).unwrap();

        let again =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 3.0, 40)).unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(again.price_per_unit, 3.0);
        assert_eq!(again.stock, 40);

        let record = db.get_medicine_record(created.id).unwrap().unwrap();
        assert!(!record.is_deleted());
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        let update = MedicineUpdate {
            stock: Some(42),
            ..Default::default()
        };

        let updated = MedicineRepository::update(&db, created.id, update)
            .unwrap()
            .unwrap();
        assert_eq!(updated.stock, 42);
        assert_eq!(updated.name, "Paracetamol");
        assert_eq!(updated.price_per_unit, 2.5);

        let stored = MedicineRepository::get_by_id(&db, created.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test]
    fn test_empty_update_returns_stored_medicine() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        let before = db.get_medicine_record(created.id).unwrap().unwrap();

        let unchanged = MedicineRepository::update(&db, created.id, MedicineUpdate::default())
            .unwrap()
            .unwrap();
        assert_eq!(unchanged, created);
        assert_eq!(db.get_medicine_record(created.id).unwrap().unwrap(), before);
    }

    #[test]
    fn test_update_missing_or_deleted_is_none() {
        let db = setup_db();

        assert!(MedicineRepository::update(&db, 7, MedicineUpdate::default())
            .unwrap()
            .is_none());

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        MedicineRepository::delete(&db, created.id).unwrap();
        let update = MedicineUpdate {
            stock: Some(5),
            ..Default::default()
        };
        assert!(MedicineRepository::update(&db, created.id, update)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_rename_onto_existing_name_conflicts() {
        let db = setup_db();

        MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 100)).unwrap();
        let other = MedicineRepository::create(&db, NewMedicine::new("Ibuprofen", 4.0, 50)).unwrap();

        let update = MedicineUpdate {
            name: Some("Paracetamol".into()),
            ..Default::default()
        };
        let result = MedicineRepository::update(&db, other.id, update);
        assert!(matches!(result, Err(ClinicError::Conflict(_))));
    }

    #[test]
    fn test_decrement_stock() {
        let db = setup_db();

        let created =
            MedicineRepository::create(&db, NewMedicine::new("Paracetamol", 2.5, 10)).unwrap();

        assert!(db.decrement_stock(created.id, 4).unwrap());
        assert_eq!(
            MedicineRepository::get_by_id(&db, created.id).unwrap().unwrap().stock,
            6
        );

        // Would go negative
        assert!(!db.decrement_stock(created.id, 7).unwrap());
        assert_eq!(
            MedicineRepository::get_by_id(&db, created.id).unwrap().unwrap().stock,
            6
        );
    }
}
