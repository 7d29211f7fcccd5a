//! SQLite schema definition.

/// Complete database schema for the clinic backend.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT,
    date_of_birth TEXT,
    age INTEGER NOT NULL CHECK (age >= 0),
    gender TEXT NOT NULL CHECK (gender IN ('male', 'female', 'other')),
    phone_number TEXT NOT NULL UNIQUE,            -- reactivation reuses the row
    email TEXT,
    address TEXT,
    patient_type TEXT NOT NULL DEFAULT 'ADULT' CHECK (patient_type IN ('ADULT', 'PEDIATRIC')),
    guardian_name TEXT,
    guardian_phone TEXT,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'inactive')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_status ON patients(status);
CREATE INDEX IF NOT EXISTS idx_patients_first_name ON patients(first_name);
CREATE INDEX IF NOT EXISTS idx_patients_last_name ON patients(last_name);

-- ============================================================================
-- Medicines
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,                   -- reactivation reuses the row
    price_per_unit REAL NOT NULL CHECK (price_per_unit >= 0),
    stock INTEGER NOT NULL CHECK (stock >= 0),
    deleted_at TEXT,                             -- NULL while available
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medicines_deleted_at ON medicines(deleted_at);

-- ============================================================================
-- Bills (Immutable after creation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_name TEXT NOT NULL,
    patient_age INTEGER NOT NULL CHECK (patient_age >= 0),
    total_amount REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS bill_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bill_id INTEGER NOT NULL REFERENCES bills(id),
    medicine_id INTEGER NOT NULL REFERENCES medicines(id),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    price_per_unit REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bill_items_bill ON bill_items(bill_id);
CREATE INDEX IF NOT EXISTS idx_bill_items_medicine ON bill_items(medicine_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_gender_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO patients (patient_id, first_name, age, gender, phone_number) VALUES ('p1', 'A', 30, 'unknown', '555')",
            [],
        );
        assert!(result.is_err());

        let result = conn.execute(
            "INSERT INTO patients (patient_id, first_name, age, gender, phone_number) VALUES ('p1', 'A', 30, 'male', '555')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_stock_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO medicines (name, price_per_unit, stock) VALUES ('Aspirin', 1.0, -1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bill_item_requires_bill() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO medicines (name, price_per_unit, stock) VALUES ('Aspirin', 1.0, 10)",
            [],
        )
        .unwrap();

        // Foreign key to a missing bill should fail
        let result = conn.execute(
            "INSERT INTO bill_items (bill_id, medicine_id, quantity, price_per_unit) VALUES (99, 1, 1, 1.0)",
            [],
        );
        assert!(result.is_err());
    }
}
