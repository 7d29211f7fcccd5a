//! End-to-end flows through the use cases against an in-memory store.

use clinic_core::db::Database;
use clinic_core::models::{BillItemRequest, Gender, MedicineUpdate, NewMedicine, NewPatient};
use clinic_core::use_cases::{
    AddMedicine, AddPatient, CreateBill, DeletePatient, GetAllBills, GetAllMedicines, GetPatient,
    ListPatients, UpdateMedicine,
};
use clinic_core::ClinicError;
use proptest::prelude::*;

fn registration(name: &str, phone: &str) -> NewPatient {
    NewPatient::new(name.to_string(), 30, Gender::Female, phone.to_string())
}

#[test]
fn test_active_phone_conflicts_regardless_of_other_fields() {
    let db = Database::open_in_memory().unwrap();
    AddPatient::new(&db)
        .execute(registration("Asha", "555-0101"))
        .unwrap();

    let mut different = NewPatient::new("Ben".into(), 71, Gender::Male, "555-0101".into());
    different.email = Some("ben@example.com".into());

    let result = AddPatient::new(&db).execute(different);
    assert!(matches!(result, Err(ClinicError::Conflict(_))));
    assert_eq!(ListPatients::new(&db).execute(0, 10).unwrap().len(), 1);
}

#[test]
fn test_reregistering_deleted_phone_reactivates_same_record() {
    let db = Database::open_in_memory().unwrap();
    let original = AddPatient::new(&db)
        .execute(registration("Asha", "555-0101"))
        .unwrap();
    DeletePatient::new(&db).execute(&original.patient_id).unwrap();

    let mut again = registration("Asha Rao", "555-0101");
    again.age = 31;
    let reactivated = AddPatient::new(&db).execute(again).unwrap();

    assert_eq!(reactivated.patient_id, original.patient_id);
    assert_eq!(reactivated.first_name, "Asha Rao");
    assert_eq!(reactivated.age, 31);
    assert!(reactivated.is_active);

    let fetched = GetPatient::new(&db).execute(&original.patient_id).unwrap();
    assert_eq!(fetched, reactivated);
}

#[test]
fn test_soft_deleted_patient_disappears_from_reads() {
    let db = Database::open_in_memory().unwrap();
    let asha = AddPatient::new(&db)
        .execute(registration("Asha", "555-0101"))
        .unwrap();
    let ben = AddPatient::new(&db)
        .execute(registration("Ben", "555-0102"))
        .unwrap();

    DeletePatient::new(&db).execute(&asha.patient_id).unwrap();

    let listed = ListPatients::new(&db).execute(0, 10).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].patient_id, ben.patient_id);
    assert!(matches!(
        GetPatient::new(&db).execute(&asha.patient_id),
        Err(ClinicError::NotFound(_))
    ));
}

#[test]
fn test_overdrawn_bill_mutates_nothing() {
    let db = Database::open_in_memory().unwrap();
    let med = AddMedicine::new(&db)
        .execute(NewMedicine::new("Amoxicillin", 5.0, 100))
        .unwrap();

    let result = CreateBill::new(&db, &db).execute(
        "Asha".into(),
        30,
        vec![BillItemRequest {
            medicine_id: med.id,
            quantity: 101,
            price_per_unit: None,
        }],
    );

    assert!(matches!(result, Err(ClinicError::InsufficientStock { .. })));
    assert!(GetAllBills::new(&db).execute().unwrap().is_empty());
    let medicines = GetAllMedicines::new(&db).execute().unwrap();
    assert_eq!(medicines[0].stock, 100);
}

#[test]
fn test_valid_bill_totals_and_dispenses() {
    let db = Database::open_in_memory().unwrap();
    let med = AddMedicine::new(&db)
        .execute(NewMedicine::new("Amoxicillin", 3.0, 100))
        .unwrap();

    let bill = CreateBill::new(&db, &db)
        .execute(
            "Asha".into(),
            30,
            vec![BillItemRequest {
                medicine_id: med.id,
                quantity: 10,
                price_per_unit: Some(5.0),
            }],
        )
        .unwrap();

    assert_eq!(bill.total_amount, 50.0);
    let medicines = GetAllMedicines::new(&db).execute().unwrap();
    assert_eq!(medicines[0].stock, 90);

    let bills = GetAllBills::new(&db).execute().unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].total_amount, 50.0);
    assert_eq!(bills[0].bill_items[0].quantity, 10);
}

#[test]
fn test_stock_only_update_keeps_name_and_price() {
    let db = Database::open_in_memory().unwrap();
    let med = AddMedicine::new(&db)
        .execute(NewMedicine::new("Amoxicillin", 3.0, 100))
        .unwrap();

    let updated = UpdateMedicine::new(&db)
        .execute(
            med.id,
            MedicineUpdate {
                stock: Some(12),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Amoxicillin");
    assert_eq!(updated.price_per_unit, 3.0);
    assert_eq!(updated.stock, 12);
}

proptest! {
    #[test]
    fn prop_bill_total_is_sum_of_lines(
        lines in prop::collection::vec((1i64..20, 0u32..10_000), 1..8)
    ) {
        let db = Database::open_in_memory().unwrap();
        let mut requests = Vec::new();
        let mut expected = 0.0;

        for (i, (quantity, cents)) in lines.iter().enumerate() {
            let price = *cents as f64 / 100.0;
            let med = AddMedicine::new(&db)
                .execute(NewMedicine::new(format!("Medicine {}", i), 1.0, 1_000))
                .unwrap();
            expected += price * *quantity as f64;
            requests.push(BillItemRequest {
                medicine_id: med.id,
                quantity: *quantity,
                price_per_unit: Some(price),
            });
        }

        let bill = CreateBill::new(&db, &db)
            .execute("Asha".into(), 30, requests)
            .unwrap();

        prop_assert!((bill.total_amount - expected).abs() < 1e-9);
        let line_sum: f64 = bill.bill_items.iter().map(|item| item.price_per_unit * item.quantity as f64).sum();
        prop_assert!((bill.total_amount - line_sum).abs() < 1e-9);
    }
}
