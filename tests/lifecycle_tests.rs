use chrono::NaiveDate;
use property_core::{
    core::services::{
        EntryService, NewObligation, ObligationPatch, ObligationService, PropertyService,
        ServiceError,
    },
    ledger::{EntryKind, EntryStatus, Ledger, Property},
};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn prepared_ledger() -> (Ledger, Uuid) {
    let mut ledger = Ledger::new("Rentals");
    let property = Property::new("Elm Street 12").with_address("12 Elm Street");
    let property_id = PropertyService::add(&mut ledger, property).expect("add property");
    (ledger, property_id)
}

fn internet_input(property_id: Uuid) -> NewObligation {
    NewObligation::new(property_id, "Internet", "ISP", 80.0, date(2024, 1, 31))
}

#[test]
fn create_without_proof_yields_single_pending_entry() {
    let (mut ledger, property_id) = prepared_ledger();

    let (obligation, generated) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");

    assert_eq!(obligation.due_day, 31);
    assert_eq!(generated.len(), 1);
    assert_eq!(ledger.entries.len(), 1);

    let entry = &ledger.entries[0];
    assert_eq!(entry.due_date, date(2024, 1, 31));
    assert_eq!(entry.status, EntryStatus::Pending);
    assert_eq!(entry.kind, EntryKind::Expense);
    assert_eq!(entry.amount, 80.0);
    assert_eq!(entry.category, "Internet");
    assert_eq!(entry.payee.as_deref(), Some("ISP"));
    assert_eq!(entry.reference_id, Some(obligation.id));
    assert!(entry.payment_date.is_none());
}

#[test]
fn create_with_proof_yields_cleared_and_next_pending() {
    let (mut ledger, property_id) = prepared_ledger();
    let mut input = internet_input(property_id);
    input.proof_of_payment = Some("receipt-0001".into());

    let (obligation, generated) = ObligationService::create(&mut ledger, input).expect("create");

    assert_eq!(generated.len(), 2);
    let cleared = &generated[0];
    assert_eq!(cleared.status, EntryStatus::Cleared);
    assert_eq!(cleared.payment_date, Some(date(2024, 1, 31)));
    assert_eq!(cleared.attachments, vec!["receipt-0001".to_string()]);

    // 2024 is a leap year; the pre-generated follow-up clamps to Feb 29.
    let pending = &generated[1];
    assert_eq!(pending.status, EntryStatus::Pending);
    assert_eq!(pending.due_date, date(2024, 2, 29));
    assert_eq!(pending.reference_id, Some(obligation.id));
}

#[test]
fn create_validates_before_any_mutation() {
    let (mut ledger, property_id) = prepared_ledger();

    let mut no_name = internet_input(property_id);
    no_name.name = "  ".into();
    let err = ObligationService::create(&mut ledger, no_name).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let mut no_provider = internet_input(property_id);
    no_provider.provider = String::new();
    let err = ObligationService::create(&mut ledger, no_provider).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let mut zero_amount = internet_input(property_id);
    zero_amount.amount = 0.0;
    let err = ObligationService::create(&mut ledger, zero_amount).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert!(ledger.obligations.is_empty());
    assert!(ledger.entries.is_empty());
}

#[test]
fn create_rejects_unknown_property() {
    let (mut ledger, _) = prepared_ledger();
    let err = ObligationService::create(&mut ledger, internet_input(Uuid::new_v4())).unwrap_err();
    assert!(matches!(err, ServiceError::PropertyNotFound(_)));
    assert!(ledger.obligations.is_empty());
    assert!(ledger.entries.is_empty());
}

#[test]
fn clearing_the_entry_generates_the_next_cycle() {
    let (mut ledger, property_id) = prepared_ledger();
    let (obligation, generated) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");

    EntryService::set_status(
        &mut ledger,
        generated[0].id,
        EntryStatus::Cleared,
        Some(date(2024, 1, 31)),
    )
    .expect("clear");

    assert_eq!(ledger.entries.len(), 2);
    assert_eq!(ledger.entries_for_reference(obligation.id).len(), 2);
    let follow_up = ledger
        .entries
        .iter()
        .find(|entry| entry.status == EntryStatus::Pending)
        .expect("follow-up entry");
    assert_eq!(follow_up.due_date, date(2024, 2, 29));
    assert_eq!(follow_up.reference_id, Some(obligation.id));
}

#[test]
fn lookups_surface_not_found() {
    let (mut ledger, property_id) = prepared_ledger();
    let (obligation, generated) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");

    assert!(PropertyService::get(&ledger, property_id).is_ok());
    assert_eq!(
        ObligationService::get(&ledger, obligation.id).expect("get").name,
        "Internet"
    );
    assert!(EntryService::get(&ledger, generated[0].id).is_ok());

    assert!(matches!(
        PropertyService::get(&ledger, Uuid::new_v4()),
        Err(ServiceError::PropertyNotFound(_))
    ));
    assert!(matches!(
        ObligationService::get(&ledger, Uuid::new_v4()),
        Err(ServiceError::ObligationNotFound(_))
    ));
    assert!(matches!(
        EntryService::get(&ledger, Uuid::new_v4()),
        Err(ServiceError::EntryNotFound(_))
    ));
}

#[test]
fn edit_reclamps_open_entries_and_updates_fields() {
    let (mut ledger, property_id) = prepared_ledger();
    let (obligation, generated) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");
    EntryService::set_status(&mut ledger, generated[0].id, EntryStatus::Cleared, None)
        .expect("clear");

    let patch = ObligationPatch {
        due_day: Some(15),
        amount: Some(95.0),
        name: Some("Fiber Internet".into()),
        ..Default::default()
    };
    let updated = ObligationService::edit(&mut ledger, obligation.id, patch).expect("edit");

    // Only the still-open follow-up entry is touched.
    assert_eq!(updated, 1);
    let pending = ledger
        .entries
        .iter()
        .find(|entry| entry.status == EntryStatus::Pending)
        .expect("pending entry");
    assert_eq!(pending.due_date, date(2024, 2, 15));
    assert_eq!(pending.amount, 95.0);
    assert_eq!(pending.category, "Fiber Internet");

    let cleared = ledger
        .entries
        .iter()
        .find(|entry| entry.status == EntryStatus::Cleared)
        .expect("cleared entry");
    assert_eq!(cleared.due_date, date(2024, 1, 31));
    assert_eq!(cleared.amount, 80.0);
    assert_eq!(cleared.category, "Internet");
}

#[test]
fn edit_amount_cascades_to_every_open_entry() {
    let (mut ledger, property_id) = prepared_ledger();
    let (obligation, generated) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");
    // Settle two cycles so the ledger holds cleared history plus one open entry.
    EntryService::set_status(&mut ledger, generated[0].id, EntryStatus::Cleared, None)
        .expect("clear first");
    let second = ledger
        .entries
        .iter()
        .find(|entry| entry.is_open())
        .expect("second cycle")
        .id;
    EntryService::set_status(&mut ledger, second, EntryStatus::Cleared, None)
        .expect("clear second");

    let patch = ObligationPatch {
        amount: Some(120.0),
        ..Default::default()
    };
    let updated = ObligationService::edit(&mut ledger, obligation.id, patch).expect("edit");

    assert_eq!(updated, 1);
    for entry in &ledger.entries {
        if entry.status == EntryStatus::Cleared {
            assert_eq!(entry.amount, 80.0);
        } else {
            assert_eq!(entry.amount, 120.0);
        }
    }
}

#[test]
fn edit_validates_patch_and_existence() {
    let (mut ledger, property_id) = prepared_ledger();
    let (obligation, _) =
        ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");

    let bad_day = ObligationPatch {
        due_day: Some(32),
        ..Default::default()
    };
    let err = ObligationService::edit(&mut ledger, obligation.id, bad_day).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = ObligationService::edit(&mut ledger, Uuid::new_v4(), ObligationPatch::default())
        .unwrap_err();
    assert!(matches!(err, ServiceError::ObligationNotFound(_)));
}

#[test]
fn delete_removes_open_entries_and_keeps_cleared() {
    let (mut ledger, property_id) = prepared_ledger();
    let mut input = internet_input(property_id);
    input.proof_of_payment = Some("receipt-0002".into());
    let (obligation, _) = ObligationService::create(&mut ledger, input).expect("create");
    assert_eq!(ledger.entries.len(), 2);

    let removed = ObligationService::remove(&mut ledger, obligation.id).expect("remove");

    assert_eq!(removed, 1);
    assert!(ledger.obligation(obligation.id).is_none());
    assert_eq!(ledger.entries.len(), 1);
    let survivor = &ledger.entries[0];
    assert_eq!(survivor.status, EntryStatus::Cleared);
    // Historical record stays linked even though the obligation is gone.
    assert_eq!(survivor.reference_id, Some(obligation.id));
}

#[test]
fn delete_unknown_obligation_is_an_error() {
    let (mut ledger, _) = prepared_ledger();
    let err = ObligationService::remove(&mut ledger, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, ServiceError::ObligationNotFound(_)));
}

#[test]
fn recurring_amount_feeds_follow_up_entries() {
    let (mut ledger, property_id) = prepared_ledger();
    let mut input = internet_input(property_id);
    input.recurring_amount = Some(75.0);
    input.proof_of_payment = Some("receipt-0003".into());

    let (_, generated) = ObligationService::create(&mut ledger, input).expect("create");

    assert_eq!(generated[0].amount, 80.0);
    assert_eq!(generated[1].amount, 75.0);
}

#[test]
fn list_scopes_obligations_by_property() {
    let (mut ledger, property_id) = prepared_ledger();
    let other = PropertyService::add(&mut ledger, Property::new("Oak Avenue 3")).expect("add");
    ObligationService::create(&mut ledger, internet_input(property_id)).expect("create");
    ObligationService::create(
        &mut ledger,
        NewObligation::new(other, "HOA dues", "Oak HOA", 150.0, date(2024, 3, 1)),
    )
    .expect("create");

    assert_eq!(ObligationService::list(&ledger, property_id).len(), 1);
    assert_eq!(ObligationService::list(&ledger, other).len(), 1);
    assert_eq!(PropertyService::list(&ledger).len(), 2);
}

#[test]
fn property_names_must_be_unique() {
    let (mut ledger, _) = prepared_ledger();
    let err = PropertyService::add(&mut ledger, Property::new("elm street 12")).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}
