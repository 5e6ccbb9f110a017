//! Repository-level tests for the tables behind item allocation:
//! conditional status transitions, the one-distribution-per-item
//! constraint, and recipient verification.

use donation_core::allocation::{ItemStatus, RequestStatus, ITEM_AVAILABLE, REQUEST_PENDING};
use donation_core::recipient::{VERIFICATION_PENDING, VERIFICATION_VERIFIED};
use donation_db::models::admin::{Admin, CreateAdmin};
use donation_db::models::distribution::CreateDistribution;
use donation_db::models::donor::{CreateDonor, UpdateDonor};
use donation_db::models::item::{CreateItem, Item};
use donation_db::models::item_request::{CreateItemRequest, RecordDecision};
use donation_db::models::recipient::{CreateRecipient, Recipient};
use donation_db::repositories::{
    AdminRepo, DistributionRepo, DonorRepo, ItemRepo, ItemRequestRepo, RecipientRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_item(pool: &PgPool) -> Item {
    let donor = DonorRepo::create(
        pool,
        &CreateDonor {
            full_name: "Dana Donor".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0100".to_string(),
            institution: "Northside High".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap();

    ItemRepo::create(
        pool,
        &CreateItem {
            donor_id: donor.id,
            item_name: "Laptop".to_string(),
            category: "Electronics".to_string(),
            condition: "Good".to_string(),
            description: None,
            estimated_value: Some(250.0),
            quantity: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_recipient(pool: &PgPool, phone: &str) -> Recipient {
    RecipientRepo::create(
        pool,
        &CreateRecipient {
            org_name: "Hope Shelter".to_string(),
            org_type: Some("shelter".to_string()),
            contact_person: "Riley".to_string(),
            phone: phone.to_string(),
            email: None,
            address: "1 Main St".to_string(),
            application_letter: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_admin(pool: &PgPool) -> Admin {
    AdminRepo::create(
        pool,
        &CreateAdmin {
            full_name: "Ada Admin".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn new_items_default_to_available_with_quantity_one(pool: PgPool) {
    let item = seed_item(&pool).await;
    assert_eq!(item.availability_status, ITEM_AVAILABLE);
    assert_eq!(item.quantity, 1);
    assert_eq!(item.estimated_value, 250.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transition_only_applies_from_expected_status(pool: PgPool) {
    let item = seed_item(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let reserved =
        ItemRepo::transition_status(&mut conn, item.id, ItemStatus::Available, ItemStatus::Reserved)
            .await
            .unwrap()
            .expect("first transition should apply");
    assert_eq!(reserved.availability_status, "reserved");

    let second =
        ItemRepo::transition_status(&mut conn, item.id, ItemStatus::Available, ItemStatus::Allocated)
            .await
            .unwrap();
    assert!(second.is_none(), "item is no longer available");

    let missing =
        ItemRepo::transition_status(&mut conn, 999_999, ItemStatus::Available, ItemStatus::Reserved)
            .await
            .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_available_excludes_taken_items_and_joins_donor(pool: PgPool) {
    let item = seed_item(&pool).await;
    assert_eq!(ItemRepo::list_available(&pool).await.unwrap().len(), 1);
    assert_eq!(
        ItemRepo::list_available(&pool).await.unwrap()[0].donor_name,
        "Dana Donor"
    );

    let mut conn = pool.acquire().await.unwrap();
    ItemRepo::transition_status(&mut conn, item.id, ItemStatus::Available, ItemStatus::Reserved)
        .await
        .unwrap();

    assert!(ItemRepo::list_available(&pool).await.unwrap().is_empty());
    let reserved = ItemRepo::list_all(&pool, Some(ItemStatus::Reserved))
        .await
        .unwrap();
    assert_eq!(reserved.len(), 1);
}

// ---------------------------------------------------------------------------
// Requests and distributions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn record_decision_requires_expected_status(pool: PgPool) {
    let item = seed_item(&pool).await;
    let recipient = seed_recipient(&pool, "555-0200").await;
    let admin = seed_admin(&pool).await;
    let mut conn = pool.acquire().await.unwrap();

    let request = ItemRequestRepo::create(
        &mut conn,
        &CreateItemRequest {
            recipient_id: recipient.id,
            item_id: item.id,
            quantity_requested: 1,
            request_reason: Some("winter".to_string()),
            request_status: REQUEST_PENDING.to_string(),
        },
    )
    .await
    .unwrap();

    let decision = RecordDecision {
        request_status: RequestStatus::Approved.as_str().to_string(),
        decided_by: admin.id,
        decision_reason: None,
        admin_notes: Some("ok".to_string()),
    };

    let approved = ItemRequestRepo::record_decision(&mut conn, request.id, RequestStatus::Pending, &decision)
        .await
        .unwrap()
        .expect("pending request should accept a decision");
    assert_eq!(approved.request_status, "approved");
    assert_eq!(approved.decided_by, Some(admin.id));
    assert!(approved.decided_at.is_some());

    let again = ItemRequestRepo::record_decision(&mut conn, request.id, RequestStatus::Pending, &decision)
        .await
        .unwrap();
    assert!(again.is_none(), "request is no longer pending");

    assert!(ItemRequestRepo::delete_pending(&mut conn, request.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_distribution_for_item_violates_unique_constraint(pool: PgPool) {
    let item = seed_item(&pool).await;
    let recipient = seed_recipient(&pool, "555-0200").await;
    let mut conn = pool.acquire().await.unwrap();

    let input = CreateDistribution {
        item_id: item.id,
        recipient_id: recipient.id,
        request_id: None,
        quantity: 1,
        notes: Some("first".to_string()),
    };
    DistributionRepo::create(&mut conn, &input).await.unwrap();

    let err = DistributionRepo::create(&mut conn, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("expected database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_distributions_item_id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_overwrites_previous_value(pool: PgPool) {
    let item = seed_item(&pool).await;
    let recipient = seed_recipient(&pool, "555-0200").await;
    let mut conn = pool.acquire().await.unwrap();

    let distribution = DistributionRepo::create(
        &mut conn,
        &CreateDistribution {
            item_id: item.id,
            recipient_id: recipient.id,
            request_id: None,
            quantity: 1,
            notes: None,
        },
    )
    .await
    .unwrap();
    drop(conn);

    DistributionRepo::rate(&pool, distribution.id, 2, Some("late"))
        .await
        .unwrap();
    let rated = DistributionRepo::rate(&pool, distribution.id, 5, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rated.satisfaction_rating, Some(5));
    assert_eq!(rated.recipient_feedback, None);

    assert!(DistributionRepo::rate(&pool, 999_999, 3, None)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn verify_assigns_code_only_while_pending(pool: PgPool) {
    let recipient = seed_recipient(&pool, "555-0200").await;
    let admin = seed_admin(&pool).await;
    assert_eq!(recipient.verification_status, VERIFICATION_PENDING);
    assert!(recipient.access_code.is_none());

    let verified = RecipientRepo::verify(&pool, recipient.id, admin.id, "RCP123456")
        .await
        .unwrap()
        .expect("pending recipient should verify");
    assert_eq!(verified.verification_status, VERIFICATION_VERIFIED);
    assert_eq!(verified.access_code.as_deref(), Some("RCP123456"));
    assert!(RecipientRepo::access_code_exists(&pool, "RCP123456").await.unwrap());

    let rejected = RecipientRepo::reject(&pool, recipient.id, admin.id, "late")
        .await
        .unwrap();
    assert!(rejected.is_none(), "verified recipient cannot be rejected");

    let found = RecipientRepo::find_verified_by_access_code(&pool, "RCP123456")
        .await
        .unwrap();
    assert_eq!(found.map(|r| r.id), Some(recipient.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_status_filters_recipients(pool: PgPool) {
    let first = seed_recipient(&pool, "555-0201").await;
    seed_recipient(&pool, "555-0202").await;
    let admin = seed_admin(&pool).await;
    RecipientRepo::reject(&pool, first.id, admin.id, "incomplete")
        .await
        .unwrap();

    let pending = RecipientRepo::list_by_status(&pool, Some(VERIFICATION_PENDING))
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);

    let all = RecipientRepo::list_by_status(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_donor_email_is_rejected(pool: PgPool) {
    seed_item(&pool).await;
    let err = DonorRepo::create(
        &pool,
        &CreateDonor {
            full_name: "Other".to_string(),
            email: "dana@example.com".to_string(),
            phone: "555-0101".to_string(),
            institution: "Elsewhere".to_string(),
            password_hash: "hash".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_donors_email")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donor_update_applies_only_given_fields(pool: PgPool) {
    let item = seed_item(&pool).await;
    let updated = DonorRepo::update(
        &pool,
        item.donor_id,
        &UpdateDonor {
            phone: Some("555-0999".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.phone, "555-0999");
    assert_eq!(updated.full_name, "Dana Donor");
}
