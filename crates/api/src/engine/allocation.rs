//! Allocation engine: request -> allocation -> distribution.
//!
//! The engine is a `Copy` value carrying only the [`AllocationPolicy`]. All
//! state lives in the database and every identity is an explicit argument.
//!
//! Every mutating operation runs in one transaction. Item status changes go
//! through [`ItemRepo::transition_status`], a conditional update on the
//! current status, so concurrent callers racing for the same item resolve to
//! one winner; the loser's transaction is dropped (rolled back) with
//! `InvalidState`.

use donation_core::accounts::ACCOUNT_ACTIVE;
use donation_core::allocation::{
    resolve_quantity, validate_item_transition, validate_rating, AllocationPolicy, Decision, ItemEffect, ItemStatus,
    RequestStatus,
};
use donation_core::error::CoreError;
use donation_core::recipient::VERIFICATION_VERIFIED;
use donation_core::types::DbId;
use donation_db::models::distribution::{CreateDistribution, Distribution, RecipientDistribution};
use donation_db::models::item::{AvailableItem, Item};
use donation_db::models::item_request::{
    CreateItemRequest, ItemRequest, RecipientRequest, RecordDecision,
};
use donation_db::repositories::{
    AdminRepo, DistributionRepo, ItemRepo, ItemRequestRepo, RecipientRepo,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};

const ITEM_NOT_AVAILABLE: &str = "Item is not available";
const ITEM_NOT_RESERVED: &str = "Item is not reserved";
const ONLY_PENDING_CANCELLABLE: &str = "Can only cancel pending requests";

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// A recipient asking for an item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitRequest {
    pub recipient_id: DbId,
    pub item_id: DbId,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
    pub quantity: Option<i32>,
}

/// An admin decision on a request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DecideRequest {
    #[validate(length(min = 1))]
    pub status: String,
    pub admin_id: DbId,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Result of a submission. `distribution` is set under auto-approval.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub request: ItemRequest,
    pub distribution: Option<Distribution>,
}

/// Result of a decision. `distribution` is set when the request was approved.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionOutcome {
    pub request: ItemRequest,
    pub distribution: Option<Distribution>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct AllocationEngine {
    policy: AllocationPolicy,
}

impl AllocationEngine {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Take an available item out of the pool for a verified recipient.
    ///
    /// Under auto-approval the request is created `approved`, a distribution
    /// is recorded and the item becomes `distributed`. Under the review
    /// queue the request is `pending` and the item `reserved`.
    pub async fn submit_request(
        &self,
        pool: &PgPool,
        input: &SubmitRequest,
    ) -> AppResult<SubmitOutcome> {
        let recipient = RecipientRepo::find_by_id(pool, input.recipient_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Recipient",
                id: input.recipient_id,
            })?;
        if recipient.verification_status != VERIFICATION_VERIFIED {
            return Err(CoreError::InvalidState("Recipient is not verified".into()).into());
        }

        let item = ItemRepo::find_by_id(pool, input.item_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Item",
                id: input.item_id,
            })?;
        if ItemStatus::from_str(&item.availability_status)? != ItemStatus::Available {
            tracing::warn!(
                item_id = item.id,
                status = %item.availability_status,
                "Request refused, item not available"
            );
            return Err(CoreError::InvalidState(ITEM_NOT_AVAILABLE.into()).into());
        }
        let quantity = resolve_quantity(input.quantity, item.quantity)?;

        let mut tx = pool.begin().await?;

        claim_item(
            &mut *tx,
            item.id,
            ItemStatus::Available,
            self.policy.target_item_status(),
            ITEM_NOT_AVAILABLE,
        )
        .await?;

        let reason = input
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        let request = ItemRequestRepo::create(
            &mut *tx,
            &CreateItemRequest {
                recipient_id: recipient.id,
                item_id: item.id,
                quantity_requested: quantity,
                request_reason: reason.map(str::to_string),
                request_status: self.policy.initial_request_status().as_str().to_string(),
            },
        )
        .await?;

        let distribution = if self.policy.is_auto_approve() {
            Some(
                DistributionRepo::create(
                    &mut *tx,
                    &CreateDistribution {
                        item_id: item.id,
                        recipient_id: recipient.id,
                        request_id: Some(request.id),
                        quantity,
                        notes: Some(self.policy.distribution_note(reason)),
                    },
                )
                .await?,
            )
        } else {
            None
        };

        tx.commit().await?;

        tracing::info!(
            request_id = request.id,
            item_id = item.id,
            recipient_id = recipient.id,
            status = %request.request_status,
            policy = ?self.policy,
            "Item request submitted"
        );

        Ok(SubmitOutcome {
            request,
            distribution,
        })
    }

    /// Apply an admin decision to a request.
    ///
    /// `approved` commits the reserved item and records the distribution,
    /// `rejected` returns the item to the pool, `in_fulfillment` and
    /// `completed` only update the request.
    pub async fn decide_request(
        &self,
        pool: &PgPool,
        request_id: DbId,
        input: &DecideRequest,
    ) -> AppResult<DecisionOutcome> {
        let decision = Decision::from_str(input.status.trim())?;

        let admin = AdminRepo::find_by_id(pool, input.admin_id)
            .await?
            .filter(|a| a.status == ACCOUNT_ACTIVE)
            .ok_or(CoreError::NotFound {
                entity: "Admin",
                id: input.admin_id,
            })?;

        let current = ItemRequestRepo::find_by_id(pool, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ItemRequest",
                id: request_id,
            })?;
        let current_status = RequestStatus::from_str(&current.request_status)?;
        decision.validate_from(current_status)?;

        let mut tx = pool.begin().await?;

        let request = ItemRequestRepo::record_decision(
            &mut *tx,
            request_id,
            current_status,
            &RecordDecision {
                request_status: decision.resulting_status().as_str().to_string(),
                decided_by: admin.id,
                decision_reason: input.reason.clone(),
                admin_notes: input.notes.clone(),
            },
        )
        .await?
        .ok_or_else(|| {
            CoreError::InvalidState(format!(
                "Request {request_id} changed status while being decided"
            ))
        })?;

        let distribution = match decision.item_effect() {
            ItemEffect::Commit => {
                claim_item(
                    &mut *tx,
                    request.item_id,
                    ItemStatus::Reserved,
                    ItemStatus::Distributed,
                    ITEM_NOT_RESERVED,
                )
                .await?;

                let notes = AllocationPolicy::ReviewQueue
                    .distribution_note(request.request_reason.as_deref());
                Some(
                    DistributionRepo::create(
                        &mut *tx,
                        &CreateDistribution {
                            item_id: request.item_id,
                            recipient_id: request.recipient_id,
                            request_id: Some(request.id),
                            quantity: request.quantity_requested,
                            notes: Some(notes),
                        },
                    )
                    .await?,
                )
            }
            ItemEffect::Release => {
                claim_item(
                    &mut *tx,
                    request.item_id,
                    ItemStatus::Reserved,
                    ItemStatus::Available,
                    ITEM_NOT_RESERVED,
                )
                .await?;
                None
            }
            ItemEffect::None => None,
        };

        tx.commit().await?;

        tracing::info!(
            request_id = request.id,
            item_id = request.item_id,
            admin_id = admin.id,
            from = current_status.as_str(),
            to = %request.request_status,
            "Item request decided"
        );

        Ok(DecisionOutcome {
            request,
            distribution,
        })
    }

    /// Withdraw a pending request and release its reservation.
    pub async fn cancel_request(&self, pool: &PgPool, request_id: DbId) -> AppResult<()> {
        let current = ItemRequestRepo::find_by_id(pool, request_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "ItemRequest",
                id: request_id,
            })?;
        if RequestStatus::from_str(&current.request_status)? != RequestStatus::Pending {
            return Err(CoreError::InvalidState(ONLY_PENDING_CANCELLABLE.into()).into());
        }

        let mut tx = pool.begin().await?;

        let deleted = ItemRequestRepo::delete_pending(&mut *tx, request_id)
            .await?
            .ok_or_else(|| CoreError::InvalidState(ONLY_PENDING_CANCELLABLE.into()))?;

        validate_item_transition(ItemStatus::Reserved, ItemStatus::Available)?;
        let released = ItemRepo::transition_status(
            &mut *tx,
            deleted.item_id,
            ItemStatus::Reserved,
            ItemStatus::Available,
        )
        .await?;
        if released.is_none() {
            tracing::warn!(
                request_id,
                item_id = deleted.item_id,
                "Cancelled request's item was not reserved; item left unchanged"
            );
        }

        tx.commit().await?;

        tracing::info!(request_id, item_id = deleted.item_id, "Item request cancelled");
        Ok(())
    }

    /// Store a satisfaction rating, replacing any earlier one.
    pub async fn rate_distribution(
        &self,
        pool: &PgPool,
        distribution_id: DbId,
        rating: i16,
        feedback: Option<&str>,
    ) -> AppResult<Distribution> {
        validate_rating(rating)?;

        let distribution = DistributionRepo::rate(pool, distribution_id, rating, feedback)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Distribution",
                id: distribution_id,
            })?;

        tracing::info!(distribution_id, rating, "Distribution rated");
        Ok(distribution)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Items still in the pool, newest donation first.
    pub async fn list_available_items(&self, pool: &PgPool) -> AppResult<Vec<AvailableItem>> {
        let items = ItemRepo::list_available(pool).await?;
        tracing::debug!(count = items.len(), "Listed available items");
        Ok(items)
    }

    /// A recipient's requests joined with their items, newest first.
    pub async fn list_requests_by_recipient(
        &self,
        pool: &PgPool,
        recipient_id: DbId,
    ) -> AppResult<Vec<RecipientRequest>> {
        ensure_recipient_exists(pool, recipient_id).await?;
        let requests = ItemRequestRepo::list_by_recipient(pool, recipient_id).await?;
        tracing::debug!(count = requests.len(), recipient_id, "Listed recipient requests");
        Ok(requests)
    }

    /// A recipient's distributions joined with their items, newest first.
    pub async fn list_distributions_by_recipient(
        &self,
        pool: &PgPool,
        recipient_id: DbId,
    ) -> AppResult<Vec<RecipientDistribution>> {
        ensure_recipient_exists(pool, recipient_id).await?;
        let distributions = DistributionRepo::list_by_recipient(pool, recipient_id).await?;
        tracing::debug!(
            count = distributions.len(),
            recipient_id,
            "Listed recipient distributions"
        );
        Ok(distributions)
    }
}

async fn ensure_recipient_exists(pool: &PgPool, recipient_id: DbId) -> Result<(), AppError> {
    RecipientRepo::find_by_id(pool, recipient_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Recipient",
            id: recipient_id,
        })?;
    Ok(())
}

/// Move an item between statuses inside the caller's transaction.
///
/// When the conditional update matches nothing the row is re-read on the same
/// connection: a missing item is `NotFound`, one in any other status is
/// `InvalidState` with `refusal`.
async fn claim_item(
    conn: &mut PgConnection,
    item_id: DbId,
    from: ItemStatus,
    to: ItemStatus,
    refusal: &str,
) -> AppResult<Item> {
    validate_item_transition(from, to)?;

    if let Some(item) = ItemRepo::transition_status(&mut *conn, item_id, from, to).await? {
        return Ok(item);
    }

    match ItemRepo::status_of(&mut *conn, item_id).await? {
        None => Err(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }
        .into()),
        Some(current) => {
            tracing::warn!(
                item_id,
                expected = from.as_str(),
                %current,
                "Item status changed before it could be claimed"
            );
            Err(CoreError::InvalidState(refusal.to_string()).into())
        }
    }
}
