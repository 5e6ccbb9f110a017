//! Item allocation rules.
//!
//! Defines the item and request status vocabularies, the allocation policy
//! (immediate auto-approval vs. reserve-then-decide), the admin decision set
//! with the request statuses each decision may be applied from, and the
//! validators shared by the engine and the HTTP layer.
//!
//! Per-item state machine:
//!
//! ```text
//! available --[submit, auto-approve]--> distributed
//! available --[submit, review queue]--> reserved
//! reserved  --[decide: approved]------> distributed
//! reserved  --[decide: rejected]------> available
//! reserved  --[cancel]----------------> available
//! ```
//!
//! Nothing leaves `distributed`.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Item availability constants
// ---------------------------------------------------------------------------

/// Item is in the shared pool and may be requested.
pub const ITEM_AVAILABLE: &str = "available";
/// Item is held against a pending request.
pub const ITEM_RESERVED: &str = "reserved";
/// Item is bound to a recipient but not yet handed over.
pub const ITEM_ALLOCATED: &str = "allocated";
/// Item has been given out. Terminal.
pub const ITEM_DISTRIBUTED: &str = "distributed";

/// All valid item availability statuses.
pub const VALID_ITEM_STATUSES: &[&str] = &[
    ITEM_AVAILABLE,
    ITEM_RESERVED,
    ITEM_ALLOCATED,
    ITEM_DISTRIBUTED,
];

// ---------------------------------------------------------------------------
// Request status constants
// ---------------------------------------------------------------------------

/// Awaiting an admin decision.
pub const REQUEST_PENDING: &str = "pending";
/// Approved; a distribution exists for the request's item.
pub const REQUEST_APPROVED: &str = "approved";
/// Rejected by an admin; the item went back to the pool.
pub const REQUEST_REJECTED: &str = "rejected";
/// Approved and being prepared for hand-over.
pub const REQUEST_IN_FULFILLMENT: &str = "in_fulfillment";
/// Handed over to the recipient.
pub const REQUEST_FULFILLED: &str = "fulfilled";

/// All valid request statuses.
pub const VALID_REQUEST_STATUSES: &[&str] = &[
    REQUEST_PENDING,
    REQUEST_APPROVED,
    REQUEST_REJECTED,
    REQUEST_IN_FULFILLMENT,
    REQUEST_FULFILLED,
];

// ---------------------------------------------------------------------------
// Limits and defaults
// ---------------------------------------------------------------------------

/// Lowest accepted satisfaction rating.
pub const MIN_RATING: i16 = 1;
/// Highest accepted satisfaction rating.
pub const MAX_RATING: i16 = 5;

/// Quantity used when a request does not specify one.
pub const DEFAULT_REQUEST_QUANTITY: i32 = 1;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Item availability status with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Available,
    Reserved,
    Allocated,
    Distributed,
}

impl ItemStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => ITEM_AVAILABLE,
            Self::Reserved => ITEM_RESERVED,
            Self::Allocated => ITEM_ALLOCATED,
            Self::Distributed => ITEM_DISTRIBUTED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            ITEM_AVAILABLE => Ok(Self::Available),
            ITEM_RESERVED => Ok(Self::Reserved),
            ITEM_ALLOCATED => Ok(Self::Allocated),
            ITEM_DISTRIBUTED => Ok(Self::Distributed),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown item status: '{other}'. Valid statuses: {}",
                VALID_ITEM_STATUSES.join(", ")
            ))),
        }
    }

    /// Statuses this status may move to.
    pub fn valid_transitions(&self) -> &'static [ItemStatus] {
        match self {
            Self::Available => &[Self::Reserved, Self::Allocated, Self::Distributed],
            Self::Reserved => &[Self::Available, Self::Distributed],
            Self::Allocated => &[Self::Available, Self::Distributed],
            Self::Distributed => &[],
        }
    }

    pub fn can_transition_to(&self, next: ItemStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

/// Item request status with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    InFulfillment,
    Fulfilled,
}

impl RequestStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => REQUEST_PENDING,
            Self::Approved => REQUEST_APPROVED,
            Self::Rejected => REQUEST_REJECTED,
            Self::InFulfillment => REQUEST_IN_FULFILLMENT,
            Self::Fulfilled => REQUEST_FULFILLED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            REQUEST_PENDING => Ok(Self::Pending),
            REQUEST_APPROVED => Ok(Self::Approved),
            REQUEST_REJECTED => Ok(Self::Rejected),
            REQUEST_IN_FULFILLMENT => Ok(Self::InFulfillment),
            REQUEST_FULFILLED => Ok(Self::Fulfilled),
            other => Err(CoreError::InvalidArgument(format!(
                "Unknown request status: '{other}'. Valid statuses: {}",
                VALID_REQUEST_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// When an item leaves the available pool and whether an admin gate exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPolicy {
    /// Submitting a request approves it and creates the distribution at once.
    AutoApprove,
    /// Submitting a request reserves the item until an admin decides.
    ReviewQueue,
}

impl AllocationPolicy {
    pub fn from_auto_approve(auto_approve: bool) -> Self {
        if auto_approve {
            Self::AutoApprove
        } else {
            Self::ReviewQueue
        }
    }

    pub fn is_auto_approve(&self) -> bool {
        matches!(self, Self::AutoApprove)
    }

    /// Item status written by a successful submission.
    pub fn target_item_status(&self) -> ItemStatus {
        match self {
            Self::AutoApprove => ItemStatus::Distributed,
            Self::ReviewQueue => ItemStatus::Reserved,
        }
    }

    /// Status a freshly submitted request is created with.
    pub fn initial_request_status(&self) -> RequestStatus {
        match self {
            Self::AutoApprove => RequestStatus::Approved,
            Self::ReviewQueue => RequestStatus::Pending,
        }
    }

    /// Notes recorded on a distribution created under this policy.
    pub fn distribution_note(&self, reason: Option<&str>) -> String {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        match self {
            Self::AutoApprove => format!("Auto-allocated: {}", reason.unwrap_or("Item requested")),
            Self::ReviewQueue => format!("Approved: {}", reason.unwrap_or("Request approved")),
        }
    }
}

// ---------------------------------------------------------------------------
// Admin decisions
// ---------------------------------------------------------------------------

/// Decision value accepted as an alias of `completed`.
pub const DECISION_FULFILLED_ALIAS: &str = "fulfilled";

/// All valid decision values (excluding aliases).
pub const VALID_DECISIONS: &[&str] = &["approved", "rejected", "in_fulfillment", "completed"];

/// What a decision does to the request's item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// Move the reserved item to distributed and create the distribution.
    Commit,
    /// Put the reserved item back in the pool.
    Release,
    /// Request metadata only.
    None,
}

/// An admin decision on an item request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
    InFulfillment,
    Completed,
}

impl Decision {
    /// Parse from a string, returning an error for unknown decisions.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "in_fulfillment" => Ok(Self::InFulfillment),
            "completed" | DECISION_FULFILLED_ALIAS => Ok(Self::Completed),
            other => Err(CoreError::InvalidArgument(format!(
                "Invalid decision '{other}'. Must be one of: {}",
                VALID_DECISIONS.join(", ")
            ))),
        }
    }

    /// Request status written when the decision is applied.
    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            Self::Approved => RequestStatus::Approved,
            Self::Rejected => RequestStatus::Rejected,
            Self::InFulfillment => RequestStatus::InFulfillment,
            Self::Completed => RequestStatus::Fulfilled,
        }
    }

    /// Request statuses the decision may be applied from.
    pub fn allowed_from(&self) -> &'static [RequestStatus] {
        match self {
            Self::Approved | Self::Rejected => &[RequestStatus::Pending],
            Self::InFulfillment => &[RequestStatus::Approved],
            Self::Completed => &[RequestStatus::Approved, RequestStatus::InFulfillment],
        }
    }

    pub fn item_effect(&self) -> ItemEffect {
        match self {
            Self::Approved => ItemEffect::Commit,
            Self::Rejected => ItemEffect::Release,
            Self::InFulfillment | Self::Completed => ItemEffect::None,
        }
    }

    /// Validate that the decision can be applied to a request in `current`.
    pub fn validate_from(&self, current: RequestStatus) -> Result<(), CoreError> {
        if self.allowed_from().contains(&current) {
            Ok(())
        } else {
            Err(CoreError::InvalidState(format!(
                "Cannot move request from '{}' to '{}'",
                current.as_str(),
                self.resulting_status().as_str()
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a satisfaction rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::InvalidArgument(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// Check a planned item move against the transition table.
///
/// Every caller picks its `from`/`to` pair in code, so a miss here is a bug
/// rather than bad input.
pub fn validate_item_transition(from: ItemStatus, to: ItemStatus) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::Internal(format!(
            "Item cannot move from '{}' to '{}'",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Resolve the quantity for a new request against the item's quantity.
pub fn resolve_quantity(requested: Option<i32>, item_quantity: i32) -> Result<i32, CoreError> {
    let quantity = requested.unwrap_or(DEFAULT_REQUEST_QUANTITY);
    if quantity < 1 {
        return Err(CoreError::InvalidArgument(
            "Quantity must be at least 1".to_string(),
        ));
    }
    if quantity > item_quantity {
        return Err(CoreError::InvalidArgument(format!(
            "Requested quantity {quantity} exceeds available quantity {item_quantity}"
        )));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn item_status_round_trips_through_strings() {
        for s in VALID_ITEM_STATUSES {
            assert_eq!(ItemStatus::from_str(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn unknown_item_status_is_invalid_argument() {
        assert_matches!(
            ItemStatus::from_str("lost"),
            Err(CoreError::InvalidArgument(_))
        );
    }

    #[test]
    fn distributed_is_terminal() {
        assert!(ItemStatus::Distributed.valid_transitions().is_empty());
        assert!(!ItemStatus::Distributed.can_transition_to(ItemStatus::Available));
    }

    #[test]
    fn reserved_can_return_to_pool_or_be_distributed() {
        assert!(ItemStatus::Reserved.can_transition_to(ItemStatus::Available));
        assert!(ItemStatus::Reserved.can_transition_to(ItemStatus::Distributed));
        assert!(!ItemStatus::Reserved.can_transition_to(ItemStatus::Allocated));
    }

    #[test]
    fn item_transition_outside_table_is_internal() {
        assert!(validate_item_transition(ItemStatus::Available, ItemStatus::Reserved).is_ok());
        assert_matches!(
            validate_item_transition(ItemStatus::Distributed, ItemStatus::Available),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn policy_from_flag() {
        assert_eq!(
            AllocationPolicy::from_auto_approve(true),
            AllocationPolicy::AutoApprove
        );
        assert_eq!(
            AllocationPolicy::from_auto_approve(false),
            AllocationPolicy::ReviewQueue
        );
    }

    #[test]
    fn auto_approve_commits_immediately() {
        let policy = AllocationPolicy::AutoApprove;
        assert_eq!(policy.target_item_status(), ItemStatus::Distributed);
        assert_eq!(policy.initial_request_status(), RequestStatus::Approved);
    }

    #[test]
    fn review_queue_reserves() {
        let policy = AllocationPolicy::ReviewQueue;
        assert_eq!(policy.target_item_status(), ItemStatus::Reserved);
        assert_eq!(policy.initial_request_status(), RequestStatus::Pending);
    }

    #[test]
    fn distribution_note_uses_reason_or_fallback() {
        assert_eq!(
            AllocationPolicy::AutoApprove.distribution_note(Some("school books")),
            "Auto-allocated: school books"
        );
        assert_eq!(
            AllocationPolicy::AutoApprove.distribution_note(None),
            "Auto-allocated: Item requested"
        );
        assert_eq!(
            AllocationPolicy::ReviewQueue.distribution_note(Some("   ")),
            "Approved: Request approved"
        );
    }

    #[test]
    fn fulfilled_is_an_alias_of_completed() {
        assert_eq!(Decision::from_str("fulfilled").unwrap(), Decision::Completed);
        assert_eq!(Decision::from_str("completed").unwrap(), Decision::Completed);
    }

    #[test]
    fn unknown_decision_is_invalid_argument() {
        let err = Decision::from_str("maybe").unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(ref msg) if msg.contains("Invalid decision"));
    }

    #[test]
    fn approve_and_reject_only_from_pending() {
        assert!(Decision::Approved.validate_from(RequestStatus::Pending).is_ok());
        assert!(Decision::Rejected.validate_from(RequestStatus::Pending).is_ok());
        assert_matches!(
            Decision::Approved.validate_from(RequestStatus::Approved),
            Err(CoreError::InvalidState(_))
        );
        assert_matches!(
            Decision::Rejected.validate_from(RequestStatus::Fulfilled),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn fulfillment_follows_approval() {
        assert!(Decision::InFulfillment
            .validate_from(RequestStatus::Approved)
            .is_ok());
        assert!(Decision::Completed
            .validate_from(RequestStatus::InFulfillment)
            .is_ok());
        assert!(Decision::Completed.validate_from(RequestStatus::Approved).is_ok());
        assert!(Decision::InFulfillment
            .validate_from(RequestStatus::Pending)
            .is_err());
    }

    #[test]
    fn decision_item_effects() {
        assert_eq!(Decision::Approved.item_effect(), ItemEffect::Commit);
        assert_eq!(Decision::Rejected.item_effect(), ItemEffect::Release);
        assert_eq!(Decision::InFulfillment.item_effect(), ItemEffect::None);
        assert_eq!(Decision::Completed.item_effect(), ItemEffect::None);
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert_matches!(validate_rating(0), Err(CoreError::InvalidArgument(_)));
        assert_matches!(validate_rating(6), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(resolve_quantity(None, 3).unwrap(), 1);
    }

    #[test]
    fn quantity_must_fit_item() {
        assert_eq!(resolve_quantity(Some(3), 3).unwrap(), 3);
        assert_matches!(resolve_quantity(Some(4), 3), Err(CoreError::InvalidArgument(_)));
        assert_matches!(resolve_quantity(Some(0), 3), Err(CoreError::InvalidArgument(_)));
    }
}
