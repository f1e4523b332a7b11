//! Approval state machine for catalog entities.

use serde::{Deserialize, Serialize};

/// The review state of a restaurant.
///
/// State transitions:
/// ```text
/// Draft ──submit──► Submitted ──approve──► Approved
///                       │                     │
///                       └───edit──► NeedsReview ◄──edit┘
///                                       │
///                                       └──approve──► Approved
/// ```
///
/// `Submitted` and `NeedsReview` both sit in the administrator's pending
/// queue; the distinction records whether the entity was ever approved
/// before the current round of review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApprovalState {
    /// Created by the owner, not yet submitted for review.
    #[default]
    Draft,

    /// Submitted by the owner, awaiting first review.
    Submitted,

    /// Approved by an administrator; publicly visible.
    Approved,

    /// Previously submitted or approved, then edited; awaiting re-review.
    NeedsReview,
}

impl ApprovalState {
    /// Returns true if the owner may submit from this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, ApprovalState::Draft)
    }

    /// Returns true if an administrator may approve from this state.
    pub fn can_approve(&self) -> bool {
        matches!(self, ApprovalState::Submitted | ApprovalState::NeedsReview)
    }

    /// Returns true if the entity is publicly visible.
    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalState::Approved)
    }

    /// Returns true if the owner has submitted the entity at some point.
    ///
    /// Recovers the source's `isSubmitted` flag: everything except `Draft`.
    pub fn is_submitted(&self) -> bool {
        !matches!(self, ApprovalState::Draft)
    }

    /// Returns true if the entity sits in the administrator's pending queue.
    pub fn is_pending(&self) -> bool {
        matches!(self, ApprovalState::Submitted | ApprovalState::NeedsReview)
    }

    /// State after an owner edit.
    ///
    /// A draft stays a draft; anything already submitted (approved or not)
    /// loses approval and goes back for review, without losing its
    /// submitted status.
    pub fn after_edit(&self) -> ApprovalState {
        match self {
            ApprovalState::Draft => ApprovalState::Draft,
            _ => ApprovalState::NeedsReview,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalState::Draft => "Draft",
            ApprovalState::Submitted => "Submitted",
            ApprovalState::Approved => "Approved",
            ApprovalState::NeedsReview => "NeedsReview",
        }
    }
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApprovalState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(ApprovalState::Draft),
            "Submitted" => Ok(ApprovalState::Submitted),
            "Approved" => Ok(ApprovalState::Approved),
            "NeedsReview" => Ok(ApprovalState::NeedsReview),
            other => Err(format!("unknown approval state: {other}")),
        }
    }
}
