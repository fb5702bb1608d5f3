use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Member id that always denotes the account holder. Never persisted as a
/// `FamilyMember` record.
pub const SELF_MEMBER_ID: &str = "self";

/// Display name written next to the account holder's allocation.
pub const SELF_MEMBER_NAME: &str = "Self";

/// Whose money an aggregate is counted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Perspective {
    /// Only the account holder's recorded stake in each item.
    Personal,
    /// Every item at its full value, ownership is never split.
    #[default]
    Family,
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Perspective::Personal => write!(f, "personal"),
            Perspective::Family => write!(f, "family"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OwnershipKind {
    #[default]
    Sole,
    Partial,
}

impl OwnershipKind {
    /// Wire label used by the document store (`"sole"` / `"partial"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipKind::Sole => "sole",
            OwnershipKind::Partial => "partial",
        }
    }
}

impl std::fmt::Display for OwnershipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member's percentage stake in an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// `"self"` for the account holder, otherwise a `FamilyMember` id.
    /// Dangling ids are kept as-is.
    pub member_id: String,
    pub member_name: String,
    pub percentage: Decimal,
}

impl Allocation {
    pub fn new(
        member_id: impl Into<String>,
        member_name: impl Into<String>,
        percentage: Decimal,
    ) -> Self {
        Self {
            member_id: member_id.into(),
            member_name: member_name.into(),
            percentage,
        }
    }

    /// The account holder's allocation at the given percentage.
    pub fn holder(percentage: Decimal) -> Self {
        Self::new(SELF_MEMBER_ID, SELF_MEMBER_NAME, percentage)
    }

    pub fn is_holder(&self) -> bool {
        self.member_id == SELF_MEMBER_ID
    }
}

/// How an asset or liability is split between the holder and family members.
///
/// Partial allocations are checked to sum to 100 only when an item is
/// entered; persisted data is accepted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    pub kind: OwnershipKind,
    pub allocations: Vec<Allocation>,
}

impl Ownership {
    /// Sole ownership: the holder owns 100%.
    pub fn sole() -> Self {
        Self {
            kind: OwnershipKind::Sole,
            allocations: vec![Allocation::holder(Decimal::ONE_HUNDRED)],
        }
    }

    pub fn partial(allocations: Vec<Allocation>) -> Self {
        Self {
            kind: OwnershipKind::Partial,
            allocations,
        }
    }

    /// The holder's allocation, if one was recorded.
    pub fn holder_allocation(&self) -> Option<&Allocation> {
        self.allocations.iter().find(|a| a.is_holder())
    }

    /// Sum of all recorded percentages.
    pub fn total_percentage(&self) -> Decimal {
        crate::money::saturating_sum(self.allocations.iter().map(|a| a.percentage))
    }
}

impl Default for Ownership {
    fn default() -> Self {
        Self::sole()
    }
}
