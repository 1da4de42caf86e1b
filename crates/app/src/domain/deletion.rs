//! What happens to dependent rows when a parent row is deleted.
//!
//! The schema implements these rules as foreign key actions; the table here
//! is the reference they are checked against.

/// Action taken on a child row when its parent is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    Cascade,
    SetNull,
}

impl OnDelete {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "ON DELETE CASCADE",
            Self::SetNull => "ON DELETE SET NULL",
        }
    }
}

/// One foreign key and its deletion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionPolicy {
    pub child: &'static str,
    pub column: &'static str,
    pub parent: &'static str,
    pub on_delete: OnDelete,
}

const fn policy(
    child: &'static str,
    column: &'static str,
    parent: &'static str,
    on_delete: OnDelete,
) -> DeletionPolicy {
    DeletionPolicy {
        child,
        column,
        parent,
        on_delete,
    }
}

pub const DELETION_POLICIES: [DeletionPolicy; 8] = [
    policy("offers", "user_id", "users", OnDelete::Cascade),
    policy("offer_details", "offer_id", "offers", OnDelete::Cascade),
    policy("orders", "offer_detail_id", "offer_details", OnDelete::Cascade),
    policy("orders", "business_user_id", "users", OnDelete::Cascade),
    policy("orders", "customer_user_id", "users", OnDelete::SetNull),
    policy("reviews", "business_user_id", "users", OnDelete::Cascade),
    policy("reviews", "reviewer_id", "users", OnDelete::Cascade),
    policy("api_tokens", "user_id", "users", OnDelete::Cascade),
];

/// Tables whose rows disappear, directly or transitively, when a row of
/// `parent` is deleted.
#[must_use]
pub fn cascades_from(parent: &str) -> Vec<&'static str> {
    let mut affected: Vec<&'static str> = Vec::new();
    let mut frontier = vec![parent.to_string()];

    while let Some(table) = frontier.pop() {
        for rule in DELETION_POLICIES
            .iter()
            .filter(|rule| rule.parent == table && rule.on_delete == OnDelete::Cascade)
        {
            if !affected.contains(&rule.child) {
                affected.push(rule.child);
                frontier.push(rule.child.to_string());
            }
        }
    }

    affected
}
