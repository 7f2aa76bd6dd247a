//! The "at least one active admin" invariant.
//!
//! Role changes and activation toggles on admin accounts must never leave the
//! system without an active administrator. These checks are pure functions
//! over already-fetched state; the persistence layer evaluates them against
//! rows it holds locks on, so concurrent writers cannot race past a stale
//! count.

use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Error message for every last-admin violation, static or raced.
///
/// A caller that lost a concurrent race gets the same message as one whose
/// request was invalid to begin with; the corrective action (re-read and
/// retry) is identical.
pub const LAST_ADMIN_MESSAGE: &str = "Cannot remove the last active administrator";

/// May the target's role change from `current_role` to `new_role`?
///
/// Demoting an admin requires at least one *other* active admin to remain.
/// Any change that does not take the admin role away is always allowed.
pub fn can_demote(current_role: &str, new_role: &str, other_active_admins: i64) -> bool {
    if current_role == ROLE_ADMIN && new_role != ROLE_ADMIN {
        other_active_admins >= 1
    } else {
        true
    }
}

/// May the target's `is_active` flag change from `currently_active` to `new_active`?
///
/// Deactivating an active admin requires at least one *other* active admin.
pub fn can_deactivate(
    target_role: &str,
    currently_active: bool,
    new_active: bool,
    other_active_admins: i64,
) -> bool {
    if target_role == ROLE_ADMIN && currently_active && !new_active {
        other_active_admins >= 1
    } else {
        true
    }
}

/// Does the combined update (role and/or activation) need the guarded,
/// count-checking write path?
///
/// True when the target is currently an admin and the update either takes
/// the role away or deactivates the account.
pub fn update_needs_guard(current_role: &str, new_role: &str, new_active: bool) -> bool {
    current_role == ROLE_ADMIN && (new_role != ROLE_ADMIN || !new_active)
}

/// A principal may never delete its own account through the admin
/// user-management endpoint, regardless of admin count.
pub fn can_delete_user(actor_id: DbId, target_id: DbId) -> bool {
    actor_id != target_id
}
