//! Role-gated order status transition table
//!
//! Pure decision logic: no IO, no side effects. The order service is
//! responsible for loading current state, consulting this table, and applying
//! the write conditionally (see `orders::service`).
//!
//! | current   | RECEPTION may  | CASHIER may     | CHEF may         |
//! |-----------|----------------|-----------------|------------------|
//! | PENDING   | CANCELLED      | CONFIRMED, CANCELLED | (none)      |
//! | CONFIRMED | (none)         | PAID, CANCELLED | (none)           |
//! | PAID      | (none)         | CANCELLED       | PREPARING        |
//! | PREPARING | (none)         | (none)          | READY, CANCELLED |
//! | READY     | COMPLETED      | COMPLETED       | COMPLETED        |
//! | COMPLETED | (none)         | (none)          | (none)           |
//! | CANCELLED | (none)         | (none)          | (none)           |
//!
//! SUPER_ADMIN observes only and can never transition an order. Any pair not
//! listed above resolves to the empty set: deny by default, fail closed.

use shared::models::{OrderStatus, StaffRole};

/// Statuses `role` may move an order to from `current`
pub fn allowed_targets(current: OrderStatus, role: StaffRole) -> &'static [OrderStatus] {
    use OrderStatus::*;
    use StaffRole::*;

    match (current, role) {
        (Pending, Reception) => &[Cancelled],
        (Pending, Cashier) => &[Confirmed, Cancelled],
        (Confirmed, Cashier) => &[Paid, Cancelled],
        (Paid, Cashier) => &[Cancelled],
        (Paid, Chef) => &[Preparing],
        (Preparing, Chef) => &[Ready, Cancelled],
        (Ready, Reception | Cashier | Chef) => &[Completed],
        _ => &[],
    }
}

/// Whether `role` may move an order from `current` to `target`
pub fn is_valid_transition(current: OrderStatus, target: OrderStatus, role: StaffRole) -> bool {
    allowed_targets(current, role).contains(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;
    use StaffRole::*;

    /// Every legal (current, role, target) triple. Everything else is denied.
    const LEGAL: &[(OrderStatus, StaffRole, OrderStatus)] = &[
        (Pending, Reception, Cancelled),
        (Pending, Cashier, Confirmed),
        (Pending, Cashier, Cancelled),
        (Confirmed, Cashier, Paid),
        (Confirmed, Cashier, Cancelled),
        (Paid, Cashier, Cancelled),
        (Paid, Chef, Preparing),
        (Preparing, Chef, Ready),
        (Preparing, Chef, Cancelled),
        (Ready, Reception, Completed),
        (Ready, Cashier, Completed),
        (Ready, Chef, Completed),
    ];

    #[test]
    fn test_exhaustive_against_legal_set() {
        // 7 statuses x 4 roles x 7 targets, all 196 combinations
        for current in OrderStatus::ALL {
            for role in StaffRole::ALL {
                for target in OrderStatus::ALL {
                    let expected = LEGAL.contains(&(current, role, target));
                    assert_eq!(
                        is_valid_transition(current, target, role),
                        expected,
                        "({current}, {role}) -> {target}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_deny_everything() {
        for current in [Completed, Cancelled] {
            for role in StaffRole::ALL {
                assert!(allowed_targets(current, role).is_empty());
                for target in OrderStatus::ALL {
                    assert!(!is_valid_transition(current, target, role));
                }
            }
        }
    }

    #[test]
    fn test_super_admin_never_transitions() {
        for current in OrderStatus::ALL {
            for target in OrderStatus::ALL {
                assert!(
                    !is_valid_transition(current, target, SuperAdmin),
                    "SUPER_ADMIN must not transition {current} -> {target}"
                );
            }
        }
    }

    #[test]
    fn test_happy_path_chain() {
        assert!(is_valid_transition(Pending, Confirmed, Cashier));
        assert!(is_valid_transition(Confirmed, Paid, Cashier));
        assert!(is_valid_transition(Paid, Preparing, Chef));
        assert!(is_valid_transition(Preparing, Ready, Chef));
        for role in [Reception, Cashier, Chef] {
            assert!(is_valid_transition(Ready, Completed, role));
        }
    }

    #[test]
    fn test_wrong_role_is_denied() {
        // Confirmation and payment belong to the cashier
        assert!(!is_valid_transition(Pending, Confirmed, Reception));
        assert!(!is_valid_transition(Pending, Confirmed, Chef));
        assert!(!is_valid_transition(Confirmed, Paid, Reception));
        assert!(!is_valid_transition(Confirmed, Paid, Chef));
        // Kitchen steps belong to the chef
        assert!(!is_valid_transition(Paid, Preparing, Cashier));
        assert!(!is_valid_transition(Paid, Preparing, Reception));
        assert!(!is_valid_transition(Preparing, Ready, Cashier));
    }

    #[test]
    fn test_skipping_ahead_is_denied() {
        assert!(!is_valid_transition(Pending, Paid, Cashier));
        assert!(!is_valid_transition(Pending, Ready, Chef));
        assert!(!is_valid_transition(Confirmed, Preparing, Chef));
        assert!(!is_valid_transition(Paid, Completed, Cashier));
    }

    #[test]
    fn test_no_self_transition() {
        for status in OrderStatus::ALL {
            for role in StaffRole::ALL {
                assert!(!is_valid_transition(status, status, role));
            }
        }
    }

    #[test]
    fn test_no_backwards_transition() {
        assert!(!is_valid_transition(Confirmed, Pending, Cashier));
        assert!(!is_valid_transition(Paid, Confirmed, Cashier));
        assert!(!is_valid_transition(Ready, Preparing, Chef));
    }

    #[test]
    fn test_allowed_targets_contents() {
        assert_eq!(allowed_targets(Pending, Cashier), &[Confirmed, Cancelled]);
        assert_eq!(allowed_targets(Pending, Reception), &[Cancelled]);
        assert_eq!(allowed_targets(Paid, Chef), &[Preparing]);
        assert!(allowed_targets(Confirmed, SuperAdmin).is_empty());
    }
}
