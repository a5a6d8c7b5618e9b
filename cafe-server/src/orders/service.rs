//! 订单工作流服务 (Order write path)
//!
//! Every mutation of an order funnels through here: creation, status
//! transitions, payment, refund. HTTP handlers stay thin; this module owns
//! the business rules, consulting two independent tables:
//!
//! - [`crate::auth::permissions`] answers "may this role call this endpoint"
//!   (enforced at the route layer before a request reaches us)
//! - [`transitions`] answers "may this role move this order this way"
//!
//! # 写入流程 (Write flow)
//!
//! ```text
//! validate input ──► conditional repository write ──► reload detail ──► publish event
//! ```
//!
//! 并发: every status write is one conditional UPDATE keyed on the expected
//! prior status, so when two requests race on the same decision point at most
//! one succeeds. The loser gets `OrderStatusConflict` and must re-fetch.

use shared::models::{MenuItem, OrderCreate, OrderStatus, PaymentCreate};
use shared::{AppError, AppResult, ErrorCode, OrderDetail};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order::{NewOrder, NewOrderItem};
use crate::db::repository::{RepoError, customer, menu_item, order, payment};
use crate::orders::{money, transitions};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

/// Retries for the random order number suffix before giving up
const ORDER_NUMBER_ATTEMPTS: u32 = 3;

// ====== Creation ======

/// 创建订单 (all-or-nothing)
///
/// Validates the customer and every line, snapshots unit prices from the
/// current menu, and persists order + items in one transaction. Any failed
/// check aborts the whole call with nothing written.
///
/// - `OrderEmpty`: no line items
/// - `CustomerNotFound` / `MenuItemNotFound`: referenced id missing
/// - `MenuItemUnavailable`: item exists but is currently off sale
pub async fn create_order(
    state: &ServerState,
    user: &CurrentUser,
    data: OrderCreate,
) -> AppResult<OrderDetail> {
    let pool = state.pool();

    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    if data.items.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::OrderEmpty,
            "Order must contain at least one item",
        ));
    }
    for item in &data.items {
        money::validate_quantity(item.quantity)?;
    }

    customer::find_by_id(pool, data.customer_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CustomerNotFound,
                format!("Customer {} not found", data.customer_id),
            )
        })?;

    // Snapshot unit prices line by line. The snapshot is what keeps later
    // catalog price edits away from already-sold orders.
    let mut lines = Vec::with_capacity(data.items.len());
    for item in &data.items {
        let menu_item = fetch_available_item(state, item.menu_item_id).await?;
        lines.push(NewOrderItem {
            menu_item_id: menu_item.id,
            quantity: item.quantity,
            unit_price: menu_item.price,
            total_price: money::line_total(menu_item.price, item.quantity),
        });
    }
    let total_amount = money::order_total(lines.iter().map(|l| l.total_price));

    let notes = data.notes.filter(|n| !n.trim().is_empty());

    // Random 4-digit suffix + UNIQUE(order_number): on the rare collision,
    // regenerate and try again.
    let mut created = None;
    for attempt in 0..ORDER_NUMBER_ATTEMPTS {
        let new_order = NewOrder {
            order_number: generate_order_number(),
            total_amount,
            notes: notes.clone(),
            customer_id: data.customer_id,
            created_by: user.id,
            items: lines.clone(),
        };
        match order::create_with_items(pool, &new_order).await {
            Ok(order) => {
                created = Some(order);
                break;
            }
            Err(RepoError::Duplicate(_)) => {
                tracing::debug!(attempt = attempt + 1, "Order number collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }
    let order =
        created.ok_or_else(|| AppError::internal("Could not allocate a unique order number"))?;

    tracing::info!(
        order_id = order.id,
        order_number = %order.order_number,
        total = %order.total_amount,
        created_by = user.id,
        "Order created"
    );

    let detail = load_detail(state, order.id).await?;
    state.publish_order_created(detail.clone());
    Ok(detail)
}

// ====== Status transitions ======

/// 更新订单状态
///
/// The transition table decides legality for `(current, target, role)`;
/// the write itself is conditional on the status we read, so losing a race
/// to a concurrent writer surfaces as `OrderStatusConflict`, never as a
/// silent overwrite.
///
/// Side effects on specific edges:
/// - PENDING → CONFIRMED records `confirmed_by`
/// - PAID → PREPARING records `prepared_by`
/// - any → CANCELLED also refunds a completed payment, if one exists
pub async fn update_order_status(
    state: &ServerState,
    user: &CurrentUser,
    order_id: i64,
    target: OrderStatus,
) -> AppResult<OrderDetail> {
    let pool = state.pool();

    let current = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?
        .status;

    if !transitions::is_valid_transition(current, target, user.role) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!(
                "{} cannot move an order from {current} to {target}",
                user.role
            ),
        )
        .with_detail("from", current.as_str())
        .with_detail("to", target.as_str()));
    }

    let changed = if target == OrderStatus::Cancelled {
        // Cancelling a paid order refunds its payment in the same transaction
        order::cancel_with_refund(pool, order_id, current).await?
    } else {
        let confirmed_by = (target == OrderStatus::Confirmed).then_some(user.id);
        let prepared_by = (target == OrderStatus::Preparing).then_some(user.id);
        order::update_status_if(pool, order_id, current, target, confirmed_by, prepared_by).await?
    };
    if !changed {
        return Err(status_conflict(order_id, current));
    }

    tracing::info!(
        order_id,
        from = %current,
        to = %target,
        by = user.id,
        role = %user.role,
        "Order status updated"
    );

    let detail = load_detail(state, order_id).await?;
    state.publish_order_updated(detail.clone());
    Ok(detail)
}

// ====== Payments ======

/// 处理支付 (CONFIRMED → PAID)
///
/// Inserts the payment row and advances the order in one transaction. The
/// amount is always the order's stored total; clients never send it.
///
/// - `OrderStatusConflict`: order is not (or no longer) CONFIRMED
/// - `InvalidStatusTransition`: this role may not take payments
/// - `PaymentAlreadyExists`: second attempt after a success
pub async fn process_payment(
    state: &ServerState,
    user: &CurrentUser,
    order_id: i64,
    data: PaymentCreate,
) -> AppResult<OrderDetail> {
    let pool = state.pool();

    let order = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| order_not_found(order_id))?;

    if order.status != OrderStatus::Confirmed {
        return Err(AppError::with_message(
            ErrorCode::OrderStatusConflict,
            format!(
                "Order {order_id} is {}; payment requires CONFIRMED",
                order.status
            ),
        ));
    }
    // Paying IS the CONFIRMED → PAID transition, so the same workflow table
    // applies. SUPER_ADMIN gets denied here even if routing let it through.
    if !transitions::is_valid_transition(OrderStatus::Confirmed, OrderStatus::Paid, user.role) {
        return Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("{} cannot take payments", user.role),
        ));
    }

    let payment = match payment::create_for_order(
        pool,
        order_id,
        order.total_amount,
        data.method,
        data.transaction_id.as_deref(),
    )
    .await
    {
        Ok(Some(payment)) => payment,
        // Order left CONFIRMED between our read and the write
        Ok(None) => return Err(status_conflict(order_id, OrderStatus::Confirmed)),
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::with_message(
                ErrorCode::PaymentAlreadyExists,
                format!("Order {order_id} already has a payment"),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        order_id,
        payment_id = payment.id,
        amount = %payment.amount,
        method = %payment.method,
        by = user.id,
        "Payment processed"
    );

    let detail = load_detail(state, order_id).await?;
    state.publish_order_updated(detail.clone());
    Ok(detail)
}

/// 退款 (COMPLETED payment → REFUNDED, order forced to CANCELLED)
///
/// The refund path bypasses the transition table: whatever state the order
/// reached, a refund pulls it back to CANCELLED. One payment refunds once;
/// a second attempt fails with `PaymentNotRefundable`.
pub async fn refund_payment(
    state: &ServerState,
    user: &CurrentUser,
    payment_id: i64,
) -> AppResult<OrderDetail> {
    let pool = state.pool();

    let payment = payment::find_by_id(pool, payment_id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::PaymentNotFound,
            format!("Payment {payment_id} not found"),
        )
    })?;

    if !payment::refund(pool, payment_id).await? {
        return Err(AppError::with_message(
            ErrorCode::PaymentNotRefundable,
            format!("Payment {payment_id} is already refunded"),
        ));
    }

    tracing::info!(
        payment_id,
        order_id = payment.order_id,
        amount = %payment.amount,
        by = user.id,
        "Payment refunded, order cancelled"
    );

    let detail = load_detail(state, payment.order_id).await?;
    state.publish_order_updated(detail.clone());
    Ok(detail)
}

// ====== Helpers ======

/// Fetch a menu item that must exist and be on sale
async fn fetch_available_item(state: &ServerState, menu_item_id: i64) -> AppResult<MenuItem> {
    let item = menu_item::find_by_id(state.pool(), menu_item_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {menu_item_id} not found"),
            )
        })?;
    if !item.is_available {
        return Err(AppError::with_message(
            ErrorCode::MenuItemUnavailable,
            format!("'{}' is currently unavailable", item.name),
        )
        .with_detail("menu_item_id", menu_item_id));
    }
    Ok(item)
}

/// Reload the denormalized detail view after a successful write
async fn load_detail(state: &ServerState, order_id: i64) -> AppResult<OrderDetail> {
    order::load_detail(state.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Order {order_id} disappeared mid-request")))
}

fn order_not_found(order_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::OrderNotFound,
        format!("Order {order_id} not found"),
    )
}

fn status_conflict(order_id: i64, expected: OrderStatus) -> AppError {
    AppError::with_message(
        ErrorCode::OrderStatusConflict,
        format!("Order {order_id} is no longer {expected}"),
    )
}

/// 订单号: ORD-YYYYMMDD-NNNN (random suffix, uniqueness enforced by the DB)
fn generate_order_number() -> String {
    use rand::Rng;
    let date = chrono::Local::now().format("%Y%m%d");
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("ORD-{date}-{suffix:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let n = generate_order_number();
        // ORD-20250314-0042
        assert_eq!(n.len(), 17);
        assert!(n.starts_with("ORD-"));
        assert_eq!(&n[12..13], "-");
        assert!(n[4..12].chars().all(|c| c.is_ascii_digit()));
        assert!(n[13..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_order_numbers_vary() {
        // 随机后缀，同一毫秒内也应该基本不重复
        let numbers: std::collections::HashSet<String> =
            (0..50).map(|_| generate_order_number()).collect();
        assert!(numbers.len() > 40);
    }
}
