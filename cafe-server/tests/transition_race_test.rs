//! 并发流转竞争测试
//!
//! 同一订单上并发的状态写入必须恰好一个成功：条件 UPDATE 以读到的
//! 旧状态为前提，输家拿到冲突错误而不是悄悄覆盖。

mod common;

use common::{seed_fixture, seed_staff, test_state};

use cafe_server::db::repository::{order, payment};
use cafe_server::orders::service;
use shared::ErrorCode;
use shared::models::{
    OrderCreate, OrderItemInput, OrderStatus, PaymentCreate, PaymentMethod, StaffRole,
};

/// 输家必须观察到冲突：要么条件写失败 (状态已变)，
/// 要么它读到的已是新状态、流转表直接拒绝。
fn assert_conflict(err: &shared::AppError) {
    assert!(
        matches!(
            err.code,
            ErrorCode::OrderStatusConflict
                | ErrorCode::InvalidStatusTransition
                | ErrorCode::PaymentAlreadyExists
        ),
        "loser must see a conflict, got {:?}",
        err.code
    );
}

#[tokio::test]
async fn test_concurrent_confirms_apply_exactly_once() {
    let (_dir, state) = test_state().await;
    let fx = seed_fixture(&state).await;
    let reception = seed_staff(&state, "reception-1", StaffRole::Reception).await;
    let cashier_a = seed_staff(&state, "cashier-a", StaffRole::Cashier).await;
    let cashier_b = seed_staff(&state, "cashier-b", StaffRole::Cashier).await;

    let created = service::create_order(
        &state,
        &reception,
        OrderCreate {
            customer_id: fx.customer.id,
            items: vec![OrderItemInput {
                menu_item_id: fx.espresso.id,
                quantity: 1,
            }],
            notes: None,
        },
    )
    .await
    .expect("create");
    let order_id = created.order.id;

    // 两个收银员同时确认同一张 PENDING 订单
    let (a, b) = tokio::join!(
        service::update_order_status(&state, &cashier_a, order_id, OrderStatus::Confirmed),
        service::update_order_status(&state, &cashier_b, order_id, OrderStatus::Confirmed),
    );

    let (winner_id, loser) = match (&a, &b) {
        (Ok(_), Err(e)) => (cashier_a.id, e),
        (Err(e), Ok(_)) => (cashier_b.id, e),
        (Ok(_), Ok(_)) => panic!("both confirms succeeded: double-apply"),
        (Err(ea), Err(eb)) => panic!("both confirms failed: {ea} / {eb}"),
    };
    assert_conflict(loser);

    // 赢家的写入完整生效: 状态 CONFIRMED，confirmed_by 指向赢家
    let current = order::find_by_id(state.pool(), order_id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(current.status, OrderStatus::Confirmed);
    assert_eq!(current.confirmed_by, Some(winner_id));
}

#[tokio::test]
async fn test_concurrent_payments_create_exactly_one() {
    let (_dir, state) = test_state().await;
    let fx = seed_fixture(&state).await;
    let cashier_a = seed_staff(&state, "cashier-a", StaffRole::Cashier).await;
    let cashier_b = seed_staff(&state, "cashier-b", StaffRole::Cashier).await;

    let created = service::create_order(
        &state,
        &cashier_a,
        OrderCreate {
            customer_id: fx.customer.id,
            items: vec![OrderItemInput {
                menu_item_id: fx.latte.id,
                quantity: 1,
            }],
            notes: None,
        },
    )
    .await
    .expect("create");
    let order_id = created.order.id;

    service::update_order_status(&state, &cashier_a, order_id, OrderStatus::Confirmed)
        .await
        .expect("confirm");

    let (a, b) = tokio::join!(
        service::process_payment(
            &state,
            &cashier_a,
            order_id,
            PaymentCreate {
                method: PaymentMethod::Cash,
                transaction_id: None,
            },
        ),
        service::process_payment(
            &state,
            &cashier_b,
            order_id,
            PaymentCreate {
                method: PaymentMethod::Card,
                transaction_id: None,
            },
        ),
    );

    match (&a, &b) {
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => assert_conflict(e),
        (Ok(_), Ok(_)) => panic!("both payments succeeded: duplicate payment"),
        (Err(ea), Err(eb)) => panic!("both payments failed: {ea} / {eb}"),
    }

    // 恰好一条支付记录，订单停在 PAID
    let payments = payment::find_all(state.pool()).await.expect("list");
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].order_id, order_id);

    let current = order::find_by_id(state.pool(), order_id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(current.status, OrderStatus::Paid);
}

#[tokio::test]
async fn test_race_repeated_over_many_orders() {
    let (_dir, state) = test_state().await;
    let fx = seed_fixture(&state).await;
    let reception = seed_staff(&state, "reception-1", StaffRole::Reception).await;
    let cashier_a = seed_staff(&state, "cashier-a", StaffRole::Cashier).await;
    let cashier_b = seed_staff(&state, "cashier-b", StaffRole::Cashier).await;

    // 小规模重复跑，放大交错窗口
    for i in 0..20 {
        let created = service::create_order(
            &state,
            &reception,
            OrderCreate {
                customer_id: fx.customer.id,
                items: vec![OrderItemInput {
                    menu_item_id: fx.espresso.id,
                    quantity: 1,
                }],
                notes: None,
            },
        )
        .await
        .expect("create");

        let (a, b) = tokio::join!(
            service::update_order_status(
                &state,
                &cashier_a,
                created.order.id,
                OrderStatus::Confirmed
            ),
            service::update_order_status(
                &state,
                &cashier_b,
                created.order.id,
                OrderStatus::Confirmed
            ),
        );
        assert_eq!(
            a.is_ok() as u8 + b.is_ok() as u8,
            1,
            "round {i}: exactly one confirm must win"
        );
    }

    // 全部订单都到达 CONFIRMED，一单不多一单不少
    let confirmed = order::find_all(state.pool(), Some(OrderStatus::Confirmed))
        .await
        .expect("list");
    assert_eq!(confirmed.len(), 20);
}
