//! Integration tests for the strategy runner on the paper host
//!
//! These drive the full stack: events flow through the runner, the paper host
//! matches orders against market prices, and confirmations loop back into the
//! strategy.

mod common;

use common::{fee_free_host, resting_order, sample_config};
use ping_pong_strategy::runtime::PlacementRequest;
use ping_pong_strategy::{
    create_event_channel, create_event_channel_with_size, ControllerPhase, ExitReason, HostEvent,
    OrderId, OrderUpdate, OrderUpdateStatus, PingPongStrategy, PlaceOrderId, Side, StateStore,
    Strategy, StrategyError, StrategyRunner, TradingHost,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn runner() -> StrategyRunner<PingPongStrategy> {
    let strategy = PingPongStrategy::new(sample_config()).expect("valid config");
    StrategyRunner::new(strategy, fee_free_host())
}

fn sides(placements: &[PlacementRequest]) -> Vec<Side> {
    placements.iter().map(|p| p.side).collect()
}

// ============================================================================
// Synchronous dispatch
// ============================================================================

#[test_log::test]
fn test_launch_rests_initial_buy() {
    let mut runner = runner();
    runner.launch(None).unwrap();

    assert_eq!(runner.host().placements().len(), 1);
    assert_eq!(runner.strategy().phase(), ControllerPhase::HoldingOrder);
    let order = runner.strategy().current_order().unwrap();
    assert_eq!(order.side, Side::Buy);
    assert_eq!(order.price, dec!(0.0207));
    assert!(runner.host().open_order(order.id).is_some());
}

#[test]
fn test_market_crossing_flips_sides() {
    let mut runner = runner();
    runner.launch(None).unwrap();

    // Between the two limits: nothing happens
    assert!(runner.dispatch(HostEvent::MarketPrice(dec!(0.0209))).unwrap());
    assert_eq!(runner.host().placements().len(), 1);

    runner.dispatch(HostEvent::MarketPrice(dec!(0.0206))).unwrap();
    runner.dispatch(HostEvent::MarketPrice(dec!(0.0213))).unwrap();

    assert_eq!(
        sides(runner.host().placements()),
        vec![Side::Buy, Side::Sell, Side::Buy]
    );
    let current = runner.strategy().current_order().unwrap();
    assert_eq!(current.side, Side::Buy);
    assert_eq!(runner.host().buffered_open_orders().len(), 1);
}

#[test]
fn test_marketable_start_flips_on_confirmation() {
    let mut runner = runner();
    // Market already below the buy limit: the buy executes on arrival
    runner.host_mut().apply_market_price(dec!(0.0200));
    runner.launch(None).unwrap();

    let placements = runner.host().placements();
    assert_eq!(sides(placements), vec![Side::Buy, Side::Sell]);
    assert_eq!(placements[1].price, dec!(0.0212));
    assert_eq!(placements[1].amount, dec!(0.1));
    assert_eq!(runner.strategy().current_order().unwrap().side, Side::Sell);
}

#[test]
fn test_partial_fill_then_cancel_resubmits_remainder() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let order_id = runner.strategy().current_order().unwrap().id;

    runner.host_mut().partially_fill(order_id, dec!(0.04)).unwrap();
    runner.deliver_pending().unwrap();
    assert_eq!(
        runner.strategy().current_order().map(|o| o.remaining_amount),
        Some(dec!(0.06))
    );

    runner.host_mut().cancel_order(order_id).unwrap();
    runner.deliver_pending().unwrap();

    let placements = runner.host().placements();
    assert_eq!(placements.len(), 2);
    assert_eq!(placements[1].side, Side::Buy);
    assert_eq!(placements[1].amount, dec!(0.06));
    assert_ne!(runner.strategy().current_order().unwrap().id, order_id);
}

#[test]
fn test_failed_placement_stops_launch() {
    let mut runner = runner();
    runner.host_mut().fail_next_placement("insufficient balance");

    let err = runner.launch(None).unwrap_err();
    assert!(matches!(err, StrategyError::PlaceOrderFailed { place_id: PlaceOrderId(1), .. }));
}

#[test]
fn test_stop_event_ends_dispatch() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    assert!(!runner.dispatch(HostEvent::Stop).unwrap());
}

// ============================================================================
// Restart
// ============================================================================

#[test]
fn test_restart_resumes_tracked_order_without_new_placement() {
    let mut first = runner();
    first.launch(None).unwrap();
    let resting = first.strategy().current_order().unwrap().clone();
    let outcome = first.finish(ExitReason::Finished, None);

    let mut host = fee_free_host();
    host.insert_open_order(resting.clone());
    let mut second = StrategyRunner::new(PingPongStrategy::new(sample_config()).unwrap(), host);
    second.launch(Some(&outcome.final_state)).unwrap();

    assert!(second.host().placements().is_empty());
    assert_eq!(second.strategy().current_order(), Some(&resting));
}

#[test]
fn test_restart_with_vanished_order_starts_fresh() {
    let path = std::env::temp_dir().join(format!("ping_pong_restart_{}.json", std::process::id()));
    let store = StateStore::new(&path);

    let mut strategy = PingPongStrategy::new(sample_config()).unwrap();
    let mut seed_host = fee_free_host();
    seed_host.insert_open_order(resting_order(42, Side::Sell, dec!(0.1)));
    let mut state = ping_pong_strategy::StrategyState::new();
    state.insert("current_order_id".to_string(), "42".to_string());
    strategy.restore_state(&mut seed_host, &state).unwrap();
    store.save(&strategy.save_state()).unwrap();

    // The order is gone by the time we come back
    let restored = store.load().unwrap();
    std::fs::remove_file(&path).ok();
    let mut runner = runner();
    runner.launch(restored.as_ref()).unwrap();

    assert_eq!(runner.host().placements().len(), 1);
    assert_ne!(runner.strategy().current_order().unwrap().id, OrderId(42));
}

#[test]
fn test_late_fill_of_vanished_order_keeps_single_order() {
    let mut state = ping_pong_strategy::StrategyState::new();
    state.insert("current_order_id".to_string(), "42".to_string());

    let mut runner = runner();
    runner.launch(Some(&state)).unwrap();
    assert_eq!(runner.host().placements().len(), 1);

    let late_fill = OrderUpdate::new(
        OrderUpdateStatus::Filled,
        resting_order(42, Side::Sell, rust_decimal::Decimal::ZERO),
    );
    runner.dispatch(HostEvent::OrderUpdate(late_fill)).unwrap();

    assert_eq!(runner.host().placements().len(), 1);
    assert_eq!(runner.host().buffered_open_orders().len(), 1);
}

// ============================================================================
// Async event loop
// ============================================================================

#[test_log::test(tokio::test)]
async fn test_run_until_stop() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let (sender, receiver) = create_event_channel();

    for price in [dec!(0.0206), dec!(0.0213), dec!(0.0206)] {
        sender.send(HostEvent::MarketPrice(price)).await.unwrap();
    }
    sender.send(HostEvent::Stop).await.unwrap();

    let outcome = runner.run(receiver).await;

    assert_eq!(outcome.reason, ExitReason::Finished);
    assert_eq!(outcome.message, None);
    assert_eq!(outcome.orders_placed, 4);
    assert_eq!(
        outcome.final_state.get("current_order_id").map(String::as_str),
        Some("4")
    );
}

#[tokio::test]
async fn test_trading_continues_across_suspend() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let (sender, receiver) = create_event_channel_with_size(8);

    sender.send(HostEvent::Suspend).await.unwrap();
    sender.send(HostEvent::Unsuspend).await.unwrap();
    sender.send(HostEvent::MarketPrice(dec!(0.0206))).await.unwrap();
    sender.send(HostEvent::Stop).await.unwrap();

    let outcome = runner.run(receiver).await;

    assert_eq!(outcome.reason, ExitReason::Finished);
    assert_eq!(outcome.orders_placed, 2);
    assert_eq!(
        outcome.final_state.get("current_order_id").map(String::as_str),
        Some("2")
    );
}

#[tokio::test]
async fn test_unexpected_cancel_ends_run_with_error() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let order = runner.strategy().current_order().unwrap().clone();
    let (sender, receiver) = create_event_channel();

    sender
        .send(HostEvent::CancelOrderSuccess {
            order_id: order.id,
            order,
        })
        .await
        .unwrap();
    sender.send(HostEvent::Stop).await.unwrap();

    let outcome = runner.run(receiver).await;

    assert_eq!(outcome.reason, ExitReason::Error);
    assert!(outcome
        .message
        .unwrap()
        .contains("not supposed to cancel"));
    assert_eq!(outcome.orders_placed, 1);
}

#[tokio::test]
async fn test_stale_placement_error_is_still_fatal() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let (sender, receiver) = create_event_channel();
    sender
        .send(HostEvent::PlaceOrderError {
            place_id: PlaceOrderId(99),
            error: "late rejection".to_string(),
        })
        .await
        .unwrap();

    let outcome = runner.run(receiver).await;

    assert_eq!(outcome.reason, ExitReason::Error);
    assert!(outcome.message.unwrap().contains("late rejection"));
}

#[tokio::test]
async fn test_closed_channel_finishes_cleanly() {
    let mut runner = runner();
    runner.launch(None).unwrap();
    let (sender, receiver) = create_event_channel();
    drop(sender);

    let outcome = runner.run(receiver).await;

    assert_eq!(outcome.reason, ExitReason::Finished);
    assert_eq!(outcome.final_state.len(), 1);
}
