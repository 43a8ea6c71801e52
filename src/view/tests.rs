use std::sync::Arc;

use super::*;
use crate::order::Order;
use crate::probe::Counters;
use crate::types::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn order(id: &str, status: OrderStatus) -> Order {
    Order::builder(id, format!("Customer {id}"))
        .status(status)
        .total(Money::usd(1_000))
        .build()
}

fn ids(orders: &[Order]) -> Vec<&str> {
    orders.iter().map(Order::id).collect()
}

fn by_status_desc() -> ViewParams {
    ViewParams::new()
        .sorted_by(OrderField::Status, SortOrder::Descending)
        .unwrap()
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order::builder("order:1", "Alice")
            .status(OrderStatus::Placed)
            .total(Money::usd(2_500))
            .line_item(LineItem::new("SKU-MUG", "Red Mug", 1, 2_500))
            .build(),
        Order::builder("order:2", "Bob")
            .status(OrderStatus::Shipped)
            .total(Money::usd(900))
            .notes("fragile: glass")
            .build(),
        Order::builder("order:3", "Carol")
            .status(OrderStatus::Placed)
            .total(Money::usd(900))
            .line_item(LineItem::new("SKU-MUG", "Blue Mug", 2, 450))
            .line_item(LineItem::new("SKU-MUG-LID", "Mug lid", 1, 0))
            .build(),
        Order::builder("order:4", "Dave")
            .status(OrderStatus::Completed)
            .total(Money::usd(4_000))
            .build(),
    ]
}

// ═══════════════════════════════════════════════════════════════════════
// Sorting
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_status_descending_keeps_ties_in_input_order() {
    init_tracing();
    let source = vec![
        order("A", OrderStatus::Placed),
        order("B", OrderStatus::Completed),
        order("C", OrderStatus::Placed),
    ];
    let params = by_status_desc();
    let mut view = OrderView::new(source.clone(), params.clone());

    assert_eq!(ids(view.evaluate(&source, &params)), ["B", "A", "C"]);
    assert!(view.output()[1].is_identical(&source[0]));
}

#[test]
fn test_ties_fall_through_to_next_key() {
    let source = sample_orders();
    let params = ViewParams::new()
        .sorted_by(OrderField::Total, SortOrder::Ascending)
        .unwrap()
        .sorted_by(OrderField::Customer, SortOrder::Descending)
        .unwrap();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    // 900 (Carol, Bob), 2500, 4000
    assert_eq!(
        ids(view.evaluate(&source, &params)),
        ["order:3", "order:2", "order:1", "order:4"]
    );
}

#[test]
fn test_full_ties_are_stable() {
    let source: Vec<Order> = (0..20)
        .map(|i| order(&format!("o{i:02}"), OrderStatus::Placed))
        .collect();
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    let output = view.evaluate(&source, &params);
    for (out, input) in output.iter().zip(&source) {
        assert!(out.is_identical(input));
    }
}

#[test]
fn test_no_sort_keys_keeps_source_order() {
    let source = sample_orders();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());
    assert_eq!(
        ids(view.evaluate(&source, &ViewParams::new())),
        ["order:1", "order:2", "order:3", "order:4"]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Filtering
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_filter_matches_own_fields_case_insensitively() {
    let source = sample_orders();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    assert_eq!(ids(view.evaluate(&source, &ViewParams::with_query("BOB"))), ["order:2"]);
    assert_eq!(ids(view.evaluate(&source, &ViewParams::with_query("Glass"))), ["order:2"]);
    assert_eq!(ids(view.evaluate(&source, &ViewParams::with_query("order:4"))), ["order:4"]);
}

#[test]
fn test_filter_matches_nested_line_items_once() {
    let source = sample_orders();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    // order:3 matches through two line items and appears once
    let output = view.evaluate(&source, &ViewParams::with_query("mug"));
    assert_eq!(ids(output), ["order:1", "order:3"]);

    let output = view.evaluate(&source, &ViewParams::with_query("sku-mug-lid"));
    assert_eq!(ids(output), ["order:3"]);
}

#[test]
fn test_filter_config() {
    let source = sample_orders();

    let case_sensitive = ViewConfig {
        case_sensitive: true,
        ..ViewConfig::default()
    };
    let mut view = OrderView::with_config(Vec::new(), ViewParams::new(), case_sensitive);
    assert_eq!(ids(view.evaluate(&source, &ViewParams::with_query("Mug"))), ["order:1", "order:3"]);
    assert!(view.evaluate(&source, &ViewParams::with_query("mUG")).is_empty());

    let own_fields_only = ViewConfig {
        search_line_items: false,
        ..ViewConfig::default()
    };
    let mut view = OrderView::with_config(Vec::new(), ViewParams::new(), own_fields_only);
    assert!(view.evaluate(&source, &ViewParams::with_query("mug")).is_empty());
}

#[test]
fn test_filter_then_sort() {
    let source = sample_orders();
    let params = ViewParams::with_query("mug")
        .sorted_by(OrderField::Total, SortOrder::Ascending)
        .unwrap();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());
    assert_eq!(ids(view.evaluate(&source, &params)), ["order:3", "order:1"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Memoization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_second_evaluation_does_no_work() {
    init_tracing();
    let counters = Arc::new(Counters::new());
    let source = sample_orders();
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new()).with_probe(Arc::clone(&counters));

    assert_eq!(view.update(&source, &params), Lookup::Miss);
    let first: Vec<Order> = view.output().to_vec();
    let first_ptr = view.output().as_ptr();
    counters.reset();

    assert_eq!(view.update(&source, &params), Lookup::Hit);

    let snap = counters.snapshot();
    assert_eq!(snap.filter_runs, 0);
    assert_eq!(snap.sort_runs, 0);
    assert_eq!(snap.recomputes, 0);
    assert_eq!(snap.cache_hits, 1);
    // every cached element is the same block as the source element
    assert_eq!(snap.identity_hits, source.len() as u64);
    assert_eq!(snap.field_compares, 0);

    assert_eq!(view.output().as_ptr(), first_ptr);
    for (a, b) in view.output().iter().zip(&first) {
        assert!(a.is_identical(b));
    }
}

#[test]
fn test_param_change_forces_recompute() {
    let counters = Arc::new(Counters::new());
    let source = sample_orders();
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new()).with_probe(Arc::clone(&counters));

    view.update(&source, &params);
    let extended = params.clone().sorted_by(OrderField::Total, SortOrder::Ascending).unwrap();
    assert_eq!(view.update(&source, &extended), Lookup::Miss);
    assert_eq!(view.update(&source, &extended), Lookup::Hit);

    let mut requery = extended.clone();
    requery.set_query("mug");
    assert_eq!(view.update(&source, &requery), Lookup::Miss);

    let snap = counters.snapshot();
    assert_eq!(snap.recomputes, 3);
    assert_eq!(snap.cache_hits, 1);
    assert_eq!(view.params(), &requery);
}

#[test]
fn test_equal_but_rebuilt_source_still_hits() {
    let counters = Arc::new(Counters::new());
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new()).with_probe(Arc::clone(&counters));

    view.update(&sample_orders(), &params);
    counters.reset();
    assert_eq!(view.update(&sample_orders(), &params), Lookup::Hit);

    let snap = counters.snapshot();
    assert_eq!(snap.identity_hits, 0);
    assert!(snap.field_compares >= FIELD_COUNT as u64 * 4);
}

#[test]
fn test_rebuilt_source_with_nan_weight_still_hits() {
    let nan_orders = || {
        vec![
            Order::builder("order:1", "Alice")
                .weight(Measurement::grams(f64::NAN))
                .build(),
        ]
    };
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    assert_eq!(view.update(&nan_orders(), &params), Lookup::Miss);
    assert_eq!(view.update(&nan_orders(), &params), Lookup::Hit);
}

#[test]
fn test_source_change_forces_recompute() {
    let mut source = sample_orders();
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    view.update(&source, &params);
    source[1].set_status(OrderStatus::Cancelled);
    assert_eq!(view.update(&source, &params), Lookup::Miss);
    assert_eq!(view.output()[0].id(), "order:2");

    source.pop();
    assert_eq!(view.update(&source, &params), Lookup::Miss);
    assert_eq!(view.output().len(), 3);
}

#[test]
fn test_cached_output_is_isolated_from_later_mutation() {
    let mut source = sample_orders();
    let params = by_status_desc();
    let mut view = OrderView::new(Vec::new(), ViewParams::new());

    view.update(&source, &params);
    let before = ids(view.output()).iter().map(|s| s.to_string()).collect::<Vec<_>>();

    // mutate the caller's collection after the snapshot was taken
    source[0].set_status(OrderStatus::Completed);
    source[0].set_customer("Alice (edited)");

    assert_eq!(ids(view.output()), before);
    let cached_alice = view.source().iter().find(|o| o.id() == "order:1").unwrap();
    assert_eq!(cached_alice.status(), OrderStatus::Placed);
    assert_eq!(cached_alice.customer(), "Alice");

    view.update(&source, &params);
    assert_eq!(view.output()[0].customer(), "Alice (edited)");
}

#[test]
fn test_refresh_uses_construction_inputs() {
    let source = vec![
        order("A", OrderStatus::Placed),
        order("B", OrderStatus::Completed),
    ];
    let mut view = OrderView::new(source.clone(), by_status_desc());

    assert!(!view.is_primed());
    assert!(view.try_output().is_none());
    assert_eq!(view.refresh(), Lookup::Miss);
    assert_eq!(ids(view.output()), ["B", "A"]);
    assert_eq!(view.refresh(), Lookup::Hit);
    assert_eq!(view.update(&source, &by_status_desc()), Lookup::Hit);
}

#[test]
#[should_panic(expected = "called before the first update")]
fn test_output_before_update_panics() {
    let view = OrderView::new(sample_orders(), ViewParams::new());
    let _ = view.output();
}
