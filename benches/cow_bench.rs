use cow_view::{
    LineItem, Measurement, Money, Order, OrderField, OrderStatus, OrderView, SortOrder, ViewParams,
};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// ─── Test Data ──────────────────────────────────────────────────────────────

const ORDER_COUNT: usize = 1_000;

fn make_order(i: usize) -> Order {
    let status = OrderStatus::ALL[i % OrderStatus::ALL.len()];
    Order::builder(format!("order:{i:05}"), format!("Customer {}", i % 97))
        .status(status)
        .total(Money::usd((i as i64 * 7_919) % 50_000))
        .placed_at(1_700_000_000 + i as u64 * 60)
        .priority(i % 11 == 0)
        .weight(Measurement::grams((i % 40) as f64 * 125.0))
        .line_item(LineItem::new(format!("SKU-{:03}", i % 150), "Coffee beans", 1, 1_450))
        .line_item(LineItem::new("SKU-MUG", if i % 3 == 0 { "Red mug" } else { "Plain mug" }, 2, 900))
        .tag("channel", if i % 2 == 0 { "web" } else { "store" })
        .notes("deliver before noon")
        .build()
}

fn make_orders() -> Vec<Order> {
    (0..ORDER_COUNT).map(make_order).collect()
}

fn sorted_params() -> ViewParams {
    ViewParams::new()
        .sorted_by(OrderField::Status, SortOrder::Descending)
        .unwrap()
        .sorted_by(OrderField::PlacedAt, SortOrder::Ascending)
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 1: Equality
// ═══════════════════════════════════════════════════════════════════════════

fn bench_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("equality");

    let a = make_order(42);
    let shared = a.clone();
    let rebuilt = make_order(42);
    let mut late_diff = make_order(42);
    late_diff.set_notes(None);
    let early_diff = make_order(43);

    group.bench_function("identical", |b| {
        b.iter(|| black_box(black_box(&a) == black_box(&shared)))
    });

    group.bench_function("equal, distinct storage", |b| {
        b.iter(|| black_box(black_box(&a) == black_box(&rebuilt)))
    });

    group.bench_function("differs in first field", |b| {
        b.iter(|| black_box(black_box(&a) == black_box(&early_diff)))
    });

    group.bench_function("differs in last field", |b| {
        b.iter(|| black_box(black_box(&a) == black_box(&late_diff)))
    });

    let orders = make_orders();
    let snapshot = orders.clone();
    let rebuilt_orders = make_orders();

    group.bench_function("collection, shared elements", |b| {
        b.iter(|| black_box(black_box(&orders) == black_box(&snapshot)))
    });

    group.bench_function("collection, rebuilt elements", |b| {
        b.iter(|| black_box(black_box(&orders) == black_box(&rebuilt_orders)))
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 2: Copy-on-write
// ═══════════════════════════════════════════════════════════════════════════

fn bench_copy_on_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_on_write");

    let order = make_order(7);

    group.bench_function("clone handle", |b| b.iter(|| black_box(order.clone())));

    group.bench_function("set_status (unique)", |b| {
        let mut unique = make_order(7);
        b.iter(|| unique.set_status(black_box(OrderStatus::Shipped)))
    });

    group.bench_function("set_status (shared, forks)", |b| {
        b.iter_batched(
            || order.clone(),
            |mut copy| {
                copy.set_status(black_box(OrderStatus::Shipped));
                copy
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Group 3: Memoized view
// ═══════════════════════════════════════════════════════════════════════════

fn bench_memo_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("memo_view");

    let orders = make_orders();
    let params = sorted_params();
    let filtered = ViewParams::with_query("red mug")
        .sorted_by(OrderField::Total, SortOrder::Ascending)
        .unwrap();

    group.bench_function("update (hit)", |b| {
        let mut view = OrderView::new(Vec::new(), ViewParams::new());
        view.update(&orders, &params);
        b.iter(|| black_box(view.update(black_box(&orders), black_box(&params))))
    });

    group.bench_function("update (miss, alternating params)", |b| {
        let mut view = OrderView::new(Vec::new(), ViewParams::new());
        let mut toggle = false;
        b.iter(|| {
            let p = if toggle { &params } else { &filtered };
            toggle = !toggle;
            black_box(view.update(black_box(&orders), p))
        })
    });

    group.bench_function("update (one element edited)", |b| {
        let mut view = OrderView::new(Vec::new(), ViewParams::new());
        let mut source = orders.clone();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            source[ORDER_COUNT / 2].set_priority(flip);
            black_box(view.update(black_box(&source), &params))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_equality, bench_copy_on_write, bench_memo_view);
criterion_main!(benches);
