use chrono::Utc;
use common::{OrderId, OrderItemId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Money, Order, OrderData, OrderItem, PaymentMethod, ProductId};
use serde_json::json;

fn sample_order(item_count: usize) -> Order {
    let data = OrderData::parse(json!({
        "user_id": "bench-user",
        "contact_phone": "555-0100",
        "email": "bench@example.com",
        "shipping_method": "standard",
        "shipping_address": "1 Main St",
        "payment_method": 1,
        "order_items": [
            {"product_id": "SKU-SEED", "product_name": "Seed", "quantity": 1, "unit_price": 100}
        ]
    }))
    .unwrap();

    let mut order = Order::create(OrderId::new(1), &data, Utc::now());
    let items = (0..item_count)
        .map(|i| OrderItem {
            order_item_id: OrderItemId::new(i as i64 + 1),
            user_id: UserId::new("bench-user"),
            order_id: order.order_id,
            product_id: ProductId::new(format!("SKU-{i:04}")),
            product_name: format!("Product {i}"),
            quantity: (i % 5) as u32 + 1,
            unit_price: Money::from_cents(100 + i as i64),
        })
        .collect();
    order.set_order_items(items);
    order
}

fn bench_total_amount(c: &mut Criterion) {
    let mut order = sample_order(50);

    c.bench_function("domain/calculate_total_amount", |b| {
        b.iter(|| order.calculate_total_amount().unwrap());
    });
}

fn bench_serialize_order(c: &mut Criterion) {
    let mut order = sample_order(20);
    order.calculate_total_amount().unwrap();

    c.bench_function("domain/serialize_order", |b| {
        b.iter(|| serde_json::to_string(&order).unwrap());
    });
}

fn bench_parse_placement_payload(c: &mut Criterion) {
    let payload = json!({
        "user_id": "bench-user",
        "contact_phone": "555-0100",
        "email": "bench@example.com",
        "shipping_method": "standard",
        "shipping_address": "1 Main St",
        "payment_method": 0,
        "order_items": [
            {"product_id": "SKU-001", "product_name": "Widget", "quantity": 2, "unit_price": 1000},
            {"product_id": "SKU-002", "product_name": "Gadget", "quantity": 1, "unit_price": 500}
        ]
    });

    c.bench_function("domain/parse_placement_payload", |b| {
        b.iter(|| OrderData::parse(payload.clone()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_total_amount,
    bench_serialize_order,
    bench_parse_placement_payload
);
criterion_main!(benches);
