use bps_domain::order::{BatteryPackage, Location, Order, OrderId, PickupDate};
use bps_orders::{OrderBook, OrderQuery};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn location(n: u64) -> Location {
    Location {
        state: "Virginia".to_owned(),
        city: "Virginia Beach".to_owned(),
        street_address: format!("{} Example Street", n % 50),
        zip_code: "12345".to_owned(),
    }
}

fn book_with(count: u64) -> OrderBook {
    let book = OrderBook::new();
    for id in 0..count {
        book.add_order(Order {
            order_id: OrderId(id),
            date: PickupDate::new(2023, 9, u32::try_from(id % 28 + 1).unwrap_or(1)),
            location: location(id),
            packages: vec![BatteryPackage {
                battery_type: "lithium-ion".to_owned(),
                battery_weight: 12.5,
                quality: 80,
                return_reason: String::new(),
            }],
            distance: 40.0,
            accepted: false,
        });
    }
    book
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_lookup");

    for size in [100_u64, 1_000, 10_000] {
        let book = book_with(size);
        let by_location = OrderQuery::by_location(location(7), None);
        let by_date = OrderQuery::by_location(location(7), Some(PickupDate::new(2023, 9, 8)));

        group.bench_with_input(BenchmarkId::new("by_id", size), &book, |b, book| {
            b.iter(|| black_box(book.find(&OrderQuery::ById(OrderId(size / 2)))));
        });
        group.bench_with_input(BenchmarkId::new("by_location", size), &book, |b, book| {
            b.iter(|| black_box(book.find(&by_location)));
        });
        group.bench_with_input(BenchmarkId::new("by_location_and_date", size), &book, |b, book| {
            b.iter(|| black_box(book.find(&by_date)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find);
criterion_main!(benches);
