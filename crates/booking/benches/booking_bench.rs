use booking::{
    AvailabilityResolver, BookingOrchestrator, InMemoryAvailabilityResolver,
    InMemoryNotificationDispatcher, InMemoryPaymentGateway,
};
use booking_store::InMemoryBookingStore;
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{BookingRequest, FixedRateConverter, PricingCalculator, Room};

type BenchOrchestrator = BookingOrchestrator<
    InMemoryAvailabilityResolver,
    InMemoryPaymentGateway,
    InMemoryBookingStore,
    InMemoryNotificationDispatcher,
>;

fn make_orchestrator(rooms: u32) -> BenchOrchestrator {
    let inventory =
        InMemoryAvailabilityResolver::with_rooms((1..=rooms).map(|n| Room::new(format!("{n}"), 2 + n % 3)));
    BookingOrchestrator::new(
        inventory,
        InMemoryPaymentGateway::new(),
        InMemoryBookingStore::new(),
        InMemoryNotificationDispatcher::new(),
        PricingCalculator::new(FixedRateConverter::new(0.92)),
    )
}

fn make_request(prepaid: bool) -> BookingRequest {
    BookingRequest::builder()
        .user_id("bench-user")
        .date_from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        .date_to(NaiveDate::from_ymd_opt(2020, 1, 5).unwrap())
        .guest_count(2)
        .prepaid(prepaid)
        .build()
        .unwrap()
}

fn bench_make_booking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let request = make_request(true);

    c.bench_function("booking/make_booking_prepaid", |b| {
        b.iter(|| {
            rt.block_on(async {
                let orchestrator = make_orchestrator(10);
                orchestrator.make_booking(&request).await.unwrap();
            });
        });
    });
}

fn bench_book_and_cancel(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orchestrator = make_orchestrator(1);
    let request = make_request(false);

    c.bench_function("booking/make_and_cancel", |b| {
        b.iter(|| {
            rt.block_on(async {
                let booking_id = orchestrator.make_booking(&request).await.unwrap();
                orchestrator.cancel_booking(booking_id).await.unwrap();
            });
        });
    });
}

fn bench_reserve_room_large_inventory(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let request = make_request(false);

    c.bench_function("booking/reserve_room_500_rooms", |b| {
        b.iter(|| {
            rt.block_on(async {
                let inventory = InMemoryAvailabilityResolver::with_rooms(
                    (1..=500).map(|n| Room::new(format!("{n:03}"), 1 + n % 6)),
                );
                inventory.reserve_room(&request).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_make_booking,
    bench_book_and_cancel,
    bench_reserve_room_large_inventory
);
criterion_main!(benches);
