//! Performance benchmarks for the HR record core.
//!
//! Covers the scans that run on every request:
//! - Leave conflict detection over growing request lists
//! - Status synchronization over growing directories
//! - The dashboard endpoint end to end
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use hr_core::api::{AppState, Clock, create_router};
use hr_core::app::HrState;
use hr_core::calculation::{DEFAULT_EXCLUDED_STATUSES, has_conflict, sync_statuses};
use hr_core::config::ConfigLoader;
use hr_core::models::{
    DateRange, Employee, EmployeeId, EmployeeStatus, LeaveId, LeaveRequest, LeaveStatus,
    LeaveType,
};
use hr_core::store::RecordStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset % 365))
        .unwrap()
}

/// Creates `count` employees, all `Active`.
fn create_employees(count: u64) -> Vec<Employee> {
    (1..=count)
        .map(|id| Employee {
            id: EmployeeId(id),
            name: format!("Employee {id}"),
            role: "Engineer".to_string(),
            department: "Engineering".to_string(),
            email: format!("e{id}@example.com"),
            join_date: day(0),
            status: EmployeeStatus::Active,
        })
        .collect()
}

/// Creates `count` three-day requests spread over `employees` employees.
fn create_leaves(count: u64, employees: u64) -> Vec<LeaveRequest> {
    let statuses = [LeaveStatus::Pending, LeaveStatus::Approved, LeaveStatus::Rejected];
    (1..=count)
        .map(|id| LeaveRequest {
            id: LeaveId(id),
            employee_id: EmployeeId(id % employees + 1),
            employee_name: format!("Employee {}", id % employees + 1),
            leave_type: LeaveType::Annual,
            start: day(id * 7),
            end: day(id * 7 + 2),
            half_day: false,
            reason: String::new(),
            status: statuses[(id % 3) as usize],
        })
        .collect()
}

fn bench_has_conflict(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_conflict");

    for count in [10u64, 100, 1_000, 10_000].iter() {
        let leaves = create_leaves(*count, 50);
        // Never overlaps anything, so the whole list is scanned.
        let wanted = DateRange::new(day(364), day(364)).unwrap();

        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::new("leaves", count), count, |b, _| {
            b.iter(|| {
                black_box(has_conflict(
                    black_box(&leaves),
                    EmployeeId(999),
                    wanted,
                    DEFAULT_EXCLUDED_STATUSES,
                ))
            })
        });
    }

    group.finish();
}

fn bench_sync_statuses(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_statuses");
    let today = day(70);

    for count in [10u64, 100, 1_000].iter() {
        let employees = create_employees(*count);
        let leaves = create_leaves(*count * 5, *count);

        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::new("employees", count), count, |b, _| {
            b.iter(|| {
                let mut staff = employees.clone();
                black_box(sync_statuses(&mut staff, black_box(&leaves), today))
            })
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/hr_pro").expect("Failed to load config");
    let store = RecordStore::in_memory(config.seed().clone());
    let now = day(41).and_hms_opt(9, 0, 0).unwrap();
    let state = HrState::startup(&store, now.date());
    let router = create_router(AppState::new(
        state,
        store,
        config.settings().attendance.clone(),
        Clock::Fixed(now),
    ));

    c.bench_function("dashboard", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/dashboard")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_has_conflict, bench_sync_statuses, bench_dashboard);
criterion_main!(benches);
