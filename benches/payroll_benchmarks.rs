//! Performance benchmarks for the payroll engine.
//!
//! Run with: `cargo bench`

use std::str::FromStr;

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    WITHHOLDING_TAX_TABLE, find_bracket, sss_employee_contribution, sss_salary_credit,
};
use payroll_engine::components::{Allowance, Deduction};
use payroll_engine::config::ConfigLoader;
use payroll_engine::payroll::Payroll;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn create_payroll_with_components(count: usize) -> Payroll {
    let mut payroll =
        Payroll::new(10001, date("2024-06-01"), date("2024-06-15"), dec("22000")).unwrap();
    payroll.set_days_worked(dec("10")).unwrap();
    payroll.set_rice_subsidy(dec("1500")).unwrap();
    payroll.apply_statutory_schedule();
    for i in 0..count {
        if i % 2 == 0 {
            let meal = Allowance::new(10001, "Meal Allowance", dec("150"), dec("500")).unwrap();
            payroll.add_component(meal).unwrap();
        } else {
            payroll
                .add_component(Deduction::unpaid_leave(10001, dec("0.5"), dec("1000")).unwrap())
                .unwrap();
        }
    }
    payroll
}

fn create_request_with_components(count: usize) -> serde_json::Value {
    let components: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            if i % 2 == 0 {
                serde_json::json!({
                    "category": "Allowance",
                    "type": "Meal Allowance",
                    "amount": "150",
                    "max_amount": "500"
                })
            } else {
                serde_json::json!({
                    "category": "Deduction",
                    "type": "Late",
                    "time": "08:40"
                })
            }
        })
        .collect();

    serde_json::json!({
        "employee_id": 10001,
        "pay_period": {
            "start_date": "2024-06-01",
            "end_date": "2024-06-15"
        },
        "monthly_rate": "22000",
        "days_worked": "10",
        "allowances": {
            "rice_subsidy": "1500",
            "phone_allowance": "500"
        },
        "statutory": { "apply_schedule": true },
        "components": components
    })
}

/// Benchmark: statutory table lookups.
fn bench_table_lookups(c: &mut Criterion) {
    let salaries: Vec<Decimal> = (0..100).map(|i| Decimal::from(2500 + i * 350)).collect();

    c.bench_function("sss_lookup_100", |b| {
        b.iter(|| {
            for salary in &salaries {
                black_box(sss_salary_credit(*salary));
                black_box(sss_employee_contribution(*salary));
            }
        })
    });

    c.bench_function("tax_bracket_lookup_100", |b| {
        b.iter(|| {
            for salary in &salaries {
                black_box(find_bracket(&WITHHOLDING_TAX_TABLE, *salary));
            }
        })
    });
}

/// Benchmark: folding a payroll with a handful of components.
///
/// Target: < 50µs mean
fn bench_recalculate(c: &mut Criterion) {
    let payroll = create_payroll_with_components(10);

    c.bench_function("recalculate_10_components", |b| {
        b.iter(|| {
            let mut payroll = payroll.clone();
            payroll.recalculate_all().unwrap();
            black_box(payroll.net_pay())
        })
    });
}

/// Benchmark: single request through the HTTP layer.
///
/// Target: < 1ms mean
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&create_request_with_components(4)).unwrap();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 payroll requests.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let mut request = create_request_with_components(i % 8);
            request["employee_id"] = serde_json::json!(10001 + i);
            serde_json::to_string(&request).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/payroll/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: component counts to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for count in [1, 5, 10, 50, 200].iter() {
        let payroll = create_payroll_with_components(*count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("components", count), count, |b, _| {
            b.iter(|| {
                let mut payroll = payroll.clone();
                payroll.recalculate_all().unwrap();
                black_box(payroll.summary().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_table_lookups,
    bench_recalculate,
    bench_single_request,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
