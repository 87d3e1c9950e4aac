//! Integration tests for the payroll engine.
//!
//! This suite covers:
//! - The end-to-end payroll scenario through the library API
//! - Period and identity validation
//! - Statutory contribution factories and pure table helpers
//! - The HTTP endpoint, including error responses

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    pagibig_employee_rate, pagibig_employer_contribution, pagibig_employer_rate,
    philhealth_employer_contribution, philhealth_monthly_premium, sss_employer_contribution,
    sss_salary_credit,
};
use payroll_engine::components::{
    Allowance, ComponentCategory, Deduction, GovernmentContribution, PayrollComponent,
};
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::EngineError;
use payroll_engine::models::{Attendance, Employee, EmploymentStatus, MAX_AMOUNT, Position};
use payroll_engine::payroll::Payroll;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn create_scenario_payroll() -> Payroll {
    let mut payroll =
        Payroll::new(10001, date("2024-06-01"), date("2024-06-15"), decimal("22000")).unwrap();
    payroll.set_days_worked(decimal("10")).unwrap();
    payroll.set_overtime_pay(decimal("1000")).unwrap();
    payroll.set_rice_subsidy(decimal("1500")).unwrap();
    payroll.set_phone_allowance(decimal("500")).unwrap();
    payroll.set_clothing_allowance(decimal("800")).unwrap();
    payroll.set_sss(decimal("500")).unwrap();
    payroll.set_philhealth(decimal("300")).unwrap();
    payroll.set_pagibig(decimal("200")).unwrap();
    payroll.set_withholding_tax(decimal("1000")).unwrap();
    payroll.set_late_deduction(decimal("100")).unwrap();
    payroll.set_undertime_deduction(decimal("200")).unwrap();
    payroll
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(components: Vec<Value>) -> Value {
    json!({
        "employee_id": 10001,
        "pay_period": {
            "start_date": "2024-06-01",
            "end_date": "2024-06-15"
        },
        "monthly_rate": "22000",
        "days_worked": "10",
        "allowances": {
            "rice_subsidy": "1500",
            "phone_allowance": "500",
            "clothing_allowance": "800"
        },
        "statutory": {
            "sss": "500",
            "philhealth": "300",
            "pagibig": "200",
            "withholding_tax": "1000"
        },
        "deductions": {
            "late": "100",
            "undertime": "200"
        },
        "overtime": [
            { "date": "2024-06-03", "hours": "8", "rate": "100" }
        ],
        "components": components
    })
}

fn assert_total(result: &Value, field: &str, expected: &str) {
    let actual = result["summary"]["totals"][field].as_str().unwrap();
    assert_eq!(
        decimal(actual).normalize(),
        decimal(expected).normalize(),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Payroll aggregation
// =============================================================================

#[test]
fn test_scenario_gross_deductions_and_net() {
    let mut payroll = create_scenario_payroll();
    payroll.recalculate_all().unwrap();

    assert_eq!(payroll.basic_pay(), decimal("10000"));
    assert_eq!(payroll.gross_pay(), decimal("13800"));
    assert_eq!(payroll.total_deductions(), decimal("2300"));
    assert_eq!(payroll.net_pay(), decimal("11500"));
}

#[test]
fn test_net_pay_is_stale_until_recalculated() {
    let mut payroll = create_scenario_payroll();
    assert_eq!(payroll.net_pay(), Decimal::ZERO);

    payroll.recalculate_all().unwrap();
    let before = payroll.net_pay();
    payroll
        .add_component(Allowance::new(10001, "Transport", decimal("500"), decimal("500")).unwrap())
        .unwrap();
    assert_eq!(payroll.net_pay(), before);

    payroll.recalculate_all().unwrap();
    assert_eq!(payroll.net_pay(), before + decimal("500"));
}

#[test]
fn test_components_replace_direct_fields_of_the_same_type() {
    let mut payroll = create_scenario_payroll();
    payroll
        .add_component(Allowance::rice_subsidy(10001, decimal("2500")).unwrap())
        .unwrap();
    payroll
        .add_component(Deduction::late(10001, time("08:45"), decimal("125")).unwrap())
        .unwrap();
    payroll.recalculate_all().unwrap();

    // rice: 1500 field replaced by the capped 2000 component
    assert_eq!(payroll.gross_pay(), decimal("14300"));
    // late: 100 field replaced by the 62.5 component
    assert_eq!(payroll.total_deductions(), decimal("2262.5"));
    assert_eq!(payroll.net_pay(), payroll.gross_pay() - payroll.total_deductions());
}

#[test]
fn test_attendance_feeds_deductions() {
    let mut payroll =
        Payroll::new(10001, date("2024-06-01"), date("2024-06-15"), decimal("22000")).unwrap();
    payroll.set_days_worked(decimal("1")).unwrap();
    let attendance =
        Attendance::new(10001, date("2024-06-03"), time("08:45"), time("16:00")).unwrap();
    let policy = ConfigLoader::load("./config/default")
        .unwrap()
        .attendance_policy();

    payroll.add_attendance(&attendance, policy).unwrap();
    payroll.recalculate_all().unwrap();

    assert_eq!(payroll.components(ComponentCategory::Deduction).len(), 2);
    assert_eq!(payroll.total_deductions(), decimal("187.5"));
    assert_eq!(payroll.net_pay(), decimal("812.5"));
}

#[test]
fn test_payroll_for_employee_with_statutory_schedule() {
    let position = Position::new("Payroll Rank and File", decimal("33000"))
        .unwrap()
        .with_allowances(decimal("1500"), decimal("1000"), decimal("1000"))
        .unwrap();
    let employee = Employee::new(
        10002,
        "Lim",
        "Antonio",
        EmploymentStatus::Probationary,
        position,
    )
    .unwrap();

    let mut payroll =
        Payroll::for_employee(&employee, date("2024-06-16"), date("2024-06-30")).unwrap();
    payroll.set_days_worked(decimal("11")).unwrap();
    payroll.apply_statutory_schedule();
    payroll.recalculate_all().unwrap();

    // SSS 1125 (top credit) + PhilHealth 825 + Pag-IBIG 200 = 2150
    // taxable 30850: (30850 - 20833) × 15% = 1502.55
    assert_eq!(payroll.sss(), decimal("1125"));
    assert_eq!(payroll.philhealth(), decimal("825"));
    assert_eq!(payroll.pagibig(), decimal("200"));
    assert_eq!(payroll.withholding_tax(), decimal("1502.55"));
    assert_eq!(payroll.gross_pay(), decimal("20000"));
    assert_eq!(payroll.total_deductions(), decimal("3652.55"));
}

// =============================================================================
// SECTION 2: Validation
// =============================================================================

#[test]
fn test_period_end_before_start_is_rejected() {
    let err = Payroll::new(10001, date("2024-06-15"), date("2024-06-01"), decimal("22000"))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { .. }));
    assert!(err.to_string().contains("Period end cannot be before start"));
}

#[test]
fn test_failed_period_change_leaves_payroll_untouched() {
    let mut payroll = create_scenario_payroll();
    let before = payroll.clone();
    assert!(payroll.set_period_end(date("2024-05-01")).is_err());
    assert_eq!(payroll, before);
}

#[test]
fn test_non_positive_employee_id_is_rejected_everywhere() {
    assert!(Payroll::new(0, date("2024-06-01"), date("2024-06-15"), decimal("1")).is_err());
    assert!(Allowance::rice_subsidy(0, decimal("1")).is_err());
    assert!(Deduction::late(-1, time("09:00"), decimal("1")).is_err());
    assert!(GovernmentContribution::sss(0, decimal("6000")).is_err());
}

#[test]
fn test_amounts_beyond_the_limit_are_rejected() {
    let err = Payroll::new(10001, date("2024-06-01"), date("2024-06-15"), Decimal::MAX)
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { .. }));
    assert!(err.to_string().contains("monthly_rate"));

    let mut payroll = create_scenario_payroll();
    assert!(payroll.set_days_worked(Decimal::MAX).is_err());
    assert!(payroll.set_overtime_pay(MAX_AMOUNT + Decimal::ONE).is_err());
    assert!(Allowance::new(10001, "Transport", Decimal::MAX, Decimal::MAX).is_err());
    assert!(Deduction::late(10001, time("09:00"), Decimal::MAX).is_err());
    assert!(Deduction::unpaid_leave(10001, Decimal::MAX, decimal("1000")).is_err());
    assert!(GovernmentContribution::sss(10001, Decimal::MAX).is_err());
}

#[test]
fn test_largest_accepted_amounts_fold_without_overflow() {
    let mut payroll =
        Payroll::new(10001, date("2024-06-01"), date("2024-06-15"), MAX_AMOUNT).unwrap();
    payroll.set_days_worked(MAX_AMOUNT).unwrap();
    payroll.set_overtime_pay(MAX_AMOUNT).unwrap();
    payroll.set_rice_subsidy(MAX_AMOUNT).unwrap();
    payroll.set_sss(MAX_AMOUNT).unwrap();
    payroll.set_withholding_tax(MAX_AMOUNT).unwrap();
    payroll.set_unpaid_leave(MAX_AMOUNT).unwrap();
    for _ in 0..10 {
        let leave = Deduction::unpaid_leave(10001, MAX_AMOUNT, payroll.daily_rate()).unwrap();
        payroll.add_component(leave).unwrap();
    }

    payroll.recalculate_all().unwrap();
    assert!(payroll.gross_pay() > MAX_AMOUNT);
    assert_eq!(payroll.net_pay(), payroll.gross_pay() - payroll.total_deductions());
}

#[test]
fn test_over_cap_allowance_is_clamped_not_rejected() {
    let rice = Allowance::rice_subsidy(10001, decimal("99999")).unwrap();
    assert_eq!(rice.amount(), decimal("2000"));
}

// =============================================================================
// SECTION 3: Statutory contributions
// =============================================================================

#[test]
fn test_create_sss() {
    let sss = GovernmentContribution::sss(10001, decimal("6000")).unwrap();
    assert_eq!(sss.component_type(), "SSS");
    assert!(sss.amount() > Decimal::ZERO);
    assert!(sss.description().contains("Social Security System"));
}

#[test]
fn test_create_philhealth() {
    let philhealth = GovernmentContribution::philhealth(10001, decimal("6000")).unwrap();
    assert_eq!(philhealth.component_type(), "PhilHealth");
    assert!(philhealth.amount() > Decimal::ZERO);
    assert!(philhealth.description().contains("Philippine Health Insurance"));
}

#[test]
fn test_create_pagibig() {
    let pagibig = GovernmentContribution::pagibig(10001, decimal("6000")).unwrap();
    assert_eq!(pagibig.component_type(), "Pag-IBIG");
    assert!(pagibig.amount() > Decimal::ZERO);
    assert!(pagibig.description().contains("Home Development Mutual Fund"));
}

#[test]
fn test_contributions_are_negative_components() {
    let component: PayrollComponent =
        GovernmentContribution::pagibig(10001, decimal("6000")).unwrap().into();
    assert_eq!(component.category().label(), "Government Contribution");
    assert!(!component.is_positive_amount());
}

#[test]
fn test_employer_side_helpers() {
    assert_eq!(sss_salary_credit(decimal("6120")), decimal("6000"));
    assert_eq!(sss_employer_contribution(decimal("6000")), decimal("520"));
    assert_eq!(philhealth_monthly_premium(decimal("150000")), decimal("5000"));
    assert_eq!(philhealth_employer_contribution(decimal("30000")), decimal("750"));
    assert_eq!(pagibig_employee_rate(decimal("1499.99")), decimal("0.01"));
    assert_eq!(pagibig_employee_rate(decimal("1500")), decimal("0.02"));
    assert_eq!(pagibig_employer_rate(decimal("1000")), decimal("0.02"));
    assert_eq!(pagibig_employer_contribution(decimal("50000")), decimal("200"));
}

// =============================================================================
// SECTION 4: HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_scenario_with_overtime() {
    let (status, result) = post_calculate(create_router_for_test(), create_request(vec![])).await;

    assert_eq!(status, StatusCode::OK);
    // 8h × 100 × 1.25 = 1000 overtime
    assert_total(&result, "overtime_pay", "1000");
    assert_total(&result, "gross_pay", "13800");
    assert_total(&result, "total_deductions", "2300");
    assert_total(&result, "net_pay", "11500");
    assert!(result["calculation_id"].as_str().is_some());
    assert!(result["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_api_components_with_string_categories() {
    let components = vec![
        json!({
            "category": "Allowance",
            "type": "Meal Allowance",
            "amount": "900",
            "max_amount": "750"
        }),
        json!({ "category": "government contribution", "type": "SSS", "base_salary": "6000" }),
    ];
    let (status, result) =
        post_calculate(create_router_for_test(), create_request(components)).await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "gross_pay", "14550");
    // SSS 500 field replaced by 270 from the table
    assert_total(&result, "total_deductions", "2070");

    let lines = result["summary"]["lines"].as_array().unwrap();
    let sss = lines.iter().find(|line| line["type"] == "SSS").unwrap();
    assert_eq!(sss["source"], "component");
    assert!(
        sss["description"]
            .as_str()
            .unwrap()
            .contains("Social Security System")
    );
}

#[tokio::test]
async fn test_api_attendance_strings_are_parsed() {
    let mut request = create_request(vec![]);
    request["deductions"] = json!({});
    request["attendance"] = json!([
        { "date": "2024-06-04", "log_in": "08:45", "log_out": "16:00:00" }
    ]);
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "deductions_total", "187.5");
}

#[tokio::test]
async fn test_api_malformed_time_returns_400() {
    let mut request = create_request(vec![]);
    request["attendance"] = json!([
        { "date": "2024-06-04", "log_in": "8.45am", "log_out": "17:00" }
    ]);
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_api_unknown_category_returns_400() {
    let components = vec![json!({ "category": "Bonus", "type": "13th Month", "amount": "1000" })];
    let (status, result) =
        post_calculate(create_router_for_test(), create_request(components)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_CATEGORY");
}

#[tokio::test]
async fn test_api_reversed_period_returns_400() {
    let mut request = create_request(vec![]);
    request["pay_period"]["end_date"] = json!("2024-05-31");
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        result["message"]
            .as_str()
            .unwrap()
            .contains("Period end cannot be before start")
    );
}

#[tokio::test]
async fn test_api_overtime_outside_period_returns_400() {
    let mut request = create_request(vec![]);
    request["overtime"] = json!([{ "date": "2024-07-01", "hours": "2" }]);
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_api_missing_field_returns_400() {
    let request = json!({ "employee_id": 10001 });
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_api_overtime_rate_beyond_limit_returns_400() {
    let mut request = create_request(vec![]);
    request["overtime"] = json!([
        { "date": "2024-06-03", "hours": "24", "rate": "79228162514264337593543950335" }
    ]);
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_ARGUMENT");
    assert!(result["message"].as_str().unwrap().contains("rate"));
}

#[tokio::test]
async fn test_api_monthly_rate_beyond_limit_returns_400() {
    let mut request = create_request(vec![]);
    request["monthly_rate"] = json!("79228162514264337593543950335");
    request["days_worked"] = json!("30");
    let (status, result) = post_calculate(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_ARGUMENT");
    assert!(result["message"].as_str().unwrap().contains("monthly_rate"));
}
