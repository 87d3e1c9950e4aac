//! The payroll aggregate.
//!
//! A [`Payroll`] belongs to one employee and one pay period. It collects
//! components into per-category buckets, holds the directly-set allowance,
//! statutory and attendance fields a data-access layer may supply, and folds
//! everything into gross pay, total deductions and net pay.
//!
//! Bucketed components are authoritative: a direct field is counted only when
//! no component with the same type label sits in its bucket. Free-form
//! components (labels with no direct field) are always counted.
//!
//! The three summary figures are cached. They are zero until the first
//! [`Payroll::recalculate_all`] and stay stale until the next one.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{
    pagibig_employee_contribution, philhealth_employee_share, sss_employee_contribution,
    withholding_tax,
};
use crate::components::{
    CLOTHING_ALLOWANCE, ComponentCategory, ContributionScheme, Deduction, LATE, PAGIBIG,
    PHILHEALTH, PHONE_ALLOWANCE, PayrollComponent, RICE_SUBSIDY, SSS, UNDERTIME, UNPAID_LEAVE,
    WITHHOLDING_TAX,
};
use crate::config::{AllowanceCaps, AttendancePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Attendance, Employee, EmployeeId, LeaveRequest, LineSource, Overtime, PayPeriod,
    PayrollLine, PayrollSummary, PayrollTotals, STANDARD_HOURS_PER_DAY, STANDARD_WORKING_DAYS,
    check_max, checked_total,
};

/// A directly-set payroll field, keyed by the label its component would carry.
struct DirectField {
    category: ComponentCategory,
    label: &'static str,
    amount: Decimal,
    scheme: Option<ContributionScheme>,
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid(field, "Amount cannot be negative"));
    }
    check_max(field, value)?;
    Ok(value)
}

/// One employee's pay for one period.
///
/// # Example
///
/// ```
/// use payroll_engine::components::Allowance;
/// use payroll_engine::payroll::Payroll;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut payroll = Payroll::new(
///     10001,
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
///     Decimal::from(22000),
/// ).unwrap();
/// payroll.set_days_worked(Decimal::from(10)).unwrap();
/// payroll
///     .add_component(Allowance::rice_subsidy(10001, Decimal::from(1500)).unwrap())
///     .unwrap();
///
/// payroll.recalculate_all().unwrap();
/// assert_eq!(payroll.gross_pay(), Decimal::from(11500));
/// assert_eq!(payroll.net_pay(), payroll.gross_pay() - payroll.total_deductions());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payroll {
    payroll_id: Option<i64>,
    employee_id: EmployeeId,
    period: PayPeriod,
    monthly_rate: Decimal,
    days_worked: Decimal,
    overtime_hours: Decimal,
    overtime_pay: Decimal,

    // Requested amounts; the caps apply when they are read.
    rice_subsidy: Decimal,
    phone_allowance: Decimal,
    clothing_allowance: Decimal,

    sss: Decimal,
    philhealth: Decimal,
    pagibig: Decimal,
    withholding_tax: Decimal,

    late_deduction: Decimal,
    undertime_deduction: Decimal,
    unpaid_leave: Decimal,

    components: BTreeMap<ComponentCategory, Vec<PayrollComponent>>,
    allowance_caps: AllowanceCaps,

    gross_pay: Decimal,
    total_deductions: Decimal,
    net_pay: Decimal,
}

impl Payroll {
    /// Creates an empty payroll for `employee_id` over `[period_start, period_end]`.
    ///
    /// Fails with "Period end cannot be before start" when the dates are
    /// reversed.
    pub fn new(
        employee_id: i64,
        period_start: NaiveDate,
        period_end: NaiveDate,
        monthly_rate: Decimal,
    ) -> EngineResult<Self> {
        let employee_id = EmployeeId::new(employee_id)?;
        let period = PayPeriod::new(period_start, period_end)?;
        let monthly_rate = non_negative("monthly_rate", monthly_rate)?;

        Ok(Self {
            payroll_id: None,
            employee_id,
            period,
            monthly_rate,
            days_worked: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            rice_subsidy: Decimal::ZERO,
            phone_allowance: Decimal::ZERO,
            clothing_allowance: Decimal::ZERO,
            sss: Decimal::ZERO,
            philhealth: Decimal::ZERO,
            pagibig: Decimal::ZERO,
            withholding_tax: Decimal::ZERO,
            late_deduction: Decimal::ZERO,
            undertime_deduction: Decimal::ZERO,
            unpaid_leave: Decimal::ZERO,
            components: BTreeMap::new(),
            allowance_caps: AllowanceCaps::default(),
            gross_pay: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            net_pay: Decimal::ZERO,
        })
    }

    /// Creates a payroll seeded from an employee's position: monthly rate and
    /// default rice, phone and clothing allowances.
    pub fn for_employee(
        employee: &Employee,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<Self> {
        let position = &employee.position;
        let mut payroll = Self::new(
            employee.employee_id.get(),
            period_start,
            period_end,
            position.monthly_rate,
        )?;
        payroll.set_rice_subsidy(position.rice_subsidy)?;
        payroll.set_phone_allowance(position.phone_allowance)?;
        payroll.set_clothing_allowance(position.clothing_allowance)?;
        Ok(payroll)
    }

    /// Replaces the ceilings applied to the direct allowance fields.
    pub fn with_allowance_caps(mut self, caps: AllowanceCaps) -> Self {
        self.allowance_caps = caps;
        self
    }

    fn check_employee(&self, actual: EmployeeId) -> EngineResult<()> {
        if actual != self.employee_id {
            return Err(EngineError::EmployeeMismatch {
                expected: self.employee_id.get(),
                actual: actual.get(),
            });
        }
        Ok(())
    }

    /// Persistence identifier, if assigned.
    pub fn payroll_id(&self) -> Option<i64> {
        self.payroll_id
    }

    /// Assigns the persistence identifier; it must be positive.
    pub fn set_payroll_id(&mut self, payroll_id: i64) -> EngineResult<()> {
        if payroll_id <= 0 {
            return Err(EngineError::invalid("payroll_id", "Payroll ID must be positive"));
        }
        self.payroll_id = Some(payroll_id);
        Ok(())
    }

    /// The employee being paid.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Reassigns the payroll to another employee.
    ///
    /// Rejected once components for the current employee have been added.
    pub fn set_employee_id(&mut self, employee_id: i64) -> EngineResult<()> {
        let employee_id = EmployeeId::new(employee_id)?;
        if let Some(component) = self
            .components
            .values()
            .flatten()
            .find(|component| component.employee_id() != employee_id)
        {
            return Err(EngineError::EmployeeMismatch {
                expected: employee_id.get(),
                actual: component.employee_id().get(),
            });
        }
        self.employee_id = employee_id;
        Ok(())
    }

    /// The pay period.
    pub fn period(&self) -> PayPeriod {
        self.period
    }

    /// Moves the period start; fails if it would fall after the end.
    pub fn set_period_start(&mut self, period_start: NaiveDate) -> EngineResult<()> {
        self.period = self.period.with_start(period_start)?;
        Ok(())
    }

    /// Moves the period end; fails if it would fall before the start.
    pub fn set_period_end(&mut self, period_end: NaiveDate) -> EngineResult<()> {
        self.period = self.period.with_end(period_end)?;
        Ok(())
    }

    /// Monthly basic salary.
    pub fn monthly_rate(&self) -> Decimal {
        self.monthly_rate
    }

    /// Sets the monthly basic salary.
    pub fn set_monthly_rate(&mut self, monthly_rate: Decimal) -> EngineResult<()> {
        self.monthly_rate = non_negative("monthly_rate", monthly_rate)?;
        Ok(())
    }

    /// Days worked in the period.
    pub fn days_worked(&self) -> Decimal {
        self.days_worked
    }

    /// Sets the days worked.
    pub fn set_days_worked(&mut self, days_worked: Decimal) -> EngineResult<()> {
        self.days_worked = non_negative("days_worked", days_worked)?;
        Ok(())
    }

    /// Monthly rate over 22 standard working days.
    pub fn daily_rate(&self) -> Decimal {
        self.monthly_rate / STANDARD_WORKING_DAYS
    }

    /// Daily rate over an eight-hour day.
    pub fn hourly_rate(&self) -> Decimal {
        self.daily_rate() / STANDARD_HOURS_PER_DAY
    }

    /// `(monthly_rate / 22) × days_worked`. Not cached.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::payroll::Payroll;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let mut payroll = Payroll::new(10001, date, date, Decimal::from(22000)).unwrap();
    /// payroll.set_days_worked(Decimal::from(10)).unwrap();
    /// assert_eq!(payroll.basic_pay(), Decimal::from(10000));
    /// ```
    pub fn basic_pay(&self) -> Decimal {
        self.daily_rate() * self.days_worked
    }

    /// Overtime hours in the period.
    pub fn overtime_hours(&self) -> Decimal {
        self.overtime_hours
    }

    /// Sets the overtime hours.
    pub fn set_overtime_hours(&mut self, hours: Decimal) -> EngineResult<()> {
        self.overtime_hours = non_negative("overtime_hours", hours)?;
        Ok(())
    }

    /// Overtime pay in the period.
    pub fn overtime_pay(&self) -> Decimal {
        self.overtime_pay
    }

    /// Sets the overtime pay.
    pub fn set_overtime_pay(&mut self, pay: Decimal) -> EngineResult<()> {
        self.overtime_pay = non_negative("overtime_pay", pay)?;
        Ok(())
    }

    /// Adds an overtime record's hours and pay. The record must belong to
    /// this employee and fall inside the period.
    pub fn add_overtime(&mut self, overtime: &Overtime) -> EngineResult<()> {
        self.check_employee(overtime.employee_id)?;
        if !self.period.contains_date(overtime.date) {
            return Err(EngineError::invalid(
                "date",
                format!("Overtime on {} is outside the pay period", overtime.date),
            ));
        }
        let hours = checked_total("overtime_hours", self.overtime_hours, overtime.hours)?;
        let pay = checked_total("overtime_pay", self.overtime_pay, overtime.pay()?)?;
        self.overtime_hours = non_negative("overtime_hours", hours)?;
        self.overtime_pay = non_negative("overtime_pay", pay)?;
        Ok(())
    }

    /// Rice subsidy after the cap.
    pub fn rice_subsidy(&self) -> Decimal {
        self.rice_subsidy.min(self.allowance_caps.rice_subsidy)
    }

    /// Sets the rice subsidy. Over-cap amounts are clamped, not rejected.
    pub fn set_rice_subsidy(&mut self, amount: Decimal) -> EngineResult<()> {
        self.rice_subsidy = non_negative("rice_subsidy", amount)?;
        Ok(())
    }

    /// Phone allowance after the cap.
    pub fn phone_allowance(&self) -> Decimal {
        self.phone_allowance.min(self.allowance_caps.phone)
    }

    /// Sets the phone allowance. Over-cap amounts are clamped, not rejected.
    pub fn set_phone_allowance(&mut self, amount: Decimal) -> EngineResult<()> {
        self.phone_allowance = non_negative("phone_allowance", amount)?;
        Ok(())
    }

    /// Clothing allowance after the cap.
    pub fn clothing_allowance(&self) -> Decimal {
        self.clothing_allowance.min(self.allowance_caps.clothing)
    }

    /// Sets the clothing allowance. Over-cap amounts are clamped, not rejected.
    pub fn set_clothing_allowance(&mut self, amount: Decimal) -> EngineResult<()> {
        self.clothing_allowance = non_negative("clothing_allowance", amount)?;
        Ok(())
    }

    /// SSS employee contribution.
    pub fn sss(&self) -> Decimal {
        self.sss
    }

    /// Sets the SSS employee contribution.
    pub fn set_sss(&mut self, amount: Decimal) -> EngineResult<()> {
        self.sss = non_negative("sss", amount)?;
        Ok(())
    }

    /// PhilHealth employee share.
    pub fn philhealth(&self) -> Decimal {
        self.philhealth
    }

    /// Sets the PhilHealth employee share.
    pub fn set_philhealth(&mut self, amount: Decimal) -> EngineResult<()> {
        self.philhealth = non_negative("philhealth", amount)?;
        Ok(())
    }

    /// Pag-IBIG employee contribution.
    pub fn pagibig(&self) -> Decimal {
        self.pagibig
    }

    /// Sets the Pag-IBIG employee contribution.
    pub fn set_pagibig(&mut self, amount: Decimal) -> EngineResult<()> {
        self.pagibig = non_negative("pagibig", amount)?;
        Ok(())
    }

    /// Withholding tax.
    pub fn withholding_tax(&self) -> Decimal {
        self.withholding_tax
    }

    /// Sets the withholding tax.
    pub fn set_withholding_tax(&mut self, amount: Decimal) -> EngineResult<()> {
        self.withholding_tax = non_negative("withholding_tax", amount)?;
        Ok(())
    }

    /// Fills the four statutory fields from the monthly rate.
    ///
    /// Taxable income is the monthly rate less the three employee
    /// contributions.
    pub fn apply_statutory_schedule(&mut self) {
        let salary = self.monthly_rate;
        self.sss = sss_employee_contribution(salary);
        self.philhealth = philhealth_employee_share(salary);
        self.pagibig = pagibig_employee_contribution(salary);
        let taxable = salary - self.sss - self.philhealth - self.pagibig;
        self.withholding_tax = withholding_tax(taxable);
    }

    /// Late deduction total.
    pub fn late_deduction(&self) -> Decimal {
        self.late_deduction
    }

    /// Sets the late deduction total.
    pub fn set_late_deduction(&mut self, amount: Decimal) -> EngineResult<()> {
        self.late_deduction = non_negative("late_deduction", amount)?;
        Ok(())
    }

    /// Undertime deduction total.
    pub fn undertime_deduction(&self) -> Decimal {
        self.undertime_deduction
    }

    /// Sets the undertime deduction total.
    pub fn set_undertime_deduction(&mut self, amount: Decimal) -> EngineResult<()> {
        self.undertime_deduction = non_negative("undertime_deduction", amount)?;
        Ok(())
    }

    /// Unpaid leave deduction total.
    pub fn unpaid_leave(&self) -> Decimal {
        self.unpaid_leave
    }

    /// Sets the unpaid leave deduction total.
    pub fn set_unpaid_leave(&mut self, amount: Decimal) -> EngineResult<()> {
        self.unpaid_leave = non_negative("unpaid_leave", amount)?;
        Ok(())
    }

    /// Buckets a component by its category.
    ///
    /// The component is recalculated on the way in. Components built for
    /// another employee are rejected.
    pub fn add_component(&mut self, component: impl Into<PayrollComponent>) -> EngineResult<()> {
        let mut component = component.into();
        self.check_employee(component.employee_id())?;
        component.calculate();

        let category = component.category();
        debug!(
            employee_id = %self.employee_id,
            category = %category,
            component_type = component.component_type(),
            amount = %component.amount(),
            "Component added"
        );
        self.components.entry(category).or_default().push(component);
        Ok(())
    }

    /// Components in `category`, in insertion order.
    pub fn components(&self, category: ComponentCategory) -> &[PayrollComponent] {
        self.components
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every component, grouped by category.
    pub fn all_components(&self) -> impl Iterator<Item = &PayrollComponent> {
        self.components.values().flatten()
    }

    /// Adds the late and undertime deductions for one attendance row.
    ///
    /// Zero-amount deductions are skipped. The row must belong to this
    /// employee and fall inside the period.
    pub fn add_attendance(
        &mut self,
        attendance: &Attendance,
        policy: AttendancePolicy,
    ) -> EngineResult<()> {
        self.check_employee(attendance.employee_id)?;
        if !self.period.contains_date(attendance.date) {
            return Err(EngineError::invalid(
                "date",
                format!("Attendance on {} is outside the pay period", attendance.date),
            ));
        }

        let hourly_rate = self.hourly_rate();
        let late = attendance.late_deduction(hourly_rate, policy)?;
        let undertime = attendance.undertime_deduction(hourly_rate, policy)?;
        for deduction in [late, undertime] {
            if deduction.amount() > Decimal::ZERO {
                self.add_component(deduction)?;
            }
        }
        Ok(())
    }

    /// Adds an unpaid-leave deduction for the approved unpaid days of
    /// `leave` that fall inside the period.
    pub fn add_leave(&mut self, leave: &LeaveRequest) -> EngineResult<()> {
        self.check_employee(leave.employee_id)?;
        let days = leave.unpaid_days(&self.period);
        if days.is_zero() {
            return Ok(());
        }
        let deduction = Deduction::unpaid_leave(self.employee_id.get(), days, self.daily_rate())?;
        self.add_component(deduction)
    }

    fn direct_fields(&self) -> [DirectField; 10] {
        let field = |category, label, amount, scheme| DirectField {
            category,
            label,
            amount,
            scheme,
        };
        [
            field(ComponentCategory::Allowance, RICE_SUBSIDY, self.rice_subsidy(), None),
            field(
                ComponentCategory::Allowance,
                PHONE_ALLOWANCE,
                self.phone_allowance(),
                None,
            ),
            field(
                ComponentCategory::Allowance,
                CLOTHING_ALLOWANCE,
                self.clothing_allowance(),
                None,
            ),
            field(ComponentCategory::Deduction, LATE, self.late_deduction, None),
            field(ComponentCategory::Deduction, UNDERTIME, self.undertime_deduction, None),
            field(ComponentCategory::Deduction, UNPAID_LEAVE, self.unpaid_leave, None),
            field(
                ComponentCategory::GovernmentContribution,
                SSS,
                self.sss,
                Some(ContributionScheme::Sss),
            ),
            field(
                ComponentCategory::GovernmentContribution,
                PHILHEALTH,
                self.philhealth,
                Some(ContributionScheme::PhilHealth),
            ),
            field(
                ComponentCategory::GovernmentContribution,
                PAGIBIG,
                self.pagibig,
                Some(ContributionScheme::PagIbig),
            ),
            field(
                ComponentCategory::GovernmentContribution,
                WITHHOLDING_TAX,
                self.withholding_tax,
                Some(ContributionScheme::WithholdingTax),
            ),
        ]
    }

    /// Every amount that counts towards the totals, bucket by bucket.
    ///
    /// Within a bucket, components come first in insertion order, then the
    /// non-zero direct fields not shadowed by a component of the same type.
    pub fn counted_lines(&self) -> Vec<PayrollLine> {
        let fields = self.direct_fields();
        let mut lines = Vec::new();

        for category in ComponentCategory::ALL {
            let bucket = self.components(category);
            lines.extend(bucket.iter().map(|component| PayrollLine {
                category,
                component_type: component.component_type().to_string(),
                amount: component.amount(),
                description: component.description().map(str::to_string),
                source: LineSource::Component,
            }));

            let shadowed = |label: &str| {
                bucket
                    .iter()
                    .any(|component| component.component_type() == label)
            };
            lines.extend(
                fields
                    .iter()
                    .filter(|field| field.category == category)
                    .filter(|field| !field.amount.is_zero() && !shadowed(field.label))
                    .map(|field| PayrollLine {
                        category,
                        component_type: field.label.to_string(),
                        amount: field.amount,
                        description: field
                            .scheme
                            .as_ref()
                            .map(|scheme| scheme.description().to_string()),
                        source: LineSource::Field,
                    }),
            );
        }
        lines
    }

    fn fold_totals(&self, lines: &[PayrollLine]) -> EngineResult<PayrollTotals> {
        let mut allowances = Decimal::ZERO;
        let mut deductions = Decimal::ZERO;
        let mut contributions = Decimal::ZERO;
        for line in lines {
            let (field, total) = match line.category {
                ComponentCategory::Allowance => ("allowances_total", &mut allowances),
                ComponentCategory::Deduction => ("deductions_total", &mut deductions),
                ComponentCategory::GovernmentContribution => {
                    ("contributions_total", &mut contributions)
                }
            };
            *total = checked_total(field, *total, line.amount)?;
        }

        let basic_pay = self.basic_pay();
        let gross_pay = checked_total("gross_pay", basic_pay, self.overtime_pay)
            .and_then(|pay| checked_total("gross_pay", pay, allowances))?;
        let total_deductions = checked_total("total_deductions", deductions, contributions)?;
        let net_pay = gross_pay
            .checked_sub(total_deductions)
            .ok_or_else(|| EngineError::invalid("net_pay", "Total is out of range"))?;
        Ok(PayrollTotals {
            basic_pay,
            overtime_pay: self.overtime_pay,
            allowances_total: allowances,
            deductions_total: deductions,
            contributions_total: contributions,
            gross_pay,
            total_deductions,
            net_pay,
        })
    }

    /// Sets and returns `basic_pay + overtime_pay + Σ counted allowances`.
    ///
    /// Fails, leaving the cached figure untouched, when a total leaves
    /// `Decimal` range.
    pub fn calculate_gross_pay(&mut self) -> EngineResult<Decimal> {
        self.gross_pay = self.fold_totals(&self.counted_lines())?.gross_pay;
        Ok(self.gross_pay)
    }

    /// Sets and returns the sum of counted deductions and contributions.
    pub fn calculate_total_deductions(&mut self) -> EngineResult<Decimal> {
        self.total_deductions = self.fold_totals(&self.counted_lines())?.total_deductions;
        Ok(self.total_deductions)
    }

    /// Recomputes gross pay, then total deductions, then net pay.
    ///
    /// On error the three cached figures keep their previous values.
    pub fn recalculate_all(&mut self) -> EngineResult<()> {
        let totals = self.fold_totals(&self.counted_lines())?;
        self.gross_pay = totals.gross_pay;
        self.total_deductions = totals.total_deductions;
        self.net_pay = totals.net_pay;

        debug!(
            employee_id = %self.employee_id,
            gross_pay = %self.gross_pay,
            total_deductions = %self.total_deductions,
            net_pay = %self.net_pay,
            "Payroll recalculated"
        );
        Ok(())
    }

    /// Gross pay as of the last recalculation.
    pub fn gross_pay(&self) -> Decimal {
        self.gross_pay
    }

    /// Total deductions as of the last recalculation.
    pub fn total_deductions(&self) -> Decimal {
        self.total_deductions
    }

    /// Net pay as of the last recalculation; zero before the first one.
    pub fn net_pay(&self) -> Decimal {
        self.net_pay
    }

    /// Read-only consistency check: coherent period, non-negative rate and
    /// non-negative cached gross pay.
    pub fn is_valid(&self) -> bool {
        self.period.start_date() <= self.period.end_date()
            && self.monthly_rate >= Decimal::ZERO
            && self.gross_pay >= Decimal::ZERO
    }

    /// Folds the current state into a summary.
    ///
    /// The totals are computed afresh; the cached figures are not touched.
    pub fn summary(&self) -> EngineResult<PayrollSummary> {
        let lines = self.counted_lines();
        let totals = self.fold_totals(&lines)?;
        Ok(PayrollSummary {
            payroll_id: self.payroll_id,
            employee_id: self.employee_id,
            period: self.period,
            monthly_rate: self.monthly_rate,
            days_worked: self.days_worked,
            overtime_hours: self.overtime_hours,
            totals,
            lines,
        })
    }
}
