use super::types::Debt;

pub const PAID_OFF_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub interest: f64,
    pub paid: f64,
    pub paid_off: bool,
}

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn accrue_interest(debt: &mut Debt) -> f64 {
    if !debt.is_active() {
        return 0.0;
    }
    let interest = debt.balance * debt.periodic_rate;
    debt.balance += interest;
    debt.interest_accrued += interest;
    interest
}

pub fn apply_payment(debt: &mut Debt, payment: f64, period: u32) -> f64 {
    if !debt.is_active() {
        return 0.0;
    }
    let applied = payment.min(debt.balance).max(0.0);
    debt.balance -= payment;
    debt.total_paid += applied;
    if debt.balance <= PAID_OFF_EPSILON {
        debt.balance = 0.0;
        if debt.payoff_period.is_none() {
            debt.payoff_period = Some(period);
        }
    }
    applied
}

pub fn step(debt: &mut Debt, payment: f64, period: u32) -> StepOutcome {
    if !debt.is_active() {
        return StepOutcome {
            interest: 0.0,
            paid: 0.0,
            paid_off: false,
        };
    }
    let interest = accrue_interest(debt);
    let paid = apply_payment(debt, payment, period);
    StepOutcome {
        interest,
        paid,
        paid_off: !debt.is_active(),
    }
}
