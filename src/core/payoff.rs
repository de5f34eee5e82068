use super::amortization::{monthly_rate, step};
use super::types::{AmortizationRow, Debt, DebtSpec, PayoffError, PayoffSummary};

pub const PAYOFF_MAX_PERIODS: u32 = 1_000;

pub fn payoff(
    starting_balance: f64,
    annual_rate_percent: f64,
    payment: f64,
) -> Result<PayoffSummary, PayoffError> {
    payoff_with_rate(starting_balance, monthly_rate(annual_rate_percent), payment)
}

pub fn payoff_with_rate(
    starting_balance: f64,
    periodic_rate: f64,
    payment: f64,
) -> Result<PayoffSummary, PayoffError> {
    let mut debt = Debt::new(
        1,
        DebtSpec {
            starting_balance,
            periodic_rate,
            min_payment: payment,
        },
    );

    let first_period_interest = debt.first_period_interest();
    if payment <= first_period_interest {
        return Err(PayoffError::Unpayable {
            payment,
            first_period_interest,
        });
    }

    let mut schedule = Vec::new();
    let mut period = 0;
    while debt.is_active() {
        if period >= PAYOFF_MAX_PERIODS {
            return Err(PayoffError::NonConvergent {
                max_periods: PAYOFF_MAX_PERIODS,
            });
        }
        period += 1;
        let outcome = step(&mut debt, payment, period);
        schedule.push(AmortizationRow {
            period,
            interest: outcome.interest,
            payment: outcome.paid,
            balance: debt.balance,
        });
    }

    Ok(PayoffSummary {
        periods: period,
        total_interest: debt.interest_accrued,
        total_paid: debt.total_paid,
        schedule,
    })
}
