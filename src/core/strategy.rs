use std::cmp::Ordering;

use super::amortization::{accrue_interest, apply_payment};
use super::types::{
    Debt, DebtDetail, DebtSpec, PayoffError, PeriodSnapshot, Strategy, StrategyComparison,
    StrategyResult,
};

pub const STRATEGY_MAX_PERIODS: u32 = 600;

impl Strategy {
    pub fn compare(self, a: &Debt, b: &Debt) -> Ordering {
        let key = match self {
            Strategy::Snowball => a.starting_balance.total_cmp(&b.starting_balance),
            Strategy::Avalanche => b.periodic_rate.total_cmp(&a.periodic_rate),
        };
        key.then_with(|| a.id.cmp(&b.id))
    }

    pub fn priority_order(self, debts: &[Debt]) -> Vec<usize> {
        let mut order = (0..debts.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| self.compare(&debts[a], &debts[b]));
        order
    }
}

pub fn debt_snowball(specs: &[DebtSpec]) -> Result<StrategyResult, PayoffError> {
    run_strategy(specs, Strategy::Snowball)
}

pub fn debt_avalanche(specs: &[DebtSpec]) -> Result<StrategyResult, PayoffError> {
    run_strategy(specs, Strategy::Avalanche)
}

pub fn run_strategy(specs: &[DebtSpec], strategy: Strategy) -> Result<StrategyResult, PayoffError> {
    let mut debts = specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| Debt::new(idx as u32 + 1, *spec))
        .collect::<Vec<_>>();

    // No debt can ever clear, and so none frees capacity for the others.
    if !debts.is_empty()
        && debts
            .iter()
            .all(|d| d.min_payment <= d.first_period_interest())
    {
        return Err(PayoffError::Unpayable {
            payment: debts.iter().map(|d| d.min_payment).sum(),
            first_period_interest: debts.iter().map(Debt::first_period_interest).sum(),
        });
    }

    let priority = strategy.priority_order(&debts);
    let mut schedule = Vec::new();
    let mut period = 0;

    while debts.iter().any(Debt::is_active) {
        if period >= STRATEGY_MAX_PERIODS {
            return Err(PayoffError::NonConvergent {
                max_periods: STRATEGY_MAX_PERIODS,
            });
        }
        period += 1;
        schedule.push(advance_period(&mut debts, &priority, period));
    }

    Ok(build_strategy_result(strategy, period, debts, schedule))
}

pub fn compare_strategies(specs: &[DebtSpec]) -> Result<StrategyComparison, PayoffError> {
    let snowball = debt_snowball(specs)?;
    let avalanche = debt_avalanche(specs)?;
    Ok(StrategyComparison {
        interest_saved_by_avalanche: snowball.total_interest - avalanche.total_interest,
        period_difference: i64::from(snowball.periods) - i64::from(avalanche.periods),
        snowball,
        avalanche,
    })
}

fn advance_period(debts: &mut [Debt], priority: &[usize], period: u32) -> PeriodSnapshot {
    // Capacity is freed only by debts cleared in an earlier period.
    let freed_capacity = debts
        .iter()
        .filter(|d| !d.is_active())
        .map(|d| d.min_payment)
        .sum::<f64>();

    let interest = debts.iter_mut().map(accrue_interest).sum::<f64>();

    let target = priority.iter().copied().find(|&idx| debts[idx].is_active());

    let mut paid = 0.0;
    for (idx, debt) in debts.iter_mut().enumerate() {
        let payment = if Some(idx) == target {
            debt.min_payment + freed_capacity
        } else {
            debt.min_payment
        };
        paid += apply_payment(debt, payment, period);
    }

    PeriodSnapshot {
        period,
        target_id: target.map(|idx| debts[idx].id),
        freed_capacity,
        interest,
        paid,
        balances: debts.iter().map(|d| d.balance).collect(),
    }
}

fn build_strategy_result(
    strategy: Strategy,
    periods: u32,
    debts: Vec<Debt>,
    schedule: Vec<PeriodSnapshot>,
) -> StrategyResult {
    let details = debts
        .iter()
        .map(|d| DebtDetail {
            id: d.id,
            payoff_period: d.payoff_period,
            starting_balance: d.starting_balance,
            interest_accrued: d.interest_accrued,
            total_paid: d.total_paid,
        })
        .collect::<Vec<_>>();

    StrategyResult {
        strategy,
        periods,
        total_interest: details.iter().map(|d| d.interest_accrued).sum(),
        total_paid: details.iter().map(|d| d.total_paid).sum(),
        details,
        schedule,
    }
}
