mod amortization;
mod payoff;
mod strategy;
mod types;

pub use amortization::{PAID_OFF_EPSILON, StepOutcome, monthly_rate, round_cents, step};
pub use payoff::{PAYOFF_MAX_PERIODS, payoff, payoff_with_rate};
pub use strategy::{
    STRATEGY_MAX_PERIODS, compare_strategies, debt_avalanche, debt_snowball, run_strategy,
};
pub use types::{
    AmortizationRow, Debt, DebtDetail, DebtSpec, PayoffError, PayoffSummary, PeriodSnapshot,
    Strategy, StrategyComparison, StrategyResult,
};
