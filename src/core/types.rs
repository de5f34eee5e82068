use serde::Serialize;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Snowball,
    Avalanche,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtSpec {
    pub starting_balance: f64,
    pub periodic_rate: f64,
    pub min_payment: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: u32,
    pub starting_balance: f64,
    pub balance: f64,
    pub periodic_rate: f64,
    pub min_payment: f64,
    pub interest_accrued: f64,
    pub total_paid: f64,
    pub payoff_period: Option<u32>,
}

impl Debt {
    pub fn new(id: u32, spec: DebtSpec) -> Self {
        Self {
            id,
            starting_balance: spec.starting_balance,
            balance: spec.starting_balance,
            periodic_rate: spec.periodic_rate,
            min_payment: spec.min_payment,
            interest_accrued: 0.0,
            total_paid: 0.0,
            payoff_period: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    pub fn first_period_interest(&self) -> f64 {
        self.starting_balance * self.periodic_rate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub period: u32,
    pub interest: f64,
    pub payment: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffSummary {
    pub periods: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub schedule: Vec<AmortizationRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtDetail {
    pub id: u32,
    pub payoff_period: Option<u32>,
    pub starting_balance: f64,
    pub interest_accrued: f64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSnapshot {
    pub period: u32,
    pub target_id: Option<u32>,
    pub freed_capacity: f64,
    pub interest: f64,
    pub paid: f64,
    pub balances: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub periods: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub details: Vec<DebtDetail>,
    pub schedule: Vec<PeriodSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub snowball: StrategyResult,
    pub avalanche: StrategyResult,
    pub interest_saved_by_avalanche: f64,
    pub period_difference: i64,
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum PayoffError {
    #[error(
        "payment {payment:.2} does not exceed first-period interest {first_period_interest:.2}; balance will never be paid off"
    )]
    Unpayable {
        payment: f64,
        first_period_interest: f64,
    },

    #[error("balance not paid off within {max_periods} periods")]
    NonConvergent { max_periods: u32 },
}

impl PayoffError {
    pub fn kind(&self) -> &'static str {
        match self {
            PayoffError::Unpayable { .. } => "unpayable",
            PayoffError::NonConvergent { .. } => "non-convergent",
        }
    }
}
