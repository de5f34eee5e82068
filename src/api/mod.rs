use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AmortizationRow, DebtDetail, DebtSpec, PayoffError, PayoffSummary, PeriodSnapshot, Strategy,
    StrategyComparison, StrategyResult, compare_strategies, monthly_rate, payoff, round_cents,
    run_strategy,
};

const DEFAULT_PORT: u16 = 8080;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStrategy {
    Snowball,
    Avalanche,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Snowball => Strategy::Snowball,
            CliStrategy::Avalanche => Strategy::Avalanche,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStrategy {
    #[serde(alias = "Snowball", alias = "debt-snowball", alias = "debtSnowball")]
    Snowball,
    #[serde(alias = "Avalanche", alias = "debt-avalanche", alias = "debtAvalanche")]
    Avalanche,
}

impl From<ApiStrategy> for Strategy {
    fn from(value: ApiStrategy) -> Self {
        match value {
            ApiStrategy::Snowball => Strategy::Snowball,
            ApiStrategy::Avalanche => Strategy::Avalanche,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum RateInput {
    AnnualPercent(f64),
    Periodic(f64),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct DebtInput {
    balance: f64,
    rate: RateInput,
    min_payment: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtPayload {
    #[serde(alias = "startingBalance")]
    balance: Option<f64>,
    #[serde(alias = "apr")]
    annual_rate_percent: Option<f64>,
    #[serde(alias = "monthlyRate")]
    periodic_rate: Option<f64>,
    min_payment: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PayoffPayload {
    balance: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    apr: Option<f64>,
    payment: Option<f64>,
    schedule: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StrategyPayload {
    strategy: Option<ApiStrategy>,
    debts: Vec<DebtPayload>,
    schedule: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(
    name = "debtplan",
    about = "Debt payoff planner (fixed payment, snowball and avalanche strategies)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Months and interest to clear one balance with a fixed payment")]
    Payoff {
        #[arg(long)]
        balance: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 19.9")]
        apr: f64,
        #[arg(long, help = "Fixed monthly payment")]
        payment: f64,
        #[arg(long, help = "Include the month-by-month schedule")]
        schedule: bool,
    },
    #[command(about = "Run one multi-debt strategy")]
    Run {
        #[arg(long, value_enum, default_value_t = CliStrategy::Avalanche)]
        strategy: CliStrategy,
        #[command(flatten)]
        debts: DebtArgs,
        #[arg(long, help = "Include the month-by-month schedule")]
        schedule: bool,
    },
    #[command(about = "Run snowball and avalanche on the same debts")]
    Compare {
        #[command(flatten)]
        debts: DebtArgs,
    },
    #[command(about = "Serve the JSON API over HTTP")]
    Serve {
        #[arg(default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct DebtArgs {
    #[arg(
        long = "debt",
        required = true,
        value_parser = parse_debt_arg,
        help = "Debt as BALANCE:APR:MIN_PAYMENT, repeatable"
    )]
    debts: Vec<DebtInput>,
}

fn parse_debt_arg(raw: &str) -> Result<DebtInput, String> {
    let parts = raw.split(':').map(str::trim).collect::<Vec<_>>();
    let [balance, apr, min_payment] = parts.as_slice() else {
        return Err(format!("expected BALANCE:APR:MIN_PAYMENT, got '{raw}'"));
    };
    let number = |label: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| format!("invalid {label} '{value}': {e}"))
    };
    Ok(DebtInput {
        balance: number("balance", *balance)?,
        rate: RateInput::AnnualPercent(number("apr", *apr)?),
        min_payment: number("min payment", *min_payment)?,
    })
}

#[derive(Debug, Clone, PartialEq)]
struct PayoffRequest {
    balance: f64,
    apr: f64,
    payment: f64,
    include_schedule: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct StrategyRequest {
    strategy: Strategy,
    debts: Vec<DebtSpec>,
    include_schedule: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayoffResponse {
    periods: u32,
    total_interest: f64,
    total_paid: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<AmortizationRow>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailResponse {
    id: u32,
    payoff_period: Option<u32>,
    starting_balance: f64,
    interest_accrued: f64,
    total_paid: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategyResponse {
    strategy: Strategy,
    periods: u32,
    total_interest: f64,
    total_paid: f64,
    details: Vec<DetailResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<PeriodSnapshot>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    snowball: StrategyResponse,
    avalanche: StrategyResponse,
    interest_saved_by_avalanche: f64,
    period_difference: i64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

fn build_payoff_request(
    balance: f64,
    apr: f64,
    payment: f64,
    include_schedule: bool,
) -> Result<PayoffRequest, String> {
    if !balance.is_finite() || balance <= 0.0 {
        return Err("balance must be > 0".to_string());
    }
    if !apr.is_finite() || apr < 0.0 {
        return Err("apr must be >= 0".to_string());
    }
    if !payment.is_finite() || payment <= 0.0 {
        return Err("payment must be > 0".to_string());
    }
    Ok(PayoffRequest {
        balance,
        apr,
        payment,
        include_schedule,
    })
}

fn build_debt_specs(debts: &[DebtInput]) -> Result<Vec<DebtSpec>, String> {
    if debts.is_empty() {
        return Err("at least one debt is required".to_string());
    }

    let mut specs = Vec::with_capacity(debts.len());
    for (idx, debt) in debts.iter().enumerate() {
        let n = idx + 1;
        if !debt.balance.is_finite() || debt.balance <= 0.0 {
            return Err(format!("debt {n}: balance must be > 0"));
        }
        if !debt.min_payment.is_finite() || debt.min_payment <= 0.0 {
            return Err(format!("debt {n}: minPayment must be > 0"));
        }
        let periodic_rate = match debt.rate {
            RateInput::AnnualPercent(apr) if apr.is_finite() && apr >= 0.0 => monthly_rate(apr),
            RateInput::Periodic(rate) if rate.is_finite() && rate >= 0.0 => rate,
            RateInput::AnnualPercent(_) => {
                return Err(format!("debt {n}: annualRatePercent must be >= 0"));
            }
            RateInput::Periodic(_) => {
                return Err(format!("debt {n}: periodicRate must be >= 0"));
            }
        };
        specs.push(DebtSpec {
            starting_balance: debt.balance,
            periodic_rate,
            min_payment: debt.min_payment,
        });
    }
    Ok(specs)
}

fn debt_input_from_payload(idx: usize, payload: &DebtPayload) -> Result<DebtInput, String> {
    let n = idx + 1;
    let Some(balance) = payload.balance else {
        return Err(format!("debt {n}: balance is required"));
    };
    let Some(min_payment) = payload.min_payment else {
        return Err(format!("debt {n}: minPayment is required"));
    };
    let rate = match (payload.annual_rate_percent, payload.periodic_rate) {
        (Some(apr), None) => RateInput::AnnualPercent(apr),
        (None, Some(rate)) => RateInput::Periodic(rate),
        (Some(_), Some(_)) => {
            return Err(format!(
                "debt {n}: give either annualRatePercent or periodicRate, not both"
            ));
        }
        (None, None) => {
            return Err(format!(
                "debt {n}: annualRatePercent or periodicRate is required"
            ));
        }
    };
    Ok(DebtInput {
        balance,
        rate,
        min_payment,
    })
}

fn payoff_request_from_payload(payload: PayoffPayload) -> Result<PayoffRequest, String> {
    let Some(balance) = payload.balance else {
        return Err("balance is required".to_string());
    };
    let Some(apr) = payload.apr else {
        return Err("apr is required".to_string());
    };
    let Some(payment) = payload.payment else {
        return Err("payment is required".to_string());
    };
    build_payoff_request(balance, apr, payment, payload.schedule.unwrap_or(false))
}

fn strategy_request_from_payload(
    payload: StrategyPayload,
    default_strategy: Strategy,
) -> Result<StrategyRequest, String> {
    let inputs = payload
        .debts
        .iter()
        .enumerate()
        .map(|(idx, debt)| debt_input_from_payload(idx, debt))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(StrategyRequest {
        strategy: payload.strategy.map(Into::into).unwrap_or(default_strategy),
        debts: build_debt_specs(&inputs)?,
        include_schedule: payload.schedule.unwrap_or(false),
    })
}

#[cfg(test)]
fn payoff_request_from_json(json: &str) -> Result<PayoffRequest, String> {
    let payload = serde_json::from_str::<PayoffPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    payoff_request_from_payload(payload)
}

#[cfg(test)]
fn strategy_request_from_json(json: &str) -> Result<StrategyRequest, String> {
    let payload = serde_json::from_str::<StrategyPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    strategy_request_from_payload(payload, Strategy::Avalanche)
}

fn evaluate_payoff(request: &PayoffRequest) -> Result<PayoffResponse, PayoffError> {
    let summary = payoff(request.balance, request.apr, request.payment)?;
    Ok(build_payoff_response(summary, request.include_schedule))
}

fn evaluate_strategy(request: &StrategyRequest) -> Result<StrategyResponse, PayoffError> {
    let result = run_strategy(&request.debts, request.strategy)?;
    Ok(build_strategy_response(result, request.include_schedule))
}

fn evaluate_comparison(debts: &[DebtSpec]) -> Result<CompareResponse, PayoffError> {
    let comparison = compare_strategies(debts)?;
    Ok(build_compare_response(comparison))
}

fn build_payoff_response(summary: PayoffSummary, include_schedule: bool) -> PayoffResponse {
    PayoffResponse {
        periods: summary.periods,
        total_interest: round_cents(summary.total_interest),
        total_paid: round_cents(summary.total_paid),
        schedule: include_schedule.then_some(summary.schedule),
    }
}

fn build_detail_response(detail: &DebtDetail) -> DetailResponse {
    DetailResponse {
        id: detail.id,
        payoff_period: detail.payoff_period,
        starting_balance: detail.starting_balance,
        interest_accrued: round_cents(detail.interest_accrued),
        total_paid: round_cents(detail.total_paid),
    }
}

fn build_strategy_response(result: StrategyResult, include_schedule: bool) -> StrategyResponse {
    StrategyResponse {
        strategy: result.strategy,
        periods: result.periods,
        total_interest: round_cents(result.total_interest),
        total_paid: round_cents(result.total_paid),
        details: result.details.iter().map(build_detail_response).collect(),
        schedule: include_schedule.then_some(result.schedule),
    }
}

fn build_compare_response(comparison: StrategyComparison) -> CompareResponse {
    CompareResponse {
        interest_saved_by_avalanche: round_cents(comparison.interest_saved_by_avalanche),
        period_difference: comparison.period_difference,
        snowball: build_strategy_response(comparison.snowball, false),
        avalanche: build_strategy_response(comparison.avalanche, false),
    }
}

pub async fn run_from_args() -> Result<(), String> {
    run_cli(Cli::parse()).await
}

async fn run_cli(cli: Cli) -> Result<(), String> {
    let json = match cli.command {
        Command::Serve { port } => {
            return run_http_server(port)
                .await
                .map_err(|e| format!("Server error: {e}"));
        }
        Command::Payoff {
            balance,
            apr,
            payment,
            schedule,
        } => {
            let request = build_payoff_request(balance, apr, payment, schedule)?;
            to_pretty_json(&evaluate_payoff(&request).map_err(|e| e.to_string())?)?
        }
        Command::Run {
            strategy,
            debts,
            schedule,
        } => {
            let request = StrategyRequest {
                strategy: strategy.into(),
                debts: build_debt_specs(&debts.debts)?,
                include_schedule: schedule,
            };
            to_pretty_json(&evaluate_strategy(&request).map_err(|e| e.to_string())?)?
        }
        Command::Compare { debts } => {
            let specs = build_debt_specs(&debts.debts)?;
            to_pretty_json(&evaluate_comparison(&specs).map_err(|e| e.to_string())?)?
        }
    };
    println!("{json}");
    Ok(())
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/payoff",
            get(payoff_get_handler).post(payoff_post_handler),
        )
        .route("/api/strategy", post(strategy_handler))
        .route("/api/snowball", post(snowball_handler))
        .route("/api/avalanche", post(avalanche_handler))
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("debtplan HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn payoff_get_handler(Query(payload): Query<PayoffPayload>) -> Response {
    payoff_handler_impl(payload)
}

async fn payoff_post_handler(Json(payload): Json<PayoffPayload>) -> Response {
    payoff_handler_impl(payload)
}

fn payoff_handler_impl(payload: PayoffPayload) -> Response {
    match payoff_request_from_payload(payload) {
        Ok(request) => outcome_response(evaluate_payoff(&request)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn strategy_handler(Json(payload): Json<StrategyPayload>) -> Response {
    strategy_handler_impl(payload, Strategy::Avalanche)
}

async fn snowball_handler(Json(mut payload): Json<StrategyPayload>) -> Response {
    payload.strategy = Some(ApiStrategy::Snowball);
    strategy_handler_impl(payload, Strategy::Snowball)
}

async fn avalanche_handler(Json(mut payload): Json<StrategyPayload>) -> Response {
    payload.strategy = Some(ApiStrategy::Avalanche);
    strategy_handler_impl(payload, Strategy::Avalanche)
}

fn strategy_handler_impl(payload: StrategyPayload, default_strategy: Strategy) -> Response {
    match strategy_request_from_payload(payload, default_strategy) {
        Ok(request) => outcome_response(evaluate_strategy(&request)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn compare_handler(Json(payload): Json<StrategyPayload>) -> Response {
    match strategy_request_from_payload(payload, Strategy::Avalanche) {
        Ok(request) => outcome_response(evaluate_comparison(&request.debts)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn outcome_response<T: Serialize>(outcome: Result<T, PayoffError>) -> Response {
    match outcome {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse {
                error: err.to_string(),
                kind: Some(err.kind()),
            },
        ),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            kind: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_inputs() -> Vec<DebtInput> {
        vec![
            DebtInput {
                balance: 500.0,
                rate: RateInput::Periodic(0.02),
                min_payment: 50.0,
            },
            DebtInput {
                balance: 500.0,
                rate: RateInput::AnnualPercent(12.0),
                min_payment: 50.0,
            },
        ]
    }

    #[test]
    fn build_debt_specs_converts_annual_percent_to_monthly() {
        let specs = build_debt_specs(&sample_inputs()).expect("valid debts");
        assert_eq!(specs.len(), 2);
        assert_approx(specs[0].periodic_rate, 0.02);
        assert_approx(specs[1].periodic_rate, 0.01);
        assert_approx(specs[1].starting_balance, 500.0);
    }

    #[test]
    fn build_debt_specs_rejects_empty_list() {
        let err = build_debt_specs(&[]).expect_err("must reject empty list");
        assert!(err.contains("at least one debt"));
    }

    #[test]
    fn build_debt_specs_rejects_non_positive_balance() {
        let mut inputs = sample_inputs();
        inputs[1].balance = 0.0;
        let err = build_debt_specs(&inputs).expect_err("must reject zero balance");
        assert!(err.contains("debt 2"));
        assert!(err.contains("balance"));
    }

    #[test]
    fn build_debt_specs_rejects_non_positive_min_payment() {
        let mut inputs = sample_inputs();
        inputs[0].min_payment = -5.0;
        let err = build_debt_specs(&inputs).expect_err("must reject negative minimum");
        assert!(err.contains("minPayment"));
    }

    #[test]
    fn build_debt_specs_accepts_zero_rate_and_rejects_negative_rate() {
        let mut inputs = sample_inputs();
        inputs[0].rate = RateInput::AnnualPercent(0.0);
        let specs = build_debt_specs(&inputs).expect("zero rate is allowed");
        assert_eq!(specs[0].periodic_rate, 0.0);

        inputs[0].rate = RateInput::Periodic(-0.01);
        let err = build_debt_specs(&inputs).expect_err("must reject negative rate");
        assert!(err.contains("periodicRate"));
    }

    #[test]
    fn build_payoff_request_validates_fields() {
        assert!(build_payoff_request(1_000.0, 0.0, 100.0, false).is_ok());
        let err = build_payoff_request(-1.0, 12.0, 100.0, false).expect_err("bad balance");
        assert!(err.contains("balance"));
        let err = build_payoff_request(1_000.0, f64::NAN, 100.0, false).expect_err("bad apr");
        assert!(err.contains("apr"));
        let err = build_payoff_request(1_000.0, 12.0, 0.0, false).expect_err("bad payment");
        assert!(err.contains("payment"));
    }

    #[test]
    fn parse_debt_arg_reads_balance_apr_and_minimum() {
        let debt = parse_debt_arg("2500:19.9:75").expect("valid arg");
        assert_approx(debt.balance, 2_500.0);
        assert_eq!(debt.rate, RateInput::AnnualPercent(19.9));
        assert_approx(debt.min_payment, 75.0);

        let err = parse_debt_arg("2500:19.9").expect_err("missing field");
        assert!(err.contains("BALANCE:APR:MIN_PAYMENT"));
        let err = parse_debt_arg("2500:abc:75").expect_err("bad number");
        assert!(err.contains("apr"));
    }

    #[test]
    fn cli_parses_repeated_debt_flags() {
        let cli = Cli::try_parse_from([
            "debtplan",
            "run",
            "--strategy",
            "snowball",
            "--debt",
            "300:12:50",
            "--debt",
            "700:12:50",
        ])
        .expect("valid cli");
        let Command::Run {
            strategy, debts, ..
        } = cli.command
        else {
            panic!("expected run command");
        };
        assert_eq!(strategy, CliStrategy::Snowball);
        assert_eq!(debts.debts.len(), 2);
    }

    #[test]
    fn cli_serve_defaults_port() {
        let cli = Cli::try_parse_from(["debtplan", "serve"]).expect("valid cli");
        assert!(matches!(cli.command, Command::Serve { port: DEFAULT_PORT }));
    }

    #[test]
    fn strategy_request_from_json_parses_web_keys() {
        let json = r#"{
          "strategy": "snowball",
          "schedule": true,
          "debts": [
            { "startingBalance": 500, "monthlyRate": 0.01, "minPayment": 50 },
            { "balance": 1200, "apr": 18, "minPayment": 40 }
          ]
        }"#;
        let request = strategy_request_from_json(json).expect("json should parse");
        assert_eq!(request.strategy, Strategy::Snowball);
        assert!(request.include_schedule);
        assert_eq!(request.debts.len(), 2);
        assert_approx(request.debts[0].periodic_rate, 0.01);
        assert_approx(request.debts[1].periodic_rate, 0.015);
        assert_approx(request.debts[1].min_payment, 40.0);
    }

    #[test]
    fn strategy_request_rejects_ambiguous_rate() {
        let json = r#"{ "debts": [ { "balance": 500, "apr": 12, "periodicRate": 0.01, "minPayment": 50 } ] }"#;
        let err = strategy_request_from_json(json).expect_err("both rates given");
        assert!(err.contains("not both"));
    }

    #[test]
    fn strategy_request_defaults_to_avalanche() {
        let json = r#"{ "debts": [ { "balance": 500, "periodicRate": 0.01, "minPayment": 50 } ] }"#;
        let request = strategy_request_from_json(json).expect("json should parse");
        assert_eq!(request.strategy, Strategy::Avalanche);
        assert!(!request.include_schedule);
    }

    #[test]
    fn payoff_request_from_json_requires_payment() {
        let err = payoff_request_from_json(r#"{ "balance": 1000, "apr": 12 }"#)
            .expect_err("missing payment");
        assert!(err.contains("payment"));
    }

    #[test]
    fn payoff_response_rounds_and_omits_schedule_by_default() {
        let request =
            payoff_request_from_json(r#"{ "balance": 1000, "apr": 12, "payment": 100 }"#)
                .expect("json should parse");
        let response = evaluate_payoff(&request).expect("payable");
        assert_eq!(response.periods, 11);
        assert_approx(response.total_interest, round_cents(response.total_interest));

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"periods\""));
        assert!(json.contains("\"totalInterest\""));
        assert!(json.contains("\"totalPaid\""));
        assert!(!json.contains("\"schedule\""));
    }

    #[test]
    fn strategy_response_serialization_contains_expected_fields() {
        let request = StrategyRequest {
            strategy: Strategy::Snowball,
            debts: build_debt_specs(&sample_inputs()).expect("valid debts"),
            include_schedule: true,
        };
        let response = evaluate_strategy(&request).expect("payable");
        assert_eq!(response.details[0].id, 1);
        assert_eq!(response.details[1].id, 2);
        let schedule_len = response.schedule.as_ref().map(Vec::len).unwrap_or(0);
        assert_eq!(schedule_len, response.periods as usize);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"strategy\":\"snowball\""));
        assert!(json.contains("\"payoffPeriod\""));
        assert!(json.contains("\"interestAccrued\""));
        assert!(json.contains("\"targetId\""));
        assert!(json.contains("\"freedCapacity\""));
    }

    #[test]
    fn compare_response_reports_both_strategies() {
        let specs = build_debt_specs(&sample_inputs()).expect("valid debts");
        let response = evaluate_comparison(&specs).expect("payable");
        assert_eq!(response.snowball.strategy, Strategy::Snowball);
        assert_eq!(response.avalanche.strategy, Strategy::Avalanche);
        assert!(response.snowball.schedule.is_none());

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"interestSavedByAvalanche\""));
        assert!(json.contains("\"periodDifference\""));
    }

    #[test]
    fn unpayable_outcome_maps_to_unprocessable_entity() {
        let request = build_payoff_request(1_200.0, 12.0, 12.0, false).expect("valid request");
        let response = outcome_response(evaluate_payoff(&request));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }

    #[test]
    fn error_body_carries_failure_kind() {
        let err = PayoffError::NonConvergent { max_periods: 600 };
        let body = ErrorResponse {
            error: err.to_string(),
            kind: Some(err.kind()),
        };
        let json = serde_json::to_string(&body).expect("error should serialize");
        assert!(json.contains("\"kind\":\"non-convergent\""));
        assert!(json.contains("600 periods"));
    }
}
