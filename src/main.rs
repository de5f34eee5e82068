#[tokio::main]
async fn main() {
    if let Err(e) = debtplan::api::run_from_args().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
