//! `staypilot` 바이너리 진입점.

use staypilot::interface::cli::{AppComposition, Cli, CommandOutcome, run_action};

#[tokio::main]
async fn main() {
    // .env는 있을 때만 읽는다.
    dotenvy::dotenv().ok();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| action.default_log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let composition = AppComposition::default();

    match run_action(&composition, action).await {
        Ok(CommandOutcome::Success) => {}
        Ok(CommandOutcome::Failed) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
