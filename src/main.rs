use clap::Parser;

mod app;
mod cli;
mod client;
mod config;
mod errors;
mod leads;
mod pages;
mod state;
mod storage;

use crate::cli::{Cli, Command};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "leadpage=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app_state = state::AppState::init()?;
            let (host, port) = (app_state.config.host.clone(), app_state.config.port);
            app::serve(app::build_app(app_state), &host, port).await
        }
        Command::Submit(args) => cli::run_submit(args).await,
    }
}
