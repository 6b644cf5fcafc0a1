use mealplanner::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "mealplanner=debug,sqlx=warn".to_string());
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

    let app_state = AppState::init().await?;

    // One pass over all users; scheduling is left to cron or similar.
    let report = app_state.planner.run_automatic_sweep().await?;
    tracing::info!(
        generated = report.generated,
        skipped = report.skipped,
        failed = report.failed,
        total = report.total,
        "sweep complete"
    );

    Ok(())
}
