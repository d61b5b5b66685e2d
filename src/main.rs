use church_attendance::calendar::{TRACKED_YEAR, generate_year_weeks};
use church_attendance::{AppState, load_book, resolve_data_paths, router};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let paths = resolve_data_paths();
    fs::create_dir_all(&paths.dir).await?;

    let year = env::var("ATTENDANCE_YEAR")
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .unwrap_or(TRACKED_YEAR);
    let weeks = generate_year_weeks(year);

    let book = load_book(&paths).await;
    info!(data_dir = %paths.dir.display(), year, weeks = weeks.len(), "attendance book ready");
    let app = router(AppState::new(paths, weeks, book));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
