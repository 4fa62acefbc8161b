use coursekeep::router::init_router;
use coursekeep::state::init_app_state;
use coursekeep_observability::{init_metrics, init_tracing};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let _log_guard = init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let state = init_app_state().await?.with_metrics(init_metrics());
    let addr = state.server_config.addr.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(listener, app).await?;

    Ok(())
}
