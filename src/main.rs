use storefront_api::{bootstrap, config::Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let result = match Config::from_env() {
        Ok(config) => bootstrap::run(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Startup aborted");
        std::process::exit(1);
    }
}
