use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use medisys_api::config::ApiConfig;
use medisys_client::BackendClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    let backend = BackendClient::new(&config.backend)?;

    medisys_api::start_server(config, Arc::new(backend)).await?;

    Ok(())
}
