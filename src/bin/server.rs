use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use student_dashboard::assistant::{ChatCompletion, GroqClient};
use student_dashboard::auth::AuthService;
use student_dashboard::config::ServerConfig;
use student_dashboard::handlers::{routes, AppState};
use student_dashboard::storage::MemoryAccountStore;

#[tokio::main]
async fn main() {
    // Initialize env
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Protected routes are never served without a working signer
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);

    let chat = match GroqClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if !chat.is_configured() {
        warn!("GROQ_API_KEY not set. Put it in .env; assistant routes will answer 503");
    }

    let store = Arc::new(MemoryAccountStore::new());
    let auth = Arc::new(AuthService::from_config(&config, store));
    let chat: Arc<dyn ChatCompletion> = Arc::new(chat);

    let routes = routes(AppState { auth, chat });

    // Build the server address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    info!("Student Dashboard running at http://{}", addr);

    warp::serve(routes).run(addr).await;
}
