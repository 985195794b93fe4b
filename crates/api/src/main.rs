use siteboard_api::config::ServerConfig;
use siteboard_api::server::Server;

#[tokio::main]
async fn main() {
    siteboard_observability::init();

    let config = ServerConfig::from_env();

    let server = match Server::new(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("failed to initialize server: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.serve().await {
        tracing::error!("server exited with error: {e}");
        std::process::exit(1);
    }
}
