use mock_server::{app_with, MockConfig};
use tokio::net::TcpListener;

/// Serves the mock API on `127.0.0.1:$PORT` (default 3000). Accepted
/// credentials can be overridden with `MOCK_CLIENT_KEY`,
/// `MOCK_CLIENT_SECRET` and `MOCK_ACCESS_TOKEN`.
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let defaults = MockConfig::default();
    let config = MockConfig {
        client_key: std::env::var("MOCK_CLIENT_KEY").unwrap_or(defaults.client_key),
        client_secret: std::env::var("MOCK_CLIENT_SECRET").unwrap_or(defaults.client_secret),
        access_token: std::env::var("MOCK_ACCESS_TOKEN").unwrap_or(defaults.access_token),
        eep: defaults.eep,
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock default offers API listening on http://{addr}");
    axum::serve(listener, app_with(config)).await
}
