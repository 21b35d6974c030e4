//! Server command implementation

use anyhow::Result;

pub async fn cmd_serve(host: &str, port: u16, currency: &str) -> Result<()> {
    let mut config = spendscope_server::ServerConfig::from_env();
    config.currency = currency.to_string();

    println!("🚀 Starting Spendscope web server...");
    println!("   Listening: http://{}:{}", host, port);
    println!("   Max transactions per request: {}", config.max_transactions);
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only (set SPENDSCOPE_ALLOWED_ORIGINS to allow others)");
    } else {
        println!("   CORS origins: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    spendscope_server::serve_with_config(host, port, config).await?;

    Ok(())
}
