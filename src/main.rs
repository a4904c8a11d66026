use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() {
    if let Err(e) = run() {
        logger::log_fatal(&format!("server failed: {e}"));
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let router = Arc::new(handler::Router::new());
    server::run(cfg.get_socket_addr(), Some(cfg.get_ipv4_socket_addr()), router).await?;
    Ok(())
}
