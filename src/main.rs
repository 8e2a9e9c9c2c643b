use anyhow::Context;
use tiny::config::Config;
use tiny::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        let program = args.first().map(String::as_str).unwrap_or("tiny");
        eprintln!("usage: {} <port>", program);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let mut cfg = Config::load()?;
    cfg.server.port = args[1]
        .parse()
        .with_context(|| format!("invalid port {:?}", args[1]))?;

    tokio::select! {
        res = server::listener::run(cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
