use anyhow::Context;
use clap::Parser;
use gooday::handlers::day;
use gooday::logging::{init_logging, LogConfig, LogFormat};
use gooday::middleware::access_log;
use gooday::runtime_config::RuntimeConfig;
use gooday::server::{AppService, HttpServer};
use gooday::Router;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "gooday", version, about = "Greets you with the day of the week")]
struct Cli {
    /// Listen address, overrides GOODAY_ADDR
    #[arg(long)]
    addr: Option<String>,

    /// Log format (json or pretty), overrides GOODAY_LOG_FORMAT
    #[arg(long)]
    log_format: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if let Some(format) = &cli.log_format {
        log_config.format = LogFormat::parse(format);
    }
    init_logging(&log_config)?;

    let mut config = RuntimeConfig::from_env();
    if let Some(addr) = cli.addr {
        config.addr = addr;
    }
    config.apply();

    let mut router = Router::new();
    router.add_filter(access_log());
    router.get("/", day::get_handler);
    let router = Arc::new(router);

    println!("GoodDay is now serving {}", config.addr);
    let handle = HttpServer(AppService::new(router))
        .start(config.addr.as_str())
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(addr = %handle.addr(), stack_size = config.stack_size, "Serving");

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("server coroutine panicked"))?;
    Ok(())
}
