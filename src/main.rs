use anyhow::Result;
use chess_rules::console::ConsoleHandler;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHESS_RULES_LOG";

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut console = ConsoleHandler::new();
    console.run()
}
