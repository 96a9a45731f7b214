use anyhow::Result;
use cfg_editor::cli::{self, Cli};
use clap::Parser;
use std::io;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();

    // Route all log::info!() etc. to /tmp/cfg_editor_debug.log.
    // CLI --log-level takes precedence, then RUST_LOG, then DEBUG_LEVEL.
    cfg_editor::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));
    log::info!("Starting cfg-editor {}", cfg_editor::VERSION);

    // Store requests are async; one runtime serves the whole command
    let runtime = Runtime::new()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    let result = runtime.block_on(cli::run(cli, &mut input, &mut out));
    log::logger().flush();

    if let Err(ref e) = result {
        log::error!("Command failed: {e:#}");
        eprintln!("cfg-editor: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
