use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};

use launch_dash::app::DashboardApp;
use launch_dash::config::Config;
use launch_dash::data::loader;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env().context("invalid configuration")?;
    let dataset = loader::load_file(&config.data_path)
        .with_context(|| format!("loading launch records from {}", config.data_path.display()))?;

    let mut app = DashboardApp::new(Arc::new(dataset), config.slider_step);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(stdin.lock(), stdout.lock())?;

    log::info!("Input closed, shutting down");
    Ok(())
}
