mod app;
mod client;
mod config;
mod error;
mod logging;
mod summary;
mod ui;

#[cfg(test)]
mod test_support;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;
    tracing::info!(base_url = %config.base_url, "starting expense tui");

    let mut app = app::App::new(&config)?;
    let result = app.run().await;
    if let Err(err) = &result {
        tracing::error!("expense tui exited with error: {err}");
    }
    result
}
