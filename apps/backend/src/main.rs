//! PixelMaker backend entry point.

mod app;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting PixelMaker backend"
    );

    // Prepare the portable data layout next to the executable.
    let layout = pixelmaker_settings::Layout::portable();
    layout.ensure()?;
    tracing::info!(base = %layout.base().display(), "portable layout ready");

    // Build and run the tokio runtime.
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(layout))?;

    tracing::info!("backend shut down cleanly");
    Ok(())
}
