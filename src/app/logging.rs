//! Tracing subscriber setup shared by the binaries

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::{AppError, AppResult};

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` (default `warn`). Events go to stderr,
/// or to `log_file` when given: in raw mode anything written to the
/// terminal lands in the middle of the frame.
pub fn init(log_file: Option<&Path>) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::Load {
                path: path.to_path_buf(),
                source,
            })?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        },
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        },
    }

    Ok(())
}
