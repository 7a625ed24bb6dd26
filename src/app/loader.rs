//! Initial document loading

use std::path::Path;

use super::{AppError, AppResult};

/// Read the whole document at `path`
pub fn load_document(path: &Path) -> AppResult<Vec<u8>> {
    let content = std::fs::read(path).map_err(|source| AppError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "loaded document");
    Ok(content)
}
