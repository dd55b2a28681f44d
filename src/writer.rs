//! Writing declaration files to the output directory.

use std::io::ErrorKind;
use std::path::Path;

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::declaration::Declaration;
use crate::error::{DtoGenError, Result};

/// Creates `dest` unless it already exists.
///
/// Only the last path component is created; a missing parent is an error.
pub async fn ensure_output_dir(dest: &Path) -> Result<()> {
    match tokio::fs::create_dir(dest).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(DtoGenError::CreateDir {
            path: dest.display().to_string(),
            source: e,
        }),
    }
}

/// Writes every declaration into `dest` concurrently.
///
/// Resolves once all writes have finished. The first failing write is
/// returned and the writes still pending are dropped; files that were already
/// written stay on disk.
pub async fn write_declarations(dest: &Path, declarations: &[Declaration]) -> Result<usize> {
    ensure_output_dir(dest).await?;

    let writes = declarations.iter().map(|declaration| async move {
        let path = dest.join(&declaration.file_name);
        tokio::fs::write(&path, &declaration.content)
            .await
            .map_err(|e| DtoGenError::Write {
                path: path.display().to_string(),
                source: e,
            })?;
        debug!("Wrote {}", path.display());
        Ok::<_, DtoGenError>(())
    });
    let written = try_join_all(writes).await?.len();

    info!("Wrote {} declarations to {}", written, dest.display());
    Ok(written)
}
