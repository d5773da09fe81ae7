//! Scan the functions directory for deployable functions.

use std::io::ErrorKind;

use tracing::debug;

use super::{DiscoveredFunction, FunctionsConfig, FunctionsError};

/// List functions under `config.dir`, sorted by name.
///
/// A missing directory yields an empty list. `base_url`, when present, is
/// used to compute each function's endpoint.
pub async fn discover(
    config: &FunctionsConfig,
    base_url: Option<&str>,
) -> Result<Vec<DiscoveredFunction>, FunctionsError> {
    let mut entries = match tokio::fs::read_dir(&config.dir).await {
        Ok(entries) => entries,
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            debug!(dir = %config.dir.display(), "functions directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut functions = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        // Follow symlinks so linked function directories are included.
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !config.exclude_prefix.is_empty() && name.starts_with(&config.exclude_prefix) {
            continue;
        }

        functions.push(DiscoveredFunction {
            endpoint: base_url.map(|base| config.endpoint_url(base, &name)),
            path: entry.path().display().to_string(),
            service: config.service.clone(),
            name,
        });
    }

    functions.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(functions)
}
