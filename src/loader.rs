//! Loading and decoding the spec document.

use indexmap::IndexMap;
use tracing::info;

use crate::config::SpecSource;
use crate::error::{DtoGenError, Result};
use crate::schema::{ApiDocument, Schema};

/// Fetches the raw spec text from a URL or reads it from disk.
pub async fn load_spec_text(source: &SpecSource) -> Result<String> {
    match source {
        SpecSource::Url(url) => fetch_spec_text(url).await,
        SpecSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DtoGenError::ReadSpec {
                    path: path.display().to_string(),
                    source: e,
                })
        }
    }
}

async fn fetch_spec_text(url: &str) -> Result<String> {
    info!("Fetching spec from {}", url);
    let fetch_error = |source| DtoGenError::Fetch {
        url: url.to_owned(),
        source,
    };

    let response = reqwest::get(url).await.map_err(fetch_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DtoGenError::HttpStatus {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(fetch_error)
}

/// Decodes YAML (or JSON) spec text and returns its definitions.
pub fn decode_definitions(text: &str) -> Result<IndexMap<String, Schema>> {
    let document: ApiDocument = serde_yaml::from_str(text)?;
    let definitions = document
        .definitions
        .ok_or(DtoGenError::MissingDefinitions)?;
    info!("Decoded {} definitions", definitions.len());
    Ok(definitions)
}
