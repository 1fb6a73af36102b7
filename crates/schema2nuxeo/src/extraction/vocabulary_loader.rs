//! Fetch and deserialize the vocabulary JSON.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::vocabulary::Vocabulary;

/// Default vocabulary location.
pub const ALL_JSON_URL: &str = "http://schema.rdfs.org/all.json";

/// Errors that can occur during loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown type {0}")]
    UnknownType(String),
    #[error("type {type_id} declares unknown property {property}")]
    UnknownProperty { type_id: String, property: String },
    #[error("type {type_id} declares unknown ancestor {ancestor}")]
    UnknownAncestor { type_id: String, ancestor: String },
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load a vocabulary from a URL or a local file path.
pub fn load(source: &str) -> Result<Vocabulary, LoadError> {
    if is_remote(source) {
        fetch(source)
    } else {
        load_json(Path::new(source))
    }
}

/// Fetch a vocabulary over HTTP. Any non-success status is an error.
pub fn fetch(url: &str) -> Result<Vocabulary, LoadError> {
    tracing::info!("fetching vocabulary from {url}");
    let http_err = |source| LoadError::Http {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url).map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().map_err(http_err)?;
    parse_str(&body)
}

/// Load a vocabulary JSON file from disk.
pub fn load_json(path: &Path) -> Result<Vocabulary, LoadError> {
    tracing::info!("loading vocabulary from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}

pub fn parse_str(content: &str) -> Result<Vocabulary, LoadError> {
    let vocabulary: Vocabulary = serde_json::from_str(content)?;
    tracing::debug!(
        types = vocabulary.types.len(),
        properties = vocabulary.properties.len(),
        "parsed vocabulary"
    );
    Ok(vocabulary)
}
