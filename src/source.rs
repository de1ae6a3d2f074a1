//! Content sources: where catalogue documents and images are read from.
//!
//! The [`ContentSource`] trait defines the three operations the pipeline
//! needs from a content store: fetch a document, probe a resource's
//! metadata, and list a directory. Everything above this module is
//! source-agnostic.
//!
//! Two implementations ship:
//!
//! | Source | Store | Listing |
//! |---|---|---|
//! | [`HttpSource`] | remote origin over HTTP(S) via `minreq` | listing endpoint returning `{ "catalogs": [...] }` |
//! | [`DirSource`] | local content directory | `read_dir` |
//!
//! Sources report failures as [`SourceError`]. A non-success HTTP status is
//! *not* an error for `get`/`head`; callers inspect [`Response::status`].
//! Turning errors into "absent" is the job of [`crate::fetch`].

use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] minreq::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path} answered status {status}")]
    Status { path: String, status: u16 },
    #[error("Path escapes the content root: {0}")]
    OutsideRoot(String),
    #[error("Not supported by this source: {0}")]
    Unsupported(String),
}

/// A fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Result of a metadata-only probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub status: u16,
    pub content_type: Option<String>,
}

impl Head {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Successful and declared as `image/*`.
    pub fn is_image(&self) -> bool {
        self.is_success()
            && self
                .content_type
                .as_deref()
                .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("image/"))
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A read-only store of catalogue content addressed by root-relative paths.
///
/// Implementations must be `Sync`: the assembler fetches sections on scoped
/// threads and loads catalogues on rayon workers, all sharing one source.
pub trait ContentSource: Sync {
    /// Fetch a resource body. Caching must be bypassed.
    fn get(&self, path: &str) -> Result<Response, SourceError>;

    /// Fetch status and content type without the body.
    fn head(&self, path: &str) -> Result<Head, SourceError>;

    /// List the entries of a directory.
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError>;

    /// Local directory backing this source, if any. Used to copy assets
    /// next to generated pages.
    fn local_root(&self) -> Option<&Path> {
        None
    }

    /// Human-readable location for logs and CLI output.
    fn describe(&self) -> String;
}

// ============================================================================
// HTTP
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListingBody {
    #[serde(default)]
    catalogs: Vec<String>,
}

/// Remote content origin.
///
/// Directory listings are only available for the catalogue root, through the
/// origin's listing endpoint. The endpoint already filters out files; every
/// returned name is reported as a directory.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    listing_root: String,
    listing_endpoint: String,
    timeout_secs: u64,
    user_agent: String,
}

impl HttpSource {
    pub fn new(base_url: &str, config: &crate::config::LoaderConfig) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            listing_root: config.content.catalog_root.clone(),
            listing_endpoint: config.content.listing_endpoint.clone(),
            timeout_secs: config.http.timeout_secs,
            user_agent: config.http.user_agent.clone(),
        }
    }

    /// Absolute URL for a content path. Already-absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn prepare(&self, request: minreq::Request) -> minreq::Request {
        request
            .with_header("User-Agent", self.user_agent.as_str())
            .with_header("Cache-Control", "no-cache")
            .with_header("Pragma", "no-cache")
            .with_timeout(self.timeout_secs)
    }
}

fn status_of(response: &minreq::Response) -> u16 {
    u16::try_from(response.status_code).unwrap_or(0)
}

impl ContentSource for HttpSource {
    fn get(&self, path: &str) -> Result<Response, SourceError> {
        let url = self.url(path);
        let response = self.prepare(minreq::get(&url)).send()?;
        let status = status_of(&response);
        let content_type = response.headers.get("content-type").cloned();
        Ok(Response {
            status,
            content_type,
            body: response.into_bytes(),
        })
    }

    fn head(&self, path: &str) -> Result<Head, SourceError> {
        let url = self.url(path);
        let response = self.prepare(minreq::head(&url)).send()?;
        Ok(Head {
            status: status_of(&response),
            content_type: response.headers.get("content-type").cloned(),
        })
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        if path.trim_end_matches('/') != self.listing_root.trim_end_matches('/') {
            return Err(SourceError::Unsupported(format!(
                "remote listing of {path}"
            )));
        }
        let response = self.get(&self.listing_endpoint)?;
        if !response.is_success() {
            return Err(SourceError::Status {
                path: self.listing_endpoint.clone(),
                status: response.status,
            });
        }
        let body: ListingBody = serde_json::from_slice(&response.body)?;
        Ok(body
            .catalogs
            .into_iter()
            .map(|name| DirEntry { name, is_dir: true })
            .collect())
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

// ============================================================================
// Local directory
// ============================================================================

/// A content directory laid out exactly as a static web server would serve it.
///
/// Missing files answer status 404 rather than an error so that local and
/// remote stores behave the same for callers.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a root-relative content path onto the filesystem.
    ///
    /// Only plain path segments are allowed; `..`, drive prefixes and
    /// absolute URLs are refused.
    fn local_path(&self, path: &str) -> Result<PathBuf, SourceError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Err(SourceError::Unsupported(format!("remote URL {path}")));
        }
        let relative = Path::new(path.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(SourceError::OutsideRoot(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

const NOT_FOUND: u16 = 404;

impl ContentSource for DirSource {
    fn get(&self, path: &str) -> Result<Response, SourceError> {
        let local = self.local_path(path)?;
        if !local.is_file() {
            return Ok(Response {
                status: NOT_FOUND,
                content_type: None,
                body: Vec::new(),
            });
        }
        let body = fs::read(&local)?;
        Ok(Response {
            status: 200,
            content_type: Some(content_type_for(&local).to_string()),
            body,
        })
    }

    fn head(&self, path: &str) -> Result<Head, SourceError> {
        let local = self.local_path(path)?;
        if !local.is_file() {
            return Ok(Head {
                status: NOT_FOUND,
                content_type: None,
            });
        }
        Ok(Head {
            status: 200,
            content_type: Some(content_type_for(&local).to_string()),
        })
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        let local = self.local_path(path)?;
        let mut entries = Vec::new();
        for entry in fs::read_dir(&local)? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                // Follows symlinks, as a web server would.
                is_dir: entry.path().is_dir(),
            });
        }
        Ok(entries)
    }

    fn local_root(&self) -> Option<&Path> {
        Some(&self.root)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// MIME type from a file extension, the way a static file server guesses it.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "json" => "application/json",
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
