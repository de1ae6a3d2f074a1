//! Shared test utilities for the catalog-press test suite.
//!
//! Provides an in-memory [`MockSource`] that records every request, a
//! loopback [`TestOrigin`] for the HTTP source, canned section documents for
//! a complete catalogue, and a fixture copier for tests that exercise
//! [`DirSource`](crate::source::DirSource).
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let source = MockSource::new().with_catalog("qx-1");
//! let catalog = CatalogLoader::new(&source, &LoaderConfig::default())
//!     .load_catalog(&CatalogId::new("qx-1"))
//!     .unwrap();
//! assert_eq!(source.heads().len(), 1); // hero_00 probe answered 404
//! ```

use crate::source::{ContentSource, DirEntry, Head, Response, SourceError};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

// =========================================================================
// Mock content source
// =========================================================================

#[derive(Debug, Clone)]
enum Canned {
    Body {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    NetworkError,
}

/// Request recorded by [`MockSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Get(String),
    Head(String),
    List(String),
}

/// In-memory content store. Unknown paths answer 404.
///
/// Uses Mutex (not RefCell) so it is Sync and works with rayon fan-out.
#[derive(Default)]
pub struct MockSource {
    resources: HashMap<String, Canned>,
    listings: HashMap<String, Result<Vec<DirEntry>, u16>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: &str) -> Self {
        self.resources.insert(
            path.to_string(),
            Canned::Body {
                status: 200,
                content_type: Some("application/json".into()),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn with_image(mut self, path: &str) -> Self {
        self.resources.insert(
            path.to_string(),
            Canned::Body {
                status: 200,
                content_type: Some("image/jpeg".into()),
                body: b"\xff\xd8\xff".to_vec(),
            },
        );
        self
    }

    /// A resource answering with the given status and content type.
    pub fn with_resource(mut self, path: &str, status: u16, content_type: &str) -> Self {
        self.resources.insert(
            path.to_string(),
            Canned::Body {
                status,
                content_type: Some(content_type.to_string()),
                body: Vec::new(),
            },
        );
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.resources.insert(
            path.to_string(),
            Canned::Body {
                status,
                content_type: Some("text/html".into()),
                body: b"error".to_vec(),
            },
        );
        self
    }

    pub fn with_network_error(mut self, path: &str) -> Self {
        self.resources
            .insert(path.to_string(), Canned::NetworkError);
        self
    }

    pub fn without(mut self, path: &str) -> Self {
        self.resources.remove(path);
        self
    }

    /// Directory listing; `(name, is_dir)` pairs in the given order.
    pub fn with_listing(mut self, path: &str, entries: &[(&str, bool)]) -> Self {
        let entries = entries
            .iter()
            .map(|(name, is_dir)| DirEntry {
                name: name.to_string(),
                is_dir: *is_dir,
            })
            .collect();
        self.listings.insert(path.to_string(), Ok(entries));
        self
    }

    /// Listing service answering with a failure status.
    pub fn with_failing_listing(mut self, path: &str, status: u16) -> Self {
        self.listings.insert(path.to_string(), Err(status));
        self
    }

    /// All eight section documents plus `config.json` for a catalogue.
    pub fn with_catalog(self, id: &str) -> Self {
        catalog_documents(id)
            .into_iter()
            .fold(self, |source, (path, body)| source.with_json(&path, &body))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Get(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn heads(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Head(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    fn record(&self, request: Recorded) {
        self.requests.lock().unwrap().push(request);
    }

    fn lookup(&self, path: &str) -> Result<(u16, Option<String>, Vec<u8>), SourceError> {
        match self.resources.get(path) {
            Some(Canned::Body {
                status,
                content_type,
                body,
            }) => Ok((*status, content_type.clone(), body.clone())),
            Some(Canned::NetworkError) => Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("connection refused: {path}"),
            ))),
            None => Ok((404, None, Vec::new())),
        }
    }
}

impl ContentSource for MockSource {
    fn get(&self, path: &str) -> Result<Response, SourceError> {
        self.record(Recorded::Get(path.to_string()));
        let (status, content_type, body) = self.lookup(path)?;
        Ok(Response {
            status,
            content_type,
            body,
        })
    }

    fn head(&self, path: &str) -> Result<Head, SourceError> {
        self.record(Recorded::Head(path.to_string()));
        let (status, content_type, _) = self.lookup(path)?;
        Ok(Head {
            status,
            content_type,
        })
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        self.record(Recorded::List(path.to_string()));
        match self.listings.get(path) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(status)) => Err(SourceError::Status {
                path: path.to_string(),
                status: *status,
            }),
            None => Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no listing for {path}"),
            ))),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

// =========================================================================
// Local HTTP origin
// =========================================================================

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

/// A request as the origin received it. Header names are lowercase.
#[derive(Debug, Clone)]
pub struct ServedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl ServedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Canned HTTP/1.1 origin for exercising [`HttpSource`](crate::source::HttpSource)
/// over a real socket. Unknown paths answer an HTML 404, like a web server.
#[derive(Default)]
pub struct TestOrigin {
    routes: HashMap<String, Route>,
}

impl TestOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, path: &str, status: u16, content_type: &str, body: &[u8]) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                content_type: content_type.to_string(),
                body: body.to_vec(),
            },
        );
        self
    }

    pub fn with_json(self, path: &str, body: &str) -> Self {
        self.route(path, 200, "application/json", body.as_bytes())
    }

    pub fn with_image(self, path: &str) -> Self {
        self.route(path, 200, "image/jpeg", b"\xff\xd8\xff")
    }

    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.route(path, status, "text/html; charset=utf-8", b"<h1>error</h1>")
    }

    pub fn with_catalog(self, id: &str) -> Self {
        catalog_documents(id)
            .into_iter()
            .fold(self, |origin, (path, body)| origin.with_json(&path, &body))
    }

    /// Bind `127.0.0.1:0` and answer requests on a background thread.
    pub fn serve(self) -> RunningOrigin {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let routes = self.routes;
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let _ = answer(stream, &routes, &log);
            }
        });
        RunningOrigin { base_url, requests }
    }
}

/// Handle to a served [`TestOrigin`]. The thread lives until the test binary exits.
pub struct RunningOrigin {
    pub base_url: String,
    requests: Arc<Mutex<Vec<ServedRequest>>>,
}

impl RunningOrigin {
    pub fn requests(&self) -> Vec<ServedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of every request with the given method, in arrival order.
    pub fn paths(&self, method: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .map(|r| r.path)
            .collect()
    }
}

fn answer(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<ServedRequest>>,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route {
        status: 404,
        content_type: "text/html; charset=utf-8".to_string(),
        body: b"<h1>Not found</h1>".to_vec(),
    });
    log.lock().unwrap().push(ServedRequest {
        method: method.clone(),
        path,
        headers,
    });

    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {reason}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        route.content_type,
        route.body.len()
    );
    stream.write_all(head.as_bytes())?;
    if method != "HEAD" {
        stream.write_all(&route.body)?;
    }
    stream.flush()
}

// =========================================================================
// Canned section documents
// =========================================================================

pub fn catalog_config_json(id: &str) -> String {
    format!(
        r#"{{
    "meta": {{
        "title": "Collection {id}",
        "description": "Height-adjustable desks",
        "brandName": "Metro",
        "collectionName": "QX"
    }}
}}"#
    )
}

/// `(path, body)` for `config.json` and the eight section documents.
pub fn catalog_documents(id: &str) -> Vec<(String, String)> {
    let base = format!("/catalogs/{id}");
    vec![
        (format!("{base}/config.json"), catalog_config_json(id)),
        (format!("{base}/hero/content.json"), HERO_JSON.to_string()),
        (format!("{base}/overview/content.json"), OVERVIEW_JSON.to_string()),
        (format!("{base}/gallery/content.json"), GALLERY_JSON.to_string()),
        (format!("{base}/variants/content.json"), VARIANTS_JSON.to_string()),
        (format!("{base}/dimensions/content.json"), DIMENSIONS_JSON.to_string()),
        (format!("{base}/materials/content.json"), MATERIALS_JSON.to_string()),
        (format!("{base}/features/content.json"), FEATURES_JSON.to_string()),
        (format!("{base}/assembly/content.json"), ASSEMBLY_JSON.to_string()),
    ]
}

pub const HERO_JSON: &str = r#"{
    "brandLabel": "Metro",
    "collectionName": "QX",
    "tagline": "Work standing. Think sitting.",
    "ctaLabel": "Explore",
    "heroImage": "hero.jpg",
    "heroImageAlt": "QX desk in a loft"
}"#;

pub const OVERVIEW_JSON: &str = r#"{
    "sectionLabel": "01",
    "title": "Overview",
    "paragraphs": ["A modular desk system."],
    "packshotImage": "packshot.png",
    "packshotImageAlt": "QX packshot",
    "packshotCaption": "QX, shown in oak",
    "features": [{"icon": "ruler", "title": "Precise", "desc": "Millimetre travel"}],
    "quickLinkLabels": ["Variants", "Dimensions"]
}"#;

pub const GALLERY_JSON: &str = r#"{
    "sectionLabel": "02",
    "title": "Gallery",
    "images": [
        {"image": "a.jpg", "alt": "Office", "category": "interior"},
        {"image": "https://cdn.example/b.jpg", "alt": "Studio", "category": "detail"}
    ]
}"#;

pub const VARIANTS_JSON: &str = r##"{
    "sectionLabel": "03",
    "title": "Variants",
    "desktopColors": [{"name": "Oak", "code": "#c8a165"}],
    "frameColors": [{"name": "Black", "code": "#111111", "ral": "RAL 9005"}],
    "sizes": [{"label": "140", "desc": "140 x 80 cm"}],
    "previewImage": "preview.jpg",
    "comparisonTable": [{"feature": "Motors", "basic": "1", "premium": "2"}]
}"##;

pub const DIMENSIONS_JSON: &str = r#"{
    "sectionLabel": "04",
    "title": "Dimensions",
    "specs": [{"label": "Height", "value": "62-127 cm"}],
    "certifications": ["EN 527"],
    "dimensionDiagram": {"width": "140", "depth": "80", "heightRange": "62-127"}
}"#;

pub const MATERIALS_JSON: &str = r##"{
    "sectionLabel": "05",
    "title": "Materials",
    "materials": [{"name": "Oak", "desc": "Solid", "specs": "FSC"}],
    "swatches": [{"name": "Oak", "hex": "#c8a165"}],
    "detailImage": "detail.jpg",
    "detailImageAlt": "Oak grain",
    "detailImageCaption": "Oak, oiled"
}"##;

pub const FEATURES_JSON: &str = r#"{
    "sectionLabel": "06",
    "title": "Features",
    "items": [{"icon": "zap", "title": "Fast", "desc": "40 mm/s", "badge": "New"}]
}"#;

pub const ASSEMBLY_JSON: &str = r#"{
    "sectionLabel": "07",
    "title": "Assembly",
    "steps": [{"step": 1, "title": "Frame", "desc": "Bolt the legs"}],
    "orderCodes": [{"code": "QX-140-OAK", "desc": "QX 140 oak"}],
    "ctaLabels": {"quote": "Request a quote", "pdf": "Download PDF", "contact": "Contact"},
    "footerText": "Metro furniture",
    "versionInfo": "v1.0"
}"#;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
