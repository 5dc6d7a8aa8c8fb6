#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tiny_http::{Response, Server, StatusCode};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Build an in-memory reveal.js-like release archive for `version`
pub fn release_zip(version: &str) -> Vec<u8> {
    let prefix = format!("reveal.js-{}", version);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let dir_options = FileOptions::default().unix_permissions(0o755);
    let file_options = FileOptions::default().unix_permissions(0o644);

    zip.add_directory(format!("{}/", prefix), dir_options)
        .expect("Failed to add directory");
    for (name, content) in [
        ("dist/reveal.js", "var Reveal = {};"),
        ("dist/reveal.css", ".reveal {}"),
        ("dist/theme/black.css", "body { background: #000; }"),
        ("plugin/markdown/markdown.js", "var RevealMarkdown = {};"),
        ("plugin/highlight/highlight.js", "var RevealHighlight = {};"),
    ] {
        zip.start_file(format!("{}/{}", prefix, name), file_options)
            .expect("Failed to start file");
        zip.write_all(content.as_bytes())
            .expect("Failed to write file");
    }

    zip.finish().expect("Failed to finish zip").into_inner()
}

/// Local stand-in for the release download host
pub struct ArchiveServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl ArchiveServer {
    /// Serve `release_zip(version)` at `<base_url>/<version>.zip`, 404 elsewhere
    pub fn start(version: &str) -> Self {
        let server = Server::http("127.0.0.1:0").expect("Failed to start HTTP server");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("Server should listen on TCP");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let expected = format!("/archive/{}.zip", version);
        let body = release_zip(version);

        thread::spawn(move || {
            for request in server.incoming_requests() {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = if request.url() == expected {
                    Response::from_data(body.clone())
                } else {
                    Response::from_data(b"404 Not Found".to_vec()).with_status_code(StatusCode(404))
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{}/archive", addr),
            hits,
        }
    }

    /// Number of requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
