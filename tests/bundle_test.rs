mod common;

use common::ArchiveServer;
use revealprez::{
    BuildConfig, BuildOrchestrator, BundleProvisioner, FetchOutcome, PrezError, RemoteBundle,
    VendorBundle, fetch_archive,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_fetch_archive_downloads_once() {
    let server = ArchiveServer::start("4.1.0");
    let cache = TempDir::new().expect("Failed to create temp dir");
    let bundle = VendorBundle::new("4.1.0", &server.base_url, cache.path());

    let first = fetch_archive(&bundle.download_url(), &bundle.archive_path())
        .expect("First fetch should succeed");
    let second = fetch_archive(&bundle.download_url(), &bundle.archive_path())
        .expect("Second fetch should succeed");

    assert!(matches!(first, FetchOutcome::Downloaded(n) if n > 0));
    assert_eq!(second, FetchOutcome::Cached);
    assert_eq!(server.hits(), 1);
    assert!(bundle.archive_path().is_file());
}

#[test]
fn test_fetch_archive_reports_status() {
    let server = ArchiveServer::start("4.1.0");
    let cache = TempDir::new().expect("Failed to create temp dir");
    let bundle = VendorBundle::new("9.9.9", &server.base_url, cache.path());

    let result = fetch_archive(&bundle.download_url(), &bundle.archive_path());

    match result {
        Err(PrezError::HttpStatusError { url, status }) => {
            assert_eq!(status, 404);
            assert_eq!(url, bundle.download_url());
        }
        other => panic!("Expected HttpStatusError, got {:?}", other),
    }
    // A failed download must not look like a cache hit next time
    assert!(!bundle.archive_path().exists());
}

#[test]
fn test_remote_bundle_provisions_template() {
    let server = ArchiveServer::start("4.1.0");
    let cache = TempDir::new().expect("Failed to create temp dir");
    let bundle = VendorBundle::new("4.1.0", &server.base_url, cache.path());
    let remote = RemoteBundle::new(bundle.clone());

    let template = remote.provision().expect("Provisioning should succeed");
    let again = remote.provision().expect("Second provisioning should succeed");

    assert_eq!(template, bundle.template_dir());
    assert_eq!(again, template);
    assert_eq!(server.hits(), 1);
    assert_eq!(
        fs::read_to_string(template.join("dist/reveal.js")).unwrap(),
        "var Reveal = {};"
    );
    assert!(template.join("plugin/highlight/highlight.js").is_file());
}

#[test]
fn test_versions_are_cached_side_by_side() {
    let old = ArchiveServer::start("3.8.0");
    let new = ArchiveServer::start("4.1.0");
    let cache = TempDir::new().expect("Failed to create temp dir");

    let old_bundle = VendorBundle::new("3.8.0", &old.base_url, cache.path());
    let new_bundle = VendorBundle::new("4.1.0", &new.base_url, cache.path());
    RemoteBundle::new(old_bundle.clone()).provision().unwrap();
    RemoteBundle::new(new_bundle.clone()).provision().unwrap();

    assert!(old_bundle.archive_path().is_file());
    assert!(new_bundle.archive_path().is_file());
    assert!(old_bundle.template_dir().join("dist/reveal.js").is_file());
    assert!(new_bundle.template_dir().join("dist/reveal.js").is_file());
}

#[test]
fn test_remote_build_end_to_end() {
    let server = ArchiveServer::start("4.1.0");
    let root = TempDir::new().expect("Failed to create temp dir");
    let input = root.path().join("talk");
    fs::create_dir_all(input.join("assets")).unwrap();
    fs::write(input.join("index.md"), "Hello\n----SLIDE----\nWorld").unwrap();
    fs::write(input.join("assets/logo.svg"), "<svg/>").unwrap();

    let mut config = BuildConfig::new(&input);
    config.output_dir = root.path().join("out");
    config.cache_dir = root.path().join("cache");
    config.revealjs_version = "4.1.0".to_string();
    config.bundle_base_url = server.base_url.clone();
    let config = config.resolve().expect("Config should resolve");

    let orchestrator = BuildOrchestrator::remote(config).expect("Failed to create orchestrator");
    let first = orchestrator.build().expect("Build should succeed");
    let second = orchestrator.build().expect("Rebuild should succeed");

    assert_eq!(server.hits(), 1);
    assert_eq!(first, second);
    assert_eq!(first.slides, 2);
    assert_eq!(first.template_files, 5);
    assert_eq!(first.assets_copied, Some(1));

    let out = root.path().join("out");
    assert!(out.join("dist/reveal.js").is_file());
    assert!(out.join("assets/logo.svg").is_file());
    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.find("Hello").unwrap() < html.find("World").unwrap());
}
