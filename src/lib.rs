// ABOUTME: Library module for the revealprez program.
// ABOUTME: Contains the build pipeline that turns one Markdown file into a reveal.js site.

// Reexport modules
pub mod bundle;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod html;
pub mod mirror;
pub mod pipeline;
pub mod slides;
pub mod unpack;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use bundle::{BundleProvisioner, RemoteBundle, VendorBundle};
pub use config::BuildConfig;
pub use errors::{PrezError, Result};
pub use fetch::{FetchOutcome, fetch_archive};
pub use html::{render_presentation, write_presentation};
pub use mirror::mirror_tree;
pub use pipeline::{BuildOrchestrator, BuildReport};
pub use slides::{Slide, SlideParser};
pub use unpack::{UnpackOutcome, unpack_archive};
pub use watch::{ChangeWatcher, Debounce, WatchConfig, WatchOutcome, watch};
