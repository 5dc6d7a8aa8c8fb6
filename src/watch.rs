// ABOUTME: Watch module for monitoring the input directory and rebuilding
// ABOUTME: Runs an initial build, then rebuilds on file changes with a debounce

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::errors::{PrezError, Result};
use crate::pipeline::{BuildOrchestrator, BuildReport};

/// Configuration for watch mode
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory to watch, recursively
    pub root: PathBuf,

    /// Minimum time between the start of two rebuilds
    pub debounce: Duration,

    /// Changes below these paths never trigger a rebuild
    pub ignored: Vec<PathBuf>,
}

impl WatchConfig {
    /// Watch the orchestrator's input directory, ignoring everything it writes
    pub fn for_orchestrator(orchestrator: &BuildOrchestrator) -> Self {
        Self {
            root: orchestrator.config().input_dir.clone(),
            debounce: orchestrator.config().debounce(),
            ignored: orchestrator.managed_paths(),
        }
    }
}

/// Rate limit for rebuilds. Triggers inside the window are dropped, not
/// deferred, and the window restarts only when a trigger goes through.
#[derive(Debug, Clone)]
pub struct Debounce {
    interval: Duration,
    last_run: Instant,
}

impl Debounce {
    pub fn new(interval: Duration, started: Instant) -> Self {
        Self {
            interval,
            last_run: started,
        }
    }

    /// Returns true, and restarts the window, if `now` is past the window.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_run) > self.interval {
            self.last_run = now;
            true
        } else {
            false
        }
    }
}

/// What happened to a single notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Rebuilt,
    /// The rebuild ran and failed; watching goes on
    Failed,
    /// Dropped because it arrived inside the debounce window
    Debounced,
    /// Not a change to user content
    Ignored,
    /// The notification channel reported an error
    ChannelError,
}

/// Dispatches filesystem notifications to a rebuild function
pub struct ChangeWatcher<F>
where
    F: FnMut() -> Result<BuildReport>,
{
    config: WatchConfig,
    debounce: Debounce,
    rebuild: F,
    rebuilds: usize,
}

impl<F> ChangeWatcher<F>
where
    F: FnMut() -> Result<BuildReport>,
{
    pub fn new(config: WatchConfig, rebuild: F, started: Instant) -> Self {
        let debounce = Debounce::new(config.debounce, started);
        Self {
            config,
            debounce,
            rebuild,
            rebuilds: 0,
        }
    }

    /// Number of rebuilds attempted so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Handle one notification received at `now`.
    ///
    /// A failed rebuild is logged and reported as `Failed`; it does not end
    /// the watch.
    pub fn handle_event(&mut self, event: notify::Result<Event>, now: Instant) -> WatchOutcome {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                error!("Watch error: {:?}", e);
                return WatchOutcome::ChannelError;
            }
        };

        if !self.is_relevant(&event) {
            debug!("Ignoring event {:?}", event);
            return WatchOutcome::Ignored;
        }

        if !self.debounce.try_fire(now) {
            debug!("Debounced event {:?}", event.paths);
            return WatchOutcome::Debounced;
        }

        info!("Change detected in {:?}, rebuilding", event.paths);
        self.rebuilds += 1;
        match (self.rebuild)() {
            Ok(report) => {
                info!("Rebuilt {} slides", report.slides);
                WatchOutcome::Rebuilt
            }
            Err(e) => {
                error!("Failed to rebuild presentation: {}", e);
                WatchOutcome::Failed
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        // Some backends send events without paths; treat them as changes
        if event.paths.is_empty() {
            return true;
        }
        event
            .paths
            .iter()
            .any(|path| !is_ignored_path(path, &self.config.ignored))
    }
}

fn is_ignored_path(path: &Path, ignored: &[PathBuf]) -> bool {
    ignored.iter().any(|root| path.starts_with(root))
}

/// Build once, then rebuild on every debounced change under the input
/// directory until the process is terminated.
///
/// The first build and the subscription are fatal on failure; later
/// rebuild failures are only logged.
pub fn watch(orchestrator: &BuildOrchestrator, config: WatchConfig) -> Result<()> {
    let report = orchestrator.build()?;
    info!("Initial build: {} slides", report.slides);

    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(tx)
        .map_err(|e| PrezError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    watcher
        .watch(&config.root, RecursiveMode::Recursive)
        .map_err(|e| {
            PrezError::WatchError(format!(
                "Failed to start watching directory {:?}: {}",
                config.root, e
            ))
        })?;

    info!("Watching for changes in {:?}", config.root);
    println!(
        "Started listening for changes in {:?}, press CTRL+C to stop",
        config.root
    );

    let mut change_watcher = ChangeWatcher::new(config, || orchestrator.build(), Instant::now());
    for event in rx {
        change_watcher.handle_event(event, Instant::now());
    }

    Ok(())
}
