// ABOUTME: Vendor bundle provisioning for the revealprez application
// ABOUTME: Defines the provisioning seam and the default download-and-unpack implementation

use crate::config::BuildConfig;
use crate::errors::Result;
use crate::fetch;
use crate::unpack;
use log::info;
use std::path::{Path, PathBuf};

/// A reveal.js release and where it is fetched from and cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorBundle {
    pub version: String,
    pub base_url: String,
    pub cache_dir: PathBuf,
}

impl VendorBundle {
    pub fn new(version: &str, base_url: &str, cache_dir: &Path) -> Self {
        Self {
            version: version.to_string(),
            base_url: base_url.to_string(),
            cache_dir: cache_dir.to_path_buf(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(
            &config.revealjs_version,
            &config.bundle_base_url,
            &config.cache_dir,
        )
    }

    /// `<base_url>/<version>.zip`
    pub fn download_url(&self) -> String {
        format!("{}/{}.zip", self.base_url.trim_end_matches('/'), self.version)
    }

    /// Cached archive, one per version
    pub fn archive_path(&self) -> PathBuf {
        self.cache_dir.join(format!("revealjs.{}.zip", self.version))
    }

    /// Unpacked template, one per version
    pub fn template_dir(&self) -> PathBuf {
        self.cache_dir
            .join(format!("revealjs_template.{}", self.version))
    }

    /// Name of the single top-level directory inside the release archive
    pub fn archive_prefix(&self) -> String {
        format!("reveal.js-{}", self.version)
    }
}

/// Makes the vendor template available on local disk.
///
/// The orchestrator only depends on this trait, so tests can hand it a
/// prepared directory instead of going to the network.
pub trait BundleProvisioner {
    /// Ensure the template is present and return its directory.
    fn provision(&self) -> Result<PathBuf>;

    /// Paths the provisioner writes to, which a watcher should not react to.
    fn managed_paths(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Downloads the release archive once per version and unpacks it once.
pub struct RemoteBundle {
    bundle: VendorBundle,
}

impl RemoteBundle {
    pub fn new(bundle: VendorBundle) -> Self {
        Self { bundle }
    }
}

impl BundleProvisioner for RemoteBundle {
    fn provision(&self) -> Result<PathBuf> {
        let archive = self.bundle.archive_path();
        let template_dir = self.bundle.template_dir();

        let fetched = fetch::fetch_archive(&self.bundle.download_url(), &archive)?;
        let unpacked =
            unpack::unpack_archive(&archive, &self.bundle.archive_prefix(), &template_dir)?;
        info!(
            "reveal.js {} ready ({:?}, {:?})",
            self.bundle.version, fetched, unpacked
        );

        Ok(template_dir)
    }

    fn managed_paths(&self) -> Vec<PathBuf> {
        let archive = self.bundle.archive_path();
        vec![
            fetch::partial_path(&archive),
            archive,
            self.bundle.template_dir(),
        ]
    }
}
