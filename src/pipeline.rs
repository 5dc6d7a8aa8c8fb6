// ABOUTME: Build orchestration for the revealprez application
// ABOUTME: Sequences provisioning, parsing, mirroring and rendering into one build

use crate::bundle::{BundleProvisioner, RemoteBundle, VendorBundle};
use crate::config::BuildConfig;
use crate::errors::{PrezError, Result};
use crate::html;
use crate::mirror;
use crate::slides::SlideParser;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Summary of one successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub slides: usize,
    pub index_path: PathBuf,
    pub template_files: usize,
    /// `None` when the input has no assets directory
    pub assets_copied: Option<usize>,
}

pub struct BuildOrchestrator {
    config: BuildConfig,
    parser: SlideParser,
    provisioner: Box<dyn BundleProvisioner>,
}

impl BuildOrchestrator {
    /// `config` is expected to be resolved already (see `BuildConfig::resolve`).
    pub fn new(config: BuildConfig, provisioner: Box<dyn BundleProvisioner>) -> Result<Self> {
        let parser = SlideParser::new(&config.separator, &config.embed_pattern)?;
        Ok(Self {
            config,
            parser,
            provisioner,
        })
    }

    /// Orchestrator that downloads and unpacks reveal.js as needed
    pub fn remote(config: BuildConfig) -> Result<Self> {
        let bundle = RemoteBundle::new(VendorBundle::from_config(&config));
        Self::new(config, Box::new(bundle))
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Paths written by builds; changes there are not user edits
    pub fn managed_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.provisioner.managed_paths();
        paths.push(self.config.output_dir.clone());
        paths
    }

    /// Run one full build.
    ///
    /// Slides are parsed before anything is written, so a broken source
    /// leaves the previous output untouched.
    pub fn build(&self) -> Result<BuildReport> {
        let template_dir = self.provisioner.provision()?;

        let slides = self
            .parser
            .parse_file(&self.config.input_dir, &self.config.filename)?;

        let template_files = mirror::mirror_tree(&template_dir, &self.config.output_dir)?;
        info!(
            "Copied {} template files to {:?}",
            template_files, self.config.output_dir
        );

        let (asset_dir, asset_output_dir) = self.config.assets_paths();
        let assets_copied = match fs::metadata(&asset_dir) {
            Ok(meta) if meta.is_dir() => {
                Some(mirror::mirror_tree(&asset_dir, &asset_output_dir)?)
            }
            Ok(_) => {
                warn!("Assets path is not a directory, skipping: {:?}", asset_dir);
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Assets dir not found: {:?}", asset_dir);
                None
            }
            Err(e) => return Err(PrezError::IoError(e)),
        };

        info!("Generating presentation...");
        let index_path = html::write_presentation(&self.config.output_dir, &slides)?;
        info!("Done: {} slides written to {:?}", slides.len(), index_path);

        Ok(BuildReport {
            slides: slides.len(),
            index_path,
            template_files,
            assets_copied,
        })
    }
}
