//! External batch fingerprint generator.
//!
//! PaDEL-Descriptor is run once per batch as a Java subprocess. The trait
//! seam lets tests and alternative tools stand in for it.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{DescriptorError, FingerprintScheme};

/// One batch call: inputs, output and scheme configuration
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    /// Tab-delimited molecule listing
    pub listing: &'a Path,
    /// Descriptor table to create
    pub output: &'a Path,
    /// Scheme being generated
    pub scheme: FingerprintScheme,
    /// Descriptor-types file for the scheme
    pub scheme_config: &'a Path,
}

/// A tool that turns a molecule listing into a descriptor table
///
/// Implementations must write a CSV whose first column is `Name` (the
/// listing label) followed by the scheme's columns.
pub trait DescriptorGenerator {
    /// Run one batch. Returns once `request.output` is complete.
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), DescriptorError>;
}

impl<G: DescriptorGenerator + ?Sized> DescriptorGenerator for &G {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), DescriptorError> {
        (**self).generate(request)
    }
}

/// Settings for invoking PaDEL-Descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadelConfig {
    /// Java executable
    pub java: PathBuf,
    /// Path to `PaDEL-Descriptor.jar`
    pub jar: PathBuf,
    /// Directory holding the per-scheme descriptor-types XML files
    pub scheme_dir: PathBuf,
    /// Worker threads PaDEL may use
    pub threads: usize,
    /// Maximum JVM heap, e.g. `"2G"`
    pub max_heap: Option<String>,
}

impl Default for PadelConfig {
    fn default() -> Self {
        Self {
            java: PathBuf::from("java"),
            jar: PathBuf::from("PaDEL-Descriptor/PaDEL-Descriptor.jar"),
            scheme_dir: PathBuf::from("padel_fp_xmls"),
            threads: 2,
            max_heap: None,
        }
    }
}

/// [`DescriptorGenerator`] backed by the PaDEL-Descriptor command line
#[derive(Debug, Clone, Default)]
pub struct PadelDescriptor {
    config: PadelConfig,
}

impl PadelDescriptor {
    /// Create a runner
    pub fn new(config: PadelConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &PadelConfig {
        &self.config
    }

    /// Arguments passed to `java` for a request
    ///
    /// Aromaticity detection, nitro and tautomer standardisation and salt
    /// removal are always on.
    pub fn arguments(&self, request: &GenerationRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-Djava.awt.headless=true".into()];
        if let Some(heap) = &self.config.max_heap {
            args.push(format!("-Xmx{heap}").into());
        }
        args.push("-jar".into());
        args.push(self.config.jar.clone().into());
        args.push("-dir".into());
        args.push(request.listing.into());
        args.push("-file".into());
        args.push(request.output.into());
        args.push("-descriptortypes".into());
        args.push(request.scheme_config.into());
        for flag in [
            "-detectaromaticity",
            "-standardizenitro",
            "-standardizetautomers",
            "-removesalt",
            "-log",
            "-fingerprints",
            "-retainorder",
        ] {
            args.push(flag.into());
        }
        args.push("-threads".into());
        args.push(self.config.threads.max(1).to_string().into());
        args
    }
}

impl DescriptorGenerator for PadelDescriptor {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<(), DescriptorError> {
        if !request.scheme_config.exists() {
            return Err(DescriptorError::Generation(format!(
                "descriptor-types file for {} not found: {}",
                request.scheme,
                request.scheme_config.display()
            )));
        }

        let args = self.arguments(request);
        log::info!(
            "Running PaDEL-Descriptor ({}) on {}",
            request.scheme,
            request.listing.display()
        );
        log::debug!("{} {:?}", self.config.java.display(), args);

        let output = Command::new(&self.config.java)
            .args(&args)
            .output()
            .map_err(|e| {
                DescriptorError::Generation(format!(
                    "failed to launch {}: {e}",
                    self.config.java.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DescriptorError::Generation(format!(
                "PaDEL-Descriptor exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let size = std::fs::metadata(request.output).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(DescriptorError::Generation(format!(
                "PaDEL-Descriptor produced no output at {}",
                request.output.display()
            )));
        }

        log::debug!("PaDEL-Descriptor wrote {} bytes to {}", size, request.output.display());
        Ok(())
    }
}
