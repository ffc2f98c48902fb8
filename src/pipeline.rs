//! End-to-end collection of a model's material and texture dependencies.
//!
//! The `.qc` script provides the material search path, the `.smd` files name
//! the materials, and the resolved materials name the textures.

use std::io;
use std::path::{Path, PathBuf};

use bon::Builder;
use itertools::Itertools;
use rootcause::Report;
use tracing::info;

use crate::data::read_text;
use crate::data::resolver::{PathResolver, Resolution};
use crate::error::{ErrorKind, IResult, io_failure};
use crate::materials::vmt::{MaterialScanner, PathStyle, TEXTURE_EXTENSION};
use crate::models::{qc, smd};

/// Extension of material files.
pub const MATERIAL_EXTENSION: &str = ".vmt";
/// Extension of geometry files searched for under the search directory.
pub const GEOMETRY_EXTENSION: &str = "smd";

/// Format of the written dependency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "bin", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// One path per line, materials first.
    #[default]
    Text,
    /// The full report, including unresolved names.
    #[cfg(feature = "json")]
    Json,
}

/// Inputs of one run.
#[derive(Debug, Clone, Builder)]
pub struct PipelineConfig {
    /// Directory searched recursively for geometry files.
    #[builder(into)]
    search_dir: PathBuf,
    /// The model's compile script.
    #[builder(into)]
    qc: PathBuf,
    /// Root of the model's materials.
    #[builder(into)]
    materials: PathBuf,
    /// Report successful resolutions too.
    #[builder(default)]
    verbose: bool,
    #[builder(default = PathStyle::host())]
    path_style: PathStyle,
}

impl PipelineConfig {
    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    pub fn qc(&self) -> &Path {
        &self.qc
    }

    pub fn materials(&self) -> &Path {
        &self.materials
    }

    /// Check that every input exists with the right file type.
    pub fn validate(&self) -> Result<(), ErrorKind> {
        if !self.search_dir.is_dir() {
            return Err(ErrorKind::SearchDirNotFound {
                path: self.search_dir.clone(),
            });
        }
        if !self.materials.is_dir() {
            return Err(ErrorKind::MaterialsDirNotFound {
                path: self.materials.clone(),
            });
        }
        if !self.qc.is_file() {
            return Err(ErrorKind::QcNotFound {
                path: self.qc.clone(),
            });
        }
        Ok(())
    }

    /// Validate the inputs, then resolve every material and texture the model uses.
    pub fn run(&self) -> IResult<DependencyReport> {
        self.validate().map_err(|e| Report::new(e))?;

        let qc_text = read_text(&self.qc)?;
        let material_dirs = qc::material_dirs(&qc_text, &self.materials);
        for dir in &material_dirs {
            info!("[+] Material directories '{}'", dir.display());
        }

        let geometry = find_geometry_files(&self.search_dir)?;
        info!("[+] Found {} SMDs", geometry.len());

        let material_names = smd::collect_material_names(&geometry)?;
        let materials = PathResolver::new(&material_dirs)
            .verbose(self.verbose)
            .resolve(&material_names, MATERIAL_EXTENSION);
        info!("[+] Found {} VMTs", materials.resolved.len());

        let scanner = MaterialScanner::builder()
            .path_style(self.path_style)
            .build();
        let material_files: Vec<&Path> = materials.paths().collect();
        let texture_names = scanner.collect_texture_names(&material_files)?;
        let textures = PathResolver::new([&self.materials])
            .verbose(self.verbose)
            .resolve(&texture_names, TEXTURE_EXTENSION);
        info!("[+] Found {} VTFs", textures.resolved.len());

        Ok(DependencyReport {
            material_dirs,
            materials,
            textures,
        })
    }
}

/// Every `.smd` file below `dir`, sorted.
pub fn find_geometry_files(dir: &Path) -> IResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/*.{GEOMETRY_EXTENSION}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).map_err(|e| Report::new(ErrorKind::from(e)))? {
        let path = entry.map_err(|e| {
            let path = e.path().to_owned();
            io_failure(path, io::Error::from(e))
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Everything a run found.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DependencyReport {
    /// Material search path taken from the `.qc` script.
    pub material_dirs: Vec<PathBuf>,
    pub materials: Resolution,
    pub textures: Resolution,
}

impl DependencyReport {
    /// Resolved material and texture files, materials first.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.materials.paths().chain(self.textures.paths())
    }

    /// One path per line, materials first, each group sorted.
    pub fn to_text(&self) -> String {
        let materials = self.materials.paths().map(|p| p.display().to_string()).sorted();
        let textures = self.textures.paths().map(|p| p.display().to_string()).sorted();
        materials.chain(textures).join("\n")
    }

    pub fn render(&self, format: OutputFormat) -> IResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            #[cfg(feature = "json")]
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| Report::new(ErrorKind::from(e)))
            }
        }
    }

    pub fn write(&self, path: &Path, format: OutputFormat) -> IResult<()> {
        info!("[+] Writing files to '{}'", path.display());
        let rendered = self.render(format)?;
        std::fs::write(path, rendered).map_err(|e| io_failure(path, e))
    }
}
