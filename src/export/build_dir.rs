//! Copies resolved assets into `<build dir>/materials/`, keeping their layout
//! relative to the materials root.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rootcause::Report;
use tracing::info;

use crate::error::{ErrorKind, IResult, io_failure};

/// Name of the directory created inside the build directory.
pub const MATERIALS_DIR: &str = "materials";

/// Where `file` lands inside `build_dir`.
pub fn destination(materials_root: &Path, build_dir: &Path, file: &Path) -> IResult<PathBuf> {
    let relative = file.strip_prefix(materials_root).map_err(|_| {
        Report::new(ErrorKind::OutsideMaterialsRoot {
            path: file.to_owned(),
            root: materials_root.to_owned(),
        })
    })?;
    Ok(build_dir.join(MATERIALS_DIR).join(relative))
}

/// Mirror every file in `files` under `build_dir`. Existing destination files
/// are overwritten. Returns the destination paths in input order.
pub fn build_dir<P: AsRef<Path>>(
    materials_root: &Path,
    build_dir: &Path,
    files: &[P],
) -> IResult<Vec<PathBuf>> {
    info!("[+] Building directory '{}'", build_dir.display());

    let destinations = files
        .iter()
        .map(|file| destination(materials_root, build_dir, file.as_ref()))
        .collect::<IResult<Vec<_>>>()?;

    let parents: BTreeSet<&Path> = destinations.iter().filter_map(|dst| dst.parent()).collect();
    for dir in parents {
        fs::create_dir_all(dir).map_err(|e| io_failure(dir, e))?;
    }

    for (file, dst) in files.iter().zip(&destinations) {
        let file = file.as_ref();
        info!(" - Copying {} to {}", file.display(), dst.display());
        fs::copy(file, dst).map_err(|e| io_failure(file, e))?;
    }

    Ok(destinations)
}
