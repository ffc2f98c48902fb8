/// File reading and search-path resolution
pub mod data;
/// Error definitions
pub mod error;
/// Copying resolved assets into a build tree
pub mod export;
/// Material formats (`.vmt`)
pub mod materials;
/// Model sources (`.qc`, `.smd`)
pub mod models;
/// Collecting the material and texture dependencies of a model
pub mod pipeline;
