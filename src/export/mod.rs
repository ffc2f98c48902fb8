/// Mirroring resolved assets into a build tree
pub mod build_dir;
