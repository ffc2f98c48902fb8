/// `.qc` compile scripts
pub mod qc;
/// `.smd` geometry files
pub mod smd;
