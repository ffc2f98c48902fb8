/// `.vmt` material files
pub mod vmt;
