/// Search-path resolution of logical asset names
pub mod resolver;

use std::path::Path;

use crate::error::{IResult, io_failure};

/// Read a whole text file. Invalid UTF-8 sequences are replaced rather than
/// rejected, since model sources are frequently saved in legacy codepages.
pub fn read_text(path: &Path) -> IResult<String> {
    let data = std::fs::read(path).map_err(|e| io_failure(path, e))?;
    Ok(match String::from_utf8(data) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
