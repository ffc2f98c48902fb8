//! Material references in StudioMDL `.smd` geometry files.
//!
//! The `triangles` block of an SMD lists each triangle as a material name line
//! followed by three vertex lines. Vertex lines start with a bone index, so any
//! line starting with a letter is treated as a material name.

use std::collections::HashSet;
use std::path::Path;

use crate::data::read_text;
use crate::error::IResult;

/// Marker opening the per-triangle section.
pub const TRIANGLES_MARKER: &str = "triangles";
/// Marker closing a section.
pub const END_MARKER: &str = "end";

/// Material names referenced after the first `triangles` marker in `text`.
///
/// Yields nothing if the marker never appears. Names may repeat.
pub fn material_names(text: &str) -> impl Iterator<Item = &str> {
    let section = text
        .split_once(TRIANGLES_MARKER)
        .map(|(_, rest)| rest)
        .unwrap_or_default();

    section
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| is_material_line(line))
}

fn is_material_line(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_alphabetic) && line != END_MARKER
}

/// Read every geometry file and collect the distinct material names they use.
pub fn collect_material_names<P: AsRef<Path>>(files: &[P]) -> IResult<HashSet<String>> {
    let mut names = HashSet::new();
    for file in files {
        let text = read_text(file.as_ref())?;
        names.extend(material_names(&text).map(str::to_owned));
    }
    Ok(names)
}

#[cfg(test)]
mod test {
    use super::*;

    const SMD: &str = "version 1
nodes
0 \"root\" -1
end
skeleton
time 0
0 0.000000 0.000000 0.000000 0.000000 0.000000 0.000000
end
triangles
hull_plate
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
hull_plate
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
glass/window.bmp
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
0 1.0 2.0 3.0 0 0 1 0 0 1 0 1.0
end
";

    #[test]
    fn single_material() {
        let names: Vec<_> = material_names("triangles\nfoo_mat\nend\n").collect();
        assert_eq!(names, ["foo_mat"]);
    }

    #[test]
    fn skips_vertices_and_end() {
        let names: HashSet<_> = material_names(SMD).collect();
        assert_eq!(names, HashSet::from(["hull_plate", "glass/window.bmp"]));
    }

    #[test]
    fn no_triangles_section() {
        assert_eq!(material_names("version 1\nnodes\nend\n").count(), 0);
    }

    #[test]
    fn crlf_line_endings() {
        let names: Vec<_> = material_names("triangles\r\nfoo_mat\r\nend\r\n").collect();
        assert_eq!(names, ["foo_mat"]);
    }

    #[test]
    fn split_on_first_marker_only() {
        let text = "triangles\nfirst\nend\ntriangles\nsecond\nend\n";
        let names: Vec<_> = material_names(text).collect();
        // The later marker line itself starts with a letter.
        assert_eq!(names, ["first", "triangles", "second"]);
    }

    #[test]
    fn lines_must_start_with_a_letter() {
        let text = "triangles\n  indented\n_under\n9nine\n\nok\nending\n";
        let names: Vec<_> = material_names(text).collect();
        assert_eq!(names, ["ok", "ending"]);
    }

    #[test]
    fn dedup_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.smd");
        let b = dir.path().join("b.smd");
        std::fs::write(&a, "triangles\nshared\nonly_a\nend\n").unwrap();
        std::fs::write(&b, "triangles\nshared\nonly_b\nend\n").unwrap();

        let names = collect_material_names(&[a, b]).unwrap();
        assert_eq!(
            names,
            HashSet::from(["shared", "only_a", "only_b"].map(String::from))
        );
    }
}
