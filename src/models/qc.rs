//! Material search directories declared by a `.qc` compile script.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// `$cdmaterials "<dir>"`, alone on its line.
static CD_MATERIALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?mR)^\$cdmaterials "(.*?)"$\r?\n"#).unwrap());

/// Raw `$cdmaterials` values in order of appearance. Duplicates are kept.
pub fn cd_materials(text: &str) -> Vec<&str> {
    CD_MATERIALS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// The material search path of a model: every `$cdmaterials` value joined
/// onto `materials_root`.
pub fn material_dirs(text: &str, materials_root: &Path) -> Vec<PathBuf> {
    cd_materials(text)
        .into_iter()
        .map(|dir| materials_root.join(dir))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_directory() {
        let dirs = material_dirs("$cdmaterials \"models/widget\"\n", Path::new("/mats"));
        assert_eq!(dirs, [PathBuf::from("/mats/models/widget")]);
    }

    #[test]
    fn order_and_duplicates_preserved() {
        let qc = "$modelname \"props/crate.mdl\"
$cdmaterials \"models/props\"
$body body \"crate.smd\"
$cdmaterials \"models/shared\"
$cdmaterials \"models/props\"
";
        assert_eq!(
            cd_materials(qc),
            ["models/props", "models/shared", "models/props"]
        );
    }

    #[test]
    fn must_start_the_line() {
        let qc = "  $cdmaterials \"indented\"\n// $cdmaterials \"commented\"\n$CDMaterials \"upper\"\n";
        assert!(cd_materials(qc).is_empty());
    }

    #[test]
    fn needs_a_line_terminator() {
        assert!(cd_materials("$cdmaterials \"last\"").is_empty());
        assert_eq!(cd_materials("$cdmaterials \"last\"\r\n"), ["last"]);
    }

    #[test]
    fn no_directives() {
        assert!(material_dirs("$modelname \"x.mdl\"\n", Path::new("m")).is_empty());
    }
}
