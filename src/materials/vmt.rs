//! Texture references in Valve `.vmt` material files.
//!
//! Only the handful of shader parameters that name a texture are recognized.
//! Each one is matched with its own line pattern, e.g.
//!
//! ```text
//! "$basetexture" "models/props/crate01"
//!     $bumpmap   "models/props/crate01_normal"
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use bon::Builder;
use regex::Regex;
use tracing::debug;

use crate::data::read_text;
use crate::error::IResult;

/// Extension of compiled texture files.
pub const TEXTURE_EXTENSION: &str = ".vtf";

/// Shader parameters whose value names a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextureParam {
    #[cfg_attr(feature = "serde", serde(rename = "basetexture"))]
    BaseTexture,
    #[cfg_attr(feature = "serde", serde(rename = "bumpmap"))]
    BumpMap,
    #[cfg_attr(feature = "serde", serde(rename = "lightwarptexture"))]
    LightWarpTexture,
    #[cfg_attr(feature = "serde", serde(rename = "basetexture2"))]
    BaseTexture2,
    #[cfg_attr(feature = "serde", serde(rename = "detail"))]
    Detail,
}

impl TextureParam {
    pub const ALL: [TextureParam; 5] = [
        TextureParam::BaseTexture,
        TextureParam::BumpMap,
        TextureParam::LightWarpTexture,
        TextureParam::BaseTexture2,
        TextureParam::Detail,
    ];

    /// Parameter name as written in a material, without the leading `$`.
    pub fn key(self) -> &'static str {
        match self {
            TextureParam::BaseTexture => "basetexture",
            TextureParam::BumpMap => "bumpmap",
            TextureParam::LightWarpTexture => "lightwarptexture",
            TextureParam::BaseTexture2 => "basetexture2",
            TextureParam::Detail => "detail",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }
}

impl fmt::Display for TextureParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.key())
    }
}

/// Path separator convention used for texture names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bin", derive(clap::ValueEnum))]
pub enum PathStyle {
    /// Forward slashes, as written in materials.
    Unix,
    /// Backslashes.
    Windows,
}

impl PathStyle {
    pub fn host() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Unix
        }
    }

    pub fn normalize(self, name: &str) -> String {
        match self {
            PathStyle::Unix => name.to_owned(),
            PathStyle::Windows => name.replace('/', "\\"),
        }
    }
}

/// A parameter key together with the pattern extracting its value.
#[derive(Debug, Clone)]
pub struct MaterialParameterRule {
    key: String,
    pattern: Regex,
}

impl MaterialParameterRule {
    /// Build the rule for an arbitrary parameter key (without the `$`).
    pub fn new(key: impl Into<String>) -> Result<Self, regex::Error> {
        let key = key.into();
        let pattern = Regex::new(&format!(
            r#"(?mR)^\s*["']?\${}["']?[ \t].*?["'](.*?)["']$\r?\n"#,
            regex::escape(&key)
        ))?;
        Ok(MaterialParameterRule { key, pattern })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Every value assigned to this parameter in `text`.
    pub fn values<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl From<TextureParam> for MaterialParameterRule {
    fn from(param: TextureParam) -> Self {
        // Keys are escaped, so the pattern always compiles.
        MaterialParameterRule::new(param.key()).expect("invalid texture parameter pattern")
    }
}

pub fn default_rules() -> Vec<MaterialParameterRule> {
    TextureParam::ALL.into_iter().map(Into::into).collect()
}

/// Extracts texture references from material files.
#[derive(Debug, Clone, Builder)]
pub struct MaterialScanner {
    #[builder(default = default_rules())]
    rules: Vec<MaterialParameterRule>,
    #[builder(default = PathStyle::host())]
    path_style: PathStyle,
}

impl Default for MaterialScanner {
    fn default() -> Self {
        MaterialScanner::builder().build()
    }
}

impl MaterialScanner {
    pub fn rules(&self) -> &[MaterialParameterRule] {
        &self.rules
    }

    pub fn path_style(&self) -> PathStyle {
        self.path_style
    }

    /// Texture names referenced by a single material's text, normalized for
    /// the configured path style. Rules are applied one after another, so
    /// names are grouped by parameter and may repeat.
    pub fn texture_names<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let style = self.path_style;
        self.rules
            .iter()
            .flat_map(move |rule| rule.values(text))
            .map(move |name| style.normalize(name))
    }

    /// Read every material file and collect the distinct texture names.
    pub fn collect_texture_names<P: AsRef<Path>>(&self, files: &[P]) -> IResult<HashSet<String>> {
        let mut names = HashSet::new();
        for file in files {
            let file = file.as_ref();
            debug!("{}", file.display());
            let text = read_text(file)?;
            names.extend(self.texture_names(&text));
        }
        Ok(names)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const VMT: &str = r#""VertexLitGeneric"
{
	"$basetexture" "models/props/crate01"
	$bumpmap "models/props/crate01_normal"
	'$lightwarptexture' 'models/shared/warp'
	"$basetexture2" "models/props/crate01_dirt"
	"$detail" "detail/noise"
	"$detailscale" "4"
	"$surfaceprop" "wood"
}
"#;

    fn unix() -> MaterialScanner {
        MaterialScanner::builder().path_style(PathStyle::Unix).build()
    }

    #[test]
    fn basetexture_on_its_own_line() {
        let names: Vec<_> = unix()
            .texture_names("$basetexture \"metal/plate01\"\n")
            .collect();
        assert_eq!(names, ["metal/plate01"]);
    }

    #[test]
    fn every_recognized_parameter() {
        let names: Vec<_> = unix().texture_names(VMT).collect();
        assert_eq!(
            names,
            [
                "models/props/crate01",
                "models/props/crate01_normal",
                "models/shared/warp",
                "models/props/crate01_dirt",
                "detail/noise",
            ]
        );
    }

    #[test]
    fn similar_keys_do_not_match() {
        let text = "$basetexture2 \"b2\"\n$detailscale \"4\"\n$basetexturetransform \"center .5 .5\"\n";
        let names: Vec<_> = MaterialScanner::builder()
            .path_style(PathStyle::Unix)
            .rules(vec![
                TextureParam::BaseTexture.into(),
                TextureParam::Detail.into(),
            ])
            .build()
            .texture_names(text)
            .collect();
        assert!(names.is_empty());
    }

    #[test]
    fn windows_separators() {
        let scanner = MaterialScanner::builder()
            .path_style(PathStyle::Windows)
            .build();
        let names: Vec<_> = scanner
            .texture_names("\"$bumpmap\" \"a/b/c_normal\"\n")
            .collect();
        assert_eq!(names, ["a\\b\\c_normal"]);
    }

    #[test]
    fn requires_trailing_newline_and_closing_quote_at_eol() {
        let scanner = unix();
        assert_eq!(scanner.texture_names("$basetexture \"x\"").count(), 0);
        assert_eq!(scanner.texture_names("$basetexture \"x\" // note\n").count(), 0);
        assert_eq!(scanner.texture_names("$basetexture \"x\"\r\n").count(), 1);
    }

    #[test]
    fn case_sensitive_keys() {
        assert_eq!(unix().texture_names("$BaseTexture \"x\"\n").count(), 0);
    }

    #[test]
    fn custom_rule() {
        let scanner = MaterialScanner::builder()
            .path_style(PathStyle::Unix)
            .rules(vec![MaterialParameterRule::new("envmapmask").unwrap()])
            .build();
        let names: Vec<_> = scanner.texture_names("$envmapmask \"m/mask\"\n").collect();
        assert_eq!(names, ["m/mask"]);
        assert_eq!(scanner.rules()[0].key(), "envmapmask");
    }

    #[test]
    fn param_keys() {
        for param in TextureParam::ALL {
            assert_eq!(TextureParam::from_key(param.key()), Some(param));
        }
        assert_eq!(TextureParam::from_key("envmap"), None);
        assert_eq!(TextureParam::BumpMap.to_string(), "$bumpmap");
    }

    #[test]
    fn dedup_across_materials() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.vmt");
        let b = dir.path().join("b.vmt");
        std::fs::write(&a, "$basetexture \"shared\"\n$bumpmap \"a_n\"\n").unwrap();
        std::fs::write(&b, "$basetexture \"shared\"\n").unwrap();

        let names = unix().collect_texture_names(&[a, b]).unwrap();
        assert_eq!(names, HashSet::from(["shared", "a_n"].map(String::from)));
    }
}
