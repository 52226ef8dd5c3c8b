use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use crate::app::palette::{self, Color, Palette, ShadeMap, DEFAULT_SHADE};
use anyhow::{bail, Context, Result};
use globset::Glob;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The on-disk configuration record (`classgen.toml`). Loaded once at
/// startup and read-only afterwards.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Glob patterns selecting the files scanned for class names.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub theme: Theme,
    /// Reserved for extension modules; none are registered.
    #[serde(default)]
    pub plugins: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    #[serde(default)]
    pub extend: ThemeExtend,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeExtend {
    #[serde(default)]
    pub colors: BTreeMap<String, ColorValue>,
}

/// A palette entry: either one default value or a table of shades.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    Shades(BTreeMap<String, String>),
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config at {:?}", path))?;

        let parsed: ConfigFile =
            toml::from_str(&content).context(format!("Failed to parse {:?}", path))?;

        parsed.validate()?;
        Ok(parsed)
    }

    /// Load-time rejection of malformed values, mirroring what the
    /// generator would otherwise trip over mid-run.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.content {
            Glob::new(pattern).context(format!("Invalid glob pattern: {}", pattern))?;
        }

        for (name, value) in &self.theme.extend.colors {
            match value {
                ColorValue::Single(raw) => {
                    Color::parse(raw).context(format!("Invalid color for {}", name))?;
                }
                ColorValue::Shades(shades) => {
                    for (shade, raw) in shades {
                        Color::parse(raw)
                            .context(format!("Invalid color for {}.{}", name, shade))?;
                    }
                }
            }
        }

        if let Some(name) = self.plugins.first() {
            bail!("Unknown plugin {:?}: no plugin modules are registered", name);
        }

        Ok(())
    }
}

/// Order-preserving merge of the file's pattern list with CLI extras.
fn merge_patterns(file_patterns: Vec<String>, cli_patterns: Option<Vec<String>>) -> Vec<String> {
    let mut combined = file_patterns;
    if let Some(mut extra) = cli_patterns {
        combined.append(&mut extra);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// A single-value extension becomes a one-entry shade map.
fn normalize_colors(colors: &BTreeMap<String, ColorValue>) -> Result<Palette> {
    let mut normalized = Palette::new();
    for (name, value) in colors {
        let shades = match value {
            ColorValue::Single(raw) => {
                let mut map = ShadeMap::new();
                map.insert(DEFAULT_SHADE.to_string(), Color::parse(raw)?);
                map
            }
            ColorValue::Shades(raw_shades) => {
                let mut map = ShadeMap::new();
                for (shade, raw) in raw_shades {
                    map.insert(shade.clone(), Color::parse(raw)?);
                }
                map
            }
        };
        normalized.insert(name.clone(), shades);
    }
    Ok(normalized)
}

pub fn resolve_config(cli: Cli, project_root: &Path) -> Result<RuntimeConfig> {
    let config_path = if cli.config.is_absolute() {
        cli.config.clone()
    } else {
        project_root.join(&cli.config)
    };
    let file = ConfigFile::load(&config_path)?;

    let content = merge_patterns(file.content.clone(), cli.content);
    if content.is_empty() {
        bail!(
            "No content patterns: nothing to scan (set `content` in {:?})",
            config_path
        );
    }

    let extend = normalize_colors(&file.theme.extend.colors)?;
    let palette = palette::merge_palette(palette::default_palette(), extend);

    Ok(RuntimeConfig { content, palette })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::palette::resolve;

    const SAMPLE: &str = r##"
content = [
  "./index.html",
  "./src/**/*.{js,ts,jsx,tsx}",
]

plugins = []

[theme.extend.colors.primary]
DEFAULT = "#DC2626"
dark = "#991B1B"
light = "#FEE2E2"
"##;

    fn parse(doc: &str) -> ConfigFile {
        let parsed: ConfigFile = toml::from_str(doc).unwrap();
        parsed.validate().unwrap();
        parsed
    }

    #[test]
    fn parses_the_full_record() {
        let config = parse(SAMPLE);
        assert_eq!(
            config.content,
            vec!["./index.html", "./src/**/*.{js,ts,jsx,tsx}"]
        );
        assert!(config.plugins.is_empty());

        let primary = &config.theme.extend.colors["primary"];
        match primary {
            ColorValue::Shades(shades) => {
                assert_eq!(shades["DEFAULT"], "#DC2626");
                assert_eq!(shades["dark"], "#991B1B");
                assert_eq!(shades["light"], "#FEE2E2");
            }
            ColorValue::Single(_) => panic!("expected a shade table"),
        }
    }

    #[test]
    fn omitted_plugins_equals_explicit_empty_list() {
        let with_field = parse(SAMPLE);
        let without_field = parse(&SAMPLE.replace("plugins = []\n", ""));
        assert_eq!(with_field, without_field);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = parse(SAMPLE);
        let serialized = toml::to_string(&config).unwrap();
        let reparsed: ConfigFile = toml::from_str(&serialized).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn rejects_invalid_glob() {
        let doc = r#"content = ["src/[unclosed"]"#;
        let parsed: ConfigFile = toml::from_str(doc).unwrap();
        let err = parsed.validate().unwrap_err();
        assert!(err.to_string().contains("Invalid glob pattern"));
    }

    #[test]
    fn rejects_invalid_hex_color_with_value_in_message() {
        let doc = r##"
content = ["./index.html"]

[theme.extend.colors]
primary = "#NOTHEX"
"##;
        let parsed: ConfigFile = toml::from_str(doc).unwrap();
        let err = format!("{:#}", parsed.validate().unwrap_err());
        assert!(err.contains("Invalid color for primary"));
        assert!(err.contains("#NOTHEX"));
    }

    #[test]
    fn rejects_invalid_shade_color_with_path_in_message() {
        let doc = r#"
content = ["./index.html"]

[theme.extend.colors.primary]
dark = "991B1B"
"#;
        let parsed: ConfigFile = toml::from_str(doc).unwrap();
        let err = format!("{:#}", parsed.validate().unwrap_err());
        assert!(err.contains("Invalid color for primary.dark"));
    }

    #[test]
    fn rejects_registered_plugins() {
        let doc = r#"
content = ["./index.html"]
plugins = ["typography"]
"#;
        let parsed: ConfigFile = toml::from_str(doc).unwrap();
        let err = parsed.validate().unwrap_err();
        assert!(err.to_string().contains("typography"));
    }

    #[test]
    fn rejects_unknown_top_level_keys() {
        let doc = r#"
content = ["./index.html"]
watch = true
"#;
        assert!(toml::from_str::<ConfigFile>(doc).is_err());
    }

    #[test]
    fn merge_patterns_deduplicates_keeping_order() {
        let merged = merge_patterns(
            vec!["a".to_string(), "b".to_string()],
            Some(vec!["b".to_string(), "c".to_string()]),
        );
        assert_eq!(merged, vec!["a", "b", "c"]);
    }

    #[test]
    fn single_value_extension_normalizes_to_default_shade() {
        let doc = r##"
content = ["./index.html"]

[theme.extend.colors]
accent = "#00D4AA"
"##;
        let config = parse(doc);
        let extend = normalize_colors(&config.theme.extend.colors).unwrap();
        let palette = crate::app::palette::merge_palette(
            crate::app::palette::default_palette(),
            extend,
        );
        assert_eq!(
            resolve(&palette, "accent", None).map(|c| c.as_str()),
            Some("#00D4AA")
        );
    }
}
