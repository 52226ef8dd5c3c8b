use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Shade key resolved when a utility class carries no shade suffix.
pub const DEFAULT_SHADE: &str = "DEFAULT";

/// Shades of one design token, keyed by shade name.
pub type ShadeMap = BTreeMap<String, Color>;

/// Every design token known to the generator, keyed by token name.
pub type Palette = BTreeMap<String, ShadeMap>;

/// A `#RRGGBB` color, stored in canonical uppercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = match raw.strip_prefix('#') {
            Some(rest) => rest,
            None => bail!("color {:?} must start with '#'", raw),
        };
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("color {:?} must be '#' followed by six hex digits", raw);
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Built-in table entries are canonical literals, so they skip parse().
fn tone(hex: &str) -> Color {
    Color(hex.to_string())
}

fn single(hex: &str) -> ShadeMap {
    let mut shades = ShadeMap::new();
    shades.insert(DEFAULT_SHADE.to_string(), tone(hex));
    shades
}

fn shaded(entries: &[(&str, &str)]) -> ShadeMap {
    entries
        .iter()
        .map(|(shade, hex)| (shade.to_string(), tone(hex)))
        .collect()
}

/// Design tokens available before any `theme.extend` merge.
pub fn default_palette() -> Palette {
    let mut palette = Palette::new();
    palette.insert("black".to_string(), single("#000000"));
    palette.insert("white".to_string(), single("#FFFFFF"));
    palette.insert(
        "gray".to_string(),
        shaded(&[
            (DEFAULT_SHADE, "#6B7280"),
            ("dark", "#374151"),
            ("light", "#E5E7EB"),
        ]),
    );
    palette.insert(
        "red".to_string(),
        shaded(&[
            (DEFAULT_SHADE, "#EF4444"),
            ("dark", "#B91C1C"),
            ("light", "#FECACA"),
        ]),
    );
    palette.insert(
        "blue".to_string(),
        shaded(&[
            (DEFAULT_SHADE, "#3B82F6"),
            ("dark", "#1D4ED8"),
            ("light", "#DBEAFE"),
        ]),
    );
    palette
}

/// Merges extension tokens into the base set. An extension name shadows
/// the same-named default; every other default survives.
pub fn merge_palette(mut base: Palette, extend: Palette) -> Palette {
    for (name, shades) in extend {
        base.insert(name, shades);
    }
    base
}

/// Looks up a token by name and optional shade.
pub fn resolve<'a>(palette: &'a Palette, name: &str, shade: Option<&str>) -> Option<&'a Color> {
    palette.get(name)?.get(shade.unwrap_or(DEFAULT_SHADE))
}
