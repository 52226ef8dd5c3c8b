use crate::app::models::UtilityRule;
use crate::app::palette::{resolve, Color, Palette};
use std::collections::BTreeSet;

/// Utility prefixes recognized by the generator, with the declaration
/// each one emits.
const UTILITIES: [(&str, &str); 3] = [
    ("bg-", "background-color"),
    ("text-", "color"),
    ("border-", "border-color"),
];

pub struct CssEmitter;

impl CssEmitter {
    /// Resolves class candidates against the palette, keeping only the
    /// recognized color utilities. Candidates arrive sorted, so rules
    /// come out sorted by selector.
    pub fn resolve_rules(candidates: &BTreeSet<String>, palette: &Palette) -> Vec<UtilityRule> {
        let mut rules = Vec::new();

        for candidate in candidates {
            if let Some(rule) = Self::resolve_candidate(candidate, palette) {
                rules.push(rule);
            }
        }

        rules
    }

    fn resolve_candidate(candidate: &str, palette: &Palette) -> Option<UtilityRule> {
        let (prefix, property) = UTILITIES
            .into_iter()
            .find(|(prefix, _)| candidate.starts_with(prefix))?;

        let token = &candidate[prefix.len()..];
        let color = Self::lookup(token, palette)?;

        Some(UtilityRule {
            class_name: candidate.to_string(),
            property,
            value: color.to_string(),
        })
    }

    /// `token` is either a bare palette name (DEFAULT shade) or
    /// `name-shade`. Splitting starts at the rightmost hyphen so a
    /// hyphenated palette name wins over a shorter name plus suffix.
    fn lookup<'a>(token: &str, palette: &'a Palette) -> Option<&'a Color> {
        if let Some(color) = resolve(palette, token, None) {
            return Some(color);
        }

        for (idx, _) in token.match_indices('-').rev() {
            let (name, shade) = (&token[..idx], &token[idx + 1..]);
            if let Some(color) = resolve(palette, name, Some(shade)) {
                return Some(color);
            }
        }

        None
    }

    pub fn format_stylesheet(rules: &[UtilityRule]) -> String {
        let mut blocks = Vec::new();

        for rule in rules {
            blocks.push(format!(
                ".{} {{\n  {}: {};\n}}",
                rule.class_name, rule.property, rule.value
            ));
        }

        blocks.join("\n\n")
    }
}
