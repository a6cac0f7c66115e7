use crate::spreadsheet::cell::Color;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

static BACKGROUND_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(-?[A-Za-z_][\w-]*)\s*\{[^}]*?background-color\s*:\s*(#[0-9A-Fa-f]{3,8})\b")
        .expect("Hardcode regex pattern")
});

/// Mapping from CSS class name to background color, built once per document.
///
/// Only rules of the form `.name{...background-color:#hex...}` contribute.
/// When a class is declared more than once the last declaration wins, the
/// same precedence a browser applies to equal-specificity rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StyleMap {
    colors: BTreeMap<String, Color>,
}

impl StyleMap {
    /// Extracts class background colors from a CSS text block.
    /// Malformed CSS is never an error; text that does not match is skipped.
    pub fn parse(css: &str) -> Self {
        let mut colors = BTreeMap::new();
        for captures in BACKGROUND_RULE.captures_iter(css) {
            let class = &captures[1];
            match Color::parse(&captures[2]) {
                Some(color) => {
                    colors.insert(class.to_owned(), color);
                }
                None => debug!(class, value = &captures[2], "skip unsupported color literal"),
            }
        }
        debug!(classes = colors.len(), "style map built");
        StyleMap { colors }
    }

    /// Looks up the background color of a class.
    pub fn get(&self, class: &str) -> Option<&Color> {
        self.colors.get(class)
    }

    /// Resolves an optional class, falling back to `default` when absent or unmapped.
    pub fn resolve(&self, class: Option<&str>, default: &Color) -> Color {
        class
            .and_then(|class| self.colors.get(class))
            .unwrap_or(default)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET_CSS: &str = ".ritz .waffle a { color: inherit; }\
        .ritz .waffle .s0{border-bottom:1px SOLID #000000;background-color:#FFFF00;text-align:left;}\
        .ritz .waffle .s1{background-color:#da9694;color:#000000;}\
        .ritz .waffle .s2{color:#000000;font-size:10pt;}\
        .ritz .waffle .s3{background-color:#fff;}";

    #[test]
    fn parses_google_export_rules() {
        let styles = StyleMap::parse(SHEET_CSS);
        assert_eq!(styles.len(), 3);
        assert_eq!(styles.get("s0").unwrap().as_str(), "#ffff00");
        assert_eq!(styles.get("s1").unwrap().as_str(), "#da9694");
        assert_eq!(styles.get("s3").unwrap().as_str(), "#ffffff");
    }

    #[test]
    fn class_without_background_is_absent() {
        let styles = StyleMap::parse(SHEET_CSS);
        assert!(styles.get("s2").is_none());
        let white = Color::white();
        assert_eq!(styles.resolve(Some("s2"), &white), white);
        assert_eq!(styles.resolve(None, &white), white);
    }

    #[test]
    fn border_color_is_not_background() {
        let styles = StyleMap::parse(".s9{border-color:#123456;}");
        assert!(styles.is_empty());
    }

    #[test]
    fn last_declaration_wins() {
        let styles = StyleMap::parse(".s1{background-color:#111111;}.s1{background-color:#222222;}");
        assert_eq!(styles.get("s1").unwrap().as_str(), "#222222");
    }

    #[test]
    fn four_digit_hex_drops_alpha() {
        let styles = StyleMap::parse(".s4{background-color:#0f08}");
        assert_eq!(styles.get("s4").unwrap().as_str(), "#00ff00");
    }

    #[test]
    fn malformed_css_is_ignored() {
        let styles = StyleMap::parse("}}{{ .s1{background-color:#zzzzzz} garbage .s2 { background-color : #ABCDEF }");
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("s2").unwrap().as_str(), "#abcdef");
    }

    #[test]
    fn serialization_is_stable() {
        let css: String = (0..40)
            .map(|index| format!(".c{}{{background-color:#{:06x};}}", 39 - index, index * 1000))
            .collect();
        let first = serde_json::to_string(&StyleMap::parse(&css)).unwrap();
        let second = serde_json::to_string(&StyleMap::parse(&css)).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\"colors\":{\"c0\":"));
    }
}
