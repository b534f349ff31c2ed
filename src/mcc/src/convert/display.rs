//! Display name formatting (MiniMessage)

use crate::namespace::Namespace;

/// Italics-disable marker prepended to every converted name
pub const NO_ITALIC: &str = "<!i>";

pub const DEFAULT_COLOR: &str = "<white>";

/// Color rules applied to item names
#[derive(Debug, Clone, PartialEq)]
pub struct NameStyle {
    pub default_color: String,
    /// (namespace substring, color tag); first match wins
    pub accents: Vec<(String, String)>,
}

impl Default for NameStyle {
    fn default() -> Self {
        NameStyle {
            default_color: DEFAULT_COLOR.to_string(),
            accents: Vec::new(),
        }
    }
}

impl NameStyle {
    /// Use `color` for namespaces containing `pattern`
    pub fn with_accent(mut self, pattern: impl Into<String>, color: impl Into<String>) -> Self {
        self.accents.push((pattern.into(), color.into()));
        self
    }

    fn color_for(&self, namespace: &Namespace) -> &str {
        self.accents
            .iter()
            .find(|(pattern, _)| namespace.as_str().contains(pattern.as_str()))
            .map(|(_, color)| color.as_str())
            .unwrap_or(&self.default_color)
    }

    pub fn format(&self, name: &str, namespace: &Namespace) -> String {
        format!(
            "{}{}{}",
            NO_ITALIC,
            self.color_for(namespace),
            normalize_legacy_codes(name)
        )
    }
}

/// Rewrite `&x` color/format codes to `§x`
///
/// Only valid code characters are rewritten, so `Fish & Chips` stays intact.
pub fn normalize_legacy_codes(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '&' && chars.peek().is_some_and(|n| is_code_char(*n)) {
            out.push('§');
        } else {
            out.push(c);
        }
    }
    out
}

fn is_code_char(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_legacy_codes() {
        assert_eq!(normalize_legacy_codes("&6Golden &lSword"), "§6Golden §lSword");
        assert_eq!(normalize_legacy_codes("Fish & Chips"), "Fish & Chips");
        assert_eq!(normalize_legacy_codes("Trailing &"), "Trailing &");
        assert_eq!(normalize_legacy_codes("§aAlready"), "§aAlready");
    }

    #[test]
    fn test_format_default_color() {
        let ns = Namespace::parse("pack").unwrap();
        assert_eq!(
            NameStyle::default().format("Ruby", &ns),
            "<!i><white>Ruby"
        );
    }

    #[test]
    fn test_accent_override() {
        let style = NameStyle::default().with_accent("elite", "<#FFCF20>");
        let elite = Namespace::parse("elitecreatures").unwrap();
        let other = Namespace::parse("pack").unwrap();

        assert_eq!(style.format("Boss", &elite), "<!i><#FFCF20>Boss");
        assert_eq!(style.format("Boss", &other), "<!i><white>Boss");
    }
}
