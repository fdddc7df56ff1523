//! Ordered (pattern, replacement) rule lists.

use regex::Regex;

/// A single rewrite: every match of `regex` becomes `replacement`.
///
/// `replacement` may use `$1`-style group references.
#[derive(Debug)]
pub struct PatternRule {
    pub regex: Regex,
    pub replacement: &'static str,
}

impl PatternRule {
    /// Compiles a rule from a pattern known to be valid.
    ///
    /// Only used for the crate's literal rule tables, initialised once.
    pub(crate) fn literal(pattern: &str, replacement: &'static str) -> Self {
        Self {
            regex: Regex::new(pattern).expect("literal rule pattern must compile"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.regex.replace_all(text, self.replacement).into_owned()
    }
}

/// Applies every rule once, in list order.
pub fn replace_each(text: &str, rules: &[PatternRule]) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Applies the first rule that matches, then starts over from the top of the
/// list until no rule matches.
///
/// Earlier rules take priority over later, more general ones. Every rule's
/// replacement must be shorter than anything its pattern matches.
pub fn replace_first_match(text: &str, rules: &[PatternRule]) -> String {
    let mut current = text.to_string();
    while let Some(rule) = rules.iter().find(|rule| rule.regex.is_match(&current)) {
        let next = rule.apply(&current);
        if next.len() >= current.len() {
            break;
        }
        current = next;
    }
    current
}
