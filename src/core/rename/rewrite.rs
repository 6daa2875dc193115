use super::rules::ContentRule;

/// Outcome of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten text, or `None` when no rule matched.
    pub text: Option<String>,
    /// Total literal occurrences replaced across all rules.
    pub replacements: usize,
}

impl Rewrite {
    pub fn is_modified(&self) -> bool {
        self.replacements > 0
    }
}

/// Apply every rule in order, each to the output of the previous one.
///
/// Matching is literal and non-overlapping, scanning left to right. A rule
/// with an empty `from` never matches.
pub fn rewrite(text: &str, rules: &[ContentRule]) -> Rewrite {
    let mut current: Option<String> = None;
    let mut replacements = 0;

    for rule in rules {
        if rule.from.is_empty() {
            continue;
        }

        let source = current.as_deref().unwrap_or(text);
        let count = source.matches(rule.from.as_str()).count();
        if count == 0 {
            continue;
        }

        replacements += count;
        current = Some(source.replace(rule.from.as_str(), &rule.to));
    }

    Rewrite {
        text: current,
        replacements,
    }
}
