//! Selector subset used for element discovery.
//!
//! Supported: type selectors (`img`), class selectors (`.figure`), the
//! universal selector (`*`), compounds (`img.hero.wide`) and the descendant
//! combinator (`.figure img`). Everything else is rejected at parse time so a
//! misconfigured page fails loudly at startup instead of matching nothing.

use std::fmt;

use crate::error::{FolioError, FolioResult};

/// One compound step of a selector, e.g. `img.hero`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    /// Returns the required tag name (lowercase), if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the required classes.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns true if an element with `tag` and the given class test matches.
    pub fn matches(&self, tag: &str, has_class: impl Fn(&str) -> bool) -> bool {
        if let Some(required) = &self.tag {
            if !required.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.classes.iter().all(|class| has_class(class))
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    steps: Vec<Compound>,
}

impl Selector {
    /// Parses a selector.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidSelector`] for empty input, unsupported
    /// combinators or pseudo-classes, and malformed identifiers.
    pub fn parse(source: &str) -> FolioResult<Self> {
        let trimmed = source.trim();
        let invalid = |reason: String| FolioError::InvalidSelector {
            selector: source.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("selector is empty".to_string()));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|&c| matches!(c, '>' | '+' | '~' | ',' | '#' | '[' | ']' | ':' | '(' | ')' | '"' | '\''))
        {
            return Err(invalid(format!("unsupported syntax `{c}`")));
        }

        let steps = trimmed
            .split_whitespace()
            .map(|token| parse_compound(token).map_err(&invalid))
            .collect::<FolioResult<Vec<_>>>()?;

        Ok(Self {
            source: steps_to_string(&steps),
            steps,
        })
    }

    /// Returns the normalized selector text, valid as a CSS selector.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the compound steps, outermost first.
    #[must_use]
    pub fn steps(&self) -> &[Compound] {
        &self.steps
    }

    /// Returns true if `node` matches.
    ///
    /// `parent` walks up the tree; `test` checks one compound against one
    /// node. Descendant steps are matched greedily against the nearest
    /// ancestors, which is exact for descendant-only selectors.
    pub fn matches<T: Copy>(
        &self,
        node: T,
        parent: impl Fn(T) -> Option<T>,
        test: impl Fn(&Compound, T) -> bool,
    ) -> bool {
        let Some((last, ancestors)) = self.steps.split_last() else {
            return false;
        };
        if !test(last, node) {
            return false;
        }

        let mut wanted = ancestors.iter().rev();
        let mut step = wanted.next();
        let mut current = parent(node);
        while let Some(compound) = step {
            let Some(candidate) = current else {
                return false;
            };
            if test(compound, candidate) {
                step = wanted.next();
            }
            current = parent(candidate);
        }
        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_compound(token: &str) -> Result<Compound, String> {
    let mut parts = token.split('.');
    let head = parts.next().unwrap_or_default();

    let tag = match head {
        "" | "*" => None,
        name if is_identifier(name) => Some(name.to_ascii_lowercase()),
        name => return Err(format!("invalid tag name `{name}`")),
    };

    let mut classes = Vec::new();
    for class in parts {
        if !is_identifier(class) {
            return Err(format!("invalid class name `{class}`"));
        }
        classes.push(class.to_string());
    }

    if head.is_empty() && classes.is_empty() {
        return Err(format!("empty compound `{token}`"));
    }

    Ok(Compound { tag, classes })
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

fn steps_to_string(steps: &[Compound]) -> String {
    steps
        .iter()
        .map(|step| {
            let mut text = step.tag.clone().unwrap_or_default();
            for class in &step.classes {
                text.push('.');
                text.push_str(class);
            }
            if text.is_empty() {
                text.push('*');
            }
            text
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descendant() {
        let selector = Selector::parse("  .figure   img ").unwrap();

        assert_eq!(selector.as_str(), ".figure img");
        assert_eq!(selector.steps().len(), 2);
        assert_eq!(selector.steps()[0].tag(), None);
        assert_eq!(selector.steps()[0].classes(), ["figure".to_string()]);
        assert_eq!(selector.steps()[1].tag(), Some("img"));
    }

    #[test]
    fn test_parse_compound_and_universal() {
        let selector = Selector::parse("IMG.hero.wide").unwrap();
        assert_eq!(selector.as_str(), "img.hero.wide");

        let universal = Selector::parse("*").unwrap();
        assert_eq!(universal.as_str(), "*");
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        for bad in ["", "   ", ".a > b", "#main", "a:hover", "a, b", "[data-x]", ".", "..a", ".9lives"] {
            assert!(
                matches!(Selector::parse(bad), Err(FolioError::InvalidSelector { .. })),
                "`{bad}` should be rejected"
            );
        }
    }

    #[test]
    fn test_matches_skips_intermediate_ancestors() {
        // 0 = div.figure, 1 = span, 2 = img
        let tags = ["div", "span", "img"];
        let classes: [&[&str]; 3] = [&["figure"], &[], &[]];
        let parent = |n: usize| n.checked_sub(1);
        let test = |c: &Compound, n: usize| c.matches(tags[n], |class| classes[n].contains(&class));

        let selector = Selector::parse(".figure img").unwrap();
        assert!(selector.matches(2, parent, test));
        assert!(!selector.matches(1, parent, test));

        let missing = Selector::parse(".gallery img").unwrap();
        assert!(!missing.matches(2, parent, test));
    }
}
