//! Shell-style base-name patterns.

use std::fmt;
use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::WalkError;
use crate::platform::PathConvention;

/// A compiled glob matched against base names.
///
/// `*` matches any run of characters, `?` any single character and
/// `[...]` a character class. Braces are literal. On single-root platforms
/// `\` escapes the next character.
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    matcher: GlobMatcher,
}

impl NamePattern {
    /// Compile a pattern with single-root escaping rules.
    pub fn new(pattern: &str) -> Result<Self, WalkError> {
        Self::with_convention(pattern, PathConvention::SingleRoot)
    }

    /// Compile a pattern for the given path convention.
    pub fn with_convention(pattern: &str, convention: PathConvention) -> Result<Self, WalkError> {
        if pattern.is_empty() {
            return Err(WalkError::InvalidPattern {
                pattern: String::new(),
                message: "pattern cannot be empty".to_string(),
            });
        }

        let backslash_escape = convention == PathConvention::SingleRoot;
        let glob = GlobBuilder::new(&quote_braces(pattern, backslash_escape))
            .literal_separator(true)
            .backslash_escape(backslash_escape)
            .build()
            .map_err(|e| WalkError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;

        Ok(Self {
            raw: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check a base name against the pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.matcher.is_match(Path::new(name))
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Turn `{` and `}` outside character classes into single-char classes so
/// globset does not read them as alternation.
fn quote_braces(pattern: &str, backslash_escape: bool) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    let mut class_start = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' if backslash_escape => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
                class_start = false;
                continue;
            }
            '[' if !in_class => {
                in_class = true;
                class_start = true;
                out.push(c);
                // `[!` and `[^` open a negated class; a `]` right after still counts as literal.
                if let Some(&neg) = chars.peek() {
                    if neg == '!' || neg == '^' {
                        out.push(neg);
                        chars.next();
                    }
                }
                continue;
            }
            ']' if in_class && !class_start => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
        class_start = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_and_question() {
        let p = NamePattern::new("*.txt").unwrap();
        assert!(p.matches("a.txt"));
        assert!(p.matches(".txt"));
        assert!(!p.matches("a.txt.bak"));

        let p = NamePattern::new("file?.log").unwrap();
        assert!(p.matches("file1.log"));
        assert!(!p.matches("file10.log"));
        assert!(!p.matches("file.log"));
    }

    #[test]
    fn test_literal_and_case() {
        let p = NamePattern::new("README").unwrap();
        assert!(p.matches("README"));
        assert!(!p.matches("readme"));
        assert!(!p.matches("README.md"));
    }

    #[test]
    fn test_character_class() {
        let p = NamePattern::new("data[0-9].csv").unwrap();
        assert!(p.matches("data7.csv"));
        assert!(!p.matches("datax.csv"));

        let p = NamePattern::new("[!a]*").unwrap();
        assert!(p.matches("bcd"));
        assert!(!p.matches("abc"));
    }

    #[test]
    fn test_braces_are_literal() {
        let p = NamePattern::new("{a,b}.txt").unwrap();
        assert!(p.matches("{a,b}.txt"));
        assert!(!p.matches("a.txt"));
    }

    #[test]
    fn test_backslash_escape_single_root() {
        let p = NamePattern::new("\\*.txt").unwrap();
        assert!(p.matches("*.txt"));
        assert!(!p.matches("a.txt"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(matches!(
            NamePattern::new(""),
            Err(WalkError::InvalidPattern { .. })
        ));
        assert!(matches!(
            NamePattern::new("[abc"),
            Err(WalkError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_quote_braces() {
        assert_eq!(quote_braces("{x}", true), "[{]x[}]");
        assert_eq!(quote_braces("[{]", true), "[{]");
        assert_eq!(quote_braces("\\{", true), "\\{");
        assert_eq!(quote_braces("[]{]", true), "[]{]");
    }
}
