//! Parsing of recipe condition strings.
//!
//! A condition is a whitespace-separated list of terms that must all hold:
//!
//! | Term             | Meaning                                                  |
//! |------------------|----------------------------------------------------------|
//! | `+name`, `~name` | boolean variant is enabled / disabled                    |
//! | `name=value`     | variant has the given value                              |
//! | `@range`         | the package's own version is in `range`                  |
//! | `^dep`           | `dep` is an enabled dependency                           |
//! | `^dep@range`     | `dep` is enabled and its version is in `range`           |
//! | `<package>`      | the package itself, e.g. `squashfs-mount@:0.6+rootless` |
//!
//! Variant sigils can be chained (`+rootless~debug`). Variant values are typed later,
//! once the declared variant table is known.

use crate::ast::{Condition, VariantValue};
use crate::error::VersionError;
use crate::version::VersionRange;

/// Why a condition string could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseFailure {
    Syntax(String),
    Version(VersionError),
}

impl From<VersionError> for ParseFailure {
    fn from(e: VersionError) -> Self {
        ParseFailure::Version(e)
    }
}

/// Parses condition and dependency strings for a single package.
pub struct ConditionParser<'a> {
    package: &'a str,
}

impl<'a> ConditionParser<'a> {
    pub fn new(package: &'a str) -> Self {
        Self { package }
    }

    /// Parses a condition; an empty string is `Condition::Always`.
    pub fn parse(&self, text: &str) -> Result<Condition, ParseFailure> {
        let mut cursor = Cursor::new(text);
        let mut terms = Vec::new();

        loop {
            cursor.skip_whitespace();
            let Some(c) = cursor.peek() else { break };
            match c {
                '+' | '~' => {
                    while let Some(sigil @ ('+' | '~')) = cursor.peek() {
                        cursor.bump();
                        let name = cursor.take_while(is_name_char);
                        if name.is_empty() {
                            return Err(syntax(format!("expected a variant name after '{}'", sigil)));
                        }
                        terms.push(Condition::Variant {
                            name: name.to_string(),
                            value: VariantValue::Bool(sigil == '+'),
                        });
                    }
                }
                '@' => {
                    cursor.bump();
                    terms.push(Condition::SelfVersion(cursor.take_range()?));
                }
                '^' => {
                    cursor.bump();
                    let (name, range) = cursor.take_dependency()?;
                    if !cursor.at_boundary() {
                        return Err(syntax(format!(
                            "unsupported constraint on dependency '{}'",
                            name
                        )));
                    }
                    terms.push(Condition::Dependency { name, range });
                }
                c if is_name_char(c) => {
                    let word = cursor.take_while(is_name_char);
                    if cursor.peek() == Some('=') {
                        cursor.bump();
                        let value = cursor.take_while(is_value_char);
                        if value.is_empty() {
                            return Err(syntax(format!("expected a value for variant '{}'", word)));
                        }
                        terms.push(Condition::Variant {
                            name: word.to_string(),
                            value: VariantValue::from_text(value),
                        });
                    } else if word != self.package {
                        return Err(syntax(format!("unknown term '{}'", word)));
                    }
                }
                other => return Err(syntax(format!("unexpected character '{}'", other))),
            }
        }

        Ok(Condition::all(terms))
    }

    /// Parses a dependency spec such as `libfuse` or `libfuse@3:`.
    pub fn parse_dependency(
        &self,
        text: &str,
    ) -> Result<(String, Option<VersionRange>), ParseFailure> {
        let mut cursor = Cursor::new(text);
        cursor.skip_whitespace();
        let dependency = cursor.take_dependency()?;
        cursor.skip_whitespace();
        match cursor.peek() {
            None => Ok(dependency),
            Some(c) => Err(syntax(format!(
                "unexpected '{}' after dependency '{}'",
                c, dependency.0
            ))),
        }
    }
}

fn syntax(message: String) -> ParseFailure {
    ParseFailure::Syntax(message)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_value_char(c: char) -> bool {
    is_name_char(c) || c == '.' || c == ','
}

fn is_range_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-' | '_')
}

struct Cursor<'s> {
    text: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn new(text: &'s str) -> Self {
        Self { text, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn at_boundary(&self) -> bool {
        self.peek().is_none_or(char::is_whitespace)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let rest = &self.text[self.pos..];
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn take_range(&mut self) -> Result<VersionRange, ParseFailure> {
        let text = self.take_while(is_range_char);
        if text.is_empty() {
            return Err(syntax("expected a version range after '@'".to_string()));
        }
        Ok(VersionRange::parse(text)?)
    }

    fn take_dependency(&mut self) -> Result<(String, Option<VersionRange>), ParseFailure> {
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            return Err(syntax("expected a dependency name".to_string()));
        }
        let range = if self.peek() == Some('@') {
            self.bump();
            Some(self.take_range()?)
        } else {
            None
        };
        Ok((name.to_string(), range))
    }
}
