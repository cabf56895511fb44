//! Case normalization for slugs and group keys

use serde::{Deserialize, Serialize};

/// How raw tag and category values are turned into group keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// Kebab-case, lowercased. `AWS Lambda` and `aws-lambda` share a group.
    #[default]
    Kebab,
    /// Kebab-case word splitting with the original letter case kept.
    KebabPreserveCase,
    /// ASCII slug via the `slug` crate (transliterates non-ASCII letters).
    Slug,
}

impl KeyStyle {
    /// Normalize a raw frontmatter value into a group key.
    ///
    /// Returns an empty string when the value has no word characters.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            KeyStyle::Kebab => kebab_case(raw),
            KeyStyle::KebabPreserveCase => split_words(raw).join("-"),
            KeyStyle::Slug => slug::slugify(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    /// Letters without case (CJK, etc.)
    Caseless,
    Digit,
    Separator,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_lowercase() {
            CharClass::Lower
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Caseless
        } else {
            CharClass::Separator
        }
    }
}

/// Split a string into words on separators, case humps and digit runs.
///
/// ```ignore
/// split_words("XMLHttpRequest") // -> ["XML", "Http", "Request"]
/// split_words("aws2Lambda")     // -> ["aws", "2", "Lambda"]
/// ```
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<CharClass> = None;

    for c in input.chars() {
        // Apostrophes join contractions: "don't" is one word
        if c == '\'' || c == '\u{2019}' {
            continue;
        }

        let class = CharClass::of(c);
        if class == CharClass::Separator {
            flush(&mut words, &mut current);
            prev = None;
            continue;
        }

        match (prev, class) {
            (Some(CharClass::Lower | CharClass::Caseless), CharClass::Upper) => {
                flush(&mut words, &mut current);
            }
            (Some(CharClass::Digit), CharClass::Upper | CharClass::Lower | CharClass::Caseless) => {
                flush(&mut words, &mut current);
            }
            (Some(p), CharClass::Digit) if p != CharClass::Digit => {
                flush(&mut words, &mut current);
            }
            (Some(CharClass::Upper), CharClass::Lower) => {
                // "XMLHttp": the last capital starts the next word
                if current.chars().count() > 1 {
                    if let Some(last) = current.pop() {
                        flush(&mut words, &mut current);
                        current.push(last);
                    }
                }
            }
            _ => {}
        }

        current.push(c);
        prev = Some(class);
    }

    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Convert a string to lowercase kebab-case.
///
/// ```ignore
/// kebab_case("Hello World")  // -> "hello-world"
/// kebab_case("__FOO_BAR__")  // -> "foo-bar"
/// ```
pub fn kebab_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
