//! Doc-block tag reader.
//!
//! Extracts the tags the converter consults from a `/** ... */` comment:
//!
//! ```text
//! /**
//!  * Sum two numbers.
//!  *
//!  * @param int|float $a
//!  * @param array<string, int> $b
//!  * @return int
//!  * @throws \InvalidArgumentException
//!  */
//! ```
//!
//! Tags may share a line (`/** @param int $a @return string */`). Generic
//! brackets in type expressions are kept intact.

/// One tag of a doc block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocTag {
    /// `@param <type> $<name>`; `var` keeps the `$` sigil.
    Param { ty: String, var: String },
    /// `@return <type>`
    Return { ty: String },
    /// `@throws <type>`
    Throws { ty: String },
    /// Any other tag, kept verbatim.
    Other { name: String, body: String },
}

impl DocTag {
    /// Variable name of a param tag without its sigil (`$a` -> `a`).
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::Param { var, .. } => var.trim_start_matches(['&', '.']).strip_prefix('$'),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocBlock {
    pub summary: String,
    pub tags: Vec<DocTag>,
}

impl DocBlock {
    pub fn parse(text: &str) -> Self {
        let body = strip_comment_markers(text);
        let starts = tag_starts(&body);

        let summary_end = starts.first().copied().unwrap_or(body.len());
        let summary = body[..summary_end].trim().to_string();

        let mut tags = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            tags.push(parse_tag(&body[start + 1..end]));
        }

        Self { summary, tags }
    }

    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    /// Type of the `@param` tag naming `name` (matched without the sigil).
    /// Tags with an empty type are skipped.
    pub fn param_type(&self, name: &str) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            DocTag::Param { ty, .. } if !ty.is_empty() && tag.param_name() == Some(name) => {
                Some(ty.as_str())
            }
            _ => None,
        })
    }

    /// Type of the first `@return` tag.
    pub fn return_type(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            DocTag::Return { ty } if !ty.is_empty() => Some(ty.as_str()),
            _ => None,
        })
    }
}

/// Drop `/**`, `*/` and the leading `*` gutter of each line.
fn strip_comment_markers(text: &str) -> String {
    let text = text.trim();
    let text = text
        .strip_prefix("/**")
        .or_else(|| text.strip_prefix("/*"))
        .unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);

    text.lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offsets of every `@` that starts a tag: at the beginning of the text
/// or after whitespace, and followed by a letter.
fn tag_starts(body: &str) -> Vec<usize> {
    let bytes = body.as_bytes();
    let mut starts = Vec::new();
    for (i, &byte) in bytes.iter().enumerate() {
        if byte != b'@' {
            continue;
        }
        let after_space = i == 0 || bytes[i - 1].is_ascii_whitespace();
        let letter_next = bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic);
        if after_space && letter_next {
            starts.push(i);
        }
    }
    starts
}

fn parse_tag(segment: &str) -> DocTag {
    let (name, rest) = segment
        .split_once(char::is_whitespace)
        .unwrap_or((segment, ""));
    let rest = rest.trim();

    match name {
        "param" => {
            let (first, tail) = next_type_token(rest);
            if first.starts_with('$') || first.starts_with("&$") || first.starts_with("...$") {
                // `@param $name` without a type.
                return DocTag::Param {
                    ty: String::new(),
                    var: first.to_string(),
                };
            }
            let (var, _) = next_type_token(tail);
            DocTag::Param {
                ty: first.to_string(),
                var: var.to_string(),
            }
        }
        "return" | "returns" => DocTag::Return {
            ty: next_type_token(rest).0.to_string(),
        },
        "throws" | "throw" => DocTag::Throws {
            ty: next_type_token(rest).0.to_string(),
        },
        _ => DocTag::Other {
            name: name.to_string(),
            body: rest.to_string(),
        },
    }
}

/// Split off the first whitespace-delimited token, treating whitespace inside
/// `<>`, `()`, `{}` or `[]` as part of the token.
fn next_type_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    let mut depth = 0usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' | '(' | '{' | '[' => depth += 1,
            '>' | ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return (&text[..i], &text[i..]),
            _ => {}
        }
    }
    (text, "")
}
