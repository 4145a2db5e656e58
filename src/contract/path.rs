//! Path templates with `:name` placeholders.
//!
//! A placeholder is a `:` followed by the longest run of ASCII letters, digits
//! and underscores, so `:id` never matches inside `:idx`. A lone `:` is text.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("missing value for path parameter `{0}`")]
    MissingParam(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Param(&'a str),
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn tokens(template: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    let mut literal_start = 0;
    let mut offset = 0;

    while let Some(pos) = rest.find(':') {
        let after = &rest[pos + 1..];
        let name_len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
        let colon_at = offset + pos;
        if name_len > 0 {
            if colon_at > literal_start {
                out.push(Token::Literal(&template[literal_start..colon_at]));
            }
            out.push(Token::Param(&after[..name_len]));
            literal_start = colon_at + 1 + name_len;
        }
        offset = colon_at + 1 + name_len;
        rest = &template[offset..];
    }

    if literal_start < template.len() {
        out.push(Token::Literal(&template[literal_start..]));
    }
    out
}

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    tokens(template)
        .into_iter()
        .filter_map(|token| match token {
            Token::Param(name) => Some(name),
            Token::Literal(_) => None,
        })
        .collect()
}

fn substitute<K, V>(template: &str, params: &[(K, V)]) -> (String, Option<String>)
where
    K: AsRef<str>,
    V: Display,
{
    let mut url = String::with_capacity(template.len());
    let mut missing = None;

    for token in tokens(template) {
        match token {
            Token::Literal(text) => url.push_str(text),
            Token::Param(name) => match params.iter().find(|(key, _)| key.as_ref() == name) {
                Some((_, value)) => url.push_str(&value.to_string()),
                None => {
                    url.push(':');
                    url.push_str(name);
                    if missing.is_none() {
                        missing = Some(name.to_string());
                    }
                }
            },
        }
    }

    (url, missing)
}

/// Substitutes every placeholder named in `params`.
///
/// Values are inserted as-is, without percent-encoding. A placeholder with no
/// matching parameter stays in the output as literal `:name`; extra parameters
/// are ignored. Prefer [`try_build_url`] unless that passthrough is wanted.
pub fn build_url<K, V>(template: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: Display,
{
    substitute(template, params).0
}

/// Like [`build_url`], but fails on the first placeholder left unsubstituted.
pub fn try_build_url<K, V>(template: &str, params: &[(K, V)]) -> Result<String, PathError>
where
    K: AsRef<str>,
    V: Display,
{
    match substitute(template, params) {
        (url, None) => Ok(url),
        (_, Some(name)) => Err(PathError::MissingParam(name)),
    }
}

/// Rewrites `:name` placeholders into the `{name}` captures axum routes use.
pub fn to_axum_path(template: &str) -> String {
    tokens(template)
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => text.to_string(),
            Token::Param(name) => format!("{{{name}}}"),
        })
        .collect()
}
