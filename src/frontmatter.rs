//! Content metadata headers.
//!
//! A content file may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Install prompt
//! order: 2
//! navTag: New
//! keywords: [pwa, install]
//! ---
//! Body starts here.
//! ```
//!
//! ## Leniency
//!
//! Headers are written by hand, so parsing accepts more than the strict types:
//!
//! - `order` may be a number or a numeric string; anything else (including
//!   NaN and infinities) is treated as absent.
//! - Scalar text fields accept numbers and booleans (`title: 2024`).
//! - `tag`/`tagLabel` are accepted as spellings of `navTag`/`navLabel`; when both
//!   spellings are present the `nav*` one wins.
//! - Unknown keys are ignored.
//!
//! A header that is opened but never closed, or whose YAML does not parse into
//! a mapping, is a [`HeaderError`]: the file is malformed.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeaderError {
    #[error("metadata header is not closed with '---'")]
    Unterminated,
    #[error("metadata header is not valid YAML: {0}")]
    Yaml(String),
}

/// Keywords as written: a single string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    One(String),
    Many(Vec<String>),
}

/// Metadata recognized in a content header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_tag_variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Keywords>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Wire shape of the header; both tag spellings kept apart so they cannot
/// collide as duplicate fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawFrontmatter {
    #[serde(deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient_order")]
    order: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    nav_tag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    tag: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    nav_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    tag_label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    nav_icon: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    nav_tag_variant: Option<String>,
    #[serde(deserialize_with = "lenient_keywords")]
    keywords: Option<Keywords>,
    #[serde(deserialize_with = "lenient_text")]
    summary: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    updated_at: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    github: Option<String>,
}

impl From<RawFrontmatter> for Frontmatter {
    fn from(raw: RawFrontmatter) -> Self {
        Self {
            title: raw.title,
            order: raw.order,
            label: raw.label,
            nav_tag: raw.nav_tag.or(raw.tag),
            nav_label: raw.nav_label.or(raw.tag_label),
            nav_icon: raw.nav_icon,
            nav_tag_variant: raw.nav_tag_variant,
            keywords: raw.keywords,
            summary: raw.summary,
            updated_at: raw.updated_at,
            image: raw.image,
            github: raw.github,
        }
    }
}

fn scalar_text(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<serde_yaml::Value>::deserialize(d)?.and_then(scalar_text))
}

fn lenient_order<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let order = match Option::<serde_yaml::Value>::deserialize(d)? {
        Some(serde_yaml::Value::Number(n)) => n.as_f64(),
        Some(serde_yaml::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(order.filter(|o| o.is_finite()))
}

fn lenient_keywords<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Keywords>, D::Error> {
    let keywords = match Option::<serde_yaml::Value>::deserialize(d)? {
        Some(serde_yaml::Value::Sequence(items)) => {
            Some(Keywords::Many(items.into_iter().filter_map(scalar_text).collect()))
        }
        Some(other) => scalar_text(other).map(Keywords::One),
        None => None,
    };
    Ok(keywords)
}

/// Split a document into its metadata and body.
///
/// A document without a leading `---` line has no header: empty metadata,
/// the whole input is the body.
pub fn split(input: &str) -> Result<(Frontmatter, &str), HeaderError> {
    let content = input.strip_prefix('\u{feff}').unwrap_or(input);
    let Some(rest) = strip_fence(content) else {
        return Ok((Frontmatter::default(), content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_header(yaml)?, body));
        }
        offset += line.len();
    }
    Err(HeaderError::Unterminated)
}

/// The input after an opening `---` line, if it starts with one.
fn strip_fence(content: &str) -> Option<&str> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    (first.trim_end() == "---").then_some(rest)
}

fn parse_header(yaml: &str) -> Result<Frontmatter, HeaderError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| HeaderError::Yaml(e.to_string()))?;
    match value {
        serde_yaml::Value::Mapping(_) => {
            let raw: RawFrontmatter =
                serde_yaml::from_value(value).map_err(|e| HeaderError::Yaml(e.to_string()))?;
            Ok(raw.into())
        }
        serde_yaml::Value::Null => Ok(Frontmatter::default()),
        _ => Err(HeaderError::Yaml("header is not a key/value mapping".into())),
    }
}

/// Resolve a text field from multiple sources.
///
/// Takes a list of optional values in priority order and returns the first
/// non-None, non-empty value.
///
/// ```text
/// title: resolve(&[header_title, fallback_title])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}
