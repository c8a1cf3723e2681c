//! Typed value model for parsed Siren documents.
//!
//! These types are passive carriers produced by [`crate::deserialize`]:
//! all validation happens at parse time, and a constructed tree is never
//! mutated afterwards. Property bags and field values stay as
//! `serde_json::Value` so consumers pattern-match the closed JSON sum
//! type instead of casting.

use serde_json::{Map, Value};
use url::Url;

/// A parsed Siren entity — the document root shape.
///
/// Every field is optional in the wire format; `None` means the key was
/// absent (or, for `class`, present with a non-array value, which the
/// parser treats the same way).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// The `class` array: identifiers describing the nature of the entity.
    pub class_names: Option<Vec<String>>,
    /// The `properties` object, kept as raw JSON values.
    pub properties: Option<Map<String, Value>>,
    /// Embedded sub-entities, in source order.
    pub entities: Option<Vec<SubEntity>>,
    /// Navigational links, in source order.
    pub links: Option<Vec<Link>>,
    /// Available actions, in source order.
    pub actions: Option<Vec<Action>>,
    /// Descriptive title.
    pub title: Option<String>,
}

/// A sub-entity, dispatched at parse time on the presence of an `href`
/// key: link-shaped objects become [`SubEntity::EmbeddedLink`], everything
/// else becomes [`SubEntity::EmbeddedEntity`]. The discriminator is not
/// stored in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum SubEntity {
    EmbeddedLink(Link),
    EmbeddedEntity(EmbeddedEntity),
}

impl SubEntity {
    /// The link payload, if this sub-entity is an embedded link.
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            SubEntity::EmbeddedLink(link) => Some(link),
            SubEntity::EmbeddedEntity(_) => None,
        }
    }

    /// The entity payload, if this sub-entity is an embedded entity.
    pub fn as_entity(&self) -> Option<&EmbeddedEntity> {
        match self {
            SubEntity::EmbeddedLink(_) => None,
            SubEntity::EmbeddedEntity(entity) => Some(entity),
        }
    }
}

/// An embedded entity: the full [`Entity`] shape plus the `rel` array
/// describing its relationship to the parent.
///
/// `rel` is required by the strict parse policy; under
/// [`crate::deserialize::RelPolicy::Lenient`] a missing array is stored
/// as empty rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedEntity {
    /// Link relations to the parent entity.
    pub rel: Vec<String>,
    pub class_names: Option<Vec<String>>,
    pub properties: Option<Map<String, Value>>,
    pub entities: Option<Vec<SubEntity>>,
    pub links: Option<Vec<Link>>,
    pub actions: Option<Vec<Action>>,
    pub title: Option<String>,
}

/// A navigational link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Link relations; required and always an array of strings.
    pub rel: Vec<String>,
    /// The validated target URI.
    pub href: Href,
    pub class_names: Option<Vec<String>>,
    pub title: Option<String>,
    /// Media-type hint from the `type` key.
    pub media_type: Option<String>,
}

/// An available state-changing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Action name; required and unique among siblings by convention
    /// (uniqueness is not enforced at parse time).
    pub name: String,
    /// The validated target URI.
    pub href: Href,
    /// HTTP method, defaulted to `"GET"` when absent. Case is preserved
    /// as given, never normalized.
    pub method: String,
    pub class_names: Option<Vec<String>>,
    pub title: Option<String>,
    /// Encoding hint from the `type` key (e.g.
    /// `application/x-www-form-urlencoded`). Passed through as-is.
    pub media_type: Option<String>,
    /// Input fields, in source order.
    pub fields: Option<Vec<Field>>,
}

/// A single named input parameter of an [`Action`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name; required.
    pub name: String,
    /// Input type hint from the `type` key, defaulted to `"text"`.
    pub field_type: String,
    pub class_names: Option<Vec<String>>,
    /// Default value, kept as raw JSON. The parser never coerces it to
    /// match `field_type`; an explicit JSON `null` is stored as `None`.
    pub value: Option<Value>,
    pub title: Option<String>,
}

/// A validated link or action target.
///
/// Absolute hrefs are stored as parsed [`Url`]s. The WHATWG algorithm
/// cannot parse a relative reference without a base, so relative hrefs
/// are kept as strings already checked against the RFC 3986 character
/// set; [`Href::join`] resolves one against a caller-supplied base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Href {
    Absolute(Url),
    Relative(String),
}

impl Href {
    /// The string form. For absolute hrefs this is the normalized URL
    /// serialization; for relative hrefs it is the original source text.
    pub fn as_str(&self) -> &str {
        match self {
            Href::Absolute(url) => url.as_str(),
            Href::Relative(raw) => raw,
        }
    }

    /// The parsed URL, when the href is absolute.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Href::Absolute(url) => Some(url),
            Href::Relative(_) => None,
        }
    }

    /// Resolve against `base`. Absolute hrefs ignore the base.
    pub fn join(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self {
            Href::Absolute(url) => Ok(url.clone()),
            Href::Relative(raw) => base.join(raw),
        }
    }
}

impl std::fmt::Display for Href {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_join_resolves_relative_against_base() {
        let base = Url::parse("http://api.x.io/orders/42").unwrap();
        let href = Href::Relative("/customers/pj123".to_owned());
        let resolved = href.join(&base).unwrap();
        assert_eq!(resolved.as_str(), "http://api.x.io/customers/pj123");
    }

    #[test]
    fn href_join_ignores_base_when_absolute() {
        let base = Url::parse("http://other.example/").unwrap();
        let href = Href::Absolute(Url::parse("http://api.x.io/orders/42").unwrap());
        assert_eq!(href.join(&base).unwrap().as_str(), "http://api.x.io/orders/42");
    }

    #[test]
    fn href_display_matches_as_str() {
        let href = Href::Relative("/orders/42/items".to_owned());
        assert_eq!(href.to_string(), href.as_str());
    }
}
