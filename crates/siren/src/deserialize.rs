//! Recursive-descent parsing of `serde_json::Value` into the typed
//! Siren value model.
//!
//! The main entry point is [`parse_document`], which takes a decoded
//! `&serde_json::Value` and produces an [`Entity`] or the first
//! [`ParseError`] encountered in depth-first, index-ascending order.
//! [`parse_document_with`] exposes the parse knobs ([`ParseOptions`]);
//! [`from_slice`] and [`from_str`] bolt the JSON decode step on the
//! front, reporting decode failures distinctly from shape failures.
//!
//! The parser is a pure function: no state survives between calls, and
//! independent documents may be parsed concurrently without coordination.

use crate::error::{Error, ParseError};
use crate::types::*;
use serde_json::Value;
use url::Url;

/// Default cap on embedded-entity nesting. Real Siren documents nest a
/// handful of levels; the cap exists to bound call-stack depth on
/// adversarial input.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Policy for embedded entities that lack a `rel` array of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelPolicy {
    /// Reject the document with [`ParseError::MissingSubEntityRel`].
    #[default]
    Strict,
    /// Substitute an empty `rel` and continue.
    Lenient,
}

/// Knobs for a parse invocation. [`ParseOptions::default`] gives the
/// strict rel policy and [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum embedded-entity nesting depth. The root entity is depth
    /// zero; an embedded entity nested deeper than this limit fails the
    /// parse with [`ParseError::NestingTooDeep`].
    pub max_depth: usize,
    /// How to treat embedded entities without a `rel` array.
    pub rel_policy: RelPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            rel_policy: RelPolicy::default(),
        }
    }
}

/// Parse a decoded JSON value as a Siren document with default options.
pub fn parse_document(root: &Value) -> Result<Entity, ParseError> {
    parse_document_with(root, &ParseOptions::default())
}

/// Parse a decoded JSON value as a Siren document.
///
/// The top-level value must be a JSON object; any other type fails with
/// [`ParseError::InvalidJsonObject`].
pub fn parse_document_with(root: &Value, options: &ParseOptions) -> Result<Entity, ParseError> {
    if !root.is_object() {
        return Err(ParseError::InvalidJsonObject);
    }
    parse_entity(root, options)
}

/// Decode a byte buffer as JSON and parse it as a Siren document.
///
/// Decode failures surface as [`Error::Decode`]; a well-formed JSON
/// value of the wrong shape surfaces as [`Error::Parse`].
pub fn from_slice(bytes: &[u8]) -> Result<Entity, Error> {
    let root: Value = serde_json::from_slice(bytes)?;
    Ok(parse_document(&root)?)
}

/// Decode a string as JSON and parse it as a Siren document.
pub fn from_str(input: &str) -> Result<Entity, Error> {
    let root: Value = serde_json::from_str(input)?;
    Ok(parse_document(&root)?)
}

// ── Entities ────────────────────────────────────────────────────────

fn parse_entity(value: &Value, options: &ParseOptions) -> Result<Entity, ParseError> {
    Ok(Entity {
        class_names: string_array(value.get("class")),
        properties: value.get("properties").and_then(Value::as_object).cloned(),
        entities: parse_sub_entities(value.get("entities"), options, 0)?,
        links: parse_links(value.get("links"))?,
        actions: parse_actions(value.get("actions"))?,
        title: opt_string(value.get("title")),
    })
}

fn parse_embedded_entity(
    value: &Value,
    options: &ParseOptions,
    depth: usize,
) -> Result<EmbeddedEntity, ParseError> {
    if depth > options.max_depth {
        return Err(ParseError::NestingTooDeep(options.max_depth));
    }
    let rel = match string_array(value.get("rel")) {
        Some(rel) => rel,
        None => match options.rel_policy {
            RelPolicy::Strict => return Err(ParseError::MissingSubEntityRel),
            RelPolicy::Lenient => Vec::new(),
        },
    };
    Ok(EmbeddedEntity {
        rel,
        class_names: string_array(value.get("class")),
        properties: value.get("properties").and_then(Value::as_object).cloned(),
        entities: parse_sub_entities(value.get("entities"), options, depth)?,
        links: parse_links(value.get("links"))?,
        actions: parse_actions(value.get("actions"))?,
        title: opt_string(value.get("title")),
    })
}

fn parse_sub_entities(
    value: Option<&Value>,
    options: &ParseOptions,
    depth: usize,
) -> Result<Option<Vec<SubEntity>>, ParseError> {
    let Some(elements) = value.and_then(Value::as_array) else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        // A null slot means "empty", not "malformed" — skip it.
        if element.is_null() {
            continue;
        }
        out.push(parse_sub_entity(element, options, depth)?);
    }
    Ok(Some(out))
}

fn parse_sub_entity(
    value: &Value,
    options: &ParseOptions,
    depth: usize,
) -> Result<SubEntity, ParseError> {
    // Presence of the `href` key is the sole discriminator between the
    // two sub-entity shapes. Classification happens before validation:
    // a link-shaped object with a broken href is still a link, and
    // reports link errors.
    if value.get("href").is_some() {
        Ok(SubEntity::EmbeddedLink(parse_link(value)?))
    } else {
        Ok(SubEntity::EmbeddedEntity(parse_embedded_entity(
            value,
            options,
            depth + 1,
        )?))
    }
}

// ── Links ───────────────────────────────────────────────────────────

fn parse_links(value: Option<&Value>) -> Result<Option<Vec<Link>>, ParseError> {
    let Some(elements) = value.and_then(Value::as_array) else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        if element.is_null() {
            continue;
        }
        out.push(parse_link(element)?);
    }
    Ok(Some(out))
}

fn parse_link(value: &Value) -> Result<Link, ParseError> {
    let rel = string_array(value.get("rel")).ok_or(ParseError::MissingEmbeddedLinkRel)?;
    let raw = value
        .get("href")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingEmbeddedLinkHref)?;
    let href =
        parse_href(raw).ok_or_else(|| ParseError::InvalidEmbeddedLinkHref(raw.to_owned()))?;
    Ok(Link {
        rel,
        href,
        class_names: string_array(value.get("class")),
        title: opt_string(value.get("title")),
        media_type: opt_string(value.get("type")),
    })
}

// ── Actions ─────────────────────────────────────────────────────────

fn parse_actions(value: Option<&Value>) -> Result<Option<Vec<Action>>, ParseError> {
    let Some(elements) = value.and_then(Value::as_array) else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        if element.is_null() {
            continue;
        }
        out.push(parse_action(element)?);
    }
    Ok(Some(out))
}

fn parse_action(value: &Value) -> Result<Action, ParseError> {
    let name = opt_string(value.get("name")).ok_or(ParseError::MissingActionName)?;
    let raw = value
        .get("href")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingActionHref)?;
    let href = parse_href(raw).ok_or_else(|| ParseError::InvalidActionHref(raw.to_owned()))?;
    let method = opt_string(value.get("method")).unwrap_or_else(|| "GET".to_owned());
    Ok(Action {
        name,
        href,
        method,
        class_names: string_array(value.get("class")),
        title: opt_string(value.get("title")),
        media_type: opt_string(value.get("type")),
        fields: parse_fields(value.get("fields"))?,
    })
}

// ── Fields ──────────────────────────────────────────────────────────

fn parse_fields(value: Option<&Value>) -> Result<Option<Vec<Field>>, ParseError> {
    let Some(elements) = value.and_then(Value::as_array) else {
        return Ok(None);
    };
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        if element.is_null() {
            continue;
        }
        out.push(parse_field(element)?);
    }
    Ok(Some(out))
}

fn parse_field(value: &Value) -> Result<Field, ParseError> {
    let name = opt_string(value.get("name")).ok_or(ParseError::MissingFieldName)?;
    let field_type = opt_string(value.get("type")).unwrap_or_else(|| "text".to_owned());
    let field_value = value
        .get("value")
        .and_then(|v| if v.is_null() { None } else { Some(v.clone()) });
    Ok(Field {
        name,
        field_type,
        class_names: string_array(value.get("class")),
        value: field_value,
        title: opt_string(value.get("title")),
    })
}

// ── Href validation ─────────────────────────────────────────────────

fn parse_href(raw: &str) -> Option<Href> {
    match Url::parse(raw) {
        Ok(url) => Some(Href::Absolute(url)),
        // No scheme: validate as a relative reference. The WHATWG
        // parser needs a base for these, and resolving against one
        // would percent-encode junk input into "validity", so check
        // the RFC 3986 character set directly instead.
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            if !raw.is_empty() && raw.bytes().all(is_uri_byte) {
                Some(Href::Relative(raw.to_owned()))
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

fn is_uri_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.' | b'_' | b'~'                                   // unreserved
            | b':' | b'/' | b'?' | b'#' | b'[' | b']' | b'@'            // gen-delims
            | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'                  // sub-delims
            | b'*' | b'+' | b',' | b';' | b'='
            | b'%'
        )
}

// ── Extraction helpers ──────────────────────────────────────────────

fn opt_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// `Some` only when the value is an array whose elements are all
/// strings; a missing key, a non-array, or a mixed-type array all yield
/// `None`.
fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    let elements = value?.as_array()?;
    elements
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_object_parses_with_all_fields_absent() {
        let entity = parse_document(&json!({})).unwrap();
        assert_eq!(entity, Entity::default());
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        for root in [json!([]), json!("siren"), json!(42), json!(true), json!(null)] {
            match parse_document(&root) {
                Err(ParseError::InvalidJsonObject) => {}
                other => panic!("expected InvalidJsonObject for {}, got {:?}", root, other),
            }
        }
    }

    #[test]
    fn class_and_title_and_properties_are_extracted() {
        let entity = parse_document(&json!({
            "class": ["order"],
            "title": "Order 42",
            "properties": {"orderNumber": 42, "status": "pending"}
        }))
        .unwrap();
        assert_eq!(entity.class_names, Some(vec!["order".to_owned()]));
        assert_eq!(entity.title.as_deref(), Some("Order 42"));
        let props = entity.properties.unwrap();
        assert_eq!(props["orderNumber"], 42);
        assert_eq!(props["status"], "pending");
    }

    #[test]
    fn non_array_class_is_treated_as_absent() {
        let entity = parse_document(&json!({"class": "order"})).unwrap();
        assert!(entity.class_names.is_none());
    }

    #[test]
    fn mixed_type_class_array_is_treated_as_absent() {
        let entity = parse_document(&json!({"class": ["order", 7]})).unwrap();
        assert!(entity.class_names.is_none());
    }

    #[test]
    fn non_object_properties_are_treated_as_absent() {
        let entity = parse_document(&json!({"properties": [1, 2, 3]})).unwrap();
        assert!(entity.properties.is_none());
    }

    #[test]
    fn href_key_presence_selects_the_link_variant() {
        // Classification precedes validation: the href value here is not
        // even a string, but the element is still a link candidate and
        // reports a link error, never MissingSubEntityRel.
        let root = json!({"entities": [{"rel": ["item"], "href": 42}]});
        match parse_document(&root) {
            Err(ParseError::MissingEmbeddedLinkHref) => {}
            other => panic!("expected MissingEmbeddedLinkHref, got {:?}", other),
        }
    }

    #[test]
    fn null_array_slots_are_skipped_in_order() {
        let root = json!({"entities": [
            {"rel": ["a"], "href": "http://x.io/a"},
            null,
            {"rel": ["b"], "href": "http://x.io/b"}
        ]});
        let entity = parse_document(&root).unwrap();
        let entities = entity.entities.unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].as_link().unwrap().rel, vec!["a"]);
        assert_eq!(entities[1].as_link().unwrap().rel, vec!["b"]);
    }

    #[test]
    fn action_method_defaults_to_get() {
        let root = json!({"actions": [{"name": "x", "href": "http://e/x"}]});
        let entity = parse_document(&root).unwrap();
        assert_eq!(entity.actions.unwrap()[0].method, "GET");
    }

    #[test]
    fn action_method_case_is_preserved() {
        let root = json!({"actions": [{"name": "x", "href": "http://e/x", "method": "post"}]});
        let entity = parse_document(&root).unwrap();
        assert_eq!(entity.actions.unwrap()[0].method, "post");
    }

    #[test]
    fn field_type_defaults_to_text() {
        let root = json!({"actions": [
            {"name": "x", "href": "http://e/x", "fields": [{"name": "q"}]}
        ]});
        let entity = parse_document(&root).unwrap();
        let actions = entity.actions.unwrap();
        let fields = actions[0].fields.as_ref().unwrap();
        assert_eq!(fields[0].field_type, "text");
        assert!(fields[0].value.is_none());
    }

    #[test]
    fn field_value_is_stored_raw_and_null_means_absent() {
        let root = json!({"actions": [{"name": "x", "href": "http://e/x", "fields": [
            {"name": "n", "value": 42},
            {"name": "s", "value": "42"},
            {"name": "absent", "value": null}
        ]}]});
        let entity = parse_document(&root).unwrap();
        let actions = entity.actions.unwrap();
        let fields = actions[0].fields.as_ref().unwrap();
        assert_eq!(fields[0].value, Some(json!(42)));
        assert_eq!(fields[1].value, Some(json!("42")));
        assert!(fields[2].value.is_none());
    }

    #[test]
    fn action_without_name_is_rejected_regardless_of_other_fields() {
        let root = json!({"actions": [
            {"href": "http://e/x", "method": "POST", "title": "Add", "fields": []}
        ]});
        match parse_document(&root) {
            Err(ParseError::MissingActionName) => {}
            other => panic!("expected MissingActionName, got {:?}", other),
        }
    }

    #[test]
    fn action_without_href_is_rejected() {
        let root = json!({"actions": [{"name": "x"}]});
        match parse_document(&root) {
            Err(ParseError::MissingActionHref) => {}
            other => panic!("expected MissingActionHref, got {:?}", other),
        }
    }

    #[test]
    fn invalid_action_href_carries_the_original_string() {
        let root = json!({"actions": [{"name": "x", "href": "not a url ::"}]});
        match parse_document(&root) {
            Err(ParseError::InvalidActionHref(raw)) => assert_eq!(raw, "not a url ::"),
            other => panic!("expected InvalidActionHref, got {:?}", other),
        }
    }

    #[test]
    fn invalid_link_href_carries_the_original_string() {
        let root = json!({"links": [{"rel": ["self"], "href": "not a url ::"}]});
        match parse_document(&root) {
            Err(ParseError::InvalidEmbeddedLinkHref(raw)) => assert_eq!(raw, "not a url ::"),
            other => panic!("expected InvalidEmbeddedLinkHref, got {:?}", other),
        }
    }

    #[test]
    fn link_without_rel_is_rejected() {
        let root = json!({"links": [{"href": "http://e/x"}]});
        match parse_document(&root) {
            Err(ParseError::MissingEmbeddedLinkRel) => {}
            other => panic!("expected MissingEmbeddedLinkRel, got {:?}", other),
        }
    }

    #[test]
    fn link_rel_with_non_string_element_is_rejected() {
        let root = json!({"links": [{"rel": ["self", 3], "href": "http://e/x"}]});
        match parse_document(&root) {
            Err(ParseError::MissingEmbeddedLinkRel) => {}
            other => panic!("expected MissingEmbeddedLinkRel, got {:?}", other),
        }
    }

    #[test]
    fn relative_href_is_accepted_and_kept_verbatim() {
        let root = json!({"links": [{"rel": ["self"], "href": "/orders/42"}]});
        let entity = parse_document(&root).unwrap();
        let links = entity.links.unwrap();
        match &links[0].href {
            Href::Relative(raw) => assert_eq!(raw, "/orders/42"),
            other => panic!("expected a relative href, got {:?}", other),
        }
    }

    #[test]
    fn absolute_href_parses_to_a_url() {
        let root = json!({"links": [{"rel": ["self"], "href": "http://api.x.io/orders/42"}]});
        let entity = parse_document(&root).unwrap();
        let links = entity.links.unwrap();
        assert_eq!(links[0].href.url().unwrap().host_str(), Some("api.x.io"));
        assert_eq!(links[0].href.as_str(), "http://api.x.io/orders/42");
    }

    #[test]
    fn embedded_entity_without_rel_is_rejected_under_strict_policy() {
        let root = json!({"entities": [{"title": "no rel here"}]});
        match parse_document(&root) {
            Err(ParseError::MissingSubEntityRel) => {}
            other => panic!("expected MissingSubEntityRel, got {:?}", other),
        }
    }

    #[test]
    fn embedded_entity_without_rel_defaults_to_empty_under_lenient_policy() {
        let root = json!({"entities": [{"title": "no rel here"}]});
        let options = ParseOptions {
            rel_policy: RelPolicy::Lenient,
            ..ParseOptions::default()
        };
        let entity = parse_document_with(&root, &options).unwrap();
        let entities = entity.entities.unwrap();
        let embedded = entities[0].as_entity().unwrap();
        assert!(embedded.rel.is_empty());
        assert_eq!(embedded.title.as_deref(), Some("no rel here"));
    }

    #[test]
    fn nesting_at_the_limit_parses() {
        let doc = nested_document(3);
        let options = ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        };
        assert!(parse_document_with(&doc, &options).is_ok());
    }

    #[test]
    fn nesting_beyond_the_limit_is_rejected() {
        let doc = nested_document(4);
        let options = ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        };
        match parse_document_with(&doc, &options) {
            Err(ParseError::NestingTooDeep(limit)) => assert_eq!(limit, 3),
            other => panic!("expected NestingTooDeep, got {:?}", other),
        }
    }

    /// A document whose embedded entities nest `levels` deep.
    fn nested_document(levels: usize) -> Value {
        let mut inner = json!({"rel": ["leaf"]});
        for _ in 1..levels {
            inner = json!({"rel": ["nest"], "entities": [inner]});
        }
        json!({"entities": [inner]})
    }

    #[test]
    fn from_str_reports_decode_errors_distinctly() {
        match from_str("{not json") {
            Err(Error::Decode(_)) => {}
            other => panic!("expected Decode, got {:?}", other),
        }
        match from_str("[1, 2, 3]") {
            Err(Error::Parse(ParseError::InvalidJsonObject)) => {}
            other => panic!("expected Parse(InvalidJsonObject), got {:?}", other),
        }
    }

    #[test]
    fn from_slice_parses_a_document() {
        let entity = from_slice(br#"{"class": ["order"]}"#).unwrap();
        assert_eq!(entity.class_names, Some(vec!["order".to_owned()]));
    }

    #[test]
    fn non_array_entities_key_is_treated_as_absent() {
        let entity = parse_document(&json!({"entities": "nope", "links": 3})).unwrap();
        assert!(entity.entities.is_none());
        assert!(entity.links.is_none());
    }
}
