//! Serialization of the value model back to Siren JSON.
//!
//! [`to_value`] is the structural inverse of [`crate::deserialize`]:
//! each model type emits the JSON shape it parses from, with absent
//! optional fields omitted rather than written as `null`. A parsed
//! document round-trips: `parse_document(&to_value(&e))` yields `e`
//! again under the same options.

use crate::types::*;
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize an entity tree to a Siren JSON value.
pub fn to_value(entity: &Entity) -> Value {
    Value::Object(entity_object(entity))
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_value(self).serialize(serializer)
    }
}

fn entity_object(entity: &Entity) -> Map<String, Value> {
    let mut obj = Map::new();
    insert_entity_body(
        &mut obj,
        &entity.class_names,
        &entity.properties,
        &entity.entities,
        &entity.links,
        &entity.actions,
        &entity.title,
    );
    obj
}

fn embedded_entity_object(entity: &EmbeddedEntity) -> Map<String, Value> {
    let mut obj = Map::new();
    // `rel` is required on embedded entities, so it is always emitted,
    // even when the lenient parse policy left it empty.
    obj.insert("rel".to_owned(), string_array_value(&entity.rel));
    insert_entity_body(
        &mut obj,
        &entity.class_names,
        &entity.properties,
        &entity.entities,
        &entity.links,
        &entity.actions,
        &entity.title,
    );
    obj
}

#[allow(clippy::too_many_arguments)]
fn insert_entity_body(
    obj: &mut Map<String, Value>,
    class_names: &Option<Vec<String>>,
    properties: &Option<Map<String, Value>>,
    entities: &Option<Vec<SubEntity>>,
    links: &Option<Vec<Link>>,
    actions: &Option<Vec<Action>>,
    title: &Option<String>,
) {
    if let Some(class_names) = class_names {
        obj.insert("class".to_owned(), string_array_value(class_names));
    }
    if let Some(properties) = properties {
        obj.insert("properties".to_owned(), Value::Object(properties.clone()));
    }
    if let Some(entities) = entities {
        let elements = entities.iter().map(sub_entity_value).collect();
        obj.insert("entities".to_owned(), Value::Array(elements));
    }
    if let Some(links) = links {
        let elements = links.iter().map(link_value).collect();
        obj.insert("links".to_owned(), Value::Array(elements));
    }
    if let Some(actions) = actions {
        let elements = actions.iter().map(action_value).collect();
        obj.insert("actions".to_owned(), Value::Array(elements));
    }
    if let Some(title) = title {
        obj.insert("title".to_owned(), Value::String(title.clone()));
    }
}

fn sub_entity_value(sub_entity: &SubEntity) -> Value {
    match sub_entity {
        SubEntity::EmbeddedLink(link) => link_value(link),
        SubEntity::EmbeddedEntity(entity) => Value::Object(embedded_entity_object(entity)),
    }
}

fn link_value(link: &Link) -> Value {
    let mut obj = Map::new();
    obj.insert("rel".to_owned(), string_array_value(&link.rel));
    obj.insert("href".to_owned(), Value::String(link.href.as_str().to_owned()));
    if let Some(class_names) = &link.class_names {
        obj.insert("class".to_owned(), string_array_value(class_names));
    }
    if let Some(title) = &link.title {
        obj.insert("title".to_owned(), Value::String(title.clone()));
    }
    if let Some(media_type) = &link.media_type {
        obj.insert("type".to_owned(), Value::String(media_type.clone()));
    }
    Value::Object(obj)
}

fn action_value(action: &Action) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_owned(), Value::String(action.name.clone()));
    obj.insert(
        "href".to_owned(),
        Value::String(action.href.as_str().to_owned()),
    );
    // The model stores `method` already defaulted, so it is always
    // emitted; re-parsing gives the same action back.
    obj.insert("method".to_owned(), Value::String(action.method.clone()));
    if let Some(class_names) = &action.class_names {
        obj.insert("class".to_owned(), string_array_value(class_names));
    }
    if let Some(title) = &action.title {
        obj.insert("title".to_owned(), Value::String(title.clone()));
    }
    if let Some(media_type) = &action.media_type {
        obj.insert("type".to_owned(), Value::String(media_type.clone()));
    }
    if let Some(fields) = &action.fields {
        let elements = fields.iter().map(field_value).collect();
        obj.insert("fields".to_owned(), Value::Array(elements));
    }
    Value::Object(obj)
}

fn field_value(field: &Field) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_owned(), Value::String(field.name.clone()));
    obj.insert("type".to_owned(), Value::String(field.field_type.clone()));
    if let Some(class_names) = &field.class_names {
        obj.insert("class".to_owned(), string_array_value(class_names));
    }
    if let Some(value) = &field.value {
        obj.insert("value".to_owned(), value.clone());
    }
    if let Some(title) = &field.title {
        obj.insert("title".to_owned(), Value::String(title.clone()));
    }
    Value::Object(obj)
}

fn string_array_value(strings: &[String]) -> Value {
    Value::Array(strings.iter().cloned().map(Value::String).collect())
}
