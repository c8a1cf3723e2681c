//! siren-document: typed parsing and serialization for the Siren
//! hypermedia format.
//!
//! Siren documents describe entities with properties, embedded
//! sub-entities, navigational links, and available actions. This crate
//! turns a decoded `serde_json::Value` into a validated [`Entity`] tree
//! (and back), so clients traverse a hypermedia API without ad hoc JSON
//! field extraction at every call site.
//!
//! # Public API
//!
//! Key entry points are re-exported at the crate root:
//!
//! - [`parse_document()`] / [`parse_document_with()`] -- parse a decoded
//!   JSON value into an [`Entity`]
//! - [`from_slice()`] / [`from_str()`] -- decode bytes first, then parse
//! - [`to_value()`] -- serialize an [`Entity`] back to Siren JSON
//! - [`ParseError`] -- the closed validation error taxonomy
//!
//! Parsing is fail-fast: the first validation failure aborts the whole
//! parse, there is no partial-document result. The parser holds no
//! state between calls, so independent documents may be parsed from
//! independent threads without coordination.
//!
//! # Example
//!
//! ```
//! use siren_document::{from_str, SubEntity};
//!
//! let entity = from_str(r#"{
//!     "class": ["order"],
//!     "entities": [
//!         {"rel": ["http://x.io/rels/order-items"],
//!          "href": "http://api.x.io/orders/42/items"}
//!     ],
//!     "links": [{"rel": ["self"], "href": "http://api.x.io/orders/42"}]
//! }"#)?;
//!
//! let items = &entity.entities.as_ref().unwrap()[0];
//! match items {
//!     SubEntity::EmbeddedLink(link) => {
//!         assert_eq!(link.href.as_str(), "http://api.x.io/orders/42/items");
//!     }
//!     SubEntity::EmbeddedEntity(_) => unreachable!(),
//! }
//! # Ok::<(), siren_document::Error>(())
//! ```

pub mod deserialize;
pub mod error;
pub mod serialize;
pub mod types;

// ── Convenience re-exports ──────────────────────────────────────────

pub use deserialize::{
    from_slice, from_str, parse_document, parse_document_with, ParseOptions, RelPolicy,
    DEFAULT_MAX_DEPTH,
};
pub use error::{Error, ParseError};
pub use serialize::to_value;
pub use types::{Action, EmbeddedEntity, Entity, Field, Href, Link, SubEntity};
