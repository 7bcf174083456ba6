//! # Shape Engine
//!
//! Sorting, field shaping and pagination for list endpoints.
//!
//! Given a collection of typed records and a client request (filters, an
//! `orderBy` expression, a `fields` list and page coordinates), the engine
//! produces a sorted, filtered, paginated and field-reduced result together
//! with pagination metadata.
//!
//! ## Design Principles
//!
//! - **No IO**: persistence and transport live outside the engine
//! - **Validate first**: every client error is reported before records are read
//! - **Deterministic**: stable multi-key sorting, pure page arithmetic
//! - **Read-only sharing**: registries and shapes are built once and shared
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! A [`Shape`] is the explicit, ordered member table of a record type: each
//! member is a canonical name and an accessor. Types expose their shape by
//! implementing [`Shaped`]. Shapes drive field existence checks, projection
//! ([`Shape::shape_data`]) and in-memory sorting.
//!
//! ### Property mappings
//!
//! Clients sort by external names; storage sorts by internal ones. The
//! [`PropertyMappingRegistry`] holds, per (external, internal) shape pair, a
//! case-insensitive table of [`PropertyMapping`]s. One external name may map
//! to several internal members and may invert the sort direction.
//!
//! ### Sorting
//!
//! [`translate_order_by`] turns `"name desc,id"` into an ordered list of
//! [`SortKey`]s; [`apply_sort`] sorts records by them.
//!
//! ### Pagination
//!
//! [`Page`] holds one slice of the result with its position
//! ([`PaginationMetadata`]). [`ResourceParameters`] caps the page size at
//! [`MAX_PAGE_SIZE`].
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use shape_engine::{
//!     Collection, ListPlan, PropertyMapping, PropertyMappingRegistry,
//!     ResourceParameters, Shape, Shaped, SortKey,
//! };
//! use std::sync::OnceLock;
//!
//! struct Person { id: i64, first: String, last: String }
//! struct PersonView { id: i64, name: String }
//!
//! impl Shaped for Person {
//!     fn shape() -> &'static Shape<Self> {
//!         static SHAPE: OnceLock<Shape<Person>> = OnceLock::new();
//!         SHAPE.get_or_init(|| {
//!             Shape::<Person>::new("Person")
//!                 .field("Id", |p| json!(p.id))
//!                 .field("First", |p| json!(p.first))
//!                 .field("Last", |p| json!(p.last))
//!         })
//!     }
//! }
//!
//! impl Shaped for PersonView {
//!     fn shape() -> &'static Shape<Self> {
//!         static SHAPE: OnceLock<Shape<PersonView>> = OnceLock::new();
//!         SHAPE.get_or_init(|| {
//!             Shape::<PersonView>::new("PersonView")
//!                 .field("Id", |p| json!(p.id))
//!                 .field("Name", |p| json!(p.name))
//!         })
//!     }
//! }
//!
//! // 1. Register mappings once at startup
//! let mut registry = PropertyMappingRegistry::new();
//! registry
//!     .register_for::<PersonView, Person>([
//!         PropertyMapping::identity("Id"),
//!         PropertyMapping::new("Name", ["First", "Last"]),
//!     ])
//!     .unwrap();
//!
//! // 2. Store some records
//! let people: Collection<Person> = [(1, "Bo", "Ek"), (2, "Al", "Yu"), (3, "Cy", "Oz")]
//!     .into_iter()
//!     .map(|(id, f, l)| Person { id, first: f.into(), last: l.into() })
//!     .collect();
//!
//! // 3. Plan and run a request
//! let params = ResourceParameters::new()
//!     .with_order_by("name desc")
//!     .with_fields("name")
//!     .with_page_size(2);
//! let plan = ListPlan::<PersonView, Person>::new(&registry, &params, &[SortKey::ascending("Id")])
//!     .unwrap();
//! let page = plan
//!     .execute(people.query(), |_| true, |p| PersonView {
//!         id: p.id,
//!         name: format!("{} {}", p.first, p.last),
//!     })
//!     .unwrap();
//!
//! assert_eq!(page.items()[0]["Name"], "Cy Oz");
//! assert_eq!(page.total_pages(), 2);
//! assert!(page.has_next());
//! ```

pub mod error;
pub mod listing;
pub mod mapping;
pub mod names;
pub mod page;
pub mod params;
pub mod shape;
pub mod sort;
pub mod store;

// Re-export main types at crate root
pub use error::Error;
pub use listing::ListPlan;
pub use mapping::{PropertyMapping, PropertyMappingRegistry, PropertyMappings};
pub use page::{Page, PaginationMetadata};
pub use params::{
    clamp_page_size, ResourceParameters, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use shape::{Accessor, Field, Shape, Shaped};
pub use sort::{apply_sort, compare_values, translate_order_by, SortDirection, SortKey};
pub use store::{Collection, Query, RecordSource};

/// Type aliases for clarity
pub type ShapeName = String;
pub type FieldName = String;

/// A record reduced to the requested members, in declaration order.
pub type ShapedRecord = serde_json::Map<String, serde_json::Value>;
