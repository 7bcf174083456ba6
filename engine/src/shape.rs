//! Shape definitions, field existence checks and field projection.
//!
//! A shape is the explicit, ordered table of members a record type exposes.
//! Each member pairs a canonical name with an accessor that reads the value
//! out of a record. Shapes are built once per type and looked up through the
//! [`Shaped`] trait, so projection is a lookup-and-invoke over a known table.

use crate::{error::Result, names, Error, ShapedRecord};
use serde_json::Value;

/// Reads one member's current value out of a record.
pub type Accessor<T> = fn(&T) -> Value;

/// A single declared member of a shape.
pub struct Field<T> {
    name: &'static str,
    key: String,
    accessor: Accessor<T>,
}

impl<T> Field<T> {
    /// Canonical member name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read this member from a record.
    pub fn value(&self, record: &T) -> Value {
        (self.accessor)(record)
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// The ordered member table of a record type.
#[derive(Debug)]
pub struct Shape<T> {
    name: &'static str,
    fields: Vec<Field<T>>,
}

impl<T> Shape<T> {
    /// Create an empty shape.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Builder-style method to declare a member.
    ///
    /// Members keep their declaration order. Redeclaring a name (ignoring
    /// case) replaces the accessor in place.
    pub fn field(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        let key = names::normalize(name);
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(existing) => {
                existing.name = name;
                existing.accessor = accessor;
            }
            None => self.fields.push(Field {
                name,
                key,
                accessor,
            }),
        }
        self
    }

    /// Shape identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared members in declaration order.
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Resolve a member by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&Field<T>> {
        let key = names::normalize(name);
        self.fields.iter().find(|f| f.key == key)
    }

    /// Check that every name in a `fields` list is a declared member.
    ///
    /// Blank input is always valid. Tokens may carry an `orderBy` style
    /// direction suffix, which is ignored.
    pub fn check_fields(&self, fields: Option<&str>) -> Result<()> {
        let Some(list) = fields else {
            return Ok(());
        };

        for name in names::split_member_names(list)? {
            if self.get(name).is_none() {
                return Err(self.unknown(name));
            }
        }

        Ok(())
    }

    /// Boolean form of [`Shape::check_fields`].
    pub fn has_fields(&self, fields: Option<&str>) -> bool {
        self.check_fields(fields).is_ok()
    }

    /// Reduce a record to the requested members.
    ///
    /// With no `fields` every member is included. Output keys are canonical
    /// member names in declaration order.
    pub fn shape_data(&self, record: &T, fields: Option<&str>) -> Result<ShapedRecord> {
        let selected = self.select(fields)?;
        Ok(self.project(record, &selected))
    }

    /// Lazily reduce each record of a sequence.
    ///
    /// The field list is resolved once up front; an invalid list fails before
    /// any record is touched.
    pub fn shape_collection<'a, I>(
        &'a self,
        records: I,
        fields: Option<&str>,
    ) -> Result<impl Iterator<Item = ShapedRecord> + 'a>
    where
        I: IntoIterator + 'a,
        I::Item: std::borrow::Borrow<T>,
        I::IntoIter: 'a,
    {
        use std::borrow::Borrow;

        let selected = self.select(fields)?;
        Ok(records
            .into_iter()
            .map(move |record| self.project(record.borrow(), &selected)))
    }

    /// Resolve the selection mask for a `fields` list.
    fn select(&self, fields: Option<&str>) -> Result<Vec<bool>> {
        let requested = match fields {
            Some(list) => names::split_member_names(list)?,
            None => Vec::new(),
        };

        if requested.is_empty() {
            return Ok(vec![true; self.fields.len()]);
        }

        let mut mask = vec![false; self.fields.len()];
        for name in requested {
            let key = names::normalize(name);
            let index = self
                .fields
                .iter()
                .position(|f| f.key == key)
                .ok_or_else(|| self.unknown(name))?;
            mask[index] = true;
        }
        Ok(mask)
    }

    fn project(&self, record: &T, mask: &[bool]) -> ShapedRecord {
        self.fields
            .iter()
            .zip(mask)
            .filter(|(_, selected)| **selected)
            .map(|(field, _)| (field.name.to_string(), field.value(record)))
            .collect()
    }

    fn unknown(&self, name: &str) -> Error {
        Error::UnknownField {
            shape: self.name.to_string(),
            field: name.to_string(),
        }
    }
}

/// Record types with a registered shape.
///
/// Implementations usually keep the shape in a `OnceLock` so it is built
/// the first time it is needed and shared afterwards:
///
/// ```rust
/// use serde_json::json;
/// use shape_engine::{Shape, Shaped};
/// use std::sync::OnceLock;
///
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// impl Shaped for Tag {
///     fn shape() -> &'static Shape<Self> {
///         static SHAPE: OnceLock<Shape<Tag>> = OnceLock::new();
///         SHAPE.get_or_init(|| {
///             Shape::<Tag>::new("Tag")
///                 .field("Id", |t| json!(t.id))
///                 .field("Label", |t| json!(t.label))
///         })
///     }
/// }
///
/// let tag = Tag { id: 7, label: "rust".into() };
/// let shaped = Tag::shape().shape_data(&tag, Some("label")).unwrap();
/// assert_eq!(shaped["Label"], "rust");
/// assert!(!shaped.contains_key("Id"));
/// ```
pub trait Shaped: Sized + 'static {
    /// The shape of this type.
    fn shape() -> &'static Shape<Self>;
}
