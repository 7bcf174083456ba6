//! Property mappings between external and internal shapes.
//!
//! Clients sort by the names of the external shape they see; storage sorts by
//! the internal shape's members. A [`PropertyMapping`] translates one external
//! name into one or more internal names, optionally inverting the sort
//! direction. External names are matched case-insensitively: keys are
//! lower-cased both when a mapping is registered and when it is looked up.

use crate::{error::Result, names, Error, FieldName, ShapeName, Shaped};
use std::collections::HashMap;

/// Translation of one external member to internal members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    /// Client-visible member name
    pub external_name: FieldName,
    /// Internal member names, in sort priority order
    pub internal_names: Vec<FieldName>,
    /// Invert the requested direction for every internal member
    pub reverse_sort: bool,
}

impl PropertyMapping {
    /// Create a mapping that keeps the requested direction.
    pub fn new<I, S>(external_name: impl Into<FieldName>, internal_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldName>,
    {
        Self {
            external_name: external_name.into(),
            internal_names: internal_names.into_iter().map(Into::into).collect(),
            reverse_sort: false,
        }
    }

    /// Create a mapping onto a member with the same name.
    pub fn identity(name: impl Into<FieldName>) -> Self {
        let name = name.into();
        Self::new(name.clone(), [name])
    }

    /// Builder-style method to invert the sort direction.
    pub fn reversed(mut self) -> Self {
        self.reverse_sort = true;
        self
    }
}

/// The mapping table for one (external, internal) shape pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMappings {
    entries: HashMap<String, PropertyMapping>,
}

impl PropertyMappings {
    /// Build a table, rejecting empty and duplicate entries.
    pub fn new(
        external: &str,
        internal: &str,
        entries: impl IntoIterator<Item = PropertyMapping>,
    ) -> Result<Self> {
        let mut table = HashMap::new();

        for entry in entries {
            if entry.internal_names.is_empty() {
                return Err(Error::EmptyMapping(entry.external_name));
            }

            let key = names::normalize(&entry.external_name);
            if table.contains_key(&key) {
                return Err(Error::DuplicateMapping {
                    external: external.to_string(),
                    internal: internal.to_string(),
                    external_name: entry.external_name,
                });
            }
            table.insert(key, entry);
        }

        Ok(Self { entries: table })
    }

    /// Look up an external name, ignoring case.
    pub fn get(&self, external_name: &str) -> Option<&PropertyMapping> {
        self.entries.get(&names::normalize(external_name))
    }

    /// Whether an external name is mapped, ignoring case.
    pub fn contains(&self, external_name: &str) -> bool {
        self.get(external_name).is_some()
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyMapping> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every name in a comma separated list is mapped.
    ///
    /// Accepts `orderBy` clauses: anything after the first space of a token
    /// is ignored. A blank list is always valid.
    pub fn validate(&self, fields: Option<&str>) -> Result<()> {
        let Some(list) = fields else {
            return Ok(());
        };

        for name in names::split_member_names(list)? {
            if !self.contains(name) {
                return Err(Error::UnknownSortField(name.to_string()));
            }
        }

        Ok(())
    }

    /// Boolean form of [`PropertyMappings::validate`].
    pub fn valid_mapping_exists_for(&self, fields: Option<&str>) -> bool {
        self.validate(fields).is_ok()
    }
}

/// All property mappings of the process, keyed by shape pair.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PropertyMappingRegistry {
    mappings: HashMap<(ShapeName, ShapeName), PropertyMappings>,
}

impl PropertyMappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the mappings for a shape pair by name.
    ///
    /// Registering the same pair twice replaces the earlier table.
    pub fn register(
        &mut self,
        external: impl Into<ShapeName>,
        internal: impl Into<ShapeName>,
        entries: impl IntoIterator<Item = PropertyMapping>,
    ) -> Result<&mut Self> {
        let external = external.into();
        let internal = internal.into();
        let table = PropertyMappings::new(&external, &internal, entries)?;
        self.mappings.insert((external, internal), table);
        Ok(self)
    }

    /// Register the mappings from `E` to `I`.
    ///
    /// Every internal name must be a declared member of `I`.
    pub fn register_for<E: Shaped, I: Shaped>(
        &mut self,
        entries: impl IntoIterator<Item = PropertyMapping>,
    ) -> Result<&mut Self> {
        let internal = I::shape();
        let entries: Vec<_> = entries.into_iter().collect();

        for entry in &entries {
            for name in &entry.internal_names {
                if internal.get(name).is_none() {
                    return Err(Error::UnknownInternalField {
                        shape: internal.name().to_string(),
                        field: name.clone(),
                    });
                }
            }
        }

        self.register(E::shape().name(), internal.name(), entries)
    }

    /// Get the mapping table for a shape pair by name.
    pub fn lookup(&self, external: &str, internal: &str) -> Result<&PropertyMappings> {
        self.mappings
            .get(&(external.to_string(), internal.to_string()))
            .ok_or_else(|| Error::MappingNotFound {
                external: external.to_string(),
                internal: internal.to_string(),
            })
    }

    /// Get the mapping table from `E` to `I`.
    pub fn mappings<E: Shaped, I: Shaped>(&self) -> Result<&PropertyMappings> {
        self.lookup(E::shape().name(), I::shape().name())
    }

    /// Check a comma separated list against the mapping from `E` to `I`.
    ///
    /// A missing mapping is a configuration error and is returned as `Err`
    /// even for blank input; otherwise the answer is `Ok(true)` when every
    /// name is mapped.
    pub fn valid_mapping_exists_for<E: Shaped, I: Shaped>(
        &self,
        fields: Option<&str>,
    ) -> Result<bool> {
        let table = self.mappings::<E, I>()?;
        Ok(table.valid_mapping_exists_for(fields))
    }
}
