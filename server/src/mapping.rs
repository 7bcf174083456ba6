//! Property mappings between client-facing and stored shapes.

use shape_engine::{PropertyMapping, PropertyMappingRegistry};

use crate::models::{Contact, ContactDto};

/// Build the registry used by every request.
///
/// Fails when a mapping targets a member the stored shape does not declare.
pub fn build_registry() -> shape_engine::error::Result<PropertyMappingRegistry> {
    let mut registry = PropertyMappingRegistry::new();

    registry.register_for::<ContactDto, Contact>([
        PropertyMapping::identity("Id"),
        PropertyMapping::new("Name", ["FirstName", "LastName"]),
        PropertyMapping::identity("FirstName"),
        PropertyMapping::identity("LastName"),
        PropertyMapping::identity("Phone"),
        PropertyMapping::identity("Email"),
    ])?;

    Ok(registry)
}
