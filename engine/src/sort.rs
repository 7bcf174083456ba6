//! Translation of `orderBy` expressions into sort keys, and in-memory sorting.
//!
//! An `orderBy` expression is a comma separated list of clauses, each an
//! external member name optionally followed by a direction. A clause is
//! descending only when the trimmed clause ends with the exact text `" desc"`.

use crate::{error::Result, names, Error, FieldName, PropertyMappings, Shape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction of a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// One internal member to sort by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    /// Internal member name
    pub field: FieldName,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(field: impl Into<FieldName>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<FieldName>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }
}

/// Translate an `orderBy` expression into sort keys.
///
/// Keys come back in priority order: the first clause first, and within a
/// clause the mapping's internal names in their listed order. A mapping with
/// `reverse_sort` inverts the clause direction for all of its internal
/// names. A blank expression yields no keys.
pub fn translate_order_by(
    order_by: Option<&str>,
    mappings: &PropertyMappings,
) -> Result<Vec<SortKey>> {
    let Some(order_by) = order_by.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let mut keys = Vec::new();

    for clause in order_by.split(',') {
        let clause = clause.trim();
        let descending = clause.ends_with(" desc");
        let name = names::member_name(clause).ok_or(Error::EmptyFieldName)?;

        let mapping = mappings
            .get(name)
            .ok_or_else(|| Error::UnknownSortField(name.to_string()))?;

        let mut direction = if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        if mapping.reverse_sort {
            direction = direction.reverse();
        }

        keys.extend(mapping.internal_names.iter().map(|field| SortKey {
            field: field.clone(),
            direction,
        }));
    }

    Ok(keys)
}

/// Sort records in place by keys given in priority order.
///
/// The sort is stable, so records equal on every key keep their input order.
/// This is the same ordering produced by applying each key as its own stable
/// sort from the lowest priority key to the highest.
pub fn apply_sort<T>(records: &mut [T], keys: &[SortKey], shape: &Shape<T>) -> Result<()> {
    sort_by_key_fn(records, keys, shape, |record| record)
}

/// Sort a sequence of items that each expose a record of shape `T`.
pub(crate) fn sort_by_key_fn<T, R, F>(
    items: &mut [R],
    keys: &[SortKey],
    shape: &Shape<T>,
    record: F,
) -> Result<()>
where
    F: Fn(&R) -> &T,
{
    if keys.is_empty() {
        return Ok(());
    }

    let mut fields = Vec::with_capacity(keys.len());
    let mut directions = Vec::with_capacity(keys.len());
    for key in keys {
        let field = shape
            .get(&key.field)
            .ok_or_else(|| Error::UnknownInternalField {
                shape: shape.name().to_string(),
                field: key.field.clone(),
            })?;
        fields.push(field);
        directions.push(key.direction);
    }

    // Key values are read once per item, not once per comparison.
    items.sort_by_cached_key(|item| {
        let current = record(item);
        CachedKey {
            values: fields.iter().map(|field| field.value(current)).collect(),
            directions: &directions,
        }
    });

    Ok(())
}

/// Precomputed sort values of one item.
struct CachedKey<'a> {
    values: Vec<Value>,
    directions: &'a [SortDirection],
}

impl Ord for CachedKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values
            .iter()
            .zip(&other.values)
            .zip(self.directions)
            .map(|((a, b), direction)| direction.apply(compare_values(a, b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for CachedKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CachedKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CachedKey<'_> {}

/// Total order over JSON values used for sorting.
///
/// Values of different kinds order as null, bool, number, string, array,
/// object. Numbers compare numerically, strings by code point.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a.cmp(&b)
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a.cmp(&b)
            } else {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b)
            .map(|(a, b)| compare_values(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PropertyMapping, Shaped};
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Debug, Clone)]
    struct Person {
        id: i64,
        first_name: &'static str,
        last_name: &'static str,
        age: Option<u32>,
    }

    impl Shaped for Person {
        fn shape() -> &'static Shape<Self> {
            static SHAPE: OnceLock<Shape<Person>> = OnceLock::new();
            SHAPE.get_or_init(|| {
                Shape::<Person>::new("Person")
                    .field("Id", |p| json!(p.id))
                    .field("FirstName", |p| json!(p.first_name))
                    .field("LastName", |p| json!(p.last_name))
                    .field("Age", |p| json!(p.age))
            })
        }
    }

    fn person(id: i64, first_name: &'static str, last_name: &'static str) -> Person {
        Person {
            id,
            first_name,
            last_name,
            age: None,
        }
    }

    fn test_mappings() -> PropertyMappings {
        PropertyMappings::new(
            "PersonView",
            "Person",
            [
                PropertyMapping::identity("Id"),
                PropertyMapping::new("Name", ["FirstName", "LastName"]),
                PropertyMapping::new("Youth", ["Age"]).reversed(),
                PropertyMapping::new("Surname", ["LastName"]),
            ],
        )
        .unwrap()
    }

    fn ids(people: &[Person]) -> Vec<i64> {
        people.iter().map(|p| p.id).collect()
    }

    #[test]
    fn blank_order_by_yields_no_keys() {
        let mappings = test_mappings();
        assert!(translate_order_by(None, &mappings).unwrap().is_empty());
        assert!(translate_order_by(Some(""), &mappings).unwrap().is_empty());
        assert!(translate_order_by(Some("   "), &mappings).unwrap().is_empty());
    }

    #[test]
    fn composite_mapping_expands_in_order() {
        let keys = translate_order_by(Some("name desc,id"), &test_mappings()).unwrap();
        assert_eq!(
            keys,
            vec![
                SortKey::descending("FirstName"),
                SortKey::descending("LastName"),
                SortKey::ascending("Id"),
            ]
        );
    }

    #[test]
    fn direction_token_is_case_sensitive() {
        let mappings = test_mappings();
        let keys = translate_order_by(Some("id DESC"), &mappings).unwrap();
        assert_eq!(keys, vec![SortKey::ascending("Id")]);

        let keys = translate_order_by(Some(" id   desc "), &mappings).unwrap();
        assert_eq!(keys, vec![SortKey::descending("Id")]);

        let keys = translate_order_by(Some("id asc"), &mappings).unwrap();
        assert_eq!(keys, vec![SortKey::ascending("Id")]);
    }

    #[test]
    fn lookup_ignores_case() {
        let keys = translate_order_by(Some("SURNAME"), &test_mappings()).unwrap();
        assert_eq!(keys, vec![SortKey::ascending("LastName")]);
    }

    #[test]
    fn reverse_sort_inverts_direction() {
        let mappings = test_mappings();
        assert_eq!(
            translate_order_by(Some("youth"), &mappings).unwrap(),
            vec![SortKey::descending("Age")]
        );
        assert_eq!(
            translate_order_by(Some("youth desc"), &mappings).unwrap(),
            vec![SortKey::ascending("Age")]
        );
    }

    #[test]
    fn reverse_sort_applies_to_every_internal_field() {
        let mappings = PropertyMappings::new(
            "PersonView",
            "Person",
            [PropertyMapping::new("Name", ["FirstName", "LastName"]).reversed()],
        )
        .unwrap();

        let keys = translate_order_by(Some("name"), &mappings).unwrap();
        assert!(keys.iter().all(SortKey::is_descending));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = translate_order_by(Some("id,nickname desc"), &test_mappings());
        assert_eq!(result, Err(Error::UnknownSortField("nickname".into())));
    }

    #[test]
    fn empty_clause_is_rejected() {
        let result = translate_order_by(Some("id,,name"), &test_mappings());
        assert_eq!(result, Err(Error::EmptyFieldName));

        let result = translate_order_by(Some("id,"), &test_mappings());
        assert_eq!(result, Err(Error::EmptyFieldName));
    }

    #[test]
    fn sort_multi_key_with_ties() {
        let mut people = vec![
            person(1, "Ann", "Zed"),
            person(2, "Bob", "Abe"),
            person(3, "Ann", "Abe"),
            person(4, "Bob", "Abe"),
            person(5, "Cid", "Moe"),
        ];

        let keys = translate_order_by(Some("name desc,id"), &test_mappings()).unwrap();
        apply_sort(&mut people, &keys, Person::shape()).unwrap();

        assert_eq!(ids(&people), vec![5, 2, 4, 1, 3]);
    }

    #[test]
    fn sort_is_stable_for_full_ties() {
        let mut people = vec![
            person(3, "Ann", "Abe"),
            person(1, "Ann", "Abe"),
            person(2, "Ann", "Abe"),
        ];

        apply_sort(&mut people, &[SortKey::ascending("FirstName")], Person::shape()).unwrap();
        assert_eq!(ids(&people), vec![3, 1, 2]);
    }

    #[test]
    fn sort_matches_successive_stable_sorts() {
        let original = vec![
            person(1, "Ann", "Zed"),
            person(2, "Bob", "Abe"),
            person(3, "Ann", "Abe"),
            person(4, "Bob", "Moe"),
            person(5, "Ann", "Zed"),
        ];
        let keys = vec![SortKey::ascending("FirstName"), SortKey::descending("LastName")];

        let mut combined = original.clone();
        apply_sort(&mut combined, &keys, Person::shape()).unwrap();

        let mut successive = original;
        for key in keys.iter().rev() {
            apply_sort(&mut successive, std::slice::from_ref(key), Person::shape()).unwrap();
        }

        assert_eq!(ids(&combined), ids(&successive));
    }

    #[test]
    fn sort_with_no_keys_keeps_order() {
        let mut people = vec![person(2, "B", "B"), person(1, "A", "A")];
        apply_sort(&mut people, &[], Person::shape()).unwrap();
        assert_eq!(ids(&people), vec![2, 1]);
    }

    #[test]
    fn sort_unknown_internal_field_fails() {
        let mut people = vec![person(1, "A", "A")];
        let result = apply_sort(&mut people, &[SortKey::ascending("Height")], Person::shape());
        assert!(matches!(result, Err(Error::UnknownInternalField { field, .. }) if field == "Height"));
    }

    #[test]
    fn nulls_sort_first_ascending() {
        let mut people = vec![
            Person {
                age: Some(30),
                ..person(1, "A", "A")
            },
            person(2, "B", "B"),
            Person {
                age: Some(20),
                ..person(3, "C", "C")
            },
        ];

        apply_sort(&mut people, &[SortKey::ascending("Age")], Person::shape()).unwrap();
        assert_eq!(ids(&people), vec![2, 3, 1]);
    }

    #[test]
    fn sort_reads_each_value_once() {
        use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

        static READS: AtomicUsize = AtomicUsize::new(0);

        struct Counted(i64);

        impl Shaped for Counted {
            fn shape() -> &'static Shape<Self> {
                static SHAPE: OnceLock<Shape<Counted>> = OnceLock::new();
                SHAPE.get_or_init(|| {
                    Shape::<Counted>::new("Counted").field("Value", |c| {
                        READS.fetch_add(1, AtomicOrdering::SeqCst);
                        json!(c.0)
                    })
                })
            }
        }

        let mut items: Vec<Counted> = (0..200).map(|i| Counted((i * 37) % 101)).collect();
        apply_sort(&mut items, &[SortKey::descending("Value")], Counted::shape()).unwrap();

        assert_eq!(READS.load(AtomicOrdering::SeqCst), 200);
        assert!(items.windows(2).all(|w| w[0].0 >= w[1].0));
    }

    #[test]
    fn compare_values_orders_kinds() {
        assert_eq!(compare_values(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!(10), &json!("1")), Ordering::Less);
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare_values(&json!(-1), &json!(u64::MAX)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!([1, 2]), &json!([1])), Ordering::Greater);
    }

    #[test]
    fn direction_display_and_reverse() {
        assert_eq!(SortDirection::Ascending.to_string(), "ascending");
        assert_eq!(SortDirection::Descending.reverse(), SortDirection::Ascending);
    }
}
