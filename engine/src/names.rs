//! Parsing of comma separated member name lists.
//!
//! Both `fields` and `orderBy` are lists of member names. Tokens are trimmed
//! and everything from the first space onward is dropped, so an `orderBy`
//! clause such as `name desc` resolves to the member `name`.

use crate::{error::Result, Error};

/// Extract the member name from a single list token.
///
/// Returns `None` for a token that is empty after trimming.
pub fn member_name(token: &str) -> Option<&str> {
    let trimmed = token.trim();
    let name = match trimmed.find(' ') {
        Some(index) => &trimmed[..index],
        None => trimmed,
    };
    (!name.is_empty()).then_some(name)
}

/// Split a list into member names.
///
/// A blank list yields no names. An empty token between commas is rejected.
pub fn split_member_names(list: &str) -> Result<Vec<&str>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(',')
        .map(|token| member_name(token).ok_or(Error::EmptyFieldName))
        .collect()
}

/// Normalize a member name into the key used for case-insensitive lookups.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}
