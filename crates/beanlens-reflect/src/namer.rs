//! JavaBeans-style accessor naming: `getName` / `isActive` / `setName` to property names.

use crate::error::{ReflectionError, Result};

/// Strip the accessor prefix from `name` and lower-case the first remaining character.
///
/// `isFoo` is checked before `getFoo` / `setFoo`. The rest of the name keeps its casing, so
/// `getURL` becomes `uRL`.
pub fn method_to_property(name: &str) -> Result<String> {
    let rest = if let Some(rest) = name.strip_prefix("is") {
        rest
    } else if let Some(rest) = name
        .strip_prefix("get")
        .or_else(|| name.strip_prefix("set"))
    {
        rest
    } else {
        return Err(ReflectionError::InvalidAccessorName(name.to_string()));
    };

    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Ok(String::new());
    };
    let mut out = String::with_capacity(rest.len());
    out.extend(first.to_lowercase());
    out.push_str(chars.as_str());
    Ok(out)
}

/// `true` for any name with a getter or setter shape.
pub fn is_property(name: &str) -> bool {
    is_getter(name) || is_setter(name)
}

pub fn is_getter(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

pub fn is_setter(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}
