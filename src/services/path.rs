use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum PathError {
    #[error("cannot set `{0}`: parent is not an object or array")]
    InvalidTarget(String),
}

pub fn split_path(raw: &str) -> Vec<String> {
    raw.split('.').map(|s| s.to_string()).collect()
}

/// Walks the document one key at a time: objects by field name, arrays by
/// decimal index. Any miss returns `None` immediately; an empty segment
/// list returns the document itself.
pub fn resolve<'a>(doc: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for key in segments {
        current = step(current, key)?;
    }
    Some(current)
}

pub fn resolve_mut<'a>(doc: &'a mut Value, segments: &[String]) -> Option<&'a mut Value> {
    let mut current = doc;
    for key in segments {
        current = match current {
            Value::Object(map) => map.get_mut(key)?,
            Value::Array(items) => items.get_mut(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => items.get(key.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Interprets a raw CLI value: JSON if it parses, otherwise the literal
/// string. `set counters.hits 42` stores a number; `set owner.name bob`
/// stores the string `"bob"`.
pub fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Assigns `raw` at the dotted path. All but the last segment must resolve
/// to a container; array parents take a decimal index, where `len` appends
/// and anything past it is rejected. The document is untouched on error.
pub fn assign(doc: &mut Value, segments: &[String], raw: &str) -> Result<(), PathError> {
    let invalid = || PathError::InvalidTarget(segments.join("."));
    let (final_key, parent_path) = segments.split_last().ok_or_else(invalid)?;
    let parent = resolve_mut(doc, parent_path).ok_or_else(invalid)?;
    let value = parse_literal(raw);
    match parent {
        Value::Object(map) => {
            map.insert(final_key.clone(), value);
        }
        Value::Array(items) => {
            let idx: usize = final_key.parse().map_err(|_| invalid())?;
            if idx < items.len() {
                items[idx] = value;
            } else if idx == items.len() {
                items.push(value);
            } else {
                return Err(invalid());
            }
        }
        _ => return Err(invalid()),
    }
    Ok(())
}
