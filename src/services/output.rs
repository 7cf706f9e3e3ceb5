use crate::domain::models::JsonOut;
use serde::Serialize;
use serde_json::Value;

/// Prints the value at a resolved config path. An unresolved path prints
/// the JSON `null` sentinel rather than failing.
pub fn print_value(json: bool, value: Option<&Value>) -> anyhow::Result<()> {
    let v = value.unwrap_or(&Value::Null);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data: v })?
        );
    } else {
        println!("{}", serde_json::to_string_pretty(v)?);
    }
    Ok(())
}

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}
