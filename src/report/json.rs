//! JSON output for reports.
//!
//! Serializes report rows for scripting and piping.

use serde::Serialize;

pub fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| String::from("{}"))
}
