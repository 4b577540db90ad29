/*
 *  deutils.rs
 *
 *  LyricDeck - sing along on the key strip
 *  (c) 2020-26 Stuart Hunter
 *
 *  Lenient deserializers for host pushed settings and positions
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

// Every helper here yields None instead of failing: a bad value must only
// cost that one field its setting, never the whole message.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_as_i64(v: &Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    if v.is_null() {
        return Ok(None);
    }
    let s = v.to_string().trim_matches('"').trim().to_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "y" | "t" => Ok(Some(true)),
        "0" | "false" | "no" | "n" | "f" => Ok(Some(false)),
        _ => {
            warn!("ignoring non-boolean setting {}", v);
            Ok(None)
        }
    }
}

pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    if v.is_null() {
        return Ok(None);
    }
    let n = value_as_i64(&v);
    if n.is_none() {
        warn!("ignoring non-integer value {}", v);
    }
    Ok(n)
}

pub fn deserialize_lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let n = deserialize_lenient_i64(deserializer)?;
    Ok(n.and_then(|n| i32::try_from(n).ok()))
}

/// Strings pass through, numbers and booleans are stringified.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            warn!("ignoring non-scalar value {}", other);
            None
        }
    })
}

/// Like `deserialize_lenient_string`, with null or garbage read as "".
pub fn deserialize_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_lenient_string(deserializer)?.unwrap_or_default())
}

/// Formats milliseconds as "M:SS", the way the host shows track time.
pub fn millis_to_ms_string(ms: i64) -> String {
    if ms <= 0 {
        return "0:00".to_string();
    }
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
