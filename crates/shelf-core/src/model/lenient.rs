// ── Tolerant field decoding ──
//
// The remote collections are loosely typed: a year may arrive as `1965`,
// `"1965"` or `""`, and text fields may be `null`. A single odd field must
// never fail the whole record, so these helpers read the raw JSON value and
// map anything unusable to "absent".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::EntityId;

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text that may be `null` or numeric on the wire.
pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// Required text; `null` or a non-text value reads as empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// Reference to another item; anything that is not a string or number is dropped.
pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<EntityId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(EntityId::new(s)),
        Value::Number(n) => Some(EntityId::new(n.to_string())),
        _ => None,
    })
}

/// A year given as a number or a numeric string. Blank, out of range or
/// non-numeric values read as `None`.
pub fn opt_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "opt_year")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "string")]
        title: String,
        #[serde(default, deserialize_with = "opt_string")]
        note: Option<String>,
        #[serde(default, deserialize_with = "opt_id")]
        owner: Option<EntityId>,
    }

    fn read(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn year_accepts_numbers_and_numeric_strings() {
        assert_eq!(read(json!({ "year": 1965 })).year, Some(1965));
        assert_eq!(read(json!({ "year": "1815" })).year, Some(1815));
        assert_eq!(read(json!({ "year": " 2001 " })).year, Some(2001));
    }

    #[test]
    fn unusable_year_reads_as_none() {
        assert_eq!(read(json!({ "year": "" })).year, None);
        assert_eq!(read(json!({ "year": null })).year, None);
        assert_eq!(read(json!({ "year": "soon" })).year, None);
        assert_eq!(read(json!({ "year": 99_999_999_999_i64 })).year, None);
        assert_eq!(read(json!({ "year": [1965] })).year, None);
        assert_eq!(read(json!({})).year, None);
    }

    #[test]
    fn null_text_reads_as_empty_or_none() {
        let rec = read(json!({ "title": null, "note": null }));
        assert_eq!(rec.title, "");
        assert_eq!(rec.note, None);
    }

    #[test]
    fn numeric_text_is_kept_as_string() {
        let rec = read(json!({ "title": 1984, "note": 42 }));
        assert_eq!(rec.title, "1984");
        assert_eq!(rec.note.as_deref(), Some("42"));
    }

    #[test]
    fn reference_accepts_number_or_string_only() {
        assert_eq!(read(json!({ "owner": 3 })).owner, Some(EntityId::from("3")));
        assert_eq!(read(json!({ "owner": "a7" })).owner, Some(EntityId::from("a7")));
        assert_eq!(read(json!({ "owner": "" })).owner, None);
        assert_eq!(read(json!({ "owner": true })).owner, None);
    }
}
