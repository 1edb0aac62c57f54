//! Lenient deserializers for request payloads.
//!
//! Browser forms send integers as either JSON numbers or numeric strings and
//! dates as `YYYY-MM-DD` strings that may be empty. Fields that distinguish
//! "key absent" from "key present" are `Option<Option<T>>` with
//! `#[serde(default)]`: absent stays `None`, present becomes `Some(..)`.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Wire date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

fn number_to_i64<E: de::Error>(raw: NumberOrString) -> Result<Option<i64>, E> {
    match raw {
        NumberOrString::Int(v) => Ok(Some(v)),
        NumberOrString::Float(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
        NumberOrString::Float(v) => Err(E::custom(format!("expected an integer, got {v}"))),
        NumberOrString::Str(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected an integer, got '{s}'")))
        }
    }
}

/// Required integer accepting `5` or `"5"`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?;
    number_to_i64::<D::Error>(raw)?.ok_or_else(|| de::Error::custom("expected an integer, got ''"))
}

/// Optional integer; `null` and `""` read as `None`.
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(raw) => number_to_i64::<D::Error>(raw),
        None => Ok(None),
    }
}

/// Present-or-absent integer; `null` and `""` mean "clear".
pub fn lenient_double_i64<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_i64(deserializer).map(Some)
}

/// Present-or-absent value; `null` means "clear".
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// String where `null` reads as empty.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a `YYYY-MM-DD` date, treating empty and malformed input as `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(value = %raw, "ignoring malformed date");
            None
        }
    }
}

/// Date that never fails: `null`, `""` and malformed text all read as `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

/// Present-or-absent date. Once the key is present, anything that is not a
/// valid date clears the stored value.
pub fn lenient_double_date<'de, D>(deserializer: D) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_date(deserializer).map(Some)
}

/// List of ids where each entry may be a number or numeric string.
pub fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<NumberOrString>>::deserialize(deserializer)?.unwrap_or_default();
    let mut ids = Vec::with_capacity(raw.len());
    for entry in raw {
        if let Some(id) = number_to_i64::<D::Error>(entry)? {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Present-or-absent id list; `null` reads as an empty list.
pub fn lenient_opt_id_list<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_id_list(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_opt_i64")]
        score: Option<i64>,
        #[serde(default, deserialize_with = "lenient_double_date")]
        due: Option<Option<NaiveDate>>,
        #[serde(default, deserialize_with = "lenient_id_list")]
        ids: Vec<i64>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn integers_accept_numbers_and_strings() {
        assert_eq!(sample(r#"{"score": 7}"#).score, Some(7));
        assert_eq!(sample(r#"{"score": "8"}"#).score, Some(8));
        assert_eq!(sample(r#"{"score": 4.0}"#).score, Some(4));
        assert_eq!(sample(r#"{"score": ""}"#).score, None);
        assert_eq!(sample(r#"{}"#).score, None);
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        assert!(serde_json::from_str::<Sample>(r#"{"score": "high"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"score": 2.5}"#).is_err());
    }

    #[test]
    fn date_presence_is_tracked() {
        assert_eq!(sample(r#"{}"#).due, None);
        assert_eq!(sample(r#"{"due": null}"#).due, Some(None));
        assert_eq!(sample(r#"{"due": ""}"#).due, Some(None));
        assert_eq!(sample(r#"{"due": "31/12/2024"}"#).due, Some(None));
        assert_eq!(
            sample(r#"{"due": "2024-12-31"}"#).due,
            Some(NaiveDate::from_ymd_opt(2024, 12, 31))
        );
    }

    #[test]
    fn id_lists_mix_numbers_and_strings() {
        assert_eq!(sample(r#"{"ids": [1, "2", " 3 "]}"#).ids, vec![1, 2, 3]);
        assert!(sample(r#"{"ids": null}"#).ids.is_empty());
    }
}
