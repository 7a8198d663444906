//! Tool argument objects.
//!
//! Every tool takes a JSON object. Optional `limit` is clamped later;
//! optional `format` defaults to text.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::render::ResponseFormat;

/// A limit as callers actually send it: `5`, `5.0` or `"5"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an optional limit, accepting numeric strings and whole or
/// fractional numbers. Fractions are truncated; clamping happens later.
fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawLimit>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let limit = match raw {
        RawLimit::Int(n) => n,
        RawLimit::Float(n) => n.trunc() as i64,
        RawLimit::Text(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(n) => n,
                Err(_) => s
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n.trunc() as i64)
                    .ok_or_else(|| D::Error::custom(format!("limit {s:?} is not a number")))?,
            }
        }
    };
    Ok(Some(limit))
}

#[derive(Debug, Deserialize)]
pub struct RailArrivalArgs {
    /// Station name, with or without the 역 suffix
    pub station: String,
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct RailStatusArgs {
    /// Line filter, e.g. "2호선" or "2"; every core line when absent
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct BusArrivalArgs {
    /// 5-digit stop number
    pub stop_id: String,
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct StopSearchArgs {
    /// Stop name fragment or 5-digit stop number
    pub query: String,
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct BikeSearchArgs {
    /// Station name fragment
    pub query: String,
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
pub struct LocationArgs {
    /// Station or place name
    pub location: String,
    #[serde(default)]
    pub format: ResponseFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn limit_of(value: serde_json::Value) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_value::<StopSearchArgs>(json!({ "query": "강남", "limit": value }))
            .map(|args| args.limit)
    }

    #[test]
    fn limit_accepts_numbers_and_numeric_strings() {
        assert_eq!(limit_of(json!(5)).unwrap(), Some(5));
        assert_eq!(limit_of(json!(5.0)).unwrap(), Some(5));
        assert_eq!(limit_of(json!(7.9)).unwrap(), Some(7));
        assert_eq!(limit_of(json!("5")).unwrap(), Some(5));
        assert_eq!(limit_of(json!(" 12 ")).unwrap(), Some(12));
        assert_eq!(limit_of(json!("3.0")).unwrap(), Some(3));
        assert_eq!(limit_of(json!(-4)).unwrap(), Some(-4));
        assert_eq!(limit_of(json!(null)).unwrap(), None);
    }

    #[test]
    fn missing_limit_is_none() {
        let args: BikeSearchArgs = serde_json::from_value(json!({ "query": "망원" })).unwrap();
        assert_eq!(args.limit, None);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert!(limit_of(json!("many")).is_err());
        assert!(limit_of(json!(true)).is_err());
        assert!(limit_of(json!([5])).is_err());
    }
}
