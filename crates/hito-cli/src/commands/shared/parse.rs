use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use hito_core::calendar::{Period, parse_date, parse_time};
use hito_core::enums::ReasonCode;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_date_arg(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    parse_date(raw).with_context(|| format!("invalid {field} '{raw}', expected YYYY-MM-DD"))
}

pub fn parse_time_arg(raw: &str) -> anyhow::Result<NaiveTime> {
    parse_time(raw).with_context(|| format!("invalid time '{raw}', expected HH:MM"))
}

pub fn parse_period(raw: Option<&str>) -> anyhow::Result<Option<Period>> {
    raw.map(str::parse::<Period>)
        .transpose()
        .map_err(anyhow::Error::from)
}

/// A missing code is passed through so the commit can refuse it.
pub fn parse_reason(code: Option<u8>) -> anyhow::Result<Option<ReasonCode>> {
    code.map(ReasonCode::from_code)
        .transpose()
        .map_err(anyhow::Error::from)
}
