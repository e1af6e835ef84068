pub mod compare;
pub mod plan;
pub mod show;

use std::str::FromStr;

/// Parses `key=value` pairs such as `chest=1.5`.
pub fn parse_key_val<T>(s: &str) -> Result<(String, T), String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{}': {}", key, e))?;
    Ok((key.to_string(), value))
}
