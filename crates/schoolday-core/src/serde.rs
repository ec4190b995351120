use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating empty or whitespace-only values as `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Deserializes an optional integer that upstream sometimes sends as a string.
///
/// Empty strings, non-numeric strings and negative values become `None`.
pub fn deserialize_optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(match opt {
        Some(NumberOrString::Number(n)) => u32::try_from(n).ok(),
        Some(NumberOrString::Text(s)) => s.trim().parse::<u32>().ok(),
        None => None,
    })
}

/// Deserializes a list that may be `null` or missing into an empty `Vec`.
pub fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
