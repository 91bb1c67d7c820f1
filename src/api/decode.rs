use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn parse_f64(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}

/// Accept strings, numbers, booleans or null for a text field.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

/// Numbers and numeric strings become `Some`, everything else `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

/// `finalidade` arrives as a single string, a list of strings, or null.
pub fn purposes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let purposes = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        other => {
            let single = value_to_string(&other);
            let single = single.trim();
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single.to_string()]
            }
        }
    };
    Ok(purposes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(value_to_f64(&json!("  42.5 ")), Some(42.5));
        assert_eq!(value_to_f64(&json!(10)), Some(10.0));
        assert_eq!(value_to_f64(&json!("abc")), None);
        assert_eq!(value_to_f64(&json!("NaN")), None);
        assert_eq!(value_to_f64(&Value::Null), None);
    }

    #[test]
    fn strings_render_without_quotes() {
        assert_eq!(value_to_string(&json!("Centro")), "Centro");
        assert_eq!(value_to_string(&json!(12)), "12");
        assert_eq!(value_to_string(&Value::Null), "");
    }
}
