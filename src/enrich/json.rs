use serde_json::{Map, Value};

use crate::core::EnrichmentError;

/// Finds the first balanced `{...}` block in `text`, skipping braces inside
/// JSON strings. Models tend to wrap the object in prose or code fences.
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

pub fn parse_reply(text: &str) -> Result<Map<String, Value>, EnrichmentError> {
    let candidate = find_json_object(text).ok_or(EnrichmentError::MissingJson)?;
    match serde_json::from_str::<Value>(candidate)? {
        Value::Object(map) => Ok(map),
        _ => Err(EnrichmentError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(find_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_wrapped_in_fences_and_prose() {
        let reply = "Sure! Here you go:\n```json\n{\"seoTitle\": \"Kettle\", \"n\": {\"x\": 1}}\n```\nAnything else? {not json}";
        assert_eq!(
            find_json_object(reply),
            Some("{\"seoTitle\": \"Kettle\", \"n\": {\"x\": 1}}")
        );
    }

    #[test]
    fn test_braces_inside_strings() {
        let reply = r#"{"specsHtml": "<p>{size} \"}\" ok</p>", "b": 2} trailing }"#;
        let found = find_json_object(reply).unwrap();
        let map = parse_reply(found).unwrap();
        assert_eq!(map["b"], 2);
    }

    #[test]
    fn test_missing_object() {
        assert_eq!(find_json_object("no json here"), None);
        assert_eq!(find_json_object("{ never closed"), None);
        assert!(matches!(
            parse_reply("I cannot help with that."),
            Err(EnrichmentError::MissingJson)
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_reply("{seoTitle: 'single quotes'}"),
            Err(EnrichmentError::InvalidJson(_))
        ));
    }
}
