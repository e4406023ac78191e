//! Serialization and known-defect fixups
//!
//! Some published templates were produced by a serializer that wrote empty
//! `children` collections as `""` and nested template references as
//! stringified objects or type names (`"@{settingValueTemplateId=...}"`,
//! `"System.Object[]"`). Intune rejects both. The fixups are plain text
//! substitutions run over the finished JSON.

use crate::error::Result;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static EMPTY_CHILDREN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""children"(\s*):(\s*)"""#).expect("static regex")
});

static TEMPLATE_REFERENCE_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""settingValueTemplateReference"(\s*):(\s*)"((?:[^"\\]|\\.)*)""#)
        .expect("static regex")
});

static SYSTEM_TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^System(?:\.[A-Za-z0-9_`]+)+(?:\[\])?$").expect("static regex"));

/// Pretty-print a category document, optionally patching known artifacts
pub fn serialize(document: &Value, apply_known_defect_fixups: bool) -> Result<String> {
    let text = serde_json::to_string_pretty(document)?;

    if apply_known_defect_fixups {
        Ok(apply_fixups(&text))
    } else {
        Ok(text)
    }
}

/// Rewrite `"children": ""` to `[]` and stringified template references to `null`
pub fn apply_fixups(text: &str) -> String {
    let text = EMPTY_CHILDREN.replace_all(text, r#""children"${1}:${2}[]"#);
    TEMPLATE_REFERENCE_STRING
        .replace_all(&text, |caps: &Captures| {
            if is_stringified_structure(&caps[3]) {
                format!("\"settingValueTemplateReference\"{}:{}null", &caps[1], &caps[2])
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Whether the raw contents of a JSON string literal spell out an object or array
fn is_stringified_structure(literal: &str) -> bool {
    let Ok(content) = serde_json::from_str::<String>(&format!("\"{}\"", literal)) else {
        return false;
    };
    let content = content.trim();

    if SYSTEM_TYPE_NAME.is_match(content) {
        return true;
    }

    let inner = if let Some(rest) = content.strip_prefix("@{").or_else(|| content.strip_prefix('{')) {
        rest.strip_suffix('}')
    } else if let Some(rest) = content.strip_prefix('[') {
        rest.strip_suffix(']')
    } else {
        None
    };

    inner.is_some_and(|inner| !inner.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_children_becomes_array() {
        let text = r#"{"a": {"children": ""}, "b": {"children": [{"x": 1}]}, "c": {"children": []}}"#;
        assert_eq!(
            apply_fixups(text),
            r#"{"a": {"children": []}, "b": {"children": [{"x": 1}]}, "c": {"children": []}}"#
        );
    }

    #[test]
    fn test_stringified_template_reference_becomes_null() {
        let text = concat!(
            r#"{"settingValueTemplateReference": "@{settingValueTemplateId=abc; useTemplateDefault=False}","#,
            r#" "other": {"settingValueTemplateReference":"System.Collections.Hashtable"},"#,
            r#" "kept": {"settingValueTemplateReference": {"settingValueTemplateId": "abc"}},"#,
            r#" "empty": {"settingValueTemplateReference": ""}}"#
        );
        let fixed = apply_fixups(text);

        assert!(fixed.starts_with(r#"{"settingValueTemplateReference": null,"#));
        assert!(fixed.contains(r#"{"settingValueTemplateReference":null}"#));
        assert!(fixed.contains(r#""settingValueTemplateId": "abc""#));
        assert!(fixed.contains(r#""empty": {"settingValueTemplateReference": ""}"#));
    }

    #[test]
    fn test_empty_children_with_irregular_whitespace() {
        let text = "{\"children\" :\t\"\", \"next\": {\"children\"\n  :  \"\"}}";
        assert_eq!(
            apply_fixups(text),
            "{\"children\" :\t[], \"next\": {\"children\"\n  :  []}}"
        );
    }

    #[test]
    fn test_json_stringified_template_reference_becomes_null() {
        let doc = json!({
            "settingValueTemplateReference":
                "{\"settingValueTemplateId\":\"abc\",\"useTemplateDefault\":false}"
        });
        let text = serialize(&doc, true).unwrap();

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["settingValueTemplateReference"], Value::Null);
    }

    #[test]
    fn test_stringified_array_type_becomes_null() {
        assert_eq!(
            apply_fixups(r#"{"settingValueTemplateReference": "System.Object[]"}"#),
            r#"{"settingValueTemplateReference": null}"#
        );
    }

    #[test]
    fn test_plain_or_empty_template_reference_strings_are_kept() {
        for value in ["", "{}", "@{}", "[]", "abc-123", "Systematic"] {
            let doc = json!({ "settingValueTemplateReference": value });
            let text = serialize(&doc, true).unwrap();
            let parsed: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(parsed, doc, "value {value:?} should be left alone");
        }
    }

    #[test]
    fn test_fixups_are_idempotent() {
        let doc = json!({
            "settings": [{
                "settingInstance": {
                    "settingDefinitionId": "edge_x",
                    "settingInstanceTemplateReference": null,
                    "choiceSettingValue": {
                        "value": "edge_x_1",
                        "children": "",
                        "settingValueTemplateReference": "@{settingValueTemplateId=1}"
                    }
                }
            }]
        });
        let once = serialize(&doc, true).unwrap();
        assert_eq!(apply_fixups(&once), once);

        let parsed: Value = serde_json::from_str(&once).unwrap();
        let value = &parsed["settings"][0]["settingInstance"]["choiceSettingValue"];
        assert_eq!(value["children"], json!([]));
        assert_eq!(value["settingValueTemplateReference"], Value::Null);
    }

    #[test]
    fn test_no_fixups_when_disabled() {
        let doc = json!({"children": ""});
        assert_eq!(serialize(&doc, false).unwrap(), "{\n  \"children\": \"\"\n}");
    }

    #[test]
    fn test_escaped_text_is_untouched() {
        let doc = json!({"description": "set \"children\": \"\" to clear"});
        let text = serialize(&doc, true).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_deep_nesting_survives() {
        let mut value = json!({"settingDefinitionId": "leaf"});
        for depth in 0..16 {
            value = json!({"level": depth, "children": [value]});
        }

        let text = serialize(&value, true).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
        assert!(text.contains("\"leaf\""));
    }
}
