// Helpers for the document shown in the window. The editor itself never
// looks at the text; these only drive the toolbar.
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

pub const INDENT_CHOICES: [u32; 3] = [2, 4, 8];

/// Re-indents `text` with `indent` spaces, keeping key order.
/// `None` when the text is not valid JSON.
pub fn pretty(text: &str, indent: u32) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    let spaces = " ".repeat(indent as usize);
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut serializer).ok()?;
    String::from_utf8(out).ok()
}

/// One-line validity summary for the status bar.
pub fn status(text: &str) -> String {
    if text.trim().is_empty() {
        return "Empty document".to_string();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(_) => "Valid JSON".to_string(),
        Err(err) => format!("Invalid JSON: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_uses_requested_indent_and_keeps_order() {
        let text = pretty(r#"{"b":1,"a":[true]}"#, 4).expect("valid json");
        assert_eq!(text, "{\n    \"b\": 1,\n    \"a\": [\n        true\n    ]\n}");
    }

    #[test]
    fn pretty_rejects_invalid_json() {
        assert_eq!(pretty("{", 2), None);
    }

    #[test]
    fn status_reports_position_of_errors() {
        assert_eq!(status("[1, 2]"), "Valid JSON");
        assert_eq!(status("  "), "Empty document");
        let message = status("{\"a\": }");
        assert!(message.starts_with("Invalid JSON: "));
        assert!(message.contains("line 1"));
    }
}
