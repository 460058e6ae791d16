use std::io::Write;

use jsonedit_core::{EditorOptions, OptionsError};

#[test]
fn test_partial_json_overrides_only_given_fields() {
    let options = EditorOptions::from_json(r#"{ "font_size": 16, "theme": "ace/theme/monokai" }"#)
        .expect("valid options");

    assert_eq!(options.font_size, 16);
    assert_eq!(options.theme, "ace/theme/monokai");
    assert_eq!(options.mode, "ace/mode/json");
    assert_eq!(options.default_tab_size, 2);
    assert_eq!(options.unbound_keys, vec!["Ctrl-L", "Command-L"]);
}

#[test]
fn test_empty_object_gives_defaults() {
    let options = EditorOptions::from_json("{}").expect("valid options");
    assert_eq!(options, EditorOptions::default());
}

#[test]
fn test_rejects_zero_font_size() {
    let err = EditorOptions::from_json(r#"{ "font_size": 0 }"#).unwrap_err();
    assert!(matches!(err, OptionsError::Invalid(_)));
}

#[test]
fn test_rejects_blank_mode() {
    let err = EditorOptions::from_json(r#"{ "mode": "  " }"#).unwrap_err();
    assert!(matches!(err, OptionsError::Invalid(_)));
}

#[test]
fn test_rejects_malformed_json() {
    let err = EditorOptions::from_json("{ font_size: }").unwrap_err();
    assert!(matches!(err, OptionsError::Json(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "use_wrap_mode": false, "default_tab_size": 4 }}"#).expect("write options");

    let options = EditorOptions::load(file.path()).expect("load options");
    assert!(!options.use_wrap_mode);
    assert_eq!(options.default_tab_size, 4);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = EditorOptions::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, OptionsError::Io(_)));
}

#[test]
fn test_tab_size_for_prefers_positive_indentation() {
    let options = EditorOptions::default();
    assert_eq!(options.tab_size_for(None), 2);
    assert_eq!(options.tab_size_for(Some(0)), 2);
    assert_eq!(options.tab_size_for(Some(4)), 4);
}
