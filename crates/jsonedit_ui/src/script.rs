// JavaScript snippets evaluated in the webview to drive Ace.
//
// Live editors are kept in `window.__jsonedit`, keyed by container id. Every
// snippet looks its editor up first and does nothing when it is gone, so
// calls that race with `destroy` are harmless. Strings from Rust are always
// embedded as JSON literals.
use jsonedit_core::{ContainerId, CursorHint};
use serde_json::Value;

/// Module name of the light theme registered by [`bootstrap`].
pub const THEME_NAME: &str = "ace/theme/jsoneditor";

const THEME_CSS: &str = "\
.ace-jsoneditor.ace_editor { font-family: 'dejavu sans mono', 'droid sans mono', consolas, monaco, monospace; line-height: 1.3; background-color: #fff; }
.ace-jsoneditor .ace_gutter { background: #ebebeb; color: #333; }
.ace-jsoneditor .ace_gutter-active-line { background-color: #dcdcdc; }
.ace-jsoneditor .ace_print-margin { width: 1px; background: #e8e8e8; }
.ace-jsoneditor .ace_scroller { background-color: #fff; }
.ace-jsoneditor .ace_text-layer { color: gray; }
.ace-jsoneditor .ace_cursor { border-left: 2px solid #000; }
.ace-jsoneditor .ace_marker-layer .ace_selection { background: lightgray; }
.ace-jsoneditor .ace_marker-layer .ace_active-line { background: #efefef; }
.ace-jsoneditor .ace_marker-layer .ace_bracket { margin: -1px 0 0 -1px; border: 1px solid #bfbfbf; }
.ace-jsoneditor .ace_variable { color: #1a1a1a; }
.ace-jsoneditor .ace_string { color: #006000; }
.ace-jsoneditor .ace_constant.ace_numeric { color: #ee422e; }
.ace-jsoneditor .ace_constant.ace_language { color: #ff8c00; }
.ace-jsoneditor .ace_paren { color: #333; }
.ace-jsoneditor .ace_invalid { color: #fff; background-color: #ff002a; }
";

/// Registers [`THEME_NAME`] with Ace's module loader once per window, so
/// `setTheme` resolves it without fetching a `theme-jsoneditor.js` file.
pub fn define_theme() -> String {
    format!(
        r#"
        if (!window.__jsoneditTheme) {{
            const define = window.ace.define || window.define;
            define({name}, ['require', 'exports', 'module', 'ace/lib/dom'], function (require, exports) {{
                exports.isDark = false;
                exports.cssClass = 'ace-jsoneditor';
                exports.cssText = {css};
                require('ace/lib/dom').importCssString(exports.cssText, exports.cssClass, false);
            }});
            window.__jsoneditTheme = true;
        }}
        "#,
        name = literal(THEME_NAME),
        css = literal(THEME_CSS),
    )
}

/// Creates the editor inside the container and reports back over the eval
/// channel: `ready`, `unavailable`, then one `change` per user edit. Each
/// `change` carries the revision of the last value pushed from Rust.
pub fn bootstrap(container: &ContainerId) -> String {
    format!(
        r#"
        const id = {id};
        const container = document.getElementById(id);

        if (!window.ace || !window.ace.edit || !container) {{
            dioxus.send({{ type: 'unavailable' }});
        }} else {{
            window.__jsonedit = window.__jsonedit || {{}};
            {theme}

            const editor = window.ace.edit(container);
            editor.$blockScrolling = Infinity;
            editor.__jsoneditSetting = false;
            editor.__jsoneditRevision = 0;

            // Writes coming from Rust are already known there; only report user edits.
            editor.on('change', function () {{
                if (editor.__jsoneditSetting) {{
                    return;
                }}
                dioxus.send({{ type: 'change', value: editor.getValue(), revision: editor.__jsoneditRevision }});
            }});

            window.__jsonedit[id] = editor;
            dioxus.send({{ type: 'ready' }});
        }}
        "#,
        id = literal(container.as_str()),
        theme = define_theme(),
    )
}

/// Calls `editor.<method>(args...)`; `method` may be a path such as
/// `getSession().setTabSize`.
pub fn editor_call(container: &ContainerId, method: &str, args: &[Value]) -> String {
    let args = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    with_editor(container, &format!("editor.{method}({args});"))
}

/// Replaces the whole document without echoing a `change` message back.
/// User edits after this point report `revision`.
pub fn set_value(container: &ContainerId, text: &str, cursor: CursorHint, revision: u64) -> String {
    with_editor(
        container,
        &format!(
            "editor.__jsoneditRevision = {revision}; \
             editor.__jsoneditSetting = true; \
             try {{ editor.setValue({text}, {cursor}); }} \
             finally {{ editor.__jsoneditSetting = false; }}",
            text = literal(text),
            cursor = cursor.as_ace(),
        ),
    )
}

pub fn destroy(container: &ContainerId) -> String {
    with_editor(
        container,
        &format!(
            "editor.destroy(); delete window.__jsonedit[{id}];",
            id = literal(container.as_str())
        ),
    )
}

fn with_editor(container: &ContainerId, body: &str) -> String {
    format!(
        "(function () {{ \
            const editor = window.__jsonedit && window.__jsonedit[{id}]; \
            if (!editor) {{ return; }} \
            {body} \
        }})();",
        id = literal(container.as_str()),
    )
}

fn literal(text: &str) -> String {
    Value::from(text).to_string()
}
