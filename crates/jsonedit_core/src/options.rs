use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{OptionsError, OptionsResult};
use crate::widget::Widget;

/// Display settings applied to every widget right after creation.
///
/// The defaults are the JSON editing setup; a JSON file with any subset of
/// these fields overrides just those fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    pub theme: String,
    pub show_print_margin: bool,
    pub font_size: u32,
    pub mode: String,
    /// Tab width used when the host gives no indentation.
    pub default_tab_size: u32,
    pub use_soft_tabs: bool,
    pub use_wrap_mode: bool,
    /// Shortcuts removed from the editor so the browser keeps them
    /// (Ctrl-L / Command-L focus the address bar).
    pub unbound_keys: Vec<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            theme: "ace/theme/jsoneditor".to_string(),
            show_print_margin: false,
            font_size: 13,
            mode: "ace/mode/json".to_string(),
            default_tab_size: 2,
            use_soft_tabs: true,
            use_wrap_mode: true,
            unbound_keys: vec!["Ctrl-L".to_string(), "Command-L".to_string()],
        }
    }
}

impl EditorOptions {
    pub fn from_json(json: &str) -> OptionsResult<Self> {
        let options: EditorOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> OptionsResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> OptionsResult<()> {
        if self.font_size == 0 {
            return Err(OptionsError::Invalid("font_size must be positive".into()));
        }
        if self.default_tab_size == 0 {
            return Err(OptionsError::Invalid("default_tab_size must be positive".into()));
        }
        if self.theme.trim().is_empty() {
            return Err(OptionsError::Invalid("theme must not be empty".into()));
        }
        if self.mode.trim().is_empty() {
            return Err(OptionsError::Invalid("mode must not be empty".into()));
        }
        Ok(())
    }

    /// Host indentation wins over the default; zero counts as absent.
    pub fn tab_size_for(&self, indentation: Option<u32>) -> u32 {
        indentation
            .filter(|size| *size > 0)
            .unwrap_or(self.default_tab_size)
    }

    pub fn apply(&self, widget: &dyn Widget, indentation: Option<u32>) {
        widget.set_theme(&self.theme);
        widget.set_show_print_margin(self.show_print_margin);
        widget.set_font_size(self.font_size);

        let session = widget.session();
        session.set_mode(&self.mode);
        session.set_tab_size(self.tab_size_for(indentation));
        session.set_use_soft_tabs(self.use_soft_tabs);
        session.set_use_wrap_mode(self.use_wrap_mode);

        for key in &self.unbound_keys {
            widget.bind_key(key, None);
        }
    }
}
