pub mod ace_editor;

pub use ace_editor::{AceEditor, FactoryProp, OnLoad};
