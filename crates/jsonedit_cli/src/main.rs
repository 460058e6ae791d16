use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;
use jsonedit_core::EditorOptions;
use jsonedit_ui::AceEditor;
use tracing::info;

mod document;

use document::INDENT_CHOICES;

#[derive(Parser, Debug)]
#[command(name = "jsonedit", version, about = "Edit a JSON document in an Ace editor window", long_about = None)]
struct Cli {
    /// JSON file to open (starts with `{}` when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Tab width in spaces
    #[arg(long, default_value_t = 2)]
    indent: u32,

    /// JSON file overriding the editor display options
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Script URL of the Ace build, relative to the working directory
    #[arg(long, value_name = "URL", default_value = "assets/ace/ace.js")]
    ace_script: String,
}

/// What the window opens with.
#[derive(Clone, Debug, Default)]
struct Session {
    text: String,
    indent: u32,
    options: EditorOptions,
}

// Dioxus `launch()` takes a plain fn pointer, so the session is handed to
// `App` through a thread-local.
thread_local! {
    static LAUNCH_SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let text = match &cli.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => "{}".to_string(),
    };
    let options = match &cli.options {
        Some(path) => EditorOptions::load(path)
            .with_context(|| format!("loading editor options from {}", path.display()))?,
        None => EditorOptions::default(),
    };

    let title = match &cli.file {
        Some(path) => format!("jsonedit - {}", path.display()),
        None => "jsonedit".to_string(),
    };
    info!(file = ?cli.file, indent = cli.indent, ace = %cli.ace_script, "opening editor window");

    LAUNCH_SESSION.with(|slot| {
        *slot.borrow_mut() = Some(Session {
            text,
            indent: cli.indent,
            options,
        });
    });

    let config = Config::new()
        .with_resource_directory(PathBuf::from("."))
        .with_custom_head(format!(
            r#"<script src="{}" type="text/javascript" charset="utf-8"></script>"#,
            cli.ace_script
        ))
        .with_window(WindowBuilder::new().with_title(title).with_resizable(true));

    LaunchBuilder::desktop().with_cfg(config).launch(App);
    Ok(())
}

#[component]
fn App() -> Element {
    let session = use_hook(|| {
        LAUNCH_SESSION
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_default()
    });
    let mut text = use_signal(|| session.text.clone());
    let mut indent = use_signal(|| session.indent.max(1));
    let status = use_memo(move || document::status(&text.read()));

    rsx! {
        div {
            style: "width: 100vw; height: 100vh; display: flex; flex-direction: column; font-family: 'Segoe UI', Arial, sans-serif; font-size: 13px;",

            // Toolbar
            div {
                style: "background: #f0f0f0; padding: 4px; border-bottom: 1px solid #ccc; display: flex; gap: 8px; align-items: center;",

                select {
                    value: "{indent}",
                    onchange: move |evt| {
                        if let Ok(size) = evt.value().parse::<u32>() {
                            indent.set(size);
                        }
                    },
                    for size in INDENT_CHOICES {
                        option { value: "{size}", "{size} spaces" }
                    }
                }

                button {
                    onclick: move |_| {
                        let formatted = document::pretty(&text.read(), indent());
                        if let Some(formatted) = formatted {
                            text.set(formatted);
                        }
                    },
                    "Format"
                }

                span { style: "color: #666;", "{status}" }
            }

            // Editor
            div {
                style: "flex: 1; overflow: hidden;",
                AceEditor {
                    value: text(),
                    indentation: indent(),
                    options: session.options.clone(),
                    on_change: move |value: String| text.set(value),
                }
            }
        }
    }
}
