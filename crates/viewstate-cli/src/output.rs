use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("success", &"✓".green().to_string(), msg.as_ref());
        }
    }

    /// Shown even in quiet mode, on stderr for humans
    pub fn error(&self, msg: impl AsRef<str>) {
        if self.is_human() {
            eprintln!("{} {}", "✗".red(), msg.as_ref());
        } else {
            self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("info", "", msg.as_ref());
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("warning", &"⚠".yellow().to_string(), msg.as_ref());
        }
    }

    /// Print a table (human mode only)
    pub fn table(&self, table: &comfy_table::Table) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", table);
    }

    /// Print a machine-readable document (JSON modes only)
    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet || self.is_human() {
            return;
        }
        self.print_json(data);
    }

    fn message(&self, kind: &str, marker: &str, msg: &str) {
        if !self.is_human() {
            self.print_json(&json!({ "type": kind, "message": msg }));
        } else if marker.is_empty() {
            println!("{}", msg);
        } else {
            println!("{} {}", marker, msg);
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        let rendered = if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
