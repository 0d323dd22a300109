use crate::cli::{LogConfig, OutputFormat};
use crate::metadata::FixtureTags;
use serde::Serialize;

#[derive(Clone)]
pub struct Logger {
    config: LogConfig,
}

#[derive(Serialize)]
struct JsonEvent {
    #[serde(rename = "type")]
    event_type: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl Logger {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    pub fn info(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("info", message, None);
    }

    pub fn success(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        self.output("success", message, None);
    }

    pub fn error(&self, message: &str) {
        self.output("error", message, None);
    }

    pub fn debug(&self, message: &str) {
        if !self.config.verbose {
            return;
        }
        self.output("debug", message, None);
    }

    pub fn fixture_complete(&self, path: &str, tags: &FixtureTags) {
        if self.config.quiet {
            return;
        }
        let data = serde_json::json!({
            "path": path,
            "tags": tags,
        });
        self.output(
            "fixture_complete",
            &format!(
                "Wrote {}: {} - {} - {} (track {:?})",
                path, tags.artist, tags.album, tags.title, tags.track
            ),
            Some(data),
        );
    }

    fn output(&self, event_type: &str, message: &str, data: Option<serde_json::Value>) {
        if let Some(line) = self.render(event_type, message, data) {
            match event_type {
                "error" => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }
    }

    fn render(&self, event_type: &str, message: &str, data: Option<serde_json::Value>) -> Option<String> {
        match self.config.output_format {
            OutputFormat::Json => {
                let event = JsonEvent {
                    event_type: event_type.to_string(),
                    message: message.to_string(),
                    data,
                };
                serde_json::to_string(&event).ok()
            }
            OutputFormat::Text => {
                let prefix = match event_type {
                    "error" => "[ERROR]",
                    "debug" => "[DEBUG]",
                    "success" | "fixture_complete" => "[OK]",
                    _ => "[INFO]",
                };
                Some(format!("{} {}", prefix, message))
            }
        }
    }
}
