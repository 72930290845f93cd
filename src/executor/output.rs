//! Formatting of script output for the host's message dialog.

use std::sync::OnceLock;

use regex::Regex;

use crate::host::OutputFormat;

/// Dialog title for script output
pub const OUTPUT_TITLE: &str = "Script Output";

const HTML_ERROR: &str = r#"<span style="color: red;">Error</span>"#;
const ANSI_ERROR: &str = "\x1b[31mError\x1b[0m";

fn error_word() -> &'static Regex {
    static ERROR_WORD: OnceLock<Regex> = OnceLock::new();
    ERROR_WORD.get_or_init(|| Regex::new(r"(?i)error").expect("valid error regex"))
}

/// Render the outcome of a run: the output itself, or `Error: <message>`
pub fn render_result(result: &Result<String, String>, format: OutputFormat) -> String {
    match result {
        Ok(output) => render_output(output, format),
        Err(message) => render_output(&format!("Error: {}", message), format),
    }
}

/// Turn newlines into line breaks and highlight every case-insensitive
/// "error" as a red "Error". HTML output is wrapped in a scrollable panel.
/// Plain output is passed through untouched.
pub fn render_output(text: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Html => {
            let text = text.replace('\n', "<br />");
            let text = error_word().replace_all(&text, HTML_ERROR);
            format!(
                "<div style='display: flex; flex-direction: column; overflow: auto; height: 200px;'>{}</div>",
                text
            )
        }
        OutputFormat::Ansi => error_word().replace_all(text, ANSI_ERROR).into_owned(),
        OutputFormat::Plain => text.to_string(),
    }
}
