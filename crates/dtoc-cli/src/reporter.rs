use colored::Colorize;
use dtoc_common::{Diagnostic, DiagnosticCategory, LineMap};

/// Renders parse diagnostics and fatal errors for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `file:line:col - warning TS1005: message`, followed by the source
    /// line with the span underlined.
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let line_map = LineMap::build(source);
        let position = line_map.offset_to_position(diagnostic.start, source);
        let (line, column) = (position.line + 1, position.character + 1);

        let mut output = format!(
            "{}:{}:{} - {}",
            diagnostic.file,
            line,
            column,
            self.format_category(diagnostic.category)
        );
        if diagnostic.code != 0 {
            output.push(' ');
            output.push_str(&self.paint(format!("TS{}", diagnostic.code), |s| {
                s.bright_blue().to_string()
            }));
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(line_text) = source.lines().nth(position.line as usize) {
            output.push_str(&self.format_snippet(line, line_text, column, diagnostic.length));
        }
        output
    }

    /// A fatal error and its chain of causes.
    pub fn format_error(&self, error: &anyhow::Error) -> String {
        let mut output = format!(
            "{}: {}",
            self.paint("error".to_string(), |s| s.red().bold().to_string()),
            error
        );
        for cause in error.chain().skip(1) {
            output.push('\n');
            output.push_str(&self.paint("  caused by".to_string(), |s| s.dimmed().to_string()));
            output.push_str(": ");
            output.push_str(&cause.to_string());
        }
        output
    }

    fn format_snippet(&self, line: u32, line_text: &str, column: u32, length: u32) -> String {
        let mut underline = String::new();
        let start = column.saturating_sub(1) as usize;
        for (i, ch) in line_text.chars().enumerate() {
            if i >= start {
                break;
            }
            underline.push(if ch == '\t' { '\t' } else { ' ' });
        }
        let span = line_text.chars().count().saturating_sub(start).max(1);
        underline.push_str(&"~".repeat((length as usize).clamp(1, span)));

        format!(
            "\n  {line:>3}   {line_text}\n        {}",
            self.paint(underline, |s| s.red().to_string())
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        match category {
            DiagnosticCategory::Error => {
                self.paint("error".to_string(), |s| s.red().bold().to_string())
            }
            DiagnosticCategory::Warning => {
                self.paint("warning".to_string(), |s| s.yellow().bold().to_string())
            }
        }
    }

    fn paint(&self, text: String, style: impl FnOnce(&str) -> String) -> String {
        if self.color { style(&text) } else { text }
    }
}
