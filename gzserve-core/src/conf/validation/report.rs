use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    /// Dotted path of the offending setting, e.g. `assets.custom_compressions[1].extension`.
    pub field: String,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        self.has_errors() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, field: impl Into<String>, message: String, help: Option<String>) {
        self.push(Severity::Error, field.into(), message, help);
    }

    pub(crate) fn warning(
        &mut self,
        field: impl Into<String>,
        message: String,
        help: Option<String>,
    ) {
        self.push(Severity::Warning, field.into(), message, help);
    }

    fn push(&mut self, severity: Severity, field: String, message: String, help: Option<String>) {
        let bucket = match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
        };
        bucket.push(ValidationIssue {
            severity,
            message,
            field,
            help,
        });
    }

    fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }

    pub fn render_json(&self) {
        println!(
            "{}",
            serde_json::to_string_pretty(self).expect("failed to serialize validation report")
        );
    }

    /// One line per issue, `field: severity: message`, for logs and CI output.
    pub fn render_plain(&self) {
        for issue in self.issues() {
            println!("{}: {}: {}", issue.field, issue.severity, issue.message);
            if let Some(help) = &issue.help {
                println!("  = help: {help}");
            }
        }
    }

    pub fn render_pretty(&self) {
        let (errors, warnings) = (self.errors.len(), self.warnings.len());

        match (errors, warnings) {
            (0, 0) => return,
            (0, w) => println!("{} {w} warning(s)\n", "config:".yellow().bold()),
            (e, w) => println!(
                "{} {e} error(s), {w} warning(s)\n",
                "config invalid:".red().bold()
            ),
        }

        for issue in self.issues() {
            let label = match issue.severity {
                Severity::Error => issue.severity.red().bold().to_string(),
                Severity::Warning => issue.severity.yellow().bold().to_string(),
            };

            println!("{label}[{}] {}", issue.field.dimmed(), issue.message);
            if let Some(help) = &issue.help {
                println!("  {} {help}", "help:".cyan());
            }
        }
    }
}
