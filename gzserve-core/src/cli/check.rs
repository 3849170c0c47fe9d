use crate::assets::AssetIndex;
use crate::conf::validation::ValidationReport;
use crate::conf::{ConfigError, load_config};
use owo_colors::OwoColorize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pretty,
    Plain,
    Json,
}

/// Validates the config, prints the report and a short summary. Exits with 1 on errors.
pub fn check(path: &Path, format: ReportFormat) -> anyhow::Result<()> {
    match load_config(path) {
        Ok(validated) => {
            render_report(&validated.report, format);

            if format == ReportFormat::Json {
                return Ok(());
            }

            let assets = &validated.config.assets;
            let index = AssetIndex::build(&assets.root, &assets.encodings);

            println!("{} Config loaded successfully", "✔".green());
            println!(
                "{} {} encodings ({})",
                "✔".green(),
                assets.encodings.len(),
                assets.encodings.names().join(", ")
            );
            println!(
                "{} {} pre-compressed assets under {}",
                "✔".green(),
                index.len(),
                assets.root.display()
            );
            match &assets.index_file {
                Some(name) => println!("{} directory index: {name}", "✔".green()),
                None => println!("{} directory index disabled", "✔".green()),
            }
            Ok(())
        }
        Err(ConfigError::Validation { report }) => {
            render_report(&report, format);
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn render_report(report: &ValidationReport, format: ReportFormat) {
    match format {
        ReportFormat::Json => report.render_json(),
        ReportFormat::Plain if report.has_violations() => report.render_plain(),
        ReportFormat::Pretty if report.has_violations() => report.render_pretty(),
        _ => {}
    }
}
