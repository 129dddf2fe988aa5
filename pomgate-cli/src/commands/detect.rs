//! `pomgate detect` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use pomgate_core::component::BuildComponent;
use pomgate_core::config::PomgateConfig;
use pomgate_maven_scanner::{MavenScannerBuilder, MavenScannerConfig};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `detect` command.
///
/// Succeeds whether or not the component is active; only configuration
/// errors fail the command.
pub async fn execute(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    let report = detect(config_path).await?;
    info!(detected = report.detected, "detection finished");
    writer.render(&report)
}

/// Resolve configuration and ask the scanner whether it would run.
pub async fn detect(config_path: &Path) -> Result<DetectReport, CliError> {
    let config = PomgateConfig::load_or_default(config_path).await?;
    let scanner = MavenScannerBuilder::new()
        .config(MavenScannerConfig::from_core(&config.scan)?)
        .build()?;

    Ok(DetectReport::new(scanner.detect()))
}

/// Detection result.
#[derive(Debug, Serialize)]
pub struct DetectReport {
    /// Whether the component is active
    pub detected: bool,
    /// Component identifier when active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl DetectReport {
    fn new(component: Option<String>) -> Self {
        Self {
            detected: component.is_some(),
            component,
        }
    }
}

impl Render for DetectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match self.component {
            Some(ref id) => writeln!(w, "{}", id.green().bold()),
            None => writeln!(w, "{}", "not detected".dimmed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: &DetectReport) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        report.render_text(&mut buffer).expect("render");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn test_detect_report_active() {
        let report = DetectReport::new(Some("snyk".to_owned()));
        assert!(report.detected);
        assert_eq!(render(&report).trim(), "snyk");
    }

    #[test]
    fn test_detect_report_inactive() {
        let report = DetectReport::new(None);
        assert!(!report.detected);
        assert_eq!(render(&report).trim(), "not detected");
    }

    #[test]
    fn test_detect_report_json_omits_missing_component() {
        let json = serde_json::to_value(DetectReport::new(None)).expect("json");
        assert_eq!(json["detected"], false);
        assert!(json.get("component").is_none());
    }
}
