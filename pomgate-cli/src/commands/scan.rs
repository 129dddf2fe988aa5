//! `pomgate scan` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use pomgate_core::component::BuildComponent;
use pomgate_core::config::PomgateConfig;
use pomgate_core::types::Severity;
use pomgate_maven_scanner::report;
use pomgate_maven_scanner::{
    Issue, MavenScannerBuilder, MavenScannerConfig, ScanOutcome, ScanSummary,
};

use crate::cli::ScanArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `scan` command.
///
/// The report is rendered whenever the scan produced an outcome, including
/// when the build gate then fails.
pub async fn execute(
    args: ScanArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = PomgateConfig::load_or_default(config_path).await?;
    apply_scan_args(&mut config, &args);
    config.validate()?;

    if !config.scan.has_token() {
        return Err(CliError::Config(
            "no API token configured (set scan.api_token, POMGATE_SCAN_API_TOKEN or SNYK_TOKEN)"
                .to_owned(),
        ));
    }

    let mut scanner = MavenScannerBuilder::new()
        .config(MavenScannerConfig::from_core(&config.scan)?)
        .project_root(&args.path)
        .build()?;

    info!(path = %args.path.display(), "starting scan");

    let gate = scanner.compile().await;

    if let Some(outcome) = scanner.last_outcome() {
        let report = ScanReport::from_outcome(args.path.display().to_string(), outcome);
        writer.render(&report)?;
    }

    gate.map_err(CliError::from)
}

/// Apply command-line flags on top of the resolved configuration.
fn apply_scan_args(config: &mut PomgateConfig, args: &ScanArgs) {
    if let Some(ref threshold) = args.severity_threshold {
        config.scan.severity_threshold = threshold.clone();
    }
    if args.no_fail {
        config.scan.fail_on_discovery = false;
    }
    if let Some(ref org) = args.org {
        config.scan.org_name = org.clone();
    }
}

/// Scan report for one project.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub project: String,
    pub scan_id: String,
    /// Whether any manifest was submitted
    pub scanned: bool,
    pub manifests_submitted: usize,
    pub threshold: Severity,
    pub summary: ScanSummary,
    pub summary_line: String,
    pub build_failed: bool,
    pub issues: Vec<Issue>,
}

impl ScanReport {
    pub fn from_outcome(project: String, outcome: &ScanOutcome) -> Self {
        Self {
            project,
            scan_id: outcome.scan_id.clone(),
            scanned: outcome.was_scanned(),
            manifests_submitted: outcome.manifests_submitted,
            threshold: outcome.threshold,
            summary: outcome.summary(),
            summary_line: outcome.summary_line(),
            build_failed: outcome.must_fail,
            issues: outcome.issues.clone(),
        }
    }
}

impl Render for ScanReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if !self.scanned {
            writeln!(
                w,
                "{}",
                format!("No Maven manifests found in {}; nothing to test.", self.project).dimmed()
            )?;
            return Ok(());
        }

        writeln!(w, "Testing {}...", self.project.bold())?;
        writeln!(w)?;

        for issue in &self.issues {
            let headline = report::headline(issue);
            let headline = match issue.severity {
                Severity::High => headline.red().bold(),
                Severity::Medium => headline.yellow().bold(),
                Severity::Low => headline.blue().bold(),
            };
            writeln!(w, "{headline}")?;
            for line in report::detail_lines(issue) {
                writeln!(w, "{line}")?;
            }
            writeln!(w)?;
        }

        if self.summary.is_clean() {
            writeln!(w, "{}", self.summary_line.green())?;
        } else {
            writeln!(w, "{}", self.summary_line.red().bold())?;
        }

        Ok(())
    }
}
