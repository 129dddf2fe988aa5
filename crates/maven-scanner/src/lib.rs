#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`MavenScannerError`)
//! - [`config`]: Scanner configuration (`MavenScannerConfig`, builder)
//! - [`manifest`]: Manifest discovery on disk and inside `.jar` archives (`ManifestLocator`)
//! - [`request`]: Scan request payload (`ScanRequest`)
//! - [`client`]: Remote scan service client (`ScanClient` trait, `HttpScanClient`)
//! - [`result`]: Remote verdict model (`ScanResult`, `RawIssue`)
//! - [`evaluator`]: Issue extraction, scoring, filtering, sorting (`IssueEvaluator`, `Issue`)
//! - [`report`]: Pure report formatting (`issue_lines`, `summary_line`)
//! - [`outcome`]: Scan outcome and build gate (`ScanOutcome`)
//! - [`scanner`]: Main orchestrator (`MavenScanner`, `MavenScannerBuilder`, `BuildComponent` impl)
//!
//! # Architecture
//!
//! ```text
//! project root --> ManifestLocator --> Vec<Manifest>
//!                                          |
//!                                     ScanRequest
//!                                          |
//!                                 ScanClient (POST /v1/test/maven)
//!                                          |
//!                                     ScanResult
//!                                          |
//!                                   IssueEvaluator
//!                                          |
//!                                     ScanOutcome --> report / build gate
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod manifest;
pub mod outcome;
pub mod report;
pub mod request;
pub mod result;
pub mod scanner;

// --- Public API Re-exports ---

// Scanner (main orchestrator)
pub use scanner::{COMPONENT_ID, MavenScanner, MavenScannerBuilder};

// Configuration
pub use config::{MavenScannerConfig, MavenScannerConfigBuilder};

// Error
pub use error::MavenScannerError;

// Manifest discovery
pub use manifest::{Manifest, ManifestLocator, ManifestOrigin};

// Request / client / verdict
pub use client::{HttpScanClient, ScanClient};
pub use request::ScanRequest;
pub use result::{IssueSets, RawIssue, ScanResult};

// Evaluation / reporting
pub use evaluator::{Issue, IssueEvaluator};
pub use outcome::ScanOutcome;
pub use report::ScanSummary;
