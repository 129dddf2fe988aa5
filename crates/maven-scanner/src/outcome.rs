//! 스캔 결과와 빌드 게이트
//!
//! [`ScanOutcome`]은 파이프라인의 최종 산출물입니다.
//! 보고서 출력과 빌드 실패 판정이 모두 이 값을 읽습니다.

use pomgate_core::types::Severity;
use serde::Serialize;
use tracing::warn;

use crate::error::MavenScannerError;
use crate::evaluator::Issue;
use crate::report::{self, ScanSummary};

/// 빌드를 실패시켜야 하는지 판정합니다.
///
/// 보고할 이슈가 있고 `fail_on_discovery`가 켜져 있을 때만 실패입니다.
pub fn must_fail(issues: &[Issue], fail_on_discovery: bool) -> bool {
    !issues.is_empty() && fail_on_discovery
}

/// 스캔 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// 스캔 식별자 (로그 상관용)
    pub scan_id: String,
    /// 보고 대상 이슈 (점수 오름차순)
    pub issues: Vec<Issue>,
    /// 검사한 의존성 수
    pub dependency_count: u64,
    /// 전송한 manifest 수
    pub manifests_submitted: usize,
    /// 적용한 임계값
    pub threshold: Severity,
    /// 빌드 실패 여부
    pub must_fail: bool,
}

impl ScanOutcome {
    /// 평가된 이슈로 결과를 만듭니다.
    pub fn new(
        issues: Vec<Issue>,
        dependency_count: u64,
        manifests_submitted: usize,
        threshold: Severity,
        fail_on_discovery: bool,
    ) -> Self {
        let must_fail = must_fail(&issues, fail_on_discovery);
        Self {
            scan_id: uuid::Uuid::new_v4().to_string(),
            issues,
            dependency_count,
            manifests_submitted,
            threshold,
            must_fail,
        }
    }

    /// manifest가 없어 스캔하지 않은 결과 (통과)
    pub fn not_scanned(threshold: Severity) -> Self {
        Self::new(Vec::new(), 0, 0, threshold, false)
    }

    /// 원격 스캔을 수행했는지 반환합니다.
    pub fn was_scanned(&self) -> bool {
        self.manifests_submitted > 0
    }

    /// 요약 수치
    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_issues(self.dependency_count, &self.issues)
    }

    /// 요약 한 줄
    pub fn summary_line(&self) -> String {
        report::summary_line(self.dependency_count, &self.issues)
    }

    /// 빌드 게이트를 적용합니다.
    ///
    /// 실패해야 하면 `VulnerabilitiesFound`를 반환합니다.
    /// 이슈가 있지만 실패하지 않는 경우 경고 로그만 남깁니다.
    pub fn enforce(&self) -> Result<(), MavenScannerError> {
        let summary = self.summary();

        if self.must_fail {
            return Err(MavenScannerError::VulnerabilitiesFound {
                unique: summary.unique_vulnerabilities,
                paths: summary.vulnerable_paths,
            });
        }

        if !self.issues.is_empty() {
            warn!(
                scan_id = %self.scan_id,
                unique = summary.unique_vulnerabilities,
                paths = summary.vulnerable_paths,
                "vulnerabilities found, build not failed because fail_on_discovery is off"
            );
        }

        Ok(())
    }
}
