//! 이슈 평가기 -- 추출, 점수화, 필터링, 정렬
//!
//! 추출 순서는 (a) 최상위 `vulnerabilities`, (b) `issues.vulnerabilities`,
//! (c) `issues.licenses` 입니다. 심각도가 없거나 알 수 없는 이슈는 점수가 없으므로
//! 제외됩니다. 남은 이슈는 임계값 이상만 유지하고 점수 오름차순으로 안정 정렬합니다.
//!
//! 평가는 숨은 상태가 없는 순수 함수입니다.

use pomgate_core::types::Severity;
use serde::Serialize;
use tracing::debug;

use crate::result::{RawIssue, ScanResult};

/// 정규화된 이슈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// 이슈 ID
    pub id: String,
    /// 심각도
    pub severity: Severity,
    /// 패키지 이름
    pub package: String,
    /// 제목
    pub title: String,
    /// 상세 정보 URL
    pub url: String,
    /// 의존성 경로
    pub from: Vec<String>,
}

impl Issue {
    /// 원본 이슈를 정규화합니다. 심각도를 알 수 없으면 `None`.
    pub fn from_raw(raw: &RawIssue) -> Option<Self> {
        let severity = raw.severity.as_deref().and_then(Severity::from_str_loose)?;
        Some(Self {
            id: raw.id.clone(),
            severity,
            package: raw.package.clone(),
            title: raw.title.clone(),
            url: raw.url.clone(),
            from: raw.from.clone(),
        })
    }

    /// 심각도 점수
    pub fn score(&self) -> u8 {
        self.severity.score()
    }

    /// 직접 의존성 (경로의 첫 요소)
    pub fn introduced_through(&self) -> Option<&str> {
        self.from.first().map(String::as_str)
    }
}

/// 심각도 문자열의 점수 (low=1, medium=2, high=3, 대소문자 무시)
pub fn severity_score(severity: &str) -> Option<u8> {
    Severity::from_str_loose(severity).map(Severity::score)
}

/// 이슈 평가기
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueEvaluator {
    threshold: Severity,
}

impl IssueEvaluator {
    /// 임계값으로 평가기를 생성합니다.
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    /// 임계값
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// 결과에서 원본 이슈를 추출 순서대로 나열합니다.
    pub fn extract(result: &ScanResult) -> impl Iterator<Item = &RawIssue> {
        result
            .vulnerabilities
            .iter()
            .chain(result.issues.vulnerabilities.iter())
            .chain(result.issues.licenses.iter())
    }

    /// 결과를 평가하여 보고 대상 이슈를 반환합니다.
    pub fn evaluate(&self, result: &ScanResult) -> Vec<Issue> {
        let min_score = self.threshold.score();

        let mut issues: Vec<Issue> = Self::extract(result)
            .filter_map(|raw| {
                let issue = Issue::from_raw(raw);
                if issue.is_none() {
                    debug!(
                        id = raw.id.as_str(),
                        severity = ?raw.severity,
                        "issue without recognized severity dropped"
                    );
                }
                issue
            })
            .filter(|issue| issue.score() >= min_score)
            .collect();

        // sort_by_key는 안정 정렬
        issues.sort_by_key(Issue::score);
        issues
    }
}
