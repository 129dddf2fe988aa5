//! 스캔 보고서 형식
//!
//! 모든 함수는 문자열만 만들고 출력하지 않습니다. 출력은 CLI의 몫입니다.

use std::collections::HashSet;

use serde::Serialize;

use crate::evaluator::Issue;

/// 의존성 경로 구분자
pub const PATH_SEPARATOR: &str = " > ";

/// 스캔 요약 수치
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// 검사한 의존성 수
    pub dependency_count: u64,
    /// 고유 취약점 ID 수
    pub unique_vulnerabilities: usize,
    /// 취약 경로 수 (`from` 길이의 합)
    pub vulnerable_paths: usize,
}

impl ScanSummary {
    /// 이슈 목록에서 요약을 계산합니다.
    pub fn from_issues(dependency_count: u64, issues: &[Issue]) -> Self {
        let unique_vulnerabilities = issues
            .iter()
            .map(|issue| issue.id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let vulnerable_paths = issues.iter().map(|issue| issue.from.len()).sum();

        Self {
            dependency_count,
            unique_vulnerabilities,
            vulnerable_paths,
        }
    }

    /// 보고할 이슈가 없는지 반환합니다.
    pub fn is_clean(&self) -> bool {
        self.unique_vulnerabilities == 0 && self.vulnerable_paths == 0
    }
}

/// 요약 한 줄
///
/// 이슈 목록이 비었는지로 판단해야 하므로 [`ScanSummary`]가 아니라 이슈를 받습니다.
pub fn summary_line(dependency_count: u64, issues: &[Issue]) -> String {
    if issues.is_empty() {
        return format!("Tested {dependency_count} dependencies. No vulnerabilities found.");
    }

    let summary = ScanSummary::from_issues(dependency_count, issues);
    format!(
        "Tested {dependency_count} dependencies, found {} unique vulnerabilities across {} vulnerable paths.",
        summary.unique_vulnerabilities, summary.vulnerable_paths
    )
}

/// 이슈 머리글
pub fn headline(issue: &Issue) -> String {
    format!(
        "✗ {} severity vulnerability found in {}",
        issue.severity, issue.package
    )
}

/// 이슈 상세 줄 (설명, 정보 URL, 직접 의존성, 전체 경로)
pub fn detail_lines(issue: &Issue) -> Vec<String> {
    vec![
        format!("  Description: {}", issue.title),
        format!("  Info: {}", issue.url),
        format!(
            "  Introduced through: {}",
            issue.introduced_through().unwrap_or_default()
        ),
        format!("  From: {}", issue.from.join(PATH_SEPARATOR)),
    ]
}

/// 이슈 한 건의 전체 출력 줄
pub fn issue_lines(issue: &Issue) -> Vec<String> {
    let mut lines = vec![headline(issue)];
    lines.extend(detail_lines(issue));
    lines
}
