//! 원격 스캔 결과 모델
//!
//! 응답 JSON의 이슈 필드는 생략되거나 `null`이거나 엉뚱한 타입일 수 있습니다.
//! 이슈 한 건이 잘못되어도 판정 전체가 파싱 에러가 되지 않도록 이슈 단위로 관대하게 읽습니다.
//!
//! - 문자열 필드: 문자열이 아니면 빈 문자열 (숫자는 문자열로 변환)
//! - `severity`: 문자열이 아니면 `None` (평가 단계에서 제외됨)
//! - `from`: 배열이 아니면 빈 목록, 문자열이 아닌 원소는 버림
//! - 이슈 목록: 배열이 아니면 빈 목록, 객체가 아닌 원소는 버림

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::MavenScannerError;

/// 원격 스캔 결과 (verdict)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// 서비스 판정
    pub ok: bool,
    /// 검사한 의존성 수
    #[serde(rename = "dependencyCount", default, deserialize_with = "null_as_default")]
    pub dependency_count: u64,
    /// 최상위 취약점 목록
    #[serde(default, deserialize_with = "lenient_issues")]
    pub vulnerabilities: Vec<RawIssue>,
    /// 중첩된 이슈 목록
    #[serde(default, deserialize_with = "lenient_issue_sets")]
    pub issues: IssueSets,
}

/// `issues` 객체
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSets {
    /// 취약점 이슈
    #[serde(default, deserialize_with = "lenient_issues")]
    pub vulnerabilities: Vec<RawIssue>,
    /// 라이선스 이슈
    #[serde(default, deserialize_with = "lenient_issues")]
    pub licenses: Vec<RawIssue>,
}

/// 서비스가 보고한 이슈 원본
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    /// 이슈 ID
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// 심각도 원문
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: Option<String>,
    /// 패키지 이름
    #[serde(default, deserialize_with = "lenient_string")]
    pub package: String,
    /// 제목
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// 상세 정보 URL
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    /// 의존성 경로 (직접 의존성부터 취약 패키지까지)
    #[serde(default, deserialize_with = "lenient_path")]
    pub from: Vec<String>,
}

impl ScanResult {
    /// 응답 본문을 파싱합니다.
    pub fn from_json(body: &str) -> Result<Self, MavenScannerError> {
        serde_json::from_str(body).map_err(|e| MavenScannerError::ResponseParse(e.to_string()))
    }

    /// 세 이슈 목록 길이의 합
    pub fn raw_issue_count(&self) -> usize {
        self.vulnerabilities.len() + self.issues.vulnerabilities.len() + self.issues.licenses.len()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_severity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_path<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn lenient_issues<'de, D>(deserializer: D) -> Result<Vec<RawIssue>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| {
            if !item.is_object() {
                debug!(record = %item, "non-object issue record dropped");
                return None;
            }
            serde_json::from_value(item).ok()
        })
        .collect())
}

fn lenient_issue_sets<'de, D>(deserializer: D) -> Result<IssueSets, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(IssueSets::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_verdict_parses() {
        let result = ScanResult::from_json(r#"{"ok": true, "dependencyCount": 42}"#).unwrap();
        assert!(result.ok);
        assert_eq!(result.dependency_count, 42);
        assert_eq!(result.raw_issue_count(), 0);
    }

    #[test]
    fn missing_dependency_count_defaults_to_zero() {
        let result = ScanResult::from_json(r#"{"ok": false}"#).unwrap();
        assert_eq!(result.dependency_count, 0);
    }

    #[test]
    fn null_fields_are_tolerated() {
        let result = ScanResult::from_json(
            r#"{"ok": false, "dependencyCount": null, "vulnerabilities": null,
                "issues": {"vulnerabilities": [{"id": null, "from": null}], "licenses": null}}"#,
        )
        .unwrap();
        assert_eq!(result.issues.vulnerabilities.len(), 1);
        assert_eq!(result.issues.vulnerabilities[0], RawIssue::default());
    }

    #[test]
    fn all_three_lists_are_read() {
        let result = ScanResult::from_json(
            r#"{"ok": false,
                "vulnerabilities": [{"id": "a", "severity": "high"}],
                "issues": {
                    "vulnerabilities": [{"id": "b", "severity": "low"}],
                    "licenses": [{"id": "c", "severity": "medium", "package": "lib",
                                  "title": "GPL", "url": "https://x", "from": ["app", "lib"]}]
                }}"#,
        )
        .unwrap();
        assert_eq!(result.raw_issue_count(), 3);
        assert_eq!(result.issues.licenses[0].from, vec!["app", "lib"]);
    }

    #[test]
    fn unknown_severity_survives_parsing() {
        let result =
            ScanResult::from_json(r#"{"ok": false, "vulnerabilities": [{"severity": "critical"}]}"#)
                .unwrap();
        assert_eq!(result.vulnerabilities[0].severity.as_deref(), Some("critical"));
    }

    #[test]
    fn non_string_severity_only_affects_that_issue() {
        let result = ScanResult::from_json(
            r#"{"ok": false, "vulnerabilities": [
                {"id": "bad", "severity": 5},
                {"id": "good", "severity": "high"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(result.vulnerabilities.len(), 2);
        assert_eq!(result.vulnerabilities[0].id, "bad");
        assert_eq!(result.vulnerabilities[0].severity, None);
        assert_eq!(result.vulnerabilities[1].severity.as_deref(), Some("high"));
    }

    #[test]
    fn malformed_issue_fields_are_tolerated() {
        let result = ScanResult::from_json(
            r#"{"ok": false, "issues": {"vulnerabilities": [
                {"id": 42, "severity": {"level": "high"}, "package": true,
                 "title": ["x"], "url": 1.5, "from": ["app", 7, "lib"]},
                {"id": "p", "severity": "low", "from": "app > lib"}
            ]}}"#,
        )
        .unwrap();

        let odd = &result.issues.vulnerabilities[0];
        assert_eq!(odd.id, "42");
        assert_eq!(odd.severity, None);
        assert_eq!(odd.package, "");
        assert_eq!(odd.title, "");
        assert_eq!(odd.url, "1.5");
        assert_eq!(odd.from, vec!["app", "lib"]);

        assert!(result.issues.vulnerabilities[1].from.is_empty());
    }

    #[test]
    fn non_object_issue_records_are_dropped() {
        let result = ScanResult::from_json(
            r#"{"ok": false,
                "vulnerabilities": ["oops", 3, null, {"id": "kept", "severity": "medium"}],
                "issues": {"licenses": {"not": "a list"}}}"#,
        )
        .unwrap();
        assert_eq!(result.vulnerabilities.len(), 1);
        assert_eq!(result.vulnerabilities[0].id, "kept");
        assert!(result.issues.licenses.is_empty());
    }

    #[test]
    fn non_object_issue_sets_default_to_empty() {
        let result = ScanResult::from_json(r#"{"ok": true, "issues": [1, 2]}"#).unwrap();
        assert_eq!(result.issues, IssueSets::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result =
            ScanResult::from_json(r#"{"ok": true, "packageManager": "maven", "summary": "x"}"#)
                .unwrap();
        assert!(result.ok);
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = ScanResult::from_json("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, MavenScannerError::ResponseParse(_)));
    }

    #[test]
    fn missing_ok_is_parse_error() {
        let err = ScanResult::from_json(r#"{"dependencyCount": 3}"#).unwrap_err();
        assert!(matches!(err, MavenScannerError::ResponseParse(_)));
    }
}
