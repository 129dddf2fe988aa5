//! Maven 스캐너 오케스트레이터 -- 전체 스캔 흐름 관리
//!
//! [`MavenScanner`]는 core의 [`BuildComponent`] trait을 구현하여
//! 빌드 플랫폼의 detect/compile/release 생명주기로 구동됩니다.
//!
//! # 내부 아키텍처
//!
//! ```text
//! project root --> ManifestLocator (spawn_blocking) --> Vec<Manifest>
//!                                                           |
//!                                    (비어 있으면 스캔 생략, 통과)
//!                                                           |
//!                                ScanRequest --> ScanClient --> ScanResult
//!                                                                   |
//!                                                IssueEvaluator --> ScanOutcome --> enforce
//! ```
//!
//! 모든 단계는 순서대로 실행되며, 치명적 에러는 나머지 단계를 중단시킵니다.

use std::path::{Path, PathBuf};

use pomgate_core::component::BuildComponent;
use pomgate_core::error::PomgateError;
use tracing::{debug, info};

use crate::client::{HttpScanClient, ScanClient};
use crate::config::MavenScannerConfig;
use crate::error::MavenScannerError;
use crate::evaluator::IssueEvaluator;
use crate::manifest::ManifestLocator;
use crate::outcome::ScanOutcome;
use crate::request::ScanRequest;

/// `detect`가 반환하는 컴포넌트 식별자
pub const COMPONENT_ID: &str = "snyk";

/// Maven 스캐너 오케스트레이터
///
/// manifest 탐색, 요청 생성, 원격 스캔, 이슈 평가, 빌드 게이트의 전체 흐름을 관리합니다.
pub struct MavenScanner<C: ScanClient = HttpScanClient> {
    /// 스캐너 설정
    config: MavenScannerConfig,
    /// 스캔 대상 프로젝트 루트 (`compile`에서 사용)
    project_root: PathBuf,
    /// manifest 탐색기
    locator: ManifestLocator,
    /// 이슈 평가기
    evaluator: IssueEvaluator,
    /// 원격 스캔 클라이언트
    client: C,
    /// 마지막 `compile` 결과
    last_outcome: Option<ScanOutcome>,
}

impl<C: ScanClient> MavenScanner<C> {
    /// 스캐너 설정을 반환합니다.
    pub fn config(&self) -> &MavenScannerConfig {
        &self.config
    }

    /// 프로젝트 루트를 반환합니다.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// 마지막 `compile`에서 얻은 결과를 반환합니다.
    ///
    /// 빌드 게이트가 실패해도 결과는 보존되므로 보고서를 출력할 수 있습니다.
    pub fn last_outcome(&self) -> Option<&ScanOutcome> {
        self.last_outcome.as_ref()
    }

    /// 프로젝트 루트를 스캔합니다 (빌드 게이트 미적용).
    ///
    /// manifest가 없으면 원격 호출 없이 통과 결과를 반환합니다.
    pub async fn scan(&self, root: &Path) -> Result<ScanOutcome, MavenScannerError> {
        if !self.config.has_token() {
            return Err(MavenScannerError::Config {
                field: "api_token".to_owned(),
                reason: "an API token is required to scan".to_owned(),
            });
        }

        // manifest 탐색 (blocking I/O)
        let manifests = {
            let root = root.to_path_buf();
            let locator = self.locator.clone();
            tokio::task::spawn_blocking(move || locator.locate(&root))
                .await
                .map_err(|e| MavenScannerError::Task(format!("spawn_blocking failed: {e}")))?
        }?;

        let threshold = self.evaluator.threshold();

        if manifests.is_empty() {
            info!(root = %root.display(), "no manifests found, skipping scan");
            return Ok(ScanOutcome::not_scanned(threshold));
        }

        for manifest in &manifests {
            debug!(origin = %manifest.origin, bytes = manifest.content.len(), "manifest located");
        }
        info!(
            root = %root.display(),
            manifests = manifests.len(),
            target = %manifests[0].origin,
            "submitting manifests for scan"
        );

        let request = ScanRequest::build(manifests, self.config.org_name.as_deref())?;
        let result = self.client.test(&request).await?;
        let issues = self.evaluator.evaluate(&result);

        let outcome = ScanOutcome::new(
            issues,
            result.dependency_count,
            request.manifest_count(),
            threshold,
            self.config.fail_on_discovery,
        );

        info!(
            scan_id = %outcome.scan_id,
            dependencies = outcome.dependency_count,
            issues = outcome.issues.len(),
            threshold = %threshold,
            must_fail = outcome.must_fail,
            "scan completed"
        );

        Ok(outcome)
    }
}

impl<C: ScanClient> BuildComponent for MavenScanner<C> {
    fn detect(&self) -> Option<String> {
        self.config.has_token().then(|| COMPONENT_ID.to_owned())
    }

    async fn compile(&mut self) -> Result<(), PomgateError> {
        let root = self.project_root.clone();
        let outcome = self.scan(&root).await?;
        let gate = outcome.enforce();
        self.last_outcome = Some(outcome);
        gate.map_err(PomgateError::from)
    }

    fn release(&self) -> Option<String> {
        None
    }
}

/// Maven 스캐너 빌더
///
/// 설정을 검증하고 스캔 클라이언트를 구성합니다.
pub struct MavenScannerBuilder {
    config: MavenScannerConfig,
    project_root: PathBuf,
}

impl MavenScannerBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: MavenScannerConfig::default(),
            project_root: PathBuf::from("."),
        }
    }

    /// 스캐너 설정을 지정합니다.
    pub fn config(mut self, config: MavenScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// `compile`이 스캔할 프로젝트 루트를 지정합니다.
    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = root.into();
        self
    }

    /// HTTP 클라이언트로 스캐너를 빌드합니다.
    pub fn build(self) -> Result<MavenScanner<HttpScanClient>, MavenScannerError> {
        self.config.validate()?;
        let client = HttpScanClient::new(&self.config)?;
        Ok(self.assemble(client))
    }

    /// 주어진 클라이언트로 스캐너를 빌드합니다.
    pub fn build_with_client<C: ScanClient>(
        self,
        client: C,
    ) -> Result<MavenScanner<C>, MavenScannerError> {
        self.config.validate()?;
        Ok(self.assemble(client))
    }

    fn assemble<C: ScanClient>(self, client: C) -> MavenScanner<C> {
        MavenScanner {
            locator: ManifestLocator::new(self.config.max_manifest_size),
            evaluator: IssueEvaluator::new(self.config.severity_threshold),
            config: self.config,
            project_root: self.project_root,
            client,
            last_outcome: None,
        }
    }
}

impl Default for MavenScannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pomgate_core::error::ScanError;
    use pomgate_core::types::Severity;

    use super::*;
    use crate::client::MockScanClient;
    use crate::config::MavenScannerConfigBuilder;
    use crate::result::{RawIssue, ScanResult};

    fn config() -> MavenScannerConfigBuilder {
        MavenScannerConfigBuilder::new().api_token("token")
    }

    fn raw(id: &str, severity: &str, from: &[&str]) -> RawIssue {
        RawIssue {
            id: id.to_owned(),
            severity: Some(severity.to_owned()),
            package: "pkg".to_owned(),
            title: "title".to_owned(),
            url: "https://vuln.example".to_owned(),
            from: from.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn project_with_pom() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
        dir
    }

    #[test]
    fn builder_creates_scanner() {
        let scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .build()
            .unwrap();
        assert!(scanner.last_outcome().is_none());
        assert_eq!(scanner.project_root(), Path::new("."));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = MavenScannerBuilder::new()
            .config(MavenScannerConfig {
                request_timeout_secs: 0,
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn detect_requires_token() {
        let scanner = MavenScannerBuilder::new()
            .build_with_client(MockScanClient::default())
            .unwrap();
        assert_eq!(scanner.detect(), None);

        let scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .build_with_client(MockScanClient::default())
            .unwrap();
        assert_eq!(scanner.detect().as_deref(), Some(COMPONENT_ID));
    }

    #[test]
    fn release_contributes_nothing() {
        let scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .build_with_client(MockScanClient::default())
            .unwrap();
        assert!(scanner.release().is_none());
    }

    #[tokio::test]
    async fn scan_without_token_is_config_error() {
        let dir = project_with_pom();
        let scanner = MavenScannerBuilder::new()
            .build_with_client(MockScanClient::default())
            .unwrap();
        let err = scanner.scan(dir.path()).await.unwrap_err();
        assert!(matches!(err, MavenScannerError::Config { .. }));
    }

    #[tokio::test]
    async fn empty_project_skips_remote_call() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .build_with_client(MockScanClient::failing(500))
            .unwrap();

        let outcome = scanner.scan(dir.path()).await.unwrap();
        assert!(!outcome.was_scanned());
        assert!(outcome.issues.is_empty());
        assert!(!outcome.must_fail);
    }

    #[tokio::test]
    async fn clean_verdict_passes() {
        let dir = project_with_pom();
        let scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .build_with_client(MockScanClient::returning(ScanResult {
                ok: true,
                dependency_count: 42,
                ..Default::default()
            }))
            .unwrap();

        let outcome = scanner.scan(dir.path()).await.unwrap();
        assert_eq!(outcome.manifests_submitted, 1);
        assert_eq!(
            outcome.summary_line(),
            "Tested 42 dependencies. No vulnerabilities found."
        );
    }

    #[tokio::test]
    async fn compile_fails_on_vulnerabilities_and_keeps_outcome() {
        let dir = project_with_pom();
        let mut scanner = MavenScannerBuilder::new()
            .config(
                config()
                    .severity_threshold(Severity::Medium)
                    .build()
                    .unwrap(),
            )
            .project_root(dir.path())
            .build_with_client(MockScanClient::returning(ScanResult {
                ok: false,
                dependency_count: 9,
                vulnerabilities: vec![
                    raw("x1", "low", &[]),
                    raw("x2", "high", &["a", "b"]),
                    raw("x3", "medium", &["c"]),
                ],
                ..Default::default()
            }))
            .unwrap();

        let err = scanner.compile().await.unwrap_err();
        assert!(matches!(
            err,
            PomgateError::Scan(ScanError::VulnerabilitiesFound { unique: 2, paths: 3 })
        ));

        let outcome = scanner.last_outcome().unwrap();
        let ids: Vec<_> = outcome.issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x3", "x2"]);
    }

    #[tokio::test]
    async fn compile_warn_only_passes() {
        let dir = project_with_pom();
        let mut scanner = MavenScannerBuilder::new()
            .config(config().fail_on_discovery(false).build().unwrap())
            .project_root(dir.path())
            .build_with_client(MockScanClient::returning(ScanResult {
                ok: false,
                vulnerabilities: vec![raw("x", "high", &["a"])],
                ..Default::default()
            }))
            .unwrap();

        scanner.compile().await.unwrap();
        assert_eq!(scanner.last_outcome().unwrap().issues.len(), 1);
    }

    #[tokio::test]
    async fn remote_error_aborts_pipeline() {
        let dir = project_with_pom();
        let mut scanner = MavenScannerBuilder::new()
            .config(config().build().unwrap())
            .project_root(dir.path())
            .build_with_client(MockScanClient::failing(500))
            .unwrap();

        let err = scanner.compile().await.unwrap_err();
        assert!(matches!(err, PomgateError::Scan(ScanError::Remote(_))));
        assert!(scanner.last_outcome().is_none());
    }

    #[tokio::test]
    async fn org_is_passed_to_request() {
        let dir = project_with_pom();
        let scanner = MavenScannerBuilder::new()
            .config(config().org_name("acme").build().unwrap())
            .build_with_client(MockScanClient::returning(ScanResult::default()))
            .unwrap();

        scanner.scan(dir.path()).await.unwrap();
        let requests = scanner.client.requests.lock().unwrap();
        assert_eq!(requests[0].org.as_deref(), Some("acme"));
    }
}
