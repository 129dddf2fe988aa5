//! Maven 스캐너 설정
//!
//! [`MavenScannerConfig`]는 core의 [`ScanConfig`](pomgate_core::config::ScanConfig)를
//! 타입이 있는 값으로 변환한 런타임 설정입니다.
//!
//! # 사용 예시
//!
//! ```
//! use pomgate_maven_scanner::{MavenScannerConfig, MavenScannerConfigBuilder};
//! use pomgate_core::types::Severity;
//!
//! // 기본값으로 생성
//! let config = MavenScannerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! let config = MavenScannerConfigBuilder::new()
//!     .api_token("token")
//!     .severity_threshold(Severity::High)
//!     .build()
//!     .unwrap();
//! assert!(config.has_token());
//! ```

use std::time::Duration;

use pomgate_core::config::{DEFAULT_API_URL, ScanConfig};
use pomgate_core::types::Severity;
use serde::{Deserialize, Serialize};

use crate::error::MavenScannerError;

/// 설정 상한값 상수
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
const MAX_MANIFEST_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// Maven 스캐너 설정
///
/// # 필드
///
/// - **api_token**: 스캔 서비스 토큰 (비어 있으면 `detect`가 `None`)
/// - **api_url**: 스캔 서비스 주소 (끝의 `/` 제거됨)
/// - **org_name**: 조직 이름 (`?org=` 쿼리 파라미터)
/// - **severity_threshold**: 보고 최소 심각도
/// - **fail_on_discovery**: 취약점 발견 시 빌드 실패 여부
/// - **request_timeout_secs**: 요청 타임아웃 (초)
/// - **max_manifest_size**: manifest 최대 크기 (바이트)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MavenScannerConfig {
    /// 스캔 서비스 API 토큰
    pub api_token: String,
    /// 스캔 서비스 API 주소
    pub api_url: String,
    /// 조직 이름
    pub org_name: Option<String>,
    /// 보고 최소 심각도
    pub severity_threshold: Severity,
    /// 취약점 발견 시 빌드 실패 여부
    pub fail_on_discovery: bool,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// manifest 최대 크기 (바이트)
    pub max_manifest_size: usize,
}

impl Default for MavenScannerConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            org_name: None,
            severity_threshold: Severity::Low,
            fail_on_discovery: true,
            request_timeout_secs: 30,
            max_manifest_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl MavenScannerConfig {
    /// core의 `ScanConfig`에서 스캐너 설정을 생성합니다.
    ///
    /// 빈 `org_name`은 `None`으로 변환됩니다.
    ///
    /// # Errors
    ///
    /// 알 수 없는 `severity_threshold`이면 `Config` 에러를 반환합니다.
    pub fn from_core(core: &ScanConfig) -> Result<Self, MavenScannerError> {
        let severity_threshold = Severity::from_str_loose(&core.severity_threshold).ok_or_else(
            || MavenScannerError::Config {
                field: "severity_threshold".to_owned(),
                reason: format!(
                    "'{}' must be one of: low, medium, high",
                    core.severity_threshold
                ),
            },
        )?;
        let org_name = Some(core.org_name.trim())
            .filter(|org| !org.is_empty())
            .map(str::to_owned);

        Ok(Self {
            api_token: core.api_token.trim().to_owned(),
            api_url: normalize_api_url(&core.api_url),
            org_name,
            severity_threshold,
            fail_on_discovery: core.fail_on_discovery,
            request_timeout_secs: core.request_timeout_secs,
            max_manifest_size: core.max_manifest_size,
        })
    }

    /// API 토큰이 설정되어 있는지 반환합니다.
    pub fn has_token(&self) -> bool {
        !self.api_token.is_empty()
    }

    /// 요청 타임아웃
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `api_url`: 비어 있지 않고 `http://` 또는 `https://`로 시작
    /// - `request_timeout_secs`: 1-600
    /// - `max_manifest_size`: 1-104857600 (100MB)
    ///
    /// 토큰은 여기서 검증하지 않습니다. 토큰이 없는 설정도 `detect`에는 유효합니다.
    pub fn validate(&self) -> Result<(), MavenScannerError> {
        if self.api_url.is_empty() {
            return Err(MavenScannerError::Config {
                field: "api_url".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(MavenScannerError::Config {
                field: "api_url".to_owned(),
                reason: format!("'{}' must start with https:// or http://", self.api_url),
            });
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(MavenScannerError::Config {
                field: "request_timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_REQUEST_TIMEOUT_SECS}"),
            });
        }

        if self.max_manifest_size == 0 || self.max_manifest_size > MAX_MANIFEST_SIZE {
            return Err(MavenScannerError::Config {
                field: "max_manifest_size".to_owned(),
                reason: format!("must be 1-{MAX_MANIFEST_SIZE}"),
            });
        }

        if self.org_name.as_deref().is_some_and(str::is_empty) {
            return Err(MavenScannerError::Config {
                field: "org_name".to_owned(),
                reason: "must not be empty when set".to_owned(),
            });
        }

        Ok(())
    }
}

/// 앞뒤 공백과 끝의 `/`를 제거합니다.
fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

/// [`MavenScannerConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct MavenScannerConfigBuilder {
    config: MavenScannerConfig,
}

impl MavenScannerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// API 토큰을 설정합니다.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = token.into();
        self
    }

    /// API 주소를 설정합니다.
    pub fn api_url(mut self, url: impl AsRef<str>) -> Self {
        self.config.api_url = normalize_api_url(url.as_ref());
        self
    }

    /// 조직 이름을 설정합니다.
    pub fn org_name(mut self, org: impl Into<String>) -> Self {
        self.config.org_name = Some(org.into());
        self
    }

    /// 보고 최소 심각도를 설정합니다.
    pub fn severity_threshold(mut self, severity: Severity) -> Self {
        self.config.severity_threshold = severity;
        self
    }

    /// 취약점 발견 시 빌드 실패 여부를 설정합니다.
    pub fn fail_on_discovery(mut self, fail: bool) -> Self {
        self.config.fail_on_discovery = fail;
        self
    }

    /// 요청 타임아웃(초)을 설정합니다.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// manifest 최대 크기를 설정합니다.
    pub fn max_manifest_size(mut self, size: usize) -> Self {
        self.config.max_manifest_size = size;
        self
    }

    /// 설정을 빌드합니다 (유효성 검증 포함).
    pub fn build(self) -> Result<MavenScannerConfig, MavenScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
