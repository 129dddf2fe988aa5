//! 설정 관리: pomgate.toml 파싱 및 런타임 설정
//!
//! [`PomgateConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선, 각 명령에서 적용)
//! 2. 환경변수 (`SNYK_TOKEN`, `POMGATE_SCAN_API_TOKEN` 형식)
//! 3. 서비스 바인딩 자격 증명 (`VCAP_SERVICES`)
//! 4. 설정 파일 (`pomgate.toml`)
//! 5. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), pomgate_core::error::PomgateError> {
//! use pomgate_core::config::PomgateConfig;
//!
//! // 파일에서 로드 + 서비스 바인딩 + 환경변수 오버라이드
//! let config = PomgateConfig::load("pomgate.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = PomgateConfig::parse("[scan]\nseverity_threshold = \"high\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, PomgateError};
use crate::types::Severity;

/// 기본 스캔 API 주소
pub const DEFAULT_API_URL: &str = "https://snyk.io/api";

/// 서비스 바인딩 탐색 시 이름/라벨/태그에 포함되어야 하는 문자열
pub const SERVICE_FILTER: &str = "snyk";

/// 서비스 바인딩 목록을 담는 환경변수
pub const SERVICE_BINDINGS_ENV: &str = "VCAP_SERVICES";

/// 설정 상한값 상수
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
const MAX_MANIFEST_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// pomgate 통합 설정
///
/// `pomgate.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 모듈은 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PomgateConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl PomgateConfig {
    /// TOML 파일에서 설정을 로드하고 서비스 바인딩, 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 서비스 바인딩 자격 증명 적용
    /// 3. 환경변수 오버라이드 적용
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, PomgateError> {
        let mut config = Self::from_file(path).await?;
        config.apply_overrides();
        config.validate()?;
        Ok(config)
    }

    /// `load`와 같지만 설정 파일이 없으면 기본값에서 시작합니다.
    ///
    /// 빌드 환경에서는 설정 파일 없이 환경변수만으로 구동하는 경우가 일반적입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PomgateError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(PomgateError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, PomgateError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PomgateError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                PomgateError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, PomgateError> {
        toml::from_str(toml_str).map_err(|e| {
            PomgateError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 서비스 바인딩과 환경변수 오버라이드를 순서대로 적용합니다.
    pub fn apply_overrides(&mut self) {
        self.apply_service_binding();
        self.apply_env_overrides();
    }

    /// `VCAP_SERVICES` 환경변수에서 스캔 서비스 자격 증명을 찾아 적용합니다.
    pub fn apply_service_binding(&mut self) {
        let Ok(raw) = std::env::var(SERVICE_BINDINGS_ENV) else {
            return;
        };
        if let Some(credentials) = find_service_credentials(&raw, SERVICE_FILTER) {
            debug!("scan service binding found");
            self.apply_service_credentials(&credentials);
        }
    }

    /// 서비스 바인딩 자격 증명을 스캔 설정에 반영합니다.
    pub fn apply_service_credentials(&mut self, credentials: &ServiceCredentials) {
        self.scan.api_token = credentials.api_token.clone();
        self.scan.api_url = credentials.api_url.clone();
        self.scan.org_name = credentials.org_name.clone();
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `POMGATE_{SECTION}_{FIELD}`
    /// 예: `POMGATE_SCAN_SEVERITY_THRESHOLD=high`
    ///
    /// 관례적 이름(`SNYK_TOKEN`, `SNYK_API`, `SNYK_ORG_NAME`,
    /// `SNYK_SEVERITY_THRESHOLD`, `SNYK_DONT_BREAK_BUILD`)이 나중에 적용되어 우선합니다.
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "POMGATE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "POMGATE_GENERAL_LOG_FORMAT");

        // Scan
        override_string(&mut self.scan.api_token, "POMGATE_SCAN_API_TOKEN");
        override_string(&mut self.scan.api_url, "POMGATE_SCAN_API_URL");
        override_string(&mut self.scan.org_name, "POMGATE_SCAN_ORG_NAME");
        override_string(
            &mut self.scan.severity_threshold,
            "POMGATE_SCAN_SEVERITY_THRESHOLD",
        );
        override_bool(
            &mut self.scan.fail_on_discovery,
            "POMGATE_SCAN_FAIL_ON_DISCOVERY",
        );
        override_u64(
            &mut self.scan.request_timeout_secs,
            "POMGATE_SCAN_REQUEST_TIMEOUT_SECS",
        );
        override_usize(
            &mut self.scan.max_manifest_size,
            "POMGATE_SCAN_MAX_MANIFEST_SIZE",
        );

        // 관례적 이름
        override_string(&mut self.scan.api_token, "SNYK_TOKEN");
        override_string(&mut self.scan.api_url, "SNYK_API");
        override_string(&mut self.scan.org_name, "SNYK_ORG_NAME");
        override_string(&mut self.scan.severity_threshold, "SNYK_SEVERITY_THRESHOLD");

        let mut dont_break_build = !self.scan.fail_on_discovery;
        override_bool(&mut dont_break_build, "SNYK_DONT_BREAK_BUILD");
        self.scan.fail_on_discovery = !dont_break_build;
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PomgateError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.scan.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 스캔 설정
///
/// 문자열 필드는 스캐너 크레이트의 `MavenScannerConfig::from_core`에서
/// 타입이 있는 값으로 변환됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 스캔 서비스 API 토큰 (비어 있으면 컴포넌트 비활성)
    pub api_token: String,
    /// 스캔 서비스 API 주소
    pub api_url: String,
    /// 조직 이름 (비어 있으면 쿼리 파라미터 생략)
    pub org_name: String,
    /// 보고 최소 심각도 (low, medium, high)
    pub severity_threshold: String,
    /// 취약점 발견 시 빌드 실패 여부
    pub fail_on_discovery: bool,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// manifest 최대 크기 (바이트)
    pub max_manifest_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            org_name: String::new(),
            severity_threshold: "low".to_owned(),
            fail_on_discovery: true,
            request_timeout_secs: 30,
            max_manifest_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl ScanConfig {
    /// API 토큰이 설정되어 있는지 반환합니다.
    pub fn has_token(&self) -> bool {
        !self.api_token.trim().is_empty()
    }

    /// 스캔 설정의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), PomgateError> {
        if Severity::from_str_loose(&self.severity_threshold).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "scan.severity_threshold".to_owned(),
                reason: "must be one of: low, medium, high".to_owned(),
            }
            .into());
        }

        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.api_url".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }
        if !api_url.starts_with("https://") && !api_url.starts_with("http://") {
            return Err(ConfigError::InvalidValue {
                field: "scan.api_url".to_owned(),
                reason: "must start with https:// or http://".to_owned(),
            }
            .into());
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                field: "scan.request_timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_REQUEST_TIMEOUT_SECS}"),
            }
            .into());
        }

        if self.max_manifest_size == 0 || self.max_manifest_size > MAX_MANIFEST_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_manifest_size".to_owned(),
                reason: format!("must be 1-{MAX_MANIFEST_SIZE}"),
            }
            .into());
        }

        Ok(())
    }
}

// --- 서비스 바인딩 ---

/// 서비스 바인딩에서 읽은 스캔 서비스 자격 증명
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCredentials {
    /// `apiToken`
    pub api_token: String,
    /// `apiUrl`
    pub api_url: String,
    /// `orgName`
    pub org_name: String,
}

/// 서비스 바인딩 JSON에서 스캔 서비스 자격 증명을 찾습니다.
///
/// 이름, 라벨, 태그 중 하나에 `filter`가 포함되고(대소문자 무시)
/// `credentials`에 `apiToken`, `apiUrl`, `orgName`이 모두 있는 첫 번째 서비스를 사용합니다.
/// JSON이 잘못되었으면 경고 후 `None`을 반환합니다.
pub fn find_service_credentials(raw: &str, filter: &str) -> Option<ServiceCredentials> {
    let bindings: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "failed to parse service bindings, ignoring");
            return None;
        }
    };

    let filter = filter.to_lowercase();
    let services = bindings.as_object()?.values().filter_map(|v| v.as_array()).flatten();

    for service in services {
        if !service_matches(service, &filter) {
            continue;
        }

        let Some(credentials) = service.get("credentials") else {
            continue;
        };
        let field = |key: &str| credentials.get(key).and_then(|v| v.as_str()).map(str::to_owned);

        if let (Some(api_token), Some(api_url), Some(org_name)) =
            (field("apiToken"), field("apiUrl"), field("orgName"))
        {
            return Some(ServiceCredentials {
                api_token,
                api_url,
                org_name,
            });
        }
    }

    None
}

fn service_matches(service: &serde_json::Value, filter: &str) -> bool {
    let contains = |v: &serde_json::Value| {
        v.as_str()
            .is_some_and(|s| s.to_lowercase().contains(filter))
    };

    service.get("name").is_some_and(contains)
        || service.get("label").is_some_and(contains)
        || service
            .get("tags")
            .and_then(|t| t.as_array())
            .is_some_and(|tags| tags.iter().any(contains))
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
