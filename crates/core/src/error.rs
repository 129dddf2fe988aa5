//! 에러 타입: 도메인별 에러 정의

/// pomgate 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum PomgateError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 스캔 파이프라인 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 스캔 파이프라인 에러
///
/// 스캐너 크레이트의 상세 에러가 이 분류로 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// manifest 탐색 실패 (파일 시스템, 아카이브)
    #[error("manifest discovery failed: {0}")]
    Discovery(String),

    /// 원격 스캔 서비스 호출 실패 (네트워크, HTTP 상태, 응답 파싱)
    #[error("remote scan failed: {0}")]
    Remote(String),

    /// 스캔 결과 해석 실패
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// 취약점 발견으로 빌드 중단
    #[error("found {unique} unique vulnerabilities across {paths} vulnerable paths")]
    VulnerabilitiesFound { unique: usize, paths: usize },
}
