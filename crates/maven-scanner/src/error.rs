//! Maven 스캐너 에러 타입
//!
//! [`MavenScannerError`]는 스캐너 모듈 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<MavenScannerError> for PomgateError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **manifest 탐색**: `RootNotFound`, `Io`, `ArchiveOpen`, `ArchiveEntry`, `ManifestTooLarge`
//! - **요청 생성**: `NoManifestsFound`
//! - **원격 서비스**: `Network`, `RemoteService`, `ResponseParse`
//! - **빌드 게이트**: `VulnerabilitiesFound`
//! - **설정**: `Config`
//! - **태스크**: `Task`

use pomgate_core::error::{ConfigError, PomgateError, ScanError};

/// Maven 스캐너 도메인 에러
///
/// `VulnerabilitiesFound`를 제외한 모든 변형은 파이프라인을 즉시 중단시킵니다.
/// 재시도는 하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum MavenScannerError {
    /// 스캔할 manifest가 없음 (요청 생성 단계에서만 발생)
    #[error("no manifests found to scan")]
    NoManifestsFound,

    /// 프로젝트 루트가 존재하지 않음
    #[error("project root not found: {path}")]
    RootNotFound {
        /// 루트 경로
        path: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 아카이브를 열 수 없음 (zip 형식이 아니거나 읽기 실패)
    #[error("cannot open archive: {path}: {reason}")]
    ArchiveOpen {
        /// 아카이브 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 아카이브 항목을 읽을 수 없음
    #[error("cannot read archive entry: {archive}!{entry}: {reason}")]
    ArchiveEntry {
        /// 아카이브 경로
        archive: String,
        /// 항목 이름
        entry: String,
        /// 실패 사유
        reason: String,
    },

    /// manifest 크기 초과
    #[error("manifest too large: {origin}: {size} bytes (max: {max})")]
    ManifestTooLarge {
        /// manifest 위치
        origin: String,
        /// 실제 크기 (바이트)
        size: u64,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 네트워크 전송 실패 (연결, 타임아웃)
    #[error("network error: {0}")]
    Network(String),

    /// 원격 서비스가 2xx가 아닌 상태 코드를 반환
    #[error("remote service returned HTTP {status}: {body}")]
    RemoteService {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문
        body: String,
    },

    /// 응답 본문 파싱 실패
    #[error("failed to parse scan response: {0}")]
    ResponseParse(String),

    /// 기준 이상의 취약점 발견 (빌드 실패)
    #[error("found {unique} unique vulnerabilities across {paths} vulnerable paths")]
    VulnerabilitiesFound {
        /// 고유 취약점 ID 수
        unique: usize,
        /// 취약 경로 수
        paths: usize,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// blocking 태스크 실행 실패
    #[error("task error: {0}")]
    Task(String),
}

impl From<MavenScannerError> for PomgateError {
    fn from(err: MavenScannerError) -> Self {
        match err {
            MavenScannerError::Io { path, source } => {
                PomgateError::Io(std::io::Error::new(source.kind(), format!("{path}: {source}")))
            }
            MavenScannerError::Config { field, reason } => {
                PomgateError::Config(ConfigError::InvalidValue { field, reason })
            }
            MavenScannerError::VulnerabilitiesFound { unique, paths } => {
                PomgateError::Scan(ScanError::VulnerabilitiesFound { unique, paths })
            }
            e @ (MavenScannerError::NoManifestsFound
            | MavenScannerError::RootNotFound { .. }
            | MavenScannerError::ArchiveOpen { .. }
            | MavenScannerError::ArchiveEntry { .. }
            | MavenScannerError::ManifestTooLarge { .. }
            | MavenScannerError::Task(_)) => PomgateError::Scan(ScanError::Discovery(e.to_string())),
            e @ (MavenScannerError::Network(_)
            | MavenScannerError::RemoteService { .. }
            | MavenScannerError::ResponseParse(_)) => {
                PomgateError::Scan(ScanError::Remote(e.to_string()))
            }
        }
    }
}
