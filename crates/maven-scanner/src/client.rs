//! 원격 스캔 서비스 클라이언트
//!
//! [`ScanClient`] trait으로 전송 계층을 추상화합니다.
//! 프로덕션은 [`HttpScanClient`], 테스트는 `MockScanClient`를 사용합니다.
//!
//! # 요청 형식
//!
//! ```text
//! POST {api_url}/v1/test/maven[?org=<name>]
//! Authorization: token <api_token>
//! Content-Type: application/json
//! ```
//!
//! 2xx가 아닌 응답은 `RemoteService`, 본문 파싱 실패는 `ResponseParse`,
//! 전송 실패는 `Network` 에러입니다. 재시도와 캐시는 없습니다.

use std::future::Future;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::MavenScannerConfig;
use crate::error::MavenScannerError;
use crate::request::ScanRequest;
use crate::result::ScanResult;

/// Maven 테스트 엔드포인트 경로
pub const TEST_ENDPOINT_PATH: &str = "/v1/test/maven";

/// 에러 메시지에 포함할 응답 본문 최대 길이
const MAX_ERROR_BODY_LEN: usize = 1024;

/// 원격 스캔 서비스 추상화
///
/// # 구현체
///
/// - [`HttpScanClient`]: reqwest 기반 프로덕션 구현
/// - `MockScanClient`: 고정 응답을 반환하는 테스트 구현 (테스트에서만 사용 가능)
pub trait ScanClient: Send + Sync {
    /// 요청을 한 번 전송하고 결과를 반환합니다.
    fn test(
        &self,
        request: &ScanRequest,
    ) -> impl Future<Output = Result<ScanResult, MavenScannerError>> + Send;
}

/// reqwest 기반 스캔 클라이언트
pub struct HttpScanClient {
    http: Client,
    endpoint: Url,
    api_token: String,
}

impl HttpScanClient {
    /// 설정에서 클라이언트를 생성합니다.
    pub fn new(config: &MavenScannerConfig) -> Result<Self, MavenScannerError> {
        let base = config.api_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}{TEST_ENDPOINT_PATH}")).map_err(|e| {
            MavenScannerError::Config {
                field: "api_url".to_owned(),
                reason: format!("invalid url '{base}': {e}"),
            }
        })?;

        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("pomgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MavenScannerError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }

    /// 요청 URL (조직 이름이 있으면 `org` 쿼리 포함)
    pub fn request_url(&self, org: Option<&str>) -> Url {
        let mut url = self.endpoint.clone();
        if let Some(org) = org.filter(|o| !o.is_empty()) {
            url.query_pairs_mut().append_pair("org", org);
        }
        url
    }
}

impl ScanClient for HttpScanClient {
    async fn test(&self, request: &ScanRequest) -> Result<ScanResult, MavenScannerError> {
        let url = self.request_url(request.org.as_deref());
        let body = request.to_json()?;

        debug!(
            url = %url,
            manifests = request.manifest_count(),
            bytes = body.len(),
            "sending scan request"
        );

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("token {}", self.api_token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MavenScannerError::Network(format!("request timed out: {e}"))
                } else {
                    MavenScannerError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MavenScannerError::Network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), body = %text, "scan service returned error");
            return Err(MavenScannerError::RemoteService {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_LEN),
            });
        }

        ScanResult::from_json(&text)
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_owned(),
    }
}

/// 테스트용 Mock 스캔 클라이언트
///
/// 고정 응답을 반환하고 받은 요청을 기록합니다.
#[cfg(test)]
#[derive(Default)]
pub struct MockScanClient {
    /// 반환할 결과 (None이면 `fail_status`로 실패)
    pub result: Option<ScanResult>,
    /// 실패 시 HTTP 상태 코드
    pub fail_status: u16,
    /// 받은 요청
    pub requests: std::sync::Mutex<Vec<ScanRequest>>,
}

#[cfg(test)]
impl MockScanClient {
    /// 주어진 결과를 반환하는 mock을 생성합니다.
    pub fn returning(result: ScanResult) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    /// 주어진 상태 코드로 실패하는 mock을 생성합니다.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: status,
            ..Self::default()
        }
    }

    /// 받은 요청 수
    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl ScanClient for MockScanClient {
    async fn test(&self, request: &ScanRequest) -> Result<ScanResult, MavenScannerError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.result
            .clone()
            .ok_or_else(|| MavenScannerError::RemoteService {
                status: self.fail_status,
                body: "mock failure".to_owned(),
            })
    }
}
