//! 스캔 요청 페이로드
//!
//! 첫 번째 manifest가 대상(`target`)이 되고 나머지는 순서대로 `additional`에 들어갑니다.
//!
//! ```text
//! {"encoding":"plain","files":{"target":{"contents":"..."},"additional":[{"contents":"..."}]}}
//! ```
//!
//! 조직 이름은 본문에 넣지 않고 `?org=` 쿼리 파라미터로만 전달합니다.

use serde::Serialize;

use crate::error::MavenScannerError;
use crate::manifest::Manifest;

/// manifest 내용 인코딩
pub const PLAIN_ENCODING: &str = "plain";

/// 파일 한 건의 내용
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContents {
    /// manifest 원문
    pub contents: String,
}

/// 요청에 포함되는 파일 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestFiles {
    /// 대상 manifest
    pub target: FileContents,
    /// 추가 manifest (비어 있으면 직렬화하지 않음)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<FileContents>,
}

/// 원격 스캔 요청
///
/// 스캔마다 새로 만들고, 한 번 직렬화한 뒤 버립니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    /// 인코딩 (항상 `plain`)
    pub encoding: &'static str,
    /// 파일 묶음
    pub files: RequestFiles,
    /// 조직 이름 (쿼리 파라미터)
    #[serde(skip)]
    pub org: Option<String>,
}

impl ScanRequest {
    /// manifest 목록으로 요청을 만듭니다.
    ///
    /// 빈 문자열 조직 이름은 없는 것으로 취급합니다.
    ///
    /// # Errors
    ///
    /// manifest가 하나도 없으면 `NoManifestsFound`
    pub fn build(manifests: Vec<Manifest>, org: Option<&str>) -> Result<Self, MavenScannerError> {
        let mut contents = manifests.into_iter().map(|m| FileContents {
            contents: m.content,
        });

        let target = contents.next().ok_or(MavenScannerError::NoManifestsFound)?;
        let additional = contents.collect();

        Ok(Self {
            encoding: PLAIN_ENCODING,
            files: RequestFiles { target, additional },
            org: org.filter(|o| !o.is_empty()).map(str::to_owned),
        })
    }

    /// 요청에 포함된 manifest 수 (대상 + 추가)
    pub fn manifest_count(&self) -> usize {
        1 + self.files.additional.len()
    }

    /// 요청 본문을 JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, MavenScannerError> {
        serde_json::to_string(self)
            .map_err(|e| MavenScannerError::Task(format!("failed to serialize request: {e}")))
    }
}
