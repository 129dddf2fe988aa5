//! 통합 테스트 공용 헬퍼
//!
//! - 임시 프로젝트 트리 / jar 생성
//! - 스캔 서비스 mock (wiremock)

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};
use zip::write::SimpleFileOptions;

/// 스캔 엔드포인트 경로
pub const SCAN_PATH: &str = "/v1/test/maven";

/// 스캔 엔드포인트에 고정 응답을 돌려주는 mock 서비스를 시작합니다.
pub async fn scan_service(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SCAN_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;
    server
}

/// 서버가 받은 유일한 요청을 반환합니다.
pub async fn single_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1, "exactly one scan request expected");
    requests.remove(0)
}

/// 서버가 받은 유일한 요청 본문을 JSON으로 파싱합니다.
pub async fn single_request_body(server: &MockServer) -> serde_json::Value {
    let request = single_request(server).await;
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

/// 연결을 받지 않는 주소를 반환합니다.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// 파일을 씁니다 (상위 디렉토리 생성).
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(&path, content).expect("write file");
    path
}

/// jar(zip) 파일을 씁니다. 이름이 `/`로 끝나면 디렉토리 항목입니다.
pub fn write_jar(root: &Path, rel: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }

    let file = std::fs::File::create(&path).expect("create jar");
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).expect("add dir");
        } else {
            writer.start_file(*name, options).expect("start file");
            writer.write_all(content.as_bytes()).expect("write entry");
        }
    }
    writer.finish().expect("finish jar");
    path
}

/// Scenario B 형태의 응답 본문
pub const MIXED_VERDICT: &str = r#"{
    "ok": false,
    "dependencyCount": 17,
    "vulnerabilities": [
        {"id": "x1", "severity": "low", "package": "a", "title": "t1", "url": "https://v/x1", "from": []},
        {"id": "x2", "severity": "high", "package": "b", "title": "t2", "url": "https://v/x2", "from": ["a", "b"]},
        {"id": "x3", "severity": "medium", "package": "c", "title": "t3", "url": "https://v/x3", "from": ["c"]}
    ]
}"#;
