#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pomgate_maven_scanner::{Manifest, ManifestOrigin, ScanRequest};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    contents: Vec<String>,
    org: Option<String>,
}

fuzz_target!(|input: FuzzInput| {
    if input.contents.len() > 32 {
        return;
    }

    let count = input.contents.len();
    let manifests: Vec<Manifest> = input
        .contents
        .into_iter()
        .enumerate()
        .map(|(i, content)| Manifest {
            origin: ManifestOrigin::File {
                path: format!("m{i}/pom.xml").into(),
            },
            content,
        })
        .collect();

    let Ok(request) = ScanRequest::build(manifests, input.org.as_deref()) else {
        assert_eq!(count, 0, "only an empty manifest list may be rejected");
        return;
    };
    assert_eq!(request.manifest_count(), count);

    let body = request.to_json().expect("request serializes");
    let parsed: serde_json::Value = serde_json::from_str(&body).expect("body is JSON");
    assert_eq!(parsed["encoding"], "plain");
    assert!(parsed.get("org").is_none());
});
