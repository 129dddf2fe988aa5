#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use pomgate_core::types::Severity;
use pomgate_maven_scanner::{IssueEvaluator, IssueSets, RawIssue, ScanResult};

/// 퍼저용 구조적 이슈 입력
#[derive(Arbitrary, Debug)]
struct FuzzIssue {
    id: String,
    severity: Option<String>,
    from: Vec<String>,
    license: bool,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    threshold: u8,
    issues: Vec<FuzzIssue>,
}

fuzz_target!(|input: FuzzInput| {
    // 이슈 수 제한 (퍼징 성능)
    if input.issues.len() > 64 {
        return;
    }

    let threshold = Severity::ALL[usize::from(input.threshold) % Severity::ALL.len()];

    let mut vulnerabilities = Vec::new();
    let mut licenses = Vec::new();
    for issue in input.issues {
        let raw = RawIssue {
            id: issue.id,
            severity: issue.severity,
            package: "fuzz:pkg".to_owned(),
            title: String::new(),
            url: String::new(),
            from: issue.from,
        };
        if issue.license {
            licenses.push(raw);
        } else {
            vulnerabilities.push(raw);
        }
    }

    let result = ScanResult {
        ok: false,
        dependency_count: 0,
        vulnerabilities,
        issues: IssueSets {
            vulnerabilities: Vec::new(),
            licenses,
        },
    };

    let issues = IssueEvaluator::new(threshold).evaluate(&result);

    // 임계값 이상만 남고 점수 오름차순이어야 함
    for issue in &issues {
        assert!(issue.severity >= threshold);
    }
    for pair in issues.windows(2) {
        assert!(pair[0].score() <= pair[1].score());
    }
});
