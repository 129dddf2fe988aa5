#![no_main]

use libfuzzer_sys::fuzz_target;
use pomgate_core::types::Severity;
use pomgate_maven_scanner::report;
use pomgate_maven_scanner::{IssueEvaluator, ScanResult, ScanSummary};

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(result) = ScanResult::from_json(body) else {
        return;
    };

    for threshold in Severity::ALL {
        let issues = IssueEvaluator::new(threshold).evaluate(&result);
        let summary = ScanSummary::from_issues(result.dependency_count, &issues);

        assert!(issues.len() <= result.raw_issue_count());
        assert!(summary.unique_vulnerabilities <= issues.len());
        if issues.is_empty() {
            assert!(summary.is_clean());
        }

        for issue in &issues {
            let _ = report::issue_lines(issue);
        }
        let _ = report::summary_line(result.dependency_count, &issues);
    }
});
