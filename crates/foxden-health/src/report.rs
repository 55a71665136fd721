//! Plain-text rendering of a probe report for console output.

use crate::probe::{ProbeReport, ProbeStatus};

/// Render a probe report as a console summary.
pub fn render_summary(report: &ProbeReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("provider scan at {}\n", report.checked_at));
    for result in &report.results {
        let (label, detail) = match result.status {
            ProbeStatus::Ok => (
                "ok     ",
                format!("{} ms", result.elapsed_ms.unwrap_or_default()),
            ),
            ProbeStatus::Error => (
                "error  ",
                result.error.clone().unwrap_or_default(),
            ),
            ProbeStatus::Timeout => (
                "timeout",
                result.error.clone().unwrap_or_default(),
            ),
        };
        out.push_str(&format!(
            "  {label} {:<44} {} {detail}\n",
            result.address, result.endpoint_url
        ));
    }
    out.push_str(&format!(
        "total {}  healthy {}  errored {}  timed out {}\n",
        report.total, report.healthy, report.errored, report.timed_out
    ));

    if report.total > 0 && report.healthy == 0 {
        out.push_str("warning: no provider is currently reachable\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeOutcome;

    fn report(results: Vec<ProbeOutcome>) -> ProbeReport {
        let healthy = results.iter().filter(|r| r.status == ProbeStatus::Ok).count();
        let errored = results.iter().filter(|r| r.status == ProbeStatus::Error).count();
        let timed_out = results.iter().filter(|r| r.status == ProbeStatus::Timeout).count();
        ProbeReport {
            checked_at: "2025-11-01T00:00:00.000Z".into(),
            total: results.len(),
            healthy,
            errored,
            timed_out,
            results,
        }
    }

    fn outcome(status: ProbeStatus) -> ProbeOutcome {
        ProbeOutcome {
            address: "0xaaa".into(),
            endpoint_url: "http://provider.example/ping".into(),
            status,
            error: (status != ProbeStatus::Ok).then(|| "HTTP 500".into()),
            elapsed_ms: (status != ProbeStatus::Timeout).then_some(42),
        }
    }

    #[test]
    fn summary_lists_every_provider_and_the_totals() {
        let text = render_summary(&report(vec![
            outcome(ProbeStatus::Ok),
            outcome(ProbeStatus::Error),
            outcome(ProbeStatus::Timeout),
        ]));

        assert_eq!(text.matches("0xaaa").count(), 3);
        assert!(text.contains("total 3  healthy 1  errored 1  timed out 1"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn summary_warns_when_nothing_is_healthy() {
        let text = render_summary(&report(vec![outcome(ProbeStatus::Error)]));
        assert!(text.contains("warning: no provider is currently reachable"));
    }

    #[test]
    fn empty_scan_has_no_warning() {
        let text = render_summary(&report(Vec::new()));
        assert!(text.contains("total 0"));
        assert!(!text.contains("warning"));
    }
}
