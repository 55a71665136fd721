//! Probe execution and classification.

use std::time::{Duration, Instant};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::debug;

/// Per-probe deadline. A provider that has not answered by then is
/// abandoned and classified as timed out.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// One provider to probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Provider account address (reporting only).
    pub address: String,
    /// URL probed with a plain GET.
    pub endpoint_url: String,
}

/// Classification of one probe. Every probe lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Ok,
    Error,
    Timeout,
}

/// Result of probing one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub address: String,
    pub endpoint_url: String,
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall time of the exchange; absent for abandoned (timed out) probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

/// The full scan result: per-provider outcomes plus aggregate counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub checked_at: String,
    pub total: usize,
    pub healthy: usize,
    pub errored: usize,
    pub timed_out: usize,
    /// One outcome per provider, in input order.
    pub results: Vec<ProbeOutcome>,
}

/// Probe every provider concurrently with the default 5 s deadline.
pub async fn check_all(providers: &[ProviderEndpoint]) -> ProbeReport {
    check_all_with_timeout(providers, PROBE_TIMEOUT).await
}

/// Probe every provider concurrently, one task each.
///
/// The scan itself cannot fail: a provider's error or timeout is folded
/// into its own classification and never aborts the fan-out.
pub async fn check_all_with_timeout(
    providers: &[ProviderEndpoint],
    timeout: Duration,
) -> ProbeReport {
    let client = reqwest::Client::new();

    let mut tasks = JoinSet::new();
    for (index, provider) in providers.iter().cloned().enumerate() {
        let client = client.clone();
        tasks.spawn(async move {
            let outcome = probe_one(&client, &provider, timeout).await;
            (index, outcome)
        });
    }

    // Fan-in: completion order is arbitrary; reassemble input order.
    let mut slots: Vec<Option<ProbeOutcome>> = vec![None; providers.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            // A panicked probe task still yields a classified outcome so
            // the table stays complete.
            Err(e) => debug!(error = %e, "probe task failed to join"),
        }
    }
    let results: Vec<ProbeOutcome> = slots
        .into_iter()
        .zip(providers)
        .map(|(slot, provider)| {
            slot.unwrap_or_else(|| ProbeOutcome {
                address: provider.address.clone(),
                endpoint_url: provider.endpoint_url.clone(),
                status: ProbeStatus::Error,
                error: Some("probe task aborted".to_string()),
                elapsed_ms: None,
            })
        })
        .collect();

    let healthy = results.iter().filter(|r| r.status == ProbeStatus::Ok).count();
    let errored = results.iter().filter(|r| r.status == ProbeStatus::Error).count();
    let timed_out = results.iter().filter(|r| r.status == ProbeStatus::Timeout).count();

    ProbeReport {
        checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        total: results.len(),
        healthy,
        errored,
        timed_out,
        results,
    }
}

/// Issue one GET against a provider and classify the outcome.
///
/// 2xx is `Ok`; a non-2xx status or any transport failure is `Error`;
/// hitting the deadline is `Timeout`. The response body is never read —
/// classification is by status and transport outcome only.
async fn probe_one(
    client: &reqwest::Client,
    provider: &ProviderEndpoint,
    timeout: Duration,
) -> ProbeOutcome {
    let start = Instant::now();
    let request = client
        .get(&provider.endpoint_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send();

    let (status, error, elapsed_ms) = match tokio::time::timeout(timeout, request).await {
        Ok(Ok(response)) => {
            let elapsed = start.elapsed().as_millis() as u64;
            if response.status().is_success() {
                (ProbeStatus::Ok, None, Some(elapsed))
            } else {
                let status = response.status();
                debug!(url = %provider.endpoint_url, %status, "provider answered non-2xx");
                (
                    ProbeStatus::Error,
                    Some(format!("HTTP {status}")),
                    Some(elapsed),
                )
            }
        }
        Ok(Err(e)) => {
            let elapsed = start.elapsed().as_millis() as u64;
            debug!(url = %provider.endpoint_url, error = %e, "provider probe failed");
            (ProbeStatus::Error, Some(e.to_string()), Some(elapsed))
        }
        Err(_) => {
            debug!(url = %provider.endpoint_url, ?timeout, "provider probe timed out");
            (
                ProbeStatus::Timeout,
                Some(format!("timeout after {} ms", timeout.as_millis())),
                None,
            )
        }
    };

    ProbeOutcome {
        address: provider.address.clone(),
        endpoint_url: provider.endpoint_url.clone(),
        status,
        error,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Spawn a one-shot HTTP server answering every request with `status`.
    async fn serve_status(status: u16) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {status} X\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                });
            }
        });
        format!("http://{addr}/ping")
    }

    /// Spawn a server that accepts connections but never answers.
    async fn serve_black_hole() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                // Hold the connection open without responding.
                tokio::spawn(async move {
                    let _keep = stream;
                    tokio::time::sleep(Duration::from_secs(60)).await;
                });
            }
        });
        format!("http://{addr}/ping")
    }

    fn provider(address: &str, endpoint_url: String) -> ProviderEndpoint {
        ProviderEndpoint {
            address: address.to_string(),
            endpoint_url,
        }
    }

    #[tokio::test]
    async fn empty_provider_list_yields_an_empty_report() {
        let report = check_all(&[]).await;
        assert_eq!(report.total, 0);
        assert_eq!(report.healthy + report.errored + report.timed_out, 0);
        assert!(report.results.is_empty());
    }

    #[tokio::test]
    async fn classification_scenario() {
        // A answers 200, B answers 500, C never answers.
        let a = serve_status(200).await;
        let b = serve_status(500).await;
        let c = serve_black_hole().await;
        let providers = vec![
            provider("0xaaa", a),
            provider("0xbbb", b),
            provider("0xccc", c),
        ];

        let report = check_all_with_timeout(&providers, Duration::from_millis(500)).await;

        assert_eq!(report.total, 3);
        assert_eq!(report.healthy, 1);
        assert_eq!(report.errored, 1);
        assert_eq!(report.timed_out, 1);

        // All three results present, in input order, whatever order the
        // probes completed in.
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[0].address, "0xaaa");
        assert_eq!(report.results[0].status, ProbeStatus::Ok);
        assert!(report.results[0].elapsed_ms.is_some());

        assert_eq!(report.results[1].status, ProbeStatus::Error);
        assert_eq!(
            report.results[1].error.as_deref(),
            Some("HTTP 500 Internal Server Error")
        );
        assert!(report.results[1].elapsed_ms.is_some());

        assert_eq!(report.results[2].status, ProbeStatus::Timeout);
        assert_eq!(report.results[2].elapsed_ms, None);
    }

    #[tokio::test]
    async fn connection_refused_is_an_error_not_a_timeout() {
        // Port 1 is never listening.
        let providers = vec![provider("0xaaa", "http://127.0.0.1:1/ping".to_string())];
        let report = check_all_with_timeout(&providers, Duration::from_millis(500)).await;

        assert_eq!(report.errored, 1);
        assert_eq!(report.results[0].status, ProbeStatus::Error);
        assert!(report.results[0].error.is_some());
        assert!(report.results[0].elapsed_ms.is_some());
    }

    #[tokio::test]
    async fn slow_provider_never_blocks_fast_siblings() {
        let fast = serve_status(200).await;
        let hung = serve_black_hole().await;
        let providers = vec![
            provider("0xhung", hung),
            provider("0xfast", fast),
        ];

        let started = Instant::now();
        let report = check_all_with_timeout(&providers, Duration::from_millis(400)).await;

        // The scan ends with the slowest deadline, not the sum of both.
        assert!(started.elapsed() < Duration::from_millis(2000));
        assert_eq!(report.healthy, 1);
        assert_eq!(report.timed_out, 1);
        // Input order preserved even though the hung probe finished last.
        assert_eq!(report.results[0].address, "0xhung");
        assert_eq!(report.results[1].address, "0xfast");
    }

    #[tokio::test]
    async fn report_serializes_snake_case_statuses() {
        let a = serve_status(204).await;
        let report = check_all_with_timeout(
            &[provider("0xaaa", a)],
            Duration::from_millis(500),
        )
        .await;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["results"][0]["status"], "ok");
        assert_eq!(json["healthy"], 1);
        // Absent fields are omitted, not null.
        assert!(json["results"][0].get("error").is_none());
    }
}
