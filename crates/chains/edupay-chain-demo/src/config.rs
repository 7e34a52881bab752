use serde::Deserialize;
use std::time::Duration;

/// Simulated latencies of the demo ledger.
///
/// ```json
/// { "connectLatencyMs": 1500, "settlementLatencyMs": 2000 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoProviderConfig {
    #[serde(default = "demo_provider_config::default_connect_latency_ms")]
    pub connect_latency_ms: u64,
    #[serde(default = "demo_provider_config::default_settlement_latency_ms")]
    pub settlement_latency_ms: u64,
}

impl DemoProviderConfig {
    pub fn connect_latency(&self) -> Duration {
        Duration::from_millis(self.connect_latency_ms)
    }

    pub fn settlement_latency(&self) -> Duration {
        Duration::from_millis(self.settlement_latency_ms)
    }
}

impl Default for DemoProviderConfig {
    fn default() -> Self {
        Self {
            connect_latency_ms: demo_provider_config::default_connect_latency_ms(),
            settlement_latency_ms: demo_provider_config::default_settlement_latency_ms(),
        }
    }
}

mod demo_provider_config {
    pub fn default_connect_latency_ms() -> u64 {
        1500
    }
    pub fn default_settlement_latency_ms() -> u64 {
        2000
    }
}
