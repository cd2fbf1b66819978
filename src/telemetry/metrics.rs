//! Prometheus metrics

use crate::feed::SampleSource;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::time::Duration;

const FETCH_LATENCY: &str = "btcgold_fetch_latency_ms";
const FETCHES_TOTAL: &str = "btcgold_fetches_total";

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Last asset unit price
    AssetPrice,
    /// Last commodity unit price
    CommodityPrice,
    /// Asset market cap as a percentage of the commodity's
    Percentage,
    /// 1 while the displayed sample is a fallback, else 0
    Fallback,
}

impl GaugeMetric {
    fn name(self) -> &'static str {
        match self {
            GaugeMetric::AssetPrice => "btcgold_asset_price_usd",
            GaugeMetric::CommodityPrice => "btcgold_commodity_price_usd",
            GaugeMetric::Percentage => "btcgold_market_cap_percentage",
            GaugeMetric::Fallback => "btcgold_fallback_active",
        }
    }
}

/// Install the Prometheus exporter on `0.0.0.0:port`
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record one fetch cycle
pub fn record_fetch(duration: Duration, source: SampleSource) {
    let source = match source {
        SampleSource::Live => "live",
        SampleSource::Fallback => "fallback",
    };

    ::metrics::histogram!(FETCH_LATENCY).record(duration.as_secs_f64() * 1000.0);
    ::metrics::counter!(FETCHES_TOTAL, "source" => source).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: Decimal) {
    let Some(value) = value.to_f64() else {
        tracing::debug!(metric = metric.name(), %value, "Gauge value not representable");
        return;
    };
    ::metrics::gauge!(metric.name()).set(value);
}
