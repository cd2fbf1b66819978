//! Tracker state and its per-event update functions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::feed::{PriceSample, SampleSource};
use crate::ratio::{
    append_to_history, DerivedRatio, HistoryBuffer, HistoryEntry, SupplyConstants,
};
use crate::simulation::{SimulationState, SliderConfig, SliderRange};
use crate::telemetry::{self, GaugeMetric};

/// Everything the presentation layer reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerView {
    /// Asset price of the last sample, zero before the first fetch
    pub asset_price: Decimal,
    pub commodity_price: Decimal,
    /// `None` when the ratio is undefined or no sample exists yet
    pub percentage: Option<Decimal>,
    pub ratio: Option<DerivedRatio>,
    pub simulated_asset_price: Decimal,
    pub simulated_percentage: Option<Decimal>,
    pub simulated_ratio: Option<DerivedRatio>,
    pub price_history: Vec<HistoryEntry>,
    pub loading: bool,
    /// Time of the last live sample
    pub last_updated: Option<DateTime<Utc>>,
    /// The displayed prices come from the fallback sample
    pub is_fallback: bool,
    pub slider: Option<SliderRange>,
}

/// Single owner of all mutable tracker state
#[derive(Debug, Clone)]
pub struct TrackerState {
    constants: SupplyConstants,
    slider: SliderConfig,
    commodity_price: Decimal,
    sample: Option<PriceSample>,
    ratio: Option<DerivedRatio>,
    last_live_price: Option<Decimal>,
    simulation: SimulationState,
    history: HistoryBuffer,
    loading: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl TrackerState {
    /// `commodity_price` is used for simulations until the first sample arrives
    pub fn new(constants: SupplyConstants, slider: SliderConfig, commodity_price: Decimal) -> Self {
        Self {
            constants,
            slider,
            commodity_price,
            sample: None,
            ratio: None,
            last_live_price: None,
            simulation: SimulationState::new(),
            history: HistoryBuffer::new(),
            loading: false,
            last_updated: None,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Apply a finished fetch.
    ///
    /// The simulated price is reset to the sampled price. Only live samples
    /// extend the history and move `last_updated`.
    pub fn complete_fetch(&mut self, sample: PriceSample) {
        self.loading = false;
        self.commodity_price = sample.commodity_price;

        let ratio = match self.constants.ratio(sample.asset_price, sample.commodity_price) {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    price = %sample.asset_price,
                    "Ratio undefined for sample"
                );
                None
            }
        };

        // Already logged above when this fails
        let _ = self
            .simulation
            .set_price_with(sample.asset_price, sample.commodity_price, &self.constants);

        if sample.source == SampleSource::Live {
            self.last_live_price = Some(sample.asset_price);
            self.last_updated = Some(sample.timestamp);
            if let Some(ratio) = &ratio {
                let history = std::mem::take(&mut self.history);
                self.history = append_to_history(history, &sample, ratio);
            }
        }

        telemetry::set_gauge(GaugeMetric::AssetPrice, sample.asset_price);
        telemetry::set_gauge(GaugeMetric::CommodityPrice, sample.commodity_price);
        telemetry::set_gauge(
            GaugeMetric::Fallback,
            if sample.is_fallback() {
                Decimal::ONE
            } else {
                Decimal::ZERO
            },
        );
        if let Some(ratio) = &ratio {
            telemetry::set_gauge(GaugeMetric::Percentage, ratio.percentage);
        }

        tracing::info!(
            price = %sample.asset_price,
            percentage = ?ratio.as_ref().map(|r| r.percentage.round_dp(4)),
            source = ?sample.source,
            history_len = self.history.len(),
            "Sample applied"
        );

        self.ratio = ratio;
        self.sample = Some(sample);
    }

    /// Slider moved: recompute against the latest commodity price
    pub fn set_hypothetical_price(&mut self, price: Decimal) -> Option<DerivedRatio> {
        match self
            .simulation
            .set_price_with(price, self.commodity_price, &self.constants)
        {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                tracing::warn!(error = %e, %price, "Simulated ratio undefined");
                None
            }
        }
    }

    /// Slider bounds around the last live price, or the displayed price before any live sample
    pub fn slider_range(&self) -> Option<SliderRange> {
        self.last_live_price
            .or_else(|| self.sample.as_ref().map(|s| s.asset_price))
            .and_then(|price| SliderRange::for_live_price(price, &self.slider))
    }

    pub fn constants(&self) -> &SupplyConstants {
        &self.constants
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> TrackerView {
        let simulated_ratio = self.simulation.ratio().copied();
        TrackerView {
            asset_price: self
                .sample
                .as_ref()
                .map(|s| s.asset_price)
                .unwrap_or_default(),
            commodity_price: self.commodity_price,
            percentage: self.ratio.map(|r| r.percentage),
            ratio: self.ratio,
            simulated_asset_price: self.simulation.hypothetical_asset_price(),
            simulated_percentage: simulated_ratio.map(|r| r.percentage),
            simulated_ratio,
            price_history: self.history.to_vec(),
            loading: self.loading,
            last_updated: self.last_updated,
            is_fallback: self.sample.as_ref().is_some_and(|s| s.is_fallback()),
            slider: self.slider_range(),
        }
    }
}
