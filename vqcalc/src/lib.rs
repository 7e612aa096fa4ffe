//! vqcalc - speech quality metric calculator library
//!
//! Builds serialisable reports over `libvqm` for the command line and for
//! anything else that wants the same numbers as JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Re-export libvqm types
pub use libvqm::{IeTable, RatingBand, SpeexMetric, SpeexSetting};

/// Options shared by the report builders
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Frames per packet values to compute bandwidth for
    pub frames_per_packet: Vec<u32>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            frames_per_packet: vec![libvqm::DEFAULT_FRAMES_PER_PACKET],
        }
    }
}

impl ReportOptions {
    /// Replace the frames-per-packet list; an empty list keeps the default
    pub fn with_frames_per_packet(mut self, fpp: Vec<u32>) -> Self {
        if !fpp.is_empty() {
            self.frames_per_packet = fpp;
        }
        self
    }
}

/// Bandwidth for one frames-per-packet value
#[derive(Debug, Clone, Serialize)]
pub struct BandwidthLine {
    pub frames_per_packet: u32,
    pub bits_per_second: u64,
}

/// Resolved speex setting with its bandwidth figures
#[derive(Debug, Clone, Serialize)]
pub struct SpeexReport {
    pub quality: u8,
    pub mode: u8,
    pub frame_bits: u32,
    pub bitrate: u32,
    pub bandwidth: Vec<BandwidthLine>,
}

/// Build a report for a speex setting given as two optional flags
pub fn speex_report(
    quality: Option<u8>,
    mode: Option<u8>,
    options: &ReportOptions,
) -> Result<SpeexReport> {
    let metric =
        SpeexMetric::from_options(quality, mode).context("Failed to resolve speex setting")?;
    report_for(&metric, options)
}

fn report_for(metric: &SpeexMetric, options: &ReportOptions) -> Result<SpeexReport> {
    let bandwidth = options
        .frames_per_packet
        .iter()
        .map(|&fpp| -> Result<BandwidthLine> {
            let bits_per_second = metric
                .bandwidth(fpp)
                .with_context(|| format!("Failed to compute bandwidth for fpp {}", fpp))?;
            Ok(BandwidthLine {
                frames_per_packet: fpp,
                bits_per_second,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SpeexReport {
        quality: metric.quality(),
        mode: metric.mode(),
        frame_bits: metric.size(),
        bitrate: metric.bitrate(),
        bandwidth,
    })
}

/// One quality setting in the full table
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub quality: u8,
    pub mode: u8,
    /// None when the mode has no frame size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SpeexReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Every quality 0-10 with its mode and, where known, its bandwidth
pub fn speex_table(options: &ReportOptions) -> Result<Vec<TableRow>> {
    (0..=libvqm::speex::MAX_QUALITY)
        .map(|quality| -> Result<TableRow> {
            let mode = libvqm::mode_for_quality(quality)?;
            let row = match SpeexMetric::with_quality(quality) {
                Ok(metric) => TableRow {
                    quality,
                    mode,
                    report: Some(report_for(&metric, options)?),
                    error: None,
                },
                Err(e) => {
                    tracing::debug!(quality, mode, error = %e, "no frame size for quality");
                    TableRow {
                        quality,
                        mode,
                        report: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            Ok(row)
        })
        .collect()
}

/// A single metric conversion with the resulting rating band
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub mos: f64,
    pub r_factor: f64,
    pub band: RatingBand,
}

impl ConversionReport {
    /// start from a MOS LQO
    pub fn from_mos(mos: f64) -> Self {
        let r_factor = libvqm::moslqo_to_r(mos);
        Self {
            mos,
            r_factor,
            band: RatingBand::from_r(r_factor),
        }
    }

    /// start from an R-factor
    pub fn from_r(r_factor: f64) -> Self {
        Self {
            mos: libvqm::r_to_moslqo(r_factor),
            r_factor,
            band: RatingBand::from_r(r_factor),
        }
    }
}

/// Delay impairment for a one-way delay
#[derive(Debug, Clone, Serialize)]
pub struct DelayReport {
    pub delay_ms: f64,
    pub id: f64,
}

pub fn delay_report(delay_ms: f64) -> DelayReport {
    DelayReport {
        delay_ms,
        id: libvqm::delay_to_id(delay_ms),
    }
}

/// Combined estimate for a speex stream under loss and delay
#[derive(Debug, Clone, Serialize)]
pub struct RatingReport {
    pub mode: u8,
    pub loss_percent: f64,
    pub delay_ms: f64,
    pub id: f64,
    pub r_factor: f64,
    pub mos: f64,
    pub band: RatingBand,
}

/// Rate a speex stream using measured Ie values
pub fn rating_report(
    table: &IeTable,
    mode: u8,
    loss_percent: f64,
    delay_ms: f64,
) -> Result<RatingReport> {
    let r_factor = libvqm::speex_loss_delay_to_r(table, mode, loss_percent, delay_ms)
        .with_context(|| format!("Failed to rate speex mode {}", mode))?;

    Ok(RatingReport {
        mode,
        loss_percent,
        delay_ms,
        id: libvqm::delay_to_id(delay_ms),
        r_factor,
        mos: libvqm::r_to_moslqo(r_factor),
        band: RatingBand::from_r(r_factor),
    })
}

/// Read an Ie table from a JSON file
pub fn load_ie_table(path: &Path) -> Result<IeTable> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read Ie table {}", path.display()))?;
    let table = IeTable::from_json(&json)
        .with_context(|| format!("Failed to parse Ie table {}", path.display()))?;
    tracing::info!(path = %path.display(), modes = table.modes().count(), "loaded Ie table");
    Ok(table)
}
