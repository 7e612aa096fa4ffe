//! Speech quality metric conversions and Speex bandwidth bookkeeping
//!
//! - MOS LQO <-> R-factor and delay impairment per ITU-T G.107/G.108
//! - Speex quality/mode/frame size tables and RTP bandwidth estimation

use wasm_bindgen::prelude::*;

pub mod core;
pub mod speex;

pub use core::{
    delay_to_id, moslqo_to_r, r_to_moslqo, speex_loss_delay_to_r, IePoint, IeTable,
    LookupTable, LossImpairment, MetricError, RatingBand, VqResult, DEFAULT_R0,
};
pub use speex::{
    frame_size_for_mode, mode_for_quality, quality_for_mode, SpeexMetric, SpeexSetting,
    DEFAULT_FRAMES_PER_PACKET,
};

// result helpers

/// turn an error into js
fn to_js_err(e: MetricError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// api functions

/// resolve a speex setting
///
/// # Arguments
/// * `quality` - Encoder quality 0-10, or undefined
/// * `mode` - Codec submode 1-8, or undefined
///
/// # Returns
/// `{ quality, mode, size }` object
#[wasm_bindgen(js_name = speexMetric)]
pub fn js_speex_metric(quality: Option<u8>, mode: Option<u8>) -> Result<JsValue, JsValue> {
    let metric = SpeexMetric::from_options(quality, mode).map_err(to_js_err)?;
    serde_wasm_bindgen::to_value(&metric).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// bandwidth in bits per second for a speex setting
///
/// # Arguments
/// * `quality` - Encoder quality 0-10, or undefined
/// * `mode` - Codec submode 1-8, or undefined
/// * `fpp` - Frames per packet (defaults to 1)
#[wasm_bindgen(js_name = speexBandwidth)]
pub fn js_speex_bandwidth(
    quality: Option<u8>,
    mode: Option<u8>,
    fpp: Option<u32>,
) -> Result<f64, JsValue> {
    let metric = SpeexMetric::from_options(quality, mode).map_err(to_js_err)?;
    metric
        .bandwidth(fpp.unwrap_or(DEFAULT_FRAMES_PER_PACKET))
        .map(|bw| bw as f64)
        .map_err(to_js_err)
}

/// MOS LQO to R-factor
#[wasm_bindgen(js_name = moslqoToR)]
pub fn js_moslqo_to_r(mos: f64) -> f64 {
    moslqo_to_r(mos)
}

/// R-factor to MOS LQO
#[wasm_bindgen(js_name = rToMoslqo)]
pub fn js_r_to_moslqo(r: f64) -> f64 {
    r_to_moslqo(r)
}

/// one-way delay (ms) to delay impairment Id
#[wasm_bindgen(js_name = delayToId)]
pub fn js_delay_to_id(ta: f64) -> f64 {
    delay_to_id(ta)
}

/// R-factor from delay and a caller-computed equipment impairment
///
/// # Arguments
/// * `mode` - Speex submode the `ie` was measured for
/// * `loss` - Packet loss in percent
/// * `ta` - One-way delay in ms
/// * `ie` - Equipment impairment for `mode` at `loss`
#[wasm_bindgen(js_name = speexLossDelayToR)]
pub fn js_speex_loss_delay_to_r(mode: u8, loss: f64, ta: f64, ie: f64) -> Result<f64, JsValue> {
    let fixed = move |_mode: u8, _loss: f64| ie;
    speex_loss_delay_to_r(&fixed, mode, loss, ta).map_err(to_js_err)
}

/// G.107 satisfaction band for an R-factor, as its description
#[wasm_bindgen(js_name = ratingBand)]
pub fn js_rating_band(r: f64) -> String {
    RatingBand::from_r(r).description().to_string()
}
