//! Combining delay and loss impairments into an R-factor
//!
//! The equipment impairment of a Speex stream under packet loss (Ie) has no
//! closed form here. It is supplied by the integrator through
//! [`LossImpairment`], either as a closure or as a measured [`IeTable`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::emodel::delay_to_id;
use super::types::{LookupTable, MetricError, VqResult, DEFAULT_R0};

/// Source of the equipment impairment factor Ie for a codec mode and loss
pub trait LossImpairment {
    /// Ie for `mode` at `loss` percent packet loss
    fn ie(&self, mode: u8, loss: f64) -> VqResult<f64>;
}

impl<F> LossImpairment for F
where
    F: Fn(u8, f64) -> f64,
{
    fn ie(&self, mode: u8, loss: f64) -> VqResult<f64> {
        Ok(self(mode, loss))
    }
}

/// R-factor for a Speex stream: `R0 - Id(ta) - Ie(mode, loss)`
///
/// # Arguments
/// * `impairment` - loss-to-Ie mapping for the codec
/// * `mode` - Speex submode
/// * `loss` - packet loss in percent
/// * `ta` - one-way delay in ms
pub fn speex_loss_delay_to_r(
    impairment: &impl LossImpairment,
    mode: u8,
    loss: f64,
    ta: f64,
) -> VqResult<f64> {
    let id = delay_to_id(ta);
    let ie = impairment.ie(mode, loss)?;
    tracing::debug!(mode, loss, ta, id, ie, "combined speex impairments");
    Ok(DEFAULT_R0 - id - ie)
}

/// A single measured point: Ie observed at a loss percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IePoint {
    /// packet loss in percent
    pub loss: f64,
    /// equipment impairment at that loss
    pub ie: f64,
}

/// Measured Ie curves per Speex mode
///
/// Loaded from JSON shaped like `{"modes": {"5": [{"loss": 0, "ie": 11}, ...]}}`.
/// Between points Ie is interpolated linearly, outside the measured range
/// the nearest end point is held.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IeTable {
    #[serde(default)]
    modes: BTreeMap<u8, Vec<IePoint>>,
}

impl IeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// add a measured point for a mode
    pub fn with_point(mut self, mode: u8, loss: f64, ie: f64) -> Self {
        self.insert(mode, IePoint { loss, ie });
        self
    }

    pub fn insert(&mut self, mode: u8, point: IePoint) {
        let points = self.modes.entry(mode).or_default();
        points.push(point);
        points.sort_by(|a, b| a.loss.total_cmp(&b.loss));
    }

    /// parse a table from JSON
    pub fn from_json(json: &str) -> VqResult<Self> {
        let mut table: IeTable = serde_json::from_str(json)
            .map_err(|e| MetricError::invalid(format!("malformed Ie table: {}", e)))?;
        for points in table.modes.values_mut() {
            points.sort_by(|a, b| a.loss.total_cmp(&b.loss));
        }
        Ok(table)
    }

    /// modes that have measurements
    pub fn modes(&self) -> impl Iterator<Item = u8> + '_ {
        self.modes.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.values().all(|p| p.is_empty())
    }
}

impl LossImpairment for IeTable {
    fn ie(&self, mode: u8, loss: f64) -> VqResult<f64> {
        if !loss.is_finite() || loss < 0.0 {
            return Err(MetricError::invalid(format!(
                "packet loss must be a non-negative percentage, got {}",
                loss
            )));
        }

        let points = match self.modes.get(&mode) {
            Some(p) if !p.is_empty() => p,
            _ => return Err(MetricError::lookup(LookupTable::LossImpairment, mode)),
        };

        let first = points[0];
        let last = points[points.len() - 1];
        if loss <= first.loss {
            return Ok(first.ie);
        }
        if loss >= last.loss {
            return Ok(last.ie);
        }

        // loss is strictly inside, so some window brackets it
        let ie = points
            .windows(2)
            .find(|w| loss <= w[1].loss)
            .map(|w| {
                let (lo, hi) = (w[0], w[1]);
                let span = hi.loss - lo.loss;
                if span <= 0.0 {
                    hi.ie
                } else {
                    lo.ie + (hi.ie - lo.ie) * (loss - lo.loss) / span
                }
            })
            .unwrap_or(last.ie);
        Ok(ie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_between_points() {
        let table = IeTable::new().with_point(5, 0.0, 10.0).with_point(5, 10.0, 30.0);
        assert!((table.ie(5, 5.0).unwrap() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_sorted_on_insert() {
        let table = IeTable::new().with_point(3, 8.0, 40.0).with_point(3, 0.0, 20.0);
        assert_eq!(table.ie(3, 0.0).unwrap(), 20.0);
        assert!((table.ie(3, 2.0).unwrap() - 25.0).abs() < 1e-12);
    }
}
