//! Response curve and marker builder
//!
//! Evaluates one cascade (PEQ or GEQ, per view) over a log frequency grid.
//! Markers sit on the aggregate curve, not on a node's isolated response.

use crate::bank::{FilterBank, NodeId};
use crate::dsp::{geq_response_db, peq_response_db};
use crate::editor::{freq_to_position, gain_to_position, PlotGeometry};
use crate::types::{FilterType, ViewMode, FREQ_MAX, FREQ_MIN};

/// Log-spaced base points across the range
pub const CURVE_POINTS: usize = 400;

/// Max distance (Hz) between a node and the nearest grid point its marker uses
const MARKER_TOLERANCE_HZ: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub freq: f64,
    pub gain_db: f64,
}

/// Node marker in normalized plot coordinates
///
/// `x` is in 0.0-1.0; `y` is 0.0 at +15 dB and 1.0 at -15 dB and may fall
/// outside that range when the aggregate curve does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub filter_type: FilterType,
    pub gain_db: f64,
}

impl Marker {
    /// Position in plot pixels
    pub fn pixel(&self, plot: &PlotGeometry) -> (f64, f64) {
        (plot.x_span() * self.x, plot.height * self.y)
    }

    /// Label drawn on the marker
    pub fn label(&self) -> String {
        (self.id + 1).to_string()
    }
}

/// One recompute result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseCurve {
    pub view: ViewMode,
    pub points: Vec<CurvePoint>,
    /// Empty in the GEQ view
    pub markers: Vec<Marker>,
}

impl ResponseCurve {
    pub fn marker(&self, id: NodeId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Gain at the grid point nearest to `freq` on the log axis
    pub fn gain_near(&self, freq: f64) -> Option<f64> {
        let target = freq.log10();
        self.points
            .iter()
            .min_by(|a, b| {
                (a.freq.log10() - target)
                    .abs()
                    .total_cmp(&(b.freq.log10() - target).abs())
            })
            .map(|p| p.gain_db)
    }

    pub fn min_db(&self) -> Option<f64> {
        self.points.iter().map(|p| p.gain_db).min_by(f64::total_cmp)
    }

    pub fn max_db(&self) -> Option<f64> {
        self.points.iter().map(|p| p.gain_db).max_by(f64::total_cmp)
    }
}

/// The 400 base points, endpoints included
pub fn log_grid() -> Vec<f64> {
    let log_min = FREQ_MIN.log10();
    let log_range = FREQ_MAX.log10() - log_min;
    (0..CURVE_POINTS)
        .map(|i| 10.0_f64.powf(log_min + (i as f64 / (CURVE_POINTS - 1) as f64) * log_range))
        .collect()
}

/// Base grid plus the exact frequencies the view cares about, sorted
///
/// The PEQ view adds every committed node's frequency, the GEQ view every
/// band's center.
pub fn build_grid(view: ViewMode, bank: &FilterBank) -> Vec<f64> {
    let mut grid = log_grid();
    let extra: Vec<f64> = match view {
        ViewMode::PeqView => bank.visible_nodes().map(|n| n.freq()).collect(),
        ViewMode::GeqView => bank.geq_bands().iter().map(|b| b.freq()).collect(),
    };
    for freq in extra {
        if (FREQ_MIN..=FREQ_MAX).contains(&freq) && !grid.contains(&freq) {
            grid.push(freq);
        }
    }
    grid.sort_by(f64::total_cmp);
    grid
}

/// Evaluate the view's cascade over the grid and place markers
pub fn build_curve(view: ViewMode, bank: &FilterBank) -> ResponseCurve {
    let grid = build_grid(view, bank);

    let points: Vec<CurvePoint> = grid
        .iter()
        .map(|&freq| {
            let gain_db = match view {
                ViewMode::PeqView => peq_response_db(freq, bank.nodes()),
                ViewMode::GeqView => geq_response_db(freq, bank.geq_bands()),
            };
            CurvePoint { freq, gain_db }
        })
        .collect();

    let markers = match view {
        ViewMode::PeqView => bank
            .visible_nodes()
            .filter_map(|node| {
                let freq = node.freq();
                let point = points
                    .iter()
                    .filter(|p| (p.freq - freq).abs() < MARKER_TOLERANCE_HZ)
                    .min_by(|a, b| (a.freq - freq).abs().total_cmp(&(b.freq - freq).abs()))?;
                Some(Marker {
                    id: node.id(),
                    x: freq_to_position(node.freq()),
                    y: gain_to_position(point.gain_db),
                    filter_type: node.filter_type(),
                    gain_db: point.gain_db,
                })
            })
            .collect(),
        ViewMode::GeqView => Vec::new(),
    };

    log::debug!(
        "build_curve: {:?} {} points, {} markers",
        view,
        points.len(),
        markers.len()
    );

    ResponseCurve {
        view,
        points,
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::NodeParams;
    use crate::dsp::peq_response_db;

    #[test]
    fn test_log_grid() {
        let grid = log_grid();
        assert_eq!(grid.len(), CURVE_POINTS);
        assert!((grid[0] - 20.0).abs() < 1e-9);
        assert!((grid[CURVE_POINTS - 1] - 20000.0).abs() < 1e-6);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_grid_includes_node_frequencies() {
        let mut bank = FilterBank::with_seed(0);
        bank.add_peq(NodeParams::new(FilterType::Peak).with_freq(1234.0), false);
        bank.add_peq(NodeParams::new(FilterType::Peak).with_freq(777.0), true);

        let grid = build_grid(ViewMode::PeqView, &bank);
        assert!(grid.contains(&1234.0));
        assert!(!grid.contains(&777.0));
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(grid.len(), CURVE_POINTS + 1);
    }

    #[test]
    fn test_markers_use_aggregate_gain() {
        let mut bank = FilterBank::with_seed(0);
        let a = bank.add_peq(
            NodeParams::new(FilterType::Peak)
                .with_freq(1000.0)
                .with_gain(6.0)
                .with_q(1.0),
            false,
        );
        bank.add_peq(
            NodeParams::new(FilterType::LowShelf)
                .with_freq(1200.0)
                .with_gain(6.0),
            false,
        );

        let curve = build_curve(ViewMode::PeqView, &bank);
        let marker = curve.marker(a).unwrap();
        let aggregate = peq_response_db(1000.0, bank.nodes());
        assert!((marker.gain_db - aggregate).abs() < 1e-9);
        assert!(marker.gain_db > 6.5);
        assert!((marker.y - gain_to_position(marker.gain_db)).abs() < 1e-12);
    }

    #[test]
    fn test_marker_uses_nearest_point_at_low_frequency() {
        let mut bank = FilterBank::with_seed(0);
        let id = bank.add_peq(
            NodeParams::new(FilterType::Peak)
                .with_freq(25.0)
                .with_gain(12.0)
                .with_q(10.0),
            false,
        );

        let curve = build_curve(ViewMode::PeqView, &bank);
        let marker = curve.marker(id).unwrap();
        assert!((marker.gain_db - 12.0).abs() < 1e-6);
        assert!((marker.gain_db - peq_response_db(25.0, bank.nodes())).abs() < 1e-9);
    }

    #[test]
    fn test_staged_node_has_no_marker() {
        let mut bank = FilterBank::with_seed(0);
        let id = bank.add_peq(NodeParams::new(FilterType::Peak).with_freq(1000.0), true);
        let curve = build_curve(ViewMode::PeqView, &bank);
        assert!(curve.marker(id).is_none());
        assert!(curve.points.iter().all(|p| p.gain_db == 0.0));
    }

    #[test]
    fn test_geq_view_has_no_markers() {
        let mut bank = FilterBank::with_seed(0);
        bank.seed_defaults();
        bank.set_geq_gain(17, 4.0);
        let curve = build_curve(ViewMode::GeqView, &bank);
        assert!(curve.markers.is_empty());
        assert!((curve.gain_near(1000.0).unwrap() - 4.0).abs() < 1e-6);
        assert!(curve.points.iter().any(|p| p.freq == 31.5));
    }

    #[test]
    fn test_marker_pixel() {
        let marker = Marker {
            id: 0,
            x: 1.0,
            y: 0.5,
            filter_type: FilterType::Peak,
            gain_db: 0.0,
        };
        assert_eq!(marker.pixel(&PlotGeometry::new(800.0, 380.0)), (801.0, 190.0));
        assert_eq!(marker.label(), "1");
    }
}
