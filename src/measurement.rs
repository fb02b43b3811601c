//! Transient distance/area measurement.
//!
//! A [`MeasurementSession`] collects an ordered list of points that are not
//! shapes and keeps distance, bearing and area up to date as points arrive.
//! Turning the mode off or switching mode starts over; there is no undo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_LINE_POSITIONS, MIN_POLYGON_POSITIONS};
use crate::geometry;
use crate::model::Coordinate;

/// What the user declared they are measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureMode {
    /// Path length
    Distance,
    /// Enclosed area
    Area,
}

impl MeasureMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            MeasureMode::Distance => "Distance",
            MeasureMode::Area => "Area",
        }
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeasurementState {
    /// Not measuring.
    #[default]
    Idle,
    /// Accepting points.
    Collecting(MeasureMode),
}

/// Snapshot of a measurement, stored with the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSummary {
    /// Mode the points were collected in
    pub mode: MeasureMode,
    /// The collected points
    pub points: Vec<Coordinate>,
    /// Cumulative path length in km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Bearing in degrees (two-point measurements only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing_deg: Option<f64>,
    /// Enclosed area in km²
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_km2: Option<f64>,
    /// When the summary was taken
    pub computed_at: DateTime<Utc>,
}

/// Live distance or area measurement.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSession {
    state: MeasurementState,
    points: Vec<Coordinate>,
    distance_km: Option<f64>,
    bearing_deg: Option<f64>,
    area_km2: Option<f64>,
}

impl MeasurementSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting in the given mode, discarding any previous points.
    pub fn start(&mut self, mode: MeasureMode) {
        self.reset_points();
        self.state = MeasurementState::Collecting(mode);
        log::debug!("Measurement started: {}", mode.name());
    }

    /// Stop measuring and invalidate everything.
    pub fn stop(&mut self) {
        self.reset_points();
        self.state = MeasurementState::Idle;
        log::debug!("Measurement stopped");
    }

    /// Start over in the current mode.
    pub fn restart(&mut self) {
        self.reset_points();
    }

    /// Append a point and recompute. Returns false when idle or when the
    /// coordinate is out of range.
    pub fn add_point(&mut self, point: Coordinate) -> bool {
        if !self.is_active() {
            return false;
        }
        if let Err(e) = point.validate() {
            log::warn!("Measurement point rejected: {}", e);
            return false;
        }
        self.points.push(point);
        self.recompute();
        true
    }

    /// Current state.
    pub fn state(&self) -> MeasurementState {
        self.state
    }

    /// Current mode, if collecting.
    pub fn mode(&self) -> Option<MeasureMode> {
        match self.state {
            MeasurementState::Idle => None,
            MeasurementState::Collecting(mode) => Some(mode),
        }
    }

    /// Whether points are being accepted.
    pub fn is_active(&self) -> bool {
        matches!(self.state, MeasurementState::Collecting(_))
    }

    /// Collected points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Cumulative path length, once two points exist.
    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    /// Bearing, only while exactly two points exist.
    pub fn bearing(&self) -> Option<f64> {
        self.bearing_deg
    }

    /// Enclosed area, once three points exist.
    pub fn area_km2(&self) -> Option<f64> {
        self.area_km2
    }

    /// Summary of the current measurement, `None` when idle.
    pub fn summary(&self) -> Option<MeasurementSummary> {
        let mode = self.mode()?;
        Some(MeasurementSummary {
            mode,
            points: self.points.clone(),
            distance_km: self.distance_km,
            bearing_deg: self.bearing_deg,
            area_km2: self.area_km2,
            computed_at: Utc::now(),
        })
    }

    fn recompute(&mut self) {
        let n = self.points.len();
        self.distance_km =
            (n >= MIN_LINE_POSITIONS).then(|| geometry::path_length_km(&self.points));
        self.bearing_deg = (n == 2).then(|| geometry::sequence_bearing(&self.points));
        self.area_km2 =
            (n >= MIN_POLYGON_POSITIONS).then(|| geometry::polygon_area_km2(&self.points));
    }

    fn reset_points(&mut self) {
        self.points.clear();
        self.distance_km = None;
        self.bearing_deg = None;
        self.area_km2 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOMBO: Coordinate = Coordinate::new(6.9271, 79.8612);
    const KANDY: Coordinate = Coordinate::new(7.2906, 80.6337);
    const GALLE: Coordinate = Coordinate::new(6.0535, 80.2210);

    #[test]
    fn test_idle_rejects_points() {
        let mut session = MeasurementSession::new();
        assert!(!session.add_point(COLOMBO));
        assert!(session.points().is_empty());
        assert!(session.summary().is_none());
    }

    #[test]
    fn test_thresholds() {
        let mut session = MeasurementSession::new();
        session.start(MeasureMode::Distance);

        session.add_point(COLOMBO);
        assert!(session.distance_km().is_none());
        assert!(session.bearing().is_none());
        assert!(session.area_km2().is_none());

        session.add_point(KANDY);
        let d = session.distance_km().unwrap();
        assert!((d - geometry::distance_km(COLOMBO, KANDY)).abs() < 1e-9);
        assert!(session.bearing().is_some());
        assert!(session.area_km2().is_none());

        session.add_point(GALLE);
        assert!(session.distance_km().unwrap() > d);
        // bearing only exists for exactly two points
        assert!(session.bearing().is_none());
        // area is available even in distance mode
        assert!(session.area_km2().is_some());
    }

    #[test]
    fn test_mode_change_clears_points() {
        let mut session = MeasurementSession::new();
        session.start(MeasureMode::Area);
        session.add_point(COLOMBO);
        session.add_point(KANDY);

        session.start(MeasureMode::Distance);
        assert!(session.points().is_empty());
        assert!(session.distance_km().is_none());
        assert_eq!(session.mode(), Some(MeasureMode::Distance));
    }

    #[test]
    fn test_stop_invalidates() {
        let mut session = MeasurementSession::new();
        session.start(MeasureMode::Area);
        for p in [COLOMBO, KANDY, GALLE] {
            session.add_point(p);
        }
        session.stop();
        assert_eq!(session.state(), MeasurementState::Idle);
        assert!(session.points().is_empty());
        assert!(session.area_km2().is_none());
        assert!(session.distance_km().is_none());
    }

    #[test]
    fn test_invalid_point_rejected() {
        let mut session = MeasurementSession::new();
        session.start(MeasureMode::Distance);
        assert!(!session.add_point(Coordinate::new(120.0, 0.0)));
        assert!(session.points().is_empty());
    }

    #[test]
    fn test_summary_reflects_state() {
        let mut session = MeasurementSession::new();
        session.start(MeasureMode::Distance);
        session.add_point(COLOMBO);
        session.add_point(KANDY);
        let summary = session.summary().unwrap();
        assert_eq!(summary.mode, MeasureMode::Distance);
        assert_eq!(summary.points.len(), 2);
        assert_eq!(summary.distance_km, session.distance_km());
        assert_eq!(summary.bearing_deg, session.bearing());
        assert!(summary.area_km2.is_none());
    }
}
