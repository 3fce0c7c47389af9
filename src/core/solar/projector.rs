//! Display-ready facts derived from a snapshot.
//!
//! Everything here is a pure function of a [`SolarSnapshot`]; the snapshot is
//! shared read-only and never modified.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use super::classification::{classify, CurrentActivity};
use super::model::{Alert, GeomagneticReading, SolarSnapshot};

/// Text of the single item shown when there are no alerts
pub const ALL_CLEAR_MESSAGE: &str = "All systems operating normally";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    Normal,
    Alert { count: usize },
}

impl SystemStatus {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        if alerts.is_empty() {
            SystemStatus::Normal
        } else {
            SystemStatus::Alert {
                count: alerts.len(),
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SystemStatus::Normal => "Normal",
            SystemStatus::Alert { .. } => "Alert",
        }
    }

    pub fn alert_count(self) -> usize {
        match self {
            SystemStatus::Normal => 0,
            SystemStatus::Alert { count } => count,
        }
    }

    /// e.g. "0 active alerts"
    pub fn detail(self) -> String {
        format!("{} active alerts", self.alert_count())
    }
}

/// One chart sample.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxPoint {
    pub time_tag: String,
    /// `None` when `time_tag` is not RFC 3339
    pub timestamp: Option<DateTime<Utc>>,
    /// Exact provider value, never rounded
    pub flux: f64,
}

impl FluxPoint {
    /// Position on a logarithmic flux axis.
    pub fn log_flux(&self) -> f64 {
        self.flux.log10()
    }

    pub fn time_label(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
            None => self.time_tag.clone(),
        }
    }
}

/// Time/flux series for a logarithmic y axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FluxSeries {
    pub points: Vec<FluxPoint>,
}

impl FluxSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(index, log10(flux))` pairs in provider order.
    pub fn plot_data(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.log_flux()))
            .collect()
    }

    /// Whole decades enclosing every point, e.g. `(-7.0, -4.0)`.
    pub fn log_bounds(&self) -> Option<(f64, f64)> {
        let mut logs = self.points.iter().map(FluxPoint::log_flux);
        let first = logs.next()?;
        let (min, max) = logs.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let lower = min.floor();
        let mut upper = max.ceil();
        if upper <= lower {
            upper = lower + 1.0;
        }
        Some((lower, upper))
    }

    /// Axis labels for each decade in [`FluxSeries::log_bounds`].
    pub fn decade_labels(&self) -> Vec<String> {
        match self.log_bounds() {
            Some((lower, upper)) => {
                let (lower, upper) = (lower as i32, upper as i32);
                (lower..=upper)
                    .map(|exp| format_flux_axis(10f64.powi(exp)))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

/// Alert panel content: the alerts verbatim, or one all-clear item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertPanel {
    AllClear,
    Alerts(Vec<Alert>),
}

impl AlertPanel {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        if alerts.is_empty() {
            AlertPanel::AllClear
        } else {
            AlertPanel::Alerts(alerts.to_vec())
        }
    }

    /// Lines to render, one per item. Never empty.
    pub fn items(&self) -> Vec<&str> {
        match self {
            AlertPanel::AllClear => vec![ALL_CLEAR_MESSAGE],
            AlertPanel::Alerts(alerts) => alerts.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_all_clear(&self) -> bool {
        matches!(self, AlertPanel::AllClear)
    }
}

/// Everything the dashboard shows for one `Ready` snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub snapshot: Arc<SolarSnapshot>,
    pub activity: CurrentActivity,
    pub status: SystemStatus,
    pub chart: FluxSeries,
    pub alerts: AlertPanel,
}

impl DashboardView {
    pub fn project(snapshot: Arc<SolarSnapshot>) -> Self {
        let activity = current_activity(&snapshot);
        let status = SystemStatus::from_alerts(&snapshot.alerts);
        let chart = flux_series(&snapshot);
        let alerts = AlertPanel::from_alerts(&snapshot.alerts);

        Self {
            snapshot,
            activity,
            status,
            chart,
            alerts,
        }
    }

    pub fn last_updated_label(&self) -> String {
        format_timestamp(&self.snapshot.last_updated)
    }

    pub fn latest_geomagnetic(&self) -> Option<&GeomagneticReading> {
        self.snapshot.latest_geomagnetic()
    }
}

/// Tier of the last flare as supplied, or `Unknown` without flares.
pub fn current_activity(snapshot: &SolarSnapshot) -> CurrentActivity {
    match snapshot.latest_flare() {
        Some(flare) => CurrentActivity::Classified(classify(flare.flux)),
        None => CurrentActivity::Unknown,
    }
}

pub fn flux_series(snapshot: &SolarSnapshot) -> FluxSeries {
    let points = snapshot
        .flares
        .iter()
        .map(|flare| FluxPoint {
            time_tag: flare.time_tag.clone(),
            timestamp: parse_time_tag(&flare.time_tag),
            flux: flare.flux,
        })
        .collect();
    FluxSeries { points }
}

/// Parse an RFC 3339 time tag; naive tags are read as UTC.
pub fn parse_time_tag(tag: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(tag) {
        return Some(ts.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(tag, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Local time of day for a timestamp, or the raw text when unparseable.
pub fn format_timestamp(tag: &str) -> String {
    match parse_time_tag(tag) {
        Some(ts) => ts.with_timezone(&Local).format("%H:%M:%S").to_string(),
        None => tag.to_string(),
    }
}

/// Flux value label, e.g. `2.30e-5`.
pub fn format_flux(flux: f64) -> String {
    format!("{:.2e}", flux)
}

/// Flux axis tick label, e.g. `1.0e-5`.
pub fn format_flux_axis(flux: f64) -> String {
    format!("{:.1e}", flux)
}
