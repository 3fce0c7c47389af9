//! Solar activity core.
//!
//! Fetching, classifying and projecting space-weather snapshots, plus the
//! refresh scheduler that ties them together.

pub mod classification;
pub mod client;
pub mod model;
pub mod projector;
mod runtime;
pub mod scheduler;

pub use classification::{classify, CurrentActivity, FlareClass, TierColor, TierInfo};
pub use client::{HttpSolarClient, SolarDataSource, SOLAR_DATA_PATH};
pub use model::{Alert, FlareReading, GeomagneticReading, SolarSnapshot};
pub use projector::{
    format_flux, format_flux_axis, AlertPanel, DashboardView, FluxPoint, FluxSeries, SystemStatus,
    ALL_CLEAR_MESSAGE,
};
pub use runtime::DashboardRuntime;
pub use scheduler::{
    FailurePolicy, RefreshMachine, RefreshScheduler, RequestId, SchedulerConfig, SchedulerHandle,
    ViewState, DEFAULT_REFRESH_INTERVAL,
};
