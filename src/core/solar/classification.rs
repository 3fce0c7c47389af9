//! Flare severity tiers.
//!
//! Tiers form a closed, ordered set. The derived `Ord` follows declaration
//! order, so `FlareClass::A < FlareClass::X` and sorting by tier sorts by
//! severity.

use serde::{Deserialize, Serialize};

/// Display color for a tier, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
}

/// Constant metadata attached to each tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierInfo {
    pub label: &'static str,
    /// Inclusive lower flux bound in W/m². `0.0` for the background tier.
    pub threshold: f64,
    pub description: &'static str,
    pub legend: &'static str,
    pub range: &'static str,
    pub color: TierColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FlareClass {
    A,
    B,
    C,
    M,
    X,
}

const TIERS: [TierInfo; 5] = [
    TierInfo {
        label: "A-class",
        threshold: 0.0,
        description: "Background level. Very minimal activity.",
        legend: "A-class: Background level",
        range: "< 10⁻⁷ W/m²",
        color: TierColor::Blue,
    },
    TierInfo {
        label: "B-class",
        threshold: 1e-7,
        description: "Minor event. No significant Earth impact.",
        legend: "B-class: Minor events",
        range: "≥ 10⁻⁷ W/m²",
        color: TierColor::Green,
    },
    TierInfo {
        label: "C-class",
        threshold: 1e-6,
        description: "Common event. Minor impact on Earth.",
        legend: "C-class: Common events",
        range: "≥ 10⁻⁶ W/m²",
        color: TierColor::Yellow,
    },
    TierInfo {
        label: "M-class",
        threshold: 1e-5,
        description: "Medium-sized. Can cause brief radio blackouts.",
        legend: "M-class: Medium events",
        range: "≥ 10⁻⁵ W/m²",
        color: TierColor::Orange,
    },
    TierInfo {
        label: "X-class",
        threshold: 1e-4,
        description: "Major event. Can trigger radio blackouts and radiation storms.",
        legend: "X-class: Major events",
        range: "≥ 10⁻⁴ W/m²",
        color: TierColor::Red,
    },
];

impl FlareClass {
    /// All tiers, least severe first.
    pub const ALL: [FlareClass; 5] = [
        FlareClass::A,
        FlareClass::B,
        FlareClass::C,
        FlareClass::M,
        FlareClass::X,
    ];

    /// Severity rank, 0 for A-class up to 4 for X-class.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn info(self) -> &'static TierInfo {
        &TIERS[self.rank() as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn threshold(self) -> f64 {
        self.info().threshold
    }

    pub fn color(self) -> TierColor {
        self.info().color
    }

    /// Tiers ordered for the scale legend, most severe first.
    pub fn legend_order() -> impl Iterator<Item = FlareClass> {
        Self::ALL.into_iter().rev()
    }
}

impl std::fmt::Display for FlareClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a flux value (W/m², expected positive) to its tier.
///
/// Thresholds are inclusive lower bounds checked from the most severe tier
/// down, so a boundary value belongs to the higher tier. Inputs below every
/// threshold, including out-of-contract zero or negative values, land in
/// A-class.
pub fn classify(flux: f64) -> FlareClass {
    FlareClass::legend_order()
        .find(|class| flux >= class.threshold() && *class != FlareClass::A)
        .unwrap_or(FlareClass::A)
}

/// Classification shown in the "current activity" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentActivity {
    Classified(FlareClass),
    /// No flare readings available
    Unknown,
}

impl CurrentActivity {
    pub fn label(self) -> &'static str {
        match self {
            CurrentActivity::Classified(class) => class.label(),
            CurrentActivity::Unknown => "Unknown",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CurrentActivity::Classified(class) => class.description(),
            CurrentActivity::Unknown => "Unknown classification",
        }
    }

    pub fn color(self) -> TierColor {
        match self {
            CurrentActivity::Classified(class) => class.color(),
            CurrentActivity::Unknown => TierColor::Gray,
        }
    }

    pub fn flare_class(self) -> Option<FlareClass> {
        match self {
            CurrentActivity::Classified(class) => Some(class),
            CurrentActivity::Unknown => None,
        }
    }
}
