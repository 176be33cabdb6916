//! Step kinds and their fixed dispatch tables
//!
//! The set of annotation steps is deliberately closed: every name the
//! codec can emit, every walker decoder and every migration line maps back
//! to one [`StepKind`] variant. Unknown names fall through a single
//! default path instead of scattered string comparisons.

use serde::{Deserialize, Serialize};

/// Platform flow a page is designed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Web page flow
    Web,
    /// Native app flow
    Native,
}

impl FlowKind {
    /// Wire key (`web` / `native`)
    #[inline]
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Native => "native",
        }
    }

    /// Capitalized form used in Accessibility Root names (`Web` / `Native`)
    #[inline]
    #[must_use]
    pub fn capitalized(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Native => "Native",
        }
    }

    /// Parse the capitalized name suffix back into a flow kind
    #[inline]
    #[must_use]
    pub fn from_capitalized(value: &str) -> Option<Self> {
        match value {
            "Web" => Some(Self::Web),
            "Native" => Some(Self::Native),
            _ => None,
        }
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.capitalized())
    }
}

/// One annotation step
///
/// Variant order is the canonical top-to-bottom order of the annotations
/// panel and of `steps_completed` reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Page landmark regions (header, nav, main, ...)
    Landmarks,
    /// Heading outline levels
    Headings,
    /// Reading / focus order markers
    ReadingOrder,
    /// Alternative text for imagery
    AltText,
    /// Color contrast results
    Contrast,
    /// Complex gesture alternatives
    Gestures,
    /// Touch target sizing
    TouchTargets,
    /// Focus grouping of related controls
    FocusGrouping,
    /// Responsive reflow breakpoints
    ResponsiveReflow,
    /// Text zoom behavior
    TextZoom,
}

impl StepKind {
    /// All known steps in canonical panel order
    pub const ALL: [Self; 10] = [
        Self::Landmarks,
        Self::Headings,
        Self::ReadingOrder,
        Self::AltText,
        Self::Contrast,
        Self::Gestures,
        Self::TouchTargets,
        Self::FocusGrouping,
        Self::ResponsiveReflow,
        Self::TextZoom,
    ];

    /// Wire key, matching the serde representation
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Landmarks => "landmarks",
            Self::Headings => "headings",
            Self::ReadingOrder => "reading-order",
            Self::AltText => "alt-text",
            Self::Contrast => "contrast",
            Self::Gestures => "gestures",
            Self::TouchTargets => "touch-targets",
            Self::FocusGrouping => "focus-grouping",
            Self::ResponsiveReflow => "responsive-reflow",
            Self::TextZoom => "text-zoom",
        }
    }

    /// Human-readable step title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Landmarks => "Landmarks",
            Self::Headings => "Headings",
            Self::ReadingOrder => "Reading order",
            Self::AltText => "Alt text",
            Self::Contrast => "Contrast",
            Self::Gestures => "Gestures",
            Self::TouchTargets => "Touch targets",
            Self::FocusGrouping => "Focus grouping",
            Self::ResponsiveReflow => "Responsive reflow",
            Self::TextZoom => "Text zoom",
        }
    }

    /// Step Subtree name prefix (`"<title> Layer"`); the generated id
    /// suffix is baked in by the encoder on first creation
    #[must_use]
    pub fn layer_name(self) -> &'static str {
        match self {
            Self::Landmarks => "Landmarks Layer",
            Self::Headings => "Headings Layer",
            Self::ReadingOrder => "Reading Order Layer",
            Self::AltText => "Alt Text Layer",
            Self::Contrast => "Contrast Layer",
            Self::Gestures => "Gestures Layer",
            Self::TouchTargets => "Touch Targets Layer",
            Self::FocusGrouping => "Focus Grouping Layer",
            Self::ResponsiveReflow => "Responsive Reflow Layer",
            Self::TextZoom => "Text Zoom Layer",
        }
    }

    /// Record kind written into Annotation Block names
    #[must_use]
    pub fn block_kind(self) -> &'static str {
        match self {
            Self::Landmarks => "Landmark",
            Self::Headings => "Heading",
            Self::ReadingOrder => "Focus order",
            Self::AltText => "Alt text",
            Self::Contrast => "Contrast",
            Self::Gestures => "Gesture",
            Self::TouchTargets => "Touch target",
            Self::FocusGrouping => "Focus group",
            Self::ResponsiveReflow => "Breakpoint",
            Self::TextZoom => "Text zoom",
        }
    }

    /// Panel line name for this step (v2 annotations panel)
    #[must_use]
    pub fn line_name(self) -> String {
        format!("{} line", self.title())
    }

    /// Caption shown on a panel line before any records exist
    #[must_use]
    pub fn empty_state_caption(self) -> &'static str {
        match self {
            Self::Landmarks => "Mark header, nav, main and footer regions.",
            Self::Headings => "Assign outline levels to every visible heading.",
            Self::ReadingOrder => "Number interactive elements in reading order.",
            Self::AltText => "Describe imagery, or mark it decorative.",
            Self::Contrast => "Record contrast ratios for text and icons.",
            Self::Gestures => "Document single-pointer alternatives for gestures.",
            Self::TouchTargets => "Verify target sizes against the minimum.",
            Self::FocusGrouping => "Group related controls into focus stops.",
            Self::ResponsiveReflow => "Capture layouts at each breakpoint.",
            Self::TextZoom => "Show the layout at enlarged text sizes.",
        }
    }

    /// Reverse lookup from a wire key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.key() == key)
    }

    /// Reverse lookup from a Step Subtree name prefix
    ///
    /// Matches both the bare layer name and the current shape with the
    /// baked-in id suffix.
    #[must_use]
    pub fn from_layer_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| {
            name == step.layer_name() || name.starts_with(&format!("{} |", step.layer_name()))
        })
    }

    /// Whether the step applies to pages of the given flow
    #[must_use]
    pub fn applies_to(self, flow: FlowKind) -> bool {
        match self {
            Self::Gestures => flow == FlowKind::Native,
            Self::Landmarks | Self::ResponsiveReflow => flow == FlowKind::Web,
            _ => true,
        }
    }

    /// Coarser step whose completion this step implies, if any
    ///
    /// The paired step is never toggled independently; the walker registers
    /// it when the detailed step is present.
    #[must_use]
    pub fn implies(self) -> Option<Self> {
        match self {
            Self::FocusGrouping => Some(Self::ReadingOrder),
            Self::ResponsiveReflow => Some(Self::TextZoom),
            _ => None,
        }
    }

    /// Vertical correction applied when anchoring this step's exemplar to
    /// its panel line, if the step has exemplar art at all
    #[must_use]
    pub fn exemplar_offset(self) -> Option<f64> {
        match self {
            Self::Landmarks => Some(-2.0),
            Self::Headings => Some(4.0),
            Self::ReadingOrder => Some(0.0),
            Self::TouchTargets => Some(6.0),
            _ => None,
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
