//! Typed annotation records
//!
//! One record type per step. These are the in-memory shapes the codec
//! encodes into node names and the walker decodes back out; they also
//! travel over the sync protocol as ledger payloads.

use crate::step::StepKind;
use ally_tree::NodeId;
use serde::{Deserialize, Serialize};

/// Landmark region type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkKind {
    /// Page banner region
    Header,
    /// Navigation region
    Nav,
    /// Main content region
    Main,
    /// Complementary content
    Aside,
    /// Footer region
    Footer,
    /// Standalone section
    Section,
    /// Form region
    Form,
    /// Search region
    Search,
    /// Generic named region
    Region,
}

impl LandmarkKind {
    /// Current on-tree name for this landmark type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Nav => "nav",
            Self::Main => "main",
            Self::Aside => "aside",
            Self::Footer => "footer",
            Self::Section => "section",
            Self::Form => "form",
            Self::Search => "search",
            Self::Region => "region",
        }
    }

    /// Parse a current landmark type name
    ///
    /// Legacy (pre-rename) values are the walker's concern; see its remap
    /// table.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "header" => Some(Self::Header),
            "nav" => Some(Self::Nav),
            "main" => Some(Self::Main),
            "aside" => Some(Self::Aside),
            "footer" => Some(Self::Footer),
            "section" => Some(Self::Section),
            "form" => Some(Self::Form),
            "search" => Some(Self::Search),
            "region" => Some(Self::Region),
            _ => None,
        }
    }
}

/// One landmark annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Annotation block node id
    pub id: NodeId,
    /// Landmark region type
    pub kind: LandmarkKind,
    /// Optional free-text label distinguishing repeated types
    pub label: Option<String>,
    /// Raw block node name as stored on the tree
    pub name: String,
}

/// One heading annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Annotation block node id
    pub id: NodeId,
    /// Outline level, 1..=6
    pub level: u8,
    /// Heading text
    pub text: String,
    /// Design node the heading refers to; the walker drops entries whose
    /// target no longer resolves
    pub target: NodeId,
}

/// One reading-order marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingOrderEntry {
    /// Annotation block node id
    pub id: NodeId,
    /// Position in the reading sequence; decoded order follows this
    /// number, not tree insertion order
    pub sequence: u32,
    /// Marker label
    pub label: String,
}

/// How an image participates in the accessible experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltTextKind {
    /// Conveys content; needs a description
    Informative,
    /// Purely visual; hidden from assistive tech
    Decorative,
}

impl AltTextKind {
    /// On-tree subtype name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informative => "informative",
            Self::Decorative => "decorative",
        }
    }

    /// Parse an on-tree subtype name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "informative" => Some(Self::Informative),
            "decorative" => Some(Self::Decorative),
            _ => None,
        }
    }
}

/// One alt-text entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltTextEntry {
    /// Annotation block node id
    pub id: NodeId,
    /// Informative or decorative
    pub kind: AltTextKind,
    /// Description; empty for decorative images
    pub alt: String,
}

/// Contrast check outcome band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastGrade {
    /// Below the AA threshold
    Fail,
    /// Meets AA
    Aa,
    /// Meets AAA
    Aaa,
}

impl ContrastGrade {
    /// On-tree subtype name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }

    /// Parse an on-tree subtype name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Fail" => Some(Self::Fail),
            "AA" => Some(Self::Aa),
            "AAA" => Some(Self::Aaa),
            _ => None,
        }
    }
}

/// One recorded contrast measurement
///
/// The ratio itself comes from the WCAG math collaborator; this type only
/// persists the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastResult {
    /// Annotation block node id
    pub id: NodeId,
    /// Measured ratio, e.g. `4.61`
    pub ratio: f64,
    /// Outcome band
    pub grade: ContrastGrade,
}

/// Complex gesture type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    /// Directional swipe
    Swipe,
    /// Two-finger pinch or spread
    Pinch,
    /// Press and move
    Drag,
    /// Two quick taps
    DoubleTap,
    /// Press and hold
    LongPress,
    /// Two-finger rotation
    Rotate,
}

impl GestureKind {
    /// On-tree subtype name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Swipe => "swipe",
            Self::Pinch => "pinch",
            Self::Drag => "drag",
            Self::DoubleTap => "double-tap",
            Self::LongPress => "long-press",
            Self::Rotate => "rotate",
        }
    }

    /// Parse an on-tree subtype name
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "swipe" => Some(Self::Swipe),
            "pinch" => Some(Self::Pinch),
            "drag" => Some(Self::Drag),
            "double-tap" => Some(Self::DoubleTap),
            "long-press" => Some(Self::LongPress),
            "rotate" => Some(Self::Rotate),
            _ => None,
        }
    }
}

/// One gesture annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// Annotation block node id
    pub id: NodeId,
    /// Gesture type
    pub kind: GestureKind,
    /// Single-pointer alternative, if documented
    pub alternative: Option<String>,
}

/// One touch-target measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTarget {
    /// Annotation block node id
    pub id: NodeId,
    /// Target width in pixels
    pub width: f64,
    /// Target height in pixels
    pub height: f64,
}

impl TouchTarget {
    /// Minimum recommended target edge in pixels
    pub const MINIMUM_EDGE: f64 = 44.0;

    /// Whether the target meets the recommended minimum on both axes
    #[inline]
    #[must_use]
    pub fn meets_minimum(&self) -> bool {
        self.width >= Self::MINIMUM_EDGE && self.height >= Self::MINIMUM_EDGE
    }
}

/// One focus group annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusGroup {
    /// Annotation block node id
    pub id: NodeId,
    /// Group label
    pub label: String,
}

/// One captured responsive breakpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointRecord {
    /// Annotation block node id
    pub id: NodeId,
    /// Viewport width in pixels
    pub width: u32,
    /// Breakpoint label, e.g. `Tablet`
    pub label: String,
}

/// One text-zoom capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextZoomSetting {
    /// Annotation block node id
    pub id: NodeId,
    /// Zoom percentage, e.g. `200`
    pub percent: u16,
}

/// Decoded payload of one step subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "records", rename_all = "kebab-case")]
pub enum StepRecords {
    /// Landmark records
    Landmarks(Vec<Landmark>),
    /// Heading records
    Headings(Vec<Heading>),
    /// Reading-order records, sorted by sequence
    ReadingOrder(Vec<ReadingOrderEntry>),
    /// Alt-text records
    AltText(Vec<AltTextEntry>),
    /// Contrast records
    Contrast(Vec<ContrastResult>),
    /// Gesture records
    Gestures(Vec<Gesture>),
    /// Touch-target records
    TouchTargets(Vec<TouchTarget>),
    /// Focus-group records
    FocusGrouping(Vec<FocusGroup>),
    /// Breakpoint records
    ResponsiveReflow(Vec<BreakpointRecord>),
    /// Text-zoom records
    TextZoom(Vec<TextZoomSetting>),
    /// Step confirmed with nothing to record ("no landmarks on this page")
    Confirmed,
}

impl StepRecords {
    /// Step this payload belongs to; `None` for the bare confirmation
    #[must_use]
    pub fn step(&self) -> Option<StepKind> {
        match self {
            Self::Landmarks(_) => Some(StepKind::Landmarks),
            Self::Headings(_) => Some(StepKind::Headings),
            Self::ReadingOrder(_) => Some(StepKind::ReadingOrder),
            Self::AltText(_) => Some(StepKind::AltText),
            Self::Contrast(_) => Some(StepKind::Contrast),
            Self::Gestures(_) => Some(StepKind::Gestures),
            Self::TouchTargets(_) => Some(StepKind::TouchTargets),
            Self::FocusGrouping(_) => Some(StepKind::FocusGrouping),
            Self::ResponsiveReflow(_) => Some(StepKind::ResponsiveReflow),
            Self::TextZoom(_) => Some(StepKind::TextZoom),
            Self::Confirmed => None,
        }
    }

    /// Number of decoded records
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Landmarks(v) => v.len(),
            Self::Headings(v) => v.len(),
            Self::ReadingOrder(v) => v.len(),
            Self::AltText(v) => v.len(),
            Self::Contrast(v) => v.len(),
            Self::Gestures(v) => v.len(),
            Self::TouchTargets(v) => v.len(),
            Self::FocusGrouping(v) => v.len(),
            Self::ResponsiveReflow(v) => v.len(),
            Self::TextZoom(v) => v.len(),
            Self::Confirmed => 0,
        }
    }

    /// Whether the payload carries no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
