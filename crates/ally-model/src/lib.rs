//! Ally Domain Model
//!
//! Typed records for every annotation step, the closed [`StepKind`] table
//! that drives codec, walker and migration dispatch, and the UI-side
//! [`PageLedger`].
//!
//! # Core Concepts
//!
//! - [`StepKind`]: the fixed, enumerable set of annotation steps
//! - [`StepRecords`]: decoded payload of one step subtree
//! - [`PageLedgerEntry`]: per-page completion summary plus decoded data
//! - [`Preferences`]: persisted user preferences

mod ledger;
mod prefs;
mod records;
mod step;

pub use ledger::{PageLedger, PageLedgerEntry, StepData};
pub use prefs::{BreakpointDef, Preferences};
pub use records::{
    AltTextEntry, AltTextKind, BreakpointRecord, ContrastGrade, ContrastResult, FocusGroup,
    Gesture, GestureKind, Heading, Landmark, LandmarkKind, ReadingOrderEntry, StepRecords,
    TextZoomSetting, TouchTarget,
};
pub use step::{FlowKind, StepKind};
