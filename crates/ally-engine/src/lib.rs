//! Ally Annotation Engine
//!
//! The read/write engine between typed annotation records and the
//! document tree that persists them:
//!
//! - [`find_child_by_name_prefix`] / [`get_or_create`]: the idempotent
//!   locator and upsert primitives every encoder is built on
//! - [`steps`]: one encoder module per annotation step
//! - [`scan_page`] / [`scan_document`]: the reconstruction walker that
//!   rebuilds the page ledger from the tree on load
//! - [`migrate_document`]: the one-time, per-root v1 → v2 panel rewrite
//!
//! # Example
//!
//! ```rust
//! use ally_engine::{scan_page, steps, PageContext};
//! use ally_model::{FlowKind, LandmarkKind};
//! use ally_tree::{DocumentTree, NodeKind, NodeTree, Rect};
//!
//! let mut tree = DocumentTree::new();
//! let canvas = tree.create_canvas("Page 1").unwrap();
//! let page = tree.create(NodeKind::Frame, "Home", Rect::new(0.0, 0.0, 1440.0, 900.0));
//! tree.append_child(&canvas, &page).unwrap();
//!
//! let ctx = PageContext::new(page, FlowKind::Web);
//! steps::landmarks::add_record(&mut tree, &ctx, LandmarkKind::Header, None).unwrap();
//! ```

mod context;
mod decode;
mod error;
mod locator;
mod migration;
mod upsert;
mod walker;

pub mod steps;

pub use context::PageContext;
pub use decode::decode_step;
pub use error::EngineError;
pub use locator::find_child_by_name_prefix;
pub use migration::{migrate_document, migrate_root, MigrationSummary};
pub use steps::{remove_many, StepPatch};
pub use upsert::{get_or_create, UpsertOutcome};
pub use walker::{find_roots, scan_document, scan_page};
