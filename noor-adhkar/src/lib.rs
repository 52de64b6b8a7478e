//! # Noor Adhkar
//!
//! Daily remembrances:
//! - [`catalog`]: categorized remembrance catalog with a bundled default
//! - [`counters`]: per-entry counters, category progress and free tasbeeh
//! - [`haptics`]: vibration and chime feedback seams
//! - [`explain`]: model-generated explanations of a remembrance

pub mod catalog;
pub mod counters;
pub mod error;
pub mod explain;
pub mod haptics;

pub use catalog::{AdhkarCatalog, Category, Dhikr, Theme};
pub use counters::{CategoryProgress, DhikrCounter, Tasbeeh, TasbeehTarget, TapOutcome};
pub use error::{Error, Result};
pub use explain::{ExplainError, Explainer};
pub use haptics::{Chime, Haptics, NoChime, NoHaptics};
