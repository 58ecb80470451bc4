//! Effect tracking, race resolution, and causal message synthesis.
//!
//! This crate provides:
//! - [`SagaMonitor`] - The facade the host effect-runtime calls into
//! - [`EffectManager`] - The permanent tree of effect records
//! - [`WorkingStore`] / [`RetentionPolicy`] - Bounded recently-triggered view
//! - [`MessageComposer`] - Human-readable causal trace synthesis
//! - [`TaskHandle`] - Deferred resolution of forked sub-computations
//! - Snapshot and formatting surface for manual inspection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod format;
pub mod manager;
pub mod message;
pub mod monitor;
pub mod record;
pub mod sink;
pub mod snapshot;
pub mod store;
pub mod task;

mod lifecycle;
mod race;

pub use config::MonitorConfig;
pub use format::TreeFormatter;
pub use manager::EffectManager;
pub use message::{CausalComposer, MessageComposer};
pub use monitor::SagaMonitor;
pub use record::{EffectDescriptor, EffectRecord, RootDescriptor};
pub use sink::{DiagnosticSink, MemorySink, StderrSink};
pub use snapshot::{EffectSnapshot, SagaSnapshot, StoreSnapshot};
pub use store::{EvictOnSettle, EvictStructural, KeepAll, RetentionPolicy, SettleContext, WorkingEntry, WorkingStore};
pub use task::{EffectOutcome, TaskHandle, TaskSettlement};
