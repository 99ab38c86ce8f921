#![forbid(unsafe_code)]

//! # sift-harness
//!
//! Treat plain-text worklists as heaps ordered by human pairwise judgement.
//!
//! Worklist items carry no intrinsic ordering key; the order comes from an
//! interactive rater answering "which of these two matters more?" one pair
//! at a time. Those answers are expensive and not guaranteed consistent or
//! transitive, so the engine models the comparator as an explicit
//! three-valued [`Oracle`] call, keeps the list only *heap*-ordered (a
//! local invariant, verified by [`Heap::is_heap`] against the answers of
//! one checking pass), and reuses verdicts within a run via
//! [`CachedOracle`].
//!
//! The engine is stateless between calls: a caller loads a sequence from
//! the line-oriented [`store`], runs one heap or transfer operation against
//! the live oracle, and stores the result.

pub mod console;
pub mod heap;
pub mod item;
pub mod oracle;
pub mod store;
pub mod trace;
pub mod transfer;

pub use console::Console;
pub use heap::{Heap, HeapError};
pub use item::Item;
pub use oracle::{CachedOracle, Oracle, Verdict};
pub use trace::{ComparisonTrace, JsonlTraceSink, TraceError, TraceSink};
pub use transfer::{merge_all, split, transfer_one};
