//! The comparator contract and the per-run memo wrapper.
//!
//! Ordering is supplied on demand by an external rater, so the comparator is
//! modeled as an explicit three-valued call rather than an `Ord` impl: the
//! answers are expensive, interactive, and not guaranteed transitive or even
//! stable across calls. Heap order is therefore only a local guarantee,
//! checkable against the verdicts obtained during one pass
//! ([`crate::Heap::is_heap`]).

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::item::Item;
use crate::trace::{now_epoch_ms, ComparisonTrace, TraceSink};

// =============================================================================
// Verdict
// =============================================================================

/// The rater's answer for an ordered pair, in heap order.
///
/// `Less` means the first item belongs nearer the top of the heap (it was
/// judged more important); `Greater` the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Less,
    Greater,
    Equal,
}

impl Verdict {
    /// The verdict for the same pair queried in the opposite order.
    pub fn flip(self) -> Self {
        match self {
            Verdict::Less => Verdict::Greater,
            Verdict::Greater => Verdict::Less,
            Verdict::Equal => Verdict::Equal,
        }
    }
}

// =============================================================================
// Oracle
// =============================================================================

/// An external source of pairwise ordering verdicts.
///
/// Implementations never fail: degraded input (unrecognized answers, read
/// errors, EOF) is resolved locally to [`Verdict::Equal`]. Callers must
/// treat every invocation as blocking and potentially slow.
pub trait Oracle {
    fn compare(&mut self, a: &Item, b: &Item) -> Verdict;
}

/// Any `FnMut(&Item, &Item) -> Verdict` is an oracle; this is how tests
/// inject deterministic comparators.
impl<F> Oracle for F
where
    F: FnMut(&Item, &Item) -> Verdict,
{
    fn compare(&mut self, a: &Item, b: &Item) -> Verdict {
        self(a, b)
    }
}

// =============================================================================
// Memoizing wrapper
// =============================================================================

/// Memoizes verdicts for the lifetime of one process run.
///
/// Keys on the *unordered* pair of item texts — stable content, never
/// transient identity — and flips the stored verdict when a pair is queried
/// in the opposite order. The cache is an interaction-cost optimization
/// only; correctness never depends on it, and it is not persisted.
pub struct CachedOracle<'a> {
    inner: &'a mut dyn Oracle,
    memo: HashMap<(String, String), Verdict>,
    consultations: usize,
    hits: usize,
    trace: Option<&'a mut dyn TraceSink>,
}

impl<'a> CachedOracle<'a> {
    pub fn new(inner: &'a mut dyn Oracle) -> Self {
        Self {
            inner,
            memo: HashMap::new(),
            consultations: 0,
            hits: 0,
            trace: None,
        }
    }

    /// Record every resolved comparison to the given sink.
    pub fn with_trace(mut self, sink: &'a mut dyn TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Number of comparisons that reached the inner oracle.
    pub fn consultations(&self) -> usize {
        self.consultations
    }

    /// Number of comparisons answered from the memo table.
    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    fn record(&mut self, index: usize, a: &Item, b: &Item, verdict: Verdict, cached: bool) {
        if let Some(sink) = self.trace.as_mut() {
            let event = ComparisonTrace {
                timestamp_ms: now_epoch_ms(),
                comparison_index: index,
                item_a: a.text().to_string(),
                item_b: b.text().to_string(),
                verdict,
                cached,
            };
            if let Err(err) = sink.record(event) {
                warn!(error = %err, "failed to record comparison trace");
            }
        }
    }
}

impl Oracle for CachedOracle<'_> {
    fn compare(&mut self, a: &Item, b: &Item) -> Verdict {
        let flipped = a.text() > b.text();
        let key = if flipped {
            (b.text().to_string(), a.text().to_string())
        } else {
            (a.text().to_string(), b.text().to_string())
        };

        let index = self.consultations + self.hits;
        if let Some(&canonical) = self.memo.get(&key) {
            self.hits += 1;
            let verdict = if flipped { canonical.flip() } else { canonical };
            debug!(item_a = %a, item_b = %b, ?verdict, "reusing cached verdict");
            self.record(index, a, b, verdict, true);
            return verdict;
        }

        // Ask in the caller's order so the rater sees the pair as presented.
        let verdict = self.inner.compare(a, b);
        self.consultations += 1;
        let canonical = if flipped { verdict.flip() } else { verdict };
        self.memo.insert(key, canonical);
        self.record(index, a, b, verdict, false);
        verdict
    }
}
