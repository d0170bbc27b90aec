/// Running totals kept by the reconciliation scheduler for diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Fragments that started a new buffered state
    pub created: u64,
    /// Fragments merged into an already buffered state
    pub coalesced: u64,
    /// Fragments read and discarded because this host is the authority
    pub authority_discarded: u64,
    /// Fragments or states that arrived after a newer one
    pub stale_discarded: u64,
    /// Buffered states evicted to keep the buffer bounded
    pub evicted: u64,
    /// States applied and replayed
    pub reconciled: u64,
    /// Ready states dropped by the low-performance throttle
    pub dropped_low_performance: u64,
    /// Fragments the simulation failed to apply
    pub failed_fragments: u64,
    /// Total ticks re-executed across all replays
    pub replayed_ticks: u64,
}
