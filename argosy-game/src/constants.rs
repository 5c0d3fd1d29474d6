//! Default tuning constants for the Argosy planning logic.
//!
//! These values define the deterministic planning defaults. Keeping them
//! together means the ruleset can only be adjusted through reviewed code
//! changes or an explicit [`crate::planner::PlanConfig`].

// Clustering --------------------------------------------------------------
pub(crate) const DEFAULT_CLUSTER_SPREAD: u32 = 6;
pub(crate) const DEFAULT_MAX_CLUSTER_TASKS: usize = 8;
// Permutation enumeration is factorial in cluster size; the sequencer
// refuses configurations past this bound.
pub(crate) const MAX_SEQUENCED_CLUSTER_TASKS: usize = 9;

// Movement ----------------------------------------------------------------
pub(crate) const DEFAULT_TURN_CAPACITY: u32 = 3;
pub(crate) const DEFAULT_CARGO_CAPACITY: u32 = 2;

// Shrines -----------------------------------------------------------------
pub(crate) const DEFAULT_SHRINE_TARGET: usize = 3;
