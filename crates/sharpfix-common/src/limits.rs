//! Centralized limits and thresholds for the engine.
//!
//! Symbol graphs handed to the engine come from a host and may be malformed
//! (cyclic base lists, runaway nesting). These limits bound every walk so a
//! bad graph degrades the result instead of hanging the host.

// =============================================================================
// Graph Walk Limits
// =============================================================================

/// Maximum depth when walking an interface's base-interface closure.
///
/// Interface inheritance is acyclic in valid programs. A cyclic graph from a
/// broken compilation stops expanding at this depth.
pub const MAX_INTERFACE_DEPTH: u32 = 64;

/// Maximum number of base classes walked when searching for existing
/// implementations or delegation targets.
pub const MAX_BASE_CLASS_DEPTH: u32 = 64;

/// Maximum nesting depth when rendering or substituting a type reference.
///
/// `List<List<List<...>>>` deeper than this renders as the error type.
pub const MAX_TYPE_NESTING_DEPTH: u32 = 128;

// =============================================================================
// Name Generation Limits
// =============================================================================

/// Maximum numeric suffix tried when uniquifying a generated name
/// (`T1`, `T2`, ..., `disposedValue1`, ...).
///
/// Past this bound the last candidate is used even if it collides; the host
/// compiler then reports the duplicate instead of the engine spinning.
pub const MAX_NAME_SUFFIX: u32 = 1_000;
