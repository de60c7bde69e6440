//! Stack growth for the recursive parser and renderer
//!
//! Grammar rules and render calls recurse once per nesting level, and a
//! debug build spends several kilobytes of stack on each level. Entering a
//! level through [`grow`] moves the work to a heap-allocated segment when the
//! current stack is nearly used up, so the `max_depth` ceiling is reached
//! before the thread stack is.

/// Remaining stack below which a new segment is allocated
const RED_ZONE: usize = 128 * 1024;

/// Size of each heap-allocated segment
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, switching to a fresh stack segment first if space is low
pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}
