//! Hint reveal state machine
//!
//! Per task, the state is the last hint index shown: `None` before the first
//! reveal, then `Some(i)`. Transitions only move forward and never past the
//! last hint.

use std::ops::Range;

/// Result of advancing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to this index and reveal the hint there
    Reveal(usize),
    /// Already at the last hint (or the task has none); state unchanged
    Exhausted,
}

/// Next state after an `advance`
#[must_use]
pub fn advance(last_seen: Option<usize>, hint_count: usize) -> Transition {
    let next = match last_seen {
        None => 0,
        Some(i) => i.saturating_add(1),
    };
    if next < hint_count {
        Transition::Reveal(next)
    } else {
        Transition::Exhausted
    }
}

/// Indices already revealed, or `None` if nothing has been seen
#[must_use]
pub fn seen_range(last_seen: Option<usize>, hint_count: usize) -> Option<Range<usize>> {
    last_seen.map(|i| 0..i.saturating_add(1).min(hint_count))
}

/// Whether every hint of the task has been shown
#[must_use]
pub fn is_exhausted(last_seen: Option<usize>, hint_count: usize) -> bool {
    match last_seen {
        None => hint_count == 0,
        Some(i) => i.saturating_add(1) >= hint_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_reveals_zero() {
        assert_eq!(advance(None, 2), Transition::Reveal(0));
    }

    #[test]
    fn advance_moves_forward() {
        assert_eq!(advance(Some(0), 2), Transition::Reveal(1));
    }

    #[test]
    fn advance_stops_at_last_hint() {
        assert_eq!(advance(Some(1), 2), Transition::Exhausted);
        assert_eq!(advance(Some(7), 2), Transition::Exhausted);
    }

    #[test]
    fn advance_without_hints() {
        assert_eq!(advance(None, 0), Transition::Exhausted);
    }

    #[test]
    fn seen_range_clamps_to_hint_count() {
        assert_eq!(seen_range(None, 3), None);
        assert_eq!(seen_range(Some(0), 3), Some(0..1));
        assert_eq!(seen_range(Some(9), 3), Some(0..3));
    }

    #[test]
    fn exhaustion() {
        assert!(!is_exhausted(Some(0), 2));
        assert!(is_exhausted(Some(1), 2));
        assert!(is_exhausted(Some(5), 2));
        assert!(!is_exhausted(None, 2));
    }
}
