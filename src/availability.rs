//! Artist availability rules.
//!
//! An artist may publish an availability window. Both bounds are optional and
//! inclusive. These checks are pure and generic so they can be exercised with
//! plain integers as well as timestamps.

/// Whether an availability window is well formed.
///
/// An end without a start is rejected, as is an end that precedes the start.
/// A window with no bounds at all is valid.
pub fn is_availability_window_valid<T: PartialOrd>(start: Option<T>, end: Option<T>) -> bool {
    match (start, end) {
        (None, Some(_)) => false,
        (Some(start), Some(end)) => start <= end,
        _ => true,
    }
}

/// Whether a show starting at `show_start` fits inside the artist's window.
///
/// A missing bound imposes no constraint on that side.
pub fn is_show_time_within_availability<T: PartialOrd>(
    show_start: T,
    artist_start: Option<T>,
    artist_end: Option<T>,
) -> bool {
    if artist_start.is_some_and(|start| show_start < start) {
        return false;
    }
    if artist_end.is_some_and(|end| show_start > end) {
        return false;
    }
    true
}
