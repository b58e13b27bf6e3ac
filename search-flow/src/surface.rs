use crate::render::ResultItem;
use crate::state::SearchState;

/// Presentation side of the search form, driven by the controller.
///
/// The controller only calls `set_busy`/`set_submit_enabled` when the value
/// actually changes, so implementations may start and stop spinners directly.
pub trait Surface {
    /// Submit control. Disabled exactly while a search is in flight.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Busy indicator. Shown exactly while a search is in flight.
    fn set_busy(&mut self, busy: bool);

    /// Replaces the whole results region with `items` (possibly empty).
    fn show(&mut self, items: &[ResultItem]);

    /// Hook for every state transition.
    fn state_changed(&mut self, _state: &SearchState) {}
}
