//! Boundary step events in time order.

/// What happens to the corridor at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A lower-boundary crossing time: the corridor ceiling rises by one level.
    LowerStep,
    /// An upper-boundary crossing time: the corridor floor rises by one level.
    UpperStep,
    /// Sentinel at `t = 1`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub location: f64,
    pub kind: EventKind,
}

impl Event {
    #[inline]
    pub fn new(location: f64, kind: EventKind) -> Self {
        Self { location, kind }
    }
}

/// Merges both boundaries into one ascending stream terminated by an `End` event at 1.0.
///
/// The sort is stable and lower steps are pushed first, so at equal locations the ceiling
/// is raised before the floor.
pub fn join_all_bounds(lower: &[f64], upper: &[f64]) -> Vec<Event> {
    let mut events = Vec::with_capacity(lower.len() + upper.len() + 1);
    events.extend(lower.iter().map(|&x| Event::new(x, EventKind::LowerStep)));
    events.extend(upper.iter().map(|&x| Event::new(x, EventKind::UpperStep)));
    events.sort_by(|a, b| a.location.total_cmp(&b.location));
    events.push(Event::new(1.0, EventKind::End));
    events
}
