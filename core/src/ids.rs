//! Per-entity identity allocation.

use std::marker::PhantomData;

/// Monotonic id counter for one entity type.
///
/// Starts at 1 and only moves forward: ids of deleted entities are never
/// handed out again. Ids are unique within one allocator, not across types.
///
/// # Examples
///
/// ```
/// use campus_events_core::ids::IdAllocator;
/// use campus_events_core::types::EventId;
///
/// let mut ids = IdAllocator::<EventId>::new();
/// assert_eq!(ids.allocate(), EventId::new(1));
/// assert_eq!(ids.allocate(), EventId::new(2));
/// assert_eq!(ids.peek(), EventId::new(3));
/// ```
#[derive(Debug)]
pub struct IdAllocator<I> {
    next: u64,
    _id: PhantomData<fn() -> I>,
}

impl<I: From<u64>> IdAllocator<I> {
    /// Create an allocator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: 1,
            _id: PhantomData,
        }
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> I {
        let id = self.next;
        self.next += 1;
        I::from(id)
    }

    /// The id the next call to [`allocate`](Self::allocate) will return.
    #[must_use]
    pub fn peek(&self) -> I {
        I::from(self.next)
    }
}

impl<I: From<u64>> Default for IdAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RegistrationId, UserId};

    #[test]
    fn allocators_are_independent() {
        let mut users = IdAllocator::<UserId>::new();
        let mut registrations = IdAllocator::<RegistrationId>::new();

        assert_eq!(users.allocate(), UserId::new(1));
        assert_eq!(users.allocate(), UserId::new(2));
        assert_eq!(registrations.allocate(), RegistrationId::new(1));
    }
}
