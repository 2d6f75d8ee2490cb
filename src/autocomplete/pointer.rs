//! Host-wide pointer press source with scoped hit-test registrations.
//!
//! Each registration supplies a hit test for its own bounds. Dropping the
//! returned [`PointerGuard`] unregisters it, so a torn-down component never
//! receives presses again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use iced::Point;

type HitTest = Box<dyn Fn(Point) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where a press landed relative to one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Inside,
    Outside,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, HitTest)>,
}

#[derive(Default, Clone)]
pub struct PointerHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, hit_test: impl Fn(Point) -> bool + 'static) -> PointerGuard {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        let id = ListenerId(listeners.next_id);
        listeners.entries.push((id, Box::new(hit_test)));
        PointerGuard {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Hit-test a press against every live registration
    pub fn dispatch(&self, position: Point) -> Vec<(ListenerId, Hit)> {
        self.listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, hit_test)| {
                let hit = if hit_test(position) {
                    Hit::Inside
                } else {
                    Hit::Outside
                };
                (*id, hit)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Live registration; unregisters on drop
#[derive(Debug)]
pub struct PointerGuard {
    id: ListenerId,
    listeners: Weak<RefCell<Listeners>>,
}

impl PointerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for PointerGuard {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Rectangle, Size};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn dispatch_reports_inside_and_outside() {
        let hub = PointerHub::new();
        let bounds = rect(10.0, 10.0, 100.0, 40.0);
        let guard = hub.register(move |p| bounds.contains(p));

        assert_eq!(
            hub.dispatch(Point::new(20.0, 20.0)),
            vec![(guard.id(), Hit::Inside)]
        );
        assert_eq!(
            hub.dispatch(Point::new(200.0, 20.0)),
            vec![(guard.id(), Hit::Outside)]
        );
    }

    #[test]
    fn dropping_guard_unregisters() {
        let hub = PointerHub::new();
        let guard = hub.register(|_| false);
        assert_eq!(hub.len(), 1);

        drop(guard);

        assert!(hub.is_empty());
        assert!(hub.dispatch(Point::ORIGIN).is_empty());
    }

    #[test]
    fn guard_outliving_hub_is_harmless() {
        let hub = PointerHub::new();
        let guard = hub.register(|_| true);
        drop(hub);
        drop(guard);
    }
}
