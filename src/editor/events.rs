// src/editor/events.rs

use std::fmt;

/// State-change notifications published by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    /// The zoom factor changed.
    ZoomChanged(f64),
    /// Pointer position in image pixels, `None` when off the image.
    MouseMoved(Option<(i32, i32)>),
    /// Autoscroll request from a middle-button pan, in widget pixels.
    ScrollBars { dx: f64, dy: f64 },
    /// Vertical scroll request from the wheel, in widget pixels.
    ScrollVertical(f64),
    /// Something visible changed.
    Redraw,
}

pub type Listener = Box<dyn FnMut(&CanvasEvent) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

/// Synchronous fan-out of canvas events. Listeners run in subscription
/// order, before `emit` returns.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CanvasEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: CanvasEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_delivery_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Arc::clone(&log);
        bus.subscribe(move |e| first.lock().push(("first", *e)));
        let second = Arc::clone(&log);
        bus.subscribe(move |e| second.lock().push(("second", *e)));

        bus.emit(CanvasEvent::ZoomChanged(2.0));
        bus.emit(CanvasEvent::Redraw);

        assert_eq!(
            *log.lock(),
            vec![
                ("first", CanvasEvent::ZoomChanged(2.0)),
                ("second", CanvasEvent::ZoomChanged(2.0)),
                ("first", CanvasEvent::Redraw),
                ("second", CanvasEvent::Redraw),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();
        let counter = Arc::clone(&count);
        let id = bus.subscribe(move |_| *counter.lock() += 1);

        bus.emit(CanvasEvent::Redraw);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(CanvasEvent::Redraw);

        assert_eq!(*count.lock(), 1);
    }
}
