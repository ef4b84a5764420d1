//! "Scene changed" notification.

use std::fmt;

type Observer = Box<dyn FnMut()>;

/// Signals that the scene needs a redraw.
///
/// Observers are called synchronously on every notification. A dirty flag is
/// kept alongside so a frame loop can poll instead; repeated notifications
/// between polls coalesce into one.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<Observer>,
    dirty: bool,
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.observers.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn notify(&mut self) {
        self.dirty = true;
        for observer in &mut self.observers {
            observer();
        }
    }

    /// Whether anything changed since the last call; resets the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
