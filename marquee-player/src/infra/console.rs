//! Terminal stand-ins for the host platform
//!
//! Device chrome and navigation are logged instead of performed. Each adapter
//! keeps just enough state for the runtime and tests to observe it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, error, info};
use marquee_contracts::back::{BackHandler, BackHandlerRegistry, SubscriptionId};
use marquee_contracts::device::{Orientation, OrientationGuard};
use marquee_contracts::host::{DismissReason, HostNavigator};
use marquee_core::Platform;

#[derive(Debug)]
pub struct ConsoleChrome {
    orientation: Cell<Orientation>,
    navigation_bar_visible: Cell<bool>,
}

impl Default for ConsoleChrome {
    fn default() -> Self {
        Self {
            orientation: Cell::new(Orientation::Portrait),
            navigation_bar_visible: Cell::new(true),
        }
    }
}

impl ConsoleChrome {
    pub fn orientation(&self) -> Orientation {
        self.orientation.get()
    }

    pub fn navigation_bar_visible(&self) -> bool {
        self.navigation_bar_visible.get()
    }
}

impl OrientationGuard for ConsoleChrome {
    fn lock(&self, orientation: Orientation) {
        info!("[Device] Orientation locked to {orientation:?}");
        self.orientation.set(orientation);
    }

    fn hide_navigation_bar(&self) {
        info!("[Device] Navigation bar hidden");
        self.navigation_bar_visible.set(false);
    }

    fn show_navigation_bar(&self) {
        info!("[Device] Navigation bar shown");
        self.navigation_bar_visible.set(true);
    }
}

/// Keeps registered back handlers. The console host delivers back presses
/// to the screen directly, so handlers are held but not invoked here.
#[derive(Default)]
pub struct ConsoleBackRegistry {
    handlers: RefCell<Vec<(SubscriptionId, BackHandler)>>,
    next: Cell<u64>,
}

impl ConsoleBackRegistry {
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl BackHandlerRegistry for ConsoleBackRegistry {
    fn subscribe(&self, handler: BackHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next.get() + 1);
        self.next.set(id.get());
        self.handlers.borrow_mut().push((id, handler));
        debug!("[Host] Back handler {id} subscribed");
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }
}

impl fmt::Debug for ConsoleBackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleBackRegistry")
            .field("live", &self.len())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct ConsoleHost {
    dismissal: RefCell<Option<DismissReason>>,
}

impl ConsoleHost {
    /// The first dismissal request, if any.
    pub fn take_dismissal(&self) -> Option<DismissReason> {
        self.dismissal.borrow_mut().take()
    }
}

impl HostNavigator for ConsoleHost {
    fn dismiss(&self, reason: DismissReason) {
        match &reason {
            DismissReason::PlaybackFailed(failure) => {
                error!("[Host] Dismissing player: {failure}");
            }
        }
        self.dismissal.borrow_mut().get_or_insert(reason);
    }
}

/// The three adapters, with shared handles for the runtime.
#[derive(Debug, Clone, Default)]
pub struct ConsolePlatform {
    pub chrome: Rc<ConsoleChrome>,
    pub back: Rc<ConsoleBackRegistry>,
    pub host: Rc<ConsoleHost>,
}

impl ConsolePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(&self) -> Platform {
        Platform {
            device: self.chrome.clone(),
            back: self.back.clone(),
            host: self.host.clone(),
        }
    }
}
