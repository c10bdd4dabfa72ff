use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use marquee_contracts::back::{
    BackDisposition, BackHandlerRegistry, BackSubscription,
};
use marquee_contracts::device::{Orientation, OrientationGuard};
use tracing::{debug, info};

use crate::error::LifecycleError;

/// Binds device chrome to the screen's lifetime.
///
/// Mount locks landscape and hides the navigation bar. Hardware back and
/// unmount restore portrait and the navigation bar, at most once per mount,
/// whichever comes first. The back registration is a [`BackSubscription`],
/// so there is exactly one per mount and it cannot leak.
pub struct LifecycleOrientationGuard {
    device: Rc<dyn OrientationGuard>,
    registry: Rc<dyn BackHandlerRegistry>,
    subscription: Option<BackSubscription>,
    restored: Rc<Cell<bool>>,
}

impl LifecycleOrientationGuard {
    pub fn new(
        device: Rc<dyn OrientationGuard>,
        registry: Rc<dyn BackHandlerRegistry>,
    ) -> Self {
        Self {
            device,
            registry,
            subscription: None,
            restored: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn on_mount(&mut self) -> Result<(), LifecycleError> {
        if self.subscription.is_some() {
            return Err(LifecycleError::AlreadyMounted);
        }

        self.device.lock(Orientation::Landscape);
        self.device.hide_navigation_bar();
        self.restored.set(false);

        let device = Rc::clone(&self.device);
        let restored = Rc::clone(&self.restored);
        self.subscription = Some(BackSubscription::acquire(
            Rc::clone(&self.registry),
            Box::new(move || {
                restore(device.as_ref(), &restored);
                BackDisposition::NotConsumed
            }),
        ));
        info!("Player mounted: landscape, navigation bar hidden");
        Ok(())
    }

    /// Same effect as the registered handler, for hosts that deliver back
    /// presses to the screen directly.
    pub fn on_hardware_back(&self) -> BackDisposition {
        if self.is_mounted() {
            restore(self.device.as_ref(), &self.restored);
        }
        BackDisposition::NotConsumed
    }

    pub fn on_unmount(&mut self) -> Result<(), LifecycleError> {
        let subscription =
            self.subscription.take().ok_or(LifecycleError::NotMounted)?;
        restore(self.device.as_ref(), &self.restored);
        subscription.release();
        info!("Player unmounted");
        Ok(())
    }
}

fn restore(device: &dyn OrientationGuard, restored: &Cell<bool>) {
    if restored.replace(true) {
        debug!("Device chrome already restored");
        return;
    }
    device.lock(Orientation::Portrait);
    device.show_navigation_bar();
    debug!("Restored portrait and navigation bar");
}

impl Drop for LifecycleOrientationGuard {
    fn drop(&mut self) {
        if self.is_mounted() {
            let _ = self.on_unmount();
        }
    }
}

impl fmt::Debug for LifecycleOrientationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleOrientationGuard")
            .field("subscription", &self.subscription)
            .field("restored", &self.restored.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_contracts::back::{BackHandler, SubscriptionId};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Chrome {
        calls: RefCell<Vec<&'static str>>,
    }

    impl OrientationGuard for Chrome {
        fn lock(&self, orientation: Orientation) {
            self.calls.borrow_mut().push(match orientation {
                Orientation::Landscape => "landscape",
                Orientation::Portrait => "portrait",
            });
        }

        fn hide_navigation_bar(&self) {
            self.calls.borrow_mut().push("hide");
        }

        fn show_navigation_bar(&self) {
            self.calls.borrow_mut().push("show");
        }
    }

    #[derive(Default)]
    struct Registry {
        handlers: RefCell<Vec<(SubscriptionId, BackHandler)>>,
        next: Cell<u64>,
    }

    impl Registry {
        fn press_back(&self) -> Vec<BackDisposition> {
            self.handlers
                .borrow_mut()
                .iter_mut()
                .map(|(_, handler)| handler())
                .collect()
        }
    }

    impl BackHandlerRegistry for Registry {
        fn subscribe(&self, handler: BackHandler) -> SubscriptionId {
            self.next.set(self.next.get() + 1);
            let id = SubscriptionId::new(self.next.get());
            self.handlers.borrow_mut().push((id, handler));
            id
        }

        fn unsubscribe(&self, id: SubscriptionId) -> bool {
            let mut handlers = self.handlers.borrow_mut();
            let before = handlers.len();
            handlers.retain(|(existing, _)| *existing != id);
            handlers.len() != before
        }
    }

    fn guard() -> (LifecycleOrientationGuard, Rc<Chrome>, Rc<Registry>) {
        let chrome = Rc::new(Chrome::default());
        let registry = Rc::new(Registry::default());
        let guard = LifecycleOrientationGuard::new(chrome.clone(), registry.clone());
        (guard, chrome, registry)
    }

    #[test]
    fn back_then_unmount_restores_once() {
        let (mut guard, chrome, registry) = guard();
        guard.on_mount().unwrap();
        assert_eq!(registry.handlers.borrow().len(), 1);

        assert_eq!(registry.press_back(), vec![BackDisposition::NotConsumed]);
        guard.on_unmount().unwrap();

        assert_eq!(
            *chrome.calls.borrow(),
            vec!["landscape", "hide", "portrait", "show"]
        );
        assert!(registry.handlers.borrow().is_empty());
    }

    #[test]
    fn double_mount_is_rejected() {
        let (mut guard, chrome, registry) = guard();
        guard.on_mount().unwrap();
        assert_eq!(guard.on_mount(), Err(LifecycleError::AlreadyMounted));
        assert_eq!(registry.handlers.borrow().len(), 1);
        assert_eq!(chrome.calls.borrow().len(), 2);
    }

    #[test]
    fn unmount_without_mount_is_rejected() {
        let (mut guard, chrome, _) = guard();
        assert_eq!(guard.on_unmount(), Err(LifecycleError::NotMounted));
        assert_eq!(guard.on_hardware_back(), BackDisposition::NotConsumed);
        assert!(chrome.calls.borrow().is_empty());
    }

    #[test]
    fn drop_unmounts() {
        let (mut guard, chrome, registry) = guard();
        guard.on_mount().unwrap();
        drop(guard);
        assert!(registry.handlers.borrow().is_empty());
        assert_eq!(chrome.calls.borrow().last(), Some(&"show"));
    }

    #[test]
    fn remount_acquires_a_fresh_subscription() {
        let (mut guard, chrome, registry) = guard();
        guard.on_mount().unwrap();
        guard.on_unmount().unwrap();
        guard.on_mount().unwrap();
        guard.on_hardware_back();
        guard.on_unmount().unwrap();

        assert_eq!(chrome.calls.borrow().len(), 8);
        assert!(registry.handlers.borrow().is_empty());
    }
}
