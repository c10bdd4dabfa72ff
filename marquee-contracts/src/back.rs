use std::fmt;
use std::rc::Rc;

/// Returned by a back handler to tell the host whether it swallowed the
/// press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackDisposition {
    Consumed,
    /// The host proceeds with its default back navigation
    NotConsumed,
}

/// Callback invoked synchronously by the host on hardware back, before it
/// starts tearing the screen down.
pub type BackHandler = Box<dyn FnMut() -> BackDisposition>;

/// Token identifying one registration with a [`BackHandlerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Host-owned list of hardware back listeners.
pub trait BackHandlerRegistry {
    fn subscribe(&self, handler: BackHandler) -> SubscriptionId;

    /// Remove a registration. Returns `false` when the id is unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Scoped registration: subscribes on [`acquire`](Self::acquire) and
/// unsubscribes exactly once, on [`release`](Self::release) or drop.
pub struct BackSubscription {
    registry: Rc<dyn BackHandlerRegistry>,
    id: SubscriptionId,
}

impl BackSubscription {
    pub fn acquire(
        registry: Rc<dyn BackHandlerRegistry>,
        handler: BackHandler,
    ) -> Self {
        let id = registry.subscribe(handler);
        log::debug!("Registered hardware back handler {id}");
        Self { registry, id }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn release(self) {
        drop(self)
    }
}

impl Drop for BackSubscription {
    fn drop(&mut self) {
        if self.registry.unsubscribe(self.id) {
            log::debug!("Released hardware back handler {}", self.id);
        } else {
            log::warn!(
                "Hardware back handler {} was already gone from the registry",
                self.id
            );
        }
    }
}

impl fmt::Debug for BackSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
