//! Mount scope and list state shared by the resource views.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use lotus::api::ApiError;
use tracing::debug;

use crate::notifications::Notification;

/// Generation handed out before a request; checked again when its response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Mount handle of a view.
///
/// Taking a new ticket or unmounting makes every older ticket stale, so a
/// slow response can never overwrite newer state or touch an unmounted view.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
    unmounted: Arc<AtomicBool>,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope with its own generation that unmounts together with `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            generation: Arc::default(),
            unmounted: Arc::clone(&self.unmounted),
        }
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.unmounted.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn unmount(&self) {
        self.unmounted.store(true, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.unmounted.load(Ordering::SeqCst)
    }
}

/// What happened to a response handed to [`ListView::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Items replaced; holds the new count.
    Updated(usize),

    /// Items left as they were.
    Failed(Notification),

    /// Response arrived for a stale ticket and was dropped.
    Discarded,
}

impl Applied {
    /// The failure toast, if any.
    #[must_use]
    pub fn notification(self) -> Option<Notification> {
        match self {
            Self::Failed(notification) => Some(notification),
            Self::Updated(_) | Self::Discarded => None,
        }
    }
}

/// Last collection displayed by a view.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    scope: ViewScope,
    items: Vec<T>,
    failure_title: &'static str,
}

impl<T> ListView<T> {
    #[must_use]
    pub fn new(scope: ViewScope, failure_title: &'static str) -> Self {
        Self {
            scope,
            items: Vec::new(),
            failure_title,
        }
    }

    #[must_use]
    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Ticket for the next fetch of this list.
    pub fn ticket(&self) -> Ticket {
        self.scope.ticket()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<T>, ApiError>) -> Applied {
        if !self.scope.is_current(ticket) {
            debug!(title = self.failure_title, "discarding stale response");

            return Applied::Discarded;
        }

        match result {
            Ok(items) => {
                self.items = items;

                Applied::Updated(self.items.len())
            }
            Err(error) => Applied::Failed(Notification::from_error(self.failure_title, &error)),
        }
    }
}
