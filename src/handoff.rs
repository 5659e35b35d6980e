//! Navigation to the role editor and the data handed to it.
//!
//! The editor is a separate screen. Before navigating, the list writes what
//! the editor should show into a [`HandoffSlot`] and gets a ticket back; the
//! route carries that ticket and the editor redeems it with
//! [`HandoffSlot::take`], which clears the slot. A ticket from an earlier
//! write redeems nothing, so the editor never opens with stale data.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::roles::Role;

/// What the editor opens with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSeed {
    /// Empty form for a new role.
    Create,
    /// Form pre-filled with a role fetched from the directory.
    Edit(Role),
}

/// Proof of one write to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandoffTicket(u64);

#[derive(Default)]
struct SlotInner {
    next_ticket: u64,
    current: Option<(HandoffTicket, EditorSeed)>,
}

/// Session-scoped slot holding the seed for the next editor visit.
#[derive(Clone, Default)]
pub struct HandoffSlot {
    inner: Arc<Mutex<SlotInner>>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is in the slot and return the ticket for it.
    pub fn store(&self, seed: EditorSeed) -> HandoffTicket {
        let mut inner = self.inner.lock();
        inner.next_ticket += 1;
        let ticket = HandoffTicket(inner.next_ticket);
        inner.current = Some((ticket, seed));
        ticket
    }

    /// Redeem `ticket`, clearing the slot on success.
    pub fn take(&self, ticket: HandoffTicket) -> Option<EditorSeed> {
        let mut inner = self.inner.lock();
        let matches = matches!(&inner.current, Some((held, _)) if *held == ticket);
        if !matches {
            return None;
        }
        inner.current.take().map(|(_, seed)| seed)
    }

    /// Look at the pending seed without consuming it.
    pub fn peek(&self) -> Option<EditorSeed> {
        self.inner.lock().current.as_ref().map(|(_, seed)| seed.clone())
    }

    pub fn clear(&self) {
        self.inner.lock().current = None;
    }
}

/// Screens the list can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    RoleEditor { ticket: HandoffTicket },
}

/// Screen router owned by the host application.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
