//! Food List Controller
//!
//! Owns the visible collection, the modal state machine, and the optimistic
//! writes the user has made but the backend has not yet confirmed.

use std::collections::HashMap;

use crate::confirm::ConfirmAction;
use crate::editor::DraftKey;
use crate::error::{AppError, AppResult};
use crate::models::FoodItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Empty,
    Populated,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    CreateDraft,
    EditDraft(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingWrite {
    Availability(bool),
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    write: PendingWrite,
    seq: u64,
    acked: bool,
    /// The latest snapshot shows this write's outcome
    reflected: bool,
}

/// An optimistic write that still has to reach the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticWrite {
    pub id: String,
    pub write: PendingWrite,
    pub seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FoodList {
    /// Last snapshot from the backend
    confirmed: Vec<FoodItem>,
    /// Snapshot with pending writes overlaid
    visible: Vec<FoodItem>,
    pending: HashMap<String, Pending>,
    next_seq: u64,
    phase: LoadPhase,
    modal: ModalState,
    session: u64,
    delete: ConfirmAction<String>,
}

impl FoodList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Foods in arrival order, with local writes applied
    pub fn items(&self) -> &[FoodItem] {
        &self.visible
    }

    pub fn find(&self, id: &str) -> Option<&FoodItem> {
        self.visible.iter().find(|f| f.id == id)
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    // ========================
    // Snapshots
    // ========================

    /// Replace the collection with a backend snapshot. A pending write is
    /// dropped once its target is gone or once it was acked; a snapshot that
    /// merely shows the same value may predate the write.
    pub fn apply_snapshot(&mut self, snapshot: Vec<FoodItem>) {
        self.pending.retain(|id, pending| {
            let Some(food) = snapshot.iter().find(|f| &f.id == id) else {
                return false;
            };
            if pending.acked {
                return false;
            }
            pending.reflected = match pending.write {
                PendingWrite::Availability(v) => food.available == v,
                PendingWrite::Delete => false,
            };
            true
        });
        self.confirmed = snapshot;
        self.phase = LoadPhase::Empty;
        self.refresh();
        if let ModalState::EditDraft(id) = &self.modal {
            if self.find(id).is_none() {
                self.modal = ModalState::Closed;
            }
        }
    }

    /// Give up waiting for the first snapshot
    pub fn expire_loading(&mut self) {
        if self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Empty;
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.visible = self
            .confirmed
            .iter()
            .filter_map(|food| match self.pending.get(&food.id).map(|p| p.write) {
                Some(PendingWrite::Delete) => None,
                Some(PendingWrite::Availability(v)) => Some(FoodItem {
                    available: v,
                    ..food.clone()
                }),
                None => Some(food.clone()),
            })
            .collect();
        if self.phase != LoadPhase::Loading {
            self.phase = if self.visible.is_empty() {
                LoadPhase::Empty
            } else {
                LoadPhase::Populated
            };
        }
    }

    fn record(&mut self, id: &str, write: PendingWrite) -> OptimisticWrite {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending.insert(
            id.to_string(),
            Pending {
                write,
                seq,
                acked: false,
                reflected: false,
            },
        );
        self.refresh();
        OptimisticWrite {
            id: id.to_string(),
            write,
            seq,
        }
    }

    // ========================
    // Optimistic writes
    // ========================

    /// Flip the availability the user currently sees
    pub fn toggle_availability(&mut self, id: &str) -> AppResult<OptimisticWrite> {
        let current = self
            .find(id)
            .map(|f| f.available)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok(self.record(id, PendingWrite::Availability(!current)))
    }

    /// Remove a food from view until the backend confirms or refuses
    pub fn delete(&mut self, id: &str) -> AppResult<OptimisticWrite> {
        if self.find(id).is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }
        if self.modal == ModalState::EditDraft(id.to_string()) {
            self.modal = ModalState::Closed;
        }
        Ok(self.record(id, PendingWrite::Delete))
    }

    /// The backend accepted the write. It is settled if the last snapshot
    /// already shows it, otherwise the next snapshot is authoritative.
    pub fn write_acked(&mut self, write: &OptimisticWrite) {
        let Some(pending) = self.pending.get_mut(&write.id) else {
            return;
        };
        if pending.seq != write.seq {
            return;
        }
        if pending.reflected {
            self.pending.remove(&write.id);
            self.refresh();
        } else {
            pending.acked = true;
        }
    }

    /// The backend refused the write; show the confirmed value again
    pub fn write_failed(&mut self, write: &OptimisticWrite) {
        let current = self.pending.get(&write.id).map(|p| p.seq);
        if current == Some(write.seq) {
            self.pending.remove(&write.id);
            self.refresh();
        }
    }

    #[cfg(test)]
    pub fn has_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    // ========================
    // Delete confirmation
    // ========================

    pub fn request_delete(&mut self, id: &str) -> AppResult<()> {
        let name = self
            .find(id)
            .map(|f| f.name.clone())
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.delete.request(id.to_string(), format!("Apagar {}?", name));
        Ok(())
    }

    /// Run the requested delete, if any
    pub fn confirm_delete(&mut self) -> Option<AppResult<OptimisticWrite>> {
        self.delete.confirm().map(|id| self.delete(&id))
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.delete.pending().map(|p| p.description.as_str())
    }

    // ========================
    // Modal
    // ========================

    pub fn open_create(&mut self) {
        self.session += 1;
        self.modal = ModalState::CreateDraft;
    }

    pub fn open_edit(&mut self, id: &str) -> AppResult<()> {
        if self.find(id).is_none() {
            return Err(AppError::NotFound(id.to_string()));
        }
        self.session += 1;
        self.modal = ModalState::EditDraft(id.to_string());
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Close the modal if `key` is still the open session
    pub fn close_session(&mut self, key: &DraftKey) {
        if self.draft_key().as_ref() == Some(key) {
            self.modal = ModalState::Closed;
        }
    }

    /// Key of the open modal session, None while closed
    pub fn draft_key(&self) -> Option<DraftKey> {
        match &self.modal {
            ModalState::Closed => None,
            ModalState::CreateDraft => Some(DraftKey {
                session: self.session,
                target: None,
            }),
            ModalState::EditDraft(id) => Some(DraftKey {
                session: self.session,
                target: Some(id.clone()),
            }),
        }
    }

    /// Food the edit modal was opened for
    pub fn editing(&self) -> Option<&FoodItem> {
        match &self.modal {
            ModalState::EditDraft(id) => self.find(id),
            _ => None,
        }
    }
}
