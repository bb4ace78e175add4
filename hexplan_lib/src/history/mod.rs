//! Bounded undo and redo stacks of committed transactions.
//!
//! An [`UndoAction`] records a transaction as it ran.
//! Undoing applies its inverse and moves it to the redo stack;
//! redoing applies it again and moves it back.
//! Actions are never edited while on either stack.

use std::collections::{HashMap, VecDeque};

use indexmap::IndexMap;

use crate::{
    config::DEFAULT_UNDO_CAPACITY,
    geometry::CellKey,
    tiles::{InstanceId, PlacedTile},
};

/// A committed transaction, with everything needed to invert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// `tile` was placed at `cell`.
    Place {
        /// The cell that was filled.
        cell: CellKey,
        /// The tile that was placed.
        tile: PlacedTile,
    },
    /// `tile` was removed from `cell`.
    Remove {
        /// The cell that was emptied.
        cell: CellKey,
        /// The tile that was removed.
        tile: PlacedTile,
        /// Where the tile sat in placement order.
        position: usize,
    },
    /// Every tile was removed.
    Clear {
        /// The board as it was before clearing, in placement order.
        tiles: IndexMap<CellKey, PlacedTile>,
        /// The placement limits as they were before clearing.
        limits: HashMap<InstanceId, u32>,
    },
}

impl UndoAction {
    /// A short name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            UndoAction::Place { .. } => "place",
            UndoAction::Remove { .. } => "remove",
            UndoAction::Clear { .. } => "clear",
        }
    }
}

/// The undo and redo stacks.
///
/// The undo stack holds at most `capacity` actions; pushing past that drops the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHistory {
    /// Oldest at the front, most recent at the back.
    undo_stack: VecDeque<UndoAction>,
    /// Most recently undone at the back.
    redo_stack: Vec<UndoAction>,
    /// The maximum length of `undo_stack`.
    capacity: usize,
}

impl Default for ActionHistory {
    fn default() -> Self {
        ActionHistory::new(DEFAULT_UNDO_CAPACITY)
    }
}

impl ActionHistory {
    /// Creates empty stacks that remember up to `capacity` transactions.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        ActionHistory {
            undo_stack: VecDeque::with_capacity(capacity.min(DEFAULT_UNDO_CAPACITY)),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// The maximum number of undoable transactions.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a newly committed transaction.
    ///
    /// The timeline branches here, so everything that could be redone is forgotten.
    pub fn record(&mut self, action: UndoAction) {
        self.redo_stack.clear();
        self.push_undo(action);
    }

    /// Pushes onto the undo stack without touching the redo stack, evicting the oldest if full.
    pub(crate) fn push_undo(&mut self, action: UndoAction) {
        if self.capacity == 0 {
            return;
        }

        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(action);
    }

    /// Takes the most recent action off the undo stack.
    pub(crate) fn pop_undo(&mut self) -> Option<UndoAction> {
        self.undo_stack.pop_back()
    }

    /// Takes the most recently undone action off the redo stack.
    pub(crate) fn pop_redo(&mut self) -> Option<UndoAction> {
        self.redo_stack.pop()
    }

    /// Pushes an undone action onto the redo stack.
    pub(crate) fn push_redo(&mut self, action: UndoAction) {
        self.redo_stack.push(action);
    }

    /// Puts an action that could not be undone back where it was.
    pub(crate) fn return_undo(&mut self, action: UndoAction) {
        self.undo_stack.push_back(action);
    }

    /// Is there anything to undo?
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Is there anything to redo?
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The number of actions that can be undone.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// The number of actions that can be redone.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The action the next undo would invert.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&UndoAction> {
        self.undo_stack.back()
    }

    /// The action the next redo would apply.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&UndoAction> {
        self.redo_stack.last()
    }

    /// Forgets everything on both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
