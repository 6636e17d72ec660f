//! Diffing of ordered row lists into operations a list view can animate.
//!
//! Operations are applied one after another against a single mutable list, and
//! every index refers to the list as it stands after all preceding operations:
//!
//! 1. `Remove`, highest old index first.
//! 2. `Move { from, to }`: remove at `from`, then insert at `to`. Surviving rows
//!    whose relative order is kept (a longest increasing subsequence) never move.
//! 3. `Insert`, ascending final index.
//! 4. `Update`, ascending final index, for surviving rows whose content changed.
//!
//! [`apply`] is the reference consumer of this contract.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use serde::Serialize;
use thiserror::Error;

/// A row that can be matched across renders by a content-independent key.
pub trait ListEntry: Clone + PartialEq {
    type StableId: Clone + Eq + Hash + Debug;

    fn stable_id(&self) -> Self::StableId;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation<E> {
    Insert { index: usize, entry: E },
    Remove { index: usize },
    Move { from: usize, to: usize },
    Update { index: usize, entry: E },
}

impl<E> Operation<E> {
    pub fn map_entry<F, T>(self, f: F) -> Operation<T>
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Insert { index, entry } => Operation::Insert {
                index,
                entry: f(entry),
            },
            Self::Remove { index } => Operation::Remove { index },
            Self::Move { from, to } => Operation::Move { from, to },
            Self::Update { index, entry } => Operation::Update {
                index,
                entry: f(entry),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSide {
    Previous,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("duplicate stable id {id} in {side:?} list")]
    DuplicateStableId { side: ListSide, id: String },
    #[error("operation index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

pub fn reconcile<E: ListEntry>(
    previous: &[E],
    next: &[E],
) -> Result<Vec<Operation<E>>, ReconcileError> {
    let previous_positions = positions_by_stable_id(previous, ListSide::Previous)?;
    let next_positions = positions_by_stable_id(next, ListSide::Next)?;

    let mut operations = Vec::new();

    for (index, entry) in previous.iter().enumerate().rev() {
        if !next_positions.contains_key(&entry.stable_id()) {
            operations.push(Operation::Remove { index });
        }
    }

    // Surviving rows in their current order, identified by final index.
    let mut working: Vec<usize> = previous
        .iter()
        .filter_map(|entry| next_positions.get(&entry.stable_id()).copied())
        .collect();

    let mut placed = vec![false; next.len()];
    for position in longest_increasing_subsequence(&working) {
        placed[working[position]] = true;
    }

    let mut movers: Vec<usize> = working
        .iter()
        .copied()
        .filter(|target| !placed[*target])
        .collect();
    movers.sort_unstable();

    for target in movers {
        let Some(from) = working.iter().position(|current| *current == target) else {
            continue;
        };
        working.remove(from);
        let to = working
            .iter()
            .position(|current| placed[*current] && *current > target)
            .unwrap_or(working.len());
        working.insert(to, target);
        placed[target] = true;
        if from != to {
            operations.push(Operation::Move { from, to });
        }
    }

    for (index, entry) in next.iter().enumerate() {
        if !previous_positions.contains_key(&entry.stable_id()) {
            operations.push(Operation::Insert {
                index,
                entry: entry.clone(),
            });
        }
    }

    for (index, entry) in next.iter().enumerate() {
        if let Some(&old_index) = previous_positions.get(&entry.stable_id()) {
            if previous[old_index] != *entry {
                operations.push(Operation::Update {
                    index,
                    entry: entry.clone(),
                });
            }
        }
    }

    Ok(operations)
}

/// Applies `operations` in order. Bounds are checked before each step, so a
/// failing operation leaves the list as the previous operations produced it.
pub fn apply<E: Clone>(list: &mut Vec<E>, operations: &[Operation<E>]) -> Result<(), ReconcileError> {
    for operation in operations {
        let len = list.len();
        match operation {
            Operation::Insert { index, entry } => {
                if *index > len {
                    return Err(ReconcileError::OutOfBounds { index: *index, len });
                }
                list.insert(*index, entry.clone());
            }
            Operation::Remove { index } => {
                if *index >= len {
                    return Err(ReconcileError::OutOfBounds { index: *index, len });
                }
                list.remove(*index);
            }
            Operation::Move { from, to } => {
                if *from >= len || *to >= len {
                    return Err(ReconcileError::OutOfBounds {
                        index: (*from).max(*to),
                        len,
                    });
                }
                let entry = list.remove(*from);
                list.insert(*to, entry);
            }
            Operation::Update { index, entry } => {
                let slot = list
                    .get_mut(*index)
                    .ok_or(ReconcileError::OutOfBounds { index: *index, len })?;
                *slot = entry.clone();
            }
        }
    }
    Ok(())
}

fn positions_by_stable_id<E: ListEntry>(
    entries: &[E],
    side: ListSide,
) -> Result<HashMap<E::StableId, usize>, ReconcileError> {
    let mut positions = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let id = entry.stable_id();
        if positions.insert(id.clone(), index).is_some() {
            return Err(ReconcileError::DuplicateStableId {
                side,
                id: format!("{id:?}"),
            });
        }
    }
    Ok(positions)
}

/// Positions into `values` forming one longest strictly increasing run.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let length = tails.partition_point(|&tail| values[tail] < value);
        if length > 0 {
            predecessors[position] = Some(tails[length - 1]);
        }
        if length == tails.len() {
            tails.push(position);
        } else {
            tails[length] = position;
        }
    }

    let mut subsequence = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        subsequence.push(position);
        cursor = predecessors[position];
    }
    subsequence.reverse();
    subsequence
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
