//! Sequences of steps with parenthesised repetition groups.
//!
//! Groups are kept as a flat list of steps. An [`Step::Open`] marker starts a
//! group and the matching closer ends it, carrying the number of times the
//! group is repeated. Every operation that needs the structure goes through
//! [`matching_close`] and [`matching_open`].

use std::ops::Index;

use thiserror::Error;

use crate::{
    alphabet::{Notation, RotationConvention},
    cube::CubeState,
    step::Step,
};

mod canonical;
mod metric;
mod parser;
mod random;

pub use metric::Metric;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrambleError {
    #[error("The closing parenthesis at index {index} does not close any group")]
    UnmatchedCloser { index: usize },
    #[error("The scramble does not contain any whole cube turn")]
    NoTurns,
}

/// The index of the closer ending the group opened at `open`, `None` if the
/// group is never closed.
pub(crate) fn matching_close(steps: &[Step], open: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, step) in steps.iter().enumerate().skip(open) {
        if step.is_open() {
            depth += 1;
        } else if step.is_close() {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// The index of the opener starting the group closed at `close`, `None` if
/// the closer does not close any group.
pub(crate) fn matching_open(steps: &[Step], close: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for i in (0..=close).rev() {
        let step = steps[i];
        if step.is_close() {
            depth += 1;
        } else if step.is_open() {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// An ordered sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scramble {
    steps: Vec<Step>,
}

impl Scramble {
    #[must_use]
    pub fn new() -> Scramble {
        Scramble::default()
    }

    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Scramble {
        Scramble { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Step> {
        self.steps.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().copied()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// # Panics
    ///
    /// If `index > len`.
    pub fn insert(&mut self, index: usize, step: Step) {
        self.steps.insert(index, step);
    }

    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Step {
        self.steps.remove(index)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Move every step of `other` to the end of this scramble.
    pub fn append(&mut self, other: &mut Scramble) {
        self.steps.append(&mut other.steps);
    }

    /// Up to `len` steps starting at `position`, clamped to the end of the
    /// scramble.
    #[must_use]
    pub fn sub_scramble(&self, position: usize, len: usize) -> Scramble {
        let start = position.min(self.steps.len());
        let end = start.saturating_add(len).min(self.steps.len());
        Scramble::from_steps(self.steps[start..end].to_vec())
    }

    /// See [`matching_close`].
    #[must_use]
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        matching_close(&self.steps, open)
    }

    /// See [`matching_open`].
    #[must_use]
    pub fn matching_open(&self, close: usize) -> Option<usize> {
        matching_open(&self.steps, close)
    }

    /// Whether the running balance of openers and closers never goes
    /// negative. Groups left open are allowed.
    #[must_use]
    pub fn parentheses_ok(&self) -> bool {
        self.check_parentheses().is_ok()
    }

    /// # Errors
    ///
    /// Reports the first closer that does not close any group
    pub fn check_parentheses(&self) -> Result<(), ScrambleError> {
        let mut depth = 0_usize;
        for (index, step) in self.steps.iter().enumerate() {
            if step.is_open() {
                depth += 1;
            } else if step.is_close() {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ScrambleError::UnmatchedCloser { index })?;
            }
        }
        Ok(())
    }

    /// The number of groups that are opened but never closed.
    fn open_groups(&self) -> usize {
        let mut depth = 0_usize;
        for step in &self.steps {
            if step.is_open() {
                depth += 1;
            } else if step.is_close() {
                depth = depth.saturating_sub(1);
            }
        }
        depth
    }

    /// Close every group left open with a single repetition closer.
    pub fn complete_parentheses(&mut self) {
        let missing = self.open_groups();
        if missing > 0 {
            log::trace!("Closing {missing} open groups");
        }
        self.steps
            .extend(std::iter::repeat_n(Step::Close1, missing));
    }

    /// Drop every closer that does not close a group, then close the groups
    /// left open.
    pub fn repair_parentheses(&mut self) {
        let mut depth = 0_usize;
        self.steps.retain(|step| {
            if step.is_open() {
                depth += 1;
            } else if step.is_close() {
                if depth == 0 {
                    log::trace!("Dropping unmatched {step:?}");
                    return false;
                }
                depth -= 1;
            }
            true
        });
        self.complete_parentheses();
    }

    #[must_use]
    pub fn has_turns(&self) -> bool {
        self.steps.iter().any(|step| step.is_turn())
    }

    /// Whether some group is repeated more than once.
    #[must_use]
    pub fn has_repetitions(&self) -> bool {
        self.steps
            .iter()
            .any(|step| step.repetitions().is_some_and(|n| n > 1))
    }

    /// Whether both scrambles leave the stickers of a solved cube in the same
    /// places.
    #[must_use]
    pub fn is_equivalent(&self, other: &Scramble, convention: RotationConvention) -> bool {
        let mut mine = CubeState::with_convention(convention);
        mine.apply_scramble(self);
        let mut theirs = CubeState::with_convention(convention);
        theirs.apply_scramble(other);
        mine.matches(&theirs)
    }
}

impl Index<usize> for Scramble {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl IntoIterator for Scramble {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Scramble {
    type Item = Step;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Step>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter().copied()
    }
}

impl FromIterator<Step> for Scramble {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Scramble::from_steps(iter.into_iter().collect())
    }
}

impl Extend<Step> for Scramble {
    fn extend<T: IntoIterator<Item = Step>>(&mut self, iter: T) {
        self.steps.extend(iter);
    }
}

impl From<Vec<Step>> for Scramble {
    fn from(steps: Vec<Step>) -> Self {
        Scramble::from_steps(steps)
    }
}

impl std::fmt::Display for Scramble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text(Notation::standard(), " "))
    }
}
