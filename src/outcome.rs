//! Per-call outcomes
//!
//! Every invocation settles into a [`CallOutcome`]: the callable's value, or a
//! [`CallError`] describing the captured failure. Failures are data here; a
//! run never aborts because one call failed.

use std::any::Any;
use std::ops::Index;
use thiserror::Error;

/// Captured failure of a single call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError<E> {
    /// The callable returned an error
    #[error("{0}")]
    Failed(E),

    /// The callable panicked while producing or driving its future
    #[error("call panicked: {message}")]
    Panicked { message: String },
}

impl<E> CallError<E> {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        CallError::Panicked { message }
    }

    /// The error value returned by the callable, if it returned one
    pub fn as_failed(&self) -> Option<&E> {
        match self {
            CallError::Failed(error) => Some(error),
            CallError::Panicked { .. } => None,
        }
    }

    pub fn into_failed(self) -> Option<E> {
        match self {
            CallError::Failed(error) => Some(error),
            CallError::Panicked { .. } => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, CallError::Panicked { .. })
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            CallError::Failed(_) => "failed",
            CallError::Panicked { .. } => "panicked",
        }
    }
}

/// Outcome of one call
pub type CallOutcome<R, E> = Result<R, CallError<E>>;

/// Ordered outcomes of a run, index-aligned with call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultList<R, E> {
    outcomes: Vec<CallOutcome<R, E>>,
    windows: usize,
    delays_applied: usize,
}

impl<R, E> ResultList<R, E> {
    pub(crate) fn new(
        outcomes: Vec<CallOutcome<R, E>>,
        windows: usize,
        delays_applied: usize,
    ) -> Self {
        Self {
            outcomes,
            windows,
            delays_applied,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CallOutcome<R, E>> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CallOutcome<R, E>> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[CallOutcome<R, E>] {
        &self.outcomes
    }

    /// Number of windows the run dispatched
    pub fn windows(&self) -> usize {
        self.windows
    }

    /// Number of inter-window pauses actually taken
    pub fn delays_applied(&self) -> usize {
        self.delays_applied
    }

    /// Successful values with their call index
    pub fn successes(&self) -> impl Iterator<Item = (usize, &R)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.as_ref().ok().map(|value| (index, value)))
    }

    /// Captured failures with their call index
    pub fn failures(&self) -> impl Iterator<Item = (usize, &CallError<E>)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| outcome.as_ref().err().map(|error| (index, error)))
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(Result::is_ok)
    }

    pub fn into_vec(self) -> Vec<CallOutcome<R, E>> {
        self.outcomes
    }

    /// All values in call order, or the first captured failure
    pub fn into_values(self) -> Result<Vec<R>, CallError<E>> {
        self.outcomes.into_iter().collect()
    }
}

impl<R, E> Index<usize> for ResultList<R, E> {
    type Output = CallOutcome<R, E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.outcomes[index]
    }
}

impl<R, E> IntoIterator for ResultList<R, E> {
    type Item = CallOutcome<R, E>;
    type IntoIter = std::vec::IntoIter<CallOutcome<R, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a, R, E> IntoIterator for &'a ResultList<R, E> {
    type Item = &'a CallOutcome<R, E>;
    type IntoIter = std::slice::Iter<'a, CallOutcome<R, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
