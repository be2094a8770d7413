//! Invocation plans
//!
//! An [`InvocationPlan`] bundles the callable with everything a single run
//! needs: chunk size, inter-chunk delay and the sizing source (an explicit
//! call count, a payload, or both). Plans are only obtainable through
//! [`InvocationPlanBuilder::build`] or [`InvocationPlan::from_config`], so a
//! constructed plan has always passed validation.

pub mod windows;


pub use windows::{delay_count, plan_windows, window_count};

use crate::config::{validate_chunk_size, BatchConfig};
use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Argument handed to the callable for one invocation
///
/// Payload elements are either a single value or an ordered group of values
/// meant to be spread as positional arguments. Runs driven purely by a call
/// count hand each call its position instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArgument<T> {
    /// Zero-based position of the call in the run
    Index(usize),
    /// A single value passed as the sole argument
    Scalar(T),
    /// Positional values, in order
    Tuple(Vec<T>),
}

impl<T> CallArgument<T> {
    /// Position for index-driven runs
    pub fn index(&self) -> Option<usize> {
        match self {
            CallArgument::Index(index) => Some(*index),
            _ => None,
        }
    }

    /// Payload values as positional arguments
    ///
    /// A scalar spreads to one value. Index arguments carry no payload.
    pub fn values(&self) -> &[T] {
        match self {
            CallArgument::Index(_) => &[],
            CallArgument::Scalar(value) => std::slice::from_ref(value),
            CallArgument::Tuple(values) => values,
        }
    }

    /// Number of positional arguments this call receives
    pub fn arity(&self) -> usize {
        match self {
            CallArgument::Index(_) | CallArgument::Scalar(_) => 1,
            CallArgument::Tuple(values) => values.len(),
        }
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            CallArgument::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_values(self) -> Vec<T> {
        match self {
            CallArgument::Index(_) => Vec::new(),
            CallArgument::Scalar(value) => vec![value],
            CallArgument::Tuple(values) => values,
        }
    }
}

impl<T> From<Vec<T>> for CallArgument<T> {
    fn from(values: Vec<T>) -> Self {
        CallArgument::Tuple(values)
    }
}

/// Immutable configuration for one run
pub struct InvocationPlan<T, F> {
    function_to_execute: F,
    chunk_size: usize,
    delay: Duration,
    total_calls: Option<usize>,
    payload: Option<Vec<CallArgument<T>>>,
}

impl<T, F> InvocationPlan<T, F> {
    pub fn builder(function_to_execute: F) -> InvocationPlanBuilder<T, F> {
        InvocationPlanBuilder::new(function_to_execute)
    }

    /// Build a plan from deserialized settings
    ///
    /// Use [`InvocationPlanBuilder::apply_config`] instead when a payload
    /// also needs to be attached.
    pub fn from_config(config: &BatchConfig, function_to_execute: F) -> Result<Self> {
        Self::builder(function_to_execute)
            .apply_config(config)
            .build()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn total_calls(&self) -> Option<usize> {
        self.total_calls
    }

    pub fn payload(&self) -> Option<&[CallArgument<T>]> {
        self.payload.as_deref()
    }

    /// Effective number of invocations
    ///
    /// An explicit call count wins; otherwise the payload length, otherwise
    /// zero.
    pub fn resolved_total(&self) -> usize {
        resolve_total(self.total_calls, self.payload.as_ref().map(Vec::len))
    }

    pub fn window_count(&self) -> usize {
        window_count(self.resolved_total(), self.chunk_size)
    }

    /// Re-check the plan invariants
    pub fn validate(&self) -> Result<()> {
        validate_plan(
            self.chunk_size,
            self.total_calls,
            self.payload.as_ref().map(Vec::len),
        )
    }

    /// Split the plan into the callable and the ordered argument list
    ///
    /// The argument list always has exactly `resolved_total()` entries.
    pub(crate) fn into_call_parts(self) -> (F, Vec<CallArgument<T>>) {
        let total = self.resolved_total();
        let arguments = match self.payload {
            Some(mut payload) => {
                payload.truncate(total);
                payload
            }
            None => (0..total).map(CallArgument::Index).collect(),
        };
        (self.function_to_execute, arguments)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for InvocationPlan<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationPlan")
            .field("chunk_size", &self.chunk_size)
            .field("delay", &self.delay)
            .field("total_calls", &self.total_calls)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

/// Builder for [`InvocationPlan`]
pub struct InvocationPlanBuilder<T, F> {
    function_to_execute: F,
    chunk_size: Option<usize>,
    delay: Duration,
    total_calls: Option<usize>,
    payload: Option<Vec<CallArgument<T>>>,
}

impl<T, F> InvocationPlanBuilder<T, F> {
    pub fn new(function_to_execute: F) -> Self {
        Self {
            function_to_execute,
            chunk_size: None,
            delay: Duration::ZERO,
            total_calls: None,
            payload: None,
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay_ms(self, millis: u64) -> Self {
        self.delay(Duration::from_millis(millis))
    }

    pub fn total_calls(mut self, total_calls: usize) -> Self {
        self.total_calls = Some(total_calls);
        self
    }

    /// Attach a payload of pre-shaped arguments
    pub fn payload(mut self, payload: impl IntoIterator<Item = CallArgument<T>>) -> Self {
        self.payload = Some(payload.into_iter().collect());
        self
    }

    /// Attach a payload where every element is passed as a single argument
    pub fn scalars(self, values: impl IntoIterator<Item = T>) -> Self {
        self.payload(values.into_iter().map(CallArgument::Scalar))
    }

    /// Attach a payload where every element is spread as positional arguments
    pub fn tuples(self, groups: impl IntoIterator<Item = Vec<T>>) -> Self {
        self.payload(groups.into_iter().map(CallArgument::Tuple))
    }

    /// Copy chunk size, delay and any explicit call count from `config`
    pub fn apply_config(mut self, config: &BatchConfig) -> Self {
        self.chunk_size = Some(config.chunk_size);
        self.delay = config.delay;
        if let Some(total_calls) = config.total_calls {
            self.total_calls = Some(total_calls);
        }
        self
    }

    pub fn build(self) -> Result<InvocationPlan<T, F>> {
        let chunk_size = self
            .chunk_size
            .ok_or_else(|| Error::invalid_configuration("chunk_size is required"))?;
        validate_plan(
            chunk_size,
            self.total_calls,
            self.payload.as_ref().map(Vec::len),
        )?;

        Ok(InvocationPlan {
            function_to_execute: self.function_to_execute,
            chunk_size,
            delay: self.delay,
            total_calls: self.total_calls,
            payload: self.payload,
        })
    }
}

fn resolve_total(total_calls: Option<usize>, payload_len: Option<usize>) -> usize {
    total_calls.or(payload_len).unwrap_or(0)
}

fn validate_plan(
    chunk_size: usize,
    total_calls: Option<usize>,
    payload_len: Option<usize>,
) -> Result<()> {
    validate_chunk_size(chunk_size)?;

    if let (Some(total_calls), Some(payload_len)) = (total_calls, payload_len) {
        if total_calls > payload_len {
            return Err(Error::invalid_configuration(format!(
                "total_calls ({total_calls}) exceeds payload length ({payload_len})"
            )));
        }
    }

    Ok(())
}
