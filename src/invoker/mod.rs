//! Windowed batch invoker
//!
//! Runs an [`InvocationPlan`] one window at a time. Every call in a window is
//! started together on the caller's task and the window is awaited as a
//! whole; outcomes are appended in argument order, then the invoker pauses
//! for the configured delay unless the window was the last one.


use crate::error::Result;
use crate::outcome::{CallError, CallOutcome, ResultList};
use crate::plan::{plan_windows, CallArgument, InvocationPlan};
use futures::future::join_all;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Executes invocation plans
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchInvoker;

impl BatchInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Run every call in `plan`, window by window
    ///
    /// Returns one outcome per resolved call, in call order. Callable
    /// failures and panics are captured into the list; the only error this
    /// returns is an invalid configuration, before any call is made.
    pub async fn run<T, F, Fut, R, E>(&self, plan: InvocationPlan<T, F>) -> Result<ResultList<R, E>>
    where
        F: Fn(CallArgument<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        plan.validate()?;

        let total = plan.resolved_total();
        let chunk_size = plan.chunk_size();
        let delay = plan.delay();
        let span = info_span!(
            "repeat_calls",
            total_calls = total,
            chunk_size,
            delay_ms = delay.as_millis() as u64
        );

        Ok(execute_plan(plan).instrument(span).await)
    }

    /// Run `total_calls` calls that each receive their index
    pub async fn run_indexed<F, Fut, R, E>(
        &self,
        total_calls: usize,
        chunk_size: usize,
        delay: Duration,
        function: F,
    ) -> Result<ResultList<R, E>>
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let plan = InvocationPlan::builder(move |argument: CallArgument<()>| {
            function(argument.index().unwrap_or_default())
        })
        .chunk_size(chunk_size)
        .delay(delay)
        .total_calls(total_calls)
        .build()?;

        self.run(plan).await
    }
}

/// Run `plan` with a default [`BatchInvoker`]
pub async fn repeat_calls<T, F, Fut, R, E>(plan: InvocationPlan<T, F>) -> Result<ResultList<R, E>>
where
    F: Fn(CallArgument<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    BatchInvoker::new().run(plan).await
}

async fn execute_plan<T, F, Fut, R, E>(plan: InvocationPlan<T, F>) -> ResultList<R, E>
where
    F: Fn(CallArgument<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    if plan.resolved_total() == 0 {
        debug!("No calls to make");
        return ResultList::empty();
    }

    let chunk_size = plan.chunk_size();
    let delay = plan.delay();
    let (function, arguments) = plan.into_call_parts();
    let outcomes = dispatch_windows(&function, arguments, chunk_size, delay).await;

    info!(
        "Completed {} calls in {} windows: {} successful, {} failed",
        outcomes.len(),
        outcomes.windows(),
        outcomes.success_count(),
        outcomes.failure_count()
    );

    outcomes
}

async fn dispatch_windows<T, F, Fut, R, E>(
    function: &F,
    arguments: Vec<CallArgument<T>>,
    chunk_size: usize,
    delay: Duration,
) -> ResultList<R, E>
where
    F: Fn(CallArgument<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let windows = plan_windows(arguments.len(), chunk_size);
    let last_window = windows.len().saturating_sub(1);
    let mut arguments = arguments.into_iter();
    let mut outcomes = Vec::with_capacity(arguments.len());
    let mut delays_applied = 0;

    for (window_index, range) in windows.iter().enumerate() {
        debug!(
            window = window_index,
            start = range.start,
            end = range.end,
            "Dispatching {} calls",
            range.len()
        );

        let calls = arguments
            .by_ref()
            .take(range.len())
            .map(|argument| invoke(function, argument));
        let settled = join_all(calls).await;

        for (offset, outcome) in settled.iter().enumerate() {
            if let Err(error) = outcome {
                warn!(index = range.start + offset, "Call {}", error.kind());
            }
        }
        outcomes.extend(settled);

        if window_index < last_window && !delay.is_zero() {
            debug!(window = window_index, "Pausing {:?} before next window", delay);
            tokio::time::sleep(delay).await;
            delays_applied += 1;
        }
    }

    ResultList::new(outcomes, windows.len(), delays_applied)
}

async fn invoke<T, F, Fut, R, E>(function: &F, argument: CallArgument<T>) -> CallOutcome<R, E>
where
    F: Fn(CallArgument<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let future = match std::panic::catch_unwind(AssertUnwindSafe(|| function(argument))) {
        Ok(future) => future,
        Err(payload) => return Err(CallError::from_panic(payload)),
    };

    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(CallError::Failed(error)),
        Err(payload) => Err(CallError::from_panic(payload)),
    }
}
