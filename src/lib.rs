//! # repeat-calls
//!
//! Invoke a function many times, a fixed-size chunk at a time, with an optional
//! pause between chunks. Useful for bursts of calls against rate-limited APIs
//! where a full task queue would be overkill.
//!
//! ## Usage
//!
//! ```no_run
//! use repeat_calls::{repeat_calls, CallArgument, InvocationPlan};
//! use std::time::Duration;
//!
//! # async fn demo() -> repeat_calls::Result<()> {
//! let plan = InvocationPlan::builder(|argument: CallArgument<u32>| async move {
//!     Ok::<_, String>(argument.into_scalar().unwrap_or_default())
//! })
//! .chunk_size(3)
//! .delay(Duration::from_millis(1000))
//! .scalars(1..=9)
//! .build()?;
//!
//! let results = repeat_calls(plan).await?;
//! assert_eq!(results.len(), 9);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `config` - Serializable chunk size / delay / call count settings
//! - `invoker` - The windowed fan-out/fan-in runner
//! - `outcome` - Per-call outcomes and the ordered result list
//! - `plan` - Invocation plans, call arguments and window partitioning
pub mod config;
pub mod error;
pub mod invoker;
pub mod outcome;
pub mod plan;

#[cfg(test)]
mod property_tests;

pub use config::BatchConfig;
pub use error::{Error, Result};
pub use invoker::{repeat_calls, BatchInvoker};
pub use outcome::{CallError, CallOutcome, ResultList};
pub use plan::{CallArgument, InvocationPlan, InvocationPlanBuilder};
