//! Property-based tests for window planning and run ordering

#[cfg(test)]
mod tests {
    use crate::invoker::BatchInvoker;
    use crate::plan::{delay_count, plan_windows, window_count, CallArgument, InvocationPlan};
    use proptest::prelude::*;
    use std::time::Duration;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("test runtime")
            .block_on(future)
    }

    // Property test: windows partition the call range
    proptest! {
        #[test]
        fn test_windows_partition_range(
            total in 0usize..500,
            chunk_size in 1usize..64,
        ) {
            let windows = plan_windows(total, chunk_size);

            prop_assert_eq!(windows.len(), window_count(total, chunk_size));
            prop_assert_eq!(windows.len(), total.div_ceil(chunk_size));
            prop_assert_eq!(delay_count(total, chunk_size), windows.len().saturating_sub(1));

            let mut expected_start = 0;
            for (position, window) in windows.iter().enumerate() {
                prop_assert_eq!(window.start, expected_start);
                prop_assert!(!window.is_empty());
                if position + 1 < windows.len() {
                    prop_assert_eq!(window.len(), chunk_size);
                } else {
                    prop_assert!(window.len() <= chunk_size);
                }
                expected_start = window.end;
            }
            prop_assert_eq!(expected_start, total);
        }
    }

    // Property test: indexed runs produce f(i) at index i
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn test_indexed_results_align_with_calls(
            total in 0usize..120,
            chunk_size in 1usize..20,
            delay_ms in 0u64..5,
        ) {
            let results = block_on(BatchInvoker::new().run_indexed(
                total,
                chunk_size,
                Duration::from_millis(delay_ms),
                |index| std::future::ready(Ok::<_, ()>(index * 3 + 1)),
            ))
            .expect("valid configuration");

            prop_assert_eq!(results.len(), total);
            prop_assert_eq!(results.windows(), window_count(total, chunk_size));
            let expected_delays = if delay_ms == 0 { 0 } else { delay_count(total, chunk_size) };
            prop_assert_eq!(results.delays_applied(), expected_delays);

            for (index, outcome) in results.iter().enumerate() {
                prop_assert_eq!(outcome, &Ok(index * 3 + 1));
            }
        }
    }

    // Property test: payload runs pass each element through in order
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn test_payload_results_follow_payload(
            payload in prop::collection::vec(any::<i32>(), 0..80),
            chunk_size in 1usize..16,
        ) {
            let plan = InvocationPlan::builder(|argument: CallArgument<i32>| {
                std::future::ready(match argument.into_scalar() {
                    Some(value) if value % 7 == 0 => Err(value),
                    Some(value) => Ok(value),
                    None => Err(0),
                })
            })
            .chunk_size(chunk_size)
            .scalars(payload.clone())
            .build()
            .expect("valid configuration");

            let results = block_on(BatchInvoker::new().run(plan)).expect("run completes");

            prop_assert_eq!(results.len(), payload.len());
            for (value, outcome) in payload.iter().zip(results.iter()) {
                match outcome {
                    Ok(returned) => {
                        prop_assert_eq!(returned, value);
                    }
                    Err(error) => {
                        prop_assert_eq!(error.as_failed(), Some(value));
                    }
                }
            }
        }
    }
}
