// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded polling until a wait target is met.

use crate::constants::wait::MIN_POLL_INTERVAL_MILLIS;
use crate::error::{ProviderError, Result};
use crate::wait::evaluator::ConditionResult;
use crate::wait::spec::WaitSpec;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Poll `check` until the spec's target is met, the timeout passes, or `cancel` fires.
///
/// The first check always runs before any sleep, so a timeout of 0 checks exactly
/// once. Errors returned by `check` end the wait immediately; only results that
/// do not yet meet the target are retried.
pub async fn wait_for<F, Fut>(spec: &WaitSpec, cancel: &CancellationToken, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<ConditionResult>>,
{
    let start = Instant::now();
    let timeout = spec.timeout();
    let interval = spec
        .poll_interval()
        .max(Duration::from_millis(MIN_POLL_INTERVAL_MILLIS));
    let mut attempts: u32 = 1;

    let mut result = check().await?;
    loop {
        if spec.target.is_met_by(result) {
            info!(
                "Wait for {} satisfied after {} check(s) in {:?}",
                spec.target,
                attempts,
                start.elapsed()
            );
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            warn!(
                "Timed out after {}s waiting for {} ({} check(s), last result {:?})",
                spec.timeout, spec.target, attempts, result
            );
            return Err(ProviderError::Timeout {
                description: spec.target.to_string(),
                timeout: spec.timeout,
            });
        }

        debug!(
            "Waiting for {}: {:?}, checking again in {:?}",
            spec.target, result, interval
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Wait for {} cancelled after {} check(s)", spec.target, attempts);
                return Err(ProviderError::Cancelled(spec.target.to_string()));
            }
            _ = sleep(interval.min(timeout - elapsed)) => {}
        }

        attempts += 1;
        result = check().await?;
    }
}
