//! Bounded polling for services started in the background.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::OrchestrationError;

/// How often and how long to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for ReadinessPolicy {
    /// One probe per second for a minute.
    fn default() -> Self {
        Self {
            attempts: 60,
            interval: Duration::from_secs(1),
        }
    }
}

/// Call `probe` until it reports readiness or the attempts run out.
///
/// Probe errors count as "not ready yet".
///
/// # Errors
///
/// Returns [`OrchestrationError::NotReady`] once every attempt has failed.
pub async fn wait_until_ready<F, Fut, E>(
    service: &str,
    policy: ReadinessPolicy,
    mut probe: F,
) -> Result<(), OrchestrationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::fmt::Display,
{
    for attempt in 1..=policy.attempts {
        match probe().await {
            Ok(true) => {
                debug!(service, attempt, "service ready");
                return Ok(());
            }
            Ok(false) => debug!(service, attempt, "service not ready yet"),
            Err(error) => debug!(service, attempt, %error, "readiness probe failed"),
        }
        if attempt < policy.attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    Err(OrchestrationError::NotReady {
        service: service.to_owned(),
        attempts: policy.attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    const FAST: ReadinessPolicy = ReadinessPolicy {
        attempts: 3,
        interval: Duration::from_millis(1),
    };

    #[rstest]
    #[tokio::test]
    async fn returns_once_the_probe_succeeds() {
        let calls = Cell::new(0);

        let result = wait_until_ready("postgres", FAST, || {
            calls.set(calls.get() + 1);
            let ready = calls.get() == 2;
            async move { Ok::<_, std::io::Error>(ready) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn gives_up_after_the_last_attempt() {
        let calls = Cell::new(0);

        let result = wait_until_ready("postgres", FAST, || {
            calls.set(calls.get() + 1);
            async { Err::<bool, _>("connection refused") }
        })
        .await;

        assert!(matches!(
            result,
            Err(OrchestrationError::NotReady { attempts: 3, .. })
        ));
        assert_eq!(calls.get(), 3);
    }
}
