//! Bounded fixed-interval polling.

use std::future::Future;
use std::time::Duration;

/// Poll `probe` until it yields a value or `max_attempts` probes have run.
///
/// Each attempt sleeps for `interval` first, then probes — so a result on
/// attempt N costs N sleep intervals and no more. Probe errors propagate
/// immediately. `Ok(None)` means the budget was exhausted.
pub async fn poll_until<T, E, F, Fut>(
  interval: Duration,
  max_attempts: u32,
  mut probe: F,
) -> Result<Option<T>, E>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = Result<Option<T>, E>>,
{
  for _ in 0..max_attempts {
    tokio::time::sleep(interval).await;
    if let Some(value) = probe().await? {
      return Ok(Some(value));
    }
  }
  Ok(None)
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicU32, Ordering};

  use super::*;

  #[tokio::test(start_paused = true)]
  async fn stops_at_first_positive_probe() {
    let calls = AtomicU32::new(0);
    let started = tokio::time::Instant::now();

    let result: Result<Option<u32>, ()> =
      poll_until(Duration::from_secs(1), 10, || async {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok((n == 3).then_some(n))
      })
      .await;

    assert_eq!(result.unwrap(), Some(3));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    // Three sleeps, not ten.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
  }

  #[tokio::test(start_paused = true)]
  async fn exhausted_budget_yields_none() {
    let calls = AtomicU32::new(0);
    let started = tokio::time::Instant::now();

    let result: Result<Option<u32>, ()> = poll_until(Duration::from_secs(1), 4, || async {
      calls.fetch_add(1, Ordering::SeqCst);
      Ok(None)
    })
    .await;

    assert_eq!(result.unwrap(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(started.elapsed(), Duration::from_secs(4));
  }

  #[tokio::test(start_paused = true)]
  async fn probe_errors_propagate() {
    let result: Result<Option<u32>, &str> =
      poll_until(Duration::from_secs(1), 10, || async { Err("boom") }).await;
    assert_eq!(result.unwrap_err(), "boom");
  }
}
