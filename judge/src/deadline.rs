//! Deadline Guard
//!
//! Enforces a wall-clock budget around one unit of work. Every guarded call gets its own
//! [`Deadline`] token; nothing about the countdown is process-wide, so concurrent
//! judgements cannot disturb each other's budgets.
//!
//! The token is cooperative at the lowest level (an execution backend polls it from its
//! interpreter loop and aborts with a non-catchable termination), but the guard itself is
//! authoritative: once the budget has elapsed, the outcome of the work is discarded and
//! [`GuardError::Timeout`] is reported, whatever the work returned.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Per-invocation cancellation token.
///
/// Cheap to clone; all clones observe the same countdown. An unenforced deadline never
/// expires.
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    state: Option<Arc<DeadlineState>>,
}

#[derive(Debug)]
struct DeadlineState {
    expires_at: Instant,
    disarmed: AtomicBool,
}

impl Deadline {
    /// A deadline that never fires. Trusted paths only.
    pub fn unenforced() -> Self {
        Self { state: None }
    }

    fn armed(budget: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now.checked_add(budget).unwrap_or(now + Duration::from_secs(86_400));
        Self {
            state: Some(Arc::new(DeadlineState {
                expires_at,
                disarmed: AtomicBool::new(false),
            })),
        }
    }

    /// True once the budget has elapsed while the deadline is still armed.
    pub fn is_expired(&self) -> bool {
        match &self.state {
            Some(state) => {
                !state.disarmed.load(Ordering::Acquire) && Instant::now() >= state.expires_at
            }
            None => false,
        }
    }

    fn disarm(&self) {
        if let Some(state) = &self.state {
            state.disarmed.store(true, Ordering::Release);
        }
    }
}

/// Disarms the wrapped deadline when dropped, including during unwinding.
struct DisarmOnDrop(Deadline);

impl Drop for DisarmOnDrop {
    fn drop(&mut self) {
        self.0.disarm();
    }
}

/// Outcome of a guarded call that did not produce a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GuardError<E> {
    /// The budget elapsed before the work finished.
    #[error("time limit exceeded")]
    Timeout,
    /// The work failed on its own.
    #[error("{0}")]
    Failed(E),
    /// The work panicked; the payload is rendered as text.
    #[error("panicked: {0}")]
    Panicked(String),
}

/// Runs `work` under a wall-clock budget.
///
/// `budget = None` leaves the work unenforced. Otherwise a fresh [`Deadline`] is armed
/// before `work` is invoked and disarmed on every exit path. A deadline that expired while
/// the work ran always wins over the work's own result.
pub fn run_with_deadline<T, E, F>(budget: Option<Duration>, work: F) -> Result<T, GuardError<E>>
where
    F: FnOnce(&Deadline) -> Result<T, E>,
{
    let deadline = match budget {
        Some(budget) => Deadline::armed(budget),
        None => Deadline::unenforced(),
    };
    let _disarm = DisarmOnDrop(deadline.clone());

    let outcome = catch_unwind(AssertUnwindSafe(|| work(&deadline)));

    if deadline.is_expired() {
        return Err(GuardError::Timeout);
    }

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(GuardError::Failed(err)),
        Err(payload) => Err(GuardError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn spin_until_expired(deadline: &Deadline) -> Result<(), String> {
        while !deadline.is_expired() {
            std::hint::spin_loop();
        }
        Err("interrupted".to_string())
    }

    #[test]
    fn returns_value_within_budget() {
        let out: Result<i32, GuardError<String>> =
            run_with_deadline(Some(Duration::from_secs(5)), |_| Ok(7));
        assert_eq!(out, Ok(7));
    }

    #[test]
    fn passes_failures_through() {
        let out: Result<(), GuardError<String>> =
            run_with_deadline(Some(Duration::from_secs(5)), |_| Err("boom".to_string()));
        assert_eq!(out, Err(GuardError::Failed("boom".to_string())));
    }

    #[test]
    fn interrupted_work_reports_timeout() {
        let out = run_with_deadline(Some(Duration::from_millis(20)), spin_until_expired);
        assert_eq!(out, Err(GuardError::Timeout));
    }

    #[test]
    fn late_success_is_still_a_timeout() {
        let out: Result<i32, GuardError<String>> =
            run_with_deadline(Some(Duration::from_millis(10)), |_| {
                sleep(Duration::from_millis(40));
                Ok(1)
            });
        assert_eq!(out, Err(GuardError::Timeout));
    }

    #[test]
    fn unenforced_budget_never_expires() {
        let out: Result<bool, GuardError<String>> = run_with_deadline(None, |deadline| {
            sleep(Duration::from_millis(10));
            Ok(deadline.is_expired())
        });
        assert_eq!(out, Ok(false));
    }

    #[test]
    fn panic_is_caught() {
        let out: Result<(), GuardError<String>> =
            run_with_deadline(Some(Duration::from_secs(5)), |_| panic!("kaboom"));
        assert_eq!(out, Err(GuardError::Panicked("kaboom".to_string())));
    }

    #[test]
    fn deadline_is_disarmed_after_a_panic() {
        // The outcome may be either variant here; only the token matters.
        let mut leaked = None;
        let _: Result<(), GuardError<String>> =
            run_with_deadline(Some(Duration::from_millis(5)), |deadline| {
                leaked = Some(deadline.clone());
                panic!("kaboom");
            });
        sleep(Duration::from_millis(15));
        assert!(!leaked.unwrap().is_expired());
    }

    #[test]
    fn deadline_is_disarmed_after_normal_return() {
        // A token that escaped the call must not fire later.
        let mut leaked = None;
        let _: Result<(), GuardError<String>> =
            run_with_deadline(Some(Duration::from_millis(5)), |deadline| {
                leaked = Some(deadline.clone());
                Ok(())
            });
        sleep(Duration::from_millis(15));
        assert!(!leaked.unwrap().is_expired());
    }

    #[test]
    fn concurrent_deadlines_are_independent() {
        let short = std::thread::spawn(|| {
            run_with_deadline(Some(Duration::from_millis(10)), spin_until_expired)
        });
        let long = std::thread::spawn(|| {
            run_with_deadline(Some(Duration::from_secs(5)), |deadline| {
                sleep(Duration::from_millis(50));
                Ok::<bool, String>(deadline.is_expired())
            })
        });
        assert_eq!(short.join().unwrap(), Err(GuardError::Timeout));
        assert_eq!(long.join().unwrap(), Ok(false));
    }
}
