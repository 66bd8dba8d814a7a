//! Deadline-bounded dataset readiness.
//!
//! The UI must not spin forever when the initial dataset load never
//! completes. Instead of polling the cache on a timer, the load future is
//! raced against a deadline future; whichever resolves first decides between
//! a ready dataset and a distinct load-failed state.

use std::future::Future;
use std::rc::Rc;

use common::model::product::Product;
use futures::future::{select, Either};
use futures::pin_mut;

/// How long the home page waits for the dataset before giving up.
pub const LOAD_TIMEOUT_MS: u32 = 30_000;

/// Lifecycle of the dataset as seen by the UI.
#[derive(Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Rc<Vec<Product>>),
    Failed(String),
}

/// The deadline elapsed before the load finished.
#[derive(Debug, PartialEq)]
pub struct DeadlineExpired;

/// Resolves with the load result, or with [`DeadlineExpired`] if `deadline`
/// completes first. The losing future is dropped, not awaited further.
pub async fn bounded<T>(
    load: impl Future<Output = T>,
    deadline: impl Future<Output = ()>,
) -> Result<T, DeadlineExpired> {
    pin_mut!(load, deadline);
    match select(load, deadline).await {
        Either::Left((value, _)) => Ok(value),
        Either::Right(((), _)) => Err(DeadlineExpired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn load_finishing_first_wins() {
        let outcome = block_on(bounded(ready(42), pending::<()>()));
        assert_eq!(outcome, Ok(42));
    }

    #[test]
    fn elapsed_deadline_yields_distinct_failure() {
        let outcome = block_on(bounded(pending::<u32>(), ready(())));
        assert_eq!(outcome, Err(DeadlineExpired));
    }

    #[test]
    fn deadline_does_not_preempt_an_immediate_result() {
        // Both sides ready: select polls the load first, so a completed load
        // is never reported as timed out.
        let outcome = block_on(bounded(ready("data"), ready(())));
        assert_eq!(outcome, Ok("data"));
    }
}
