//! One concurrent fan-out stage sharing a single cancellation scope.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::error::ScrapeError;

/// Tasks run in parallel; the first failure cancels the rest and becomes the
/// wave's result. Successful outputs are yielded in completion order.
pub struct Wave<T> {
    set: JoinSet<Option<Result<T, ScrapeError>>>,
    token: CancellationToken,
    limit: Option<Arc<Semaphore>>,
}

impl<T: Send + 'static> Wave<T> {
    /// `limit` bounds how many tasks run at once; `None` is unbounded.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            set: JoinSet::new(),
            token: CancellationToken::new(),
            limit: limit.map(|n| Arc::new(Semaphore::new(n.max(1)))),
        }
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, ScrapeError>> + Send + 'static,
    {
        let token = self.token.clone();
        let limit = self.limit.clone();
        self.set.spawn(async move {
            let _permit = match limit {
                Some(sem) => tokio::select! {
                    biased;
                    _ = token.cancelled() => return None,
                    permit = sem.acquire_owned() => permit.ok(),
                },
                None => None,
            };
            tokio::select! {
                biased;
                _ = token.cancelled() => None,
                res = task => Some(res),
            }
        });
    }

    pub async fn join(mut self) -> Result<Vec<T>, ScrapeError> {
        let mut out = Vec::with_capacity(self.set.len());
        while let Some(joined) = self.set.join_next().await {
            let failure = match joined {
                Ok(Some(Ok(v))) => { out.push(v); continue; }
                Ok(Some(Err(e))) => e,
                // cancelled before finishing
                Ok(None) => continue,
                Err(e) if e.is_cancelled() => continue,
                Err(e) => ScrapeError::TaskPanicked(e.to_string()),
            };
            self.token.cancel();
            self.set.abort_all();
            return Err(failure);
        }
        Ok(out)
    }
}
