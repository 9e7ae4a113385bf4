//! Page aggregation shared by every list-returning forge operation.
use log::*;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::{Result, error::NotesError, forge::config::DEFAULT_PAGE_SIZE};

/// Collects every page of a page-indexed listing. Pages are requested one
/// at a time starting at index 1 until a page shorter than
/// [`DEFAULT_PAGE_SIZE`] comes back.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    cancel: CancellationToken,
}

impl Paginator {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// Fetch pages until a short (or empty) page is returned. The first
    /// failing page aborts the whole collection and nothing accumulated so
    /// far is returned.
    pub async fn collect<T, F, Fut>(&self, mut fetch_page: F) -> Result<Vec<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let page_size = usize::from(DEFAULT_PAGE_SIZE);
        let mut items = vec![];
        let mut page = 1;

        loop {
            let batch = self.guard(fetch_page(page)).await?;
            let count = batch.len();

            debug!("fetched page {page} with {count} items");

            items.extend(batch);

            if count < page_size {
                break;
            }

            page += 1;
        }

        Ok(items)
    }

    /// Race a single forge request against cancellation.
    pub async fn guard<T, Fut>(&self, request: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(NotesError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(NotesError::Cancelled),
            result = request => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    fn pages_of(total: usize) -> impl Fn(u32) -> Vec<usize> {
        move |page| {
            let size = usize::from(DEFAULT_PAGE_SIZE);
            let start = (page as usize - 1) * size;
            let end = std::cmp::min(start + size, total);
            (start..end.max(start)).collect()
        }
    }

    async fn run(total: usize) -> (Vec<usize>, u32) {
        let calls = Arc::new(AtomicU32::new(0));
        let source = pages_of(total);
        let paginator = Paginator::default();

        let counter = Arc::clone(&calls);
        let items = paginator
            .collect(|page| {
                counter.fetch_add(1, Ordering::SeqCst);
                let batch = source(page);
                async move { Ok(batch) }
            })
            .await
            .unwrap();

        (items, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn makes_one_extra_call_to_detect_the_last_page() {
        for total in [0, 1, 99, 100, 101, 250, 300] {
            let (items, calls) = run(total).await;
            let expected_calls = (total + 1).div_ceil(100) as u32;
            assert_eq!(calls, expected_calls, "total {total}");
            assert_eq!(items, (0..total).collect::<Vec<_>>(), "total {total}");
        }
    }

    #[tokio::test]
    async fn propagates_the_first_page_error() {
        let paginator = Paginator::default();

        let result: Result<Vec<u32>> = paginator
            .collect(|page| async move {
                if page == 2 {
                    Err(NotesError::Forbidden("denied".into()))
                } else {
                    Ok(vec![0; 100])
                }
            })
            .await;

        assert!(matches!(result, Err(NotesError::Forbidden(_))));
    }

    #[tokio::test]
    async fn cancelled_collection_surfaces_cancellation() {
        let token = CancellationToken::new();
        let paginator = Paginator::new(token.clone());
        token.cancel();

        let result: Result<Vec<u32>> = paginator
            .collect(|_| async { Ok(vec![1, 2, 3]) })
            .await;

        assert!(matches!(result, Err(NotesError::Cancelled)));
    }

    #[tokio::test]
    async fn cancellation_mid_collection_discards_partial_pages() {
        let token = CancellationToken::new();
        let paginator = Paginator::new(token.clone());

        let result: Result<Vec<u32>> = paginator
            .collect(|page| {
                let token = token.clone();
                async move {
                    if page == 2 {
                        token.cancel();
                        std::future::pending::<()>().await;
                    }
                    Ok(vec![0; 100])
                }
            })
            .await;

        assert!(matches!(result, Err(NotesError::Cancelled)));
    }
}
