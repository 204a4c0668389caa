// ── One-shot record loading ──
//
// The only async boundary of the core. A load runs as its own tokio task
// and reports exactly once through a oneshot channel; cancelling it
// resolves the handle with `CoreError::Cancelled`. Stores are never
// touched from the task: the caller feeds the result to
// `DataView::on_load_finished` on its own thread.

use std::future::Future;
use std::sync::Arc;

use crmdash_api::DemoClient;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Lead, Product, Record};

/// A remote list of records of one kind.
pub trait RecordSource: Send + Sync + 'static {
    type Record: Record;

    /// Short name used in logs and errors ("leads", "products").
    fn name(&self) -> &'static str;

    fn fetch(&self) -> impl Future<Output = Result<Vec<Self::Record>, CoreError>> + Send;
}

/// Leads, normalized from the users endpoint.
pub struct LeadSource {
    client: Arc<DemoClient>,
}

impl LeadSource {
    pub fn new(client: Arc<DemoClient>) -> Self {
        Self { client }
    }
}

impl RecordSource for LeadSource {
    type Record = Lead;

    fn name(&self) -> &'static str {
        "leads"
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<Lead>, CoreError>> + Send {
        async move {
            let users = self
                .client
                .list_users()
                .await
                .map_err(|e| CoreError::fetch_failure(self.name(), &e))?;
            Ok(users.into_iter().map(Lead::from).collect())
        }
    }
}

/// The product catalog.
pub struct ProductSource {
    client: Arc<DemoClient>,
}

impl ProductSource {
    pub fn new(client: Arc<DemoClient>) -> Self {
        Self { client }
    }
}

impl RecordSource for ProductSource {
    type Record = Product;

    fn name(&self) -> &'static str {
        "products"
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send {
        async move {
            let products = self
                .client
                .list_products()
                .await
                .map_err(|e| CoreError::fetch_failure(self.name(), &e))?;
            Ok(products.into_iter().map(Product::from).collect())
        }
    }
}

/// Pending result of [`spawn_load`].
#[derive(Debug)]
pub struct LoadHandle<R> {
    source_name: &'static str,
    rx: oneshot::Receiver<Result<Vec<R>, CoreError>>,
    cancel: CancellationToken,
}

impl<R: Record> LoadHandle<R> {
    pub fn source_name(&self) -> &'static str {
        self.source_name
    }

    /// Abort the fetch. The handle then resolves to `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the load to finish.
    pub async fn wait(self) -> Result<Vec<R>, CoreError> {
        let source_name = self.source_name;
        self.rx.await.unwrap_or_else(|_| {
            Err(CoreError::Cancelled {
                source_name: source_name.to_owned(),
            })
        })
    }
}

/// Start fetching `source` in the background.
///
/// `cancel` is typically a child of the application's shutdown token, so
/// quitting mid-load drops the request.
pub fn spawn_load<S: RecordSource>(
    source: Arc<S>,
    cancel: CancellationToken,
) -> LoadHandle<S::Record> {
    let (tx, rx) = oneshot::channel();
    let source_name = source.name();
    let task_cancel = cancel.clone();

    tokio::spawn(async move {
        debug!(source = source_name, "fetch started");
        let result = tokio::select! {
            biased;
            () = task_cancel.cancelled() => Err(CoreError::Cancelled {
                source_name: source_name.to_owned(),
            }),
            result = source.fetch() => result,
        };

        match &result {
            Ok(records) => debug!(source = source_name, count = records.len(), "fetch finished"),
            Err(e) => warn!(source = source_name, error = %e, "fetch failed"),
        }

        // Receiver gone means nobody wants the result anymore.
        let _ = tx.send(result);
    });

    LoadHandle {
        source_name,
        rx,
        cancel,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::RecordId;

    struct SlowSource;

    impl RecordSource for SlowSource {
        type Record = Lead;

        fn name(&self) -> &'static str {
            "slow"
        }

        fn fetch(&self) -> impl Future<Output = Result<Vec<Lead>, CoreError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(vec![Lead {
                    id: RecordId::new(1),
                    name: "Late".into(),
                    email: "late@x.io".into(),
                    company: "Slowpoke".into(),
                    city: "Nowhere".into(),
                }])
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_load_resolves_to_cancelled() {
        let handle = spawn_load(Arc::new(SlowSource), CancellationToken::new());
        assert_eq!(handle.source_name(), "slow");

        handle.cancel();
        let err = handle.wait().await.unwrap_err();

        assert!(matches!(err, CoreError::Cancelled { ref source_name } if source_name == "slow"));
    }

    #[tokio::test(start_paused = true)]
    async fn parent_token_cancels_child_load() {
        let shutdown = CancellationToken::new();
        let handle = spawn_load(Arc::new(SlowSource), shutdown.child_token());

        shutdown.cancel();
        assert!(matches!(handle.wait().await, Err(CoreError::Cancelled { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn uncancelled_load_completes() {
        let handle = spawn_load(Arc::new(SlowSource), CancellationToken::new());
        let leads = handle.wait().await.unwrap();
        assert_eq!(leads[0].name, "Late");
    }
}
