//! Data bridge: runs one-shot record loads and forwards their results to
//! the UI loop as actions.
//!
//! Every load is a child of the bridge's cancellation token, so quitting
//! the app abandons whatever is still in flight. The bridge never touches
//! screen state; screens apply `LeadsLoaded` / `ProductsLoaded` themselves.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crmdash_core::{
    CoreError, DemoClient, LeadSource, LoadHandle, ProductSource, Record, RecordSource,
    spawn_load,
};

use crate::action::{Action, RecordKind};

pub struct DataBridge {
    leads: Arc<LeadSource>,
    products: Arc<ProductSource>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
}

impl DataBridge {
    pub fn new(
        client: DemoClient,
        action_tx: mpsc::UnboundedSender<Action>,
        cancel: CancellationToken,
    ) -> Self {
        let client = Arc::new(client);
        Self {
            leads: Arc::new(LeadSource::new(Arc::clone(&client))),
            products: Arc::new(ProductSource::new(client)),
            action_tx,
            cancel,
        }
    }

    /// Start loading `kind`. Announces `LoadStarted` right away and the
    /// result once the fetch settles.
    pub fn load(&self, kind: RecordKind) {
        let _ = self.action_tx.send(Action::LoadStarted(kind));
        match kind {
            RecordKind::Leads => self.forward(&self.leads, Action::LeadsLoaded),
            RecordKind::Products => self.forward(&self.products, Action::ProductsLoaded),
        }
    }

    fn forward<S: RecordSource>(
        &self,
        source: &Arc<S>,
        wrap: fn(Result<Vec<S::Record>, CoreError>) -> Action,
    ) {
        let handle: LoadHandle<S::Record> =
            spawn_load(Arc::clone(source), self.cancel.child_token());
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let source_name = handle.source_name();
            let result = handle.wait().await;
            if matches!(result, Err(CoreError::Cancelled { .. })) {
                debug!(source = source_name, "load abandoned");
                return;
            }
            debug!(
                source = source_name,
                kind = <S::Record as Record>::KIND,
                ok = result.is_ok(),
                "forwarding load result"
            );
            let _ = tx.send(wrap(result));
        });
    }
}
