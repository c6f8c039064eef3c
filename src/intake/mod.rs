//! Order desk
//!
//! Thin orchestration over the entity store, sync client, and CSV export.
//! This is the surface a view layer drives: it commits mutations locally
//! first, then (for new orders) fires a best-effort sink push whose outcome
//! only ever lands as a transient [`Notice`], never as a rollback.

pub mod attachments;

pub use attachments::{read_mockup, read_mockups, Mockup};

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::core::{AppError, AppResult, Config};
use crate::export::{order_rows, to_csv};
use crate::models::{Order, OrderDraft};
use crate::query::{filter, OrderFilter};
use crate::store::{EntityStore, LocalStore};
use crate::sync::SyncClient;

/// Transient user-visible message (the UI shows these as toasts)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(pub String);

impl Notice {
    fn new(msg: impl Into<String>) -> Self {
        Notice(msg.into())
    }
}

/// Order intake service for one tenant at a time
pub struct OrderDesk {
    store: EntityStore,
    sync: Option<Arc<SyncClient>>,
    auto_sync: bool,
    notices: mpsc::UnboundedSender<Notice>,
}

impl OrderDesk {
    /// Open the desk with a database file under `config.data_dir`
    pub fn open(config: &Config) -> AppResult<(Self, mpsc::UnboundedReceiver<Notice>)> {
        std::fs::create_dir_all(&config.data_dir)?;
        let kv = LocalStore::open(std::path::Path::new(&config.data_dir).join("stitchdesk.redb"))?;
        Self::new(config, kv)
    }

    /// Build the desk around an already-open store, returning the notice
    /// receiver the view layer drains
    pub fn new(
        config: &Config,
        kv: LocalStore,
    ) -> AppResult<(Self, mpsc::UnboundedReceiver<Notice>)> {
        let store = EntityStore::open(kv, &config.tenant_name)?;
        let sync = config
            .has_sink()
            .then(|| Arc::new(SyncClient::new(&config.sheet_webhook)));
        let (tx, rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                store,
                sync,
                auto_sync: config.auto_sync,
                notices: tx,
            },
            rx,
        ))
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Validate and commit a new order, then auto-push it to the sink.
    ///
    /// The local commit completes (durably) before the push is even spawned;
    /// the push is fire-and-forget and reports through the notice channel.
    /// Validation failures surface their message as a notice and change
    /// nothing.
    pub fn submit_order(&mut self, draft: OrderDraft) -> AppResult<Order> {
        match self.store.add_order(draft) {
            Ok(order) => {
                self.notify("Order saved.");
                if self.auto_sync {
                    self.spawn_push(order.clone());
                }
                Ok(order)
            }
            Err(e) => {
                if let AppError::Validation(msg) = &e {
                    self.notify(msg.clone());
                }
                Err(e)
            }
        }
    }

    fn spawn_push(&self, order: Order) {
        // Auto-sync is a no-op without a configured sink
        let Some(sync) = self.sync.clone() else { return };
        let notices = self.notices.clone();

        tokio::spawn(async move {
            match sync.push_order(&order).await {
                Ok(_) => {
                    info!(order_id = %order.id, "Order pushed to sink");
                    let _ = notices.send(Notice::new("Synced to sheet."));
                }
                Err(e) => {
                    let _ = notices.send(Notice::new(e.to_string()));
                }
            }
        });
    }

    /// Push the filtered order view to the sink as one bulk payload. The
    /// sink only ever sees filtered views, never the raw store.
    pub async fn sync_filtered(&self, order_filter: &OrderFilter) {
        let Some(sync) = &self.sync else {
            self.notify("Add a sheet webhook in Settings.");
            return;
        };

        let rows = filter(self.store.orders(), order_filter);
        match sync.push_orders(&rows).await {
            Ok(_) => {
                info!(count = rows.len(), "Filtered orders pushed to sink");
                self.notify("Orders synced.");
            }
            Err(e) => self.notify(e.to_string()),
        }
    }

    /// CSV of the filtered order view, for download
    pub fn export_filtered(&self, order_filter: &OrderFilter) -> AppResult<String> {
        let rows = order_rows(filter(self.store.orders(), order_filter))?;
        Ok(to_csv(&rows))
    }

    /// Commit staged model edits
    pub fn save_models(&mut self) -> AppResult<()> {
        self.store.save_models()?;
        self.notify("Models saved.");
        Ok(())
    }

    /// Switch the active tenant, reloading its namespace. An in-flight sink
    /// push from the previous tenant completes or fails on its own.
    pub fn switch_tenant(&mut self, tenant_name: &str) -> AppResult<()> {
        self.store.load_namespace(tenant_name)
    }

    fn notify(&self, msg: impl Into<String>) {
        let _ = self.notices.send(Notice::new(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Size;

    fn desk_without_sink() -> (OrderDesk, mpsc::UnboundedReceiver<Notice>) {
        let config = Config {
            data_dir: String::new(),
            tenant_name: "Bolos Crew".into(),
            sheet_webhook: String::new(),
            auto_sync: true,
        };
        OrderDesk::new(&config, LocalStore::open_in_memory().unwrap()).unwrap()
    }

    fn draft(desk: &OrderDesk, name: &str) -> OrderDraft {
        OrderDraft {
            model_id: desk.store().models()[0].id.clone(),
            size: Size::L,
            qty: 2,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_emits_saved_notice() {
        let (mut desk, mut notices) = desk_without_sink();
        let d = draft(&desk, "Jane");
        desk.submit_order(d).unwrap();

        assert_eq!(notices.try_recv().unwrap(), Notice("Order saved.".into()));
        assert_eq!(desk.store().orders().len(), 1);
        // No sink configured, so no sync notice follows
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_validation_failure_notifies_and_mutates_nothing() {
        let (mut desk, mut notices) = desk_without_sink();
        let mut d = draft(&desk, "Jane");
        d.name = String::new();

        assert!(desk.submit_order(d).is_err());
        assert_eq!(
            notices.try_recv().unwrap(),
            Notice("Please enter a name.".into())
        );
        assert!(desk.store().orders().is_empty());
    }

    #[tokio::test]
    async fn test_sync_filtered_without_sink_gives_guidance() {
        let (desk, mut notices) = desk_without_sink();
        desk.sync_filtered(&OrderFilter::default()).await;
        assert_eq!(
            notices.try_recv().unwrap(),
            Notice("Add a sheet webhook in Settings.".into())
        );
    }

    #[tokio::test]
    async fn test_export_filtered() {
        let (mut desk, _notices) = desk_without_sink();
        let d = draft(&desk, "Jane");
        desk.submit_order(d).unwrap();

        let csv = desk.export_filtered(&OrderFilter::default()).unwrap();
        assert!(csv.starts_with("id,ts,client,"));
        assert_eq!(csv.lines().count(), 2);

        // A filter that matches nothing exports an empty file
        let csv = desk
            .export_filtered(&OrderFilter {
                text: "no such customer".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(csv, "");
    }

    #[tokio::test]
    async fn test_save_models_notice() {
        let (mut desk, mut notices) = desk_without_sink();
        desk.store_mut().stage_model(crate::models::Model::new("X", true));
        desk.save_models().unwrap();
        assert_eq!(notices.try_recv().unwrap(), Notice("Models saved.".into()));
    }
}
