//! Entity store
//!
//! Authoritative in-memory state for Models and Orders, backed by the
//! namespaced [`LocalStore`]. Every mutating operation synchronously rewrites
//! the entire affected collection before returning, so a later read always
//! sees the last completed write. There is no partial update path.
//!
//! Models are edited through a staging buffer: changes accumulate in the
//! buffer and only become authoritative (and durable) on [`EntityStore::save_models`].

pub mod namespace;
pub mod patch;
pub mod storage;

pub use namespace::namespace_key;
pub use storage::LocalStore;

use serde_json::Value;
use tracing::{info, warn};

use crate::core::{AppError, AppResult};
use crate::models::{seed_models, Model, Order, OrderDraft};
use crate::store::namespace::{models_key, orders_key, TENANT_NAME_KEY};
use crate::store::patch::{patch_models, patch_orders};
use crate::utils::now_rfc3339;

/// Authoritative Model and Order collections for one tenant namespace
pub struct EntityStore {
    kv: LocalStore,
    tenant_name: String,
    namespace: String,
    models: Vec<Model>,
    /// Staged Model edits, committed by `save_models`
    edit_buffer: Vec<Model>,
    /// Most-recent-first
    orders: Vec<Order>,
}

impl EntityStore {
    /// Open the store and load the namespace for `tenant_name`
    pub fn open(kv: LocalStore, tenant_name: &str) -> AppResult<Self> {
        let mut store = Self {
            kv,
            tenant_name: String::new(),
            namespace: String::new(),
            models: Vec::new(),
            edit_buffer: Vec::new(),
            orders: Vec::new(),
        };
        store.load_namespace(tenant_name)?;
        Ok(store)
    }

    /// Switch to the namespace derived from `tenant_name`, replacing all
    /// in-memory state with the persisted collections (or seed defaults when
    /// no models exist yet). Resets the edit buffer to mirror the loaded
    /// models.
    pub fn load_namespace(&mut self, tenant_name: &str) -> AppResult<()> {
        let namespace = namespace_key(tenant_name);

        let models = match self.read_json(&models_key(&namespace))? {
            Some(raw) => patch_models(Some(&raw)),
            None => seed_models(),
        };
        let raw_orders = self.read_json(&orders_key(&namespace))?;
        let orders = patch_orders(raw_orders.as_ref(), &models, tenant_name);

        self.tenant_name = tenant_name.to_string();
        self.namespace = namespace;
        self.models = models;
        self.edit_buffer = self.models.clone();
        self.orders = orders;

        self.kv
            .put(TENANT_NAME_KEY, &serde_json::to_string(tenant_name)?)?;

        info!(
            tenant = %self.tenant_name,
            namespace = %self.namespace,
            models = self.models.len(),
            orders = self.orders.len(),
            "Namespace loaded"
        );
        Ok(())
    }

    // ========== Models ==========

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Models offered on the order form
    pub fn available_models(&self) -> impl Iterator<Item = &Model> {
        self.models.iter().filter(|m| m.available)
    }

    pub fn edit_buffer(&self) -> &[Model] {
        &self.edit_buffer
    }

    pub fn edit_buffer_mut(&mut self) -> &mut Vec<Model> {
        &mut self.edit_buffer
    }

    /// Stage a new model at the front of the edit buffer
    pub fn stage_model(&mut self, model: Model) {
        self.edit_buffer.insert(0, model);
    }

    /// Throw away staged edits, restoring the authoritative collection
    pub fn discard_edits(&mut self) {
        self.edit_buffer = self.models.clone();
    }

    /// Commit the edit buffer as the authoritative Model collection and
    /// persist it immediately
    pub fn save_models(&mut self) -> AppResult<()> {
        self.models = self.edit_buffer.clone();
        self.persist(&models_key(&self.namespace), &self.models)?;
        info!(models = self.models.len(), "Models saved");
        Ok(())
    }

    // ========== Orders ==========

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Validate and commit a new order.
    ///
    /// The order is an immutable snapshot: model name and image are copied
    /// from the authoritative collection at this moment. It is prepended
    /// (most-recent-first) and the collection is persisted before returning.
    /// Validation failures carry the user-visible message and change nothing.
    pub fn add_order(&mut self, draft: OrderDraft) -> AppResult<Order> {
        if draft.model_id.is_empty() {
            return Err(AppError::validation("Please select a model."));
        }
        if draft.name.trim().is_empty() {
            return Err(AppError::validation("Please enter a name."));
        }

        let model = self.models.iter().find(|m| m.id == draft.model_id);
        if model.is_none() {
            // The snapshot still goes through with empty model fields; the
            // selection just no longer resolves (model deleted mid-edit).
            warn!(model_id = %draft.model_id, "Order references unknown model");
        }

        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            ts: now_rfc3339(),
            client: self.tenant_name.clone(),
            model: model.map(|m| m.name.clone()).unwrap_or_default(),
            model_image: model.map(|m| m.image.clone()).unwrap_or_default(),
            size: draft.size,
            qty: draft.qty.max(1),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            notes: draft.notes,
            mockups: draft.mockups,
        };

        self.orders.insert(0, order.clone());
        self.persist(&orders_key(&self.namespace), &self.orders)?;

        info!(order_id = %order.id, model = %order.model, size = %order.size, qty = order.qty, "Order saved");
        Ok(order)
    }

    /// Remove the order with `id`. Returns whether anything was removed;
    /// unknown ids are a no-op.
    pub fn delete_order(&mut self, id: &str) -> AppResult<bool> {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != id);
        let removed = self.orders.len() != before;

        if removed {
            self.persist(&orders_key(&self.namespace), &self.orders)?;
            info!(order_id = %id, "Order deleted");
        }
        Ok(removed)
    }

    // ========== Persistence ==========

    /// Parse a stored JSON value. Unreadable text is treated as absent; the
    /// patcher handles the rest.
    fn read_json(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self
            .kv
            .get(key)?
            .and_then(|text| serde_json::from_str(&text).ok()))
    }

    /// Full-collection rewrite. Durable when this returns.
    fn persist<T: serde::Serialize>(&self, key: &str, collection: &T) -> AppResult<()> {
        let text = serde_json::to_string(collection)?;
        self.kv.put(key, &text)?;
        Ok(())
    }
}
