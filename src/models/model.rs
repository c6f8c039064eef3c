//! Model entity (garment variant)

use serde::{Deserialize, Serialize};

/// A product variant customers can order against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    /// Only available models are offered on the order form
    pub available: bool,
    /// Base64 data URL, or empty when no image is set
    pub image: String,
}

impl Model {
    /// Create a model with a fresh id and no image
    pub fn new(name: impl Into<String>, available: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            available,
            image: String::new(),
        }
    }
}

/// Seed catalog used when a namespace has no persisted models yet
pub fn seed_models() -> Vec<Model> {
    vec![
        Model::new("Classic Tee - Black", true),
        Model::new("Classic Tee - White", true),
        Model::new("Pocket Tee - Navy", false),
    ]
}
