//! Order entity and size enumeration

use serde::{Deserialize, Serialize};

/// Garment size. The enumeration is closed: aggregation reports all seven
/// sizes even when some have zero orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
    XXXL,
}

impl Size {
    /// All sizes in display order
    pub const ALL: [Size; 7] = [
        Size::XS,
        Size::S,
        Size::M,
        Size::L,
        Size::XL,
        Size::XXL,
        Size::XXXL,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
            Size::XXXL => "XXXL",
        }
    }

    /// Parse a size label, falling back to `M` on anything unrecognized.
    /// Persisted data may carry labels from older schema versions.
    pub fn parse_or_default(label: &str) -> Size {
        Size::ALL
            .into_iter()
            .find(|s| s.as_str() == label)
            .unwrap_or(Size::M)
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::M
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer order. Immutable snapshot at creation time: `model` and
/// `model_image` are copies, so renaming or deleting a Model never alters
/// historical orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Creation timestamp, RFC 3339
    pub ts: String,
    /// Tenant name at creation time
    pub client: String,
    /// Model name snapshot (display join key, not a foreign key)
    pub model: String,
    /// Model image snapshot (data URL or empty)
    #[serde(rename = "modelImage")]
    pub model_image: String,
    pub size: Size,
    /// Always >= 1
    pub qty: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    /// Customer-supplied mockup images as data URLs, in upload order
    pub mockups: Vec<String>,
}

/// Order submission input, as collected by the form
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    /// Id of the selected model; required
    pub model_id: String,
    pub size: Size,
    pub qty: u32,
    /// Customer name; required
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    /// Mockup data URLs, already read from disk
    pub mockups: Vec<String>,
}
