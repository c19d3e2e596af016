//! The Product record and the payloads that create, edit and query it.

use crate::model::Priority;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier assigned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

/// Identifier of a binary object in the file store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(ProductId);
string_id!(FileId);

/// Represents one wishlist entry as stored remotely.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing a [`ResourceActor`](resource_actor::ResourceActor) to keep a snapshot of it.
///
/// See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub product_url: String,
    /// Set once at creation. Editing never changes it.
    pub image_id: FileId,
    /// `None` for records written before priorities existed.
    pub priority: Option<Priority>,
    pub purchased: bool,
}

/// The image file picked in the add-product form.
#[derive(Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

// Payloads end up in debug logs; keep the bytes out of them.
impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The add-product form.
#[derive(Clone)]
pub struct ProductCreate {
    pub title: String,
    pub link: String,
    pub image: Option<ImageUpload>,
    pub priority: Priority,
    /// Compared against the gate constant before anything else happens.
    pub gate_date: String,
}

// The gate date is a shared secret; it never goes to the logs.
impl std::fmt::Debug for ProductCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCreate")
            .field("title", &self.title)
            .field("link", &self.link)
            .field("image", &self.image)
            .field("priority", &self.priority)
            .field("gate_date", &"<redacted>")
            .finish()
    }
}

/// The edit form. Overwrites all four mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: String,
    pub link: String,
    pub priority: Priority,
    pub purchased: bool,
}

impl ProductUpdate {
    /// Pre-fills the edit form from the selected product. Untagged legacy records
    /// default to the lowest priority.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            link: product.product_url.clone(),
            priority: product.priority.unwrap_or(Priority::Low),
            purchased: product.purchased,
        }
    }
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self::from_product(product)
    }
}

/// The record the creator writes once the image is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub link: String,
    pub image_id: FileId,
    pub priority: Priority,
}

/// Partial field set for the document store; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub link: Option<String>,
    pub priority: Option<Priority>,
    pub purchased: Option<bool>,
}

impl ProductPatch {
    pub fn purchased(purchased: bool) -> Self {
        Self {
            purchased: Some(purchased),
            ..Self::default()
        }
    }
}

impl From<ProductUpdate> for ProductPatch {
    fn from(update: ProductUpdate) -> Self {
        Self {
            title: Some(update.title),
            link: Some(update.link),
            priority: Some(update.priority),
            purchased: Some(update.purchased),
        }
    }
}

/// Server-side constraint of one catalog view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub purchased: Option<bool>,
}

impl CatalogQuery {
    pub fn all() -> Self {
        Self { purchased: None }
    }

    /// Products still wanted.
    pub fn pending() -> Self {
        Self {
            purchased: Some(false),
        }
    }

    pub fn purchased() -> Self {
        Self {
            purchased: Some(true),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.purchased.map_or(true, |purchased| product.purchased == purchased)
    }
}
