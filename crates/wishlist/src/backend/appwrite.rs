//! # Appwrite Backend
//!
//! Talks to an Appwrite-style REST API: one database collection for the product
//! records, one storage bucket for their images.
//!
//! ## Wire format
//!
//! Documents keep the attribute names the collection was created with: `title`, `link`,
//! `imageId`, `priority` and `comprado`. List filters are JSON queries passed as repeated
//! `queries[]` parameters. Identifiers for new documents and files are generated here,
//! as 32 hex chars (the service accepts at most 36 and no leading underscore).

use super::{BackendError, FileStore, ProductStore};
use crate::config::AppwriteConfig;
use crate::model::{
    CatalogQuery, FileId, ImageUpload, NewProduct, Priority, Product, ProductId, ProductPatch,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

/// A product document as returned by the service.
///
/// Unset attributes come back as `null`, so everything but the ids is optional here.
/// The priority stays a raw string until conversion: an unknown tag on one record must
/// not fail the whole list.
#[derive(Debug, Deserialize)]
struct ProductDocument {
    #[serde(rename = "$id")]
    id: ProductId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(rename = "imageId")]
    image_id: FileId,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    comprado: Option<bool>,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        let priority = doc.priority.and_then(|tag| match tag.parse::<Priority>() {
            Ok(priority) => Some(priority),
            Err(e) => {
                warn!(id = %doc.id, error = %e, "Ignoring priority tag");
                None
            }
        });
        Product {
            id: doc.id,
            title: doc.title.unwrap_or_default(),
            product_url: doc.link.unwrap_or_default(),
            image_id: doc.image_id,
            priority,
            purchased: doc.comprado.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<ProductDocument>,
}

#[derive(Debug, Deserialize)]
struct StoredFile {
    #[serde(rename = "$id")]
    id: FileId,
}

/// One JSON-encoded list query. `or` nests further queries in `values`.
#[derive(Debug, Serialize)]
struct Query {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    values: Vec<QueryValue>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum QueryValue {
    Scalar(serde_json::Value),
    Nested(Query),
}

impl Query {
    fn comprado(method: &'static str, values: Vec<QueryValue>) -> Self {
        Self {
            method,
            attribute: Some("comprado"),
            values,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The `data` object of a create or update call. Absent fields are left out.
#[derive(Debug, Default, Serialize)]
struct DocumentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(rename = "imageId", skip_serializing_if = "Option::is_none")]
    image_id: Option<FileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comprado: Option<bool>,
}

impl From<NewProduct> for DocumentData {
    fn from(record: NewProduct) -> Self {
        Self {
            title: Some(record.title),
            link: Some(record.link),
            image_id: Some(record.image_id),
            priority: Some(record.priority),
            comprado: Some(false),
        }
    }
}

impl From<ProductPatch> for DocumentData {
    fn from(patch: ProductPatch) -> Self {
        Self {
            title: patch.title,
            link: patch.link,
            image_id: None,
            priority: patch.priority,
            comprado: patch.purchased,
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct AppwriteBackend {
    http: Client,
    config: AppwriteConfig,
    endpoint: String,
}

impl AppwriteBackend {
    pub fn new(config: AppwriteConfig) -> Result<Self, BackendError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    fn documents_path(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.config.database_id, self.config.collection_id
        )
    }

    fn files_path(&self) -> String {
        format!("{}/storage/buckets/{}/files", self.endpoint, self.config.bucket_id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let request = self
            .http
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => request.header("X-Appwrite-Key", key),
            None => request,
        }
    }

    /// The `queries[]` parameters for a list call.
    fn list_queries(&self, query: &CatalogQuery) -> Result<Vec<(&'static str, String)>, BackendError> {
        let mut queries = Vec::new();
        match query.purchased {
            Some(true) => {
                queries.push(Query::comprado("equal", vec![QueryValue::Scalar(json!(true))]))
            }
            // records written without the flag are still wanted
            Some(false) => queries.push(Query {
                method: "or",
                attribute: None,
                values: vec![
                    QueryValue::Nested(Query::comprado("isNull", Vec::new())),
                    QueryValue::Nested(Query::comprado(
                        "equal",
                        vec![QueryValue::Scalar(json!(false))],
                    )),
                ],
            }),
            None => {}
        }
        queries.push(Query {
            method: "limit",
            attribute: None,
            values: vec![QueryValue::Scalar(json!(self.config.list_limit))],
        });
        queries
            .iter()
            .map(|q| {
                serde_json::to_string(q)
                    .map(|encoded| ("queries[]", encoded))
                    .map_err(|e| BackendError::Decode(e.to_string()))
            })
            .collect()
    }
}

/// Maps a non-success status to a [`BackendError`], preferring the service's JSON message.
async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    if status == StatusCode::NOT_FOUND {
        Err(BackendError::NotFound(message))
    } else {
        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = check(response).await?.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl ProductStore for AppwriteBackend {
    async fn list(&self, query: &CatalogQuery) -> Result<Vec<Product>, BackendError> {
        debug!(?query, "Listing documents");
        let response = self
            .request(Method::GET, self.documents_path())
            .query(&self.list_queries(query)?)
            .send()
            .await?;
        let list: DocumentList = decode(response).await?;
        Ok(list.documents.into_iter().map(Product::from).collect())
    }

    async fn create(&self, record: NewProduct) -> Result<Product, BackendError> {
        let document_id = new_id();
        debug!(%document_id, "Creating document");
        let body = json!({
            "documentId": document_id,
            "data": DocumentData::from(record),
        });
        let response = self
            .request(Method::POST, self.documents_path())
            .json(&body)
            .send()
            .await?;
        let document: ProductDocument = decode(response).await?;
        Ok(document.into())
    }

    async fn update(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, BackendError> {
        debug!(%id, ?patch, "Updating document");
        let body = json!({ "data": DocumentData::from(patch) });
        let response = self
            .request(Method::PATCH, format!("{}/{}", self.documents_path(), id))
            .json(&body)
            .send()
            .await?;
        let document: ProductDocument = decode(response).await?;
        Ok(document.into())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), BackendError> {
        debug!(%id, "Deleting document");
        let response = self
            .request(Method::DELETE, format!("{}/{}", self.documents_path(), id))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStore for AppwriteBackend {
    async fn upload(&self, image: ImageUpload) -> Result<FileId, BackendError> {
        let file_id = new_id();
        debug!(%file_id, ?image, "Uploading file");
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| {
                BackendError::InvalidRequest(format!("content type {:?}: {e}", image.content_type))
            })?;
        let form = Form::new().text("fileId", file_id).part("file", part);
        let response = self
            .request(Method::POST, self.files_path())
            .multipart(form)
            .send()
            .await?;
        let stored: StoredFile = decode(response).await?;
        Ok(stored.id)
    }

    async fn remove(&self, id: &FileId) -> Result<(), BackendError> {
        debug!(%id, "Deleting file");
        let response = self
            .request(Method::DELETE, format!("{}/{}", self.files_path(), id))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    fn view_url(&self, id: &FileId) -> String {
        format!(
            "{}/{}/view?project={}",
            self.files_path(),
            id,
            self.config.project_id
        )
    }
}
