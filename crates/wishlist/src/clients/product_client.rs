//! # Product Client
//!
//! Provides a high-level API for interacting with a `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes the wishlist operations, plus the
//! submitting flag that keeps a form from being sent twice.
use crate::model::{FileId, PriorityFilter, Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
///
/// Clones share the submitting flag, so a create or edit started from one clone blocks
/// another create or edit from any of them until it settles.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    submitting: Arc<AtomicBool>,
}

/// Clears the submitting flag when the submission settles, however it ends.
struct Submission(Arc<AtomicBool>);

impl Drop for Submission {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self {
            inner,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a create or edit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    fn begin_submission(&self) -> Result<Submission, ProductError> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ProductError::SubmissionInFlight)?;
        Ok(Submission(self.submitting.clone()))
    }

    /// Add a product: upload its image, write the record, reload the catalog.
    ///
    /// Returns the record as stored.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        let _submission = self.begin_submission()?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Overwrite title, link, priority and purchased flag. The image stays.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        let _submission = self.begin_submission()?;
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Flip the purchased flag. Returns the flag as stored.
    #[instrument(skip(self))]
    pub async fn set_purchased(&self, id: ProductId, purchased: bool) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ProductAction::SetPurchased(purchased))
            .await
        {
            Ok(ProductActionResult::SetPurchased(stored)) => Ok(stored),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Remove the product's image, then its record.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId, image_id: FileId) -> Result<(), ProductError> {
        debug!("Sending request");
        self.inner.delete(id, image_id).await.map_err(Self::map_error)
    }

    /// The current snapshot narrowed by priority. No round trip.
    pub fn catalog(&self, filter: PriorityFilter) -> Vec<Product> {
        filter.apply(&self.inner.snapshot())
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from_framework(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::model::{CatalogQuery, ImageUpload, Priority};
    use resource_actor::mock::{create_mock_client, expect_action, expect_create, MockClient};

    fn product(id: &str, priority: Option<Priority>) -> Product {
        Product {
            id: ProductId::from(id),
            title: format!("title {id}"),
            product_url: "https://x".to_string(),
            image_id: FileId::from(format!("file_{id}")),
            priority,
            purchased: false,
        }
    }

    fn lamp_form() -> ProductCreate {
        ProductCreate {
            title: "Lamp".to_string(),
            link: "https://x".to_string(),
            image: Some(ImageUpload::new("lamp.png", "image/png", vec![1, 2, 3])),
            priority: Priority::High,
            gate_date: "2024-05-03".to_string(),
        }
    }

    #[tokio::test]
    async fn test_set_purchased_sends_action() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .set_purchased(ProductId::from("p1"), true)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId::from("p1"));
        assert_eq!(action, ProductAction::SetPurchased(true));
        responder
            .send(Ok(ProductActionResult::SetPurchased(true)))
            .unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_second_submission_is_rejected_while_first_in_flight() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let first_client = product_client.clone();
        let first = tokio::spawn(async move { first_client.create_product(lamp_form()).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.title, "Lamp");
        assert!(product_client.is_submitting());

        let second = product_client
            .update_product(ProductId::from("p1"), ProductUpdate::from(&product("p1", None)))
            .await;
        assert!(matches!(second, Err(ProductError::SubmissionInFlight)));

        responder.send(Ok(product("p1", Some(Priority::High)))).unwrap();
        assert_eq!(first.await.unwrap().unwrap().id, ProductId::from("p1"));
        assert!(!product_client.is_submitting());
    }

    #[tokio::test]
    async fn test_failed_submission_clears_flag_and_keeps_error_type() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_create()
            .return_err(FrameworkError::entity(ProductError::GateRejected));
        mock.expect_create().return_err(FrameworkError::entity(ProductError::Backend(
            BackendError::Rejected {
                status: 500,
                message: "down".to_string(),
            },
        )));

        let client = ProductClient::new(mock.client());
        let gate = client.create_product(lamp_form()).await.unwrap_err();
        assert_eq!(gate.to_string(), "MAL GEI");
        assert!(!client.is_submitting());

        let backend = client.create_product(lamp_form()).await.unwrap_err();
        assert!(matches!(
            backend,
            ProductError::Backend(BackendError::Rejected { status: 500, .. })
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_catalog_filters_the_snapshot() {
        let mock = MockClient::<Product>::new();
        mock.publish(vec![
            product("a", Some(Priority::High)),
            product("b", Some(Priority::Low)),
            product("c", None),
        ]);
        let client = ProductClient::new(mock.client());

        assert_eq!(client.catalog(PriorityFilter::All).len(), 3);
        let high = client.catalog(PriorityFilter::Only(Priority::High));
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].id, ProductId::from("a"));
        assert!(client.catalog(PriorityFilter::Only(Priority::Medium)).is_empty());
    }

    #[tokio::test]
    async fn test_load_switches_query_through_trait() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_load()
            .return_ok(Arc::new(vec![product("a", Some(Priority::High))]));
        let client = ProductClient::new(mock.client());

        let loaded = client.load(Some(CatalogQuery::purchased())).await.unwrap();
        assert_eq!(loaded.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);
        let product_client = ProductClient::new(client);

        let result = product_client
            .delete_product(ProductId::from("p1"), FileId::from("f1"))
            .await;
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
