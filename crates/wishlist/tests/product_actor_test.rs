use resource_actor::ActorClient;
use std::sync::Arc;
use wishlist::backend::memory::Operation;
use wishlist::backend::{BackendError, FileStore, MemoryBackend};
use wishlist::clients::ProductClient;
use wishlist::model::{CatalogQuery, ImageUpload, Priority, ProductCreate, ProductUpdate};
use wishlist::product_actor::{self, Gate, ProductContext, ProductError};

fn form(title: &str) -> ProductCreate {
    ProductCreate {
        title: title.to_string(),
        link: "https://x".to_string(),
        image: Some(ImageUpload::new("pic.png", "image/png", vec![7; 16])),
        priority: Priority::Medium,
        gate_date: "2024-05-03".to_string(),
    }
}

async fn spawn_actor() -> (Arc<MemoryBackend>, ProductClient) {
    let backend = Arc::new(MemoryBackend::new());
    let (actor, generic_client) = product_actor::new(8, CatalogQuery::all());
    tokio::spawn(actor.run(ProductContext::shared(backend.clone(), Gate::default())));
    let client = ProductClient::new(generic_client);
    client.refresh().await.unwrap();
    backend.clear_calls().await;
    (backend, client)
}

#[tokio::test]
async fn test_failed_record_creation_removes_uploaded_image() {
    let (backend, client) = spawn_actor().await;
    backend.fail_next(Operation::Create).await;

    let result = client.create_product(form("Lamp")).await;

    assert!(matches!(
        result,
        Err(ProductError::Backend(BackendError::Rejected { status: 503, .. }))
    ));
    assert_eq!(backend.file_count().await, 0);
    // no reload after a failed mutation
    assert_eq!(
        backend.calls().await,
        vec![Operation::Upload, Operation::Create, Operation::Remove]
    );
    assert!(!client.is_submitting());
}

#[tokio::test]
async fn test_failed_upload_creates_nothing() {
    let (backend, client) = spawn_actor().await;
    backend.fail_next(Operation::Upload).await;

    let result = client.create_product(form("Lamp")).await;

    assert!(matches!(result, Err(ProductError::Backend(_))));
    assert_eq!(backend.calls().await, vec![Operation::Upload]);
    assert!(client.snapshot().is_empty());
}

#[tokio::test]
async fn test_local_checks_run_before_any_remote_call() {
    let (backend, client) = spawn_actor().await;

    let mut no_image = form("Lamp");
    no_image.image = None;
    let result = client.create_product(no_image).await;
    assert!(matches!(result, Err(ProductError::MissingImage)));

    let result = client.create_product(form("   ")).await;
    assert!(matches!(result, Err(ProductError::MissingTitle)));

    // the gate is checked first
    let mut both = form("");
    both.gate_date = "2024-05-04".to_string();
    both.image = None;
    let err = client.create_product(both).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "MAL GEI");

    assert!(backend.calls().await.is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let (backend, client) = spawn_actor().await;
    client.create_product(form("Lamp")).await.unwrap();
    assert_eq!(client.snapshot().len(), 1);

    backend.fail_next(Operation::List).await;
    let result = client.refresh().await;

    assert!(matches!(result, Err(ProductError::Backend(_))));
    assert_eq!(client.snapshot().len(), 1);
    assert_eq!(client.snapshot()[0].title, "Lamp");
}

#[tokio::test]
async fn test_failed_reload_after_mutation_still_reports_success() {
    let (backend, client) = spawn_actor().await;
    let lamp = client.create_product(form("Lamp")).await.unwrap();

    backend.fail_next(Operation::List).await;
    let stored = client.set_purchased(lamp.id.clone(), true).await.unwrap();

    assert!(stored);
    // stale until the next successful load
    assert!(!client.snapshot()[0].purchased);
    client.refresh().await.unwrap();
    assert!(client.snapshot()[0].purchased);
}

#[tokio::test]
async fn test_delete_tolerates_missing_image() {
    let (backend, client) = spawn_actor().await;
    let lamp = client.create_product(form("Lamp")).await.unwrap();
    backend.remove(&lamp.image_id).await.unwrap();

    client
        .delete_product(lamp.id.clone(), lamp.image_id.clone())
        .await
        .unwrap();

    assert!(client.snapshot().is_empty());
}

#[tokio::test]
async fn test_delete_aborts_when_image_removal_fails() {
    let (backend, client) = spawn_actor().await;
    let lamp = client.create_product(form("Lamp")).await.unwrap();
    backend.clear_calls().await;
    backend.fail_next(Operation::Remove).await;

    let result = client
        .delete_product(lamp.id.clone(), lamp.image_id.clone())
        .await;

    assert!(matches!(result, Err(ProductError::Backend(_))));
    assert_eq!(backend.calls().await, vec![Operation::Remove]);
    assert_eq!(client.snapshot().len(), 1);
    assert!(backend.has_file(&lamp.image_id).await);
}

#[tokio::test]
async fn test_update_requires_title_and_unknown_id_is_not_found() {
    let (backend, client) = spawn_actor().await;
    let lamp = client.create_product(form("Lamp")).await.unwrap();

    let mut blank = ProductUpdate::from(&lamp);
    blank.title = String::new();
    let result = client.update_product(lamp.id.clone(), blank).await;
    assert!(matches!(result, Err(ProductError::MissingTitle)));

    let result = client
        .update_product("product_404".into(), ProductUpdate::from(&lamp))
        .await;
    assert!(matches!(
        result,
        Err(ProductError::Backend(BackendError::NotFound(_)))
    ));
    assert_eq!(backend.file_count().await, 1);
}
