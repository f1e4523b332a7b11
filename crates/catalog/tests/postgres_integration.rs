//! PostgreSQL integration tests for the catalog store.
//!
//! These tests use a shared PostgreSQL container. They are ignored by
//! default; run them where Docker is available with:
//!
//! ```bash
//! cargo test -p catalog --test postgres_integration -- --ignored
//! ```

use std::sync::Arc;

use catalog::{CatalogStore, MenuItem, MenuItemDraft, PostgresCatalogStore, Restaurant, RestaurantDraft};
use common::{GeoPoint, Money, RestaurantId, UserId};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresCatalogStore {
    let info = get_container_info().await;

    let pool: PgPool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    let store = PostgresCatalogStore::new(pool);
    store.run_migrations().await.unwrap();

    sqlx::query("TRUNCATE TABLE menu_items, restaurants")
        .execute(store.pool())
        .await
        .unwrap();

    store
}

fn test_restaurant(name: &str) -> Restaurant {
    Restaurant::create(
        UserId::new(),
        RestaurantDraft {
            name: name.to_string(),
            description: "Test kitchen".to_string(),
            address: "12 Main Street".to_string(),
            cuisine: "Italian".to_string(),
            location: GeoPoint::new(44.4268, 26.1025),
            delivery_fee: Money::from_cents(300),
            delivery_time_minutes: 40,
            image: None,
        },
    )
    .unwrap()
}

fn test_menu_item(restaurant_id: RestaurantId, name: &str, cents: i64) -> MenuItem {
    MenuItem::create(
        restaurant_id,
        MenuItemDraft {
            name: name.to_string(),
            description: String::new(),
            price: Money::from_cents(cents),
            image: None,
        },
    )
    .unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn insert_and_fetch_restaurant() {
    let store = get_test_store().await;

    let r = test_restaurant("Casa Mia");
    let id = r.id;
    store.insert_restaurant(r.clone()).await.unwrap();

    let fetched = store.restaurant(id).await.unwrap().unwrap();
    assert_eq!(fetched, r);

    assert!(store
        .restaurant(RestaurantId::new())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn update_persists_approval_state() {
    let store = get_test_store().await;

    let mut r = test_restaurant("Casa Mia");
    let id = r.id;
    store.insert_restaurant(r.clone()).await.unwrap();

    r.submit(1).unwrap();
    r.approve().unwrap();
    store.update_restaurant(&r).await.unwrap();

    let fetched = store.restaurant(id).await.unwrap().unwrap();
    assert!(fetched.is_visible());
    assert_eq!(store.approved_restaurants().await.unwrap().len(), 1);
    assert!(store.pending_restaurants().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn pending_queue_includes_resubmissions() {
    let store = get_test_store().await;

    let mut submitted = test_restaurant("Waiting");
    submitted.submit(1).unwrap();
    let mut re_review = test_restaurant("Edited");
    re_review.submit(1).unwrap();
    re_review.approve().unwrap();
    re_review.approval = re_review.approval.after_edit();
    let draft = test_restaurant("Hidden");

    store.insert_restaurant(submitted).await.unwrap();
    store.insert_restaurant(re_review).await.unwrap();
    store.insert_restaurant(draft).await.unwrap();

    let queue = store.pending_restaurants().await.unwrap();
    assert_eq!(queue.len(), 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn owner_lookup() {
    let store = get_test_store().await;

    let r = test_restaurant("Casa Mia");
    let owner = r.owner_id;
    store.insert_restaurant(r).await.unwrap();

    assert!(store.restaurant_for_owner(owner).await.unwrap().is_some());
    assert!(store
        .restaurant_for_owner(UserId::new())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn menu_item_roundtrip_and_count() {
    let store = get_test_store().await;

    let r = test_restaurant("Casa Mia");
    let rid = r.id;
    store.insert_restaurant(r).await.unwrap();

    let pizza = test_menu_item(rid, "Margherita", 900);
    let pizza_id = pizza.id;
    store.insert_menu_item(pizza.clone()).await.unwrap();
    store
        .insert_menu_item(test_menu_item(rid, "Pasta", 800))
        .await
        .unwrap();

    let fetched = store.menu_item(pizza_id).await.unwrap().unwrap();
    assert_eq!(fetched, pizza);
    assert_eq!(store.count_menu_items(rid).await.unwrap(), 2);

    let mut approved = fetched;
    approved.approve();
    store.update_menu_item(&approved).await.unwrap();

    let pending = store.pending_menu_items().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "Pasta");
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn delete_restaurant_cascades_to_menu_items() {
    let store = get_test_store().await;

    let r = test_restaurant("Casa Mia");
    let rid = r.id;
    store.insert_restaurant(r).await.unwrap();
    store
        .insert_menu_item(test_menu_item(rid, "Margherita", 900))
        .await
        .unwrap();
    store
        .insert_menu_item(test_menu_item(rid, "Pasta", 800))
        .await
        .unwrap();

    store.delete_restaurant(rid).await.unwrap();

    assert!(store.restaurant(rid).await.unwrap().is_none());
    assert!(store.menu_for_restaurant(rid).await.unwrap().is_empty());
    assert_eq!(store.count_menu_items(rid).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires docker"]
async fn listings_preserve_insertion_order() {
    let store = get_test_store().await;

    let mut first = test_restaurant("First");
    first.submit(1).unwrap();
    first.approve().unwrap();
    let mut second = test_restaurant("Second");
    second.submit(1).unwrap();
    second.approve().unwrap();

    store.insert_restaurant(first).await.unwrap();
    store.insert_restaurant(second).await.unwrap();

    let visible = store.approved_restaurants().await.unwrap();
    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].name, "First");
    assert_eq!(visible[1].name, "Second");
}
