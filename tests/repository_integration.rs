//! Integration tests for repository layer
//!
//! These tests verify that repository implementations correctly interact
//! with the PostgreSQL database, including constraint mapping and
//! transactional order writes.
//!
//! Run with `DATABASE_URL=... cargo test -- --ignored`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_api::auth::password::hash_password;
use storefront_api::domain::order::{NewOrder, RequestedLine};
use storefront_api::domain::product::{CategoryName, NewProduct, Product};
use storefront_api::domain::repositories::user_repository::{NewUser, User, DEFAULT_ROLE};
use storefront_api::domain::repositories::{
    OrderRepository, ProductRepository, RepositoryError, UserRepository,
};
use storefront_api::domain::user::value_objects::{Email, Password};
use storefront_api::infrastructure::migrator::migrate;
use storefront_api::infrastructure::repositories::{
    PostgresOrderRepository, PostgresProductRepository, PostgresUserRepository,
};
use storefront_api::modules;

/// Set up test database connection pool with the schema in place
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    migrate(&pool, &modules::schema_of(&modules::all()))
        .await
        .expect("Failed to migrate test database");

    pool
}

fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}", prefix, nanos)
}

async fn create_test_user(pool: &PgPool) -> User {
    let password = Password::new("testpass").unwrap();

    PostgresUserRepository::new(pool.clone())
        .create(NewUser {
            email: Email::new(format!("{}@test.com", unique("repo"))).unwrap(),
            password_hash: hash_password(&password).expect("hash password"),
            role: DEFAULT_ROLE.to_string(),
        })
        .await
        .expect("Failed to create test user")
}

async fn create_test_product(pool: &PgPool, price: Decimal) -> Product {
    let repo = PostgresProductRepository::new(pool.clone());
    let category = repo
        .create_category(&CategoryName::new(unique("Category")).unwrap())
        .await
        .expect("Failed to create category");

    let product = NewProduct::new(
        "Test product".to_string(),
        String::new(),
        price,
        String::new(),
        category.id,
        true,
    )
    .unwrap();

    repo.create_product(&product)
        .await
        .expect("Failed to create product")
}

#[tokio::test]
#[ignore]
async fn test_user_repository_create_and_find() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());

    let user = create_test_user(&pool).await;

    let by_email = repo.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.role, DEFAULT_ROLE);

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, user.email);

    assert!(repo.find_by_id(-1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_user_repository_duplicate_email_is_conflict() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let user = create_test_user(&pool).await;

    let result = repo
        .create(NewUser {
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: DEFAULT_ROLE.to_string(),
        })
        .await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_product_repository_filter_and_lookup() {
    let pool = setup_test_db().await;
    let repo = PostgresProductRepository::new(pool.clone());
    let product = create_test_product(&pool, Decimal::new(1999, 2)).await;

    let in_category = repo.list_products(Some(product.category_id)).await.unwrap();
    assert_eq!(in_category, vec![product.clone()]);

    let found = repo.find_by_ids(&[product.id, -1]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price, Decimal::new(1999, 2));

    assert!(repo.find_by_id(-1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_product_repository_duplicate_category_is_conflict() {
    let pool = setup_test_db().await;
    let repo = PostgresProductRepository::new(pool);
    let name = CategoryName::new(unique("Shoes")).unwrap();

    repo.create_category(&name).await.unwrap();
    let result = repo.create_category(&name).await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_product_repository_unknown_category_is_invalid() {
    let pool = setup_test_db().await;
    let repo = PostgresProductRepository::new(pool);
    let product = NewProduct::new(
        "Orphan".to_string(),
        String::new(),
        Decimal::ONE,
        String::new(),
        -1,
        true,
    )
    .unwrap();

    let result = repo.create_product(&product).await;

    assert!(matches!(result, Err(RepositoryError::Invalid(_))));
}

#[tokio::test]
#[ignore]
async fn test_order_repository_create_and_history() {
    let pool = setup_test_db().await;
    let user = create_test_user(&pool).await;
    let cheap = create_test_product(&pool, Decimal::new(500, 2)).await;
    let dear = create_test_product(&pool, Decimal::new(2500, 2)).await;

    let order = NewOrder::price(
        user.id,
        &[
            RequestedLine { product_id: cheap.id, quantity: 2 },
            RequestedLine { product_id: dear.id, quantity: 1 },
        ],
        &[cheap.clone(), dear.clone()],
    )
    .unwrap();

    let repo = PostgresOrderRepository::new(pool);
    let created = repo.create(&order).await.unwrap();

    assert_eq!(created.user_id, user.id);
    assert_eq!(created.total, Decimal::new(3500, 2));
    assert_eq!(created.items.len(), 2);

    let history = repo.find_by_user(user.id).await.unwrap();
    assert_eq!(history, vec![created]);
}
