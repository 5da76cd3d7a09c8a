use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use anyhow::Result;

use super::setup_test_db;
use crate::{errors::ModelError, product, service, user};

/// Test user create and lookups
#[tokio::test]
async fn test_user_create_and_find() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let created = user::create(&db, "ana@example.com", "Ana", "$argon2id$stub".into()).await?;
    assert!(created.id > 0);

    let by_email = user::find_by_email(&db, "ana@example.com").await?.expect("user by email");
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.password_hash, "$argon2id$stub");

    let by_id = user::find_by_id(&db, created.id).await?.expect("user by id");
    assert_eq!(by_id.name, "Ana");

    assert!(user::find_by_email(&db, "nobody@example.com").await?.is_none());
    Ok(())
}

/// The unique column rejects a second row with the same email
#[tokio::test]
async fn test_user_email_unique() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;
    user::create(&db, "dup@example.com", "First", "h1".into()).await?;
    let err = user::create(&db, "dup@example.com", "Second", "h2".into()).await.unwrap_err();
    assert!(matches!(err, ModelError::Db(_)));
    Ok(())
}

#[tokio::test]
async fn test_user_validation() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;
    let err = user::create(&db, "not-an-email", "X", "h".into()).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    let err = user::create(&db, "x@example.com", " ", "h".into()).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

/// Test product CRUD operations
#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let p = product::create(&db, "Widget", "x", 10, Some("/uploads/1.png".into())).await?;
    assert_eq!(p.price, 10);
    assert_eq!(p.image_url.as_deref(), Some("/uploads/1.png"));

    let found = product::Entity::find_by_id(p.id).one(&db).await?.expect("product");
    assert_eq!(found, p);

    let mut am: product::ActiveModel = found.into();
    am.price = Set(25);
    let updated = am.update(&db).await?;
    assert_eq!(updated.price, 25);

    product::Entity::delete_by_id(p.id).exec(&db).await?;
    assert!(product::Entity::find_by_id(p.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_product_rejects_negative_price() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;
    let err = product::create(&db, "Widget", "x", -1, None).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(product::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

/// Test service CRUD operations
#[tokio::test]
async fn test_service_crud() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;

    let s = service::create(&db, "Haircut", "30 minutes", 50, 30).await?;
    assert_eq!(s.duration, 30);

    let json = serde_json::to_value(&s)?;
    assert_eq!(json["duration"], 30);
    assert_eq!(json["price"], 50);

    let err = service::create(&db, "Haircut", "x", 50, -5).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));

    service::Entity::delete_by_id(s.id).exec(&db).await?;
    assert!(service::Entity::find_by_id(s.id).one(&db).await?.is_none());
    Ok(())
}

/// Serialized records use camelCase and never expose the password hash
#[tokio::test]
async fn test_wire_shape() -> Result<()> {
    let (db, _dir) = setup_test_db().await?;
    let p = product::create(&db, "Widget", "x", 1, None).await?;
    let json = serde_json::to_value(&p)?;
    assert!(json.get("imageUrl").is_some());
    assert!(json.get("image_url").is_none());

    let u = user::create(&db, "wire@example.com", "Wire", "secret-hash".into()).await?;
    let json = serde_json::to_value(&u)?;
    assert!(json.get("password_hash").is_none());
    assert!(json.get("passwordHash").is_none());
    assert_eq!(json["email"], "wire@example.com");
    Ok(())
}
