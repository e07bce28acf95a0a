//! Integration tests for the article stock ledger.
//!
//! Exercises the movement engine against a real database:
//! - Entry/exit movements and the captured stock snapshot
//! - Insufficient-stock rejection with no partial writes
//! - Neutral movement types leaving the counter alone
//! - Concurrent exits serializing on the row lock
//! - Ledger-vs-counter consistency audit

use sqlx::PgPool;

use depot_core::CoreError;
use depot_db::models::article::{CreateArticle, UpdateArticle};
use depot_db::models::category::CreateCategory;
use depot_db::models::movement::{CreateMovement, MovementQuery, UpdateMovement};
use depot_db::models::user::CreateUser;
use depot_db::repositories::{ArticleRepo, CategoryRepo, MovementRepo, RoleRepo, UserRepo};
use depot_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let role = RoleRepo::find_by_name(pool, "storekeeper")
        .await
        .unwrap()
        .expect("roles are seeded by migration");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@depot.test"),
            password_hash: "x".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap();
    user.id
}

async fn seed_article(pool: &PgPool, code: &str, initial_stock: i32) -> i64 {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            name: format!("cat-{code}"),
            description: None,
        },
    )
    .await
    .unwrap();
    let article = ArticleRepo::create(
        pool,
        &CreateArticle {
            code: code.to_string(),
            name: format!("Article {code}"),
            description: String::new(),
            serial_number: None,
            stock_current: initial_stock,
            stock_min: 0,
            stock_max: None,
            location: "shelf A".to_string(),
            status: None,
            category_id: category.id,
        },
    )
    .await
    .unwrap();
    article.id
}

fn movement(movement_type: &str, quantity: i32, reason: &str) -> CreateMovement {
    CreateMovement {
        movement_type: movement_type.to_string(),
        quantity,
        reason: reason.to_string(),
        reference: None,
        origin_location: None,
        destination_location: None,
        assigned_to: None,
        received_by: None,
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Test: Creation baseline
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_sets_initial_and_current_stock(pool: PgPool) {
    let article_id = seed_article(&pool, "ART-001", 10).await;

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_initial, 10);
    assert_eq!(article.stock_current, 10);
    assert_eq!(article.status, "available");

    // No movements yet: the ledger still reconciles against the baseline.
    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert_eq!(check.movement_sum, 0);
    assert!(check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Entry and exit update the counter and capture the snapshot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_entry_then_exit_walks_the_counter(pool: PgPool) {
    let user_id = seed_user(&pool, "walker").await;
    let article_id = seed_article(&pool, "ART-002", 10).await;

    let entry = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 5, "delivery"))
        .await
        .unwrap();
    assert_eq!(entry.stock_before, 10);
    assert_eq!(entry.stock_after, 15);
    assert_eq!(entry.user_id, user_id);

    let exit = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("exit", 3, "issued"))
        .await
        .unwrap();
    assert_eq!(exit.stock_before, 15);
    assert_eq!(exit.stock_after, 12);

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_current, 12);
    assert_eq!(article.stock_initial, 10); // baseline never moves

    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert_eq!(check.movement_sum, 2);
    assert!(check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Exit beyond stock is rejected and writes nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_overdraining_exit_rejected_without_writes(pool: PgPool) {
    let user_id = seed_user(&pool, "drainer").await;
    let article_id = seed_article(&pool, "ART-003", 5).await;

    let err = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("exit", 8, "too much"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Domain(CoreError::InsufficientStock {
            requested: 8,
            available: 5,
        })
    ));

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_current, 5, "counter untouched after rejection");

    let movements = MovementRepo::list_by_article(&pool, article_id).await.unwrap();
    assert!(movements.is_empty(), "no ledger row after rejection");
}

// ---------------------------------------------------------------------------
// Test: Neutral movement types record history without touching stock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_neutral_movement_leaves_counter_alone(pool: PgPool) {
    let user_id = seed_user(&pool, "mover").await;
    let article_id = seed_article(&pool, "ART-004", 7).await;

    let transfer =
        ArticleRepo::record_movement(&pool, article_id, user_id, &movement("transfer", 4, "relocation"))
            .await
            .unwrap();
    assert_eq!(transfer.stock_before, 7);
    assert_eq!(transfer.stock_after, 7);

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_current, 7);

    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert!(check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_zero_quantity_entry_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "zeroer").await;
    let article_id = seed_article(&pool, "ART-005", 5).await;

    let err = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 0, "nothing"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_movement_type_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "typer").await;
    let article_id = seed_article(&pool, "ART-006", 5).await;

    let err = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("teleport", 1, "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blank_reason_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "blanker").await;
    let article_id = seed_article(&pool, "ART-007", 5).await;

    let err = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 1, "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_movement_on_missing_article(pool: PgPool) {
    let user_id = seed_user(&pool, "ghost-hunter").await;

    let err = ArticleRepo::record_movement(&pool, 999_999, user_id, &movement("entry", 1, "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Domain(CoreError::NotFound { .. })));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_movement_with_missing_actor(pool: PgPool) {
    let article_id = seed_article(&pool, "ART-008", 5).await;

    let err = ArticleRepo::record_movement(&pool, article_id, 999_999, &movement("entry", 1, "nobody"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Domain(CoreError::Reference { entity: "user", .. })
    ));

    let movements = MovementRepo::list_by_article(&pool, article_id).await.unwrap();
    assert!(movements.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Mixed sequence keeps ledger and counter reconciled
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_mixed_sequence_stays_consistent(pool: PgPool) {
    let user_id = seed_user(&pool, "sequencer").await;
    let article_id = seed_article(&pool, "ART-009", 20).await;

    let steps: &[(&str, i32)] = &[
        ("entry", 10),
        ("exit", 4),
        ("transfer", 6),
        ("exit", 11),
        ("assignment", 2),
        ("entry", 1),
        ("return", 3),
        ("maintenance", 5),
    ];
    for (movement_type, quantity) in steps {
        ArticleRepo::record_movement(
            &pool,
            article_id,
            user_id,
            &movement(movement_type, *quantity, "step"),
        )
        .await
        .unwrap();
    }

    // 20 + 10 - 4 - 11 + 1 = 16; neutral types contribute nothing.
    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_current, 16);

    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert_eq!(check.movement_sum, -4);
    assert_eq!(check.expected_stock, 16);
    assert!(check.consistent);

    let movements = MovementRepo::list_by_article(&pool, article_id).await.unwrap();
    assert_eq!(movements.len(), steps.len());
}

// ---------------------------------------------------------------------------
// Test: Concurrent exits serialize on the row lock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_exits_never_go_negative(pool: PgPool) {
    let user_id = seed_user(&pool, "racer").await;
    let article_id = seed_article(&pool, "ART-010", 10).await;

    let pool_a = pool.clone();
    let pool_b = pool.clone();
    let task_a = tokio::spawn(async move {
        ArticleRepo::record_movement(&pool_a, article_id, user_id, &movement("exit", 6, "race a")).await
    });
    let task_b = tokio::spawn(async move {
        ArticleRepo::record_movement(&pool_b, article_id, user_id, &movement("exit", 6, "race b")).await
    });

    let result_a = task_a.await.unwrap();
    let result_b = task_b.await.unwrap();

    // The row lock serializes the two exits: one wins, one is rejected.
    let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of two over-draining exits wins");

    let loser = if result_a.is_err() { result_a } else { result_b };
    assert!(matches!(
        loser.unwrap_err(),
        DbError::Domain(CoreError::InsufficientStock { .. })
    ));

    let article = ArticleRepo::find_by_id(&pool, article_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(article.stock_current, 4);

    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert!(check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Movement updates are descriptive-only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_movement_update_cannot_touch_frozen_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "editor").await;
    let article_id = seed_article(&pool, "ART-011", 10).await;

    let recorded = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 5, "initial"))
        .await
        .unwrap();

    let updated = MovementRepo::update(
        &pool,
        recorded.id,
        &UpdateMovement {
            reason: Some("corrected reason".to_string()),
            reference: Some("DN-42".to_string()),
            origin_location: None,
            destination_location: None,
            assigned_to: None,
            received_by: None,
            notes: Some("late paperwork".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.reason, "corrected reason");
    assert_eq!(updated.reference.as_deref(), Some("DN-42"));
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.movement_type, "entry");
    assert_eq!(updated.stock_before, 10);
    assert_eq!(updated.stock_after, 15);

    // The counter still reconciles after the edit.
    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert!(check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Ledger audit detects drift
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_check_ledger_detects_manual_drift(pool: PgPool) {
    let user_id = seed_user(&pool, "drifter").await;
    let article_id = seed_article(&pool, "ART-012", 10).await;

    ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 5, "ok"))
        .await
        .unwrap();

    // Corrupt the counter behind the engine's back.
    sqlx::query("UPDATE articles SET stock_current = 99 WHERE id = $1")
        .bind(article_id)
        .execute(&pool)
        .await
        .unwrap();

    let check = ArticleRepo::check_ledger(&pool, article_id).await.unwrap();
    assert_eq!(check.stock_current, 99);
    assert_eq!(check.expected_stock, 15);
    assert!(!check.consistent);
}

// ---------------------------------------------------------------------------
// Test: Ledger queries and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_ledger_query_filters(pool: PgPool) {
    let user_id = seed_user(&pool, "filterer").await;
    let article_id = seed_article(&pool, "ART-013", 50).await;
    let other_article_id = seed_article(&pool, "ART-014", 50).await;

    ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 1, "a"))
        .await
        .unwrap();
    ArticleRepo::record_movement(&pool, article_id, user_id, &movement("exit", 2, "b"))
        .await
        .unwrap();
    ArticleRepo::record_movement(&pool, other_article_id, user_id, &movement("exit", 3, "c"))
        .await
        .unwrap();

    let by_article = MovementRepo::query(
        &pool,
        &MovementQuery {
            article_id: Some(article_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_article.len(), 2);
    assert_eq!(by_article[0].article_code.as_deref(), Some("ART-013"));

    let exits = MovementRepo::query(
        &pool,
        &MovementQuery {
            movement_type: Some("exit".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(exits.len(), 2);

    let count = MovementRepo::count(
        &pool,
        &MovementQuery {
            article_id: Some(article_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(count, 2);
}

// ---------------------------------------------------------------------------
// Test: Ledger survives article deletion (loose refs)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_ledger_rows_survive_article_deletion(pool: PgPool) {
    let user_id = seed_user(&pool, "deleter").await;
    let article_id = seed_article(&pool, "ART-015", 10).await;

    let recorded = ArticleRepo::record_movement(&pool, article_id, user_id, &movement("exit", 1, "used"))
        .await
        .unwrap();

    assert!(ArticleRepo::delete(&pool, article_id).await.unwrap());

    let survivor = MovementRepo::find_by_id(&pool, recorded.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(survivor.article_id, article_id);

    // The resolved view degrades gracefully to NULL names.
    let listed = MovementRepo::query(
        &pool,
        &MovementQuery {
            article_id: Some(article_id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].article_code.is_none());
}

// ---------------------------------------------------------------------------
// Test: Article update leaves stock fields alone
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_article_update_never_touches_counter(pool: PgPool) {
    let user_id = seed_user(&pool, "renamer").await;
    let article_id = seed_article(&pool, "ART-016", 10).await;

    ArticleRepo::record_movement(&pool, article_id, user_id, &movement("entry", 2, "top-up"))
        .await
        .unwrap();

    let updated = ArticleRepo::update(
        &pool,
        article_id,
        &UpdateArticle {
            code: None,
            name: Some("Renamed".to_string()),
            description: None,
            serial_number: None,
            stock_min: Some(3),
            stock_max: Some(100),
            location: None,
            status: None,
            is_active: None,
            category_id: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.stock_min, 3);
    assert_eq!(updated.stock_current, 12);
    assert_eq!(updated.stock_initial, 10);
}
