//! CrudService against a real database, without the HTTP layer.

use std::collections::HashMap;

use holocron::metrics::NoopMetrics;
use holocron::{apply_migrations, CrudService, ListQuery, PEOPLE, PLANETS};
use serde_json::{json, Value};
use sqlx::PgPool;

fn body(v: Value) -> HashMap<String, Value> {
    v.as_object().unwrap().clone().into_iter().collect()
}

#[sqlx::test(migrations = false)]
async fn migrations_are_idempotent(pool: PgPool) {
    apply_migrations(&pool).await.unwrap();
    apply_migrations(&pool).await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn create_read_update_delete(pool: PgPool) {
    apply_migrations(&pool).await.unwrap();

    let created = CrudService::create(&pool, &PLANETS, &body(json!({"name": "Dagobah", "climate": "murky"})))
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();
    assert!(created["updated_at"].is_null());

    let read = CrudService::read(&pool, &PLANETS, id).await.unwrap().unwrap();
    assert_eq!(read, created);

    let updated = CrudService::update(&pool, &PLANETS, id, &body(json!({"terrain": "swamp"})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["terrain"], "swamp");
    assert_eq!(updated["climate"], "murky");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(updated["updated_at"].is_string());

    assert!(CrudService::delete(&pool, &PLANETS, id).await.unwrap());
    assert!(!CrudService::delete(&pool, &PLANETS, id).await.unwrap());
    assert!(CrudService::read(&pool, &PLANETS, id).await.unwrap().is_none());
    assert!(CrudService::update(&pool, &PLANETS, id, &HashMap::new()).await.unwrap().is_none());
}

#[sqlx::test(migrations = false)]
async fn search_pages_stay_within_size(pool: PgPool) {
    apply_migrations(&pool).await.unwrap();
    for i in 0..7 {
        CrudService::create(&pool, &PEOPLE, &body(json!({"name": format!("Ewok {i}")})))
            .await
            .unwrap();
    }

    for size in 1..=8u32 {
        let query = ListQuery {
            size,
            ..ListQuery::default()
        };
        let page = CrudService::search(&pool, &PEOPLE, &query, &NoopMetrics).await.unwrap();
        assert!(page.items.len() <= size as usize);
        assert_eq!(page.total, 7);
        assert_eq!(page.pages, 7u64.div_ceil(size as u64));
        assert_eq!(page.has_next, page.pages > 1);
        assert!(!page.has_prev);
    }
}
