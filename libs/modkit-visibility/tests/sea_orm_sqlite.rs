#![allow(clippy::unwrap_used, clippy::expect_used)]
#![cfg(feature = "sqlite")]

//! `SQLite` integration tests for visibility scopes rendered through `SeaORM`.
//!
//! Scopes are backed by a metadata table, the way hosts usually tag rows as
//! imported or test data.

use modkit_visibility::sea::{IdSet, VisibleEntity, VisibleSelectExt};
use modkit_visibility::{
    HasScopedVisibility, Mode, ScopeRegistry, VisibilityConfig, VisibilityPolicy, params,
};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QuerySelect, QueryTrait, Schema, Set,
};

mod article {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "articles")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub title: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod metadata {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "article_metadata")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub article_id: i64,
        pub key: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

fn tagged(key: &'static str) -> IdSet {
    IdSet::subquery(
        metadata::Entity::find()
            .select_only()
            .column(metadata::Column::ArticleId)
            .filter(metadata::Column::Key.eq(key))
            .into_query(),
    )
}

impl HasScopedVisibility for article::Entity {
    type Filter = IdSet;

    fn scoped_flags() -> ScopeRegistry<IdSet> {
        ScopeRegistry::new()
            .scope("imported", || tagged("imported"))
            .scope("test_data", || IdSet::values([3_i64]))
    }
}

impl VisibleEntity for article::Entity {
    fn visibility_col() -> Self::Column {
        article::Column::Id
    }
}

async fn setup() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("db connect");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(article::Entity)))
        .await
        .expect("create articles");
    db.execute(backend.build(&schema.create_table_from_entity(metadata::Entity)))
        .await
        .expect("create metadata");

    let articles = (1..=5).map(|id| article::ActiveModel {
        id: Set(id),
        title: Set(format!("article {id}")),
    });
    article::Entity::insert_many(articles)
        .exec(&db)
        .await
        .expect("insert articles");

    let tags = [1_i64, 2].into_iter().map(|article_id| metadata::ActiveModel {
        article_id: Set(article_id),
        key: Set("imported".to_owned()),
        ..Default::default()
    });
    metadata::Entity::insert_many(tags)
        .exec(&db)
        .await
        .expect("insert metadata");

    db
}

async fn visible_ids(db: &DatabaseConnection, policy: &VisibilityPolicy) -> Vec<i64> {
    let mut ids: Vec<i64> = article::Entity::find()
        .visible(policy)
        .all(db)
        .await
        .expect("select")
        .into_iter()
        .map(|m| m.id)
        .collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn defaults_hide_imported_and_test_data() {
    let db = setup().await;
    assert_eq!(visible_ids(&db, &VisibilityPolicy::defaults()).await, vec![4, 5]);
}

#[tokio::test]
async fn with_imported_shows_imported_rows() {
    let db = setup().await;
    let policy = VisibilityPolicy::defaults().set("imported", Mode::With);
    assert_eq!(visible_ids(&db, &policy).await, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn only_imported_restricts_to_imported_rows() {
    let db = setup().await;
    let policy = VisibilityPolicy::defaults().set("imported", Mode::Only);
    assert_eq!(visible_ids(&db, &policy).await, vec![1, 2]);
}

#[tokio::test]
async fn without_test_data_keeps_it_hidden() {
    let db = setup().await;
    let policy = VisibilityPolicy::defaults()
        .set("imported", Mode::With)
        .set("test_data", Mode::Without);
    assert_eq!(visible_ids(&db, &policy).await, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn query_parameters_drive_the_select() {
    let db = setup().await;
    let config = VisibilityConfig::default();
    let input = params::parse_query(
        "visibility[test_data]=only&visibility[bogus]=with",
        &config,
    );
    let policy = VisibilityPolicy::for_entity::<article::Entity>(&input, &config);
    assert_eq!(visible_ids(&db, &policy).await, vec![3]);
}

#[tokio::test]
async fn scoped_select_counts_and_fetches() {
    let db = setup().await;
    let policy = VisibilityPolicy::defaults().set("imported", Mode::Only);

    let count = article::Entity::find()
        .scoped()
        .with_policy(&policy)
        .count(&db)
        .await
        .expect("count");
    assert_eq!(count, 2);

    let first = article::Entity::find()
        .scoped()
        .with_policy(&policy)
        .filter(sea_orm::Condition::all().add(article::Column::Id.eq(2_i64)))
        .one(&db)
        .await
        .expect("one");
    assert_eq!(first.map(|m| m.title), Some("article 2".to_owned()));
}
