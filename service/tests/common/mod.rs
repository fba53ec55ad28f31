use devnet_service::profile::RegisterInput;
use devnet_service::Mutation;
use entity::user;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("could not open in-memory database");
    Migrator::up(&db, None).await.expect("migration failed");
    db
}

pub async fn register(db: &DatabaseConnection, email: &str) -> user::Model {
    Mutation::register(
        db,
        RegisterInput {
            email: email.to_owned(),
            password: "secret-pass".to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            tags: None,
        },
    )
    .await
    .expect("registration failed")
    .user
}
