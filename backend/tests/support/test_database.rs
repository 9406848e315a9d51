//! A freshly migrated database on its own embedded cluster.

use std::future::Future;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use quest_backend::domain::ports::{QuestRepository, UserRepository};
use quest_backend::domain::{NewUser, Quest, QuestDraft, QuestFields, User, Username};
use quest_backend::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselQuestRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::{format_postgres_error, handle_cluster_setup_failure, pg_embed};

/// Database handle plus the runtime that drives its pool.
///
/// Fields drop in order: the pool closes before its runtime, and the
/// cluster stops last.
pub struct TestDatabase {
    pub pool: DbPool,
    pub database_url: String,
    runtime: Runtime,
    _cluster: TestCluster,
}

impl TestDatabase {
    /// Start a cluster and migrate a new database, or skip when
    /// `SKIP_TEST_CLUSTER` allows it.
    pub fn start() -> Option<Self> {
        match Self::try_start() {
            Ok(db) => Some(db),
            Err(reason) => handle_cluster_setup_failure(reason),
        }
    }

    fn try_start() -> Result<Self, String> {
        let cluster = pg_embed::test_cluster()?;
        let name = format!("quests_{}", Uuid::new_v4().simple());

        let admin_url = cluster.connection().database_url("postgres");
        let mut admin = Client::connect(&admin_url, NoTls)
            .map_err(|err| format_postgres_error(&err))?;
        admin
            .batch_execute(&format!("CREATE DATABASE \"{name}\""))
            .map_err(|err| format_postgres_error(&err))?;
        drop(admin);

        let database_url = cluster.connection().database_url(&name);
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        runtime
            .block_on(run_migrations(&database_url))
            .map_err(|err| err.to_string())?;
        let pool = runtime
            .block_on(DbPool::new(
                PoolConfig::new(database_url.as_str())
                    .with_max_size(8)
                    .with_min_idle(Some(1)),
            ))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            database_url,
            runtime,
            _cluster: cluster,
        })
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn quests(&self) -> DieselQuestRepository {
        DieselQuestRepository::new(self.pool.clone())
    }

    pub fn bookings(&self) -> DieselBookingRepository {
        DieselBookingRepository::new(self.pool.clone())
    }

    pub fn users(&self) -> DieselUserRepository {
        DieselUserRepository::new(self.pool.clone())
    }

    /// Insert a plain customer with a placeholder digest.
    pub fn seed_user(&self, username: &str) -> User {
        let user = NewUser {
            username: Username::new(username).expect("valid username"),
            email: None,
            password_hash: "not-a-real-digest".to_owned(),
            is_admin: false,
        };
        self.block_on(self.users().insert(&user))
            .expect("insert user")
    }

    /// Insert a quest carrying `genres`.
    pub fn seed_quest(&self, title: &str, genres: &[&str]) -> Quest {
        self.seed_quest_with(QuestFields {
            title: title.to_owned(),
            genres: genres.iter().map(|&genre| genre.to_owned()).collect(),
            ..default_fields()
        })
    }

    pub fn seed_quest_with(&self, fields: QuestFields) -> Quest {
        let draft = QuestDraft::try_from(fields).expect("valid quest");
        self.block_on(self.quests().insert(&draft, None))
            .expect("insert quest")
    }
}

/// Attributes of a middling quest.
pub fn default_fields() -> QuestFields {
    QuestFields {
        title: "Untitled".to_owned(),
        description: String::new(),
        genres: vec!["mystic".to_owned()],
        difficulty: "medium".to_owned(),
        fear_level: 2,
        players: 4,
        price: 2000,
        organizer_email: None,
    }
}
