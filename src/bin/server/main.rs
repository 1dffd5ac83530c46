use anyhow::anyhow;
use appeloffre::core::application::{Application, ApplicationServices};
use appeloffre::core::config::Config;
use appeloffre::domain::auth::{self, AuthService, ServiceRegisterParams};
use appeloffre::domain::marketplace;
use appeloffre::inbound::http::router;
use appeloffre::outbound::db::connection::Db;
use appeloffre::outbound::db::repository::Repository;
use appeloffre::outbound::session::{SessionAdapter, SessionAdapterFactory};
use appeloffre::outbound::storage::LocalFileStorage;
use clap::{Parser, Subcommand};
use fred::clients::Pool;
use fred::interfaces::ClientLike;
use fred::prelude::ReconnectPolicy;
use std::process::exit;
use tower_sessions_redis_store::RedisStore;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type AuthServiceAlias = auth::Service<SessionAdapter, Repository, SessionAdapterFactory>;

type ApplicationAlias =
    Application<AuthServiceAlias, marketplace::Service<Repository, LocalFileStorage>>;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long)]
    config_path: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API.
    Run,
    /// Create an account that can log in.
    CreateUser {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<(), anyhow::Error> {
    let config = Config::parse(cli.config_path)?;
    if !config.is_valid() {
        return Err(anyhow!("config is not valid"));
    }

    let db = Db::connect(config.db.connection_string().as_str())
        .await
        .map_err(|e| anyhow!("could not connect to the database: {e}"))?;
    db.migrate().await?;

    let application = create_application(db, config);

    match cli.command {
        None => Ok(()),
        Some(subcommand) => match subcommand {
            Commands::Run => run_server(application).await,
            Commands::CreateUser { login, password } => {
                create_user(application, login, password).await
            }
        },
    }
}

fn create_application(db: Db, config: Config) -> ApplicationAlias {
    let repo = Repository::new(db.pool());
    let storage = LocalFileStorage::new(config.storage.web_root());
    tracing::debug!(images_dir = %storage.images_dir().display(), "storing uploads");

    let session_factory = SessionAdapterFactory::new();
    let auth_service = auth::Service::new(repo.clone(), session_factory);
    let marketplace_service = marketplace::Service::new(repo, storage);

    Application::new(config, auth_service, marketplace_service)
}

async fn create_user(app: ApplicationAlias, login: String, password: String) -> anyhow::Result<()> {
    let result = app
        .auth_service()
        .register(ServiceRegisterParams { login, password })
        .await?;

    tracing::info!(
        user_id = result.user.user_id,
        login = %result.user.login,
        "created user"
    );

    Ok(())
}

async fn run_server(app: ApplicationAlias) -> anyhow::Result<()> {
    tracing::debug!("creating session store.");
    let session_store = new_session_store(app.config())
        .await
        .map_err(|_| anyhow!("failed to create redis session store"))?;
    tracing::debug!("created session store.");

    let listen_address = app.config().listen_address().to_string();
    let router = router(app, session_store);

    let listener = tokio::net::TcpListener::bind(listen_address.as_str())
        .await
        .map_err(|_| anyhow!("server failed to bind {listen_address}"))?;

    tracing::debug!(
        "listening on {}",
        listener
            .local_addr()
            .map_err(|_| anyhow!("failed to get local_addr"))?
    );

    axum::serve(listener, router)
        .await
        .map_err(|_| anyhow!("failed to start server"))
}

async fn new_session_store(config: Config) -> Result<RedisStore<Pool>, anyhow::Error> {
    let config: fred::types::config::Config = config
        .redis
        .try_into()
        .map_err(|_| anyhow!("failed to parse redis session store connection url"))?;

    let pool = Pool::new(
        config,
        None,
        None,
        Some(ReconnectPolicy::new_constant(0, 5_000)),
        10,
    )?;
    let redis_connection = pool.connect();
    tokio::spawn(redis_connection);
    pool.wait_for_connect().await.map_err(|e| {
        error!("redis session store unavailable: {:?}", e);
        anyhow!("redis session store unavailable")
    })?;

    Ok(RedisStore::new(pool))
}
