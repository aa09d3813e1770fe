//! `trivia` - run the trivia service.
//!
//! Usage:
//!   trivia serve --config trivia.toml --listen 0.0.0.0:5000
//!   trivia init --database trivia.db
//!   trivia request GET '/questions?page=2'
//!   trivia request POST /quizzes --body '{"previous_questions":[],"quiz_category":{"id":0}}'

use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use trivia_api::{App, Config, Method, Request, log};
use trivia_core::{MemoryStore, RecordStore};
use trivia_sql::SqliteStore;
use trivia_sql::schema::SEED_CATEGORIES;

#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(about = "Trivia question service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Address to bind, overrides `listen`
        #[arg(short, long, env = "TRIVIA_LISTEN")]
        listen: Option<SocketAddr>,
    },
    /// Create the schema and seed the default categories
    Init {
        #[command(flatten)]
        store: StoreArgs,

        /// Leave the categories table empty
        #[arg(long)]
        no_seed: bool,
    },
    /// Answer one request in process and print the response
    Request {
        #[command(flatten)]
        store: StoreArgs,

        /// HTTP method
        method: String,

        /// Path with optional query string
        path: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// TOML config file
    #[arg(short, long, env = "TRIVIA_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file, overrides `database`
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Keep everything in memory instead of SQLite
    #[arg(long, conflicts_with = "database")]
    memory: bool,
}

impl StoreArgs {
    fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        config.apply_env()?;
        if let Some(database) = &self.database {
            config.database.clone_from(database);
        }
        Ok(config)
    }

    fn open(&self, config: &Config) -> Result<Arc<dyn RecordStore>> {
        if self.memory {
            log!(info, "opening store", store: "memory");
            let store = if config.seed {
                MemoryStore::with_categories(SEED_CATEGORIES)
            } else {
                MemoryStore::new()
            };
            return Ok(Arc::new(store));
        }
        log!(info, "opening store", store: "sqlite", path: config.database.display());
        let store = SqliteStore::open(&config.database)
            .with_context(|| format!("opening {}", config.database.display()))?;
        store.init(config.seed).context("initializing schema")?;
        Ok(Arc::new(store))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { store, listen } => {
            let mut config = store.config()?;
            if let Some(listen) = listen {
                config.listen = listen;
            }
            config.validate()?;
            serve(&config, store.open(&config)?)
        },
        Command::Init { store, no_seed } => {
            let mut config = store.config()?;
            config.seed = config.seed && !no_seed;
            config.validate()?;
            if store.memory {
                bail!("init needs a database file");
            }
            store.open(&config)?;
            log!(info, "database ready", path: config.database.display(), seeded: config.seed);
            Ok(())
        },
        Command::Request {
            store,
            method,
            path,
            body,
        } => {
            let config = store.config()?;
            config.validate()?;
            let Some(method) = Method::parse(&method) else {
                bail!("unknown method {method:?}");
            };
            let app = App::new(store.open(&config)?).with_page_size(config.page_size);
            let headers = if body.is_some() {
                vec![("Content-Type".to_string(), "application/json".to_string())]
            } else {
                Vec::new()
            };
            let resp = app.handle(Request::new(method, path, headers, body.map(String::into_bytes)));
            println!("{}", resp.status());
            println!("{}", resp.text().unwrap_or_default());
            Ok(())
        },
    }
}

fn serve(config: &Config, store: Arc<dyn RecordStore>) -> Result<()> {
    let app = Arc::new(App::new(store).with_page_size(config.page_size));
    let listener = TcpListener::bind(config.listen)
        .with_context(|| format!("binding {}", config.listen))?;
    listener.set_nonblocking(true)?;

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async {
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            log!(info, "shutting down");
        };
        trivia_api::server::serve(app, listener, config.max_body_size, shutdown).await
    })?;
    Ok(())
}
