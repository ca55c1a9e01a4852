//! Recipes Gateway command line.
//!
//! `serve` runs the REST gateway; the other commands drive the client view-models
//! against a running gateway.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipes_gateway::actions::Store;
use recipes_gateway::api::rebuild_search_index;
use recipes_gateway::client::ApiClient;
use recipes_gateway::config::Config;
use recipes_gateway::db::{self, Repository};
use recipes_gateway::menu::ENTITIES_MENU;
use recipes_gateway::models::{blob, EntityKind, Ingredient, Recipe, Step, Technique};
use recipes_gateway::search::SearchIndex;
use recipes_gateway::store::Slice;
use recipes_gateway::views::{
    DeleteDialog, DetailView, EntityForm, Fields, IngredientForm, ListView, RecipeForm, StepForm,
    TechniqueForm, UpdateView,
};
use recipes_gateway::{create_router, AppState};

#[derive(Parser)]
#[command(name = "recipes-gateway")]
#[command(about = "Recipes gateway server and client", long_about = None)]
struct Cli {
    /// Gateway URL for client commands (default: GATEWAY_API_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST gateway
    Serve,
    /// List entities, optionally filtered by a full-text search
    List {
        entity: EntityKind,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one entity
    Show { entity: EntityKind, id: i64 },
    /// Create an entity from field=value pairs
    Create {
        entity: EntityKind,
        #[arg(short = 'f', long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
        /// Image file for the recipe picture
        #[arg(long)]
        picture: Option<PathBuf>,
    },
    /// Edit an entity with field=value pairs
    Edit {
        entity: EntityKind,
        id: i64,
        #[arg(short = 'f', long = "field", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
        /// Image file for the recipe picture
        #[arg(long)]
        picture: Option<PathBuf>,
    },
    /// Delete an entity
    Delete { entity: EntityKind, id: i64 },
    /// Print the entities menu
    Menu,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected field=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid GATEWAY_BIND_ADDR")?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = cli.server.unwrap_or_else(|| config.api_url.clone());
    let mut store = Store::new(ApiClient::new(base_url).with_token(config.api_token.clone()));

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::List { entity, search } => match entity {
            EntityKind::Ingredient => list::<Ingredient>(&mut store, search).await,
            EntityKind::Recipe => list::<Recipe>(&mut store, search).await,
            EntityKind::Step => list::<Step>(&mut store, search).await,
            EntityKind::Technique => list::<Technique>(&mut store, search).await,
        },
        Commands::Show { entity, id } => match entity {
            EntityKind::Ingredient => show::<Ingredient>(&mut store, id).await,
            EntityKind::Recipe => show::<Recipe>(&mut store, id).await,
            EntityKind::Step => show::<Step>(&mut store, id).await,
            EntityKind::Technique => show::<Technique>(&mut store, id).await,
        },
        Commands::Create {
            entity,
            fields,
            picture,
        } => save_any(&mut store, entity, None, &fields, picture).await,
        Commands::Edit {
            entity,
            id,
            fields,
            picture,
        } => save_any(&mut store, entity, Some(id), &fields, picture).await,
        Commands::Delete { entity, id } => match entity {
            EntityKind::Ingredient => delete::<Ingredient>(&mut store, id).await,
            EntityKind::Recipe => delete::<Recipe>(&mut store, id).await,
            EntityKind::Step => delete::<Step>(&mut store, id).await,
            EntityKind::Technique => delete::<Technique>(&mut store, id).await,
        },
        Commands::Menu => {
            for item in ENTITIES_MENU {
                println!("[{}] {:<12} {}", item.icon, item.label, item.route());
            }
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    tracing::info!("Starting Recipes Gateway");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Index path: {:?}", config.index_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let pool = db::init_database(&config.db_path)
        .await
        .context("Failed to open database")?;
    let repo = Arc::new(Repository::new(pool));
    let search = Arc::new(SearchIndex::open(&config.index_path)?);

    let state = AppState {
        repo,
        search,
        config: Arc::new(config.clone()),
    };

    tracing::info!("Building search index...");
    let count = rebuild_search_index(&state).await?;
    tracing::info!("Search index built with {} documents", count);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn print_fields<E: Fields>(entity: &E) {
    for field in entity.fields() {
        println!("{:<14} {}", field.label, field.value);
    }
}

async fn list<E: Slice + Fields>(store: &mut Store, search: Option<String>) -> Result<()> {
    let mut view = ListView::<E>::new();
    view.mount(store).await?;
    if let Some(query) = search {
        view.set_search(query);
        view.search(store).await?;
    }

    if view.show_not_found(store) {
        println!("No {} found", E::KIND.title_plural());
        return Ok(());
    }
    for entity in view.rows(store) {
        let summary: Vec<String> = entity
            .fields()
            .into_iter()
            .map(|f| f.value.to_string())
            .collect();
        println!("{}", summary.join(" | "));
    }
    Ok(())
}

async fn show<E: Slice + Fields>(store: &mut Store, id: i64) -> Result<()> {
    let mut view = DetailView::<E>::new(id);
    view.mount(store).await?;
    print_fields(view.entity(store));
    Ok(())
}

async fn save_any(
    store: &mut Store,
    kind: EntityKind,
    id: Option<i64>,
    fields: &[(String, String)],
    picture: Option<PathBuf>,
) -> Result<()> {
    match kind {
        EntityKind::Ingredient => save::<IngredientForm>(store, id, fields, picture).await,
        EntityKind::Recipe => save::<RecipeForm>(store, id, fields, picture).await,
        EntityKind::Step => save::<StepForm>(store, id, fields, picture).await,
        EntityKind::Technique => save::<TechniqueForm>(store, id, fields, picture).await,
    }
}

async fn save<F>(
    store: &mut Store,
    id: Option<i64>,
    fields: &[(String, String)],
    picture: Option<PathBuf>,
) -> Result<()>
where
    F: EntityForm,
    F::Entity: Fields,
{
    let mut view = UpdateView::<F>::new(id);
    view.mount(store).await?;

    for (field, value) in fields {
        view.set(field, value)?;
    }
    if let Some(path) = picture {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        view.form_mut()
            .stage_blob("picture", &bytes, blob::content_type_for(&path))?;
    }

    let saved = view.submit(store).await?;
    print_fields(&saved);

    match view.poll_navigation(store) {
        Some(route) => {
            tracing::debug!("Navigating to {}", route);
            Ok(())
        }
        None => bail!("Save did not complete"),
    }
}

async fn delete<E: Slice>(store: &mut Store, id: i64) -> Result<()> {
    let mut dialog = DeleteDialog::<E>::new(id);
    dialog.mount(store).await?;
    dialog.confirm(store).await?;
    println!("Deleted {} {}", E::KIND, id);
    Ok(())
}
