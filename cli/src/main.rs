mod render;
mod shell;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use moodeats_core::{App, AppConfig, DetailContent, Loadable, Mood, Toggled};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "moodeats")]
#[command(about = "Find recipes that match your mood", long_about = None)]
struct Cli {
    /// Catalog base URL (overrides MOODEATS_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Directory for saved favorites (overrides MOODEATS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available moods
    Moods,
    /// List catalog categories
    Categories,
    /// Show recipes for a mood or category
    Browse {
        /// Mood to pick a category from
        #[arg(long, default_value = "happy")]
        mood: Mood,
        /// Explicit category; overrides the mood
        #[arg(long)]
        category: Option<String>,
        /// Seed for the mood category pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show one recipe
    Recipe {
        /// Recipe id (e.g. 52772)
        id: String,
    },
    /// Show saved favorites
    Favorites,
    /// Add or remove a recipe from favorites
    Favorite {
        /// Recipe id
        id: String,
    },
    /// Interactive browser
    Shell,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env().context("Invalid MOODEATS_* environment")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "starting");

    let mut app = App::from_config(&config).context("Failed to create catalog client")?;

    match cli.command {
        Commands::Moods => {
            println!("{}", render::render_moods(None));
        }
        Commands::Categories => {
            let categories = app.load_categories().await;
            if categories.is_empty() {
                println!("No categories available.");
            } else {
                for category in categories {
                    println!("{}", category);
                }
            }
        }
        Commands::Browse {
            mood,
            category,
            seed,
        } => {
            if let Some(seed) = seed {
                app = app.with_seed(seed);
            }
            app.load_categories().await;
            let mut request = app.select_mood(mood);
            if category.is_some() {
                request = app.select_category(category);
            }
            app.complete_browse(request).await;
            println!("{}", render::render_browse(&app));
        }
        Commands::Recipe { id } => {
            app.open_recipe(&id).await;
            println!("{}", render::render_detail(&app));
        }
        Commands::Favorites => {
            println!("{}", render::render_favorites(app.favorites()));
        }
        Commands::Favorite { id } => {
            toggle_favorite(&mut app, &id).await?;
        }
        Commands::Shell => {
            shell::run(&mut app).await?;
        }
    }

    Ok(())
}

async fn toggle_favorite(app: &mut App, id: &str) -> Result<()> {
    // Saved favorites can be removed without asking the catalog
    let recipe = match app.favorites().get(id).cloned() {
        Some(recipe) => recipe,
        None => {
            app.open_recipe(id).await;
            match app.detail().state() {
                Loadable::Loaded(DetailContent::Found(recipe)) => recipe.clone(),
                _ => anyhow::bail!("{}", render::render_detail(app)),
            }
        }
    };

    match app.toggle_favorite(&recipe) {
        Toggled::Added => println!("Added {} to favorites", recipe.name),
        Toggled::Removed => println!("Removed {} from favorites", recipe.name),
    }
    Ok(())
}
