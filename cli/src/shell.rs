//! Interactive loop over the app store.

use anyhow::Result;
use moodeats_core::view::{DETAIL_FAILED, DETAIL_NOT_FOUND};
use moodeats_core::{App, DetailContent, Loadable, Mood, Route, Toggled};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

const HELP: &str = "\
Commands:
  mood <name>        browse picks for a mood (happy, stressed, tired, adventurous, comfort, romantic)
  category <name>    browse one category
  all                clear the category filter
  open <n|id>        open a recipe by card number or id
  go <path>          go to a route: /, /recipe/<id> or /favorites
  fav [n|id]         toggle a favorite (the open recipe if no argument)
  favorites          show saved favorites
  home               back to browsing
  back, forward      move through history
  retry              reload the current screen
  moods              list moods
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mood(Mood),
    Category(String),
    All,
    Open(String),
    Go(Route),
    Favorite(Option<String>),
    Favorites,
    Home,
    Back,
    Forward,
    Retry,
    Moods,
    Help,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arg = || {
        if rest.is_empty() {
            Err(format!("`{}` needs an argument", name))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "mood" => Command::Mood(arg()?.parse::<Mood>().map_err(|e| e.to_string())?),
        "category" | "cat" => Command::Category(arg()?),
        "all" => Command::All,
        "open" => Command::Open(arg()?),
        "go" => {
            let path = arg()?;
            Command::Go(Route::parse(&path).ok_or_else(|| format!("Unknown path: {}", path))?)
        }
        "fav" => Command::Favorite((!rest.is_empty()).then(|| rest.to_string())),
        "favorites" | "favs" => Command::Favorites,
        "home" => Command::Home,
        "back" => Command::Back,
        "forward" => Command::Forward,
        "retry" => Command::Retry,
        "moods" => Command::Moods,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {} (try `help`)", other)),
    };
    Ok(Some(command))
}

/// Map a card number on the current screen to a recipe id; anything else is taken as an id.
fn resolve_target(app: &App, target: &str) -> String {
    let listed: Vec<&str> = match app.route() {
        Route::Home => app
            .browse()
            .state()
            .loaded()
            .map(|content| content.results.recipes.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default(),
        Route::Favorites => app.favorites().all().iter().map(|r| r.id.as_str()).collect(),
        Route::Recipe(_) => Vec::new(),
    };
    target
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=listed.len()).contains(n))
        .map(|n| listed[n - 1].to_string())
        .unwrap_or_else(|| target.to_string())
}

async fn toggle_favorite(app: &mut App, target: Option<String>) -> String {
    let id = match target {
        Some(target) => resolve_target(app, &target),
        None => match app.detail().state() {
            Loadable::Loaded(DetailContent::Found(recipe))
                if matches!(app.route(), Route::Recipe(_)) =>
            {
                recipe.id.clone()
            }
            _ => return "Open a recipe first, or name one: fav <n|id>".to_string(),
        },
    };

    // Fetched directly so the detail screen keeps matching the current route
    let known = app.find_recipe(&id).cloned();
    let recipe = match known {
        Some(recipe) => recipe,
        None => match app.catalog().get_detail(&id).await {
            Ok(Some(recipe)) => recipe,
            Ok(None) => return DETAIL_NOT_FOUND.to_string(),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "recipe failed to load");
                return DETAIL_FAILED.to_string();
            }
        },
    };

    match app.toggle_favorite(&recipe) {
        Toggled::Added => format!("Added {} to favorites", recipe.name),
        Toggled::Removed => format!("Removed {} from favorites", recipe.name),
    }
}

/// Apply a command. Returns text to print, or `None` to show the current screen.
async fn execute(app: &mut App, command: Command) -> Option<String> {
    match command {
        Command::Mood(mood) => {
            app.go_home().await;
            let request = app.select_mood(mood);
            app.complete_browse(request).await;
        }
        Command::Category(category) => {
            app.go_home().await;
            let request = app.select_category(Some(category));
            app.complete_browse(request).await;
        }
        Command::All => {
            app.go_home().await;
            let request = app.select_category(None);
            app.complete_browse(request).await;
        }
        Command::Open(target) => {
            let id = resolve_target(app, &target);
            app.open_recipe(&id).await;
        }
        Command::Go(Route::Home) => app.go_home().await,
        Command::Go(Route::Recipe(id)) => app.open_recipe(&id).await,
        Command::Go(Route::Favorites) => app.show_favorites(),
        Command::Favorite(target) => return Some(toggle_favorite(app, target).await),
        Command::Favorites => app.show_favorites(),
        Command::Home => app.go_home().await,
        Command::Back => {
            if !app.back().await {
                return Some("Nothing to go back to".to_string());
            }
        }
        Command::Forward => {
            if !app.forward().await {
                return Some("Nothing to go forward to".to_string());
            }
        }
        Command::Retry => app.retry().await,
        Command::Moods => return Some(render::render_moods(Some(app.mood()))),
        Command::Help => return Some(HELP.to_string()),
        Command::Quit => {}
    }
    None
}

fn prompt(app: &App) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\nmoodeats {}> ", app.route())?;
    stdout.flush()?;
    Ok(())
}

pub async fn run(app: &mut App) -> Result<()> {
    app.load_categories().await;
    app.go_home().await;
    println!("{}", render::render_current(app));
    println!("\nType `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(app)?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match execute(app, command).await {
            Some(output) => println!("{}", output),
            None => println!("{}", render::render_current(app)),
        }
    }
    Ok(())
}
