//! CtrlLog CLI - Browse the game catalog and log games from the terminal

mod config;
mod output;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use ctrllog_core::catalog::sample_recommendations;
use ctrllog_core::diary::{LogEntryDraft, PlayStatus, TagList, PLATFORMS};
use ctrllog_core::discover::year_options;
use ctrllog_core::rating::star_fills;
use ctrllog_core::{
    Catalog, DiscoverFilters, DiscoverPage, DiscoverTab, GameDetail, Genre, RatingDirection,
    Session, SignInIdentifier, UserProfile,
};

use config::CliConfig;
use output::{render_stars, write_csv, write_detail, write_json, write_table, OutputFormat};

#[derive(Parser)]
#[command(name = "ctrllog-cli")]
#[command(author, version, about = "CtrlLog game discovery CLI", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the OS config directory)
    #[arg(long, global = true, env = "CTRLLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the game catalog
    Discover {
        /// Genre to include (repeatable, e.g. --genre rpg --genre action)
        #[arg(short, long = "genre")]
        genres: Vec<Genre>,

        /// Earliest release year
        #[arg(long)]
        from: Option<i32>,

        /// Latest release year
        #[arg(long)]
        to: Option<i32>,

        /// Rating threshold in half stars (0 = any rating)
        #[arg(short, long)]
        rating: Option<f64>,

        /// Whether --rating is a minimum or a maximum
        #[arg(long, default_value = "at-least")]
        direction: RatingDirection,

        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,

        /// Tab ordering: latest, best-reviewed or by-genre
        #[arg(short, long)]
        tab: Option<DiscoverTab>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// JSON catalog to browse instead of the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Browse as this signed-in user (email or username)
        #[arg(long, env = "CTRLLOG_USER")]
        user: Option<String>,
    },

    /// Show a game's page: ratings, player stats, reviews and similar games
    Game {
        /// Catalog id of the game
        id: u32,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,

        /// JSON catalog to read instead of the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the genres offered by the catalog
    Genres {
        /// JSON catalog to read instead of the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List the years offered by the year pickers
    Years,

    /// Show how a rating renders as partial stars
    Stars {
        /// Rating between 0 and 5
        rating: f64,
    },

    /// Log a game to your diary
    Log {
        /// Game title
        #[arg(long)]
        title: String,

        /// Platform (see --list-platforms)
        #[arg(short, long)]
        platform: Option<String>,

        /// completed, playing, dropped or want_to_play
        #[arg(long)]
        status: Option<PlayStatus>,

        /// Date you started playing (YYYY-MM-DD)
        #[arg(long)]
        started: Option<NaiveDate>,

        /// Date you finished (YYYY-MM-DD)
        #[arg(long)]
        finished: Option<NaiveDate>,

        /// Hours played, in half-hour steps
        #[arg(long)]
        hours: Option<f64>,

        /// Your rating in half stars (0 = unrated)
        #[arg(short, long, default_value = "0")]
        rating: f64,

        /// Review text
        #[arg(long)]
        review: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,

        /// List the known platforms and exit
        #[arg(long)]
        list_platforms: bool,
    },

    /// Validate a JSON catalog file
    Check {
        /// Catalog file to validate
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref())?)
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Discover {
            genres,
            from,
            to,
            rating,
            direction,
            search,
            tab,
            format,
            catalog,
            user,
        } => {
            let mut filters = DiscoverFilters::new();
            if !genres.is_empty() {
                filters.set_genres(genres);
            }
            match (from, to) {
                (Some(from), Some(to)) => filters.set_year_range(from, to),
                (Some(from), None) => filters.set_year_from(from),
                (None, Some(to)) => filters.set_year_to(to),
                (None, None) => {}
            }
            if let Some(rating) = rating {
                filters.set_rating(rating);
            }
            filters.set_direction(direction);
            if let Some(search) = search {
                filters.set_search(search);
            }

            let tab = tab.or(config.default_tab).unwrap_or_default();
            let user = user.or_else(|| config.username.clone());
            cmd_discover(&config, catalog.as_deref(), &filters, tab, user, format)?;
        }
        Commands::Game { id, json, catalog } => {
            cmd_game(&config, catalog.as_deref(), id, json)?;
        }
        Commands::Genres { catalog } => {
            cmd_genres(&config, catalog.as_deref())?;
        }
        Commands::Years => {
            cmd_years(&config);
        }
        Commands::Stars { rating } => {
            cmd_stars(rating);
        }
        Commands::Log {
            title,
            platform,
            status,
            started,
            finished,
            hours,
            rating,
            review,
            tags,
            json,
            list_platforms,
        } => {
            if list_platforms {
                for platform in PLATFORMS {
                    println!("{}", platform);
                }
                return Ok(());
            }

            let draft = LogEntryDraft {
                game_title: title,
                platform,
                status,
                start_date: started,
                finish_date: finished,
                hours_played: hours,
                rating,
                review: review.unwrap_or_default(),
                tags: tags.iter().collect::<TagList>(),
            };
            cmd_log(draft, json)?;
        }
        Commands::Check { path } => {
            cmd_check(&path)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` when set, otherwise info for the ctrllog crates.
/// `--verbose` raises the ctrllog crates to debug on top of either.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { "info" };
    let defaults = format!("ctrllog_core={level},ctrllog_cli={level}");

    let mut filter = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(&defaults));
    if verbose {
        for directive in defaults.split(',') {
            filter = filter.add_directive(directive.parse()?);
        }
    }
    Ok(filter)
}

fn session_for(user: Option<String>) -> Session {
    match user.as_deref().map(SignInIdentifier::parse) {
        Some(Ok(identifier)) => Session::signed_in(UserProfile::from(identifier)),
        Some(Err(_)) | None => Session::Anonymous,
    }
}

fn cmd_discover(
    config: &CliConfig,
    catalog_path: Option<&Path>,
    filters: &DiscoverFilters,
    tab: DiscoverTab,
    user: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = config.load_catalog(catalog_path)?;
    let session = session_for(user);
    let recommendations = sample_recommendations();

    let page = DiscoverPage::build(&catalog, &recommendations, &session, filters, tab);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => write_table(&mut out, &page, filters, catalog.genres())?,
        OutputFormat::Json => write_json(&mut out, &page)?,
        OutputFormat::Csv => write_csv(&mut out, &page.results)?,
    }
    Ok(())
}

fn cmd_game(config: &CliConfig, catalog_path: Option<&Path>, id: u32, json: bool) -> Result<()> {
    let catalog = config.load_catalog(catalog_path)?;
    let Some(detail) = GameDetail::lookup(&catalog, id) else {
        bail!("No game with id {} in the catalog", id);
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &detail)
    } else {
        write_detail(&mut out, &detail)
    }
}

fn cmd_genres(config: &CliConfig, catalog_path: Option<&Path>) -> Result<()> {
    let catalog = config.load_catalog(catalog_path)?;

    println!("Genres:");
    for genre in catalog.genres() {
        println!(
            "  {:<12} {:<12} {:>4}",
            genre.display_name,
            format!("({})", genre.id.id()),
            genre.member_count
        );
    }
    Ok(())
}

fn cmd_years(config: &CliConfig) {
    let years: Vec<String> = year_options(config.current_year())
        .iter()
        .map(|y| y.to_string())
        .collect();
    println!("{}", years.join(" "));
}

fn cmd_stars(rating: f64) {
    println!("{} {}", render_stars(rating), rating);
    for (i, fill) in star_fills(rating).iter().enumerate() {
        println!("  Star {}: {:>3.0}%", i + 1, fill * 100.0);
    }
}

fn cmd_log(draft: LogEntryDraft, json: bool) -> Result<()> {
    let entry = draft.submit().context("Failed to log game")?;
    tracing::info!(title = %entry.game_title, status = %entry.status, "Logged game");

    if json {
        let stdout = io::stdout();
        write_json(&mut stdout.lock(), &entry)?;
        return Ok(());
    }

    println!("Game logged successfully!");
    println!("{}", entry.confirmation());
    println!("  Platform: {}", entry.platform);
    println!("  Status:   {}", entry.status);
    if let Some(rating) = entry.rating {
        println!("  Rating:   {} {}", render_stars(rating), rating);
    }
    if let Some(hours) = entry.hours_played {
        println!("  Hours:    {}", hours);
    }
    if !entry.tags.is_empty() {
        println!("  Tags:     {}", entry.tags.as_slice().join(", "));
    }
    io::stdout().flush()?;
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let catalog = Catalog::from_json_file(path)
        .with_context(|| format!("Catalog {} is invalid", path.display()))?;

    println!("{}: {} games, {} genres", path.display(), catalog.len(), catalog.genres().len());
    for genre in Genre::all() {
        let count = catalog.games().iter().filter(|g| g.genre == *genre).count();
        if count > 0 {
            println!("  {:<12} {}", genre.label(), count);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_discover() {
        let cli = Cli::try_parse_from([
            "ctrllog-cli",
            "discover",
            "--genre",
            "rpg",
            "-g",
            "Action",
            "--from",
            "2020",
            "--rating",
            "4.5",
            "--direction",
            "at-most",
            "--tab",
            "best-reviewed",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Discover {
                genres,
                from,
                rating,
                direction,
                tab,
                format,
                ..
            } => {
                assert_eq!(genres, vec![Genre::Rpg, Genre::Action]);
                assert_eq!(from, Some(2020));
                assert_eq!(rating, Some(4.5));
                assert_eq!(direction, RatingDirection::AtMost);
                assert_eq!(tab, Some(DiscoverTab::BestReviewed));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected discover"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_genre() {
        assert!(Cli::try_parse_from(["ctrllog-cli", "discover", "--genre", "shooter"]).is_err());
    }

    #[test]
    fn test_cli_parses_log() {
        let cli = Cli::try_parse_from([
            "ctrllog-cli",
            "log",
            "--title",
            "Elden Ring",
            "--platform",
            "PlayStation 5",
            "--status",
            "want_to_play",
            "--started",
            "2024-01-05",
            "--tag",
            "soulslike",
        ])
        .unwrap();

        match cli.command {
            Commands::Log {
                status, started, tags, ..
            } => {
                assert_eq!(status, Some(PlayStatus::WantToPlay));
                assert_eq!(started, NaiveDate::from_ymd_opt(2024, 1, 5));
                assert_eq!(tags, vec!["soulslike".to_string()]);
            }
            _ => panic!("expected log"),
        }
    }

    #[test]
    fn test_cli_parses_game() {
        let cli = Cli::try_parse_from(["ctrllog-cli", "game", "1", "--json"]).unwrap();
        match cli.command {
            Commands::Game { id, json, catalog } => {
                assert_eq!(id, 1);
                assert!(json);
                assert_eq!(catalog, None);
            }
            _ => panic!("expected game"),
        }
    }

    #[test]
    fn test_session_for_blank_user_is_anonymous() {
        assert_eq!(session_for(None), Session::Anonymous);
        assert_eq!(session_for(Some("  ".to_string())), Session::Anonymous);
        assert!(session_for(Some("v".to_string())).is_signed_in());
    }

    #[test]
    fn test_session_for_resolves_identifier() {
        let by_name = session_for(Some(" johnny ".to_string()));
        assert_eq!(by_name.user().unwrap().username.as_deref(), Some("johnny"));

        let by_email = session_for(Some("v@nightcity.net".to_string()));
        let user = by_email.user().unwrap();
        assert_eq!(user.user_id, "v@nightcity.net");
        assert_eq!(user.username, None);
    }

    #[test]
    fn test_log_filter_keeps_rust_log_directives() {
        let filter = log_filter(false, Some("ctrllog_core=trace")).unwrap().to_string();
        assert!(filter.contains("ctrllog_core=trace"));
        assert!(!filter.contains("ctrllog_core=info"));
    }

    #[test]
    fn test_log_filter_defaults() {
        let quiet = log_filter(false, None).unwrap().to_string();
        assert!(quiet.contains("ctrllog_core=info"));
        assert!(quiet.contains("ctrllog_cli=info"));

        let blank = log_filter(false, Some("  ")).unwrap().to_string();
        assert!(blank.contains("ctrllog_core=info"));

        let unparsable = log_filter(false, Some("ctrllog_core=loud")).unwrap().to_string();
        assert!(unparsable.contains("ctrllog_core=info"));
    }

    #[test]
    fn test_log_filter_verbose_raises_ctrllog_crates() {
        let verbose = log_filter(true, None).unwrap().to_string();
        assert!(verbose.contains("ctrllog_core=debug"));
        assert!(verbose.contains("ctrllog_cli=debug"));

        let with_env = log_filter(true, Some("warn")).unwrap().to_string();
        assert!(with_env.contains("warn"));
        assert!(with_env.contains("ctrllog_core=debug"));
    }

    #[test]
    fn test_cmd_check_reports_invalid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"games": [
                {{"id": 3, "title": "Hades", "genre": "action",
                  "release_year": 2020, "rating": 4.5}},
                {{"id": 3, "title": "Hades II", "genre": "action",
                  "release_year": 2024, "rating": 4.0}}
            ]}}"#
        )
        .unwrap();

        let err = cmd_check(file.path()).unwrap_err();
        assert_eq!(err.to_string(), format!("Catalog {} is invalid", file.path().display()));
        assert!(format!("{:#}", err).contains("duplicate game id 3"));
        assert!(matches!(
            err.downcast_ref::<ctrllog_core::Error>(),
            Some(ctrllog_core::Error::Json(_))
        ));
    }

    #[test]
    fn test_cmd_check_accepts_valid_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&Catalog::sample()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        cmd_check(file.path()).unwrap();
    }

    #[test]
    fn test_cmd_log_wraps_validation_error() {
        let draft = LogEntryDraft {
            game_title: "Elden Ring".to_string(),
            platform: Some("PlayStation 5".to_string()),
            ..Default::default()
        };
        let err = cmd_log(draft, false).unwrap_err();
        assert_eq!(err.to_string(), "Failed to log game");
        assert!(matches!(
            err.downcast_ref::<ctrllog_core::Error>(),
            Some(ctrllog_core::Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_cmd_discover_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("games.json");
        let err = cmd_discover(
            &CliConfig::default(),
            Some(&missing),
            &DiscoverFilters::new(),
            DiscoverTab::Latest,
            None,
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load catalog"));
    }

    #[test]
    fn test_cmd_discover_sample_catalog() {
        let mut filters = DiscoverFilters::new();
        filters.set_search("ring");
        cmd_discover(
            &CliConfig::default(),
            None,
            &filters,
            DiscoverTab::BestReviewed,
            Some("v@nightcity.net".to_string()),
            OutputFormat::Csv,
        )
        .unwrap();
    }

    #[test]
    fn test_cmd_game_unknown_id() {
        let err = cmd_game(&CliConfig::default(), None, 404, false).unwrap_err();
        assert_eq!(err.to_string(), "No game with id 404 in the catalog");
        cmd_game(&CliConfig::default(), None, 1, true).unwrap();
    }
}
