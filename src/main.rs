use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use avatar_tint::api;
use avatar_tint::models::{AppConfig, ImageSource};
use avatar_tint::server;
use avatar_tint::services::{ColorResolver, ThemeRequest, ThemeService};
use swatch_theme::{Boosts, CategoryToken};

#[derive(Parser)]
#[command(name = "avatar-tint")]
#[command(about = "Avatar Tint - readable theme colors from avatar images")]
struct Cli {
    /// Config file (falls back to the CONFIG_FILE env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the best (and optionally a category) color for images
    Resolve {
        /// Image files
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Also resolve this category ("Vibrant", "DarkMuted", ..., "disabled")
        #[arg(short, long)]
        category: Option<String>,

        /// Saturation boost, 0-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        sat_boost: Option<u8>,

        /// Lightness boost, 0-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        light_boost: Option<u8>,

        /// Analyze on a small canvas
        #[arg(long)]
        fast: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the extracted palette of an image
    Palette {
        /// Image file
        image: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resolve role colors for entities given as NAME=IMAGE (or just NAME)
    Theme {
        #[arg(required = true)]
        entities: Vec<String>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Avatar Tint API",
        description = "Readable theme colors from avatar images",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_colors,
        api::handle_invalidate,
        api::handle_clear,
    ),
    components(schemas(
        api::ColorResponse,
        api::InvalidateResponse,
    )),
    tags(
        (name = "Colors", description = "Theme color resolution"),
        (name = "Cache", description = "Palette and color cache management")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Serve) => run_server(config_path.as_deref()).await,
        Some(Commands::Resolve {
            images,
            category,
            sat_boost,
            light_boost,
            fast,
            json,
        }) => {
            init_cli_logging();
            let mut config = AppConfig::load(config_path.as_deref());
            config.analysis.fast |= fast;
            let boosts = Boosts::new(
                sat_boost.unwrap_or(config.boosts.saturation),
                light_boost.unwrap_or(config.boosts.lightness),
            );
            run_resolve_command(&config, &images, category.as_deref(), boosts, json).await
        }
        Some(Commands::Palette { image, json }) => {
            init_cli_logging();
            let config = AppConfig::load(config_path.as_deref());
            run_palette_command(&config, &image, json).await
        }
        Some(Commands::Theme { entities }) => {
            init_cli_logging();
            let config = AppConfig::load(config_path.as_deref());
            run_theme_command(&config, &entities).await
        }
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar_tint=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

#[derive(Serialize)]
struct ResolveOutput {
    image: String,
    best: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_color: Option<String>,
}

/// Resolve colors for image files (no server needed)
async fn run_resolve_command(
    config: &AppConfig,
    images: &[PathBuf],
    category: Option<&str>,
    boosts: Boosts,
    json: bool,
) -> anyhow::Result<()> {
    let resolver = ColorResolver::from_config(config);
    let token = category.map(CategoryToken::parse_lenient);

    let mut outputs = Vec::with_capacity(images.len());
    for path in images {
        let source = ImageSource::path(path);
        let best = resolver.resolve_best_color(&source, boosts).await;
        let category_color = match token {
            Some(token) => resolver.resolve_category_color(&source, token, boosts).await,
            None => None,
        };
        outputs.push(ResolveOutput {
            image: path.display().to_string(),
            best: best.map(|c| c.to_hex()),
            category: token.map(|t| t.to_string()),
            category_color: category_color.map(|c| c.to_hex()),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    for output in &outputs {
        let best = output.best.as_deref().unwrap_or("-");
        match (&output.category, &output.category_color) {
            (Some(name), color) => println!(
                "{}  best={best}  {name}={}",
                output.image,
                color.as_deref().unwrap_or("-")
            ),
            (None, _) => println!("{}  best={best}", output.image),
        }
    }
    Ok(())
}

/// Print the palette extracted from one image
async fn run_palette_command(config: &AppConfig, image: &Path, json: bool) -> anyhow::Result<()> {
    let resolver = ColorResolver::from_config(config);
    let palette = resolver.palette_for(&ImageSource::path(image)).await;

    if json {
        let map: std::collections::BTreeMap<&str, String> = palette
            .iter()
            .map(|(category, swatch)| (category.name(), swatch.color.to_hex()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if palette.is_empty() {
        println!("{}: no swatches", image.display());
        return Ok(());
    }
    println!("{}:", image.display());
    for (category, swatch) in palette.iter() {
        let population = swatch
            .population
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<13} {}  population {population}", category.name(), swatch.color);
    }
    Ok(())
}

/// Resolve role colors for several entities at once
async fn run_theme_command(config: &AppConfig, entities: &[String]) -> anyhow::Result<()> {
    let resolver = Arc::new(ColorResolver::from_config(config));
    let service = ThemeService::new(resolver, config.roles.clone(), config.overrides.clone());

    let requests: Vec<ThemeRequest> = entities
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((name, image)) => ThemeRequest::new(name, Some(ImageSource::path(image))),
            None => ThemeRequest::new(entry.as_str(), None),
        })
        .collect();

    let themes = service.resolve_all(&requests, config.boosts).await;
    println!("{}", serde_json::to_string_pretty(&themes)?);
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    println!("Avatar Tint v{VERSION}");
    println!("Readable theme colors from avatar images\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );

    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  avatar-tint serve     Start the HTTP server");
    println!("  avatar-tint resolve   Print theme colors for image files");
    println!("  avatar-tint palette   Print the extracted palette of an image");
    println!("  avatar-tint theme     Resolve role colors for NAME=IMAGE entities");
    println!("\nRun 'avatar-tint --help' for more details.");
}

/// Run the HTTP server
async fn run_server(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar_tint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::load(config_path);

    // Create application state using shared server module
    let state = server::create_app_state(&config);

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Avatar Tint server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
