use clap::Parser;
use query_filter::config::AppConfig;
use query_filter::error::{AppError, AppResult};
use query_filter::logging::init_logging;
use query_filter::predicate::sql::Dialect;
use query_filter::schema::SchemaRegistry;
use query_filter::server::{build_router, render_where, AppState};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "query-filter")]
#[command(about = "Compiles typed query filters into SQL WHERE clauses")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// SQL dialect: postgresql or sqlite (overrides config file)
    #[arg(short, long)]
    dialect: Option<String>,

    /// List the registered entities and their filterable fields
    #[arg(long)]
    list: bool,

    /// Entity whose filters are compiled
    #[arg(short, long)]
    entity: Option<String>,

    /// Serve compiled filters over HTTP instead of compiling once
    #[arg(long)]
    serve: bool,

    /// Host to bind to when serving
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on when serving
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Filters as FIELD=RAW; a bare FIELD stands for an absent filter
    filters: Vec<String>,
}

fn load_config(args: &Args) -> AppResult<AppConfig> {
    let mut app_config = if args.config == "config.yaml" && !Path::new("config.yaml").exists() {
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)?
    };

    if let Some(name) = &args.dialect {
        app_config.dialect = Dialect::from_name(name)
            .ok_or_else(|| AppError::Configuration(format!("Unsupported dialect: {}", name)))?;
    }
    Ok(app_config)
}

fn parse_filters(raw_filters: &[String]) -> HashMap<String, Option<String>> {
    raw_filters
        .iter()
        .map(|item| match item.split_once('=') {
            Some((field, raw)) => (field.to_string(), Some(raw.to_string())),
            None => (item.clone(), None),
        })
        .collect()
}

fn list_entities(registry: &SchemaRegistry) -> AppResult<()> {
    for name in registry.names() {
        let schema = registry.get(name)?;
        println!("{}", schema.name);
        for field in &schema.fields {
            if field.values.is_empty() {
                println!("  {:<28} {}", field.name, field.kind);
            } else {
                println!("  {:<28} {} [{}]", field.name, field.kind, field.values.join(", "));
            }
        }
    }
    Ok(())
}

fn compile_once(args: &Args, app_config: &AppConfig, registry: &SchemaRegistry) -> AppResult<()> {
    let entity = args.entity.as_deref().ok_or_else(|| {
        AppError::Configuration("--entity is required unless --list or --serve is given".to_string())
    })?;
    let schema = registry.get(entity)?;
    let filters = parse_filters(&args.filters);
    schema.validate_fields(filters.keys())?;

    let clause = render_where(schema, app_config.dialect, &filters)?;
    println!("{}", serde_json::to_string_pretty(&clause)?);
    Ok(())
}

async fn serve(args: &Args, app_config: &AppConfig, registry: SchemaRegistry) -> AppResult<()> {
    if args.entity.is_some() || !args.filters.is_empty() {
        warn!("--entity and filters are ignored in serve mode");
    }

    let host: std::net::IpAddr = args.host.parse().unwrap_or_else(|_| {
        warn!("Invalid host address: {}, using 127.0.0.1", args.host);
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, args.port));

    let app = build_router(AppState::new(registry, app_config.dialect));
    info!(%addr, dialect = %app_config.dialect, "query-filter listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn run(args: Args) -> AppResult<()> {
    let app_config = load_config(&args)?;
    init_logging(&app_config.logging);
    info!(
        dialect = %app_config.dialect,
        entities = app_config.entities.len(),
        "configuration loaded"
    );

    let registry = app_config.schema_registry();
    if args.list {
        list_entities(&registry)
    } else if args.serve {
        serve(&args, &app_config, registry).await
    } else {
        compile_once(&args, &app_config, &registry)
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(error) = run(args).await {
        let (_, body) = error.to_response();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body.0).unwrap_or_else(|_| error.to_string())
        );
        std::process::exit(1);
    }
}
