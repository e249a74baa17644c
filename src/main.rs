use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wellnest::{
    AppState, ChatMode, RagPipeline, WellnestConfig,
    cli::{Cli, Commands, output::Output},
    create_app,
    rag::{embeddings, pipeline::open_index},
    utils::toml_config::{LogFormat, ServerConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    let (config_path, explicit) = cli.config_path();
    let config = WellnestConfig::load_or_default(&config_path, explicit)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let command = cli.command.clone().unwrap_or(Commands::Serve {
        mode: None,
        host: None,
        port: None,
    });

    match command {
        Commands::Serve { mode, host, port } => {
            let mut config = config;
            if let Some(mode) = mode {
                config.server.mode = mode;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            init_tracing(&config.server, cli.verbose);
            output.banner();
            serve(config, &output).await
        }
        Commands::Index => {
            init_tracing(&config.server, cli.verbose);
            build_index(&config, &output).await
        }
        Commands::Config { validate } => show_config(&config, validate, &output),
    }
}

fn init_tracing(server: &ServerConfig, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        format!("wellnest={0},wellnest_server={0},wellnest_vector={0},tower_http={0}", server.log_level)
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match server.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}

async fn serve(config: WellnestConfig, output: &Output) -> Result<()> {
    let mode = config.server.mode;
    if mode == ChatMode::Rag {
        config.validate_rag().context("Invalid configuration")?;
    }
    output.info(&format!("mode: {}", mode));

    let pipeline = match mode {
        ChatMode::Rules => None,
        ChatMode::Rag => match RagPipeline::from_config(&config).await {
            Ok((pipeline, origin)) => {
                info!(%origin, chunks = pipeline.index().len(), "RAG chain initialized");
                output.success(&format!("vector index {}", origin));
                Some(Arc::new(pipeline))
            }
            Err(e) => {
                error!(error = %e, "Error initializing RAG chain");
                output.warning("RAG chain not initialized; /chat will answer with 500");
                None
            }
        },
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let app = create_app(AppState::new(config, pipeline));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, %mode, "Server listening");
    output.success(&format!("listening on http://{}", addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn build_index(config: &WellnestConfig, output: &Output) -> Result<()> {
    config.validate_rag().context("Invalid configuration")?;

    let embedder = embeddings::embedder_from_name(
        &config.rag.embedding_model,
        config.rag.model_cache_dir.clone(),
    )
    .context("Failed to load embedding model")?;
    let (index, origin) = open_index(config, embedder)
        .await
        .context("Failed to open or build the vector index")?;

    output.success(&format!(
        "vector index {} ({} chunks in '{}')",
        origin,
        index.len(),
        index.collection_name()
    ));
    output.kv(
        "location",
        &config
            .rag
            .persist_directory
            .join(&config.rag.collection_name)
            .display()
            .to_string(),
    );
    Ok(())
}

fn show_config(config: &WellnestConfig, validate: bool, output: &Output) -> Result<()> {
    output.header("Configuration");
    output.kv("mode", config.server.mode.as_str());
    output.kv(
        "listen",
        &format!("{}:{}", config.server.host, config.server.port),
    );
    output.kv("knowledge", &config.rag.knowledge_path.display().to_string());
    output.kv(
        "index",
        &config
            .rag
            .persist_directory
            .join(&config.rag.collection_name)
            .display()
            .to_string(),
    );
    output.kv("embedding model", &config.rag.embedding_model);
    output.kv(
        "llm",
        &format!("{:?} / {}", config.llm.provider, config.llm.model),
    );

    if !validate {
        let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
        println!("\n{}", rendered);
        return Ok(());
    }

    match config.validate_for_mode(config.server.mode) {
        Ok(()) => {
            output.success("configuration is valid");
            Ok(())
        }
        Err(e) => {
            output.error(&e.to_string());
            if config.server.mode == ChatMode::Rag {
                output.hint("the keyword responder needs no API key: serve --mode rules");
            }
            Err(e).context("Configuration validation failed")
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
