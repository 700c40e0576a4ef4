mod cli;
mod config;
mod http;
mod render;
mod source;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Command, RenderArgs};
use config::Config;
use http::Endpoint;
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;

fn main() -> anyhow::Result<()> {
    // Configure logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve(args) => {
            args.apply(&mut config);
            run_serve(config)
        }
        Command::Render(args) => run_render(&args, &config),
    }
}

fn run_serve(config: Config) -> anyhow::Result<()> {
    let image = config
        .art
        .image
        .clone()
        .context("no image configured; pass --image or set `image` under [art]")?;
    let conversion = config.art.conversion();
    conversion.validate()?;

    let endpoint = Arc::new(Endpoint {
        route: config.server.route.clone(),
        image,
        conversion,
        render_timeout: config.server.render_timeout(),
    });

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let listener = TcpListener::bind(config.server.bind)
            .await
            .with_context(|| format!("failed to bind {}", config.server.bind))?;
        info!(
            "Server is running on http://{}{} (image {}, scale {})",
            listener.local_addr()?,
            endpoint.route,
            endpoint.image.display(),
            endpoint.conversion.scale
        );
        http::serve(listener, endpoint, shutdown_signal()).await?;
        Ok::<(), anyhow::Error>(())
    })
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received");
}

fn run_render(args: &RenderArgs, config: &Config) -> anyhow::Result<()> {
    let conversion = asciify::ConversionConfig::with_scale(args.scale.unwrap_or(config.art.scale));
    conversion.validate()?;

    let mut stdout = std::io::stdout().lock();
    let failed = render::render_files(&args.inputs, &conversion, &mut stdout)
        .context("failed to write output")?;
    if failed > 0 {
        bail!("{} of {} images failed to convert", failed, args.inputs.len());
    }
    Ok(())
}
