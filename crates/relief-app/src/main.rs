use anyhow::Context;
use clap::Parser;

use relief_app::cli::Args;
use relief_app::input::{channel, EventSource, ScriptSource};
use relief_app::scene::Scene;
use relief_app::sink::LogSink;
use relief_app::viewer_loop::run_viewer_loop;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = args.resolve().context("invalid configuration")?;
    let options = args.loop_options(&config);

    let mut scene = Scene::load(&config).with_context(|| {
        format!(
            "failed to load shader '{}' with heightmap '{}'",
            config.shader_name, config.map_name
        )
    })?;

    // Keep the sender alive so an idle channel does not read as a shutdown.
    let (_input_tx, channel_source) = channel();
    let mut events: Box<dyn EventSource> = match &args.events {
        Some(path) => Box::new(
            ScriptSource::load(path)
                .with_context(|| format!("failed to read event script {}", path.display()))?,
        ),
        None => Box::new(channel_source),
    };

    let mut sink = LogSink::new();
    let summary = run_viewer_loop(&mut scene, events.as_mut(), &mut sink, &options)?;
    log::info!(
        "Rendered {} frame(s) of '{}' ({} bytes uploaded)",
        summary.frames,
        config.map_name,
        sink.uploaded_bytes()
    );
    Ok(())
}
