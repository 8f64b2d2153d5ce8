use argh::FromArgs;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use miette::{IntoDiagnostic, WrapErr};
use tracing::debug;

use npbot::{Bot, Config};

/// An IRC bot that announces what Last.fm says a user is listening to.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to config file
    #[argh(option, default = "String::from(\"config.toml\")")]
    config_path: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Parse command-line arguments
    let opts: Opts = argh::from_env();

    // Load the config file with environment overrides layered on top
    let config: Config = Figment::new()
        .merge(Toml::file(&opts.config_path))
        .merge(Env::prefixed("NPBOT_").split("__"))
        .extract()
        .into_diagnostic()
        .wrap_err("could not load configuration")?;

    // Initialize logging
    npbot::tracing::try_init(&config.tracing)?;

    debug!(config_path = %opts.config_path, "configuration loaded");

    let mut bot = Bot::new(config);

    bot.run().await?;

    Ok(())
}
