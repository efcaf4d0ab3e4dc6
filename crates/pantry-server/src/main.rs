//! pantry-server: serves pantries and baskets over HTTP.

mod logging;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pantry_core::app::AppBuilder;
use pantry_core::config::{Config, PantryBinding};
use pantry_core::domain::BasketTtl;
use pantry_core::http::Router;

#[derive(Parser, Debug)]
#[command(name = "pantry-server")]
#[command(about = "JSON baskets grouped into pantries, served over HTTP")]
struct Args {
    /// Path to configuration file (TOML)
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long, env = "PANTRY_BIND")]
    bind: Option<SocketAddr>,

    /// Basket TTL in seconds; non-positive or non-numeric disables expiry
    #[arg(long = "basket-ttl", env = "BASKET_TTL_SECONDS")]
    basket_ttl: Option<String>,

    /// Provision a pantry, repeatable
    #[arg(long = "pantry", value_name = "ID[=NAMESPACE]")]
    pantries: Vec<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(Config, bool)> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(ttl) = &self.basket_ttl {
            config.basket_ttl_seconds = BasketTtl::parse(ttl);
        }
        for raw in &self.pantries {
            config.pantries.push(PantryBinding::parse(raw)?);
        }
        config.validate()?;

        Ok((config, self.print_config))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, print_config) = Args::parse().into_config()?;

    if print_config {
        print!("{}", toml_config(&config)?);
        return Ok(());
    }

    logging::init(&config.logging);

    let app = AppBuilder::from_config(&config)
        .build()
        .context("no usable pantries; add [[pantry]] entries or --pantry flags")?;
    tracing::info!(
        pantries = ?app.registry().ids(),
        basket_ttl = %app.basket_ttl(),
        "pantries provisioned"
    );

    let router = Router::new(app);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("HTTP server listening on {}", config.bind);
    axum::serve(listener, server::app(router))
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn toml_config(config: &Config) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to render config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "pantry-server",
            "--bind",
            "0.0.0.0:9999",
            "--basket-ttl",
            "120",
            "--pantry",
            "TEST_PANTRY_ID=test",
            "--pantry",
            "other",
        ]);
        let (config, print_config) = args.into_config().unwrap();

        assert!(!print_config);
        assert_eq!(config.bind.port(), 9999);
        assert_eq!(config.basket_ttl_seconds.seconds(), Some(120));
        assert_eq!(config.pantries.len(), 2);
        assert_eq!(config.pantries[0].namespace(), "test");
    }

    #[test]
    fn duplicate_pantry_flags_fail_validation() {
        let args = Args::parse_from(["pantry-server", "--pantry", "a", "--pantry", "a"]);
        assert!(args.into_config().is_err());
    }

    #[test]
    fn rendered_config_parses_back() {
        let args = Args::parse_from(["pantry-server", "--basket-ttl", "60", "--pantry", "p=ns"]);
        let (config, _) = args.into_config().unwrap();
        let rendered = toml_config(&config).unwrap();

        assert_eq!(Config::from_toml_str(&rendered).unwrap(), config);
    }
}
