use conngroups_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        database = %config.database.path,
        default_limit = config.pagination.default_limit,
        max_limit = config.pagination.max_limit,
        "Configuration loaded"
    );

    Ok(config)
}
