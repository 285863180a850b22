use anyhow::Result;
use evcal_core::config::EvcalConfig;
use owo_colors::OwoColorize;

pub fn run(config: &EvcalConfig) -> Result<()> {
    let config_path = EvcalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Server:  {}", config.server.base_url());
    println!();
    println!("{}", "Effective settings".bold());
    for line in config.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
