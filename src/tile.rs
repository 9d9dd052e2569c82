use crate::config::Config;
use crate::error::Result;
use crate::tool::ToolInvocation;

/// `-Bg` guesses a base zoom for dot-dropping, `-rg` guesses a drop rate.
pub fn tiler_invocation(config: &Config) -> ToolInvocation {
    ToolInvocation::new(config.tiler_bin.clone())
        .arg("-o")
        .path_arg(&config.mbtiles)
        .arg("-f")
        .args(["-z".to_string(), config.max_zoom.to_string()])
        .args(["-Z".to_string(), config.min_zoom.to_string()])
        .args(["-Bg", "-rg"])
        .path_arg(&config.geojson)
}

pub async fn tile(config: &Config) -> Result<()> {
    let invocation = tiler_invocation(config);
    if config.dry_run {
        println!("would run: {}", invocation);
        return Ok(());
    }
    invocation.run().await
}
