mod cli;
mod config;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Profile;
use recolor_engine::{DynamicImage, Effect, RecolorConfig, codec};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let output = run(&cli)?;
    println!("Saved converted image to: {}", output.display());

    Ok(())
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let profile = match &cli.config {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    let config = profile.resolve(cli)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| config::default_output_path(&cli.input));
    let format = codec::format_for_path(&output)
        .with_context(|| format!("unsupported output file {}", output.display()))?;

    let image = codec::open(&cli.input)
        .with_context(|| format!("load input image {} failed", cli.input.display()))?;

    if log::log_enabled!(log::Level::Info) {
        log_match_count(&config, &image)?;
    }

    let recolored = config.apply(&image)?;
    let bytes = codec::encode(&recolored, format)
        .with_context(|| format!("encode {} failed", output.display()))?;

    write_atomically(&output, &bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), output.display());

    Ok(output)
}

fn log_match_count(config: &RecolorConfig, image: &DynamicImage) -> Result<()> {
    let matched = config.count_matches_dynamic(image)?;
    let total = image.width() as u64 * image.height() as u64;

    log::info!(
        "{matched} of {total} pixels match {} ({})",
        config.source(),
        config.metric()
    );
    Ok(())
}

/// Write through a temp file in the destination directory so a failure never leaves a partial file.
///
/// An overwritten file keeps its permissions. A new file gets the usual `0644`
/// instead of the owner-only mode the temp file is created with.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {} failed", dir.display()))?;
    file.write_all(bytes)?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    };
    if let Some(permissions) = permissions {
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("set permissions on {} failed", path.display()))?;
    }

    file.persist(path)
        .with_context(|| format!("save {} failed", path.display()))?;

    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
