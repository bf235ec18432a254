use crate::cli::Cli;
use anyhow::{Context, Result};
use derivative::Derivative;
use recolor_engine::{
    Color, Metric, RecolorConfig, codec,
    recolor::{DEFAULT_SOURCE, DEFAULT_TARGET, DEFAULT_TOLERANCE},
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Recolor defaults read from a TOML file. Missing keys keep the built-in defaults.
#[derive(Deserialize, Debug, Clone, Derivative)]
#[derivative(Default)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    #[derivative(Default(value = "DEFAULT_SOURCE.to_string()"))]
    pub source: String,

    #[derivative(Default(value = "DEFAULT_TARGET.to_string()"))]
    pub target: String,

    #[derivative(Default(value = "DEFAULT_TOLERANCE"))]
    pub tolerance: f64,

    #[derivative(Default(value = "Metric::default().to_string()"))]
    pub metric: String,

    pub skip_transparent: bool,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {} failed", path.display()))?;

        let profile = toml::from_str::<Profile>(&text)
            .with_context(|| format!("parse config file {} failed", path.display()))?;

        log::debug!("{:?}", profile);
        Ok(profile)
    }

    /// Build the recolor parameters; explicit command-line values win over the profile.
    pub fn resolve(&self, cli: &Cli) -> Result<RecolorConfig> {
        let source = match cli.source {
            Some(color) => color,
            None => self
                .source
                .parse::<Color>()
                .with_context(|| "invalid `source` in config file")?,
        };

        let target = match cli.target {
            Some(color) => color,
            None => self
                .target
                .parse::<Color>()
                .with_context(|| "invalid `target` in config file")?,
        };

        let metric = match cli.metric {
            Some(metric) => metric,
            None => self
                .metric
                .parse::<Metric>()
                .with_context(|| "invalid `metric` in config file")?,
        };

        let config = RecolorConfig::new()
            .with_source(source)
            .with_target(target)
            .with_tolerance(cli.tolerance.unwrap_or(self.tolerance))
            .with_metric(metric)
            .with_skip_transparent(cli.skip_transparent || self.skip_transparent);

        config.validate()?;
        Ok(config)
    }
}

/// `dir/name.bmp` becomes `dir/name_converted.bmp`. Inputs whose extension can't be
/// written losslessly (or that have none) get `.png`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let ext = input
        .extension()
        .filter(|_| codec::format_for_path(input).is_ok())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());

    input.with_file_name(format!("{stem}_converted.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(["recolor", "in.png"].iter().chain(args)).unwrap()
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = Profile::default().resolve(&cli(&[]))?;

        assert_eq!(config.source(), Color::new(0, 0, 0));
        assert_eq!(config.target(), Color::new(6, 145, 15));
        assert_eq!(config.tolerance(), 0.30);
        assert_eq!(config.metric(), Metric::Euclidean);
        assert!(!config.skip_transparent());
        Ok(())
    }

    #[test]
    fn test_load_partial_profile() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "target = \"#00FF00\"\nmetric = \"channel\"\ntolerance = 0.1")?;

        let profile = Profile::load(file.path())?;
        assert_eq!(profile.source, "0,0,0");

        let config = profile.resolve(&cli(&[]))?;
        assert_eq!(config.target(), Color::new(0, 255, 0));
        assert_eq!(config.metric(), Metric::Channel);
        assert_eq!(config.tolerance(), 0.1);
        Ok(())
    }

    #[test]
    fn test_cli_overrides_profile() -> Result<()> {
        let profile = Profile {
            source: "10,10,10".to_string(),
            tolerance: 0.5,
            metric: "channel".to_string(),
            skip_transparent: true,
            ..Default::default()
        };

        let config = profile.resolve(&cli(&["-s", "#FFFFFF", "-t", "0.05", "-m", "euclidean"]))?;
        assert_eq!(config.source(), Color::new(255, 255, 255));
        assert_eq!(config.tolerance(), 0.05);
        assert_eq!(config.metric(), Metric::Euclidean);
        assert!(config.skip_transparent());
        Ok(())
    }

    #[test]
    fn test_invalid_profile_values() {
        let bad_color = Profile {
            source: "not a color".to_string(),
            ..Default::default()
        };
        assert!(bad_color.resolve(&cli(&[])).is_err());

        let bad_metric = Profile {
            metric: "manhattan".to_string(),
            ..Default::default()
        };
        assert!(bad_metric.resolve(&cli(&[])).is_err());
    }

    #[test]
    fn test_out_of_range_tolerance() {
        let err = Profile::default().resolve(&cli(&["-t", "1.5"])).unwrap_err();
        let engine_err = err.downcast_ref::<recolor_engine::Error>().unwrap();
        assert!(engine_err.is_configuration());
    }

    #[test]
    fn test_unknown_key_rejected() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "colour = \"#00FF00\"")?;
        assert!(Profile::load(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_missing_profile() {
        assert!(Profile::load(Path::new("/nonexistent/recolor.toml")).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("images/logo.png")),
            PathBuf::from("images/logo_converted.png")
        );
        assert_eq!(
            default_output_path(Path::new("scan.bmp")),
            PathBuf::from("scan_converted.bmp")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/raw")),
            PathBuf::from("/tmp/raw_converted.png")
        );
    }

    #[test]
    fn test_default_output_path_falls_back_to_png() {
        assert_eq!(
            default_output_path(Path::new("images/logo.jpg")),
            PathBuf::from("images/logo_converted.png")
        );
        assert_eq!(
            default_output_path(Path::new("scan.dat")),
            PathBuf::from("scan_converted.png")
        );
        assert_eq!(
            default_output_path(Path::new("photo.TIFF")),
            PathBuf::from("photo_converted.TIFF")
        );
    }
}
