use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use recolor_engine::{Color, Effect, Metric, RecolorConfig, codec};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Dark gradient on the left fading to white on the right
    let img = RgbaImage::from_fn(400, 300, |x, _| {
        let v = (x * 255 / 399) as u8;
        Rgba([v, v, v, 255])
    });

    for metric in Metric::ALL {
        let config = RecolorConfig::new()
            .with_source(Color::new(0, 0, 0))
            .with_target(Color::new(6, 145, 15))
            .with_tolerance(0.3)
            .with_metric(metric);

        let matched = config.count_matches(&img)?;
        let output = config.apply(&DynamicImage::ImageRgba8(img.clone()))?;

        let path = output_dir.join(format!("recolor_{metric}.png"));
        std::fs::write(&path, codec::encode(&output, ImageFormat::Png)?)?;

        println!("✓ {metric}: {matched} pixels recolored -> {}", path.display());
    }

    Ok(())
}
