//! Photopost CLI - render and post images through the editing pipeline.

use anyhow::{anyhow, bail, Context, Result};
use photopost::prelude::*;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("photopost");

    if args.len() < 2 {
        print_usage(program);
        return;
    }

    let result = match args[1].as_str() {
        "stages" => {
            list_stages();
            Ok(())
        }
        "render" => render_image(&args[2..]),
        "post" => post_image(&args[2..]),
        "config" => print_config(),
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(program);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("Photopost v{}", photopost::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  stages                          List pipeline stages and parameters");
    println!("  render <in> <out> [options]     Render an image to a file");
    println!("  post <in> <title> <dir> [options]  Edit an image and post it to a directory");
    println!("  config                          Print the default configuration");
    println!("  help                            Show this help message");
    println!();
    println!("Options:");
    println!("  --blur <radius>       Gaussian blur radius in pixels (default: 0)");
    println!("  --hue <radians>       Hue rotation (default: 0)");
    println!("  --brightness <amt>    Brightness offset (default: 0)");
    println!("  --saturation <amt>    Saturation multiplier (default: 1)");
    println!("  --sepia <amt>         Sepia intensity 0..1 (default: 0)");
    println!("  --viewport <WxH[@s]>  Viewport in points with optional scale");
    println!("  --config <path>       Load an editor config file");
}

fn list_stages() {
    println!("Pipeline stages (applied in order):");
    for (i, metadata) in stage_catalog().iter().enumerate() {
        let params: Vec<&str> = metadata.parameters.iter().map(|p| p.as_str()).collect();
        println!(
            "  {}. {} [{}] - {} ({})",
            i + 1,
            metadata.id,
            metadata.category.display_name(),
            metadata.description,
            params.join(", ")
        );
    }
    println!();

    println!("Parameters:");
    for definition in ParameterSchema::standard().iter() {
        println!(
            "  {:<16} default {:<6} slider [{}, {}]",
            definition.name.as_str(),
            definition.default_value,
            definition.slider_min,
            definition.slider_max
        );
        for constraint in &definition.constraints {
            println!("  {:<16} {}", "", constraint);
        }
    }
}

fn print_config() -> Result<()> {
    print!("{}", EditorConfig::default().to_toml()?);
    Ok(())
}

/// Options shared by `render` and `post`.
struct EditOptions {
    config: EditorConfig,
    params: FilterParameters,
}

fn parse_options(args: &[String]) -> Result<EditOptions> {
    let mut overrides: Vec<(ParameterName, f32)> = Vec::new();
    let mut viewport: Option<Viewport> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| anyhow!("Missing value for {}", flag))?;
        match flag {
            "--blur" | "--hue" | "--brightness" | "--saturation" | "--sepia" => {
                let name: ParameterName = flag.trim_start_matches("--").parse()?;
                let amount: f32 = value
                    .parse()
                    .with_context(|| format!("Invalid value for {}: {}", flag, value))?;
                overrides.push((name, amount));
            }
            "--viewport" => viewport = Some(parse_viewport(value)?),
            "--config" => config_path = Some(PathBuf::from(value)),
            _ => bail!("Unknown option: {}", flag),
        }
        i += 2;
    }

    let mut config = match config_path {
        Some(path) => EditorConfig::load_from(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if let Some(viewport) = viewport {
        config.viewport = viewport;
        config.validate().context("Invalid --viewport")?;
    }

    let params = overrides
        .into_iter()
        .fold(config.defaults, |params, (name, value)| params.with(name, value));

    Ok(EditOptions { config, params })
}

fn parse_viewport(s: &str) -> Result<Viewport> {
    let (size, scale) = match s.split_once('@') {
        Some((size, scale)) => {
            let scale = scale
                .parse::<f64>()
                .with_context(|| format!("Invalid scale: {}", scale))?;
            (size, scale)
        }
        None => (s, 1.0),
    };
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| anyhow!("Viewport must look like WxH or WxH@scale, got {}", s))?;
    Ok(Viewport::new(
        w.parse::<f64>().with_context(|| format!("Invalid width: {}", w))?,
        h.parse::<f64>().with_context(|| format!("Invalid height: {}", h))?,
        scale,
    ))
}

fn report_validation(params: &FilterParameters) {
    let report = ValidationPipeline::default().validate(params);
    for warning in &report.warnings {
        println!("⚠️  {}", warning.message);
    }
    if !report.success {
        println!("{}", report.summary());
        for line in report.detailed_errors() {
            println!("   {}", line);
        }
        println!("   The unfiltered image will be used.");
    }
}

fn render_image(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("Usage: render <input> <output> [options]");
    }
    let (input, output) = (Path::new(&args[0]), Path::new(&args[1]));
    let options = parse_options(&args[2..])?;
    report_validation(&options.params);

    let source = SourceImage::open(input)?;
    let scaled = ScaledImage::from_source(&source, &options.config.viewport, &options.config.scaling)?;
    let result = FilterPipeline::new().render_with_stats(&scaled, &options.params);

    for timing in &result.stats.stages {
        let state = if timing.skipped { "skipped" } else { "applied" };
        println!("   • {:<15} {:.2?} {}", timing.stage_id, timing.duration, state);
    }
    if let Some(reason) = &result.stats.fallback {
        println!("⚠️  Fell back to the unfiltered image: {}", reason);
    }

    result
        .image
        .pixels()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "✅ {} -> {} ({}) in {:.2?}",
        input.display(),
        output.display(),
        result.image.dimensions(),
        result.stats.total_duration
    );
    Ok(())
}

fn post_image(args: &[String]) -> Result<()> {
    if args.len() < 3 {
        bail!("Usage: post <input> <title> <dir> [options]");
    }
    let input = Path::new(&args[0]);
    let title = &args[1];
    let mut submitter = DirectorySubmitter::new(&args[2]);
    let options = parse_options(&args[3..])?;
    report_validation(&options.params);

    let mut session = EditingSession::from_config(&options.config);
    session.select_image(SourceImage::open(input)?);
    session.set_parameters(options.params);

    session.submit(title, &mut submitter)?;
    println!("🎉 Posted '{}' to {}", title.trim(), submitter.root().display());
    Ok(())
}
