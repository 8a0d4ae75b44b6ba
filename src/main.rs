//! heightmesh CLI - fractal noise terrain generator.
//!
//! Generates a heightmap from layered Perlin noise and writes it out as a
//! heightmap file, a grayscale texture and a grid mesh.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use heightmesh::config::GeneratorConfig;
use heightmesh::export::{
    export_heightmap_png, export_heightmap_raw, export_mesh_obj, export_range, export_texture_png,
    PngExportOptions, RawFormat,
};
use heightmesh::mesh::{build_mesh_with, MeshData, MAX_VERTICES};
use heightmesh::noise::{NoiseBackend, NoiseConfiguration};
use heightmesh::terrain::{HeightCurve, MapGenerator};
use heightmesh::texture::{build_texture_with, ColorBand};

/// Fractal noise terrain generator.
#[derive(Parser)]
#[command(name = "heightmesh")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a heightmap, texture and mesh.
    Generate(GenerateArgs),

    /// Display size estimates for a map configuration.
    Info {
        /// Map width in cells.
        #[arg(long, default_value = "200")]
        width: u32,

        /// Map height in cells.
        #[arg(long, default_value = "200")]
        height: u32,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "terrain")]
    name: String,

    /// Heightmap export format.
    #[arg(short, long, default_value = "png")]
    format: ExportFormat,

    /// Map width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// Map height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<i32>,

    /// Noise scale (cells per noise unit).
    #[arg(long)]
    scale: Option<f32>,

    /// Number of noise octaves (1-16).
    #[arg(long)]
    octaves: Option<u8>,

    /// Frequency multiplier per octave.
    #[arg(long)]
    lacunarity: Option<f32>,

    /// Amplitude multiplier per octave.
    #[arg(long)]
    persistence: Option<f32>,

    /// Horizontal noise offset.
    #[arg(long, allow_negative_numbers = true)]
    offset_x: Option<f32>,

    /// Vertical noise offset.
    #[arg(long, allow_negative_numbers = true)]
    offset_y: Option<f32>,

    /// Gradient noise implementation.
    #[arg(long)]
    backend: Option<Backend>,

    /// Use the rugged terrain preset as the base configuration.
    #[arg(long, conflicts_with = "smooth")]
    rugged: bool,

    /// Use the smooth terrain preset as the base configuration.
    #[arg(long)]
    smooth: bool,

    /// Vertical scale of the mesh.
    #[arg(long)]
    height_scale: Option<f32>,

    /// Shape heights with an ease-in curve before meshing.
    #[arg(long)]
    ease_in: bool,

    /// Normalize heights to [0, 1] before texturing.
    #[arg(long)]
    normalize: bool,

    /// Color the texture by terrain bands instead of grayscale.
    #[arg(long)]
    banded: bool,

    /// Skip writing the texture PNG.
    #[arg(long)]
    no_texture: bool,

    /// Skip writing the OBJ mesh.
    #[arg(long)]
    no_mesh: bool,

    /// Write the effective configuration next to the outputs.
    #[arg(long)]
    save_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// 16-bit grayscale PNG.
    Png,
    /// 16-bit RAW little-endian.
    Raw,
    /// 32-bit float RAW.
    RawFloat,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// Classic Perlin noise.
    Perlin,
    /// SIMD gradient noise.
    Simd,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info { width, height } => run_info(width, height),
    }
}

fn resolve_config(args: &GenerateArgs) -> GeneratorConfig {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };

    if args.rugged || args.smooth {
        let seed = config.noise.seed;
        let (width, height) = (config.noise.width, config.noise.height);
        let preset = if args.rugged {
            NoiseConfiguration::rugged(seed)
        } else {
            NoiseConfiguration::smooth(seed)
        };
        config.noise = NoiseConfiguration {
            offset: config.noise.offset,
            backend: config.noise.backend,
            ..preset.with_size(width, height)
        };
    }

    let noise = &mut config.noise;
    if let Some(width) = args.width {
        noise.width = width;
    }
    if let Some(height) = args.height {
        noise.height = height;
    }
    if let Some(seed) = args.seed {
        noise.seed = seed;
    }
    if let Some(scale) = args.scale {
        noise.scale = scale;
    }
    if let Some(octaves) = args.octaves {
        noise.octaves = octaves;
    }
    if let Some(lacunarity) = args.lacunarity {
        noise.lacunarity = lacunarity;
    }
    if let Some(persistence) = args.persistence {
        noise.persistence = persistence;
    }
    if let Some(x) = args.offset_x {
        noise.offset.x = x;
    }
    if let Some(y) = args.offset_y {
        noise.offset.y = y;
    }
    if let Some(backend) = args.backend {
        noise.backend = match backend {
            Backend::Perlin => NoiseBackend::Perlin,
            Backend::Simd => NoiseBackend::SimdGradient,
        };
    }

    if let Some(height_scale) = args.height_scale {
        config.mesh.height_scale = height_scale;
    }
    if args.ease_in {
        config.mesh.curve = HeightCurve::ease_in();
    }
    if args.normalize {
        config.texture.normalize = true;
    }
    if args.banded {
        config.texture.bands = ColorBand::default_terrain();
    }

    config
}

fn run_generate(args: GenerateArgs) {
    let config = resolve_config(&args);
    let noise = &config.noise;

    if noise.octaves < 1 || noise.octaves > 16 {
        eprintln!("Error: Octaves must be between 1 and 16");
        std::process::exit(1);
    }

    println!("heightmesh - Fractal Noise Terrain");
    println!("==================================");
    println!("Size: {}x{}", noise.width, noise.height);
    println!("Seed: {}", noise.seed);
    println!(
        "Octaves: {}, lacunarity {}, persistence {}, scale {}",
        noise.octaves,
        noise.lacunarity,
        noise.persistence,
        noise.effective_scale()
    );
    println!("Backend: {}", noise.backend.name());
    println!("Output: {}", args.output.display());

    let start = Instant::now();
    let generator = MapGenerator::new(config.noise.clone());
    let heightmap = generator.generate_heightmap().unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });
    println!("\nGeneration completed in {:.2?}", start.elapsed());

    let (min_h, max_h) = heightmap.height_range();
    println!(
        "Height range: [{:.4}, {:.4}] (envelope ±{:.4})",
        min_h,
        max_h,
        noise.amplitude_envelope()
    );

    std::fs::create_dir_all(&args.output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    println!("\nExporting...");
    let name = &args.name;

    let (min_h, max_h) = export_range(&heightmap);

    match args.format {
        ExportFormat::Png => {
            let path = args.output.join(format!("{}_height.png", name));
            let options = PngExportOptions {
                min_height: min_h,
                max_height: max_h,
                ..Default::default()
            };
            export_heightmap_png(&heightmap, &path, &options).unwrap_or_else(|e| {
                eprintln!("Error exporting PNG: {}", e);
                std::process::exit(1);
            });
            println!("  Heightmap (16-bit PNG): {}", path.display());
        }
        ExportFormat::Raw | ExportFormat::RawFloat => {
            let raw_format = match args.format {
                ExportFormat::RawFloat => RawFormat::R32Float,
                _ => RawFormat::R16LittleEndian,
            };
            let path = args.output.join(format!("{}_height.raw", name));
            export_heightmap_raw(&heightmap, &path, raw_format, min_h, max_h).unwrap_or_else(|e| {
                eprintln!("Error exporting RAW: {}", e);
                std::process::exit(1);
            });
            println!("  Heightmap ({:?}): {}", raw_format, path.display());
        }
    }

    if !args.no_texture {
        let texture = build_texture_with(&heightmap, &config.texture);
        let path = args.output.join(format!("{}_texture.png", name));
        export_texture_png(
            &texture,
            &path,
            image::codecs::png::CompressionType::Default,
            image::codecs::png::FilterType::Adaptive,
        )
        .unwrap_or_else(|e| {
            eprintln!("Error exporting texture: {}", e);
            std::process::exit(1);
        });
        println!("  Texture: {}", path.display());
    }

    if !args.no_mesh {
        match build_mesh_with(&heightmap, &config.mesh) {
            Ok(mesh) => {
                let path = args.output.join(format!("{}_mesh.obj", name));
                export_mesh_obj(&mesh, &path).unwrap_or_else(|e| {
                    eprintln!("Error exporting mesh: {}", e);
                    std::process::exit(1);
                });
                println!(
                    "  Mesh ({} vertices, {} triangles): {}",
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    path.display()
                );
            }
            Err(e) => {
                eprintln!("Error building mesh: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.save_config {
        let path = args.output.join(format!("{}_config.json", name));
        config.save(&path).unwrap_or_else(|e| {
            eprintln!("Error saving config: {}", e);
            std::process::exit(1);
        });
        println!("  Config: {}", path.display());
    }

    println!("Done in {:.2?}", start.elapsed());
}

fn run_info(width: u32, height: u32) {
    let cells = (width as u64) * (height as u64);
    let bytes_heights = cells * 4;
    let bytes_texture = cells * 4;
    let bytes_png = cells * 2;
    let bytes_raw_r16 = cells * 2;
    let bytes_raw_r32 = cells * 4;

    println!("heightmesh - Map Configuration Info");
    println!("===================================");
    println!();
    println!("Size: {}x{} ({} cells)", width, height, cells);
    println!();
    println!("Memory usage (in-memory):");
    println!("  Heights:   {:>12} bytes ({:.2} MB)", bytes_heights, mb(bytes_heights));
    println!("  Texture:   {:>12} bytes ({:.2} MB)", bytes_texture, mb(bytes_texture));
    println!();
    println!("Export file sizes:");
    println!("  PNG (16-bit): {:>10} bytes ({:.2} MB)", bytes_png, mb(bytes_png));
    println!("  RAW (R16):    {:>10} bytes ({:.2} MB)", bytes_raw_r16, mb(bytes_raw_r16));
    println!("  RAW (R32):    {:>10} bytes ({:.2} MB)", bytes_raw_r32, mb(bytes_raw_r32));
    println!();

    match MeshData::new(width, height) {
        Ok(mesh) => println!(
            "Mesh: OK ({} vertices, {} triangles)",
            mesh.vertex_count(),
            mesh.triangle_count()
        ),
        Err(e) => {
            println!("Mesh: NOT buildable ({})", e);
            let side = (MAX_VERTICES as f64 - 1.0).sqrt().floor() as u32;
            println!("  Largest square mesh: {}x{}", side, side);
        }
    }
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
