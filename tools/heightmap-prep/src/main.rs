//! heightmap-prep: synthetic heightmap generator and resampling/inspection tool.
//!
//! Usage:
//!   heightmap-prep synthetic --size 256 --seed 7 --output resources/heightmaps/demo.png
//!   heightmap-prep resample --map big.png --grid 128 128 --output small.png
//!   heightmap-prep inspect --map demo.png --grid 64 64 --sea-level 23

mod synthetic;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use image::{ImageBuffer, Luma};
use relief_core::types::GridResolution;
use relief_terrain::{HeightField, HeightmapSampler, TerrainMeshBuilder};

#[derive(Parser, Debug)]
#[command(name = "heightmap-prep")]
#[command(about = "Heightmap preprocessing for the relief viewer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a deterministic synthetic heightmap.
    Synthetic {
        #[arg(long, default_value_t = 256)]
        size: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
    /// Nearest-neighbour resample a heightmap to a new grid.
    Resample {
        #[arg(long)]
        map: PathBuf,
        #[arg(long, num_args = 2, value_names = ["X", "Y"], required = true)]
        grid: Vec<u32>,
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the mesh the viewer would build from a heightmap.
    Inspect {
        #[arg(long)]
        map: PathBuf,
        #[arg(long, num_args = 2, value_names = ["X", "Y"])]
        grid: Option<Vec<u32>>,
        #[arg(long)]
        sea_level: Option<f32>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse().command) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Synthetic { size, seed, output } => cmd_synthetic(size, seed, &output),
        Command::Resample { map, grid, output } => cmd_resample(&map, &grid, &output),
        Command::Inspect { map, grid, sea_level } => {
            println!("{}", cmd_inspect(&map, grid.as_deref(), sea_level)?);
            Ok(())
        }
    }
}

fn parse_grid(values: &[u32]) -> anyhow::Result<GridResolution> {
    match values {
        &[x, y] => Ok(GridResolution::new(x, y)),
        _ => anyhow::bail!("--grid takes exactly two values, got {}", values.len()),
    }
}

// --- Synthetic ---

fn cmd_synthetic(size: u32, seed: u64, output: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(size >= 2, "--size must be at least 2, got {size}");
    log::info!("Generating {size}x{size} synthetic heightmap (seed {seed})");
    let img = synthetic::generate(size, seed);
    img.save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

// --- Resample ---

fn cmd_resample(map: &Path, grid: &[u32], output: &Path) -> anyhow::Result<()> {
    let resolution = parse_grid(grid)?;
    let sampler = HeightmapSampler::open(map)?;
    let raw = sampler.raw();
    log::info!(
        "Resampling {}x{} to {}x{}",
        raw.width(),
        raw.height(),
        resolution.x_range,
        resolution.y_range
    );
    let field = sampler.resample(resolution)?;
    write_field(&field, output)?;
    log::info!("Wrote {}", output.display());
    Ok(())
}

/// Write a field as 8-bit grayscale when it fits, 16-bit otherwise.
fn write_field(field: &HeightField, output: &Path) -> anyhow::Result<()> {
    let (_, max) = field.elevation_range();
    let (w, h) = (field.x_range(), field.y_range());
    let result = if max <= u8::MAX as f32 {
        ImageBuffer::from_fn(w, h, |x, y| Luma([field.elevation(x, y).round() as u8]))
            .save(output)
    } else {
        ImageBuffer::from_fn(w, h, |x, y| Luma([field.elevation(x, y).round() as u16]))
            .save(output)
    };
    result.with_context(|| format!("failed to write {}", output.display()))
}

// --- Inspect ---

fn cmd_inspect(map: &Path, grid: Option<&[u32]>, sea_level: Option<f32>) -> anyhow::Result<String> {
    let resolution = grid.map(parse_grid).transpose()?;
    let sampler = HeightmapSampler::open(map)?;
    let field = sampler.sample(resolution)?;
    let mesh = TerrainMeshBuilder::new()
        .with_min_height(sea_level)
        .build(&field)?;

    let raw = sampler.raw();
    let (field_lo, field_hi) = field.elevation_range();
    let (mesh_lo, mesh_hi) = mesh.elevation_range();
    let res = mesh.resolution();
    Ok(format!(
        "source:     {}x{} ({} channel(s))\n\
         grid:       {}x{}\n\
         elevation:  {field_lo}..{field_hi}\n\
         mesh:       {mesh_lo}..{mesh_hi} ({} cell(s) raised)\n\
         vertices:   {}\n\
         triangles:  {}\n\
         indices:    {} ({} restart)",
        raw.width(),
        raw.height(),
        raw.channels(),
        res.x_range,
        res.y_range,
        mesh.clamped_cells(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.indices().len(),
        mesh.restart_count(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("heightmap_prep_{}_{}.png", name, std::process::id()))
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "heightmap-prep",
            "synthetic",
            "--size",
            "64",
            "--output",
            "a.png",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Synthetic { size: 64, seed: 0, .. }));

        let cli = Cli::try_parse_from([
            "heightmap-prep",
            "resample",
            "--map",
            "a.png",
            "--grid",
            "8",
            "4",
            "--output",
            "b.png",
        ])
        .unwrap();
        match cli.command {
            Command::Resample { grid, .. } => assert_eq!(grid, vec![8, 4]),
            other => panic!("unexpected {other:?}"),
        }

        let missing_grid = Cli::try_parse_from([
            "heightmap-prep",
            "resample",
            "--map",
            "a.png",
            "--output",
            "b.png",
        ]);
        assert!(missing_grid.is_err());
    }

    #[test]
    fn test_synthetic_then_inspect() {
        let path = temp_path("synth");
        cmd_synthetic(16, 3, &path).unwrap();
        let report = cmd_inspect(&path, Some(&[4, 4][..]), None).unwrap();
        assert!(report.contains("source:     16x16"));
        assert!(report.contains("vertices:   16"));
        assert!(report.contains("triangles:  18"));
        assert!(report.contains("indices:    57 (3 restart)"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resample_writes_grid_sized_image() {
        let src = temp_path("resample_src");
        let dst = temp_path("resample_dst");
        ImageBuffer::from_fn(10, 6, |x, y| Luma([(x * 20 + y) as u8]))
            .save(&src)
            .unwrap();
        cmd_resample(&src, &[5, 3], &dst).unwrap();

        let out = image::open(&dst).unwrap().to_luma8();
        assert_eq!(out.dimensions(), (5, 3));
        // Grid (1, 1) samples source (2, 2).
        assert_eq!(out.get_pixel(1, 1)[0], 42);
        std::fs::remove_file(&src).ok();
        std::fs::remove_file(&dst).ok();
    }

    #[test]
    fn test_inspect_reports_clamped_cells() {
        let path = temp_path("clamp");
        ImageBuffer::from_fn(3, 3, |x, _| Luma([(x * 10) as u8])).save(&path).unwrap();
        let report = cmd_inspect(&path, None, Some(15.0)).unwrap();
        assert!(report.contains("mesh:       15..20 (6 cell(s) raised)"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_grid_arity() {
        assert!(parse_grid(&[4]).is_err());
        assert!(synthetic_too_small().is_err());
    }

    fn synthetic_too_small() -> anyhow::Result<()> {
        cmd_synthetic(1, 0, &temp_path("tiny"))
    }
}
