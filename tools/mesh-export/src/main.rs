//! procmesh-export - procedural mesh export tool
//!
//! Builds planes, cubes and spheres from a meshes.toml manifest or from
//! command-line flags, and writes them as .obj or .pmesh files.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use glam::{Vec2, Vec3};
use procmesh_core::{MeshRequest, Plane, create_mesh};
use procmesh_export::{ExportFormat, export_mesh, manifest};
use procmesh_runtime::MeshStats;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "procmesh-export")]
#[command(about = "Procedural mesh export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all meshes from a manifest file
    Build {
        /// Path to meshes.toml manifest
        #[arg(default_value = "meshes.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to meshes.toml manifest
        #[arg(default_value = "meshes.toml")]
        manifest: PathBuf,
    },

    /// Export a single plane
    Plane {
        #[command(flatten)]
        common: CommonArgs,

        /// Width and height on the plane
        #[arg(long, value_delimiter = ',', default_value = "1,1")]
        size: Vec<f32>,

        /// Plane to lie on (xy, yz, xz)
        #[arg(long, default_value = "xz", value_parser = parse_plane)]
        axis: Plane,
    },

    /// Export a single cube
    Cube {
        #[command(flatten)]
        common: CommonArgs,

        /// Extent along x,y,z
        #[arg(long, value_delimiter = ',', default_value = "1,1,1")]
        size: Vec<f32>,

        /// Edge rounding, 0 (sharp) to 1 (sphere)
        #[arg(long, default_value_t = 0.0)]
        roundness: f32,
    },

    /// Export a single sphere
    Sphere {
        #[command(flatten)]
        common: CommonArgs,

        /// Extent along x,y,z
        #[arg(long, value_delimiter = ',', default_value = "1,1,1")]
        size: Vec<f32>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Quads per face edge
    #[arg(short, long, default_value_t = 8)]
    resolution: u32,

    /// Center offset x,y,z
    #[arg(long, value_delimiter = ',', default_value = "0,0,0")]
    offset: Vec<f32>,

    /// Mesh name (defaults to the shape name)
    #[arg(short, long)]
    name: Option<String>,

    /// Output file (defaults to <name>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Obj)]
    format: ExportFormat,

    /// Point normals inward
    #[arg(long)]
    inside_out: bool,

    /// Also emit mirrored backfaces
    #[arg(long)]
    double_sided: bool,
}

fn parse_plane(s: &str) -> Result<Plane, String> {
    Plane::ALL
        .into_iter()
        .find(|plane| plane.to_string().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown plane '{s}' (use xy, yz or xz)"))
}

fn components<const N: usize>(what: &str, values: &[f32]) -> Result<[f32; N]> {
    match <[f32; N]>::try_from(values) {
        Ok(array) => Ok(array),
        Err(_) => bail!("--{what} needs {N} comma-separated values, got {}", values.len()),
    }
}

fn export_single(shape: &str, common: CommonArgs, request: MeshRequest) -> Result<()> {
    let request = request
        .with_offset(Vec3::from_array(components::<3>("offset", &common.offset)?))
        .with_forward_facing(!common.inside_out)
        .with_backface_culling(!common.double_sided);

    let mesh = create_mesh(&request)?;
    let output = common.output.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", common.name.as_deref().unwrap_or(shape), common.format.extension()))
    });

    tracing::info!("Exporting {} -> {:?}", shape, output);
    export_mesh(&mesh, &output, common.format)?;
    tracing::info!("Done! {}", MeshStats::from_mesh(&mesh));
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { manifest, output } => {
            tracing::info!("Building meshes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let dir = manifest::resolve_output_dir(&config, &manifest, output.as_deref());
            let written = manifest::build_all(&config, &dir)?;
            tracing::info!("Build complete! {} meshes in {:?}", written.len(), dir);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid! {} meshes", config.meshes.len());
        }

        Commands::Plane { common, size, axis } => {
            let [x, y] = components::<2>("size", &size)?;
            let name = common.name.clone().unwrap_or_else(|| "plane".into());
            let request = MeshRequest::plane(name, common.resolution, Vec2::new(x, y), axis);
            export_single("plane", common, request)?;
        }

        Commands::Cube {
            common,
            size,
            roundness,
        } => {
            let size = Vec3::from_array(components::<3>("size", &size)?);
            let name = common.name.clone().unwrap_or_else(|| "cube".into());
            let request = MeshRequest::cube(name, common.resolution, size, roundness);
            export_single("cube", common, request)?;
        }

        Commands::Sphere { common, size } => {
            let size = Vec3::from_array(components::<3>("size", &size)?);
            let name = common.name.clone().unwrap_or_else(|| "sphere".into());
            let request = MeshRequest::sphere(name, common.resolution, size);
            export_single("sphere", common, request)?;
        }
    }

    Ok(())
}
