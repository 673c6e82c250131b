//! procmesh-export library
//!
//! Writes generated meshes as Wavefront OBJ or as the binary `.pmesh`
//! asset, and builds whole batches from a `meshes.toml` manifest.

pub mod formats;
pub mod manifest;
pub mod obj;

mod error;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use procmesh_core::MeshData;
use serde::Deserialize;

pub use error::ExportError;
pub use formats::{MeshAsset, MeshAssetHeader, read_mesh_asset, write_mesh_asset};
pub use manifest::{MeshManifest, build_all, load_manifest, validate};
pub use obj::{obj_string, write_obj};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Wavefront OBJ text
    #[default]
    Obj,
    /// Little-endian `.pmesh` asset
    Binary,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Binary => "pmesh",
        }
    }
}

/// Write `mesh` to `path` in the given format
pub fn export_mesh(mesh: &MeshData, path: &Path, format: ExportFormat) -> Result<()> {
    let mut writer = manifest::create_output(path)?;
    let written = match format {
        ExportFormat::Obj => write_obj(&mut writer, mesh),
        ExportFormat::Binary => write_mesh_asset(&mut writer, &MeshAsset::from_mesh(mesh)),
    };
    written.with_context(|| format!("Failed to write mesh: {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush mesh: {:?}", path))
}
