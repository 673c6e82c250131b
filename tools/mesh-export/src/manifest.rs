//! meshes.toml manifest parsing and batch building

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glam::{Vec2, Vec3};
use hashbrown::HashSet;
use procmesh_core::{MeshData, MeshRequest, Plane, create_mesh};
use procmesh_runtime::ModifierSettings;
use serde::Deserialize;
use tracing::{info, trace, warn};

use crate::ExportFormat;

/// meshes.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct MeshManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default, rename = "mesh")]
    pub meshes: Vec<MeshEntry>,
}

/// Where and how built meshes are written
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_resolution() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeName {
    Plane,
    Cube,
    Sphere,
}

/// Single `[[mesh]]` entry
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    /// Output file stem and mesh name
    pub id: String,
    pub shape: ShapeName,
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Two components for planes, three otherwise
    pub size: Vec<f32>,
    #[serde(default)]
    pub offset: Vec3,
    /// Plane only, defaults to XZ
    pub axis: Option<Plane>,
    #[serde(default = "default_true")]
    pub forward_facing: bool,
    #[serde(default = "default_true")]
    pub backface_culling: bool,
    /// Cube only
    pub roundness: Option<f32>,
    /// Seconds fed to the modifiers
    #[serde(default)]
    pub time: f32,
    #[serde(default)]
    pub modifiers: Vec<ModifierEntry>,
}

/// Single `[[mesh.modifiers]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct ModifierEntry {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: ModifierSettings,
}

impl MeshEntry {
    /// Translate the entry into a creation request, without validating ranges
    pub fn to_request(&self) -> Result<MeshRequest> {
        if self.axis.is_some() && self.shape != ShapeName::Plane {
            warn!("Mesh '{}': axis is only used by planes, ignoring", self.id);
        }
        if self.roundness.is_some() && self.shape != ShapeName::Cube {
            warn!("Mesh '{}': roundness is only used by cubes, ignoring", self.id);
        }

        let request = match self.shape {
            ShapeName::Plane => {
                let [x, y] = self.size_components::<2>()?;
                let axis = self.axis.unwrap_or(Plane::Xz);
                MeshRequest::plane(&self.id, self.resolution, Vec2::new(x, y), axis)
            }
            ShapeName::Cube => {
                let size = Vec3::from_array(self.size_components::<3>()?);
                MeshRequest::cube(&self.id, self.resolution, size, self.roundness.unwrap_or(0.0))
            }
            ShapeName::Sphere => {
                let size = Vec3::from_array(self.size_components::<3>()?);
                MeshRequest::sphere(&self.id, self.resolution, size)
            }
        };

        Ok(request
            .with_offset(self.offset)
            .with_forward_facing(self.forward_facing)
            .with_backface_culling(self.backface_culling))
    }

    fn size_components<const N: usize>(&self) -> Result<[f32; N]> {
        match <[f32; N]>::try_from(self.size.as_slice()) {
            Ok(size) => Ok(size),
            Err(_) => bail!(
                "Mesh '{}': {:?} needs {} size components, got {}",
                self.id,
                self.shape,
                N,
                self.size.len()
            ),
        }
    }

    /// Generate the mesh and run its enabled modifiers at `time`
    pub fn build(&self) -> Result<MeshData> {
        let request = self.to_request()?;
        let mut mesh =
            create_mesh(&request).with_context(|| format!("Failed to create mesh '{}'", self.id))?;

        for (i, entry) in self.modifiers.iter().enumerate() {
            if !entry.enabled {
                trace!("Mesh '{}': modifier {} disabled", self.id, i);
                continue;
            }
            entry.settings.clone().into_modifier().modify(&mut mesh, self.time);
        }

        Ok(mesh)
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<MeshManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

pub fn parse_manifest(content: &str) -> Result<MeshManifest> {
    Ok(toml::from_str(content)?)
}

/// Check ids and every request without generating geometry
pub fn validate(manifest: &MeshManifest) -> Result<()> {
    if manifest.meshes.is_empty() {
        warn!("Manifest declares no meshes");
    }

    let mut ids = HashSet::new();
    for entry in &manifest.meshes {
        if entry.id.is_empty() {
            bail!("Mesh id must not be empty");
        }
        if !ids.insert(entry.id.as_str()) {
            bail!("Duplicate mesh id '{}'", entry.id);
        }
        entry
            .to_request()?
            .validate()
            .with_context(|| format!("Invalid mesh '{}'", entry.id))?;
    }

    Ok(())
}

/// Build every mesh in parallel and write it to `output_dir`.
///
/// Returns the written paths in manifest order.
pub fn build_all(manifest: &MeshManifest, output_dir: &Path) -> Result<Vec<PathBuf>> {
    use rayon::prelude::*;

    validate(manifest)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let format = manifest.output.format;
    manifest
        .meshes
        .par_iter()
        .map(|entry| -> Result<PathBuf> {
            let mesh = entry.build()?;
            let path = output_dir.join(format!("{}.{}", entry.id, format.extension()));
            crate::export_mesh(&mesh, &path, format)?;
            info!(
                "Built '{}': {} vertices, {} triangles -> {:?}",
                entry.id,
                mesh.vertex_count(),
                mesh.triangle_count(),
                path
            );
            Ok(path)
        })
        .collect()
}

/// Output directory for a manifest at `manifest_path`, unless overridden
pub fn resolve_output_dir(
    manifest: &MeshManifest,
    manifest_path: &Path,
    output_override: Option<&Path>,
) -> PathBuf {
    match output_override {
        Some(dir) => dir.to_path_buf(),
        None => manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&manifest.output.dir),
    }
}

/// Open `path` for buffered writing, creating parent directories
pub(crate) fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    Ok(BufWriter::new(file))
}
