//! Mesh host: rebuilds the mesh every update and runs the modifier chain

use glam::{Vec2, Vec3};
use procmesh_core::{MeshData, MeshError, MeshRequest, Plane, create_mesh};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::collider::{Collider, ColliderKind};
use crate::modifiers::MeshModifier;
use crate::stats::MeshStats;

/// Shape selector of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshType {
    #[default]
    Plane,
    Cube,
    Sphere,
}

impl MeshType {
    /// Display name given to generated meshes
    pub fn display_name(self) -> &'static str {
        match self {
            MeshType::Plane => "Procedural Plane",
            MeshType::Cube => "Procedural Cube",
            MeshType::Sphere => "Procedural Sphere",
        }
    }
}

/// Everything the host needs to rebuild its mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub mesh_type: MeshType,
    pub plane_axis: Plane,
    pub backface_culling: bool,
    pub forward_facing: bool,
    /// Cube only
    pub roundness: f32,
    /// Plane extent on its own plane
    pub size_2d: Vec2,
    /// Cube and sphere extent
    pub size_3d: Vec3,
    pub offset: Vec3,
    pub resolution: u32,
    pub collider: ColliderKind,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            mesh_type: MeshType::Plane,
            plane_axis: Plane::Xz,
            backface_culling: true,
            forward_facing: true,
            roundness: 0.0,
            size_2d: Vec2::ONE,
            size_3d: Vec3::ONE,
            offset: Vec3::ZERO,
            resolution: 1,
            collider: ColliderKind::None,
        }
    }
}

impl GeneratorSettings {
    pub fn to_request(&self) -> MeshRequest {
        let name = self.mesh_type.display_name();
        let request = match self.mesh_type {
            MeshType::Plane => MeshRequest::plane(name, self.resolution, self.size_2d, self.plane_axis),
            MeshType::Cube => MeshRequest::cube(name, self.resolution, self.size_3d, self.roundness),
            MeshType::Sphere => MeshRequest::sphere(name, self.resolution, self.size_3d),
        };
        request
            .with_offset(self.offset)
            .with_forward_facing(self.forward_facing)
            .with_backface_culling(self.backface_culling)
    }
}

/// One entry of the modifier chain; a missing or disabled target is skipped
pub struct AppliedModifier {
    pub enabled: bool,
    pub target: Option<Box<dyn MeshModifier>>,
}

impl AppliedModifier {
    pub fn new(target: Box<dyn MeshModifier>) -> Self {
        Self {
            enabled: true,
            target: Some(target),
        }
    }

    /// Placeholder slot with no modifier assigned
    pub fn empty() -> Self {
        Self {
            enabled: true,
            target: None,
        }
    }

    /// The modifier to run, if any
    pub fn active(&self) -> Option<&dyn MeshModifier> {
        if !self.enabled {
            return None;
        }
        self.target.as_deref()
    }
}

/// Callback notified after every successful update
pub type MeshObserver = Box<dyn FnMut(&MeshData) + Send>;

/// Owns the settings, the modifier chain and the latest mesh.
///
/// Every [`update`](Self::update) rebuilds the mesh from scratch, applies
/// the enabled modifiers in order, refreshes the collider and notifies
/// observers.
pub struct MeshGenerator {
    settings: GeneratorSettings,
    modifiers: Vec<AppliedModifier>,
    observers: Vec<MeshObserver>,
    mesh: Option<MeshData>,
    collider: Option<Collider>,
}

impl MeshGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self {
            settings,
            modifiers: Vec::new(),
            observers: Vec::new(),
            mesh: None,
            collider: None,
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GeneratorSettings {
        &mut self.settings
    }

    /// Append a modifier to the end of the chain
    pub fn add_modifier(&mut self, modifier: Box<dyn MeshModifier>) {
        self.modifiers.push(AppliedModifier::new(modifier));
    }

    pub fn modifiers(&self) -> &[AppliedModifier] {
        &self.modifiers
    }

    pub fn modifiers_mut(&mut self) -> &mut Vec<AppliedModifier> {
        &mut self.modifiers
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&MeshData) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Rebuild the mesh for the given time in seconds
    pub fn update(&mut self, time: f32) -> Result<&MeshData, MeshError> {
        let mut mesh = create_mesh(&self.settings.to_request())?;

        for (i, applied) in self.modifiers.iter().enumerate() {
            match applied.active() {
                Some(modifier) => modifier.modify(&mut mesh, time),
                None => trace!("Skipping modifier slot {i}"),
            }
        }

        self.collider = Collider::from_mesh(self.settings.collider, &mesh);
        for observer in &mut self.observers {
            observer(&mesh);
        }

        debug!("Updated '{}' at t={time}: {}", mesh.name, MeshStats::from_mesh(&mesh));
        Ok(&*self.mesh.insert(mesh))
    }

    /// Latest mesh, `None` before the first successful update
    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    pub fn stats(&self) -> Option<MeshStats> {
        self.mesh.as_ref().map(MeshStats::from_mesh)
    }
}
