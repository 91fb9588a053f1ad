use glam::Vec4;

use crate::document::MaterialDesc;
use crate::resources::{ResourceHandle, ResourceKind, ResourceTracker};

/// Shading data owned by a single model object.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shine: f32,
    pub transparency: f32,
    resource: Option<ResourceHandle>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_desc(&MaterialDesc {
            name: name.into(),
            ..Default::default()
        })
    }

    pub fn from_desc(desc: &MaterialDesc) -> Self {
        Self {
            name: desc.name.clone(),
            diffuse: desc.diffuse,
            specular: desc.specular,
            shine: desc.shine,
            transparency: desc.transparency.clamp(0.0, 1.0),
            resource: None,
        }
    }

    /// Diffuse colour with alpha reduced by the transparency.
    pub fn display_color(&self) -> Vec4 {
        self.diffuse.truncate().extend(self.diffuse.w * (1.0 - self.transparency))
    }

    pub fn upload(&mut self, tracker: &ResourceTracker) {
        if self.resource.is_none() {
            self.resource = Some(tracker.allocate(ResourceKind::Material, self.name.clone()));
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.resource.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparency_fades_display_color() {
        let material = Material::from_desc(&MaterialDesc {
            name: "glass".into(),
            diffuse: Vec4::new(0.2, 0.4, 0.6, 1.0),
            transparency: 0.75,
            ..Default::default()
        });

        assert!(material
            .display_color()
            .abs_diff_eq(Vec4::new(0.2, 0.4, 0.6, 0.25), 1e-6));
    }

    #[test]
    fn transparency_is_clamped() {
        let material = Material::from_desc(&MaterialDesc {
            transparency: 3.0,
            ..Default::default()
        });
        assert_eq!(material.transparency, 1.0);
    }

    #[test]
    fn upload_allocates_once() {
        let tracker = ResourceTracker::new();
        let mut material = Material::new("steel");

        material.upload(&tracker);
        material.upload(&tracker);

        assert!(material.is_uploaded());
        assert_eq!(tracker.live(), 1);
    }
}
