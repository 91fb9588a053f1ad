use glam::Vec4;

use crate::document::LayerDesc;

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub color: Vec4,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl From<&LayerDesc> for Layer {
    fn from(desc: &LayerDesc) -> Self {
        Self {
            name: desc.name.clone(),
            visible: desc.visible,
            color: desc.color,
        }
    }
}
