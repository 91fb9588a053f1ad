#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Instance references nested deeper than this are skipped. Guards
    /// against definitions that (indirectly) reference themselves.
    pub max_instance_depth: usize,
    /// Flatten objects that are hidden or sit on hidden layers.
    pub include_hidden: bool,
    /// Allocate native resources for meshes and materials while wrapping a document.
    pub upload_resources: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_instance_depth: 16,
            include_hidden: false,
            upload_resources: true,
        }
    }
}
