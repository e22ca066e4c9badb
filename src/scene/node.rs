// scene/node.rs
// Stand-ins for the engine's scene-node resources. The batching core only
// needs activation, layer inheritance and a sorting-order slot; everything
// else about rendering a node is the host engine's business.

/// Container node that batch groups attach their render nodes to.
///
/// Passed explicitly at batcher construction so the core never reaches for
/// ambient scene state.
#[derive(Debug, Clone)]
pub struct RenderRoot {
    name: String,
    layer: u32,
}

impl RenderRoot {
    pub fn new(name: impl Into<String>, layer: u32) -> Self {
        Self {
            name: name.into(),
            layer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }
}

/// A render node owned by exactly one batch group.
#[derive(Debug)]
pub struct RenderNode {
    name: String,
    layer: u32,
    active: bool,
    sorting_order: u32,
}

impl RenderNode {
    pub fn new(name: impl Into<String>, root: &RenderRoot) -> Self {
        Self {
            name: name.into(),
            layer: root.layer(),
            active: true,
            sorting_order: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn sorting_order(&self) -> u32 {
        self.sorting_order
    }

    pub fn set_sorting_order(&mut self, order: u32) {
        self.sorting_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_inherits_root_layer() {
        let root = RenderRoot::new("ui", 5);
        let node = RenderNode::new("batch:0", &root);
        assert_eq!(node.layer(), 5);
        assert!(node.is_active());
        assert_eq!(node.sorting_order(), 0);
    }
}
