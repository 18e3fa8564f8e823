// Parent container resolution
//
// Walks from an arbitrary view up through its ancestors and picks the
// container a bar should be attached to.

use crate::error::BarError;

/// How a view can host a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Layout that knows how to move floating action buttons out of the way.
    FabAware,
    /// The window's designated content root.
    ContentRoot,
    /// Any other layout that can host an overlay child.
    Container,
    /// Leaf views and layouts that cannot host a bar.
    Other,
}

/// Parent links and container kinds of a view hierarchy.
pub trait ViewTree {
    type Node: Clone;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn kind(&self, node: &Self::Node) -> ContainerKind;
}

/// Find the container bars should be attached to, starting at `start` itself.
///
/// The first FAB-aware layout wins, then the content root. Failing both, the
/// outermost plain container seen on the way up is used.
pub fn find_suitable_parent<T: ViewTree>(tree: &T, start: &T::Node) -> Result<T::Node, BarError> {
    let mut fallback = None;
    let mut node = Some(start.clone());

    while let Some(current) = node {
        match tree.kind(&current) {
            ContainerKind::FabAware | ContainerKind::ContentRoot => return Ok(current),
            ContainerKind::Container => fallback = Some(current.clone()),
            ContainerKind::Other => {}
        }
        node = tree.parent(&current);
    }

    fallback.ok_or(BarError::NoSuitableParent)
}

/// Index of a view inside a [`ViewArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

#[derive(Debug, Clone)]
struct ViewNode {
    name: String,
    kind: ContainerKind,
    parent: Option<ViewId>,
}

/// Flat, append-only view hierarchy.
///
/// Hosts without their own widget tree (the demo binary, tests) describe their
/// layout with it.
#[derive(Debug, Clone, Default)]
pub struct ViewArena {
    nodes: Vec<ViewNode>,
}

impl ViewArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view without a parent.
    pub fn add_root(&mut self, name: impl Into<String>, kind: ContainerKind) -> ViewId {
        self.push(name.into(), kind, None)
    }

    /// Add a view under `parent`.
    pub fn add_child(
        &mut self,
        parent: ViewId,
        name: impl Into<String>,
        kind: ContainerKind,
    ) -> ViewId {
        self.push(name.into(), kind, Some(parent))
    }

    /// Name of a node, or `None` for an id from another arena.
    pub fn name(&self, id: ViewId) -> Option<&str> {
        self.nodes.get(id.0).map(|node| node.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, name: String, kind: ContainerKind, parent: Option<ViewId>) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(ViewNode { name, kind, parent });
        id
    }
}

impl ViewTree for ViewArena {
    type Node = ViewId;

    fn parent(&self, node: &ViewId) -> Option<ViewId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn kind(&self, node: &ViewId) -> ContainerKind {
        self.nodes
            .get(node.0)
            .map_or(ContainerKind::Other, |n| n.kind)
    }
}
