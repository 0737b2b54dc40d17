//! The connection graph: all paths plus the undirected links between their
//! ends.

use std::ops::Index;

use hashbrown::HashMap;

use super::path::{Path, PathEnd};
use crate::geometry::Curve;
use crate::{Error, PathId, PathIndex};

/// One end of one path inside a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathPort {
    pub path: PathIndex,
    pub end: PathEnd,
}

/// Undirected link between two path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: PathPort,
    pub b: PathPort,
}

/// Immutable set of paths and links.
///
/// Paths live in a dense arena addressed by [`PathIndex`]; the input ids are
/// kept in a side index. Every link is stored once in `links` and mirrored
/// into the connection lists of both paths it joins.
#[derive(Debug, Clone)]
pub struct PathGraph<G = Curve> {
    paths: Vec<Path<G>>,
    index: HashMap<PathId, PathIndex>,
    links: Vec<Link>,
}

impl<G> PathGraph<G> {
    pub(crate) fn new() -> Self {
        Self {
            paths: Vec::new(),
            index: HashMap::new(),
            links: Vec::new(),
        }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn paths(&self) -> &[Path<G>] {
        &self.paths
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, index: PathIndex) -> Option<&Path<G>> {
        self.paths.get(index)
    }

    /// Arena position of the path with input id `id`.
    pub fn index_of(&self, id: PathId) -> Option<PathIndex> {
        self.index.get(&id).copied()
    }

    pub fn by_id(&self, id: PathId) -> Option<&Path<G>> {
        self.index_of(id).map(|index| &self.paths[index])
    }

    /// Like [`index_of`](Self::index_of), but unknown ids are an error.
    pub fn require(&self, id: PathId) -> Result<PathIndex, Error> {
        self.index_of(id).ok_or(Error::UnknownPath(id))
    }

    pub(crate) fn insert_path(&mut self, path: Path<G>) -> Result<PathIndex, Error> {
        let id = path.id();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicatePath(id));
        }
        let index = self.paths.len();
        self.paths.push(path);
        self.index.insert(id, index);
        Ok(index)
    }

    /// Join two path ends. This is the only way connections get added, so
    /// both sides always carry the mirrored entry.
    pub(crate) fn link(&mut self, a: PathPort, b: PathPort) {
        self.paths[a.path].add_outgoing_connection(a.end, b.path, b.end);
        self.paths[b.path].add_outgoing_connection(b.end, a.path, a.end);
        self.links.push(Link { a, b });
    }
}

impl<G> Index<PathIndex> for PathGraph<G> {
    type Output = Path<G>;

    fn index(&self, index: PathIndex) -> &Path<G> {
        &self.paths[index]
    }
}
