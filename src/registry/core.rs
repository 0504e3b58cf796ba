use std::collections::HashMap;

use blake3::{Hash, Hasher};

use crate::content::ContentNode;
use crate::layout::{Composer, Room};
use crate::metrics::LayoutMetrics;

/// Content-addressed reuse of composed rooms across layout passes.
///
/// Re-running a pass after a document edit recomposes only the sections
/// whose content actually changed; untouched subtrees are served from the
/// cache. The names of freshly composed sections are collected so a
/// renderer can rebuild just those meshes.
///
/// A cache owns its composer, so cached rooms never mix configurations;
/// a different configuration means a new cache.
#[derive(Debug)]
pub struct PlanCache {
    composer: Composer,
    rooms: HashMap<Hash, Room>,
    recomposed: Vec<String>,
    hits: u64,
}

impl PlanCache {
    pub fn new(composer: Composer) -> Self {
        Self {
            composer,
            rooms: HashMap::new(),
            recomposed: Vec::new(),
            hits: 0,
        }
    }

    /// Compose `node` as the exhibition root, reusing cached subtrees.
    ///
    /// # Panics
    /// Panics if any exhibit carries a non-positive width, like
    /// [`Composer::compose`].
    pub fn compose(&mut self, node: &ContentNode) -> Room {
        let mut metrics = LayoutMetrics::new();
        self.compose_level(node, 0, &mut metrics)
    }

    fn compose_level(
        &mut self,
        node: &ContentNode,
        level: u32,
        metrics: &mut LayoutMetrics,
    ) -> Room {
        let key = subtree_hash(node, level == 0);
        if let Some(room) = self.rooms.get(&key) {
            self.hits += 1;
            return room.clone();
        }

        let child_rooms = node
            .children
            .iter()
            .map(|child| self.compose_level(child, level + 1, metrics))
            .collect();
        let room = self.composer.assemble(node, child_rooms, level, metrics);
        self.rooms.insert(key, room.clone());
        self.recomposed.push(node.name.clone());
        room
    }

    /// Names of sections composed fresh since the last call, in bottom-up
    /// completion order.
    pub fn take_recomposed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.recomposed)
    }

    /// Cache lookups that were answered without recomposing.
    pub fn hit_count(&self) -> u64 {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Merkle-style identity of a section subtree: name, exhibit handles and
/// width bits, child identities, and whether the section sits at the root
/// (the root's wall set differs).
fn subtree_hash(node: &ContentNode, is_root: bool) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(&[is_root as u8]);
    hasher.update(&(node.name.len() as u64).to_le_bytes());
    hasher.update(node.name.as_bytes());
    hasher.update(&(node.exhibits.len() as u64).to_le_bytes());
    for exhibit in &node.exhibits {
        hasher.update(&exhibit.handle.to_le_bytes());
        hasher.update(&exhibit.width.to_le_bytes());
    }
    for child in &node.children {
        hasher.update(subtree_hash(child, false).as_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ExhibitRef;

    fn cache() -> PlanCache {
        PlanCache::new(Composer::with_default())
    }

    fn exhibition() -> ContentNode {
        ContentNode::section("Kangaroo")
            .with_exhibit(ExhibitRef::new(0, 20.0))
            .with_child(ContentNode::section("Taxonomy").with_exhibit(ExhibitRef::new(1, 35.0)))
            .with_child(ContentNode::section("Habitat").with_exhibit(ExhibitRef::new(2, 60.0)))
    }

    #[test]
    fn first_pass_composes_every_section() {
        let mut cache = cache();
        let tree = exhibition();
        let room = cache.compose(&tree);

        assert_eq!(room.sub_rooms().count(), 2);
        assert_eq!(cache.hit_count(), 0);
        let mut recomposed = cache.take_recomposed();
        recomposed.sort();
        assert_eq!(recomposed, vec!["Habitat", "Kangaroo", "Taxonomy"]);
    }

    #[test]
    fn unchanged_tree_is_served_entirely_from_cache() {
        let mut cache = cache();
        let tree = exhibition();
        let first = cache.compose(&tree);
        cache.take_recomposed();

        let second = cache.compose(&tree);
        assert_eq!(first, second);
        assert_eq!(cache.hit_count(), 1);
        assert!(cache.take_recomposed().is_empty());
    }

    #[test]
    fn an_edit_recomposes_only_the_changed_branch_and_its_ancestors() {
        let mut cache = cache();
        let mut tree = exhibition();
        cache.compose(&tree);
        cache.take_recomposed();

        tree.children[1].exhibits[0].width = 75.0;
        cache.compose(&tree);

        let mut recomposed = cache.take_recomposed();
        recomposed.sort();
        assert_eq!(recomposed, vec!["Habitat", "Kangaroo"]);
    }

    #[test]
    fn root_and_nested_identities_never_collide() {
        let mut cache = cache();
        let annex = ContentNode::section("Annex");
        let tree = ContentNode::section("Annex").with_child(annex.clone());

        let root = cache.compose(&tree);
        // The nested "Annex" has one doorway; a root "Annex" must get two.
        let standalone = cache.compose(&annex);
        assert_eq!(root.sub_rooms().next().unwrap().doorways.len(), 1);
        assert_eq!(standalone.doorways.len(), 2);
    }
}
