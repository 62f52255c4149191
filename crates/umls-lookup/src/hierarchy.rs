//! Transitive-closure hierarchy index.
//!
//! `ClosureBuilder` consumes the direct is-a edge set and computes, for
//! every concept with at least one descendant, the complete set of its
//! transitive descendants. The result, `HierarchyIndex`, is immutable and
//! answers `is_descendant_of` with two hash probes.
//!
//! Relations are stored as a flat code→descendant-set map rather than as
//! edge pairs, so queries never walk the graph.

use std::collections::{HashMap, HashSet};

use umls_types::{ConceptCode, IsaEdge};

/// Builds a [`HierarchyIndex`] from direct is-a edges.
///
/// The edge set is expected to be acyclic; that invariant is assumed, not
/// verified. The expansion keeps a per-build in-progress set, so a cyclic
/// input still terminates: a back edge contributes the child code itself but
/// not its unfinished sub-closure, leaving that node's set possibly
/// incomplete. Cyclic input is a data-quality defect in the source graph.
///
/// # Example
///
/// ```
/// use umls_lookup::ClosureBuilder;
/// use umls_types::IsaEdge;
///
/// let index = ClosureBuilder::from_edges([
///     IsaEdge::new("disease", "diabetes"),
///     IsaEdge::new("diabetes", "type-2-diabetes"),
/// ])
/// .build();
///
/// assert!(index.is_descendant_of("type-2-diabetes", "disease"));
/// ```
#[derive(Debug, Default)]
pub struct ClosureBuilder {
    /// Direct-children adjacency: parent -> set of direct children.
    children: HashMap<ConceptCode, HashSet<ConceptCode>>,
}

impl ClosureBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an edge list.
    pub fn from_edges(edges: impl IntoIterator<Item = IsaEdge>) -> Self {
        let mut builder = Self::new();
        for edge in edges {
            builder.add_edge(edge);
        }
        builder
    }

    /// Adds a direct parent→child edge.
    ///
    /// Duplicate edges are deduplicated here; a child reachable through
    /// several paths still appears exactly once in every descendant set.
    pub fn add_edge(&mut self, edge: IsaEdge) {
        self.children.entry(edge.parent).or_default().insert(edge.child);
    }

    /// Returns the number of distinct parent nodes added so far.
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    /// Computes the full descendant set for every parent node.
    ///
    /// Each node is expanded at most once across the whole build: the
    /// expansion is an iterative depth-first walk (explicit stack, no
    /// recursion, so deep hierarchies cannot exhaust the call stack) that
    /// memoizes completed descendant sets, and every ancestor then unions in
    /// its children's finished sets.
    pub fn build(self) -> HierarchyIndex {
        let children = self.children;
        let mut descendants: HashMap<ConceptCode, HashSet<ConceptCode>> =
            HashMap::with_capacity(children.len());
        // Nodes currently on the expansion stack; a child found here closes
        // a cycle and is inserted without its sub-closure.
        let mut in_progress: HashSet<ConceptCode> = HashSet::new();

        for root in children.keys() {
            if descendants.contains_key(root) {
                continue;
            }

            // (node, expanded): the first visit pushes the node back with
            // expanded=true below its unvisited children, so the second
            // visit sees every child's completed set.
            let mut stack: Vec<(ConceptCode, bool)> = vec![(root.clone(), false)];

            while let Some((node, expanded)) = stack.pop() {
                if expanded {
                    let mut set = HashSet::new();
                    if let Some(direct) = children.get(&node) {
                        for child in direct {
                            set.insert(child.clone());
                            if let Some(sub) = descendants.get(child) {
                                set.extend(sub.iter().cloned());
                            }
                        }
                    }
                    in_progress.remove(&node);
                    descendants.insert(node, set);
                } else {
                    if descendants.contains_key(&node) || in_progress.contains(&node) {
                        continue;
                    }
                    in_progress.insert(node.clone());
                    stack.push((node.clone(), true));
                    if let Some(direct) = children.get(&node) {
                        for child in direct {
                            if !descendants.contains_key(child) && !in_progress.contains(child) {
                                stack.push((child.clone(), false));
                            }
                        }
                    }
                }
            }
        }

        // Leaves get expanded to empty sets along the way; only nodes with
        // at least one descendant belong in the index.
        descendants.retain(|_, set| !set.is_empty());

        HierarchyIndex { descendants }
    }
}

/// Immutable mapping from concept code to its full descendant set.
///
/// Covers every node with at least one descendant; nodes without
/// descendants are absent, which lookups treat as an empty set. A code is
/// never a member of its own descendant set; the reflexive case is handled
/// by the query layer.
///
/// Once built the index is never mutated, so any number of threads may read
/// it concurrently without locking.
#[derive(Debug, Default)]
pub struct HierarchyIndex {
    descendants: HashMap<ConceptCode, HashSet<ConceptCode>>,
}

impl HierarchyIndex {
    /// Checks if a candidate concept is the same as, or a descendant of,
    /// the given ancestor concept.
    ///
    /// Equality is string-level and always counts, even for codes that
    /// appear in no edge. Unknown codes on either side otherwise yield
    /// `false`, never an error.
    pub fn is_descendant_of(&self, candidate: &str, ancestor: &str) -> bool {
        candidate == ancestor
            || self
                .descendants
                .get(ancestor)
                .is_some_and(|set| set.contains(candidate))
    }

    /// Gets the full descendant set of a concept, if it has one.
    pub fn descendants_of(&self, code: &str) -> Option<&HashSet<ConceptCode>> {
        self.descendants.get(code)
    }

    /// Returns the number of concepts that have at least one descendant.
    pub fn parent_count(&self) -> usize {
        self.descendants.len()
    }

    /// Returns the total number of (ancestor, descendant) pairs stored.
    pub fn pair_count(&self) -> usize {
        self.descendants.values().map(|set| set.len()).sum()
    }

    /// Returns true if the index holds no hierarchy at all.
    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(&str, &str)]) -> Vec<IsaEdge> {
        pairs
            .iter()
            .map(|(parent, child)| IsaEdge::new(*parent, *child))
            .collect()
    }

    /// The three-level chain plus a second parent of C.
    fn diamond_index() -> HierarchyIndex {
        ClosureBuilder::from_edges(edges(&[("A", "B"), ("B", "C"), ("D", "C")])).build()
    }

    #[test]
    fn test_reflexive() {
        let index = diamond_index();
        assert!(index.is_descendant_of("A", "A"));
        // Reflexivity holds even for codes absent from the graph
        assert!(index.is_descendant_of("X", "X"));
    }

    #[test]
    fn test_direct_edge() {
        let index = diamond_index();
        assert!(index.is_descendant_of("B", "A"));
        assert!(!index.is_descendant_of("A", "B"));
    }

    #[test]
    fn test_transitive() {
        let index = diamond_index();
        assert!(index.is_descendant_of("C", "A"));
        assert!(index.is_descendant_of("C", "B"));
        assert!(index.is_descendant_of("C", "D"));
        assert!(!index.is_descendant_of("B", "D"));
        assert!(!index.is_descendant_of("A", "C"));
    }

    #[test]
    fn test_unknown_codes() {
        let index = diamond_index();
        assert!(!index.is_descendant_of("UNKNOWN", "ALSO_UNKNOWN"));
        assert!(!index.is_descendant_of("UNKNOWN", "A"));
        assert!(!index.is_descendant_of("C", "UNKNOWN"));
    }

    #[test]
    fn test_multiple_inheritance_dedup() {
        // E is reachable from A through both B and C
        let index =
            ClosureBuilder::from_edges(edges(&[("A", "B"), ("A", "C"), ("B", "E"), ("C", "E")]))
                .build();

        let set = index.descendants_of("A").unwrap();
        assert_eq!(set.len(), 3); // B, C, E exactly once each
        assert!(index.is_descendant_of("E", "A"));
    }

    #[test]
    fn test_duplicate_edges() {
        let index = ClosureBuilder::from_edges(edges(&[("A", "B"), ("A", "B")])).build();
        assert_eq!(index.descendants_of("A").unwrap().len(), 1);
    }

    #[test]
    fn test_leaves_absent() {
        let index = diamond_index();
        assert!(index.descendants_of("C").is_none());
        assert_eq!(index.parent_count(), 3); // A, B, D
    }

    #[test]
    fn test_deep_chain_on_small_stack() {
        // A 64 KiB stack cannot hold a 2000-frame recursive expansion; the
        // explicit-stack walk must complete regardless.
        let handle = std::thread::Builder::new()
            .stack_size(64 * 1024)
            .spawn(|| {
                let mut builder = ClosureBuilder::new();
                let depth = 2_000;
                for i in 0..depth {
                    builder.add_edge(IsaEdge::new(format!("n{i}"), format!("n{}", i + 1)));
                }

                let index = builder.build();
                assert!(index.is_descendant_of(&format!("n{depth}"), "n0"));
                assert_eq!(index.descendants_of("n0").unwrap().len(), depth);
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_cycle_terminates() {
        // Invalid input, but the build must still finish and stay reflexive.
        let index = ClosureBuilder::from_edges(edges(&[("A", "B"), ("B", "A")])).build();
        assert!(index.is_descendant_of("B", "A"));
        assert!(index.is_descendant_of("A", "A"));
    }

    #[test]
    fn test_empty_graph() {
        let index = ClosureBuilder::new().build();
        assert!(index.is_empty());
        assert!(index.is_descendant_of("X", "X"));
        assert!(!index.is_descendant_of("X", "Y"));
    }

    #[test]
    fn test_shared_subtree_counted_once() {
        // B and C both lead to D -> {E}; memoized sets must not leak extras.
        let index = ClosureBuilder::from_edges(edges(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
            ("D", "E"),
        ]))
        .build();

        assert_eq!(index.descendants_of("B").unwrap().len(), 2); // D, E
        assert_eq!(index.descendants_of("C").unwrap().len(), 2); // D, E
        assert_eq!(index.descendants_of("A").unwrap().len(), 4); // B, C, D, E
    }
}
