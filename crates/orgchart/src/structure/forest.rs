//! Arena-backed forest of position trees.
//!
//! Nodes live in a single `Vec` indexed by their record's input position, and
//! parent/child links are stored as [`NodeIndex`] values. [`TreeNode`] is a
//! cheap borrowed view that walks those links.

use std::fmt;

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};

use orgchart_core::record::PositionRecord;

use super::StructureError;

/// Index of a node inside a [`Forest`].
///
/// Equal to the zero-based position of the node's record in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the raw index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct NodeEntry<'a> {
    record: &'a PositionRecord,
    parent: Option<NodeIndex>,
    depth: usize,
    children: Vec<NodeIndex>,
}

/// Visit state of a node during cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnPath,
    Done,
}

/// A collection of disjoint position trees.
///
/// Built fresh from a record slice on every pass; it borrows the records and
/// is never updated in place.
#[derive(Debug)]
pub struct Forest<'a> {
    nodes: Vec<NodeEntry<'a>>,
    roots: Vec<NodeIndex>,
    lookup: IndexMap<&'a str, NodeIndex>,
}

impl<'a> Forest<'a> {
    /// Builds a forest from flat records.
    ///
    /// Records whose `parent_id` is absent or does not match any record's id
    /// become roots. Children and roots keep the relative order of their
    /// records in the input.
    ///
    /// # Errors
    ///
    /// - [`StructureError::DuplicateId`] if two records share an id.
    /// - [`StructureError::CyclicReference`] if following parent references
    ///   from any record revisits a record on the same chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgchart::{record::PositionRecord, structure::Forest};
    ///
    /// let records = vec![
    ///     PositionRecord::new("1", "Mansoor Ahmad", "CEO"),
    ///     PositionRecord::new("2", "Bashart Gill", "HRO").with_parent("1"),
    ///     PositionRecord::new("3", "Dr Mudasar Hussain", "Pathologist").with_parent("1"),
    /// ];
    ///
    /// let forest = Forest::build(&records).unwrap();
    /// let root = forest.roots().next().unwrap();
    /// let children: Vec<&str> = root.children().map(|child| child.id()).collect();
    /// assert_eq!(children, ["2", "3"]);
    /// ```
    pub fn build(records: &'a [PositionRecord]) -> Result<Self, StructureError> {
        debug!(records_count = records.len(); "Building forest");

        let lookup = Self::index_records(records)?;

        let parents: Vec<Option<NodeIndex>> = records
            .iter()
            .map(|record| {
                record
                    .parent_id()
                    .and_then(|parent_id| lookup.get(parent_id).copied())
            })
            .collect();

        Self::detect_cycles(records, &parents)?;

        let mut nodes: Vec<NodeEntry<'a>> = records
            .iter()
            .zip(&parents)
            .map(|(record, &parent)| NodeEntry {
                record,
                parent,
                depth: 0,
                children: Vec::new(),
            })
            .collect();

        let mut roots = Vec::new();
        for (index, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => nodes[parent.0].children.push(NodeIndex(index)),
                None => roots.push(NodeIndex(index)),
            }
        }

        let mut stack: Vec<(NodeIndex, usize)> = roots.iter().map(|&root| (root, 0)).collect();
        while let Some((index, depth)) = stack.pop() {
            nodes[index.0].depth = depth;
            stack.extend(nodes[index.0].children.iter().map(|&child| (child, depth + 1)));
        }

        debug!(
            nodes_count = nodes.len(),
            roots_count = roots.len();
            "Forest built",
        );

        let forest = Self {
            nodes,
            roots,
            lookup,
        };
        trace!(forest:?; "Built forest");

        Ok(forest)
    }

    /// Pass 1: map every id to its node, rejecting duplicates.
    fn index_records(
        records: &'a [PositionRecord],
    ) -> Result<IndexMap<&'a str, NodeIndex>, StructureError> {
        let mut lookup = IndexMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match lookup.entry(record.id()) {
                Entry::Occupied(entry) => {
                    let first: &NodeIndex = entry.get();
                    return Err(StructureError::DuplicateId {
                        id: record.id().to_string(),
                        first: first.0,
                        second: index,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(NodeIndex(index));
                }
            }
        }

        Ok(lookup)
    }

    /// Walks every parent chain once with an explicit path stack.
    ///
    /// Nodes on the chain currently being walked are `OnPath`; reaching one
    /// of them again closes a cycle. Finished chains are marked `Done` so each
    /// node is walked at most once overall.
    fn detect_cycles(
        records: &[PositionRecord],
        parents: &[Option<NodeIndex>],
    ) -> Result<(), StructureError> {
        let mut states = vec![VisitState::Unvisited; records.len()];
        let mut path: Vec<usize> = Vec::new();

        for start in 0..records.len() {
            let mut current = Some(start);

            while let Some(index) = current {
                match states[index] {
                    VisitState::Done => break,
                    VisitState::OnPath => {
                        let cycle_start = path
                            .iter()
                            .position(|&on_path| on_path == index)
                            .unwrap_or_default();
                        let cycle = path[cycle_start..]
                            .iter()
                            .map(|&member| records[member].id().to_string())
                            .collect();
                        return Err(StructureError::CyclicReference { cycle });
                    }
                    VisitState::Unvisited => {
                        states[index] = VisitState::OnPath;
                        path.push(index);
                        current = parents[index].map(NodeIndex::index);
                    }
                }
            }

            for index in path.drain(..) {
                states[index] = VisitState::Done;
            }
        }

        Ok(())
    }

    /// Returns the number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of roots.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Iterates over the roots in input order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = TreeNode<'_, 'a>> {
        self.roots.iter().map(|&index| TreeNode {
            forest: self,
            index,
        })
    }

    /// Returns the node at `index`, if it exists.
    pub fn node(&self, index: NodeIndex) -> Option<TreeNode<'_, 'a>> {
        (index.0 < self.nodes.len()).then_some(TreeNode {
            forest: self,
            index,
        })
    }

    /// Looks up a node by position id.
    pub fn get(&self, id: &str) -> Option<TreeNode<'_, 'a>> {
        self.lookup.get(id).map(|&index| TreeNode {
            forest: self,
            index,
        })
    }

    /// Iterates over all nodes depth-first: each root, then its subtree,
    /// children in order.
    pub fn iter_preorder(&self) -> Preorder<'_, 'a> {
        Preorder {
            forest: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    fn entry(&self, index: NodeIndex) -> &NodeEntry<'a> {
        &self.nodes[index.0]
    }
}

/// Builds a [`Forest`] from flat records.
///
/// Shorthand for [`Forest::build`].
pub fn build_forest(records: &[PositionRecord]) -> Result<Forest<'_>, StructureError> {
    Forest::build(records)
}

/// A borrowed view of one node in a [`Forest`].
#[derive(Clone, Copy)]
pub struct TreeNode<'f, 'a> {
    forest: &'f Forest<'a>,
    index: NodeIndex,
}

impl<'f, 'a> TreeNode<'f, 'a> {
    /// Returns this node's index in the forest.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the record this node was built from.
    pub fn record(&self) -> &'a PositionRecord {
        self.forest.entry(self.index).record
    }

    pub fn id(&self) -> &'a str {
        self.record().id()
    }

    pub fn name(&self) -> &'a str {
        self.record().name()
    }

    pub fn title(&self) -> &'a str {
        self.record().title()
    }

    /// Distance from this node's root; roots have depth 0.
    pub fn depth(&self) -> usize {
        self.forest.entry(self.index).depth
    }

    /// Returns the resolved parent, or `None` for roots.
    pub fn parent(&self) -> Option<TreeNode<'f, 'a>> {
        self.forest
            .entry(self.index)
            .parent
            .map(|index| TreeNode {
                forest: self.forest,
                index,
            })
    }

    /// Iterates over the children in input order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = TreeNode<'f, 'a>> + use<'f, 'a> {
        let forest = self.forest;
        forest
            .entry(self.index)
            .children
            .iter()
            .map(move |&index| TreeNode { forest, index })
    }

    pub fn child_count(&self) -> usize {
        self.forest.entry(self.index).children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }
}

impl fmt::Debug for TreeNode<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("index", &self.index)
            .field("id", &self.id())
            .field("depth", &self.depth())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Depth-first pre-order iterator over a [`Forest`], driven by an explicit stack.
pub struct Preorder<'f, 'a> {
    forest: &'f Forest<'a>,
    stack: Vec<NodeIndex>,
}

impl<'f, 'a> Iterator for Preorder<'f, 'a> {
    type Item = TreeNode<'f, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        self.stack
            .extend(self.forest.entry(index).children.iter().rev().copied());
        Some(TreeNode {
            forest: self.forest,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn record(id: &str, parent: Option<&str>) -> PositionRecord {
        let record = PositionRecord::new(id, format!("Name {id}"), format!("Title {id}"));
        match parent {
            Some(parent) => record.with_parent(parent),
            None => record,
        }
    }

    fn ids<'f, 'a: 'f>(nodes: impl Iterator<Item = TreeNode<'f, 'a>>) -> Vec<&'a str> {
        nodes.map(|node| node.id()).collect()
    }

    #[test]
    fn test_single_record_is_leaf_root() {
        let records = vec![PositionRecord::new("1", "A", "CEO")];
        let forest = Forest::build(&records).unwrap();

        assert_eq!(forest.len(), 1);
        assert_eq!(forest.root_count(), 1);
        let root = forest.roots().next().unwrap();
        assert_eq!(root.id(), "1");
        assert_eq!(root.name(), "A");
        assert_eq!(root.title(), "CEO");
        assert!(root.is_leaf());
        assert!(root.parent().is_none());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_children_keep_input_order() {
        let records = vec![
            record("1", None),
            record("3", Some("1")),
            record("2", Some("1")),
        ];
        let forest = Forest::build(&records).unwrap();

        let root = forest.get("1").unwrap();
        assert_eq!(ids(root.children()), ["3", "2"]);
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_child_before_parent_in_input() {
        let records = vec![record("2", Some("1")), record("1", None)];
        let forest = Forest::build(&records).unwrap();

        assert_eq!(ids(forest.roots()), ["1"]);
        let child = forest.get("2").unwrap();
        assert_eq!(child.parent().unwrap().id(), "1");
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let records = vec![record("1", None), record("2", Some("99"))];
        let forest = Forest::build(&records).unwrap();

        assert_eq!(ids(forest.roots()), ["1", "2"]);
        assert!(forest.get("1").unwrap().is_leaf());
    }

    #[test]
    fn test_empty_input() {
        let forest = Forest::build(&[]).unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.roots().count(), 0);
        assert_eq!(forest.iter_preorder().count(), 0);
    }

    #[test]
    fn test_self_reference_is_cycle() {
        let records = vec![record("1", Some("1"))];
        let err = Forest::build(&records).unwrap_err();
        assert_eq!(
            err,
            StructureError::CyclicReference {
                cycle: vec!["1".to_string()]
            }
        );
    }

    #[test]
    fn test_transitive_cycle_is_reported_in_chain_order() {
        let records = vec![
            record("0", None),
            record("a", Some("c")),
            record("b", Some("a")),
            record("c", Some("b")),
        ];
        let err = Forest::build(&records).unwrap_err();
        assert_eq!(
            err,
            StructureError::CyclicReference {
                cycle: vec!["a".to_string(), "c".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn test_chain_into_cycle_reports_only_the_loop() {
        // "tail" hangs off the a <-> b loop but is not part of it
        let records = vec![
            record("tail", Some("a")),
            record("a", Some("b")),
            record("b", Some("a")),
        ];
        let err = Forest::build(&records).unwrap_err();
        assert_eq!(
            err,
            StructureError::CyclicReference {
                cycle: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let records = vec![record("1", None), record("2", Some("1")), record("1", None)];
        let err = Forest::build(&records).unwrap_err();
        assert_eq!(
            err,
            StructureError::DuplicateId {
                id: "1".to_string(),
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn test_preorder_and_depths() {
        let records = vec![
            record("1", None),
            record("2", Some("1")),
            record("3", Some("1")),
            record("4", Some("2")),
            record("5", Some("2")),
            record("6", Some("3")),
            record("7", None),
        ];
        let forest = Forest::build(&records).unwrap();

        assert_eq!(ids(forest.iter_preorder()), ["1", "2", "4", "5", "3", "6", "7"]);
        let depths: Vec<usize> = forest.iter_preorder().map(|node| node.depth()).collect();
        assert_eq!(depths, [0, 1, 2, 2, 1, 2, 0]);
    }

    #[test]
    fn test_node_by_index() {
        let records = vec![record("1", None), record("2", Some("1"))];
        let forest = Forest::build(&records).unwrap();

        let node = forest.node(NodeIndex(1)).unwrap();
        assert_eq!(node.id(), "2");
        assert_eq!(node.index().index(), 1);
        assert!(forest.node(NodeIndex(2)).is_none());
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 50_000;
        let records: Vec<PositionRecord> = (0..depth)
            .map(|i| {
                let parent = (i > 0).then(|| (i - 1).to_string());
                record(&i.to_string(), parent.as_deref())
            })
            .collect();

        let forest = Forest::build(&records).unwrap();
        assert_eq!(forest.root_count(), 1);
        assert_eq!(forest.get(&(depth - 1).to_string()).unwrap().depth(), depth - 1);
    }

    /// Random acyclic inputs: record `i` may only point at an earlier record
    /// or at an id that does not exist, then the order is shuffled.
    fn acyclic_records() -> impl Strategy<Value = Vec<PositionRecord>> {
        prop::collection::vec(prop::option::of(0usize..40), 0..40)
            .prop_map(|parents| {
                parents
                    .iter()
                    .enumerate()
                    .map(|(i, parent)| {
                        let parent = parent.map(|p| if p < i { p.to_string() } else { format!("x{p}") });
                        record(&i.to_string(), parent.as_deref())
                    })
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_every_record_appears_exactly_once(records in acyclic_records()) {
            let forest = Forest::build(&records).unwrap();
            let mut seen: Vec<&str> = ids(forest.iter_preorder());
            seen.sort_unstable();
            let mut expected: Vec<&str> = records.iter().map(|r| r.id()).collect();
            expected.sort_unstable();
            prop_assert_eq!(seen, expected);
        }

        #[test]
        fn prop_children_match_parent_references_in_order(records in acyclic_records()) {
            let forest = Forest::build(&records).unwrap();
            for node in forest.iter_preorder() {
                let expected: Vec<&str> = records
                    .iter()
                    .filter(|r| r.parent_id() == Some(node.id()))
                    .map(|r| r.id())
                    .collect();
                prop_assert_eq!(ids(node.children()), expected);
            }
        }

        #[test]
        fn prop_roots_are_unresolved_references(records in acyclic_records()) {
            let forest = Forest::build(&records).unwrap();
            let expected: Vec<&str> = records
                .iter()
                .filter(|r| r.parent_id().is_none_or(|p| !records.iter().any(|o| o.id() == p)))
                .map(|r| r.id())
                .collect();
            prop_assert_eq!(ids(forest.roots()), expected);
        }
    }
}
