//! Graph export for visualization layers
//!
//! Turns any transition table into a plain node/edge description. The
//! JSON form (`{nodes: [{data, classes}], edges: [{data}]}`) can be fed
//! directly to graph renderers such as Cytoscape.

use crate::transition::{StateId, Symbol, Transition, find};
use serde::Serialize;
use std::collections::HashSet;

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    /// State id as a string
    pub id: String,
    /// Text shown on the node
    pub label: String,
    /// Whether this is the start state
    pub start: bool,
    /// Whether this state accepts
    pub accepting: bool,
}

/// A graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Node payload
    pub data: NodeData,
    /// Space separated `start` / `accept`, empty for plain states
    pub classes: String,
}

/// Edge payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeData {
    /// Unique id of the form `source-symbol-target`
    pub id: String,
    /// Source state id
    pub source: String,
    /// Target state id
    pub target: String,
    /// The edge symbol, `ε` for epsilon
    pub label: String,
}

/// A graph edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Edge payload
    pub data: EdgeData,
}

/// A directed graph ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    /// Nodes in order of first appearance
    pub nodes: Vec<GraphNode>,
    /// One edge per (source, symbol, target)
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

struct Exporter<'a> {
    transitions: &'a [Transition],
    seen: HashSet<StateId>,
    graph: Graph,
}

impl<'a> Exporter<'a> {
    fn add_node(&mut self, id: StateId, start: bool, accepting: bool) {
        if !self.seen.insert(id) {
            return;
        }
        let mut classes = Vec::new();
        if start {
            classes.push("start");
        }
        if accepting {
            classes.push("accept");
        }
        self.graph.nodes.push(GraphNode {
            data: NodeData {
                id: id.to_string(),
                label: id.to_string(),
                start,
                accepting,
            },
            classes: classes.join(" "),
        });
    }

    fn add_edge(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        if !self.seen.contains(&to) {
            // Targets without a row of their own export as plain nodes
            let (start, accepting) = find(self.transitions, to)
                .map(|row| (row.start, row.accepting))
                .unwrap_or((false, false));
            self.add_node(to, start, accepting);
        }
        self.graph.edges.push(GraphEdge {
            data: EdgeData {
                id: format!("{}-{}-{}", from, symbol, to),
                source: from.to_string(),
                target: to.to_string(),
                label: symbol.to_string(),
            },
        });
    }
}

/// Export a transition table as a graph
pub fn export_graph(transitions: &[Transition]) -> Graph {
    let mut exporter = Exporter {
        transitions,
        seen: HashSet::new(),
        graph: Graph::default(),
    };

    for row in transitions {
        exporter.add_node(row.from, row.start, row.accepting);
        for (symbol, target) in &row.to {
            for to in target.ids() {
                exporter.add_edge(row.from, *symbol, to);
            }
        }
    }

    exporter.graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::Target;

    #[test]
    fn test_export_deterministic() {
        let mut start = Transition::new(0, true, false);
        start.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        let end = Transition::new(1, false, true);

        let graph = export_graph(&[start, end]);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].classes, "start");
        assert_eq!(graph.nodes[1].classes, "accept");
        assert!(graph.nodes[1].data.accepting);

        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0].data;
        assert_eq!(edge.id, "0-a-1");
        assert_eq!(edge.source, "0");
        assert_eq!(edge.target, "1");
        assert_eq!(edge.label, "a");
    }

    #[test]
    fn test_export_nondeterministic() {
        let mut start = Transition::new(0, true, true);
        start
            .to
            .insert(Symbol::Epsilon, Target::Nondeterministic([1, 3].into()));
        let graph = export_graph(&[start]);

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[0].classes, "start accept");
        // Targets without rows are plain nodes
        assert_eq!(graph.nodes[1].classes, "");
        let ids: Vec<_> = graph.edges.iter().map(|e| e.data.id.as_str()).collect();
        assert_eq!(ids, vec!["0-ε-1", "0-ε-3"]);
    }

    #[test]
    fn test_nodes_are_not_duplicated() {
        let mut start = Transition::new(0, true, false);
        start.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        start.to.insert(Symbol::Char('b'), Target::Deterministic(0));
        let mut end = Transition::new(1, false, true);
        end.to.insert(Symbol::Char('a'), Target::Deterministic(1));

        let graph = export_graph(&[start, end]);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn test_lazy_target_flags_come_from_its_row() {
        let mut start = Transition::new(0, true, false);
        start.to.insert(Symbol::Char('a'), Target::Deterministic(1));
        let end = Transition::new(1, false, true);

        // The edge to 1 is seen before 1's own row
        let graph = export_graph(&[start, end]);
        assert!(graph.nodes[1].data.accepting);
    }

    #[test]
    fn test_graph_json_shape() {
        let graph = export_graph(&[Transition::new(0, true, true)]);
        assert_eq!(
            graph.to_json().unwrap(),
            r#"{"nodes":[{"data":{"id":"0","label":"0","start":true,"accepting":true},"classes":"start accept"}],"edges":[]}"#
        );
    }
}
