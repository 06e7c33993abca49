//! Node/edge annotation documents for skeleton viewers.
//!
//! Node ids start at 1 and follow vertex order, so exporting the same graph
//! twice yields identical ids.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use super::voxel_graph::VoxelGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: u64,
    pub target: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeEdgeDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl NodeEdgeDocument {
    pub fn from_graph(graph: &VoxelGraph) -> Self {
        let node_id = |v: usize| v as u64 + 1;

        let nodes = graph
            .vertices()
            .map(|v| {
                let p = graph.position(v);
                NodeRecord { id: node_id(v), x: p.x, y: p.y, z: p.z }
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeRecord { source: node_id(e.source), target: node_id(e.target) })
            .collect();

        Self { nodes, edges }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render as an NML-style `<things>` annotation with a single `<thing>`
    pub fn to_nml(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_nml(&mut out);
        out
    }

    pub fn write_nml<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "<?xml version=\"1.0\" ?>")?;
        writeln!(out, "<things>")?;
        writeln!(out, "\t<thing>")?;
        writeln!(out, "\t\t<nodes>")?;
        for n in &self.nodes {
            writeln!(
                out,
                "\t\t\t<node id=\"{}\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
                n.id, n.x, n.y, n.z
            )?;
        }
        writeln!(out, "\t\t</nodes>")?;
        writeln!(out, "\t\t<edges>")?;
        for e in &self.edges {
            writeln!(out, "\t\t\t<edge source=\"{}\" target=\"{}\"/>", e.source, e.target)?;
        }
        writeln!(out, "\t\t</edges>")?;
        writeln!(out, "\t</thing>")?;
        writeln!(out, "</things>")
    }
}
