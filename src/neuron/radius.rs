use std::collections::VecDeque;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::error::{Result, SkeleratorError};
use crate::graph::{PositionedGraph, VertexId};

/// Inclusive radius bounds, `0 < min <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: u32,
    pub max: u32,
}

impl RadiusRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min == 0 || self.max < self.min {
            return Err(SkeleratorError::InvalidRadiusRange { min: self.min, max: self.max });
        }
        Ok(())
    }

    pub fn contains(&self, radius: u32) -> bool {
        radius >= self.min && radius <= self.max
    }
}

/// Per-vertex radius, indexed by vertex id
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusField {
    radii: Vec<u32>,
    range: RadiusRange,
}

impl RadiusField {
    pub fn get(&self, v: VertexId) -> u32 {
        self.radii[v]
    }

    pub fn range(&self) -> RadiusRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.radii
    }
}

/// Radius of a newly discovered vertex given its one assigned neighbour.
///
/// Radii bounce off the range limits and otherwise wander by -1, 0 or +1.
fn next_radius<R: Rng + ?Sized>(neighbour: u32, range: RadiusRange, rng: &mut R) -> u32 {
    if range.min == range.max {
        range.min
    } else if neighbour == range.min {
        range.min + 1
    } else if neighbour == range.max {
        range.max - 1
    } else {
        (neighbour as i64 + rng.gen_range(-1i64..=1)) as u32
    }
}

/// Breadth-first radius growth from `root`.
///
/// The root draws uniformly from `[min, max)` (or takes `min` when the range
/// is a single value). Every other vertex must have exactly one assigned
/// neighbour at discovery, otherwise the graph is not a tree and growth
/// fails with [`SkeleratorError::InconsistentTraversal`].
pub fn grow_radius<G, R>(graph: &G, root: VertexId, range: RadiusRange, rng: &mut R) -> Result<RadiusField>
where
    G: PositionedGraph + ?Sized,
    R: Rng + ?Sized,
{
    range.validate()?;
    let n = graph.vertex_count();
    if root >= n {
        return Err(SkeleratorError::InvalidInput(format!(
            "root {} is not a vertex of a graph with {} vertices",
            root, n
        )));
    }

    debug!("growing radii over {} vertices from root {}", n, root);
    let mut radii: Vec<Option<u32>> = vec![None; n];
    radii[root] = Some(if range.min == range.max {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    });

    let mut queue = VecDeque::from([root]);
    while let Some(u) = queue.pop_front() {
        for v in graph.neighbors(u) {
            if radii[v].is_some() {
                continue;
            }

            let assigned: Vec<u32> = graph.neighbors(v).iter().filter_map(|&w| radii[w]).collect();
            if assigned.len() != 1 {
                return Err(SkeleratorError::InconsistentTraversal { vertex: v, assigned: assigned.len() });
            }

            radii[v] = Some(next_radius(assigned[0], range, rng));
            queue.push_back(v);
        }
    }

    let radii = radii
        .into_iter()
        .enumerate()
        .map(|(v, r)| r.ok_or(SkeleratorError::InconsistentTraversal { vertex: v, assigned: 0 }))
        .collect::<Result<Vec<u32>>>()?;

    Ok(RadiusField { radii, range })
}
