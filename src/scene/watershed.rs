use std::cmp::Ordering;
use std::collections::BinaryHeap;
use ndarray::Array3;

/// Seeded region growing over a cost field.
///
/// Every voxel reachable from a seed takes the label of the seed that
/// floods it first; unreachable voxels stay 0.
pub trait Watershed {
    fn flood(&self, cost: &Array3<f32>, seeds: &Array3<u64>) -> Array3<u64>;
}

/// Priority-flood watershed over 6-connected voxels
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityFlood;

#[derive(Debug)]
struct Entry {
    cost: f32,
    order: u64,
    index: [usize; 3],
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the cheapest, oldest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.order.cmp(&self.order))
    }
}

const FACES: [[isize; 3]; 6] = [
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

impl Watershed for PriorityFlood {
    fn flood(&self, cost: &Array3<f32>, seeds: &Array3<u64>) -> Array3<u64> {
        let mut labels = seeds.clone();
        let shape = labels.shape().to_vec();
        let mut heap = BinaryHeap::new();
        let mut order = 0u64;

        for ((z, y, x), &label) in seeds.indexed_iter() {
            if label != 0 {
                heap.push(Entry { cost: cost[[z, y, x]], order, index: [z, y, x] });
                order += 1;
            }
        }

        while let Some(Entry { index, .. }) = heap.pop() {
            let label = labels[index];
            for face in FACES {
                let mut next = [0usize; 3];
                let mut inside = true;
                for d in 0..3 {
                    let i = index[d] as isize + face[d];
                    if i < 0 || i >= shape[d] as isize {
                        inside = false;
                        break;
                    }
                    next[d] = i as usize;
                }
                if !inside || labels[next] != 0 {
                    continue;
                }
                labels[next] = label;
                heap.push(Entry { cost: cost[next], order, index: next });
                order += 1;
            }
        }

        labels
    }
}
