use log::debug;
use ndarray::Array3;
use rand::Rng;
use crate::config::SceneConfig;
use crate::error::Result;
use crate::growth::Tree;
use crate::math::{sample_points, Point};
use crate::neuron::Neuron;
use crate::skeleton::Skeleton;
use super::crop::crop;
use super::distance::distance_transform;
use super::filters::{abs_normal_noise, gaussian_filter, suppress_non_maxima};
use super::watershed::{PriorityFlood, Watershed};

/// Centred crop of a [`Scene`]; `offset` is its corner in `(x, y, z)`
#[derive(Debug, Clone)]
pub struct CroppedScene {
    pub offset: Point,
    pub raw: Array3<f32>,
    pub skeletons: Array3<u64>,
    pub segmentation: Array3<u64>,
}

/// One synthetic volume, every array indexed `[z, y, x]`
#[derive(Debug, Clone)]
pub struct Scene {
    /// Watershed cost: seed distance plus weighted smooth noise
    pub raw: Array3<f32>,
    /// Seed labels after non-maximum suppression
    pub skeletons: Array3<u64>,
    pub segmentation: Array3<u64>,
    pub cropped: Option<CroppedScene>,
}

impl Scene {
    /// Shape in `[z, y, x]` order
    pub fn shape(&self) -> [usize; 3] {
        let (z, y, x) = self.raw.dim();
        [z, y, x]
    }

    /// Distinct non-zero labels in the segmentation
    pub fn labels(&self) -> Vec<u64> {
        let mut labels: Vec<u64> = self.segmentation.iter().copied().filter(|&l| l != 0).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

/// Draw one object with `label` into the seed volume
fn draw_object<R: Rng + ?Sized>(
    config: &SceneConfig,
    label: u64,
    seeds: &mut Array3<u64>,
    rng: &mut R,
) -> Result<()> {
    let points = sample_points(rng, config.shape, config.points_per_skeleton, config.sample_margin)?;
    debug!("generating tree {} from {} points", label, points.len());
    let tree = Tree::new(&points)?;
    let skeleton = Skeleton::new(tree, Point::ONE, config.interpolation, rng)?;

    match config.radius {
        None => {
            skeleton.draw(seeds, Point::ZERO, label);
        }
        Some(range) => {
            let neuron = Neuron::new(skeleton, range.min, range.max, rng)?;
            let (volume, offset) = neuron.render_volume();
            let shape = seeds.shape().to_vec();
            for ((z, y, x), &inside) in volume.indexed_iter() {
                if !inside {
                    continue;
                }
                let p = Point::new(x as i64, y as i64, z as i64) - offset;
                if let Some(idx) = p.to_index(&shape) {
                    seeds[idx] = label;
                }
            }
        }
    }
    Ok(())
}

/// Build one labelled scene: `n_objects` skeletons seed a watershed over a
/// noisy distance field.
pub fn create_scene<W, R>(config: &SceneConfig, watershed: &W, rng: &mut R) -> Result<Scene>
where
    W: Watershed + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    let dim = config.dim();

    let noise = abs_normal_noise(rng, dim);
    let smoothed = gaussian_filter(&noise, config.smoothness);

    let mut seeds = Array3::<u64>::zeros(dim);
    for i in 0..config.n_objects {
        draw_object(config, i as u64 + 1, &mut seeds, rng)?;
    }

    suppress_non_maxima(&mut seeds, config.suppression_size);
    let raw = distance_transform(&seeds) + &(smoothed * config.noise_weight);
    let segmentation = watershed.flood(&raw, &seeds);
    debug!("scene {:?} flooded from {} objects", dim, config.n_objects);

    let cropped = match config.output_shape {
        Some([x, y, z]) => {
            let output = [z, y, x];
            let (raw_c, [oz, oy, ox]) = crop(&raw, output)?;
            let (skeletons_c, _) = crop(&seeds, output)?;
            let (segmentation_c, _) = crop(&segmentation, output)?;
            Some(CroppedScene {
                offset: Point::new(ox as i64, oy as i64, oz as i64),
                raw: raw_c,
                skeletons: skeletons_c,
                segmentation: segmentation_c,
            })
        }
        None => None,
    };

    Ok(Scene { raw, skeletons: seeds, segmentation, cropped })
}

/// A scene configuration bound to a watershed implementation
#[derive(Debug, Clone)]
pub struct SceneGenerator<W: Watershed = PriorityFlood> {
    config: SceneConfig,
    watershed: W,
}

impl SceneGenerator<PriorityFlood> {
    pub fn new(config: SceneConfig) -> Result<Self> {
        Self::with_watershed(config, PriorityFlood)
    }
}

impl<W: Watershed> SceneGenerator<W> {
    pub fn with_watershed(config: SceneConfig, watershed: W) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, watershed })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scene> {
        create_scene(&self.config, &self.watershed, rng)
    }

    /// Generate with a different object count and tree size
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        n_objects: usize,
        points_per_skeleton: usize,
        rng: &mut R,
    ) -> Result<Scene> {
        let config = SceneConfig {
            n_objects,
            points_per_skeleton,
            ..self.config.clone()
        };
        create_scene(&config, &self.watershed, rng)
    }
}
