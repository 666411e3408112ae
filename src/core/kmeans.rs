//! K-means clustering over color vectors (Lloyd's algorithm)

use anyhow::{bail, Result};
use rand::Rng;

use crate::core::Color;

/// Result of a clustering run.
///
/// `assignments` holds one cluster index per input sample, in input
/// order; `centroids` holds the final mean color per cluster, indexed by
/// cluster id. Every assignment value is an index into `centroids`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
	/// Cluster index per input sample, parallel to the input slice
	pub assignments: Vec<usize>,
	/// Final centroid per cluster, indexed by cluster id
	pub centroids: Vec<Color>,
	/// Number of assignment/update passes executed before stopping
	pub iterations: usize,
}

impl Clustering {
	/// Number of clusters
	pub fn k(&self) -> usize {
		self.centroids.len()
	}

	/// Sample indices grouped by cluster id; empty clusters yield empty groups
	pub fn groups(&self) -> Vec<Vec<usize>> {
		let mut groups = vec![Vec::new(); self.centroids.len()];
		for (sample, &cluster) in self.assignments.iter().enumerate() {
			groups[cluster].push(sample);
		}
		groups
	}
}

/// Partition `colors` into `k` clusters.
///
/// Centroids are seeded with `k` uniform draws from the dataset (with
/// replacement, so duplicate seeds are possible), then refined by
/// alternating nearest-centroid assignment and per-channel mean updates.
/// A cluster that holds no members keeps its previous centroid unchanged.
/// The loop stops as soon as an update leaves every centroid exactly
/// equal to the previous set, or after `max_iterations` passes, whichever
/// comes first. In the capped case the returned assignments are the ones
/// computed by the final pass and the centroids are that pass's updated
/// set, so the two may not be mutually stable.
///
/// Fails only on an empty dataset, `k == 0`, or `max_iterations == 0`.
/// `k` larger than the dataset is accepted and simply leaves some
/// clusters permanently empty.
pub fn cluster<R: Rng>(
	colors: &[Color],
	k: usize,
	max_iterations: usize,
	rng: &mut R,
) -> Result<Clustering> {
	if colors.is_empty() {
		bail!("Cannot cluster an empty dataset");
	}
	if k == 0 {
		bail!("Cluster count must be at least 1");
	}
	if max_iterations == 0 {
		bail!("Iteration budget must be at least 1");
	}

	let mut centroids: Vec<Color> = (0..k)
		.map(|_| colors[rng.random_range(0..colors.len())])
		.collect();
	let mut assignments = vec![0usize; colors.len()];
	let mut iterations = 0;

	for _ in 0..max_iterations {
		iterations += 1;

		for (slot, color) in assignments.iter_mut().zip(colors) {
			*slot = nearest(color, &centroids);
		}

		let updated = update(colors, &assignments, &centroids);
		// Exact equality, not an epsilon band: anything short of a
		// bit-identical fixed point keeps iterating until the cap.
		if updated == centroids {
			break;
		}
		centroids = updated;
	}

	Ok(Clustering {
		assignments,
		centroids,
		iterations,
	})
}

/// Index of the centroid closest to `color` in Euclidean distance.
///
/// Ties resolve to the lowest index. Returns 0 for an empty slice,
/// though every caller in this crate passes at least one centroid.
pub fn nearest(color: &Color, centroids: &[Color]) -> usize {
	let mut best = 0;
	let mut best_distance = f64::INFINITY;
	for (index, centroid) in centroids.iter().enumerate() {
		let distance = color.distance(centroid);
		if distance < best_distance {
			best_distance = distance;
			best = index;
		}
	}
	best
}

/// Mean color per cluster; clusters without members keep their previous centroid.
fn update(colors: &[Color], assignments: &[usize], centroids: &[Color]) -> Vec<Color> {
	let mut sums = vec![[0f64; 3]; centroids.len()];
	let mut counts = vec![0usize; centroids.len()];

	for (color, &cluster) in colors.iter().zip(assignments) {
		for (channel, value) in sums[cluster].iter_mut().zip(color.0) {
			*channel += value;
		}
		counts[cluster] += 1;
	}

	centroids
		.iter()
		.enumerate()
		.map(|(cluster, previous)| match counts[cluster] {
			0 => *previous,
			n => Color(sums[cluster].map(|channel| channel / n as f64)),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::StdRng;
	use rand::SeedableRng;

	fn seeded(seed: u64) -> StdRng {
		StdRng::seed_from_u64(seed)
	}

	fn spread() -> Vec<Color> {
		vec![
			Color::new(0.05, 0.1, 0.1),
			Color::new(0.1, 0.05, 0.15),
			Color::new(0.5, 0.5, 0.45),
			Color::new(0.55, 0.5, 0.5),
			Color::new(0.9, 0.85, 0.9),
			Color::new(0.95, 0.9, 0.85),
		]
	}

	#[test]
	fn assignments_cover_every_sample() {
		let colors = spread();
		let result = cluster(&colors, 3, 100, &mut seeded(11)).unwrap();
		assert_eq!(result.assignments.len(), colors.len());
		assert_eq!(result.centroids.len(), 3);
		assert!(result.assignments.iter().all(|&c| c < 3));
	}

	#[test]
	fn seeded_runs_are_identical() {
		let colors = spread();
		let first = cluster(&colors, 3, 100, &mut seeded(7)).unwrap();
		let second = cluster(&colors, 3, 100, &mut seeded(7)).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn converged_result_is_a_fixed_point() {
		let colors = spread();
		for seed in 0..16 {
			let result = cluster(&colors, 3, 100, &mut seeded(seed)).unwrap();
			assert!(result.iterations < 100, "seed {seed} did not converge");
			for (sample, color) in colors.iter().enumerate() {
				assert_eq!(
					nearest(color, &result.centroids),
					result.assignments[sample],
					"assignment of sample {sample} is unstable under the final centroids (seed {seed})"
				);
			}
		}
	}

	#[test]
	fn ties_resolve_to_the_lowest_index() {
		let centroids = [Color::new(0.0, 0.0, 0.0), Color::new(0.0, 0.0, 1.0)];
		// Exactly halfway between the two
		assert_eq!(nearest(&Color::new(0.0, 0.0, 0.5), &centroids), 0);

		// Coincident centroids: every distance ties
		let coincident = [Color::new(0.3, 0.3, 0.3); 4];
		assert_eq!(nearest(&Color::new(0.9, 0.1, 0.4), &coincident), 0);
	}

	#[test]
	fn empty_clusters_keep_their_centroid() {
		let colors = [Color::new(0.2, 0.2, 0.2), Color::new(0.8, 0.8, 0.8)];
		let previous = [
			Color::new(0.25, 0.2, 0.2),
			Color::new(0.1234567, 0.7654321, 0.5),
			Color::new(0.75, 0.8, 0.8),
		];

		// Nothing assigned to cluster 1: its centroid must pass through bit-for-bit.
		let updated = update(&colors, &[0, 2], &previous);
		assert_eq!(updated[1], previous[1]);
		assert_eq!(updated[0], colors[0]);
		assert_eq!(updated[2], colors[1]);
	}

	#[test]
	fn surplus_clusters_freeze_at_data_points() {
		let p = Color::new(0.0, 0.0, 0.0);
		let q = Color::new(1.0, 1.0, 1.0);
		let colors = [p, q];

		for seed in 0..16 {
			let result = cluster(&colors, 3, 100, &mut seeded(seed)).unwrap();
			let groups = result.groups();
			let empty: Vec<usize> = (0..3).filter(|&c| groups[c].is_empty()).collect();
			assert!(!empty.is_empty(), "three clusters over two points must leave one empty");
			for c in empty {
				let frozen = result.centroids[c];
				assert!(
					frozen == p || frozen == q,
					"frozen centroid {frozen:?} moved off its seed (seed {seed})"
				);
			}
		}
	}

	#[test]
	fn separated_pairs_converge_to_pair_means() {
		let colors = [
			Color::new(0.0, 0.0, 0.0),
			Color::new(0.0, 0.0, 0.1),
			Color::new(1.0, 1.0, 1.0),
			Color::new(1.0, 1.0, 0.9),
		];
		let low_mean = Color::new(0.0, 0.0, (0.0 + 0.1) / 2.0);
		let high_mean = Color::new(1.0, 1.0, (1.0 + 0.9) / 2.0);

		let mut saw_one_pass_split = false;
		for seed in 0..32 {
			let result = cluster(&colors, 2, 100, &mut seeded(seed)).unwrap();
			let groups = result.groups();
			if groups.iter().any(|g| g.is_empty()) {
				// Duplicate seeds collapse everything into one cluster; fine.
				continue;
			}

			// Both pairs end up intact, on their exact means.
			assert_eq!(result.assignments[0], result.assignments[1]);
			assert_eq!(result.assignments[2], result.assignments[3]);
			assert_ne!(result.assignments[0], result.assignments[2]);
			let low = result.assignments[0];
			assert_eq!(result.centroids[low], low_mean);
			assert_eq!(result.centroids[1 - low], high_mean);

			// A seed drawing one point from each pair settles in a single
			// moving pass plus the confirming one.
			assert!(result.iterations <= 3);
			if result.iterations == 2 {
				saw_one_pass_split = true;
			}
		}
		assert!(saw_one_pass_split, "no seed in range drew one point from each pair");
	}

	#[test]
	fn singleton_clusters_when_k_matches_dataset() {
		let colors = [
			Color::new(0.1, 0.1, 0.1),
			Color::new(0.3, 0.6, 0.2),
			Color::new(0.7, 0.2, 0.8),
			Color::new(0.9, 0.9, 0.4),
		];

		let mut saw_distinct_draw = false;
		let mut saw_recovered_duplicate = false;
		for seed in 0..256u64 {
			// Replay the seeding draws; the draw kind cannot be inferred
			// from the outcome, because a frozen duplicate centroid can
			// capture a point later and still end with full coverage.
			let mut rng = seeded(seed);
			let mut drawn: Vec<usize> = (0..colors.len())
				.map(|_| rng.random_range(0..colors.len()))
				.collect();
			drawn.sort_unstable();
			drawn.dedup();
			let distinct_draw = drawn.len() == colors.len();

			let result = cluster(&colors, colors.len(), 100, &mut seeded(seed)).unwrap();
			let groups = result.groups();
			if groups.iter().any(|g| g.is_empty()) {
				continue;
			}

			// Full coverage at k == n forces one point per cluster, each
			// centroid exactly on its point.
			assert!(groups.iter().all(|g| g.len() == 1));
			for (sample, color) in colors.iter().enumerate() {
				assert_eq!(result.centroids[result.assignments[sample]], *color);
			}

			if distinct_draw {
				// All-distinct seeds settle in a single pass
				assert_eq!(result.iterations, 1, "seed {seed}");
				saw_distinct_draw = true;
			} else {
				// Recovery from a duplicate draw needs at least one pass
				// to move a centroid off the shared seed first
				assert!(result.iterations > 1, "seed {seed}");
				saw_recovered_duplicate = true;
			}
		}
		assert!(saw_distinct_draw, "no seed in range drew all four distinct points");
		assert!(
			saw_recovered_duplicate,
			"no duplicate-seed run in range recovered full coverage"
		);
	}

	#[test]
	fn identical_points_collapse_into_the_first_cluster() {
		let point = Color::new(0.5, 0.5, 0.5);
		let colors = [point; 3];
		let result = cluster(&colors, 3, 100, &mut seeded(3)).unwrap();

		assert!(result.assignments.iter().all(|&c| c == 0));
		assert!(result.centroids.iter().all(|&c| c == point));
		assert_eq!(result.iterations, 1);

		let groups = result.groups();
		assert_eq!(groups[0].len(), 3);
		assert!(groups[1].is_empty() && groups[2].is_empty());
	}

	#[test]
	fn budget_caps_the_loop() {
		let colors = spread();
		let result = cluster(&colors, 3, 1, &mut seeded(5)).unwrap();
		assert_eq!(result.iterations, 1);
		assert_eq!(result.assignments.len(), colors.len());
		assert!(result.assignments.iter().all(|&c| c < 3));
	}

	#[test]
	fn degenerate_inputs_fail_fast() {
		let colors = spread();
		assert!(cluster(&[], 2, 10, &mut seeded(0)).is_err());
		assert!(cluster(&colors, 0, 10, &mut seeded(0)).is_err());
		assert!(cluster(&colors, 2, 0, &mut seeded(0)).is_err());
	}

	#[test]
	fn oversized_k_is_accepted() {
		let colors = [Color::new(0.1, 0.2, 0.3), Color::new(0.9, 0.8, 0.7)];
		let result = cluster(&colors, 5, 100, &mut seeded(1)).unwrap();
		assert_eq!(result.centroids.len(), 5);
		assert!(result.assignments.iter().all(|&c| c < 5));
	}

	#[test]
	fn groups_partition_by_cluster() {
		let clustering = Clustering {
			assignments: vec![2, 0, 2, 1],
			centroids: vec![
				Color::new(0.1, 0.1, 0.1),
				Color::new(0.5, 0.5, 0.5),
				Color::new(0.9, 0.9, 0.9),
			],
			iterations: 1,
		};
		assert_eq!(clustering.groups(), vec![vec![1], vec![3], vec![0, 2]]);
		assert_eq!(clustering.k(), 3);
	}
}
