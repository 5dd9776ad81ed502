//! https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm

use super::StreamingMetric;
use num_traits::ToPrimitive;

/// `MeanVariance` computes the mean and the sample variance of a stream of values. Each input is a `(value, count)` pair, so a histogram can be folded in one bucket at a time.
#[derive(Debug, Clone, Default)]
pub struct MeanVariance(Option<MeanVarianceState>);

#[derive(Debug, Clone)]
struct MeanVarianceState {
	n: u64,
	mean: f64,
	m2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeanVarianceOutput {
	pub n: u64,
	pub mean: f64,
	/// This is `None` when there are fewer than two values.
	pub variance: Option<f64>,
}

impl StreamingMetric<'_> for MeanVariance {
	type Input = (f64, u64);
	type Output = Option<MeanVarianceOutput>;

	fn update(&mut self, input: Self::Input) {
		let (value, count) = input;
		if count == 0 {
			return;
		}
		self.merge(MeanVariance(Some(MeanVarianceState {
			n: count,
			mean: value,
			m2: 0.0,
		})));
	}

	fn merge(&mut self, other: Self) {
		let other = match other.0 {
			Some(other) => other,
			None => return,
		};
		match &mut self.0 {
			Some(state) => {
				let (mean, m2) =
					merge_mean_m2(state.n, state.mean, state.m2, other.n, other.mean, other.m2);
				state.n += other.n;
				state.mean = mean;
				state.m2 = m2;
			}
			None => self.0 = Some(other),
		}
	}

	fn finalize(self) -> Self::Output {
		self.0.map(|state| MeanVarianceOutput {
			n: state.n,
			mean: state.mean,
			variance: m2_to_variance(state.m2, state.n),
		})
	}
}

/// combine two separate means and variances into a single mean and variance
/// useful in parallel algorithms
pub fn merge_mean_m2(
	n_a: u64,
	mean_a: f64,
	m2_a: f64,
	n_b: u64,
	mean_b: f64,
	m2_b: f64,
) -> (f64, f64) {
	let n_a = n_a.to_f64().unwrap();
	let n_b = n_b.to_f64().unwrap();
	let delta = mean_b - mean_a;
	(
		mean_a + delta * (n_b / (n_a + n_b)),
		m2_a + m2_b + delta * delta * (n_a * n_b / (n_a + n_b)),
	)
}

/// Convert a sum of squared deviations over `n` values into the sample variance, dividing by `n - 1`.
pub fn m2_to_variance(m2: f64, n: u64) -> Option<f64> {
	if n < 2 {
		return None;
	}
	Some(m2 / (n - 1).to_f64().unwrap())
}

#[test]
fn test_mean_variance() {
	let mut metric = MeanVariance::default();
	for value in &[25.0, 30.0, 40.0] {
		metric.update((*value, 1));
	}
	let output = metric.finalize().unwrap();
	assert_eq!(output.n, 3);
	assert!((output.mean - 95.0 / 3.0).abs() < 1e-12);
	// (6.6667^2 + 1.6667^2 + 8.3333^2) / 2
	assert!((output.variance.unwrap() - 175.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_mean_variance_weighted_and_merged() {
	let mut a = MeanVariance::default();
	a.update((1.0, 2));
	let mut b = MeanVariance::default();
	b.update((4.0, 1));
	b.update((4.0, 0));
	a.merge(b);
	a.merge(MeanVariance::default());
	let output = a.finalize().unwrap();
	assert_eq!(output.n, 3);
	assert!((output.mean - 2.0).abs() < 1e-12);
	assert!((output.variance.unwrap() - 3.0).abs() < 1e-12);
}

#[test]
fn test_mean_variance_degenerate() {
	assert_eq!(MeanVariance::default().finalize(), None);
	let mut single = MeanVariance::default();
	single.update((7.0, 1));
	assert_eq!(
		single.finalize(),
		Some(MeanVarianceOutput {
			n: 1,
			mean: 7.0,
			variance: None,
		})
	);
}
