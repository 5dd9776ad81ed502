/*!
This module defines [`NotNan`], a float that is known not to be NaN. Without NaN, floats are totally ordered, so they can key the `BTreeMap` that number columns are histogrammed into. Infinities are ordinary values and sort to either end.
*/

use num_traits::Float;
use std::cmp::{Ord, Ordering};
use thiserror::Error;

#[derive(Clone, Copy, Debug)]
pub struct NotNan<T>(T)
where
	T: Float;

#[derive(Debug, Error, PartialEq)]
#[error("value is NaN")]
pub struct NanError;

impl<T> NotNan<T>
where
	T: Float,
{
	pub fn new(value: T) -> Result<Self, NanError> {
		if value.is_nan() {
			return Err(NanError);
		}
		// Fold -0.0 into 0.0 so both land in the same histogram bucket.
		let value = if value == T::zero() { T::zero() } else { value };
		Ok(Self(value))
	}

	pub fn get(self) -> T {
		self.0
	}
}

impl<T> PartialEq for NotNan<T>
where
	T: Float,
{
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<T> Eq for NotNan<T> where T: Float {}

impl<T> PartialOrd for NotNan<T>
where
	T: Float,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> Ord for NotNan<T>
where
	T: Float,
{
	fn cmp(&self, other: &Self) -> Ordering {
		// Neither side can be NaN.
		self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
	}
}

#[test]
fn test_not_nan_rejects_only_nan() {
	assert_eq!(NotNan::new(f64::NAN), Err(NanError));
	assert_eq!(NotNan::new(f64::INFINITY).map(NotNan::get), Ok(f64::INFINITY));
	assert_eq!(
		NotNan::new(f64::NEG_INFINITY).map(NotNan::get),
		Ok(f64::NEG_INFINITY)
	);
	assert_eq!(NotNan::new(1.5f64).map(NotNan::get), Ok(1.5));
}

#[test]
fn test_histogram_order() {
	use std::collections::BTreeMap;
	let mut histogram = BTreeMap::new();
	for value in &[0.0f64, f64::INFINITY, -0.0, 2.0, f64::NEG_INFINITY, -1.0] {
		*histogram.entry(NotNan::new(*value).unwrap()).or_insert(0) += 1;
	}
	let keys: Vec<f64> = histogram.keys().map(|key| key.get()).collect();
	assert_eq!(
		keys,
		vec![f64::NEG_INFINITY, -1.0, 0.0, 2.0, f64::INFINITY]
	);
	assert_eq!(histogram[&NotNan::new(0.0).unwrap()], 2);
}
