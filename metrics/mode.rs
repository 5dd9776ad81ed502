use super::Metric;
use std::collections::BTreeMap;

/// `Mode` finds the most frequent value among dictionary codes. Codes are expected to be assigned in first-seen order, so breaking ties toward the smallest code picks the value that appeared first.
#[derive(Debug, Clone, Default)]
pub struct Mode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeOutput {
	pub code: usize,
	pub count: usize,
}

impl<'a> Metric<'a> for Mode {
	type Input = &'a [usize];
	type Output = Option<ModeOutput>;
	fn compute(input: Self::Input) -> Self::Output {
		let mut histogram = BTreeMap::new();
		for code in input.iter() {
			*histogram.entry(*code).or_insert(0) += 1;
		}
		let mut mode: Option<ModeOutput> = None;
		for (code, count) in histogram.into_iter() {
			match mode {
				Some(ModeOutput { count: best, .. }) if best >= count => {}
				_ => mode = Some(ModeOutput { code, count }),
			}
		}
		mode
	}
}

#[test]
fn test_mode() {
	let empty: &[usize] = &[];
	assert_eq!(Mode::compute(empty), None);
	assert_eq!(
		Mode::compute(&[2, 0, 1, 2]),
		Some(ModeOutput { code: 2, count: 2 })
	);
	// ties go to the smallest code
	assert_eq!(
		Mode::compute(&[1, 0, 1, 0]),
		Some(ModeOutput { code: 0, count: 2 })
	);
}
