use fnv::FnvHashMap;
use num_traits::ToPrimitive;
use profiler_dataframe::*;
use profiler_metrics::{MeanVariance, Metric, Mode, StreamingMetric};
use profiler_util::not_nan::NotNan;
use rayon::prelude::*;
use std::{cmp::Ordering, collections::BTreeMap};

/// This struct holds column stats.
#[derive(Clone, Debug)]
pub struct Stats<'a>(pub Vec<ColumnStats<'a>>);

/// This is an enum describing the different types of stats where the type matches the type of the source column.
#[derive(Clone, Debug)]
pub enum ColumnStats<'a> {
	Unknown(UnknownColumnStats<'a>),
	Number(NumberColumnStats<'a>),
	Enum(TextColumnStats<'a>),
	Text(TextColumnStats<'a>),
}

/// This struct contains stats for unknown columns.
#[derive(Clone, Debug)]
pub struct UnknownColumnStats<'a> {
	/// This is the name of the column.
	pub column_name: &'a str,
	/// The distinct values.
	pub dictionary: Dictionary<'a>,
}

/// This struct contains stats for number columns.
#[derive(Clone, Debug)]
pub struct NumberColumnStats<'a> {
	/// This is the name of the column.
	pub column_name: &'a str,
	/// The total number of valid values. Only NaN is missing, so infinities are valid.
	pub valid_count: usize,
	/// This stores counts for each unique value.
	pub histogram: BTreeMap<NotNan<f64>, usize>,
}

/// This struct contains stats for enum and text columns. Enum values are looked up in the column's options, so both kinds reduce to a dictionary of strings.
#[derive(Clone, Debug)]
pub struct TextColumnStats<'a> {
	/// This is the name of the column.
	pub column_name: &'a str,
	pub dictionary: Dictionary<'a>,
}

/// A dictionary encoding of a column's valid values. Codes are assigned in the order values are first seen.
#[derive(Clone, Debug, Default)]
pub struct Dictionary<'a> {
	indexes: FnvHashMap<&'a str, usize>,
	/// The distinct values, in first-seen order.
	pub values: Vec<&'a str>,
	/// One code per valid value.
	pub codes: Vec<usize>,
	/// The number of distinct values seen before the first missing value, if there is a missing value.
	pub missing_position: Option<usize>,
}

impl<'a> Dictionary<'a> {
	fn insert(&mut self, value: Option<&'a str>) {
		match value {
			Some(value) => {
				let values = &mut self.values;
				let code = *self.indexes.entry(value).or_insert_with(|| {
					values.push(value);
					values.len() - 1
				});
				self.codes.push(code);
			}
			None => {
				if self.missing_position.is_none() {
					self.missing_position = Some(self.values.len());
				}
			}
		}
	}

	pub fn valid_count(&self) -> usize {
		self.codes.len()
	}

	pub fn unique_count(&self) -> usize {
		self.values.len()
	}
}

pub struct StatsOutput(pub Vec<ColumnStatsOutput>);

/// This enum describes the different types of column stats.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnStatsOutput {
	Unknown(UnknownColumnStatsOutput),
	Number(NumberColumnStatsOutput),
	Enum(TextColumnStatsOutput),
	Text(TextColumnStatsOutput),
}

/// This struct contains stats for unknown columns.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownColumnStatsOutput {
	pub column_name: String,
	pub valid_count: usize,
	pub unique_count: usize,
}

/// This struct contains stats for number columns. Every statistic is `None` when it is undefined for the column's valid values.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberColumnStatsOutput {
	pub column_name: String,
	pub valid_count: usize,
	pub unique_count: usize,
	/// This is infinite when the column holds infinities of one sign only.
	pub mean: Option<f64>,
	/// This is the sample standard deviation. It needs at least two valid values, none of them infinite.
	pub std: Option<f64>,
	pub min: Option<f64>,
	pub p25: Option<f64>,
	pub p50: Option<f64>,
	pub p75: Option<f64>,
	pub max: Option<f64>,
}

/// This struct contains stats for enum and text columns.
#[derive(Clone, Debug, PartialEq)]
pub struct TextColumnStatsOutput {
	pub column_name: String,
	pub valid_count: usize,
	/// The distinct values, in first-seen order.
	pub unique_values: Vec<String>,
	/// Where a missing value falls among `unique_values` in first-seen order, if the column has one.
	pub missing_position: Option<usize>,
	/// The most frequent value. Ties go to the value seen first.
	pub top: Option<String>,
	pub freq: Option<usize>,
}

impl<'a> Stats<'a> {
	pub fn compute(dataframe: &DataFrameView<'a>) -> Self {
		let column_stats = dataframe
			.columns
			.par_iter()
			.map(ColumnStats::compute)
			.collect();
		Self(column_stats)
	}

	pub fn finalize(self) -> StatsOutput {
		let column_stats = self
			.0
			.into_iter()
			.map(|column_stats| column_stats.finalize())
			.collect();
		StatsOutput(column_stats)
	}
}

impl<'a> ColumnStats<'a> {
	fn compute(column: &ColumnView<'a>) -> Self {
		match column {
			ColumnView::Unknown(column) => Self::Unknown(UnknownColumnStats::compute(column)),
			ColumnView::Number(column) => Self::Number(NumberColumnStats::compute(column)),
			ColumnView::Enum(column) => Self::Enum(TextColumnStats::compute_enum(column)),
			ColumnView::Text(column) => Self::Text(TextColumnStats::compute_text(column)),
		}
	}

	fn finalize(self) -> ColumnStatsOutput {
		match self {
			Self::Unknown(s) => ColumnStatsOutput::Unknown(s.finalize()),
			Self::Number(s) => ColumnStatsOutput::Number(s.finalize()),
			Self::Enum(s) => ColumnStatsOutput::Enum(s.finalize()),
			Self::Text(s) => ColumnStatsOutput::Text(s.finalize()),
		}
	}
}

impl<'a> UnknownColumnStats<'a> {
	fn compute(column: &UnknownColumnView<'a>) -> Self {
		let mut dictionary = Dictionary::default();
		for value in column.data {
			dictionary.insert(value.as_deref());
		}
		Self {
			column_name: column.name,
			dictionary,
		}
	}

	fn finalize(self) -> UnknownColumnStatsOutput {
		UnknownColumnStatsOutput {
			column_name: self.column_name.to_owned(),
			valid_count: self.dictionary.valid_count(),
			unique_count: self.dictionary.unique_count(),
		}
	}
}

impl<'a> NumberColumnStats<'a> {
	fn compute(column: &NumberColumnView<'a>) -> Self {
		let mut stats = Self {
			column_name: column.name,
			histogram: BTreeMap::new(),
			valid_count: 0,
		};
		// NaN is the missing marker and is skipped.
		for value in column.data {
			if let Ok(value) = <NotNan<f64>>::new(*value) {
				*stats.histogram.entry(value).or_insert(0) += 1;
				stats.valid_count += 1;
			}
		}
		stats
	}

	fn finalize(self) -> NumberColumnStatsOutput {
		let mut output = NumberColumnStatsOutput {
			column_name: self.column_name.to_owned(),
			valid_count: self.valid_count,
			unique_count: self.histogram.len(),
			mean: None,
			std: None,
			min: None,
			p25: None,
			p50: None,
			p75: None,
			max: None,
		};
		if self.valid_count == 0 {
			return output;
		}
		output.min = self.histogram.keys().next().map(|value| value.get());
		output.max = self.histogram.keys().next_back().map(|value| value.get());
		let total_values_count = self.valid_count.to_f64().unwrap();
		let quantiles: Vec<f64> = vec![0.25, 0.50, 0.75];
		// Find the index of each quantile given the total number of values in the dataset.
		let quantile_indexes: Vec<usize> = quantiles
			.iter()
			.map(|q| ((total_values_count - 1.0) * q).trunc().to_usize().unwrap())
			.collect();
		// This is the fractional part of the index used to interpolate values if the index is not an integer value.
		let quantile_fracts: Vec<f64> = quantiles
			.iter()
			.map(|q| ((total_values_count - 1.0) * q).fract())
			.collect();
		let mut quantiles: Vec<Option<f64>> = vec![None; quantiles.len()];
		let mut current_count: usize = 0;
		let mut mean_variance = MeanVariance::default();
		let mut iter = self.histogram.iter().peekable();
		while let Some((value, count)) = iter.next() {
			let value = value.get();
			if value.is_finite() {
				mean_variance.update((value, count.to_u64().unwrap()));
			}
			current_count += count;
			let quantiles_iter = quantiles
				.iter_mut()
				.zip(quantile_indexes.iter().zip(quantile_fracts.iter()))
				.filter(|(q, (_, _))| q.is_none());
			for (quantile, (index, fract)) in quantiles_iter {
				match (current_count - 1).cmp(index) {
					Ordering::Equal => {
						if *fract > 0.0 {
							// Interpolate between two values.
							let next_value = iter.peek().map(|(next, _)| next.get()).unwrap_or(value);
							*quantile = Some(value * (1.0 - fract) + next_value * fract);
						} else {
							*quantile = Some(value);
						}
					}
					Ordering::Greater => *quantile = Some(value),
					Ordering::Less => {}
				}
			}
		}
		// Interpolating between -inf and inf is undefined.
		let quantiles: Vec<Option<f64>> = quantiles
			.into_iter()
			.map(|quantile| quantile.filter(|quantile| !quantile.is_nan()))
			.collect();
		output.p25 = quantiles[0];
		output.p50 = quantiles[1];
		output.p75 = quantiles[2];
		let has_neg_infinity = output.min == Some(f64::NEG_INFINITY);
		let has_pos_infinity = output.max == Some(f64::INFINITY);
		let mean_variance = mean_variance.finalize();
		output.mean = match (has_neg_infinity, has_pos_infinity) {
			(false, false) => mean_variance.as_ref().map(|mean_variance| mean_variance.mean),
			(true, false) => Some(f64::NEG_INFINITY),
			(false, true) => Some(f64::INFINITY),
			(true, true) => None,
		};
		if !has_neg_infinity && !has_pos_infinity {
			output.std = mean_variance
				.and_then(|mean_variance| mean_variance.variance)
				.map(|variance| variance.sqrt());
		}
		output
	}
}

impl<'a> TextColumnStats<'a> {
	fn compute_enum(column: &EnumColumnView<'a>) -> Self {
		let mut dictionary = Dictionary::default();
		for value in column.data {
			dictionary.insert(value.and_then(|value| column.option(value)));
		}
		Self {
			column_name: column.name,
			dictionary,
		}
	}

	fn compute_text(column: &TextColumnView<'a>) -> Self {
		let mut dictionary = Dictionary::default();
		for value in column.data {
			dictionary.insert(value.as_deref());
		}
		Self {
			column_name: column.name,
			dictionary,
		}
	}

	fn finalize(self) -> TextColumnStatsOutput {
		let mode = Mode::compute(self.dictionary.codes.as_slice());
		let values = &self.dictionary.values;
		TextColumnStatsOutput {
			column_name: self.column_name.to_owned(),
			valid_count: self.dictionary.valid_count(),
			top: mode.map(|mode| values[mode.code].to_owned()),
			freq: mode.map(|mode| mode.count),
			unique_values: values.iter().map(|value| (*value).to_owned()).collect(),
			missing_position: self.dictionary.missing_position,
		}
	}
}

#[cfg(test)]
fn finalize_column(column: Column) -> ColumnStatsOutput {
	let column_view = column.view();
	ColumnStats::compute(&column_view).finalize()
}

#[test]
fn test_number_quantiles_interpolate() {
	let column = NumberColumn::with_data("x".to_owned(), vec![40.0, 25.0, f64::NAN, 30.0]);
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Number(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.valid_count, 3);
	assert_eq!(stats.unique_count, 3);
	assert_eq!(stats.min, Some(25.0));
	assert_eq!(stats.p25, Some(27.5));
	assert_eq!(stats.p50, Some(30.0));
	assert_eq!(stats.p75, Some(35.0));
	assert_eq!(stats.max, Some(40.0));
}

#[test]
fn test_number_quantiles_with_repeated_values() {
	// sorted: 1 1 1 2 5
	let column = NumberColumn::with_data("x".to_owned(), vec![1.0, 5.0, 1.0, 2.0, 1.0]);
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Number(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.unique_count, 3);
	assert_eq!(stats.p25, Some(1.0));
	assert_eq!(stats.p50, Some(1.0));
	assert_eq!(stats.p75, Some(2.0));
	assert_eq!(stats.mean, Some(2.0));
	// squared deviations sum to 12, divided by n - 1
	assert!((stats.std.unwrap() - 3.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_number_single_value() {
	let column = NumberColumn::with_data("x".to_owned(), vec![f64::NAN, 3.0]);
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Number(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.valid_count, 1);
	assert_eq!(stats.mean, Some(3.0));
	assert_eq!(stats.std, None);
	assert_eq!(stats.p25, Some(3.0));
	assert_eq!(stats.p75, Some(3.0));
}

#[test]
fn test_text_dictionary_first_seen() {
	let column = TextColumn::with_data(
		"city".to_owned(),
		vec![
			Some("LA".to_owned()),
			None,
			Some("NY".to_owned()),
			Some("NY".to_owned()),
			Some("LA".to_owned()),
			None,
		],
	);
	insta::assert_debug_snapshot!(finalize_column(column.into()), @r###"
 Text(
     TextColumnStatsOutput {
         column_name: "city",
         valid_count: 4,
         unique_values: [
             "LA",
             "NY",
         ],
         missing_position: Some(
             1,
         ),
         top: Some(
             "LA",
         ),
         freq: Some(
             2,
         ),
     },
 )
 "###);
}

#[test]
fn test_enum_uses_options() {
	let column = EnumColumn::from_values(
		"size".to_owned(),
		vec!["small".to_owned(), "large".to_owned()],
		&[Some("large"), Some("small"), Some("small"), None],
	)
	.unwrap();
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Enum(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.unique_values, vec!["large".to_owned(), "small".to_owned()]);
	assert_eq!(stats.missing_position, Some(2));
	assert_eq!(stats.top.as_deref(), Some("small"));
	assert_eq!(stats.freq, Some(2));
}

#[test]
fn test_number_infinities_are_values() {
	let column = NumberColumn::with_data(
		"x".to_owned(),
		vec![f64::INFINITY, 1.0, f64::NEG_INFINITY, f64::NAN],
	);
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Number(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.valid_count, 3);
	assert_eq!(stats.unique_count, 3);
	assert_eq!(stats.min, Some(f64::NEG_INFINITY));
	assert_eq!(stats.p25, Some(f64::NEG_INFINITY));
	assert_eq!(stats.p50, Some(1.0));
	assert_eq!(stats.p75, Some(f64::INFINITY));
	assert_eq!(stats.max, Some(f64::INFINITY));
	// inf - inf
	assert_eq!(stats.mean, None);
	assert_eq!(stats.std, None);
}

#[test]
fn test_number_infinities_between_quartiles() {
	let column = NumberColumn::with_data(
		"x".to_owned(),
		vec![f64::NEG_INFINITY, f64::INFINITY],
	);
	let stats = match finalize_column(column.into()) {
		ColumnStatsOutput::Number(stats) => stats,
		_ => unreachable!(),
	};
	assert_eq!(stats.p25, None);
	assert_eq!(stats.p50, None);
	assert_eq!(stats.p75, None);
}
