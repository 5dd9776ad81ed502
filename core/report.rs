/*!
This module assembles per-column stats into a [`ReportTable`], one [`ReportRow`] per column of the source dataframe.
*/

use crate::{
	config::ReportSettings,
	error::Error,
	stats::{
		ColumnStatsOutput, NumberColumnStatsOutput, Stats, TextColumnStatsOutput,
		UnknownColumnStatsOutput,
	},
};
use num_traits::ToPrimitive;
use profiler_dataframe::DataFrame;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::cmp::Ordering;

/// The fields of a report, in the order they appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	DataType,
	PercentMissing,
	UniqueCount,
	Count,
	Mean,
	Std,
	CoefficientOfVariation,
	Min,
	P25,
	Median,
	P75,
	Max,
	Top,
	Freq,
	UniqueValues,
}

const STATS_FIELDS: [Field; 11] = [
	Field::Count,
	Field::Mean,
	Field::Std,
	Field::CoefficientOfVariation,
	Field::Min,
	Field::P25,
	Field::Median,
	Field::P75,
	Field::Max,
	Field::Top,
	Field::Freq,
];

impl Field {
	pub fn label(self) -> &'static str {
		match self {
			Field::DataType => "Data Type",
			Field::PercentMissing => "% Missing",
			Field::UniqueCount => "# Unique",
			Field::Count => "count",
			Field::Mean => "mean",
			Field::Std => "std",
			Field::CoefficientOfVariation => "Coefficient of Variation",
			Field::Min => "min",
			Field::P25 => "25th percentile",
			Field::Median => "Median (50%)",
			Field::P75 => "75th percentile",
			Field::Max => "max",
			Field::Top => "top",
			Field::Freq => "freq",
			Field::UniqueValues => "Unique Values",
		}
	}

	/// Whether a column of this type contributes this field to the report.
	fn applies_to(self, data_type: DataType) -> bool {
		match self {
			Field::DataType
			| Field::PercentMissing
			| Field::UniqueCount
			| Field::Count
			| Field::UniqueValues => true,
			Field::Mean
			| Field::Std
			| Field::CoefficientOfVariation
			| Field::Min
			| Field::P25
			| Field::Median
			| Field::P75
			| Field::Max => data_type == DataType::Number,
			Field::Top | Field::Freq => data_type == DataType::Enum || data_type == DataType::Text,
		}
	}
}

impl std::fmt::Display for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.label())
	}
}

impl Serialize for Field {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.label())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
	Number,
	Enum,
	Text,
	Unknown,
}

impl std::fmt::Display for DataType {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let data_type = match self {
			DataType::Number => "number",
			DataType::Enum => "enum",
			DataType::Text => "text",
			DataType::Unknown => "unknown",
		};
		write!(f, "{}", data_type)
	}
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReportTable {
	/// The fields present in this report, in display order. Stats fields that no column produces are left out.
	pub fields: Vec<Field>,
	/// One row per source column, sorted by `percent_missing` descending. Ties keep the source column order.
	pub rows: Vec<ReportRow>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReportRow {
	pub column_name: String,
	pub data_type: DataType,
	pub percent_missing: f64,
	/// The number of distinct valid values.
	pub unique_count: usize,
	/// The number of valid values.
	pub count: usize,
	/// This is `Some` for number columns.
	pub number: Option<NumberStats>,
	/// This is `Some` for enum and text columns.
	pub text: Option<TextStats>,
	pub coefficient_of_variation: Option<f64>,
	pub unique_values: UniqueValues,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NumberStats {
	pub mean: Option<f64>,
	pub std: Option<f64>,
	pub min: Option<f64>,
	pub p25: Option<f64>,
	pub p50: Option<f64>,
	pub p75: Option<f64>,
	pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextStats {
	pub top: Option<String>,
	pub freq: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UniqueValues {
	/// The column is neither an enum nor a text column.
	NotApplicable,
	/// The distinct values in first-seen order. `None` marks where the first missing value was seen.
	List(Vec<Option<String>>),
	/// The column has more distinct values than the cardinality limit.
	HighCardinality,
}

pub const HIGH_CARDINALITY: &str = "[High Cardinality]";

impl Serialize for UniqueValues {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			UniqueValues::NotApplicable => serializer.serialize_none(),
			UniqueValues::List(values) => {
				let mut seq = serializer.serialize_seq(Some(values.len()))?;
				for value in values {
					seq.serialize_element(value)?;
				}
				seq.end()
			}
			UniqueValues::HighCardinality => serializer.serialize_str(HIGH_CARDINALITY),
		}
	}
}

/// A single field of a report row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell<'a> {
	Missing,
	DataType(DataType),
	Float(f64),
	Count(usize),
	Text(&'a str),
	List(&'a [Option<String>]),
	HighCardinality,
}

/**
Build a report describing every column of `dataframe`.

Each column is profiled independently. Rows are sorted by the percentage of missing values, most missing first, and columns with the same percentage keep their order from `dataframe`. Statistics that are undefined for a column, such as the mean of a column with no valid values, are `None`. The dataframe is only read.

When `settings.label` is not empty, the label and the dataframe's shape are logged at the info level.

# Errors

Returns [`Error::InvalidInput`] if the dataframe is not a well formed table. See [`DataFrame::validate`](../profiler_dataframe/struct.DataFrame.html#method.validate).
*/
pub fn build_report(dataframe: &DataFrame, settings: &ReportSettings) -> Result<ReportTable, Error> {
	let dataframe = dataframe.view();
	dataframe.validate()?;
	if !settings.label.is_empty() {
		log::info!(
			"--- Definitive Data Profiling Report for: {} ---",
			settings.label
		);
		log::info!(
			"Shape of DataFrame: ({}, {})",
			dataframe.nrows(),
			dataframe.ncols()
		);
	}
	let n_rows = dataframe.nrows();
	let stats = Stats::compute(&dataframe).finalize();
	let mut rows: Vec<ReportRow> = stats
		.0
		.into_iter()
		.map(|column_stats| ReportRow::new(column_stats, n_rows, settings.cardinality_limit))
		.collect();
	let fields = present_fields(&rows);
	// sort_by is stable, so ties keep the source column order
	rows.sort_by(|a, b| {
		b.percent_missing
			.partial_cmp(&a.percent_missing)
			.unwrap_or(Ordering::Equal)
	});
	Ok(ReportTable { fields, rows })
}

fn present_fields(rows: &[ReportRow]) -> Vec<Field> {
	let mut fields = vec![Field::DataType, Field::PercentMissing, Field::UniqueCount];
	fields.extend(STATS_FIELDS.iter().copied().filter(|field| {
		rows.iter()
			.any(|row| field.applies_to(row.data_type))
	}));
	fields.push(Field::UniqueValues);
	fields
}

fn percent_missing(n_rows: usize, valid_count: usize) -> f64 {
	// An empty column has nothing missing.
	if n_rows == 0 {
		return 0.0;
	}
	(n_rows - valid_count).to_f64().unwrap() / n_rows.to_f64().unwrap() * 100.0
}

fn coefficient_of_variation(mean: Option<f64>, std: Option<f64>) -> Option<f64> {
	match (mean, std) {
		(Some(mean), Some(std)) if mean != 0.0 => Some((std / mean).abs()),
		_ => None,
	}
}

fn unique_values(stats: &TextColumnStatsOutput, cardinality_limit: usize) -> UniqueValues {
	if stats.unique_values.len() > cardinality_limit {
		return UniqueValues::HighCardinality;
	}
	let mut values: Vec<Option<String>> = stats.unique_values.iter().cloned().map(Some).collect();
	if let Some(position) = stats.missing_position {
		values.insert(position, None);
	}
	UniqueValues::List(values)
}

impl ReportRow {
	fn new(stats: ColumnStatsOutput, n_rows: usize, cardinality_limit: usize) -> Self {
		match stats {
			ColumnStatsOutput::Unknown(stats) => Self::from_unknown(stats, n_rows),
			ColumnStatsOutput::Number(stats) => Self::from_number(stats, n_rows),
			ColumnStatsOutput::Enum(stats) => {
				Self::from_text(stats, DataType::Enum, n_rows, cardinality_limit)
			}
			ColumnStatsOutput::Text(stats) => {
				Self::from_text(stats, DataType::Text, n_rows, cardinality_limit)
			}
		}
	}

	fn from_unknown(stats: UnknownColumnStatsOutput, n_rows: usize) -> Self {
		Self {
			percent_missing: percent_missing(n_rows, stats.valid_count),
			column_name: stats.column_name,
			data_type: DataType::Unknown,
			unique_count: stats.unique_count,
			count: stats.valid_count,
			number: None,
			text: None,
			coefficient_of_variation: None,
			unique_values: UniqueValues::NotApplicable,
		}
	}

	fn from_number(stats: NumberColumnStatsOutput, n_rows: usize) -> Self {
		Self {
			percent_missing: percent_missing(n_rows, stats.valid_count),
			coefficient_of_variation: coefficient_of_variation(stats.mean, stats.std),
			column_name: stats.column_name,
			data_type: DataType::Number,
			unique_count: stats.unique_count,
			count: stats.valid_count,
			number: Some(NumberStats {
				mean: stats.mean,
				std: stats.std,
				min: stats.min,
				p25: stats.p25,
				p50: stats.p50,
				p75: stats.p75,
				max: stats.max,
			}),
			text: None,
			unique_values: UniqueValues::NotApplicable,
		}
	}

	fn from_text(
		stats: TextColumnStatsOutput,
		data_type: DataType,
		n_rows: usize,
		cardinality_limit: usize,
	) -> Self {
		let unique_values = unique_values(&stats, cardinality_limit);
		Self {
			percent_missing: percent_missing(n_rows, stats.valid_count),
			data_type,
			unique_count: stats.unique_values.len(),
			count: stats.valid_count,
			number: None,
			text: Some(TextStats {
				top: stats.top,
				freq: stats.freq,
			}),
			coefficient_of_variation: None,
			unique_values,
			column_name: stats.column_name,
		}
	}

	/// Get the value of `field` for this row. Fields that do not apply to the row's column type are `Cell::Missing`.
	pub fn cell(&self, field: Field) -> Cell {
		let number = |f: fn(&NumberStats) -> Option<f64>| {
			self.number
				.as_ref()
				.and_then(f)
				.map(Cell::Float)
				.unwrap_or(Cell::Missing)
		};
		match field {
			Field::DataType => Cell::DataType(self.data_type),
			Field::PercentMissing => Cell::Float(self.percent_missing),
			Field::UniqueCount => Cell::Count(self.unique_count),
			Field::Count => Cell::Count(self.count),
			Field::Mean => number(|s| s.mean),
			Field::Std => number(|s| s.std),
			Field::CoefficientOfVariation => self
				.coefficient_of_variation
				.map(Cell::Float)
				.unwrap_or(Cell::Missing),
			Field::Min => number(|s| s.min),
			Field::P25 => number(|s| s.p25),
			Field::Median => number(|s| s.p50),
			Field::P75 => number(|s| s.p75),
			Field::Max => number(|s| s.max),
			Field::Top => self
				.text
				.as_ref()
				.and_then(|s| s.top.as_deref())
				.map(Cell::Text)
				.unwrap_or(Cell::Missing),
			Field::Freq => self
				.text
				.as_ref()
				.and_then(|s| s.freq)
				.map(Cell::Count)
				.unwrap_or(Cell::Missing),
			Field::UniqueValues => match &self.unique_values {
				UniqueValues::NotApplicable => Cell::Missing,
				UniqueValues::List(values) => Cell::List(values),
				UniqueValues::HighCardinality => Cell::HighCardinality,
			},
		}
	}
}

impl ReportTable {
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Find the row for a source column.
	pub fn row(&self, column_name: &str) -> Option<&ReportRow> {
		self.rows.iter().find(|row| row.column_name == column_name)
	}

	/// The source column names in report order.
	pub fn column_names(&self) -> Vec<&str> {
		self.rows.iter().map(|row| row.column_name.as_str()).collect()
	}

	pub fn labels(&self) -> Vec<&'static str> {
		self.fields.iter().map(|field| field.label()).collect()
	}
}

#[cfg(test)]
use profiler_dataframe::*;

#[cfg(test)]
fn age_and_city() -> DataFrame {
	DataFrame::from_columns(vec![
		NumberColumn::with_data("age".to_owned(), vec![25.0, 30.0, f64::NAN, 40.0]).into(),
		TextColumn::with_data(
			"city".to_owned(),
			vec![
				Some("NY".to_owned()),
				Some("NY".to_owned()),
				Some("LA".to_owned()),
				None,
			],
		)
		.into(),
	])
}

#[cfg(test)]
fn assert_close(actual: Option<f64>, expected: f64) {
	let actual = actual.unwrap();
	assert!(
		(actual - expected).abs() < 1e-9,
		"{} is not close to {}",
		actual,
		expected
	);
}

#[test]
fn test_age_and_city() {
	let report = build_report(&age_and_city(), &ReportSettings::default()).unwrap();
	assert_eq!(report.column_names(), vec!["age", "city"]);

	let age = report.row("age").unwrap();
	let age_std = (175.0f64 / 3.0).sqrt();
	assert_eq!(age.data_type, DataType::Number);
	assert_eq!(age.percent_missing, 25.0);
	assert_eq!(age.unique_count, 3);
	assert_eq!(age.count, 3);
	let number = age.number.as_ref().unwrap();
	assert_close(number.mean, 95.0 / 3.0);
	assert_close(number.std, age_std);
	assert_eq!(number.min, Some(25.0));
	assert_eq!(number.p25, Some(27.5));
	assert_eq!(number.p50, Some(30.0));
	assert_eq!(number.p75, Some(35.0));
	assert_eq!(number.max, Some(40.0));
	assert_close(age.coefficient_of_variation, age_std / (95.0 / 3.0));
	assert_eq!(age.text, None);
	assert_eq!(age.unique_values, UniqueValues::NotApplicable);

	let city = report.row("city").unwrap();
	assert_eq!(city.data_type, DataType::Text);
	assert_eq!(city.percent_missing, 25.0);
	assert_eq!(city.unique_count, 2);
	assert_eq!(city.count, 3);
	assert_eq!(
		city.text,
		Some(TextStats {
			top: Some("NY".to_owned()),
			freq: Some(2),
		})
	);
	assert_eq!(city.number, None);
	assert_eq!(city.coefficient_of_variation, None);
	assert_eq!(
		city.unique_values,
		UniqueValues::List(vec![Some("NY".to_owned()), Some("LA".to_owned()), None])
	);
}

#[test]
fn test_fields() {
	let report = build_report(&age_and_city(), &ReportSettings::default()).unwrap();
	insta::assert_debug_snapshot!(report.labels(), @r###"
 [
     "Data Type",
     "% Missing",
     "# Unique",
     "count",
     "mean",
     "std",
     "Coefficient of Variation",
     "min",
     "25th percentile",
     "Median (50%)",
     "75th percentile",
     "max",
     "top",
     "freq",
     "Unique Values",
 ]
 "###);
}

#[test]
fn test_fields_without_number_columns() {
	let df = DataFrame::from_columns(vec![
		TextColumn::with_data("a".to_owned(), vec![Some("x".to_owned())]).into(),
		UnknownColumn::with_data("b".to_owned(), vec![Some("true".to_owned())]).into(),
	]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert_eq!(
		report.fields,
		vec![
			Field::DataType,
			Field::PercentMissing,
			Field::UniqueCount,
			Field::Count,
			Field::Top,
			Field::Freq,
			Field::UniqueValues,
		]
	);
}

#[test]
fn test_fields_without_text_columns() {
	let df = DataFrame::from_columns(vec![NumberColumn::with_data(
		"a".to_owned(),
		vec![f64::NAN, f64::NAN],
	)
	.into()]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert!(report.fields.contains(&Field::Median));
	assert!(!report.fields.contains(&Field::Top));
	assert!(!report.fields.contains(&Field::Freq));
}

#[test]
fn test_no_columns() {
	let report = build_report(&DataFrame::from_columns(Vec::new()), &ReportSettings::default())
		.unwrap();
	assert!(report.is_empty());
	assert_eq!(report.labels(), vec!["Data Type", "% Missing", "# Unique", "Unique Values"]);
}

#[test]
fn test_one_row_per_column_and_idempotent() {
	let df = DataFrame::from_columns(vec![
		UnknownColumn::with_data("u".to_owned(), vec![None, Some("x".to_owned()), None]).into(),
		NumberColumn::with_data("n".to_owned(), vec![1.0, 2.0, 3.0]).into(),
		EnumColumn::from_values(
			"e".to_owned(),
			vec!["a".to_owned(), "b".to_owned()],
			&[Some("a"), None, Some("b")],
		)
		.unwrap()
		.into(),
	]);
	let before = df.clone();
	let settings = ReportSettings::default();
	let first = build_report(&df, &settings).unwrap();
	let second = build_report(&df, &settings).unwrap();
	assert_eq!(first, second);
	assert_eq!(df, before);
	assert_eq!(first.len(), df.ncols());
	let mut names = first.column_names();
	names.sort_unstable();
	assert_eq!(names, vec!["e", "n", "u"]);
}

#[test]
fn test_all_missing_number_column() {
	let df = DataFrame::from_columns(vec![NumberColumn::with_data(
		"x".to_owned(),
		vec![f64::NAN, f64::NAN, f64::NAN],
	)
	.into()]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	let row = report.row("x").unwrap();
	assert_eq!(row.percent_missing, 100.0);
	assert_eq!(row.count, 0);
	assert_eq!(row.unique_count, 0);
	assert_eq!(
		row.number,
		Some(NumberStats {
			mean: None,
			std: None,
			min: None,
			p25: None,
			p50: None,
			p75: None,
			max: None,
		})
	);
	assert_eq!(row.coefficient_of_variation, None);
	for field in report.fields.iter().filter(|field| {
		!matches!(
			field,
			Field::DataType | Field::PercentMissing | Field::UniqueCount | Field::Count
		)
	}) {
		assert_eq!(row.cell(*field), Cell::Missing);
	}
}

#[test]
fn test_coefficient_of_variation() {
	let df = DataFrame::from_columns(vec![
		NumberColumn::with_data("zero_mean".to_owned(), vec![-1.0, 1.0]).into(),
		NumberColumn::with_data("single".to_owned(), vec![4.0, f64::NAN]).into(),
		NumberColumn::with_data("constant".to_owned(), vec![2.0, 2.0]).into(),
		NumberColumn::with_data("negative".to_owned(), vec![-2.0, -4.0]).into(),
	]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert_eq!(report.row("zero_mean").unwrap().coefficient_of_variation, None);
	assert_eq!(report.row("single").unwrap().coefficient_of_variation, None);
	assert_eq!(report.row("constant").unwrap().coefficient_of_variation, Some(0.0));
	let negative = report.row("negative").unwrap();
	let std = negative.number.as_ref().unwrap().std;
	assert_close(std, 2.0f64.sqrt());
	assert_close(negative.coefficient_of_variation, 2.0f64.sqrt() / 3.0);
}

#[test]
fn test_infinity_is_not_missing() {
	let df = DataFrame::from_columns(vec![NumberColumn::with_data(
		"x".to_owned(),
		vec![1.0, f64::INFINITY, 3.0, f64::NAN],
	)
	.into()]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	let row = report.row("x").unwrap();
	assert_eq!(row.percent_missing, 25.0);
	assert_eq!(row.count, 3);
	assert_eq!(row.unique_count, 3);
	assert_eq!(
		row.number,
		Some(NumberStats {
			mean: Some(f64::INFINITY),
			std: None,
			min: Some(1.0),
			p25: Some(2.0),
			p50: Some(3.0),
			p75: Some(f64::INFINITY),
			max: Some(f64::INFINITY),
		})
	);
	assert_eq!(row.coefficient_of_variation, None);
}

#[test]
fn test_sort_by_percent_missing_is_stable() {
	let df = DataFrame::from_columns(vec![
		NumberColumn::with_data("a".to_owned(), vec![1.0, 2.0, 3.0, 4.0]).into(),
		NumberColumn::with_data("b".to_owned(), vec![f64::NAN, 2.0, f64::NAN, 4.0]).into(),
		TextColumn::with_data(
			"c".to_owned(),
			vec![
				None,
				Some("x".to_owned()),
				Some("y".to_owned()),
				Some("z".to_owned()),
			],
		)
		.into(),
		UnknownColumn::with_data(
			"d".to_owned(),
			vec![None, None, Some("1".to_owned()), Some("2".to_owned())],
		)
		.into(),
		TextColumn::with_data("e".to_owned(), vec![Some("x".to_owned()); 4]).into(),
	]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert_eq!(report.column_names(), vec!["b", "d", "c", "a", "e"]);
	let percent_missing: Vec<f64> = report.rows.iter().map(|row| row.percent_missing).collect();
	assert_eq!(percent_missing, vec![50.0, 50.0, 25.0, 0.0, 0.0]);
}

#[test]
fn test_cardinality_limit() {
	let df = DataFrame::from_columns(vec![TextColumn::with_data(
		"t".to_owned(),
		vec![Some("b".to_owned()), None, Some("a".to_owned()), Some("b".to_owned())],
	)
	.into()]);
	let list = UniqueValues::List(vec![Some("b".to_owned()), None, Some("a".to_owned())]);
	let limits = [
		(0, UniqueValues::HighCardinality),
		(1, UniqueValues::HighCardinality),
		(2, list.clone()),
		(15, list),
	];
	for (cardinality_limit, expected) in limits.iter() {
		let settings = ReportSettings {
			cardinality_limit: *cardinality_limit,
			..Default::default()
		};
		let report = build_report(&df, &settings).unwrap();
		assert_eq!(&report.rows[0].unique_values, expected);
	}
}

#[test]
fn test_enum_and_unknown_columns() {
	let df = DataFrame::from_columns(vec![
		EnumColumn::from_values(
			"grade".to_owned(),
			vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
			&[Some("c"), Some("a"), Some("a"), Some("c"), None],
		)
		.unwrap()
		.into(),
		UnknownColumn::with_data(
			"flag".to_owned(),
			vec![
				Some("true".to_owned()),
				Some("false".to_owned()),
				Some("true".to_owned()),
				None,
				None,
			],
		)
		.into(),
	]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert_eq!(report.column_names(), vec!["flag", "grade"]);
	let grade = report.row("grade").unwrap();
	assert_eq!(grade.data_type, DataType::Enum);
	assert_eq!(grade.unique_count, 2);
	// "c" and "a" are tied, "c" was seen first
	assert_eq!(grade.cell(Field::Top), Cell::Text("c"));
	assert_eq!(grade.cell(Field::Freq), Cell::Count(2));
	assert_eq!(
		grade.unique_values,
		UniqueValues::List(vec![Some("c".to_owned()), Some("a".to_owned()), None])
	);
	let flag = report.row("flag").unwrap();
	assert_eq!(flag.data_type, DataType::Unknown);
	assert_eq!(flag.percent_missing, 40.0);
	assert_eq!(flag.unique_count, 2);
	assert_eq!(flag.count, 3);
	assert_eq!(flag.cell(Field::Top), Cell::Missing);
	assert_eq!(flag.cell(Field::Mean), Cell::Missing);
	assert_eq!(flag.unique_values, UniqueValues::NotApplicable);
}

#[test]
fn test_empty_dataframe() {
	let df = DataFrame::new(
		vec!["a".to_owned(), "b".to_owned()],
		vec![ColumnType::Number, ColumnType::Text],
	);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	assert_eq!(report.column_names(), vec!["a", "b"]);
	let a = report.row("a").unwrap();
	assert_eq!(a.percent_missing, 0.0);
	assert_eq!(a.count, 0);
	for field in &[
		Field::Mean,
		Field::Std,
		Field::CoefficientOfVariation,
		Field::Min,
		Field::P25,
		Field::Median,
		Field::P75,
		Field::Max,
	] {
		assert_eq!(a.cell(*field), Cell::Missing);
	}
	let b = report.row("b").unwrap();
	assert_eq!(b.percent_missing, 0.0);
	assert_eq!(b.cell(Field::Top), Cell::Missing);
	assert_eq!(b.cell(Field::Freq), Cell::Missing);
	assert_eq!(b.unique_values, UniqueValues::List(Vec::new()));
}

#[test]
fn test_empty_strings_are_values() {
	let df = DataFrame::from_columns(vec![TextColumn::with_data(
		"s".to_owned(),
		vec![Some(String::new()), Some(String::new()), None],
	)
	.into()]);
	let report = build_report(&df, &ReportSettings::default()).unwrap();
	let row = report.row("s").unwrap();
	assert_eq!(row.count, 2);
	assert_eq!(row.unique_count, 1);
	assert_eq!(row.cell(Field::Top), Cell::Text(""));
}

#[test]
fn test_invalid_input() {
	let df = DataFrame::from_columns(vec![
		NumberColumn::with_data("a".to_owned(), vec![1.0, 2.0]).into(),
		NumberColumn::with_data("b".to_owned(), vec![1.0]).into(),
	]);
	let settings = ReportSettings {
		label: "broken".to_owned(),
		..Default::default()
	};
	assert_eq!(
		build_report(&df, &settings),
		Err(Error::InvalidInput(DataFrameError::UnequalColumnLengths {
			column_name: "b".to_owned(),
			len: 1,
			expected_len: 2,
		}))
	);
}

#[test]
fn test_label_does_not_change_report() {
	let df = age_and_city();
	let unlabeled = build_report(&df, &ReportSettings::default()).unwrap();
	let labeled = build_report(
		&df,
		&ReportSettings {
			label: "people".to_owned(),
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(unlabeled, labeled);
}

#[cfg(test)]
thread_local! {
	static LOG_LINES: std::cell::RefCell<Vec<String>> = std::cell::RefCell::new(Vec::new());
}

/// Records info messages per thread, so tests running in parallel see only their own lines.
#[cfg(test)]
struct ThreadLogger;

#[cfg(test)]
impl log::Log for ThreadLogger {
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= log::Level::Info
	}

	fn log(&self, record: &log::Record) {
		if self.enabled(record.metadata()) {
			LOG_LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
		}
	}

	fn flush(&self) {}
}

#[cfg(test)]
fn logged_lines(f: impl FnOnce()) -> Vec<String> {
	static LOGGER: ThreadLogger = ThreadLogger;
	static INIT: std::sync::Once = std::sync::Once::new();
	INIT.call_once(|| {
		log::set_logger(&LOGGER).unwrap();
		log::set_max_level(log::LevelFilter::Info);
	});
	LOG_LINES.with(|lines| lines.borrow_mut().clear());
	f();
	LOG_LINES.with(|lines| lines.borrow_mut().drain(..).collect())
}

#[test]
fn test_label_header() {
	let df = age_and_city();
	let settings = ReportSettings {
		label: "people".to_owned(),
		..Default::default()
	};
	let lines = logged_lines(|| {
		build_report(&df, &settings).unwrap();
	});
	assert_eq!(
		lines,
		vec![
			"--- Definitive Data Profiling Report for: people ---".to_owned(),
			"Shape of DataFrame: (4, 2)".to_owned(),
		]
	);
	let lines = logged_lines(|| {
		build_report(&df, &ReportSettings::default()).unwrap();
	});
	assert!(lines.is_empty());
}

#[test]
fn test_serialize() {
	let report = build_report(&age_and_city(), &ReportSettings::default()).unwrap();
	let value = serde_json::to_value(&report).unwrap();
	assert_eq!(value["fields"][9], "Median (50%)");
	assert_eq!(value["rows"][0]["column_name"], "age");
	assert_eq!(value["rows"][0]["data_type"], "number");
	assert_eq!(value["rows"][0]["percent_missing"], 25.0);
	assert_eq!(value["rows"][0]["text"], serde_json::Value::Null);
	assert_eq!(value["rows"][0]["unique_values"], serde_json::Value::Null);
	assert_eq!(
		value["rows"][1]["unique_values"],
		serde_json::json!(["NY", "LA", null])
	);
	let settings = ReportSettings {
		cardinality_limit: 0,
		..Default::default()
	};
	let report = build_report(&age_and_city(), &settings).unwrap();
	let value = serde_json::to_value(&report).unwrap();
	assert_eq!(value["rows"][1]["unique_values"], HIGH_CARDINALITY);
}
