/*!
This crate provides a basic implementation of dataframes, which are two dimensional arrays of data where each column can have a different data type, like a spreadsheet. It implements only what the profiler needs: typed columns that may contain missing values, borrowed views over them, and a well-formedness check.

A dataframe is never mutated by profiling. Every computation goes through a [`DataFrameView`].
*/

use fnv::FnvHashSet;
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrameView<'a> {
	pub columns: Vec<ColumnView<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	Unknown(UnknownColumn),
	Number(NumberColumn),
	Enum(EnumColumn),
	Text(TextColumn),
}

/// A column whose values the profiler does not interpret. Values are kept as opaque representations so they can still be counted and compared for equality.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumn {
	pub name: String,
	pub data: Vec<Option<String>>,
}

/// A number column. NaN is missing. Infinities are values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f64>,
}

/// A dictionary encoded categorical column. `Some(i)` refers to `options[i - 1]` and `None` is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<Option<NonZeroUsize>>,
}

/// A free text column. `None` is missing, `Some("")` is a present empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
	pub name: String,
	pub data: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnView<'a> {
	Unknown(UnknownColumnView<'a>),
	Number(NumberColumnView<'a>),
	Enum(EnumColumnView<'a>),
	Text(TextColumnView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumnView<'a> {
	pub name: &'a str,
	pub data: &'a [Option<String>],
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumnView<'a> {
	pub name: &'a str,
	pub data: &'a [f64],
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumnView<'a> {
	pub name: &'a str,
	pub options: &'a [String],
	pub data: &'a [Option<NonZeroUsize>],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumnView<'a> {
	pub name: &'a str,
	pub data: &'a [Option<String>],
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
	Unknown,
	Number,
	Enum { options: Vec<String> },
	Text,
}

/// A dataframe that violates the tabular precondition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataFrameError {
	#[error("column \"{column_name}\" has {len} rows, expected {expected_len}")]
	UnequalColumnLengths {
		column_name: String,
		len: usize,
		expected_len: usize,
	},
	#[error("column name \"{column_name}\" appears more than once")]
	DuplicateColumnName { column_name: String },
	#[error("column \"{column_name}\" has value {value} at row {row} but only {n_options} options")]
	InvalidEnumValue {
		column_name: String,
		row: usize,
		value: usize,
		n_options: usize,
	},
	#[error("column \"{column_name}\" has value \"{value}\" at row {row}, which is not one of its options")]
	UnknownEnumOption {
		column_name: String,
		row: usize,
		value: String,
	},
}

impl DataFrame {
	pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
		let columns = column_names
			.into_iter()
			.zip(column_types.into_iter())
			.map(|(column_name, column_type)| match column_type {
				ColumnType::Unknown => Column::Unknown(UnknownColumn::new(column_name)),
				ColumnType::Number => Column::Number(NumberColumn::new(column_name)),
				ColumnType::Enum { options } => Column::Enum(EnumColumn::new(column_name, options)),
				ColumnType::Text => Column::Text(TextColumn::new(column_name)),
			})
			.collect();
		Self { columns }
	}

	pub fn from_columns(columns: Vec<Column>) -> Self {
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn view(&self) -> DataFrameView {
		let columns = self.columns.iter().map(|column| column.view()).collect();
		DataFrameView { columns }
	}

	/// Check that every column has the same number of rows, that column names are unique, and that every enum value refers to one of its column's options.
	pub fn validate(&self) -> Result<(), DataFrameError> {
		self.view().validate()
	}
}

impl Column {
	pub fn len(&self) -> usize {
		match self {
			Self::Unknown(s) => s.data.len(),
			Self::Number(s) => s.data.len(),
			Self::Enum(s) => s.data.len(),
			Self::Text(s) => s.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Self::Unknown(s) => s.data.is_empty(),
			Self::Number(s) => s.data.is_empty(),
			Self::Enum(s) => s.data.is_empty(),
			Self::Text(s) => s.data.is_empty(),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Unknown(s) => s.name.as_str(),
			Self::Number(s) => s.name.as_str(),
			Self::Enum(s) => s.name.as_str(),
			Self::Text(s) => s.name.as_str(),
		}
	}

	pub fn view(&self) -> ColumnView {
		match self {
			Self::Unknown(column) => ColumnView::Unknown(column.view()),
			Self::Number(column) => ColumnView::Number(column.view()),
			Self::Enum(column) => ColumnView::Enum(column.view()),
			Self::Text(column) => ColumnView::Text(column.view()),
		}
	}
}

impl From<UnknownColumn> for Column {
	fn from(column: UnknownColumn) -> Self {
		Self::Unknown(column)
	}
}

impl From<NumberColumn> for Column {
	fn from(column: NumberColumn) -> Self {
		Self::Number(column)
	}
}

impl From<EnumColumn> for Column {
	fn from(column: EnumColumn) -> Self {
		Self::Enum(column)
	}
}

impl From<TextColumn> for Column {
	fn from(column: TextColumn) -> Self {
		Self::Text(column)
	}
}

impl UnknownColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}

	pub fn with_data(name: String, data: Vec<Option<String>>) -> Self {
		Self { name, data }
	}

	pub fn view(&self) -> UnknownColumnView {
		UnknownColumnView {
			name: &self.name,
			data: &self.data,
		}
	}
}

impl NumberColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}

	pub fn with_data(name: String, data: Vec<f64>) -> Self {
		Self { name, data }
	}

	pub fn view(&self) -> NumberColumnView {
		NumberColumnView {
			name: &self.name,
			data: &self.data,
		}
	}
}

impl EnumColumn {
	pub fn new(name: String, options: Vec<String>) -> Self {
		Self {
			name,
			options,
			data: Vec::new(),
		}
	}

	pub fn with_data(name: String, options: Vec<String>, data: Vec<Option<NonZeroUsize>>) -> Self {
		Self {
			name,
			options,
			data,
		}
	}

	/// Encode `values` against `options`. `None` is missing. A value that is not among the options is an error.
	pub fn from_values(
		name: String,
		options: Vec<String>,
		values: &[Option<&str>],
	) -> Result<Self, DataFrameError> {
		let mut data = Vec::with_capacity(values.len());
		for (row, value) in values.iter().enumerate() {
			let value = match value {
				Some(value) => value,
				None => {
					data.push(None);
					continue;
				}
			};
			let index = options.iter().position(|option| option == value).ok_or_else(|| {
				DataFrameError::UnknownEnumOption {
					column_name: name.clone(),
					row,
					value: (*value).to_owned(),
				}
			})?;
			data.push(NonZeroUsize::new(index + 1));
		}
		Ok(Self {
			name,
			options,
			data,
		})
	}

	pub fn view(&self) -> EnumColumnView {
		EnumColumnView {
			name: &self.name,
			data: &self.data,
			options: &self.options,
		}
	}
}

impl TextColumn {
	pub fn new(name: String) -> Self {
		Self {
			name,
			data: Vec::new(),
		}
	}

	pub fn with_data(name: String, data: Vec<Option<String>>) -> Self {
		Self { name, data }
	}

	pub fn view(&self) -> TextColumnView {
		TextColumnView {
			name: &self.name,
			data: &self.data,
		}
	}
}

impl<'a> DataFrameView<'a> {
	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(|column| column.len()).unwrap_or(0)
	}

	pub fn validate(&self) -> Result<(), DataFrameError> {
		let expected_len = self.nrows();
		let mut column_names = FnvHashSet::default();
		for column in self.columns.iter() {
			if column.len() != expected_len {
				return Err(DataFrameError::UnequalColumnLengths {
					column_name: column.name().to_owned(),
					len: column.len(),
					expected_len,
				});
			}
			if !column_names.insert(column.name()) {
				return Err(DataFrameError::DuplicateColumnName {
					column_name: column.name().to_owned(),
				});
			}
			if let ColumnView::Enum(column) = column {
				let n_options = column.options.len();
				let invalid = column
					.data
					.iter()
					.enumerate()
					.find_map(|(row, value)| match value {
						Some(value) if value.get() > n_options => Some((row, value.get())),
						_ => None,
					});
				if let Some((row, value)) = invalid {
					return Err(DataFrameError::InvalidEnumValue {
						column_name: column.name.to_owned(),
						row,
						value,
						n_options,
					});
				}
			}
		}
		Ok(())
	}
}

impl<'a> ColumnView<'a> {
	pub fn len(&self) -> usize {
		match self {
			Self::Unknown(s) => s.data.len(),
			Self::Number(s) => s.data.len(),
			Self::Enum(s) => s.data.len(),
			Self::Text(s) => s.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn name(&self) -> &'a str {
		match self {
			Self::Unknown(s) => s.name,
			Self::Number(s) => s.name,
			Self::Enum(s) => s.name,
			Self::Text(s) => s.name,
		}
	}
}

impl<'a> EnumColumnView<'a> {
	/// Look up the option for an enum value.
	pub fn option(&self, value: NonZeroUsize) -> Option<&'a str> {
		self.options.get(value.get() - 1).map(|option| option.as_str())
	}
}

#[cfg(test)]
fn test_dataframe() -> DataFrame {
	DataFrame::from_columns(vec![
		NumberColumn::with_data("age".to_owned(), vec![25.0, 30.0, f64::NAN, 40.0]).into(),
		EnumColumn::from_values(
			"color".to_owned(),
			vec!["red".to_owned(), "blue".to_owned()],
			&[Some("blue"), None, Some("red"), None],
		)
		.unwrap()
		.into(),
		TextColumn::with_data(
			"city".to_owned(),
			vec![Some("NY".to_owned()), None, Some(String::new()), None],
		)
		.into(),
	])
}

#[test]
fn test_shape() {
	let df = test_dataframe();
	assert_eq!(df.ncols(), 3);
	assert_eq!(df.nrows(), 4);
	assert!(df.validate().is_ok());
	let empty = DataFrame::new(
		vec!["a".to_owned(), "b".to_owned()],
		vec![ColumnType::Number, ColumnType::Text],
	);
	assert_eq!(empty.ncols(), 2);
	assert_eq!(empty.nrows(), 0);
	assert!(empty.validate().is_ok());
}

#[test]
fn test_enum_from_values() {
	let df = test_dataframe();
	let column = match &df.columns[1] {
		Column::Enum(column) => column,
		_ => unreachable!(),
	};
	insta::assert_debug_snapshot!(column.data, @r###"
 [
     Some(
         2,
     ),
     None,
     Some(
         1,
     ),
     None,
 ]
 "###);
	let view = column.view();
	assert_eq!(view.option(NonZeroUsize::new(2).unwrap()), Some("blue"));
}

#[test]
fn test_validate_unequal_lengths() {
	let df = DataFrame::from_columns(vec![
		NumberColumn::with_data("a".to_owned(), vec![1.0, 2.0]).into(),
		TextColumn::with_data("b".to_owned(), vec![None]).into(),
	]);
	assert_eq!(
		df.validate(),
		Err(DataFrameError::UnequalColumnLengths {
			column_name: "b".to_owned(),
			len: 1,
			expected_len: 2,
		})
	);
}

#[test]
fn test_validate_duplicate_name() {
	let df = DataFrame::from_columns(vec![
		NumberColumn::with_data("a".to_owned(), vec![1.0]).into(),
		UnknownColumn::with_data("a".to_owned(), vec![None]).into(),
	]);
	assert_eq!(
		df.validate(),
		Err(DataFrameError::DuplicateColumnName {
			column_name: "a".to_owned(),
		})
	);
}

#[test]
fn test_validate_enum_value_out_of_range() {
	let df = DataFrame::from_columns(vec![EnumColumn::with_data(
		"e".to_owned(),
		vec!["x".to_owned()],
		vec![NonZeroUsize::new(1), NonZeroUsize::new(3)],
	)
	.into()]);
	let error = df.validate().unwrap_err();
	assert_eq!(
		error.to_string(),
		"column \"e\" has value 3 at row 1 but only 1 options"
	);
}

#[test]
fn test_enum_from_values_unknown_option() {
	let result = EnumColumn::from_values(
		"color".to_owned(),
		vec!["red".to_owned(), "blue".to_owned()],
		&[Some("blue"), None, Some("green")],
	);
	assert_eq!(
		result,
		Err(DataFrameError::UnknownEnumOption {
			column_name: "color".to_owned(),
			row: 2,
			value: "green".to_owned(),
		})
	);
}
