use crate::report::{Cell, ReportTable, HIGH_CARDINALITY};
use ndarray::prelude::*;
use profiler_util::table::Table;

const MISSING: &str = "NaN";

impl<'a> std::fmt::Display for Cell<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Cell::Missing => write!(f, "{}", MISSING),
			Cell::DataType(data_type) => write!(f, "{}", data_type),
			Cell::Float(value) => write!(f, "{}", format_float(*value)),
			Cell::Count(value) => write!(f, "{}", value),
			Cell::Text(value) => write!(f, "{}", value),
			Cell::List(values) => {
				write!(f, "[")?;
				for (i, value) in values.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{}", value.as_deref().unwrap_or(MISSING))?;
				}
				write!(f, "]")
			}
			Cell::HighCardinality => write!(f, "{}", HIGH_CARDINALITY),
		}
	}
}

impl std::fmt::Display for ReportTable {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let mut header = vec![String::new()];
		header.extend(self.fields.iter().map(|field| field.label().to_owned()));
		let mut values = Vec::with_capacity(self.rows.len() * header.len());
		for row in self.rows.iter() {
			values.push(row.column_name.clone());
			values.extend(self.fields.iter().map(|field| row.cell(*field).to_string()));
		}
		let values = Array2::from_shape_vec((self.rows.len(), header.len()), values)
			.map_err(|_| std::fmt::Error)?;
		write!(f, "{}", Table::new(&header, values.view()))
	}
}

/// Format a float with at most four decimal places, dropping trailing zeros but keeping one.
fn format_float(value: f64) -> String {
	let formatted = format!("{:.4}", value);
	let trimmed = formatted.trim_end_matches('0');
	if trimmed.ends_with('.') {
		format!("{}0", trimmed)
	} else {
		trimmed.to_owned()
	}
}

#[cfg(test)]
use crate::{build_report, ReportSettings};
#[cfg(test)]
use profiler_dataframe::*;

#[test]
fn test_format_float() {
	assert_eq!(format_float(25.0), "25.0");
	assert_eq!(format_float(95.0 / 3.0), "31.6667");
	assert_eq!(format_float(0.125), "0.125");
	assert_eq!(format_float(-2.5), "-2.5");
}

#[test]
fn test_display() {
	let df = DataFrame::from_columns(vec![
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
		TextColumn::with_data("empty".to_owned(), vec![None, None, None, None]).into(),
		TextColumn::with_data(
			"id".to_owned(),
			vec![
				Some("a".to_owned()),
				Some("b".to_owned()),
				Some("c".to_owned()),
				Some("d".to_owned()),
			],
		)
		.into(),
	]);
	let settings = ReportSettings {
		cardinality_limit: 3,
		..Default::default()
	};
	let report = build_report(&df, &settings).unwrap();
	insta::assert_snapshot!(report.to_string(), @r###"
 |       | Data Type | % Missing | # Unique | count | top | freq | Unique Values      |
 |-------|-----------|-----------|----------|-------|-----|------|--------------------|
 | empty | text      | 100.0     | 0        | 0     | NaN | NaN  | [NaN]              |
 | city  | text      | 25.0      | 2        | 3     | NY  | 2    | [NY, LA, NaN]      |
 | id    | text      | 0.0       | 4        | 4     | a   | 1    | [High Cardinality] |
 "###);
}
