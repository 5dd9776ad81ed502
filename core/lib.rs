/*!
This crate builds a descriptive profiling report for a [`DataFrame`](../profiler_dataframe/struct.DataFrame.html): the type, missingness, cardinality, and dispersion of every column, in a single table sorted by the percentage of missing values.

```
use profiler_core::{build_report, Cell, Field, ReportSettings};
use profiler_dataframe::{DataFrame, NumberColumn, TextColumn};

let dataframe = DataFrame::from_columns(vec![
	NumberColumn::with_data("age".to_owned(), vec![25.0, 30.0, f64::NAN, 40.0]).into(),
	TextColumn::with_data(
		"city".to_owned(),
		vec![Some("NY".to_owned()), Some("NY".to_owned()), Some("LA".to_owned()), None],
	)
	.into(),
]);
let report = build_report(&dataframe, &ReportSettings::default()).unwrap();
assert_eq!(report.column_names(), vec!["age", "city"]);
let city = report.row("city").unwrap();
assert_eq!(city.percent_missing, 25.0);
assert_eq!(city.cell(Field::Top), Cell::Text("NY"));
println!("{}", report);
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod config;
mod display;
mod error;
mod report;
mod stats;

pub use self::config::{ReportSettings, DEFAULT_CARDINALITY_LIMIT};
pub use self::error::Error;
pub use self::report::{
	build_report, Cell, DataType, Field, NumberStats, ReportRow, ReportTable, TextStats,
	UniqueValues, HIGH_CARDINALITY,
};
