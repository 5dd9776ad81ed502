/*!
This module renders a two dimensional grid of strings as a bordered plain text table.
*/

use ndarray::prelude::*;

pub struct Table<'a> {
	padding: usize,
	header: &'a [String],
	values: ArrayView2<'a, String>,
}

impl<'a> Table<'a> {
	/// Create a table. `values` must have one column per entry in `header`.
	pub fn new(header: &'a [String], values: ArrayView2<'a, String>) -> Self {
		Self {
			padding: 1,
			header,
			values,
		}
	}
}

impl<'a> std::fmt::Display for Table<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		// update column widths with header
		let mut column_widths: Vec<usize> = self.header.iter().map(|header| width(header)).collect();
		// update column widths with values
		for (column_width, column) in column_widths
			.iter_mut()
			.zip(self.values.axis_iter(Axis(1)))
		{
			for value in column.iter() {
				*column_width = usize::max(*column_width, width(value));
			}
		}
		let line = Line {
			column_widths: &column_widths,
			padding: self.padding,
		};
		let header = Row {
			column_widths: &column_widths,
			padding: self.padding,
			values: self.header.iter().map(|value| value.as_str()).collect(),
		};
		writeln!(f, "{}", header)?;
		writeln!(f, "{}", line)?;
		for row in self.values.axis_iter(Axis(0)) {
			let row = Row {
				column_widths: &column_widths,
				padding: self.padding,
				values: row.iter().map(|value| value.as_str()).collect(),
			};
			writeln!(f, "{}", row)?;
		}
		Ok(())
	}
}

fn width(value: &str) -> usize {
	value.chars().count()
}

struct Line<'a> {
	column_widths: &'a [usize],
	padding: usize,
}

impl<'a> std::fmt::Display for Line<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for column_width in self.column_widths.iter() {
			write!(f, "{}|", "-".repeat(column_width + 2 * self.padding))?;
		}
		Ok(())
	}
}

struct Row<'a> {
	column_widths: &'a [usize],
	padding: usize,
	values: Vec<&'a str>,
}

impl<'a> std::fmt::Display for Row<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "|")?;
		for (column_width, value) in self.column_widths.iter().zip(self.values.iter()) {
			let fill = column_width + self.padding - width(value);
			write!(
				f,
				"{}{}{}|",
				" ".repeat(self.padding),
				value,
				" ".repeat(fill)
			)?;
		}
		Ok(())
	}
}

#[test]
fn test_table() {
	let header = vec!["name".to_owned(), "value".to_owned()];
	let values = arr2(&[
		["a".to_owned(), "1".to_owned()],
		["long name".to_owned(), "22".to_owned()],
	]);
	let table = Table::new(&header, values.view());
	insta::assert_snapshot!(table.to_string(), @r###"
 | name      | value |
 |-----------|-------|
 | a         | 1     |
 | long name | 22    |
 "###);
}
