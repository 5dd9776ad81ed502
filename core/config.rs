/*!
This module defines the `ReportSettings` struct, which is used to configure [`build_report`](../fn.build_report.html).
*/

/// Columns with at most this many distinct values have them listed in the report.
pub const DEFAULT_CARDINALITY_LIMIT: usize = 15;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ReportSettings {
	/// A display name for the dataset. When it is not empty, a short header is logged before the report is built. It has no effect on the report itself.
	pub label: String,
	/// Enum and text columns with at most this many distinct values get the full list of their values in the report. Columns with more are marked as high cardinality.
	pub cardinality_limit: usize,
}

impl Default for ReportSettings {
	fn default() -> Self {
		Self {
			label: String::new(),
			cardinality_limit: DEFAULT_CARDINALITY_LIMIT,
		}
	}
}

#[test]
fn test_settings_from_partial_config() {
	let settings: ReportSettings = serde_json::from_str("{}").unwrap();
	assert_eq!(settings, ReportSettings::default());
	let settings: ReportSettings = serde_json::from_str(r#"{ "cardinality_limit": 3 }"#).unwrap();
	assert_eq!(
		settings,
		ReportSettings {
			label: String::new(),
			cardinality_limit: 3,
		}
	);
}
