use profiler_dataframe::DataFrameError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
	/// The dataframe is not a well formed table.
	#[error("invalid input: {0}")]
	InvalidInput(#[from] DataFrameError),
}
