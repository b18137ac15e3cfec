// xmlrec - Streaming XML to JSON records
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the xmlrec CLI.
//!
//! All CLI operations return `Result<T, CliError>` for consistent error reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use xmlrec::ConvertError;

/// The main error type for xmlrec CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use xmlrec_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug)]
pub enum CliError {
    /// I/O operation failed (file open or metadata access).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Conversion failed.
    ///
    /// This wraps every error raised by the converter: malformed XML, schema
    /// violations, depth limits and output failures.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "data.xml",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("data.xml"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = CliError::invalid_input("'dir' is not a file");
        assert_eq!(err.to_string(), "Invalid input: 'dir' is not a file");
    }

    #[test]
    fn test_convert_error_is_transparent() {
        let err: CliError = ConvertError::schema_violation("o", "c", 2).into();
        assert!(matches!(err, CliError::Convert(_)));
        assert_eq!(
            err.to_string(),
            "Schema violation in <o>: child <c> has 2 values but an object allows one"
        );
    }
}
