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

//! CLI command implementations

mod convert;
mod schema;

pub use convert::convert;
pub use schema::schema;

use crate::error::CliError;
use std::fs::{self, File};

/// Open an input file for streaming.
///
/// The file is never read into memory as a whole; callers wrap the handle
/// in the converter's buffered tokenizer.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the path cannot be inspected or opened, and
/// [`CliError::InvalidInput`] if it is not a regular file.
pub(crate) fn open_input(path: &str) -> Result<File, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    if !metadata.is_file() {
        return Err(CliError::invalid_input(format!(
            "'{}' is not a regular file",
            path
        )));
    }
    File::open(path).map_err(|e| CliError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = open_input("/nonexistent/input.xml").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_open_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let err = open_input(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_open_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert!(open_input(&path).is_ok());
    }
}
