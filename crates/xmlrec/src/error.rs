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

//! Error types for XML record conversion
//!
//! Every error is fatal: the converter stops at the first one and nothing is
//! retried. The CLI prints the message and exits with a failure status.

use thiserror::Error;

/// Errors that can occur while converting an XML event stream into records.
///
/// # Examples
///
/// ```rust
/// use xmlrec::ConvertError;
///
/// let err = ConvertError::malformed(Some(42), "unexpected end of file");
/// assert_eq!(
///     err.to_string(),
///     "Malformed XML input at position 42: unexpected end of file"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// An object-shaped element has a child that repeated within one occurrence.
    ///
    /// Object composition maps each child name to exactly one value, so a
    /// repeated child cannot be represented. This is only reachable when the
    /// element is forced into object shape; otherwise the repetition makes
    /// the element classify as an array.
    #[error("Schema violation in <{element}>: child <{child}> has {count} values but an object allows one")]
    SchemaViolation {
        /// The element being composed
        element: String,
        /// The repeated child element
        child: String,
        /// Number of values the child accumulated
        count: usize,
    },

    /// The event source reported invalid XML, or the event sequence is not
    /// properly nested.
    #[error("Malformed XML input{}: {message}", fmt_position(.position))]
    MalformedInput {
        /// Byte offset reported by the tokenizer, when known
        position: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// Element nesting exceeded the configured maximum depth.
    #[error("XML nesting depth exceeded (max: {max})")]
    DepthLimitExceeded {
        /// Maximum allowed depth
        max: usize,
    },

    /// Writing a record failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a record failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    /// Create a malformed-input error.
    pub fn malformed(position: Option<u64>, message: impl Into<String>) -> Self {
        ConvertError::MalformedInput {
            position,
            message: message.into(),
        }
    }

    /// Create a schema violation error.
    pub fn schema_violation(
        element: impl Into<String>,
        child: impl Into<String>,
        count: usize,
    ) -> Self {
        ConvertError::SchemaViolation {
            element: element.into(),
            child: child.into(),
            count,
        }
    }
}

fn fmt_position(position: &Option<u64>) -> String {
    match position {
        Some(pos) => format!(" at position {}", pos),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_violation_display() {
        let err = ConvertError::schema_violation("o", "c", 2);
        assert_eq!(
            err.to_string(),
            "Schema violation in <o>: child <c> has 2 values but an object allows one"
        );
    }

    #[test]
    fn test_malformed_display_with_position() {
        let err = ConvertError::malformed(Some(42), "unexpected end of file");
        assert_eq!(
            err.to_string(),
            "Malformed XML input at position 42: unexpected end of file"
        );
    }

    #[test]
    fn test_malformed_display_without_position() {
        let err = ConvertError::malformed(None, "close event with no open element");
        assert_eq!(
            err.to_string(),
            "Malformed XML input: close event with no open element"
        );
    }

    #[test]
    fn test_depth_limit_display() {
        let err = ConvertError::DepthLimitExceeded { max: 100 };
        assert_eq!(err.to_string(), "XML nesting depth exceeded (max: 100)");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ConvertError = io.into();
        assert!(matches!(err, ConvertError::Io(_)));
    }

    #[test]
    fn test_error_trait() {
        let err = ConvertError::malformed(None, "test");
        let _: &dyn std::error::Error = &err;
    }
}
