/*
 * aur-rpc - Typed client for the Arch User Repository RPC interface.
 * Copyright (C) 2025  compiledkernel-idk and pacboost contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Error types for AUR RPC queries and response normalization.

use thiserror::Error;

use crate::aur::package::Package;
use crate::aur::transport::TransportError;

/// Main error type for AUR RPC operations
#[derive(Debug, Error)]
pub enum AurError {
    /// The AUR rejected the search argument as too short
    #[error("Query argument is too short")]
    QueryTooShort,

    /// Any other error reported by the AUR, message passed through verbatim
    #[error("AUR RPC error: {message}")]
    Api { message: String },

    /// The response does not have the shape the request expects
    #[error("Unexpected response type '{received}' (expected '{expected}')")]
    UnexpectedResponseType { expected: String, received: String },

    /// A requested package was absent from a multiinfo response
    #[error("Package '{requested}' not found in AUR ({} other package(s) returned)", .returned.len())]
    MissingPackage {
        requested: String,
        returned: Vec<Package>,
    },

    /// A response entry could not be turned into a package record
    #[error("Malformed package entry, field '{field}': {reason}")]
    MalformedPackage { field: String, reason: String },

    /// Category ID outside the category table
    #[error("Invalid category ID: {0}")]
    InvalidCategoryId(u32),

    /// Category name not present in the category table
    #[error("Invalid category name: '{0}'")]
    InvalidCategoryName(String),

    /// The transport could not complete the request
    #[error(transparent)]
    Network(#[from] TransportError),

    /// The response body was not valid JSON
    #[error("Invalid JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AurError {
    /// True when the failure happened before the AUR could answer
    pub fn is_transport(&self) -> bool {
        matches!(self, AurError::Network(_) | AurError::InvalidJson { .. })
    }

    /// True when the AUR itself reported the failure
    pub fn is_remote(&self) -> bool {
        matches!(self, AurError::QueryTooShort | AurError::Api { .. })
    }

    /// Create a malformed package error
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AurError::MalformedPackage {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unexpected response type error
    pub fn unexpected(expected: impl Into<String>, received: impl Into<String>) -> Self {
        AurError::UnexpectedResponseType {
            expected: expected.into(),
            received: received.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        AurError::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for AUR RPC operations
pub type AurResult<T> = std::result::Result<T, AurError>;
