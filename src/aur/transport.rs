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

//! HTTP transport used by the query dispatcher.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Transport-level failures, passed to callers untouched
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be completed or returned an error status
    #[error("Network error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read
    #[error("Failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    /// HTTP status code, when the server answered with an error status
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { source, .. } => match source.as_ref() {
                ureq::Error::Status(code, _) => Some(*code),
                ureq::Error::Transport(_) => None,
            },
            TransportError::Body { .. } => None,
        }
    }
}

/// Performs a GET and hands back the raw body
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Blocking transport backed by a `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration, connect_timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .user_agent(user_agent)
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(30),
            Duration::from_secs(10),
            concat!("aur-rpc/", env!("CARGO_PKG_VERSION")),
        )
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.agent.get(url).call().map_err(|e| TransportError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError::Body {
                url: url.to_string(),
                source: e,
            })?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_host() {
        // Nothing listens on port 9 of the loopback interface
        let transport = UreqTransport::new(
            Duration::from_secs(2),
            Duration::from_secs(1),
            "aur-rpc-test",
        );
        let err = transport.get("http://127.0.0.1:9/rpc/").unwrap_err();
        assert!(matches!(err, TransportError::Http { .. }));
        assert_eq!(err.status(), None);
    }
}
