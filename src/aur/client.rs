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

//! AUR RPC API client.
//!
//! Every public operation performs exactly one blocking round trip. Nothing
//! is cached between calls and nothing is retried.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::normalize::{self, Results};
use super::package::{Package, PackageRef};
use super::query::{ProtocolVersion, Query};
use super::transport::{Transport, UreqTransport};
use crate::config::Config;
use crate::error::{AurError, AurResult};

/// Default RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://aur.archlinux.org/rpc/";

/// Blocking AUR RPC client
pub struct AurClient {
    transport: Box<dyn Transport>,
    base_url: String,
    version: ProtocolVersion,
}

impl AurClient {
    /// Create a new AUR client with default settings
    pub fn new() -> Self {
        Self::with_transport(
            Box::new(UreqTransport::default()),
            DEFAULT_RPC_URL.to_string(),
            ProtocolVersion::V5,
        )
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> AurResult<Self> {
        config.validate()?;
        let transport = UreqTransport::new(
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
            &config.user_agent,
        );
        Ok(Self::with_transport(
            Box::new(transport),
            config.rpc_url.clone(),
            config.protocol_version,
        ))
    }

    /// Create a client on top of any transport
    pub fn with_transport(
        transport: Box<dyn Transport>,
        base_url: String,
        version: ProtocolVersion,
    ) -> Self {
        Self {
            transport,
            base_url,
            version,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.version
    }

    /// Send one query and decode the JSON body without interpreting it
    pub fn dispatch(&self, query: &Query) -> AurResult<Value> {
        let url = query.to_url(&self.base_url, self.version);
        debug!(%url, kind = %query.kind, "Dispatching AUR query");

        let body = self.transport.get(&url)?;
        serde_json::from_slice(&body).map_err(|source| AurError::InvalidJson { url, source })
    }

    /// Search package names and descriptions
    pub fn search(&self, term: &str) -> AurResult<Packages> {
        self.list_query(&Query::search(term))
    }

    /// List packages maintained by `maintainer`
    pub fn msearch(&self, maintainer: &str) -> AurResult<Packages> {
        self.list_query(&Query::msearch(maintainer))
    }

    /// Get a single package by name or ID.
    ///
    /// Goes through multiinfo so a missing package fails the same way it
    /// does for batches.
    pub fn info(&self, item: impl Into<PackageRef>) -> AurResult<Package> {
        let item = item.into();
        let mut found = self.multiinfo(std::slice::from_ref(&item))?;
        let name = found
            .values()
            .find(|pkg| pkg.matches(&item))
            .map(|pkg| pkg.name.clone());

        name.and_then(|name| found.remove(&name))
            .ok_or_else(|| AurError::MissingPackage {
                requested: item.to_string(),
                returned: found.into_values().collect(),
            })
    }

    /// Get several packages at once, keyed by package name.
    ///
    /// Fails with [`AurError::MissingPackage`] if any requested item is
    /// absent from the response.
    pub fn multiinfo(&self, items: &[PackageRef]) -> AurResult<HashMap<String, Package>> {
        if items.is_empty() {
            return Ok(HashMap::new());
        }

        let query = Query::multiinfo(items);
        let body = self.dispatch(&query)?;
        let results = normalize::validate(body, query.kind, self.version)?;
        let packages = normalize::normalize_all(results)?;
        debug!(requested = items.len(), returned = packages.len(), "multiinfo results");

        normalize::reconcile(items, packages)
    }

    fn list_query(&self, query: &Query) -> AurResult<Packages> {
        let body = self.dispatch(query)?;
        let results = normalize::validate(body, query.kind, self.version)?;
        let packages = Packages::new(results);
        debug!(kind = %query.kind, count = packages.len(), "Query results");
        Ok(packages)
    }
}

impl Default for AurClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Search results, normalized one entry at a time.
///
/// Single pass: the response is already buffered, and each entry is
/// consumed as it is normalized. Not restartable and not `Clone`; collect
/// into a `Vec` to iterate more than once.
#[derive(Debug)]
pub struct Packages {
    entries: std::vec::IntoIter<Map<String, Value>>,
}

impl Packages {
    fn new(results: Results) -> Self {
        Self {
            entries: results.into_entries().into_iter(),
        }
    }

    /// Normalize every remaining entry, failing on the first malformed one
    pub fn collect_all(self) -> AurResult<Vec<Package>> {
        self.collect()
    }
}

impl Iterator for Packages {
    type Item = AurResult<Package>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|raw| normalize::normalize(&raw))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Packages {}
