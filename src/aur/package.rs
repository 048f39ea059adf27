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

//! Normalized AUR package records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::categories;

/// Metadata for a single AUR package.
///
/// Only the normalizer builds these; remote field names never leak into this
/// type. See [`crate::aur::normalize`] for the field mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    /// AUR package ID (`ID`)
    pub id: u64,
    /// Package name (`Name`)
    pub name: String,
    /// ID of the package base (`PackageBaseID`)
    pub package_base_id: Option<u64>,
    /// Name of the package base (`PackageBase`)
    pub package_base: Option<String>,
    /// Current version, opaque (`Version`)
    pub version: String,
    pub description: Option<String>,
    /// Upstream project URL (`URL`)
    pub url: Option<String>,
    /// Snapshot archive path relative to the AUR root (`URLPath`)
    pub url_path: Option<String>,
    pub num_votes: u64,
    /// Only present in v5 payloads
    pub popularity: Option<f64>,
    pub out_of_date: bool,
    pub maintainer: Option<String>,
    pub submitter: Option<String>,
    pub first_submitted: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub license: Vec<String>,
    /// Legacy payloads only; keywords replaced categories
    pub category_id: Option<u32>,

    // Dependencies
    pub depends: Vec<String>,
    pub make_depends: Vec<String>,
    pub opt_depends: Vec<String>,
    pub check_depends: Vec<String>,
    pub conflicts: Vec<String>,
    pub provides: Vec<String>,
    pub replaces: Vec<String>,
    pub groups: Vec<String>,
    pub keywords: Vec<String>,
    pub co_maintainers: Vec<String>,
}

impl Package {
    /// Get all dependencies (depends + makedepends)
    pub fn all_deps(&self) -> Vec<String> {
        let mut deps = self.depends.clone();
        deps.extend(self.make_depends.iter().cloned());
        deps
    }

    /// Get the snapshot download URL
    pub fn snapshot_url(&self) -> String {
        format!(
            "https://aur.archlinux.org/cgit/aur.git/snapshot/{}.tar.gz",
            self.package_base.as_deref().unwrap_or(&self.name)
        )
    }

    /// Category name, if the payload carried a valid category
    pub fn category(&self) -> Option<&'static str> {
        self.category_id
            .and_then(|id| categories::category_id_to_name(id).ok())
    }

    /// Whether this package answers a multiinfo request item
    pub fn matches(&self, item: &PackageRef) -> bool {
        match item {
            PackageRef::Name(name) => {
                self.name == *name || name.parse::<u64>().map_or(false, |id| id == self.id)
            }
            PackageRef::Id(id) => self.id == *id || self.name == id.to_string(),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// One item of an info/multiinfo request: a package name or a package ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageRef {
    Name(String),
    Id(u64),
}

impl PackageRef {
    /// Value sent as the `arg` / `arg[]` query parameter
    pub fn as_arg(&self) -> String {
        match self {
            PackageRef::Name(name) => name.clone(),
            PackageRef::Id(id) => id.to_string(),
        }
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageRef::Name(name) => write!(f, "{}", name),
            PackageRef::Id(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for PackageRef {
    fn from(name: &str) -> Self {
        PackageRef::Name(name.to_string())
    }
}

impl From<String> for PackageRef {
    fn from(name: String) -> Self {
        PackageRef::Name(name)
    }
}

impl From<&String> for PackageRef {
    fn from(name: &String) -> Self {
        PackageRef::Name(name.clone())
    }
}

impl From<u64> for PackageRef {
    fn from(id: u64) -> Self {
        PackageRef::Id(id)
    }
}

#[cfg(test)]
pub(crate) fn test_package(id: u64, name: &str) -> Package {
    Package {
        id,
        name: name.to_string(),
        package_base_id: None,
        package_base: None,
        version: "1.0.0-1".to_string(),
        description: None,
        url: None,
        url_path: None,
        num_votes: 0,
        popularity: None,
        out_of_date: false,
        maintainer: None,
        submitter: None,
        first_submitted: None,
        last_modified: None,
        license: vec![],
        category_id: None,
        depends: vec![],
        make_depends: vec![],
        opt_depends: vec![],
        check_depends: vec![],
        conflicts: vec![],
        provides: vec![],
        replaces: vec![],
        groups: vec![],
        keywords: vec![],
        co_maintainers: vec![],
    }
}
