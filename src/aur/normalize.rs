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

//! Response validation and normalization.
//!
//! Turns decoded RPC bodies into [`Package`] records:
//! - error responses become typed [`AurError`]s
//! - remote `PascalCase` keys are translated to `snake_case`
//! - unknown keys are dropped with a single warning per entry
//! - epoch seconds become `DateTime<Utc>`, `OutOfDate` becomes a `bool`
//! - multiinfo results are reconciled against the requested items

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use super::package::{Package, PackageRef};
use super::query::{ProtocolVersion, QueryKind};
use crate::error::{AurError, AurResult};

/// Local attribute names a package entry may carry
pub const KNOWN_FIELDS: &[&str] = &[
    "id",
    "name",
    "package_base_id",
    "package_base",
    "version",
    "description",
    "url",
    "url_path",
    "num_votes",
    "popularity",
    "out_of_date",
    "maintainer",
    "submitter",
    "first_submitted",
    "last_modified",
    "license",
    "category_id",
    "depends",
    "make_depends",
    "opt_depends",
    "check_depends",
    "conflicts",
    "provides",
    "replaces",
    "groups",
    "keywords",
    "co_maintainers",
];

/// Attributes holding epoch seconds
pub const TIMESTAMP_FIELDS: &[&str] = &["first_submitted", "last_modified"];

/// Message prefix the AUR uses for too-short search arguments
const QUERY_TOO_SHORT: &str = "Query arg too small";

/// Validated `results` payload
#[derive(Debug, Clone, PartialEq)]
pub enum Results {
    Single(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

impl Results {
    pub fn into_entries(self) -> Vec<Map<String, Value>> {
        match self {
            Results::Single(entry) => vec![entry],
            Results::Many(entries) => entries,
        }
    }
}

/// Convert a remote key such as `OutOfDate` or `URLPath` to `out_of_date` /
/// `url_path`. A run of capitals is one word, so `PackageBaseID` becomes
/// `package_base_id`.
pub fn decamelize(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Check a decoded body for errors and the expected shape.
pub fn validate(body: Value, kind: QueryKind, version: ProtocolVersion) -> AurResult<Results> {
    let mut body = match body {
        Value::Object(body) => body,
        other => return Err(AurError::unexpected(kind.wire_name(), describe(&other))),
    };

    let response_type = body
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string);

    if response_type.as_deref() == Some("error") {
        let message = error_message(&body, version);
        if message.starts_with(QUERY_TOO_SHORT) {
            return Err(AurError::QueryTooShort);
        }
        return Err(AurError::Api { message });
    }

    if version == ProtocolVersion::Legacy {
        let received = response_type.unwrap_or_else(|| "<missing>".to_string());
        if received != kind.wire_name() {
            return Err(AurError::unexpected(kind.wire_name(), received));
        }
    }

    let results = body.remove("results").unwrap_or(Value::Null);
    match results {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(entry) => Ok(entry),
                other => Err(AurError::unexpected(
                    kind.wire_name(),
                    format!("results entry of type {}", describe(&other)),
                )),
            })
            .collect::<AurResult<Vec<_>>>()
            .map(Results::Many),
        Value::Object(entry) if kind.returns_single() => Ok(Results::Single(entry)),
        other => Err(AurError::unexpected(
            kind.wire_name(),
            format!("results of type {}", describe(&other)),
        )),
    }
}

fn error_message(body: &Map<String, Value>, version: ProtocolVersion) -> String {
    let from_error = body.get("error").and_then(Value::as_str);
    let from_results = body.get("results").and_then(Value::as_str);
    let message = match version {
        ProtocolVersion::V5 => from_error.or(from_results),
        ProtocolVersion::Legacy => from_results.or(from_error),
    };
    message.unwrap_or("unknown error").to_string()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalize one raw results entry into a [`Package`].
pub fn normalize(raw: &Map<String, Value>) -> AurResult<Package> {
    let mut fields = BTreeMap::new();
    let mut dropped = Vec::new();

    for (key, value) in raw {
        let local = decamelize(key);
        if KNOWN_FIELDS.contains(&local.as_str()) {
            fields.insert(local, value.clone());
        } else {
            dropped.push(key.as_str());
        }
    }

    if !dropped.is_empty() {
        warn!(
            fields = %dropped.join(", "),
            "Dropping unknown fields from AUR response"
        );
    }

    FieldReader { fields }.into_package()
}

/// Normalize every entry, stopping at the first malformed one
pub fn normalize_all(results: Results) -> AurResult<Vec<Package>> {
    results.into_entries().iter().map(normalize).collect()
}

/// Check that every requested item came back and key the result by name.
///
/// A single missing item fails the whole batch. When two packages share a
/// name, the later one wins.
pub fn reconcile(
    requested: &[PackageRef],
    packages: Vec<Package>,
) -> AurResult<HashMap<String, Package>> {
    for item in requested {
        if !packages.iter().any(|pkg| pkg.matches(item)) {
            return Err(AurError::MissingPackage {
                requested: item.to_string(),
                returned: packages,
            });
        }
    }

    Ok(packages
        .into_iter()
        .map(|pkg| (pkg.name.clone(), pkg))
        .collect())
}

/// Typed access to the translated fields of one entry
struct FieldReader {
    fields: BTreeMap<String, Value>,
}

impl FieldReader {
    fn into_package(mut self) -> AurResult<Package> {
        Ok(Package {
            id: self.required("id", as_u64)?,
            name: self.required("name", as_string)?,
            package_base_id: self.optional("package_base_id", as_u64)?,
            package_base: self.optional("package_base", as_string)?,
            version: self.required("version", as_string)?,
            description: self.optional("description", as_string)?,
            url: self.optional("url", as_string)?,
            url_path: self.optional("url_path", as_string)?,
            num_votes: self.optional("num_votes", as_u64)?.unwrap_or(0),
            popularity: self.optional("popularity", as_f64)?,
            out_of_date: self.flag("out_of_date")?,
            maintainer: self.optional("maintainer", as_string)?,
            submitter: self.optional("submitter", as_string)?,
            first_submitted: self.optional("first_submitted", as_timestamp)?,
            last_modified: self.optional("last_modified", as_timestamp)?,
            license: self.list("license")?,
            category_id: self.optional("category_id", as_category)?,
            depends: self.list("depends")?,
            make_depends: self.list("make_depends")?,
            opt_depends: self.list("opt_depends")?,
            check_depends: self.list("check_depends")?,
            conflicts: self.list("conflicts")?,
            provides: self.list("provides")?,
            replaces: self.list("replaces")?,
            groups: self.list("groups")?,
            keywords: self.list("keywords")?,
            co_maintainers: self.list("co_maintainers")?,
        })
    }

    /// Take a field, treating JSON `null` as absent
    fn take(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field).filter(|v| !v.is_null())
    }

    fn optional<T>(
        &mut self,
        field: &str,
        convert: fn(&Value) -> Option<T>,
    ) -> AurResult<Option<T>> {
        match self.take(field) {
            None => Ok(None),
            Some(value) => convert(&value).map(Some).ok_or_else(|| {
                AurError::malformed(field, format!("unexpected value {}", value))
            }),
        }
    }

    fn required<T>(&mut self, field: &str, convert: fn(&Value) -> Option<T>) -> AurResult<T> {
        self.optional(field, convert)?
            .ok_or_else(|| AurError::malformed(field, "missing"))
    }

    fn list(&mut self, field: &str) -> AurResult<Vec<String>> {
        match self.take(field) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    as_string(item).ok_or_else(|| {
                        AurError::malformed(field, format!("unexpected list item {}", item))
                    })
                })
                .collect(),
            Some(other) => Err(AurError::malformed(field, format!("unexpected value {}", other))),
        }
    }

    fn flag(&mut self, field: &str) -> AurResult<bool> {
        let Some(value) = self.take(field) else {
            return Ok(false);
        };
        truthy(&value)
            .ok_or_else(|| AurError::malformed(field, format!("not a flag: {}", value)))
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

// Legacy payloads send numbers as strings
fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_category(value: &Value) -> Option<u32> {
    as_u64(value).and_then(|id| u32::try_from(id).ok())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let secs = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp(secs, 0)
}

/// `OutOfDate` is 0/1 in legacy payloads and null or the flag time in v5
fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map_or(false, |f| f != 0.0)),
        Value::String(s) if s.trim().is_empty() => Some(false),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|n| n != 0),
        _ => None,
    }
}
