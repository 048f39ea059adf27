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

//! Query intents and RPC URL construction.

use serde::Deserialize;
use std::fmt;

use super::package::PackageRef;

/// Kind of RPC request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Substring search on name and description
    Search,
    /// Search by maintainer
    Msearch,
    /// Single package info
    Info,
    /// Several packages at once
    Multiinfo,
}

impl QueryKind {
    /// Name used for the `type` parameter and its echo in responses
    pub fn wire_name(self) -> &'static str {
        match self {
            QueryKind::Search => "search",
            QueryKind::Msearch => "msearch",
            QueryKind::Info => "info",
            QueryKind::Multiinfo => "multiinfo",
        }
    }

    /// Whether the legacy protocol returns a single object instead of a list
    pub fn returns_single(self) -> bool {
        self == QueryKind::Info
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// RPC payload shape.
///
/// Legacy responses echo the request type and are validated against it. V5
/// responses are validated on the presence of a results array instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    Legacy,
    #[default]
    V5,
}

impl ProtocolVersion {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "legacy" | "1" => Some(ProtocolVersion::Legacy),
            "v5" | "5" => Some(ProtocolVersion::V5),
            _ => None,
        }
    }
}

/// One RPC request: a kind plus its argument(s)
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub kind: QueryKind,
    pub args: Vec<String>,
}

impl Query {
    pub fn search(term: &str) -> Self {
        Self {
            kind: QueryKind::Search,
            args: vec![term.to_string()],
        }
    }

    pub fn msearch(maintainer: &str) -> Self {
        Self {
            kind: QueryKind::Msearch,
            args: vec![maintainer.to_string()],
        }
    }

    /// Plain `type=info` request. The legacy protocol answers it with a
    /// single object rather than a list; [`crate::AurClient::info`] uses
    /// multiinfo instead.
    pub fn info(item: &PackageRef) -> Self {
        Self {
            kind: QueryKind::Info,
            args: vec![item.as_arg()],
        }
    }

    pub fn multiinfo(items: &[PackageRef]) -> Self {
        Self {
            kind: QueryKind::Multiinfo,
            args: items.iter().map(PackageRef::as_arg).collect(),
        }
    }

    /// Build the request URL against `base_url`.
    ///
    /// Multiinfo always uses the repeated `arg[]` key, even for one argument;
    /// the AUR treats `arg` and `arg[]` differently.
    pub fn to_url(&self, base_url: &str, version: ProtocolVersion) -> String {
        let mut params = Vec::with_capacity(self.args.len() + 2);
        if version == ProtocolVersion::V5 {
            params.push("v=5".to_string());
        }
        params.push(format!("type={}", self.kind.wire_name()));

        let key = if self.kind == QueryKind::Multiinfo {
            "arg[]"
        } else {
            "arg"
        };
        for arg in &self.args {
            params.push(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(arg)
            ));
        }

        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", base_url, separator, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://aur.archlinux.org/rpc/";

    #[test]
    fn test_search_url() {
        let url = Query::search("yturl").to_url(BASE, ProtocolVersion::V5);
        assert_eq!(url, "https://aur.archlinux.org/rpc/?v=5&type=search&arg=yturl");
    }

    #[test]
    fn test_legacy_url_has_no_version() {
        let url = Query::msearch("cdown").to_url("https://aur.archlinux.org/rpc.php", ProtocolVersion::Legacy);
        assert_eq!(url, "https://aur.archlinux.org/rpc.php?type=msearch&arg=cdown");
    }

    #[test]
    fn test_multiinfo_repeats_arg() {
        let items = vec![PackageRef::from("yturl"), PackageRef::from("yturl-git"), PackageRef::Id(68930)];
        let url = Query::multiinfo(&items).to_url(BASE, ProtocolVersion::Legacy);
        assert_eq!(
            url,
            "https://aur.archlinux.org/rpc/?type=multiinfo&arg%5B%5D=yturl&arg%5B%5D=yturl-git&arg%5B%5D=68930"
        );
    }

    #[test]
    fn test_single_multiinfo_still_uses_array_key() {
        let url = Query::multiinfo(&["yturl".into()]).to_url(BASE, ProtocolVersion::V5);
        assert!(url.ends_with("type=multiinfo&arg%5B%5D=yturl"));
    }

    #[test]
    fn test_args_are_encoded() {
        let url = Query::search("c++ lib&more").to_url(BASE, ProtocolVersion::V5);
        assert!(url.ends_with("arg=c%2B%2B%20lib%26more"));
    }

    #[test]
    fn test_info_uses_plain_arg() {
        let query = Query::info(&PackageRef::Id(68930));
        assert_eq!(query.kind, QueryKind::Info);
        assert!(query.kind.returns_single());
        let url = query.to_url(BASE, ProtocolVersion::Legacy);
        assert_eq!(url, "https://aur.archlinux.org/rpc/?type=info&arg=68930");
    }

    #[test]
    fn test_base_with_existing_query() {
        let url = Query::info(&"yturl".into()).to_url("http://localhost/rpc?x=1", ProtocolVersion::Legacy);
        assert_eq!(url, "http://localhost/rpc?x=1&type=info&arg=yturl");
    }

    #[test]
    fn test_protocol_version_parse() {
        assert_eq!(ProtocolVersion::parse("legacy"), Some(ProtocolVersion::Legacy));
        assert_eq!(ProtocolVersion::parse("V5"), Some(ProtocolVersion::V5));
        assert_eq!(ProtocolVersion::parse("6"), None);
    }
}
