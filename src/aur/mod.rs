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

//! AUR (Arch User Repository) RPC support.
//!
//! - query building and dispatch over a pluggable transport
//! - response validation for legacy and v5 payloads
//! - normalization of raw entries into [`Package`] records

pub mod client;
pub mod normalize;
pub mod package;
pub mod query;
pub mod transport;

pub use client::{AurClient, Packages, DEFAULT_RPC_URL};
pub use package::{Package, PackageRef};
pub use query::{ProtocolVersion, Query, QueryKind};
pub use transport::{Transport, TransportError, UreqTransport};
