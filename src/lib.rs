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

//! Typed client for the Arch User Repository RPC interface.
//!
//! ```no_run
//! use aur_rpc::AurClient;
//!
//! let client = AurClient::new();
//! let pkg = client.info("yturl")?;
//! println!("{} ({} votes)", pkg, pkg.num_votes);
//! # Ok::<(), aur_rpc::AurError>(())
//! ```

pub mod aur;
pub mod categories;
pub mod config;
pub mod error;
pub mod logging;

pub use aur::{AurClient, Package, PackageRef, Packages, ProtocolVersion};
pub use categories::{category_id_to_name, category_name_to_id, CATEGORIES};
pub use config::Config;
pub use error::{AurError, AurResult};
