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

//! Legacy AUR category table.
//!
//! Newer AUR payloads replaced categories with free-form keywords, but
//! `CategoryID` still shows up in older responses.

use crate::error::{AurError, AurResult};

/// Category names indexed by category ID. IDs 0 and 1 are unused.
pub const CATEGORIES: [Option<&str>; 20] = [
    None,
    None,
    Some("daemons"),
    Some("devel"),
    Some("editors"),
    Some("emulators"),
    Some("games"),
    Some("gnome"),
    Some("i18n"),
    Some("kde"),
    Some("lib"),
    Some("modules"),
    Some("multimedia"),
    Some("network"),
    Some("office"),
    Some("science"),
    Some("system"),
    Some("x11"),
    Some("xfce"),
    Some("kernels"),
];

/// Look up the name of a category ID
pub fn category_id_to_name(id: u32) -> AurResult<&'static str> {
    CATEGORIES
        .get(id as usize)
        .copied()
        .flatten()
        .ok_or(AurError::InvalidCategoryId(id))
}

/// Look up the ID of a category name
pub fn category_name_to_id(name: &str) -> AurResult<u32> {
    CATEGORIES
        .iter()
        .position(|c| *c == Some(name))
        .map(|pos| pos as u32)
        .ok_or_else(|| AurError::InvalidCategoryName(name.to_string()))
}
