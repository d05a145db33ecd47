// lib.rs - library
//
// irc-automode - IRC automatic mode privilege checker
// Copyright (C) 2022  Mateusz Szpakowski
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA

//! Decides whether a channel user can give or take prefix modes (like op or
//! voice) to other users, following the prefix modes declared by the server
//! in ISUPPORT PREFIX.

pub mod config;
pub mod isupport;
mod message;
pub mod prefix;
pub mod privilege;
pub mod resolver;
pub mod source;

pub use isupport::IsupportStore;
pub use message::MessageError;
pub use prefix::{PrefixError, PrefixTable};
pub use privilege::{can_grant, can_grant_by_prefix};
pub use resolver::{resolve, ResolveError};
pub use source::{CapabilitySource, SourceError};
