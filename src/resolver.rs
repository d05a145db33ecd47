// resolver.rs - prefix modes resolver
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

use std::fmt;
use std::error::Error;
use tracing::*;

use crate::prefix::{PrefixError, PrefixTable};
use crate::source::{CapabilitySource, SourceError};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ResolveError {
    Source(SourceError),
    Prefix(PrefixError),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Source(e) => write!(f, "Capability lookup failed: {}", e),
            ResolveError::Prefix(e) => write!(f, "Wrong PREFIX: {}", e),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ResolveError::Source(e) => Some(e),
            ResolveError::Prefix(e) => Some(e),
        }
    }
}

impl From<SourceError> for ResolveError {
    fn from(e: SourceError) -> Self {
        ResolveError::Source(e)
    }
}

impl From<PrefixError> for ResolveError {
    fn from(e: PrefixError) -> Self {
        ResolveError::Prefix(e)
    }
}

/// Get prefix modes of server in order declared by server.
///
/// Table is fetched from source on every call. Server without PREFIX gives
/// empty table.
pub fn resolve<S>(source: &S, server: &str) -> Result<PrefixTable, ResolveError>
where
    S: CapabilitySource + ?Sized,
{
    let table = match source.prefix_declaration(server)? {
        Some(declaration) => PrefixTable::parse(&declaration)?,
        None => PrefixTable::default(),
    };
    debug!("Prefix modes for {}: {}", server, table);
    Ok(table)
}
