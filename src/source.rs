// source.rs - server capability source
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

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceError {
    UnknownServer(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::UnknownServer(s) => write!(f, "Unknown server {}", s),
        }
    }
}

impl Error for SourceError {
}

/// Provider of server capabilities.
///
/// `Ok(None)` means that server is known but it doesn't declare prefix modes.
pub trait CapabilitySource {
    /// Returns raw PREFIX value (like `(ov)@+`) declared by server.
    fn prefix_declaration(&self, server: &str) -> Result<Option<String>, SourceError>;
}

impl<F> CapabilitySource for F
where
    F: Fn(&str) -> Result<Option<String>, SourceError>,
{
    fn prefix_declaration(&self, server: &str) -> Result<Option<String>, SourceError> {
        self(server)
    }
}
