// isupport.rs - ISUPPORT tokens store
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

use std::collections::HashMap;
use tracing::*;

use crate::message::{Message, MessageError};
use crate::source::{CapabilitySource, SourceError};

pub const RPL_ISUPPORT: &str = "005";
pub const PREFIX_TOKEN: &str = "PREFIX";

// decode \xHH escapes from token value. invalid escapes are kept as is.
fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find("\\x") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        let decoded = after.get(..2)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .filter(|b| b.is_ascii());
        if let Some(b) = decoded {
            out.push(b as char);
            rest = &after[2..];
        } else {
            out.push_str("\\x");
            rest = after;
        }
    }
    out.push_str(rest);
    out
}

/// ISUPPORT tokens advertised by servers, keyed by server name.
///
/// Store is fed by raw RPL_ISUPPORT lines received from servers. Token without
/// value is held with empty value.
#[derive(Clone, Default, Debug)]
pub struct IsupportStore {
    servers: HashMap<String, HashMap<String, String>>,
}

impl IsupportStore {
    pub fn new() -> IsupportStore {
        IsupportStore::default()
    }

    pub fn register_server(&mut self, server: &str) {
        self.servers.entry(server.to_string()).or_default();
    }

    pub fn forget_server(&mut self, server: &str) -> bool {
        self.servers.remove(server).is_some()
    }

    pub fn is_known(&self, server: &str) -> bool {
        self.servers.contains_key(server)
    }

    pub fn set_token(&mut self, server: &str, name: &str, value: &str) {
        self.servers.entry(server.to_string()).or_default()
                .insert(name.to_string(), value.to_string());
    }

    pub fn token(&self, server: &str, name: &str) -> Option<&str> {
        self.servers.get(server)?.get(name).map(|v| v.as_str())
    }

    /// Record raw line received from server. Returns number of applied tokens.
    ///
    /// Lines other than RPL_ISUPPORT are ignored. Token `-NAME` removes token
    /// advertised earlier.
    pub fn record_line(&mut self, server: &str, line: &str) -> Result<usize, MessageError> {
        let message = Message::from_shared_str(line)?;
        if message.command != RPL_ISUPPORT {
            return Ok(0);
        }
        // skip target nick and trailing description. trailing parameter is
        // a token only if it is a single NAME=value word.
        let mut params = message.params.get(1..).unwrap_or(&[]);
        if message.trailing {
            if let Some(last) = params.last() {
                if last.contains(' ') || !last.contains('=') {
                    params = &params[..params.len() - 1];
                }
            }
        }

        let origin = message.source.unwrap_or(server);
        let tokens = self.servers.entry(server.to_string()).or_default();
        let mut applied = 0;
        for param in params {
            if let Some(name) = param.strip_prefix('-') {
                if !name.is_empty() {
                    tokens.remove(name);
                    debug!("ISUPPORT {} removed by {}", name, origin);
                    applied += 1;
                }
            } else {
                let (name, value) = param.split_once('=').unwrap_or((*param, ""));
                if !name.is_empty() {
                    let value = unescape_value(value);
                    debug!("ISUPPORT {}={} from {}", name, value, origin);
                    tokens.insert(name.to_string(), value);
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }
}

impl CapabilitySource for IsupportStore {
    fn prefix_declaration(&self, server: &str) -> Result<Option<String>, SourceError> {
        if let Some(tokens) = self.servers.get(server) {
            Ok(tokens.get(PREFIX_TOKEN).cloned())
        } else {
            Err(SourceError::UnknownServer(server.to_string()))
        }
    }
}
