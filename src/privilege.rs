// privilege.rs - channel mode privilege checks
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

use tracing::*;

use crate::prefix::PrefixTable;
use crate::resolver::resolve;
use crate::source::CapabilitySource;

// resolve table or None if no prefix modes are available.
fn resolve_or_deny<S>(source: &S, server: &str) -> Option<PrefixTable>
where
    S: CapabilitySource + ?Sized,
{
    match resolve(source, server) {
        Ok(table) if table.is_empty() => {
            debug!("No prefix modes on {}", server);
            None
        }
        Ok(table) => Some(table),
        Err(e) => {
            warn!("Can't get prefix modes for {}: {}", server, e);
            None
        }
    }
}

/// Returns true if user having actor mode on server can set or unset
/// target mode for other user.
///
/// Any failure while getting prefix modes denies privilege.
pub fn can_grant<S>(source: &S, server: &str, actor: &str, target: &str) -> bool
where
    S: CapabilitySource + ?Sized,
{
    let granted = resolve_or_deny(source, server)
        .map_or(false, |table| table.can_grant(actor, target));
    debug!("Can {} give {} on {}: {}", actor, target, server, granted);
    granted
}

/// Same as `can_grant`, but actor is given by its nick prefix characters
/// (like `@` or `@+`). Highest known prefix is used.
pub fn can_grant_by_prefix<S>(source: &S, server: &str, actor_prefixes: &str,
            target: &str) -> bool
where
    S: CapabilitySource + ?Sized,
{
    let granted = resolve_or_deny(source, server).map_or(false, |table| {
        table.highest_mode(actor_prefixes).map_or(false, |mode| {
            let mut buf = [0; 4];
            table.can_grant(mode.encode_utf8(&mut buf), target)
        })
    });
    debug!("Can '{}' give {} on {}: {}", actor_prefixes, target, server, granted);
    granted
}
