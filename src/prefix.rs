// prefix.rs - prefix mode table
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

/// Channel operator mode. Only users ranked at or above it can give their own
/// mode to other users.
pub const OPERATOR_MODE: char = 'o';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrefixError {
    Malformed,
    LengthMismatch { modes: usize, prefixes: usize },
    DuplicateMode(char),
}

impl fmt::Display for PrefixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixError::Malformed => write!(f, "Prefix must be in form (modes)prefixes"),
            PrefixError::LengthMismatch{ modes, prefixes } =>
                write!(f, "Prefix has {} modes but {} prefix characters", modes, prefixes),
            PrefixError::DuplicateMode(c) => write!(f, "Duplicate prefix mode '{}'", c),
        }
    }
}

impl Error for PrefixError {
}

/// Channel prefix modes declared by a server (ISUPPORT PREFIX).
///
/// Modes are held in the order declared by the server. The position of a mode
/// is its rank: index 0 is the highest privilege. The order is never sorted,
/// so servers with unusual hierarchies keep their own ranking.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct PrefixTable {
    modes: Vec<char>,
    prefixes: Vec<char>,
}

impl PrefixTable {
    /// Parse a PREFIX value like `(ov)@+`. Empty value or `()` gives empty table.
    pub fn parse(declaration: &str) -> Result<PrefixTable, PrefixError> {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            return Ok(PrefixTable::default());
        }
        if let Some(rest) = declaration.strip_prefix('(') {
            if let Some((modes, prefixes)) = rest.split_once(')') {
                PrefixTable::from_parts(modes, prefixes)
            } else { Err(PrefixError::Malformed) }
        } else { Err(PrefixError::Malformed) }
    }

    /// Build table from separately given modes and prefix characters.
    pub fn from_parts(modes: &str, prefixes: &str) -> Result<PrefixTable, PrefixError> {
        let modes = modes.chars().collect::<Vec<_>>();
        let prefixes = prefixes.chars().collect::<Vec<_>>();
        if modes.len() != prefixes.len() {
            return Err(PrefixError::LengthMismatch{ modes: modes.len(),
                    prefixes: prefixes.len() });
        }
        for (i, m) in modes.iter().enumerate() {
            if modes[..i].contains(m) {
                return Err(PrefixError::DuplicateMode(*m));
            }
        }
        Ok(PrefixTable{ modes, prefixes })
    }

    pub fn modes(&self) -> &[char] {
        &self.modes
    }

    pub fn prefixes(&self) -> &[char] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Returns mode letters and prefix characters as index-aligned sequences.
    pub fn into_parts(self) -> (Vec<char>, Vec<char>) {
        (self.modes, self.prefixes)
    }

    /// Rank of mode (0 is highest). None if mode is not a prefix mode.
    pub fn rank(&self, mode: char) -> Option<usize> {
        self.modes.iter().position(|m| *m == mode)
    }

    /// Rank of mode given as string. Only single character can be ranked.
    pub fn rank_of(&self, mode: &str) -> Option<usize> {
        let mut chars = mode.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.rank(c),
            _ => None,
        }
    }

    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        self.rank(mode).map(|i| self.prefixes[i])
    }

    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefixes.iter().position(|p| *p == prefix).map(|i| self.modes[i])
    }

    /// Highest ranked mode among given prefix characters (like `@+` from
    /// multi-prefix NAMES). Unknown characters are skipped.
    pub fn highest_mode(&self, prefixes: &str) -> Option<char> {
        prefixes.chars()
            .filter_map(|p| self.prefixes.iter().position(|x| *x == p))
            .min()
            .map(|i| self.modes[i])
    }

    /// Returns true if user with actor mode can set or unset target mode.
    ///
    /// Actor can give any mode ranked below its own. Its own rank can be given
    /// only if actor is ranked at or above the operator mode, so halfops and
    /// voices cannot spread their mode. Unranked modes (not in table, empty or
    /// longer than one character) never grant and are never granted.
    pub fn can_grant(&self, actor: &str, target: &str) -> bool {
        match (self.rank_of(actor), self.rank_of(target)) {
            (Some(actor_rank), Some(target_rank)) => actor_rank < target_rank ||
                (actor_rank == target_rank && self.is_operator_rank(actor_rank)),
            _ => false,
        }
    }

    // true if rank is not lower than operator rank. false if no operator mode.
    fn is_operator_rank(&self, rank: usize) -> bool {
        self.rank(OPERATOR_MODE).map_or(false, |op_rank| rank <= op_rank)
    }
}

impl fmt::Display for PrefixTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        self.modes.iter().try_for_each(|m| write!(f, "{}", m))?;
        f.write_str(")")?;
        self.prefixes.iter().try_for_each(|p| write!(f, "{}", p))
    }
}
