// message.rs - IRC message parsing
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

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageError {
    Empty,
    WrongSource,
    NoCommand,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::Empty => write!(f, "Message is empty"),
            MessageError::WrongSource => write!(f, "Wrong source syntax"),
            MessageError::NoCommand => write!(f, "No command"),
        }
    }
}

impl Error for MessageError {
}

/// Message received from IRC server.
#[derive(PartialEq, Eq, Debug)]
pub(crate) struct Message<'a> {
    pub(crate) source: Option<&'a str>,
    pub(crate) command: &'a str,
    pub(crate) params: Vec<&'a str>,
    // true if last parameter was given after ':'
    pub(crate) trailing: bool,
}

fn validate_source(s: &str) -> bool {
    if s.is_empty() || s.contains(':') {
        false
    } else {
        let excl = s.find('!');
        let atchar = s.find('@');
        if let Some(excl_pos) = excl {
            if let Some(atchar_pos) = atchar {
                return excl_pos < atchar_pos;
            }
        }
        true
    }
}

impl<'a> Message<'a> {
    pub(crate) fn from_shared_str(input: &'a str) -> Result<Self, MessageError> {
        let trimmed = input.trim_start().trim_end_matches(|c| c == '\r' || c == '\n');

        if !trimmed.is_empty() {
            // start_pos after ':' if exists - to skip ':' before source
            let start_pos = if trimmed.starts_with(':') { 1 } else { 0 };
            let (rest, last_param) =
            if let Some((rest, lp)) = trimmed[start_pos..].split_once(" :") {
                // get rest. add first character length to rest length.
                (&trimmed[0..rest.len() + start_pos], Some(lp))
            } else {
                (trimmed, None)
            };

            let mut rest_words = rest.split_ascii_whitespace();
            // find source
            let source = if start_pos == 1 {
                let s = rest_words.next().map(|w| &w[1..]).unwrap_or("");
                if !validate_source(s) {
                    return Err(MessageError::WrongSource);
                }
                Some(s)
            } else { None };
            let command = if let Some(cmd) = rest_words.next() { cmd }
            else { return Err(MessageError::NoCommand); };

            let mut params = rest_words.collect::<Vec<_>>();
            if let Some(lp) = last_param {
                params.push(lp);    // add last parameter
            }

            Ok(Message{ source, command, params, trailing: last_param.is_some() })
        } else {
            Err(MessageError::Empty)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_message_from_shared_str() {
        assert_eq!(Ok(Message{ source: None, command: "PING", params: vec!["irc.org"],
                trailing: false }),
            Message::from_shared_str("PING irc.org").map_err(|e| e.to_string()));
        assert_eq!(Ok(Message{ source: Some("irc.example.com"), command: "005",
                params: vec!["bot", "CHANTYPES=#", "PREFIX=(ov)@+",
                        "are supported by this server"], trailing: true }),
            Message::from_shared_str(":irc.example.com 005 bot CHANTYPES=# PREFIX=(ov)@+ \
                    :are supported by this server\r\n").map_err(|e| e.to_string()));
        assert_eq!(Ok(Message{ source: Some("nick!user@host"), command: "MODE",
                params: vec!["#chan", "+o", "other"], trailing: false }),
            Message::from_shared_str(":nick!user@host MODE #chan +o other")
                    .map_err(|e| e.to_string()));
        assert_eq!(Ok(Message{ source: None, command: "PRIVMSG",
                params: vec!["#chan", "hello: world"], trailing: true }),
            Message::from_shared_str("PRIVMSG #chan :hello: world")
                    .map_err(|e| e.to_string()));
    }

    #[test]
    fn test_message_from_shared_str_errors() {
        assert_eq!(Err("Message is empty".to_string()),
            Message::from_shared_str("   ").map_err(|e| e.to_string()));
        assert_eq!(Err(MessageError::NoCommand),
            Message::from_shared_str(":irc.example.com"));
        assert_eq!(Err(MessageError::WrongSource),
            Message::from_shared_str(":nick@host!user MODE #chan"));
        assert_eq!(Err(MessageError::WrongSource),
            Message::from_shared_str(": 005 bot"));
    }
}
