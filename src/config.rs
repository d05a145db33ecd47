// config.rs - configuration
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

use std::error::Error;
use std::fs;
use std::io;
use clap;
use toml;
use serde_derive::{Serialize, Deserialize};
use tracing::*;
use validator::{Validate, ValidationError};

use crate::isupport::{IsupportStore, PREFIX_TOKEN};
use crate::prefix::PrefixTable;

pub const DEFAULT_CONFIG_PATH: &str = "irc-automode.toml";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(short, long, help="Configuration file path")]
    pub config: Option<String>,
    #[clap(short, long, help="Server name")]
    pub server: String,
    #[clap(short, long, help="Prefix mode held by acting user")]
    pub actor: String,
    #[clap(short, long, help="Prefix mode to give or take")]
    pub target: String,
    #[clap(short, long, help="Server PREFIX value, for example (ov)@+")]
    pub prefix: Option<String>,
    #[clap(short, long, help="Log filter, for example debug")]
    pub log_level: Option<String>,
}

pub(crate) fn validate_server_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && !name.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err(ValidationError::new("Server name must not be empty or contain spaces."))
    }
}

pub(crate) fn validate_prefix(prefix: &str) -> Result<(), ValidationError> {
    if PrefixTable::parse(prefix).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("Prefix must be in form (modes)prefixes \
                with same number of modes and prefixes."))
    }
}

#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Validate)]
pub struct ServerConfig {
    #[validate(custom = "validate_server_name")]
    pub name: String,
    #[validate(custom = "validate_prefix")]
    pub prefix: Option<String>,
    // raw RPL_ISUPPORT lines
    pub isupport: Option<Vec<String>>,
}

/// Main configuration structure.
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Validate)]
pub struct MainConfig {
    pub log_level: Option<String>,
    #[validate]
    pub servers: Option<Vec<ServerConfig>>,
}

impl MainConfig {
    pub fn new(cli: &Cli) -> Result<MainConfig, Box<dyn Error>> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut config: MainConfig = match fs::read_to_string(config_path) {
            Ok(config_str) => toml::from_str(&config_str)?,
            // default configuration file is optional
            Err(ref e) if cli.config.is_none() && e.kind() == io::ErrorKind::NotFound =>
                MainConfig::default(),
            Err(e) => return Err(Box::new(e)),
        };
        // modify configuration by CLI options
        if let Some(ref prefix) = cli.prefix {
            let servers = config.servers.get_or_insert_with(Vec::new);
            if let Some(server) = servers.iter_mut().find(|s| s.name == cli.server) {
                server.prefix = Some(prefix.clone());
            } else {
                servers.push(ServerConfig{ name: cli.server.clone(),
                        prefix: Some(prefix.clone()), isupport: None });
            }
        }
        if let Some(ref log_level) = cli.log_level {
            config.log_level = Some(log_level.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Build capabilities of configured servers. PREFIX given directly
    /// overrides PREFIX from ISUPPORT lines.
    pub fn capability_source(&self) -> Result<IsupportStore, Box<dyn Error>> {
        let mut store = IsupportStore::new();
        for server in self.servers.iter().flatten() {
            store.register_server(&server.name);
            for line in server.isupport.iter().flatten() {
                store.record_line(&server.name, line)?;
            }
            if let Some(ref prefix) = server.prefix {
                store.set_token(&server.name, PREFIX_TOKEN, prefix);
            }
            info!("Server {} configured", server.name);
        }
        Ok(store)
    }
}

impl Default for MainConfig {
    fn default() -> Self {
        MainConfig{ log_level: None, servers: None }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::env::temp_dir;
    use crate::source::CapabilitySource;

    struct TempFileHandle {
        path: String
    }

    impl TempFileHandle {
        fn new(path: &str) -> TempFileHandle {
            TempFileHandle{ path: temp_dir().join(path)
                    .to_string_lossy().to_string() }
        }
    }

    impl Drop for TempFileHandle {
        fn drop(&mut self) {
            fs::remove_file(self.path.as_str()).unwrap();
        }
    }

    fn cli_for(config: Option<String>, server: &str) -> Cli {
        Cli{ config, server: server.to_string(), actor: "o".to_string(),
            target: "v".to_string(), prefix: None, log_level: None }
    }

    #[test]
    fn test_validate_server_name() {
        assert_eq!(true, validate_server_name("freenode").is_ok());
        assert_eq!(true, validate_server_name("irc.libera.chat").is_ok());
        assert_eq!(false, validate_server_name("").is_ok());
        assert_eq!(false, validate_server_name("free node").is_ok());
    }

    #[test]
    fn test_validate_prefix() {
        assert_eq!(true, validate_prefix("(ov)@+").is_ok());
        assert_eq!(true, validate_prefix("").is_ok());
        assert_eq!(false, validate_prefix("(ov)@").is_ok());
        assert_eq!(false, validate_prefix("ov@+").is_ok());
    }

    #[test]
    fn test_mainconfig_new() {
        let file_handle = TempFileHandle::new("temp_automode_config.toml");
        let cli = cli_for(Some(file_handle.path.clone()), "freenode");

        fs::write(file_handle.path.as_str(),
            r##"
log_level = "info"

[[servers]]
name = "freenode"
prefix = "(ov)@+"

[[servers]]
name = "shadowircd"
isupport = [ ":irc.shadow.net 005 bot CHANTYPES=# PREFIX=(aohv)!@%+ :are supported by this server" ]

[[servers]]
name = "rfc_lol"
"##).unwrap();
        let result = MainConfig::new(&cli).map_err(|e| e.to_string());
        assert_eq!(Ok(MainConfig{
            log_level: Some("info".to_string()),
            servers: Some(vec![
                ServerConfig{ name: "freenode".to_string(),
                    prefix: Some("(ov)@+".to_string()), isupport: None },
                ServerConfig{ name: "shadowircd".to_string(), prefix: None,
                    isupport: Some(vec![ ":irc.shadow.net 005 bot CHANTYPES=# \
                        PREFIX=(aohv)!@%+ :are supported by this server".to_string() ]) },
                ServerConfig{ name: "rfc_lol".to_string(), prefix: None, isupport: None },
            ]),
        }), result);

        let mut cli2 = cli_for(Some(file_handle.path.clone()), "freenode");
        cli2.prefix = Some("(vo)+@".to_string());
        cli2.log_level = Some("debug".to_string());
        let config = MainConfig::new(&cli2).unwrap();
        assert_eq!("debug", config.log_level());
        assert_eq!(Some("(vo)+@".to_string()),
                config.servers.as_ref().unwrap()[0].prefix);

        let mut cli3 = cli_for(Some(file_handle.path.clone()), "efnet");
        cli3.prefix = Some("(ov)@+".to_string());
        let config = MainConfig::new(&cli3).unwrap();
        assert_eq!(Some(&ServerConfig{ name: "efnet".to_string(),
                    prefix: Some("(ov)@+".to_string()), isupport: None }),
                config.servers.as_ref().unwrap().last());

        let mut cli4 = cli_for(Some(file_handle.path.clone()), "efnet");
        cli4.prefix = Some("(ov)@".to_string());
        assert_eq!(true, MainConfig::new(&cli4).is_err());
    }

    #[test]
    fn test_mainconfig_new_validation() {
        let file_handle = TempFileHandle::new("temp_automode_config_bad.toml");
        let cli = cli_for(Some(file_handle.path.clone()), "freenode");

        fs::write(file_handle.path.as_str(),
            r##"
[[servers]]
name = "freenode"
prefix = "(ov)@+%"
"##).unwrap();
        assert_eq!(true, MainConfig::new(&cli).is_err());

        fs::write(file_handle.path.as_str(),
            r##"
[[servers]]
name = "free node"
"##).unwrap();
        assert_eq!(true, MainConfig::new(&cli).is_err());
    }

    #[test]
    fn test_mainconfig_missing_file() {
        let cli = cli_for(Some(temp_dir().join("no_such_automode.toml")
                .to_string_lossy().to_string()), "freenode");
        assert_eq!(true, MainConfig::new(&cli).is_err());
    }

    #[test]
    fn test_mainconfig_capability_source() {
        let config = MainConfig{ log_level: None, servers: Some(vec![
            ServerConfig{ name: "freenode".to_string(),
                prefix: Some("(ov)@+".to_string()), isupport: None },
            ServerConfig{ name: "shadowircd".to_string(), prefix: None,
                isupport: Some(vec![ ":irc.shadow.net 005 bot PREFIX=(aohv)!@%+ \
                    :are supported by this server".to_string() ]) },
            ServerConfig{ name: "override".to_string(),
                prefix: Some("(vo)+@".to_string()),
                isupport: Some(vec![ ":irc.example.com 005 bot PREFIX=(ov)@+".to_string() ]) },
            ServerConfig{ name: "rfc_lol".to_string(), prefix: None, isupport: None },
        ]) };
        let store = config.capability_source().unwrap();
        assert_eq!(Ok(Some("(ov)@+".to_string())), store.prefix_declaration("freenode"));
        assert_eq!(Ok(Some("(aohv)!@%+".to_string())), store.prefix_declaration("shadowircd"));
        assert_eq!(Ok(Some("(vo)+@".to_string())), store.prefix_declaration("override"));
        assert_eq!(Ok(None), store.prefix_declaration("rfc_lol"));
        assert_eq!(true, store.prefix_declaration("efnet").is_err());
        assert_eq!(DEFAULT_LOG_LEVEL, config.log_level());

        let config = MainConfig{ log_level: None, servers: Some(vec![
            ServerConfig{ name: "broken".to_string(), prefix: None,
                isupport: Some(vec![ "   ".to_string() ]) } ]) };
        assert_eq!(true, config.capability_source().is_err());
    }
}
