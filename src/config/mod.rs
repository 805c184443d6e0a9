// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file.

use serde::{Deserialize, Serialize};

use crate::lookup::LookupSource;

const CONFIG_NAME: &str = "songshare";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    /// The playlist shown on start-up.
    pub playlist_id: String,
    /// SQLite database holding playlists, kept in memory when unset.
    pub database_file: Option<String>,
    pub lookup: LookupSource,
    pub login_platform: String,
    /// Log output file, logging is off when unset.
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            playlist_id: "default".to_string(),
            database_file: None,
            lookup: LookupSource::Fixture,
            login_platform: "spotify".to_string(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

/// Loads the configuration, writing the defaults on first run.
pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_playlists_in_memory_without_logging() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_file, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn storage_and_logging_are_opt_in() {
        let config: AppConfig =
            toml::from_str("database_file = \"songshare.db\"\nlog_file = \"songshare.log\"").unwrap();

        assert_eq!(config.database_file.as_deref(), Some("songshare.db"));
        assert_eq!(config.log_file.as_deref(), Some("songshare.log"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str("playlist_id = \"road-trip\"\nlookup = \"tags\"").unwrap();

        assert_eq!(config.playlist_id, "road-trip");
        assert_eq!(config.lookup, LookupSource::Tags);
        assert_eq!(config.login_platform, "spotify");
        assert_eq!(config.version, 1);
    }
}
