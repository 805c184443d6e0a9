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

//! Log output set-up.
//!
//! The terminal is in raw mode on the alternate screen while the application
//! runs, so log records are written to the configured log file instead of
//! the terminal. Without a log file, logging is disabled.

use std::{fs::OpenOptions, str::FromStr};

use anyhow::{Context, Result};
use env_logger::{Target, WriteStyle};
use log::LevelFilter;

use crate::config::AppConfig;

pub(crate) fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path))?;

    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Info);

    let mut clog = colog::default_builder();
    clog.filter(None, level)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)));
    clog.try_init().context("Failed to initialise logging")?;

    std::panic::set_hook(Box::new(|panic_info| {
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
    }));

    Ok(())
}
