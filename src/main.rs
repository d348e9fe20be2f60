/*
 * umami-badge - visit count badges backed by Umami.
 * Copyright (C) 2024  umami-badge contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::env;

use color_eyre::eyre::{self, WrapErr};
use umami_badge::config::{Config, LoadFromFileError};
use umami_badge::runtime::panic_hook;
use umami_badge::telemetry;

mod cli;

fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	let args = cli::args();

	// Nothing is logged before the subscriber exists, so we remember what went wrong and report
	// it afterwards.
	let dotenv_result = match args.env_file.as_deref() {
		Some(path) => {
			dotenvy::from_path(path).wrap_err_with(|| format!("failed to load {path:?}"))?;
			Ok(())
		},
		None => dotenvy::dotenv().map(drop),
	};

	let (mut config, config_error) = match Config::load_from_file(&args.config_path) {
		Ok(config) => (config, None),
		Err(error) => (Config::default(), Some(error)),
	};

	config
		.apply_env(|name| env::var(name).ok())
		.wrap_err("invalid environment")?;

	args.apply_to_config(&mut config);

	let _guard = telemetry::init(&config.tracing).wrap_err("failed to initialize tracing")?;

	panic_hook::install();

	match config_error {
		None => tracing::info!(path = ?args.config_path, "loaded configuration file"),
		Some(LoadFromFileError::Read(error)) => tracing::warn!(
			path = ?args.config_path,
			%error,
			"could not read configuration file; using defaults",
		),
		Some(error @ LoadFromFileError::Parse(_)) => tracing::warn!(
			path = ?args.config_path,
			%error,
			"could not parse configuration file; using defaults",
		),
	}

	if let Err(error) = dotenv_result {
		tracing::debug!(%error, "no `.env` file loaded");
	}

	umami_badge::run(config).wrap_err("failed to run umami-badge")
}
