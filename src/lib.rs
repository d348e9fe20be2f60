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

//! A small HTTP API serving [shields.io endpoint] badges with visit counts from [Umami].
//!
//! [shields.io endpoint]: https://shields.io/badges/endpoint-badge
//! [Umami]: https://umami.is

#[macro_use]
extern crate tracing as _;

#[macro_use]
extern crate thiserror as _;

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

pub mod config;
pub mod domains;
pub mod runtime;
pub mod services;
pub mod telemetry;

mod http;
mod signals;

#[cfg(test)]
mod testing;

use self::config::Config;
use self::domains::DomainMap;
use self::services::{BadgeService, MetaService, UmamiService};

#[derive(Debug, Error)]
pub enum RunError
{
	#[error("failed to initialize tokio: {0}")]
	InitializeRuntime(#[source] io::Error),

	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),

	#[error("failed to bind tcp listener: {0}")]
	BindTcpListener(#[source] io::Error),

	#[error("failed to get local address of tcp listener: {0}")]
	GetLocalAddr(#[source] io::Error),

	#[error("failed to run server: {0}")]
	Serve(#[source] io::Error),
}

/// Builds the application's router from `config`.
pub fn app(config: &Config) -> Result<Router, RunError>
{
	let http_client = services::umami::http_client(&config.umami).map_err(RunError::HttpClient)?;
	let umami_service = UmamiService::new(http_client, &config.umami);
	let badge_service = BadgeService::new(DomainMap::from_config(config), umami_service);
	let meta_service = MetaService::new(config.runtime.environment);

	Ok(http::router(meta_service, badge_service, &config.tracing))
}

/// Serves the API with the given config.
///
/// This function will not return until the server shuts down.
#[instrument(skip_all, err)]
pub async fn serve(config: Config) -> Result<(), RunError>
{
	let router = app(&config)?;
	let listener = TcpListener::bind(config.http.socket_addr())
		.await
		.map_err(RunError::BindTcpListener)?;

	let local_addr = listener.local_addr().map_err(RunError::GetLocalAddr)?;

	info!(
		%local_addr,
		environment = %config.runtime.environment,
		"listening for HTTP requests",
	);

	axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
		.with_graceful_shutdown(signals::shutdown())
		.await
		.map_err(RunError::Serve)?;

	info!("shut down");

	Ok(())
}

/// Builds a tokio runtime and runs [`serve()`] on it.
pub fn run(config: Config) -> Result<(), RunError>
{
	runtime::build(&config.runtime)
		.map_err(RunError::InitializeRuntime)?
		.block_on(serve(config))
}
