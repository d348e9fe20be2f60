#![allow(clippy::print_stdout)]

use std::env;
use std::process::Command;

fn main()
{
	let rustc = env::var("RUSTC").unwrap_or_else(|_| String::from("rustc"));
	let version = Command::new(rustc)
		.arg("--version")
		.output()
		.ok()
		.filter(|output| output.status.success())
		.and_then(|output| String::from_utf8(output.stdout).ok())
		.map(|version| version.trim().to_owned())
		.unwrap_or_else(|| String::from("unknown"));

	println!("cargo:rustc-env=UMAMI_BADGE_RUSTC_VERSION={version}");
	println!("cargo:rerun-if-changed=build.rs");
	println!("cargo:rerun-if-env-changed=RUSTC");
}
