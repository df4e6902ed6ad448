//! Writes the OpenAPI document for the ticket aggregator API
//!
//! ```bash
//! cargo run --bin generate_openapi --features openapi
//! cargo run --bin generate_openapi --features openapi -- custom/path/openapi.json
//! ```
#[cfg(feature = "openapi")]
use std::env;
#[cfg(feature = "openapi")]
use std::fs;
#[cfg(feature = "openapi")]
use std::path::Path;

#[cfg(feature = "openapi")]
use ticket_api::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	#[cfg(not(feature = "openapi"))]
	{
		eprintln!("Error: The 'openapi' feature must be enabled to generate OpenAPI specs.");
		eprintln!("Run with: cargo run --bin generate_openapi --features openapi");
		std::process::exit(1);
	}

	#[cfg(feature = "openapi")]
	{
		let args: Vec<String> = env::args().collect();
		let output_path = args
			.get(1)
			.map(|s| s.as_str())
			.unwrap_or("docs/api/openapi.json");

		if let Some(parent) = Path::new(output_path).parent() {
			fs::create_dir_all(parent)?;
		}

		println!("📄 Writing OpenAPI document to {}", output_path);

		let json = ApiDoc::openapi().to_pretty_json()?;
		fs::write(output_path, json)?;

		println!("✅ Done");
	}

	#[allow(unreachable_code)]
	Ok(())
}
