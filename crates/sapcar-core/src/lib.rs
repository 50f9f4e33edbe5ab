//! SAPCAR command adapter with idempotent archive extraction.
//!
//! `sapcar-core` drives the external SAPCAR binary to list and extract SAP
//! CAR/SAR archives, and provides an `extracted` state that only extracts
//! members missing from the destination directory.
//!
//! Host facilities (process execution, the default run-as identity, dry-run
//! mode) are passed in explicitly through a [`Context`].
//!
//! # Examples
//!
//! ```no_run
//! use sapcar_core::Context;
//! use sapcar_core::ExtractedArgs;
//! use sapcar_core::SapcarConfig;
//! use sapcar_core::extracted;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Context::system(SapcarConfig::default())?;
//! let args = ExtractedArgs {
//!     output_dir: Some("/usr/sap/saprouter/".into()),
//!     ..ExtractedArgs::new("/mnt/nfs/saprouter.sar")
//! };
//! let result = extracted(&ctx, &args)?;
//! println!("{}: {}", result.result, result.comment);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod availability;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod listing;
pub mod plan;
pub mod runner;
pub mod state;
pub mod test_utils;

// Re-export main API types
pub use archive::extract_archive;
pub use archive::list_archive;
pub use availability::check_available;
pub use config::SapcarConfig;
pub use context::Context;
pub use error::Result;
pub use error::SapcarError;
pub use identity::Identity;
pub use plan::ExtractionPlan;
pub use runner::CommandResult;
pub use runner::CommandRunner;
pub use runner::SystemRunner;
pub use state::ExtractedArgs;
pub use state::StateResult;
pub use state::StateStatus;
pub use state::extracted;
