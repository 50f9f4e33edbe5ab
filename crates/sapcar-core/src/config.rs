//! Configuration for invoking SAPCAR.

use std::path::PathBuf;
use std::time::Duration;

/// Default timeout applied to every SAPCAR invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Manifest entry verified on extraction.
pub const SIGNATURE_MANIFEST: &str = "SIGNATURE.SMF";

/// Settings shared by the list and extract operations.
///
/// # Examples
///
/// ```
/// use sapcar_core::SapcarConfig;
/// use std::time::Duration;
///
/// // SAPCAR from PATH, 10 minute timeout
/// let config = SapcarConfig::default();
///
/// let custom = SapcarConfig {
///     binary: "/usr/sap/hostctrl/exe/SAPCAR".into(),
///     timeout: Duration::from_secs(60),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SapcarConfig {
    /// SAPCAR executable, either a bare name resolved through `PATH` or a
    /// path.
    pub binary: PathBuf,

    /// Upper bound on a single invocation.
    pub timeout: Duration,

    /// Manifest passed to `-manifest` on extraction.
    pub manifest: String,
}

impl Default for SapcarConfig {
    /// Default values:
    /// - `binary`: `SAPCAR`
    /// - `timeout`: 600 seconds
    /// - `manifest`: `SIGNATURE.SMF`
    fn default() -> Self {
        Self {
            binary: PathBuf::from("SAPCAR"),
            timeout: DEFAULT_TIMEOUT,
            manifest: SIGNATURE_MANIFEST.to_string(),
        }
    }
}

impl SapcarConfig {
    /// Program name as it appears in rendered command lines.
    #[must_use]
    pub fn program(&self) -> String {
        self.binary.to_string_lossy().into_owned()
    }
}
