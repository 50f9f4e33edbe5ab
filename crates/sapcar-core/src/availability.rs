//! Host support checks.

use crate::Result;
use crate::SapcarConfig;
use crate::SapcarError;
use std::path::PathBuf;

/// Verifies SAPCAR can run on this host and returns the resolved binary.
///
/// Only Linux is supported, and the configured binary must be an executable
/// path or be found on `PATH`.
pub fn check_available(config: &SapcarConfig) -> Result<PathBuf> {
    if !cfg!(target_os = "linux") {
        return Err(SapcarError::Unavailable {
            reason: format!("{} systems are not supported", std::env::consts::OS),
        });
    }

    which::which(&config.binary).map_err(|_| SapcarError::Unavailable {
        reason: format!("{} binary is not in the path", config.binary.display()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary() {
        let config = SapcarConfig {
            binary: "sapcar-test-no-such-binary".into(),
            ..Default::default()
        };
        let err = check_available(&config).unwrap_err();
        assert!(err.to_string().contains("not in the path"));
    }

    #[test]
    fn test_binary_on_path() {
        let config = SapcarConfig {
            binary: "sh".into(),
            ..Default::default()
        };
        assert!(check_available(&config).unwrap().is_absolute());
    }
}
