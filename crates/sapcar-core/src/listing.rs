//! File lists on both sides of the diff: SAPCAR's listing output and the
//! destination directory.

use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Parses the output of `SAPCAR -tf`.
///
/// The first line is a banner and is dropped. Every other line looks like
///
/// ```text
/// -rw-------        5006    18 Sep 2020 11:58 SIGNATURE.SMF
/// ```
///
/// and contributes its last whitespace-separated token. Blank lines are
/// skipped.
///
/// # Examples
///
/// ```
/// use sapcar_core::listing::parse_list_output;
///
/// let out = "SAPCAR: processing archive kernel.sar (version 2.01)\n\
///            -rw-r--r--  1024  18 Sep 2020 11:58 disp+work\n";
/// assert_eq!(parse_list_output(out), vec!["disp+work"]);
/// ```
#[must_use]
pub fn parse_list_output(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().last())
        .map(str::to_string)
        .collect()
}

/// Recursively lists everything below `dir` as `/`-separated paths relative
/// to it.
///
/// Files and directories are both reported; `dir` itself is not. A missing
/// directory yields an empty list since SAPCAR creates it on extraction.
pub fn list_disk_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        files.push(parts.join("/"));
    }
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LISTING: &str = "SAPCAR: processing archive saprouter.sar (version 2.01)\n\
        -rw-------        5006    18 Sep 2020 11:58 SIGNATURE.SMF\n\
        -rwxr-xr-x     2211840    18 Sep 2020 11:58 saprouter\n\
        -rwxr-xr-x      512000    18 Sep 2020 11:58 lib/libsapcrypto.so\n";

    #[test]
    fn test_parse_skips_banner() {
        assert_eq!(
            parse_list_output(LISTING),
            vec!["SIGNATURE.SMF", "saprouter", "lib/libsapcrypto.so"]
        );
    }

    #[test]
    fn test_parse_banner_only() {
        let out = "SAPCAR: processing archive empty.sar (version 2.01)\n";
        assert!(parse_list_output(out).is_empty());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_list_output("").is_empty());
    }

    #[test]
    fn test_parse_ignores_blank_and_trailing_space() {
        let out = "banner\n\n-rw-r--r--  1  18 Sep 2020 11:58 a.txt   \n   \n";
        assert_eq!(parse_list_output(out), vec!["a.txt"]);
    }

    #[test]
    fn test_parse_crlf() {
        let out = "banner\r\n-rw-r--r--  1  18 Sep 2020 11:58 a.txt\r\n";
        assert_eq!(parse_list_output(out), vec!["a.txt"]);
    }

    #[test]
    fn test_list_disk_files_relative() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("A.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("lib")).unwrap();
        fs::write(temp.path().join("lib/x.so"), "x").unwrap();

        let files = list_disk_files(temp.path()).unwrap();
        assert_eq!(files, vec!["A.txt", "lib", "lib/x.so"]);
    }

    #[test]
    fn test_list_disk_files_empty_dir() {
        let temp = TempDir::new().unwrap();
        assert!(list_disk_files(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_disk_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let files = list_disk_files(&temp.path().join("not-there")).unwrap();
        assert!(files.is_empty());
    }
}
