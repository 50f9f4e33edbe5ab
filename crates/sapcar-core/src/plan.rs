//! Deciding what an extraction has to do.

use std::collections::HashSet;

/// What must be extracted to make the destination match the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionPlan {
    /// Every archive member already exists on disk.
    NothingToDo,
    /// Only these members are missing.
    Files(Vec<String>),
    /// None of the members exist; extract without a file filter.
    Everything,
}

impl ExtractionPlan {
    /// Computes the plan from the archive listing and the destination
    /// listing.
    ///
    /// Only presence by relative path is compared. Paths listed more than
    /// once in the archive are reported once, in first-seen order. An empty
    /// archive needs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use sapcar_core::ExtractionPlan;
    ///
    /// let archive = ["A.txt", "B.txt", "C.txt"].map(String::from);
    /// let disk = ["A.txt"].map(String::from);
    /// assert_eq!(
    ///     ExtractionPlan::compute(&archive, &disk),
    ///     ExtractionPlan::Files(vec!["B.txt".into(), "C.txt".into()])
    /// );
    /// ```
    #[must_use]
    pub fn compute(archive: &[String], disk: &[String]) -> Self {
        let on_disk: HashSet<&str> = disk.iter().map(String::as_str).collect();
        let mut seen = HashSet::with_capacity(archive.len());
        let mut missing = Vec::new();
        let mut any_present = false;

        for file in archive {
            if on_disk.contains(file.as_str()) {
                any_present = true;
            } else if seen.insert(file.as_str()) {
                missing.push(file.clone());
            }
        }

        if missing.is_empty() {
            Self::NothingToDo
        } else if any_present {
            Self::Files(missing)
        } else {
            Self::Everything
        }
    }

    /// File filter to hand to SAPCAR; empty means all members.
    #[must_use]
    pub fn file_filter(&self) -> &[String] {
        match self {
            Self::Files(files) => files,
            Self::NothingToDo | Self::Everything => &[],
        }
    }

    /// Returns `true` if nothing needs extracting.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NothingToDo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_all_present() {
        let plan = ExtractionPlan::compute(&list(&["A.txt"]), &list(&["A.txt"]));
        assert_eq!(plan, ExtractionPlan::NothingToDo);
        assert!(plan.is_noop());
    }

    #[test]
    fn test_extra_disk_files_ignored() {
        let plan = ExtractionPlan::compute(&list(&["A.txt"]), &list(&["A.txt", "local.cfg"]));
        assert_eq!(plan, ExtractionPlan::NothingToDo);
    }

    #[test]
    fn test_partial() {
        let plan = ExtractionPlan::compute(&list(&["A.txt", "B.txt", "C.txt"]), &list(&["A.txt"]));
        assert_eq!(plan, ExtractionPlan::Files(list(&["B.txt", "C.txt"])));
        assert_eq!(plan.file_filter(), list(&["B.txt", "C.txt"]).as_slice());
    }

    #[test]
    fn test_none_present() {
        let plan = ExtractionPlan::compute(&list(&["A.txt", "B.txt"]), &[]);
        assert_eq!(plan, ExtractionPlan::Everything);
        assert!(plan.file_filter().is_empty());
    }

    #[test]
    fn test_empty_archive() {
        assert_eq!(
            ExtractionPlan::compute(&[], &list(&["A.txt"])),
            ExtractionPlan::NothingToDo
        );
        assert_eq!(ExtractionPlan::compute(&[], &[]), ExtractionPlan::NothingToDo);
    }

    #[test]
    fn test_duplicate_archive_entries_reported_once() {
        let plan = ExtractionPlan::compute(&list(&["A.txt", "B.txt", "B.txt"]), &list(&["A.txt"]));
        assert_eq!(plan, ExtractionPlan::Files(list(&["B.txt"])));
    }

    #[test]
    fn test_duplicate_present_entry_stays_satisfied() {
        let plan = ExtractionPlan::compute(&list(&["A.txt", "A.txt"]), &list(&["A.txt"]));
        assert_eq!(plan, ExtractionPlan::NothingToDo);
    }

    #[test]
    fn test_order_follows_archive() {
        let plan = ExtractionPlan::compute(&list(&["z", "a", "m", "k"]), &list(&["m"]));
        assert_eq!(plan, ExtractionPlan::Files(list(&["z", "a", "k"])));
    }
}
