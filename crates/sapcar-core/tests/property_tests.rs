//! Property-based tests for the extraction decision.
//!
//! These tests use proptest to generate archive and destination listings and
//! verify the set relations the decision must respect.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use sapcar_core::Context;
use sapcar_core::ExtractedArgs;
use sapcar_core::ExtractionPlan;
use sapcar_core::Identity;
use sapcar_core::SapcarConfig;
use sapcar_core::StateStatus;
use sapcar_core::extracted;
use sapcar_core::listing::parse_list_output;
use sapcar_core::test_utils::ScriptedRunner;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

const NAME: &str = "[a-z]{1,8}\\.(txt|so|SMF)";

fn names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(NAME, 0..12)
}

/// An archive listing plus a destination holding a non-empty proper subset
/// of it and unrelated files.
fn partial_overlap() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (prop::collection::btree_set(NAME, 2..12), names())
        .prop_flat_map(|(archive, extra)| {
            let archive: Vec<String> = archive.into_iter().collect();
            let len = archive.len();
            (
                Just(archive.clone()),
                prop::sample::subsequence(archive, 1..len),
                Just(extra),
            )
        })
        .prop_map(|(archive, present, extra)| {
            let mut disk = present;
            disk.extend(extra.into_iter().filter(|e| !archive.contains(e)));
            (archive, disk)
        })
}

proptest! {
    /// A ⊆ D yields no work.
    #[test]
    fn prop_subset_is_noop(archive in names(), extra in names()) {
        let archive: Vec<String> = archive.into_iter().collect();
        let mut disk = archive.clone();
        disk.extend(extra);
        prop_assert_eq!(ExtractionPlan::compute(&archive, &disk), ExtractionPlan::NothingToDo);
    }

    /// A ∩ D = ∅ with A non-empty extracts everything.
    #[test]
    fn prop_disjoint_extracts_everything(archive in names(), disk in names()) {
        prop_assume!(!archive.is_empty());
        let disk: Vec<String> = disk.difference(&archive).cloned().collect();
        let archive: Vec<String> = archive.into_iter().collect();
        prop_assert_eq!(ExtractionPlan::compute(&archive, &disk), ExtractionPlan::Everything);
    }

    /// A partial overlap yields exactly A \ D, in archive order.
    #[test]
    fn prop_partial_overlap_is_difference((archive, disk) in partial_overlap()) {
        let expected: Vec<String> = archive.iter().filter(|a| !disk.contains(a)).cloned().collect();
        prop_assert!(!expected.is_empty() && expected.len() < archive.len());
        prop_assert_eq!(ExtractionPlan::compute(&archive, &disk), ExtractionPlan::Files(expected));
    }

    /// Every listed member survives parsing regardless of column padding.
    #[test]
    fn prop_listing_keeps_last_column(
        members in prop::collection::vec("[A-Za-z0-9_./+-]{1,20}", 0..10),
        pad in 1usize..12,
    ) {
        let mut out = String::from("SAPCAR: processing archive x.sar (version 2.01)\n");
        for m in &members {
            out.push_str(&format!("-rw-r--r--{}5006{}18 Sep 2020 11:58 {m}\n", " ".repeat(pad), " ".repeat(pad)));
        }
        prop_assert_eq!(parse_list_output(&out), members);
    }

    /// Dry runs never extract and report unknown whenever work is pending.
    #[test]
    fn prop_dry_run_never_extracts(archive in names(), disk in names()) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let sar = temp.path().join("a.sar");
        fs::write(&sar, "x").unwrap();
        let dest = temp.path().join("out");
        fs::create_dir(&dest).unwrap();
        for file in &disk {
            fs::write(dest.join(file), "x").unwrap();
        }

        let mut stdout = String::from("banner\n");
        for m in &archive {
            stdout.push_str(&format!("-rw-r--r-- 1 18 Sep 2020 11:58 {m}\n"));
        }
        let ctx = Context::new(SapcarConfig::default(), ScriptedRunner::new().then_ok(stdout), Identity::new("root", "root"))
            .with_dry_run(true);
        let args = ExtractedArgs { output_dir: Some(dest), ..ExtractedArgs::new(&sar) };

        let ret = extracted(&ctx, &args).unwrap();

        prop_assert_eq!(ctx.runner.extract_calls(), 0);
        if archive.is_subset(&disk) {
            prop_assert_eq!(ret.result, StateStatus::Success);
        } else {
            prop_assert_eq!(ret.result, StateStatus::Unknown);
        }
    }
}
