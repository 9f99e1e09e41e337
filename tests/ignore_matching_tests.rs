//! Ignore rule matching tests
//!
//! Table-driven cases for the .gitignore syntax plus property tests for
//! negation precedence and directory pruning.

use proptest::prelude::*;
use rstest::rstest;
use treemerge::{IgnoreResult, RuleSet};

#[rstest]
#[case::basename_glob("*.log", "a.log", false, true)]
#[case::basename_glob_nested("*.log", "logs/a.log", false, true)]
#[case::suffix_is_not_extension("*.log", "a.log.txt", false, false)]
#[case::leading_slash_anchors("/a.log", "sub/a.log", false, false)]
#[case::leading_slash_root("/a.log", "a.log", false, true)]
#[case::dir_rule_skips_files("build/", "build", false, false)]
#[case::dir_rule_excludes_children("build/", "build/out.txt", false, true)]
#[case::dir_rule_at_depth("build/", "src/build/out.txt", false, true)]
#[case::inner_slash_anchors("doc/*.md", "doc/a.md", false, true)]
#[case::star_stays_in_segment("doc/*.md", "doc/x/a.md", false, false)]
#[case::inner_slash_not_at_depth("foo/bar", "x/foo/bar", false, false)]
#[case::leading_double_star("**/tmp", "a/b/tmp", true, true)]
#[case::middle_double_star("a/**/b", "a/x/y/b", false, true)]
#[case::middle_double_star_zero("a/**/b", "a/b", false, true)]
#[case::question_mark("?.txt", "a.txt", false, true)]
#[case::question_mark_one_char("?.txt", "ab.txt", false, false)]
#[case::class("[abc].rs", "b.rs", false, true)]
#[case::class_miss("[abc].rs", "d.rs", false, false)]
#[case::class_escaped_bracket("[a\\]]x", "]x", false, true)]
#[case::class_escaped_bracket_other_member("[a\\]]x", "bx", false, false)]
#[case::negation("*.log\n!keep.log", "keep.log", false, false)]
#[case::negation_at_depth("*.log\n!keep.log", "sub/keep.log", false, false)]
#[case::negation_under_excluded_dir("logs/\n!logs/keep.log", "logs/keep.log", false, true)]
#[case::exact_name_only("README", "README.md", false, false)]
#[case::case_sensitive("Secret.txt", "secret.txt", false, false)]
#[case::escaped_hash("\\#file", "#file", false, true)]
#[case::trailing_space_stripped("trailing  ", "trailing", false, true)]
#[case::root_only_rule_ignored("/", "anything", false, false)]
#[case::star_excludes_parent("*", "dir/file", false, true)]
#[case::comment_line("# *.txt", "a.txt", false, false)]
fn pattern_cases(
    #[case] rules: &str,
    #[case] path: &str,
    #[case] is_dir: bool,
    #[case] ignored: bool,
) {
    let set = RuleSet::compile(rules);
    assert_eq!(
        set.is_ignored(path, is_dir),
        ignored,
        "rules {:?} on {:?} (dir: {})",
        rules,
        path,
        is_dir
    );
}

#[test]
fn test_matched_reports_deciding_rule() {
    let set = RuleSet::compile("*.tmp\nscratch/\n");

    assert_eq!(
        set.matched("a.tmp", false),
        IgnoreResult::Ignored("'*.tmp' (line 1)".to_string())
    );
    assert_eq!(set.matched("a.txt", false), IgnoreResult::Included);
}

#[test]
fn test_rule_metadata() {
    let set = RuleSet::compile("!/out/\n");
    let rule = &set.rules()[0];

    assert!(rule.is_negated());
    assert!(rule.is_anchored);
    assert!(rule.directory_only);
    assert_eq!(rule.line, 1);
}

fn name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

proptest! {
    #[test]
    fn prop_later_negation_reincludes(stem in name(), other in name()) {
        prop_assume!(stem != other);
        let set = RuleSet::compile(&format!("*.log\n!{}.log\n", stem));

        let kept = format!("{}.log", stem);
        let dropped = format!("{}.log", other);
        prop_assert!(!set.is_ignored(&kept, false));
        prop_assert!(set.is_ignored(&dropped, false));
    }

    #[test]
    fn prop_excluded_directory_wins_over_file_negation(dir in name(), file in name()) {
        let rules = format!("{dir}/\n!{file}.txt\n!{dir}/{file}.txt\n!**/{file}.txt\n");
        let set = RuleSet::compile(&rules);

        let direct = format!("{dir}/{file}.txt");
        let nested = format!("{dir}/inner/{file}.txt");
        prop_assert!(set.is_ignored(&direct, false));
        prop_assert!(set.is_ignored(&nested, false));
    }

    #[test]
    fn prop_empty_rules_include_everything(segments in prop::collection::vec(name(), 1..5), is_dir in any::<bool>()) {
        let set = RuleSet::compile("");
        prop_assert!(!set.is_ignored(segments.join("/"), is_dir));
    }
}
