//! Tests for the rmdir command.

use super::*;
use crate::archive::memory::{MemoryArchive, RmdirCall};
use crate::archive::Library;
use crate::error::{ArchiveError, ResolutionError};
use crate::render::Format;
use crate::resolve::Cwd;
use crate::test_support::{create_test_home, output};
use std::rc::Rc;

struct Fixture {
    archive: Rc<MemoryArchive>,
    library: Library,
    cwd: Cwd,
}

impl Fixture {
    fn new(archive: MemoryArchive) -> Self {
        let archive = Rc::new(archive);
        let mut library = Library::new();
        library.insert(archive.clone());
        Self {
            archive,
            library,
            cwd: Cwd::in_archive("site", "/"),
        }
    }

    fn run(&self, options: RmdirOptions, patterns: &[&str]) -> Vec<Result<RemovalOutcome>> {
        remove_dirs(
            Resolver::new(&self.library, &self.cwd),
            options,
            patterns.iter().copied(),
        )
        .collect()
    }
}

fn standard() -> Fixture {
    Fixture::new(
        MemoryArchive::new("site")
            .with_dirs(&["/foo/child", "/bar/a", "/bar/b", "/empty"])
            .with_file("/bar/notes.txt", "x"),
    )
}

fn calls(fixture: &Fixture) -> Vec<String> {
    fixture
        .archive
        .rmdir_calls()
        .into_iter()
        .map(|c| c.path)
        .collect()
}

#[test]
fn test_literal_pattern_makes_exactly_one_attempt() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["empty"]);

    assert_eq!(outcomes.len(), 1);
    let outcome = outcomes[0].as_ref().unwrap();
    assert!(outcome.is_ok());
    assert_eq!(outcome.path, "/empty");
    assert_eq!(outcome.url, "dat://site/empty");
    assert_eq!(calls(&fixture), vec!["/empty"]);
    assert!(!fixture.archive.exists("/empty"));
}

#[test]
fn test_missing_literal_yields_one_error_outcome() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["nosuch"]);

    assert_eq!(outcomes.len(), 1);
    let outcome = outcomes[0].as_ref().unwrap();
    assert!(matches!(outcome.result, Err(ArchiveError::NotFound(_))));
}

#[test]
fn test_failed_literal_then_glob_matches_in_order() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["foo", "bar/*"]);

    assert_eq!(outcomes.len(), 3);
    let outcomes: Vec<RemovalOutcome> = outcomes.into_iter().map(|o| o.unwrap()).collect();
    assert!(matches!(outcomes[0].result, Err(ArchiveError::NotEmpty(ref p)) if p == "/foo"));
    assert_eq!(outcomes[1].path, "/bar/a");
    assert!(outcomes[1].is_ok());
    assert_eq!(outcomes[2].path, "/bar/b");
    assert!(outcomes[2].is_ok());

    assert!(fixture.archive.exists("/foo/child"));
    assert!(fixture.archive.exists("/bar/notes.txt"));
}

#[test]
fn test_glob_with_no_matches_yields_nothing() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["nosuch/*"]);

    assert!(outcomes.is_empty());
    assert!(calls(&fixture).is_empty());
}

#[test]
fn test_failure_mid_glob_does_not_stop_later_matches_or_patterns() {
    let fixture = Fixture::new(
        MemoryArchive::new("site").with_dirs(&["/logs/a", "/logs/b", "/logs/c", "/tmp"]),
    );
    fixture.archive.deny("/logs/b");

    let outcomes: Vec<RemovalOutcome> = fixture
        .run(RmdirOptions::default(), &["logs/*", "tmp"])
        .into_iter()
        .map(|o| o.unwrap())
        .collect();

    let summary: Vec<(&str, bool)> = outcomes.iter().map(|o| (o.path.as_str(), o.is_ok())).collect();
    assert_eq!(
        summary,
        vec![
            ("/logs/a", true),
            ("/logs/b", false),
            ("/logs/c", true),
            ("/tmp", true),
        ]
    );
    assert!(matches!(
        outcomes[1].result,
        Err(ArchiveError::PermissionDenied(_))
    ));
}

#[test]
fn test_recursive_flag_reaches_every_call() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::from_flags(false, true), &["foo", "bar/*", "empty"]);

    assert!(outcomes.iter().all(|o| o.as_ref().unwrap().is_ok()));
    assert_eq!(
        fixture.archive.rmdir_calls(),
        vec![
            RmdirCall {
                path: "/foo".to_string(),
                recursive: true
            },
            RmdirCall {
                path: "/bar/a".to_string(),
                recursive: true
            },
            RmdirCall {
                path: "/bar/b".to_string(),
                recursive: true
            },
            RmdirCall {
                path: "/empty".to_string(),
                recursive: true
            },
        ]
    );
}

#[test]
fn test_short_flag_is_recursive_too() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::from_flags(true, false), &["foo"]);

    assert!(outcomes[0].as_ref().unwrap().is_ok());
    assert!(fixture.archive.rmdir_calls()[0].recursive);
}

#[test]
fn test_resolution_error_stops_remaining_patterns() {
    let fixture = standard();

    let outcomes = fixture.run(
        RmdirOptions::default(),
        &["empty", "ftp://elsewhere/x", "bar/a"],
    );

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].as_ref().unwrap().is_ok());
    assert!(matches!(
        outcomes[1],
        Err(ShellError::Resolution(ResolutionError::Malformed { .. }))
    ));
    assert_eq!(calls(&fixture), vec!["/empty"]);
    assert!(fixture.archive.exists("/bar/a"));
}

#[test]
fn test_unknown_archive_is_fatal() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["dat://other/x", "empty"]);

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        Err(ShellError::Resolution(ResolutionError::UnknownArchive(_)))
    ));
    assert!(calls(&fixture).is_empty());
}

#[test]
fn test_invalid_glob_is_fatal() {
    let fixture = standard();

    let outcomes = fixture.run(RmdirOptions::default(), &["bar/[a", "empty"]);

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        Err(ShellError::Resolution(ResolutionError::InvalidPattern { .. }))
    ));
}

#[test]
fn test_removals_are_lazy() {
    let fixture = standard();

    let mut removals = remove_dirs(
        Resolver::new(&fixture.library, &fixture.cwd),
        RmdirOptions::default(),
        ["bar/*", "empty"],
    );
    assert!(calls(&fixture).is_empty());

    let first = removals.next().unwrap().unwrap();
    assert_eq!(first.path, "/bar/a");
    assert_eq!(calls(&fixture), vec!["/bar/a"]);

    // Dropping the iterator abandons the rest.
    drop(removals);
    assert!(fixture.archive.exists("/bar/b"));
    assert!(fixture.archive.exists("/empty"));
}

#[test]
fn test_recursive_double_star_skips_removed_subtrees() {
    let fixture = Fixture::new(MemoryArchive::new("site").with_dirs(&["/cache/x/y", "/cache/z"]));

    let outcomes: Vec<RemovalOutcome> = fixture
        .run(RmdirOptions { recursive: true }, &["cache/**"])
        .into_iter()
        .map(|o| o.unwrap())
        .collect();

    let paths: Vec<&str> = outcomes.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, vec!["/cache/x", "/cache/z"]);
    assert!(outcomes.iter().all(RemovalOutcome::is_ok));
}

#[test]
fn test_outcome_rendering() {
    let ok = RemovalOutcome {
        url: "dat://site/a".to_string(),
        path: "/a".to_string(),
        result: Ok(()),
    };
    let err = RemovalOutcome {
        url: "dat://site/<b>".to_string(),
        path: "/<b>".to_string(),
        result: Err(ArchiveError::NotEmpty("/<b>".to_string())),
    };

    assert_eq!(ok.to_text(), "removed dat://site/a");
    assert_eq!(
        err.to_text(),
        "rmdir: dat://site/<b>: directory not empty: /<b>"
    );
    assert_eq!(
        err.to_html(),
        r#"<div class="text-error">rmdir: dat://site/&lt;b&gt;: directory not empty: /&lt;b&gt;</div>"#
    );
}

#[test]
fn test_cmd_rmdir_streams_outcomes_and_succeeds_despite_failures() {
    let (home, mut ctx) = create_test_home();
    ctx.set_cwd(Cwd::in_archive("blog", "/")).unwrap();
    let mut term = Terminal::new(Format::Text, Vec::new());

    let args = RmdirArgs {
        r: false,
        recursive: false,
        patterns: vec!["posts".to_string(), "drafts/*".to_string()],
    };
    cmd_rmdir(&ctx, args, &mut term).unwrap();

    let out = output(term);
    assert_eq!(
        out,
        "rmdir: dat://blog/posts: directory not empty: /posts\n\
         removed dat://blog/drafts/one\n\
         removed dat://blog/drafts/two\n"
    );
    assert!(home.path().join("archives/blog/posts").exists());
    assert!(!home.path().join("archives/blog/drafts/one").exists());
}

#[test]
fn test_cmd_rmdir_propagates_resolution_errors() {
    let (_home, ctx) = create_test_home();
    let mut term = Terminal::new(Format::Text, Vec::new());

    let args = RmdirArgs {
        r: true,
        recursive: false,
        patterns: vec!["posts".to_string()],
    };
    let err = cmd_rmdir(&ctx, args, &mut term).unwrap_err();

    // At home the first segment names an archive.
    assert!(matches!(
        err,
        ShellError::Resolution(ResolutionError::UnknownArchive(ref key)) if key == "posts"
    ));
}
