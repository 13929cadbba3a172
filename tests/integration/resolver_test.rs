//! Resolver behavior through the public library surface

use jyt::{resolve, Destination, RawOptions, Representation, ResolveDefaults, Source};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

fn touch(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn infers_both_types_from_extensions() {
    let dir = tempdir().unwrap();
    let src = touch(&dir, "a.yaml", "x: 1\n");

    let opts = resolve(
        RawOptions::new()
            .src(Source::file(&src))
            .dest(Destination::file(dir.path().join("b.json"))),
        &ResolveDefaults::default(),
    )
    .unwrap();

    assert_eq!(opts.origin, Representation::Yaml);
    assert_eq!(opts.target, Representation::Json);
}

#[test]
fn falls_back_to_defaults_for_unknown_extensions() {
    let dir = tempdir().unwrap();
    let src = touch(&dir, "a.unknownext", "x: 1\n");

    let opts = resolve(
        RawOptions::new()
            .src(Source::file(&src))
            .dest(Destination::file(dir.path().join("b.unknownext"))),
        &ResolveDefaults::default(),
    )
    .unwrap();

    assert_eq!(opts.origin, Representation::Yaml);
    assert_eq!(opts.target, Representation::Js);
}

#[test]
fn custom_defaults_record_is_honored() {
    let dir = tempdir().unwrap();
    let src = touch(&dir, "a.unknownext", "{}");

    let defaults = ResolveDefaults {
        origin: Representation::Json,
        target: Representation::Yaml,
        indent: 4,
        ..ResolveDefaults::default()
    };
    let opts = resolve(RawOptions::new().src(Source::file(&src)), &defaults).unwrap();

    assert_eq!(opts.origin, Representation::Json);
    assert_eq!(opts.target, Representation::Yaml);
    assert_eq!(opts.indent, 4);
}

#[test]
fn ambiguous_streams_default_silently_on_both_ends() {
    // no explicit types, no attached paths: never a hard failure
    let opts = resolve(
        RawOptions::new()
            .src(Source::stream(std::io::empty()))
            .dest(Destination::stream(Vec::new())),
        &ResolveDefaults::default(),
    )
    .unwrap();

    assert_eq!(opts.origin, Representation::Yaml);
    assert_eq!(opts.target, Representation::Js);
}

#[test]
fn reports_every_violation_at_once() {
    let err = resolve(
        RawOptions::new()
            .origin("xml")
            .target("ini")
            .indent(99)
            .imports("1bad")
            .exports("also bad"),
        &ResolveDefaults::default(),
    )
    .unwrap_err();

    let mut fields = err.fields();
    fields.sort_unstable();
    assert_eq!(
        fields,
        vec!["exports", "imports", "indent", "origin", "src", "target"]
    );
}

#[test]
fn indent_boundaries_are_inclusive() {
    let dir = tempdir().unwrap();
    let src = touch(&dir, "a.yaml", "x: 1\n");

    for (indent, ok) in [(-1, false), (0, true), (8, true), (9, false)] {
        let result = resolve(
            RawOptions::new().src(Source::file(&src)).indent(indent),
            &ResolveDefaults::default(),
        );
        assert_eq!(result.is_ok(), ok, "indent {} expected ok={}", indent, ok);
    }
}

#[test]
fn canonical_options_need_no_further_checking() {
    let dir = tempdir().unwrap();
    let src = touch(&dir, "in.yml", "x: 1\n");

    let opts = resolve(
        RawOptions::new()
            .src(Source::file(&src))
            .target("json")
            .exports("cfg")
            .force(true),
        &ResolveDefaults::default(),
    )
    .unwrap();

    // everything resolved, defaulted, and consistent
    assert_eq!(opts.origin, Representation::Yaml);
    assert_eq!(opts.target, Representation::Json);
    assert_eq!(opts.indent, 2);
    assert!(opts.force);
    assert_eq!(
        opts.dest.as_ref().and_then(|d| d.path()),
        Some(dir.path().join("in.json").as_path())
    );
}
