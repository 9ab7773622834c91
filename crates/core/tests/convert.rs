use ghmdx_core::{ConvertError, ConvertOptions, Converter, transform_markdown_to_mdx};

#[test]
fn converts_tip_alert_end_to_end() {
    let out = transform_markdown_to_mdx("# Hi\n\n> [!TIP]\nDo the thing.\n", "d", None)
        .expect("conversion should succeed");

    assert_eq!(
        out,
        "---\ntitle: \"Hi\"\ndescription: \"d\"\npagefind: true\n---\n\n:::tip\nDo the thing.\n:::\n"
    );
}

#[test]
fn warning_alert_becomes_caution() {
    let source = "# Setup\n\n> [!WARNING]\n> Back up `~/.config` first.\n\nDone.\n";
    let out = transform_markdown_to_mdx(source, "Install guide", None).unwrap();

    insta::assert_snapshot!(out, @r#"
    ---
    title: "Setup"
    description: "Install guide"
    pagefind: true
    ---

    :::caution
    Back up `~/.config` first.
    :::

    Done.
    "#);
}

#[test]
fn unrecognized_alerts_stay_blockquotes() {
    let out = transform_markdown_to_mdx("> [!BOGUS]\n> Nope.\n\n> [!IMPORTANT]\n> Read.\n", "d", None)
        .unwrap();

    insta::assert_snapshot!(out, @r#"
    ---
    title: "Default Title"
    description: "d"
    pagefind: true
    ---

    > \[!BOGUS]
    > Nope.

    > \[!IMPORTANT]
    > Read.
    "#);
    assert!(!out.contains(":::"));
}

#[test]
fn pagefind_flag_is_honored() {
    let out = transform_markdown_to_mdx("# T\n", "", Some(false)).unwrap();
    assert_eq!(
        out,
        "---\ntitle: \"T\"\ndescription: \"\"\npagefind: false\n---\n\n"
    );
}

#[test]
fn angle_brackets_in_prose_survive_mdx() {
    let out = transform_markdown_to_mdx("# Types\n\nUse Vec<T> here.\n", "d", None).unwrap();
    assert!(out.ends_with("\n\nUse Vec\\<T> here.\n"), "{out}");
}

#[test]
fn fenced_code_and_diagrams_pass_through() {
    let source = "```rust\nlet v: Vec<u8> = vec![];\n```\n\n```mermaid\ngraph LR\n  A --> B\n```\n";
    let out = transform_markdown_to_mdx(source, "d", None).unwrap();
    assert!(out.contains("```rust\nlet v: Vec<u8> = vec![];\n```"), "{out}");
    assert!(out.contains("```mermaid\ngraph LR\n  A --> B\n```"), "{out}");
}

#[test]
fn tool_comments_are_removed() {
    let source = "<!-- vale off -->\n# Title\n\nText.\n<!-- vale on -->\n<!-- generated by git-cliff -->\n";
    let out = transform_markdown_to_mdx(source, "d", None).unwrap();
    assert!(out.starts_with("---\ntitle: \"Title\"\n"));
    assert!(out.ends_with("---\n\nText.\n"), "{out}");
    assert!(!out.contains("vale"));
}

#[test]
fn backslashes_are_removed_from_text() {
    let out = transform_markdown_to_mdx("Use a\\\\b.\n", "d", None).unwrap();
    assert!(out.ends_with("\n\nUse ab.\n"), "{out}");
}

#[test]
fn only_the_first_title_is_taken() {
    let out = transform_markdown_to_mdx("# One\n\n# Two\n", "d", None).unwrap();
    assert!(out.starts_with("---\ntitle: \"One\"\n"));
    assert!(out.ends_with("\n\n# Two\n"), "{out}");
}

#[test]
fn mdx_parse_failures_propagate() {
    let err = transform_markdown_to_mdx("Compare a < 3 items.\n", "d", None).unwrap_err();
    match err {
        ConvertError::Parse { location, .. } => assert_eq!(location.line, 1),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn converter_options_from_json() {
    let options =
        ConvertOptions::from_json(r#"{"pagefind": false, "diagramLanguages": ["d2"]}"#).unwrap();
    let converter = Converter::new(options);

    let out = converter
        .convert("```d2\nx -> y\n```\n\nx -> y\n", "d")
        .unwrap();
    assert!(out.contains("pagefind: false"));
    assert!(out.contains("```d2\nx -> y\n```"), "{out}");
    assert!(out.ends_with("\n\nx -> y\n"), "{out}");
}

#[test]
fn trailing_hash_in_heading_survives() {
    let out = transform_markdown_to_mdx("## C \\#\n", "d", None).unwrap();
    assert!(out.ends_with("\n\n## C \\#\n"), "{out}");
}

#[test]
fn closing_bracket_in_link_text_keeps_the_link() {
    let out = transform_markdown_to_mdx("[a\\]b](http://x)\n", "d", None).unwrap();
    assert!(out.ends_with("\n\n[a\\]b](http://x)\n"), "{out}");
}
