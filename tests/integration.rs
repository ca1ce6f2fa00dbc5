//! Integration tests for heading checks through the public API.

use titlecasing::{
    CapitalizationType, DocumentKind, ExceptionTable, Mode, NavItem, Outcome, TitleCaser,
    load_nav, process_document, process_markdown, process_nav, process_page_content, resolve,
};

fn caser_with(terms: &[&str]) -> TitleCaser {
    TitleCaser::new(
        CapitalizationType::Title,
        ExceptionTable::new(terms.iter().copied()).unwrap(),
    )
}

/// Test that fixing is idempotent (fixing twice produces same result).
#[test]
fn test_idempotent_markdown_fix() {
    let input = r#"# using the faq

Some text with `code`.

## installing `echo` on an ipad

~~~~ sh
# keep this comment
~~~~

### why (`echo`) matters
"#;

    let caser = caser_with(&["FAQ", "`echo`", "iPad"]);
    let first_pass = process_markdown(input, &caser, Mode::Fix, None)
        .unwrap()
        .fixed()
        .unwrap();
    let second_pass = process_markdown(&first_pass, &caser, Mode::Fix, None)
        .unwrap()
        .fixed()
        .unwrap();

    assert_eq!(first_pass, second_pass, "Fixing should be idempotent");
    assert_eq!(
        first_pass,
        r#"# Using the FAQ

Some text with `code`.

## Installing `echo` on an iPad

~~~~ sh
# keep this comment
~~~~

### Why (`echo`) Matters
"#
    );
}

/// A fixed document produces no diagnostics.
#[test]
fn test_fixed_markdown_has_no_diagnostics() {
    let caser = caser_with(&["FAQ"]);
    let fixed = process_markdown("# the faq\n## more faq\n", &caser, Mode::Fix, None)
        .unwrap()
        .fixed()
        .unwrap();
    let outcome = process_markdown(&fixed, &caser, Mode::Warn, None).unwrap();
    assert!(outcome.diagnostics().is_empty());
}

#[test]
fn test_exception_asymmetry_end_to_end() {
    let caser = caser_with(&["`echo`"]);
    let outcome = process_markdown(
        "# echo and `echo` and (`echo`)\n",
        &caser,
        Mode::Warn,
        Some("guide.md"),
    )
    .unwrap();
    let messages: Vec<String> = outcome.diagnostics().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            r#"guide.md: (1): Heading "echo and `echo` and (`echo`)" should be "Echo and `echo` and (`echo`)"."#
        ]
    );
}

#[test]
fn test_resolve_examples() {
    let table = ExceptionTable::new(["FAQ", "`echo`"]).unwrap();
    assert_eq!(resolve(&table, "echo").unwrap(), None);
    assert_eq!(resolve(&table, "`echo`").unwrap().as_deref(), Some("`echo`"));
    assert_eq!(resolve(&table, "(`echo`)").unwrap().as_deref(), Some("(`echo`)"));
    assert_eq!(resolve(&table, "Faq").unwrap().as_deref(), Some("FAQ"));
    assert_eq!(resolve(&table, "(FAQ)").unwrap().as_deref(), Some("(FAQ)"));
    assert_eq!(resolve(&table, "cat").unwrap(), None);
}

#[test]
fn test_rendered_page_round_trip() {
    let html = r##"<h1 id="intro">intro to <code>mv</code> &amp; friends<a class="headerlink" href="#intro">&para;</a></h1>
<p>body text</p>
<h2 id="faq">faq</h2>
"##;
    let caser = caser_with(&["`mv`", "FAQ"]);

    let warned = process_page_content(html, &caser, Mode::Warn, Some("intro.md")).unwrap();
    let messages: Vec<String> = warned.diagnostics().iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            r#"intro.md: Heading "intro to `mv` & friends" should be "Intro to `mv` & Friends"."#,
            r#"intro.md: Heading "faq" should be "FAQ"."#,
        ]
    );

    let fixed = process_page_content(html, &caser, Mode::Fix, None)
        .unwrap()
        .fixed()
        .unwrap();
    assert_eq!(
        fixed,
        r##"<h1 id="intro">Intro to <code>mv</code> &amp; Friends<a class="headerlink" href="#intro">&para;</a></h1>
<p>body text</p>
<h2 id="faq">FAQ</h2>
"##
    );
}

#[test]
fn test_nav_from_yaml() {
    let config = r#"site_name: Docs
nav:
  - index.md
  - getting started: start.md
  - reference:
      - the api: api.md
"#;
    let items = load_nav(config).unwrap();
    let titles: Vec<Option<&str>> = items.iter().map(NavItem::title).collect();
    assert_eq!(titles, vec![None, Some("getting started"), Some("reference")]);

    let caser = caser_with(&["API"]);
    let fixed = process_nav(&items, &caser, Mode::Fix, 3, None)
        .unwrap()
        .fixed()
        .unwrap();
    let NavItem::Section { title, children } = &fixed[2] else {
        panic!("expected a section");
    };
    assert_eq!(title, "Reference");
    assert_eq!(children[0].title(), Some("The API"));
}

#[test]
fn test_first_letter_document() {
    let caser = TitleCaser::new(
        CapitalizationType::FirstLetter,
        ExceptionTable::new(["iPad"]).unwrap(),
    );
    let outcome =
        process_document("# setting up the ipad\n", DocumentKind::Markdown, &caser, Mode::Fix, None)
            .unwrap();
    assert_eq!(outcome, Outcome::Fixed("# Setting Up The iPad\n".to_string()));
}
