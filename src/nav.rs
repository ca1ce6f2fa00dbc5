// SPDX-License-Identifier: GPL-3.0-or-later
//! Navigation titles: the navigation forest, loading it from an mkdocs-style
//! YAML configuration, and checking or fixing its titles.

use serde_yaml::{Mapping, Value};

use crate::Error;
use crate::casing::TitleCaser;
use crate::report::{Diagnostic, Mode, Outcome};

/// A node of the navigation forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    /// A titled group of child items.
    Section { title: String, children: Vec<NavItem> },
    /// A documentation page; untitled pages take their title from content.
    Page { title: Option<String>, path: String },
    /// An external link.
    Link { title: Option<String>, url: String },
}

impl NavItem {
    pub fn title(&self) -> Option<&str> {
        match self {
            NavItem::Section { title, .. } => Some(title),
            NavItem::Page { title, .. } | NavItem::Link { title, .. } => title.as_deref(),
        }
    }
}

/// Check or fix every title of a navigation forest.
///
/// Items are numbered in traversal order starting at `start_line`: a
/// section's children first, then the section itself. Each item uses one
/// number whether or not it has a title.
pub fn process_nav(
    items: &[NavItem],
    caser: &TitleCaser,
    mode: Mode,
    start_line: usize,
    location: Option<&str>,
) -> Result<Outcome<Vec<NavItem>>, Error> {
    let mut pass = NavPass {
        caser,
        mode,
        location,
        diagnostics: Vec::new(),
    };
    let mut line = start_line;
    let mut fixed = Vec::with_capacity(items.len());
    for item in items {
        let (out, next) = pass.traverse(item, line)?;
        fixed.push(out);
        line = next;
    }
    Ok(match mode {
        Mode::Warn => Outcome::Diagnostics(pass.diagnostics),
        Mode::Fix => Outcome::Fixed(fixed),
    })
}

struct NavPass<'a> {
    caser: &'a TitleCaser,
    mode: Mode,
    location: Option<&'a str>,
    diagnostics: Vec<Diagnostic>,
}

impl NavPass<'_> {
    /// Returns the processed item and the number of the next item.
    fn traverse(&mut self, item: &NavItem, line: usize) -> Result<(NavItem, usize), Error> {
        let out = match item {
            NavItem::Section { title, children } => {
                let mut line = line;
                let mut out_children = Vec::with_capacity(children.len());
                for child in children {
                    let (out, next) = self.traverse(child, line)?;
                    out_children.push(out);
                    line = next;
                }
                let title = self.title(Some(title.as_str()), line)?.unwrap_or_default();
                let section = NavItem::Section {
                    title,
                    children: out_children,
                };
                return Ok((section, line + 1));
            }
            NavItem::Page { title, path } => NavItem::Page {
                title: self.title(title.as_deref(), line)?,
                path: path.clone(),
            },
            NavItem::Link { title, url } => NavItem::Link {
                title: self.title(title.as_deref(), line)?,
                url: url.clone(),
            },
        };
        Ok((out, line + 1))
    }

    fn title(&mut self, title: Option<&str>, line: usize) -> Result<Option<String>, Error> {
        let Some(title) = title else {
            return Ok(None);
        };
        let proposed = self.caser.to_title_case(title)?;
        match self.mode {
            Mode::Warn => {
                if title != proposed {
                    self.diagnostics.push(Diagnostic {
                        location: self.location.map(str::to_string),
                        line_number: Some(line),
                        original: title.to_string(),
                        proposed,
                    });
                }
                Ok(Some(title.to_string()))
            }
            Mode::Fix => Ok(Some(proposed)),
        }
    }
}

/// Line number of the first navigation entry: the line after the first line
/// starting with `nav:`, counted from 1.
pub fn nav_start_line(config_text: &str) -> Option<usize> {
    config_text
        .lines()
        .enumerate()
        .find(|(_, line)| line.starts_with("nav:"))
        .map(|(index, _)| index + 2)
}

/// Read the `nav` entry of an mkdocs-style YAML configuration.
///
/// A configuration without `nav` yields an empty forest.
pub fn load_nav(config_text: &str) -> Result<Vec<NavItem>, Error> {
    let config: Value = serde_yaml::from_str(config_text)?;
    match config.get("nav") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(entries)) => entries.iter().map(nav_item).collect(),
        Some(other) => Err(Error::InvalidNav(format!(
            "expected a list, found {}",
            describe(other)
        ))),
    }
}

fn nav_item(entry: &Value) -> Result<NavItem, Error> {
    match entry {
        Value::String(path) => Ok(NavItem::Page {
            title: None,
            path: path.clone(),
        }),
        Value::Mapping(mapping) if mapping.len() == 1 => {
            let Some((key, value)) = mapping.iter().next() else {
                return Err(Error::InvalidNav("empty entry".to_string()));
            };
            let title = key
                .as_str()
                .ok_or_else(|| {
                    Error::InvalidNav(format!("title must be a string, found {}", describe(key)))
                })?
                .to_string();
            match value {
                Value::String(target) if is_link(target) => Ok(NavItem::Link {
                    title: Some(title),
                    url: target.clone(),
                }),
                Value::String(target) => Ok(NavItem::Page {
                    title: Some(title),
                    path: target.clone(),
                }),
                Value::Sequence(children) => Ok(NavItem::Section {
                    title,
                    children: children.iter().map(nav_item).collect::<Result<_, _>>()?,
                }),
                other => Err(Error::InvalidNav(format!(
                    "entry \"{}\" must be a path or a list, found {}",
                    title,
                    describe(other)
                ))),
            }
        }
        other => Err(Error::InvalidNav(format!(
            "expected a path or a single-key mapping, found {}",
            describe(other)
        ))),
    }
}

fn is_link(target: &str) -> bool {
    target.contains("://") || target.starts_with("mailto:") || target.starts_with('/')
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Render a navigation forest as a YAML `nav` entry.
pub fn nav_to_yaml(items: &[NavItem]) -> Result<String, Error> {
    let mut root = Mapping::new();
    root.insert(
        Value::from("nav"),
        Value::Sequence(items.iter().map(nav_value).collect()),
    );
    Ok(serde_yaml::to_string(&Value::Mapping(root))?)
}

fn nav_value(item: &NavItem) -> Value {
    let (title, value) = match item {
        NavItem::Section { title, children } => (
            Some(title.as_str()),
            Value::Sequence(children.iter().map(nav_value).collect()),
        ),
        NavItem::Page { title, path } => (title.as_deref(), Value::from(path.as_str())),
        NavItem::Link { title, url } => (title.as_deref(), Value::from(url.as_str())),
    };
    match title {
        Some(title) => {
            let mut entry = Mapping::new();
            entry.insert(Value::from(title), value);
            Value::Mapping(entry)
        }
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: Option<&str>) -> NavItem {
        NavItem::Page {
            title: title.map(str::to_string),
            path: String::new(),
        }
    }

    fn section(title: &str, children: Vec<NavItem>) -> NavItem {
        NavItem::Section {
            title: title.to_string(),
            children,
        }
    }

    fn link(title: &str) -> NavItem {
        NavItem::Link {
            title: Some(title.to_string()),
            url: String::new(),
        }
    }

    fn nav(titles: [&str; 10]) -> Vec<NavItem> {
        let [p1, p2, p3, p4, p5, p6, s1, s2, s3, s4] = titles;
        vec![
            page(Some(p1)),
            section(s1, vec![page(Some(p2)), page(Some(p3))]),
            section(
                s2,
                vec![section(s3, vec![section(s4, vec![page(Some(p4))])]), page(Some(p5))],
            ),
            page(Some(p6)),
            section("", vec![page(None)]),
            link("link"),
            link(""),
        ]
    }

    fn lower_nav() -> Vec<NavItem> {
        nav([
            "page 1",
            "section 1 page 2",
            "section 1 page 3",
            "section 2 section 3 section 4 page 4",
            "section 2 page 5",
            "page 6",
            "section 1",
            "section 2",
            "section 3",
            "section 4",
        ])
    }

    #[test]
    fn test_fix_nav() {
        let outcome = process_nav(&lower_nav(), &TitleCaser::default(), Mode::Fix, 0, None).unwrap();
        let mut expected = nav([
            "Page 1",
            "Section 1 Page 2",
            "Section 1 Page 3",
            "Section 2 Section 3 Section 4 Page 4",
            "Section 2 Page 5",
            "Page 6",
            "Section 1",
            "Section 2",
            "Section 3",
            "Section 4",
        ]);
        expected[5] = link("Link");
        assert_eq!(outcome, Outcome::Fixed(expected));
    }

    #[test]
    fn test_warn_nav() {
        let outcome = process_nav(&lower_nav(), &TitleCaser::default(), Mode::Warn, 0, None).unwrap();
        let messages: Vec<String> = outcome.diagnostics().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                r#"(0): Heading "page 1" should be "Page 1"."#,
                r#"(1): Heading "section 1 page 2" should be "Section 1 Page 2"."#,
                r#"(2): Heading "section 1 page 3" should be "Section 1 Page 3"."#,
                r#"(3): Heading "section 1" should be "Section 1"."#,
                r#"(4): Heading "section 2 section 3 section 4 page 4" should be "Section 2 Section 3 Section 4 Page 4"."#,
                r#"(5): Heading "section 4" should be "Section 4"."#,
                r#"(6): Heading "section 3" should be "Section 3"."#,
                r#"(7): Heading "section 2 page 5" should be "Section 2 Page 5"."#,
                r#"(8): Heading "section 2" should be "Section 2"."#,
                r#"(9): Heading "page 6" should be "Page 6"."#,
                r#"(12): Heading "link" should be "Link"."#,
            ]
        );
    }

    #[test]
    fn test_warn_nav_with_location_and_offset() {
        let items = vec![page(Some("getting started"))];
        let outcome =
            process_nav(&items, &TitleCaser::default(), Mode::Warn, 12, Some("mkdocs.yml")).unwrap();
        assert_eq!(
            outcome.diagnostics()[0].to_string(),
            r#"mkdocs.yml: (12): Heading "getting started" should be "Getting Started"."#
        );
    }

    #[test]
    fn test_fix_nav_is_idempotent() {
        let caser = TitleCaser::default();
        let once = process_nav(&lower_nav(), &caser, Mode::Fix, 0, None)
            .unwrap()
            .fixed()
            .unwrap();
        let twice = process_nav(&once, &caser, Mode::Fix, 0, None)
            .unwrap()
            .fixed()
            .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nav_start_line() {
        let config = "site_name: Docs\ntheme: material\nnav:\n  - index.md\n";
        assert_eq!(nav_start_line(config), Some(4));
        assert_eq!(nav_start_line("site_name: Docs\n"), None);
        // Indented keys belong to other mappings.
        assert_eq!(nav_start_line("plugins:\n  nav: x\n"), None);
    }

    #[test]
    fn test_load_nav() {
        let config = r#"
site_name: Docs
nav:
  - index.md
  - getting started: start.md
  - user guide:
      - the basics: guide/basics.md
      - faq: guide/faq.md
  - issue tracker: https://example.com/issues
"#;
        let items = load_nav(config).unwrap();
        assert_eq!(
            items,
            vec![
                NavItem::Page {
                    title: None,
                    path: "index.md".to_string()
                },
                NavItem::Page {
                    title: Some("getting started".to_string()),
                    path: "start.md".to_string()
                },
                NavItem::Section {
                    title: "user guide".to_string(),
                    children: vec![
                        NavItem::Page {
                            title: Some("the basics".to_string()),
                            path: "guide/basics.md".to_string()
                        },
                        NavItem::Page {
                            title: Some("faq".to_string()),
                            path: "guide/faq.md".to_string()
                        },
                    ],
                },
                NavItem::Link {
                    title: Some("issue tracker".to_string()),
                    url: "https://example.com/issues".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_load_nav_without_nav() {
        assert!(load_nav("site_name: Docs\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_nav_invalid() {
        assert!(matches!(load_nav("nav: index.md\n"), Err(Error::InvalidNav(_))));
        assert!(matches!(load_nav("nav:\n  - 3\n"), Err(Error::InvalidNav(_))));
        assert!(matches!(load_nav("nav: [\n"), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_nav_yaml_round_trip() {
        let config = "nav:\n- index.md\n- Guide:\n  - Setup: setup.md\n- Issues: https://example.com\n";
        let items = load_nav(config).unwrap();
        let yaml = nav_to_yaml(&items).unwrap();
        assert_eq!(load_nav(&yaml).unwrap(), items);
    }
}
