// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default [`Parser`] implementation.

use std::{mem, path::PathBuf};

use lazy_regex::regex_captures;

use crate::{
    element::merge_tags,
    feature::DEFAULT_LANGUAGE,
    filter::Candidate,
    Error, Feature, Filter, Parser, Result,
};

/// Default [`Parser`], backed by the [`gherkin`] crate.
///
/// The parsed [`gherkin::Feature`] tree is replayed declaration by declaration
/// into a [`Feature`]:
/// 1. the [`Background`];
/// 2. the top-level [`Scenario`]s;
/// 3. the [`Rule`]s, each with its own [`Background`] (if any) going first.
///
/// A [`Rule`] [`Background`] runs after the [`Feature`] one, so both are
/// declared as a single [`Background`]. After a [`Rule`] with its own
/// [`Background`], the next [`Rule`] not having any gets the [`Feature`]
/// one declared again, or no [`Background`] at all.
///
/// [`Background`]: gherkin::Background
/// [`Rule`]: gherkin::Rule
/// [`Scenario`]: gherkin::Scenario
#[derive(Clone, Copy, Debug, Default)]
pub struct Basic;

impl Parser for Basic {
    fn parse(
        &self,
        uri: &str,
        content: &str,
        filters: &[Filter],
    ) -> Result<Feature> {
        let mut doc =
            gherkin::Feature::parse(content, gherkin::GherkinEnv::default())
                .map_err(|e| Error::parse(uri, e))?;
        doc.path = Some(PathBuf::from(uri));

        let background = doc.background.take();
        let scenarios = mem::take(&mut doc.scenarios);
        let rules = mem::take(&mut doc.rules);

        let mut feature = Feature::new(uri, doc)
            .with_language(language(content).unwrap_or(DEFAULT_LANGUAGE));

        if let Some(bg) = &background {
            declare_background(&mut feature, bg.clone())?;
        }
        for sc in scenarios {
            declare(&mut feature, sc, filters)?;
        }

        let mut overridden = false;
        for rule in rules {
            match (rule.background, &background) {
                (Some(mut own), inherited) => {
                    if let Some(bg) = inherited {
                        own.steps =
                            bg.steps.iter().cloned().chain(own.steps).collect();
                    }
                    declare_background(&mut feature, own)?;
                    overridden = true;
                }
                (None, inherited) if overridden => {
                    match inherited {
                        Some(bg) => {
                            declare_background(&mut feature, bg.clone())?;
                        }
                        None => feature.clear_background(),
                    }
                    overridden = false;
                }
                (None, _) => {}
            }
            for mut sc in rule.scenarios {
                sc.tags = merge_tags(&rule.tags, &sc.tags);
                declare(&mut feature, sc, filters)?;
            }
        }

        tracing::debug!(
            uri,
            elements = feature.elements().len(),
            language = feature.language(),
            "feature parsed",
        );
        Ok(feature)
    }
}

/// Declares the given [`Background`] along with its [`Step`]s.
///
/// [`Background`]: gherkin::Background
/// [`Step`]: gherkin::Step
fn declare_background(
    feature: &mut Feature,
    mut background: gherkin::Background,
) -> Result<()> {
    let steps = mem::take(&mut background.steps);
    feature.on_background(background)?;
    for step in steps {
        feature.on_step(step)?;
    }
    Ok(())
}

/// Declares the given [`Scenario`] with its [`Step`]s and [`Examples`], unless
/// it's excluded by the `filters`.
///
/// A [`Scenario`] with [`Examples`] is declared as an outline, keeping only
/// the [`Examples`] satisfying the `filters`. An outline left without any
/// [`Examples`] is excluded altogether.
///
/// [`Examples`]: gherkin::Examples
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
fn declare(
    feature: &mut Feature,
    mut scenario: gherkin::Scenario,
    filters: &[Filter],
) -> Result<()> {
    let tags = merge_tags(&feature.header().tags, &scenario.tags);
    let steps = mem::take(&mut scenario.steps);
    let examples = mem::take(&mut scenario.examples);

    if examples.is_empty() {
        let candidate = Candidate {
            name: &scenario.name,
            tags: &tags,
            lines: &[scenario.position.line],
        };
        if !Filter::all(filters, &candidate) {
            tracing::trace!(name = %scenario.name, "scenario filtered out");
            return Ok(());
        }
        feature.on_scenario(scenario)?;
    } else {
        let examples = examples
            .into_iter()
            .filter(|ex| {
                let tags = merge_tags(&tags, &ex.tags);
                let lines = [scenario.position.line, ex.position.line]
                    .into_iter()
                    .chain(ex.table.iter().flat_map(|t| {
                        (1..t.rows.len()).map(move |n| t.position.line + n)
                    }))
                    .collect::<Vec<_>>();
                Filter::all(
                    filters,
                    &Candidate {
                        name: &scenario.name,
                        tags: &tags,
                        lines: &lines,
                    },
                )
            })
            .collect::<Vec<_>>();
        if examples.is_empty() {
            tracing::trace!(name = %scenario.name, "outline filtered out");
            return Ok(());
        }
        feature.on_scenario_outline(scenario)?;
        for step in steps {
            feature.on_step(step)?;
        }
        for ex in examples {
            feature.on_examples(ex)?;
        }
        return Ok(());
    }

    for step in steps {
        feature.on_step(step)?;
    }
    Ok(())
}

/// Detects the language declared by a `# language: xx` comment heading the
/// `content`.
fn language(content: &str) -> Option<&str> {
    content
        .lines()
        .map(str::trim)
        .take_while(|l| l.is_empty() || l.starts_with('#'))
        .find_map(|l| {
            regex_captures!(r"^#\s*language\s*:\s*(\S+)$", l)
                .map(|(_, lang)| lang)
        })
}

#[cfg(test)]
mod tests {
    use crate::{Element, StepContainer as _};

    use super::*;

    fn parse(src: &str, filters: &[Filter]) -> Feature {
        Basic.parse("test.feature", src, filters).unwrap()
    }

    fn names(feature: &Feature) -> Vec<&str> {
        feature.elements().iter().map(Element::name).collect()
    }

    const RULES: &str = r"@f
Feature: Rules
  Background:
    Given feature setup

  Scenario: top
    Given a

  @r1
  Rule: first
    Background:
      Given rule setup

    Scenario: in first
      Given b

  Rule: second
    Scenario: in second
      Given c
";

    #[test]
    fn detects_language() {
        assert_eq!(language("# language: fr\nFeature: x\n"), Some("fr"));
        assert_eq!(language("\n#language:de\n"), Some("de"));
        assert_eq!(language("Feature: x\n# language: fr\n"), None);
        assert_eq!(language("# just a comment\n"), None);
    }

    #[test]
    fn keeps_uri_and_path() {
        let feature = parse("Feature: x\n", &[]);

        assert_eq!(feature.uri(), "test.feature");
        assert_eq!(
            feature.header().path.as_deref(),
            Some(std::path::Path::new("test.feature")),
        );
        assert_eq!(feature.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn invalid_document_is_parse_error() {
        let err = Basic
            .parse("bad.feature", "Not a feature at all\n", &[])
            .unwrap_err();

        assert!(matches!(&err, Error::Parse { uri, .. } if uri == "bad.feature"));
    }

    #[test]
    fn replays_rules_after_scenarios() {
        let feature = parse(RULES, &[]);

        assert_eq!(names(&feature), ["top", "in first", "in second"]);
    }

    #[test]
    fn rule_background_follows_feature_one() {
        let feature = parse(RULES, &[]);

        let bg_steps = |i: usize| {
            feature.elements()[i]
                .background()
                .unwrap()
                .steps()
                .iter()
                .map(|s| s.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(bg_steps(0), ["feature setup"]);
        assert_eq!(bg_steps(1), ["feature setup", "rule setup"]);
        assert_eq!(bg_steps(2), ["feature setup"]);
    }

    #[test]
    fn rule_tags_are_inherited() {
        let feature = parse(RULES, &[]);

        assert_eq!(feature.elements()[1].tags(), ["f", "r1"]);
        assert_eq!(feature.elements()[2].tags(), ["f"]);
    }

    #[test]
    fn filters_by_tags() {
        let filters = [Filter::tags("@r1").unwrap()];

        let feature = parse(RULES, &filters);

        assert_eq!(names(&feature), ["in first"]);
    }

    #[test]
    fn filters_by_name() {
        let filters = [Filter::Name(regex::Regex::new("^in").unwrap())];

        let feature = parse(RULES, &filters);

        assert_eq!(names(&feature), ["in first", "in second"]);
    }

    #[test]
    fn filters_examples_by_line() {
        let src = r"Feature: Outline
  Scenario Outline: eat <n>
    Given <n>

    Examples: small
      | n |
      | 1 |

    Examples: big
      | n   |
      | 100 |
      | 200 |
";
        let feature = parse(src, &[Filter::lines([12])]);

        let outline = feature.elements()[0].as_outline().unwrap();
        assert_eq!(outline.examples().len(), 1);
        let names = outline
            .run_units()
            .iter()
            .map(|u| u.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["eat 100", "eat 200"]);
    }

    #[test]
    fn filtered_out_elements_skip_name_cache() {
        let src = r"Feature: Cache
  Background:
    Given setup

  @skip
  Scenario: same
    Given a

  Scenario: same
    Given b
";
        let feature = parse(src, &[Filter::tags("not @skip").unwrap()]);

        assert_eq!(feature.elements().len(), 1);
        assert!(feature.elements()[0].background().is_some());
    }

    #[test]
    fn rule_background_stays_within_rule() {
        let src = r"Feature: No feature background
  Rule: first
    Background:
      Given rule setup

    Scenario: one
      Given a

  Rule: second
    Scenario: two
      Given b
";
        let feature = parse(src, &[]);

        assert!(feature.elements()[0].background().is_some());
        assert!(feature.elements()[1].background().is_none());
    }

    #[test]
    fn filters_examples_by_line_after_comments() {
        let src = r"Feature: Outline
  Scenario Outline: eat <n>
    Given <n>

    Examples: small
      | n |
      | 1 |

    Examples: big

      # more than enough
      | n   |
      | 100 |
";
        let feature = parse(src, &[Filter::lines([13])]);

        let outline = feature.elements()[0].as_outline().unwrap();
        assert_eq!(outline.examples().len(), 1);
        assert_eq!(outline.run_units()[0].name, "eat 100");
        assert_eq!(outline.run_units()[0].position.line, 13);
    }
}
