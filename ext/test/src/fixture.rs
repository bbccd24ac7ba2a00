//! Conformance test fixture runner
//!
//! Loads YAML (or JSON) fixtures and runs them against the casematch engine.
//!
//! ```yaml
//! name: sign
//! description: literal, guard and wildcard in order
//! clauses:
//!   - pattern: { literal: 0 }
//!     result: zero
//!   - pattern: { guard: { lt: 0 } }
//!     result: "negative {subject}"
//!   - pattern: wildcard
//!     result: positive
//! cases:
//!   - name: zero
//!     subject: 0
//!     expect: zero
//! ```

use crate::{Bound, Chain, Rule, Subject};
use casematch::MatchError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors raised while loading fixtures.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fixture '{fixture}' case '{case}' must set exactly one of `expect` or `expect_error`")]
    Expectation { fixture: String, case: String },
}

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub clauses: Vec<ClauseConfig>,
    pub cases: Vec<TestCase>,
}

/// One clause: pattern + result template
#[derive(Debug, Deserialize)]
pub struct ClauseConfig {
    pub pattern: PatternConfig,
    pub result: String,
}

/// Pattern configuration
/// Uses untagged deserialization - order matters!
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PatternConfig {
    // Bare keyword first (a plain string)
    Keyword(PatternKeyword),
    Literal(LiteralPattern),
    OneOf(OneOfPattern),
    Guard(GuardPattern),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKeyword {
    Wildcard,
}

#[derive(Debug, Deserialize)]
pub struct LiteralPattern {
    pub literal: Subject,
}

#[derive(Debug, Deserialize)]
pub struct OneOfPattern {
    pub one_of: Vec<Subject>,
}

#[derive(Debug, Deserialize)]
pub struct GuardPattern {
    pub guard: GuardConfig,
}

/// Guard configuration: a parity keyword or one comparison
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GuardConfig {
    Parity(ParityKeyword),
    Lt(LtGuard),
    Le(LeGuard),
    Gt(GtGuard),
    Ge(GeGuard),
    Between(BetweenGuard),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityKeyword {
    Even,
    Odd,
}

#[derive(Debug, Deserialize)]
pub struct LtGuard {
    pub lt: Subject,
}

#[derive(Debug, Deserialize)]
pub struct LeGuard {
    pub le: Subject,
}

#[derive(Debug, Deserialize)]
pub struct GtGuard {
    pub gt: Subject,
}

#[derive(Debug, Deserialize)]
pub struct GeGuard {
    pub ge: Subject,
}

#[derive(Debug, Deserialize)]
pub struct BetweenGuard {
    pub between: (Subject, Subject),
}

/// Expected engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedError {
    NotResolved,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub subject: Subject,
    #[serde(default)]
    pub expect: Option<String>,
    #[serde(default)]
    pub expect_error: Option<ExpectedError>,
    /// Index of the clause expected to resolve the expression.
    #[serde(default)]
    pub resolved_by: Option<usize>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert config to test-domain types
// ═══════════════════════════════════════════════════════════════════════════════

impl Fixture {
    /// Build the clause chain described by this fixture
    #[must_use]
    pub fn chain(&self) -> Chain {
        self.clauses.iter().fold(Chain::new(), |chain, clause| {
            chain.clause(clause.pattern.rule(), clause.result.as_str())
        })
    }
}

impl PatternConfig {
    fn rule(&self) -> Rule {
        match self {
            PatternConfig::Keyword(PatternKeyword::Wildcard) => Rule::Wildcard,
            PatternConfig::Literal(l) => Rule::Literal(l.literal),
            PatternConfig::OneOf(o) => Rule::OneOf(o.one_of.clone()),
            PatternConfig::Guard(g) => Rule::Guard(g.guard.bound()),
        }
    }
}

impl GuardConfig {
    fn bound(&self) -> Bound {
        match self {
            GuardConfig::Parity(ParityKeyword::Even) => Bound::Even,
            GuardConfig::Parity(ParityKeyword::Odd) => Bound::Odd,
            GuardConfig::Lt(g) => Bound::Lt(g.lt),
            GuardConfig::Le(g) => Bound::Le(g.le),
            GuardConfig::Gt(g) => Bound::Gt(g.gt),
            GuardConfig::Ge(g) => Bound::Ge(g.ge),
            GuardConfig::Between(g) => Bound::Between(g.between.0, g.between.1),
        }
    }
}

impl TestCase {
    fn expected(&self) -> Option<Expected> {
        match (&self.expect, self.expect_error) {
            (Some(value), None) => Some(Expected::Value(value.clone())),
            (None, Some(error)) => Some(Expected::Error(error)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// What a case expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Value(String),
    Error(ExpectedError),
}

impl Expected {
    fn admits(&self, actual: &Result<String, MatchError>) -> bool {
        match (self, actual) {
            (Expected::Value(expected), Ok(value)) => expected == value,
            (Expected::Error(ExpectedError::NotResolved), Err(MatchError::NotResolved { .. })) => {
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value(value) => write!(f, "{value:?}"),
            Expected::Error(ExpectedError::NotResolved) => f.write_str("error: not_resolved"),
        }
    }
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: Expected,
    pub actual: Result<String, MatchError>,
    pub resolved_by: Option<usize>,
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "{status} {}: expected {}, got ", self.case_name, self.expected)?;
        match &self.actual {
            Ok(value) => write!(f, "{value:?}"),
            Err(err) => write!(f, "error: {err}"),
        }
    }
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, FixtureError> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Parse fixtures from JSON: one fixture object or an array of them
    pub fn from_json(json: &str) -> Result<Vec<Self>, FixtureError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<Fixture>),
            One(Box<Fixture>),
        }

        Ok(match serde_json::from_str(json)? {
            OneOrMany::Many(fixtures) => fixtures,
            OneOrMany::One(fixture) => vec![*fixture],
        })
    }

    /// Load fixtures from a file; `.json` is read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<Self>, FixtureError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&text)
        } else {
            Self::from_yaml_multi(&text)
        }
    }

    /// Check that every case states exactly one expectation
    pub fn validate(&self) -> Result<(), FixtureError> {
        match self.cases.iter().find(|case| case.expected().is_none()) {
            Some(case) => Err(FixtureError::Expectation {
                fixture: self.name.clone(),
                case: case.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Result<Vec<CaseResult>, FixtureError> {
        self.validate()?;
        let chain = self.chain();
        let results = self
            .cases
            .iter()
            .filter_map(|case| {
                let expected = case.expected()?;
                let evaluation = chain.evaluate_traced(case.subject);
                let passed = expected.admits(&evaluation.result)
                    && case
                        .resolved_by
                        .map_or(true, |index| evaluation.resolved_by == Some(index));
                debug!(
                    fixture = %self.name,
                    case = %case.name,
                    subject = case.subject,
                    passed,
                    "fixture case evaluated"
                );
                Some(CaseResult {
                    case_name: case.name.clone(),
                    passed,
                    expected,
                    actual: evaluation.result,
                    resolved_by: evaluation.resolved_by,
                })
            })
            .collect();
        Ok(results)
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' is invalid: {e}", self.name));
        for result in results {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {:?} (resolved_by {:?})",
                self.name, result.case_name, result.expected, result.actual, result.resolved_by
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGN: &str = r#"
name: sign
description: literal, guard and wildcard in order
clauses:
  - pattern: { literal: 0 }
    result: zero
  - pattern: { guard: { lt: 0 } }
    result: "negative {subject}"
  - pattern: wildcard
    result: positive
cases:
  - name: zero
    subject: 0
    expect: zero
    resolved_by: 0
  - name: negative
    subject: -5
    expect: negative -5
  - name: positive
    subject: 9
    expect: positive
    resolved_by: 2
"#;

    #[test]
    fn test_parse_and_run() {
        let fixture = Fixture::from_yaml(SIGN).unwrap();
        assert_eq!(fixture.name, "sign");
        assert_eq!(fixture.clauses.len(), 3);
        let results = fixture.run().unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn test_pattern_forms() {
        let yaml = r"
name: forms
clauses:
  - pattern: { one_of: [1, 2] }
    result: a
  - pattern: { guard: even }
    result: b
  - pattern: { guard: { between: [10, 20] } }
    result: c
  - pattern: { guard: { ge: 100 } }
    result: d
cases: []
";
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let rules: Vec<_> = fixture.clauses.iter().map(|c| c.pattern.rule()).collect();
        assert_eq!(
            rules,
            [
                Rule::OneOf(vec![1, 2]),
                Rule::Guard(Bound::Even),
                Rule::Guard(Bound::Between(10, 20)),
                Rule::Guard(Bound::Ge(100)),
            ]
        );
    }

    #[test]
    fn test_expect_error_not_resolved() {
        let yaml = r"
name: partial
clauses:
  - pattern: { literal: 1 }
    result: one
cases:
  - name: miss
    subject: 2
    expect_error: not_resolved
  - name: hit
    subject: 1
    expect_error: not_resolved
";
        let results = Fixture::from_yaml(yaml).unwrap().run().unwrap();
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert_eq!(results[1].actual.as_deref(), Ok("one"));
        assert!(results[1].to_string().starts_with("FAIL hit"));
    }

    #[test]
    fn test_case_without_expectation_is_rejected() {
        let yaml = r"
name: broken
clauses: []
cases:
  - name: nothing
    subject: 0
";
        let err = Fixture::from_yaml(yaml).unwrap().run().unwrap_err();
        assert!(matches!(err, FixtureError::Expectation { ref case, .. } if case == "nothing"));
    }

    #[test]
    fn test_multi_document_yaml() {
        let yaml = format!("{SIGN}---{SIGN}");
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap();
        assert_eq!(fixtures.len(), 2);
    }

    #[test]
    fn test_json_single_and_array() {
        let json = r#"{
            "name": "json",
            "clauses": [{ "pattern": "wildcard", "result": "any {subject}" }],
            "cases": [{ "name": "any", "subject": 3, "expect": "any 3" }]
        }"#;
        let fixtures = Fixture::from_json(json).unwrap();
        assert_eq!(fixtures.len(), 1);
        fixtures[0].run_and_assert();

        let array = format!("[{json}, {json}]");
        assert_eq!(Fixture::from_json(&array).unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Fixture::load("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
