// Value assertions for scenario steps
//
// Step results are plain values (a message, a count, a flag) already read
// from the page, so these checks do not poll. Failures are
// `Error::Assertion` so the runner can tell them apart from environment
// failures.

use crate::error::{Error, Result};
use std::fmt::Debug;

/// Creates an expectation on a value read by a step.
///
/// # Example
///
/// ```ignore
/// expect_value(message).to_contain(SUCCESSFUL_UPDATE_MESSAGE)?;
/// expect_value(count).to_be_above(0)?;
/// expect_value(enabled).not().to_be_true()?;
/// ```
pub fn expect_value<T: Debug>(actual: T) -> ValueExpectation<T> {
    ValueExpectation {
        actual,
        negate: false,
    }
}

/// Expectation on a single value.
pub struct ValueExpectation<T> {
    actual: T,
    negate: bool,
}

// to_* methods consume the expectation, as in Playwright's expect API
#[allow(clippy::wrong_self_convention)]
impl<T: Debug> ValueExpectation<T> {
    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn to_equal<E>(self, expected: E) -> Result<()>
    where
        T: PartialEq<E>,
        E: Debug,
    {
        let matches = self.actual == expected;
        self.verdict(matches, format!("to equal {:?}", expected))
    }

    pub fn to_be_above<E>(self, bound: E) -> Result<()>
    where
        T: PartialOrd<E>,
        E: Debug,
    {
        let matches = self.actual > bound;
        self.verdict(matches, format!("to be above {:?}", bound))
    }

    fn verdict(self, matches: bool, expectation: String) -> Result<()> {
        if matches != self.negate {
            return Ok(());
        }
        let not = if self.negate { "NOT " } else { "" };
        Err(Error::Assertion(format!(
            "Expected {:?} {}{}",
            self.actual, not, expectation
        )))
    }
}

#[allow(clippy::wrong_self_convention)]
impl<T: AsRef<str> + Debug> ValueExpectation<T> {
    /// Asserts that the text contains `needle`. Every text contains "".
    pub fn to_contain(self, needle: &str) -> Result<()> {
        let matches = self.actual.as_ref().contains(needle);
        self.verdict(matches, format!("to contain {:?}", needle))
    }
}

#[allow(clippy::wrong_self_convention)]
impl ValueExpectation<bool> {
    pub fn to_be_true(self) -> Result<()> {
        let matches = self.actual;
        self.verdict(matches, "to be true".to_string())
    }

    pub fn to_be_false(self) -> Result<()> {
        let matches = !self.actual;
        self.verdict(matches, "to be false".to_string())
    }
}
