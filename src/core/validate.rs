use std::time::Duration;

use crate::core::error::InvalidInput;
use crate::core::expense::Amount;

pub const DEFAULT_VALIDATION_DELAY: Duration = Duration::from_millis(200);

/// Checks a candidate name and amount before they become an expense.
///
/// The check itself is pure, but [`Validator::validate`] always yields to
/// the scheduler first (sleeping for `delay` when it is non-zero), so
/// callers must treat it as an await point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validator {
    delay: Duration,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(DEFAULT_VALIDATION_DELAY)
    }
}

impl Validator {
    pub fn new(delay: Duration) -> Validator {
        Validator { delay }
    }

    pub fn immediate() -> Validator {
        Validator::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn validate(&self, name: &str, amount: Amount) -> Result<(), InvalidInput> {
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }
        check(name, amount)
    }
}

/// Name must be non-empty; amount finite and strictly positive.
pub fn check(name: &str, amount: Amount) -> Result<(), InvalidInput> {
    if name.is_empty() || !amount.is_finite() || amount <= 0.0 {
        return Err(InvalidInput);
    }
    return Ok(());
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{check, Validator};
    use crate::core::error::InvalidInput;

    #[rstest]
    #[case("", 10.0)]
    #[case("Coffee", 0.0)]
    #[case("Coffee", -5.0)]
    #[case("Coffee", f64::NAN)]
    #[case("Coffee", f64::INFINITY)]
    #[case("", -1.0)]
    fn rejects(#[case] name: &str, #[case] amount: f64) {
        assert_eq!(check(name, amount), Err(InvalidInput));
    }

    #[rstest]
    #[case("Coffee", 4.5)]
    #[case("Rent", 950.0)]
    #[case(" ", 0.01)]
    fn accepts(#[case] name: &str, #[case] amount: f64) {
        assert_eq!(check(name, amount), Ok(()));
    }

    #[tokio::test]
    async fn validate_immediate() {
        let validator = Validator::immediate();
        assert!(validator.validate("Coffee", 4.5).await.is_ok());
        assert!(validator.validate("", 10.0).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn validate_waits_for_delay() {
        let validator = Validator::new(Duration::from_millis(200));
        let started = tokio::time::Instant::now();

        validator.validate("Coffee", 4.5).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn default_delay() {
        assert_eq!(Validator::default().delay(), Duration::from_millis(200));
    }
}
