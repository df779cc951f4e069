//! Holder for the active parameter set.
//!
//! Readers take an [`Arc`] snapshot and compute against it; a tax-year switch
//! builds a new set and replaces the reference. A computation that already
//! holds a snapshot keeps seeing the set it started with.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::{FiscalParameterSet, ParameterError};

#[derive(Debug)]
pub struct ParameterStore {
    current: RwLock<Arc<FiscalParameterSet>>,
}

impl ParameterStore {
    /// Creates a store around an initial parameter set.
    ///
    /// # Errors
    ///
    /// Returns the [`ParameterError`] raised by validating `params`.
    pub fn new(params: FiscalParameterSet) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(params)),
        })
    }

    /// The parameter set active right now.
    pub fn snapshot(&self) -> Arc<FiscalParameterSet> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Validates `params` and makes it the active set, returning the
    /// previously active one. On error the active set is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`ParameterError`] raised by validating `params`.
    pub fn replace(
        &self,
        params: FiscalParameterSet,
    ) -> Result<Arc<FiscalParameterSet>, ParameterError> {
        params.validate()?;
        let next = Arc::new(params);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        info!(
            from = previous.tax_year,
            to = guard.tax_year,
            "active fiscal parameters replaced"
        );
        Ok(previous)
    }

    pub fn tax_year(&self) -> i32 {
        self.snapshot().tax_year
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use chrono::Datelike;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::fixtures::reference_parameters;
    use crate::{IncomeTaxInput, IncomeTaxSimulator, MaritalStatus, Period};

    fn next_year() -> FiscalParameterSet {
        let mut params = reference_parameters();
        params.tax_year = 2025;
        params.contribution.rate = dec!(0.05);
        for date in params.corporate_tax.installment_due_dates.iter_mut() {
            *date = date.with_year(2025).unwrap();
        }
        params
    }

    #[test]
    fn new_rejects_invalid_parameters() {
        let mut params = reference_parameters();
        params.family_quotient.max_parts = dec!(0);

        assert_eq!(
            ParameterStore::new(params).unwrap_err(),
            ParameterError::InvalidMaxParts(dec!(0))
        );
    }

    #[test]
    fn replace_swaps_and_returns_previous() {
        let store = ParameterStore::new(reference_parameters()).unwrap();

        let previous = store.replace(next_year()).unwrap();

        assert_eq!(previous.tax_year, 2024);
        assert_eq!(store.tax_year(), 2025);
    }

    #[test]
    fn failed_replace_keeps_active_set() {
        let store = ParameterStore::new(reference_parameters()).unwrap();
        let mut broken = next_year();
        broken.income_tax_brackets.clear();

        assert!(store.replace(broken).is_err());
        assert_eq!(store.tax_year(), 2024);
    }

    #[test]
    fn snapshot_taken_before_replace_is_unchanged() {
        let store = ParameterStore::new(reference_parameters()).unwrap();
        let before = store.snapshot();

        store.replace(next_year()).unwrap();

        assert_eq!(before.tax_year, 2024);
        assert_eq!(before.contribution.rate, dec!(0.04));
        assert_eq!(store.snapshot().contribution.rate, dec!(0.05));
    }

    #[test]
    fn concurrent_readers_see_a_whole_parameter_set() {
        let store = ParameterStore::new(reference_parameters()).unwrap();
        let input = IncomeTaxInput {
            gross_income: Some(dec!(1000000)),
            period: Period::Monthly,
            marital_status: MaritalStatus::Single,
            dependent_children: None,
        };

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let params = store.snapshot();
                        let result = IncomeTaxSimulator::new(&params).calculate(&input);
                        let expected = match params.tax_year {
                            2024 => dec!(480000),
                            _ => dec!(600000),
                        };
                        assert_eq!(result.contribution, expected);
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..50 {
                    store.replace(next_year()).unwrap();
                    store.replace(reference_parameters()).unwrap();
                }
            });
        });
    }
}
