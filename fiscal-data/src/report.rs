//! Plain-text and JSON rendering of simulation results.
//!
//! Text reports are two-column tables: a label on the left and a right
//! aligned amount grouped by thousands. JSON output is the serde
//! representation of the result, with decimals as strings.

use fiscal_core::calculations::common::format_amount;
use fiscal_core::{
    BracketLine, CorporateTaxResult, FiscalParameterSet, TaxComputation, WageTaxResult,
};
use rust_decimal::Decimal;
use serde::Serialize;

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 16;

/// Accumulates report lines.
#[derive(Default)]
struct Report {
    lines: Vec<String>,
}

impl Report {
    fn title(
        &mut self,
        title: &str,
    ) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(title.to_string());
        self.lines.push("-".repeat(LABEL_WIDTH + VALUE_WIDTH));
    }

    fn row(
        &mut self,
        label: &str,
        value: impl AsRef<str>,
    ) {
        self.lines.push(format!(
            "{label:<LABEL_WIDTH$}{:>VALUE_WIDTH$}",
            value.as_ref()
        ));
    }

    fn amount(
        &mut self,
        label: &str,
        value: Decimal,
    ) {
        self.row(label, format_amount(value));
    }

    fn flag(
        &mut self,
        label: &str,
        value: bool,
    ) {
        self.row(label, if value { "yes" } else { "no" });
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// `0.04` -> `"4%"`.
fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn bracket_rows(
    report: &mut Report,
    lines: &[BracketLine],
) {
    if lines.is_empty() {
        report.row("  (no taxable income)", "");
        return;
    }
    for line in lines {
        report.lines.push(format!(
            "  {:<24}{:>16}{:>18}{:>14}",
            line.label,
            line.charge_display,
            format_amount(line.taxable_base),
            format_amount(line.tax)
        ));
    }
}

fn computation_rows(
    report: &mut Report,
    tax: &TaxComputation,
) {
    report.amount("Monthly gross income", tax.monthly_gross);
    report.amount("Annual gross income", tax.annual_gross);
    report.amount("Contribution base", tax.contribution_base);
    report.amount("Social contribution", tax.contribution);
    report.flag("Contribution cap applied", tax.contribution_capped);
    report.amount("Base after contribution", tax.base_after_contribution);
    report.amount("Professional deduction", tax.professional_deduction);
    report.amount("Net taxable income", tax.net_taxable_income);
    report.row("Family quotient parts", tax.parts.normalize().to_string());
    report.amount("Income per part", tax.per_part_income);

    report.title("Brackets (per part)");
    bracket_rows(report, &tax.brackets);
    report.amount("Tax per part", tax.tax_per_part);

    report.title("Result");
    report.amount("Annual tax", tax.annual_tax);
    report.amount("Monthly tax", tax.monthly_tax);
    report.row("Effective rate", format!("{}%", tax.effective_rate));
    report.amount("Net income after tax", tax.net_income_after_tax);
}

/// Renders a personal income tax computation.
pub fn render_income_tax(tax: &TaxComputation) -> String {
    let mut report = Report::default();
    report.title("Personal income tax");
    computation_rows(&mut report, tax);
    report.finish()
}

/// Renders a wage tax computation, including the minimum-wage flags.
pub fn render_wage_tax(result: &WageTaxResult) -> String {
    let mut report = Report::default();
    report.title("Wage tax");
    report.amount("Annual benefits in kind", result.annual_benefits_in_kind);
    report.amount("Annual bonuses", result.annual_bonuses);
    computation_rows(&mut report, &result.computation);
    report.flag("Below minimum wage", result.below_minimum_wage);
    report.flag("Minimum tax applied", result.minimum_tax_applied);
    report.finish()
}

/// Renders a corporate minimum tax comparison.
pub fn render_corporate_tax(result: &CorporateTaxResult) -> String {
    let mut report = Report::default();
    report.title("Corporate minimum tax");
    report.amount("Revenue base", result.revenue_base);
    report.row("Minimum tax rate", percent(result.minimum_rate));
    report.flag("Deficit rate applied", result.deficit_rate_applied);
    report.amount("Minimum tax", result.minimum_tax);

    report.title("Installments");
    for installment in &result.installments {
        report.amount(
            &format!("  Q{} due {}", installment.quarter, installment.due_date),
            installment.amount,
        );
    }

    report.title("Comparison");
    report.row("Standard rate", percent(result.standard_rate));
    report.amount("Standard tax", result.standard_tax);
    report.amount("Tax due", result.due_tax);
    report.flag("Minimum tax applied", result.minimum_applied);
    report.amount("Deductible minimum tax", result.deductible_minimum);
    report.amount("Balance after deduction", result.balance_after_deduction);
    report.finish()
}

/// Summarizes a loaded parameter set.
pub fn render_parameters(params: &FiscalParameterSet) -> String {
    let mut report = Report::default();
    report.title(&format!("Fiscal parameters {}", params.tax_year));
    report.row("Contribution rate", percent(params.contribution.rate));
    report.amount("Contribution monthly cap", params.contribution.monthly_cap);
    report.row(
        "Professional deduction rate",
        percent(params.professional_deduction.rate),
    );
    report.row(
        "Maximum family parts",
        params.family_quotient.max_parts.normalize().to_string(),
    );
    report.amount("Minimum wage (annual)", params.minimum_wage.annual);
    report.amount("Wage minimum annual tax", params.wage_minimum_annual_tax);

    for (title, brackets) in [
        ("Income tax brackets", &params.income_tax_brackets),
        ("Wage tax brackets", &params.wage_tax_brackets),
    ] {
        report.title(title);
        for bracket in brackets {
            report.row(&format!("  {}", bracket.label()), bracket.charge.display());
        }
    }

    let corporate = &params.corporate_tax;
    report.title("Corporate tax");
    report.row("General rate", percent(corporate.general_rate));
    report.row("Foreign rate", percent(corporate.foreign_rate));
    report.row("Minimum rate", percent(corporate.min_rate_normal));
    report.row("Minimum rate (deficit)", percent(corporate.min_rate_deficit));
    report.row(
        "Deductible share (deficit)",
        percent(corporate.deficit_deductible_share),
    );
    for (date, quarter) in corporate.installment_due_dates.iter().zip(1..) {
        report.row(&format!("  Q{quarter} installment due"), date.to_string());
    }
    report.finish()
}

/// Serializes any result as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use fiscal_core::{
        CorporateTaxInput, CorporateTaxSimulator, IncomeTaxInput, IncomeTaxSimulator,
        MaritalStatus, Period, WageTaxInput, WageTaxSimulator,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::ParameterLoader;

    fn income_tax() -> TaxComputation {
        let params = ParameterLoader::bundled().unwrap();
        IncomeTaxSimulator::new(&params).calculate(&IncomeTaxInput {
            gross_income: Some(dec!(1000000)),
            period: Period::Monthly,
            marital_status: MaritalStatus::Single,
            dependent_children: None,
        })
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(percent(dec!(0.04)), "4%");
        assert_eq!(percent(dec!(0.25)), "25%");
        assert_eq!(percent(dec!(0.5)), "50%");
    }

    #[test]
    fn row_aligns_value_to_the_right() {
        let mut report = Report::default();
        report.amount("Annual tax", dec!(3044640));

        let line = &report.lines[0];
        assert_eq!(line.len(), LABEL_WIDTH + VALUE_WIDTH);
        assert!(line.starts_with("Annual tax "));
        assert!(line.ends_with(" 3 044 640"));
    }

    #[test]
    fn income_tax_report_lists_brackets_and_totals() {
        let text = render_income_tax(&income_tax());

        assert!(text.starts_with("Personal income tax\n"));
        assert!(text.contains("0 - 464 000"));
        assert!(text.contains("above 3 000 000"));
        assert!(text.contains("2 486 400"));
        assert!(text.contains("33.04%"));
        assert!(text.contains("8 475 360"));
    }

    #[test]
    fn wage_tax_report_shows_forfeit_and_flags() {
        let params = ParameterLoader::bundled().unwrap();
        let result = WageTaxSimulator::new(&params).calculate(&WageTaxInput {
            gross_income: Some(dec!(500000)),
            period: Period::Monthly,
            marital_status: MaritalStatus::Single,
            dependent_children: None,
            benefits_in_kind: None,
            bonuses: None,
            apply_family_quotient: None,
        });

        let text = render_wage_tax(&result);

        assert!(text.contains("1 200 (forfeit)"));
        assert!(text.contains("586 300"));
        assert!(text.contains("Below minimum wage"));
    }

    #[test]
    fn corporate_report_lists_dated_installments() {
        let params = ParameterLoader::bundled().unwrap();
        let result = CorporateTaxSimulator::new(&params).calculate(&CorporateTaxInput {
            exploitation_revenue: Some(dec!(100000000)),
            taxable_profit: Some(dec!(20000000)),
            ..Default::default()
        });

        let text = render_corporate_tax(&result);

        assert!(text.contains("Q1 due 2024-03-20"));
        assert!(text.contains("Q4 due 2024-12-20"));
        assert!(text.contains("250 000"));
        assert!(text.contains("4 000 000"));
    }

    #[test]
    fn parameter_summary_names_the_year() {
        let params = ParameterLoader::bundled().unwrap();

        let text = render_parameters(&params);

        assert!(text.starts_with("Fiscal parameters 2024\n"));
        assert!(text.contains("1 200 (forfeit)"));
        assert!(text.contains("Q3 installment due"));
    }

    #[test]
    fn json_keeps_every_field() {
        let json = to_json(&income_tax()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["annual_tax"], "3044640");
        assert_eq!(value["brackets"].as_array().unwrap().len(), 4);
        assert_eq!(value["parts"], "1");
    }
}
