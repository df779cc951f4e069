use std::io::Read;

use fiscal_core::{
    Bracket, BracketCharge, ContributionParameters, CorporateTaxParameters,
    FamilyQuotientParameters, FiscalParameterSet, MinimumWageParameters, ParameterError,
    ProfessionalDeductionParameters,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

const BUNDLED_PARAMETERS: &str = include_str!("../data/parameters_2024.toml");
const BUNDLED_BRACKETS: &str = include_str!("../data/brackets_2024.csv");

/// Errors that can occur when loading a fiscal parameter set.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid product '{product}' on row {row} (expected income_tax or wage_tax)")]
    InvalidProduct { product: String, row: usize },

    #[error("Invalid bracket kind '{kind}' on row {row} (expected rate or forfeit)")]
    InvalidKind { kind: String, row: usize },

    #[error("Bracket row {row} is for tax year {found}, parameters are for {expected}")]
    TaxYearMismatch {
        row: usize,
        expected: i32,
        found: i32,
    },

    #[error("Invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// Scalar parameters, as laid out in the TOML parameter file.
///
/// ```toml
/// tax_year = 2024
/// wage_minimum_annual_tax = "1200"
///
/// [contribution]
/// rate = "0.04"
/// monthly_cap = "1200000"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    pub tax_year: i32,
    pub wage_minimum_annual_tax: Decimal,
    pub contribution: ContributionParameters,
    pub professional_deduction: ProfessionalDeductionParameters,
    pub family_quotient: FamilyQuotientParameters,
    pub minimum_wage: MinimumWageParameters,
    pub corporate_tax: CorporateTaxParameters,
}

/// Which schedule a bracket row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Product {
    IncomeTax,
    WageTax,
}

fn parse_product(
    product: &str,
    row: usize,
) -> Result<Product, LoaderError> {
    match product.trim() {
        "income_tax" => Ok(Product::IncomeTax),
        "wage_tax" => Ok(Product::WageTax),
        other => Err(LoaderError::InvalidProduct {
            product: other.to_string(),
            row,
        }),
    }
}

/// A single record from the brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2024)
/// - `product`: `income_tax` or `wage_tax`
/// - `min`: Lower bound of the bracket
/// - `max`: Upper bound (empty for the open-ended top bracket)
/// - `kind`: `rate` for a marginal rate, `forfeit` for a fixed amount
/// - `value`: The rate as a decimal (e.g., 0.10 for 10%) or the forfeit amount
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub product: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max: Option<Decimal>,
    pub kind: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub value: Decimal,
}

impl BracketRecord {
    fn to_bracket(
        &self,
        row: usize,
    ) -> Result<Bracket, LoaderError> {
        let charge = match self.kind.trim() {
            "rate" => BracketCharge::Percentage(self.value),
            "forfeit" => BracketCharge::Forfeit(self.value),
            other => {
                return Err(LoaderError::InvalidKind {
                    kind: other.to_string(),
                    row,
                });
            }
        };
        Ok(Bracket {
            min: self.min,
            max: self.max,
            charge,
        })
    }
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for fiscal parameter sets.
///
/// A parameter set is split across two files: a TOML file with the scalar
/// rates, caps and dates, and a CSV file with the bracket tables of both
/// progressive products. Loading assembles and validates the whole set.
pub struct ParameterLoader;

impl ParameterLoader {
    /// Parse the scalar parameters from TOML text.
    pub fn parse_parameters(input: &str) -> Result<ParameterFile, LoaderError> {
        Ok(toml::from_str(input)?)
    }

    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Combine scalar parameters and bracket records into a validated set.
    ///
    /// Records are grouped by product and sorted by their lower bound, so
    /// row order in the CSV does not matter. Every record must belong to the
    /// same tax year as the scalar parameters.
    pub fn assemble(
        file: ParameterFile,
        records: &[BracketRecord],
    ) -> Result<FiscalParameterSet, LoaderError> {
        let mut income_tax_brackets = Vec::new();
        let mut wage_tax_brackets = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1; // 1-based, header excluded
            if record.tax_year != file.tax_year {
                return Err(LoaderError::TaxYearMismatch {
                    row,
                    expected: file.tax_year,
                    found: record.tax_year,
                });
            }

            let bracket = record.to_bracket(row)?;
            match parse_product(&record.product, row)? {
                Product::IncomeTax => income_tax_brackets.push(bracket),
                Product::WageTax => wage_tax_brackets.push(bracket),
            }
        }

        income_tax_brackets.sort_by(|a, b| a.min.cmp(&b.min));
        wage_tax_brackets.sort_by(|a, b| a.min.cmp(&b.min));

        let params = FiscalParameterSet {
            tax_year: file.tax_year,
            contribution: file.contribution,
            professional_deduction: file.professional_deduction,
            family_quotient: file.family_quotient,
            minimum_wage: file.minimum_wage,
            income_tax_brackets,
            wage_tax_brackets,
            corporate_tax: file.corporate_tax,
            wage_minimum_annual_tax: file.wage_minimum_annual_tax,
        };
        params.validate()?;

        Ok(params)
    }

    /// Parse both sources and assemble a validated parameter set.
    pub fn load<R: Read>(
        parameters: &str,
        brackets: R,
    ) -> Result<FiscalParameterSet, LoaderError> {
        let file = Self::parse_parameters(parameters)?;
        let records = Self::parse_brackets(brackets)?;
        Self::assemble(file, &records)
    }

    /// The 2024 parameter set shipped with this crate.
    pub fn bundled() -> Result<FiscalParameterSet, LoaderError> {
        Self::load(BUNDLED_PARAMETERS, BUNDLED_BRACKETS.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const BRACKETS_HEADER: &str = "tax_year,product,min,max,kind,value\n";

    fn bundled_file() -> ParameterFile {
        ParameterLoader::parse_parameters(BUNDLED_PARAMETERS).unwrap()
    }

    #[test]
    fn parse_parameters_reads_exact_decimals() {
        let file = bundled_file();

        assert_eq!(file.tax_year, 2024);
        assert_eq!(file.contribution.rate, dec!(0.04));
        assert_eq!(file.contribution.monthly_cap, dec!(1200000));
        assert_eq!(file.family_quotient.max_parts, dec!(6.5));
        assert_eq!(file.corporate_tax.general_rate, dec!(0.25));
    }

    #[test]
    fn parse_parameters_reads_due_dates() {
        let file = bundled_file();
        let first = file.corporate_tax.installment_due_dates[0];

        assert_eq!(first.to_string(), "2024-03-20");
    }

    #[test]
    fn parse_parameters_rejects_unknown_field() {
        let input = format!("surprise = 1\n{BUNDLED_PARAMETERS}");

        assert!(matches!(
            ParameterLoader::parse_parameters(&input),
            Err(LoaderError::TomlParse(_))
        ));
    }

    #[test]
    fn parse_parameters_rejects_misspelled_nested_key() {
        let input = BUNDLED_PARAMETERS.replace("min_rate_deficit", "min_rate_defecit");

        assert!(matches!(
            ParameterLoader::parse_parameters(&input),
            Err(LoaderError::TomlParse(_))
        ));
    }

    #[test]
    fn parse_parameters_rejects_extra_nested_key() {
        let input = BUNDLED_PARAMETERS.replace(
            "[contribution]\n",
            "[contribution]\nceiling = \"1\"\n",
        );
        assert_ne!(input, BUNDLED_PARAMETERS);

        assert!(matches!(
            ParameterLoader::parse_parameters(&input),
            Err(LoaderError::TomlParse(_))
        ));
    }

    #[test]
    fn parse_parameters_rejects_missing_section() {
        let input = "tax_year = 2024\nwage_minimum_annual_tax = \"1200\"\n";

        assert!(matches!(
            ParameterLoader::parse_parameters(input),
            Err(LoaderError::TomlParse(_))
        ));
    }

    #[test]
    fn parse_brackets_handles_open_bracket() {
        let csv = format!("{BRACKETS_HEADER}2024,income_tax,3000000,,rate,0.40\n");

        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![BracketRecord {
                tax_year: 2024,
                product: "income_tax".to_string(),
                min: dec!(3000000),
                max: None,
                kind: "rate".to_string(),
                value: dec!(0.40),
            }]
        );
    }

    #[test]
    fn parse_brackets_tolerates_whitespace() {
        let csv = format!("{BRACKETS_HEADER}2024, wage_tax , 0 , 615000 , forfeit , 1200\n");

        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        assert_eq!(records[0].max, Some(dec!(615000)));
        assert_eq!(records[0].value, dec!(1200));
    }

    #[test]
    fn parse_brackets_rejects_bad_number() {
        let csv = format!("{BRACKETS_HEADER}2024,income_tax,zero,100,rate,0.1\n");

        assert!(matches!(
            ParameterLoader::parse_brackets(csv.as_bytes()),
            Err(LoaderError::CsvParse(_))
        ));
    }

    #[test]
    fn assemble_sorts_rows_by_lower_bound() {
        let csv = format!(
            "{BRACKETS_HEADER}\
             2024,income_tax,3000000,,rate,0.40\n\
             2024,income_tax,0,464000,rate,0.01\n\
             2024,income_tax,1000000,3000000,rate,0.25\n\
             2024,income_tax,464000,1000000,rate,0.10\n\
             2024,wage_tax,615000,,rate,0.10\n\
             2024,wage_tax,0,615000,forfeit,1200\n"
        );
        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        let params = ParameterLoader::assemble(bundled_file(), &records).unwrap();

        let mins: Vec<Decimal> = params.income_tax_brackets.iter().map(|b| b.min).collect();
        assert_eq!(
            mins,
            vec![dec!(0), dec!(464000), dec!(1000000), dec!(3000000)]
        );
        assert_eq!(
            params.wage_tax_brackets[0].charge,
            BracketCharge::Forfeit(dec!(1200))
        );
    }

    #[test]
    fn assemble_rejects_other_tax_year() {
        let csv = format!("{BRACKETS_HEADER}2023,income_tax,0,,rate,0.10\n");
        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        match ParameterLoader::assemble(bundled_file(), &records) {
            Err(LoaderError::TaxYearMismatch {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2024);
                assert_eq!(found, 2023);
            }
            other => panic!("expected TaxYearMismatch, got {other:#?}"),
        }
    }

    #[test]
    fn assemble_rejects_unknown_product() {
        let csv = format!("{BRACKETS_HEADER}2024,vat,0,,rate,0.18\n");
        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        assert!(matches!(
            ParameterLoader::assemble(bundled_file(), &records),
            Err(LoaderError::InvalidProduct { row: 1, .. })
        ));
    }

    #[test]
    fn assemble_rejects_unknown_kind() {
        let csv = format!("{BRACKETS_HEADER}2024,income_tax,0,,flat,0.18\n");
        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        assert!(matches!(
            ParameterLoader::assemble(bundled_file(), &records),
            Err(LoaderError::InvalidKind { row: 1, .. })
        ));
    }

    #[test]
    fn assemble_surfaces_validation_errors() {
        let csv = format!(
            "{BRACKETS_HEADER}\
             2024,income_tax,0,,rate,0.10\n\
             2024,wage_tax,0,615000,forfeit,1200\n"
        );
        let records = ParameterLoader::parse_brackets(csv.as_bytes()).unwrap();

        assert!(matches!(
            ParameterLoader::assemble(bundled_file(), &records),
            Err(LoaderError::Parameters(ParameterError::MissingOpenBracket { .. }))
        ));
    }

    #[test]
    fn bundled_set_loads() {
        let params = ParameterLoader::bundled().unwrap();

        assert_eq!(params.tax_year, 2024);
        assert_eq!(params.income_tax_brackets.len(), 4);
        assert_eq!(params.wage_tax_brackets.len(), 5);
    }
}
