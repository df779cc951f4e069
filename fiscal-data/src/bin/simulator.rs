use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use fiscal_core::{
    ContributorType, CorporateTaxInput, CorporateTaxSimulator, FiscalParameterSet,
    IncomeTaxInput, IncomeTaxSimulator, MaritalStatus, ParameterStore, Period, WageTaxInput,
    WageTaxSimulator,
};
use fiscal_data::{ParameterLoader, logging, report};
use rust_decimal::Decimal;
use tracing::info;

/// Simulate personal income tax, wage tax and corporate minimum tax.
///
/// Parameters default to the bundled 2024 set. To use another set, pass both
/// a parameters TOML file and a brackets CSV file with columns:
/// - tax_year: The tax year (e.g., 2024)
/// - product: income_tax or wage_tax
/// - min: The lower bound of the bracket
/// - max: The upper bound (empty for the open-ended top bracket)
/// - kind: rate or forfeit
/// - value: The rate as a decimal (e.g., 0.10) or the forfeit amount
#[derive(Parser, Debug)]
#[command(name = "fiscal-simulator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the parameters TOML file
    #[arg(short, long, global = true)]
    params: Option<PathBuf>,

    /// Path to the brackets CSV file
    #[arg(short, long, global = true)]
    brackets: Option<PathBuf>,

    /// Print results as JSON instead of a text report
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log filter (e.g. "debug" or "fiscal_core=trace"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Personal income tax with the family quotient
    IncomeTax(HouseholdArgs),

    /// Wage tax withheld on salaries
    WageTax(WageArgs),

    /// Corporate minimum tax compared with the standard profit tax
    CorporateTax(CorporateArgs),

    /// Load and validate the parameter files, then print a summary
    Validate,
}

#[derive(Args, Debug)]
struct HouseholdArgs {
    /// Gross income for the period
    #[arg(short, long, allow_negative_numbers = true)]
    gross: Decimal,

    /// Period of the gross income: monthly or annual
    #[arg(long, default_value = "monthly")]
    period: Period,

    /// Marital status: single, married, divorced or widowed
    #[arg(short, long, default_value = "single")]
    status: MaritalStatus,

    /// Number of dependent children
    #[arg(short, long)]
    children: Option<u32>,
}

#[derive(Args, Debug)]
struct WageArgs {
    #[command(flatten)]
    household: HouseholdArgs,

    /// Benefits in kind for the same period
    #[arg(long, allow_negative_numbers = true)]
    benefits_in_kind: Option<Decimal>,

    /// Bonuses for the same period
    #[arg(long, allow_negative_numbers = true)]
    bonuses: Option<Decimal>,

    /// Apply the family quotient (one part otherwise)
    #[arg(long, default_value_t = false)]
    family_quotient: bool,
}

#[derive(Args, Debug)]
struct CorporateArgs {
    /// Revenue from operations
    #[arg(long, allow_negative_numbers = true)]
    exploitation_revenue: Option<Decimal>,

    /// Financial revenue
    #[arg(long, allow_negative_numbers = true)]
    financial_revenue: Option<Decimal>,

    /// Non-ordinary revenue
    #[arg(long, allow_negative_numbers = true)]
    non_ordinary_revenue: Option<Decimal>,

    /// Liberatory withholdings already discharged at source
    #[arg(long, allow_negative_numbers = true)]
    withholdings: Option<Decimal>,

    /// Taxable profit
    #[arg(long, allow_negative_numbers = true)]
    profit: Option<Decimal>,

    /// The company posted a deficit two years in a row
    #[arg(long, default_value_t = false)]
    deficit: bool,

    /// Contributor type: domestic or foreign
    #[arg(long, default_value = "domestic")]
    contributor_type: ContributorType,
}

impl HouseholdArgs {
    fn income_tax_input(&self) -> IncomeTaxInput {
        IncomeTaxInput {
            gross_income: Some(self.gross),
            period: self.period,
            marital_status: self.status,
            dependent_children: self.children,
        }
    }
}

impl WageArgs {
    fn wage_tax_input(&self) -> WageTaxInput {
        WageTaxInput {
            gross_income: Some(self.household.gross),
            period: self.household.period,
            marital_status: self.household.status,
            dependent_children: self.household.children,
            benefits_in_kind: self.benefits_in_kind,
            bonuses: self.bonuses,
            apply_family_quotient: Some(self.family_quotient),
        }
    }
}

impl CorporateArgs {
    fn corporate_tax_input(&self) -> CorporateTaxInput {
        CorporateTaxInput {
            exploitation_revenue: self.exploitation_revenue,
            financial_revenue: self.financial_revenue,
            non_ordinary_revenue: self.non_ordinary_revenue,
            liberatory_withholdings: self.withholdings,
            taxable_profit: self.profit,
            deficit_two_consecutive_years: self.deficit,
            contributor_type: self.contributor_type,
        }
    }
}

fn load_from_files(
    params_path: &Path,
    brackets_path: &Path,
) -> Result<FiscalParameterSet> {
    let parameters = fs::read_to_string(params_path)
        .with_context(|| format!("Failed to read: {}", params_path.display()))?;
    let brackets = File::open(brackets_path)
        .with_context(|| format!("Failed to open: {}", brackets_path.display()))?;

    ParameterLoader::load(&parameters, brackets).with_context(|| {
        format!(
            "Failed to load parameters from {} and {}",
            params_path.display(),
            brackets_path.display()
        )
    })
}

fn load_parameters(cli: &Cli) -> Result<FiscalParameterSet> {
    match (&cli.params, &cli.brackets) {
        (None, None) => ParameterLoader::bundled().context("Failed to load bundled parameters"),
        (Some(params), Some(brackets)) => load_from_files(params, brackets),
        _ => bail!("--params and --brackets must be given together"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let store = ParameterStore::new(load_parameters(&cli)?)
        .context("Parameter set failed validation")?;
    let params = store.snapshot();
    info!(tax_year = store.tax_year(), "fiscal parameters loaded");

    let output = match &cli.command {
        Command::IncomeTax(args) => {
            let result = IncomeTaxSimulator::new(&params).calculate(&args.income_tax_input());
            if cli.json {
                report::to_json(&result)?
            } else {
                report::render_income_tax(&result)
            }
        }
        Command::WageTax(args) => {
            let result = WageTaxSimulator::new(&params).calculate(&args.wage_tax_input());
            if cli.json {
                report::to_json(&result)?
            } else {
                report::render_wage_tax(&result)
            }
        }
        Command::CorporateTax(args) => {
            let result =
                CorporateTaxSimulator::new(&params).calculate(&args.corporate_tax_input());
            if cli.json {
                report::to_json(&result)?
            } else {
                report::render_corporate_tax(&result)
            }
        }
        Command::Validate => {
            if cli.json {
                report::to_json(&*params)?
            } else {
                report::render_parameters(&params)
            }
        }
    };

    println!("{}", output.trim_end());

    Ok(())
}
