//! Finance Engine CLI
//!
//! Command-line interface for running loan, comparison and currency calculations

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use finance_engine::loan::{AmortizationSchedule, LoanScenario};
use finance_engine::{EngineConfig, ScenarioRunner};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "finance-engine", version, about = "Personal finance calculations")]
struct Cli {
    /// Directory holding currency_rates.csv and engine_settings.csv
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Monthly payment and totals for a loan
    Amortize {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        term: u32,
    },
    /// Month-by-month schedule
    Schedule {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        term: u32,
        /// Also write the schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compare a baseline rate against one or more alternatives
    Compare {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        term: u32,
        #[arg(long)]
        baseline: f64,
        #[arg(long = "alternative", required = true)]
        alternatives: Vec<f64>,
    },
    /// Convert an amount between currencies
    Convert {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// List the configured exchange rates
    Rates,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(dir) => EngineConfig::from_csv_path(dir)
            .with_context(|| format!("loading configuration from {}", dir.display()))?,
        None => EngineConfig::default_config(),
    };
    let runner = ScenarioRunner::with_config(config);

    match cli.command {
        Command::Amortize { principal, rate, term } => {
            let scenario = LoanScenario::new(principal, rate, term)?;
            let result = runner.run(&scenario)?;
            if cli.json {
                return print_json(&result);
            }
            println!("Loan: ${principal:.2} at {rate}% over {term} months");
            println!("  Monthly payment: ${:.2}", result.monthly_payment);
            println!("  Total paid:      ${:.2}", result.total_paid);
            println!("  Total interest:  ${:.2}", result.total_interest);
        }
        Command::Schedule { principal, rate, term, csv } => {
            let scenario = LoanScenario::new(principal, rate, term)?;
            let schedule = runner.schedule(&scenario)?;
            if let Some(path) = &csv {
                write_schedule_csv(path, &schedule)
                    .with_context(|| format!("writing schedule to {}", path.display()))?;
            }
            if cli.json {
                return print_json(&schedule);
            }
            print_schedule(&schedule);
            if let Some(path) = csv {
                println!("\nFull schedule written to: {}", path.display());
            }
        }
        Command::Compare { principal, term, baseline, alternatives } => {
            let grid = runner.compare_grid(principal, term, baseline, &alternatives)?;
            if cli.json {
                return print_json(&grid);
            }
            println!("Loan: ${principal:.2} over {term} months, baseline {baseline}%");
            println!("{:>8} {:>12} {:>12} {:>14} {:>9}", "Rate", "Payment", "Monthly Δ", "Total Savings", "Savings");
            println!("{}", "-".repeat(59));
            for row in &grid {
                let c = &row.comparison;
                println!(
                    "{:>7}% {:>12.2} {:>12.2} {:>14.2} {:>8.2}%",
                    row.alternative_rate_percent,
                    c.alternative.monthly_payment,
                    c.absolute_monthly_savings,
                    c.total_savings,
                    c.percent_savings,
                );
            }
        }
        Command::Convert { amount, from, to } => {
            let converted = runner.convert(amount, &from, &to)?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "amount": amount,
                    "from": from,
                    "to": to,
                    "converted": converted,
                }));
            }
            println!("{amount:.2} {from} = {converted:.2} {to}");
        }
        Command::Rates => {
            let rates = &runner.config().rates;
            if cli.json {
                return print_json(rates);
            }
            println!("Rates per 1 {}:", rates.reference());
            for code in rates.codes() {
                println!("  {code}: {:.4}", rates.get(code)?);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_schedule(schedule: &AmortizationSchedule) {
    let s = &schedule.scenario;
    println!(
        "Schedule: ${:.2} at {}% over {} months (payment ${:.2})",
        s.principal, s.annual_rate_percent, s.term_months, schedule.summary.monthly_payment
    );
    println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(59));
    for row in &schedule.rows {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month, row.payment, row.interest, row.principal, row.remaining_balance
        );
    }
    println!("\nTotal interest: ${:.2}", schedule.total_interest());
}

fn write_schedule_csv(path: &Path, schedule: &AmortizationSchedule) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    for row in &schedule.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
