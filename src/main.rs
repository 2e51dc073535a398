use std::fmt::Display;
use std::path::{Path, PathBuf};

use clap::Parser;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, InquireError, Select};
use rust_decimal::Decimal;

use yarikuri::errors::YarikuriError;
use yarikuri::ledger::storage::{self, LoadOutcome, LEDGER_FILE};
use yarikuri::ledger::{Category, Month, MonthRecord};
use yarikuri::tui::chart;
use yarikuri::{parse_config, YarikuriConfig, ANSI_GREEN, ANSI_RED, ANSI_STOP};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Ledger file to read and write
    #[arg(short, long, default_value = LEDGER_FILE)]
    file: PathBuf,
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy)]
enum MenuChoice {
    AddExpenses,
    DisplayExpenses,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 3] = [
        MenuChoice::AddExpenses,
        MenuChoice::DisplayExpenses,
        MenuChoice::Exit,
    ];
}

impl Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MenuChoice::AddExpenses => "Add expenses",
            MenuChoice::DisplayExpenses => "Display expenses (month or combined)",
            MenuChoice::Exit => "Exit",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy)]
enum DisplayChoice {
    AllMonths,
    Single(Month),
}

impl Display for DisplayChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayChoice::AllMonths => write!(f, "All months combined"),
            DisplayChoice::Single(month) => write!(f, "Month {month}"),
        }
    }
}

fn main() -> Result<(), YarikuriError> {
    let args = Args::parse();
    let config = parse_config()?;

    println!("Welcome to yarikuri, {}!", config.user_name);

    let mut current_month = Month::JANUARY;
    loop {
        let choice = match Select::new("What would you like to do?", MenuChoice::ALL.to_vec())
            .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match choice {
            MenuChoice::AddExpenses => {
                if let Err(err) = add_expenses(&args.file, &config, &mut current_month) {
                    eprintln!("{ANSI_RED}Failed to record expenses: {err}{ANSI_STOP}");
                }
            }
            MenuChoice::DisplayExpenses => {
                if let Err(err) = display_expenses(&args.file, &config, args.debug) {
                    eprintln!("{ANSI_RED}Failed to display expenses: {err}{ANSI_STOP}");
                }
            }
            MenuChoice::Exit => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// One entry session. The month counter advances after every saved month
/// and wraps December back to January; the wrap ends the session.
fn add_expenses(
    path: &Path,
    config: &YarikuriConfig,
    current_month: &mut Month,
) -> Result<(), YarikuriError> {
    loop {
        println!("Enter your expenses for month {current_month}:");
        let record = prompt_month_record(config)?;
        storage::save(path, *current_month, &record)?;
        println!(
            "{ANSI_GREEN}Expenses for month {current_month} saved to {}.{ANSI_STOP}",
            path.display()
        );

        let wrapped = current_month.is_december();
        *current_month = current_month.next();
        if wrapped {
            break;
        }
        let keep_going = Confirm::new(&format!("Add expenses for month {current_month} too?"))
            .with_default(false)
            .prompt()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}

fn prompt_month_record(config: &YarikuriConfig) -> Result<MonthRecord, YarikuriError> {
    let mut record = MonthRecord::new();
    for category in Category::ALL {
        record.set(category, money_amount(config, category.label())?);
    }
    Ok(record)
}

fn money_amount(config: &YarikuriConfig, name: &str) -> Result<Decimal, YarikuriError> {
    let amount = CustomType::new(&format!("Amount {name}:"))
        .with_formatter(&|decimal: Decimal| format!("{:.2}{}", decimal, config.currency))
        .with_validator(|amount: &Decimal| {
            if amount.is_sign_negative() {
                Ok(Validation::Invalid("Amounts cannot be negative.".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .with_error_message("Please type a valid number")
        .with_help_message(&format!(
            "Type the amount in {} using '{}' as a decimal separator",
            config.currency, config.decimal_sep
        ))
        .prompt()?;
    Ok(amount)
}

fn display_expenses(
    path: &Path,
    config: &YarikuriConfig,
    debug: bool,
) -> Result<(), YarikuriError> {
    let ledger = match storage::load(path)? {
        LoadOutcome::Missing => {
            println!(
                "No ledger file found at {}. Add some expenses first.",
                path.display()
            );
            return Ok(());
        }
        LoadOutcome::Loaded(ledger) => ledger,
    };

    if debug {
        println!("=== Ledger ===\n{ledger:?}\n==============");
    }

    if ledger.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    let mut options = vec![DisplayChoice::AllMonths];
    options.extend(ledger.months().map(DisplayChoice::Single));
    let choice = match Select::new("Which months?", options).prompt() {
        Ok(choice) => choice,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(())
        }
        Err(err) => return Err(err.into()),
    };

    match choice {
        DisplayChoice::AllMonths => {
            chart::show(&ledger.combine_all(), "All Months Combined", config)
        }
        DisplayChoice::Single(month) => {
            let record = ledger.get(month).ok_or_else(|| {
                YarikuriError::InvalidArgument(format!("no data for month {month}"))
            })?;
            chart::show(record, &format!("Month {month}"), config)
        }
    }
}
