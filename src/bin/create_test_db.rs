use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Date, Duration, OffsetDateTime};

use budgetwise::{
    Amount, ConnectionManager, EXPENSE_CATEGORIES, NewExpense, NewIncome, create_expense,
    create_income, initialize_db,
};

/// A utility for creating a test database for the BudgetWise server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// How many months of sample entries to create, ending today.
    #[arg(long, short, default_value_t = 6)]
    months: u32,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let Some(database_url) = output_path.to_str() else {
        eprintln!("Output path {output_path:#?} is not valid UTF-8.");
        exit(1);
    };

    println!("Creating database at {output_path:#?}");
    let db = ConnectionManager::new(database_url);
    initialize_db(&db)?;

    println!("Creating sample income and expenses...");
    let today = OffsetDateTime::now_utc().date();
    let (income_count, expense_count) = db.with_transaction(|connection| {
        let mut income_count = 0;
        let mut expense_count = 0;

        for month in 0..args.months {
            let date = today - Duration::days(30 * i64::from(month));

            create_income(sample_income(date), connection)?;
            income_count += 1;

            for (index, category) in EXPENSE_CATEGORIES.iter().enumerate() {
                create_expense(sample_expense(date, index, category), connection)?;
                expense_count += 1;
            }
        }

        Ok((income_count, expense_count))
    })?;

    println!("Created {income_count} income entries and {expense_count} expenses.");
    println!("Success!");

    Ok(())
}

fn sample_income(date: Date) -> NewIncome {
    NewIncome {
        amount: Amount::from_cents(250_000),
        date,
        description: "Monthly pay".to_owned(),
        source: "Salary".to_owned(),
    }
}

fn sample_expense(date: Date, index: usize, category: &str) -> NewExpense {
    let offset = index as i64;

    NewExpense {
        amount: Amount::from_cents(1_250 * (offset + 1)),
        date: date - Duration::days(offset),
        description: format!("Sample {category} expense"),
        category: category.to_owned(),
        tags: (index % 2 == 0).then(|| "sample".to_owned()),
    }
}
