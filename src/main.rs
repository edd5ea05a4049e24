use std::env;
use std::error::Error;
use std::process::ExitCode;

use hudy::client::holidayclient::HolidayClient;
use hudy::client::holidaysource::DirectorySource;
use hudy::configuration::ClientOptions;
use hudy::time::utility::parse_date;

fn run(options: ClientOptions) -> Result<(), Box<dyn Error>> {
    let data_dir = options.data_dir.clone().unwrap_or_else(|| "holidays".into());
    let client = HolidayClient::new(options, DirectorySource::new(data_dir));

    let new_year = parse_date("2024-01-01")?;
    let year_end = parse_date("2024-12-31")?;

    let holidays = client.get_holidays(2024)?;
    println!("Found {} holidays in 2024:", holidays.len());
    for h in holidays.iter() {
        println!("  {}", h);
    }

    println!("Is 2024-01-01 a holiday? {}", client.is_holiday(new_year)?);
    println!("Business days in 2024: {}", client.get_business_days(new_year, year_end)?);
    println!("Next business day after 2024-01-01: {}", client.get_next_business_day(new_year)?);
    println!("10 business days after 2024-01-01: {}", client.add_business_days(new_year, 10)?);

    let stats = client.cache_stats();
    println!("Cache hits: {}, misses: {}, size: {}", stats.hits, stats.misses, stats.size);
    Ok(())
}

fn main() -> ExitCode {
    let options = match env::args().nth(1) {
        Some(config_path) => match ClientOptions::from_reader(&config_path) {
            Ok(options) => options,
            Err(error) => {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        },
        None => ClientOptions::default()
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
