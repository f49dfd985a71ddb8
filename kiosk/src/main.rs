use clap::Parser;
use log::{debug, error};
use rust_decimal::Decimal;
use std::process::ExitCode;

use garage::{ConfigError, GarageService, GarageState, RateTable, TimeScale};
use kiosk::run;

#[derive(Parser, Debug)]
#[command(version, about = "Parking garage ticket kiosk", long_about = None)]
struct Args {
    /// Number of parking spaces, numbered from 1
    #[arg(short = 's', long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    spaces: u32,

    /// Price of one hour
    #[arg(long, default_value = "5.00")]
    hour_rate: Decimal,

    /// Price of one day
    #[arg(long, default_value = "100.00")]
    day_rate: Decimal,

    /// Price of one week
    #[arg(long, default_value = "500.00")]
    week_rate: Decimal,

    /// Billable seconds per elapsed second; 3600 bills every second as an hour, 1 is real time
    #[arg(short = 't', long, default_value_t = TimeScale::ACCELERATED.multiplier())]
    time_scale: u32,

    /// Do not clear the terminal between commands
    #[arg(long)]
    no_clear: bool,
}

impl Args {
    fn garage(&self) -> Result<GarageService, ConfigError> {
        let rates = RateTable::new(self.hour_rate, self.day_rate, self.week_rate)?;
        let state = GarageState::with_capacity(rates, self.spaces)?;
        Ok(GarageService::new(state, TimeScale::new(self.time_scale)?))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    debug!("Starting kiosk with {:?}", args);

    let service = match args.garage() {
        Ok(service) => service,
        Err(e) => {
            error!("Invalid garage configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(service, !args.no_clear).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Kiosk stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
