use bikestatus::config::parse_timeout_secs;
use bikestatus::form::render::render_form;
use bikestatus::{ClientConfig, Field, FormError, PredictionForm};
use clap::Parser;
use log::info;
use std::process::ExitCode;

/// Ask the prediction service whether a stolen bike is likely to be recovered.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Primary offence, e.g. "THEFT UNDER"
    #[arg(long)]
    primary_offence: String,
    /// Occurrence day of week, e.g. Wednesday
    #[arg(long)]
    occ_dow: String,
    /// Report day of week, e.g. Friday
    #[arg(long)]
    report_dow: String,
    /// Neighbourhood number (HOOD_158), e.g. 168
    #[arg(long)]
    hood_158: String,
    /// Bike make, e.g. GIANT
    #[arg(long)]
    bike_make: String,
    /// Bike type, e.g. RG
    #[arg(long)]
    bike_type: String,
    /// Bike colour, e.g. GRN
    #[arg(long)]
    bike_colour: String,
    /// Bike cost, e.g. 4500
    #[arg(long)]
    bike_cost: String,
    /// Location type, e.g. "Commercial Places"
    #[arg(long)]
    location_type: String,
    /// Premises type, e.g. Outside
    #[arg(long)]
    premises_type: String,

    /// Prediction endpoint; overrides BIKESTATUS_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,
    /// Give up on the service after this many seconds; overrides BIKESTATUS_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<String>,
    /// Print the filled-in form before submitting
    #[arg(short, long)]
    show_form: bool,
}

impl Args {
    fn values(&self) -> [(Field, &str); Field::COUNT] {
        [
            (Field::PrimaryOffence, self.primary_offence.as_str()),
            (Field::OccDow, self.occ_dow.as_str()),
            (Field::ReportDow, self.report_dow.as_str()),
            (Field::Hood158, self.hood_158.as_str()),
            (Field::BikeMake, self.bike_make.as_str()),
            (Field::BikeType, self.bike_type.as_str()),
            (Field::BikeColour, self.bike_colour.as_str()),
            (Field::BikeCost, self.bike_cost.as_str()),
            (Field::LocationType, self.location_type.as_str()),
            (Field::PremisesType, self.premises_type.as_str()),
        ]
    }

    fn config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = &self.timeout_secs {
            config = config.with_timeout(parse_timeout_secs(secs)?);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    bikestatus::init_logger();
    let args = Args::parse();

    let config = args.config()?;
    info!("Using prediction endpoint {}", config.endpoint);
    let form = PredictionForm::with_config(config)?;

    for (field, value) in args.values() {
        form.update_field(field, value).await;
    }
    if args.show_form {
        println!("{}", render_form(&form.snapshot().await));
    }

    match form.submit().await {
        Err(err @ FormError::MissingFields(_)) => {
            // Blocked before anything reached the display state
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
        Ok(_) => {
            println!("{}", form.render().await);
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => {
            eprintln!("{}", form.render().await);
            Ok(ExitCode::FAILURE)
        }
    }
}
