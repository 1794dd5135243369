use std::io;

use utwil::{Auth, RawPhoneNumber, TwilioClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let account_sid = std::env::var("TWILIO_ACCOUNT_SID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TWILIO_ACCOUNT_SID environment variable is required",
        )
    })?;
    let auth_token = std::env::var("TWILIO_AUTH_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TWILIO_AUTH_TOKEN environment variable is required",
        )
    })?;
    let phone = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TWILIO_DEFAULT_TO").ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "pass a phone number or set TWILIO_DEFAULT_TO",
            )
        })?;

    let client = TwilioClient::new(Auth::new(account_sid, auth_token)?);
    let lookup = client.lookup(RawPhoneNumber::new(phone)?).await?;
    println!(
        "{} ({}) national: {:?}",
        lookup.phone_number, lookup.country_code, lookup.national_format
    );
    if let Some(carrier) = lookup.carrier {
        println!(
            "carrier: {:?}, type: {:?}",
            carrier.name, carrier.carrier_type
        );
    }

    Ok(())
}
