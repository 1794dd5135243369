use std::io;

use chrono::{Days, Utc};
use utwil::{Auth, RawPhoneNumber, TwilioClient};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = TwilioClient::new(Auth::new(
        required_env("TWILIO_ACCOUNT_SID")?,
        required_env("TWILIO_AUTH_TOKEN")?,
    )?);

    let week_ago = Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(7))
        .ok_or_else(|| io::Error::other("date out of range"))?;

    let mut query = client.calls().started_after(week_ago);
    if let Ok(from) = std::env::var("TWILIO_DEFAULT_FROM") {
        query = query.from_number(RawPhoneNumber::new(from)?);
    }

    let calls = query.iter();
    let mut count = 0usize;
    while let Some(call) = calls.try_next().await {
        count += 1;
        println!(
            "{} {} -> {} [{}] {:?}s",
            call.sid, call.from, call.to, call.status, call.duration
        );
    }
    if let Some(err) = calls.last_error().await {
        eprintln!("listing stopped after {count} calls: {err}");
    } else {
        println!("{count} calls in the last week");
    }

    Ok(())
}
