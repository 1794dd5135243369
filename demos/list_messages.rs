use std::io;

use futures::StreamExt;
use utwil::{Auth, QueryDate, RawPhoneNumber, TwilioClient};

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
    let to = RawPhoneNumber::new(required_env("TWILIO_DEFAULT_TO")?)?;
    let since = std::env::var("TWILIO_SINCE").unwrap_or_else(|_| "2014-01-01".to_owned());

    let stream = client
        .messages()
        .to_number(to)
        .sent_after(QueryDate::parse(&since)?)
        .iter()
        .into_stream();
    futures::pin_mut!(stream);

    while let Some(item) = stream.next().await {
        match item {
            Ok(msg) => println!("{} {:?}: {}", msg.sid, msg.date_sent, msg.body),
            Err(err) => eprintln!("listing failed: {err}"),
        }
    }

    Ok(())
}
