use std::io;

use utwil::{Auth, MessageBody, RawPhoneNumber, TwilioClient};

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

    let account_sid = required_env("TWILIO_ACCOUNT_SID")?;
    let auth_token = required_env("TWILIO_AUTH_TOKEN")?;
    let from = RawPhoneNumber::new(required_env("TWILIO_DEFAULT_FROM")?)?;
    let to = RawPhoneNumber::new(required_env("TWILIO_DEFAULT_TO")?)?;
    let body = std::env::var("TWILIO_MESSAGE")
        .unwrap_or_else(|_| "Hello from the utwil demo.".to_owned());

    let client = TwilioClient::new(Auth::new(account_sid, auth_token)?);
    let message = client.send_sms(from, to, MessageBody::new(body)?).await?;
    println!(
        "sid: {}, status: {}, segments: {:?}",
        message.sid, message.status, message.num_segments
    );

    Ok(())
}
