use anyhow::Context;
use reqwest::Client as ReqwestClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use twilio::Client as TwilioClient;
use voicemail::{
    archive::{Archiver, MediaFetcher, S3Uploader},
    secrets::Secrets,
    CONFIG,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment and logger
    dotenv::dotenv().ok();
    env_logger::init();

    // Load the secrets
    let secrets = Secrets::from_env()?;

    // Initialize the twilio client
    log::info!("Initializing the Twilio client");
    let twilio = TwilioClient::new(&secrets.twilio_account_sid, &secrets.twilio_auth_token)
        .with_signature_verification(CONFIG.settings.verify_signatures);

    // Initialize the S3 client
    log::info!("Initializing the S3 client for bucket {}", secrets.aws_bucket_name);
    let uploader = S3Uploader::new(&secrets).await;

    // Recording media is private to the account, fetch it with the same credentials
    let fetcher = MediaFetcher::new(ReqwestClient::new(), CONFIG.recording.local_path)
        .with_basic_auth(&secrets.twilio_account_sid, &secrets.twilio_auth_token);

    let archiver = Arc::new(Archiver::new(
        Arc::new(twilio.clone()),
        fetcher,
        Arc::new(uploader),
    ));

    // Initialize the TCP listener
    log::info!(
        "Connecting to the server at {}",
        CONFIG.settings.local_address
    );
    let tcp = TcpListener::bind(CONFIG.settings.local_address)
        .await
        .context("Failed to connect to the server")?;

    // Start the webserver
    log::info!("Starting the webserver");
    axum::serve(tcp, voicemail::router(twilio, archiver).into_make_service())
        .await
        .context("Failed to start the server")
}
