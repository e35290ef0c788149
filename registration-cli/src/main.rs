use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use registration::highlight::mark_otp;
use registration::{
    AppConfig, RegistrationAction, RegistrationManager, RegistrationStep, VoterClient,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Register a voter from the terminal against the registration service.
#[derive(Parser, Debug)]
#[command(name = "voter-registration", version)]
struct Args {
    /// 12-digit Aadhaar number
    #[arg(long)]
    aadhaar: String,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    phone: String,

    /// Passcode to submit; prompted for when omitted
    #[arg(long)]
    otp: Option<String>,

    /// Overrides VOTER_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Overrides VOTER_SCAN_DURATION_MS
    #[arg(long)]
    scan_ms: Option<u64>,
}

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("reading VOTER_* environment")?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(ms) = args.scan_ms {
        config.scan_duration_ms = ms;
    }
    tracing::info!(api = %config.api_base_url, "starting registration");

    let api = Arc::new(VoterClient::from_config(&config));
    let mut manager = RegistrationManager::new(api, config.scan_schedule());
    let started = Instant::now();

    manager.dispatch(RegistrationAction::EditAadhaar { input: args.aadhaar });
    manager.dispatch(RegistrationAction::EditName { input: args.name });
    manager.dispatch(RegistrationAction::EditPhone { input: args.phone });
    manager.flush(0.0);
    if !manager.state().aadhaar_ready() {
        bail!("Aadhaar number must be exactly 12 digits");
    }

    // Step 1: request an OTP
    manager.dispatch(RegistrationAction::SubmitAadhaar);
    drive(&mut manager, started, |m| {
        m.state().step != RegistrationStep::AadhaarEntry
    })
    .await?;

    let modal = manager.modal();
    println!("{}", mark_otp(&modal.message, &modal.otp, "[", "]"));
    manager.dispatch(RegistrationAction::DismissOtpModal);

    // Step 2: verify it
    let otp = match args.otp {
        Some(otp) => otp,
        None => prompt("Enter OTP: ").await?,
    };
    manager.dispatch(RegistrationAction::EditOtp { input: otp });
    manager.flush(elapsed(started));
    if !manager.state().otp_ready() {
        bail!("OTP must be exactly 6 digits");
    }
    manager.dispatch(RegistrationAction::SubmitOtp);
    drive(&mut manager, started, |m| m.state().step != RegistrationStep::OtpEntry).await?;

    // Step 3: simulated fingerprint scan
    println!("Scanning fingerprint...");
    manager.dispatch(RegistrationAction::StartScan);
    drive(&mut manager, started, |m| m.state().scan_complete).await?;
    println!("Fingerprint captured");
    drive(&mut manager, started, |m| m.state().step == RegistrationStep::Complete).await?;

    let state = manager.state();
    println!("Registration complete");
    println!("  session:   {}", state.session_id);
    if let Some(completed_at) = &state.completed_at {
        println!("  completed: {}", completed_at);
    }

    manager.dispatch(RegistrationAction::Finish);
    manager.flush(elapsed(started));
    if manager.take_exit_request() {
        tracing::debug!("exit requested, wizard discarded");
    }
    Ok(())
}

fn elapsed(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}

/// Polls the wizard until `done` holds. A notice ends the run: the terminal
/// flow has no retry.
async fn drive<F>(
    manager: &mut RegistrationManager,
    started: Instant,
    done: F,
) -> anyhow::Result<()>
where
    F: Fn(&RegistrationManager) -> bool,
{
    loop {
        manager.update(elapsed(started));
        if let Some(notice) = &manager.state().notice {
            bail!("{}", notice.message);
        }
        if done(manager) {
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

async fn prompt(label: &str) -> anyhow::Result<String> {
    use std::io::Write;

    print!("{label}");
    std::io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("reading from stdin")?;
    Ok(line.trim().to_string())
}
