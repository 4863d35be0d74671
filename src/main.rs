//! zipforce - educational brute-force password recovery for ZIP archives
//!
//! Shows a legal notice, then either prints the candidate generation strategy
//! (dry run) or searches a password-protected ZIP archive.

mod cli;

use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zipforce::{
    candidate::format_count, disclaimer, internal_error, plan_generator, Alphabet, AttackDriver,
    AttackReport, AttackSettings, AttackStatus, CandidatePlan, Result, ZipForceError,
    ZipPasswordTester,
};

use crate::cli::Cli;

/// Candidates shown per role in a dry run
const DRY_RUN_EXAMPLES: usize = 5;

/// Nominal rate used for dry-run time estimates
const NOMINAL_RATE: f64 = 1000.0;

fn setup_logging(level: &str) {
    // RUST_LOG wins over the CLI flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level());

    if let Err(e) = zipforce::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    }
}

/// Ctrl-C routing shared by the whole run.
///
/// While an attack runs, the first interrupt asks the driver to stop and the
/// second exits. Outside an attack every interrupt exits immediately.
#[derive(Clone, Default)]
struct Interrupt {
    cancel: Arc<AtomicBool>,
    attacking: Arc<AtomicBool>,
}

impl Interrupt {
    fn install() -> Self {
        let interrupt = Self::default();
        let handler = interrupt.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if handler.should_exit() {
                    eprintln!();
                    eprintln!("Interrupted. Exiting.");
                    process::exit(1);
                }
                eprintln!();
                eprintln!("Interrupt received, stopping after the current attempt (Ctrl-C again to quit)");
            }
        });
        interrupt
    }

    /// Record one interrupt and tell whether the process should exit now
    fn should_exit(&self) -> bool {
        let repeated = self.cancel.swap(true, Ordering::Relaxed);
        repeated || !self.attacking.load(Ordering::Relaxed)
    }

    fn set_attacking(&self, attacking: bool) {
        self.attacking.store(attacking, Ordering::Relaxed);
    }
}

/// Main zipforce workflow. Returns whether the run succeeded.
async fn run(cli: Cli) -> Result<bool> {
    let interrupt = Interrupt::install();

    let accepted = tokio::task::spawn_blocking(disclaimer::request_confirmation).await??;
    if !accepted {
        println!("Legal terms not accepted. Exiting.");
        return Ok(false);
    }

    if cli.dry_run {
        dry_run(&cli)?;
        return Ok(true);
    }

    run_attack(cli, interrupt).await
}

/// Print the candidate generation strategy for every role the mode asks for
fn dry_run(cli: &Cli) -> Result<()> {
    let mode = cli.mode();

    println!();
    println!("🧪 DRY RUN - Candidate Generation Strategy");
    println!("══════════════════════════════════════════════════");

    if mode.wants_username() {
        print_plan("USERNAME GENERATION", &cli.username_plan(), cli.max_attempts)?;
    }
    if mode.wants_password() {
        print_plan("PASSWORD GENERATION", &cli.password_plan(), cli.max_attempts)?;
    }

    Ok(())
}

fn print_plan(title: &str, plan: &CandidatePlan, max_attempts: u64) -> Result<()> {
    let generator = plan_generator(plan, Some(max_attempts))?;
    let alphabet = Alphabet::from_spec(&plan.charset)?;
    let space = *generator.space();

    println!();
    println!("{}:", title);
    println!("  Length: {}", plan.length);
    println!("  Character set: {}", alphabet);
    println!("  Total combinations: {}", space.total);
    if space.is_capped() {
        println!("  Within max attempts: {}", space.effective);
    }
    match space.estimated_duration(NOMINAL_RATE) {
        Some(eta) => println!(
            "  Estimated time at {} attempts/sec: {}",
            format_count(NOMINAL_RATE as u128),
            format_duration(eta)
        ),
        None => println!("  Estimated time: too long to estimate"),
    }

    if let Some(last) = space
        .effective
        .exact()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| generator.candidate_at(i))
    {
        println!("  Last candidate within max attempts: {}", last);
    }

    println!("  First candidates:");
    for example in generator.take(DRY_RUN_EXAMPLES) {
        println!("    - {}", example);
    }

    Ok(())
}

async fn run_attack(cli: Cli, interrupt: Interrupt) -> Result<bool> {
    let mode = cli.mode();
    if mode.wants_username() {
        return Err(ZipForceError::config(format!(
            "Mode '{}' needs a target that verifies usernames, but ZIP archives only take a password. Use --mode password_only",
            mode
        )));
    }

    let zip_file = cli
        .zip_file
        .clone()
        .ok_or_else(|| ZipForceError::config("--zip-file is required unless --dry-run is given"))?;

    let settings = AttackSettings {
        max_attempts: Some(cli.max_attempts),
        progress_interval: cli.progress_every,
    };
    let generator = plan_generator(&cli.password_plan(), settings.max_attempts)?;
    let tester = ZipPasswordTester::open(&zip_file)?;
    let mut driver = AttackDriver::new(tester, settings)?;

    println!();
    println!("🔓 Starting ZIP file attack on: {}", zip_file.display());
    println!("Mode: {}", mode);
    println!("Max attempts: {}", format_count(cli.max_attempts as u128));
    println!("Password search space: {} combinations", generator.space().effective);

    let progress = progress_bar(generator.space().effective.as_u64(), cli.quiet)?;
    let print_lines = progress.is_hidden() && !cli.quiet;
    let bar = progress.clone();
    let cancel = interrupt.cancel.clone();

    interrupt.set_attacking(true);
    let (driver, report) = tokio::task::spawn_blocking(move || {
        let report = driver.run(generator, &cancel, |p| {
            bar.set_position(p.attempts);
            bar.set_message(format!("Testing: '{}'", p.candidate));
            if print_lines {
                println!(
                    "Attempt {} - Testing: '{}' - Rate: {:.1}/sec",
                    format_count(p.attempts as u128),
                    p.candidate,
                    p.attempts_per_second
                );
            }
        });
        (driver, report)
    })
    .await?;
    interrupt.set_attacking(false);
    progress.finish_and_clear();
    let report = report?;

    print_report(&report, &cli);

    if let (Some(credentials), Some(dir)) = (&report.credentials, &cli.extract_to) {
        let files = driver.into_tester().extract_to(&credentials.password, dir)?;
        println!("📦 Extracted {} file(s) to {}", files, dir.display());
    } else if report.succeeded() {
        println!();
        println!("Use this password to open the ZIP file:");
        println!("unzip {}", zip_file.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(report.succeeded())
}

fn progress_bar(total: Option<u64>, quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let bar = match total {
        Some(total) => {
            let style = ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec}) {msg}",
            )
            .map_err(|e| internal_error!("Invalid progress template: {}", e))?
            .progress_chars("#>-");
            ProgressBar::new(total).with_style(style)
        }
        None => {
            let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {human_pos} ({per_sec}) {msg}")
                .map_err(|e| internal_error!("Invalid progress template: {}", e))?;
            ProgressBar::new_spinner().with_style(style)
        }
    };
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}

fn print_report(report: &AttackReport, cli: &Cli) {
    println!();
    match report.status {
        AttackStatus::Succeeded => {
            if let Some(credentials) = &report.credentials {
                println!("✅ SUCCESS! Found password: '{}'", credentials.password);
                println!("Total attempts: {}", format_count(report.attempts as u128));
                println!("Time elapsed: {:.2} seconds", report.elapsed.as_secs_f64());
                println!();
                println!("🎯 CRACKED CREDENTIALS:");
                if let Some(username) = &credentials.username {
                    println!("Username: {}", username);
                }
                println!("Password: {}", credentials.password);
            }
        }
        AttackStatus::Exhausted => {
            if report.attempts >= cli.max_attempts {
                println!("❌ Max attempts reached: {}", format_count(cli.max_attempts as u128));
            } else {
                println!("❌ Search space exhausted after {} attempts", format_count(report.attempts as u128));
            }
            println!("❌ Failed to crack the ZIP file");
        }
        AttackStatus::Interrupted => {
            println!("Attack interrupted by user");
            println!("Attempts before interruption: {}", format_count(report.attempts as u128));
        }
        AttackStatus::Idle | AttackStatus::Running => {}
    }
    println!(
        "📈 {:.1} attempts/sec over {}",
        report.attempts_per_second,
        format_duration(report.elapsed)
    );
}

/// Format a [`Duration`] in the `h m s` format.
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", format_count(days as u128), hours, minutes, seconds)
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
