use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use zipforce::{AttackMode, CandidatePlan, CharsetSpec};

/// Educational brute-force tool for password-protected ZIP files you own
#[derive(Parser, Debug)]
#[command(name = "zipforce")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
  zipforce --mode password_only --zip-file secret.zip --password-length 4 --password-digits --max-attempts 10000\n  \
  zipforce --dry-run --mode password_only --password-length 4 --password-digits --password-lower\n  \
  zipforce --mode password_only --zip-file secret.zip --password-lower --extract-to ./out")]
pub struct Cli {
    /// What to brute-force
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Password-protected ZIP file to test
    #[arg(long, value_name = "PATH", env = "ZIPFORCE_ZIP_FILE")]
    pub zip_file: Option<PathBuf>,

    /// Username candidate length
    #[arg(long, value_name = "N", default_value_t = 4, help_heading = "Username Generation")]
    pub username_length: usize,

    /// Include digits in username candidates
    #[arg(long, help_heading = "Username Generation")]
    pub username_digits: bool,

    /// Include lowercase letters in username candidates
    #[arg(long, help_heading = "Username Generation")]
    pub username_lower: bool,

    /// Include uppercase letters in username candidates
    #[arg(long, help_heading = "Username Generation")]
    pub username_upper: bool,

    /// Include punctuation in username candidates
    #[arg(long, help_heading = "Username Generation")]
    pub username_special: bool,

    /// Password candidate length
    #[arg(long, value_name = "N", default_value_t = 4, help_heading = "Password Generation")]
    pub password_length: usize,

    /// Include digits in password candidates
    #[arg(long, help_heading = "Password Generation")]
    pub password_digits: bool,

    /// Include lowercase letters in password candidates
    #[arg(long, help_heading = "Password Generation")]
    pub password_lower: bool,

    /// Include uppercase letters in password candidates
    #[arg(long, help_heading = "Password Generation")]
    pub password_upper: bool,

    /// Include punctuation in password candidates
    #[arg(long, help_heading = "Password Generation")]
    pub password_special: bool,

    /// Maximum attempts before stopping
    #[arg(long, value_name = "N", default_value_t = 10_000, env = "ZIPFORCE_MAX_ATTEMPTS")]
    pub max_attempts: u64,

    /// Show the candidate generation strategy without testing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Report progress every N attempts
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub progress_every: u64,

    /// Extract the archive into DIR once the password is found
    #[arg(long, value_name = "DIR")]
    pub extract_to: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Command-line mirror of [`AttackMode`], so the library stays free of clap
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    #[value(name = "username_only")]
    UsernameOnly,
    #[value(name = "password_only")]
    PasswordOnly,
    #[value(name = "both")]
    Both,
}

impl From<ModeArg> for AttackMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::UsernameOnly => AttackMode::UsernameOnly,
            ModeArg::PasswordOnly => AttackMode::PasswordOnly,
            ModeArg::Both => AttackMode::Both,
        }
    }
}

impl Cli {
    pub fn mode(&self) -> AttackMode {
        self.mode.into()
    }

    pub fn username_plan(&self) -> CandidatePlan {
        CandidatePlan {
            length: self.username_length,
            charset: CharsetSpec::new(
                self.username_digits,
                self.username_lower,
                self.username_upper,
                self.username_special,
            ),
        }
    }

    pub fn password_plan(&self) -> CandidatePlan {
        CandidatePlan {
            length: self.password_length,
            charset: CharsetSpec::new(
                self.password_digits,
                self.password_lower,
                self.password_upper,
                self.password_special,
            ),
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
