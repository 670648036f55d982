use crate::adapters::DEFAULT_API_ENDPOINT;
use crate::config::{validate_mailer_config, DEFAULT_FROM_ADDRESS};
use crate::core::mailer::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::core::MailerConfigProvider;
use crate::utils::error::{ConectaError, Result};
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "conecta")]
#[command(about = "ConectaFunerarias utilities: RUT tools and batched email delivery")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 智利 RUT 工具
    #[command(subcommand)]
    Rut(RutCommand),

    /// 每個收件人寄一封信，分批送出
    Send(SendArgs),
}

#[derive(Debug, Clone, Subcommand)]
pub enum RutCommand {
    /// Check whether a RUT is well formed and its check digit matches
    Validate { rut: String },
    /// Reformat as 12.345.678-5 (no validation)
    Format { rut: String },
    /// Keep only digits and K
    Clean { rut: String },
    /// Compute the check character for a number
    Check { digits: u32 },
}

#[derive(Debug, Clone, Args)]
pub struct SendArgs {
    #[arg(long, help = "File with one recipient address per line")]
    pub recipients: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long, help = "File containing the HTML body")]
    pub html: String,

    #[arg(long, help = "TOML configuration file; overrides the provider flags below")]
    pub config: Option<String>,

    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "RESEND_API_ENDPOINT", default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "EMAIL_FROM", default_value = DEFAULT_FROM_ADDRESS)]
    pub from: String,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    #[arg(long, default_value_t = DEFAULT_BATCH_DELAY.as_millis() as u64)]
    pub batch_delay_ms: u64,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl SendArgs {
    /// 一行一個地址，空行與 `#` 開頭的行略過
    pub fn read_recipients(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.recipients)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    pub fn read_html(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.html)?)
    }
}

impl MailerConfigProvider for SendArgs {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn from_address(&self) -> &str {
        &self.from
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for SendArgs {
    fn validate(&self) -> Result<()> {
        validate_path("recipients", &self.recipients)?;
        validate_path("html", &self.html)?;

        if self.subject.is_empty() {
            return Err(ConectaError::validation("subject cannot be empty"));
        }

        // 有 TOML 檔時 provider 設定由檔案負責檢查
        if self.config.is_none() {
            validate_required_field("api_key", &self.api_key)?;
            validate_mailer_config(self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn send_args(extra: &[&str]) -> SendArgs {
        let mut argv = vec![
            "conecta",
            "send",
            "--recipients",
            "list.txt",
            "--subject",
            "Misa de responso",
            "--html",
            "body.html",
        ];
        argv.extend_from_slice(extra);

        match CliConfig::parse_from(argv).command {
            Command::Send(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rut_subcommands() {
        let cli = CliConfig::parse_from(["conecta", "rut", "format", "76543216"]);
        assert!(matches!(cli.command, Command::Rut(RutCommand::Format { rut }) if rut == "76543216"));

        let cli = CliConfig::parse_from(["conecta", "--verbose", "rut", "check", "7654321"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Rut(RutCommand::Check { digits: 7654321 })));
    }

    #[test]
    fn test_send_defaults() {
        let args = send_args(&["--api-key", "re_cli"]);

        assert_eq!(args.api_key(), "re_cli");
        assert_eq!(args.from_address(), DEFAULT_FROM_ADDRESS);
        assert_eq!(args.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(args.batch_delay(), DEFAULT_BATCH_DELAY);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_whitespace_subject_passes_validation() {
        let mut args = send_args(&["--api-key", "re_cli"]);
        args.subject = " ".to_string();
        assert!(args.validate().is_ok());

        args.subject = String::new();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_send_rejects_zero_batch_size() {
        let args = send_args(&["--api-key", "re_cli", "--batch-size", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_read_recipients_skips_blank_and_comment_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# familias suscritas").unwrap();
        writeln!(file, "ana@example.cl").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  pedro@example.cl  ").unwrap();

        let mut args = send_args(&["--api-key", "re_cli"]);
        args.recipients = file.path().to_str().unwrap().to_string();

        let recipients = args.read_recipients().unwrap();
        assert_eq!(recipients, vec!["ana@example.cl", "pedro@example.cl"]);
    }
}
