//! CLI runner - executes commands

use crate::api::Client;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::types::InvestmentType;
use serde_json::Value;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Loans { limit, page_size } => self.loans(*limit, *page_size).await,
            Commands::Loan { id, raw } => self.loan(id, *raw).await,
            Commands::Investments {
                kind,
                limit,
                page_size,
            } => self.investments(*kind, *limit, *page_size).await,
            Commands::Logout => self.logout().await,
        }
    }

    /// Load configuration from the config file or the environment
    fn load_config(&self, page_size: Option<u32>) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_yaml_file(path)?,
            None => ClientConfig::from_env().context("No --config given")?,
        };

        if let Some(path) = &self.cli.credentials {
            config.credentials_path = Some(path.clone());
        }
        if let Some(page_size) = page_size {
            config.page_size = page_size;
        }
        Ok(config)
    }

    fn client(&self, page_size: Option<u32>) -> Result<Client> {
        let config = self.load_config(page_size)?;
        info!(base_url = %config.base_url, page_size = config.page_size, "Opening session");
        Client::new(config)
    }

    async fn loans(&self, limit: Option<u64>, page_size: Option<u32>) -> Result<()> {
        let client = self.client(page_size)?;
        let rows = client.loans().list(limit).await?;
        info!(count = rows.len(), "Fetched loans");
        self.output_rows(&rows)
    }

    async fn loan(&self, id: &str, raw: bool) -> Result<()> {
        let client = self.client(None)?;
        let value = if raw {
            client.loans().get_raw(id).await?
        } else {
            serde_json::to_value(client.loans().get(id).await?)?
        };
        println!("{}", render(self.cli.format, &value)?);
        Ok(())
    }

    async fn investments(
        &self,
        kind: InvestmentType,
        limit: Option<u64>,
        page_size: Option<u32>,
    ) -> Result<()> {
        let client = self.client(page_size)?;
        let rows = client.investor().investments(kind, limit).await?;
        info!(%kind, count = rows.len(), "Fetched investments");
        self.output_rows(&rows)
    }

    async fn logout(&self) -> Result<()> {
        let client = self.client(None)?;
        client.logout().await?;
        info!("Logged out");
        Ok(())
    }

    /// Output records
    fn output_rows(&self, rows: &[Value]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for row in rows {
                    println!("{}", render(OutputFormat::Json, row)?);
                }
            }
            OutputFormat::Pretty => {
                println!("{}", render(OutputFormat::Pretty, &Value::from(rows.to_vec()))?);
            }
        }
        Ok(())
    }
}

/// Render a value in the given format
fn render(format: OutputFormat, value: &Value) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(rendered)
}
