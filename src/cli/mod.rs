use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
}

#[derive(Parser, Debug)]
#[command(name="content_factory", version, about="Generates long-form HTML articles from a CSV of topics via a chat-completion API")]
pub struct Args {
    /// Input CSV: columns `keyword`, `topic`, then one column per section.
    #[arg(long)]
    pub input: Option<String>,

    /// Prompt template name from the template store.
    #[arg(long)]
    pub template: Option<String>,

    /// Print the available template names and exit.
    #[arg(long, default_value_t = false)]
    pub list_templates: bool,

    #[arg(long, value_enum, default_value_t = ProviderKind::OpenAI)]
    pub provider: ProviderKind,

    #[arg(long)]
    pub model: Option<String>,

    /// Output CSV path; defaults to the configured fixed filename.
    #[arg(long)]
    pub output: Option<String>,

    /// If set, also write one `<keyword>.html` per generated article here.
    #[arg(long)]
    pub html_dir: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long, default_value_t = true)]
    pub progress: bool,

    /// Optional TOML config file overriding the built-in defaults.
    #[arg(long)]
    pub config: Option<String>,
}
