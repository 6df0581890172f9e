use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "codex-extract",
    version,
    about = "Food codex section, keyword and link extraction tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Validate(ValidateArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = 50)]
    pub min_content_chars: usize,

    #[arg(long, default_value_t = 10)]
    pub max_keywords: usize,

    #[arg(long, value_enum, default_value_t = CodePage::Cp949)]
    pub code_page: CodePage,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CodePage {
    Cp949,
    None,
}

impl CodePage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cp949 => "cp949",
            Self::None => "none",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = 50)]
    pub min_content_chars: usize,

    #[arg(long, default_value_t = 10)]
    pub max_keywords: usize,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub keyword: Option<String>,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
