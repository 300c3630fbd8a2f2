//! mtgmech 命令行入口
//! 每个子命令执行一个批处理流程；`all` 按依赖顺序执行全部本地流程
//!
//! 运行示例：
//! cargo run --release -- build-mechanics --static-dir data/static
//! RUST_LOG=debug cargo run -- extract-flavor-words

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mtgmech::{Artifact, Pass, Pipeline, PipelineConfig, RemoteOptions, RetryPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mtgmech", version, about = "Build an ML-ready dataset of Magic: The Gathering mechanics")]
struct Cli {
    /// 原始数据目录
    #[arg(long, global = true, default_value = "data/raw")]
    raw_dir: PathBuf,

    /// 整理后数据目录
    #[arg(long, global = true, default_value = "data/static")]
    static_dir: PathBuf,

    /// 覆盖单个产物路径（可重复），如 `--path mechanics=out/mechanics.json`
    #[arg(long = "path", value_name = "KEY=PATH", global = true, value_parser = parse_artifact_path)]
    paths: Vec<(Artifact, PathBuf)>,

    /// 每条机制保留的卡牌样本数
    #[arg(long, global = true, default_value_t = 10)]
    sample_size: usize,

    /// 风味词过滤额外视为机制词的词条（可重复，默认 visit）
    #[arg(long = "extra-mechanic-word", value_name = "WORD", global = true)]
    extra_mechanic_words: Vec<String>,

    /// HTTP 超时（秒）
    #[arg(long, global = true, default_value_t = 60)]
    timeout: u64,

    /// 请求失败后的重试次数
    #[arg(long, global = true, default_value_t = 2)]
    retries: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 合并全部来源并去重，写出机制数据集
    BuildMechanics,
    /// 提取能力词出现记录
    ExtractAbilityWords,
    /// 提取风味词出现记录与拒绝清单
    ExtractFlavorWords,
    /// 从综合规则文本提取关键字能力与关键字动作
    ExtractRules,
    /// 从综合规则文本提取术语表
    ExtractGlossary,
    /// 裁剪批量卡牌数据
    TrimCards,
    /// 按规则身份去重卡牌
    DedupeCards,
    /// 抓取关键字列表页面中的表格行
    ScrapeWiki {
        /// 先下载页面再抓取
        #[cfg(feature = "remote-loader")]
        #[arg(long)]
        fetch: bool,
    },
    /// 下载 Scryfall 批量卡牌数据
    #[cfg(feature = "remote-loader")]
    FetchCards,
    /// 通过 Scryfall 检索采集补丁表
    #[cfg(feature = "remote-loader")]
    HarvestPatch,
    /// 按依赖顺序执行全部本地流程
    All,
}

impl Command {
    fn passes(&self) -> Vec<Pass> {
        match self {
            Command::BuildMechanics => vec![Pass::BuildMechanics],
            Command::ExtractAbilityWords => vec![Pass::ExtractAbilityWords],
            Command::ExtractFlavorWords => vec![Pass::ExtractFlavorWords],
            Command::ExtractRules => vec![Pass::ExtractRules],
            Command::ExtractGlossary => vec![Pass::ExtractGlossary],
            Command::TrimCards => vec![Pass::TrimCards],
            Command::DedupeCards => vec![Pass::DedupeCards],
            #[cfg(feature = "remote-loader")]
            Command::ScrapeWiki { fetch: true } => vec![Pass::FetchWiki, Pass::ScrapeWiki],
            Command::ScrapeWiki { .. } => vec![Pass::ScrapeWiki],
            #[cfg(feature = "remote-loader")]
            Command::FetchCards => vec![Pass::FetchCards],
            #[cfg(feature = "remote-loader")]
            Command::HarvestPatch => vec![Pass::HarvestPatch],
            Command::All => vec![
                Pass::TrimCards,
                Pass::DedupeCards,
                Pass::ExtractRules,
                Pass::ExtractGlossary,
                Pass::ExtractAbilityWords,
                Pass::ExtractFlavorWords,
                Pass::BuildMechanics,
            ],
        }
    }
}

fn parse_artifact_path(value: &str) -> Result<(Artifact, PathBuf), String> {
    let (key, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=PATH, got '{}'", value))?;
    let artifact = key.parse::<Artifact>().map_err(|e| e.to_string())?;
    if path.trim().is_empty() {
        return Err(format!("empty path for '{}'", key));
    }
    Ok((artifact, PathBuf::from(path.trim())))
}

impl Cli {
    fn config(&self) -> PipelineConfig {
        let remote = RemoteOptions {
            timeout: Duration::from_secs(self.timeout),
            retry: match self.retries {
                0 => RetryPolicy::Never,
                n => RetryPolicy::Times(n),
            },
            ..RemoteOptions::default()
        };

        let mut builder = PipelineConfig::builder()
            .raw_dir(&self.raw_dir)
            .static_dir(&self.static_dir)
            .sample_size(self.sample_size)
            .remote_options(remote);
        if !self.extra_mechanic_words.is_empty() {
            builder = builder.extra_mechanic_words(self.extra_mechanic_words.iter().cloned());
        }
        for (artifact, path) in &self.paths {
            builder = builder.artifact_path(*artifact, path);
        }
        builder.build()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pipeline = Pipeline::new(cli.config());

    for pass in cli.command.passes() {
        pipeline.run(pass).with_context(|| format!("{} failed", pass))?;
    }
    Ok(())
}
