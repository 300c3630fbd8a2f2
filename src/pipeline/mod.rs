//! 批处理流程
//! 每个流程都是无参数的批量任务：输入输出路径全部取自 `PipelineConfig`

mod cards;
mod mechanics;
#[cfg(feature = "remote-loader")]
mod remote;
mod rules;
mod scrape;
mod words;

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::config::{Artifact, PipelineConfig};
use crate::error::MechResult;

/// 流程标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    BuildMechanics,
    ExtractAbilityWords,
    ExtractFlavorWords,
    ExtractRules,
    ExtractGlossary,
    TrimCards,
    DedupeCards,
    ScrapeWiki,
    #[cfg(feature = "remote-loader")]
    FetchCards,
    #[cfg(feature = "remote-loader")]
    HarvestPatch,
    #[cfg(feature = "remote-loader")]
    FetchWiki,
}

impl Pass {
    pub fn name(self) -> &'static str {
        match self {
            Pass::BuildMechanics => "build-mechanics",
            Pass::ExtractAbilityWords => "extract-ability-words",
            Pass::ExtractFlavorWords => "extract-flavor-words",
            Pass::ExtractRules => "extract-rules",
            Pass::ExtractGlossary => "extract-glossary",
            Pass::TrimCards => "trim-cards",
            Pass::DedupeCards => "dedupe-cards",
            Pass::ScrapeWiki => "scrape-wiki",
            #[cfg(feature = "remote-loader")]
            Pass::FetchCards => "fetch-cards",
            #[cfg(feature = "remote-loader")]
            Pass::HarvestPatch => "harvest-patch",
            #[cfg(feature = "remote-loader")]
            Pass::FetchWiki => "fetch-wiki",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 流程执行摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub pass: Pass,
    /// 主产物记录数
    pub records: usize,
    /// 写出的文件
    pub outputs: Vec<PathBuf>,
}

impl PassReport {
    fn new(pass: Pass, records: usize) -> Self {
        Self {
            pass,
            records,
            outputs: Vec::new(),
        }
    }

    fn output(mut self, path: PathBuf) -> Self {
        self.outputs.push(path);
        self
    }
}

/// 流程执行器
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn path(&self, artifact: Artifact) -> PathBuf {
        self.config.path(artifact)
    }

    /// 执行单个流程并记录摘要
    pub fn run(&self, pass: Pass) -> MechResult<PassReport> {
        let started = Instant::now();
        info!("Running {}", pass);

        let report = match pass {
            Pass::BuildMechanics => self.build_mechanics()?,
            Pass::ExtractAbilityWords => self.extract_ability_words()?,
            Pass::ExtractFlavorWords => self.extract_flavor_words()?,
            Pass::ExtractRules => self.extract_rules()?,
            Pass::ExtractGlossary => self.extract_glossary()?,
            Pass::TrimCards => self.trim_cards()?,
            Pass::DedupeCards => self.dedupe_cards()?,
            Pass::ScrapeWiki => self.scrape_wiki()?,
            #[cfg(feature = "remote-loader")]
            Pass::FetchCards => self.fetch_cards()?,
            #[cfg(feature = "remote-loader")]
            Pass::HarvestPatch => self.harvest_patch()?,
            #[cfg(feature = "remote-loader")]
            Pass::FetchWiki => self.fetch_wiki()?,
        };

        for output in &report.outputs {
            info!("Saved {}", output.display());
        }
        info!(
            "{} finished | {} records | {:.3}s",
            pass,
            report.records,
            started.elapsed().as_secs_f64()
        );
        Ok(report)
    }
}
