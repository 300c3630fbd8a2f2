//! fetch-cards / harvest-patch / fetch-wiki：远程拉取流程
//! 批处理流程本身是同步的，远程请求在单线程运行时上执行

use std::future::Future;

use tracing::info;

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::remote::{RemoteFetcher, DEFAULT_HARVEST_QUERIES};
use crate::source::ArtifactWriter;

fn block_on<F: Future>(future: F) -> MechResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

impl Pipeline {
    fn fetcher(&self) -> MechResult<RemoteFetcher> {
        RemoteFetcher::new(self.config.remote.clone())
    }

    pub(crate) fn fetch_cards(&self) -> MechResult<PassReport> {
        let fetcher = self.fetcher()?;
        let bytes = block_on(fetcher.fetch_bulk_cards())??;

        let output = self.path(Artifact::BulkCards);
        ArtifactWriter::write_bytes(&output, &bytes)?;
        Ok(PassReport::new(Pass::FetchCards, bytes.len()).output(output))
    }

    pub(crate) fn harvest_patch(&self) -> MechResult<PassReport> {
        let fetcher = self.fetcher()?;
        let patch = block_on(fetcher.harvest(&DEFAULT_HARVEST_QUERIES))??;
        let cards: usize = patch.values().map(Vec::len).sum();
        info!("Harvested {} cards across {} patch entries", cards, patch.len());

        let output = self.path(Artifact::PatchTable);
        ArtifactWriter::write_json(&output, &patch)?;
        Ok(PassReport::new(Pass::HarvestPatch, patch.len()).output(output))
    }

    pub(crate) fn fetch_wiki(&self) -> MechResult<PassReport> {
        let fetcher = self.fetcher()?;
        let url = self.config.remote.wiki_url.clone();
        let html = block_on(fetcher.get_text(&url))??;

        let output = self.path(Artifact::WikiPage);
        ArtifactWriter::write_bytes(&output, html.as_bytes())?;
        Ok(PassReport::new(Pass::FetchWiki, html.len()).output(output))
    }
}
