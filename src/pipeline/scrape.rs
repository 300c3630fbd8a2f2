//! scrape-wiki：从本地保存的关键字列表页面抓取表格行

use tracing::{info, warn};

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::scrape::WikiTableExtractor;
use crate::source::{ArtifactWriter, SourceLoader};

impl Pipeline {
    pub(crate) fn scrape_wiki(&self) -> MechResult<PassReport> {
        let html = SourceLoader::load_text(&self.path(Artifact::WikiPage))?;
        let rows = WikiTableExtractor::extract(&html);
        if rows.is_empty() {
            warn!("No mechanic rows found in the keyword page");
        } else {
            info!("Scraped {} mechanic rows", rows.len());
        }

        let output = self.path(Artifact::WikiMechanics);
        ArtifactWriter::write_json(&output, &rows)?;
        Ok(PassReport::new(Pass::ScrapeWiki, rows.len()).output(output))
    }
}
