//! trim-cards / dedupe-cards：整理批量卡牌数据

use mtgmech_engine::CardSet;
use tracing::info;

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::source::{ArtifactWriter, SourceLoader};

impl Pipeline {
    pub(crate) fn trim_cards(&self) -> MechResult<PassReport> {
        let cards = SourceLoader::load_cards(&self.path(Artifact::BulkCards))?;
        let outcome = CardSet::trim(cards);
        info!(
            "Trimmed card set | kept {} | dropped {} without rules text",
            outcome.cards.len(),
            outcome.removed
        );

        let output = self.path(Artifact::TrimmedCards);
        ArtifactWriter::write_json(&output, &outcome.cards)?;
        Ok(PassReport::new(Pass::TrimCards, outcome.cards.len()).output(output))
    }

    pub(crate) fn dedupe_cards(&self) -> MechResult<PassReport> {
        let cards = SourceLoader::load_cards(&self.path(Artifact::TrimmedCards))?;
        let total = cards.len();
        let outcome = CardSet::dedupe_by_rules(cards);
        info!("Deduplicated: reduced from {} to {} cards", total, outcome.cards.len());

        let output = self.path(Artifact::DedupedCards);
        ArtifactWriter::write_json(&output, &outcome.cards)?;
        Ok(PassReport::new(Pass::DedupeCards, outcome.cards.len()).output(output))
    }
}
