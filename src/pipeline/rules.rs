//! extract-rules / extract-glossary：解析综合规则纯文本

use mtgmech_engine::{CompRulesParser, RulesSection};
use tracing::info;

use super::{Pass, PassReport, Pipeline};
use crate::config::Artifact;
use crate::error::MechResult;
use crate::source::{ArtifactWriter, SourceLoader};

impl Pipeline {
    pub(crate) fn extract_rules(&self) -> MechResult<PassReport> {
        let text = SourceLoader::load_text(&self.path(Artifact::CompRulesText))?;

        let abilities = CompRulesParser::keyword_entries(&text, RulesSection::KeywordAbilities)?;
        let actions = CompRulesParser::keyword_entries(&text, RulesSection::KeywordActions)?;
        info!(
            "Extracted {} keyword abilities and {} keyword actions",
            abilities.len(),
            actions.len()
        );

        let abilities_path = self.path(Artifact::KeywordAbilityRules);
        let actions_path = self.path(Artifact::KeywordActionRules);
        ArtifactWriter::write_json(&abilities_path, &abilities)?;
        ArtifactWriter::write_json(&actions_path, &actions)?;

        Ok(PassReport::new(Pass::ExtractRules, abilities.len() + actions.len())
            .output(abilities_path)
            .output(actions_path))
    }

    pub(crate) fn extract_glossary(&self) -> MechResult<PassReport> {
        let text = SourceLoader::load_text(&self.path(Artifact::CompRulesText))?;
        let terms = CompRulesParser::glossary_terms(&text)?;
        info!("Extracted {} glossary terms", terms.len());

        let output = self.path(Artifact::GlossaryTerms);
        ArtifactWriter::write_json(&output, &terms)?;
        Ok(PassReport::new(Pass::ExtractGlossary, terms.len()).output(output))
    }
}
