//! Prompt templates for supervisor synthesis and research query writing

use crate::core::team::Team;
use crate::debate::argument::ArgumentStrategy;
use crate::debate::role::AgentRole;
use crate::evidence::fragment::EvidenceFragment;

/// Longest excerpt of one fragment placed in a prompt
const EXCERPT_CHARS: usize = 400;

/// Upper bound on the evidence block of a prompt
const EVIDENCE_BLOCK_CHARS: usize = 2000;

/// Longest excerpt of the best fragment quoted by a fallback argument
const FALLBACK_EXCERPT_CHARS: usize = 200;

/// Inputs shared by argument and rebuttal prompts
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub topic: &'a str,
    pub position: &'a str,
    pub team: Team,
    pub round: usize,
    pub strategy: ArgumentStrategy,
    pub evidence: &'a [EvidenceFragment],
}

/// Templates for generating supervisor prompts
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Role context sent as the system prompt
    pub fn supervisor_system(team: Team, position: &str) -> String {
        format!(
            r#"You are the lead debater of the {} team in a structured, multi-round debate.
Your team's position: {}
Argue only from the evidence provided and cite it by its [id].
Be persuasive, precise and professional.
End your answer with a single line of the form `CONFIDENCE: <number between 0 and 1>`."#,
            team.label(),
            position
        )
    }

    /// Prompt for the ARGUMENT phase.
    ///
    /// `previous_exchange` is the opponent text revealed in an earlier round,
    /// never the opponent's argument for the current round.
    pub fn argument_prompt(ctx: &SynthesisContext<'_>, previous_exchange: Option<&str>) -> String {
        let mut prompt = Self::header(ctx);
        if let Some(previous) = previous_exchange {
            prompt.push_str(&format!(
                "\nOPPONENT'S PREVIOUS ARGUMENT:\n{}\n",
                previous.trim()
            ));
        }
        prompt.push_str(&format!("\n{}\n", ctx.strategy.instructions()));
        prompt
    }

    /// Prompt for the REBUTTAL phase against the just-revealed argument
    pub fn rebuttal_prompt(ctx: &SynthesisContext<'_>, opponent_argument: &str) -> String {
        let mut prompt = Self::header(ctx);
        prompt.push_str(&format!(
            "\nOPPONENT'S ARGUMENT TO ANSWER:\n{}\n",
            opponent_argument.trim()
        ));
        prompt.push_str(&format!("\n{}\n", ctx.strategy.instructions()));
        prompt.push_str("Address the opponent's claims directly before restating your case.\n");
        prompt
    }

    fn header(ctx: &SynthesisContext<'_>) -> String {
        format!(
            r#"DEBATE TOPIC: {}
TEAM: {}
POSITION: {}
ROUND: {}
STRATEGY: {}

AVAILABLE EVIDENCE:
{}
"#,
            ctx.topic,
            ctx.team.label(),
            ctx.position,
            ctx.round,
            ctx.strategy,
            Self::evidence_block(ctx.evidence)
        )
    }

    /// Render evidence as `[id] source: excerpt` lines, bounded in size
    pub fn evidence_block(evidence: &[EvidenceFragment]) -> String {
        if evidence.is_empty() {
            return "(no evidence was found; argue from the position itself)".to_string();
        }
        let mut block = String::new();
        for fragment in evidence {
            let line = format!(
                "[{}] {} (relevance {:.2}): {}\n",
                fragment.id,
                fragment.source_id,
                fragment.relevance,
                fragment.excerpt(EXCERPT_CHARS)
            );
            if block.len() + line.len() > EVIDENCE_BLOCK_CHARS {
                break;
            }
            block.push_str(&line);
        }
        block.trim_end().to_string()
    }

    /// System prompt for a research agent asking for search queries
    pub fn query_writer_system(role: AgentRole) -> String {
        format!(
            r#"You are the {} research specialist preparing web searches for a debate team.
Reply with search queries only, one per line, without numbering or commentary."#,
            role
        )
    }

    /// Prompt asking for up to `max` queries that support the team's position.
    ///
    /// `already_run` lists queries from earlier rounds that must not repeat.
    pub fn query_prompt(
        role: AgentRole,
        topic: &str,
        position: &str,
        team: Team,
        max: usize,
        already_run: &[&str],
    ) -> String {
        let mut prompt = format!(
            r#"DEBATE TOPIC: {}
TEAM: {} ({})
POSITION: {}
FOCUS: {}
"#,
            topic,
            team.label(),
            team.stance(),
            position,
            role.profile().brief_prefix
        );
        if !already_run.is_empty() {
            prompt.push_str("\nALREADY SEARCHED (do not repeat):\n");
            for query in already_run {
                prompt.push_str(&format!("- {}\n", query));
            }
        }
        prompt.push_str(&format!(
            "\nWrite at most {} distinct search queries that would surface evidence for this position.\n",
            max
        ));
        prompt
    }

    /// Templated argument used when synthesis is unavailable
    pub fn fallback_argument(
        team: Team,
        position: &str,
        evidence: &[EvidenceFragment],
    ) -> String {
        let Some(best) = evidence.iter().max_by(|a, b| {
            a.relevance
                .partial_cmp(&b.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) else {
            return format!(
                "The {} team maintains that {}. This position rests on the team's analysis of the topic.",
                team.label(),
                position
            );
        };

        format!(
            "The {} team firmly maintains that {}.\n\n\
             The evidence gathered supports this position. In particular, {} reports: {}\n\n\
             Based on {} specialized source(s), the team considers its case well founded.",
            team.label(),
            position,
            best.source_id,
            best.excerpt(FALLBACK_EXCERPT_CHARS),
            evidence.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::role::AgentRole;

    fn fragment(source: &str, relevance: f64) -> EvidenceFragment {
        EvidenceFragment::new(
            source,
            "title",
            format!("Evidence reported by {source} about workplace automation."),
            relevance,
            AgentRole::Economic,
            1,
        )
        .unwrap()
    }

    fn context(evidence: &[EvidenceFragment]) -> SynthesisContext<'_> {
        SynthesisContext {
            topic: "AI in the workplace",
            position: "AI improves work",
            team: Team::Pro,
            round: 1,
            strategy: ArgumentStrategy::InitialPosition,
            evidence,
        }
    }

    #[test]
    fn test_argument_prompt_contains_evidence_ids() {
        let evidence = vec![fragment("a.org", 0.9)];
        let prompt = DebatePromptTemplate::argument_prompt(&context(&evidence), None);
        assert!(prompt.contains(&format!("[{}]", evidence[0].id)));
        assert!(prompt.contains("STRATEGY: initial_position"));
        assert!(!prompt.contains("OPPONENT"));
    }

    #[test]
    fn test_argument_prompt_includes_previous_exchange() {
        let prompt =
            DebatePromptTemplate::argument_prompt(&context(&[]), Some("Last round CONTRA said X"));
        assert!(prompt.contains("OPPONENT'S PREVIOUS ARGUMENT:\nLast round CONTRA said X"));
        assert!(prompt.contains("no evidence was found"));
    }

    #[test]
    fn test_rebuttal_prompt_quotes_opponent() {
        let prompt = DebatePromptTemplate::rebuttal_prompt(&context(&[]), "  AI destroys jobs. ");
        assert!(prompt.contains("OPPONENT'S ARGUMENT TO ANSWER:\nAI destroys jobs."));
    }

    #[test]
    fn test_evidence_block_is_bounded() {
        let evidence: Vec<_> = (0..50).map(|i| fragment(&format!("s{i}.org"), 0.5)).collect();
        let block = DebatePromptTemplate::evidence_block(&evidence);
        assert!(block.len() <= EVIDENCE_BLOCK_CHARS);
    }

    #[test]
    fn test_query_prompt_lists_earlier_queries() {
        let prompt = DebatePromptTemplate::query_prompt(
            AgentRole::Historical,
            "AI in the workplace",
            "AI eliminates jobs",
            Team::Contra,
            3,
            &["history of ai layoffs"],
        );
        assert!(prompt.contains("TEAM: CONTRA (seek opposing evidence)"));
        assert!(prompt.contains("POSITION: AI eliminates jobs"));
        assert!(prompt.contains("FOCUS: Historical background of"));
        assert!(prompt.contains("- history of ai layoffs"));
        assert!(prompt.contains("at most 3 distinct search queries"));

        let first_round =
            DebatePromptTemplate::query_prompt(AgentRole::Historical, "t", "p", Team::Pro, 2, &[]);
        assert!(!first_round.contains("ALREADY SEARCHED"));
        assert!(DebatePromptTemplate::query_writer_system(AgentRole::Historical)
            .contains("historical research specialist"));
    }

    #[test]
    fn test_fallback_quotes_best_fragment() {
        let evidence = vec![fragment("weak.org", 0.2), fragment("strong.org", 0.9)];
        let text = DebatePromptTemplate::fallback_argument(Team::Contra, "AI harms", &evidence);
        assert!(text.starts_with("The CONTRA team firmly maintains that AI harms."));
        assert!(text.contains("strong.org reports"));
    }

    #[test]
    fn test_fallback_without_evidence() {
        let text = DebatePromptTemplate::fallback_argument(Team::Pro, "AI helps", &[]);
        assert!(text.starts_with("The PRO team maintains that AI helps."));
    }
}
