//! 五个科目的出题模板数据

use crate::models::template::{AnswerKey, Template};
use crate::models::topic::Topic;

pub const CRITICAL_REASONING: Template = Template {
    topic: Topic::CriticalReasoning,
    summary: "Generate a CLAT-level critical reasoning paragraph followed by 6 questions and answers.",
    passage_name: "Argument Passage",
    tone: &[
        "Write like an op-ed columnist building a single, contestable argument.",
        "Keep the reasoning dense: premises, assumptions and a conclusion the reader can attack.",
        "Do not signal which premises are weak.",
    ],
    passage_words: (350, 450),
    passage_rules: &[
        "Start with inline numbering, not on a separate line.",
        "Present one main argument with at least two supporting premises and one unstated assumption.",
        "Avoid real names of living persons or organisations.",
    ],
    question_count: 6,
    question_rules: &[
        "Cover these types at least once: assumption, strengthen, weaken, inference, flaw in reasoning.",
        "Each question must be answerable only from the passage.",
        "Stems must be precise and unambiguous.",
    ],
    option_rules: &[
        "Wrong options must be tempting: out of scope, too extreme, or reversing the logic.",
    ],
    special_rules: &[
        "At least 2 questions must hinge on the unstated assumption.",
    ],
    answer_key: AnswerKey::Explained { words: Some((60, 100)) },
};

pub const GENERAL_KNOWLEDGE: Template = Template {
    topic: Topic::GeneralKnowledge,
    summary: "Write a paragraph covering current affairs or static GK (suitable for CLAT/AILET) with 5 questions and answers.",
    passage_name: "GK Passage",
    tone: &[
        "Write in a formal, explanatory tone like a top newspaper's \"Explained\" section.",
        "Contextual and background-based, not opinionated.",
        "Do not directly state answers to any GK questions.",
        "Paragraphs should build conceptual understanding or current relevance.",
    ],
    passage_words: (600, 750),
    passage_rules: &[
        "Start with inline numbering, not on a separate line.",
        "Must provide context only.",
        "Do not include any facts that directly give away answers.",
    ],
    question_count: 5,
    question_rules: &[
        "Each question must be factual and verifiable.",
        "Do not make questions directly answerable from the passage.",
        "Allowed types: which of the following is true / not true, match the following, chronological order, identify the correct organisation or authority, pure fact-check.",
        "All questions must be difficult; at least 3 should involve confusing or close options.",
        "No general or guessable trivia.",
    ],
    option_rules: &[
        "Distractors must be reasonable but incorrect.",
        "Use closely related names, institutions, or events to confuse.",
    ],
    special_rules: &[],
    answer_key: AnswerKey::Explained { words: None },
};

pub const LEGAL_REASONING: Template = Template {
    topic: Topic::LegalReasoning,
    summary: "Create a legal reasoning scenario paragraph for CLAT with 6 questions testing comprehension and logic, then give answers.",
    passage_name: "Legal Passage",
    tone: &[
        "Write in the voice of a senior law professor or Supreme Court advocate.",
        "Keep the tone analytical, scholarly, and contemporary.",
        "Do not include real case names or factual examples.",
    ],
    passage_words: (600, 700),
    passage_rules: &[
        "Begin each paragraph with inline numbering.",
        "Introduce one or more legal principles with definitions, rationale, conflicts, and exceptions.",
        "Do not use any factual illustrations.",
    ],
    question_count: 6,
    question_rules: &[
        "Each question must have a fact scenario of at least 300 words.",
        "Include distractions: irrelevant facts, emotional triggers, misleading timelines.",
        "Test only the principle(s) from the passage.",
        "No external legal knowledge should be used.",
    ],
    option_rules: &[
        "Exactly 2 options must conclude the action is legal, and 2 illegal.",
        "Incorrect options must be legally plausible but flawed in logic.",
    ],
    special_rules: &[
        "At least 2 questions must be thematically or factually linked.",
        "At least 1 question must test an exception or borderline case.",
    ],
    answer_key: AnswerKey::Explained { words: Some((150, 200)) },
};

pub const MATHEMATICS: Template = Template {
    topic: Topic::Mathematics,
    summary: "Write a math word problem paragraph suitable for CLAT with 6 questions and detailed answers.",
    passage_name: "Quantitative Passage",
    tone: &[
        "Write like a business news brief that carries numbers: clear, factual, no formulas in the passage.",
        "All figures must be internally consistent.",
    ],
    passage_words: (250, 350),
    passage_rules: &[
        "Start with inline numbering, not on a separate line.",
        "Embed enough data (percentages, ratios, averages, profit and loss, time and work) to support six calculations.",
        "Use Indian number formatting and the rupee symbol (₹) for currency.",
    ],
    question_count: 6,
    question_rules: &[
        "Every question must be solvable using only data in the passage and Class 10 arithmetic.",
        "Questions must increase in difficulty from 1.1 to 1.6.",
        "At least 2 questions must combine data from two different sentences.",
    ],
    option_rules: &[
        "Distractors must come from common calculation slips (wrong base, missed step, rounding).",
        "Present numeric options in ascending order.",
    ],
    special_rules: &[],
    answer_key: AnswerKey::Explained { words: None },
};

pub const READING_COMPREHENSION: Template = Template {
    topic: Topic::ReadingComprehension,
    summary: "Create a CLAT-level RC passage with 6 directly linked questions and their answers.",
    passage_name: "RC Passage",
    tone: &[
        "Write like a literary or opinion essay from a serious periodical.",
        "Use a distinct authorial voice with a clear central claim.",
    ],
    passage_words: (450, 600),
    passage_rules: &[
        "Start with inline numbering, not on a separate line.",
        "Vocabulary should be advanced but not archaic.",
        "Include at least one shift in the author's position or tone.",
    ],
    question_count: 6,
    question_rules: &[
        "Every question must be directly linked to the passage.",
        "Cover main idea, author's tone, inference, vocabulary in context, and the purpose of a paragraph.",
    ],
    option_rules: &[
        "Wrong options should be partially true or true but not supported by the passage.",
    ],
    special_rules: &[],
    answer_key: AnswerKey::LabelOnly,
};

/// 科目 → 模板
pub fn template_for(topic: Topic) -> &'static Template {
    match topic {
        Topic::CriticalReasoning => &CRITICAL_REASONING,
        Topic::GeneralKnowledge => &GENERAL_KNOWLEDGE,
        Topic::LegalReasoning => &LEGAL_REASONING,
        Topic::Mathematics => &MATHEMATICS,
        Topic::ReadingComprehension => &READING_COMPREHENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_its_own_template() {
        for topic in Topic::ALL {
            assert_eq!(template_for(topic).topic, topic);
        }
    }

    #[test]
    fn test_templates_respect_common_contract() {
        for topic in Topic::ALL {
            let template = template_for(topic);
            let (lo, hi) = template.passage_words;
            assert!(lo < hi, "{topic}: bad word range");
            assert!(template.question_count > 0);
            assert!(!template.summary.is_empty());
            assert!(!template.tone.is_empty());
        }
    }

    #[test]
    fn test_known_question_counts() {
        assert_eq!(GENERAL_KNOWLEDGE.question_count, 5);
        assert_eq!(LEGAL_REASONING.question_count, 6);
        assert_eq!(
            LEGAL_REASONING.answer_key,
            AnswerKey::Explained {
                words: Some((150, 200))
            }
        );
        assert_eq!(READING_COMPREHENSION.answer_key, AnswerKey::LabelOnly);
    }
}
