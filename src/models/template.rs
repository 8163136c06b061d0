//! 出题模板
//!
//! 模板的结构约束（字数范围、题号、选项、答案格式）以数据形式保存，
//! 提示词文本由这些数据渲染而成，测试可以直接断言约束本身。

use serde::Serialize;

use crate::models::topic::Topic;

/// 每道题固定的四个选项
pub const OPTION_LABELS: [&str; 4] = ["(A)", "(B)", "(C)", "(D)"];

/// 题号中的段落编号（每份练习只有一个段落）
pub const SECTION_NUMBER: u8 = 1;

/// 答案区的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum AnswerKey {
    /// 只给出正确选项
    LabelOnly,
    /// 正确选项后附解析，可限定解析字数
    Explained {
        words: Option<(u32, u32)>,
    },
}

/// 单个科目的出题模板
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub topic: Topic,
    /// 下拉框下方显示的一句话说明
    pub summary: &'static str,
    /// 文章的称呼（出现在 STRUCTURE 段）
    pub passage_name: &'static str,
    pub tone: &'static [&'static str],
    /// 文章字数范围（闭区间）
    pub passage_words: (u32, u32),
    pub passage_rules: &'static [&'static str],
    pub question_count: u8,
    pub question_rules: &'static [&'static str],
    pub option_rules: &'static [&'static str],
    pub special_rules: &'static [&'static str],
    pub answer_key: AnswerKey,
}

impl Template {
    /// 题号列表，格式 `<段落>.<题目>`，如 `1.1`
    pub fn question_labels(&self) -> Vec<String> {
        (1..=self.question_count)
            .map(|q| format!("{}.{}", SECTION_NUMBER, q))
            .collect()
    }

    /// 题号区间描述，如 `1.1 to 1.6`
    pub fn question_range(&self) -> String {
        format!(
            "{s}.1 to {s}.{n}",
            s = SECTION_NUMBER,
            n = self.question_count
        )
    }

    /// 渲染完整的提示词文本
    pub fn render(&self) -> String {
        let mut out = String::new();

        push_section(&mut out, "TONE AND STYLE:", self.tone.iter().map(|s| s.to_string()));

        let mut passage = vec![format!(
            "Length: {} to {} words.",
            self.passage_words.0, self.passage_words.1
        )];
        passage.extend(self.passage_rules.iter().map(|s| s.to_string()));
        push_section(&mut out, "PASSAGE INSTRUCTIONS:", passage);

        let mut questions = vec![format!(
            "Exactly {} multiple-choice questions, numbered {}.",
            self.question_count,
            self.question_range()
        )];
        questions.extend(self.question_rules.iter().map(|s| s.to_string()));
        push_section(
            &mut out,
            &format!("QUESTIONS ({}):", self.question_range()),
            questions,
        );

        let mut options = vec![
            format!("Four choices per question: {}.", OPTION_LABELS.join(", ")),
            "Exactly one option is correct.".to_string(),
        ];
        options.extend(self.option_rules.iter().map(|s| s.to_string()));
        push_section(&mut out, "OPTIONS:", options);

        if !self.special_rules.is_empty() {
            push_section(
                &mut out,
                "SPECIAL RULES:",
                self.special_rules.iter().map(|s| s.to_string()),
            );
        }

        let mut answers = vec![
            format!(
                "After all {} questions, provide the answer key.",
                self.question_count
            ),
            "Format:".to_string(),
            format!("{}.1 : (C)", SECTION_NUMBER),
        ];
        match self.answer_key {
            AnswerKey::LabelOnly => {
                answers.push("Give only the question number and the correct option, one per line.".to_string());
            }
            AnswerKey::Explained { words: None } => {
                answers.push("Then explain why that option is correct and why the others are wrong.".to_string());
            }
            AnswerKey::Explained { words: Some((lo, hi)) } => {
                answers.push("Then explain why that option is correct and why the others are wrong.".to_string());
                answers.push(format!("Each explanation should be {} to {} words and clearly reasoned.", lo, hi));
            }
        }
        push_section(&mut out, "ANSWER KEY:", answers);

        let key_line = match self.answer_key {
            AnswerKey::LabelOnly => "Answer Key".to_string(),
            AnswerKey::Explained { .. } => "Answer Key with full explanations".to_string(),
        };
        push_section(
            &mut out,
            "FINAL STRUCTURE:",
            [
                format!(
                    "{} ({}-{} words)",
                    self.passage_name, self.passage_words.0, self.passage_words.1
                ),
                format!("Questions {}", self.question_range()),
                key_line,
            ],
        );

        out
    }
}

fn push_section(out: &mut String, heading: &str, lines: impl IntoIterator<Item = String>) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(heading);
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}
