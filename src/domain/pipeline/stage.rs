//! Pipeline Context - Stages

use serde::{Deserialize, Serialize};

/// 分阶段流水线中的角色
///
/// 不变量:
/// - 执行顺序固定: Research → Outline → Write → Edit
/// - 每个阶段只读取排在它之前的阶段输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    Research,
    Outline,
    Write,
    Edit,
}

impl StageKind {
    /// 执行顺序
    pub const ORDER: [StageKind; 4] = [
        StageKind::Research,
        StageKind::Outline,
        StageKind::Write,
        StageKind::Edit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Research => "research",
            StageKind::Outline => "outline",
            StageKind::Write => "write",
            StageKind::Edit => "edit",
        }
    }

    /// 可读取的上游阶段（按执行顺序）
    pub fn upstream(&self) -> &'static [StageKind] {
        match self {
            StageKind::Research => &[],
            StageKind::Outline => &[StageKind::Research],
            StageKind::Write => &[StageKind::Research, StageKind::Outline],
            StageKind::Edit => &[StageKind::Research, StageKind::Outline, StageKind::Write],
        }
    }

    /// 阶段对应的角色定义
    pub fn definition(&self) -> PipelineStage {
        match self {
            StageKind::Research => PipelineStage {
                kind: *self,
                role: "Market Research Analyst",
                goal: "Research the topic, identify up-to-date facts, trends, statistics, pain points, and SEO keywords.",
                backstory: "You are a meticulous B2B/B2C market researcher who summarizes credible insights succinctly.",
                expected_output: "Bullet list of insights, keyword list, and angles suitable for planning the article.",
            },
            StageKind::Outline => PipelineStage {
                kind: *self,
                role: "Content Strategist",
                goal: "Design a high-converting outline aligned with the audience, brand, and SEO goals.",
                backstory: "You structure content to maximize clarity, search intent match, and engagement.",
                expected_output: "A structured outline with 1-2 title options, 5-8 H2s (with optional H3s), and bullet notes.",
            },
            StageKind::Write => PipelineStage {
                kind: *self,
                role: "Senior Copywriter",
                goal: "Write persuasive, clear copy that is accurate and on-brand.",
                backstory: "You write concise, engaging articles with smooth flow and strong transitions.",
                expected_output: "A cohesive article with intro, sections per outline, and a conclusion. No outline or notes, only prose.",
            },
            StageKind::Edit => PipelineStage {
                kind: *self,
                role: "Managing Editor",
                goal: "Edit for accuracy, coherence, brand tone, grammar, and SEO. Ensure factual consistency and polish.",
                backstory: "You are uncompromising on quality and clarity; you deliver publication-ready content.",
                expected_output: "Final polished article text suitable for publishing, then a 'Meta Description:' and 'CTA:' section.",
            },
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个阶段的静态定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    pub kind: StageKind,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub expected_output: &'static str,
}

/// 单个阶段的输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageKind,
    pub content: String,
}

impl StageResult {
    pub fn new(stage: StageKind, content: impl Into<String>) -> Self {
        Self {
            stage,
            content: content.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// 一次分阶段运行的全部输出，按执行顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    results: Vec<StageResult>,
}

impl PipelineRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加阶段输出
    ///
    /// 只接受严格按顺序的下一阶段
    pub fn push(&mut self, result: StageResult) -> Result<(), StageKind> {
        let expected = StageKind::ORDER.get(self.results.len()).copied();
        if expected != Some(result.stage) {
            return Err(result.stage);
        }
        self.results.push(result);
        Ok(())
    }

    pub fn results(&self) -> &[StageResult] {
        &self.results
    }

    pub fn output(&self, stage: StageKind) -> Option<&StageResult> {
        self.results.iter().find(|r| r.stage == stage)
    }

    /// 某阶段可见的上游输出
    pub fn upstream_of(&self, stage: StageKind) -> Vec<&StageResult> {
        stage
            .upstream()
            .iter()
            .filter_map(|kind| self.output(*kind))
            .collect()
    }

    /// 汇总结果：最近一个非空阶段输出
    pub fn aggregate_text(&self) -> String {
        self.results
            .iter()
            .rev()
            .find(|r| !r.is_blank())
            .map(|r| r.content.trim().to_string())
            .unwrap_or_default()
    }

    /// 流水线结果
    ///
    /// Edit 阶段输出非空时返回它，否则退回汇总结果
    pub fn final_text(&self) -> String {
        match self.output(StageKind::Edit) {
            Some(edit) if !edit.is_blank() => edit.content.trim().to_string(),
            _ => self.aggregate_text(),
        }
    }
}
