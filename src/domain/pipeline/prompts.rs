//! Pipeline Context - Prompt 构造
//!
//! 模型使用 Llama-2 chat 格式:
//! `<s>[INST] <<SYS>>\n{system}\n<</SYS>>\n\n{user} [/INST]`

use super::stage::{PipelineStage, StageKind, StageResult};
use crate::domain::blog::GenerationRequest;

/// 上游输出之间的分隔线
pub const CONTEXT_DIVIDER: &str = "\n\n----------\n\n";

/// 直接生成的固定指令
pub fn direct_prompt(topic: &str) -> String {
    format!(
        "<s>[INST]Human: Write a 200 words blog on the topic {}\nAssistant:[/INST]\n",
        topic
    )
}

/// 阶段任务描述
pub fn task_description(stage: StageKind, request: &GenerationRequest) -> String {
    let audience = request.audience_or_default();
    let tone = request.tone_or_default();
    let brand = request.brand_or_default();

    match stage {
        StageKind::Research => {
            let keywords = request
                .joined_keywords()
                .unwrap_or_else(|| "none provided".to_string());
            format!(
                "Conduct research for a blog about '{}'.\n\
                 Audience: {}. Brand: {}. Desired tone: {}.\n\
                 If SEO keywords provided, prioritize them: {}.\n\
                 Deliver: \n\
                 - 6-10 bullet points with key insights, stats (with approximate figures), and pain points\n\
                 - 8-12 SEO keyword ideas (short and long-tail)\n\
                 - 3-5 proposed angles for the article\n",
                request.topic(),
                audience,
                brand,
                tone,
                keywords
            )
        }
        StageKind::Outline => "Create a detailed outline using the research. Include: title options, H2/H3 sections, \
             bullet notes per section, and an SEO snippet plan (title tag + meta description)."
            .to_string(),
        StageKind::Write => format!(
            "Write a {}-word article based on the outline. Maintain {} tone for {}. \
             We are {}. Incorporate the most important keywords naturally and avoid keyword stuffing.",
            request.target_word_count(),
            tone,
            audience,
            brand
        ),
        StageKind::Edit => "Revise the drafted article for clarity, correctness, brand voice, and SEO. \
             Ensure factual consistency with the research. Add a short meta description (<= 160 chars) and a CTA. \
             Return only the final publication-ready article text (followed by the meta description and CTA)."
            .to_string(),
    }
}

/// 系统提示：角色、背景与目标
fn system_block(stage: &PipelineStage) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        stage.role, stage.backstory, stage.goal
    )
}

/// 构造阶段 prompt
///
/// `upstream` 必须只包含该阶段声明的上游输出，顺序与执行顺序一致
pub fn stage_prompt(
    stage: StageKind,
    request: &GenerationRequest,
    upstream: &[&StageResult],
) -> String {
    let definition = stage.definition();

    let mut user = format!(
        "Current Task: {}\n\n\
         This is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        task_description(stage, request),
        definition.expected_output
    );

    if !upstream.is_empty() {
        let context = upstream
            .iter()
            .map(|r| r.content.trim())
            .collect::<Vec<_>>()
            .join(CONTEXT_DIVIDER);
        user.push_str("\n\nThis is the context you're working with:\n");
        user.push_str(&context);
    }

    format!(
        "<s>[INST] <<SYS>>\n{}\n<</SYS>>\n\n{} [/INST]",
        system_block(&definition),
        user
    )
}
