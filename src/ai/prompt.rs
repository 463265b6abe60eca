//! Reusable prompts using Handlebars for templating. Persona prompts
//! are fixed text; the only substitution anywhere is the text of an
//! uploaded judgment. Escaping is turned off since the output is plain
//! text for the model, not HTML.

use std::fmt;

use anyhow::{Error, Result};
use handlebars::Handlebars;
use serde_json::json;

/// The instruction persona a chat runs with. Exactly one is chosen per
/// process.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persona {
    /// A friendly civil procedure lecturer that explains with analogies
    Lecturer,
    /// A structured six part brief of a judgment
    Briefing,
    /// The structured brief, answering only from retrieved judgments
    Grounded,
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug)]
pub enum Prompt {
    Lecturer,
    Briefing,
    Grounded,
    DocumentContext,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Persona> for Prompt {
    fn from(persona: Persona) -> Self {
        match persona {
            Persona::Lecturer => Prompt::Lecturer,
            Persona::Briefing => Prompt::Briefing,
            Persona::Grounded => Prompt::Grounded,
        }
    }
}

const LECTURER_PROMPT: &str = r"너는 30년 경력의 민사소송법 전문 강사야. 비전공자도 이해하기 쉽게 법률 용어를 쉬운 비유를 들어 설명하고, 판례 번호를 주면 핵심 쟁점과 결론을 명확히 요약해줘. 말투는 정중하지만 친절하게 해줘.";

const BRIEFING_PROMPT: &str = r"당신은 30년 경력의 민사소송법 전문 강사입니다. 법률을 공부하지 않은 일반인도 이해할 수 있도록 판례를 설명합니다.

답변은 반드시 아래 순서와 제목을 지켜 작성하세요.

1. 📌 제목: 사건을 한 줄로 표현한 제목
2. 📝 한 줄 요약: 판결의 결론을 한 문장으로
3. ⚖️ 사실관계와 쟁점: 누가, 무엇 때문에 다투었는지와 법원이 판단해야 했던 문제
4. 🏛️ 법원의 판단: 결론과 그 이유
5. 📖 용어 풀이: 어려운 법률 용어를 쉬운 비유로 설명
6. 💡 실무 팁: 비슷한 상황에 놓인 사람이 알아두면 좋은 점

모든 문장은 존댓말(하십시오체 또는 해요체)로 작성하고, 확실하지 않은 내용은 추측하지 말고 모른다고 말하세요.";

const GROUNDED_PROMPT: &str = r"당신은 30년 경력의 민사소송법 전문 강사입니다. 법률을 공부하지 않은 일반인도 이해할 수 있도록 판례를 설명합니다.

검색된 판결문에 있는 내용만 근거로 답변하세요. 검색 결과에 없는 판례나 사실은 만들어내지 말고, 찾을 수 없으면 찾을 수 없다고 답하세요.

답변은 반드시 아래 순서와 제목을 지켜 작성하세요.

1. 📌 제목: 사건을 한 줄로 표현한 제목
2. 📝 한 줄 요약: 판결의 결론을 한 문장으로
3. ⚖️ 사실관계와 쟁점: 누가, 무엇 때문에 다투었는지와 법원이 판단해야 했던 문제
4. 🏛️ 법원의 판단: 결론과 그 이유
5. 📖 용어 풀이: 어려운 법률 용어를 쉬운 비유로 설명
6. 💡 실무 팁: 비슷한 상황에 놓인 사람이 알아두면 좋은 점

모든 문장은 존댓말로 작성하세요.";

const DOCUMENT_CONTEXT_PROMPT: &str = r"사용자가 판결문 파일을 업로드했습니다. 이후 질문에 답변할 때는 아래 판결문 내용을 최우선으로 참고하세요.

[판결문 내용]
{{document}}";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    for (prompt, template) in [
        (Prompt::Lecturer, LECTURER_PROMPT),
        (Prompt::Briefing, BRIEFING_PROMPT),
        (Prompt::Grounded, GROUNDED_PROMPT),
        (Prompt::DocumentContext, DOCUMENT_CONTEXT_PROMPT),
    ] {
        registry
            .register_template_string(&prompt.to_string(), template)
            .expect("Failed to register template");
    }
    registry
}

/// The fixed instruction that opens every transcript for `persona`.
pub fn persona_message(persona: Persona) -> Result<String, Error> {
    let prompt = Prompt::from(persona);
    Ok(templates().render(&prompt.to_string(), &json!({}))?)
}

/// The system message that hands the text of an uploaded judgment to
/// the model.
pub fn document_context_message(document: &str) -> Result<String, Error> {
    Ok(templates().render(
        &Prompt::DocumentContext.to_string(),
        &json!({ "document": document }),
    )?)
}
