use std::path::{Path, PathBuf};

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::chat::{Session, next_turn};
use crate::ai::citations::render_citations;
use crate::ai::document::ingest_pdf;
use crate::ai::prompt::{Persona, persona_message};
use crate::core::AppConfig;
use crate::openai::CompletionOptions;

/// A line typed at the prompt.
#[derive(Debug, PartialEq)]
enum Input {
    Upload(PathBuf),
    Message(String),
    Empty,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if let Some(path) = line.strip_prefix("/upload ") {
        let path = path.trim();
        if !path.is_empty() {
            return Input::Upload(PathBuf::from(path));
        }
    }
    if line.is_empty() {
        Input::Empty
    } else {
        Input::Message(line.to_string())
    }
}

async fn upload(session: &mut Session, path: &Path) {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Error: could not read {}: {}", path.display(), e);
            return;
        }
    };

    match ingest_pdf(session, bytes).await {
        Ok(outcome) if outcome.injected => {
            println!("판결문을 불러왔습니다 ({}자).", outcome.characters)
        }
        Ok(_) => println!("이미 불러온 판결문과 같은 내용입니다."),
        Err(e) => println!("Error: {}", e),
    }
}

pub async fn run(persona: Persona) -> Result<()> {
    let config = AppConfig::from_env(persona)?;
    let options = CompletionOptions::from(&config);
    let mut session = Session::new(&persona_message(persona)?);
    let mut rl = DefaultEditor::new()?;

    println!("민사판례 이해하기 쉽게 설명해드려요! 판례 번호를 입력하거나 `/upload <판결문.pdf>`로 파일을 올려주세요.");

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match parse_input(&line) {
                    Input::Empty => continue,
                    Input::Upload(path) => upload(&mut session, &path).await,
                    Input::Message(msg) => match next_turn(&mut session, &msg, &options).await {
                        Ok(reply) => {
                            println!("{}", reply.content);
                            if let Some(citations) = render_citations(&reply.citations) {
                                println!("\n{}", citations);
                            }
                        }
                        Err(e) => {
                            tracing::error!("Chat turn failed: {}. Root cause: {}", e, e.root_cause());
                            println!("Error: {}", e);
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
