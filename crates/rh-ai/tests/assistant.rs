use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rh_ai::{AiAssistant, AiError, ChatSession, MIN_SUMMARY_INPUT_CHARS, prompts};
use rh_client::{AiBackend, ClientError};
use rh_core::PaperId;
use rh_core::entities::Paper;
use rh_core::enums::ChatRole;

/// Backend answering from a script and recording every call.
#[derive(Default)]
struct ScriptedBackend {
    answer: String,
    fail: bool,
    chats: Mutex<Vec<(String, String)>>,
    reviews: Mutex<Vec<Vec<PaperId>>>,
}

impl ScriptedBackend {
    fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn chats(&self) -> Vec<(String, String)> {
        self.chats.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiBackend for ScriptedBackend {
    async fn chat(&self, context: &str, question: &str) -> Result<String, ClientError> {
        self.chats
            .lock()
            .unwrap()
            .push((context.to_string(), question.to_string()));
        if self.fail {
            return Err(ClientError::Api {
                status: 503,
                message: "AI service unavailable".into(),
            });
        }
        Ok(self.answer.clone())
    }

    async fn literature_review(&self, paper_ids: &[PaperId]) -> Result<String, ClientError> {
        self.reviews.lock().unwrap().push(paper_ids.to_vec());
        Ok(format!("review of {}", paper_ids.len()))
    }
}

fn papers(titles: &[&str]) -> Vec<Paper> {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut p = Paper::new(format!("p{}", i + 1), *t);
            p.abstract_text = Some(format!("About {t}"));
            p
        })
        .collect()
}

#[tokio::test]
async fn short_answer_still_summarizes_every_paper() {
    let backend = Arc::new(ScriptedBackend::answering(
        "Paper 1: Alpha\nSummary: Alpha does things.",
    ));
    let assistant = AiAssistant::new(Arc::clone(&backend));
    let selected = papers(&["Alpha", "Beta", "Gamma"]);

    let batch = assistant.summarize_batch(&selected).await.unwrap();

    let texts: Vec<_> = batch.summaries.iter().map(|s| s.summary.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Alpha does things.",
            "Generated summary for: Beta",
            "Generated summary for: Gamma"
        ]
    );
    assert!(batch.summaries.iter().all(|s| !s.summary.is_empty()));
    assert_eq!(batch.full_text, "Paper 1: Alpha\nSummary: Alpha does things.");

    let (context, question) = backend.chats().remove(0);
    assert_eq!(context, prompts::batch_context(&selected));
    assert_eq!(question, prompts::batch_summary_question(3));
}

#[tokio::test]
async fn tools_require_a_selection() {
    let assistant = AiAssistant::new(Arc::new(ScriptedBackend::answering("x")));
    assert!(matches!(
        assistant.summarize_batch(&[]).await,
        Err(AiError::NoPapers)
    ));
    assert!(matches!(assistant.insights(&[]).await, Err(AiError::NoPapers)));
    assert!(matches!(
        assistant.review_via_chat(&[]).await,
        Err(AiError::NoPapers)
    ));
    assert!(matches!(
        assistant.literature_review(&[]).await,
        Err(AiError::NoPapers)
    ));
    assert!(assistant.backend().chats().is_empty());
}

#[tokio::test]
async fn insights_and_review_use_paper_context() {
    let backend = Arc::new(ScriptedBackend::answering("answer"));
    let assistant = AiAssistant::new(Arc::clone(&backend));
    let selected = papers(&["Alpha", "Beta"]);

    assistant.insights(&selected).await.unwrap();
    assistant.review_via_chat(&selected).await.unwrap();

    let chats = backend.chats();
    assert_eq!(chats[0].0, "Alpha: About Alpha\n\nBeta: About Beta");
    assert_eq!(chats[0].1, prompts::insights_question(2));
    assert_eq!(chats[1].1, prompts::review_question(2));
}

#[tokio::test]
async fn endpoint_review_sends_ids() {
    let backend = Arc::new(ScriptedBackend::answering(""));
    let assistant = AiAssistant::new(Arc::clone(&backend));

    let review = assistant
        .literature_review(&papers(&["Alpha", "Beta"]))
        .await
        .unwrap();

    assert_eq!(review, "review of 2");
    assert_eq!(
        backend.reviews.lock().unwrap()[0],
        vec![PaperId::new("p1"), PaperId::new("p2")]
    );
}

#[tokio::test]
async fn extracted_text_must_be_long_enough() {
    let backend = Arc::new(ScriptedBackend::answering("- bullet"));
    let assistant = AiAssistant::new(Arc::clone(&backend));

    let short = "x".repeat(MIN_SUMMARY_INPUT_CHARS - 1);
    assert!(matches!(
        assistant.summarize_extracted(&short).await,
        Err(AiError::Validation(_))
    ));

    let long = "x".repeat(MIN_SUMMARY_INPUT_CHARS);
    assert_eq!(assistant.summarize_extracted(&long).await.unwrap(), "- bullet");
    assert_eq!(backend.chats()[0].1, prompts::UPLOAD_SUMMARY_QUESTION);
}

#[tokio::test]
async fn chat_records_question_then_answer() {
    let backend = ScriptedBackend::answering("It uses attention.");
    let mut session = ChatSession::new();

    session
        .ask(&backend, &papers(&["Alpha"]), "How does it work?")
        .await
        .unwrap();

    let roles: Vec<_> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, [ChatRole::User, ChatRole::Ai]);
    assert_eq!(session.messages()[1].content, "It uses attention.");
    assert_ne!(session.messages()[0].id, session.messages()[1].id);
}

#[tokio::test]
async fn failed_chat_keeps_only_the_question() {
    let backend = ScriptedBackend::failing();
    let mut session = ChatSession::new();

    let err = session
        .ask(&backend, &papers(&["Alpha"]), "Anything?")
        .await
        .unwrap_err();

    assert!(matches!(err, AiError::Client(_)));
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].role, ChatRole::User);
}

#[tokio::test]
async fn invalid_chat_input_records_nothing() {
    let backend = ScriptedBackend::answering("x");
    let mut session = ChatSession::new();

    assert!(matches!(
        session.ask(&backend, &papers(&["Alpha"]), "   ").await,
        Err(AiError::Validation(_))
    ));
    assert!(matches!(
        session.ask(&backend, &[], "Why?").await,
        Err(AiError::NoPapers)
    ));
    assert!(session.messages().is_empty());
    assert!(backend.chats().is_empty());
}
