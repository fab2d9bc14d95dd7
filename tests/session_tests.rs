//! Conversation-level behavior of `ChatSession` against scripted completion services.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use costbench::chat::prompts::{GREETING, SYSTEM_INSTRUCTION};
use costbench::chat::{ChatConfig, ChatSession, Interrupt, SessionState};
use costbench::{ChatCompletionRequest, ChatMessage, CompletionService, Error, Result, Role};

/// Plays back queued results and records every request it sees.
#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl Scripted {
    fn new(replies: impl IntoIterator<Item = Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionService for Scripted {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("OK".to_string()))
    }
}

fn session(service: &Arc<Scripted>) -> ChatSession<Arc<Scripted>> {
    ChatSession::new(service.clone(), ChatConfig::default())
}

#[tokio::test]
async fn control_arm_scenario() {
    let service = Scripted::new([Ok("OK".to_string())]);
    let mut session = session(&service);

    let reply = session
        .submit("Design a cost model for a control arm")
        .await
        .unwrap();

    assert_eq!(reply, "OK");
    assert_eq!(
        session.transcript(),
        &[
            ChatMessage::assistant(GREETING),
            ChatMessage::user("Design a cost model for a control arm"),
            ChatMessage::assistant("OK"),
        ]
    );
}

#[tokio::test]
async fn transcript_grows_two_per_turn() {
    let service = Scripted::new([
        Ok("first".to_string()),
        Err(Error::connection("connection refused", None)),
        Ok("third".to_string()),
    ]);
    let mut session = session(&service);
    session.greet();

    let inputs = ["wheel hub", "brake disc", "stabilizer link", "tie rod", "subframe"];
    for (n, input) in inputs.iter().enumerate() {
        session.submit(input).await.unwrap();
        assert_eq!(session.message_count(), 2 * (n + 1) + 1);
    }
}

#[tokio::test]
async fn turns_alternate_after_greeting() {
    let service = Scripted::new([]);
    let mut session = session(&service);
    for input in ["a", "b", "c"] {
        tokio_test::assert_ok!(session.submit(input).await);
    }

    let roles: Vec<Role> = session.transcript().iter().map(ChatMessage::role).collect();
    assert_eq!(roles[0], Role::Assistant);
    for pair in roles[1..].chunks(2) {
        assert_eq!(pair, &[Role::User, Role::Assistant]);
    }
}

#[tokio::test]
async fn system_instruction_leads_every_request_and_stays_hidden() {
    let service = Scripted::new([]);
    let mut session = session(&service);
    for input in ["inverter housing", "explain the casting step", "and machining?"] {
        session.submit(input).await.unwrap();
    }

    let requests = service.requests();
    assert_eq!(requests.len(), 3);
    for (n, request) in requests.iter().enumerate() {
        assert_eq!(request.messages[0], ChatMessage::system(SYSTEM_INSTRUCTION));
        // system + greeting + n earlier pairs + this user message
        assert_eq!(request.messages.len(), 1 + 1 + 2 * n + 1);
        assert_eq!(
            request
                .messages
                .iter()
                .filter(|m| m.role() == Role::System)
                .count(),
            1
        );
    }
    assert!(
        session
            .transcript()
            .iter()
            .all(|m| m.role() != Role::System && m.content() != SYSTEM_INSTRUCTION)
    );
}

#[tokio::test]
async fn request_payload_mirrors_transcript() {
    let service = Scripted::new([]);
    let mut session = session(&service);
    session.submit("motor shaft").await.unwrap();

    let payload = session.request_payload();
    assert_eq!(payload[0].role(), Role::System);
    assert_eq!(&payload[1..], session.transcript());
}

#[tokio::test]
async fn completion_failure_is_an_assistant_reply() {
    let service = Scripted::new([Err(Error::rate_limit("quota exceeded", None))]);
    let mut session = session(&service);
    session.greet();

    let reply = session.submit("battery tray").await.unwrap();

    assert!(reply.contains("Error"));
    assert_eq!(session.message_count(), 3);
    let last = session.transcript().last().unwrap();
    assert_eq!(last.role(), Role::Assistant);
    assert!(last.content().contains("Error"));
    assert!(last.content().contains("quota exceeded"));
    assert_eq!(session.state(), SessionState::AwaitingInput);
}

#[tokio::test]
async fn session_keeps_going_after_failure() {
    let service = Scripted::new([
        Err(Error::serialization("completion response contained no choices", None)),
        Ok("recovered".to_string()),
    ]);
    let mut session = session(&service);

    session.submit("first").await.unwrap();
    let reply = session.submit("second").await.unwrap();

    assert_eq!(reply, "recovered");
    // The failed reply is part of the history sent with the next request.
    let second = &service.requests()[1];
    assert!(second.messages[3].content().starts_with("Error: "));
}

#[tokio::test]
async fn blank_input_is_rejected_without_a_call() {
    let service = Scripted::new([]);
    let mut session = session(&service);
    session.greet();

    let err = tokio_test::assert_err!(session.submit("").await);
    assert!(err.is_validation());
    let err = tokio_test::assert_err!(session.submit("  \n").await);
    assert!(err.is_validation());

    assert_eq!(session.message_count(), 1);
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn greeting_is_emitted_once() {
    let service = Scripted::new([]);
    let mut session = session(&service);

    assert_eq!(session.greet(), Some(GREETING));
    session.submit("rear axle").await.unwrap();
    assert_eq!(session.greet(), None);

    let greetings = session
        .transcript()
        .iter()
        .filter(|m| m.content() == GREETING)
        .count();
    assert_eq!(greetings, 1);
}

#[tokio::test]
async fn submit_initializes_implicitly() {
    let service = Scripted::new([]);
    let mut session = session(&service);
    assert!(!session.is_initialized());

    session.submit("steering knuckle").await.unwrap();

    assert!(session.is_initialized());
    assert_eq!(session.transcript()[0], ChatMessage::assistant(GREETING));
    assert_eq!(session.greet(), None);
}

/// Holds every request open until the test ends.
struct Hanging;

#[async_trait::async_trait]
impl CompletionService for Hanging {
    async fn complete(&self, _: &ChatCompletionRequest) -> Result<String> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn interrupt_cancels_hung_request() {
    let mut session = ChatSession::new(Hanging, ChatConfig::default());
    session.greet();
    let interrupt = Arc::new(Interrupt::new());
    interrupt.arm();

    let signal = tokio::spawn({
        let interrupt = interrupt.clone();
        async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            interrupt.trigger()
        }
    });
    let reply = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        session.submit_until("cost of a hung call", interrupt.wait()),
    )
    .await
    .expect("interrupt should end the turn")
    .unwrap();

    assert!(signal.await.unwrap());
    assert_eq!(reply, None);
    assert_eq!(session.state(), SessionState::AwaitingInput);
    assert_eq!(session.message_count(), 1);
    // A second signal during the same turn is left to the caller.
    assert!(!interrupt.trigger());
}

#[tokio::test]
async fn next_turn_after_cancel_is_clean() {
    let service = Scripted::new([Ok("after".to_string())]);
    let mut session = session(&service);
    session.greet();

    let cancelled = session.submit_until("dropped", async {}).await.unwrap();
    // An already-complete cancel future may still lose the race to a ready reply.
    if cancelled.is_none() {
        assert_eq!(session.message_count(), 1);
    }

    let interrupt = Interrupt::new();
    interrupt.arm();
    let reply = session
        .submit_until("kept", interrupt.wait())
        .await
        .unwrap();
    assert!(reply.is_some());
    assert!(!interrupt.is_set());
    let roles: Vec<Role> = session.transcript().iter().map(ChatMessage::role).collect();
    for pair in roles[1..].chunks(2) {
        assert_eq!(pair, &[Role::User, Role::Assistant]);
    }
}

#[tokio::test]
async fn user_text_is_kept_as_typed() {
    let service = Scripted::new([]);
    let mut session = session(&service);

    session.submit("  cast aluminium knuckle \n").await.unwrap();

    assert_eq!(
        session.transcript()[1],
        ChatMessage::user("  cast aluminium knuckle \n")
    );
    assert_eq!(
        service.requests()[0].messages[2].content(),
        "  cast aluminium knuckle \n"
    );
}
