use crate::openai::{
    CompletionEndpoint, CompletionError, CompletionRequest, Message, Role, completion,
};

/// Builds the message list sent for the next turn. The system message
/// is always first and is never part of the stored history.
pub fn transcript(system_message: &str, history: &[Message], user_msg: &Message) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::new(Role::System, system_message));
    messages.extend_from_slice(history);
    messages.push(user_msg.clone());
    messages
}

/// Runs the next turn in chat by passing a transcript to the LLM and
/// returns the content of the first choice.
pub async fn chat(
    endpoint: &CompletionEndpoint,
    model: &str,
    transcript: Vec<Message>,
    enable_search: bool,
) -> Result<String, CompletionError> {
    let request = CompletionRequest::new(model, transcript, enable_search);
    tracing::debug!(
        "Requesting completion from {} with {} messages",
        model,
        request.messages().len()
    );

    completion(endpoint, &request)
        .await?
        .into_reply()
        .ok_or_else(|| CompletionError::InvalidResponse("no completion choices".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_SYSTEM_MESSAGE;

    #[test]
    fn test_transcript_order() {
        let history = vec![
            Message::new(Role::User, "What is 2+2?"),
            Message::new(Role::Assistant, "4"),
        ];
        let user_msg = Message::new(Role::User, "And 3+3?");
        let messages = transcript(DEFAULT_SYSTEM_MESSAGE, &history, &user_msg);

        assert_eq!(messages.len(), 4);
        assert_eq!(
            messages[0],
            Message::new(Role::System, DEFAULT_SYSTEM_MESSAGE)
        );
        assert_eq!(&messages[1..3], history.as_slice());
        assert_eq!(messages[3], user_msg);
    }

    #[test]
    fn test_transcript_empty_history() {
        let user_msg = Message::new(Role::User, "Hi");
        let messages = transcript("Be brief.", &[], &user_msg);
        assert_eq!(
            messages,
            vec![Message::new(Role::System, "Be brief."), user_msg]
        );
    }
}
