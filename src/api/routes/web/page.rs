//! The chat page. Handlebars escapes everything it renders so past
//! replies from the model can be put straight into the markup.

use handlebars::{Handlebars, TemplateError};

pub const INDEX_TEMPLATE: &str = "index";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Qwen Chat</title>
    <style>
      body { font-family: Arial, sans-serif; margin: 20px; }
      .chat-box { max-width: 600px; margin: auto; }
      .message { margin: 10px 0; white-space: pre-wrap; }
      .message.user { color: blue; }
      .message.assistant { color: green; }
      .message.error { color: red; }
      textarea { width: 100%; height: 60px; resize: none; }
      select, input, button { margin-bottom: 10px; }
    </style>
  </head>
  <body>
    <div class="chat-box">
      <div id="chat">
        {{#each turns}}
        <div class="message {{class}}">{{content}}</div>
        {{/each}}
      </div>
      {{#if models}}
      <select id="model-select">
        {{#each models}}
        <option value="{{name}}"{{#if selected}} selected{{/if}}>{{name}}</option>
        {{/each}}
      </select>
      {{else}}
      <input id="model-select" type="text" placeholder="Model id">
      {{/if}}
      <textarea id="message-input" placeholder="Type your message here..."></textarea>
      <label>
        <input type="checkbox" id="search-web"> Search Web
      </label>
      <button id="send-btn">Send</button>
      <button id="clear-history-btn">Clear Chat History</button>
    </div>
    <script>
      const chatBox = document.getElementById('chat');
      const input = document.getElementById('message-input');
      const sendBtn = document.getElementById('send-btn');
      const modelSelect = document.getElementById('model-select');
      const searchWebCheckbox = document.getElementById('search-web');
      const clearHistoryBtn = document.getElementById('clear-history-btn');

      function appendMessage(kind, text) {
        const div = document.createElement('div');
        div.className = 'message ' + kind;
        div.textContent = text;
        chatBox.appendChild(div);
      }

      async function sendMessage() {
        const message = input.value.trim();
        if (!message) return;

        appendMessage('user', message);
        input.value = '';

        const requestBody = { message: message, model: modelSelect.value };
        if (searchWebCheckbox.checked) {
          requestBody.enable_search = true;
        }

        try {
          const response = await fetch('/chat', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(requestBody)
          });
          const data = await response.json();
          if (data.error) {
            appendMessage('error', data.error);
          } else {
            appendMessage('assistant', data.response);
          }
        } catch (err) {
          appendMessage('error', 'Request failed: ' + err);
        }
      }

      async function clearChatHistory() {
        await fetch('/chat', { method: 'DELETE' });
        chatBox.replaceChildren();
      }

      input.addEventListener('keydown', (event) => {
        if (event.key === 'Enter' && !event.shiftKey) {
          event.preventDefault();
          sendMessage();
        }
      });
      sendBtn.addEventListener('click', () => sendMessage());
      clearHistoryBtn.addEventListener('click', clearChatHistory);
    </script>
  </body>
</html>
"#;

pub fn templates<'a>() -> Result<Handlebars<'a>, TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_template_string(INDEX_TEMPLATE, INDEX_HTML)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_renders_models_and_turns() {
        let html = templates()
            .unwrap()
            .render(
                INDEX_TEMPLATE,
                &json!({
                    "models": [
                        {"name": "qwen2.5-72b-instruct", "selected": true},
                        {"name": "qwen2.5-coder-7b-instruct", "selected": false}
                    ],
                    "turns": [
                        {"class": "user", "content": "<b>hi"},
                        {"class": "assistant", "content": "hello"}
                    ]
                }),
            )
            .unwrap();

        assert!(html.contains(r#"<option value="qwen2.5-72b-instruct" selected>"#));
        assert!(html.contains(r#"<option value="qwen2.5-coder-7b-instruct">"#));
        assert!(html.contains(r#"<div class="message user">&lt;b&gt;hi</div>"#));
        assert!(html.contains(r#"<div class="message assistant">hello</div>"#));
    }

    #[test]
    fn test_renders_free_model_input() {
        let html = templates()
            .unwrap()
            .render(INDEX_TEMPLATE, &json!({"models": [], "turns": []}))
            .unwrap();
        assert!(html.contains(r#"<input id="model-select" type="text""#));
        assert!(!html.contains("<select"));
    }
}
