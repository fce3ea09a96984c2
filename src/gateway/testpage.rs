//! Embedded browser test page served at `/`
//!
//! A single-file harness for poking the gateway by hand: streaming mode
//! goes through `GET /stream-response` with an EventSource, buffered mode
//! through `POST /v1/chat/completions` with fetch.

pub(super) const TEST_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>poegate</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; background: #1e1e2e; color: #cdd6f4; }
  h1 { font-size: 1.4rem; }
  h1 span { color: #89b4fa; }
  label { display: block; margin-top: 0.8rem; font-size: 0.85rem; color: #a6adc8; }
  input[type=text], input[type=password], textarea {
    width: 100%; box-sizing: border-box; margin-top: 0.25rem; padding: 0.5rem;
    background: #313244; color: #cdd6f4; border: 1px solid #45475a; border-radius: 6px;
  }
  textarea { min-height: 5rem; resize: vertical; }
  .row { display: flex; align-items: center; gap: 0.5rem; margin-top: 0.8rem; }
  button { padding: 0.5rem 1.2rem; background: #89b4fa; color: #1e1e2e; border: none; border-radius: 6px; cursor: pointer; font-weight: 600; }
  button:disabled { opacity: 0.5; cursor: wait; }
  #response { margin-top: 1.2rem; padding: 0.8rem; min-height: 4rem; white-space: pre-wrap;
    background: #181825; border: 1px solid #45475a; border-radius: 6px; font-family: ui-monospace, monospace; font-size: 0.9rem; }
</style>
</head>
<body>
<h1><span>poegate</span> test page</h1>

<label>API key
  <input type="password" id="api-key" placeholder="empty uses the server default (buffered mode)">
</label>
<label>Bot name
  <input type="text" id="bot-name" value="Claude-3.7-Sonnet">
</label>
<label>Message
  <textarea id="message">Hello! Who are you?</textarea>
</label>
<div class="row">
  <input type="checkbox" id="stream" checked>
  <label for="stream" style="margin-top:0">Stream the response</label>
  <button id="send" style="margin-left:auto">Send</button>
</div>

<div id="response"></div>

<script>
const out = document.getElementById('response');
const send = document.getElementById('send');

send.addEventListener('click', () => {
  const apiKey = document.getElementById('api-key').value;
  const bot = document.getElementById('bot-name').value;
  const message = document.getElementById('message').value;
  out.textContent = '';
  send.disabled = true;

  if (document.getElementById('stream').checked) {
    const params = new URLSearchParams({ api_key: apiKey, bot_name: bot, message: message });
    const source = new EventSource('/stream-response?' + params);
    source.onmessage = (event) => {
      if (event.data === '[DONE]') {
        source.close();
        send.disabled = false;
        return;
      }
      out.textContent += event.data;
    };
    source.onerror = () => {
      source.close();
      send.disabled = false;
    };
  } else {
    const headers = { 'Content-Type': 'application/json' };
    if (apiKey) {
      headers['Authorization'] = 'Bearer ' + apiKey;
    }
    fetch('/v1/chat/completions', {
      method: 'POST',
      headers: headers,
      body: JSON.stringify({
        model: bot,
        messages: [{ role: 'user', content: message }],
        stream: false,
      }),
    })
      .then((resp) => resp.json())
      .then((data) => {
        if (data.choices && data.choices.length > 0) {
          out.textContent = data.choices[0].message.content;
        } else {
          out.textContent = JSON.stringify(data, null, 2);
        }
      })
      .catch((err) => { out.textContent = 'Request failed: ' + err; })
      .finally(() => { send.disabled = false; });
  }
});
</script>
</body>
</html>
"##;
