//! 单页界面
//!
//! 表单提交后用 fetch 调用 `/api/generate`，生成期间禁用按钮并显示进度，
//! 成功后在浏览器里保存返回的 PDF 并给出下载链接

use crate::config::MAX_SETS_PER_CYCLE;
use crate::models::Topic;
use crate::prompts::template_for;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>CLAT/AILET Study Material Generator</title>
<style>
  body { font-family: sans-serif; max-width: 640px; margin: 3rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: bold; }
  select, input { font-size: 1rem; padding: .3rem; margin-top: .3rem; }
  #summary { color: #555; font-size: .9rem; margin-top: .4rem; }
  button { margin-top: 1.5rem; font-size: 1rem; padding: .5rem 1.2rem; }
  #status { margin-top: 1.5rem; }
  .error { color: #b00020; }
  .spinner { display: inline-block; width: 1rem; height: 1rem; border: 2px solid #ccc;
             border-top-color: #333; border-radius: 50%; animation: spin 1s linear infinite;
             vertical-align: middle; margin-right: .5rem; }
  @keyframes spin { to { transform: rotate(360deg); } }
</style>
</head>
<body>
<h1>CLAT/AILET Study Material Generator</h1>
<form id="generate-form">
  <label for="topic">Topic</label>
  <select id="topic" name="topic">
{{TOPIC_OPTIONS}}
  </select>
  <div id="summary"></div>
  <label for="count">Number of Paragraphs</label>
  <input id="count" name="count" type="number" min="1" max="{{MAX_SETS}}" value="1">
  <div><button id="generate" type="submit">Generate</button></div>
</form>
<div id="status"></div>
<script>
const form = document.getElementById("generate-form");
const button = document.getElementById("generate");
const statusBox = document.getElementById("status");
const topicSelect = document.getElementById("topic");
const summary = document.getElementById("summary");
let currentUrl = null;

function showSummary() {
  summary.textContent = topicSelect.selectedOptions[0].dataset.summary || "";
}
topicSelect.addEventListener("change", showSummary);
showSummary();

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  if (button.disabled) return;
  button.disabled = true;
  statusBox.innerHTML = '<span class="spinner"></span>Generating…';

  try {
    const response = await fetch("/api/generate", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({
        topic: topicSelect.value,
        count: Number(document.getElementById("count").value),
      }),
    });

    if (!response.ok) {
      let message = response.statusText;
      let step = "request";
      try {
        const body = await response.json();
        message = body.error;
        step = body.step;
      } catch (_) {}
      statusBox.innerHTML = "";
      const p = document.createElement("p");
      p.className = "error";
      p.textContent = "Failed during " + step + ": " + message;
      statusBox.appendChild(p);
      return;
    }

    const disposition = response.headers.get("Content-Disposition") || "";
    const match = disposition.match(/filename="([^"]+)"/);
    const fileName = match ? match[1] : "clat_practice.pdf";
    const blob = await response.blob();
    if (currentUrl) URL.revokeObjectURL(currentUrl);
    currentUrl = URL.createObjectURL(blob);

    statusBox.innerHTML = "";
    const ready = document.createElement("p");
    ready.textContent = "PDF Ready";
    const link = document.createElement("a");
    link.href = currentUrl;
    link.download = fileName;
    link.textContent = "Download Study PDF";
    statusBox.appendChild(ready);
    statusBox.appendChild(link);
  } catch (err) {
    statusBox.innerHTML = "";
    const p = document.createElement("p");
    p.className = "error";
    p.textContent = "Failed during request: " + err;
    statusBox.appendChild(p);
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"#;

/// 渲染首页，科目下拉框由 `Topic::ALL` 生成
pub fn render_index() -> String {
    let options = Topic::ALL
        .into_iter()
        .map(|topic| {
            format!(
                "    <option value=\"{name}\" data-summary=\"{summary}\">{name}</option>",
                name = escape_html(topic.name()),
                summary = escape_html(template_for(topic).summary),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_TEMPLATE
        .replace("{{TOPIC_OPTIONS}}", &options)
        .replace("{{MAX_SETS}}", &MAX_SETS_PER_CYCLE.to_string())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
