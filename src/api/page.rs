//! The single-page widget

/// Page markup. It polls `/status` once a second and re-renders; the two
/// duration inputs keep their own draft and only post it on blur or Enter.
pub const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Pomodoro</title>
<style>
  body { font-family: system-ui, sans-serif; display: flex; justify-content: center; margin-top: 10vh; }
  .widget { text-align: center; }
  #clock { font-size: 5rem; font-variant-numeric: tabular-nums; margin: 0.5rem 0; }
  #label { font-size: 1.5rem; text-transform: uppercase; letter-spacing: 0.2em; }
  .controls button { font-size: 1rem; margin: 0 0.25rem; padding: 0.4rem 1rem; }
  .durations { margin-top: 1.5rem; }
  .durations input { width: 4rem; }
</style>
</head>
<body>
<div class="widget">
  <div id="label">Work</div>
  <div id="clock">--:--</div>
  <div class="controls">
    <button id="toggle">Start</button>
    <button id="reset">Reset</button>
    <button id="skip">Skip</button>
  </div>
  <div class="durations">
    <label>Work <input id="work" type="number" min="1" max="120"> min</label>
    <label>Break <input id="break" type="number" min="1" max="60"> min</label>
  </div>
</div>
<script>
  let running = false;

  function render(timer) {
    running = timer.is_running;
    document.getElementById("clock").textContent = timer.clock;
    document.getElementById("label").textContent = timer.session_label;
    document.getElementById("toggle").textContent = running ? "Pause" : "Start";
    syncDraft("work", timer.work_minutes);
    syncDraft("break", timer.break_minutes);
  }

  function syncDraft(id, minutes) {
    const input = document.getElementById(id);
    if (document.activeElement !== input) {
      input.value = minutes;
    }
  }

  async function post(path, body) {
    const response = await fetch(path, {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body || {}),
    });
    render((await response.json()).timer);
  }

  async function refresh() {
    const response = await fetch("/status");
    render((await response.json()).timer);
  }

  function wireDraft(id, path) {
    const input = document.getElementById(id);
    input.addEventListener("blur", () => post(path, { minutes: input.value }));
    input.addEventListener("keydown", (event) => {
      if (event.key === "Enter") {
        input.blur();
      }
    });
  }

  document.getElementById("toggle").addEventListener("click", () => post(running ? "/pause" : "/start"));
  document.getElementById("reset").addEventListener("click", () => post("/reset"));
  document.getElementById("skip").addEventListener("click", () => post("/skip"));
  wireDraft("work", "/work-duration");
  wireDraft("break", "/break-duration");

  refresh();
  setInterval(refresh, 1000);
</script>
</body>
</html>
"#;
