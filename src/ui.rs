use crate::dates::{date_key, display_date_str};
use crate::models::{Motivation, Resource, Session, Stats};
use crate::stats::{day_count, session_count, streak_message};
use chrono::NaiveDate;

pub struct DashboardView<'a> {
    pub today: NaiveDate,
    pub stats: &'a Stats,
    pub motivation: &'a Motivation,
    pub recent: &'a [Session],
    pub spotlight: Option<&'a Resource>,
    pub articles: &'a [Resource],
    pub videos: &'a [Resource],
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", &date_key(view.today))
        .replace("{{TOTAL}}", &view.stats.total_sessions.to_string())
        .replace("{{BULLSEYES}}", &view.stats.total_bullseyes.to_string())
        .replace("{{MONTHLY}}", &session_count(view.stats.monthly_sessions))
        .replace("{{STREAK}}", &day_count(view.stats.current_streak))
        .replace("{{STREAK_MESSAGE}}", &escape_html(&streak_message(view.stats)))
        .replace("{{MOTIVATION_TITLE}}", &escape_html(&view.motivation.title))
        .replace("{{MOTIVATION_MESSAGE}}", &escape_html(&view.motivation.message))
        .replace("{{RECENT}}", &render_recent(view.recent))
        .replace("{{SPOTLIGHT}}", &render_spotlight(view.spotlight))
        .replace("{{ARTICLES}}", &render_links(view.articles, "No articles saved yet."))
        .replace("{{VIDEOS}}", &render_links(view.videos, "No videos saved yet."))
}

fn render_recent(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return r#"<li class="timeline-empty">No sessions recorded yet. Log your first practice today!</li>"#
            .to_string();
    }
    sessions
        .iter()
        .map(|session| {
            let notes = if session.notes.is_empty() {
                "No notes logged."
            } else {
                session.notes.as_str()
            };
            format!(
                r#"<li class="timeline-item"><h3>{}</h3><p><strong>Focus:</strong> {}</p><p><strong>Notes:</strong> {}</p></li>"#,
                escape_html(&display_date_str(&session.date)),
                escape_html(session.focus.label()),
                escape_html(notes),
            )
        })
        .collect()
}

fn render_spotlight(spotlight: Option<&Resource>) -> String {
    let Some(resource) = spotlight else {
        return "<p>Add a resource to feature it here.</p>".to_string();
    };
    let notes = if resource.notes.is_empty() {
        "Keep this on your radar this week."
    } else {
        resource.notes.as_str()
    };
    format!(
        r#"<h3>{}</h3><p>{}</p><a href="{}" target="_blank" rel="noopener" class="primary">Open resource</a>"#,
        escape_html(&resource.title),
        escape_html(notes),
        escape_html(&resource.url),
    )
}

fn render_links(resources: &[Resource], empty: &str) -> String {
    if resources.is_empty() {
        return format!("<li>{empty}</li>");
    }
    resources
        .iter()
        .map(|resource| {
            format!(
                r#"<li><a href="{}" target="_blank" rel="noopener">{}</a><span>{}</span></li>"#,
                escape_html(&resource.url),
                escape_html(&resource.title),
                escape_html(&resource.notes),
            )
        })
        .collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Archery Practice Log</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3e6;
      --bg-2: #c9dcae;
      --ink: #23291f;
      --accent: #d9482b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f3f7ea 60%, #f9faf4 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.2rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .tile, .card {
      background: #fff;
      border-radius: 18px;
      padding: 18px;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.08);
    }

    .tile .value {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .tile .label {
      color: #6b6762;
      font-size: 0.9rem;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    li span {
      display: block;
      color: #6b6762;
      font-size: 0.9rem;
    }

    .timeline-item h3, .card h3 {
      margin: 0 0 6px;
      font-size: 1rem;
    }

    .timeline-item p {
      margin: 2px 0;
    }

    form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    label {
      display: grid;
      gap: 4px;
      font-size: 0.9rem;
    }

    input, select, textarea {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid #cfd6c4;
    }

    textarea {
      grid-column: 1 / -1;
      min-height: 80px;
    }

    button, a.primary {
      font: inherit;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
      text-decoration: none;
      display: inline-block;
    }

    button.secondary {
      background: var(--accent-2);
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
      margin: 12px 0;
    }

    .day {
      aspect-ratio: 1;
      border-radius: 10px;
      background: #f1f4ec;
      display: grid;
      place-items: center;
      font-size: 0.9rem;
    }

    .day.filler {
      background: transparent;
    }

    .day.logged {
      background: var(--bg-2);
    }

    .day.streak {
      background: var(--accent);
      color: #fff;
    }

    .day.today {
      outline: 2px solid var(--accent-2);
    }

    .calendar-nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
    }

    .status.error {
      color: #b42318;
    }

    .status.ok {
      color: #2b7a3d;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Archery Practice Log</h1>
      <p class="subtitle">{{STREAK_MESSAGE}}</p>
    </header>

    <section class="panel">
      <div class="tile"><div class="value">{{TOTAL}}</div><div class="label">Sessions logged</div></div>
      <div class="tile"><div class="value">{{BULLSEYES}}</div><div class="label">Bullseyes</div></div>
      <div class="tile"><div class="value">{{MONTHLY}}</div><div class="label">This month</div></div>
      <div class="tile"><div class="value">{{STREAK}}</div><div class="label">Current streak</div></div>
    </section>

    <section class="card" id="motivationCard">
      <h3>{{MOTIVATION_TITLE}}</h3>
      <p>{{MOTIVATION_MESSAGE}}</p>
    </section>

    <section class="card">
      <h2>Log a practice</h2>
      <form id="session-form">
        <label>Date<input type="date" name="date" value="{{TODAY}}" required /></label>
        <label>Location<input type="text" name="location" /></label>
        <label>Focus
          <select name="focus">
            <option value="form">Form &amp; posture</option>
            <option value="accuracy">Accuracy &amp; grouping</option>
            <option value="distance">Long range practice</option>
            <option value="tuning">Equipment tuning</option>
            <option value="mental">Mental reps &amp; visualization</option>
          </select>
        </label>
        <label>Arrows<input type="number" min="0" name="arrows" /></label>
        <label>Bullseyes<input type="number" min="0" name="bullseyes" /></label>
        <label>Quality<input type="number" min="1" max="5" name="quality" value="3" /></label>
        <textarea name="notes" placeholder="What did you notice today?"></textarea>
        <button type="submit">Save session</button>
      </form>
      <ul id="prompts"></ul>
      <p class="status" id="status"></p>
    </section>

    <section class="card">
      <div class="calendar-nav">
        <button type="button" class="secondary" id="prev-month">&larr;</button>
        <h2 id="month-label"></h2>
        <button type="button" class="secondary" id="next-month">&rarr;</button>
      </div>
      <div class="calendar-grid" id="calendar-days"></div>
      <p id="streak-summary"></p>
    </section>

    <section class="panel">
      <div class="card">
        <h2>Recent sessions</h2>
        <ul>{{RECENT}}</ul>
      </div>
      <div class="card">
        <h2>Spotlight</h2>
        {{SPOTLIGHT}}
      </div>
    </section>

    <section class="panel">
      <div class="card"><h2>Articles</h2><ul>{{ARTICLES}}</ul></div>
      <div class="card"><h2>Videos</h2><ul>{{VIDEOS}}</ul></div>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const form = document.getElementById('session-form');
    let month = null;

    const setStatus = (text, tone) => {
      statusEl.textContent = text;
      statusEl.className = `status ${tone || ''}`;
    };

    const loadCalendar = async (key) => {
      const query = key ? `?month=${encodeURIComponent(key)}` : '';
      const res = await fetch(`/api/calendar${query}`);
      if (!res.ok) {
        throw new Error('Unable to load calendar');
      }
      month = await res.json();
      document.getElementById('month-label').textContent = month.label;
      document.getElementById('streak-summary').textContent = month.summary;
      const grid = document.getElementById('calendar-days');
      grid.innerHTML = '';
      for (let i = 0; i < month.leading_blanks; i++) {
        const filler = document.createElement('span');
        filler.className = 'day filler';
        grid.appendChild(filler);
      }
      month.days.forEach((day) => {
        const cell = document.createElement('span');
        cell.className = 'day';
        if (day.logged) cell.classList.add('logged');
        if (day.streak) cell.classList.add('streak');
        if (day.today) cell.classList.add('today');
        cell.textContent = day.day;
        cell.title = day.date;
        grid.appendChild(cell);
      });
    };

    const loadPrompts = async () => {
      const res = await fetch('/api/prompts');
      if (!res.ok) return;
      const { prompts } = await res.json();
      const list = document.getElementById('prompts');
      list.innerHTML = '';
      prompts.forEach((prompt) => {
        const li = document.createElement('li');
        li.textContent = prompt;
        list.appendChild(li);
      });
    };

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const payload = Object.fromEntries(new FormData(form).entries());
      setStatus('Saving...', 'info');
      const res = await fetch('/api/sessions', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (!res.ok) {
        setStatus((await res.text()) || 'Request failed', 'error');
        return;
      }
      setStatus('Session saved! Your streaks and stats are up to date.', 'ok');
      setTimeout(() => window.location.reload(), 900);
    });

    document.getElementById('prev-month').addEventListener('click', () => {
      loadCalendar(month && month.previous).catch((err) => setStatus(err.message, 'error'));
    });
    document.getElementById('next-month').addEventListener('click', () => {
      loadCalendar(month && month.next).catch((err) => setStatus(err.message, 'error'));
    });

    loadCalendar().catch((err) => setStatus(err.message, 'error'));
    loadPrompts().catch(() => {});
  </script>
</body>
</html>
"#;
