use crate::models::{MAX_NOTE_CHARS, MOOD_OPTIONS};

pub fn render_index(date_label: &str, selected_mood: &str) -> String {
    INDEX_HTML
        .replace("{{DATE}}", date_label)
        .replace("{{MOODS}}", &render_mood_buttons(selected_mood))
        .replace("{{MAX_NOTE}}", &MAX_NOTE_CHARS.to_string())
}

fn render_mood_buttons(selected_mood: &str) -> String {
    MOOD_OPTIONS
        .iter()
        .map(|option| {
            let class = if option.emoji == selected_mood { "mood selected" } else { "mood" };
            format!(
                r#"<button class="{class}" type="button" data-mood="{emoji}" aria-label="Select {label} mood"><span class="emoji">{emoji}</span><span class="mood-label">{label}</span></button>"#,
                emoji = option.emoji,
                label = option.label,
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Journal</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2ff;
      --bg-2: #f5d0fe;
      --ink: #2b2a28;
      --accent: #db2777;
      --accent-2: #4338ca;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(67, 56, 202, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #faf5ff 60%, #fdf2f8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(67, 56, 202, 0.08);
      display: grid;
      gap: 14px;
    }

    .row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .moods {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(86px, 1fr));
      gap: 10px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    .mood {
      border-radius: 16px;
      display: grid;
      justify-items: center;
      gap: 4px;
      background: rgba(67, 56, 202, 0.05);
    }

    .mood .emoji {
      font-size: 1.8rem;
    }

    .mood .mood-label {
      font-size: 0.75rem;
      color: #57534e;
    }

    .mood.selected {
      background: white;
      box-shadow: 0 0 0 2px var(--accent-2), 0 8px 16px rgba(67, 56, 202, 0.18);
      transform: scale(1.05);
    }

    .clear {
      background: transparent;
      color: #c63b2b;
      border: 1px solid rgba(198, 59, 43, 0.3);
    }

    textarea {
      width: 100%;
      min-height: 100px;
      resize: none;
      border-radius: 14px;
      border: 1px solid rgba(67, 56, 202, 0.15);
      padding: 12px;
      font: inherit;
    }

    .counter[data-level="near"] {
      color: #b45309;
    }

    .counter[data-level="limit"] {
      color: #c63b2b;
    }

    .status {
      text-align: center;
      font-size: 0.95rem;
      color: #6b645d;
    }

    .status[data-type="saving"] {
      color: #b45309;
    }

    .status[data-type="saved"] {
      color: #2d7a4b;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(67, 56, 202, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      color: #6b645d;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(67, 56, 202, 0.12);
    }

    .entries {
      display: grid;
      gap: 10px;
    }

    .entry {
      display: flex;
      gap: 14px;
      padding: 14px;
      border-radius: 16px;
      border: 1px solid rgba(67, 56, 202, 0.1);
    }

    .entry.today {
      background: linear-gradient(90deg, #ede9fe, #fce7f3);
    }

    .entry .emoji {
      font-size: 2rem;
    }

    .entry .meta {
      font-size: 0.8rem;
      color: #8b857d;
    }

    .badge {
      font-size: 0.7rem;
      padding: 2px 8px;
      border-radius: 999px;
      background: rgba(67, 56, 202, 0.1);
      margin-left: 6px;
    }

    .summary {
      display: grid;
      grid-template-columns: 1fr auto;
      align-items: center;
      gap: 12px;
      padding-top: 12px;
      border-top: 1px solid rgba(67, 56, 202, 0.1);
    }

    .summary .total {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
      text-align: center;
    }

    .calendar {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .cell {
      min-height: 52px;
      border-radius: 12px;
      display: grid;
      place-items: center;
      font-size: 0.85rem;
    }

    .cell.in-month {
      background: rgba(67, 56, 202, 0.05);
    }

    .cell.out {
      color: #b8b2aa;
    }

    .cell.today {
      box-shadow: 0 0 0 2px var(--accent);
    }

    .weekday {
      text-align: center;
      font-size: 0.8rem;
      color: #6b645d;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
      text-align: center;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Journal</h1>
      <p class="subtitle">Track your daily emotions and thoughts</p>
      <p class="subtitle" id="date">{{DATE}}</p>
    </header>

    <section class="card">
      <div class="row">
        <h2>How are you feeling today?</h2>
        <button class="clear" id="clear-btn" type="button">Clear Today</button>
      </div>
      <div class="moods" id="moods">
        {{MOODS}}
      </div>
    </section>

    <section class="card">
      <div class="row">
        <h2><label for="note">What's on your mind?</label></h2>
        <span class="counter" id="counter"></span>
      </div>
      <textarea id="note" maxlength="{{MAX_NOTE}}" placeholder="Share your thoughts, what happened today, or how you're feeling... (optional)"></textarea>
    </section>

    <div class="status" id="status"></div>

    <section class="card">
      <div class="row">
        <h2 id="history-title">History</h2>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="list" role="tab" aria-selected="true">List</button>
          <button class="tab" type="button" data-tab="calendar" role="tab" aria-selected="false">Calendar</button>
        </div>
      </div>
      <div id="list-view" class="entries"></div>
      <div id="calendar-view" hidden>
        <div class="row">
          <button class="tab" id="prev-month" type="button">&larr;</button>
          <strong id="month-title"></strong>
          <button class="tab" id="this-month" type="button">Today</button>
          <button class="tab" id="next-month" type="button">&rarr;</button>
        </div>
        <div class="calendar" id="calendar"></div>
      </div>
      <div class="summary" id="summary" hidden>
        <p class="subtitle" id="summary-weeks"></p>
        <div>
          <div class="total" id="summary-total">0</div>
          <div class="subtitle">Total Entries</div>
        </div>
      </div>
    </section>

    <p class="hint">Entries save automatically a moment after you stop typing.</p>
  </main>

  <script>
    const MAX_NOTE = {{MAX_NOTE}};
    const noteEl = document.getElementById('note');
    const counterEl = document.getElementById('counter');
    const statusEl = document.getElementById('status');
    const listEl = document.getElementById('list-view');
    const calendarViewEl = document.getElementById('calendar-view');
    const calendarEl = document.getElementById('calendar');
    const monthTitleEl = document.getElementById('month-title');
    const summaryEl = document.getElementById('summary');
    const summaryWeeksEl = document.getElementById('summary-weeks');
    const summaryTotalEl = document.getElementById('summary-total');
    const moodButtons = Array.from(document.querySelectorAll('.mood'));
    const tabs = Array.from(document.querySelectorAll('[data-tab]'));

    let activeTab = 'list';
    let month = null;
    let pollTimer = null;

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) {
        node.className = className;
      }
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const updateCounter = () => {
      const remaining = MAX_NOTE - noteEl.value.length;
      counterEl.textContent = `${remaining} left`;
      counterEl.dataset.level = remaining <= 0 ? 'limit' : remaining <= 20 ? 'near' : '';
    };

    const renderStatus = (today) => {
      if (today.status === 'saving') {
        setStatus(today.mood ? 'Saving changes...' : 'Select a mood to save', 'saving');
      } else if (today.status === 'saved') {
        setStatus('Entry saved automatically', 'saved');
      } else {
        setStatus('Select a mood to get started', '');
      }
    };

    const renderList = (entries) => {
      listEl.replaceChildren();
      if (!entries.length) {
        listEl.append(el('p', 'hint', 'No entries yet. Pick a mood to start your journal.'));
        return;
      }
      entries.forEach((entry) => {
        const row = el('div', entry.is_today ? 'entry today' : 'entry');
        row.append(el('span', 'emoji', entry.mood));
        const body = el('div');
        const title = el('strong', '', entry.display_date);
        if (entry.is_today) {
          title.append(el('span', 'badge', 'Today'));
        } else if (entry.is_recent) {
          title.append(el('span', 'badge', 'Recent'));
        }
        body.append(title);
        body.append(el('p', '', entry.note || 'No note for this day'));
        body.append(el('div', 'meta', `Logged ${entry.logged_at}`));
        row.append(body);
        listEl.append(row);
      });
    };

    const renderSummary = (summary) => {
      summaryEl.hidden = summary.total_entries === 0;
      const weeks = summary.weeks_tracked;
      summaryWeeksEl.textContent = `You've been tracking your mood for ${weeks} week${weeks === 1 ? '' : 's'}`;
      summaryTotalEl.textContent = String(summary.total_entries);
    };

    const renderToday = (today) => {
      moodButtons.forEach((button) => {
        button.classList.toggle('selected', button.dataset.mood === today.mood);
      });
      if (document.activeElement !== noteEl) {
        noteEl.value = today.note;
      }
      updateCounter();
      renderStatus(today);
      renderList(today.history);
      renderSummary(today.summary);
    };

    const loadCalendar = async () => {
      const query = month ? `?year=${month.year}&month=${month.month}` : '';
      const res = await fetch(`/api/calendar${query}`);
      if (!res.ok) {
        throw new Error('Unable to load calendar');
      }
      const data = await res.json();
      month = { year: data.year, month: data.month };
      monthTitleEl.textContent = data.title;
      calendarEl.replaceChildren();
      ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'].forEach((day) => {
        calendarEl.append(el('div', 'weekday', day));
      });
      data.days.forEach((day) => {
        let className = day.in_month ? 'cell in-month' : 'cell out';
        if (day.is_today) {
          className += ' today';
        }
        const cell = el('div', className);
        cell.append(el('span', '', String(day.day)));
        if (day.entry) {
          cell.append(el('span', 'emoji', day.entry.mood));
          cell.title = day.entry.note || 'No note';
        }
        calendarEl.append(cell);
      });
      return data;
    };

    const send = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      renderToday(await res.json());
      schedulePoll();
    };

    // The server saves after a quiet period; poll once it should be done.
    const schedulePoll = () => {
      clearTimeout(pollTimer);
      pollTimer = setTimeout(() => {
        refresh().catch((err) => setStatus(err.message, 'error'));
      }, 900);
    };

    const refresh = async () => {
      const res = await fetch('/api/today');
      if (!res.ok) {
        throw new Error('Unable to load today');
      }
      renderToday(await res.json());
      if (activeTab === 'calendar') {
        await loadCalendar();
      }
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      listEl.hidden = tab !== 'list';
      calendarViewEl.hidden = tab !== 'calendar';
      if (tab === 'calendar') {
        loadCalendar().catch((err) => setStatus(err.message, 'error'));
      }
    };

    const shiftMonth = (delta) => {
      if (!month) {
        return;
      }
      const index = month.year * 12 + month.month - 1 + delta;
      month = { year: Math.floor(index / 12), month: (index % 12) + 1 };
      loadCalendar().catch((err) => setStatus(err.message, 'error'));
    };

    moodButtons.forEach((button) => {
      button.addEventListener('click', () => {
        send('/api/today/mood', { mood: button.dataset.mood }).catch((err) => setStatus(err.message, 'error'));
      });
    });

    noteEl.addEventListener('input', () => {
      updateCounter();
      send('/api/today/note', { note: noteEl.value }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('clear-btn').addEventListener('click', () => {
      noteEl.value = '';
      send('/api/today/clear').catch((err) => setStatus(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    document.getElementById('prev-month').addEventListener('click', () => shiftMonth(-1));
    document.getElementById('next-month').addEventListener('click', () => shiftMonth(1));
    document.getElementById('this-month').addEventListener('click', () => {
      month = null;
      loadCalendar().catch((err) => setStatus(err.message, 'error'));
    });

    window.addEventListener('pagehide', () => {
      navigator.sendBeacon('/api/today/flush');
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
