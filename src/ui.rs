use crate::calendar::shift_month;
use crate::models::{CalendarResponse, RecentEntry, StatsResponse};
use std::fmt::Write as _;

pub const PAGE_RECENT_LIMIT: usize = 10;

const QUICK_ADD: [i64; 4] = [25, 50, 75, 100];
const GOAL_PRESETS: [u64; 4] = [10_000, 15_000, 20_000, 25_000];
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn render_index(
    stats: &StatsResponse,
    calendar: &CalendarResponse,
    recent: &[RecentEntry],
) -> String {
    let pace = if stats.on_track {
        "On track".to_string()
    } else {
        format!("{} behind", group_thousands(stats.behind_by))
    };
    let (prev_year, prev_month) = shift_month(calendar.year, calendar.month, -1);
    let (next_year, next_month) = shift_month(calendar.year, calendar.month, 1);

    INDEX_HTML
        .replace("{{TODAY}}", &stats.today)
        .replace("{{TODAY_COUNT}}", &stats.today_count.to_string())
        .replace("{{QUICK_ADD}}", &quick_add_buttons())
        .replace("{{YEAR}}", &stats.year.to_string())
        .replace("{{TOTAL}}", &group_thousands(stats.total_this_year))
        .replace("{{GOAL}}", &group_thousands(stats.yearly_goal))
        .replace("{{GOAL_RAW}}", &stats.yearly_goal.to_string())
        .replace("{{PROGRESS}}", &format!("{:.1}", stats.progress_percent))
        .replace("{{EXPECTED_PCT}}", &format!("{:.1}", stats.expected_percent))
        .replace("{{PACE_CLASS}}", if stats.on_track { "ahead" } else { "behind" })
        .replace("{{PACE}}", &pace)
        .replace("{{STREAK}}", &stats.streak.to_string())
        .replace("{{AVERAGE}}", &stats.daily_average.to_string())
        .replace("{{ACTIVE_DAYS}}", &stats.active_days.to_string())
        .replace("{{NEEDED}}", &stats.needed_per_day.max(0).to_string())
        .replace("{{MONTH_LABEL}}", &calendar.label)
        .replace("{{PREV}}", &format!("?year={prev_year}&month={prev_month}"))
        .replace("{{NEXT}}", &format!("?year={next_year}&month={next_month}"))
        .replace("{{CALENDAR}}", &calendar_grid(calendar))
        .replace("{{MONTH_TOTAL}}", &group_thousands(calendar.monthly_total))
        .replace("{{GOAL_PRESETS}}", &goal_presets(stats.yearly_goal))
        .replace("{{RECENT}}", &recent_list(recent))
}

fn quick_add_buttons() -> String {
    QUICK_ADD.iter().fold(String::new(), |mut html, amount| {
        let _ = write!(
            html,
            r#"<button name="delta" value="{amount}">+{amount}</button>"#
        );
        html
    })
}

fn calendar_grid(calendar: &CalendarResponse) -> String {
    let mut html = String::new();
    for weekday in WEEKDAYS {
        let _ = write!(html, r#"<div class="weekday">{weekday}</div>"#);
    }
    for cell in &calendar.days {
        match cell {
            None => html.push_str(r#"<div class="cell blank"></div>"#),
            Some(day) => {
                let today = if day.is_today { " today" } else { "" };
                let count = if day.count > 0 {
                    format!("<small>{}</small>", day.count)
                } else {
                    String::new()
                };
                let _ = write!(
                    html,
                    r#"<div class="cell {bucket}{today}" title="{date}"><span>{day}</span>{count}</div>"#,
                    bucket = day.bucket.as_str(),
                    date = day.date,
                    day = day.day,
                );
            }
        }
    }
    html
}

fn goal_presets(current: u64) -> String {
    GOAL_PRESETS.iter().fold(String::new(), |mut html, preset| {
        let selected = if *preset == current { " selected" } else { "" };
        let _ = write!(
            html,
            r#"<button class="preset{selected}" name="yearly_goal" value="{preset}">{}k</button>"#,
            preset / 1000
        );
        html
    })
}

fn recent_list(recent: &[RecentEntry]) -> String {
    if recent.is_empty() {
        return r#"<p class="empty">No entries yet. Start tracking!</p>"#.to_string();
    }
    recent.iter().fold(String::from("<ul>"), |mut html, entry| {
        let _ = write!(
            html,
            r#"<li><span>{label}</span><strong>{count}</strong><form method="post" action="/entries/{date}/delete"><button aria-label="delete">&times;</button></form></li>"#,
            label = entry.label,
            count = entry.count,
            date = entry.date,
        );
        html
    }) + "</ul>"
}

/// `20000` -> `20,000`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Push-up Tracker</title>
  <style>
    :root {
      --bg: #1e1033;
      --card: rgba(88, 28, 135, 0.35);
      --ink: #f5f3ff;
      --muted: #c4b5fd;
      --accent: #d946ef;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #2e1065, var(--bg) 60%, #1e1b4b);
      color: var(--ink);
      font-family: system-ui, sans-serif;
      display: grid;
      place-items: start center;
      padding: 24px 16px 48px;
    }

    main {
      width: min(440px, 100%);
      display: grid;
      gap: 16px;
    }

    section {
      background: var(--card);
      border: 1px solid rgba(167, 139, 250, 0.25);
      border-radius: 18px;
      padding: 18px;
    }

    h1, h2 {
      margin: 0 0 12px;
    }

    .count {
      font-size: 3.5rem;
      font-weight: 700;
      text-align: center;
    }

    .row {
      display: flex;
      gap: 8px;
      justify-content: center;
      flex-wrap: wrap;
    }

    button {
      border: 0;
      border-radius: 10px;
      padding: 8px 12px;
      background: rgba(124, 58, 237, 0.6);
      color: var(--ink);
      cursor: pointer;
    }

    .bar {
      position: relative;
      height: 12px;
      border-radius: 6px;
      background: rgba(0, 0, 0, 0.3);
      overflow: hidden;
    }

    .bar .fill {
      height: 100%;
      background: var(--accent);
    }

    .bar .marker {
      position: absolute;
      top: 0;
      width: 2px;
      height: 100%;
      background: #fff;
    }

    .ahead { color: #4ade80; }
    .behind { color: #fbbf24; }

    .tiles {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 8px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
    }

    .weekday {
      text-align: center;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 8px;
      display: grid;
      place-items: center;
      font-size: 0.8rem;
    }

    .cell small { font-size: 0.6rem; }
    .cell.blank { background: transparent; }
    .cell.empty { background: rgba(46, 16, 101, 0.3); }
    .cell.low { background: rgba(109, 40, 217, 0.5); }
    .cell.medium { background: rgba(124, 58, 237, 0.7); }
    .cell.high { background: rgba(139, 92, 246, 0.8); }
    .cell.max { background: var(--accent); }
    .cell.today { outline: 2px solid var(--accent); }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    li {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 6px 0;
    }

    li form { margin: 0; }

    .preset.selected { background: var(--accent); }
    .empty { color: var(--muted); text-align: center; }
  </style>
</head>
<body>
  <main>
    <section>
      <h1>Today <small>{{TODAY}}</small></h1>
      <form method="post" action="/delta" class="row">
        <button name="delta" value="-25">-25</button>
        <span class="count">{{TODAY_COUNT}}</span>
        <button name="delta" value="25">+25</button>
      </form>
      <form method="post" action="/delta" class="row">{{QUICK_ADD}}</form>
    </section>

    <section>
      <h2>{{YEAR}} Goal: {{TOTAL}} / {{GOAL}}</h2>
      <div class="bar">
        <div class="fill" style="width: {{PROGRESS}}%"></div>
        <div class="marker" style="left: {{EXPECTED_PCT}}%"></div>
      </div>
      <p>{{PROGRESS}}% complete &middot; <span class="{{PACE_CLASS}}">{{PACE}}</span></p>
      <div class="tiles">
        <div>Streak<br /><strong>{{STREAK}}</strong> days</div>
        <div>Daily avg<br /><strong>{{AVERAGE}}</strong></div>
        <div>Days logged<br /><strong>{{ACTIVE_DAYS}}</strong></div>
        <div>Needed/day<br /><strong>{{NEEDED}}</strong></div>
      </div>
    </section>

    <section>
      <div class="row">
        <a href="/{{PREV}}">&larr;</a>
        <h2>{{MONTH_LABEL}}</h2>
        <a href="/{{NEXT}}">&rarr;</a>
      </div>
      <div class="grid">{{CALENDAR}}</div>
      <p>This month: <strong>{{MONTH_TOTAL}}</strong> push-ups</p>
    </section>

    <section>
      <h2>Log past day</h2>
      <form method="post" action="/backlog" class="row">
        <input type="date" name="date" max="{{TODAY}}" required />
        <input type="number" name="amount" min="1" value="25" required />
        <button>Add</button>
      </form>
    </section>

    <section>
      <h2>Recent entries</h2>
      {{RECENT}}
    </section>

    <section>
      <h2>Yearly goal</h2>
      <form method="post" action="/goal" class="row">{{GOAL_PRESETS}}</form>
      <form method="post" action="/goal" class="row">
        <input type="number" name="yearly_goal" min="1" value="{{GOAL_RAW}}" />
        <button>Save</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;
