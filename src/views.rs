//! Server-rendered HTML pages.

use std::fmt::Write;

use axum::http::StatusCode;
use chrono::NaiveDate;

use crate::models::sleep_log::{round_tenths, SleepLog, DEFAULT_SCORE};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#1f2937}\
table{width:100%;border-collapse:collapse;margin-top:1rem}\
th,td{padding:.4rem .5rem;border-bottom:1px solid #e5e7eb;text-align:left}\
form.entry{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:.75rem}\
label{display:flex;flex-direction:column;font-size:.9rem}\
.actions form{display:inline}";

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

/// Values pre-filled into the entry form.
struct FormValues<'a> {
    sleep_date: String,
    bedtime: String,
    wakeup_time: String,
    sleep_quality: i32,
    stress_level: i32,
    caffeine_intake: bool,
    exercise: bool,
    notes: &'a str,
}

impl<'a> FormValues<'a> {
    fn blank(today: NaiveDate) -> Self {
        Self {
            sleep_date: today.format("%Y-%m-%d").to_string(),
            bedtime: String::new(),
            wakeup_time: String::new(),
            sleep_quality: DEFAULT_SCORE,
            stress_level: DEFAULT_SCORE,
            caffeine_intake: false,
            exercise: false,
            notes: "",
        }
    }

    fn from_log(log: &'a SleepLog) -> Self {
        Self {
            sleep_date: log.sleep_date.format("%Y-%m-%d").to_string(),
            bedtime: log.bedtime.format("%H:%M").to_string(),
            wakeup_time: log.wakeup_time.format("%H:%M").to_string(),
            sleep_quality: log.sleep_quality,
            stress_level: log.stress_level,
            caffeine_intake: log.caffeine_intake,
            exercise: log.exercise,
            notes: &log.notes,
        }
    }
}

fn score_select(name: &str, selected: i32) -> String {
    let mut html = format!("<select name=\"{name}\">");
    for n in 1..=10 {
        let attr = if n == selected { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{n}\"{attr}>{n}</option>");
    }
    html.push_str("</select>");
    html
}

fn entry_form(action: &str, submit: &str, values: &FormValues<'_>) -> String {
    let checked = |on: bool| if on { " checked" } else { "" };
    format!(
        "<form class=\"entry\" method=\"post\" action=\"{action}\">\n\
         <label>Date<input type=\"date\" name=\"sleep_date\" value=\"{date}\" required></label>\n\
         <label>Bedtime<input type=\"time\" name=\"bedtime\" value=\"{bed}\" required></label>\n\
         <label>Wake-up time<input type=\"time\" name=\"wakeup_time\" value=\"{wake}\" required></label>\n\
         <label>Sleep quality{quality}</label>\n\
         <label>Stress level{stress}</label>\n\
         <label><span><input type=\"checkbox\" name=\"caffeine_intake\"{caffeine}> Caffeine</span></label>\n\
         <label><span><input type=\"checkbox\" name=\"exercise\"{exercise}> Exercise</span></label>\n\
         <label>Notes<textarea name=\"notes\" rows=\"2\">{notes}</textarea></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>",
        date = escape(&values.sleep_date),
        bed = escape(&values.bedtime),
        wake = escape(&values.wakeup_time),
        quality = score_select("sleep_quality", values.sleep_quality),
        stress = score_select("stress_level", values.stress_level),
        caffeine = checked(values.caffeine_intake),
        exercise = checked(values.exercise),
        notes = escape(values.notes),
    )
}

fn log_row(log: &SleepLog) -> String {
    let flag = |on: bool| if on { "Yes" } else { "No" };
    format!(
        "<tr><td>{date}</td><td>{bed}</td><td>{wake}</td><td>{hours:.1} h</td>\
         <td>{quality}</td><td>{stress}</td><td>{caffeine}</td><td>{exercise}</td>\
         <td>{notes}</td><td class=\"actions\"><a href=\"/edit_log/{id}\">Edit</a> \
         <form method=\"post\" action=\"/delete_log/{id}\" \
         onsubmit=\"return confirm('Delete this entry?')\"><button type=\"submit\">Delete</button></form></td></tr>",
        date = log.sleep_date.format("%Y-%m-%d"),
        bed = log.bedtime.format("%H:%M"),
        wake = log.wakeup_time.format("%H:%M"),
        hours = round_tenths(log.sleep_duration),
        quality = log.sleep_quality,
        stress = log.stress_level,
        caffeine = flag(log.caffeine_intake),
        exercise = flag(log.exercise),
        notes = escape(&log.notes),
        id = log.id,
    )
}

const CHART_SCRIPT: &str = r#"<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script>
fetch('/sleep-data')
  .then(function (r) { return r.json(); })
  .then(function (data) {
    if (data.error) { return; }
    new Chart(document.getElementById('sleepChart'), {
      type: 'line',
      data: {
        labels: data.dates,
        datasets: [
          { label: 'Hours slept', data: data.durations, yAxisID: 'hours' },
          { label: 'Quality', data: data.qualities, yAxisID: 'quality' }
        ]
      },
      options: {
        scales: {
          hours: { position: 'left', beginAtZero: true },
          quality: { position: 'right', min: 0, max: 10 }
        }
      }
    });
  });
</script>"#;

/// Tracker page: entry form, recent-trend chart and every logged night.
pub fn index_page(logs: &[SleepLog], today: NaiveDate) -> String {
    let mut body = String::from("<h1>Sleep Tracker</h1>\n<h2>Log a night</h2>\n");
    body.push_str(&entry_form("/", "Save", &FormValues::blank(today)));
    body.push_str("\n<h2>Recent trend</h2>\n<canvas id=\"sleepChart\" height=\"120\"></canvas>\n");
    body.push_str("<h2>History</h2>\n");

    if logs.is_empty() {
        body.push_str("<p>No sleep logged yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Date</th><th>Bedtime</th><th>Wake-up</th><th>Duration</th>\
             <th>Quality</th><th>Stress</th><th>Caffeine</th><th>Exercise</th><th>Notes</th>\
             <th></th></tr></thead>\n<tbody>\n",
        );
        for log in logs {
            body.push_str(&log_row(log));
            body.push('\n');
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(CHART_SCRIPT);
    layout("Sleep Tracker", &body)
}

pub fn edit_page(log: &SleepLog) -> String {
    let action = format!("/edit_log/{}", log.id);
    let body = format!(
        "<h1>Edit sleep log</h1>\n{}\n<p><a href=\"/\">Back to tracker</a></p>",
        entry_form(&action, "Update", &FormValues::from_log(log))
    );
    layout("Edit sleep log", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to tracker</a></p>",
        status.as_u16(),
        escape(heading),
        escape(message)
    );
    layout(heading, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn sample_log() -> SleepLog {
        SleepLog {
            id: 3,
            sleep_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            bedtime: NaiveTime::from_hms_opt(22, 30, 0).unwrap(),
            wakeup_time: NaiveTime::from_hms_opt(6, 45, 0).unwrap(),
            sleep_duration: 8.25,
            sleep_quality: 7,
            stress_level: 2,
            caffeine_intake: true,
            exercise: false,
            notes: "<b>woke</b> once".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn index_defaults_form_date_to_today() {
        let html = index_page(&[], NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(html.contains("name=\"sleep_date\" value=\"2024-05-01\""));
        assert!(html.contains("No sleep logged yet."));
        assert!(html.contains("/sleep-data"));
    }

    #[test]
    fn index_lists_logs_with_actions_and_escaped_notes() {
        let html = index_page(&[sample_log()], NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(html.contains("href=\"/edit_log/3\""));
        assert!(html.contains("action=\"/delete_log/3\""));
        assert!(html.contains("<td>8.2 h</td>"));
        assert!(html.contains("&lt;b&gt;woke&lt;/b&gt; once"));
        assert!(!html.contains("<b>woke</b>"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let html = edit_page(&sample_log());
        assert!(html.contains("action=\"/edit_log/3\""));
        assert!(html.contains("name=\"bedtime\" value=\"22:30\""));
        assert!(html.contains("name=\"wakeup_time\" value=\"06:45\""));
        assert!(html.contains("<option value=\"7\" selected>"));
        assert!(html.contains("name=\"caffeine_intake\" checked"));
        assert!(!html.contains("name=\"exercise\" checked"));
    }

    #[test]
    fn error_page_shows_status_and_message() {
        let html = error_page(StatusCode::NOT_FOUND, "Log not found.");
        assert!(html.contains("404 Not Found"));
        assert!(html.contains("Log not found."));
    }
}
