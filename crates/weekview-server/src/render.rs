//! Minimal HTML rendering of a week report
//!
//! One table: team members as rows, previous week + the seven days + next
//! week as columns. Rows are sorted by display name so output is stable
//! across requests.

use weekview_core::{AugmentedStory, PersonId, WeekError, WeekReport};

/// Render the dashboard page for one week
#[must_use]
pub fn week_page(year: i32, week: u32, report: &WeekReport) -> String {
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str(&format!("<title>Week {week} of {year}</title>\n"));
    page.push_str(
        "<style>table{border-collapse:collapse}td,th{border:1px solid #ccc;\
         padding:4px;vertical-align:top}.span{color:#888;font-size:smaller}</style>\n",
    );
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>Week {week} of {year}</h1>\n"));
    page.push_str("<table>\n<tr><th></th><th>Previous week</th>");
    for label in &report.day_labels {
        page.push_str(&format!("<th>{}</th>", escape(label)));
    }
    page.push_str("<th>Next week</th></tr>\n");

    for (person_id, name) in sorted_users(report) {
        let Some(buckets) = report.buckets.get(&person_id) else {
            continue;
        };
        page.push_str(&format!("<tr><th>{}</th>", escape(name)));
        page.push_str(&cell(&buckets.previous_week));
        for day in &buckets.days {
            page.push_str(&cell(day));
        }
        page.push_str(&cell(&buckets.next_week));
        page.push_str("</tr>\n");
    }

    page.push_str("</table>\n</body>\n</html>\n");
    page
}

/// Render the failure page shown instead of a partial dashboard
#[must_use]
pub fn error_page(err: &WeekError) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n<h1>Could not render week</h1>\n<p>{}</p>\n</body>\n</html>\n",
        escape(&err.to_string())
    )
}

/// Users ordered by display name, ties broken by id
fn sorted_users(report: &WeekReport) -> Vec<(PersonId, &String)> {
    let mut users: Vec<(PersonId, &String)> = report
        .user_names
        .iter()
        .map(|(id, name)| (*id, name))
        .collect();
    users.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(&b.0)));
    users
}

/// One table cell listing a bucket's stories
fn cell(stories: &[std::sync::Arc<AugmentedStory>]) -> String {
    let mut html = String::from("<td>");
    for story in stories {
        let name = escape(&story.story.name);
        match &story.story.url {
            Some(url) => {
                html.push_str(&format!("<div><a href=\"{}\">{name}</a>", escape(url)));
            }
            None => html.push_str(&format!("<div>{name}")),
        }
        if let Some(days) = story.span_days {
            html.push_str(&format!(" <span class=\"span\">{days}d</span>"));
        }
        html.push_str("</div>");
    }
    html.push_str("</td>");
    html
}

/// Escape text for HTML element and attribute positions
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
