//! Server-rendered dashboard page.
//!
//! Each chore is a checkbox inside its own form; ticking or unticking it
//! posts the new value and the server redirects back to `/`, which re-reads
//! the board.

use shared::{ChildBoard, TodayBoardResponse};

/// Children are spread over at most this many columns
pub const MAX_COLUMNS: usize = 3;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem; background: #fafafa; color: #222; }
h1 { margin-bottom: 0.25rem; }
.columns { display: flex; gap: 2rem; align-items: flex-start; }
.column { flex: 1; }
.child { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
.child form { margin: 0.35rem 0; }
.done label { text-decoration: line-through; color: #888; }
.info { color: #555; font-style: italic; }
.success { background: #e7f7ec; padding: 1rem; border-radius: 8px; }
.error { background: #fdecea; padding: 1rem; border-radius: 8px; color: #8a1c1c; }
"#;

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Chore Board</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>📋 Family Chore Board</h1>\n{}\n</body>\n</html>\n",
        STYLE, body
    )
}

/// Distribute children over `min(len, MAX_COLUMNS)` columns, child `i`
/// going to column `i % n`
pub fn columns(children: &[ChildBoard]) -> Vec<Vec<&ChildBoard>> {
    let count = children.len().min(MAX_COLUMNS);
    let mut columns: Vec<Vec<&ChildBoard>> = vec![Vec::new(); count];

    for (i, child) in children.iter().enumerate() {
        columns[i % count].push(child);
    }

    columns
}

fn render_child(board: &ChildBoard, weekday_label: &str) -> String {
    let mut html = format!(
        "<div class=\"child\">\n<h3>For: {}</h3>\n",
        escape(&board.child.name)
    );

    if board.chores.is_empty() {
        html.push_str(&format!(
            "<p class=\"info\">{} has no chores scheduled for {}.</p>\n",
            escape(&board.child.name),
            escape(weekday_label)
        ));
    }

    for chore in &board.chores {
        let done = chore.status.is_done();
        html.push_str(&format!(
            "<form method=\"post\" action=\"/assignments/{id}/toggle\" class=\"{class}\">\
             <input type=\"hidden\" name=\"done\" value=\"{next}\">\
             <label><input type=\"checkbox\" id=\"chore_{id}\" onchange=\"this.form.submit()\"{checked}> {description}</label>\
             </form>\n",
            id = chore.assignment_id,
            class = if done { "done" } else { "pending" },
            next = !done,
            checked = if done { " checked" } else { "" },
            description = escape(&chore.description),
        ));
    }

    html.push_str("</div>\n");
    html
}

/// Render today's board
pub fn render_board(board: &TodayBoardResponse) -> String {
    let date = board.date.format("%d/%m/%Y");

    let Some(label) = &board.weekday_label else {
        return page(&format!(
            "<p class=\"success\">Today is {}. Enjoy the weekend, no chores today! 🎉</p>",
            date
        ));
    };

    let mut body = format!("<h2>Today's chores: {} ({})</h2>\n", escape(label), date);

    if board.children.is_empty() {
        body.push_str("<p class=\"info\">No children registered yet.</p>\n");
        return page(&body);
    }

    body.push_str("<div class=\"columns\">\n");
    for column in columns(&board.children) {
        body.push_str("<div class=\"column\">\n");
        for child in column {
            body.push_str(&render_child(child, label));
        }
        body.push_str("</div>\n");
    }
    body.push_str("</div>\n");

    page(&body)
}

/// Visible error in place of the board
pub fn render_error(message: &str) -> String {
    page(&format!("<p class=\"error\">{}</p>", escape(message)))
}
