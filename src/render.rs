use axum::http::StatusCode;

use crate::model::{Task, TITLE_MAX_LEN};

/// Escape text for interpolation into HTML body or attribute positions.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n"
    )
}

pub fn index_page(tasks: &[Task]) -> String {
    let mut body = String::new();
    body.push_str("<h1>Task List</h1>\n");
    body.push_str(&format!(
        "<form action=\"/add\" method=\"post\">\n\
         <input type=\"text\" name=\"title\" maxlength=\"{TITLE_MAX_LEN}\" placeholder=\"New task\" autofocus>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n"
    ));

    if tasks.is_empty() {
        body.push_str("<p class=\"empty\">No tasks yet.</p>\n");
    } else {
        body.push_str("<ul class=\"tasks\">\n");
        for task in tasks {
            let class = if task.complete { "task complete" } else { "task" };
            let mark = if task.complete { "[x]" } else { "[ ]" };
            body.push_str(&format!(
                "<li class=\"{class}\">\
                 <span class=\"mark\">{mark}</span> \
                 <span class=\"title\">{}</span> \
                 <a href=\"/update/{id}\">toggle</a> \
                 <a href=\"/delete/{id}\">delete</a>\
                 </li>\n",
                escape(&task.title),
                id = task.id,
            ));
        }
        body.push_str("</ul>\n");
    }

    page("Task List", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!("<h1>{title}</h1>\n<p>{}</p>\n", escape(message));
    page(&title, &body)
}
