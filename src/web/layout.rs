//! HTML building blocks for the admin pages. Every interpolated value goes
//! through `html_escape`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

use crate::domain::SessionView;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;color:#1f2933}\
header{display:flex;justify-content:space-between;align-items:center;padding:.75rem 1.5rem;background:#1f2933;color:#fff}\
header a{color:#fff;text-decoration:none}\
nav{display:flex;flex-wrap:wrap;gap:.75rem;padding:.75rem 1.5rem;background:#e4e7eb}\
main{padding:1.5rem}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #cbd2d9;padding:.4rem .6rem;text-align:left}\
.error{color:#b91c1c}\
form.login{max-width:22rem;margin:4rem auto;display:flex;flex-direction:column;gap:.6rem}";

/// Full HTML document.
#[must_use]
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} | Leaguedesk</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        encode_text(title)
    )
}

/// Admin page with header, navigation and a logout button.
#[must_use]
pub fn admin_page(title: &str, user: &SessionView, nav: &[(&str, &str)], content: &str) -> String {
    let links: String = nav
        .iter()
        .map(|(slug, label)| {
            format!(
                "<a href=\"/admin/{}\">{}</a>",
                encode_double_quoted_attribute(slug),
                encode_text(label)
            )
        })
        .collect();

    let body = format!(
        "<header><a href=\"/admin\"><strong>Leaguedesk</strong></a>\
         <form method=\"post\" action=\"/logout\">{} \
         <button type=\"submit\">Log out</button></form></header>\n\
         <nav>{links}</nav>\n<main>\n<h1>{}</h1>\n{content}\n</main>",
        encode_text(&user.name),
        encode_text(title),
    );

    document(title, &body)
}

#[must_use]
pub fn login_form(next: Option<&str>, email: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>", encode_text(e)))
        .unwrap_or_default();
    let next = next
        .map(|n| {
            format!(
                "<input type=\"hidden\" name=\"next\" value=\"{}\">",
                encode_double_quoted_attribute(n)
            )
        })
        .unwrap_or_default();

    let body = format!(
        "<form class=\"login\" method=\"post\" action=\"/login\">\n\
         <h1>Sign in</h1>\n{error}\n{next}\n\
         <label>Email <input type=\"email\" name=\"email\" value=\"{}\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n</form>",
        encode_double_quoted_attribute(email),
    );

    document("Sign in", &body)
}

/// Renders rows as a table. A column key may be a dotted path
/// (`_count.teams`); objects with a `name` render as that name.
#[must_use]
pub fn table(columns: &[(&str, &str)], rows: &[Value]) -> String {
    if rows.is_empty() {
        return "<p>No records yet.</p>".to_string();
    }

    let head: String = columns
        .iter()
        .map(|(label, _)| format!("<th>{}</th>", encode_text(label)))
        .collect();

    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = columns
                .iter()
                .map(|(_, key)| format!("<td>{}</td>", encode_text(&cell(row, key))))
                .collect();
            format!("<tr>{cells}</tr>\n")
        })
        .collect();

    format!("<table>\n<thead><tr>{head}</tr></thead>\n<tbody>\n{body}</tbody>\n</table>")
}

fn cell(row: &Value, key: &str) -> String {
    let value = key
        .split('.')
        .try_fold(row, |current, part| current.get(part));

    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(Value::Object(map)) => map
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_follow_paths_and_names() {
        let row = json!({
            "name": "A-team",
            "club": {"id": 1, "name": "Sparta"},
            "league": null,
            "_count": {"players": 11},
            "is_active": true
        });

        assert_eq!(cell(&row, "name"), "A-team");
        assert_eq!(cell(&row, "club"), "Sparta");
        assert_eq!(cell(&row, "league"), "");
        assert_eq!(cell(&row, "_count.players"), "11");
        assert_eq!(cell(&row, "is_active"), "yes");
        assert_eq!(cell(&row, "missing"), "");
    }

    #[test]
    fn table_escapes_values() {
        let rows = vec![json!({"name": "<script>alert(1)</script>"})];
        let html = table(&[("Name", "name")], &rows);

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn login_form_keeps_next_and_error() {
        let html = login_form(Some("/admin/teams"), "a@b.cz", Some("Invalid email or password"));

        assert!(html.contains("name=\"next\" value=\"/admin/teams\""));
        assert!(html.contains("Invalid email or password"));
        assert!(html.contains("value=\"a@b.cz\""));
    }
}
