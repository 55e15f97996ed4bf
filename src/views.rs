//! Server-rendered HTML pages.
//!
//! Pages are small and static apart from a few interpolated values, all of
//! which go through [`escape_html`].

use crate::models::Presentation;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
        "<!DOCTYPE html>\n\
         <html lang=\"kk\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape_html(title),
        body
    )
}

/// Login page embedding the Telegram Login Widget.
///
/// `auth_url` is where the widget redirects with the signed assertion.
pub fn login_page(bot_username: &str, auth_url: &str) -> String {
    let body = format!(
        "<main class=\"login\">\n\
         <h1>Presentations</h1>\n\
         <p>Sign in with Telegram to continue.</p>\n\
         <script async src=\"https://telegram.org/js/telegram-widget.js?22\" \
         data-telegram-login=\"{}\" data-size=\"large\" \
         data-auth-url=\"{}\" data-request-access=\"write\"></script>\n\
         </main>",
        escape_html(bot_username),
        escape_html(auth_url)
    );
    layout("Sign in", &body)
}

/// Dashboard listing presentations by group.
///
/// Admins get an "announce" button per presentation.
pub fn dashboard_page(groups: &[(String, Vec<Presentation>)], posted: bool, is_admin: bool) -> String {
    let mut body = String::from("<main>\n<header><h1>Presentations</h1><a href=\"/logout\">Log out</a></header>\n");

    if posted {
        body.push_str("<p class=\"notice\">Posted to Telegram.</p>\n");
    }

    if groups.is_empty() {
        body.push_str("<p>No presentations yet.</p>\n");
    }

    for (group, presentations) in groups {
        body.push_str(&format!("<section>\n<h2>{}</h2>\n<ul>\n", escape_html(group)));
        for p in presentations {
            let id = urlencoding::encode(&p.id);
            body.push_str(&format!(
                "<li><a href=\"/view/{}\">{}</a>",
                escape_html(&id),
                escape_html(&p.title)
            ));
            if is_admin {
                body.push_str(&format!(
                    " <form method=\"post\" action=\"/post/{}\"><button type=\"submit\">Post to channel</button></form>",
                    escape_html(&id)
                ));
            }
            body.push_str("</li>\n");
        }
        body.push_str("</ul>\n</section>\n");
    }

    body.push_str("</main>");
    layout("Presentations", &body)
}

/// Viewer page framing the presentation's embed URL.
pub fn viewer_page(title: &str, embed_url: &str) -> String {
    let body = format!(
        "<main class=\"viewer\">\n\
         <header><a href=\"/\">&larr; Back</a><h1>{}</h1></header>\n\
         <iframe src=\"{}\" allowfullscreen loading=\"lazy\"></iframe>\n\
         </main>",
        escape_html(title),
        escape_html(embed_url)
    );
    layout(title, &body)
}
