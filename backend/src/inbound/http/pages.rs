//! View models and HTML rendering for the server-rendered surface.
//!
//! Template engines are out of scope here, so pages are assembled from a
//! small set of building blocks: an explicit [`PageContext`] built per
//! response (current administrator's display name, authentication flag, and
//! the drained notification queue) plus one render function per page.

use std::fmt::Write as _;

use actix_web::http::StatusCode;

use crate::domain::{DomainResult, Movie};
use crate::inbound::http::flash::Notifications;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Everything the page shell needs, gathered explicitly per response.
pub struct PageContext {
    /// Administrator's display name, or a fallback before bootstrap.
    pub display_name: String,
    /// Whether the current visitor holds an authenticated session.
    pub authenticated: bool,
    /// One-shot messages drained from the notification queue.
    pub notices: Vec<String>,
}

impl PageContext {
    /// Build the context for a rendered response, draining the queue.
    pub fn build(
        state: &HttpState,
        session: &SessionContext,
        notices: &Notifications,
    ) -> DomainResult<Self> {
        let display_name = state
            .users
            .admin()?
            .map_or_else(|| "Watchlist".to_owned(), |user| user.display_name);
        Ok(Self {
            display_name,
            authenticated: session.user_id()?.is_some(),
            notices: notices.take()?,
        })
    }
}

/// Escape text for interpolation into HTML element content or attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page_shell(title: &str, ctx: &PageContext, body: &str) -> String {
    let mut notices = String::new();
    for notice in &ctx.notices {
        let _ = write!(
            notices,
            "<div class=\"alert\">{}</div>\n",
            escape(notice)
        );
    }
    let nav = if ctx.authenticated {
        "<a href=\"/\">Home</a> <a href=\"/settings\">Settings</a> <a href=\"/logout\">Logout</a>"
    } else {
        "<a href=\"/\">Home</a> <a href=\"/login\">Login</a>"
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n\
         <h2>{name}'s Watchlist</h2>\n<nav>{nav}</nav>\n{notices}{body}\n</body>\n</html>\n",
        title = escape(title),
        name = escape(&ctx.display_name),
    )
}

/// The index page: movie list plus, for the administrator, the create form
/// and per-entry edit/delete controls.
#[must_use]
pub fn render_index(ctx: &PageContext, movies: &[Movie]) -> String {
    let mut body = String::new();
    if ctx.authenticated {
        body.push_str(
            "<form method=\"post\" action=\"/\">\n\
             <input type=\"text\" name=\"title\" placeholder=\"Title\">\n\
             <input type=\"text\" name=\"year\" placeholder=\"Year\">\n\
             <input type=\"submit\" value=\"Add\">\n</form>\n",
        );
    }
    let _ = write!(body, "<p>{} Titles</p>\n<ul>\n", movies.len());
    for movie in movies {
        let _ = write!(
            body,
            "<li>{title} - {year}",
            title = escape(&movie.title),
            year = escape(&movie.year),
        );
        if ctx.authenticated {
            let _ = write!(
                body,
                " <a href=\"/movie/edit/{id}\">Edit</a>\n\
                 <form method=\"post\" action=\"/movie/delete/{id}\" class=\"inline\">\n\
                 <input type=\"submit\" value=\"Delete\">\n</form>",
                id = movie.id,
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>");
    page_shell("Watchlist", ctx, &body)
}

/// The login form.
#[must_use]
pub fn render_login(ctx: &PageContext) -> String {
    let body = "<h3>Login</h3>\n\
         <form method=\"post\" action=\"/login\">\n\
         <input type=\"text\" name=\"username\" placeholder=\"Username\">\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\">\n\
         <input type=\"submit\" value=\"Login\">\n</form>";
    page_shell("Login", ctx, body)
}

/// The edit form, pre-filled with the movie being edited.
#[must_use]
pub fn render_edit(ctx: &PageContext, movie: &Movie) -> String {
    let body = format!(
        "<h3>Edit item</h3>\n\
         <form method=\"post\" action=\"/movie/edit/{id}\">\n\
         <input type=\"text\" name=\"title\" value=\"{title}\">\n\
         <input type=\"text\" name=\"year\" value=\"{year}\">\n\
         <input type=\"submit\" value=\"Update\">\n</form>",
        id = movie.id,
        title = escape(&movie.title),
        year = escape(&movie.year),
    );
    page_shell("Edit item", ctx, &body)
}

/// The settings form for the display name.
#[must_use]
pub fn render_settings(ctx: &PageContext) -> String {
    let body = "<h3>Settings</h3>\n\
         <form method=\"post\" action=\"/settings\">\n\
         <input type=\"text\" name=\"name\" placeholder=\"Your name\">\n\
         <input type=\"submit\" value=\"Save\">\n</form>";
    page_shell("Settings", ctx, body)
}

/// The not-found page for unknown paths and stale resource ids.
#[must_use]
pub fn render_not_found() -> String {
    "<!DOCTYPE html>\n<html>\n<head><title>Page Not Found</title></head>\n<body>\n\
     <h2>404 - Page Not Found</h2>\n<a href=\"/\">Go Back</a>\n</body>\n</html>\n"
        .to_owned()
}

/// A bare error page for statuses without a dedicated template.
#[must_use]
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{status}</title></head>\n<body>\n\
         <h2>{status}</h2>\n<p>{message}</p>\n<a href=\"/\">Go Back</a>\n</body>\n</html>\n",
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieId;

    fn ctx(authenticated: bool) -> PageContext {
        PageContext {
            display_name: "Grey Li".to_owned(),
            authenticated,
            notices: vec!["Item created.".to_owned()],
        }
    }

    fn movie() -> Movie {
        Movie {
            id: MovieId(3),
            title: "WALL-E".to_owned(),
            year: "2008".to_owned(),
        }
    }

    #[test]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape("<b>\"Tom & Jerry\"</b>"),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn index_shows_notices_and_owner_name() {
        let html = render_index(&ctx(false), &[movie()]);
        assert!(html.contains("Grey Li's Watchlist"));
        assert!(html.contains("Item created."));
        assert!(html.contains("WALL-E - 2008"));
    }

    #[test]
    fn edit_controls_only_render_for_the_administrator() {
        let public = render_index(&ctx(false), &[movie()]);
        assert!(!public.contains("/movie/delete/3"));
        assert!(!public.contains("name=\"title\""));

        let admin = render_index(&ctx(true), &[movie()]);
        assert!(admin.contains("/movie/edit/3"));
        assert!(admin.contains("/movie/delete/3"));
        assert!(admin.contains("name=\"title\""));
    }

    #[test]
    fn movie_titles_are_escaped() {
        let hostile = Movie {
            id: MovieId(1),
            title: "<script>alert(1)</script>".to_owned(),
            year: "2023".to_owned(),
        };
        let html = render_index(&ctx(false), &[hostile]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn edit_form_prefills_current_values() {
        let html = render_edit(&ctx(true), &movie());
        assert!(html.contains("action=\"/movie/edit/3\""));
        assert!(html.contains("value=\"WALL-E\""));
        assert!(html.contains("value=\"2008\""));
    }
}
