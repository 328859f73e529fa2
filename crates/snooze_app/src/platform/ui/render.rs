use snooze_core::{AppViewModel, SessionState, StoryRowView, Tab};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let session_label = match (view.session, view.username.as_deref()) {
        (SessionState::LoggedIn, Some(username)) => format!("logged in as {username}"),
        (SessionState::Authenticating, _) => "logging in...".to_string(),
        _ => "not logged in".to_string(),
    };
    let title = match view.tab {
        Tab::All => "All stories",
        Tab::Favorites => "Favorites",
        Tab::Mine => "My stories",
    };

    let mut lines = vec![format!("== {title} ({session_label}) ==")];

    if view.loading && view.tab == Tab::All {
        lines.push("loading stories...".to_string());
    } else if view.rows.is_empty() {
        lines.push("(no stories)".to_string());
    }
    lines.extend(
        view.rows
            .iter()
            .enumerate()
            .map(|(index, row)| story_line(index + 1, row)),
    );

    if let Some(error) = &view.last_error {
        lines.push(format!("! {error}"));
    }
    lines
}

fn story_line(number: usize, row: &StoryRowView) -> String {
    let marker = if row.favorite { '*' } else { ' ' };
    let hostname = row.hostname.as_deref().unwrap_or("invalid url");
    let mut line = format!(
        "{number:>3}. [{marker}] {} ({hostname}) by {}, posted by {}",
        row.title, row.author, row.username
    );
    if row.own {
        line.push_str(" [yours]");
    }
    if row.pending {
        line.push_str(" ...");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> StoryRowView {
        StoryRowView {
            story_id: id.to_string(),
            title: format!("Title {id}"),
            author: "Ada".to_string(),
            url: format!("https://{id}.example.com"),
            hostname: Some(format!("{id}.example.com")),
            username: "ada".to_string(),
            favorite: false,
            own: false,
            pending: false,
        }
    }

    #[test]
    fn renders_numbered_rows_with_markers() {
        let mut favorite = row("b");
        favorite.favorite = true;
        favorite.own = true;
        let view = AppViewModel {
            session: SessionState::LoggedIn,
            username: Some("ada".to_string()),
            rows: vec![row("a"), favorite],
            ..AppViewModel::default()
        };

        let lines = render(&view);
        assert_eq!(lines[0], "== All stories (logged in as ada) ==");
        assert_eq!(
            lines[1],
            "  1. [ ] Title a (a.example.com) by Ada, posted by ada"
        );
        assert_eq!(
            lines[2],
            "  2. [*] Title b (b.example.com) by Ada, posted by ada [yours]"
        );
    }

    #[test]
    fn shows_loading_empty_and_error_states() {
        let loading = AppViewModel {
            loading: true,
            ..AppViewModel::default()
        };
        assert_eq!(render(&loading)[1], "loading stories...");

        let empty = AppViewModel {
            tab: Tab::Favorites,
            last_error: Some("boom".to_string()),
            ..AppViewModel::default()
        };
        assert_eq!(
            render(&empty),
            vec![
                "== Favorites (not logged in) ==".to_string(),
                "(no stories)".to_string(),
                "! boom".to_string(),
            ]
        );
    }

    #[test]
    fn unparsable_urls_are_flagged() {
        let mut broken = row("x");
        broken.hostname = None;
        broken.pending = true;
        assert_eq!(
            story_line(1, &broken),
            "  1. [ ] Title x (invalid url) by Ada, posted by ada ..."
        );
    }
}
