//! Turns a line typed at the prompt into a core message.

use snooze_core::{AppViewModel, Msg, NewStory, StoryId, Tab};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  stories | favorites | mine          switch list
  refresh                             reload stories from the server
  login <username> <password>
  signup <username> <password> <display name...>
  logout
  submit <url> | <title> | <author>   post a new story
  fav <n|story id>                    toggle favorite
  delete <n|story id>                 delete one of your stories
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no row {0} in the current list")]
    NoSuchRow(usize),
}

/// Parses one input line. Blank lines give `Ok(None)`.
///
/// Numeric story references are 1-based rows of `view`.
pub fn parse_command(line: &str, view: &AppViewModel) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    let Some((verb, rest)) = split_verb(line) else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "stories" | "all" => Command::Msg(Msg::TabSelected(Tab::All)),
        "favorites" | "favs" => Command::Msg(Msg::TabSelected(Tab::Favorites)),
        "mine" => Command::Msg(Msg::TabSelected(Tab::Mine)),
        "refresh" => Command::Msg(Msg::RefreshClicked),
        "logout" => Command::Msg(Msg::LogoutClicked),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "login" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (Some(username), Some(password), None) => Command::Msg(Msg::LoginSubmitted {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => return Err(InputError::Usage("login <username> <password>")),
            }
        }
        "signup" => {
            let (username, after_username) = split_verb(rest).unwrap_or_default();
            let (password, name) = split_verb(after_username).unwrap_or_default();
            if username.is_empty() || password.is_empty() || name.is_empty() {
                return Err(InputError::Usage(
                    "signup <username> <password> <display name...>",
                ));
            }
            Command::Msg(Msg::SignupSubmitted {
                username: username.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })
        }
        "submit" => {
            let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
            match fields.as_slice() {
                [url, title, author]
                    if !url.is_empty() && !title.is_empty() && !author.is_empty() =>
                {
                    Command::Msg(Msg::StorySubmitted(NewStory {
                        title: title.to_string(),
                        author: author.to_string(),
                        url: url.to_string(),
                    }))
                }
                _ => return Err(InputError::Usage("submit <url> | <title> | <author>")),
            }
        }
        "fav" | "favorite" => {
            let story_id = story_ref(rest, view, "fav <n|story id>")?;
            Command::Msg(Msg::FavoriteToggled { story_id })
        }
        "delete" | "rm" => {
            let story_id = story_ref(rest, view, "delete <n|story id>")?;
            Command::Msg(Msg::DeleteClicked { story_id })
        }
        _ => return Err(InputError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

fn split_verb(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => Some((verb, rest.trim())),
        None => Some((line, "")),
    }
}

fn story_ref(
    arg: &str,
    view: &AppViewModel,
    usage: &'static str,
) -> Result<StoryId, InputError> {
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        return Err(InputError::Usage(usage));
    }
    match arg.parse::<usize>() {
        Ok(row) => row
            .checked_sub(1)
            .and_then(|index| view.rows.get(index))
            .map(|row| row.story_id.clone())
            .ok_or(InputError::NoSuchRow(row)),
        Err(_) => Ok(arg.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use snooze_core::StoryRowView;

    use super::*;

    fn view_with(ids: &[&str]) -> AppViewModel {
        AppViewModel {
            rows: ids
                .iter()
                .map(|id| StoryRowView {
                    story_id: id.to_string(),
                    title: String::new(),
                    author: String::new(),
                    url: String::new(),
                    hostname: None,
                    username: String::new(),
                    favorite: false,
                    own: false,
                    pending: false,
                })
                .collect(),
            ..AppViewModel::default()
        }
    }

    fn parse(line: &str) -> Result<Option<Command>, InputError> {
        parse_command(line, &view_with(&["first", "second"]))
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn row_numbers_resolve_to_story_ids() {
        assert_eq!(
            parse("fav 2"),
            Ok(Some(Command::Msg(Msg::FavoriteToggled {
                story_id: "second".to_string()
            })))
        );
        assert_eq!(parse("fav 3"), Err(InputError::NoSuchRow(3)));
        assert_eq!(parse("delete 0"), Err(InputError::NoSuchRow(0)));
        assert_eq!(
            parse("delete abc-123"),
            Ok(Some(Command::Msg(Msg::DeleteClicked {
                story_id: "abc-123".to_string()
            })))
        );
    }

    #[test]
    fn signup_keeps_spaces_in_display_name() {
        assert_eq!(
            parse("signup ada pw Ada  Lovelace"),
            Ok(Some(Command::Msg(Msg::SignupSubmitted {
                username: "ada".to_string(),
                password: "pw".to_string(),
                name: "Ada  Lovelace".to_string(),
            })))
        );
        assert!(matches!(parse("signup ada pw"), Err(InputError::Usage(_))));
    }

    #[test]
    fn submit_splits_on_pipes() {
        assert_eq!(
            parse("submit https://e.com/x | A title | Someone"),
            Ok(Some(Command::Msg(Msg::StorySubmitted(NewStory {
                title: "A title".to_string(),
                author: "Someone".to_string(),
                url: "https://e.com/x".to_string(),
            }))))
        );
        assert!(matches!(
            parse("submit https://e.com/x | A title"),
            Err(InputError::Usage(_))
        ));
    }

    #[test]
    fn login_needs_exactly_two_words() {
        assert!(matches!(parse("login ada"), Err(InputError::Usage(_))));
        assert!(matches!(parse("login a b c"), Err(InputError::Usage(_))));
        assert_eq!(parse("QUIT"), Ok(Some(Command::Quit)));
        assert!(matches!(parse("dance"), Err(InputError::Unknown(_))));
    }
}
