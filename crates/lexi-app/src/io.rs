use kanal::AsyncSender;
use lexi_types::{AppEvent, CefrLevel, Mode, Size, Skill};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::ui::ViewUpdate;

pub const HELP: &str = "\
commands:
  home                       show the home screen
  hub <id>                   courses of a skill hub by level
  path <id>                  courses of a learning path
  discover [filters] [text]  search courses and articles (hub=, level=, duration=)
  open <course> <lesson>     open a lesson
  article <id>               open an article
  click <n>                  open or close the popover of word n
  mode support|challenge     switch annotation mode
  scroll                     close all popovers
  resize <width> <height>    change the viewport size
  level [skill] <level|default>
                             set the general level or a skill override
  close                      close the lesson or article
  quit                       exit";

/// Parse one input line. `Err` carries a message for the user.
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let event = match (command.to_lowercase().as_str(), args.as_slice()) {
        ("home", []) => AppEvent::ShowHome,
        ("hub", [id]) => AppEvent::ShowHub(id.to_string()),
        ("path", [id]) => AppEvent::ShowPath(id.to_string()),
        ("discover", rest) => AppEvent::Discover(rest.join(" ")),
        ("open", [course_id, lesson_id]) => AppEvent::OpenLesson {
            course_id: course_id.to_string(),
            lesson_id: lesson_id.to_string(),
        },
        ("article", [id]) => AppEvent::OpenArticle(id.to_string()),
        ("click", [n]) => AppEvent::ActivateWord(
            n.parse()
                .map_err(|_| format!("Not a word number: {n}"))?,
        ),
        ("mode", [mode]) => {
            AppEvent::SetMode(Mode::parse(mode).ok_or_else(|| format!("Unknown mode: {mode}"))?)
        }
        ("scroll", []) => AppEvent::Scrolled,
        ("resize", [width, height]) => {
            let width: f32 = width.parse().map_err(|_| format!("Bad width: {width}"))?;
            let height: f32 = height.parse().map_err(|_| format!("Bad height: {height}"))?;
            AppEvent::ViewportResized(Size::new(width, height))
        }
        ("level", [level]) => AppEvent::UpdateLevel {
            skill: None,
            level: Some(parse_level(level)?),
        },
        ("level", [skill, level]) => AppEvent::UpdateLevel {
            skill: Some(Skill::parse(skill).ok_or_else(|| format!("Unknown skill: {skill}"))?),
            level: if level.eq_ignore_ascii_case("default") {
                None
            } else {
                Some(parse_level(level)?)
            },
        },
        ("close", []) => AppEvent::CloseLesson,
        ("quit" | "exit", []) => AppEvent::Shutdown,
        _ => return Err(format!("Unknown command: {line}")),
    };

    Ok(Some(event))
}

fn parse_level(level: &str) -> Result<CefrLevel, String> {
    CefrLevel::parse(level).ok_or_else(|| format!("Unknown level: {level}"))
}

/// Read commands from stdin until cancelled or stdin closes
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    view_tx: AsyncSender<ViewUpdate>,
) -> anyhow::Result<()> {
    tracing::info!("Starting stdin command watcher");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("stdin closed");
            event_tx.send(AppEvent::Shutdown).await?;
            break;
        };

        if line.trim() == "help" {
            view_tx.send(ViewUpdate::Status(HELP.to_string())).await?;
            continue;
        }

        match parse_command(&line) {
            Ok(Some(event)) => event_tx.send(event).await?,
            Ok(None) => {}
            Err(message) => view_tx.send(ViewUpdate::Status(message)).await?,
        }
    }

    tracing::info!("Command watcher stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lesson_commands() {
        assert!(matches!(
            parse_command("open vocabulary-essentials l1"),
            Ok(Some(AppEvent::OpenLesson { course_id, lesson_id }))
                if course_id == "vocabulary-essentials" && lesson_id == "l1"
        ));
        assert!(matches!(parse_command("click 3"), Ok(Some(AppEvent::ActivateWord(3)))));
        assert!(matches!(
            parse_command("MODE Challenge"),
            Ok(Some(AppEvent::SetMode(Mode::Challenge)))
        ));
        assert!(matches!(parse_command("scroll"), Ok(Some(AppEvent::Scrolled))));
        assert!(matches!(
            parse_command("article article-2"),
            Ok(Some(AppEvent::OpenArticle(id))) if id == "article-2"
        ));
        assert!(matches!(parse_command("quit"), Ok(Some(AppEvent::Shutdown))));
        assert!(matches!(parse_command("   "), Ok(None)));
    }

    #[test]
    fn parses_level_updates() {
        assert!(matches!(
            parse_command("level b2"),
            Ok(Some(AppEvent::UpdateLevel { skill: None, level: Some(CefrLevel::B2) }))
        ));
        assert!(matches!(
            parse_command("level speaking default"),
            Ok(Some(AppEvent::UpdateLevel { skill: Some(Skill::Speaking), level: None }))
        ));
        assert!(parse_command("level cooking B1").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_command("click three").is_err());
        assert!(parse_command("mode loud").is_err());
        assert!(parse_command("open only-course").is_err());
        assert!(parse_command("dance").is_err());
    }
}
