//! Slash commands typed into the input line

use std::path::Path;

use crate::core::app::App;
use crate::core::modes::{ChatMode, RpFlavor};
use crate::utils::image::{encode_data_uri, mime_for_path};

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

const HELP_TEXT: &str = "Команды:
  /mode <free|rp|games|vision|quest>  — сменить режим
  /rp <cyberpunk|fantasy|horror|custom>  — сменить РП-сеттинг
  /image <файл>  — прикрепить фото; /image без аргумента — убрать
  /log [файл]  — лог переписки в файл / пауза
  /help  — эта подсказка";

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();

    match parts.first().copied() {
        Some("/help") => {
            app.push_notice(HELP_TEXT);
            CommandResult::Continue
        }
        Some("/mode") => {
            match parts.get(1).copied().and_then(ChatMode::from_command_name) {
                Some(mode) => app.set_mode(mode),
                None => app.push_notice("Так: /mode <free|rp|games|vision|quest>"),
            }
            CommandResult::Continue
        }
        Some("/rp") => {
            match parts.get(1).copied().and_then(|name| RpFlavor::try_from(name).ok()) {
                Some(flavor) => app.set_flavor(flavor),
                None => app.push_notice("Так: /rp <cyberpunk|fantasy|horror|custom>"),
            }
            CommandResult::Continue
        }
        Some("/image") => {
            match parts.len() {
                1 => {
                    app.pending_image = None;
                    app.push_notice("Фото убрано.");
                }
                // The path may contain spaces; everything after the
                // command is the file name.
                _ => attach_image(app, trimmed["/image".len()..].trim()),
            }
            CommandResult::Continue
        }
        Some("/log") => {
            match parts.len() {
                1 => {
                    let outcome = app.logging.toggle();
                    match outcome {
                        Ok(message) => app.push_notice(message),
                        Err(e) => app.push_notice(format!("Ошибка: {e}")),
                    }
                }
                2 => {
                    let outcome = app.logging.enable(parts[1].to_string());
                    match outcome {
                        Ok(message) => app.push_notice(message),
                        Err(e) => app.push_notice(format!("Ошибка: {e}")),
                    }
                }
                _ => app.push_notice("Так: /log [файл]"),
            }
            CommandResult::Continue
        }
        _ => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

fn attach_image(app: &mut App, path_text: &str) {
    let path = Path::new(path_text);
    match std::fs::read(path) {
        Ok(bytes) => {
            let mime = mime_for_path(path);
            let kib = bytes.len() / 1024;
            app.pending_image = Some(encode_data_uri(mime, &bytes));
            app.push_notice(format!("Фото прикреплено: {mime}, {kib} КиБ 📸"));
        }
        Err(e) => app.push_notice(format!("Не смог прочитать {path_text}: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::store::UserStore;

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::open_in(dir.path()).unwrap();
        let user = store.create("тестер", "пароль").unwrap();
        let app = App::new(store, user, Config::default(), "key".to_string(), None);
        (app, dir)
    }

    #[test]
    fn plain_text_is_a_message() {
        let (mut app, _dir) = test_app();
        match process_input(&mut app, "привет, Луки") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "привет, Луки"),
            CommandResult::Continue => panic!("treated as a command"),
        }
    }

    #[test]
    fn unknown_slash_input_is_still_a_message() {
        let (mut app, _dir) = test_app();
        assert!(matches!(
            process_input(&mut app, "/shrug"),
            CommandResult::ProcessAsMessage(_)
        ));
    }

    #[test]
    fn mode_command_switches_and_bad_names_warn() {
        let (mut app, _dir) = test_app();
        assert!(matches!(
            process_input(&mut app, "/mode quest"),
            CommandResult::Continue
        ));
        assert_eq!(app.mode(), ChatMode::ImageGames);

        process_input(&mut app, "/mode disco");
        assert_eq!(app.mode(), ChatMode::ImageGames);
    }

    #[test]
    fn rp_command_switches_flavor() {
        let (mut app, _dir) = test_app();
        process_input(&mut app, "/rp horror");
        assert_eq!(app.user.rp_flavor, RpFlavor::Horror);
    }

    #[test]
    fn image_command_attaches_and_clears() {
        let (mut app, dir) = test_app();
        let path = dir.path().join("кадр.png");
        std::fs::write(&path, b"fake png bytes").unwrap();

        process_input(&mut app, &format!("/image {}", path.display()));
        let uri = app.pending_image.clone().expect("attachment set");
        assert!(uri.starts_with("data:image/png;base64,"));

        process_input(&mut app, "/image");
        assert!(app.pending_image.is_none());
    }

    #[test]
    fn image_command_reports_unreadable_files() {
        let (mut app, _dir) = test_app();
        process_input(&mut app, "/image /нет/такого/файла.png");
        assert!(app.pending_image.is_none());
        assert!(matches!(app.transcript.last(), Some(crate::core::app::TranscriptEntry::Notice(_))));
    }
}
