//! Command-line interface parsing and handling
//!
//! Parses arguments, signs the user in (session resumption first, the
//! interactive prompt otherwise) and hands off to the chat loop.

use std::error::Error;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::app::App;
use crate::core::config::{api_key_from_env, Config};
use crate::core::store::{StoreError, UserStore};
use crate::core::user::User;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "lucky")]
#[command(about = "A terminal chat companion with local profiles and XP ranks")]
#[command(
    long_about = "Lucky is a full-screen terminal chat companion. Accounts live in a local \
user table; each account keeps its own conversation history, XP tally and chat mode. \
Messages go to a generative-language API together with a mode-specific system instruction.\n\n\
Environment Variables:\n\
  LUCKY_API_KEY     Provider api key (GEMINI_API_KEY also accepted)\n\
  LUCKY_LOG         Diagnostic log filter (tracing syntax), off by default\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through the transcript\n\
  Ctrl+C            Quit\n\n\
Commands:\n\
  /mode <name>      Switch chat mode (free, rp, games, vision, quest)\n\
  /rp <flavor>      Switch role-play flavor\n\
  /image <file>     Attach an image for the vision modes\n\
  /log [file]       Mirror the transcript to a file\n\
  /help             Show the command summary"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat (overrides the config file)
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Provider base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Forget the persisted session
    Logout,
    /// List stored accounts
    Users,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_run())
}

async fn async_run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LUCKY_LOG").unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Logout => {
            let store = UserStore::load()?;
            store.clear_session()?;
            println!("👋 Сессия сброшена. До встречи!");
            Ok(())
        }
        Commands::Users => {
            let store = UserStore::load()?;
            for user in store.list() {
                println!(
                    "{:>6}  {}  — XP {} ({})",
                    user.id,
                    user.username,
                    user.xp,
                    user.rank()
                );
            }
            Ok(())
        }
        Commands::Chat => {
            let mut config = Config::load()?;
            if let Some(model) = args.model {
                config.model = model;
            }
            if let Some(base_url) = args.base_url {
                config.base_url = base_url;
            }
            let api_key = api_key_from_env()?;

            let mut store = UserStore::load()?;
            let user = match store.resume_session() {
                Some(user) => {
                    println!("🔓 С возвращением, {}!", user.username);
                    user
                }
                None => interactive_sign_in(&mut store)?,
            };

            eprintln!("😎 Lucky AI — цифровой бро");
            eprintln!("📡 Модель: {}", config.model);
            eprintln!("🌐 API: {}", config.base_url);

            let app = App::new(store, user, config, api_key, args.log);
            run_chat(app).await
        }
    }
}

/// Login/registration menu in the terminal, before the TUI starts.
fn interactive_sign_in(store: &mut UserStore) -> Result<User, Box<dyn Error>> {
    println!("😎 LUCKY AI — Цифровой бро");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");

    loop {
        println!();
        println!("  1. Войти по ID");
        println!("  2. Создать аккаунт");
        println!("  3. Зайти гостем");
        println!("  q. Выход");

        match prompt("Выбор: ")?.as_str() {
            "1" => {
                let id = prompt("ID аккаунта: ")?;
                let password = prompt("Пароль: ")?;
                match store.find_by_credentials(&id, &password) {
                    Some(user) => {
                        store.remember_session(&user.id)?;
                        println!("✅ Здарова, {}!", user.username);
                        return Ok(user);
                    }
                    None => println!("❌ Неверный ID или пароль!"),
                }
            }
            "2" => {
                let username = prompt("Твое имя: ")?;
                let password = prompt("Пароль: ")?;
                match store.create(&username, &password) {
                    Ok(user) => {
                        store.remember_session(&user.id)?;
                        println!("✅ Твой ID: {}. Сохрани его! 😎", user.id);
                        return Ok(user);
                    }
                    Err(StoreError::MissingField(_)) => println!("📝 Заполни все поля!"),
                    Err(e) => return Err(e.into()),
                }
            }
            "3" => {
                println!("🕶️ Гостевой режим: ничего не сохраняется.");
                return Ok(User::guest());
            }
            "q" | "Q" => return Err("Вход отменен".into()),
            _ => println!("Не понял. Цифру давай!"),
        }
    }
}

fn prompt(label: &str) -> Result<String, Box<dyn Error>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
