use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use nihongo_flashcards::api::{FlashcardApi, DEFAULT_RANDOM_COUNT};
use nihongo_flashcards::config::Config;
use nihongo_flashcards::format::{category_label, difficulty_label, display_triple, word_type_label};
use nihongo_flashcards::logging;
use nihongo_flashcards::manage::{CardManager, Notice};
use nihongo_flashcards::mappings::ALL;
use nihongo_flashcards::models::{ApiResponse, FlashcardDraft, VocabularyRecord};
use nihongo_flashcards::session::{DataSource, StudySession};

#[derive(Debug, Parser)]
#[command(name = "nihongo-flashcards", about = "日語單字卡", version)]
struct Cli {
    /// API base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive study session
    Study {
        #[arg(long, default_value = ALL)]
        category: String,
        #[arg(long, default_value = ALL)]
        difficulty: String,
    },
    /// List cards, optionally filtered
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Category code (0-11)
        #[arg(long)]
        category: Option<i32>,
    },
    /// Random sample from the server
    Random {
        #[arg(long, default_value_t = DEFAULT_RANDOM_COUNT)]
        count: u32,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
    },
    Create(CardFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: CardFields,
        #[arg(long)]
        favorite: Option<bool>,
    },
    Delete {
        id: i64,
    },
    Categories,
    Difficulties,
}

#[derive(Debug, Args)]
struct CardFields {
    #[arg(long)]
    kanji: Option<String>,
    #[arg(long)]
    hiragana: Option<String>,
    #[arg(long)]
    katakana: Option<String>,
    #[arg(long)]
    meaning: Option<String>,
    #[arg(long)]
    example: Option<String>,
    #[arg(long)]
    word_type: Option<i32>,
    /// Difficulty code (1-4)
    #[arg(long)]
    difficulty: Option<i32>,
    /// Category code (0-11)
    #[arg(long)]
    category: Option<i32>,
}

impl CardFields {
    fn into_draft(self) -> FlashcardDraft {
        FlashcardDraft {
            kanji: self.kanji,
            hiragana: self.hiragana,
            katakana: self.katakana,
            meaning: self.meaning,
            example: self.example,
            word_type: self.word_type,
            difficulty: self.difficulty,
            category: self.category,
        }
    }

    fn apply_to(self, record: &mut VocabularyRecord) {
        let trim = |v: String| v.trim().to_string();
        if let Some(v) = self.kanji {
            record.kanji = Some(trim(v));
        }
        if let Some(v) = self.hiragana {
            record.hiragana = Some(trim(v));
        }
        if let Some(v) = self.katakana {
            record.katakana = Some(trim(v));
        }
        if let Some(v) = self.meaning {
            record.meaning = Some(trim(v));
        }
        if let Some(v) = self.example {
            record.example = Some(trim(v));
        }
        if let Some(v) = self.word_type {
            record.word_type = v;
        }
        if let Some(v) = self.difficulty {
            record.difficulty = v;
        }
        if let Some(v) = self.category {
            record.category = v;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::from_env().with_overrides(cli.base_url, cli.timeout_ms.map(Duration::from_millis));

    let _log_guard = logging::init_tracing(&config.log_level);
    tracing::debug!(base_url = %config.api_base_url, "configuration loaded");

    let api = FlashcardApi::new(&config);
    let ok = match cli.command {
        Command::Study {
            category,
            difficulty,
        } => study(api, &category, &difficulty).await,
        Command::List { search, category } => list(api, &search, category).await,
        Command::Random {
            count,
            category,
            difficulty,
        } => {
            let response = api
                .list_random(Some(count), category.as_deref(), difficulty.as_deref())
                .await;
            print_records(response)
        }
        Command::Create(fields) => {
            let mut manager = CardManager::new(api);
            let response = manager.create(&fields.into_draft()).await;
            report(manager.notice());
            if let Some(card) = response.data {
                print_card(&card);
            }
            response.success
        }
        Command::Update {
            id,
            fields,
            favorite,
        } => update(api, id, fields, favorite).await,
        Command::Delete { id } => {
            let mut manager = CardManager::new(api);
            manager.delete(id).await;
            report(manager.notice());
            !manager.notice().is_some_and(Notice::is_error)
        }
        Command::Categories => print_values(api.list_categories().await),
        Command::Difficulties => print_values(api.list_difficulties().await),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn study(api: FlashcardApi, category: &str, difficulty: &str) -> bool {
    let mut session = StudySession::new(api);
    if category == ALL && difficulty != ALL {
        session.select_difficulty(difficulty).await;
    } else {
        if difficulty != ALL {
            tracing::warn!(category, difficulty, "both filters given, using category only");
        }
        session.select_category(category).await;
    }

    if let Some(notice) = session.notice() {
        eprintln!("{notice}");
    }
    if session.cards().is_empty() {
        eprintln!("沒有找到單字卡");
        return false;
    }
    if session.source() == Some(DataSource::Fallback) {
        println!("(範例資料)");
    }

    println!("[Enter/n] 下一張  [f] 翻面  [p] 上一張  [r] 重新開始  [q] 離開");
    show_current(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "" | "n" => {
                let last = session.current_index() + 1 == session.cards().len();
                session.next().await;
                if last {
                    println!("進度 {:.0}%，已到最後一張", session.progress_percent());
                }
            }
            "f" => session.flip(),
            "p" => session.previous(),
            "r" => session.reset(),
            "q" => break,
            other => {
                println!("未知指令: {other}");
                continue;
            }
        }
        show_current(&session);
    }
    true
}

fn show_current(session: &StudySession) {
    let Some(face) = session.current_face() else {
        return;
    };
    println!(
        "單字 {} / {}  進度 {:.0}%",
        session.current_index() + 1,
        session.cards().len(),
        session.progress_percent()
    );
    if session.is_flipped() {
        println!("  {}  ({})", face.back, face.reading);
        if let Some(example) = session.current_card().and_then(|c| c.example.as_deref()) {
            println!("  {example}");
        }
    } else {
        println!("  {}", face.front);
    }
}

async fn list(api: FlashcardApi, search: &str, category: Option<i32>) -> bool {
    let mut manager = CardManager::new(api);
    manager.load().await;
    report(manager.notice());
    for card in manager.filtered(search, category) {
        print_card(card);
    }
    !manager.notice().is_some_and(Notice::is_error)
}

async fn update(api: FlashcardApi, id: i64, fields: CardFields, favorite: Option<bool>) -> bool {
    let mut manager = CardManager::new(api);
    manager.load().await;
    let Some(mut record) = manager.cards().iter().find(|c| c.id == id).cloned() else {
        report(manager.notice());
        eprintln!("找不到單字卡 {id}");
        return false;
    };

    fields.apply_to(&mut record);
    if let Some(favorite) = favorite {
        record.is_favorite = favorite;
    }

    let response = manager.save_edit(&record).await;
    report(manager.notice());
    if let Some(card) = response.data {
        print_card(&card);
    }
    response.success
}

fn print_card(card: &VocabularyRecord) {
    let face = display_triple(card);
    println!(
        "#{:<4} {}  [{}] {}  {} / {} / {}  複習 {} 次{}",
        card.id,
        face.front,
        face.reading,
        face.back,
        category_label(card.category),
        difficulty_label(card.difficulty),
        word_type_label(card.word_type),
        card.review_count,
        if card.is_favorite { "  ★" } else { "" }
    );
}

fn print_records(response: ApiResponse<Vec<VocabularyRecord>>) -> bool {
    if let Some(error) = response.error_message() {
        eprintln!("{error}");
        return false;
    }
    response.data.unwrap_or_default().iter().for_each(print_card);
    true
}

fn print_values(response: ApiResponse<Vec<serde_json::Value>>) -> bool {
    if let Some(error) = response.error_message() {
        eprintln!("{error}");
        return false;
    }
    for value in response.data.unwrap_or_default() {
        println!("{value}");
    }
    true
}

fn report(notice: Option<&Notice>) {
    match notice {
        Some(Notice::Success(text)) => println!("{text}"),
        Some(Notice::Error(text)) => eprintln!("{text}"),
        None => {}
    }
}
