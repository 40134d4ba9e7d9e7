use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use post_client::{Post, PostClient, PostClientError};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "post-cli", version, about = "CLI клиент для post-server")]
struct Cli {
    /// Адрес HTTP-сервера.
    #[arg(long, global = true, env = "POSTLOG_SERVER")]
    server: Option<String>,

    /// Печатать результат в JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Создание поста.
    Write {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Список постов, новые сначала.
    List {
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Частичное обновление поста.
    ///
    /// Поля, которые не переданы, остаются без изменений.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let client = PostClient::new(server).context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::Write { title, content } => {
            let id = client
                .write(&title, &content)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                println!("{}", serde_json::json!({ "savedId": id }));
            } else {
                println!("Пост создан: id={id}");
            }
        }
        Command::Get { id } => {
            let post = client.find_one(id).await.map_err(map_client_error)?;
            print_post(&post, cli.json)?;
        }
        Command::List { page, size } => {
            let posts = client
                .find_page(page, size)
                .await
                .map_err(map_client_error)?;
            print_list(&posts, cli.json)?;
        }
        Command::Update { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("нужно указать --title и/или --content");
            }
            client
                .update(id, title.as_deref(), content.as_deref())
                .await
                .map_err(map_client_error)?;
            println!("Пост обновлён: id={id}");
        }
        Command::Delete { id } => {
            client.delete(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    normalize_server(server.unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string()))
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: PostClientError) -> anyhow::Error {
    let message = match err {
        PostClientError::NotFound(message) => format!("пост не найден: {message}"),
        PostClientError::InvalidRequest {
            message,
            validation,
        } => {
            let fields: Vec<String> = validation
                .iter()
                .map(|(field, reason)| format!("{field}: {reason}"))
                .collect();
            if fields.is_empty() {
                format!("некорректный запрос: {message}")
            } else {
                format!("некорректный запрос: {message} ({})", fields.join(", "))
            }
        }
        PostClientError::Server { status, message } => {
            format!("ошибка сервера: status={status}, message={message}")
        }
        PostClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(post: &Post, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(post)?);
        return Ok(());
    }

    println!("title: {}", post.title);
    println!("content: {}", post.content);
    Ok(())
}

fn print_list(posts: &[Post], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "posts": posts }));
        return Ok(());
    }

    println!("Постов: {}", posts.len());
    for post in posts {
        println!("- {}", post.title);
    }
    Ok(())
}
