use std::io::{self, BufRead, Write};

use board::{PostBoard, PostClient, PostForm};
use dotenvy::dotenv;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

fn render(board: &PostBoard) {
    println!("== Latest Posts ==");
    if board.posts().is_empty() {
        println!("No posts found");
        return;
    }
    for post in board.posts() {
        let id = post
            .id
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        println!("#{} {}", id, post.title);
        println!("    {}", post.content);
    }
}

/// Read one line; `None` on EOF.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let base_url =
        std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let client = PostClient::new(&base_url);

    let mut board = PostBoard::new();
    board.load(&client).await;
    render(&board);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut form = PostForm::new();
    loop {
        let Some(title) = prompt(&mut input, "Post title")? else {
            break;
        };
        let Some(content) = prompt(&mut input, "Post content")? else {
            break;
        };
        form.set_title(title);
        form.set_content(content);
        board.handle(&client, form.submit()).await;
        render(&board);
    }
    Ok(())
}
