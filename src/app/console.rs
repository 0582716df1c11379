use crate::app::shell::AppShell;
use crate::domain::ports::CatalogApi;
use crate::ui::render::{self, EXAMPLE_QUERIES};
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "> ";

const HELP: &str = "\
Type what you are looking for and press Enter to get recommendations.
Commands:
  :clear      back to all products
  :dismiss    hide the error message
  :reload     fetch the product list again
  :examples   list example queries
  :<n>        run example query n
  :help       show this help
  :quit       exit
";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Clear,
    Dismiss,
    Reload,
    Examples,
    Example(usize),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let Some(name) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    match name.trim() {
        "clear" | "c" => Command::Clear,
        "dismiss" | "d" => Command::Dismiss,
        "reload" | "r" => Command::Reload,
        "examples" | "e" => Command::Examples,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) => Command::Example(n),
            Err(_) => Command::Unknown(other.to_string()),
        },
    }
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

/// Drives the shell from line-oriented input until `:quit` or end of input.
pub async fn run<A, R, W>(shell: &mut AppShell<A>, input: R, output: &mut W) -> Result<()>
where
    A: CatalogApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    shell.load_products().await;
    write_out(output, &shell.render()).await?;
    write_out(output, PROMPT).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = parse_command(&line);
        tracing::debug!("Console command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Nothing => {
                write_out(output, PROMPT).await?;
                continue;
            }
            Command::Help => {
                write_out(output, HELP).await?;
                write_out(output, PROMPT).await?;
                continue;
            }
            Command::Examples => {
                write_out(output, &render::search_hints(false, false)).await?;
                write_out(output, PROMPT).await?;
                continue;
            }
            Command::Unknown(name) => {
                write_out(output, &format!("Unknown command ':{}'. Type :help for commands.\n", name)).await?;
                write_out(output, PROMPT).await?;
                continue;
            }
            Command::Example(n) => match n.checked_sub(1).and_then(|i| EXAMPLE_QUERIES.get(i)) {
                Some(query) => shell.submit(query).await,
                None => {
                    let message = format!(
                        "There is no example :{}. Pick 1 to {}.\n",
                        n,
                        EXAMPLE_QUERIES.len()
                    );
                    write_out(output, &message).await?;
                    write_out(output, PROMPT).await?;
                    continue;
                }
            },
            Command::Search(query) => shell.submit(&query).await,
            Command::Clear => shell.clear_recommendations(),
            Command::Dismiss => shell.dismiss_error(),
            Command::Reload => shell.load_products().await,
        }

        write_out(output, &shell.render()).await?;
        write_out(output, PROMPT).await?;
    }

    tracing::info!("Console session ended");
    Ok(())
}
