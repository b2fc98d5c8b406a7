/*!
 * Console REPL
 * Read-eval-print loop over any async line source
 */

use super::command::{Command, ShellError, ShellResult};
use super::console::Console;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

const PROMPT: &str = "memtrack> ";

/// Run the console until `exit` or end of input
///
/// Command errors are printed and the loop continues; only I/O failures on
/// the reader or writer end it early.
pub async fn run_repl<R, W>(console: &mut Console, reader: R, mut writer: W) -> ShellResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(b"Process memory tracker console. Type 'help' for commands, 'exit' to quit.\n")
        .await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Command::Exit) => break,
            Ok(command) => command,
            Err(ShellError::Empty) => continue,
            Err(e) => {
                writer.write_all(format!("Error: {}\n", e).as_bytes()).await?;
                continue;
            }
        };

        debug!(?command, "Console command");
        let output = match console.execute(command) {
            Ok(text) => text,
            Err(e) => format!("Error: {}", e),
        };
        if !output.is_empty() {
            writer.write_all(output.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
    }

    writer.write_all(b"Goodbye!\n").await?;
    writer.flush().await?;
    Ok(())
}
