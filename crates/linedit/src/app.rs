use anyhow::Result;
use linecore::{Document, DocumentError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::command_processor::{Command, CommandError, CommandProcessor, Outcome};
use crate::config::Config;

/// The read-eval-print loop around a single [`Document`].
pub struct App {
    pub document: Document,
    pub config: Config,
    pub command_processor: CommandProcessor,
    should_quit: bool,
}

impl App {
    pub fn new(document: Document, config: Config) -> Self {
        Self {
            document,
            config,
            command_processor: CommandProcessor::new(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Read commands from `input` until `close` succeeds or input runs out.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        while !self.should_quit() {
            output.write_all(self.config.prompt.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                log::info!("Input closed, ending session");
                break;
            };
            self.handle_line(&line, &mut lines, output).await?;
        }

        log::info!("Session ended");
        Ok(())
    }

    async fn handle_line<R, W>(
        &mut self,
        line: &str,
        lines: &mut Lines<R>,
        output: &mut W,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(()),
            Err(e) => {
                log::debug!("Rejected input {:?}: {}", line, e);
                return write_line(output, &format!("Error! {}", e)).await;
            }
        };

        match self.command_processor.execute(&command, &mut self.document) {
            Ok(Outcome::Continue(Some(message))) => write_line(output, &message).await?,
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Quit) => self.quit(),
            Err(DocumentError::UnsavedChanges) => self.confirm_close(lines, output).await?,
            Err(e) => {
                if !e.is_validation_error() {
                    log::error!("Command {:?} failed: {}", command, e);
                }
                write_line(output, &format!("Error! {}", e)).await?;
            }
        }
        Ok(())
    }

    async fn confirm_close<R, W>(&mut self, lines: &mut Lines<R>, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        if !self.config.confirm_unsaved_close {
            return write_line(output, "Error! There are unsaved changes, save them first.").await;
        }

        output.write_all(self.config.close_question.as_bytes()).await?;
        output.flush().await?;

        match lines.next_line().await? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                log::info!("Discarding unsaved changes to {}", self.document.path().display());
                self.quit();
            }
            Some(_) => {}
            None => {
                log::warn!("Input closed with unsaved changes, discarding them");
                self.quit();
            }
        }
        Ok(())
    }
}

async fn write_line<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
