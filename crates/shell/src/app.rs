use std::{ops::ControlFlow, time::Duration};

use anyhow::{Context, Result};
use sll_core::{AppConfig, NodeStatus, SinglyLinkedList};
use tokio::{
    io::{AsyncBufRead, AsyncWrite, AsyncWriteExt},
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::input::{parse_integer, parse_position, parse_value, InputError, TokenReader};

const GREETING: &str = "\nHello to Single Linked List \n\n";
const MENU: &str = concat!(
    "Enter your choice:\n",
    " 1 to insert an element at the beginning of the linked list.\n",
    " 2 to insert an element at the end of the linked list.\n",
    " 3 to insert an element after a specific position in a linked list.\n",
    " 4 to Display all nodes.\n",
    " 5 to get the length.\n",
    " 6 to delete node from the linked list.\n",
    " 7 to delete node from the beginning.\n",
    " 8 to end.\n",
    "UserChoice : ",
);
const VALUE_PROMPT: &str = "please enter the data : ";
const POSITION_PROMPT: &str =
    "Note : The first postion = 1 \nplease enter postion of the node :  \n";
const QUIT_MESSAGE: &str = "Quit from application \n\n";
const OUT_OF_RANGE: &str = "User Choice out of range !!\n\n";
const INVALID_INPUT: &str = "Invalid input !!\n\n";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    /// The operator picked the quit entry.
    Quit,
    /// Standard input was closed.
    EndOfInput,
}

impl ShellExit {
    /// Process exit code for this ending.
    pub fn exit_code(self, config: &AppConfig) -> u8 {
        match self {
            Self::Quit => config.quit_exit_code,
            Self::EndOfInput => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    InsertAtHead,
    InsertAtTail,
    InsertAfter,
    Display,
    Length,
    DeleteAtPosition,
    DeleteAtHead,
    Quit,
}

impl MenuChoice {
    fn from_number(number: i128) -> Option<Self> {
        let choice = match number {
            1 => Self::InsertAtHead,
            2 => Self::InsertAtTail,
            3 => Self::InsertAfter,
            4 => Self::Display,
            5 => Self::Length,
            6 => Self::DeleteAtPosition,
            7 => Self::DeleteAtHead,
            8 => Self::Quit,
            _ => return None,
        };
        Some(choice)
    }
}

enum Operand<T> {
    Parsed(T),
    Rejected,
    Closed,
}

/// Unwrap an operand or leave the current dispatch.
macro_rules! operand {
    ($read:expr) => {
        match $read {
            Operand::Parsed(value) => value,
            Operand::Rejected => return Ok(ControlFlow::Continue(())),
            Operand::Closed => return Ok(ControlFlow::Break(ShellExit::EndOfInput)),
        }
    };
}

/// Menu-driven session over one list.
pub struct Shell<R, W> {
    input: TokenReader<R>,
    output: W,
    list: SinglyLinkedList,
    config: AppConfig,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Build a session reading operator tokens from `reader` and rendering to `output`.
    pub fn new(reader: R, output: W, config: AppConfig) -> Self {
        Self {
            input: TokenReader::new(reader),
            output,
            list: config.new_list(),
            config,
        }
    }

    /// The list this session operates on.
    pub fn list(&self) -> &SinglyLinkedList {
        &self.list
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// Print the banner, then serve menu choices until quit or end of input.
    pub async fn run(&mut self) -> Result<ShellExit> {
        self.banner().await?;
        info!("session started");

        loop {
            self.write(MENU).await?;
            self.flush().await?;

            let Some(token) = self.next_token().await? else {
                return Ok(ShellExit::EndOfInput);
            };
            self.write("\n").await?;

            let choice = parse_integer(&token).ok().and_then(MenuChoice::from_number);
            let flow = match choice {
                Some(choice) => self.dispatch(choice).await?,
                None => {
                    warn!(%token, "choice out of range");
                    self.write(OUT_OF_RANGE).await?;
                    ControlFlow::Continue(())
                }
            };

            if let ControlFlow::Break(exit) = flow {
                self.flush().await?;
                return Ok(exit);
            }
        }
    }

    async fn banner(&mut self) -> Result<()> {
        self.write("please wait").await?;
        self.flush().await?;
        let delay = Duration::from_millis(self.config.banner_delay_ms);
        for _ in 0..self.config.banner_dots {
            self.write(".").await?;
            self.flush().await?;
            sleep(delay).await;
        }
        self.write(GREETING).await
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> Result<ControlFlow<ShellExit>> {
        let status = match choice {
            MenuChoice::InsertAtHead => {
                let value = operand!(self.read_value().await?);
                NodeStatus::from(&self.list.insert_at_head(value))
            }
            MenuChoice::InsertAtTail => {
                let value = operand!(self.read_value().await?);
                NodeStatus::from(&self.list.insert_at_tail(value))
            }
            MenuChoice::InsertAfter => {
                let value = operand!(self.read_value().await?);
                let position = operand!(self.read_position().await?);
                NodeStatus::from(&self.list.insert_after(position.into(), value))
            }
            MenuChoice::Display => {
                let mut rendered = Vec::new();
                self.list
                    .write_to(&mut rendered)
                    .context("failed to render list")?;
                rendered.push(b'\n');
                self.write_bytes(&rendered).await?;
                NodeStatus::Ok
            }
            MenuChoice::Length => {
                let length = self.list.length();
                self.write(&format!("List Length : << {length} >> Nodes\n\n"))
                    .await?;
                NodeStatus::Ok
            }
            MenuChoice::DeleteAtPosition => {
                let position = operand!(self.read_position().await?);
                NodeStatus::from(&self.list.delete_at_position(position.into()))
            }
            MenuChoice::DeleteAtHead => NodeStatus::from(&self.list.delete_at_head()),
            MenuChoice::Quit => {
                self.write(QUIT_MESSAGE).await?;
                return Ok(ControlFlow::Break(ShellExit::Quit));
            }
        };

        debug!(?choice, %status, "operation finished");
        if self.config.report_status && !status.is_ok() {
            self.write(&format!("Status : {status}\n\n")).await?;
        }
        Ok(ControlFlow::Continue(()))
    }

    async fn read_value(&mut self) -> Result<Operand<u32>> {
        self.read_operand(VALUE_PROMPT, parse_value).await
    }

    async fn read_position(&mut self) -> Result<Operand<u16>> {
        self.read_operand(POSITION_PROMPT, parse_position).await
    }

    async fn read_operand<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> Result<T, InputError>,
    ) -> Result<Operand<T>> {
        self.write(prompt).await?;
        self.flush().await?;

        let Some(token) = self.next_token().await? else {
            return Ok(Operand::Closed);
        };
        self.write("\n").await?;

        match parse(&token) {
            Ok(value) => Ok(Operand::Parsed(value)),
            Err(err) => {
                warn!(%err, "operand rejected");
                self.write(INVALID_INPUT).await?;
                Ok(Operand::Rejected)
            }
        }
    }

    async fn next_token(&mut self) -> Result<Option<String>> {
        self.input
            .next_token()
            .await
            .context("failed to read operator input")
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes()).await
    }

    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.output
            .write_all(bytes)
            .await
            .context("failed to write to terminal")
    }

    async fn flush(&mut self) -> Result<()> {
        self.output
            .flush()
            .await
            .context("failed to flush terminal")
    }
}
