use crate::board::{initial_board, Board};
use crate::rules::CapturePolicy;
use crate::square::{Move, Square};
use crate::validator::MoveValidator;
use anyhow::{anyhow, bail, Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Text front end that plays the part of a drag-and-drop board: a move is
/// applied when legal and otherwise the piece snaps back.
pub struct ConsoleHandler {
    board: Board,
    validator: MoveValidator,
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleHandler {
    pub fn new() -> Self {
        ConsoleHandler {
            board: initial_board(),
            validator: MoveValidator::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_capture_policy(&mut self, policy: CapturePolicy) {
        self.validator = self.validator.with_capture_policy(policy);
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut reader = stdin.lock();
        let mut line = String::new();

        while reader.read_line(&mut line).context("failed to read command")? > 0 {
            let command = line.trim();
            if command == "quit" {
                break;
            }

            match self.handle_command(command) {
                Ok(response) => print!("{}", response),
                Err(err) => {
                    warn!(command, %err, "command rejected");
                    println!("error: {:#}", err);
                }
            }

            stdout.flush()?;
            line.clear();
        }
        Ok(())
    }

    pub fn handle_command(&mut self, command: &str) -> Result<String> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.is_empty() {
            return Ok("".to_string());
        }

        match parts[0] {
            "new" => Ok(self.handle_new()),
            "show" => Ok(self.board.to_string()),
            "fen" => Ok(format!("{}\n", self.board.to_placement())),
            "load" => self.handle_load(&parts[1..]),
            "check" => self.handle_check(&parts[1..]),
            "move" => self.handle_move(&parts[1..]),
            "targets" => self.handle_targets(&parts[1..]),
            "policy" => self.handle_policy(&parts[1..]),
            "quit" => Ok("".to_string()),
            other => bail!("unknown command `{}`", other),
        }
    }

    fn handle_new(&mut self) -> String {
        self.board = initial_board();
        info!("board reset to the starting position");
        "ok\n".to_string()
    }

    fn handle_load(&mut self, parts: &[&str]) -> Result<String> {
        let placement = parts.first().ok_or_else(|| anyhow!("load needs a placement"))?;
        if parts.len() > 1 {
            bail!("load takes only the placement field, found {} extra fields", parts.len() - 1);
        }
        self.board = Board::from_placement(placement)?;
        info!(placement, "board loaded");
        Ok("ok\n".to_string())
    }

    fn handle_check(&self, parts: &[&str]) -> Result<String> {
        let mv = parse_move(parts)?;
        let verdict = if self.is_legal(&mv)? { "legal" } else { "illegal" };
        Ok(format!("{}\n", verdict))
    }

    fn handle_move(&mut self, parts: &[&str]) -> Result<String> {
        let mv = parse_move(parts)?;
        if self.is_legal(&mv)? {
            self.board = self.board.apply_move(mv);
            info!(%mv, "move applied");
            Ok(format!("ok {}\n", mv))
        } else {
            Ok(format!("illegal {}\n", mv))
        }
    }

    fn handle_targets(&self, parts: &[&str]) -> Result<String> {
        let text = parts.first().ok_or_else(|| anyhow!("targets needs a square"))?;
        let from: Square = text.parse()?;
        let targets: Vec<String> = self
            .validator
            .legal_targets(&self.board, from)
            .iter()
            .map(|square| square.to_string())
            .collect();
        Ok(format!("{}\n", targets.join(" ")))
    }

    fn handle_policy(&mut self, parts: &[&str]) -> Result<String> {
        let policy = match parts.first() {
            Some(&"permissive") => CapturePolicy::Permissive,
            Some(&"strict") => CapturePolicy::OpponentOnly,
            _ => bail!("policy must be `permissive` or `strict`"),
        };
        self.set_capture_policy(policy);
        Ok("ok\n".to_string())
    }

    fn is_legal(&self, mv: &Move) -> Result<bool> {
        let piece = self
            .board
            .occupant_at(mv.from)
            .ok_or_else(|| anyhow!("no piece on {}", mv.from))?;
        Ok(self.validator.is_valid(mv, piece, &self.board))
    }
}

fn parse_move(parts: &[&str]) -> Result<Move> {
    if parts.is_empty() {
        bail!("expected a move such as e2e4");
    }
    let text = parts.join(" ");
    text.parse::<Move>()
        .with_context(|| format!("cannot read move `{}`", text))
}
