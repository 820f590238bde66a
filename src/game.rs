use log::{debug, info};

use crate::ai::{self, MoveSelector};
use crate::board::Board;
use crate::config::{GameConfig, OpponentMode};
use crate::error::{GameError, GameResult};
use crate::event::{GameEvent, GameObserver};
use crate::history::{History, Ply};
use crate::types::{Color, GameSnapshot, GameState, Position, Score};

/// One Reversi session: the board, its history and the turn state machine.
pub struct Game {
    board: Board,
    history: History,
    config: GameConfig,
    state: GameState,
    side_to_move: Color,
    player_color: Color,
    /// Whether each side had a legal move on its most recent turn, indexed by
    /// `Color::index`.
    can_move: [bool; 2],
    legal_moves: Vec<Position>,
    selector: Option<Box<dyn MoveSelector>>,
    observer: Option<Box<dyn GameObserver>>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let selector = ai::selector_for(config.opponent);
        Self::build(config, selector)
    }

    /// Uses `selector` for the computer side instead of the mode's built-in one.
    pub fn with_selector(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self::build(config, Some(selector))
    }

    fn build(config: GameConfig, selector: Option<Box<dyn MoveSelector>>) -> Self {
        Self {
            board: Board::new(),
            history: History::new(),
            config,
            state: GameState::Idle,
            side_to_move: Color::Black,
            player_color: player_color_for(config.player_moves_first),
            can_move: [true, true],
            legal_moves: Vec::new(),
            selector,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Resets the board and history and runs the state machine until a human
    /// decision is needed or the game ends. Black always plays the first ply.
    pub fn start_game(&mut self, player_moves_first: bool) -> GameResult<()> {
        self.config.player_moves_first = player_moves_first;
        self.player_color = player_color_for(player_moves_first);
        self.board = Board::new();
        self.history.clear();
        self.side_to_move = Color::Black;
        self.can_move = [true, true];
        self.legal_moves.clear();
        info!(
            "new game: opponent={}, player={}",
            self.config.opponent, self.player_color
        );
        self.advance()
    }

    /// Switches the opponent. A game in progress continues with the new mode.
    pub fn set_opponent_mode(&mut self, mode: OpponentMode) -> GameResult<()> {
        self.config.opponent = mode;
        self.selector = ai::selector_for(mode);
        debug!("opponent mode set to {mode}");
        match self.state {
            GameState::AwaitingMove(_) | GameState::ComputerThinking(_) => self.advance(),
            GameState::Idle | GameState::GameOver => Ok(()),
        }
    }

    /// Legal moves of the side to move; empty when idle or over.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    /// Plays `pos` for the human side to move.
    ///
    /// Rejected with `IllegalMove`, leaving the game untouched, unless a human
    /// is to move and `pos` is one of its legal moves. If the computer's answer
    /// fails, the whole exchange is taken back before the error is returned.
    pub fn choose_move(&mut self, pos: Position) -> GameResult<()> {
        let color = match self.state {
            GameState::AwaitingMove(color) => color,
            _ => return Err(GameError::IllegalMove(pos)),
        };
        if !self.legal_moves.contains(&pos) {
            return Err(GameError::IllegalMove(pos));
        }

        let checkpoint = self.checkpoint();
        self.apply_ply(pos, color)?;
        self.side_to_move = color.opponent();
        if let Err(err) = self.advance() {
            self.rollback(checkpoint)?;
            return Err(err);
        }
        Ok(())
    }

    /// Plays the pending computer move when `pace_computer_moves` is set.
    pub fn play_computer_move(&mut self) -> GameResult<()> {
        let color = match self.state {
            GameState::ComputerThinking(color) => color,
            _ => return Err(GameError::NotComputerTurn),
        };
        self.computer_turn(color)?;
        self.advance()
    }

    /// Takes back one ply against a human, or one full exchange (back to the
    /// human's last move) against the computer.
    ///
    /// Against the computer a single recorded ply cannot be undone, nor can a
    /// history without any human ply; both report `EmptyHistory`.
    pub fn undo_last_exchange(&mut self) -> GameResult<()> {
        if self.history.is_empty() {
            return Err(GameError::EmptyHistory);
        }
        let vs_computer = self.config.opponent.is_computer();
        if vs_computer
            && (self.history.len() == 1
                || !self.history.iter().any(|ply| !self.is_computer(ply.color)))
        {
            return Err(GameError::EmptyHistory);
        }

        loop {
            let ply = self.pop_ply()?;
            self.side_to_move = ply.color;
            if !vs_computer || !self.is_computer(ply.color) {
                break;
            }
        }

        self.can_move = [true, true];
        self.advance()
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The human's colour for score display; in `Human` mode the colour of
    /// whoever was set up to move first.
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            state: self.state,
            side_to_move: self.side_to_move,
            player_color: self.player_color,
            legal_moves: self.legal_moves.clone(),
            score: self.score(),
            ply_count: self.history.len(),
        }
    }

    fn is_computer(&self, color: Color) -> bool {
        self.config.opponent.is_computer() && color != self.player_color
    }

    /// Runs the turn state machine from the side to move: plays computer
    /// turns, passes sides without moves, and stops at a human decision,
    /// a paced computer turn, or the end of the game.
    fn advance(&mut self) -> GameResult<()> {
        loop {
            let color = self.side_to_move;
            let moves = self.board.legal_moves(color);

            if moves.is_empty() {
                self.can_move[color.index()] = false;
                self.legal_moves.clear();
                if !self.can_move[color.opponent().index()] {
                    let score = self.score();
                    info!(
                        "game over: black={} white={} after {} plies",
                        score.black,
                        score.white,
                        self.history.len()
                    );
                    self.state = GameState::GameOver;
                    self.emit(GameEvent::GameOver { score });
                    return Ok(());
                }
                debug!("{color} has no legal move and passes");
                self.side_to_move = color.opponent();
                continue;
            }

            self.can_move[color.index()] = true;
            self.legal_moves = moves;

            if self.is_computer(color) {
                self.state = GameState::ComputerThinking(color);
                if self.config.pace_computer_moves {
                    return Ok(());
                }
                self.computer_turn(color)?;
                continue;
            }

            self.state = GameState::AwaitingMove(color);
            self.emit(GameEvent::MoveOffered {
                color,
                moves: self.legal_moves.clone(),
            });
            return Ok(());
        }
    }

    fn computer_turn(&mut self, color: Color) -> GameResult<()> {
        let selector = self.selector.as_ref().ok_or_else(|| {
            GameError::InvariantViolation(format!("no move selector for computer side {color}"))
        })?;
        let selected = selector.select_move(&mut self.board, color)?.ok_or_else(|| {
            GameError::InvariantViolation(format!("selector found no move for {color}"))
        })?;
        if !self.legal_moves.contains(&selected) {
            return Err(GameError::InvariantViolation(format!(
                "selector chose illegal move {selected} for {color}"
            )));
        }

        debug!("computer ({color}) plays {selected}");
        self.apply_ply(selected, color)?;
        self.side_to_move = color.opponent();
        Ok(())
    }

    fn apply_ply(&mut self, pos: Position, color: Color) -> GameResult<()> {
        let record = self.board.flip_set(pos, color)?;
        self.board.apply(&record, color)?;
        let ply = Ply {
            color,
            record: record.clone(),
        };
        if let Err(err) = self.history.push(ply) {
            self.board.revert(&record, color)?;
            return Err(err);
        }

        debug!(
            "ply {}: {color} at {pos} flips {}",
            self.history.len(),
            record.flipped.len()
        );
        self.emit(GameEvent::MoveApplied { color, record });
        Ok(())
    }

    /// Pops the newest ply and reverts it on the board.
    fn pop_ply(&mut self) -> GameResult<Ply> {
        let ply = self.history.pop()?;
        if let Err(err) = self.board.revert(&ply.record, ply.color) {
            self.history.push(ply)?;
            return Err(err);
        }
        debug!("undid {} at {}", ply.color, ply.record.placed);
        self.emit(GameEvent::MoveUndone {
            color: ply.color,
            record: ply.record.clone(),
        });
        Ok(ply)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            plies: self.history.len(),
            state: self.state,
            side_to_move: self.side_to_move,
            can_move: self.can_move,
            legal_moves: self.legal_moves.clone(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) -> GameResult<()> {
        while self.history.len() > checkpoint.plies {
            self.pop_ply()?;
        }
        self.state = checkpoint.state;
        self.side_to_move = checkpoint.side_to_move;
        self.can_move = checkpoint.can_move;
        self.legal_moves = checkpoint.legal_moves;
        Ok(())
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }
}

/// Turn state saved before a human move so a failed computer answer can be
/// taken back.
struct Checkpoint {
    plies: usize,
    state: GameState,
    side_to_move: Color,
    can_move: [bool; 2],
    legal_moves: Vec<Position>,
}

fn player_color_for(player_moves_first: bool) -> Color {
    if player_moves_first {
        Color::Black
    } else {
        Color::White
    }
}
