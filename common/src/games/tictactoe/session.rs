use crate::games::{RandomSource, SessionRng};
use crate::log;
use super::board::Board;
use super::bot_controller::{BotInput, choose_move};
use super::broadcaster::{GameBroadcaster, StateUpdate};
use super::scheduler::{MoveScheduler, TimerHandle};
use super::settings::{Difficulty, FirstPlayer, GameMode, SessionConfig};
use super::types::{Line, Mark, MoveError, MoveResult, Position, Scoreboard, Seat};
use super::win_detector::{find_winning_line, is_draw};

/// The single owner of a game's state.
///
/// Human moves arrive through [`GameSession::submit_move`]. When the computer
/// is to move, the session schedules a timer on its [`MoveScheduler`] and
/// plays once the owner hands the elapsed handle to
/// [`GameSession::on_timer_elapsed`]. At most one such timer is outstanding;
/// starting a game or applying a move cancels it.
pub struct GameSession<S, B, R = SessionRng>
where
    S: MoveScheduler,
    B: GameBroadcaster,
    R: RandomSource,
{
    config: SessionConfig,
    board: Board,
    current_mark: Mark,
    is_player_one_turn: bool,
    x_seat: Seat,
    result: MoveResult,
    winning_line: Option<Line>,
    last_move: Option<Position>,
    scoreboard: Scoreboard,
    last_loser: Option<Seat>,
    pending_move: Option<TimerHandle>,
    scheduler: S,
    broadcaster: B,
    rng: R,
}

impl<S, B, R> GameSession<S, B, R>
where
    S: MoveScheduler,
    B: GameBroadcaster,
    R: RandomSource,
{
    /// Creates a fresh two-player session awaiting X's first move.
    pub fn new(scheduler: S, broadcaster: B, rng: R) -> Self {
        Self {
            config: SessionConfig::default(),
            board: Board::new(),
            current_mark: Mark::X,
            is_player_one_turn: true,
            x_seat: Seat::PlayerOne,
            result: MoveResult::Continue,
            winning_line: None,
            last_move: None,
            scoreboard: Scoreboard::default(),
            last_loser: None,
            pending_move: None,
            scheduler,
            broadcaster,
            rng,
        }
    }

    pub fn start_new_game(&mut self, mode: GameMode, difficulty: Difficulty) {
        let config = SessionConfig {
            mode,
            difficulty,
            ..self.config.clone()
        };
        self.start_with_config(config);
    }

    pub fn start_with_config(&mut self, config: SessionConfig) {
        if config.mode != self.config.mode {
            self.scoreboard = Scoreboard::default();
            self.last_loser = None;
        }
        self.config = config;
        self.begin_game();
    }

    /// Starts the next game with the current configuration.
    pub fn restart(&mut self) {
        self.begin_game();
    }

    pub fn submit_move(&mut self, position: Position) -> Result<MoveResult, MoveError> {
        if self.is_game_over() {
            log!("Rejected move at {}: game is over", position.index());
            return Err(MoveError::GameOver);
        }

        if self.is_computer_turn() {
            log!("Rejected move at {}: waiting for the computer", position.index());
            return Err(MoveError::NotYourTurn);
        }

        self.apply_move(position).inspect_err(|e| {
            log!("Rejected move at {}: {}", position.index(), e);
        })
    }

    /// Plays the computer's move if `handle` is the outstanding timer.
    /// Returns `None` for stale or cancelled handles.
    pub fn on_timer_elapsed(&mut self, handle: TimerHandle) -> Option<MoveResult> {
        if self.pending_move != Some(handle) {
            log!("Ignoring stale timer {}", handle.id());
            return None;
        }
        self.pending_move = None;

        if self.is_game_over() || !self.is_computer_turn() {
            return None;
        }

        let bot_mark = self.computer_mark()?;
        let input = BotInput::new(&self.board, bot_mark, self.config.difficulty);
        let position = choose_move(&input, &mut self.rng);

        match self.apply_move(position) {
            Ok(result) => Some(result),
            Err(e) => {
                log!("Computer failed to play at {}: {}", position.index(), e);
                None
            }
        }
    }

    pub fn current_turn_description(&self) -> String {
        match self.config.mode {
            GameMode::SinglePlayer => {
                if self.is_player_one_turn {
                    format!("It is your turn ({})", self.current_mark)
                } else {
                    format!("It is the CPU's turn ({})", self.current_mark)
                }
            }
            GameMode::TwoPlayer => format!(
                "It is Player {} turn ({})",
                seat_number(self.current_seat()),
                self.current_mark
            ),
        }
    }

    pub fn result_description(&self) -> Option<String> {
        match self.result {
            MoveResult::Continue => None,
            MoveResult::Draw => Some("It is a draw!".to_string()),
            MoveResult::Win(mark) => {
                let seat = self.seat_for(mark)?;
                let text = match (self.config.mode, seat) {
                    (GameMode::SinglePlayer, Seat::PlayerOne) => "You win".to_string(),
                    (GameMode::SinglePlayer, Seat::PlayerTwo) => "You lose".to_string(),
                    (GameMode::TwoPlayer, seat) => {
                        format!("Player {} ({}) wins", seat_number(seat), mark)
                    }
                };
                Some(text)
            }
        }
    }

    pub fn state_update(&self) -> StateUpdate {
        StateUpdate {
            board: self.board.snapshot(),
            current_mark: self.current_mark,
            turn: self.current_seat(),
            result: self.result,
            winning_line: self.winning_line,
            last_move: self.last_move,
            computer_mark: self.computer_mark(),
            scoreboard: self.scoreboard,
            turn_description: self.current_turn_description(),
            result_description: self.result_description(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn is_player_one_turn(&self) -> bool {
        self.is_player_one_turn
    }

    pub fn current_seat(&self) -> Seat {
        if self.is_player_one_turn {
            Seat::PlayerOne
        } else {
            Seat::PlayerTwo
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_terminal()
    }

    pub fn last_result(&self) -> MoveResult {
        self.result
    }

    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    /// Zeroes the scores and forgets the last loser, then broadcasts.
    pub fn reset_scoreboard(&mut self) {
        self.scoreboard = Scoreboard::default();
        self.last_loser = None;
        log!("Scoreboard reset");
        self.broadcast();
    }

    /// The computer's mark in single-player; the computer always sits in seat two.
    pub fn computer_mark(&self) -> Option<Mark> {
        match self.config.mode {
            GameMode::SinglePlayer => Some(self.mark_for(Seat::PlayerTwo)),
            GameMode::TwoPlayer => None,
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.config.is_single_player() && !self.is_player_one_turn
    }

    pub fn has_pending_computer_move(&self) -> bool {
        self.pending_move.is_some()
    }

    pub fn pending_computer_move(&self) -> Option<TimerHandle> {
        self.pending_move
    }

    pub fn seat_for(&self, mark: Mark) -> Option<Seat> {
        match mark {
            Mark::X => Some(self.x_seat),
            Mark::O => Some(self.x_seat.other()),
            Mark::Empty => None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn mark_for(&self, seat: Seat) -> Mark {
        if seat == self.x_seat { Mark::X } else { Mark::O }
    }

    fn begin_game(&mut self) {
        self.cancel_pending_move();

        let first_seat = self.resolve_first_seat();
        self.board.clear();
        self.current_mark = Mark::X;
        self.x_seat = first_seat;
        self.is_player_one_turn = first_seat == Seat::PlayerOne;
        self.result = MoveResult::Continue;
        self.winning_line = None;
        self.last_move = None;

        log!(
            "New game: {}, {} difficulty, {:?} opens as X",
            self.config.mode,
            self.config.difficulty,
            first_seat
        );

        self.broadcast();
        self.schedule_computer_move_if_due();
    }

    fn resolve_first_seat(&mut self) -> Seat {
        match self.config.first_player {
            FirstPlayer::PlayerOne => Seat::PlayerOne,
            FirstPlayer::PlayerTwo => Seat::PlayerTwo,
            FirstPlayer::Random => self.random_seat(),
            FirstPlayer::Loser => match self.last_loser {
                Some(seat) => seat,
                None => self.random_seat(),
            },
        }
    }

    fn random_seat(&mut self) -> Seat {
        if self.rng.next_below(2) == 0 {
            Seat::PlayerOne
        } else {
            Seat::PlayerTwo
        }
    }

    fn apply_move(&mut self, position: Position) -> Result<MoveResult, MoveError> {
        let mark = self.current_mark;
        self.board.set(position, mark)?;
        self.cancel_pending_move();
        self.last_move = Some(position);

        if let Some(winning) = find_winning_line(&self.board) {
            self.result = MoveResult::Win(winning.mark);
            self.winning_line = Some(winning.line);
            if let Some(seat) = self.seat_for(winning.mark) {
                self.scoreboard.record_win(seat);
                self.last_loser = Some(seat.other());
            }
            log!("{} wins along {:?}", winning.mark, winning.line.kind);
        } else if is_draw(&self.board) {
            self.result = MoveResult::Draw;
            self.scoreboard.record_draw();
            self.last_loser = None;
            log!("Game drawn");
        } else {
            self.current_mark = mark.opponent().unwrap_or(Mark::X);
            self.is_player_one_turn = !self.is_player_one_turn;
        }

        log!("{} played cell {}", mark, position.index());

        self.broadcast();
        self.schedule_computer_move_if_due();
        Ok(self.result)
    }

    fn schedule_computer_move_if_due(&mut self) {
        if self.is_game_over() || !self.is_computer_turn() {
            return;
        }

        self.cancel_pending_move();
        let delay = self.config.computer_move_delay();
        let handle = self.scheduler.schedule_after(delay);
        self.pending_move = Some(handle);
        log!("Computer move scheduled in {:?} (timer {})", delay, handle.id());
    }

    fn cancel_pending_move(&mut self) {
        if let Some(handle) = self.pending_move.take() {
            self.scheduler.cancel(handle);
            log!("Cancelled pending computer move (timer {})", handle.id());
        }
    }

    fn broadcast(&mut self) {
        let update = self.state_update();
        self.broadcaster.broadcast_state(&update);
    }
}

fn seat_number(seat: Seat) -> u8 {
    match seat {
        Seat::PlayerOne => 1,
        Seat::PlayerTwo => 2,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::games::tictactoe::scheduler::ManualMoveScheduler;
    use crate::games::tictactoe::types::LineKind;

    type Updates = Rc<RefCell<Vec<StateUpdate>>>;
    type TestSession = GameSession<ManualMoveScheduler, Box<dyn FnMut(&StateUpdate)>>;

    const DELAY: Duration = Duration::from_secs(1);

    fn new_session() -> (TestSession, Updates) {
        let updates: Updates = Rc::new(RefCell::new(Vec::new()));
        let sink = updates.clone();
        let broadcaster: Box<dyn FnMut(&StateUpdate)> =
            Box::new(move |update: &StateUpdate| sink.borrow_mut().push(update.clone()));
        let session = GameSession::new(ManualMoveScheduler::new(), broadcaster, SessionRng::new(42));
        (session, updates)
    }

    /// Hands out a fixed sequence of draws and records each requested bound.
    struct ScriptedRng {
        draws: VecDeque<usize>,
        bounds: Rc<RefCell<Vec<usize>>>,
    }

    impl RandomSource for ScriptedRng {
        fn next_below(&mut self, upper: usize) -> usize {
            self.bounds.borrow_mut().push(upper);
            self.draws.pop_front().expect("scripted draws exhausted")
        }
    }

    type ScriptedSession = GameSession<ManualMoveScheduler, fn(&StateUpdate), ScriptedRng>;

    fn scripted_session(draws: &[usize]) -> (ScriptedSession, Rc<RefCell<Vec<usize>>>) {
        fn ignore(_: &StateUpdate) {}
        let bounds = Rc::new(RefCell::new(Vec::new()));
        let rng = ScriptedRng {
            draws: draws.iter().copied().collect(),
            bounds: bounds.clone(),
        };
        let session = GameSession::new(ManualMoveScheduler::new(), ignore as fn(&StateUpdate), rng);
        (session, bounds)
    }

    const DRAW_GAME: [usize; 9] = [0, 1, 2, 4, 3, 5, 7, 6, 8];
    const TOP_ROW_WIN: [usize; 5] = [0, 3, 1, 4, 2];

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    fn play(session: &mut TestSession, cells: &[usize]) -> MoveResult {
        let mut result = MoveResult::Continue;
        for &cell in cells {
            result = session.submit_move(pos(cell)).unwrap();
        }
        result
    }

    fn fire_due(session: &mut TestSession, by: Duration) -> Vec<Option<MoveResult>> {
        let due = session.scheduler_mut().advance(by);
        due.into_iter()
            .map(|handle| session.on_timer_elapsed(handle))
            .collect()
    }

    #[test]
    fn test_new_session_awaits_first_move() {
        let (session, updates) = new_session();
        assert!(session.board().is_empty());
        assert!(!session.is_game_over());
        assert_eq!(session.last_result(), MoveResult::Continue);
        assert_eq!(session.current_mark(), Mark::X);
        assert!(session.is_player_one_turn());
        assert_eq!(session.current_turn_description(), "It is Player 1 turn (X)");
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_two_player_turns_alternate() {
        let (mut session, updates) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);

        assert_eq!(session.submit_move(pos(4)), Ok(MoveResult::Continue));
        assert_eq!(session.current_mark(), Mark::O);
        assert!(!session.is_player_one_turn());
        assert_eq!(session.current_turn_description(), "It is Player 2 turn (O)");

        assert_eq!(session.submit_move(pos(0)), Ok(MoveResult::Continue));
        assert_eq!(session.board().get(pos(4)), Mark::X);
        assert_eq!(session.board().get(pos(0)), Mark::O);
        assert_eq!(session.last_move(), Some(pos(0)));
        assert_eq!(updates.borrow().len(), 3);
        assert!(!session.has_pending_computer_move());
    }

    #[test]
    fn test_completing_top_row_wins_the_game() {
        let (mut session, updates) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);

        let result = play(&mut session, &[0, 3, 1, 4, 2]);

        assert_eq!(result, MoveResult::Win(Mark::X));
        assert!(session.is_game_over());
        assert_eq!(session.winning_line().map(|line| line.kind), Some(LineKind::TopRow));
        assert_eq!(session.result_description().as_deref(), Some("Player 1 (X) wins"));
        assert_eq!(session.scoreboard().player_one_wins, 1);

        let last = updates.borrow().last().cloned().unwrap();
        assert!(last.is_game_over());
        assert_eq!(last.winning_line.map(|line| line.kind), Some(LineKind::TopRow));
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);

        let result = play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert_eq!(result, MoveResult::Draw);
        assert!(session.board().is_full());
        assert_eq!(session.winning_line(), None);
        assert_eq!(session.result_description().as_deref(), Some("It is a draw!"));
        assert_eq!(session.scoreboard().draws, 1);
    }

    #[test]
    fn test_moves_after_game_over_are_ignored() {
        let (mut session, updates) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);
        play(&mut session, &[0, 3, 1, 4, 2]);
        let before = *session.board();
        let broadcasts = updates.borrow().len();

        assert_eq!(session.submit_move(pos(8)), Err(MoveError::GameOver));
        assert_eq!(*session.board(), before);
        assert_eq!(updates.borrow().len(), broadcasts);
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_turn_change() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);
        play(&mut session, &[4]);

        assert_eq!(session.submit_move(pos(4)), Err(MoveError::CellOccupied(pos(4))));
        assert_eq!(session.current_mark(), Mark::O);
        assert_eq!(session.board().count(Mark::O), 0);
    }

    #[test]
    fn test_start_new_game_resets_any_state() {
        let (mut session, updates) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);
        play(&mut session, &[0, 3, 1, 4, 2]);
        assert!(session.is_game_over());

        for _ in 0..2 {
            session.start_new_game(GameMode::TwoPlayer, Difficulty::Easy);
            assert!(session.board().is_empty());
            assert!(!session.is_game_over());
            assert_eq!(session.current_mark(), Mark::X);
            assert!(session.is_player_one_turn());
            assert_eq!(session.winning_line(), None);
            assert_eq!(session.last_move(), None);
        }

        assert!(updates.borrow().last().unwrap().board.is_empty());
        assert_eq!(session.scoreboard().player_one_wins, 1);
    }

    #[test]
    fn test_computer_replies_after_delay() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::SinglePlayer, Difficulty::Hard);
        assert_eq!(session.computer_mark(), Some(Mark::O));
        assert_eq!(session.current_turn_description(), "It is your turn (X)");

        play(&mut session, &[0]);
        assert!(session.is_computer_turn());
        assert!(session.has_pending_computer_move());
        assert_eq!(session.current_turn_description(), "It is the CPU's turn (O)");
        assert_eq!(session.submit_move(pos(8)), Err(MoveError::NotYourTurn));

        assert!(fire_due(&mut session, Duration::from_millis(999)).is_empty());
        assert_eq!(session.board().count(Mark::O), 0);

        let results = fire_due(&mut session, Duration::from_millis(1));
        assert_eq!(results, vec![Some(MoveResult::Continue)]);
        assert_eq!(session.board().count(Mark::O), 1);
        assert!(!session.is_computer_turn());
        assert!(!session.has_pending_computer_move());
    }

    #[test]
    fn test_hard_computer_answers_corner_with_center() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::SinglePlayer, Difficulty::Hard);

        play(&mut session, &[0]);
        fire_due(&mut session, DELAY);

        assert_eq!(session.board().get(Position::CENTER), Mark::O);
        assert_eq!(session.last_move(), Some(Position::CENTER));
    }

    #[test]
    fn test_computer_can_open_the_game() {
        let (mut session, _) = new_session();
        let config = SessionConfig::single_player(Difficulty::Normal)
            .with_first_player(FirstPlayer::PlayerTwo);
        session.start_with_config(config);

        assert_eq!(session.computer_mark(), Some(Mark::X));
        assert!(!session.is_player_one_turn());
        assert!(session.has_pending_computer_move());
        assert_eq!(session.current_turn_description(), "It is the CPU's turn (X)");
        assert_eq!(session.submit_move(pos(0)), Err(MoveError::NotYourTurn));

        fire_due(&mut session, DELAY);

        assert_eq!(session.board().count(Mark::X), 1);
        assert_eq!(session.current_mark(), Mark::O);
        assert_eq!(session.current_turn_description(), "It is your turn (O)");
    }

    #[test]
    fn test_new_game_cancels_pending_computer_move() {
        let (mut session, _) = new_session();
        let config = SessionConfig::single_player(Difficulty::Hard)
            .with_first_player(FirstPlayer::PlayerTwo);
        session.start_with_config(config);
        let stale = session.pending_computer_move().unwrap();

        session.start_new_game(GameMode::TwoPlayer, Difficulty::Hard);

        assert!(!session.has_pending_computer_move());
        assert_eq!(session.scheduler().pending_count(), 0);
        assert!(fire_due(&mut session, DELAY * 5).is_empty());
        assert_eq!(session.on_timer_elapsed(stale), None);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_stale_timer_from_previous_game_is_ignored() {
        let (mut session, _) = new_session();
        let config = SessionConfig::single_player(Difficulty::Hard)
            .with_first_player(FirstPlayer::PlayerTwo);
        session.start_with_config(config);
        let stale = session.pending_computer_move().unwrap();

        session.restart();
        let current = session.pending_computer_move().unwrap();
        assert_ne!(stale, current);

        assert_eq!(session.on_timer_elapsed(stale), None);
        assert!(session.board().is_empty());

        assert_eq!(session.on_timer_elapsed(current), Some(MoveResult::Continue));
        assert_eq!(session.board().count(Mark::X), 1);
        assert_eq!(session.on_timer_elapsed(current), None);
        assert_eq!(session.board().count(Mark::X), 1);
    }

    #[test]
    fn test_hard_computer_never_loses_to_naive_player() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::SinglePlayer, Difficulty::Hard);

        while !session.is_game_over() {
            if session.is_computer_turn() {
                fire_due(&mut session, DELAY);
            } else {
                let cell = session.board().available_moves()[0];
                session.submit_move(cell).unwrap();
            }
        }

        assert_ne!(session.last_result(), MoveResult::Win(Mark::X));
        if session.last_result() == MoveResult::Win(Mark::O) {
            assert_eq!(session.result_description().as_deref(), Some("You lose"));
            assert_eq!(session.scoreboard().player_two_wins, 1);
        }
    }

    #[test]
    fn test_human_win_in_single_player_is_reported() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::SinglePlayer, Difficulty::Easy);

        // Drive the computer by hand so the outcome is fixed.
        session.submit_move(pos(0)).unwrap();
        session.apply_move(pos(3)).unwrap();
        session.submit_move(pos(1)).unwrap();
        session.apply_move(pos(4)).unwrap();
        let result = session.submit_move(pos(2)).unwrap();

        assert_eq!(result, MoveResult::Win(Mark::X));
        assert_eq!(session.result_description().as_deref(), Some("You win"));
        assert!(!session.has_pending_computer_move());
    }

    #[test]
    fn test_loser_opens_next_game() {
        let (mut session, _) = new_session();
        let config = SessionConfig::two_player().with_first_player(FirstPlayer::Loser);
        session.start_with_config(config);

        let opener = session.current_seat();
        let first_cells = [0, 3, 1, 4, 2];
        play(&mut session, &first_cells);
        assert_eq!(session.seat_for(Mark::X), Some(opener));

        session.restart();

        assert_eq!(session.current_seat(), opener.other());
        assert_eq!(session.current_mark(), Mark::X);
        assert_eq!(session.seat_for(Mark::X), Some(opener.other()));
    }

    #[test]
    fn test_changing_mode_resets_scoreboard() {
        let (mut session, _) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);
        play(&mut session, &[0, 3, 1, 4, 2]);
        assert_eq!(session.scoreboard().games_played(), 1);

        session.restart();
        assert_eq!(session.scoreboard().games_played(), 1);

        session.start_new_game(GameMode::SinglePlayer, Difficulty::Normal);
        assert_eq!(session.scoreboard().games_played(), 0);
    }

    #[test]
    fn test_random_first_player_picks_both_seats() {
        let mut seats = Vec::new();
        for seed in 0..32 {
            let mut session = GameSession::new(
                ManualMoveScheduler::new(),
                |_: &StateUpdate| {},
                SessionRng::new(seed),
            );
            let config = SessionConfig::two_player().with_first_player(FirstPlayer::Random);
            session.start_with_config(config);

            assert_eq!(session.current_mark(), Mark::X);
            assert_eq!(session.seat_for(Mark::X), Some(session.current_seat()));
            seats.push(session.current_seat());
        }

        assert!(seats.contains(&Seat::PlayerOne));
        assert!(seats.contains(&Seat::PlayerTwo));
    }

    #[test]
    fn test_random_first_player_follows_the_draw() {
        let (mut session, bounds) = scripted_session(&[1, 0]);
        let config = SessionConfig::two_player().with_first_player(FirstPlayer::Random);

        session.start_with_config(config);
        assert_eq!(session.current_seat(), Seat::PlayerTwo);

        session.restart();
        assert_eq!(session.current_seat(), Seat::PlayerOne);
        assert_eq!(*bounds.borrow(), vec![2, 2]);
    }

    #[test]
    fn test_loser_falls_back_to_random_after_draw() {
        let (mut session, bounds) = scripted_session(&[0, 1]);
        let config = SessionConfig::two_player().with_first_player(FirstPlayer::Loser);
        session.start_with_config(config);
        assert_eq!(session.current_seat(), Seat::PlayerOne);

        assert_eq!(play_scripted(&mut session, &DRAW_GAME), MoveResult::Draw);
        assert_eq!(session.last_loser, None);

        session.restart();

        assert_eq!(session.current_seat(), Seat::PlayerTwo);
        assert_eq!(session.seat_for(Mark::X), Some(Seat::PlayerTwo));
        assert_eq!(bounds.borrow().len(), 2);
    }

    #[test]
    fn test_loser_after_win_does_not_draw_randomly() {
        let (mut session, bounds) = scripted_session(&[0]);
        let config = SessionConfig::two_player().with_first_player(FirstPlayer::Loser);
        session.start_with_config(config);

        assert_eq!(play_scripted(&mut session, &TOP_ROW_WIN), MoveResult::Win(Mark::X));
        session.restart();

        assert_eq!(session.current_seat(), Seat::PlayerTwo);
        assert_eq!(bounds.borrow().len(), 1);
    }

    #[test]
    fn test_reset_scoreboard_clears_counts_and_last_loser() {
        let (mut session, bounds) = scripted_session(&[0, 0]);
        let config = SessionConfig::two_player().with_first_player(FirstPlayer::Loser);
        session.start_with_config(config);
        play_scripted(&mut session, &TOP_ROW_WIN);
        assert_eq!(session.scoreboard().player_one_wins, 1);
        assert_eq!(session.last_loser, Some(Seat::PlayerTwo));

        session.reset_scoreboard();

        assert_eq!(session.scoreboard(), Scoreboard::default());
        assert_eq!(session.last_loser, None);

        session.restart();
        assert_eq!(session.current_seat(), Seat::PlayerOne);
        assert_eq!(bounds.borrow().len(), 2);
    }

    #[test]
    fn test_reset_scoreboard_is_broadcast() {
        let (mut session, updates) = new_session();
        session.start_new_game(GameMode::TwoPlayer, Difficulty::Normal);
        play(&mut session, &TOP_ROW_WIN);
        let broadcasts = updates.borrow().len();

        session.reset_scoreboard();

        assert_eq!(updates.borrow().len(), broadcasts + 1);
        let last = updates.borrow().last().cloned().unwrap();
        assert_eq!(last.scoreboard.games_played(), 0);
        assert!(last.is_game_over());
    }

    fn play_scripted(session: &mut ScriptedSession, cells: &[usize]) -> MoveResult {
        let mut result = MoveResult::Continue;
        for &cell in cells {
            result = session.submit_move(pos(cell)).unwrap();
        }
        result
    }
}
