use crate::components::Banner;
use crate::events::{Event, EventHandler};
use crate::form::{FormAction, FormState};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use goalboard_core::{GoalsError, GoalsResult};
use goalboard_domain::{
    BoardController, CardIntent, CardRegion, DropTarget, GoalId, GoalStatus, GoalStore,
    GoalTemplate, Preconfirmed,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// A card is picked up; cursor moves retarget it.
    Dragging,
    CreateGoal,
    EditGoal(GoalId),
    ConfirmDelete(GoalId),
    Templates,
}

/// Focused column and card row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub column: usize,
    pub row: usize,
}

pub struct App<S> {
    pub board: BoardController<S>,
    pub mode: AppMode,
    pub cursor: Cursor,
    pub form: FormState,
    pub templates: Vec<GoalTemplate>,
    pub template_index: usize,
    pub banner: Option<Banner>,
    /// Last hover target of the current drag, replayed on drop.
    pub hover: Option<DropTarget>,
    pub should_quit: bool,
}

impl<S: GoalStore> App<S> {
    pub fn new(board: BoardController<S>) -> Self {
        Self {
            board,
            mode: AppMode::Normal,
            cursor: Cursor::default(),
            form: FormState::new(),
            templates: Vec::new(),
            template_index: 0,
            banner: None,
            hover: None,
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub async fn reload(&mut self) {
        self.board.load().await;
        self.clamp_cursor();
    }

    fn column_len(&self, column: usize) -> usize {
        GoalStatus::ALL
            .get(column)
            .map(|&status| self.board.goals().iter().filter(|g| g.status == status).count())
            .unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        self.cursor.column = self.cursor.column.min(GoalStatus::ALL.len() - 1);
        let len = self.column_len(self.cursor.column);
        self.cursor.row = self.cursor.row.min(len.saturating_sub(1));
    }

    /// Moves the cursor onto `id` wherever the list now has it.
    fn follow(&mut self, id: GoalId) {
        let Some(goal) = self.board.goal(id) else {
            return;
        };
        let status = goal.status;
        self.cursor.column = status.index();
        self.cursor.row = self
            .board
            .goals()
            .iter()
            .filter(|g| g.status == status)
            .position(|g| g.id == id)
            .unwrap_or(0);
    }

    fn show_notifications(&mut self) {
        if let Some(latest) = self.board.take_notifications().last() {
            self.banner = Some(Banner::from_notification(latest));
        }
    }

    pub fn expire_banner(&mut self) {
        if self.banner.as_ref().is_some_and(|b| b.is_expired(Banner::TTL)) {
            self.banner = None;
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            AppMode::Normal => self.handle_normal_key(key).await,
            AppMode::Dragging => self.handle_drag_key(key).await,
            AppMode::CreateGoal | AppMode::EditGoal(_) => self.handle_form_key(key).await,
            AppMode::ConfirmDelete(id) => self.handle_confirm_key(id, key).await,
            AppMode::Templates => self.handle_template_key(key).await,
        }
        self.show_notifications();
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('h') | KeyCode::Left => {
                self.cursor.column = self.cursor.column.saturating_sub(1);
                self.clamp_cursor();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.cursor.column += 1;
                self.clamp_cursor();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor.row += 1;
                self.clamp_cursor();
            }
            KeyCode::Char(' ') => self.press_card(CardRegion::Body),
            KeyCode::Char('e') => self.press_card(CardRegion::EditButton),
            KeyCode::Char('d') => self.press_card(CardRegion::DeleteButton),
            KeyCode::Char('n') => {
                self.form = FormState::new();
                self.mode = AppMode::CreateGoal;
            }
            KeyCode::Char('t') => {
                self.templates = self.board.templates().await;
                self.template_index = 0;
                self.mode = AppMode::Templates;
            }
            KeyCode::Char('r') => self.reload().await,
            _ => {}
        }
    }

    fn focused_intent(&self, region: CardRegion) -> Option<CardIntent> {
        let columns = self.board.columns();
        let card = columns.get(self.cursor.column)?.card(self.cursor.row)?;
        Some(card.pointer_down(region))
    }

    /// Keys on the focused card act like a pointer-down on one of its regions.
    fn press_card(&mut self, region: CardRegion) {
        match self.focused_intent(region) {
            Some(CardIntent::BeginDrag(id)) => {
                if self.board.on_drag_start(id) {
                    self.hover = None;
                    self.mode = AppMode::Dragging;
                }
            }
            Some(CardIntent::Edit(id)) => {
                if let Some(goal) = self.board.begin_edit(id) {
                    self.form = FormState::from_goal(goal);
                    self.mode = AppMode::EditGoal(id);
                }
            }
            Some(CardIntent::Delete(id)) => self.mode = AppMode::ConfirmDelete(id),
            None => {}
        }
    }

    /// Hover target for a cursor step while dragging: the card at the
    /// destination, or the column itself when it has no card there.
    fn drag_target(&self, dragged: GoalId, column: usize, row: usize) -> Option<DropTarget> {
        let columns = self.board.columns();
        let view = columns.get(column)?;
        if view.status.index() != self.cursor.column {
            let row = row.min(view.count().saturating_sub(1));
            return Some(
                view.card(row)
                    .map_or_else(|| view.drop_target(), |card| card.drop_target()),
            );
        }
        view.card(row)
            .filter(|card| card.id() != dragged)
            .map(|card| card.drop_target())
    }

    async fn handle_drag_key(&mut self, key: KeyEvent) {
        let Some(dragged) = self.board.active_drag_id() else {
            self.mode = AppMode::Normal;
            return;
        };
        let Cursor { column, row } = self.cursor;

        let target = match key.code {
            KeyCode::Char('h') | KeyCode::Left => column
                .checked_sub(1)
                .and_then(|c| self.drag_target(dragged, c, row)),
            KeyCode::Char('l') | KeyCode::Right => self.drag_target(dragged, column + 1, row),
            KeyCode::Char('k') | KeyCode::Up => row
                .checked_sub(1)
                .and_then(|r| self.drag_target(dragged, column, r)),
            KeyCode::Char('j') | KeyCode::Down => self.drag_target(dragged, column, row + 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.board.on_drag_end(dragged, self.hover.take()).await;
                self.mode = AppMode::Normal;
                self.follow(dragged);
                return;
            }
            KeyCode::Esc => {
                self.board.cancel_drag();
                self.hover = None;
                self.mode = AppMode::Normal;
                self.follow(dragged);
                return;
            }
            _ => None,
        };

        if let Some(target) = target {
            // Each keystroke leaves the previous target before entering the next
            self.board.on_drag_leave();
            self.board.on_drag_over(dragged, target);
            self.hover = Some(target);
            self.follow(dragged);
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key) {
            FormAction::None => {}
            FormAction::Cancel => {
                self.board.end_edit();
                self.mode = AppMode::Normal;
            }
            FormAction::Submit => {
                let result = match self.mode {
                    AppMode::EditGoal(id) => self.board.update_goal(id, &self.form.form).await,
                    _ => self.board.create_goal(&self.form.form).await,
                };
                match result {
                    Ok(goal) => {
                        self.mode = AppMode::Normal;
                        self.follow(goal.id);
                    }
                    Err(GoalsError::Validation(errors)) => self.form.set_errors(&errors),
                    // Store failures surface as a notification; keep the input
                    Err(e) => tracing::debug!("Form submit failed: {}", e),
                }
            }
        }
    }

    async fn handle_confirm_key(&mut self, id: GoalId, key: KeyEvent) {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };
        if let Err(e) = self.board.delete_goal(id, &Preconfirmed(answer)).await {
            tracing::debug!("Delete failed: {}", e);
        }
        self.mode = AppMode::Normal;
        self.clamp_cursor();
    }

    async fn handle_template_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.mode = AppMode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.template_index + 1 < self.templates.len() {
                    self.template_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.template_index = self.template_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                let Some(template) = self.templates.get(self.template_index).cloned() else {
                    return;
                };
                if let Ok(goal) = self.board.add_from_template(&template).await {
                    self.mode = AppMode::Normal;
                    self.follow(goal.id);
                }
            }
            _ => {}
        }
    }

    pub async fn run(&mut self) -> GoalsResult<()> {
        self.reload().await;
        let mut terminal = setup_terminal()?;
        let mut events = EventHandler::new();

        while !self.should_quit {
            terminal.draw(|frame| ui::render(self, frame))?;

            match events.next().await {
                Some(Event::Key(key)) => self.handle_key(key).await,
                Some(Event::Tick) => self.expire_banner(),
                None => break,
            }
        }

        events.stop();
        restore_terminal(&mut terminal)?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
