use clap::{Args, Parser, Subcommand};
use goalboard_domain::GoalStatus;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "goalboard")]
#[command(about = "A kanban board for personal wellness goals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the goals data file (or set GOALBOARD_FILE)
    #[arg(long, value_name = "FILE", env = "GOALBOARD_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Whose board to open (or set GOALBOARD_OWNER)
    #[arg(long, value_name = "UUID", env = "GOALBOARD_OWNER", global = true)]
    pub owner: Option<Uuid>,

    /// Undo a move locally when saving it fails
    #[arg(long, global = true)]
    pub rollback: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Goal operations
    Goal(GoalCommand),
    /// Suggested goal operations
    Template(TemplateCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_status(s: &str) -> Result<GoalStatus, String> {
    s.parse::<GoalStatus>().map_err(|e| e.to_string())
}

#[derive(Args)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub action: GoalAction,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals in board order
    List,
    /// Show the four columns with their goals and counts
    Board,
    /// Create a goal
    Create(GoalCreateArgs),
    /// Update a goal; only the given fields change
    Update(GoalUpdateArgs),
    /// Delete a goal after confirmation
    Delete {
        #[arg(long)]
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Drag a goal onto another goal or a column
    Move(GoalMoveArgs),
}

#[derive(Args)]
pub struct GoalCreateArgs {
    #[arg(long)]
    pub title: String,
    /// nutrition, sport, wellbeing or other
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: Option<String>,
    /// not-started, in-progress, consolidating or achieved
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct GoalUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct GoalMoveArgs {
    #[arg(long)]
    pub id: Uuid,
    #[command(flatten)]
    pub target: MoveTarget,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct MoveTarget {
    /// Drop onto this goal's card
    #[arg(long, value_name = "ID")]
    pub over_card: Option<Uuid>,
    /// Drop onto an empty part of this column
    #[arg(long, value_name = "STATUS", value_parser = parse_status)]
    pub over_column: Option<GoalStatus>,
}

#[derive(Args)]
pub struct TemplateCommand {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List suggested goals
    List,
    /// Add a suggested goal to the board
    Add(TemplateAddArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct TemplateAddArgs {
    /// Position in `template list`
    #[arg(long)]
    pub index: Option<usize>,
    /// Id of a stored template
    #[arg(long)]
    pub id: Option<Uuid>,
}
