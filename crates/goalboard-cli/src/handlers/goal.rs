use crate::cli::{GoalAction, GoalCreateArgs, GoalMoveArgs, GoalUpdateArgs};
use crate::context::CliContext;
use crate::output;
use goalboard_domain::{
    Confirm, DeleteOutcome, DragOutcome, DropTarget, Goal, GoalForm, GoalId, GoalStatus,
    Notification, Preconfirmed,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Serialize)]
struct ColumnSummary<'a> {
    status: GoalStatus,
    title: &'static str,
    icon: &'static str,
    count: usize,
    goals: Vec<&'a Goal>,
}

#[derive(Serialize)]
struct MoveReport<'a> {
    #[serde(flatten)]
    outcome: DragOutcome,
    goal: Option<&'a Goal>,
    notifications: Vec<Notification>,
}

/// Asks on stderr and reads a y/N answer from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        io::stderr().flush().ok();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn handle(ctx: &mut CliContext, action: GoalAction) -> anyhow::Result<()> {
    match action {
        GoalAction::List => {
            output::output_list(ctx.board.goals().to_vec());
        }
        GoalAction::Board => {
            let columns: Vec<ColumnSummary> = ctx
                .board
                .columns()
                .into_iter()
                .map(|column| ColumnSummary {
                    status: column.status,
                    title: column.title(),
                    icon: column.icon(),
                    count: column.count(),
                    goals: column.cards.iter().map(|card| card.goal).collect(),
                })
                .collect();
            output::output_list(columns);
        }
        GoalAction::Create(args) => {
            let form = build_create_form(args);
            match ctx.board.create_goal(&form).await {
                Ok(goal) => output::output_success(&goal),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        GoalAction::Update(args) => {
            let id = args.id;
            let Some(current) = ctx.board.goal(id) else {
                output::output_error(&format!("Goal not found: {}", id));
            };
            let form = build_update_form(GoalForm::from_goal(current), args);
            match ctx.board.update_goal(id, &form).await {
                Ok(goal) => output::output_success(&goal),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        GoalAction::Delete { id, yes } => {
            if ctx.board.goal(id).is_none() {
                output::output_error(&format!("Goal not found: {}", id));
            }
            let result = if yes {
                ctx.board.delete_goal(id, &Preconfirmed(true)).await
            } else {
                ctx.board.delete_goal(id, &StdinConfirm).await
            };
            match result {
                Ok(outcome) => output::output_success(serde_json::json!({
                    "id": id.to_string(),
                    "deleted": outcome == DeleteOutcome::Deleted,
                })),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
        GoalAction::Move(args) => handle_move(ctx, args).await,
    }
    Ok(())
}

fn build_create_form(args: GoalCreateArgs) -> GoalForm {
    let mut form = GoalForm {
        title: args.title,
        category: args.category,
        ..GoalForm::default()
    };
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    form
}

fn build_update_form(mut form: GoalForm, args: GoalUpdateArgs) -> GoalForm {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if args.clear_description {
        form.description.clear();
    }
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(status) = args.status {
        form.status = status;
    }
    form
}

/// Runs one full start, over, end gesture through the board.
async fn handle_move(ctx: &mut CliContext, args: GoalMoveArgs) {
    let id: GoalId = args.id;
    let target = match (args.target.over_card, args.target.over_column) {
        (Some(card), _) => DropTarget::Card(card),
        (None, Some(status)) => DropTarget::Column(status),
        (None, None) => output::output_error("Either --over-card or --over-column is required"),
    };
    if let DropTarget::Card(card) = target {
        if ctx.board.goal(card).is_none() {
            output::output_error(&format!("Goal not found: {}", card));
        }
    }

    if !ctx.board.on_drag_start(id) {
        output::output_error(&format!("Goal not found: {}", id));
    }
    ctx.board.on_drag_over(id, target);
    let outcome = ctx.board.on_drag_end(id, Some(target)).await;
    let notifications = ctx.board.take_notifications();

    match outcome {
        DragOutcome::Ignored => output::output_error(&format!("Goal not found: {}", id)),
        DragOutcome::Failed { .. } => {
            let message = notifications
                .last()
                .map(|n| n.message.clone())
                .unwrap_or_else(|| "Could not move the goal".to_string());
            output::output_error(&message)
        }
        outcome => output::output_success(MoveReport {
            outcome,
            goal: ctx.board.goal(id),
            notifications,
        }),
    }
}
