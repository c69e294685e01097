use crate::app::{App, AppMode};
use crate::components::centered_rect;
use crate::form::FormField;
use crate::theme::*;
use goalboard_domain::{
    CardView, CategoryBadge, ColumnView, DropTarget, GoalId, GoalStore, DELETE_PROMPT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render<S: GoalStore>(app: &App<S>, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    render_board(app, frame, chunks[0]);
    render_footer(app, frame, chunks[1]);

    match app.mode {
        AppMode::Dragging => render_floating_card(app, frame, chunks[0]),
        AppMode::CreateGoal => render_form_popup(app, frame, "New goal"),
        AppMode::EditGoal(_) => render_form_popup(app, frame, "Edit goal"),
        AppMode::ConfirmDelete(id) => render_delete_popup(app, frame, id),
        AppMode::Templates => render_templates_popup(app, frame),
        AppMode::Normal => {}
    }
}

fn render_board<S: GoalStore>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let columns = app.board.columns();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (index, (column, column_area)) in columns.iter().zip(areas.iter()).enumerate() {
        render_column(app, frame, *column_area, column, index);
    }
}

fn is_hovered(hover: Option<DropTarget>, column: &ColumnView<'_>) -> bool {
    match hover {
        Some(DropTarget::Column(status)) => status == column.status,
        Some(DropTarget::Card(id)) => column.cards.iter().any(|c| c.id() == id),
        None => false,
    }
}

fn render_column<S: GoalStore>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    column: &ColumnView<'_>,
    index: usize,
) {
    let focused = app.cursor.column == index;
    let border = if app.mode == AppMode::Dragging && is_hovered(app.hover, column) {
        drop_target_border()
    } else if focused {
        focused_border()
    } else {
        unfocused_border()
    };

    let title = format!(" {} {} ({}) ", column.icon(), column.title(), column.count());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);

    if column.is_empty() {
        let empty = Paragraph::new("Drop a goal here")
            .style(label_text())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = column
        .cards
        .iter()
        .enumerate()
        .map(|(row, card)| {
            let selected = focused && app.cursor.row == row && app.mode != AppMode::Dragging;
            card_item(card, selected)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn card_item<'a>(card: &CardView<'a>, selected: bool) -> ListItem<'a> {
    let badge = card.badge();
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", badge.icon.glyph()), badge_style(badge.color)),
        Span::styled(card.title(), normal_text().add_modifier(Modifier::BOLD)),
    ])];
    lines.push(Line::from(Span::styled(badge.label(), badge_style(badge.color))));
    if let Some(description) = card.description() {
        lines.push(Line::from(Span::styled(description, label_text())));
    }
    lines.push(Line::from(""));

    let style = if card.is_dragging {
        ghost_card()
    } else {
        selected_item(selected)
    };
    ListItem::new(lines).style(style)
}

/// Duplicate of the dragged card following the cursor.
fn render_floating_card<S: GoalStore>(app: &App<S>, frame: &mut Frame, board: Rect) {
    let Some(goal) = app.board.active_goal() else {
        return;
    };
    let column_width = board.width / 4;
    let width = column_width.saturating_sub(2).max(12).min(board.width);
    let x = board.x + (app.cursor.column as u16 * column_width).min(board.width - width);
    let area = Rect {
        x,
        y: board.y + board.height.saturating_sub(4),
        width,
        height: 3.min(board.height),
    };

    frame.render_widget(Clear, area);
    let widget = Paragraph::new(goal.title.as_str())
        .style(floating_card())
        .block(
            Block::default()
                .title(" moving ")
                .borders(Borders::ALL)
                .border_style(drop_target_border()),
        );
    frame.render_widget(widget, area);
}

fn help_text(mode: AppMode) -> &'static str {
    match mode {
        AppMode::Normal => {
            "h/l: column  j/k: goal  space: pick up  n: new  e: edit  d: delete  t: suggestions  r: reload  q: quit"
        }
        AppMode::Dragging => "h/j/k/l: move  space/enter: drop  esc: cancel",
        AppMode::CreateGoal | AppMode::EditGoal(_) => {
            "tab: next field  left/right: change choice  enter: save  esc: cancel"
        }
        AppMode::ConfirmDelete(_) => "y: delete  n: keep",
        AppMode::Templates => "j/k: select  enter: add  esc: close",
    }
}

fn render_footer<S: GoalStore>(app: &App<S>, frame: &mut Frame, area: Rect) {
    if let Some(banner) = &app.banner {
        banner.render(frame, area);
        return;
    }
    let help = Paragraph::new(help_text(app.mode))
        .style(label_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_form_popup<S: GoalStore>(app: &App<S>, frame: &mut Frame, title: &str) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = app.form.field == field;
        let label_style = if focused { bold_highlight() } else { label_text() };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let mut value = app.form.display_value(field);
        if focused && matches!(field, FormField::Title | FormField::Description) {
            value.push('_');
        } else if focused {
            value = format!("< {} >", value);
        }
        lines.push(Line::from(Span::styled(value, normal_text())));

        if let Some(error) = app.form.error_for(field) {
            lines.push(Line::from(Span::styled(error.message.clone(), error_text())));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_delete_popup<S: GoalStore>(app: &App<S>, frame: &mut Frame, id: GoalId) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);

    let title = app
        .board
        .goal(id)
        .map(|g| g.title.as_str())
        .unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(DELETE_PROMPT, bold_highlight())),
        Line::from(Span::styled(title, normal_text())),
        Line::from(""),
        Line::from(Span::styled("(y/n)", label_text())),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(error_text())
            .style(popup_bg()),
    );
    frame.render_widget(widget, area);
}

fn render_templates_popup<S: GoalStore>(app: &App<S>, frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let badge = CategoryBadge::for_category(template.category);
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} ", badge.icon.glyph()), badge_style(badge.color)),
                Span::styled(template.title.as_str(), normal_text()),
            ])];
            if let Some(description) = &template.description {
                lines.push(Line::from(Span::styled(description.as_str(), label_text())));
            }
            ListItem::new(lines).style(selected_item(index == app.template_index))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Suggested goals ")
            .borders(Borders::ALL)
            .border_style(focused_border())
            .style(popup_bg()),
    );
    frame.render_widget(list, area);
}
