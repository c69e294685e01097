use crate::cli::{TemplateAction, TemplateAddArgs};
use crate::context::CliContext;
use crate::output;
use goalboard_domain::GoalTemplate;
use serde::Serialize;

#[derive(Serialize)]
struct IndexedTemplate {
    index: usize,
    #[serde(flatten)]
    template: GoalTemplate,
}

pub async fn handle(ctx: &mut CliContext, action: TemplateAction) -> anyhow::Result<()> {
    match action {
        TemplateAction::List => {
            let templates: Vec<IndexedTemplate> = ctx
                .board
                .templates()
                .await
                .into_iter()
                .enumerate()
                .map(|(index, template)| IndexedTemplate { index, template })
                .collect();
            output::output_list(templates);
        }
        TemplateAction::Add(args) => {
            let template = find_template(ctx, &args).await;
            match ctx.board.add_from_template(&template).await {
                Ok(goal) => output::output_success(&goal),
                Err(e) => output::output_error(&e.to_string()),
            }
        }
    }
    Ok(())
}

async fn find_template(ctx: &CliContext, args: &TemplateAddArgs) -> GoalTemplate {
    let templates = ctx.board.templates().await;
    let found = match (args.index, args.id) {
        (Some(index), _) => templates.into_iter().nth(index),
        (None, Some(id)) => templates.into_iter().find(|t| t.id == Some(id)),
        (None, None) => None,
    };
    match found {
        Some(template) => template,
        None => output::output_error("Template not found"),
    }
}
