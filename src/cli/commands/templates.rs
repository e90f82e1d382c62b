//! Templates command - manage message templates

use super::{confirm_delete, format_time, print_json};
use crate::api::templates::{render_template, template_variables};
use crate::api::TemplatesApi;
use crate::app::Console;
use crate::cli::args::{ContentArgs, OutputFormat, TemplatesAction, TemplatesArgs};
use crate::error::{DeskError, DeskResult};
use crate::ui::{self, TaskSpinner, UiContext};
use std::collections::BTreeMap;
use tokio::fs;

/// Execute the templates command
pub async fn execute(args: TemplatesArgs, console: &Console) -> DeskResult<()> {
    console.require("/templates").await?;

    let api = console.templates();
    let ctx = console.ui();

    let result = match args.action {
        TemplatesAction::List { format } => list(&api, ctx, format).await,
        TemplatesAction::Show { id, format } => show(&api, ctx, &id, format).await,
        TemplatesAction::Add { name, content } => add(&api, ctx, &name, content).await,
        TemplatesAction::Update { id, name, content } => {
            update(&api, ctx, &id, &name, content).await
        }
        TemplatesAction::Delete { id, yes } => delete(&api, ctx, &id, yes).await,
        TemplatesAction::Preview { id, values, local } => {
            preview(&api, &id, values.into_iter().collect(), local).await
        }
        TemplatesAction::Generate {
            business_type,
            purpose,
            format,
        } => generate(&api, ctx, &business_type, &purpose, format).await,
    };

    result.map_err(|e| console.report(e))
}

async fn list(api: &TemplatesApi, ctx: &UiContext, format: OutputFormat) -> DeskResult<()> {
    let list = api.list().await?;

    match format {
        OutputFormat::Json => print_json(&list)?,
        OutputFormat::Plain => {
            for template in &list.templates {
                println!("{}", template.id.as_deref().unwrap_or(template.name.as_str()));
            }
        }
        OutputFormat::Table => {
            if list.templates.is_empty() {
                ui::step_info(ctx, "No templates yet");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = list
                .templates
                .iter()
                .map(|t| {
                    vec![
                        t.id.clone().unwrap_or_else(|| "-".to_string()),
                        t.name.clone(),
                        t.variables.join(", "),
                        format_time(t.updated_at.or(t.created_at)),
                    ]
                })
                .collect();
            ui::table(ctx, &["ID", "NAME", "VARIABLES", "UPDATED"], &rows);
            println!();
            println!("{} template(s)", list.total);
        }
    }

    Ok(())
}

async fn show(api: &TemplatesApi, ctx: &UiContext, id: &str, format: OutputFormat) -> DeskResult<()> {
    let template = api.get(id).await?;

    match format {
        OutputFormat::Json => print_json(&template)?,
        OutputFormat::Plain => println!("{}", template.content),
        OutputFormat::Table => {
            ui::key_value(ctx, "Name", &template.name);
            ui::key_value(ctx, "Variables", &template.variables.join(", "));
            ui::key_value(ctx, "Created", &format_time(template.created_at));
            ui::key_value(ctx, "Updated", &format_time(template.updated_at));
            ui::note(ctx, "Content", &template.content);
        }
    }

    Ok(())
}

async fn read_content(content: ContentArgs) -> DeskResult<String> {
    let text = match (content.content, content.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .await
            .map_err(|e| DeskError::io(format!("reading {}", path.display()), e))?,
        (None, None) => return Err(DeskError::User("template content is required".to_string())),
    };

    if text.trim().is_empty() {
        return Err(DeskError::User("template content is empty".to_string()));
    }
    Ok(text)
}

fn show_variables(ctx: &UiContext, content: &str) {
    let variables = template_variables(content);
    if variables.is_empty() {
        ui::remark(ctx, "No {placeholders} found");
    } else {
        ui::key_value(ctx, "Variables", &variables.join(", "));
    }
}

async fn add(api: &TemplatesApi, ctx: &UiContext, name: &str, content: ContentArgs) -> DeskResult<()> {
    let content = read_content(content).await?;
    let id = api.create(name, &content).await?;

    ui::step_ok(ctx, &format!("Created template {}", name));
    ui::key_value(ctx, "ID", &id);
    show_variables(ctx, &content);
    Ok(())
}

async fn update(
    api: &TemplatesApi,
    ctx: &UiContext,
    id: &str,
    name: &str,
    content: ContentArgs,
) -> DeskResult<()> {
    let content = read_content(content).await?;
    let response = api.update(id, name, &content).await?;

    ui::step_ok(ctx, &response.message);
    show_variables(ctx, &content);
    Ok(())
}

async fn delete(api: &TemplatesApi, ctx: &UiContext, id: &str, yes: bool) -> DeskResult<()> {
    if !confirm_delete(ctx, &format!("template {}", id), yes).await? {
        ui::remark(ctx, "Cancelled");
        return Ok(());
    }

    let response = api.delete(id).await?;
    ui::step_ok(ctx, &response.message);
    Ok(())
}

async fn preview(
    api: &TemplatesApi,
    id: &str,
    values: BTreeMap<String, String>,
    local: bool,
) -> DeskResult<()> {
    let rendered = if local {
        let template = api.get(id).await?;
        render_template(&template.content, &values)
    } else {
        api.preview(id, &values).await?
    };

    println!("{}", rendered);
    Ok(())
}

async fn generate(
    api: &TemplatesApi,
    ctx: &UiContext,
    business_type: &str,
    purpose: &str,
    format: OutputFormat,
) -> DeskResult<()> {
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Generating drafts...");
    let result = api.generate(business_type, purpose).await;
    spinner.clear();
    let suggestions = result?;

    match format {
        OutputFormat::Json => print_json(&suggestions)?,
        OutputFormat::Plain => {
            for suggestion in &suggestions {
                println!("{}", suggestion.content);
            }
        }
        OutputFormat::Table => {
            for suggestion in &suggestions {
                ui::note(ctx, &suggestion.style, &suggestion.content);
            }
            ui::remark(ctx, "Save one with: dmdesk templates add <name> --content '...'");
        }
    }

    Ok(())
}
