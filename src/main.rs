use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use epiphany::cli::{CliArgs, Command, WorkspaceCommand};
use epiphany::config_paths;
use epiphany::doc::{parse_markdown, to_markdown};
use epiphany::model::{now_epoch_secs, AppModel};
use epiphany::replay::{parse_script, run_script};
use epiphany::runtime::Runtime;
use epiphany::workspace::{new_note_id, note_title, ContentItem, Workspace, UNNAMED_NOTE};
use epiphany::EditorConfig;

fn registry_file(args: &CliArgs) -> Result<PathBuf> {
    args.registry
        .clone()
        .or_else(config_paths::workspace_registry_file)
        .ok_or_else(|| anyhow!("No config directory available for the workspace registry"))
}

fn print_outline(model: &AppModel) {
    match &model.outline {
        Some(outline) if !outline.is_empty() => {
            for row in &outline.rows {
                println!("{:>4}  {}  #{}", row.padding_left, row.label, row.target_id);
            }
        }
        _ => println!("(no headings)"),
    }
}

fn outline(note: PathBuf, config: EditorConfig) -> Result<()> {
    let source =
        fs::read_to_string(&note).with_context(|| format!("Failed to read {}", note.display()))?;
    let model = AppModel::new(parse_markdown(&source), config);
    print_outline(&model);
    Ok(())
}

fn replay(note: PathBuf, script: PathBuf, write: bool, config: EditorConfig) -> Result<()> {
    let source =
        fs::read_to_string(&note).with_context(|| format!("Failed to read {}", note.display()))?;
    let script_source = fs::read_to_string(&script)
        .with_context(|| format!("Failed to read {}", script.display()))?;
    let steps = parse_script(&script_source)
        .with_context(|| format!("Invalid script {}", script.display()))?;

    let mut runtime = Runtime::new(AppModel::new(parse_markdown(&source), config));
    run_script(&mut runtime, &steps)?;

    let model = runtime.model();
    let markdown = to_markdown(model.document());
    println!("{}", markdown.trim_end());
    println!();
    println!("--- outline ---");
    print_outline(model);
    println!("--- updated {} ---", model.last_updated.time_ago(now_epoch_secs()));
    if model.ui.sidebar_folded {
        println!("(sidebar folded)");
    }

    if write {
        fs::write(&note, markdown).with_context(|| format!("Failed to write {}", note.display()))?;
    }
    Ok(())
}

fn workspace(command: &WorkspaceCommand, registry: PathBuf) -> Result<()> {
    match command {
        WorkspaceCommand::Init { path } => {
            let (workspace, content) = Workspace::first_time_setup(&registry, path)?;
            println!("Workspace ready at {}", workspace.root().display());
            for item in content.items() {
                println!("  {} ({})", item.name, item.filename);
            }
        }
        WorkspaceCommand::Show => {
            let (_, content) = Workspace::load(&registry)?;
            println!("{} ({})", content.workspace_title, content.absolute_path.display());
            for item in content.items() {
                println!("  {}  {}  {}", item.id, item.filename, item.name);
            }
        }
        WorkspaceCommand::New => {
            let (mut workspace, mut content) = Workspace::load(&registry)?;
            let id = new_note_id();
            let filename = workspace.create_note(&id)?;
            content.content_table.push(ContentItem {
                name: UNNAMED_NOTE.to_string(),
                filename: filename.clone(),
                id: id.clone(),
                children: Vec::new(),
            });
            workspace.update_content(&content)?;
            println!("{}  {}", id, filename);
        }
        WorkspaceCommand::Open { filename } => {
            let (workspace, _) = Workspace::load(&registry)?;
            print!("{}", workspace.load_note(filename)?);
        }
        WorkspaceCommand::Save { id, from } => {
            let (mut workspace, mut content) = Workspace::load(&registry)?;
            let text = fs::read_to_string(from)
                .with_context(|| format!("Failed to read {}", from.display()))?;
            let title = note_title(&parse_markdown(&text));

            let item = content
                .find_mut(id)
                .ok_or_else(|| anyhow!("No note with id {} in the content table", id))?;
            let filename = workspace.save_note(id, &title, &item.filename, &text)?;
            item.filename = filename.clone();
            item.name = title;
            workspace.update_content(&content)?;
            println!("{}", filename);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    epiphany::tracing::init();

    let config = EditorConfig::load();

    match args.command {
        Command::Outline { note } => outline(note, config),
        Command::Replay {
            note,
            script,
            write,
        } => replay(note, script, write, config),
        Command::Config { save } => {
            print!("{}", serde_yaml::to_string(&config)?);
            if save {
                config.save().map_err(|e| anyhow!(e))?;
            }
            Ok(())
        }
        Command::Workspace(ref command) => {
            let registry = registry_file(&args)?;
            workspace(command, registry)
        }
    }
}
