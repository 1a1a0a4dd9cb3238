use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use regex::Regex;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::outline::{resolve_path, NodeId, OutlineTree};
use crate::session::ViewerSession;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load()?;
    apply_flag_overrides(&mut settings, cli);

    match &cli.command {
        Some(Commands::Tree { file }) => _tree(file, &settings),
        Some(Commands::Path { file, at }) => _path(file, at.as_deref(), &settings),
        Some(Commands::Show { file, at }) => _show(file, at.as_deref(), &settings),
        Some(Commands::Find { file, pattern }) => _find(file, pattern, &settings),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    }
}

/// Command-line flags sit on top of every configured layer; the clamp
/// matches the one applied when settings load.
fn apply_flag_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(max_depth) = cli.max_depth {
        settings.max_depth = max_depth.max(1);
    }
}

fn open_session(file: &str, settings: &Settings) -> CliResult<ViewerSession> {
    let path = PathBuf::from(shellexpand::tilde(file).into_owned());
    let mut session = ViewerSession::new(settings.max_depth);
    session.load(&path)?;
    Ok(session)
}

#[instrument]
fn _tree(file: &str, settings: &Settings) -> CliResult<()> {
    debug!("file: {:?}", file);
    let session = open_session(file, settings)?;
    let Some(doc) = session.document() else {
        return Ok(());
    };
    output::header(&doc.path().display());
    if let Some(rendered) = to_termtree(doc.tree()) {
        print!("{rendered}");
    }
    Ok(())
}

#[instrument]
fn _path(file: &str, at: Option<&str>, settings: &Settings) -> CliResult<()> {
    debug!("file: {:?}, at: {:?}", file, at);
    let child_path = parse_node_path(at)?;
    let mut session = open_session(file, settings)?;
    session.select_at(&child_path)?;
    if let Some(path) = session.selected_path() {
        output::info(&path);
    }
    Ok(())
}

#[instrument]
fn _show(file: &str, at: Option<&str>, settings: &Settings) -> CliResult<()> {
    debug!("file: {:?}, at: {:?}", file, at);
    let child_path = parse_node_path(at)?;
    let mut session = open_session(file, settings)?;
    session.select_at(&child_path)?;
    if let Some(payload) = session.selected_payload() {
        output::info(payload);
    }
    Ok(())
}

#[instrument]
fn _find(file: &str, pattern: &str, settings: &Settings) -> CliResult<()> {
    debug!("file: {:?}, pattern: {:?}", file, pattern);
    let matcher = Regex::new(pattern)?;
    let session = open_session(file, settings)?;
    let Some(tree) = session.tree() else {
        return Ok(());
    };
    for (node_id, node) in tree.iter() {
        if matcher.is_match(&node.data.label) {
            if let Some(path) = resolve_path(tree, node_id) {
                output::info(&path);
            }
        }
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match config::global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("no config directory available"),
            }
            Ok(())
        }
    }
}

fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Dotted 0-based child indexes, e.g. `0.2.1`; empty means the root.
fn parse_node_path(at: Option<&str>) -> CliResult<Vec<usize>> {
    let Some(spec) = at else {
        return Ok(Vec::new());
    };
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split('.')
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| CliError::InvalidNodePath(spec.to_string()))
        })
        .collect()
}

/// Assemble the printable outline bottom-up so rendering never recurses.
fn to_termtree(tree: &OutlineTree) -> Option<Tree<String>> {
    let root = tree.root()?;
    let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
    for (node_id, node) in tree.iter_postorder() {
        let leaves: Vec<_> = node
            .children
            .iter()
            .filter_map(|child| built.remove(child))
            .collect();
        built.insert(node_id, Tree::new(node.data.to_string()).with_leaves(leaves));
    }
    built.remove(&root)
}
