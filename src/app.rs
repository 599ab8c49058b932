use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::form::{FormValues, MessageStyle};
use crate::output::{self, OutputFormat};
use crate::resolver;
use crate::session::{Session, SessionSettings};
use crate::tabs::{IdGenerator, SequentialIds, TabId, TimestampIds};

fn print_banner() {
    const BANNER: &str = r#"
                  ____      __    __
   ____ ___  __  __/ / /_____ _/ /_  / /__
  / __ `__ \/ / / / / __/ __ `/ __ \/ / _ \
 / / / / / / /_/ / / /_/ /_/ / /_/ / /  __/
/_/ /_/ /_/\__,_/_/\__/\__,_/_.___/_/\___/

       v0.1.0 - multiplication table generator
    "#;
    eprint!("{}", BANNER);
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push_str("\nUsage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments().filter(|a| !a.is_hide_set()) {
        let heading = arg.get_help_heading().unwrap_or("Options").to_string();
        let idx = *section_idx.entry(heading.clone()).or_insert_with(|| {
            sections.push((heading, Vec::new()));
            sections.len() - 1
        });
        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }
            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.contains(&rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");
            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push_str(&format!(" <{value_name}>"));
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }
            out.push('\n');
        }
    }

    out
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    settings: SessionSettings,
    bounds: FormValues,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    timestamp_ids: bool,
    interactive: bool,
    verbose: u8,
}

impl RunConfig {
    fn id_generator(&self) -> Box<dyn IdGenerator> {
        if self.timestamp_ids {
            Box::new(TimestampIds::new())
        } else {
            Box::new(SequentialIds::new())
        }
    }
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let domain = match args.domain.as_deref() {
        Some(raw) => crate::utils::parse_domain_range(raw)
            .map_err(|e| format!("invalid --domain '{raw}': {e}"))?,
        None => crate::utils::validate_domain(
            cfg.domain_min.unwrap_or(resolver::DEFAULT_DOMAIN.min()),
            cfg.domain_max.unwrap_or(resolver::DEFAULT_DOMAIN.max()),
        )?,
    };

    let max_cells = match args.max_cells.as_deref() {
        Some(raw) => crate::utils::parse_max_cells(raw)
            .map_err(|e| format!("invalid --max-cells '{raw}': {e}"))?,
        None => cfg.max_cells.unwrap_or(resolver::DEFAULT_MAX_CELLS),
    };
    if max_cells == 0 {
        return Err("invalid max_cells, expected positive integer".to_string());
    }

    let message_style = if args.aggregate_errors {
        MessageStyle::Aggregated
    } else {
        match cfg.message_style.as_deref() {
            Some(raw) => MessageStyle::parse(raw).ok_or_else(|| {
                format!("invalid message_style '{raw}', expected per_field or aggregated")
            })?,
            None => MessageStyle::PerField,
        }
    };

    let output_path = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}'"))?,
        None => output_path
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let interactive = args.interactive;
    let tabbed = interactive || args.tabs || cfg.tabs.unwrap_or(false);
    let timestamp_ids = args.timestamp_ids || cfg.timestamp_ids.unwrap_or(false);

    let has_bounds = [&args.h_start, &args.h_end, &args.v_start, &args.v_end]
        .iter()
        .any(|b| b.is_some());
    if !interactive && !has_bounds {
        return Err("no table bounds given (use --hs/--he/--vs/--ve or --interactive)".to_string());
    }
    let bounds = FormValues::new(
        args.h_start.unwrap_or_default(),
        args.h_end.unwrap_or_default(),
        args.v_start.unwrap_or_default(),
        args.v_end.unwrap_or_default(),
    );

    Ok(RunConfig {
        settings: SessionSettings {
            domain,
            max_cells,
            message_style,
            tabbed,
        },
        bounds,
        output: output_path,
        output_format,
        no_color,
        timestamp_ids,
        interactive,
        verbose: args.verbose,
    })
}

fn log_settings(run: &RunConfig) {
    if run.verbose == 0 {
        return;
    }
    format_kv_line("Domain", &run.settings.domain.to_string());
    format_kv_line("Max cells", &run.settings.max_cells.to_string());
    format_kv_line("Tabs", format_bool(run.settings.tabbed));
    if run.verbose > 1 {
        format_kv_line("Format", &format!("{:?}", run.output_format).to_lowercase());
        format_kv_line("Output", run.output.as_deref().unwrap_or("stdout"));
    }
}

fn print_messages(messages: &[String]) {
    for m in messages {
        eprintln!("{} {}", "!".red().bold(), m.red());
    }
}

fn write_output(path: Option<&str>, rendered: &[u8]) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| format!("failed to write output file '{path}': {e}")),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write output: {e}"))
        }
    }
}

fn run_once(run: &RunConfig) -> Result<(), String> {
    let mut session = Session::new(run.settings, run.id_generator());
    match session.submit(&run.bounds) {
        Ok(submission) => {
            if run.verbose > 0 {
                format_kv_line("Table", &submission.title);
                format_kv_line("Cells", &submission.range.cells().to_string());
                if let Some(tab) = submission.tab.as_ref() {
                    format_kv_line("Tab", tab.as_str());
                }
            }
            let records = output::build_records(&session);
            let rendered = output::render(run.output_format, &records);
            write_output(run.output.as_deref(), &rendered)
        }
        Err(e) => {
            print_messages(session.errors());
            Err(format!("table not generated: {e}"))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    New(FormValues),
    Close(TabId),
    CloseAll,
    Activate(TabId),
    Clear,
    List,
    Show(Option<TabId>),
    Save(String),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let arg = |i: usize| rest.get(i).copied().unwrap_or_default().to_string();
    let id = |name: &str| -> Result<TabId, String> {
        rest.first()
            .map(|s| TabId::new(*s))
            .ok_or_else(|| format!("usage: {name} ID"))
    };

    let cmd = match head.to_lowercase().as_str() {
        "new" | "n" => {
            if rest.len() > 4 {
                return Err("usage: new HSTART HEND VSTART VEND".to_string());
            }
            Command::New(FormValues::new(arg(0), arg(1), arg(2), arg(3)))
        }
        "close" | "x" => Command::Close(id("close")?),
        "close-all" | "closeall" => Command::CloseAll,
        "activate" | "tab" => Command::Activate(id("activate")?),
        "clear" | "reset" => Command::Clear,
        "list" | "ls" => Command::List,
        "show" => Command::Show(rest.first().map(|s| TabId::new(*s))),
        "save" => {
            let path = rest.join(" ");
            if path.trim().is_empty() {
                return Err("usage: save FILE".to_string());
            }
            Command::Save(config::expand_tilde_string(path.trim()))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(cmd))
}

const INTERACTIVE_HELP: &str = "\
commands:
  new HS HE VS VE   build a table and open it in a new tab
  close ID          close one tab
  close-all         close every tab except the controls tab
  activate ID       switch to a tab
  clear             reset the form and messages (tabs stay open)
  list              list open tabs
  show [ID]         print a tab (default: the active one)
  save FILE         write all open tabs (format from extension, default html)
  help              this text
  quit              leave
";

fn show_tab<W: Write>(session: &Session, id: Option<&TabId>, out: &mut W) -> Result<(), String> {
    let registry = session.registry();
    let tab = match id {
        Some(id) => registry
            .get(id)
            .ok_or_else(|| format!("no tab with id '{id}'"))?,
        None => registry.active(),
    };
    let Some(grid) = tab.grid.as_ref() else {
        return writeln!(out, "{} (no table)", tab.title).map_err(|e| e.to_string());
    };
    let record = output::record_for_grid(&tab.title, grid);
    out.write_all(&output::render_text(&[record]))
        .map_err(|e| e.to_string())
}

fn list_tabs<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let registry = session.registry();
    for tab in registry.tabs() {
        let marker = if registry.active_id() == &tab.id {
            "*"
        } else {
            " "
        };
        let size = tab
            .grid
            .as_ref()
            .map(|g| format!("{}x{}", g.height(), g.width()))
            .unwrap_or_default();
        writeln!(out, "{marker} {:<24} {:<28} {size}", tab.id, tab.title)?;
    }
    Ok(())
}

/// Runs one command against the session. `Ok(false)` ends the loop.
fn apply_command<W: Write>(
    session: &mut Session,
    cmd: Command,
    out: &mut W,
    verbose: u8,
) -> Result<bool, String> {
    let io_err = |e: io::Error| e.to_string();
    match cmd {
        Command::New(values) => match session.submit(&values) {
            Ok(submission) => {
                let id = submission.tab.map(|t| t.to_string()).unwrap_or_default();
                writeln!(out, "{} {id} {}", "+".green().bold(), submission.title)
                    .map_err(io_err)?;
                if verbose > 0 {
                    format_kv_line("Cells", &submission.range.cells().to_string());
                }
            }
            Err(_) => print_messages(session.errors()),
        },
        Command::Close(id) => {
            if session.close_tab(&id) {
                writeln!(out, "{} {id}", "-".yellow().bold()).map_err(io_err)?;
            } else {
                writeln!(out, "nothing to close for '{id}'").map_err(io_err)?;
            }
        }
        Command::CloseAll => {
            let closed = session.close_all();
            writeln!(out, "closed {closed} tab(s)").map_err(io_err)?;
        }
        Command::Activate(id) => {
            if !session.activate(&id) {
                return Err(format!("no tab with id '{id}'"));
            }
        }
        Command::Clear => session.clear(),
        Command::List => list_tabs(session, out).map_err(io_err)?,
        Command::Show(id) => show_tab(session, id.as_ref(), out)?,
        Command::Save(path) => {
            let format = output::infer_format_from_path(&path).unwrap_or(OutputFormat::Html);
            let records = output::build_records(session);
            write_output(Some(&path), &output::render(format, &records))?;
            writeln!(out, "saved {} tab(s) to {path}", records.len()).map_err(io_err)?;
        }
        Command::Help => out.write_all(INTERACTIVE_HELP.as_bytes()).map_err(io_err)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    verbose: u8,
) -> Result<(), String> {
    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read command: {e}"))?;
        let result = parse_command(&line).and_then(|cmd| match cmd {
            Some(cmd) => apply_command(session, cmd, out, verbose),
            None => Ok(true),
        });
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("{} {e}", "!".red().bold()),
        }
    }
    Ok(())
}

fn run_interactive(run: &RunConfig) -> Result<(), String> {
    print_banner();
    let mut session = Session::new(run.settings, run.id_generator());
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut session, stdin.lock(), &mut stdout, run.verbose)?;

    if let Some(path) = run.output.as_deref() {
        let records = output::build_records(&session);
        write_output(Some(path), &output::render(run.output_format, &records))?;
        if run.verbose > 0 {
            format_kv_line("Saved", path);
        }
    }
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = match args.config.as_deref() {
            Some(p) => config::expand_tilde(p),
            None => config::default_config_path()
                .ok_or_else(|| "could not determine home directory".to_string())?,
        };
        let written = config::ensure_default_config_file(&path)?;
        let state = if written { "written" } else { "already exists" };
        println!(":: Config    : {} ({state})", path.display());
        return Ok(());
    }

    let cfg = match args.config.as_deref() {
        Some(p) => config::load_config(&config::expand_tilde(p), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    if run.no_color {
        colored::control::set_override(false);
    }
    log_settings(&run);

    if run.interactive {
        run_interactive(&run)
    } else {
        run_once(&run)
    }
}
