use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use voxhost::cli::{CliArgs, CliCommand, ExportFormat};
use voxhost::dispatch::{CommandRegistry, DispatchOutcome};
use voxhost::host::{create_host, start, HostKind};
use voxhost::keymap::{compile, load_raw_bindings, parse_chord, BindingTable, RawBindingTable};
use voxhost::VoxConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    voxhost::tracing::init(args.log_file);

    let config = VoxConfig::load();
    let kind = args.platform(&config);
    let overrides = if args.no_overrides {
        None
    } else {
        config
            .keymap_overrides()
            .context("Failed to load keymap overrides")?
    };

    match &args.command {
        CliCommand::List => list(kind, overrides),
        CliCommand::Resolve { chords } => resolve(kind, overrides, chords),
        CliCommand::Check { path } => check(kind, path),
        CliCommand::Export { format } => export(kind, *format),
        CliCommand::Simulate { chords } => simulate(kind, overrides, chords),
    }
}

fn print_table(table: &BindingTable) {
    for entry in table.iter() {
        println!(
            "{:<24} {:<22} {}",
            entry.chord.to_string(),
            entry.command_name(),
            entry.description
        );
    }
}

fn list(kind: HostKind, overrides: Option<RawBindingTable>) -> Result<()> {
    let (_host, session) = start(kind, overrides)?;
    let table = session.table()?;
    print_table(&table);
    for diagnostic in table.diagnostics() {
        eprintln!("override: {}", diagnostic);
    }
    Ok(())
}

fn resolve(kind: HostKind, overrides: Option<RawBindingTable>, chords: &[String]) -> Result<()> {
    let (_host, session) = start(kind, overrides)?;
    for text in chords {
        let chord = match parse_chord(text) {
            Ok(chord) => chord,
            Err(e) => {
                println!("{:<24} error: {}", text, e);
                continue;
            }
        };
        match session.resolve(&chord)? {
            DispatchOutcome::Unbound => println!("{:<24} unbound", text),
            DispatchOutcome::NoOp => println!("{:<24} nop (swallowed)", text),
            DispatchOutcome::Invoke(name) => println!("{:<24} {}", text, name),
        }
    }
    Ok(())
}

fn check(kind: HostKind, path: &std::path::Path) -> Result<()> {
    let user = load_raw_bindings(path)?;
    let own = compile(&user).with_context(|| format!("{} does not compile", path.display()))?;
    println!("{}: {} bindings", path.display(), own.len());
    for diagnostic in own.diagnostics() {
        println!("duplicate: {}", diagnostic);
    }

    // Show which platform bindings the file would replace
    let platform = create_host(kind, None).raw_bindings()?;
    let base_len = platform.len();
    let layered = compile(&platform.layer(user))?;
    for diagnostic in layered.diagnostics() {
        let voxhost::keymap::Diagnostic::Overridden { previous, .. } = diagnostic;
        if previous.index < base_len {
            println!("overrides {}: {}", kind, diagnostic);
        }
    }
    Ok(())
}

fn export(kind: HostKind, format: ExportFormat) -> Result<()> {
    let raw = create_host(kind, None).raw_bindings()?;
    let text = match format {
        ExportFormat::Json => raw.to_json()?,
        ExportFormat::Yaml => raw.to_yaml()?,
    };
    println!("{}", text);
    Ok(())
}

fn simulate(kind: HostKind, overrides: Option<RawBindingTable>, chords: &[String]) -> Result<()> {
    let (_host, session) = start(kind, overrides)?;

    let invoked = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    for name in session.table()?.command_names() {
        let invoked = invoked.clone();
        let owned = name.to_string();
        registry.register(name, move || {
            invoked.borrow_mut().push(owned.clone());
            Ok(())
        });
    }

    println!("session: {}", session.version().unwrap_or("?"));

    let dispatcher = session.dispatcher()?;
    for text in chords {
        let chord = parse_chord(text).with_context(|| format!("Invalid chord {:?}", text))?;
        let disposition = dispatcher.handle(&chord, &mut registry);
        let ran = invoked.borrow_mut().drain(..).collect::<Vec<_>>();
        println!("{:<24} {:?} {}", text, disposition, ran.join(", "));
    }
    Ok(())
}
