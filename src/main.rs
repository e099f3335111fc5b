//! makeshift-vet - terminal editor for a cat's injury record.

use std::io;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use makeshift_vet::config::Cli;
use makeshift_vet::logging::init_tracing;
use makeshift_vet::pipeline::{self, CatEditor};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.tracing_config()).context("failed to initialize logging")?;

    let cat = cli.load_cat().context("failed to load seed record")?;
    let reporter = cli.reporter().context("failed to open report sink")?;
    let editor = Rc::new(CatEditor::new(cat, reporter));
    editor.report_current();

    if cli.print {
        pipeline::print_once(&editor, &mut io::stdout().lock())?;
        return Ok(());
    }

    info!(mode = ?cli.mode, "starting editor");
    let handle = pipeline::mount(editor.clone(), cli.mode).context("failed to set up terminal")?;
    let result = pipeline::run(&editor, &handle);
    handle.unmount();
    result.context("event loop failed")?;

    info!(revision = editor.store().revision(), "editor closed");
    Ok(())
}
