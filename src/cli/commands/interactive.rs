//! Interactive command - build once, then answer queries from stdin
//!
//! Every line is a query unless it starts with `:`:
//!
//! ```text
//! :stats              index statistics
//! :list [filter]      list documents
//! :get <doc_id>       show a document
//! :build              rebuild the index
//! :help               show this help
//! :quit               leave
//! ```

use crate::cli::commands::{build, documents, search, stats};
use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const HELP: &str = "\
Type a query to search, or one of:
  :stats              index statistics
  :list [filter]      list documents
  :get <doc_id>       show a document
  :build              rebuild the index
  :help               show this help
  :quit               leave
";

/// Arguments for the interactive command
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Return every matching chunk instead of the best chunk per document
    #[arg(long)]
    pub all_chunks: bool,
}

/// Execute the interactive command
pub fn execute(
    args: InteractiveArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.kb.build()?;
    if format == OutputFormat::Human {
        eprint!("{}", build::render(&stats));
        eprintln!("{}", colors::dim("Type :help for commands, :quit to leave"));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &args,
        services,
        format,
        stdin.lock(),
        &mut stdout.lock(),
    )?;

    Ok(())
}

/// Read commands from `input` until EOF or `:quit`
///
/// Failures of individual commands are reported inline and do not end
/// the session.
pub fn run_session<R: BufRead, W: Write>(
    args: &InteractiveArgs,
    services: &Services,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    let kb = &services.kb;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let rendered = match command {
            ":quit" | ":q" | ":exit" => break,
            ":help" => Ok(HELP.to_string()),
            ":stats" => render(&kb.stats(), format, stats::render),
            ":build" => match kb.build() {
                Ok(stats) => render(&stats, format, build::render),
                Err(e) => Ok(format!("{}: {}\n", colors::error("Error"), e)),
            },
            ":list" => {
                let filter = (!rest.is_empty()).then_some(rest);
                let page = kb.list_documents(services.config.search.default_list_limit, 0, filter);
                render(&page, format, documents::render_page)
            }
            ":get" if !rest.is_empty() => {
                let lookup =
                    kb.get_document(rest, true, services.config.search.default_max_chars);
                render(&lookup, format, documents::render_document)
            }
            ":get" => Ok("Usage: :get <doc_id>\n".to_string()),
            _ => {
                let mut params = kb.default_search_params();
                params.deduplicate_docs &= !args.all_chunks;
                match kb.search(line, params) {
                    Ok(response) => render(&response, format, search::render),
                    Err(e) => Ok(format!("{}: {}\n", colors::error("Error"), e)),
                }
            }
        };

        let rendered = rendered.map_err(io::Error::other)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
    }

    Ok(())
}

fn render<T: Serialize>(
    data: &T,
    format: OutputFormat,
    human: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(human(data)),
        OutputFormat::Json => Ok(format!("{}\n", output::to_json(data)?)),
    }
}
