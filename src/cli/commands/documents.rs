//! Document commands - list and fetch indexed documents

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{DocumentLookup, DocumentPage};
use clap::Args;
use std::fmt::Write;
use std::sync::Arc;

/// Arguments for the list-documents command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page size (1-200)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Number of documents to skip
    #[arg(long, short = 'o', default_value = "0")]
    pub offset: usize,

    /// Case-insensitive filter on document id or title
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

/// Arguments for the get-document command
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document id (the file name, e.g. `intro.md`)
    pub doc_id: String,

    /// Only show metadata
    #[arg(long)]
    pub no_content: bool,

    /// Maximum content characters (200-200000)
    #[arg(long)]
    pub max_chars: Option<usize>,
}

/// Execute the list-documents command
pub fn execute_list(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.kb.build()?;

    let limit = args.limit.unwrap_or(services.config.search.default_list_limit);
    let page = services
        .kb
        .list_documents(limit, args.offset, args.name.as_deref());
    output::emit(&page, format, render_page)?;

    Ok(())
}

/// Execute the get-document command
pub fn execute_get(
    args: GetArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.kb.build()?;

    let max_chars = args
        .max_chars
        .unwrap_or(services.config.search.default_max_chars);
    let lookup = services
        .kb
        .get_document(&args.doc_id, !args.no_content, max_chars);

    if !lookup.found && format == OutputFormat::Human {
        return Err(format!(
            "Document '{}' not found. Run 'kb list-documents' to see available documents.",
            args.doc_id
        )
        .into());
    }

    output::emit(&lookup, format, render_document)?;
    Ok(())
}

/// Human-readable document page
pub fn render_page(page: &DocumentPage) -> String {
    let mut out = String::new();

    if page.items.is_empty() {
        let _ = writeln!(
            out,
            "No documents {}",
            colors::dim(&format!("(total {}, offset {})", page.total, page.offset))
        );
        return out;
    }

    let _ = writeln!(
        out,
        "Documents {}-{} of {}:\n",
        page.offset + 1,
        page.offset + page.items.len(),
        colors::number(&page.total.to_string())
    );
    for item in &page.items {
        let _ = writeln!(
            out,
            "  {} {} {}",
            colors::doc_id(&item.doc_id),
            item.title,
            colors::dim(&format!(
                "({}, {} chars)",
                output::format_bytes(item.size_bytes),
                item.content_length
            ))
        );
    }
    out
}

/// Human-readable document detail
pub fn render_document(lookup: &DocumentLookup) -> String {
    let mut out = String::new();

    let Some(doc) = &lookup.document else {
        let _ = writeln!(
            out,
            "{}: document '{}' not found",
            colors::warning("Warning"),
            lookup.doc_id
        );
        return out;
    };

    let _ = writeln!(out, "{}", colors::label(&doc.title));
    let _ = writeln!(out, "  Id:     {}", colors::doc_id(&doc.doc_id));
    let _ = writeln!(out, "  Path:   {}", colors::file_path(&doc.path));
    let _ = writeln!(
        out,
        "  Size:   {} ({} chars)",
        output::format_bytes(doc.size_bytes),
        doc.content_length
    );

    if let Some(content) = &doc.content {
        let _ = writeln!(out, "\n{content}");
        if doc.content_truncated {
            let _ = writeln!(
                out,
                "{}",
                colors::dim(&format!(
                    "[truncated: showing {} of {} chars]",
                    content.chars().count(),
                    doc.content_length
                ))
            );
        }
    }
    out
}
