//! Entry lookup commands.

use super::{OutputFormat, print_entries_table, print_json};
use etymon::models::LinkedTerm;
use etymon::{EntryQuery, LexiconBackend, LexiconService, NodeId};
use std::error::Error;

/// Lists entries for a word.
pub fn cmd_lookup<B: LexiconBackend>(
    service: &LexiconService<B>,
    word: &str,
    lang: Option<String>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let mut query = EntryQuery::new();
    query.lang_code = lang;
    query.limit = limit;

    let entries = service.find_entries_by_word(word, &query)?;

    match format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table if entries.is_empty() => println!("No entries found for '{word}'."),
        OutputFormat::Table => print_entries_table(&entries),
    }

    Ok(())
}

/// Shows one entry in full.
pub fn cmd_entry<B: LexiconBackend>(
    service: &LexiconService<B>,
    node_id: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let id = NodeId::new(node_id);
    let entry = service
        .get_entry_by_node_id(&id)?
        .ok_or_else(|| format!("Entry '{node_id}' not found"))?;

    if format == OutputFormat::Json {
        return print_json(&entry);
    }

    println!("Entry: {}", entry.word);
    println!("======={}", "=".repeat(entry.word.chars().count()));
    println!();
    println!("Node ID:     {}", entry.node_id);
    println!("Language:    {} ({})", entry.lang.as_deref().unwrap_or("-"), entry.lang_code);
    println!("POS:         {}", entry.pos.as_deref().unwrap_or("-"));
    println!("Etymology:   {}", entry.etymology_index());
    if let Some(text) = &entry.etymology_text {
        println!();
        println!("{text}");
    }
    if let Some(templates) = &entry.etymology_templates {
        println!();
        println!("Templates:");
        for template in templates {
            let expansion = template.expansion.as_deref().unwrap_or("");
            println!("  {:<12} {expansion}", template.name);
        }
    }
    print_term_list("Derived", entry.derived.as_deref());
    print_term_list("Alternative of", entry.alt_of.as_deref());
    print_term_list("Form of", entry.form_of.as_deref());
    if let Some(descendants) = &entry.descendants {
        println!();
        println!("Descendants:");
        for note in descendants {
            let depth = usize::try_from(note.depth.unwrap_or(0)).unwrap_or(0);
            let indent = "  ".repeat(depth + 1);
            let text = note.text.as_deref().or(note.word.as_deref()).unwrap_or("");
            println!("{indent}{text}");
        }
    }

    Ok(())
}

fn print_term_list(label: &str, terms: Option<&[LinkedTerm]>) {
    let Some(terms) = terms.filter(|t| !t.is_empty()) else {
        return;
    };
    let words: Vec<&str> = terms.iter().map(|t| t.word.as_str()).collect();
    println!();
    println!("{label}: {}", words.join(", "));
}
